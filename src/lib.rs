//! # argbind
//!
//! Binds a flat list of command-line argument strings onto named, typed
//! configuration slots declared by the host application.
//!
//! Pipeline
//!
//! The arguments go through four stages, each one living in its own module under
//! src/argbind:
//!   ├── lexing     joined argument text  -> flat token stream (Identifier / Separator / Value)
//!   ├── parsing    token stream          -> ordered alias / raw value pairs
//!   ├── schema     host descriptors      -> alias lookup table
//!   ├── conversion raw value + type      -> typed value
//!   └── binding    orchestrates the above and writes into host slots
//!
//! The grammar surface is small and fixed: `-`, `--` and `/` prefixes, whitespace, `=`
//! and `:` separators, single or double quoted values, and flags that default to
//! `true` when no value follows them.
//!
//! For test helpers and the fixture host used across the test suite, see the
//! [testing module](argbind::testing).

pub mod argbind;
