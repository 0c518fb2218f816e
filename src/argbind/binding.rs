//! Binder
//!
//!     Runs the whole pipeline for one `parse` call and writes the converted values into the
//!     host's slots:
//!
//!         arguments -> lex -> reduce -> lookup in the schema table -> convert -> write
//!
//!     An empty argument list is a successful no-op. Every error aborts the rest of the call.
//!
//! Apply Modes
//!
//!     In [ApplyMode::Atomic] (the default) every pair is looked up and converted before the
//!     first slot is written, so a failing call leaves every slot as it was. In
//!     [ApplyMode::BestEffort] each pair is written as soon as it converts and a failure
//!     leaves the earlier writes of the same call in place.
//!
//! Re-entrancy
//!
//!     Slots are never reset. A call only overwrites the slots whose aliases it mentions;
//!     everything else keeps whatever an earlier call or the host put there. Two aliases of
//!     the same slot in one call are both applied, in order, so the later one ends up in the
//!     slot.

use crate::argbind::conversion::{convert, Value};
use crate::argbind::error::{BindError, SchemaError};
use crate::argbind::lexing::lex_arguments;
use crate::argbind::options::{ApplyMode, BinderOptions};
use crate::argbind::parsing::{reduce, ParsedArguments};
use crate::argbind::schema::{ParameterDescriptor, SchemaTable, SlotRef, Slots};
use serde::Serialize;
use std::collections::HashSet;

/// A value written into a slot, as reported back to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub alias: String,
    pub raw: String,
    pub slot: SlotRef,
    pub value: Value,
}

/// Binds argument lists against a schema resolved once, up front.
#[derive(Debug, Clone)]
pub struct Binder {
    table: SchemaTable,
    options: BinderOptions,
}

impl Binder {
    /// Resolve `descriptors` with default options.
    pub fn new(descriptors: &[ParameterDescriptor]) -> Result<Self, SchemaError> {
        Self::with_options(descriptors, BinderOptions::default())
    }

    pub fn with_options(
        descriptors: &[ParameterDescriptor],
        options: BinderOptions,
    ) -> Result<Self, SchemaError> {
        let table = SchemaTable::build(descriptors, options.alias_matching)?;
        Ok(Self { table, options })
    }

    pub fn options(&self) -> &BinderOptions {
        &self.options
    }

    pub fn table(&self) -> &SchemaTable {
        &self.table
    }

    /// Lex and reduce `args` without touching any slot.
    pub fn reduce_only<S: AsRef<str>>(&self, args: &[S]) -> Result<ParsedArguments, BindError> {
        let tokens = lex_arguments(args)?;
        Ok(reduce(tokens)?)
    }

    /// Bind `args` into `slots`.
    pub fn parse<S, T>(&self, args: &[S], slots: &mut T) -> Result<Vec<Assignment>, BindError>
    where
        S: AsRef<str>,
        T: Slots + ?Sized,
    {
        self.parse_with(args, slots, |_, _| {})
    }

    /// Bind `args` into `slots`, calling `notify` after every slot write.
    pub fn parse_with<S, T, F>(
        &self,
        args: &[S],
        slots: &mut T,
        mut notify: F,
    ) -> Result<Vec<Assignment>, BindError>
    where
        S: AsRef<str>,
        T: Slots + ?Sized,
        F: FnMut(&ParameterDescriptor, &Value),
    {
        if args.is_empty() {
            return Ok(Vec::new());
        }

        let parsed = self.reduce_only(args)?;
        let mut applied = Vec::with_capacity(parsed.len());

        match self.options.apply_mode {
            ApplyMode::Atomic => {
                let pending = self
                    .resolve_pairs(parsed)
                    .collect::<Result<Vec<_>, _>>()?;
                for (descriptor, assignment) in pending {
                    Self::write(&mut *slots, descriptor, &assignment, &mut notify);
                    applied.push(assignment);
                }
            }
            ApplyMode::BestEffort => {
                for resolved in self.resolve_pairs(parsed) {
                    let (descriptor, assignment) = resolved?;
                    Self::write(&mut *slots, descriptor, &assignment, &mut notify);
                    applied.push(assignment);
                }
            }
        }

        tracing::debug!(assignments = applied.len(), "arguments bound");
        Ok(applied)
    }

    /// Look up and convert each pair lazily, in first-seen order.
    ///
    /// Pairs whose alias folds onto one already seen in this call are skipped, so the first
    /// occurrence wins under case-insensitive matching too.
    fn resolve_pairs(
        &self,
        parsed: ParsedArguments,
    ) -> impl Iterator<Item = Result<(&ParameterDescriptor, Assignment), BindError>> + '_ {
        let mut seen = HashSet::new();
        parsed
            .into_iter()
            .filter(move |pair| seen.insert(self.options.alias_matching.fold(&pair.alias)))
            .map(move |pair| -> Result<_, BindError> {
                let (descriptor, value) = self.resolve_pair(&pair.alias, &pair.raw)?;
                let assignment = Assignment {
                    slot: descriptor.slot.clone(),
                    alias: pair.alias,
                    raw: pair.raw,
                    value,
                };
                Ok((descriptor, assignment))
            })
    }

    fn resolve_pair(
        &self,
        alias: &str,
        raw: &str,
    ) -> Result<(&ParameterDescriptor, Value), BindError> {
        let descriptor = self
            .table
            .lookup(alias)
            .ok_or_else(|| BindError::UnknownParameter {
                alias: alias.to_string(),
            })?;
        let value = convert(raw, descriptor.value_type).map_err(|cause| {
            BindError::InvalidValue {
                alias: alias.to_string(),
                raw: raw.to_string(),
                cause,
            }
        })?;
        Ok((descriptor, value))
    }

    fn write<T, F>(
        slots: &mut T,
        descriptor: &ParameterDescriptor,
        assignment: &Assignment,
        notify: &mut F,
    ) where
        T: Slots + ?Sized,
        F: FnMut(&ParameterDescriptor, &Value),
    {
        tracing::debug!(
            alias = %assignment.alias,
            slot = %assignment.slot,
            value = %assignment.value,
            "assigning slot"
        );
        slots.assign(&descriptor.slot, assignment.value.clone());
        notify(descriptor, &assignment.value);
    }
}

/// Resolve `descriptors` and bind `args` into `slots` in one go.
pub fn parse<S, T>(
    args: &[S],
    descriptors: &[ParameterDescriptor],
    slots: &mut T,
) -> Result<Vec<Assignment>, BindError>
where
    S: AsRef<str>,
    T: Slots + ?Sized,
{
    if args.is_empty() {
        return Ok(Vec::new());
    }
    Binder::new(descriptors)?.parse(args, slots)
}
