//! Parameter schema
//!
//! Hosts declare their parameters as a plain list of [`ParameterDescriptor`] values, each one
//! naming a slot, the slot's scalar type and every alias the slot answers to. The resolver
//! turns that list into a [`SchemaTable`], the alias lookup the binder works against.
//!
//! Alias collisions are a schema error raised when the table is built. A descriptor may
//! list several aliases, and several descriptors may point at the same slot; what they may
//! not do is share an alias.

use crate::argbind::conversion::{Value, ValueType};
use crate::argbind::error::SchemaError;
use crate::argbind::options::{AliasMatching, BinderOptions};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Opaque name of a host-owned storage location
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotRef(String);

impl SlotRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SlotRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SlotRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for SlotRef {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Host objects whose slots the binder writes into.
///
/// The binder only writes, it never reads a slot back. Values always carry the type the
/// slot's descriptor declared.
pub trait Slots {
    fn assign(&mut self, slot: &SlotRef, value: Value);
}

/// Ordered slot -> value store for hosts that don't keep their own struct
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValueMap {
    values: BTreeMap<SlotRef, Value>,
}

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: &str) -> Option<&Value> {
        self.values.get(slot)
    }

    pub fn insert(&mut self, slot: impl Into<SlotRef>, value: Value) -> Option<Value> {
        self.values.insert(slot.into(), value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SlotRef, &Value)> {
        self.values.iter()
    }
}

impl Slots for ValueMap {
    fn assign(&mut self, slot: &SlotRef, value: Value) {
        self.values.insert(slot.clone(), value);
    }
}

/// Declaration binding a set of aliases to a slot and its value type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub slot: SlotRef,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub aliases: Vec<String>,
}

impl ParameterDescriptor {
    pub fn new(slot: impl Into<SlotRef>, value_type: ValueType) -> Self {
        Self {
            slot: slot.into(),
            value_type,
            aliases: Vec::new(),
        }
    }

    pub fn string(slot: impl Into<SlotRef>) -> Self {
        Self::new(slot, ValueType::String)
    }

    pub fn boolean(slot: impl Into<SlotRef>) -> Self {
        Self::new(slot, ValueType::Bool)
    }

    pub fn int32(slot: impl Into<SlotRef>) -> Self {
        Self::new(slot, ValueType::Int32)
    }

    pub fn int64(slot: impl Into<SlotRef>) -> Self {
        Self::new(slot, ValueType::Int64)
    }

    pub fn float(slot: impl Into<SlotRef>) -> Self {
        Self::new(slot, ValueType::Float)
    }

    /// Add an alias. Repeating an alias already on this descriptor is a no-op.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if !self.aliases.contains(&alias) {
            self.aliases.push(alias);
        }
        self
    }

    pub fn aliases<I, S>(self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        aliases.into_iter().fold(self, |descriptor, a| descriptor.alias(a))
    }
}

/// Alias -> descriptor lookup. Immutable once built.
#[derive(Debug, Clone)]
pub struct SchemaTable {
    descriptors: Vec<ParameterDescriptor>,
    by_alias: HashMap<String, usize>,
    matching: AliasMatching,
}

impl SchemaTable {
    /// Build the table, folding aliases according to `matching`.
    pub fn build(
        descriptors: &[ParameterDescriptor],
        matching: AliasMatching,
    ) -> Result<Self, SchemaError> {
        let mut by_alias: HashMap<String, usize> = HashMap::new();

        for (index, descriptor) in descriptors.iter().enumerate() {
            if descriptor.aliases.is_empty() {
                return Err(SchemaError::EmptyAliases {
                    slot: descriptor.slot.clone(),
                });
            }
            for alias in &descriptor.aliases {
                if alias.is_empty() {
                    return Err(SchemaError::EmptyAlias {
                        slot: descriptor.slot.clone(),
                    });
                }
                let key = matching.fold(alias);
                match by_alias.get(&key) {
                    // Same alias twice on one descriptor (possible through serde) is harmless
                    Some(&existing) if existing == index => {}
                    Some(&existing) => {
                        return Err(SchemaError::DuplicateAlias {
                            alias: alias.clone(),
                            first: descriptors[existing].slot.clone(),
                            second: descriptor.slot.clone(),
                        });
                    }
                    None => {
                        by_alias.insert(key, index);
                    }
                }
            }
        }

        Ok(Self {
            descriptors: descriptors.to_vec(),
            by_alias,
            matching,
        })
    }

    pub fn lookup(&self, alias: &str) -> Option<&ParameterDescriptor> {
        self.by_alias
            .get(self.matching.fold(alias).as_str())
            .map(|&index| &self.descriptors[index])
    }

    pub fn descriptors(&self) -> &[ParameterDescriptor] {
        &self.descriptors
    }

    pub fn matching(&self) -> AliasMatching {
        self.matching
    }

    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }
}

/// Build an exact-match alias table.
pub fn resolve(descriptors: &[ParameterDescriptor]) -> Result<SchemaTable, SchemaError> {
    SchemaTable::build(descriptors, AliasMatching::Exact)
}

/// A schema document as loaded by tools: binder options plus the parameter list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub options: BinderOptions,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
}

impl Schema {
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }
}
