//! Schema aggregation: resolve a set of named entries into one group

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::context::ValidatorContext;
use crate::error::Result;

type EntryFactory<T> = Arc<dyn Fn(&ValidatorContext) -> Result<T> + Send + Sync>;

/// Either a factory still waiting for the context, or an already-resolved value
pub enum SchemaEntry<T> {
    Factory(EntryFactory<T>),
    Resolved(T),
}

impl<T> SchemaEntry<T> {
    pub fn factory<F>(f: F) -> Self
    where
        F: Fn(&ValidatorContext) -> Result<T> + Send + Sync + 'static,
    {
        SchemaEntry::Factory(Arc::new(f))
    }

    pub fn resolved(value: T) -> Self {
        SchemaEntry::Resolved(value)
    }

    pub fn is_factory(&self) -> bool {
        matches!(self, SchemaEntry::Factory(_))
    }
}

impl<T: Clone> SchemaEntry<T> {
    pub fn resolve(&self, ctx: &ValidatorContext) -> Result<T> {
        match self {
            SchemaEntry::Factory(f) => f(ctx),
            SchemaEntry::Resolved(value) => Ok(value.clone()),
        }
    }
}

impl<T: Clone> Clone for SchemaEntry<T> {
    fn clone(&self) -> Self {
        match self {
            SchemaEntry::Factory(f) => SchemaEntry::Factory(Arc::clone(f)),
            SchemaEntry::Resolved(value) => SchemaEntry::Resolved(value.clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SchemaEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaEntry::Factory(_) => write!(f, "Factory(..)"),
            SchemaEntry::Resolved(value) => f.debug_tuple("Resolved").field(value).finish(),
        }
    }
}

/// Ordered, name-unique entries awaiting aggregation
#[derive(Debug, Clone)]
pub struct SchemaEntries<T> {
    entries: Vec<(String, SchemaEntry<T>)>,
}

impl<T> Default for SchemaEntries<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> SchemaEntries<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry; re-inserting a name replaces it in place
    pub fn insert(&mut self, name: impl Into<String>, entry: impl Into<SchemaEntry<T>>) {
        let name = name.into();
        let entry = entry.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((name, entry)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, entry: impl Into<SchemaEntry<T>>) -> Self {
        self.insert(name, entry);
        self
    }

    pub fn get(&self, name: &str) -> Option<&SchemaEntry<T>> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaEntry<T>)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A resolved, named collection of schemas
#[derive(Debug, Clone)]
pub struct SchemaGroup<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for SchemaGroup<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> SchemaGroup<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: T) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: T) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Transform every value, keeping names and order
    pub fn try_map<U>(self, mut f: impl FnMut(T) -> Result<U>) -> Result<SchemaGroup<U>> {
        let mut entries = Vec::with_capacity(self.entries.len());
        for (name, value) in self.entries {
            entries.push((name, f(value)?));
        }
        Ok(SchemaGroup { entries })
    }
}

impl<N: Into<String>, T> FromIterator<(N, T)> for SchemaGroup<T> {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut group = SchemaGroup::new();
        for (name, value) in iter {
            group.insert(name, value);
        }
        group
    }
}

impl<T> IntoIterator for SchemaGroup<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// Order does not take part in equality.
impl<T: PartialEq> PartialEq for SchemaGroup<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

/// Resolve every entry against one context.
///
/// Factories are invoked with `ctx`; resolved values pass through unchanged.
/// The input is left untouched and the output keeps its names and order. The
/// first factory error aborts aggregation and is returned as-is.
pub fn aggregate<T: Clone>(entries: &SchemaEntries<T>, ctx: &ValidatorContext) -> Result<SchemaGroup<T>> {
    let mut group = SchemaGroup::new();
    for (name, entry) in entries.iter() {
        debug!(name, factory = entry.is_factory(), family = %ctx.family, "aggregating schema entry");
        group.insert(name, entry.resolve(ctx)?);
    }
    Ok(group)
}
