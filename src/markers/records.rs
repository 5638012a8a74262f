//! Reshaping between name-keyed mappings and sequences of named records.
//!
//! Both schemas index sets and markers by name. The pipeline filters and
//! converts plain sequences, so each entry travels as a [`Named`] pair and
//! is re-keyed at the end.

use indexmap::IndexMap;

/// A record together with the name it is keyed by
#[derive(Debug, Clone, PartialEq)]
pub struct Named<T> {
    pub name: String,
    pub record: T,
}

impl<T> Named<T> {
    pub fn new(name: impl Into<String>, record: T) -> Self {
        Self {
            name: name.into(),
            record,
        }
    }

    /// Replace the record, keeping the name
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Named<U> {
        Named {
            name: self.name,
            record: f(self.record),
        }
    }
}

/// Turn a name-keyed mapping into a sequence of named records
pub fn flatten<T>(mapping: IndexMap<String, T>) -> Vec<Named<T>> {
    mapping
        .into_iter()
        .map(|(name, record)| Named { name, record })
        .collect()
}

/// Re-key a sequence of named records. A repeated name keeps the last record.
pub fn unflatten<T>(records: impl IntoIterator<Item = Named<T>>) -> IndexMap<String, T> {
    let mut mapping = IndexMap::new();
    for Named { name, record } in records {
        mapping.insert(name, record);
    }
    mapping
}
