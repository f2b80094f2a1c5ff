use std::collections::HashSet;

use crate::{model::TypeDescriptor, report::Markup, stubs::display_name};

/// One entry of the [`TypeRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredType {
    /// Qualified metadata name
    pub full_name: String,
    /// Simple name
    pub name: String,
    /// Normalized display form, unescaped
    pub display: String,
}

/// Every type observed during a run, deduplicated by full name, in first-seen order.
///
/// The registry only grows. It is an audit log for the diagnostic type listing and does not
/// influence the generated stubs.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    entries: Vec<RegisteredType>,
    seen: HashSet<String>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        TypeRegistry::default()
    }

    /// Records `ty`; recording a type with a known full name again is a no-op.
    pub fn record(&mut self, ty: &TypeDescriptor) {
        if self.seen.contains(&ty.full_name) {
            return;
        }

        self.seen.insert(ty.full_name.clone());
        self.entries.push(RegisteredType {
            full_name: ty.full_name.clone(),
            name: ty.name.clone(),
            display: display_name(ty, Markup::Plain),
        });
    }

    /// Returns `true` if a type with `full_name` was recorded.
    #[must_use]
    pub fn contains(&self, full_name: &str) -> bool {
        self.seen.contains(full_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the recorded types in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, RegisteredType> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a TypeRegistry {
    type Item = &'a RegisteredType;
    type IntoIter = std::slice::Iter<'a, RegisteredType>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
