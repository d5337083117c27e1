use indexmap::IndexSet;

use crate::prelude_internal::*;

/// Call options shared by the resolver, the query builder and [`merge`](crate::merge::merge).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Options {
    /// Returned instead of failing when a lookup does not resolve.
    /// `None` keeps resolution strict.
    pub default: Option<Value>,
    /// Keys whose sequences are unioned rather than overwritten when merging.
    pub fields_to_be_merged: IndexSet<String>,
}

impl Options {
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_fields_to_be_merged<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields_to_be_merged
            .extend(fields.into_iter().map(Into::into));
        self
    }
}
