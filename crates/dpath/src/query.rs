//! Chained reads and writes against one bound root.
//!
//! ```
//! use dpath::{Finder, Value, write};
//!
//! let mut doc = Value::empty_map();
//! write(&mut doc, "medication.ingredients.0.extension.url", "1").unwrap();
//!
//! Finder::new(&mut doc)
//!     .update_where("medication.ingredients", "extension.url", "1")
//!     .set("extension.value", "8")
//!     .unwrap();
//!
//! let value = Finder::new(&doc)
//!     .select_where("medication.ingredients", "extension.url", "1")
//!     .get("extension.value")
//!     .unwrap()
//!     .clone();
//! assert_eq!(value, Value::from("8"));
//! ```

use core::ops::{Deref, DerefMut};

use crate::prelude_internal::*;
use crate::resolve::{resolve_mut, resolve_with};
use crate::write::write;

/// Entry point of a query chain. `R` is any pointer to the root: `&Value` is enough for
/// reads, updates need `&mut Value` or `Box<Value>`.
#[derive(Debug, Clone)]
pub struct Finder<R> {
    root: R,
    options: Options,
}

pub fn finder<R>(root: R) -> Finder<R> {
    Finder::new(root)
}

impl<R> Finder<R> {
    pub fn new(root: R) -> Self {
        Self::with_options(root, Options::default())
    }

    pub fn with_options(root: R, options: Options) -> Self {
        Self { root, options }
    }

    pub fn select(self, path: impl Into<PathExpr>) -> Getter<R> {
        Getter {
            root: self.root,
            base: vec![path.into()],
            options: self.options,
        }
    }

    /// Selects the first element of the sequence at `path` whose `sub_path` equals `expected`.
    pub fn select_where(
        self,
        path: impl Into<PathExpr>,
        sub_path: impl Into<PathExpr>,
        expected: impl Into<Value>,
    ) -> Getter<R> {
        Getter {
            root: self.root,
            base: vec![path.into(), PathExpr::filter(sub_path, expected)],
            options: self.options,
        }
    }

    pub fn update(self, path: impl Into<PathExpr>) -> Updater<R> {
        Updater {
            root: self.root,
            base: vec![path.into()],
        }
    }

    pub fn update_where(
        self,
        path: impl Into<PathExpr>,
        sub_path: impl Into<PathExpr>,
        expected: impl Into<Value>,
    ) -> Updater<R> {
        Updater {
            root: self.root,
            base: vec![path.into(), PathExpr::filter(sub_path, expected)],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Getter<R> {
    root: R,
    base: Vec<PathExpr>,
    options: Options,
}

impl<R: Deref<Target = Value>> Getter<R> {
    /// Resolves the selected path followed by `path`.
    pub fn get(&self, path: impl Into<PathExpr>) -> Result<&Value, PathError> {
        let mut exprs = self.base.clone();
        exprs.push(path.into());
        resolve_with(&self.root, exprs, &self.options)
    }
}

#[derive(Debug, Clone)]
pub struct Updater<R> {
    root: R,
    base: Vec<PathExpr>,
}

impl<R: DerefMut<Target = Value>> Updater<R> {
    /// Writes `value` at the selected path followed by `path` and returns the root.
    pub fn set(
        &mut self,
        path: impl Into<PathExpr>,
        value: impl Into<Value>,
    ) -> Result<&mut Value, PathError> {
        let mut exprs = self.base.clone();
        exprs.push(path.into());
        write(&mut self.root, exprs, value)
    }

    /// Adds `value` to the container at the selected path and returns the root.
    ///
    /// Arrays are pushed to, sets gain the value if absent, and tuples are rebuilt one
    /// element longer.
    pub fn append(&mut self, value: impl Into<Value>) -> Result<&mut Value, PathError> {
        let path = self.base.as_slice().into_path()?;
        let value = value.into();
        let target = resolve_mut(&mut self.root, &path)?;
        match target {
            Value::Array(array) => array.push(value),
            Value::Set(set) => {
                set.insert(value);
            }
            Value::Tuple(tuple) => {
                let mut items = core::mem::take(&mut tuple.0);
                items.push(value);
                *tuple = Tuple(items);
            }
            other => {
                return Err(PathError::new(
                    PathErrorKind::NotAppendable {
                        found: other.kind(),
                    },
                    path,
                ));
            }
        }
        Ok(&mut *self.root)
    }

    pub fn into_root(self) -> R {
        self.root
    }
}
