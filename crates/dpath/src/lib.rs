#![doc = include_str!("../README.md")]

/// Tagged map/sequence/scalar structure the engine walks.
pub mod value;

/// Path segments, filter clauses and path normalization.
pub mod path;

pub mod error;

/// Call options.
pub mod options;

/// Eager path resolution.
pub mod resolve;

/// Lazy path traversal that fans out across sequences.
pub mod walk;

/// Equality filters over sequences of maps.
pub mod filter;

/// Path writes that materialize missing containers.
pub mod write;

pub mod query;

/// Shallow record merge.
pub mod merge;

pub use error::{ErrorCause, PathError, PathErrorKind};
pub use merge::merge;
pub use options::Options;
pub use path::{Filter, IntoPath, Path, PathExpr, PathSegment};
pub use query::{Finder, Getter, Updater, finder};
pub use resolve::{resolve, resolve_mut, resolve_or, resolve_with};
pub use value::{Array, Map, Set, Tuple, Value, ValueKind};
pub use walk::{Step, Walk, walk};
pub use write::{MAX_PADDING, write};

pub(crate) mod prelude_internal {
    #![allow(unused_imports)]
    pub use crate::error::{ErrorCause, PathError, PathErrorKind};
    pub use crate::options::Options;
    pub use crate::path::{Filter, IntoPath, Path, PathExpr, PathSegment};
    pub use crate::value::{Array, Map, Set, Tuple, Value, ValueKind};
    pub use thisisplural::Plural;
}
