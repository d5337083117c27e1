use tracing::trace;

use crate::filter;
use crate::prelude_internal::*;

/// Resolves `path` against `root`, failing on the first segment that does not resolve.
///
/// An empty path returns `root`. Once a `null` is reached the remaining segments are
/// ignored and the `null` is returned.
pub fn resolve(root: &Value, path: impl IntoPath) -> Result<&Value, PathError> {
    let path = path.into_path()?;
    resolve_segments(root, &path.0)
}

/// Like [`resolve`], but returns `default` as soon as any segment fails to resolve.
///
/// Malformed paths still fail; only lookup failures are suppressed.
pub fn resolve_or<'a>(
    root: &'a Value,
    path: impl IntoPath,
    default: &'a Value,
) -> Result<&'a Value, PathError> {
    let path = path.into_path()?;
    match resolve_segments(root, &path.0) {
        Ok(value) => Ok(value),
        Err(error) => {
            trace!(%error, "path did not resolve, returning default");
            Ok(default)
        }
    }
}

/// Resolves with the default carried by `options`, if any.
pub fn resolve_with<'a>(
    root: &'a Value,
    path: impl IntoPath,
    options: &'a Options,
) -> Result<&'a Value, PathError> {
    match &options.default {
        Some(default) => resolve_or(root, path, default),
        None => resolve(root, path),
    }
}

/// Mutable counterpart of [`resolve`].
pub fn resolve_mut(root: &mut Value, path: impl IntoPath) -> Result<&mut Value, PathError> {
    let path = path.into_path()?;
    let segments = &path.0;
    let mut current = root;
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 && current.is_null() {
            break;
        }
        current = step_mut(current, segment)
            .map_err(|kind| PathError::new(kind, Path::from(&segments[..=i])))?;
    }
    Ok(current)
}

pub(crate) fn resolve_segments<'a>(
    root: &'a Value,
    segments: &[PathSegment],
) -> Result<&'a Value, PathError> {
    let mut current = root;
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 && current.is_null() {
            trace!(remaining = segments.len() - i, "reached null, stopping");
            break;
        }
        current = step(current, segment)
            .map_err(|kind| PathError::new(kind, Path::from(&segments[..=i])))?;
    }
    Ok(current)
}

/// Consumes exactly one segment.
pub(crate) fn step<'a>(value: &'a Value, segment: &PathSegment) -> Result<&'a Value, PathErrorKind> {
    match segment {
        PathSegment::Index(index) => {
            let items = value.as_slice().ok_or(PathErrorKind::NotIndexable {
                index: *index,
                found: value.kind(),
            })?;
            items.get(*index).ok_or(PathErrorKind::IndexOutOfRange {
                index: *index,
                len: items.len(),
            })
        }
        PathSegment::Key(key) => match value {
            Value::Map(map) => map
                .get(key)
                .ok_or_else(|| PathErrorKind::KeyNotFound { key: key.clone() }),
            other => Err(PathErrorKind::NotKeyable {
                key: key.clone(),
                found: other.kind(),
            }),
        },
        PathSegment::Filter(clause) => {
            let index = filter::position(value, clause)?;
            value
                .as_slice()
                .and_then(|items| items.get(index))
                .ok_or_else(|| PathErrorKind::FilterNotFound {
                    filter: clause.to_string(),
                })
        }
    }
}

fn step_mut<'a>(
    value: &'a mut Value,
    segment: &PathSegment,
) -> Result<&'a mut Value, PathErrorKind> {
    let found = value.kind();
    match segment {
        PathSegment::Index(index) => {
            let items = value.as_mut_slice().ok_or(PathErrorKind::NotIndexable {
                index: *index,
                found,
            })?;
            let len = items.len();
            items
                .get_mut(*index)
                .ok_or(PathErrorKind::IndexOutOfRange { index: *index, len })
        }
        PathSegment::Key(key) => match value {
            Value::Map(map) => map
                .get_mut(key)
                .ok_or_else(|| PathErrorKind::KeyNotFound { key: key.clone() }),
            _ => Err(PathErrorKind::NotKeyable {
                key: key.clone(),
                found,
            }),
        },
        PathSegment::Filter(clause) => {
            let index = filter::position(value, clause)?;
            value
                .as_mut_slice()
                .and_then(|items| items.get_mut(index))
                .ok_or_else(|| PathErrorKind::FilterNotFound {
                    filter: clause.to_string(),
                })
        }
    }
}
