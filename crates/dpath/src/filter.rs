use tracing::trace;

use crate::prelude_internal::*;
use crate::resolve::resolve_segments;

/// Returns the first element of `sequence` whose `filter.path` resolves to `filter.expected`.
///
/// Elements where the sub-path does not resolve count as non-matching.
pub fn find<'a>(sequence: &'a Value, filter: &Filter) -> Result<&'a Value, PathError> {
    let index = find_index(sequence, filter)?;
    sequence
        .as_slice()
        .and_then(|items| items.get(index))
        .ok_or_else(|| {
            PathError::new(
                PathErrorKind::FilterNotFound {
                    filter: filter.to_string(),
                },
                filter_path(filter),
            )
        })
}

/// Position of the first element matching `filter`.
pub fn find_index(sequence: &Value, filter: &Filter) -> Result<usize, PathError> {
    position(sequence, filter).map_err(|kind| PathError::new(kind, filter_path(filter)))
}

pub(crate) fn position(sequence: &Value, filter: &Filter) -> Result<usize, PathErrorKind> {
    let items = sequence
        .as_slice()
        .ok_or_else(|| PathErrorKind::NotFilterable {
            filter: filter.to_string(),
            found: sequence.kind(),
        })?;
    match items.iter().position(|item| matches(item, filter)) {
        Some(index) => Ok(index),
        None => {
            trace!(%filter, candidates = items.len(), "no element matched");
            Err(PathErrorKind::FilterNotFound {
                filter: filter.to_string(),
            })
        }
    }
}

fn matches(item: &Value, filter: &Filter) -> bool {
    resolve_segments(item, &filter.path.0).is_ok_and(|value| *value == filter.expected)
}

fn filter_path(filter: &Filter) -> Path {
    Path(vec![PathSegment::Filter(filter.clone())])
}
