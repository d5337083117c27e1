use tracing::trace;

use crate::filter;
use crate::prelude_internal::*;
use crate::resolve::resolve_mut;

/// How far past the end of an array an index may reach when writing.
pub const MAX_PADDING: usize = 1024;

/// Writes `value` at `path` inside `root`, creating missing containers on the way, and
/// returns `root`.
///
/// A missing key becomes an array when the following segment is an index or a filter
/// clause, and a map otherwise. Intermediate indices past the end of an array pad it with
/// empty maps.
///
/// A terminal index does not always append. When it addresses an existing element, that
/// element is replaced, so writing `a.0` twice leaves a single element. Only an index at or
/// past the end pads and appends.
///
/// The first segment must be a key, and an index may not reach more than [`MAX_PADDING`]
/// positions past the end of an array. A failed write leaves `root` unchanged.
///
/// ```
/// use dpath::{Value, resolve, write};
///
/// let mut doc = Value::empty_map();
/// write(&mut doc, "medication.label.0.ingredient.form", "comprimé").unwrap();
/// assert_eq!(
///     resolve(&doc, "medication.label.0.ingredient.form").unwrap(),
///     &Value::from("comprimé"),
/// );
/// ```
pub fn write(
    root: &mut Value,
    path: impl IntoPath,
    value: impl Into<Value>,
) -> Result<&mut Value, PathError> {
    let path = path.into_path()?;
    write_segments(root, &path.0, value.into())?;
    Ok(root)
}

/// The first container a write created. Everything below it is new, so undoing it alone
/// restores the document.
enum Created {
    /// `key` was inserted into the map reached after `depth` segments.
    Key { depth: usize, key: String },
    /// The array reached after `depth` segments was padded from `len` elements.
    Padding { depth: usize, len: usize },
}

fn write_segments(
    root: &mut Value,
    segments: &[PathSegment],
    value: Value,
) -> Result<(), PathError> {
    match segments.first() {
        None | Some(PathSegment::Key(_)) => {}
        Some(other) => {
            return Err(PathError::new(
                PathErrorKind::InvalidLeadingSegment {
                    segment: other.to_string(),
                },
                Path::from(&segments[..1]),
            ));
        }
    }

    let mut created = None;
    let result = write_tracked(root, segments, value, &mut created);
    if let (Err(error), Some(created)) = (&result, created) {
        trace!(%error, "write failed, removing created containers");
        rollback(root, segments, created);
    }
    result
}

fn write_tracked(
    root: &mut Value,
    segments: &[PathSegment],
    value: Value,
    created: &mut Option<Created>,
) -> Result<(), PathError> {
    let Some((last, init)) = segments.split_last() else {
        return Ok(());
    };
    let mut current = root;
    for (depth, segment) in init.iter().enumerate() {
        let next = &segments[depth + 1];
        current = descend(current, segment, next, depth, created)
            .map_err(|kind| PathError::new(kind, Path::from(&segments[..=depth])))?;
    }
    assign(current, last, value).map_err(|kind| PathError::new(kind, Path::from(segments)))
}

fn rollback(root: &mut Value, segments: &[PathSegment], created: Created) {
    let depth = match created {
        Created::Key { depth, .. } | Created::Padding { depth, .. } => depth,
    };
    let Ok(container) = resolve_mut(root, Path::from(&segments[..depth])) else {
        return;
    };
    match (created, container) {
        (Created::Key { key, .. }, Value::Map(map)) => {
            map.0.shift_remove(&key);
        }
        (Created::Padding { len, .. }, Value::Array(array)) => array.0.truncate(len),
        _ => {}
    }
}

/// Moves one segment down, materializing the target if it is missing.
fn descend<'a>(
    current: &'a mut Value,
    segment: &PathSegment,
    next: &PathSegment,
    depth: usize,
    created: &mut Option<Created>,
) -> Result<&'a mut Value, PathErrorKind> {
    let found = current.kind();
    match (segment, current) {
        (PathSegment::Index(index), Value::Array(array)) => {
            let len = array.0.len();
            if *index >= len {
                check_padding(*index, len)?;
                if created.is_none() {
                    *created = Some(Created::Padding { depth, len });
                }
                pad(array, *index + 1);
            }
            Ok(&mut array.0[*index])
        }
        (PathSegment::Index(index), Value::Tuple(tuple)) => {
            let len = tuple.0.len();
            tuple
                .0
                .get_mut(*index)
                .ok_or(PathErrorKind::IndexOutOfRange { index: *index, len })
        }
        (PathSegment::Key(key), Value::Map(map)) => {
            if created.is_none() && !map.contains_key(key) {
                *created = Some(Created::Key {
                    depth,
                    key: key.clone(),
                });
            }
            Ok(map.get_or_insert_with(key, || {
                trace!(%key, "creating missing container");
                container_for(next)
            }))
        }
        (PathSegment::Filter(clause), current) => {
            let index = filter::position(current, clause)?;
            current
                .as_mut_slice()
                .and_then(|items| items.get_mut(index))
                .ok_or_else(|| PathErrorKind::FilterNotFound {
                    filter: clause.to_string(),
                })
        }
        (segment, _) => Err(PathErrorKind::ShapeMismatch {
            segment: segment.to_string(),
            found,
        }),
    }
}

fn assign(current: &mut Value, last: &PathSegment, value: Value) -> Result<(), PathErrorKind> {
    let found = current.kind();
    match (last, current) {
        (PathSegment::Key(key), Value::Map(map)) => {
            map.insert(key.clone(), value);
            Ok(())
        }
        (PathSegment::Index(index), Value::Array(array)) => {
            if let Some(slot) = array.0.get_mut(*index) {
                *slot = value;
            } else {
                check_padding(*index, array.0.len())?;
                pad(array, *index);
                array.push(value);
            }
            Ok(())
        }
        (PathSegment::Index(index), Value::Tuple(tuple)) => {
            let len = tuple.0.len();
            let slot = tuple
                .0
                .get_mut(*index)
                .ok_or(PathErrorKind::IndexOutOfRange { index: *index, len })?;
            *slot = value;
            Ok(())
        }
        (PathSegment::Filter(clause), current) => {
            let index = filter::position(current, clause)?;
            if let Some(slot) = current
                .as_mut_slice()
                .and_then(|items| items.get_mut(index))
            {
                *slot = value;
            }
            Ok(())
        }
        (segment, _) => Err(PathErrorKind::ShapeMismatch {
            segment: segment.to_string(),
            found,
        }),
    }
}

fn container_for(next: &PathSegment) -> Value {
    match next {
        PathSegment::Key(_) => Value::empty_map(),
        PathSegment::Index(_) | PathSegment::Filter(_) => Value::empty_array(),
    }
}

/// `index` must not be below `len`.
fn check_padding(index: usize, len: usize) -> Result<(), PathErrorKind> {
    if index - len > MAX_PADDING {
        return Err(PathErrorKind::IndexOutOfRange { index, len });
    }
    Ok(())
}

fn pad(array: &mut Array, len: usize) {
    while array.0.len() < len {
        array.push(Value::empty_map());
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::resolve;

    fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
        entries.into_iter().collect()
    }

    #[test]
    fn test_write_simple() {
        let mut doc = Value::empty_map();
        write(&mut doc, "medication.label", "doliprane").unwrap();
        assert_eq!(
            doc,
            map([("medication", map([("label", Value::from("doliprane"))]))])
        );
    }

    #[test]
    fn test_write_terminal_index_appends() {
        let mut doc = Value::empty_map();
        write(&mut doc, "medication.label.0", "doliprane").unwrap();
        assert_eq!(
            doc,
            map([(
                "medication",
                map([("label", Value::from(vec![Value::from("doliprane")]))])
            )])
        );
    }

    #[test]
    fn test_write_through_index() {
        let mut doc = Value::empty_map();
        write(&mut doc, "medication.label.0.ingredient.form", "comprimé").unwrap();
        assert_eq!(
            doc,
            map([(
                "medication",
                map([(
                    "label",
                    Value::from(vec![map([(
                        "ingredient",
                        map([("form", Value::from("comprimé"))])
                    )])])
                )])
            )])
        );
    }

    #[test]
    fn test_write_deeper_through_index() {
        let mut doc = Value::empty_map();
        write(&mut doc, "medication.label.0.ingredient.form.dosage", "125mg").unwrap();
        assert_eq!(
            resolve(&doc, "medication.label.0.ingredient.form.dosage").unwrap(),
            &Value::from("125mg")
        );
    }

    #[test]
    fn test_write_leading_index_fails() {
        let mut doc = Value::empty_map();
        let error = write(&mut doc, "0.label", 1).unwrap_err();
        assert_eq!(
            error.kind,
            PathErrorKind::InvalidLeadingSegment {
                segment: "0".into()
            }
        );
        assert_eq!(error.cause(), ErrorCause::Shape);
        assert_eq!(doc, Value::empty_map());
    }

    #[test]
    fn test_write_empty_path_is_noop() {
        let mut doc = map([("a", Value::from(1))]);
        write(&mut doc, "", 2).unwrap();
        assert_eq!(doc, map([("a", Value::from(1))]));
    }

    #[test]
    fn test_write_key_into_sequence_fails() {
        let mut doc = map([("items", Value::from(vec![Value::from(1)]))]);
        let error = write(&mut doc, "items.name", "x").unwrap_err();
        assert_eq!(
            error.kind,
            PathErrorKind::ShapeMismatch {
                segment: "name".into(),
                found: ValueKind::Array
            }
        );
    }

    #[test]
    fn test_write_through_scalar_fails() {
        let mut doc = map([("label", Value::from("doliprane"))]);
        let error = write(&mut doc, "label.form", "x").unwrap_err();
        assert_eq!(error.cause(), ErrorCause::Shape);
        assert_eq!(error.path.to_string(), "label");
    }

    #[test]
    fn test_write_pads_with_empty_maps() {
        let mut doc = Value::empty_map();
        write(&mut doc, "items.2.name", "c").unwrap();
        assert_eq!(
            doc,
            map([(
                "items",
                Value::from(vec![
                    Value::empty_map(),
                    Value::empty_map(),
                    map([("name", Value::from("c"))])
                ])
            )])
        );
    }

    #[test]
    fn test_write_terminal_index_replaces_existing() {
        let mut doc = map([("tags", Value::from(vec![Value::from("a"), Value::from("b")]))]);
        write(&mut doc, "tags.1", "z").unwrap();
        write(&mut doc, "tags.2", "c").unwrap();
        assert_eq!(
            doc,
            map([(
                "tags",
                Value::from(vec![Value::from("a"), Value::from("z"), Value::from("c")])
            )])
        );
    }

    #[test]
    fn test_write_is_idempotent() {
        let mut once = Value::empty_map();
        write(&mut once, "a.0.b", 1).unwrap();
        let mut twice = once.clone();
        write(&mut twice, "a.0.b", 1).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_write_through_filter() {
        let ingredient = |url: &str, value: &str| {
            map([(
                "extension",
                map([("url", Value::from(url)), ("value", Value::from(value))]),
            )])
        };
        let mut doc = map([(
            "medication",
            map([(
                "ingredients",
                Value::from(vec![ingredient("1", "1"), ingredient("2", "2")]),
            )]),
        )]);
        write(
            &mut doc,
            [
                PathExpr::from("medication.ingredients"),
                PathExpr::filter("extension.url", "1"),
                PathExpr::from("extension.value"),
            ],
            "8",
        )
        .unwrap();
        assert_eq!(
            resolve(&doc, "medication.ingredients").unwrap(),
            &Value::from(vec![ingredient("1", "8"), ingredient("2", "2")])
        );
    }

    #[test]
    fn test_write_terminal_filter_replaces_element() {
        let mut doc = map([(
            "items",
            Value::from(vec![map([("id", Value::from(1))]), map([("id", Value::from(2))])]),
        )]);
        write(
            &mut doc,
            [PathExpr::from("items"), PathExpr::filter("id", 2)],
            "gone",
        )
        .unwrap();
        assert_eq!(
            resolve(&doc, "items.1").unwrap(),
            &Value::from("gone")
        );
    }

    #[test]
    fn test_write_huge_index_fails() {
        let mut doc = Value::empty_map();
        let error = write(&mut doc, "a.18446744073709551615.b", 1).unwrap_err();
        assert_eq!(
            error.kind,
            PathErrorKind::IndexOutOfRange {
                index: usize::MAX,
                len: 0
            }
        );
        assert_eq!(doc, Value::empty_map());

        let error = write(&mut doc, "a.100000000000", 1).unwrap_err();
        assert_eq!(error.cause(), ErrorCause::IndexAccess);
        assert_eq!(doc, Value::empty_map());
    }

    #[test]
    fn test_write_padding_limit() {
        let mut doc = Value::empty_map();
        write(&mut doc, format!("a.{MAX_PADDING}"), 1).unwrap();
        assert_eq!(
            resolve(&doc, format!("a.{MAX_PADDING}")).unwrap(),
            &Value::from(1)
        );
        let len = MAX_PADDING + 1;
        let error = write(&mut doc, format!("a.{}.b", len + MAX_PADDING + 1), 1).unwrap_err();
        assert_eq!(
            error.kind,
            PathErrorKind::IndexOutOfRange {
                index: len + MAX_PADDING + 1,
                len
            }
        );
        assert_eq!(resolve(&doc, "a").unwrap().as_slice().map(<[_]>::len), Some(len));
    }

    #[test]
    fn test_failed_write_leaves_document_unchanged() {
        let mut doc = Value::empty_map();
        let error = write(
            &mut doc,
            [PathExpr::from("items"), PathExpr::filter("id", 2), PathExpr::from("x")],
            1,
        )
        .unwrap_err();
        assert_eq!(error.cause(), ErrorCause::FilterNotFound);
        assert_eq!(doc, Value::empty_map());

        let mut doc = map([("a", map([("label", Value::from("x"))]))]);
        let before = doc.clone();
        let error = write(&mut doc, "a.0", 1).unwrap_err();
        assert_eq!(error.cause(), ErrorCause::Shape);
        let error = write(&mut doc, "a.label.d", 1).unwrap_err();
        assert_eq!(error.cause(), ErrorCause::Shape);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_failed_write_removes_padding() {
        let mut doc = map([(
            "items",
            Value::from(vec![map([("name", Value::from("a"))])]),
        )]);
        let before = doc.clone();
        let path = [
            PathExpr::from("items.3.tags"),
            PathExpr::filter("id", 1),
            PathExpr::from("x"),
        ];
        let error = write(&mut doc, path, 1).unwrap_err();
        assert_eq!(error.cause(), ErrorCause::FilterNotFound);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_write_filter_without_match_fails() {
        let mut doc = map([("items", Value::empty_array())]);
        let error = write(
            &mut doc,
            [PathExpr::from("items"), PathExpr::filter("id", 2), PathExpr::from("x")],
            1,
        )
        .unwrap_err();
        assert_eq!(error.cause(), ErrorCause::FilterNotFound);
    }
}
