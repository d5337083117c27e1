use core::iter::FusedIterator;

use crate::prelude_internal::*;
use crate::resolve::step;

/// One value reached while walking, with the segments still to consume from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<'a> {
    pub value: &'a Value,
    pub remaining: Path,
}

/// Lazily yields every intermediate value along `path`.
///
/// When a sequence is reached and the next segment is a key, the walk fans out: each
/// element is yielded with the same remaining path and then walked on its own, in order.
/// Index and filter segments select from a sequence instead of fanning out. A branch ends
/// when its path is consumed or its value is `null`. A branch that fails to resolve yields
/// its error once and is dropped; the other branches carry on.
///
/// ```
/// use dpath::{Value, walk};
///
/// let doc: Value = [(
///     "items",
///     Value::from(vec![
///         [("name", Value::from("a"))].into_iter().collect::<Value>(),
///         [("name", Value::from("b"))].into_iter().collect::<Value>(),
///     ]),
/// )]
/// .into_iter()
/// .collect();
///
/// let names: Vec<&Value> = walk(&doc, "items.name")
///     .unwrap()
///     .filter_map(Result::ok)
///     .filter(|step| step.remaining.is_root())
///     .map(|step| step.value)
///     .collect();
/// assert_eq!(names, [&Value::from("a"), &Value::from("b")]);
/// ```
pub fn walk(root: &Value, path: impl IntoPath) -> Result<Walk<'_>, PathError> {
    Ok(Walk::new(root, path.into_path()?))
}

#[derive(Debug)]
pub struct Walk<'a> {
    path: Path,
    stack: Vec<Pending<'a>>,
}

#[derive(Debug)]
enum Pending<'a> {
    /// `value` still has to be yielded; `pos` is its first unconsumed segment.
    Visit { value: &'a Value, pos: usize },
    Failed(PathError),
}

impl<'a> Walk<'a> {
    fn new(root: &'a Value, path: Path) -> Self {
        let mut walk = Walk {
            path,
            stack: Vec::new(),
        };
        if walk.path.is_root() {
            walk.stack.push(Pending::Visit {
                value: root,
                pos: 0,
            });
        } else {
            walk.expand(root, 0);
        }
        walk
    }

    fn expand(&mut self, value: &'a Value, pos: usize) {
        let Some(segment) = self.path.0.get(pos) else {
            return;
        };
        if pos > 0 && value.is_null() {
            return;
        }
        match (value.as_slice(), segment) {
            (Some(items), PathSegment::Key(_)) => {
                for item in items.iter().rev() {
                    self.stack.push(Pending::Visit { value: item, pos });
                }
            }
            _ => match step(value, segment) {
                Ok(child) => self.stack.push(Pending::Visit {
                    value: child,
                    pos: pos + 1,
                }),
                Err(kind) => self.stack.push(Pending::Failed(PathError::new(
                    kind,
                    Path::from(&self.path.0[..=pos]),
                ))),
            },
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Result<Step<'a>, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.stack.pop()? {
            Pending::Failed(error) => Some(Err(error)),
            Pending::Visit { value, pos } => {
                self.expand(value, pos);
                Some(Ok(Step {
                    value,
                    remaining: Path::from(&self.path.0[pos..]),
                }))
            }
        }
    }
}

impl FusedIterator for Walk<'_> {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
        entries.into_iter().collect()
    }

    fn extension(url: &str) -> Value {
        map([("extension", map([("url", Value::from(url))]))])
    }

    fn doc() -> Value {
        map([(
            "medication",
            map([(
                "ingredients",
                Value::from(vec![extension("1"), extension("2")]),
            )]),
        )])
    }

    fn rendered(walk: Walk<'_>) -> Vec<String> {
        walk.map(|step| match step {
            Ok(step) => format!("{} <- {}", step.value, step.remaining),
            Err(error) => format!("error: {}", error.kind),
        })
        .collect()
    }

    #[test]
    fn test_walk_empty_path_yields_root() {
        let doc = doc();
        let steps: Vec<_> = walk(&doc, "").unwrap().collect();
        assert_eq!(
            steps,
            vec![Ok(Step {
                value: &doc,
                remaining: Path::root()
            })]
        );
    }

    #[test]
    fn test_walk_yields_each_intermediate() {
        let doc = map([("a", map([("b", Value::from(1))]))]);
        assert_eq!(
            rendered(walk(&doc, "a.b").unwrap()),
            vec![r#"{"b": 1} <- b"#, "1 <- (root)"]
        );
    }

    #[test]
    fn test_walk_fans_out_over_sequences() {
        let doc = doc();
        assert_eq!(
            rendered(walk(&doc, "medication.ingredients.extension.url").unwrap()),
            vec![
                r#"{"ingredients": [{"extension": {"url": "1"}}, {"extension": {"url": "2"}}]} <- ingredients.extension.url"#,
                r#"[{"extension": {"url": "1"}}, {"extension": {"url": "2"}}] <- extension.url"#,
                r#"{"extension": {"url": "1"}} <- extension.url"#,
                r#"{"url": "1"} <- url"#,
                r#""1" <- (root)"#,
                r#"{"extension": {"url": "2"}} <- extension.url"#,
                r#"{"url": "2"} <- url"#,
                r#""2" <- (root)"#,
            ]
        );
    }

    #[test]
    fn test_walk_index_selects_without_fan_out() {
        let doc = doc();
        let leaves: Vec<_> = walk(&doc, "medication.ingredients.1.extension.url")
            .unwrap()
            .filter_map(Result::ok)
            .filter(|step| step.remaining.is_root())
            .map(|step| step.value.clone())
            .collect();
        assert_eq!(leaves, vec![Value::from("2")]);
    }

    #[test]
    fn test_walk_filter_selects_without_fan_out() {
        let doc = doc();
        let path = [
            PathExpr::from("medication.ingredients"),
            PathExpr::filter("extension.url", "2"),
            PathExpr::from("extension"),
        ];
        assert_eq!(
            rendered(walk(&doc, path).unwrap()).last().map(String::as_str),
            Some(r#"{"url": "2"} <- (root)"#)
        );
    }

    #[test]
    fn test_walk_failed_branch_does_not_stop_siblings() {
        let doc = map([(
            "items",
            Value::from(vec![
                map([("name", Value::from("a"))]),
                Value::empty_map(),
                map([("name", Value::from("c"))]),
            ]),
        )]);
        assert_eq!(
            rendered(walk(&doc, "items.name").unwrap()),
            vec![
                r#"[{"name": "a"}, {}, {"name": "c"}] <- name"#,
                r#"{"name": "a"} <- name"#,
                r#""a" <- (root)"#,
                "{} <- name",
                "error: key `name` not found",
                r#"{"name": "c"} <- name"#,
                r#""c" <- (root)"#,
            ]
        );
    }

    #[test]
    fn test_walk_stops_at_null() {
        let doc = map([("a", Value::Null)]);
        assert_eq!(rendered(walk(&doc, "a.b.c").unwrap()), vec!["null <- b.c"]);
    }

    #[test]
    fn test_walk_is_restartable() {
        let doc = doc();
        let first: Vec<_> = walk(&doc, "medication.ingredients.extension")
            .unwrap()
            .collect();
        let second: Vec<_> = walk(&doc, "medication.ingredients.extension")
            .unwrap()
            .collect();
        assert_eq!(first, second);
    }
}
