use core::fmt::Display;

use crate::prelude_internal::*;

/// A normalized address into a nested structure.
#[derive(Debug, Clone, PartialEq, Default, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, from_iter, new)]
pub struct Path(pub Vec<PathSegment>);

#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Map entry lookup
    Key(String),
    /// Sequence element by position
    Index(usize),
    /// The first element of a sequence whose sub-path resolves to an expected value
    Filter(Filter),
}

/// Selects the first element of a sequence of maps whose `path` resolves to `expected`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub path: Path,
    pub expected: Value,
}

impl Filter {
    pub fn new(path: impl IntoPath, expected: impl Into<Value>) -> Result<Self, PathError> {
        Ok(Self {
            path: path.into_path()?,
            expected: expected.into(),
        })
    }
}

impl Path {
    /// Create an empty path, which addresses the root itself
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Splits `path` on `.`. Empty tokens are dropped and all-digit tokens become indices.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let mut segments = Vec::new();
        push_tokens(&mut segments, path)?;
        Ok(Path(segments))
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    /// Appends the normalized `other` to this path.
    pub fn join(mut self, other: impl IntoPath) -> Result<Self, PathError> {
        self.0.extend(other.into_path()?.0);
        Ok(self)
    }

    pub fn first(&self) -> Option<&PathSegment> {
        self.0.first()
    }
}

impl From<&[PathSegment]> for Path {
    fn from(segments: &[PathSegment]) -> Self {
        Path(segments.to_vec())
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
            PathSegment::Filter(filter) => write!(f, "{}", filter),
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{} == {}]", self.path, self.expected)
    }
}

/// Caller-facing path input before tokenization.
///
/// A list path mixes raw dotted strings with filter clauses:
///
/// ```
/// use dpath::PathExpr;
///
/// let path = vec![
///     PathExpr::from("medication.ingredients"),
///     PathExpr::filter("extension.url", "1"),
///     PathExpr::from("extension.value"),
/// ];
/// # let _ = path;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PathExpr {
    /// Dotted string, split on `.`
    Raw(String),
    /// Already normalized segments, kept as is
    Parsed(Path),
    /// `{path: expected}` clause; `path` is itself a list expression
    Filter { path: Vec<PathExpr>, expected: Value },
}

impl PathExpr {
    pub fn filter(path: impl Into<PathExpr>, expected: impl Into<Value>) -> Self {
        PathExpr::Filter {
            path: vec![path.into()],
            expected: expected.into(),
        }
    }
}

impl From<&str> for PathExpr {
    fn from(s: &str) -> Self {
        PathExpr::Raw(s.to_string())
    }
}

impl From<String> for PathExpr {
    fn from(s: String) -> Self {
        PathExpr::Raw(s)
    }
}

impl From<Path> for PathExpr {
    fn from(path: Path) -> Self {
        PathExpr::Parsed(path)
    }
}

impl From<Filter> for PathExpr {
    fn from(filter: Filter) -> Self {
        PathExpr::Parsed(Path(vec![PathSegment::Filter(filter)]))
    }
}

/// Conversion of any accepted path form into a normalized [`Path`].
pub trait IntoPath {
    fn into_path(self) -> Result<Path, PathError>;
}

impl IntoPath for Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self)
    }
}

impl IntoPath for &Path {
    fn into_path(self) -> Result<Path, PathError> {
        Ok(self.clone())
    }
}

impl IntoPath for &str {
    fn into_path(self) -> Result<Path, PathError> {
        Path::parse(self)
    }
}

impl IntoPath for String {
    fn into_path(self) -> Result<Path, PathError> {
        Path::parse(&self)
    }
}

impl IntoPath for &String {
    fn into_path(self) -> Result<Path, PathError> {
        Path::parse(self)
    }
}

impl IntoPath for PathExpr {
    fn into_path(self) -> Result<Path, PathError> {
        normalize(core::slice::from_ref(&self))
    }
}

impl IntoPath for &[PathExpr] {
    fn into_path(self) -> Result<Path, PathError> {
        normalize(self)
    }
}

impl IntoPath for Vec<PathExpr> {
    fn into_path(self) -> Result<Path, PathError> {
        normalize(&self)
    }
}

impl IntoPath for &Vec<PathExpr> {
    fn into_path(self) -> Result<Path, PathError> {
        normalize(self)
    }
}

impl<const N: usize> IntoPath for [PathExpr; N] {
    fn into_path(self) -> Result<Path, PathError> {
        normalize(&self)
    }
}

/// Flattens a list expression into segments. Filter clauses stay intact.
pub fn normalize(exprs: &[PathExpr]) -> Result<Path, PathError> {
    let mut segments = Vec::new();
    for expr in exprs {
        match expr {
            PathExpr::Raw(raw) => push_tokens(&mut segments, raw)?,
            PathExpr::Parsed(path) => segments.extend(path.0.iter().cloned()),
            PathExpr::Filter { path, expected } => {
                segments.push(PathSegment::Filter(Filter {
                    path: normalize(path)?,
                    expected: expected.clone(),
                }));
            }
        }
    }
    Ok(Path(segments))
}

fn push_tokens(segments: &mut Vec<PathSegment>, raw: &str) -> Result<(), PathError> {
    for token in raw.split('.').filter(|token| !token.is_empty()) {
        if token.bytes().all(|b| b.is_ascii_digit()) {
            let index = token.parse::<usize>().map_err(|_| {
                PathError::new(
                    PathErrorKind::InvalidIndex {
                        token: token.to_string(),
                    },
                    Path(segments.clone()),
                )
            })?;
            segments.push(PathSegment::Index(index));
        } else {
            segments.push(PathSegment::Key(token.to_string()));
        }
    }
    Ok(())
}
