use crate::error::PathError;
use std::fmt;
use std::str::FromStr;

/// One step of a variable path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// A parsed, non-empty variable path such as `NodeA.items[2].user.name`.
///
/// The first segment is always a `Key`: a node name or a built-in identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariablePath {
    root: String,
    rest: Vec<PathSegment>,
}

impl VariablePath {
    /// Parses a path. Leading and trailing whitespace is ignored.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        for token in path.split('.') {
            if token.is_empty() {
                return Err(PathError::EmptySegment {
                    path: path.to_string(),
                });
            }
            parse_token(token, &mut segments)?;
        }
        Self::from_segments(segments).ok_or(PathError::Empty)
    }

    /// Builds a path from segments. Returns `None` if the sequence is empty or does not
    /// start with a key.
    pub fn from_segments(segments: Vec<PathSegment>) -> Option<Self> {
        let mut segments = segments.into_iter();
        match segments.next() {
            Some(PathSegment::Key(root)) => Some(Self {
                root,
                rest: segments.collect(),
            }),
            _ => None,
        }
    }

    /// The node name or built-in identifier the path starts from.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Every segment after the root.
    pub fn rest(&self) -> &[PathSegment] {
        &self.rest
    }
}

/// Splits one dot-separated token into a key followed by its `[n]` suffixes.
fn parse_token(token: &str, segments: &mut Vec<PathSegment>) -> Result<(), PathError> {
    let (key, mut brackets) = match token.find('[') {
        Some(pos) => token.split_at(pos),
        None => (token, ""),
    };
    if key.is_empty() {
        return Err(PathError::MissingKey {
            segment: token.to_string(),
        });
    }
    if key.contains(']') {
        return Err(malformed(token));
    }
    segments.push(PathSegment::Key(key.to_string()));

    while !brackets.is_empty() {
        let inner = brackets.strip_prefix('[').ok_or_else(|| malformed(token))?;
        let close = inner.find(']').ok_or_else(|| malformed(token))?;
        let digits = &inner[..close];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed(token));
        }
        let index = digits.parse::<usize>().map_err(|_| malformed(token))?;
        segments.push(PathSegment::Index(index));
        brackets = &inner[close + 1..];
    }
    Ok(())
}

fn malformed(token: &str) -> PathError {
    PathError::MalformedIndex {
        segment: token.to_string(),
    }
}

impl FromStr for VariablePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Renders the canonical path text, e.g. `A.items[2].name`.
impl fmt::Display for VariablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for segment in &self.rest {
            match segment {
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
