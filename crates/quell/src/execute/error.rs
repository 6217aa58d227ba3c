use quell_parser::SourceLocation;
use serde::Serialize;
use serde::Serializer;

/// One entry of a response's `errors` list.
///
/// `locations` and `path` are omitted from the wire form when empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExecutionError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<SourceLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: vec![],
        }
    }

    pub fn with_locations(
        message: impl Into<String>,
        locations: Vec<SourceLocation>,
    ) -> Self {
        Self {
            message: message.into(),
            locations,
            path: vec![],
        }
    }

    pub fn at_path(
        message: impl Into<String>,
        locations: Vec<SourceLocation>,
        path: Vec<PathSegment>,
    ) -> Self {
        Self {
            message: message.into(),
            locations,
            path,
        }
    }
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message.as_str())
    }
}

/// One step of a response path: a field's response key or a list index.
#[derive(Clone, Debug, PartialEq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl Serialize for PathSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathSegment::Key(key) => serializer.serialize_str(key),
            PathSegment::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

/// Extends a path by one segment, cloning the prefix.
pub(crate) fn push_path(path: &[PathSegment], segment: PathSegment) -> Vec<PathSegment> {
    let mut extended = path.to_vec();
    extended.push(segment);
    extended
}
