use crate::ast::AstLocation;

/// A name node: `[_A-Za-z][_0-9A-Za-z]*`.
#[derive(Clone, Debug, PartialEq)]
pub struct Name {
    pub value: String,
    pub loc: Option<AstLocation>,
}

impl Name {
    pub fn new(value: impl Into<String>, loc: Option<AstLocation>) -> Self {
        Self {
            value: value.into(),
            loc,
        }
    }

    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }
}
