use crate::types::Argument;

/// A directive definition: name, arguments, and the locations it may be
/// applied to.
#[derive(Clone, Debug)]
pub struct DirectiveDef {
    name: String,
    description: Option<String>,
    arguments: Vec<Argument>,
    on_operation: bool,
    on_fragment: bool,
    on_field: bool,
}

impl DirectiveDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: vec![],
            on_operation: false,
            on_fragment: false,
            on_field: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn on_operation(mut self) -> Self {
        self.on_operation = true;
        self
    }

    pub fn on_fragment(mut self) -> Self {
        self.on_fragment = true;
        self
    }

    pub fn on_field(mut self) -> Self {
        self.on_field = true;
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn arguments(&self) -> &[Argument] {
        self.arguments.as_slice()
    }

    pub fn allows_operation(&self) -> bool {
        self.on_operation
    }

    pub fn allows_fragment(&self) -> bool {
        self.on_fragment
    }

    pub fn allows_field(&self) -> bool {
        self.on_field
    }
}
