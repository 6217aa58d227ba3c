use crate::schema::SchemaBuilder;
use crate::types::DirectiveDef;
use crate::types::ObjectType;
use crate::types::TypeDef;
use indexmap::IndexMap;

/// A fully validated, immutable GraphQL schema.
///
/// Built once via [`SchemaBuilder`] and safe to share across concurrent
/// requests; nothing in it is mutated during execution.
#[derive(Clone, Debug)]
pub struct Schema {
    pub(crate) query_type: String,
    pub(crate) mutation_type: Option<String>,
    pub(crate) subscription_type: Option<String>,
    pub(crate) types: IndexMap<String, TypeDef>,
    pub(crate) directives: Vec<DirectiveDef>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// The object type query operations are rooted at.
    pub fn query_type(&self) -> &ObjectType {
        self.types
            .get(self.query_type.as_str())
            .and_then(|def| def.as_object())
            .expect("query root is a validated object type")
    }

    /// The object type mutation operations are rooted at, if configured.
    pub fn mutation_type(&self) -> Option<&ObjectType> {
        let name = self.mutation_type.as_ref()?;
        self.types.get(name.as_str()).and_then(|def| def.as_object())
    }

    /// The object type subscription operations are rooted at, if
    /// configured.
    pub fn subscription_type(&self) -> Option<&ObjectType> {
        let name = self.subscription_type.as_ref()?;
        self.types.get(name.as_str()).and_then(|def| def.as_object())
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// Every named type in the schema (including introspection types),
    /// indexed by name.
    pub fn type_map(&self) -> &IndexMap<String, TypeDef> {
        &self.types
    }

    pub fn directives(&self) -> &[DirectiveDef] {
        self.directives.as_slice()
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveDef> {
        self.directives.iter().find(|directive| directive.name() == name)
    }

    /// The concrete object types an abstract (interface or union) type may
    /// resolve to.
    pub fn possible_types(&self, abstract_name: &str) -> Vec<&ObjectType> {
        let names: Vec<&str> = match self.types.get(abstract_name) {
            Some(TypeDef::Interface(interface)) => interface
                .possible_types()
                .iter()
                .map(|name| name.as_str())
                .collect(),
            Some(TypeDef::Union(union)) => {
                union.members().iter().map(|name| name.as_str()).collect()
            }
            _ => return vec![],
        };
        names
            .into_iter()
            .filter_map(|name| self.types.get(name).and_then(|def| def.as_object()))
            .collect()
    }

    /// True when `object_name` is a possible runtime type for the abstract
    /// type `abstract_name`.
    pub fn is_possible_type(&self, abstract_name: &str, object_name: &str) -> bool {
        match self.types.get(abstract_name) {
            Some(TypeDef::Interface(interface)) => interface
                .possible_types()
                .iter()
                .any(|name| name == object_name),
            Some(TypeDef::Union(union)) => union.has_member(object_name),
            _ => false,
        }
    }
}
