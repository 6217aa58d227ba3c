use thiserror::Error;

/// A schema invariant violation detected by
/// [`SchemaBuilder::build`](crate::schema::SchemaBuilder::build).
///
/// Every variant names the offending type (and field/argument where
/// applicable) so failures are actionable without a debugger.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error("A schema must declare a query root type")]
    MissingQueryType,

    #[error("Type name \"{type_name}\" does not match ^[_a-zA-Z][_a-zA-Z0-9]*$")]
    InvalidTypeName { type_name: String },

    #[error(
        "Type name \"{type_name}\" is reserved: names beginning with \"__\" are \
         for introspection only"
    )]
    ReservedTypeName { type_name: String },

    #[error(
        "Name \"{name}\" on type \"{type_name}\" does not match \
         ^[_a-zA-Z][_a-zA-Z0-9]*$"
    )]
    InvalidMemberName { type_name: String, name: String },

    #[error("Schema must contain unique named types but contains multiple types named \"{type_name}\"")]
    DuplicateTypeDefinition { type_name: String },

    #[error("Schema contains multiple directives named \"{directive_name}\"")]
    DuplicateDirectiveDefinition { directive_name: String },

    #[error("Type \"{referenced_type}\" referenced by \"{referenced_by}\" is not defined in the schema")]
    UndefinedTypeReference {
        referenced_type: String,
        referenced_by: String,
    },

    #[error(
        "\"{type_name}.{field_name}\" declares output type \"{referenced_type}\", \
         which is not an output type"
    )]
    InvalidOutputFieldType {
        type_name: String,
        field_name: String,
        referenced_type: String,
    },

    #[error(
        "Argument \"{argument_name}\" of \"{type_name}.{field_name}\" declares \
         type \"{referenced_type}\", which is not an input type"
    )]
    InvalidArgumentType {
        type_name: String,
        field_name: String,
        argument_name: String,
        referenced_type: String,
    },

    #[error(
        "Input field \"{type_name}.{field_name}\" declares type \
         \"{referenced_type}\", which is not an input type"
    )]
    InvalidInputFieldType {
        type_name: String,
        field_name: String,
        referenced_type: String,
    },

    #[error(
        "Argument \"{argument_name}\" of directive \"@{directive_name}\" declares \
         type \"{referenced_type}\", which is not an input type"
    )]
    InvalidDirectiveArgumentType {
        directive_name: String,
        argument_name: String,
        referenced_type: String,
    },

    #[error("Type \"{type_name}\" must define one or more fields")]
    EmptyFields { type_name: String },

    #[error("Union \"{type_name}\" must define one or more member types")]
    EmptyUnionMembers { type_name: String },

    #[error("Enum \"{type_name}\" must define one or more values")]
    EmptyEnumValues { type_name: String },

    #[error("Union \"{type_name}\" may only include object types, but \"{member_name}\" is not one")]
    UnionMemberNotAnObject {
        type_name: String,
        member_name: String,
    },

    #[error("\"{type_name}\" declares it implements \"{interface_name}\", which is not an interface type")]
    ImplementsNonInterface {
        type_name: String,
        interface_name: String,
    },

    #[error(
        "\"{interface_name}\" expects field \"{field_name}\" but \
         \"{type_name}\" does not provide it"
    )]
    MissingInterfaceField {
        type_name: String,
        interface_name: String,
        field_name: String,
    },

    #[error(
        "\"{interface_name}.{field_name}\" expects type \"{expected}\" but \
         \"{type_name}.{field_name}\" provides type \"{found}\""
    )]
    IncompatibleInterfaceFieldType {
        type_name: String,
        interface_name: String,
        field_name: String,
        expected: String,
        found: String,
    },

    #[error(
        "\"{interface_name}.{field_name}\" and \"{type_name}.{field_name}\" must \
         declare the same arguments, but their \"{argument_name}\" declarations \
         differ"
    )]
    IncompatibleInterfaceFieldArguments {
        type_name: String,
        interface_name: String,
        field_name: String,
        argument_name: String,
    },

    #[error(
        "Abstract type \"{abstract_type_name}\" must provide resolve_type, or \
         possible type \"{object_type_name}\" must provide is_type_of, so that \
         runtime types can be determined"
    )]
    UnresolvableAbstractType {
        abstract_type_name: String,
        object_type_name: String,
    },

    #[error(
        "Scalar \"{type_name}\" provides only one of value/literal input \
         parsers; a scalar accepting input must provide both"
    )]
    IncompleteScalarCoercion { type_name: String },
}
