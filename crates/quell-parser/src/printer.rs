//! Renders AST nodes back to canonical GraphQL source.
//!
//! The output uses two-space indentation, one definition per block separated
//! by blank lines, and no insignificant commas. Printing then re-parsing a
//! document yields an equal AST (modulo locations).

use crate::ast;

/// Prints a whole document.
pub fn print_document(document: &ast::Document) -> String {
    let blocks: Vec<String> = document
        .definitions
        .iter()
        .map(print_definition)
        .collect();
    format!("{}\n", blocks.join("\n\n"))
}

fn print_definition(definition: &ast::Definition) -> String {
    match definition {
        ast::Definition::Operation(op) => print_operation(op),
        ast::Definition::Fragment(frag) => print_fragment_definition(frag),
        ast::Definition::TypeSystem(def) => print_type_system_definition(def),
    }
}

fn print_operation(op: &ast::OperationDefinition) -> String {
    let selection_set = print_selection_set(&op.selection_set, 0);

    // The anonymous query shorthand prints as a bare selection set.
    if op.kind == ast::OperationKind::Query
        && op.name.is_none()
        && op.variable_definitions.is_empty()
        && op.directives.is_empty()
    {
        return selection_set;
    }

    let mut header = op.kind.as_str().to_string();
    if let Some(name) = &op.name {
        header.push(' ');
        header.push_str(name.as_str());
    }
    if !op.variable_definitions.is_empty() {
        let defs: Vec<String> = op
            .variable_definitions
            .iter()
            .map(print_variable_definition)
            .collect();
        header.push_str(&format!("({})", defs.join(", ")));
    }
    header.push_str(&print_directives(&op.directives));
    format!("{header} {selection_set}")
}

fn print_variable_definition(def: &ast::VariableDefinition) -> String {
    let mut out = format!(
        "${}: {}",
        def.variable.name.as_str(),
        print_type_annotation(&def.annotation),
    );
    if let Some(default) = &def.default_value {
        out.push_str(&format!(" = {}", print_value(default)));
    }
    out
}

fn print_fragment_definition(frag: &ast::FragmentDefinition) -> String {
    format!(
        "fragment {} on {}{} {}",
        frag.name.as_str(),
        frag.type_condition.as_str(),
        print_directives(&frag.directives),
        print_selection_set(&frag.selection_set, 0),
    )
}

fn print_selection_set(selection_set: &ast::SelectionSet, depth: usize) -> String {
    let indent = "  ".repeat(depth + 1);
    let mut out = "{\n".to_string();
    for selection in &selection_set.selections {
        out.push_str(&indent);
        out.push_str(&print_selection(selection, depth + 1));
        out.push('\n');
    }
    out.push_str(&"  ".repeat(depth));
    out.push('}');
    out
}

fn print_selection(selection: &ast::Selection, depth: usize) -> String {
    match selection {
        ast::Selection::Field(field) => print_field(field, depth),
        ast::Selection::FragmentSpread(spread) => format!(
            "...{}{}",
            spread.name.as_str(),
            print_directives(&spread.directives),
        ),
        ast::Selection::InlineFragment(inline) => {
            let mut out = "...".to_string();
            if let Some(condition) = &inline.type_condition {
                out.push_str(&format!(" on {}", condition.as_str()));
            }
            out.push_str(&print_directives(&inline.directives));
            out.push(' ');
            out.push_str(&print_selection_set(&inline.selection_set, depth));
            out
        }
    }
}

fn print_field(field: &ast::Field, depth: usize) -> String {
    let mut out = String::new();
    if let Some(alias) = &field.alias {
        out.push_str(alias.as_str());
        out.push_str(": ");
    }
    out.push_str(field.name.as_str());
    out.push_str(&print_arguments(&field.arguments));
    out.push_str(&print_directives(&field.directives));
    if let Some(selection_set) = &field.selection_set {
        out.push(' ');
        out.push_str(&print_selection_set(selection_set, depth));
    }
    out
}

fn print_arguments(arguments: &[ast::Argument]) -> String {
    if arguments.is_empty() {
        return String::new();
    }
    let args: Vec<String> = arguments
        .iter()
        .map(|arg| format!("{}: {}", arg.name.as_str(), print_value(&arg.value)))
        .collect();
    format!("({})", args.join(", "))
}

fn print_directives(directives: &[ast::DirectiveAnnotation]) -> String {
    directives
        .iter()
        .map(|directive| {
            format!(
                " @{}{}",
                directive.name.as_str(),
                print_arguments(&directive.arguments),
            )
        })
        .collect()
}

/// Prints a single value literal.
pub fn print_value(value: &ast::Value) -> String {
    match value {
        ast::Value::Variable(variable) => format!("${}", variable.name.as_str()),
        ast::Value::Int(int) => int.value.clone(),
        ast::Value::Float(float) => float.value.clone(),
        ast::Value::String(string) => print_string(&string.value),
        ast::Value::Boolean(boolean) => boolean.value.to_string(),
        ast::Value::Null(_) => "null".to_string(),
        ast::Value::Enum(enum_value) => enum_value.value.clone(),
        ast::Value::List(list) => {
            let values: Vec<String> = list.values.iter().map(print_value).collect();
            format!("[{}]", values.join(", "))
        }
        ast::Value::Object(object) => {
            let fields: Vec<String> = object
                .fields
                .iter()
                .map(|field| {
                    format!("{}: {}", field.name.as_str(), print_value(&field.value))
                })
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}

fn print_string(value: &str) -> String {
    let mut out = "\"".to_string();
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            ch if (ch as u32) < 0x20 => out.push_str(&format!("\\u{:04X}", ch as u32)),
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Prints a type annotation in GraphQL notation, e.g. `[Episode!]!`.
pub fn print_type_annotation(annotation: &ast::TypeAnnotation) -> String {
    match annotation {
        ast::TypeAnnotation::Named(named) => named.name.value.clone(),
        ast::TypeAnnotation::List(list) => {
            format!("[{}]", print_type_annotation(&list.inner))
        }
        ast::TypeAnnotation::NonNull(non_null) => {
            format!("{}!", print_type_annotation(&non_null.inner))
        }
    }
}

fn print_type_system_definition(definition: &ast::TypeSystemDefinition) -> String {
    match definition {
        ast::TypeSystemDefinition::Object(def) => print_object_type_definition(def),
        ast::TypeSystemDefinition::Interface(def) => {
            format!(
                "interface {} {}",
                def.name.as_str(),
                print_field_definitions(&def.fields),
            )
        }
        ast::TypeSystemDefinition::Union(def) => {
            let members: Vec<&str> =
                def.members.iter().map(|member| member.as_str()).collect();
            format!("union {} = {}", def.name.as_str(), members.join(" | "))
        }
        ast::TypeSystemDefinition::Scalar(def) => format!("scalar {}", def.name.as_str()),
        ast::TypeSystemDefinition::Enum(def) => {
            let mut out = format!("enum {} {{\n", def.name.as_str());
            for value in &def.values {
                out.push_str("  ");
                out.push_str(value.name.as_str());
                out.push('\n');
            }
            out.push('}');
            out
        }
        ast::TypeSystemDefinition::InputObject(def) => {
            let mut out = format!("input {} {{\n", def.name.as_str());
            for field in &def.fields {
                out.push_str("  ");
                out.push_str(&print_input_value_definition(field));
                out.push('\n');
            }
            out.push('}');
            out
        }
        ast::TypeSystemDefinition::TypeExtension(ext) => {
            format!("extend {}", print_object_type_definition(&ext.definition))
        }
    }
}

fn print_object_type_definition(def: &ast::ObjectTypeDefinition) -> String {
    let mut out = format!("type {}", def.name.as_str());
    if !def.interfaces.is_empty() {
        let interfaces: Vec<&str> =
            def.interfaces.iter().map(|name| name.as_str()).collect();
        out.push_str(&format!(" implements {}", interfaces.join(" ")));
    }
    out.push(' ');
    out.push_str(&print_field_definitions(&def.fields));
    out
}

fn print_field_definitions(fields: &[ast::FieldDefinition]) -> String {
    let mut out = "{\n".to_string();
    for field in fields {
        out.push_str("  ");
        out.push_str(field.name.as_str());
        if !field.arguments.is_empty() {
            let args: Vec<String> = field
                .arguments
                .iter()
                .map(print_input_value_definition)
                .collect();
            out.push_str(&format!("({})", args.join(", ")));
        }
        out.push_str(": ");
        out.push_str(&print_type_annotation(&field.annotation));
        out.push('\n');
    }
    out.push('}');
    out
}

fn print_input_value_definition(def: &ast::InputValueDefinition) -> String {
    let mut out = format!(
        "{}: {}",
        def.name.as_str(),
        print_type_annotation(&def.annotation),
    );
    if let Some(default) = &def.default_value {
        out.push_str(&format!(" = {}", print_value(default)));
    }
    out
}
