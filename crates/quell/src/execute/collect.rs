//! Field collection: turning a selection set into an ordered map of
//! response keys to contributing field nodes.

use crate::execute::ExecutionContext;
use crate::types::DirectiveDef;
use crate::types::ObjectType;
use crate::values;
use indexmap::IndexMap;
use quell_parser::ast;
use std::collections::HashSet;

/// Grouped fields for one selection set on one runtime object type:
/// response key → the field nodes contributing to it, in source order of
/// first occurrence.
pub(crate) type GroupedFields<'a> = IndexMap<&'a str, Vec<&'a ast::Field>>;

/// Walks a selection set, applying `@skip`/`@include` and fragment type
/// conditions, accumulating fields under their response keys.
pub(crate) fn collect_fields<'a>(
    ctx: &ExecutionContext<'a>,
    object_type: &ObjectType,
    selection_set: &'a ast::SelectionSet,
    fields: &mut GroupedFields<'a>,
    visited_fragments: &mut HashSet<&'a str>,
) {
    for selection in &selection_set.selections {
        match selection {
            ast::Selection::Field(field) => {
                if !should_include(ctx, &field.directives) {
                    continue;
                }
                fields
                    .entry(field.response_key())
                    .or_default()
                    .push(field);
            }
            ast::Selection::InlineFragment(inline) => {
                if !should_include(ctx, &inline.directives) {
                    continue;
                }
                if let Some(condition) = &inline.type_condition
                    && !condition_matches(ctx, condition.as_str(), object_type)
                {
                    continue;
                }
                collect_fields(ctx, object_type, &inline.selection_set, fields, visited_fragments);
            }
            ast::Selection::FragmentSpread(spread) => {
                let name = spread.name.as_str();
                if visited_fragments.contains(name) || !should_include(ctx, &spread.directives)
                {
                    continue;
                }
                visited_fragments.insert(name);
                let Some(fragment) = ctx.fragments.get(name) else {
                    continue;
                };
                if !should_include(ctx, &fragment.directives)
                    || !condition_matches(ctx, fragment.type_condition.as_str(), object_type)
                {
                    continue;
                }
                collect_fields(ctx, object_type, &fragment.selection_set, fields, visited_fragments);
            }
        }
    }
}

/// Evaluates `@skip`/`@include` on one node; `@skip` wins over
/// `@include`. A directive whose arguments fail to coerce is ignored.
fn should_include(ctx: &ExecutionContext<'_>, directives: &[ast::DirectiveAnnotation]) -> bool {
    if let Some(skip) = find_directive(directives, "skip")
        && let Some(definition) = ctx.schema.directive("skip")
        && directive_if_argument(ctx, definition, skip) == Some(true)
    {
        return false;
    }
    if let Some(include) = find_directive(directives, "include")
        && let Some(definition) = ctx.schema.directive("include")
        && directive_if_argument(ctx, definition, include) == Some(false)
    {
        return false;
    }
    true
}

fn find_directive<'a>(
    directives: &'a [ast::DirectiveAnnotation],
    name: &str,
) -> Option<&'a ast::DirectiveAnnotation> {
    directives
        .iter()
        .find(|directive| directive.name.as_str() == name)
}

fn directive_if_argument(
    ctx: &ExecutionContext<'_>,
    definition: &DirectiveDef,
    directive: &ast::DirectiveAnnotation,
) -> Option<bool> {
    let arguments = values::argument_values(
        definition.arguments(),
        &directive.arguments,
        ctx.schema,
        &ctx.variable_values,
    )
    .ok()?;
    arguments.get("if").and_then(|value| value.as_bool())
}

/// Whether the runtime object type matches an AST type condition: the
/// condition names the object itself, an interface it implements, or a
/// union it belongs to.
pub(crate) fn condition_matches(
    ctx: &ExecutionContext<'_>,
    condition: &str,
    object_type: &ObjectType,
) -> bool {
    if condition == object_type.name() {
        return true;
    }
    ctx.schema.is_possible_type(condition, object_type.name())
}
