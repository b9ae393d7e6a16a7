use tracing::trace;

use crate::metadata::{ExpressionScope, MetadataProvider};
use crate::parser::ast::{Expr, FunctionCall};
use crate::rename::NameChange;
use crate::span::{Span, Spanned};
use crate::visit::Visitor;
use crate::walker::ObjectsScope;

/// Collects the spans of string literals equal to the quoted old name, in
/// arguments whose declared type is the requested parameter type.
///
/// Only function calls can match: a literal means nothing outside the
/// argument slot that declares its type. Calls the metadata does not know
/// are skipped whole. Occurrences come out in source order and never overlap.
pub struct OccurrenceFinder<'a, P: MetadataProvider + ?Sized> {
    platform: &'a P,
    objects: ObjectsScope<'a>,
    source: &'a str,
    request: &'a NameChange,
    quoted_old_name: String,
    occurrences: Vec<Span>,
}

impl<'a, P: MetadataProvider + ?Sized> OccurrenceFinder<'a, P> {
    pub fn new(platform: &'a P, objects: ObjectsScope<'a>, source: &'a str, request: &'a NameChange) -> Self {
        Self {
            platform,
            objects,
            source,
            request,
            quoted_old_name: request.quoted_old_name(),
            occurrences: Vec::new(),
        }
    }

    pub fn occurrences(&self) -> &[Span] {
        &self.occurrences
    }

    pub fn into_occurrences(self) -> Vec<Span> {
        self.occurrences
    }

    fn expression_scope(&self, call: &FunctionCall) -> ExpressionScope<'a> {
        let objects = self.objects;
        match (call.object_name(), call.behavior_name()) {
            (Some(object), Some(behavior)) => {
                ExpressionScope::Behavior(objects.type_of_behavior(object, behavior).unwrap_or(""))
            }
            (Some(object), None) => ExpressionScope::Object(objects.type_of_object(object).unwrap_or("")),
            _ => ExpressionScope::Free,
        }
    }
}

impl<P: MetadataProvider + ?Sized> Visitor for OccurrenceFinder<'_, P> {
    fn visit_function_call(&mut self, call: &FunctionCall, _span: Span) {
        let scope = self.expression_scope(call);
        let platform = self.platform;
        let Some(metadata) = platform.expression_metadata(scope, &call.function_name.node) else {
            trace!(function = %call.function_name.node, "unknown expression function, arguments skipped");
            return;
        };

        // A free function is bound to the object passed in its last object
        // parameter, the same convention instructions follow.
        let mut bound_object = call.object_name();

        let declared = metadata
            .parameters
            .iter()
            .skip(scope.implicit_parameter_count())
            .filter(|parameter| !parameter.code_only);

        for (parameter, arg) in declared.zip(&call.args) {
            if parameter.ty == self.request.parameter_type() {
                let considered = self.request.applies_to(bound_object);
                if considered && arg.span.slice(self.source) == Some(self.quoted_old_name.as_str()) {
                    self.occurrences.push(arg.span);
                } else {
                    self.visit_expr(arg);
                }
            }

            if !call.is_object_function() && parameter.is_object() {
                bound_object = object_name_of(arg);
            }
        }
    }
}

/// Object named by an argument: a bare identifier or a string literal.
fn object_name_of(arg: &Spanned<Expr>) -> Option<&str> {
    match &arg.node {
        Expr::Identifier(name) => Some(name),
        Expr::Text(value) => Some(value),
        _ => None,
    }
}

/// Spans of every occurrence of `request`'s old name in `root`, whose text is `source`.
pub fn find_occurrences<P: MetadataProvider + ?Sized>(
    platform: &P,
    objects: ObjectsScope<'_>,
    root: &Spanned<Expr>,
    source: &str,
    request: &NameChange,
) -> Vec<Span> {
    let mut finder = OccurrenceFinder::new(platform, objects, source, request);
    finder.visit_expr(root);
    finder.into_occurrences()
}
