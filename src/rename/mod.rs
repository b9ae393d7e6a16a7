//! Renaming of project elements referenced by name from event expressions.
//!
//! Layers, animations, object variables and similar elements are referenced
//! as string literals inside instruction parameters. When one is renamed,
//! every literal naming it must follow, but only where the surrounding
//! instruction or function declares the literal to be of that element's
//! parameter type. Everything else in the expression text is preserved
//! byte for byte.

pub mod finder;
pub mod link;
pub mod splice;

use tracing::{debug, trace};

use crate::metadata::{MetadataProvider, ParameterMetadata, iterate_over_parameters};
use crate::project::{Expression, Instruction, Project};
use crate::walker::{EventsWorker, ObjectsScope, walk_project};

pub use finder::{OccurrenceFinder, find_occurrences};
pub use link::{LinkEventTargetRenamer, rename_link_targets};
pub use splice::splice;

/// A rename of one element: which parameter type refers to it, its old and
/// new names, and optionally the object it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameChange {
    parameter_type: String,
    scope_object_name: Option<String>,
    old_name: String,
    new_name: String,
}

impl NameChange {
    pub fn new(parameter_type: impl Into<String>, old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            parameter_type: parameter_type.into(),
            scope_object_name: None,
            old_name: old_name.into(),
            new_name: new_name.into(),
        }
    }

    /// Restrict the rename to parameters bound to `object_name`. An empty
    /// name removes the restriction.
    pub fn scoped_to(mut self, object_name: impl Into<String>) -> Self {
        let object_name = object_name.into();
        self.scope_object_name = (!object_name.is_empty()).then_some(object_name);
        self
    }

    pub fn parameter_type(&self) -> &str {
        &self.parameter_type
    }

    pub fn scope_object_name(&self) -> Option<&str> {
        self.scope_object_name.as_deref()
    }

    pub fn old_name(&self) -> &str {
        &self.old_name
    }

    pub fn new_name(&self) -> &str {
        &self.new_name
    }

    /// `"old"`, the literal as it appears in expression text.
    pub fn quoted_old_name(&self) -> String {
        format!("\"{}\"", self.old_name)
    }

    pub fn quoted_new_name(&self) -> String {
        format!("\"{}\"", self.new_name)
    }

    /// Whether a parameter bound to `object_name` is affected. Unscoped
    /// renames affect every parameter.
    pub fn applies_to(&self, object_name: Option<&str>) -> bool {
        match &self.scope_object_name {
            None => true,
            Some(scope) => object_name == Some(scope.as_str()),
        }
    }
}

/// Events worker rewriting every instruction parameter that refers to the
/// renamed element.
pub struct ProjectElementRenamer<'a, P: MetadataProvider + ?Sized> {
    platform: &'a P,
    request: NameChange,
    quoted_old_name: String,
    quoted_new_name: String,
}

impl<'a, P: MetadataProvider + ?Sized> ProjectElementRenamer<'a, P> {
    pub fn new(platform: &'a P, request: NameChange) -> Self {
        Self {
            platform,
            quoted_old_name: request.quoted_old_name(),
            quoted_new_name: request.quoted_new_name(),
            request,
        }
    }

    pub fn request(&self) -> &NameChange {
        &self.request
    }

    /// New text for one parameter value, or `None` to leave it alone.
    fn rename_parameter(
        &self,
        metadata: &ParameterMetadata,
        value: &Expression,
        last_object_name: &str,
        objects: &ObjectsScope<'_>,
    ) -> Option<Expression> {
        if metadata.ty != self.request.parameter_type() {
            return None;
        }
        if !self.request.applies_to(Some(last_object_name)) {
            return None;
        }

        if value.as_str() == self.quoted_old_name {
            return Some(Expression::new(self.quoted_new_name.as_str()));
        }

        let root = value.root()?;
        let occurrences = find_occurrences(self.platform, *objects, &root, value.as_str(), &self.request);
        if occurrences.is_empty() {
            return None;
        }
        Some(Expression::new(splice(value.as_str(), &occurrences, &self.quoted_new_name)))
    }
}

impl<P: MetadataProvider + ?Sized> EventsWorker for ProjectElementRenamer<'_, P> {
    fn visit_instruction(&mut self, instruction: &mut Instruction, is_condition: bool, scope: &ObjectsScope<'_>) -> bool {
        let platform = self.platform;
        let Some(declared) = platform.instruction_parameters(&instruction.kind, is_condition) else {
            trace!(instruction = %instruction.kind, is_condition, "unknown instruction, parameters skipped");
            return false;
        };

        let mut updates = Vec::new();
        iterate_over_parameters(&instruction.parameters, declared, |metadata, value, index, last_object_name| {
            if let Some(renamed) = self.rename_parameter(metadata, value, last_object_name, scope) {
                updates.push((index, renamed));
            }
        });

        for (index, renamed) in updates {
            debug!(
                instruction = %instruction.kind,
                parameter = index,
                from = %instruction.parameter(index).map(Expression::as_str).unwrap_or_default(),
                to = %renamed,
                "renamed parameter"
            );
            instruction.set_parameter(index, renamed);
        }

        false
    }
}

/// Rename `request`'s element everywhere it is referenced from the events
/// of `project`.
pub fn rename_in_project<P: MetadataProvider + ?Sized>(project: &mut Project, platform: &P, request: &NameChange) {
    debug!(
        parameter_type = request.parameter_type(),
        scope = request.scope_object_name().unwrap_or_default(),
        from = request.old_name(),
        to = request.new_name(),
        "renaming project element"
    );
    let mut renamer = ProjectElementRenamer::new(platform, request.clone());
    walk_project(&mut renamer, project);
}
