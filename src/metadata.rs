//! Read-only description of what instructions and expression functions accept.

use serde::{Deserialize, Serialize};

use crate::project::Expression;

/// Declared types that denote an object. By convention, parameters that
/// refer to an object (object variables, behaviors...) come after it.
const OBJECT_PARAMETER_TYPES: &[&str] = &[
    "object",
    "objectPtr",
    "objectList",
    "objectListOrEmptyIfJustDeclared",
    "objectListOrEmptyWithoutPicking",
];

pub fn is_object_type(parameter_type: &str) -> bool {
    OBJECT_PARAMETER_TYPES.contains(&parameter_type)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterMetadata {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub default_value: String,
    /// Filled in by the code generator, never written by users.
    #[serde(default)]
    pub code_only: bool,
}

impl ParameterMetadata {
    pub fn new(ty: impl Into<String>) -> Self {
        Self { ty: ty.into(), ..Self::default() }
    }

    pub fn code_only(mut self) -> Self {
        self.code_only = true;
        self
    }

    pub fn optional(mut self, default_value: impl Into<String>) -> Self {
        self.optional = true;
        self.default_value = default_value.into();
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_object(&self) -> bool {
        is_object_type(&self.ty)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionMetadata {
    pub parameters: Vec<ParameterMetadata>,
}

impl ExpressionMetadata {
    pub fn new(parameters: Vec<ParameterMetadata>) -> Self {
        Self { parameters }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionMetadata {
    pub parameters: Vec<ParameterMetadata>,
}

/// Which family of expression functions a call is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionScope<'a> {
    /// Free function: `Fn(...)`.
    Free,
    /// Object function: `Object.Fn(...)`, keyed by the object's type
    /// (empty for the base object).
    Object(&'a str),
    /// Behavior function: `Object.Behavior::Fn(...)`, keyed by the behavior type.
    Behavior(&'a str),
}

impl ExpressionScope<'_> {
    /// Number of leading declared parameters filled implicitly by the call's
    /// binding (the object, then the behavior).
    pub fn implicit_parameter_count(&self) -> usize {
        match self {
            ExpressionScope::Free => 0,
            ExpressionScope::Object(_) => 1,
            ExpressionScope::Behavior(_) => 2,
        }
    }
}

/// Metadata lookups needed by the rename passes. `None` means "unknown":
/// callers skip what they cannot reason about instead of failing.
pub trait MetadataProvider {
    fn instruction_parameters(&self, instruction_type: &str, is_condition: bool) -> Option<&[ParameterMetadata]>;

    fn expression_metadata(&self, scope: ExpressionScope<'_>, function_name: &str) -> Option<&ExpressionMetadata>;
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for &P {
    fn instruction_parameters(&self, instruction_type: &str, is_condition: bool) -> Option<&[ParameterMetadata]> {
        (**self).instruction_parameters(instruction_type, is_condition)
    }

    fn expression_metadata(&self, scope: ExpressionScope<'_>, function_name: &str) -> Option<&ExpressionMetadata> {
        (**self).expression_metadata(scope, function_name)
    }
}

/// Walk declared parameters and actual values in lockstep, stopping at the
/// shorter of the two. An empty value of an optional parameter is replaced by
/// its declared default. `f` receives the metadata, the (possibly defaulted)
/// value, the parameter index and the last object name seen before it.
pub fn iterate_over_parameters<F>(values: &[Expression], declared: &[ParameterMetadata], mut f: F)
where
    F: FnMut(&ParameterMetadata, &Expression, usize, &str),
{
    let mut last_object_name = String::new();
    for (index, (metadata, value)) in declared.iter().zip(values).enumerate() {
        let defaulted;
        let value = if value.is_empty() && metadata.optional {
            defaulted = Expression::new(metadata.default_value.as_str());
            &defaulted
        } else {
            value
        };

        f(metadata, value, index, &last_object_name);

        if metadata.is_object() {
            last_object_name = value.as_str().to_string();
        }
    }
}
