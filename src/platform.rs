//! In-memory metadata registry, built programmatically or from a TOML manifest:
//!
//! ```toml
//! [[instructions]]
//! type = "ModVarObjet"
//! kind = "action"
//! parameters = [{ type = "objectList" }, { type = "objectvar" }, { type = "operator" }, { type = "expression" }]
//!
//! [[expressions]]
//! name = "ObjectExists"
//! parameters = [{ type = "objectName" }]
//!
//! [[object_expressions]]
//! object = ""            # base object: available on every object type
//! name = "Variable"
//! parameters = [{ type = "object" }, { type = "objectvar" }]
//!
//! [[behavior_expressions]]
//! behavior = "PlatformBehavior::PlatformerObjectBehavior"
//! name = "MaxSpeed"
//! parameters = [{ type = "object" }, { type = "behavior" }]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::diagnostics::EngineError;
use crate::metadata::{
    ExpressionMetadata, ExpressionScope, InstructionMetadata, MetadataProvider, ParameterMetadata,
};

#[derive(Debug, Clone, Default)]
pub struct Platform {
    actions: BTreeMap<String, InstructionMetadata>,
    conditions: BTreeMap<String, InstructionMetadata>,
    free_expressions: BTreeMap<String, ExpressionMetadata>,
    /// object type -> function name -> metadata. `""` is the base object.
    object_expressions: BTreeMap<String, BTreeMap<String, ExpressionMetadata>>,
    /// behavior type -> function name -> metadata.
    behavior_expressions: BTreeMap<String, BTreeMap<String, ExpressionMetadata>>,
}

impl Platform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(mut self, instruction_type: &str, parameters: Vec<ParameterMetadata>) -> Self {
        self.actions.insert(instruction_type.to_string(), InstructionMetadata { parameters });
        self
    }

    pub fn with_condition(mut self, instruction_type: &str, parameters: Vec<ParameterMetadata>) -> Self {
        self.conditions.insert(instruction_type.to_string(), InstructionMetadata { parameters });
        self
    }

    pub fn with_expression(mut self, name: &str, parameters: Vec<ParameterMetadata>) -> Self {
        self.free_expressions.insert(name.to_string(), ExpressionMetadata::new(parameters));
        self
    }

    /// `object_type` may be empty to declare a function every object has.
    pub fn with_object_expression(mut self, object_type: &str, name: &str, parameters: Vec<ParameterMetadata>) -> Self {
        self.object_expressions
            .entry(object_type.to_string())
            .or_default()
            .insert(name.to_string(), ExpressionMetadata::new(parameters));
        self
    }

    pub fn with_behavior_expression(mut self, behavior_type: &str, name: &str, parameters: Vec<ParameterMetadata>) -> Self {
        self.behavior_expressions
            .entry(behavior_type.to_string())
            .or_default()
            .insert(name.to_string(), ExpressionMetadata::new(parameters));
        self
    }

    /// Build a platform from manifest text. `path` labels errors.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, EngineError> {
        let manifest: TomlPlatform = toml::from_str(content).map_err(|e| {
            EngineError::metadata(format!("invalid metadata manifest: {e}"), path.to_path_buf())
        })?;

        let mut platform = Platform::new();

        for instruction in manifest.instructions {
            require_name(&instruction.name, "instruction type", path)?;
            let (table, label) = match instruction.kind {
                InstructionKind::Action => (&mut platform.actions, "action"),
                InstructionKind::Condition => (&mut platform.conditions, "condition"),
            };
            let previous = table.insert(
                instruction.name.clone(),
                InstructionMetadata { parameters: instruction.parameters },
            );
            if previous.is_some() {
                return Err(duplicate(label, &instruction.name, path));
            }
        }

        for expression in manifest.expressions {
            require_name(&expression.name, "expression name", path)?;
            let previous = platform
                .free_expressions
                .insert(expression.name.clone(), ExpressionMetadata::new(expression.parameters));
            if previous.is_some() {
                return Err(duplicate("expression", &expression.name, path));
            }
        }

        for expression in manifest.object_expressions {
            require_name(&expression.name, "object expression name", path)?;
            let previous = platform
                .object_expressions
                .entry(expression.object.clone())
                .or_default()
                .insert(expression.name.clone(), ExpressionMetadata::new(expression.parameters));
            if previous.is_some() {
                let qualified = format!("{}::{}", expression.object, expression.name);
                return Err(duplicate("object expression", &qualified, path));
            }
        }

        for expression in manifest.behavior_expressions {
            require_name(&expression.behavior, "behavior type", path)?;
            require_name(&expression.name, "behavior expression name", path)?;
            let previous = platform
                .behavior_expressions
                .entry(expression.behavior.clone())
                .or_default()
                .insert(expression.name.clone(), ExpressionMetadata::new(expression.parameters));
            if previous.is_some() {
                let qualified = format!("{}::{}", expression.behavior, expression.name);
                return Err(duplicate("behavior expression", &qualified, path));
            }
        }

        Ok(platform)
    }
}

impl MetadataProvider for Platform {
    fn instruction_parameters(&self, instruction_type: &str, is_condition: bool) -> Option<&[ParameterMetadata]> {
        let table = if is_condition { &self.conditions } else { &self.actions };
        table.get(instruction_type).map(|m| m.parameters.as_slice())
    }

    fn expression_metadata(&self, scope: ExpressionScope<'_>, function_name: &str) -> Option<&ExpressionMetadata> {
        match scope {
            ExpressionScope::Free => self.free_expressions.get(function_name),
            ExpressionScope::Object(object_type) => self
                .object_expressions
                .get(object_type)
                .and_then(|functions| functions.get(function_name))
                .or_else(|| {
                    self.object_expressions
                        .get("")
                        .and_then(|functions| functions.get(function_name))
                }),
            ExpressionScope::Behavior(behavior_type) => self
                .behavior_expressions
                .get(behavior_type)
                .and_then(|functions| functions.get(function_name)),
        }
    }
}

// ---- TOML deserialization types ----

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlPlatform {
    #[serde(default)]
    instructions: Vec<TomlInstruction>,
    #[serde(default)]
    expressions: Vec<TomlExpression>,
    #[serde(default)]
    object_expressions: Vec<TomlObjectExpression>,
    #[serde(default)]
    behavior_expressions: Vec<TomlBehaviorExpression>,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum InstructionKind {
    Action,
    Condition,
}

#[derive(Deserialize)]
struct TomlInstruction {
    #[serde(rename = "type")]
    name: String,
    kind: InstructionKind,
    #[serde(default)]
    parameters: Vec<ParameterMetadata>,
}

#[derive(Deserialize)]
struct TomlExpression {
    name: String,
    #[serde(default)]
    parameters: Vec<ParameterMetadata>,
}

#[derive(Deserialize)]
struct TomlObjectExpression {
    #[serde(default)]
    object: String,
    name: String,
    #[serde(default)]
    parameters: Vec<ParameterMetadata>,
}

#[derive(Deserialize)]
struct TomlBehaviorExpression {
    behavior: String,
    name: String,
    #[serde(default)]
    parameters: Vec<ParameterMetadata>,
}

fn require_name(name: &str, what: &str, path: &Path) -> Result<(), EngineError> {
    if name.trim().is_empty() {
        return Err(EngineError::metadata(
            format!("{what} must not be empty"),
            path.to_path_buf(),
        ));
    }
    Ok(())
}

fn duplicate(what: &str, name: &str, path: &Path) -> EngineError {
    EngineError::metadata(format!("duplicate {what} '{name}'"), path.to_path_buf())
}
