//! In-memory event tree of a project, loaded from and saved to JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostics::EngineError;
use crate::parser::ast::Expr;
use crate::span::Spanned;

/// Raw text of one instruction parameter. Parsed on demand; the tree is
/// never stored alongside the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expression {
    text: String,
}

impl Expression {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn parse(&self) -> Result<Spanned<Expr>, EngineError> {
        crate::parse_expression(&self.text)
    }

    /// Parsed tree, or `None` when the text is not a valid expression.
    pub fn root(&self) -> Option<Spanned<Expr>> {
        self.parse().ok()
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Expression {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// A condition or an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inverted: bool,
    #[serde(default)]
    pub parameters: Vec<Expression>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_instructions: Vec<Instruction>,
}

impl Instruction {
    pub fn new<I, E>(kind: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expression>,
    {
        Self {
            kind: kind.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_sub_instruction(mut self, instruction: Instruction) -> Self {
        self.sub_instructions.push(instruction);
        self
    }

    pub fn parameter(&self, index: usize) -> Option<&Expression> {
        self.parameters.get(index)
    }

    /// Replace a parameter value. Out of range indices are ignored.
    pub fn set_parameter(&mut self, index: usize, value: Expression) {
        if let Some(slot) = self.parameters.get_mut(index) {
            *slot = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "BuiltinCommonInstructions::Standard")]
    Standard(StandardEvent),
    #[serde(rename = "BuiltinCommonInstructions::While")]
    While(WhileEvent),
    #[serde(rename = "BuiltinCommonInstructions::Repeat")]
    Repeat(RepeatEvent),
    #[serde(rename = "BuiltinCommonInstructions::Group")]
    Group(GroupEvent),
    #[serde(rename = "BuiltinCommonInstructions::Link")]
    Link(LinkEvent),
    #[serde(rename = "BuiltinCommonInstructions::Comment")]
    Comment(CommentEvent),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardEvent {
    #[serde(default)]
    pub conditions: Vec<Instruction>,
    #[serde(default)]
    pub actions: Vec<Instruction>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhileEvent {
    #[serde(default)]
    pub while_conditions: Vec<Instruction>,
    #[serde(default)]
    pub conditions: Vec<Instruction>,
    #[serde(default)]
    pub actions: Vec<Instruction>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatEvent {
    #[serde(default)]
    pub repeat_expression: Expression,
    #[serde(default)]
    pub conditions: Vec<Instruction>,
    #[serde(default)]
    pub actions: Vec<Instruction>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupEvent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Includes the events of another sheet, referenced by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEvent {
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentEvent {
    #[serde(default)]
    pub comment: String,
}

impl Event {
    pub fn standard(conditions: Vec<Instruction>, actions: Vec<Instruction>) -> Self {
        Event::Standard(StandardEvent { conditions, actions, events: Vec::new() })
    }

    pub fn link(target: impl Into<String>) -> Self {
        Event::Link(LinkEvent { target: target.into() })
    }

    /// Append a sub-event. Events that cannot have children are returned unchanged.
    pub fn with_sub_event(mut self, event: Event) -> Self {
        if let Some(events) = self.sub_events_mut() {
            events.push(event);
        }
        self
    }

    pub fn sub_events(&self) -> Option<&[Event]> {
        match self {
            Event::Standard(e) => Some(&e.events),
            Event::While(e) => Some(&e.events),
            Event::Repeat(e) => Some(&e.events),
            Event::Group(e) => Some(&e.events),
            Event::Link(_) | Event::Comment(_) => None,
        }
    }

    pub fn sub_events_mut(&mut self) -> Option<&mut Vec<Event>> {
        match self {
            Event::Standard(e) => Some(&mut e.events),
            Event::While(e) => Some(&mut e.events),
            Event::Repeat(e) => Some(&mut e.events),
            Event::Group(e) => Some(&mut e.events),
            Event::Link(_) | Event::Comment(_) => None,
        }
    }

    /// Instruction lists in evaluation order, each tagged `true` for conditions.
    pub fn instruction_lists_mut(&mut self) -> Vec<(&mut Vec<Instruction>, bool)> {
        match self {
            Event::Standard(e) => vec![(&mut e.conditions, true), (&mut e.actions, false)],
            Event::While(e) => vec![
                (&mut e.while_conditions, true),
                (&mut e.conditions, true),
                (&mut e.actions, false),
            ],
            Event::Repeat(e) => vec![(&mut e.conditions, true), (&mut e.actions, false)],
            Event::Group(_) | Event::Link(_) | Event::Comment(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDecl {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub behaviors: Vec<BehaviorDecl>,
}

impl ObjectDecl {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self { name: name.into(), kind: kind.into(), behaviors: Vec::new() }
    }

    pub fn with_behavior(mut self, name: impl Into<String>, kind: impl Into<String>) -> Self {
        self.behaviors.push(BehaviorDecl { name: name.into(), kind: kind.into() });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<ObjectDecl>,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// An events sheet that is not owned by a layout; its objects come from the
/// associated layout, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalEvents {
    pub name: String,
    #[serde(default)]
    pub associated_layout: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsFunction {
    pub name: String,
    /// Objects passed to the function as parameters.
    #[serde(default)]
    pub objects: Vec<ObjectDecl>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsFunctionsExtension {
    pub name: String,
    #[serde(default)]
    pub events_functions: Vec<EventsFunction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub name: String,
    /// Global objects, visible from every events sheet.
    #[serde(default)]
    pub objects: Vec<ObjectDecl>,
    #[serde(default)]
    pub layouts: Vec<Layout>,
    #[serde(default)]
    pub external_events: Vec<ExternalEvents>,
    #[serde(default)]
    pub events_functions_extensions: Vec<EventsFunctionsExtension>,
}

impl Project {
    /// `path` is only used to label errors.
    pub fn from_json(text: &str, path: &Path) -> Result<Self, EngineError> {
        serde_json::from_str(text)
            .map_err(|e| EngineError::project(format!("invalid project file: {e}"), path.to_path_buf()))
    }

    pub fn to_json(&self, path: &Path) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::project(format!("failed to serialize project: {e}"), path.to_path_buf()))
    }

    pub fn layout(&self, name: &str) -> Option<&Layout> {
        self.layouts.iter().find(|l| l.name == name)
    }
}
