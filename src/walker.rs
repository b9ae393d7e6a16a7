//! Depth-first traversal of a project's events.
//!
//! A pass implements `EventsWorker`, overriding only the callbacks it needs,
//! and hands itself to `walk_project` (or `walk_events` for a single list).
//! Each callback returns `true` to stop the walker from descending into the
//! node's children (sub-events for events, sub-instructions for
//! instructions); the default is to descend.

use crate::project::{Event, Instruction, LinkEvent, ObjectDecl, Project};

/// Objects visible from the events being walked, innermost first.
#[derive(Debug, Clone, Copy)]
pub struct ObjectsScope<'a> {
    pub global: &'a [ObjectDecl],
    pub local: &'a [ObjectDecl],
}

impl<'a> ObjectsScope<'a> {
    pub fn new(global: &'a [ObjectDecl], local: &'a [ObjectDecl]) -> Self {
        Self { global, local }
    }

    pub fn empty() -> Self {
        Self { global: &[], local: &[] }
    }

    pub fn object(&self, name: &str) -> Option<&'a ObjectDecl> {
        self.local
            .iter()
            .chain(self.global)
            .find(|object| object.name == name)
    }

    pub fn type_of_object(&self, name: &str) -> Option<&'a str> {
        self.object(name).map(|object| object.kind.as_str())
    }

    pub fn type_of_behavior(&self, object_name: &str, behavior_name: &str) -> Option<&'a str> {
        self.object(object_name)?
            .behaviors
            .iter()
            .find(|behavior| behavior.name == behavior_name)
            .map(|behavior| behavior.kind.as_str())
    }
}

pub trait EventsWorker {
    fn visit_event(&mut self, _event: &mut Event, _scope: &ObjectsScope<'_>) -> bool {
        false
    }

    fn visit_link_event(&mut self, _link: &mut LinkEvent, _scope: &ObjectsScope<'_>) -> bool {
        false
    }

    fn visit_instruction(
        &mut self,
        _instruction: &mut Instruction,
        _is_condition: bool,
        _scope: &ObjectsScope<'_>,
    ) -> bool {
        false
    }
}

/// Visit each event, then its instructions (conditions before actions), then
/// its sub-events.
pub fn walk_events<W: EventsWorker + ?Sized>(worker: &mut W, events: &mut [Event], scope: &ObjectsScope<'_>) {
    for event in events {
        let mut prune = worker.visit_event(event, scope);
        if let Event::Link(link) = event {
            prune |= worker.visit_link_event(link, scope);
        }

        for (instructions, is_condition) in event.instruction_lists_mut() {
            walk_instructions(worker, instructions, is_condition, scope);
        }

        if !prune {
            if let Some(sub_events) = event.sub_events_mut() {
                walk_events(worker, sub_events, scope);
            }
        }
    }
}

pub fn walk_instructions<W: EventsWorker + ?Sized>(
    worker: &mut W,
    instructions: &mut [Instruction],
    is_condition: bool,
    scope: &ObjectsScope<'_>,
) {
    for instruction in instructions {
        if !worker.visit_instruction(instruction, is_condition, scope) {
            walk_instructions(worker, &mut instruction.sub_instructions, is_condition, scope);
        }
    }
}

/// Walk every events sheet of the project: layouts, external events and
/// extension functions, each with the objects it can see.
pub fn walk_project<W: EventsWorker + ?Sized>(worker: &mut W, project: &mut Project) {
    for layout in &mut project.layouts {
        let scope = ObjectsScope::new(&project.objects, &layout.objects);
        walk_events(worker, &mut layout.events, &scope);
    }

    for external in &mut project.external_events {
        let local = project
            .layouts
            .iter()
            .find(|layout| layout.name == external.associated_layout)
            .map(|layout| layout.objects.as_slice())
            .unwrap_or(&[]);
        let scope = ObjectsScope::new(&project.objects, local);
        walk_events(worker, &mut external.events, &scope);
    }

    for extension in &mut project.events_functions_extensions {
        for function in &mut extension.events_functions {
            let scope = ObjectsScope::new(&project.objects, &function.objects);
            walk_events(worker, &mut function.events, &scope);
        }
    }
}
