use tracing::debug;

use crate::project::{LinkEvent, Project};
use crate::walker::{EventsWorker, ObjectsScope, walk_project};

/// Retargets link events after the events sheet they include was renamed.
#[derive(Debug, Clone)]
pub struct LinkEventTargetRenamer {
    old_name: String,
    new_name: String,
}

impl LinkEventTargetRenamer {
    pub fn new(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self { old_name: old_name.into(), new_name: new_name.into() }
    }
}

impl EventsWorker for LinkEventTargetRenamer {
    fn visit_link_event(&mut self, link: &mut LinkEvent, _scope: &ObjectsScope<'_>) -> bool {
        if link.target == self.old_name {
            debug!(from = %self.old_name, to = %self.new_name, "retargeted link event");
            link.target.clone_from(&self.new_name);
        }
        false
    }
}

pub fn rename_link_targets(project: &mut Project, old_name: &str, new_name: &str) {
    walk_project(&mut LinkEventTargetRenamer::new(old_name, new_name), project);
}
