//! Rendering of grouped predictions into injected containers.
//!
//! [`render`] only talks to the [`Container`] trait, so the same pass fills
//! HTML containers for the page and plain in-memory containers in tests.
//! Cosmetic behaviour is layered on afterwards through [`RenderHook`]s, run in
//! the order given once every group has been rendered.

pub mod element;
pub mod page;

pub use element::{format_timestamp, TeamElement};
pub use page::{Page, PageMeta, Variant};

use std::collections::BTreeMap;

use crate::predictions::{Group, TeamEntry};

/// Shown in every container when predictions could not be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Unable to load predictions. Please refresh the page.";

/// Output surface for one group.
pub trait Container {
    /// Drop all elements and any placeholder.
    fn clear(&mut self);

    fn append(&mut self, element: TeamElement);

    /// Replace the contents with an inline message.
    fn show_placeholder(&mut self, message: &str);

    fn elements_mut(&mut self) -> &mut [TeamElement];
}

/// Stage run after base rendering, once per container.
pub trait RenderHook: Send + Sync {
    fn after_render(&self, group: Group, container: &mut dyn Container);
}

/// Grow bars from zero to their true width shortly after insertion.
#[derive(Debug, Clone, Copy)]
pub struct FillAnimation {
    pub delay_ms: u64,
}

impl Default for FillAnimation {
    fn default() -> Self {
        FillAnimation { delay_ms: 100 }
    }
}

impl RenderHook for FillAnimation {
    fn after_render(&self, _group: Group, container: &mut dyn Container) {
        for element in container.elements_mut() {
            element.bar.width = 0.0;
            element.bar.fill_delay_ms = Some(self.delay_ms);
        }
    }
}

/// Fill each registered container with its group's teams, in order.
///
/// Containers whose group is absent from `groups` are cleared and left empty;
/// groups without a container are skipped. Returns how many containers
/// received a group.
pub fn render<C: Container>(
    groups: &BTreeMap<Group, Vec<TeamEntry>>,
    containers: &mut BTreeMap<Group, C>,
    hooks: &[&dyn RenderHook],
) -> usize {
    let mut rendered = 0;
    for (group, container) in containers.iter_mut() {
        container.clear();
        if let Some(teams) = groups.get(group) {
            for team in teams {
                container.append(TeamElement::from_entry(team));
            }
            rendered += 1;
        }
    }

    for hook in hooks {
        for (group, container) in containers.iter_mut() {
            hook.after_render(*group, container);
        }
    }

    rendered
}

/// Put the same message in every container.
pub fn render_placeholder<C: Container>(containers: &mut BTreeMap<Group, C>, message: &str) {
    for container in containers.values_mut() {
        container.clear();
        container.show_placeholder(message);
    }
}
