//! Dock layout using egui_dock.
//!
//! Layout: Map (center, ~74%) | Places (right, ~26%)
//!         ───────────────────┴────────────────────
//!         Console (bottom, ~22% of total height)

use egui_dock::{DockState, NodeIndex};

/// Panel identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Map,
    Places,
    Console,
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelId::Map => write!(f, "Map"),
            PanelId::Places => write!(f, "Places"),
            PanelId::Console => write!(f, "Console"),
        }
    }
}

/// Create the initial dock layout.
///
/// ```text
/// ┌──────────────────────────┬──────────────┐
/// │                          │              │
/// │           Map            │    Places    │
/// │                          │              │
/// ├──────────────────────────┴──────────────┤
/// │                Console                  │
/// └─────────────────────────────────────────┘
/// ```
pub fn create_dock_state() -> DockState<PanelId> {
    let mut dock_state = DockState::new(vec![PanelId::Map]);

    let [top, _bottom] = dock_state.main_surface_mut().split_below(
        NodeIndex::root(),
        0.78,
        vec![PanelId::Console],
    );

    let [_map, _right] =
        dock_state
            .main_surface_mut()
            .split_right(top, 0.74, vec![PanelId::Places]);

    dock_state
}
