//! Panel visibility state.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

/// Visibility plus whether the greeting has already been shown.
///
/// `has_greeted` survives close/open cycles so the greeting appears once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelState {
    pub visible: bool,
    pub has_greeted: bool,
}

/// Controller phase derived from panel visibility and the pending exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelPhase {
    Closed,
    OpenIdle,
    OpenPending,
}

impl PanelPhase {
    pub fn of(panel: PanelState, pending: bool) -> Self {
        match (panel.visible, pending) {
            (false, _) => Self::Closed,
            (true, false) => Self::OpenIdle,
            (true, true) => Self::OpenPending,
        }
    }
}
