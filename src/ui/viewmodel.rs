//! View model types representing renderable panel state.
//!
//! View models are immutable snapshots computed from controller state and
//! consumed by the rendering host. They contain no behavior, only display-ready
//! data.
//!
//! # Architecture
//!
//! View models are created via `Select::compute_viewmodel()`:
//!
//! ```text
//! Select → compute_viewmodel → PanelViewModel → host renderer
//! ```

use super::summary::TriggerSummary;

/// Complete panel view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelViewModel {
    pub is_open: bool,

    /// The controller is disabled; the trigger should not react.
    pub disabled: bool,

    /// Visible rows in keyboard order.
    pub rows: Vec<OptionRow>,

    /// Index into `rows` of the focused row.
    pub focused_row: Option<usize>,

    /// Present when the controller is searchable.
    pub search_bar: Option<SearchBarInfo>,

    /// Shown instead of rows when there is nothing to list.
    pub empty_message: Option<String>,

    /// Multi-select footer buttons.
    pub footer: Option<FooterInfo>,

    /// Trigger text and chips.
    pub summary: TriggerSummary,
}

/// One visible node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    pub value: String,
    pub label: String,

    /// Indentation depth.
    pub level: usize,

    pub is_group: bool,
    pub selected: bool,
    pub indeterminate: bool,
    pub expanded: bool,
    pub disabled: bool,
    pub focused: bool,
}

/// Search input display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Query currently applied, or pending if a debounce is running.
    pub query: String,
    pub placeholder: String,
}

/// Which footer buttons to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterInfo {
    pub select_all: bool,
    pub clear: bool,
}
