//! Presentation layer: what a host needs to draw the panel and trigger.
//!
//! Rendering itself belongs to the host. This layer turns controller state
//! into plain data.
//!
//! ```text
//! Select → compute_viewmodel → PanelViewModel → host renderer
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Panel rows, search bar, footer and empty state
//! - [`summary`]: Trigger text per display mode

pub mod summary;
pub mod viewmodel;

pub use summary::{summarize, TagChip, TriggerSummary};
pub use viewmodel::{FooterInfo, OptionRow, PanelViewModel, SearchBarInfo};
