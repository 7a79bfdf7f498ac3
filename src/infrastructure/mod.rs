//! Infrastructure layer: the collaborators a controller runs against.
//!
//! # Modules
//!
//! - [`backing`]: The native control being enhanced, with its listener bus
//! - [`document`]: Selector lookup for the batch constructor
//! - [`scheduler`]: Logical-clock timers for debounce and auto-close

pub mod backing;
pub mod document;
pub mod scheduler;

pub use backing::{BackingControl, ControlKind, ListenerId, NativeSelect};
pub use document::{Document, Selector};
pub use scheduler::{Scheduler, TimerHandle, TimerKind};
