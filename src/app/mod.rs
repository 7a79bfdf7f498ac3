//! Application layer: the interaction controller.
//!
//! This module sits between the rendering host and the selection/search
//! layers. It owns the panel state machine, keyboard cursor, debounced search
//! and the registry enforcing a single open panel.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Host Gesture → Event → handle_event → Select mutations → Notifications
//!                                              ↓
//!                                   (render flag, Vec<Action>) → Host
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects the host carries out (focus, placement)
//! - [`handler`]: Event processing and key dispatch
//! - [`modes`]: Panel state, focus stops and keys
//! - [`registry`]: Live instances and the single-open-panel rule
//! - [`state`]: The [`Select`] controller and view model computation
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use selectree::app::{handle_event, Event, Key, Registry, Select};
//! use selectree::infrastructure::NativeSelect;
//! use selectree::Config;
//!
//! let registry = Registry::new();
//! let select = Select::create(&registry, Rc::new(NativeSelect::new("s")), Config::single())?;
//! let (render, _actions) = handle_event(&mut select.borrow_mut(), &Event::Key(Key::Space));
//! assert!(render);
//! # Ok::<(), selectree::SelectreeError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod registry;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{FocusStop, Key, PanelState};
pub use registry::{InstanceId, Registry};
pub use state::{Select, SelectHandle, AUTO_CLOSE_DELAY_MS};
