//! Tracing setup for hosts and the demo binary.
//!
//! The library emits `tracing` spans and events around tree parsing, search
//! filtering, event handling and every panel or selection transition. Nothing
//! is printed until a subscriber is installed.
//!
//! # Configuration
//!
//! Trace level is controlled via the `trace_level` config option, defaulting
//! to `"info"`. Any `EnvFilter` directive works, e.g.
//! `"selectree::app=debug"`.
//!
//! # Usage
//!
//! ```rust
//! use selectree::observability::init_tracing;
//! use selectree::Config;
//!
//! init_tracing(&Config::default());
//! tracing::info!("host started");
//! ```
//!
//! # Modules
//!
//! - `init`: Subscriber setup

mod init;

pub use init::init_tracing;
