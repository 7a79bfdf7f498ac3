//! Scenario runner and entry point.
//!
//! This binary is a thin host for the Selectree library: it builds an
//! in-memory select control from a TOML scenario, attaches a controller, feeds
//! it a script of gestures and prints every notification as a JSON line,
//! followed by the final value and trigger text.
//!
//! # Scenario Format
//!
//! ```toml
//! script = ["trigger", "type:an", "down", "enter", "tick:200"]
//!
//! [config]
//! placeholder = "Pick fruit"
//!
//! [config.selection]
//! mode = "multi"
//!
//! [[entries]]
//! value = "bread"
//! label = "Bread"
//!
//! [[entries]]
//! label = "Fruits"
//! items = [
//!     { value = "apple", label = "Apple" },
//!     { value = "banana", label = "Banana", selected = true },
//! ]
//! ```
//!
//! # Script Steps
//!
//! - Key names: `down`, `up`, `left`, `right`, `home`, `end`, `enter`,
//!   `space`, `escape`, `tab`, `shift+tab`
//! - `trigger`, `outside`, `close`, `select-all`, `clear`
//! - `click:<value>`, `group:<group>`, `remove:<value>`, `type:<text>`,
//!   `tick:<ms>`

use std::path::Path;
use std::process::ExitCode;
use std::rc::Rc;

use serde::Deserialize;

use selectree::domain::SourceEntry;
use selectree::infrastructure::NativeSelect;
use selectree::observability::init_tracing;
use selectree::{handle_event, Config, Event, Key, Registry, Select, SelectreeError};

/// A scripted session against one control.
#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default = "default_id")]
    id: String,
    #[serde(default)]
    script: Vec<String>,
    #[serde(default)]
    config: Config,
    #[serde(default)]
    entries: Vec<SourceEntry>,
}

fn default_id() -> String {
    "scenario".to_string()
}

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: selectree <scenario.toml>");
        return ExitCode::from(2);
    };

    match run(Path::new(&path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &Path) -> selectree::Result<()> {
    let text = std::fs::read_to_string(path)?;
    let scenario: Scenario = toml::from_str(&text)
        .map_err(|e| SelectreeError::Config(format!("Failed to parse scenario: {e}")))?;

    init_tracing(&scenario.config);
    let _span = tracing::info_span!("scenario", path = %path.display()).entered();

    let mut control = NativeSelect::new(scenario.id).with_entries(scenario.entries);
    if scenario.config.is_multiple() {
        control = control.multiple();
    }
    let control = Rc::new(control);
    control.on_any(|notification| println!("{}", notification.to_json()));

    let registry = Registry::new();
    let select = Select::create(&registry, control, scenario.config)?;

    for step in &scenario.script {
        let Some(event) = parse_step(step) else {
            tracing::warn!(step = %step, "unknown script step, skipping");
            continue;
        };
        let (render, actions) = handle_event(&mut select.borrow_mut(), &event);
        tracing::debug!(step = %step, render, actions = ?actions, "step handled");
    }

    let select = select.borrow();
    let value = serde_json::to_string(&select.value())
        .map_err(|e| SelectreeError::Config(format!("Failed to serialize value: {e}")))?;
    println!("value: {value}");
    println!("summary: {}", select.summary().text);
    Ok(())
}

fn parse_step(step: &str) -> Option<Event> {
    let (command, arg) = step.split_once(':').unwrap_or((step, ""));
    let event = match command.trim() {
        "trigger" => Event::TriggerActivated,
        "outside" => Event::OutsidePointerDown,
        "close" => Event::CloseButton,
        "select-all" => Event::SelectAllClicked,
        "clear" => Event::ClearClicked,
        "click" => Event::OptionClicked(arg.to_string()),
        "group" => Event::GroupToggled(arg.to_string()),
        "remove" => Event::TagRemoved(arg.to_string()),
        "type" => Event::SearchInput(arg.to_string()),
        "tick" => Event::Tick {
            now_ms: arg.trim().parse().ok()?,
        },
        key => Event::Key(Key::from_name(key)?),
    };
    Some(event)
}
