//! Selectree: a hierarchical, searchable selection controller.
//!
//! Selectree turns a native selection control into a richer interactive
//! surface with search, one level of grouping and tri-state group checkboxes,
//! while keeping the native control in sync for form submission and as a
//! screen-reader fallback.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host / renderer (main.rs demo, or a UI toolkit)    │  ← Gestures in, views out
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Open/close, keyboard cursor, debounced search    │
//! │  - Event handling and action emission               │
//! │  - Instance registry (one open panel at a time)     │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ selection/    │   │ search/       │   │ ui/           │
//! │ - single      │   │ - matching    │   │ - view models │
//! │ - multi       │   │ - filtering   │   │ - summaries   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Option tree arena, notifications (domain/)       │
//! │  - Backing control, selectors, timers (infra/)      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: The interaction controller and its event/action model
//! - [`domain`]: Option tree, notifications, errors
//! - [`selection`]: Single and multi selection algebra
//! - [`search`]: Label matching and tree filtering
//! - [`infrastructure`]: Backing control, document lookup, scheduler
//! - [`ui`]: View models and trigger summary text
//! - [`observability`]: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use selectree::{Config, Registry, Select};
//! use selectree::domain::{OptionItem, SourceEntry};
//! use selectree::infrastructure::NativeSelect;
//!
//! let control = Rc::new(NativeSelect::new("food").multiple().with_entries(vec![
//!     SourceEntry::group("Fruits", vec![
//!         OptionItem::new("apple", "Apple"),
//!         OptionItem::new("banana", "Banana"),
//!     ]),
//! ]));
//!
//! let registry = Registry::new();
//! let select = Select::create(&registry, control.clone(), Config::multi())?;
//! select.borrow_mut().select_all();
//!
//! assert_eq!(control.selected_values(), vec!["apple", "banana"]);
//! # Ok::<(), selectree::SelectreeError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod search;
pub mod selection;
pub mod ui;

pub use app::{handle_event, Action, Event, Key, Registry, Select, SelectHandle};
pub use domain::{Notification, NotificationKind, Result, SelectionValue, SelectreeError};
pub use search::SearchStrategy;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use domain::OptionData;

/// Caller-supplied trigger text formatter, invoked with the selected leaves.
pub type SelectedFormatter = Rc<dyn Fn(&[OptionData]) -> String>;

/// How a multi-select trigger summarizes its selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// "3 selected".
    Count,
    /// Comma-joined labels with an overflow count.
    #[default]
    List,
    /// Removable chips with an overflow badge.
    Tags,
}

impl DisplayMode {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "count" => Some(Self::Count),
            "list" => Some(Self::List),
            "tags" => Some(Self::Tags),
            _ => None,
        }
    }
}

/// Options of the single-select variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleOptions {
    /// Clicking the selected option again clears the selection.
    pub allow_deselect: bool,
    /// Close the panel shortly after a selection.
    pub close_on_select: bool,
}

impl Default for SingleOptions {
    fn default() -> Self {
        Self {
            allow_deselect: false,
            close_on_select: true,
        }
    }
}

/// Options of the multi-select variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiOptions {
    /// Selecting a group selects its members, with tri-state group flags.
    pub cascade: bool,
    pub close_on_select: bool,
    pub display_mode: DisplayMode,
    /// Chips shown before the overflow badge. 0 shows all.
    pub max_tags: usize,
    /// Labels listed before the overflow count. 0 lists all.
    pub max_selected_display: usize,
    /// Upper bound on selected leaves.
    pub max_selections: Option<usize>,
    pub select_all_button: bool,
    pub clear_button: bool,
}

impl Default for MultiOptions {
    fn default() -> Self {
        Self {
            cascade: true,
            close_on_select: false,
            display_mode: DisplayMode::List,
            max_tags: 3,
            max_selected_display: 3,
            max_selections: None,
            select_all_button: true,
            clear_button: true,
        }
    }
}

/// Controller variant with its variant-specific options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SelectionMode {
    Single(SingleOptions),
    Multi(MultiOptions),
}

impl Default for SelectionMode {
    fn default() -> Self {
        Self::Single(SingleOptions::default())
    }
}

/// Controller configuration.
///
/// Built from documented defaults plus caller overrides and never mutated by
/// the controller afterwards.
///
/// # Example
///
/// ```toml
/// placeholder = "Pick produce"
/// search_strategy = "starts_with"
/// search_debounce_ms = 200
///
/// [selection]
/// mode = "multi"
/// cascade = true
/// display_mode = "tags"
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Trigger text when nothing is selected.
    pub placeholder: String,
    /// Show a search box in the panel.
    pub searchable: bool,
    pub search_placeholder: String,
    pub search_strategy: SearchStrategy,
    /// Delay before a keystroke filters. 0 filters synchronously.
    pub search_debounce_ms: u64,
    /// Expand groups whose members match a search.
    pub expand_on_search: bool,
    /// Parse groups into a two-level tree instead of flattening them.
    pub nested: bool,
    /// Initial expansion of groups.
    pub default_expanded: bool,
    /// Focus the search box when the panel opens.
    pub auto_focus_search: bool,
    /// Clear the search when the panel closes.
    pub reset_search_on_close: bool,
    pub no_results_text: String,
    pub no_options_text: String,
    /// Count summary template; `{count}` is replaced.
    pub count_text: String,
    /// Accepted for compatibility; rendering is not virtualized.
    pub virtual_scroll: bool,
    /// Tracing filter directive, e.g. `"debug"`.
    pub trace_level: Option<String>,
    pub selection: SelectionMode,
    #[serde(skip)]
    pub selected_format: Option<SelectedFormatter>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            placeholder: "Select...".to_string(),
            searchable: true,
            search_placeholder: "Search...".to_string(),
            search_strategy: SearchStrategy::Contains,
            search_debounce_ms: 0,
            expand_on_search: true,
            nested: true,
            default_expanded: false,
            auto_focus_search: true,
            reset_search_on_close: true,
            no_results_text: "No results found".to_string(),
            no_options_text: "No options available".to_string(),
            count_text: "{count} selected".to_string(),
            virtual_scroll: false,
            trace_level: None,
            selection: SelectionMode::default(),
            selected_format: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("placeholder", &self.placeholder)
            .field("searchable", &self.searchable)
            .field("search_strategy", &self.search_strategy)
            .field("search_debounce_ms", &self.search_debounce_ms)
            .field("expand_on_search", &self.expand_on_search)
            .field("nested", &self.nested)
            .field("default_expanded", &self.default_expanded)
            .field("auto_focus_search", &self.auto_focus_search)
            .field("reset_search_on_close", &self.reset_search_on_close)
            .field("virtual_scroll", &self.virtual_scroll)
            .field("trace_level", &self.trace_level)
            .field("selection", &self.selection)
            .field("selected_format", &self.selected_format.as_ref().map(|_| "<fn>"))
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Single-select defaults.
    #[must_use]
    pub fn single() -> Self {
        Self::default()
    }

    /// Multi-select defaults.
    #[must_use]
    pub fn multi() -> Self {
        Self {
            selection: SelectionMode::Multi(MultiOptions::default()),
            ..Self::default()
        }
    }

    /// Whether this is the multi-select variant.
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        matches!(self.selection, SelectionMode::Multi(_))
    }

    /// Multi-select options, if this is the multi variant.
    #[must_use]
    pub const fn multi_options(&self) -> Option<&MultiOptions> {
        match &self.selection {
            SelectionMode::Multi(options) => Some(options),
            SelectionMode::Single(_) => None,
        }
    }

    /// Single-select options, if this is the single variant.
    #[must_use]
    pub const fn single_options(&self) -> Option<&SingleOptions> {
        match &self.selection {
            SelectionMode::Single(options) => Some(options),
            SelectionMode::Multi(_) => None,
        }
    }

    /// Installs a trigger text formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Fn(&[OptionData]) -> String + 'static) -> Self {
        self.selected_format = Some(Rc::new(formatter));
        self
    }

    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SelectreeError::Config`] if the TOML is malformed or a value
    /// has the wrong type.
    ///
    /// ```
    /// use selectree::Config;
    ///
    /// let config = Config::from_toml_str("placeholder = \"Pick one\"\n[selection]\nmode = \"multi\"\n")?;
    /// assert_eq!(config.placeholder, "Pick one");
    /// assert!(config.is_multiple());
    /// # Ok::<(), selectree::SelectreeError>(())
    /// ```
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| SelectreeError::Config(format!("Failed to parse config TOML: {e}")))
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SelectreeError::Io`] if the file cannot be read and
    /// [`SelectreeError::Config`] if it cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Applies `data-*` style attribute overrides.
    ///
    /// Each recognized key replaces the corresponding field; a value that does
    /// not parse leaves the field unchanged. Variant-specific keys only apply to
    /// their variant.
    ///
    /// # Parsing Rules
    ///
    /// - booleans: `true`/`false`/`1`/`0`
    /// - numbers: unsigned integers
    /// - `data-search-strategy`: `contains`, `startsWith`, `exact`, `fuzzy`
    /// - `data-display-mode`: `count`, `list`, `tags`
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use selectree::Config;
    ///
    /// let mut attrs = BTreeMap::new();
    /// attrs.insert("data-placeholder".to_string(), "Choose".to_string());
    /// attrs.insert("data-search-debounce".to_string(), "oops".to_string());
    ///
    /// let config = Config::single().with_attributes(&attrs);
    /// assert_eq!(config.placeholder, "Choose");
    /// assert_eq!(config.search_debounce_ms, 0);
    /// ```
    #[must_use]
    pub fn with_attributes(mut self, attributes: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| attributes.get(key).cloned();
        let flag = |key: &str| attributes.get(key).and_then(|v| parse_flag(v));
        let number = |key: &str| attributes.get(key).and_then(|v| v.trim().parse::<u64>().ok());

        if let Some(v) = text("data-placeholder") {
            self.placeholder = v;
        }
        if let Some(v) = flag("data-searchable") {
            self.searchable = v;
        }
        if let Some(v) = text("data-search-placeholder") {
            self.search_placeholder = v;
        }
        if let Some(v) = attributes.get("data-search-strategy").and_then(|v| SearchStrategy::from_name(v)) {
            self.search_strategy = v;
        }
        if let Some(v) = number("data-search-debounce").or_else(|| number("data-search-debounce-ms")) {
            self.search_debounce_ms = v;
        }
        if let Some(v) = flag("data-expand-on-search") {
            self.expand_on_search = v;
        }
        if let Some(v) = flag("data-nested") {
            self.nested = v;
        }
        if let Some(v) = flag("data-default-expanded") {
            self.default_expanded = v;
        }
        if let Some(v) = flag("data-auto-focus-search") {
            self.auto_focus_search = v;
        }
        if let Some(v) = flag("data-reset-search-on-close") {
            self.reset_search_on_close = v;
        }
        if let Some(v) = text("data-no-results-text") {
            self.no_results_text = v;
        }
        if let Some(v) = text("data-no-options-text") {
            self.no_options_text = v;
        }
        if let Some(v) = text("data-count-text") {
            self.count_text = v;
        }
        if let Some(v) = flag("data-virtual-scroll") {
            self.virtual_scroll = v;
        }

        match &mut self.selection {
            SelectionMode::Single(options) => {
                if let Some(v) = flag("data-allow-deselect") {
                    options.allow_deselect = v;
                }
                if let Some(v) = flag("data-close-on-select") {
                    options.close_on_select = v;
                }
            }
            SelectionMode::Multi(options) => {
                if let Some(v) = flag("data-cascade") {
                    options.cascade = v;
                }
                if let Some(v) = flag("data-close-on-select") {
                    options.close_on_select = v;
                }
                if let Some(v) = attributes.get("data-display-mode").and_then(|v| DisplayMode::from_name(v)) {
                    options.display_mode = v;
                }
                if let Some(v) = number("data-max-tags").and_then(|v| usize::try_from(v).ok()) {
                    options.max_tags = v;
                }
                if let Some(v) = number("data-max-selections").and_then(|v| usize::try_from(v).ok()) {
                    options.max_selections = Some(v);
                }
                if let Some(v) = number("data-max-selected-display").and_then(|v| usize::try_from(v).ok()) {
                    options.max_selected_display = v;
                }
                if let Some(v) = flag("data-select-all-button") {
                    options.select_all_button = v;
                }
                if let Some(v) = flag("data-clear-button") {
                    options.clear_button = v;
                }
            }
        }

        self
    }
}

impl Config {
    /// Builds a config from element attributes alone.
    ///
    /// A `multiple` attribute selects the multi variant (present with an empty
    /// value counts as set); every `data-*` key is then applied as in
    /// [`Config::with_attributes`].
    #[must_use]
    pub fn from_attributes(attributes: &BTreeMap<String, String>) -> Self {
        let multiple = attributes
            .get("multiple")
            .is_some_and(|v| parse_flag(v).unwrap_or(true));
        let base = if multiple { Self::multi() } else { Self::single() };
        base.with_attributes(attributes)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Attaches a controller to every backing control matching `selector`.
///
/// Tracing is initialized from `config.trace_level` first, if set.
///
/// # Errors
///
/// Fails if the selector is malformed, matches nothing, or matches a control
/// the configured variant cannot attach to.
pub fn enhance(
    registry: &Registry,
    document: &infrastructure::Document,
    selector: &str,
    config: &Config,
) -> Result<Vec<SelectHandle>> {
    if config.trace_level.is_some() {
        observability::init_tracing(config);
    }
    tracing::debug!(selector = %selector, multiple = config.is_multiple(), "enhancing controls");
    Select::attach_all(registry, document, selector, config)
}
