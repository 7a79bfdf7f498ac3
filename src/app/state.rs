//! The select controller and its interaction state.
//!
//! [`Select`] owns the option tree of one backing control together with the
//! transient panel state: open/closed, the focused row, the search query and
//! the filtered view. It is the single source of truth for selection; the
//! backing control is mirrored after every change and notifications are
//! raised on it.
//!
//! # State Components
//!
//! - **Tree**: Option nodes with selection and expansion flags
//! - **Panel**: Open/closed, focused row, focused panel control
//! - **Search**: Applied query, pending debounced query, filtered view
//! - **Timers**: Debounce and auto-close handles on a logical clock
//!
//! # Visible Rows
//!
//! Keyboard navigation runs over the visible rows: the filtered view (or the
//! whole tree) with a group's members included only while the group is
//! expanded. The list is recomputed on demand so it always reflects the latest
//! selection, expansion and filter state.
//!
//! # Listeners
//!
//! Notifications are dispatched synchronously while the controller is
//! mutably borrowed. Listeners may read the backing control but must not call
//! back into the controller from inside the callback.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use selectree::{Config, Registry, Select};
//! use selectree::domain::OptionItem;
//! use selectree::infrastructure::NativeSelect;
//!
//! let control = Rc::new(NativeSelect::new("size").with_entries(vec![
//!     OptionItem::new("s", "Small").into(),
//!     OptionItem::new("m", "Medium").disabled().into(),
//!     OptionItem::new("l", "Large").into(),
//! ]));
//!
//! let select = Select::create(&Registry::new(), control, Config::single())?;
//! let mut select = select.borrow_mut();
//! select.open();
//! select.move_focus(true);
//! select.move_focus(true);
//! assert_eq!(select.focused_value().as_deref(), Some("l"));
//! # Ok::<(), selectree::SelectreeError>(())
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::actions::Action;
use super::modes::{FocusStop, PanelState};
use super::registry::{InstanceId, Registry};
use crate::domain::{
    NodeId, Notification, OptionData, OptionTree, Result, SelectionValue, SelectreeError, SourceEntry,
};
use crate::infrastructure::{BackingControl, ControlKind, Document, Scheduler, TimerHandle, TimerKind};
use crate::search::{self, filter_tree, FilterView};
use crate::selection::{multi, single};
use crate::ui::{summarize, FooterInfo, OptionRow, PanelViewModel, SearchBarInfo, TriggerSummary};
use crate::{Config, SelectionMode};

/// Delay between a single-select choice and the panel closing, so the
/// selection is visible before the panel disappears.
pub const AUTO_CLOSE_DELAY_MS: u64 = 150;

/// Shared handle to a controller, as returned by the constructors.
pub type SelectHandle = Rc<RefCell<Select>>;

/// Interaction controller for one backing control.
///
/// Mutating methods return `true` when something visible changed, so hosts
/// know when to re-render. Operations on unknown values, disabled options,
/// non-groups or panels already in the requested state are silent no-ops.
#[derive(Debug)]
pub struct Select {
    id: InstanceId,
    config: Config,
    control: Rc<dyn BackingControl>,
    registry: Registry,
    tree: OptionTree,
    panel: PanelState,
    focused_index: Option<usize>,
    focus_stop: Option<FocusStop>,
    search_query: String,
    pending_query: Option<String>,
    filter: Option<FilterView>,
    scheduler: Scheduler,
    search_timer: Option<TimerHandle>,
    close_timer: Option<TimerHandle>,
    disabled: bool,
    destroyed: bool,
    actions: Vec<Action>,
}

impl Select {
    /// Attaches a controller to `control` and registers it with `registry`.
    ///
    /// The tree is parsed from the control's current entries. Single-select
    /// keeps only the last preselected option; the normalized selection is
    /// mirrored back onto the control.
    ///
    /// # Errors
    ///
    /// - [`SelectreeError::WrongElementKind`] if `control` is not a select
    /// - [`SelectreeError::WrongMultiplicity`] if the control's multiplicity
    ///   does not match the configured variant
    pub fn create(registry: &Registry, control: Rc<dyn BackingControl>, config: Config) -> Result<SelectHandle> {
        let _span = tracing::debug_span!(
            "create_select",
            control = %control.id(),
            multiple = config.is_multiple()
        )
        .entered();

        let kind = control.kind();
        if kind != ControlKind::Select {
            return Err(SelectreeError::WrongElementKind {
                found: kind.to_string(),
            });
        }
        if control.is_multiple() != config.is_multiple() {
            return Err(SelectreeError::WrongMultiplicity {
                expected_multiple: config.is_multiple(),
            });
        }

        let tree = build_tree(&control.entries(), &config, None);
        control.mirror_selection(&tree.selected_values());

        let id = registry.allocate();
        let select = Self {
            id,
            config,
            control,
            registry: registry.clone(),
            tree,
            panel: PanelState::Closed,
            focused_index: None,
            focus_stop: None,
            search_query: String::new(),
            pending_query: None,
            filter: None,
            scheduler: Scheduler::default(),
            search_timer: None,
            close_timer: None,
            disabled: false,
            destroyed: false,
            actions: Vec::new(),
        };
        tracing::debug!(instance = ?id, nodes = select.tree.len(), "controller created");

        let handle = Rc::new(RefCell::new(select));
        registry.insert(id, &handle);
        Ok(handle)
    }

    /// Attaches one controller per control in `document` matching `selector`.
    ///
    /// Each control's attributes are applied over `config` as `data-*`
    /// overrides. If any control fails, controllers already created by this
    /// call are destroyed again.
    ///
    /// # Errors
    ///
    /// - [`SelectreeError::InvalidSelector`] if the selector cannot be parsed
    /// - [`SelectreeError::TargetNotFound`] if nothing matches
    /// - any error of [`Select::create`] for a matched control
    pub fn attach_all(
        registry: &Registry,
        document: &Document,
        selector: &str,
        config: &Config,
    ) -> Result<Vec<SelectHandle>> {
        let matched = document.query(selector)?;
        if matched.is_empty() {
            return Err(SelectreeError::TargetNotFound {
                selector: selector.to_string(),
            });
        }

        let mut handles = Vec::with_capacity(matched.len());
        for control in matched {
            let instance_config = config.clone().with_attributes(control.attributes());
            let control: Rc<dyn BackingControl> = control;
            match Self::create(registry, control, instance_config) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    for handle in &handles {
                        handle.borrow_mut().destroy();
                    }
                    return Err(e);
                }
            }
        }
        Ok(handles)
    }

    #[must_use]
    pub const fn id(&self) -> InstanceId {
        self.id
    }

    /// Read-only configuration snapshot.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The option tree, for hosts that render it themselves.
    #[must_use]
    pub const fn tree(&self) -> &OptionTree {
        &self.tree
    }

    /// The applied search query, normalized.
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Index into [`Select::visible_nodes`] of the focused row.
    #[must_use]
    pub const fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    /// Value of the focused row.
    #[must_use]
    pub fn focused_value(&self) -> Option<String> {
        self.focused_node()
            .and_then(|id| self.tree.node(id))
            .map(|n| n.value.clone())
    }

    /// Panel control that has keyboard focus.
    #[must_use]
    pub const fn focus_stop(&self) -> Option<FocusStop> {
        self.focus_stop
    }

    /// Drains the actions queued for the host.
    ///
    /// Programmatic calls such as [`Select::open`] or [`Select::close`] queue
    /// actions too. Hosts driving the controller directly take them here;
    /// [`handle_event`](super::handle_event) drops whatever is left over
    /// before handling the next event.
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    // ---- value -------------------------------------------------------------

    /// Current selection: a scalar for single-select, leaf values in tree
    /// order for multi-select.
    #[must_use]
    pub fn value(&self) -> SelectionValue {
        match self.config.selection {
            SelectionMode::Single(_) => SelectionValue::Single(single::current(&self.tree)),
            SelectionMode::Multi(_) => SelectionValue::Multi(self.tree.selected_values()),
        }
    }

    /// Selected leaves with their group labels.
    #[must_use]
    pub fn selected_options(&self) -> Vec<OptionData> {
        self.tree
            .selected_leaves()
            .into_iter()
            .filter_map(|id| self.tree.option_data(id))
            .collect()
    }

    /// Replaces the selection.
    ///
    /// Single-select takes the first value, or clears on an empty list.
    /// Multi-select keeps disabled selections and selects each listed enabled
    /// leaf, up to `max_selections`. Unknown values and groups are ignored.
    /// Emits `change` only if the value actually changed.
    pub fn set_value<I, S>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.destroyed {
            return false;
        }
        let requested: Vec<String> = values.into_iter().map(|v| v.as_ref().to_string()).collect();
        let before = self.value();

        match &self.config.selection {
            SelectionMode::Single(_) => match requested.first() {
                Some(value) => {
                    single::select_exclusive(&mut self.tree, value, false);
                }
                None => {
                    single::clear(&mut self.tree);
                }
            },
            SelectionMode::Multi(options) => {
                let limit = options.max_selections;
                multi::clear_all(&mut self.tree);
                for value in &requested {
                    if limit.is_some_and(|max| self.tree.selected_leaves().len() >= max) {
                        tracing::debug!(limit = ?limit, "selection limit reached in set_value");
                        break;
                    }
                    if let Some(id) = self.tree.find(value).filter(|&id| self.is_leaf(id)) {
                        multi::select(&mut self.tree, id, false);
                    }
                }
            }
        }

        let changed = self.value() != before;
        if changed {
            self.commit_selection();
        }
        changed
    }

    /// Selects every enabled leaf, up to `max_selections`. Multi-select only.
    pub fn select_all(&mut self) -> bool {
        if self.destroyed || self.disabled {
            return false;
        }
        let Some(limit) = self.config.multi_options().map(|o| o.max_selections) else {
            return false;
        };

        let before = self.tree.selected_values();
        match limit {
            None => {
                multi::select_all_leaves(&mut self.tree);
            }
            Some(max) => {
                for leaf in self.tree.leaves() {
                    if self.tree.selected_leaves().len() >= max {
                        break;
                    }
                    if self.is_enabled(leaf) {
                        multi::select(&mut self.tree, leaf, false);
                    }
                }
            }
        }

        let changed = self.tree.selected_values() != before;
        if changed {
            tracing::debug!(selected = self.tree.selected_leaves().len(), "selected all");
            self.commit_selection();
        }
        changed
    }

    /// Clears the selection, keeping disabled options selected.
    ///
    /// Emits `clear` with the previous value followed by `change`.
    pub fn clear(&mut self) -> bool {
        if self.destroyed || self.disabled {
            return false;
        }
        let previous = self.value();
        if previous.is_empty() {
            return false;
        }

        match self.config.selection {
            SelectionMode::Single(_) => {
                single::clear(&mut self.tree);
            }
            SelectionMode::Multi(_) => {
                multi::clear_all(&mut self.tree);
            }
        }
        if self.value() == previous {
            return false;
        }

        tracing::debug!("selection cleared");
        self.control.mirror_selection(&self.tree.selected_values());
        self.emit(&Notification::Clear { previous });
        self.emit_change();
        true
    }

    /// Multi-select name for [`Select::clear`].
    pub fn clear_all(&mut self) -> bool {
        self.clear()
    }

    /// Deselects one leaf from its tag chip.
    pub fn remove_tag(&mut self, value: &str) -> bool {
        if self.destroyed || self.disabled || !self.config.is_multiple() {
            return false;
        }
        let Some(id) = self.tree.find(value) else {
            return false;
        };
        match self.tree.node(id) {
            Some(node) if node.is_leaf() && node.selected && !node.disabled => {}
            _ => return false,
        }
        multi::deselect(&mut self.tree, id, false);
        self.commit_selection();
        true
    }

    /// Activates the node with `value` as a pointer click would.
    pub fn click_option(&mut self, value: &str) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.tree.find(value).is_some_and(|id| self.activate(id))
    }

    // ---- panel -------------------------------------------------------------

    /// Opens the panel, closing any other open instance in the registry.
    ///
    /// No-op (and no `open` notification) if already open, disabled or
    /// destroyed.
    pub fn open(&mut self) -> bool {
        if self.destroyed || self.disabled || self.panel.is_open() {
            return false;
        }

        if let Some(other) = self.registry.claim_open(self.id) {
            let closed = other.try_borrow_mut().map(|mut other| other.close());
            if closed.is_err() {
                tracing::debug!("previously open instance is busy");
            }
        }

        self.panel = PanelState::Open;
        self.focused_index = None;
        self.actions.push(Action::ComputePlacement);
        if self.config.searchable && self.config.auto_focus_search {
            self.focus_stop = Some(FocusStop::SearchInput);
            self.actions.push(Action::MoveFocus(FocusStop::SearchInput));
        } else {
            self.focus_stop = None;
        }

        tracing::debug!(instance = ?self.id, "panel opened");
        self.emit(&Notification::Open);
        true
    }

    /// Closes the panel. No-op (and no `close` notification) if closed.
    pub fn close(&mut self) -> bool {
        if self.destroyed || !self.panel.is_open() {
            return false;
        }

        self.panel = PanelState::Closed;
        if let Some(handle) = self.close_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.focused_index = None;
        self.focus_stop = None;
        if let Some(handle) = self.search_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.pending_query = None;
        if self.config.reset_search_on_close {
            self.reset_search();
        }
        self.registry.release_open(self.id);
        self.actions.push(Action::ReturnFocusToTrigger);

        tracing::debug!(instance = ?self.id, "panel closed");
        self.emit(&Notification::Close);
        true
    }

    pub fn toggle(&mut self) -> bool {
        if self.panel.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    /// Escape clears a non-empty search first and closes on the next press.
    pub fn escape(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        if self.search_query.is_empty() && self.pending_query.is_none() {
            self.close()
        } else {
            self.clear_search()
        }
    }

    // ---- expansion ---------------------------------------------------------

    pub fn expand_all(&mut self) -> bool {
        let mut changed = false;
        for group in self.tree.groups() {
            changed |= self.set_group_expanded(group, true);
        }
        changed
    }

    pub fn collapse_all(&mut self) -> bool {
        let mut changed = false;
        for group in self.tree.groups() {
            changed |= self.set_group_expanded(group, false);
        }
        changed
    }

    /// Expands a group by synthesized value or label.
    pub fn expand_group(&mut self, identifier: &str) -> bool {
        self.tree
            .find_group(identifier)
            .is_some_and(|id| self.set_group_expanded(id, true))
    }

    /// Collapses a group by synthesized value or label.
    pub fn collapse_group(&mut self, identifier: &str) -> bool {
        self.tree
            .find_group(identifier)
            .is_some_and(|id| self.set_group_expanded(id, false))
    }

    /// Flips a group's expansion, as its disclosure control does.
    pub fn toggle_group(&mut self, identifier: &str) -> bool {
        let Some(id) = self.tree.find_group(identifier) else {
            return false;
        };
        let expanded = self.tree.node(id).is_some_and(|n| n.expanded);
        self.set_group_expanded(id, !expanded)
    }

    fn set_group_expanded(&mut self, id: NodeId, expanded: bool) -> bool {
        if self.destroyed {
            return false;
        }
        let focused = self.focused_node();
        if !self.tree.set_expanded(id, expanded) {
            return false;
        }

        if let Some(focused) = focused {
            let visible = self.visible_nodes();
            self.focused_index = visible
                .iter()
                .position(|&n| n == focused)
                .or_else(|| visible.iter().position(|&n| n == id));
        }

        let group = self.tree.node(id).map(|n| n.value.clone()).unwrap_or_default();
        tracing::debug!(group = %group, expanded, "group expansion changed");
        let notification = if expanded {
            Notification::Expand { group }
        } else {
            Notification::Collapse { group }
        };
        self.emit(&notification);
        true
    }

    // ---- lifecycle ---------------------------------------------------------

    /// Rebuilds the tree from the backing control's current entries.
    ///
    /// Expansion state is kept per group, an active search is re-applied, and
    /// no notification is raised.
    pub fn refresh(&mut self) {
        if self.destroyed {
            return;
        }
        let _span = tracing::debug_span!("refresh", instance = ?self.id).entered();

        self.tree = build_tree(&self.control.entries(), &self.config, Some(&self.tree));
        if self.filter.is_some() {
            self.filter = Some(filter_tree(
                &mut self.tree,
                &self.search_query,
                self.config.search_strategy,
                self.config.expand_on_search,
            ));
        }
        self.focused_index = None;
        self.control.mirror_selection(&self.tree.selected_values());
        tracing::debug!(nodes = self.tree.len(), "tree refreshed");
    }

    /// Disables the controller, closing the panel first.
    pub fn disable(&mut self) -> bool {
        if self.destroyed || self.disabled {
            return false;
        }
        self.close();
        self.disabled = true;
        self.control.set_disabled(true);
        tracing::debug!(instance = ?self.id, "disabled");
        true
    }

    pub fn enable(&mut self) -> bool {
        if self.destroyed || !self.disabled {
            return false;
        }
        self.disabled = false;
        self.control.set_disabled(false);
        tracing::debug!(instance = ?self.id, "enabled");
        true
    }

    /// Tears the controller down.
    ///
    /// Deregisters first, then cancels pending timers and discards the tree.
    /// Every later call is a no-op. No notification is raised.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.registry.deregister(self.id);
        self.scheduler.cancel_all();
        self.search_timer = None;
        self.close_timer = None;
        self.pending_query = None;
        self.panel = PanelState::Closed;
        self.focused_index = None;
        self.focus_stop = None;
        self.filter = None;
        self.search_query.clear();
        self.tree = OptionTree::default();
        self.actions.clear();
        self.destroyed = true;
        tracing::debug!(instance = ?self.id, "controller destroyed");
    }

    /// Advances the controller's clock, firing due debounce and auto-close
    /// timers.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.destroyed {
            return false;
        }
        let mut changed = false;
        for kind in self.scheduler.advance_to(now_ms) {
            match kind {
                TimerKind::SearchDebounce => {
                    self.search_timer = None;
                    if let Some(query) = self.pending_query.take() {
                        self.apply_search(query);
                        changed = true;
                    }
                }
                TimerKind::AutoClose => {
                    self.close_timer = None;
                    changed |= self.close();
                }
            }
        }
        changed
    }

    /// Current logical time of the controller's clock.
    #[must_use]
    pub const fn now(&self) -> u64 {
        self.scheduler.now()
    }

    // ---- search ------------------------------------------------------------

    /// Handles a change of the search box text.
    ///
    /// With a debounce configured the filter runs when the timer fires, using
    /// only the latest text; otherwise it runs immediately.
    pub fn input_search(&mut self, raw: &str) -> bool {
        if !self.accepts_input() || !self.config.searchable {
            return false;
        }
        let query = search::normalize(raw);
        tracing::trace!(query_len = query.len(), "search input");

        let debounce = self.config.search_debounce_ms;
        if debounce == 0 {
            self.apply_search(query);
            return true;
        }

        if let Some(handle) = self.search_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.pending_query = Some(query);
        self.search_timer = Some(self.scheduler.schedule(TimerKind::SearchDebounce, debounce));
        true
    }

    fn apply_search(&mut self, query: String) {
        let result_count = if query.is_empty() {
            self.filter = None;
            self.tree.leaves().len()
        } else {
            let view = filter_tree(
                &mut self.tree,
                &query,
                self.config.search_strategy,
                self.config.expand_on_search,
            );
            let count = view.result_count(&self.tree);
            self.filter = Some(view);
            count
        };

        self.search_query.clone_from(&query);
        self.focused_index = None;
        tracing::debug!(query_len = query.len(), result_count, "search applied");
        self.emit(&Notification::Search { query, result_count });
    }

    fn clear_search(&mut self) -> bool {
        if let Some(handle) = self.search_timer.take() {
            self.scheduler.cancel(handle);
        }
        let had_pending = self.pending_query.take().is_some();
        if self.search_query.is_empty() {
            return had_pending;
        }
        self.apply_search(String::new());
        true
    }

    fn reset_search(&mut self) {
        if let Some(handle) = self.search_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.pending_query = None;
        self.search_query.clear();
        self.filter = None;
    }

    // ---- keyboard ----------------------------------------------------------

    /// Visible rows in keyboard order.
    #[must_use]
    pub fn visible_nodes(&self) -> Vec<NodeId> {
        let roots = self
            .filter
            .as_ref()
            .map_or_else(|| self.tree.roots().to_vec(), |view| view.roots().to_vec());
        let mut out = Vec::with_capacity(self.tree.len());
        for root in roots {
            self.collect_visible(root, &mut out);
        }
        out
    }

    fn collect_visible(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        let Some(node) = self.tree.node(id) else {
            return;
        };
        if node.is_group() && node.expanded {
            for &child in node.children() {
                if self.filter.as_ref().map_or(true, |view| view.contains(child)) {
                    self.collect_visible(child, out);
                }
            }
        }
    }

    /// Moves focus to the next (or previous) enabled row, wrapping at both
    /// ends. Gives up after one full cycle if every row is disabled.
    pub fn move_focus(&mut self, forward: bool) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let visible = self.visible_nodes();
        let len = visible.len();
        if len == 0 {
            return false;
        }

        let mut index = match self.focused_index.filter(|&i| i < len) {
            Some(i) => i,
            None if forward => len - 1,
            None => 0,
        };
        for _ in 0..len {
            index = if forward { (index + 1) % len } else { (index + len - 1) % len };
            if self.is_enabled(visible[index]) {
                return self.set_focus(index);
            }
        }

        tracing::debug!(rows = len, "no enabled row to focus");
        false
    }

    /// Focuses the first (or last) enabled row.
    pub fn focus_edge(&mut self, first: bool) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let enabled: Vec<usize> = self
            .visible_nodes()
            .into_iter()
            .enumerate()
            .filter(|(_, id)| self.is_enabled(*id))
            .map(|(i, _)| i)
            .collect();
        let target = if first { enabled.first() } else { enabled.last() };
        target.copied().is_some_and(|index| self.set_focus(index))
    }

    fn set_focus(&mut self, index: usize) -> bool {
        self.focus_stop = Some(FocusStop::OptionList);
        if self.focused_index == Some(index) {
            return false;
        }
        self.focused_index = Some(index);
        self.actions.push(Action::ScrollToRow(index));
        true
    }

    /// Activates the focused row as a click would.
    pub fn activate_focused(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.focused_node().is_some_and(|id| self.activate(id))
    }

    /// Expands or collapses the focused row if it is a group. Nested mode only.
    pub fn expand_focused(&mut self, expanded: bool) -> bool {
        if !self.accepts_input() || !self.config.nested {
            return false;
        }
        let Some(id) = self.focused_node() else {
            return false;
        };
        if !self.tree.node(id).is_some_and(|n| n.is_group()) {
            return false;
        }
        self.set_group_expanded(id, expanded)
    }

    /// Panel controls reachable with Tab, in order.
    #[must_use]
    pub fn focus_stops(&self) -> Vec<FocusStop> {
        let mut stops = Vec::with_capacity(4);
        if self.config.searchable {
            stops.push(FocusStop::SearchInput);
        }
        if !self.visible_nodes().is_empty() {
            stops.push(FocusStop::OptionList);
        }
        if let Some(options) = self.config.multi_options() {
            if options.select_all_button {
                stops.push(FocusStop::SelectAllButton);
            }
            if options.clear_button {
                stops.push(FocusStop::ClearButton);
            }
        }
        stops
    }

    /// Moves focus to the next (or previous) panel control, wrapping so focus
    /// never leaves the open panel.
    pub fn cycle_focus(&mut self, forward: bool) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let stops = self.focus_stops();
        if stops.is_empty() {
            return false;
        }
        let len = stops.len();
        let current = self
            .focus_stop
            .and_then(|stop| stops.iter().position(|&s| s == stop));
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        self.focus_stop = Some(stops[next]);
        self.actions.push(Action::MoveFocus(stops[next]));
        true
    }

    // ---- activation --------------------------------------------------------

    fn activate(&mut self, id: NodeId) -> bool {
        let Some(node) = self.tree.node(id) else {
            return false;
        };
        if node.disabled {
            tracing::debug!(value = %node.value, "activation of disabled node ignored");
            return false;
        }

        if node.is_group() {
            let cascade = self.config.multi_options().is_some_and(|o| o.cascade);
            if cascade {
                return self.toggle_multi(id);
            }
            let expanded = node.expanded;
            return self.set_group_expanded(id, !expanded);
        }

        let value = node.value.clone();
        match self.config.single_options().map(|o| (o.allow_deselect, o.close_on_select)) {
            Some((allow_deselect, close_on_select)) => self.select_single(&value, allow_deselect, close_on_select),
            None => self.toggle_multi(id),
        }
    }

    fn select_single(&mut self, value: &str, allow_deselect: bool, close_on_select: bool) -> bool {
        let before = single::current(&self.tree);
        let after = single::select_exclusive(&mut self.tree, value, allow_deselect);
        let changed = before != after;
        if changed {
            tracing::debug!(value = ?after, "single selection changed");
            self.commit_selection();
        }
        if close_on_select && self.panel.is_open() {
            self.schedule_auto_close();
        }
        changed
    }

    fn toggle_multi(&mut self, id: NodeId) -> bool {
        let Some(options) = self.config.multi_options() else {
            return false;
        };
        let (cascade, close_on_select, limit) = (options.cascade, options.close_on_select, options.max_selections);
        if self.tree.node(id).is_none() {
            return false;
        }

        if multi::toggle_selects(&self.tree, id, cascade) {
            if let Some(max) = limit {
                let adding = multi::pending_additions(&self.tree, id, cascade);
                let current = self.tree.selected_leaves().len();
                if adding > 0 && current + adding > max {
                    tracing::debug!(current, adding, max, "selection limit reached");
                    return false;
                }
            }
        }

        let before = self.tree.selected_values();
        multi::toggle(&mut self.tree, id, cascade);
        let changed = self.tree.selected_values() != before;
        if changed {
            tracing::debug!(selected = self.tree.selected_leaves().len(), "multi selection changed");
            self.commit_selection();
            if close_on_select && self.panel.is_open() {
                self.schedule_auto_close();
            }
        }
        changed
    }

    fn schedule_auto_close(&mut self) {
        if let Some(handle) = self.close_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.close_timer = Some(self.scheduler.schedule(TimerKind::AutoClose, AUTO_CLOSE_DELAY_MS));
    }

    fn commit_selection(&self) {
        self.control.mirror_selection(&self.tree.selected_values());
        self.emit_change();
    }

    fn emit_change(&self) {
        self.emit(&Notification::Change {
            value: self.value(),
            options: self.selected_options(),
        });
    }

    fn emit(&self, notification: &Notification) {
        self.control.dispatch(notification);
    }

    // ---- helpers -----------------------------------------------------------

    fn accepts_input(&self) -> bool {
        !self.destroyed && !self.disabled && self.panel.is_open()
    }

    fn focused_node(&self) -> Option<NodeId> {
        let index = self.focused_index?;
        self.visible_nodes().get(index).copied()
    }

    fn is_enabled(&self, id: NodeId) -> bool {
        self.tree.node(id).is_some_and(|n| !n.disabled)
    }

    fn is_leaf(&self, id: NodeId) -> bool {
        self.tree.node(id).is_some_and(|n| n.is_leaf())
    }

    // ---- view --------------------------------------------------------------

    /// Trigger text for the current selection.
    #[must_use]
    pub fn summary(&self) -> TriggerSummary {
        summarize(&self.selected_options(), &self.config)
    }

    /// Computes a renderable view model of the panel and trigger.
    ///
    /// An empty tree shows `no_options_text`; a search without results shows
    /// `no_results_text`.
    #[must_use]
    pub fn compute_viewmodel(&self) -> PanelViewModel {
        let visible = self.visible_nodes();
        let rows: Vec<OptionRow> = visible
            .iter()
            .enumerate()
            .filter_map(|(index, &id)| {
                self.tree.node(id).map(|node| OptionRow {
                    value: node.value.clone(),
                    label: node.label.clone(),
                    level: node.level,
                    is_group: node.is_group(),
                    selected: node.selected,
                    indeterminate: node.indeterminate,
                    expanded: node.expanded,
                    disabled: node.disabled,
                    focused: self.focused_index == Some(index),
                })
            })
            .collect();

        let empty_message = if self.tree.is_empty() {
            Some(self.config.no_options_text.clone())
        } else if rows.is_empty() {
            Some(self.config.no_results_text.clone())
        } else {
            None
        };

        let search_bar = self.config.searchable.then(|| SearchBarInfo {
            query: self
                .pending_query
                .clone()
                .unwrap_or_else(|| self.search_query.clone()),
            placeholder: self.config.search_placeholder.clone(),
        });

        let footer = self
            .config
            .multi_options()
            .filter(|o| o.select_all_button || o.clear_button)
            .map(|o| FooterInfo {
                select_all: o.select_all_button,
                clear: o.clear_button,
            });

        let focused_row = self.focused_index.filter(|&i| i < rows.len());

        PanelViewModel {
            is_open: self.panel.is_open(),
            disabled: self.disabled,
            rows,
            focused_row,
            search_bar,
            empty_message,
            footer,
            summary: self.summary(),
        }
    }
}

/// Parses `entries` and applies initial expansion and selection normalization.
///
/// With `previous`, groups keep the expansion they had there; new groups start
/// at `default_expanded`.
fn build_tree(entries: &[SourceEntry], config: &Config, previous: Option<&OptionTree>) -> OptionTree {
    let mut tree = OptionTree::parse(entries, config.nested);

    let kept: HashMap<String, bool> = previous
        .map(|prev| {
            prev.groups()
                .into_iter()
                .filter_map(|id| prev.node(id).map(|n| (n.value.clone(), n.expanded)))
                .collect()
        })
        .unwrap_or_default();

    for group in tree.groups() {
        let expanded = tree
            .node(group)
            .and_then(|n| kept.get(&n.value).copied())
            .unwrap_or(config.default_expanded);
        tree.set_expanded(group, expanded);
    }

    match config.selection {
        SelectionMode::Single(_) => single::enforce_exclusive(&mut tree),
        SelectionMode::Multi(_) => multi::refresh_all_groups(&mut tree),
    }
    tree
}
