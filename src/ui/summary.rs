//! Trigger summary text.
//!
//! The trigger shows what is selected. Single-select shows the label;
//! multi-select summarizes by [`DisplayMode`]. Every mode falls back to the
//! placeholder when nothing is selected, except a caller-supplied formatter,
//! which is always invoked. Counts are over leaves only since the selection
//! never contains groups.

use crate::domain::OptionData;
use crate::{Config, DisplayMode, SelectionMode};

/// A removable chip in tags mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChip {
    pub value: String,
    pub label: String,
    /// Disabled options stay selected and cannot be removed from a chip.
    pub removable: bool,
}

/// What the trigger displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriggerSummary {
    pub text: String,
    /// `text` is the placeholder, not a selection.
    pub is_placeholder: bool,
    /// Chips in tags mode, empty otherwise.
    pub tags: Vec<TagChip>,
    /// Selected items not shown individually.
    pub overflow: usize,
}

impl TriggerSummary {
    fn placeholder(config: &Config) -> Self {
        Self {
            text: config.placeholder.clone(),
            is_placeholder: true,
            ..Self::default()
        }
    }

    fn text(text: String) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }
}

/// Builds the trigger summary for `selected`, given in flatten order.
///
/// ```
/// use selectree::Config;
/// use selectree::domain::OptionData;
/// use selectree::ui::summary::summarize;
///
/// let option = |v: &str| OptionData { value: v.into(), label: v.to_uppercase(), disabled: false, group: None };
/// let picked = vec![option("a"), option("b"), option("c"), option("d")];
///
/// assert_eq!(summarize(&picked, &Config::multi()).text, "A, B, C +1 more");
/// assert_eq!(summarize(&[], &Config::multi()).text, "Select...");
/// ```
#[must_use]
pub fn summarize(selected: &[OptionData], config: &Config) -> TriggerSummary {
    if let Some(format) = &config.selected_format {
        return TriggerSummary::text(format(selected));
    }
    if selected.is_empty() {
        return TriggerSummary::placeholder(config);
    }

    let options = match &config.selection {
        SelectionMode::Single(_) => {
            return TriggerSummary::text(selected[0].label.clone());
        }
        SelectionMode::Multi(options) => options,
    };

    match options.display_mode {
        DisplayMode::Count => TriggerSummary::text(
            config.count_text.replace("{count}", &selected.len().to_string()),
        ),
        DisplayMode::List => {
            let (shown, overflow) = split(selected, options.max_selected_display);
            let labels: Vec<&str> = shown.iter().map(|o| o.label.as_str()).collect();
            TriggerSummary {
                text: with_overflow(labels.join(", "), overflow),
                overflow,
                ..TriggerSummary::default()
            }
        }
        DisplayMode::Tags => {
            let (shown, overflow) = split(selected, options.max_tags);
            let tags: Vec<TagChip> = shown
                .iter()
                .map(|o| TagChip {
                    value: o.value.clone(),
                    label: o.label.clone(),
                    removable: !o.disabled,
                })
                .collect();
            let labels: Vec<&str> = tags.iter().map(|t| t.label.as_str()).collect();
            TriggerSummary {
                text: with_overflow(labels.join(", "), overflow),
                is_placeholder: false,
                tags,
                overflow,
            }
        }
    }
}

/// `limit == 0` shows everything.
fn split(selected: &[OptionData], limit: usize) -> (&[OptionData], usize) {
    if limit == 0 || selected.len() <= limit {
        (selected, 0)
    } else {
        (&selected[..limit], selected.len() - limit)
    }
}

fn with_overflow(text: String, overflow: usize) -> String {
    if overflow == 0 {
        text
    } else {
        format!("{text} +{overflow} more")
    }
}
