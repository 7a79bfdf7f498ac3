//! Notifications raised on the backing control.
//!
//! Each notification is a discrete named signal with a structured payload.
//! External code subscribes on the backing control, never on the controller.

use serde::{Deserialize, Serialize};

use super::option::OptionData;

/// Selection value of a controller: a scalar for single-select, a list of
/// leaf values for multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionValue {
    Single(Option<String>),
    Multi(Vec<String>),
}

impl SelectionValue {
    /// Selected values as a list, empty when nothing is selected.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        match self {
            Self::Single(value) => value.iter().cloned().collect(),
            Self::Multi(values) => values.clone(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.is_none(),
            Self::Multi(values) => values.is_empty(),
        }
    }
}

/// Name of a notification, used to subscribe listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Change,
    Open,
    Close,
    Search,
    Clear,
    Expand,
    Collapse,
}

impl NotificationKind {
    /// Event name as seen by listeners.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::Open => "open",
            Self::Close => "close",
            Self::Search => "search",
            Self::Clear => "clear",
            Self::Expand => "expand",
            Self::Collapse => "collapse",
        }
    }
}

/// A signal raised on the backing control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    Change {
        value: SelectionValue,
        options: Vec<OptionData>,
    },
    Open,
    Close,
    Search {
        query: String,
        result_count: usize,
    },
    Clear {
        previous: SelectionValue,
    },
    Expand {
        group: String,
    },
    Collapse {
        group: String,
    },
}

impl Notification {
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        match self {
            Self::Change { .. } => NotificationKind::Change,
            Self::Open => NotificationKind::Open,
            Self::Close => NotificationKind::Close,
            Self::Search { .. } => NotificationKind::Search,
            Self::Clear { .. } => NotificationKind::Clear,
            Self::Expand { .. } => NotificationKind::Expand,
            Self::Collapse { .. } => NotificationKind::Collapse,
        }
    }

    /// Renders the payload as a JSON object tagged with the event name.
    ///
    /// ```
    /// use selectree::domain::Notification;
    ///
    /// let json = Notification::Search { query: "an".into(), result_count: 1 }.to_json();
    /// assert_eq!(json, r#"{"event":"search","query":"an","result_count":1}"#);
    /// ```
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "failed to serialize notification");
            format!(r#"{{"event":"{}"}}"#, self.kind().name())
        })
    }
}
