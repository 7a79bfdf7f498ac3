//! Selector-based lookup of backing controls.
//!
//! Supports the small selector grammar the batch constructor needs: `#id`,
//! `.class`, the `select` tag, and `*`.

use std::rc::Rc;

use super::backing::{BackingControl, ControlKind, NativeSelect};
use crate::domain::{Result, SelectreeError};

/// A parsed selector criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Tag(String),
    All,
}

impl Selector {
    /// Parses a selector string.
    ///
    /// # Errors
    ///
    /// Returns [`SelectreeError::InvalidSelector`] for empty input, a bare `#`
    /// or `.`, or anything containing whitespace or combinators.
    ///
    /// ```
    /// use selectree::infrastructure::Selector;
    ///
    /// assert_eq!(Selector::parse("#country")?, Selector::Id("country".into()));
    /// assert!(Selector::parse("div > select").is_err());
    /// # Ok::<(), selectree::SelectreeError>(())
    /// ```
    pub fn parse(selector: &str) -> Result<Self> {
        let selector = selector.trim();
        let invalid = || SelectreeError::InvalidSelector(selector.to_string());

        if selector.is_empty() || selector.contains(char::is_whitespace) {
            return Err(invalid());
        }

        let parsed = if selector == "*" {
            Self::All
        } else if let Some(id) = selector.strip_prefix('#') {
            Self::Id(id.to_string())
        } else if let Some(class) = selector.strip_prefix('.') {
            Self::Class(class.to_string())
        } else {
            Self::Tag(selector.to_lowercase())
        };

        match &parsed {
            Self::Id(name) | Self::Class(name) | Self::Tag(name)
                if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') =>
            {
                Err(invalid())
            }
            _ => Ok(parsed),
        }
    }

    fn matches(&self, control: &NativeSelect) -> bool {
        match self {
            Self::All => true,
            Self::Id(id) => &control.id() == id,
            Self::Class(class) => control.classes().iter().any(|c| c == class),
            Self::Tag(tag) => control.kind().to_string() == *tag,
        }
    }
}

/// Collection of backing controls in document order.
#[derive(Debug, Default)]
pub struct Document {
    controls: Vec<Rc<NativeSelect>>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a control and returns the shared handle host code keeps for
    /// listeners.
    pub fn add(&mut self, control: NativeSelect) -> Rc<NativeSelect> {
        let control = Rc::new(control);
        self.controls.push(Rc::clone(&control));
        control
    }

    /// Controls matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`SelectreeError::InvalidSelector`] if the selector cannot be parsed.
    pub fn query(&self, selector: &str) -> Result<Vec<Rc<NativeSelect>>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .controls
            .iter()
            .filter(|c| selector.matches(c))
            .cloned()
            .collect())
    }

    /// Every control that is a select, regardless of multiplicity.
    #[must_use]
    pub fn selects(&self) -> Vec<Rc<NativeSelect>> {
        self.controls
            .iter()
            .filter(|c| c.kind() == ControlKind::Select)
            .cloned()
            .collect()
    }
}
