//! Options and selection metadata of a `form-menu` item.

use serde_json::{Value, json};

use crate::{
    error::{Result, ValidationError},
    render::Render,
};

/// One entry of a `form-menu` item.
///
/// Unlike a menu [`Item`](crate::Item) it carries a value that is submitted
/// with the form instead of a callback. The value is opaque JSON and is sent
/// back as given.
#[derive(Debug, Clone, PartialEq)]
pub struct FormMenuOption {
    label: String,
    value: Option<Value>,
    text_search: Option<String>,
    is_option: bool,
}

impl FormMenuOption {
    /// Builds an option, checking that a selectable entry has a label and a
    /// value.
    ///
    /// # Errors
    ///
    /// Fails with [`ValidationError::EmptyLabel`] or
    /// [`ValidationError::MissingOptionValue`].
    pub fn new(
        label: impl Into<String>,
        value: Option<Value>,
        text_search: Option<String>,
        is_option: bool,
    ) -> Result<Self> {
        let label = label.into();
        if !is_option {
            return Ok(Self {
                label,
                value,
                text_search: None,
                is_option,
            });
        }
        if label.is_empty() {
            debug!("rejecting form menu option without label");
            return Err(ValidationError::EmptyLabel);
        }
        if value.as_ref().is_none_or(Value::is_null) {
            debug!("rejecting form menu option {label:?} without value");
            return Err(ValidationError::MissingOptionValue(label));
        }
        Ok(Self {
            label,
            value,
            text_search,
            is_option,
        })
    }

    /// Selectable entry submitting `value`.
    ///
    /// # Errors
    ///
    /// Fails when `label` is empty or `value` is null.
    pub fn option(label: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        Self::new(label, Some(value.into()), None, true)
    }

    /// Presentational entry without a value.
    pub fn content(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
            text_search: None,
            is_option: false,
        }
    }

    /// Attaches search text. Ignored on presentational entries.
    pub fn with_text_search(mut self, text: impl Into<String>) -> Self {
        if self.is_option {
            self.text_search = Some(text.into());
        }
        self
    }

    /// Value submitted when this entry is chosen.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

impl Render for FormMenuOption {
    fn as_data(&self) -> Value {
        json!({
            "description": self.label,
            "type": if self.is_option { "option" } else { "content" },
            "text_search": self.text_search,
            "value": self.value,
        })
    }
}

/// Selection behaviour of a `form-menu` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormMenuMeta {
    /// Select the option automatically when it is the only one.
    pub auto_select: bool,
    /// Allow several options to be chosen.
    pub multi_select: bool,
    /// Mark options with numbers instead of letters.
    pub numbered: bool,
}

impl Render for FormMenuMeta {
    fn as_data(&self) -> Value {
        json!({
            "auto_select": self.auto_select,
            "multi_select": self.multi_select,
            "numbered": self.numbered,
        })
    }
}
