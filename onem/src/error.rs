//! Error types and result definitions for building screens.

use thiserror::Error;

use crate::form::FormItemType;

/// Raised when a screen object is constructed from invalid input.
///
/// Every check happens at construction time. Once a value has been built,
/// rendering it cannot fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A selectable entry was given an empty label.
    #[error("option label must not be empty")]
    EmptyLabel,

    /// A collection that must hold at least one entry was empty.
    #[error("{0} must contain at least one entry")]
    EmptyCollection(&'static str),

    /// A callback target was not a relative platform path.
    #[error("invalid callback url {0:?}: expected a path starting with '/'")]
    InvalidUrl(String),

    /// An HTTP method outside of `GET`/`POST`.
    #[error("invalid method {0:?}: allowed GET, POST")]
    InvalidMethod(String),

    /// A kind tag that does not name a known form item kind.
    #[error("invalid form item type {found:?}: allowed {allowed}")]
    UnknownItemType {
        /// The rejected tag.
        found: String,
        /// Comma separated list of accepted tags.
        allowed: String,
    },

    /// A content type other than `menu` or `form`.
    #[error("invalid content type {0:?}: allowed menu, form")]
    UnknownContentType(String),

    /// A selectable form-menu option without a value.
    #[error("form menu option {0:?} is selectable but has no value")]
    MissingOptionValue(String),

    /// A kind-specific setting used on an item of another kind.
    #[error("{setting} does not apply to {kind} items")]
    SettingNotApplicable {
        /// Name of the misplaced setting.
        setting: &'static str,
        /// Kind of the item it was applied to.
        kind: FormItemType,
    },

    /// A non-integral bound on an `int` item.
    #[error("{setting} of an int item must be a whole number, got {value}")]
    FractionalBound {
        /// Which bound was rejected.
        setting: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A bound that is not finite or does not fit the item's number type.
    #[error("{setting} {value} is out of range")]
    BoundOutOfRange {
        /// Which bound was rejected.
        setting: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A hidden item given anything besides its name and value.
    #[error("hidden item {name:?} takes only a name and a value, got {setting}")]
    HiddenItemSetting {
        /// Name of the hidden item.
        name: String,
        /// The rejected setting.
        setting: &'static str,
    },

    /// A hidden item described without a value.
    #[error("hidden item {0:?} has no value")]
    MissingHiddenValue(String),

    /// Two items of one form share a name.
    #[error("duplicate form item name {0:?}")]
    DuplicateItemName(String),
}

/// Result type for screen construction.
pub type Result<T> = std::result::Result<T, ValidationError>;
