//! Rendering interface definitions.
//!
//! Defines the projection every screen object implements to become part of
//! the platform JSON document.

use serde_json::Value;

/// Projection of a constructed object into its wire representation.
///
/// Implementations are pure: they read already validated state and never
/// fail, so calling them repeatedly yields identical output.
pub trait Render {
    /// Returns the nested mapping for this object.
    fn as_data(&self) -> Value;

    /// Returns [`Render::as_data`] encoded as compact JSON text.
    fn as_json(&self) -> String {
        self.as_data().to_string()
    }
}

/// Renders an optional component, yielding `null` when absent.
pub(crate) fn optional<R: Render>(value: Option<&R>) -> Value {
    value.map(Render::as_data).unwrap_or(Value::Null)
}
