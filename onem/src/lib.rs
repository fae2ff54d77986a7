//! # onem
//!
//! Typed menu and form screens for the ONEm messaging platform, rendered to
//! the JSON document the platform accepts.
//!
//! Screens are built bottom-up from validated value objects. Every check
//! happens when a value is built; rendering a built value never fails.
//!
//! ## Quick Start
//!
//! ```rust
//! use onem::{Form, FormItem, FormMeta, Method, Render, Response};
//!
//! let form = Form::builder(
//!     vec![
//!         FormItem::string("full_name")
//!             .label("Please send your full name")
//!             .min_length(5)
//!             .build()?,
//!         FormItem::int("age").label("How old are you?").min_value(12).build()?,
//!     ],
//!     "/signup",
//! )
//! .method(Method::Post)
//! .meta(FormMeta { confirmation_needed: false, ..Default::default() })
//! .build()?;
//!
//! let json = Response::new(form, "9c1f0e32").as_json();
//! assert!(json.starts_with(r#"{"corr_id":"9c1f0e32","content_type":"form""#));
//! # Ok::<(), onem::ValidationError>(())
//! ```
//!
//! ## Modules
//!
//! - [`menu`] - Menu screens and their entries
//! - [`form`] - Form screens and the form item variants
//! - [`response`] - The envelope wrapping a screen
//! - [`sanitize`] - Callback url and method checks
//! - [`descriptor`] - Loading screens from TOML/JSON descriptor files
//! - [`error`] - Error types and result definitions

#[macro_use]
extern crate log;

/// Declarative screen descriptors.
pub mod descriptor;

/// Error types and result definitions for building screens.
pub mod error;

/// Form screens and form items.
pub mod form;

/// Menu screens.
pub mod menu;

/// Rendering to the platform document.
pub mod render;

/// The response envelope.
pub mod response;

/// Callback url and method checks.
pub mod sanitize;

pub use error::{Result, ValidationError};
pub use form::{
    Bound, Form, FormBuilder, FormItem, FormItemBuilder, FormItemKind, FormItemType, FormMenuMeta,
    FormMenuOption, FormMeta, LengthRule, ValueRule,
};
pub use menu::{Item, ItemBuilder, Menu, MenuBuilder, MenuMeta};
pub use render::Render;
pub use response::{Content, Response};
pub use sanitize::{Method, sanitize_method, sanitize_url};
pub use serde_json::Value;
