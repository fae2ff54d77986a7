//! Declarative screen descriptors.
//!
//! A descriptor is a TOML or JSON file describing a menu or a form. Loading
//! one goes through the same builders as hand-written code, so every
//! [`ValidationError`] rule applies.
//!
//! ```toml
//! corr_id = "7d2c"
//!
//! [content]
//! type = "form"
//! url = "/signup"
//! method = "post"
//!
//! [[content.items]]
//! type = "string"
//! name = "full_name"
//! label = "Please send your full name"
//! min_length = 5
//! ```

use std::{fs, path::Path};

use anyhow::{Context, bail};
use serde_json::Value;

use crate::{error::ValidationError, response::Content};

/// Serde shapes of descriptor files.
pub mod types;

pub use types::{
    ContentDescriptor, FormDescriptor, FormItemDescriptor, FormMenuMetaDescriptor,
    FormMenuOptionDescriptor, FormMetaDescriptor, ItemDescriptor, MenuDescriptor,
    MenuMetaDescriptor, ResponseDescriptor,
};

const CONTENT_TYPES: [&str; 2] = ["menu", "form"];

/// Loads a descriptor file, picking the format from its extension.
///
/// # Errors
///
/// Fails when the file cannot be read, has an unsupported extension, or does
/// not describe a valid screen.
pub fn load(path: impl AsRef<Path>) -> anyhow::Result<ResponseDescriptor> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    parse(&content, ext).with_context(|| format!("Invalid descriptor {}", path.display()))
}

/// Parses descriptor text in the format named by `ext` (`json`, `toml`).
///
/// # Errors
///
/// Fails on unsupported formats, syntax errors or unknown fields.
pub fn parse(content: &str, ext: &str) -> anyhow::Result<ResponseDescriptor> {
    let value: Value = match ext {
        "json" => serde_json::from_str(content)?,
        "toml" | "tml" => {
            let v: toml::Value = toml::from_str(content)?;
            serde_json::to_value(v)?
        }
        _ => {
            bail!("Unsupported descriptor file extension: {ext:?}");
        }
    };
    from_value(value)
}

/// Interprets an already parsed descriptor document.
///
/// # Errors
///
/// Fails with [`ValidationError::UnknownContentType`] for content types other
/// than `menu` and `form`, or when the document does not match the
/// descriptor shape.
pub fn from_value(value: Value) -> anyhow::Result<ResponseDescriptor> {
    if let Some(ty) = value.pointer("/content/type") {
        let known = ty.as_str().is_some_and(|t| CONTENT_TYPES.contains(&t));
        if !known {
            debug!("rejecting content type {ty}");
            let found = ty.as_str().map(str::to_string).unwrap_or_else(|| ty.to_string());
            return Err(ValidationError::UnknownContentType(found).into());
        }
    }
    Ok(serde_json::from_value(value)?)
}

impl ResponseDescriptor {
    /// Builds the validated screen.
    ///
    /// # Errors
    ///
    /// Fails with the first [`ValidationError`] met while building.
    pub fn into_content(self) -> crate::Result<Content> {
        Content::try_from(self.content)
    }
}

/// JSON Schema of the descriptor format.
///
/// # Errors
///
/// Fails only if the generated schema cannot be serialized.
pub fn schema() -> anyhow::Result<Value> {
    let schema = schemars::schema_for!(ResponseDescriptor);
    Ok(serde_json::to_value(&schema)?)
}
