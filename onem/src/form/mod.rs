//! Form screens.
//!
//! A [`Form`] walks the user through a sequence of [`FormItem`]s and posts the
//! collected answers to a callback path once it is complete.
//!
//! ## Architecture
//!
//! - [`item`] - The form item variants and their validation blocks
//! - [`menu`] - Options and selection metadata of `form-menu` items

use std::collections::HashSet;

use serde_json::{Value, json};

use crate::{
    error::{Result, ValidationError},
    render::{Render, optional},
    sanitize::{Method, sanitize_url},
};

/// Form item variants.
pub mod item;

/// `form-menu` options and metadata.
pub mod menu;

pub use item::{Bound, FormItem, FormItemBuilder, FormItemKind, FormItemType, LengthRule, ValueRule};
pub use menu::{FormMenuMeta, FormMenuOption};

/// Completion behaviour of a [`Form`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormMeta {
    /// Show the completion status.
    pub status_show: bool,
    /// Show the completion status in the header rather than the body.
    pub status_in_header: bool,
    /// Ask the user to confirm the answers before submitting.
    pub confirmation_needed: bool,
}

impl Default for FormMeta {
    fn default() -> Self {
        Self {
            status_show: true,
            status_in_header: true,
            confirmation_needed: true,
        }
    }
}

impl Render for FormMeta {
    fn as_data(&self) -> Value {
        json!({
            "completion_status_show": self.status_show,
            "completion_status_in_header": self.status_in_header,
            "confirmation_needed": self.confirmation_needed,
        })
    }
}

/// A form document.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    header: Option<String>,
    footer: Option<String>,
    items: Vec<FormItem>,
    url: String,
    method: Method,
    meta: Option<FormMeta>,
}

/// Builder for a [`Form`].
#[derive(Debug, Clone)]
pub struct FormBuilder {
    header: Option<String>,
    footer: Option<String>,
    items: Vec<FormItem>,
    url: String,
    method: Method,
    meta: Option<FormMeta>,
}

impl Form {
    /// Starts a form asking `items` in order and submitting to `url`.
    pub fn builder(items: Vec<FormItem>, url: impl Into<String>) -> FormBuilder {
        FormBuilder {
            header: None,
            footer: None,
            items,
            url: url.into(),
            method: Method::default(),
            meta: None,
        }
    }

    /// Items in the order they are asked.
    pub fn items(&self) -> &[FormItem] {
        &self.items
    }

    /// Callback path receiving the answers.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Method used to submit the answers.
    pub fn method(&self) -> Method {
        self.method
    }
}

impl FormBuilder {
    /// Default header, replaced by an item's own header.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Default footer, replaced by an item's own footer.
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Method used to submit the answers. Defaults to `GET`.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Completion behaviour.
    pub fn meta(mut self, meta: FormMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Validates and builds the form.
    ///
    /// # Errors
    ///
    /// Fails when there are no items, two items share a name, or the url is
    /// not a relative path.
    pub fn build(self) -> Result<Form> {
        if self.items.is_empty() {
            debug!("rejecting form without items");
            return Err(ValidationError::EmptyCollection("form items"));
        }

        let mut names = HashSet::new();
        if let Some(dup) = self.items.iter().find(|item| !names.insert(item.name())) {
            debug!("rejecting form with duplicate item {:?}", dup.name());
            return Err(ValidationError::DuplicateItemName(dup.name().to_string()));
        }

        sanitize_url(Some(self.url.as_str()))?;

        Ok(Form {
            header: self.header,
            footer: self.footer,
            items: self.items,
            url: self.url,
            method: self.method,
            meta: self.meta,
        })
    }
}

impl Render for Form {
    fn as_data(&self) -> Value {
        json!({
            "type": "form",
            "header": self.header,
            "footer": self.footer,
            "body": self.items.iter().map(Render::as_data).collect::<Vec<_>>(),
            "meta": optional(self.meta.as_ref()),
            "path": self.url,
            "method": self.method,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_item() -> FormItem {
        FormItem::string("full_name").label("Name?").build().unwrap()
    }

    #[test]
    fn test_form_render_shape() {
        let form = Form::builder(vec![name_item()], "/done")
            .header("Signup")
            .method(Method::Post)
            .meta(FormMeta {
                status_show: false,
                confirmation_needed: false,
                ..Default::default()
            })
            .build()
            .unwrap();

        let data = form.as_data();
        assert_eq!(data["type"], "form");
        assert_eq!(data["header"], "Signup");
        assert_eq!(data["footer"], Value::Null);
        assert_eq!(data["path"], "/done");
        assert_eq!(data["method"], "POST");
        assert_eq!(
            data["meta"],
            json!({
                "completion_status_show": false,
                "completion_status_in_header": true,
                "confirmation_needed": false,
            })
        );
        assert_eq!(data["body"][0]["name"], "full_name");
    }

    #[test]
    fn test_form_method_defaults_to_get() {
        let form = Form::builder(vec![name_item()], "/done").build().unwrap();
        assert_eq!(form.method(), Method::Get);
        assert_eq!(form.as_data()["meta"], Value::Null);
    }

    #[test]
    fn test_form_keeps_item_order() {
        let items = vec![
            FormItem::date("b").build().unwrap(),
            FormItem::hidden("a", "x"),
            FormItem::int("c").build().unwrap(),
        ];
        let form = Form::builder(items, "/done").build().unwrap();
        let names: Vec<_> = form.items().iter().map(FormItem::name).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn test_form_requires_items() {
        assert_eq!(
            Form::builder(Vec::new(), "/done").build(),
            Err(ValidationError::EmptyCollection("form items"))
        );
    }

    #[test]
    fn test_form_rejects_foreign_url() {
        assert_eq!(
            Form::builder(vec![name_item()], "http://evil.example/x").build(),
            Err(ValidationError::InvalidUrl("http://evil.example/x".into()))
        );
    }

    #[test]
    fn test_form_rejects_duplicate_names() {
        let items = vec![name_item(), FormItem::hidden("full_name", "again")];
        assert_eq!(
            Form::builder(items, "/done").build(),
            Err(ValidationError::DuplicateItemName("full_name".into()))
        );
    }
}
