//! Menu screens.
//!
//! A [`Menu`] is an ordered list of [`Item`]s shown to the user, optionally
//! framed by a header and footer. Items are either selectable options that
//! trigger a callback, or content entries used purely for presentation.
//!
//! ```rust
//! use onem::{Item, Menu, MenuMeta, Method, Render};
//!
//! let menu = Menu::builder(vec![
//!     Item::option("Balance").url("/balance").build()?,
//!     Item::content("-----"),
//!     Item::option("Top up").url("/top-up").method(Method::Post).build()?,
//! ])
//! .header("Account")
//! .meta(MenuMeta::default())
//! .build()?;
//!
//! assert_eq!(menu.as_data()["body"].as_array().map(Vec::len), Some(3));
//! # Ok::<(), onem::ValidationError>(())
//! ```

use serde_json::{Value, json};

use crate::{
    error::{Result, ValidationError},
    render::{Render, optional},
    sanitize::{Method, callback},
};

/// Single entry of a [`Menu`].
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    label: String,
    is_option: bool,
    url: Option<String>,
    method: Option<Method>,
    text_search: Option<String>,
}

/// Builder for an [`Item`].
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    label: String,
    is_option: bool,
    url: Option<String>,
    method: Option<Method>,
    text_search: Option<String>,
}

impl Item {
    /// Starts a selectable option labelled `label`.
    pub fn option(label: impl Into<String>) -> ItemBuilder {
        ItemBuilder {
            label: label.into(),
            is_option: true,
            url: None,
            method: None,
            text_search: None,
        }
    }

    /// Creates a presentational entry. It never carries a callback.
    pub fn content(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            is_option: false,
            url: None,
            method: None,
            text_search: None,
        }
    }

    /// Text shown for this entry.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the entry can be selected.
    pub fn is_option(&self) -> bool {
        self.is_option
    }

    /// Callback path, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Callback method; present exactly when [`Item::url`] is.
    pub fn method(&self) -> Option<Method> {
        self.method
    }
}

impl ItemBuilder {
    /// Callback path triggered when the option is chosen.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// How the callback is triggered. Defaults to `GET` when a url is set.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Extra text the platform matches when the user narrows the list down.
    pub fn text_search(mut self, text: impl Into<String>) -> Self {
        self.text_search = Some(text.into());
        self
    }

    /// Marks the entry selectable or presentational.
    ///
    /// A presentational entry drops any url, method and search text.
    pub fn is_option(mut self, is_option: bool) -> Self {
        self.is_option = is_option;
        self
    }

    /// Validates and builds the item.
    ///
    /// # Errors
    ///
    /// Fails when a selectable item has an empty label or its url is not a
    /// relative path.
    pub fn build(self) -> Result<Item> {
        if !self.is_option {
            return Ok(Item::content(self.label));
        }
        if self.label.is_empty() {
            debug!("rejecting menu option without label");
            return Err(ValidationError::EmptyLabel);
        }
        let (url, method) = callback(self.url.as_deref(), self.method)?;
        Ok(Item {
            label: self.label,
            is_option: true,
            url,
            method,
            text_search: self.text_search,
        })
    }
}

impl Render for Item {
    fn as_data(&self) -> Value {
        json!({
            "description": self.label,
            "method": self.method,
            "path": self.url,
            "type": if self.is_option { "option" } else { "content" },
            "text_search": self.text_search,
        })
    }
}

/// Selection behaviour of a [`Menu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuMeta {
    /// Select the option automatically when it is the only one.
    pub auto_select: bool,
}

impl Default for MenuMeta {
    fn default() -> Self {
        Self { auto_select: true }
    }
}

impl Render for MenuMeta {
    fn as_data(&self) -> Value {
        json!({ "auto_select": self.auto_select })
    }
}

/// A menu document.
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    header: Option<String>,
    footer: Option<String>,
    body: Vec<Item>,
    meta: Option<MenuMeta>,
}

/// Builder for a [`Menu`].
#[derive(Debug, Clone)]
pub struct MenuBuilder {
    header: Option<String>,
    footer: Option<String>,
    body: Vec<Item>,
    meta: Option<MenuMeta>,
}

impl Menu {
    /// Starts a menu showing `body` in the given order.
    pub fn builder(body: Vec<Item>) -> MenuBuilder {
        MenuBuilder {
            header: None,
            footer: None,
            body,
            meta: None,
        }
    }

    /// Entries in display order.
    pub fn body(&self) -> &[Item] {
        &self.body
    }
}

impl MenuBuilder {
    /// Text displayed above the entries.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Text displayed below the entries.
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Selection behaviour.
    pub fn meta(mut self, meta: MenuMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Validates and builds the menu.
    ///
    /// # Errors
    ///
    /// Fails when the body is empty.
    pub fn build(self) -> Result<Menu> {
        if self.body.is_empty() {
            debug!("rejecting menu without entries");
            return Err(ValidationError::EmptyCollection("menu body"));
        }
        Ok(Menu {
            header: self.header,
            footer: self.footer,
            body: self.body,
            meta: self.meta,
        })
    }
}

impl Render for Menu {
    fn as_data(&self) -> Value {
        json!({
            "type": "menu",
            "header": self.header,
            "footer": self.footer,
            "body": self.body.iter().map(Render::as_data).collect::<Vec<_>>(),
            "meta": optional(self.meta.as_ref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_option() {
        let item = Item::option("Some option label")
            .url("/callback-path")
            .method(Method::Get)
            .text_search("narrow down the options")
            .build()
            .unwrap();

        let expected = json!({
            "description": "Some option label",
            "method": "GET",
            "path": "/callback-path",
            "type": "option",
            "text_search": "narrow down the options",
        });
        assert_eq!(item.as_data(), expected);
    }

    #[test]
    fn test_option_scenario() {
        let item = Item::option("Option A")
            .url("/go")
            .method("GET".parse().unwrap())
            .build()
            .unwrap();

        assert_eq!(
            item.as_data(),
            json!({
                "description": "Option A",
                "method": "GET",
                "path": "/go",
                "type": "option",
                "text_search": null,
            })
        );
    }

    #[test]
    fn test_menu_item_content() {
        let item = Item::content("Get creative with content items");

        let expected = json!({
            "description": "Get creative with content items",
            "method": null,
            "path": null,
            "type": "content",
            "text_search": null,
        });
        assert_eq!(item.as_data(), expected);
    }

    #[test]
    fn test_separator_ignores_callback() {
        let item = Item::option("Separator")
            .url("/ignored")
            .method(Method::Post)
            .text_search("ignored")
            .is_option(false)
            .build()
            .unwrap();

        let data = item.as_data();
        assert_eq!(data["type"], "content");
        assert_eq!(data["method"], Value::Null);
        assert_eq!(data["path"], Value::Null);
        assert_eq!(data["text_search"], Value::Null);
    }

    #[test]
    fn test_empty_separator_label_allowed() {
        assert!(Item::option("").is_option(false).build().is_ok());
    }

    #[test]
    fn test_option_without_url_has_no_method() {
        let item = Item::option("Plain").method(Method::Post).build().unwrap();
        assert_eq!(item.method(), None);
        assert_eq!(item.as_data()["method"], Value::Null);
    }

    #[test]
    fn test_option_empty_label_fails() {
        assert_eq!(
            Item::option("").url("/x").build(),
            Err(ValidationError::EmptyLabel)
        );
    }

    #[test]
    fn test_option_foreign_url_fails() {
        assert!(matches!(
            Item::option("Bad").url("http://evil.example/x").build(),
            Err(ValidationError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_menu() {
        let item1 = Item::option("First menu item").url("/callback-1").build().unwrap();
        let item2 = Item::option("Second menu item").url("/callback-2").build().unwrap();
        let item3 = Item::content("Some content here");

        let menu = Menu::builder(vec![item1, item2, item3])
            .header("menu header")
            .footer("menu footer")
            .meta(MenuMeta::default())
            .build()
            .unwrap();

        let expected = json!({
            "type": "menu",
            "header": "menu header",
            "footer": "menu footer",
            "body": [
                {"description": "First menu item", "method": "GET",
                 "path": "/callback-1", "type": "option", "text_search": null},
                {"description": "Second menu item", "method": "GET",
                 "path": "/callback-2", "type": "option", "text_search": null},
                {"description": "Some content here", "method": null,
                 "path": null, "type": "content", "text_search": null},
            ],
            "meta": {"auto_select": true},
        });
        assert_eq!(menu.as_data(), expected);
    }

    #[test]
    fn test_menu_without_meta() {
        let menu = Menu::builder(vec![Item::content("only")]).build().unwrap();
        let data = menu.as_data();
        assert_eq!(data["meta"], Value::Null);
        assert_eq!(data["header"], Value::Null);
        assert_eq!(data["footer"], Value::Null);
    }

    #[test]
    fn test_menu_empty_body_fails() {
        assert_eq!(
            Menu::builder(Vec::new()).build(),
            Err(ValidationError::EmptyCollection("menu body"))
        );
    }

    #[test]
    fn test_menu_render_is_idempotent() {
        let menu = Menu::builder(vec![Item::option("A").url("/a").build().unwrap()])
            .build()
            .unwrap();
        assert_eq!(menu.as_data(), menu.as_data());
        assert_eq!(menu.as_json(), menu.as_json());
    }
}
