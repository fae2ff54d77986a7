//! The response envelope sent to the platform.

use serde_json::{Value, json};

use crate::{form::Form, menu::Menu, render::Render};

/// Document carried by a [`Response`].
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// A menu screen.
    Menu(Menu),
    /// A form screen.
    Form(Form),
}

impl From<Menu> for Content {
    fn from(menu: Menu) -> Self {
        Content::Menu(menu)
    }
}

impl From<Form> for Content {
    fn from(form: Form) -> Self {
        Content::Form(form)
    }
}

impl Render for Content {
    fn as_data(&self) -> Value {
        match self {
            Content::Menu(menu) => menu.as_data(),
            Content::Form(form) => form.as_data(),
        }
    }
}

/// Outermost document: a menu or form paired with a correlation id.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    content: Content,
    corr_id: String,
}

impl Response {
    /// Wraps `content`; `corr_id` lets the platform match the response to the
    /// request that produced it.
    pub fn new(content: impl Into<Content>, corr_id: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            corr_id: corr_id.into(),
        }
    }

    /// Wrapped document.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Correlation id.
    pub fn corr_id(&self) -> &str {
        &self.corr_id
    }
}

impl Render for Response {
    fn as_data(&self) -> Value {
        let content = self.content.as_data();
        trace!("rendering {} response {}", content["type"], self.corr_id);
        json!({
            "corr_id": self.corr_id,
            "content_type": content["type"],
            "content": content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FormItem, Item};

    #[test]
    fn test_menu_response() {
        let menu = Menu::builder(vec![Item::option("A").url("/a").build().unwrap()])
            .build()
            .unwrap();
        let response = Response::new(menu.clone(), "3f1c");

        assert_eq!(
            response.as_data(),
            json!({
                "corr_id": "3f1c",
                "content_type": "menu",
                "content": menu.as_data(),
            })
        );
    }

    #[test]
    fn test_form_response_json_round_trip() {
        let form = Form::builder(vec![FormItem::hidden("token", "abc")], "/submit")
            .build()
            .unwrap();
        let response = Response::new(form, "corr-1");

        let text = response.as_json();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, response.as_data());
        assert_eq!(parsed["content_type"], "form");
        assert!(text.starts_with(r#"{"corr_id":"corr-1","content_type":"form","content":{"type":"form""#));
    }
}
