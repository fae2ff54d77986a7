//! Serde shapes of screen descriptor files and their conversion into the
//! validated object model.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Number, Value};

use crate::{
    error::{Result, ValidationError},
    form::{Bound, Form, FormItem, FormItemType, FormMenuMeta, FormMenuOption, FormMeta},
    menu::{Item, Menu, MenuMeta},
    response::Content,
    sanitize::sanitize_method,
};

/// Kind tag selecting a hidden item in descriptors.
const HIDDEN: &str = "hidden";

fn default_true() -> bool {
    true
}

/// Root of a descriptor file.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ResponseDescriptor {
    /// Correlation id; callers may supply their own instead.
    #[serde(default)]
    pub corr_id: Option<String>,
    /// The screen to render.
    pub content: ContentDescriptor,
}

/// Screen described by a descriptor.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentDescriptor {
    /// A menu screen.
    Menu(MenuDescriptor),
    /// A form screen.
    Form(FormDescriptor),
}

/// Menu screen.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MenuDescriptor {
    /// Text above the entries.
    pub header: Option<String>,
    /// Text below the entries.
    pub footer: Option<String>,
    /// Entries in display order.
    pub body: Vec<ItemDescriptor>,
    /// Selection behaviour.
    pub meta: Option<MenuMetaDescriptor>,
}

/// Menu entry.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ItemDescriptor {
    /// Text shown for the entry.
    pub label: String,
    /// `false` for presentational entries.
    #[serde(default = "default_true")]
    pub is_option: bool,
    /// Callback path.
    pub url: Option<String>,
    /// Callback method, `GET` or `POST`.
    pub method: Option<String>,
    /// Search text.
    pub text_search: Option<String>,
}

/// Menu selection behaviour.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MenuMetaDescriptor {
    /// Defaults to `true`.
    pub auto_select: Option<bool>,
}

/// Form screen.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FormDescriptor {
    /// Default header.
    pub header: Option<String>,
    /// Default footer.
    pub footer: Option<String>,
    /// Items in the order they are asked.
    pub items: Vec<FormItemDescriptor>,
    /// Callback path receiving the answers.
    pub url: String,
    /// Submission method, `GET` (default) or `POST`.
    pub method: Option<String>,
    /// Completion behaviour.
    pub meta: Option<FormMetaDescriptor>,
}

/// Form completion behaviour. Every flag defaults to `true`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FormMetaDescriptor {
    /// Show the completion status.
    pub status_show: Option<bool>,
    /// Show the status in the header.
    pub status_in_header: Option<bool>,
    /// Ask for confirmation before submitting.
    pub confirmation_needed: Option<bool>,
}

/// Form item of any kind.
///
/// Settings belonging to another kind are rejected during conversion.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FormItemDescriptor {
    /// `string`, `int`, `float`, `date`, `datetime`, `hidden` or `form-menu`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Answer key, unique within the form.
    pub name: String,
    pub label: Option<String>,
    pub header: Option<String>,
    pub footer: Option<String>,
    pub chunking_footer: Option<String>,
    pub confirmation_label: Option<String>,
    pub editable: Option<bool>,
    pub required: Option<bool>,
    pub status_exclude: Option<bool>,
    pub status_prepend: Option<bool>,
    pub url: Option<String>,
    pub method: Option<String>,
    pub validate_url: Option<String>,
    pub validate_type_error: Option<String>,
    pub validate_type_error_footer: Option<String>,
    /// `string` only.
    pub min_length: Option<u32>,
    pub min_length_error: Option<String>,
    pub max_length: Option<u32>,
    pub max_length_error: Option<String>,
    /// `int` and `float` only.
    pub min_value: Option<Number>,
    pub min_value_error: Option<String>,
    pub max_value: Option<Number>,
    pub max_value_error: Option<String>,
    /// `hidden` only.
    pub value: Option<String>,
    /// `form-menu` only.
    pub body: Option<Vec<FormMenuOptionDescriptor>>,
    /// `form-menu` only.
    pub meta: Option<FormMenuMetaDescriptor>,
}

/// Option of a `form-menu` item.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FormMenuOptionDescriptor {
    pub label: String,
    /// Required on selectable options. Any JSON value, sent back as given.
    pub value: Option<Value>,
    pub text_search: Option<String>,
    #[serde(default = "default_true")]
    pub is_option: bool,
}

/// `form-menu` selection behaviour. Every flag defaults to `false`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FormMenuMetaDescriptor {
    #[serde(default)]
    pub auto_select: bool,
    #[serde(default)]
    pub multi_select: bool,
    #[serde(default)]
    pub numbered: bool,
}

impl TryFrom<ContentDescriptor> for Content {
    type Error = ValidationError;

    fn try_from(desc: ContentDescriptor) -> Result<Self> {
        match desc {
            ContentDescriptor::Menu(menu) => Menu::try_from(menu).map(Content::Menu),
            ContentDescriptor::Form(form) => Form::try_from(form).map(Content::Form),
        }
    }
}

impl TryFrom<ItemDescriptor> for Item {
    type Error = ValidationError;

    fn try_from(desc: ItemDescriptor) -> Result<Self> {
        let mut builder = Item::option(desc.label).is_option(desc.is_option);
        // Content entries and entries without a url carry no callback, so
        // their method is dropped unchecked.
        if let (Some(url), true) = (desc.url, desc.is_option) {
            builder = builder.url(url);
            if let Some(method) = sanitize_method(desc.method.as_deref())? {
                builder = builder.method(method);
            }
        }
        if let Some(text) = desc.text_search {
            builder = builder.text_search(text);
        }
        builder.build()
    }
}

impl TryFrom<MenuDescriptor> for Menu {
    type Error = ValidationError;

    fn try_from(desc: MenuDescriptor) -> Result<Self> {
        let body = desc
            .body
            .into_iter()
            .map(Item::try_from)
            .collect::<Result<Vec<_>>>()?;

        let mut builder = Menu::builder(body);
        if let Some(header) = desc.header {
            builder = builder.header(header);
        }
        if let Some(footer) = desc.footer {
            builder = builder.footer(footer);
        }
        if let Some(meta) = desc.meta {
            builder = builder.meta(MenuMeta {
                auto_select: meta.auto_select.unwrap_or(MenuMeta::default().auto_select),
            });
        }
        builder.build()
    }
}

impl TryFrom<FormDescriptor> for Form {
    type Error = ValidationError;

    fn try_from(desc: FormDescriptor) -> Result<Self> {
        let items = desc
            .items
            .into_iter()
            .map(FormItem::try_from)
            .collect::<Result<Vec<_>>>()?;

        let mut builder = Form::builder(items, desc.url);
        if let Some(header) = desc.header {
            builder = builder.header(header);
        }
        if let Some(footer) = desc.footer {
            builder = builder.footer(footer);
        }
        if let Some(method) = sanitize_method(desc.method.as_deref())? {
            builder = builder.method(method);
        }
        if let Some(meta) = desc.meta {
            let defaults = FormMeta::default();
            builder = builder.meta(FormMeta {
                status_show: meta.status_show.unwrap_or(defaults.status_show),
                status_in_header: meta.status_in_header.unwrap_or(defaults.status_in_header),
                confirmation_needed: meta
                    .confirmation_needed
                    .unwrap_or(defaults.confirmation_needed),
            });
        }
        builder.build()
    }
}

impl TryFrom<FormMenuOptionDescriptor> for FormMenuOption {
    type Error = ValidationError;

    fn try_from(desc: FormMenuOptionDescriptor) -> Result<Self> {
        FormMenuOption::new(desc.label, desc.value, desc.text_search, desc.is_option)
    }
}

fn bound(n: &Number) -> Bound {
    match n.as_i64() {
        Some(v) => Bound::Int(v),
        None => Bound::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

/// Copies every `Some` field of the descriptor onto the builder setter of the
/// same name.
macro_rules! apply {
    ($builder:ident, $desc:ident, $($field:ident),+ $(,)?) => {
        $(
            if let Some(v) = $desc.$field {
                $builder = $builder.$field(v);
            }
        )+
    };
}

impl FormItemDescriptor {
    /// First setting that a hidden item does not accept.
    fn hidden_conflict(&self) -> Option<&'static str> {
        [
            ("label", self.label.is_some()),
            ("header", self.header.is_some()),
            ("footer", self.footer.is_some()),
            ("chunking_footer", self.chunking_footer.is_some()),
            ("confirmation_label", self.confirmation_label.is_some()),
            ("editable", self.editable.is_some()),
            ("required", self.required.is_some()),
            ("status_exclude", self.status_exclude.is_some()),
            ("status_prepend", self.status_prepend.is_some()),
            ("url", self.url.is_some()),
            ("method", self.method.is_some()),
            ("validate_url", self.validate_url.is_some()),
            ("validate_type_error", self.validate_type_error.is_some()),
            ("validate_type_error_footer", self.validate_type_error_footer.is_some()),
            ("min_length", self.min_length.is_some()),
            ("min_length_error", self.min_length_error.is_some()),
            ("max_length", self.max_length.is_some()),
            ("max_length_error", self.max_length_error.is_some()),
            ("min_value", self.min_value.is_some()),
            ("min_value_error", self.min_value_error.is_some()),
            ("max_value", self.max_value.is_some()),
            ("max_value_error", self.max_value_error.is_some()),
            ("body", self.body.is_some()),
            ("meta", self.meta.is_some()),
        ]
        .into_iter()
        .find_map(|(setting, set)| set.then_some(setting))
    }

    fn into_hidden(self) -> Result<FormItem> {
        if let Some(setting) = self.hidden_conflict() {
            debug!("rejecting {setting} on hidden item {:?}", self.name);
            return Err(ValidationError::HiddenItemSetting {
                name: self.name,
                setting,
            });
        }
        match self.value {
            Some(value) => Ok(FormItem::hidden(self.name, value)),
            None => Err(ValidationError::MissingHiddenValue(self.name)),
        }
    }
}

impl TryFrom<FormItemDescriptor> for FormItem {
    type Error = ValidationError;

    fn try_from(desc: FormItemDescriptor) -> Result<Self> {
        if desc.kind == HIDDEN {
            return desc.into_hidden();
        }

        let item_type: FormItemType = desc.kind.parse()?;
        if desc.value.is_some() {
            return Err(ValidationError::SettingNotApplicable {
                setting: "value",
                kind: item_type,
            });
        }

        let method = match desc.url {
            Some(_) => sanitize_method(desc.method.as_deref())?,
            None => None,
        };
        let min_value = desc.min_value.as_ref().map(bound);
        let max_value = desc.max_value.as_ref().map(bound);
        let options = desc
            .body
            .map(|body| {
                body.into_iter()
                    .map(FormMenuOption::try_from)
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;
        let menu_meta = desc.meta.map(|m| FormMenuMeta {
            auto_select: m.auto_select,
            multi_select: m.multi_select,
            numbered: m.numbered,
        });

        let mut builder = FormItem::builder(desc.name, item_type);
        apply!(
            builder,
            desc,
            label,
            header,
            footer,
            chunking_footer,
            confirmation_label,
            editable,
            required,
            status_exclude,
            status_prepend,
            url,
            validate_url,
            validate_type_error,
            validate_type_error_footer,
            min_length,
            min_length_error,
            max_length,
            max_length_error,
            min_value_error,
            max_value_error,
        );
        if let Some(v) = method {
            builder = builder.method(v);
        }
        if let Some(v) = min_value {
            builder = builder.min_value(v);
        }
        if let Some(v) = max_value {
            builder = builder.max_value(v);
        }
        if let Some(v) = options {
            builder = builder.options(v);
        }
        if let Some(v) = menu_meta {
            builder = builder.menu_meta(v);
        }
        builder.build()
    }
}
