//! Form item variants and their validation blocks.

use std::{fmt, str::FromStr};

use serde_json::{Value, json};

use crate::{
    error::{Result, ValidationError},
    form::menu::{FormMenuMeta, FormMenuOption},
    render::{Render, optional},
    sanitize::{Method, callback, sanitize_url},
};

/// Kind tag of a form item as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormItemType {
    /// Free text.
    String,
    /// Whole number.
    Int,
    /// Decimal number.
    Float,
    /// Calendar date.
    Date,
    /// Date and time of day.
    DateTime,
    /// Choice between a list of options.
    Menu,
}

impl FormItemType {
    /// Every accepted kind.
    pub const ALL: [FormItemType; 6] = [
        FormItemType::String,
        FormItemType::Int,
        FormItemType::Float,
        FormItemType::Date,
        FormItemType::DateTime,
        FormItemType::Menu,
    ];

    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormItemType::String => "string",
            FormItemType::Int => "int",
            FormItemType::Float => "float",
            FormItemType::Date => "date",
            FormItemType::DateTime => "datetime",
            FormItemType::Menu => "form-menu",
        }
    }
}

impl fmt::Display for FormItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormItemType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| {
                debug!("rejecting form item type {s:?}");
                ValidationError::UnknownItemType {
                    found: s.to_string(),
                    allowed: Self::ALL.map(|ty| ty.as_str()).join(", "),
                }
            })
    }
}

/// Numeric bound of an `int` or `float` item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Integral bound, rendered without a fraction.
    Int(i64),
    /// Decimal bound.
    Float(f64),
}

impl Bound {
    fn to_value(self) -> Value {
        match self {
            Bound::Int(v) => json!(v),
            Bound::Float(v) => json!(v),
        }
    }

    /// Rejects NaN and infinite bounds, which have no JSON number form.
    fn finite(self, setting: &'static str) -> Result<Self> {
        match self {
            Bound::Float(v) if !v.is_finite() => {
                debug!("rejecting non-finite {setting} {v}");
                Err(ValidationError::BoundOutOfRange { setting, value: v })
            }
            bound => Ok(bound),
        }
    }

    /// Narrows the bound to an integer, as `int` items require.
    fn integral(self, setting: &'static str) -> Result<Self> {
        match self.finite(setting)? {
            // i64::MAX as f64 rounds up to 2^63, so the upper end is exclusive.
            Bound::Float(v) if !(i64::MIN as f64..i64::MAX as f64).contains(&v) => {
                debug!("rejecting {setting} {v} outside the int range");
                Err(ValidationError::BoundOutOfRange { setting, value: v })
            }
            Bound::Float(v) if v.fract() == 0.0 => Ok(Bound::Int(v as i64)),
            Bound::Float(v) => {
                debug!("rejecting fractional {setting} {v}");
                Err(ValidationError::FractionalBound { setting, value: v })
            }
            int => Ok(int),
        }
    }
}

impl From<i64> for Bound {
    fn from(v: i64) -> Self {
        Bound::Int(v)
    }
}

impl From<i32> for Bound {
    fn from(v: i32) -> Self {
        Bound::Int(v.into())
    }
}

impl From<u32> for Bound {
    fn from(v: u32) -> Self {
        Bound::Int(v.into())
    }
}

impl From<f64> for Bound {
    fn from(v: f64) -> Self {
        Bound::Float(v)
    }
}

/// Length limits of a `string` item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LengthRule {
    /// Shortest accepted answer.
    pub min_length: Option<u32>,
    /// Message shown when the answer is too short.
    pub min_length_error: Option<String>,
    /// Longest accepted answer.
    pub max_length: Option<u32>,
    /// Message shown when the answer is too long.
    pub max_length_error: Option<String>,
}

impl Render for LengthRule {
    fn as_data(&self) -> Value {
        json!({
            "min_length": self.min_length,
            "min_length_error": self.min_length_error,
            "max_length": self.max_length,
            "max_length_error": self.max_length_error,
        })
    }
}

/// Value limits of an `int` or `float` item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueRule {
    /// Smallest accepted answer.
    pub min_value: Option<Bound>,
    /// Message shown when the answer is too small.
    pub min_value_error: Option<String>,
    /// Largest accepted answer.
    pub max_value: Option<Bound>,
    /// Message shown when the answer is too large.
    pub max_value_error: Option<String>,
}

impl ValueRule {
    fn integral(self) -> Result<Self> {
        Ok(Self {
            min_value: self.min_value.map(|b| b.integral("min_value")).transpose()?,
            max_value: self.max_value.map(|b| b.integral("max_value")).transpose()?,
            ..self
        })
    }

    fn finite(self) -> Result<Self> {
        Ok(Self {
            min_value: self.min_value.map(|b| b.finite("min_value")).transpose()?,
            max_value: self.max_value.map(|b| b.finite("max_value")).transpose()?,
            ..self
        })
    }
}

impl Render for ValueRule {
    fn as_data(&self) -> Value {
        json!({
            "min_value": self.min_value.map(Bound::to_value),
            "min_value_error": self.min_value_error,
            "max_value": self.max_value.map(Bound::to_value),
            "max_value_error": self.max_value_error,
        })
    }
}

/// Kind-specific part of a [`FormItem`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormItemKind {
    /// Free text with optional length limits.
    String(LengthRule),
    /// Fixed value submitted without asking the user.
    Hidden(String),
    /// Whole number with optional limits.
    Int(ValueRule),
    /// Decimal number with optional limits.
    Float(ValueRule),
    /// Calendar date.
    Date,
    /// Date and time of day.
    DateTime,
    /// Choice between options.
    Menu {
        /// Options in display order.
        options: Vec<FormMenuOption>,
        /// Selection behaviour.
        meta: Option<FormMenuMeta>,
    },
}

impl FormItemKind {
    /// Wire kind tag. Hidden items travel as strings.
    pub fn item_type(&self) -> FormItemType {
        match self {
            FormItemKind::String(_) | FormItemKind::Hidden(_) => FormItemType::String,
            FormItemKind::Int(_) => FormItemType::Int,
            FormItemKind::Float(_) => FormItemType::Float,
            FormItemKind::Date => FormItemType::Date,
            FormItemKind::DateTime => FormItemType::DateTime,
            FormItemKind::Menu { .. } => FormItemType::Menu,
        }
    }

    fn empty(item_type: FormItemType) -> Self {
        match item_type {
            FormItemType::String => FormItemKind::String(LengthRule::default()),
            FormItemType::Int => FormItemKind::Int(ValueRule::default()),
            FormItemType::Float => FormItemKind::Float(ValueRule::default()),
            FormItemType::Date => FormItemKind::Date,
            FormItemType::DateTime => FormItemKind::DateTime,
            FormItemType::Menu => FormItemKind::Menu {
                options: Vec::new(),
                meta: None,
            },
        }
    }
}

/// Attributes shared by every form item kind.
#[derive(Debug, Clone, PartialEq)]
struct FormItemBase {
    name: String,
    chunking_footer: Option<String>,
    confirmation_label: Option<String>,
    editable: bool,
    footer: Option<String>,
    header: Option<String>,
    label: Option<String>,
    method: Option<Method>,
    required: bool,
    status_exclude: bool,
    status_prepend: bool,
    url: Option<String>,
    validate_url: Option<String>,
    validate_type_error: Option<String>,
    validate_type_error_footer: Option<String>,
}

impl FormItemBase {
    fn new(name: String) -> Self {
        Self {
            name,
            chunking_footer: None,
            confirmation_label: None,
            editable: true,
            footer: None,
            header: None,
            label: None,
            method: None,
            required: true,
            status_exclude: false,
            status_prepend: false,
            url: None,
            validate_url: None,
            validate_type_error: None,
            validate_type_error_footer: None,
        }
    }
}

/// One input step of a [`Form`](crate::Form).
#[derive(Debug, Clone, PartialEq)]
pub struct FormItem {
    base: FormItemBase,
    kind: FormItemKind,
}

/// Builder for a [`FormItem`].
///
/// Settings that only make sense for one kind (length limits, value limits,
/// menu options) are accepted on every builder but make
/// [`FormItemBuilder::build`] fail when the kind does not match.
#[derive(Debug, Clone)]
pub struct FormItemBuilder {
    base: FormItemBase,
    kind: FormItemKind,
    misapplied: Option<&'static str>,
}

impl FormItem {
    /// Starts an item of the given kind.
    pub fn builder(name: impl Into<String>, item_type: FormItemType) -> FormItemBuilder {
        FormItemBuilder {
            base: FormItemBase::new(name.into()),
            kind: FormItemKind::empty(item_type),
            misapplied: None,
        }
    }

    /// Starts a free text item.
    pub fn string(name: impl Into<String>) -> FormItemBuilder {
        Self::builder(name, FormItemType::String)
    }

    /// Starts a whole number item.
    pub fn int(name: impl Into<String>) -> FormItemBuilder {
        Self::builder(name, FormItemType::Int)
    }

    /// Starts a decimal number item.
    pub fn float(name: impl Into<String>) -> FormItemBuilder {
        Self::builder(name, FormItemType::Float)
    }

    /// Starts a date item.
    pub fn date(name: impl Into<String>) -> FormItemBuilder {
        Self::builder(name, FormItemType::Date)
    }

    /// Starts a date and time item.
    pub fn datetime(name: impl Into<String>) -> FormItemBuilder {
        Self::builder(name, FormItemType::DateTime)
    }

    /// Starts a choice item over `options`.
    pub fn menu(name: impl Into<String>, options: Vec<FormMenuOption>) -> FormItemBuilder {
        Self::builder(name, FormItemType::Menu).options(options)
    }

    /// Creates a hidden item that submits `value` without prompting.
    pub fn hidden(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            base: FormItemBase::new(name.into()),
            kind: FormItemKind::Hidden(value.into()),
        }
    }

    /// Key the platform uses to report the answer.
    pub fn name(&self) -> &str {
        &self.base.name
    }

    /// Wire kind tag.
    pub fn item_type(&self) -> FormItemType {
        self.kind.item_type()
    }

    /// Kind-specific settings.
    pub fn kind(&self) -> &FormItemKind {
        &self.kind
    }
}

impl FormItemBuilder {
    /// Question shown to the user.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.base.label = Some(label.into());
        self
    }

    /// Header for this step, replacing the form header.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.base.header = Some(header.into());
        self
    }

    /// Footer for this step, replacing the form footer.
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.base.footer = Some(footer.into());
        self
    }

    /// Footer shown when the message is split into chunks.
    pub fn chunking_footer(mut self, footer: impl Into<String>) -> Self {
        self.base.chunking_footer = Some(footer.into());
        self
    }

    /// Label of the answer in the confirmation step.
    pub fn confirmation_label(mut self, label: impl Into<String>) -> Self {
        self.base.confirmation_label = Some(label.into());
        self
    }

    /// Whether the answer can be changed from the confirmation step.
    pub fn editable(mut self, editable: bool) -> Self {
        self.base.editable = editable;
        self
    }

    /// Whether the step can be skipped.
    pub fn required(mut self, required: bool) -> Self {
        self.base.required = required;
        self
    }

    /// Leave this step out of the completion status.
    pub fn status_exclude(mut self, exclude: bool) -> Self {
        self.base.status_exclude = exclude;
        self
    }

    /// Put this step before the body in the completion status.
    pub fn status_prepend(mut self, prepend: bool) -> Self {
        self.base.status_prepend = prepend;
        self
    }

    /// Callback path triggered once the step is answered.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.base.url = Some(url.into());
        self
    }

    /// How the callback is triggered. Defaults to `GET` when a url is set.
    pub fn method(mut self, method: Method) -> Self {
        self.base.method = Some(method);
        self
    }

    /// Path called with `?user_input=...` to validate the answer server side.
    pub fn validate_url(mut self, url: impl Into<String>) -> Self {
        self.base.validate_url = Some(url.into());
        self
    }

    /// Message shown when the answer has the wrong type.
    pub fn validate_type_error(mut self, error: impl Into<String>) -> Self {
        self.base.validate_type_error = Some(error.into());
        self
    }

    /// Footer of the wrong type message.
    pub fn validate_type_error_footer(mut self, footer: impl Into<String>) -> Self {
        self.base.validate_type_error_footer = Some(footer.into());
        self
    }

    fn misapply(mut self, setting: &'static str) -> Self {
        self.misapplied.get_or_insert(setting);
        self
    }

    fn length_rule(mut self, setting: &'static str, f: impl FnOnce(&mut LengthRule)) -> Self {
        match &mut self.kind {
            FormItemKind::String(rule) => {
                f(rule);
                self
            }
            _ => self.misapply(setting),
        }
    }

    fn value_rule(mut self, setting: &'static str, f: impl FnOnce(&mut ValueRule)) -> Self {
        match &mut self.kind {
            FormItemKind::Int(rule) | FormItemKind::Float(rule) => {
                f(rule);
                self
            }
            _ => self.misapply(setting),
        }
    }

    /// Shortest accepted text. `string` only.
    pub fn min_length(self, len: u32) -> Self {
        self.length_rule("min_length", |r| r.min_length = Some(len))
    }

    /// Message for too short text. `string` only.
    pub fn min_length_error(self, error: impl Into<String>) -> Self {
        let error = error.into();
        self.length_rule("min_length_error", |r| r.min_length_error = Some(error))
    }

    /// Longest accepted text. `string` only.
    pub fn max_length(self, len: u32) -> Self {
        self.length_rule("max_length", |r| r.max_length = Some(len))
    }

    /// Message for too long text. `string` only.
    pub fn max_length_error(self, error: impl Into<String>) -> Self {
        let error = error.into();
        self.length_rule("max_length_error", |r| r.max_length_error = Some(error))
    }

    /// Smallest accepted number. `int` and `float` only.
    pub fn min_value(self, value: impl Into<Bound>) -> Self {
        let value = value.into();
        self.value_rule("min_value", |r| r.min_value = Some(value))
    }

    /// Message for too small numbers. `int` and `float` only.
    pub fn min_value_error(self, error: impl Into<String>) -> Self {
        let error = error.into();
        self.value_rule("min_value_error", |r| r.min_value_error = Some(error))
    }

    /// Largest accepted number. `int` and `float` only.
    pub fn max_value(self, value: impl Into<Bound>) -> Self {
        let value = value.into();
        self.value_rule("max_value", |r| r.max_value = Some(value))
    }

    /// Message for too large numbers. `int` and `float` only.
    pub fn max_value_error(self, error: impl Into<String>) -> Self {
        let error = error.into();
        self.value_rule("max_value_error", |r| r.max_value_error = Some(error))
    }

    /// Options to choose from. `form-menu` only.
    pub fn options(mut self, new_options: Vec<FormMenuOption>) -> Self {
        match &mut self.kind {
            FormItemKind::Menu { options, .. } => {
                *options = new_options;
                self
            }
            _ => self.misapply("options"),
        }
    }

    /// Selection behaviour. `form-menu` only.
    pub fn menu_meta(mut self, new_meta: FormMenuMeta) -> Self {
        match &mut self.kind {
            FormItemKind::Menu { meta, .. } => {
                *meta = Some(new_meta);
                self
            }
            _ => self.misapply("menu_meta"),
        }
    }

    /// Validates and builds the item.
    ///
    /// # Errors
    ///
    /// Fails when a kind-specific setting was used on another kind, a numeric
    /// bound is not finite or does not fit an `int` item, a `form-menu` has no
    /// options, or a callback path is not relative.
    pub fn build(self) -> Result<FormItem> {
        let Self {
            mut base,
            kind,
            misapplied,
        } = self;

        if let Some(setting) = misapplied {
            let kind = kind.item_type();
            debug!("rejecting {setting} on {kind} item {:?}", base.name);
            return Err(ValidationError::SettingNotApplicable { setting, kind });
        }

        let kind = match kind {
            FormItemKind::Int(rule) => FormItemKind::Int(rule.integral()?),
            FormItemKind::Float(rule) => FormItemKind::Float(rule.finite()?),
            FormItemKind::Menu { options, .. } if options.is_empty() => {
                debug!("rejecting form menu {:?} without options", base.name);
                return Err(ValidationError::EmptyCollection("form menu options"));
            }
            kind => kind,
        };

        let (url, method) = callback(base.url.as_deref(), base.method)?;
        base.url = url;
        base.method = method;
        base.validate_url = sanitize_url(base.validate_url.as_deref())?;

        Ok(FormItem { base, kind })
    }
}

fn extend(target: &mut Value, extra: Value) {
    if let (Value::Object(target), Value::Object(extra)) = (target, extra) {
        target.extend(extra);
    }
}

impl Render for FormItem {
    fn as_data(&self) -> Value {
        let base = &self.base;
        let mut data = json!({
            "name": base.name,
            "type": self.item_type().as_str(),
            "chunking_footer": base.chunking_footer,
            "confirmation_label": base.confirmation_label,
            "editable": base.editable,
            "footer": base.footer,
            "header": base.header,
            "description": base.label,
            "method": base.method,
            "required": base.required,
            "status_exclude": base.status_exclude,
            "status_prepend": base.status_prepend,
            "url": base.url,
            "validation": {
                "url": base.validate_url,
                "type_error": base.validate_type_error,
                "type_error_footer": base.validate_type_error_footer,
            },
        });

        match &self.kind {
            FormItemKind::String(rule) => extend(&mut data["validation"], rule.as_data()),
            FormItemKind::Int(rule) | FormItemKind::Float(rule) => {
                extend(&mut data["validation"], rule.as_data())
            }
            FormItemKind::Hidden(value) => {
                extend(&mut data, json!({ "hidden": true, "value": value }))
            }
            FormItemKind::Menu { options, meta } => extend(
                &mut data,
                json!({
                    "meta": optional(meta.as_ref()),
                    "body": options.iter().map(Render::as_data).collect::<Vec<_>>(),
                }),
            ),
            FormItemKind::Date | FormItemKind::DateTime => {}
        }

        data
    }
}
