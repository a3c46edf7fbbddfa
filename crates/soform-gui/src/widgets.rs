//! Minimal value-holding widgets
//!
//! These are the widgets the default factory produces. They hold a value and
//! the presentation flags the binding engine drives; drawing them is left to
//! whatever front end hosts the form.

use soform_core::{Value, ValueType, Widget};

/// Kind of input a [`InputField`] represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Checkbox,
    Integer,
    Double,
    Date,
}

impl FieldKind {
    /// Type of value the kind edits
    #[must_use]
    pub const fn value_type(self) -> ValueType {
        match self {
            FieldKind::Text => ValueType::String,
            FieldKind::Checkbox => ValueType::Bool,
            FieldKind::Integer => ValueType::Int,
            FieldKind::Double => ValueType::Float,
            FieldKind::Date => ValueType::Date,
        }
    }

    /// Value shown when the field is cleared
    #[must_use]
    pub fn empty_value(self) -> Value {
        match self {
            FieldKind::Text => Value::string(""),
            FieldKind::Checkbox => Value::Bool(false),
            FieldKind::Integer | FieldKind::Double | FieldKind::Date => Value::Null,
        }
    }
}

/// General purpose input widget
#[derive(Debug, Clone)]
pub struct InputField {
    kind: FieldKind,
    label: Option<String>,
    value: Value,
    read_only: bool,
    visible: bool,
    invalid: bool,
    error_message: Option<String>,
    required_indicator: bool,
    value_required: bool,
    placeholder: Option<String>,
}

impl InputField {
    /// Create an empty field of the given kind
    #[must_use]
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            label: None,
            value: kind.empty_value(),
            read_only: false,
            visible: true,
            invalid: false,
            error_message: None,
            required_indicator: false,
            value_required: false,
            placeholder: None,
        }
    }

    fn labelled(kind: FieldKind, label: &str) -> Self {
        let mut field = Self::new(kind);
        field.label = Some(label.to_string());
        field
    }

    /// Single line text field
    #[must_use]
    pub fn text(label: &str) -> Self {
        Self::labelled(FieldKind::Text, label)
    }

    #[must_use]
    pub fn checkbox(label: &str) -> Self {
        Self::labelled(FieldKind::Checkbox, label)
    }

    #[must_use]
    pub fn integer(label: &str) -> Self {
        Self::labelled(FieldKind::Integer, label)
    }

    #[must_use]
    pub fn double(label: &str) -> Self {
        Self::labelled(FieldKind::Double, label)
    }

    #[must_use]
    pub fn date(label: &str) -> Self {
        Self::labelled(FieldKind::Date, label)
    }

    /// Make the field report that it always needs a value
    #[must_use]
    pub fn value_required(mut self) -> Self {
        self.value_required = true;
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub fn is_required_indicator_visible(&self) -> bool {
        self.required_indicator
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }
}

impl Widget for InputField {
    fn value(&self) -> Value {
        self.value.clone()
    }

    /// Values are converted to the field's type; input that cannot be
    /// converted is kept as-is so validators can still reject it
    fn set_value(&mut self, value: Value) {
        let value = match value {
            Value::Null => self.kind.empty_value(),
            other => other
                .coerce_to(self.kind.value_type())
                .unwrap_or(other),
        };
        self.value = match value {
            Value::Null => self.kind.empty_value(),
            other => other,
        };
    }

    fn clear(&mut self) {
        self.value = self.kind.empty_value();
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn label(&self) -> Option<String> {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = Some(label.to_string());
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_invalid(&mut self, invalid: bool, message: Option<&str>) {
        self.invalid = invalid;
        self.error_message = if invalid { message.map(str::to_string) } else { None };
    }

    fn is_invalid(&self) -> bool {
        self.invalid
    }

    fn set_required_indicator(&mut self, required: bool) {
        self.required_indicator = required;
    }

    fn requires_value(&self) -> bool {
        self.value_required
    }

    fn value_type(&self) -> Option<ValueType> {
        Some(self.kind.value_type())
    }
}
