//! Widget creation by declared value type

use soform_core::{widget_ref, ValueType, Widget, WidgetRef};

use crate::widgets::{FieldKind, InputField};

/// Creates the widget for a member of a given type
pub trait WidgetFactory {
    /// `None` means this factory has no widget for the type; the member is
    /// then left out of the form
    fn create_widget(&self, name: &str, value_type: ValueType, label: &str) -> Option<WidgetRef>;
}

/// Maps the scalar types to [`InputField`] kinds
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultWidgetFactory;

impl DefaultWidgetFactory {
    /// Field kind used for a value type
    #[must_use]
    pub fn kind_for(value_type: ValueType) -> Option<FieldKind> {
        match value_type {
            ValueType::String => Some(FieldKind::Text),
            ValueType::Bool => Some(FieldKind::Checkbox),
            ValueType::Int => Some(FieldKind::Integer),
            ValueType::Float => Some(FieldKind::Double),
            ValueType::Date => Some(FieldKind::Date),
            ValueType::Any | ValueType::Html | ValueType::List => None,
        }
    }
}

impl WidgetFactory for DefaultWidgetFactory {
    fn create_widget(&self, _name: &str, value_type: ValueType, label: &str) -> Option<WidgetRef> {
        let kind = Self::kind_for(value_type)?;
        let mut field = InputField::new(kind);
        field.set_label(label);
        Some(widget_ref(field))
    }
}

impl<F> WidgetFactory for F
where
    F: Fn(&str, ValueType, &str) -> Option<WidgetRef>,
{
    fn create_widget(&self, name: &str, value_type: ValueType, label: &str) -> Option<WidgetRef> {
        self(name, value_type, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_types_get_widgets() {
        let factory = DefaultWidgetFactory;
        for t in [
            ValueType::String,
            ValueType::Bool,
            ValueType::Int,
            ValueType::Float,
            ValueType::Date,
        ] {
            let widget = factory.create_widget("x", t, "X").unwrap();
            assert_eq!(widget.borrow().value_type(), Some(t));
            assert_eq!(widget.borrow().label().as_deref(), Some("X"));
        }
    }

    #[test]
    fn test_unsupported_types_are_dropped() {
        let factory = DefaultWidgetFactory;
        assert!(factory.create_widget("x", ValueType::List, "X").is_none());
        assert!(factory.create_widget("x", ValueType::Html, "X").is_none());
    }

    #[test]
    fn test_closure_factory() {
        let factory = |_: &str, _: ValueType, label: &str| {
            Some(widget_ref(InputField::text(label).value_required()))
        };
        let widget = factory.create_widget("x", ValueType::Int, "Count").unwrap();
        assert!(widget.borrow().requires_value());
    }
}
