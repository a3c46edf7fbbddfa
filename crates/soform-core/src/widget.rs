//! Widget capability
//!
//! The binding engine only needs a small slice of what a real input
//! component offers: a value, a read-only switch and a few presentation
//! flags. Value changes made by the user are relayed into the engine by
//! whoever owns the widget (see `Form::value_changed` in `soform-gui`).

use std::cell::RefCell;
use std::rc::Rc;

use crate::value::{Value, ValueType};

/// A value-holding input component
pub trait Widget {
    /// Current value
    fn value(&self) -> Value;

    /// Replace the current value
    fn set_value(&mut self, value: Value);

    /// Whether the widget holds no value
    fn is_empty(&self) -> bool {
        self.value().is_empty()
    }

    /// Reset to the empty value
    fn clear(&mut self) {
        self.set_value(Value::Null);
    }

    fn is_read_only(&self) -> bool;

    fn set_read_only(&mut self, read_only: bool);

    fn label(&self) -> Option<String> {
        None
    }

    fn set_label(&mut self, _label: &str) {}

    fn is_visible(&self) -> bool {
        true
    }

    fn set_visible(&mut self, _visible: bool) {}

    /// Mark the widget invalid with an optional message, or clear the mark
    fn set_invalid(&mut self, _invalid: bool, _message: Option<&str>) {}

    fn is_invalid(&self) -> bool {
        false
    }

    /// Show or hide the "required" indicator
    fn set_required_indicator(&mut self, _required: bool) {}

    /// Widgets that always need a value become required automatically
    fn requires_value(&self) -> bool {
        false
    }

    /// Type of value this widget edits, if it has a fixed one
    fn value_type(&self) -> Option<ValueType> {
        None
    }
}

/// Shared handle to a widget
pub type WidgetRef = Rc<RefCell<dyn Widget>>;

/// Wrap a widget in a shared handle
pub fn widget_ref<W: Widget + 'static>(widget: W) -> WidgetRef {
    Rc::new(RefCell::new(widget))
}

/// Identity comparison of widget handles
#[must_use]
pub fn same_widget(a: &WidgetRef, b: &WidgetRef) -> bool {
    Rc::as_ptr(a).cast::<()>() == Rc::as_ptr(b).cast::<()>()
}
