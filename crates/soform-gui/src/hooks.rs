//! Customization hooks for forms
//!
//! A form consults its hooks before falling back to the creator and the
//! environment. Every hook has a default; returning `None` from a hook that
//! yields an `Option` means "no policy here, use the default".

use soform_core::{SetError, Value, ValueType, WidgetRef};

/// A value change observed on one of a form's widgets
#[derive(Debug, Clone, PartialEq)]
pub struct ChangedValues {
    /// Member name of the widget
    pub name: String,
    /// Value before the change
    pub old: Value,
    /// Value after the change
    pub new: Value,
    /// Whether the user made the change (as opposed to code)
    pub from_client: bool,
}

impl ChangedValues {
    #[must_use]
    pub fn is_from_client(&self) -> bool {
        self.from_client
    }

    /// Whether the value actually changed
    #[must_use]
    pub fn changed(&self) -> bool {
        self.old != self.new
    }
}

/// Hooks through which an application tailors a form of beans `B`
pub trait FormHooks<B> {
    /// Field names to use when none were given to the form
    fn field_names(&self) -> Option<Vec<String>> {
        None
    }

    /// Whether a discovered field should be part of the form
    fn include_field(&self, _name: &str) -> Option<bool> {
        None
    }

    /// Display order of a field
    fn field_order(&self, _name: &str) -> Option<i32> {
        None
    }

    /// Label for a field
    fn label(&self, _name: &str) -> Option<String> {
        None
    }

    /// Widget for a field, ahead of the widget factories
    fn create_field(&self, _name: &str, _label: &str, _value_type: ValueType) -> Option<WidgetRef> {
        None
    }

    /// Called exactly once for every widget the form creates itself
    fn customize_field(&self, _name: &str, _widget: &WidgetRef) {}

    fn is_field_visible(&self, _name: &str) -> bool {
        true
    }

    fn is_field_editable(&self, _name: &str) -> bool {
        true
    }

    /// Recover from a failing setter; return `true` if the failure was handled
    ///
    /// Unhandled failures make the widget read-only.
    fn handle_value_set_error(
        &self,
        _name: &str,
        _widget: &WidgetRef,
        _value: &Value,
        _error: &SetError,
    ) -> bool {
        false
    }

    /// Cross-field check run by a data form after a successful commit
    fn validate_data(&self, _bean: &B) -> Result<(), String> {
        Ok(())
    }

    /// Notification for every relayed value change
    fn value_changed(&self, _change: &ChangedValues) {}

    /// Called once the form's fields exist
    fn constructed(&self) {}
}

/// Hooks that keep every default
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<B> FormHooks<B> for NoHooks {}
