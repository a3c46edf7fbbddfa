//! Containers that lay out a form's widgets

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use soform_core::{same_widget, WidgetRef};

/// Receives widgets as they join or leave a form
pub trait FieldContainer {
    /// Place `widget` at `position`; a widget already under `name` is
    /// replaced where it is
    fn attach(&mut self, position: usize, name: &str, widget: &WidgetRef);

    fn detach(&mut self, name: &str, widget: &WidgetRef);

    /// Number of responsive columns; containers without columns ignore it
    fn set_columns(&mut self, _columns: usize) {}

    /// Columns a field should span
    fn set_column_span(&mut self, _name: &str, _span: usize) {}
}

/// Responsive multi-column layout, the default form container
pub struct FormLayout {
    children: Vec<(String, WidgetRef)>,
    columns: usize,
    spans: HashMap<String, usize>,
}

impl FormLayout {
    /// Create a layout with `columns` columns (at least one)
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            children: Vec::new(),
            columns: columns.max(1),
            spans: HashMap::new(),
        }
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Span of a field, clamped to the current column count
    #[must_use]
    pub fn column_span(&self, name: &str) -> usize {
        self.spans.get(name).copied().unwrap_or(1).min(self.columns)
    }

    /// Names of attached widgets in display order
    #[must_use]
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// The widget attached under `name`
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&WidgetRef> {
        self.children.iter().find(|(n, _)| n == name).map(|(_, w)| w)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl FieldContainer for FormLayout {
    fn attach(&mut self, position: usize, name: &str, widget: &WidgetRef) {
        match self.children.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = Rc::clone(widget),
            None => {
                let at = position.min(self.children.len());
                self.children
                    .insert(at, (name.to_string(), Rc::clone(widget)));
            }
        }
    }

    fn detach(&mut self, name: &str, widget: &WidgetRef) {
        self.children
            .retain(|(n, w)| !(n == name && same_widget(w, widget)));
    }

    fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    fn set_column_span(&mut self, name: &str, span: usize) {
        self.spans.insert(name.to_string(), span.clamp(1, self.columns));
    }
}

impl Default for FormLayout {
    fn default() -> Self {
        Self::new(2)
    }
}

impl fmt::Debug for FormLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormLayout")
            .field("children", &self.child_names())
            .field("columns", &self.columns)
            .field("spans", &self.spans)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::InputField;
    use soform_core::widget_ref;

    #[test]
    fn test_attach_and_detach() {
        let mut layout = FormLayout::new(2);
        let a = widget_ref(InputField::text("A"));
        let b = widget_ref(InputField::text("B"));
        layout.attach(0, "b", &b);
        layout.attach(0, "a", &a);
        assert_eq!(layout.child_names(), vec!["a", "b"]);

        // detaching with a different widget leaves the child alone
        layout.detach("a", &b);
        assert_eq!(layout.len(), 2);
        layout.detach("a", &a);
        assert_eq!(layout.child_names(), vec!["b"]);
    }

    #[test]
    fn test_reattach_replaces_in_place() {
        let mut layout = FormLayout::new(1);
        let a = widget_ref(InputField::text("A"));
        let a2 = widget_ref(InputField::integer("A"));
        layout.attach(0, "a", &a);
        layout.attach(9, "b", &widget_ref(InputField::text("B")));
        layout.attach(1, "a", &a2);
        assert_eq!(layout.child_names(), vec!["a", "b"]);
        assert!(same_widget(layout.child("a").unwrap(), &a2));
    }

    #[test]
    fn test_column_span_clamped() {
        let mut layout = FormLayout::new(3);
        layout.set_column_span("notes", 5);
        assert_eq!(layout.column_span("notes"), 3);
        layout.set_columns(2);
        assert_eq!(layout.column_span("notes"), 2);
        assert_eq!(layout.column_span("other"), 1);
        layout.set_columns(0);
        assert_eq!(layout.columns(), 1);
    }
}
