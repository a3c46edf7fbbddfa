//! Shared environment for forms and grids
//!
//! An [`Environment`] bundles the configuration, the widget factory and the
//! identifier generator. It is created once per application and handed to
//! every form and grid behind an `Rc`.

use std::fmt;
use std::rc::Rc;

use soform_core::{create_label, EnvironmentConfig, IdGenerator, Value, ValueType, WidgetRef};

use crate::factory::{DefaultWidgetFactory, WidgetFactory};

/// Configuration, widget factory and ID source shared by forms and grids
pub struct Environment {
    config: EnvironmentConfig,
    ids: Rc<IdGenerator>,
    widget_factory: Box<dyn WidgetFactory>,
}

impl Environment {
    /// Create an environment with the default widget factory
    #[must_use]
    pub fn new(config: EnvironmentConfig) -> Self {
        Self {
            config,
            ids: Rc::new(IdGenerator::new()),
            widget_factory: Box::new(DefaultWidgetFactory),
        }
    }

    /// Replace the widget factory
    #[must_use]
    pub fn with_widget_factory(mut self, factory: impl WidgetFactory + 'static) -> Self {
        self.widget_factory = Box::new(factory);
        self
    }

    /// Share an existing ID generator
    #[must_use]
    pub fn with_ids(mut self, ids: Rc<IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    #[must_use]
    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    #[must_use]
    pub fn ids(&self) -> &Rc<IdGenerator> {
        &self.ids
    }

    /// Label for a member name
    #[must_use]
    pub fn create_label(&self, name: &str) -> String {
        create_label(name)
    }

    /// Caption for a bean type name (`SalesOrder` → `Sales Order`)
    #[must_use]
    pub fn type_caption(&self, type_name: &str) -> String {
        let simple = type_name.rsplit("::").next().unwrap_or(type_name);
        create_label(simple)
    }

    /// Create a widget through the configured factory
    pub fn create_widget(&self, name: &str, value_type: ValueType, label: &str) -> Option<WidgetRef> {
        self.widget_factory.create_widget(name, value_type, label)
    }

    /// Text shown for a value in a grid cell
    #[must_use]
    pub fn to_display(&self, value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::Bool(true) => self.config.true_text.clone(),
            Value::Bool(false) => self.config.false_text.clone(),
            Value::Date(d) => d.format(&self.config.date_format).to_string(),
            Value::List(items) => items
                .iter()
                .map(|v| self.to_display(v))
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        }
    }

    /// Text shown for the outcome of a computation; failures show their message
    #[must_use]
    pub fn display_result<E: fmt::Display>(&self, result: &Result<Value, E>) -> String {
        match result {
            Ok(value) => self.to_display(value),
            Err(err) => err.to_string(),
        }
    }

    /// Message for a required field left empty
    #[must_use]
    pub fn required_message(&self, label: &str) -> String {
        format!("{label}: {}", self.config.required_message)
    }

    /// Message for a value rejected by a validator without its own message
    #[must_use]
    pub fn invalid_message(&self, label: &str) -> String {
        format!("{label}: {}", self.config.invalid_message)
    }

    /// Message for a setter failure nobody handled
    #[must_use]
    pub fn set_error_message(&self, label: &str, detail: &str) -> String {
        format!("{label}: {} ({detail})", self.config.set_error_message)
    }

    /// Minimum width for a grid showing `column_count` columns
    ///
    /// The per-column width is multiplied out and capped; a cap of 10 px or
    /// less falls back to 800 px.
    #[must_use]
    pub fn min_grid_width(&self, column_count: usize) -> String {
        let max = match self.config.max_grid_width_px {
            m if m <= 10 => 800,
            m => m,
        };
        let count = u32::try_from(column_count).unwrap_or(u32::MAX);
        let width = self.config.min_column_width_px.saturating_mul(count).min(max);
        format!("{width}px")
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(EnvironmentConfig::default())
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("config", &self.config)
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use soform_core::SetError;

    #[test]
    fn test_to_display() {
        let env = Environment::default();
        assert_eq!(env.to_display(&Value::Null), "");
        assert_eq!(env.to_display(&Value::Bool(true)), "Yes");
        assert_eq!(env.to_display(&Value::Float(2.5)), "2.5");
        let d = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        assert_eq!(env.to_display(&Value::Date(d)), "2023-07-01");
    }

    #[test]
    fn test_custom_date_format() {
        let config = EnvironmentConfig {
            date_format: "%d/%m/%Y".to_string(),
            ..EnvironmentConfig::default()
        };
        let env = Environment::new(config);
        let d = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        assert_eq!(env.to_display(&Value::Date(d)), "01/07/2023");
    }

    #[test]
    fn test_display_result_shows_error_message() {
        let env = Environment::default();
        let failed: Result<Value, SetError> = Err(SetError::new("boom"));
        assert_eq!(env.display_result(&failed), "boom");
        assert_eq!(env.display_result::<SetError>(&Ok(Value::Int(4))), "4");
    }

    #[test]
    fn test_messages() {
        let env = Environment::default();
        assert_eq!(env.required_message("Name"), "Name: Can not be empty");
        assert_eq!(env.invalid_message("Age"), "Age: Not valid");
    }

    #[test]
    fn test_type_caption() {
        let env = Environment::default();
        assert_eq!(env.type_caption("SalesOrder"), "Sales Order");
        assert_eq!(env.type_caption("crm::Person"), "Person");
    }

    #[test]
    fn test_min_grid_width() {
        let env = Environment::default();
        assert_eq!(env.min_grid_width(3), "360px");
        assert_eq!(env.min_grid_width(20), "800px");
        let narrow = Environment::new(EnvironmentConfig {
            max_grid_width_px: 5,
            ..EnvironmentConfig::default()
        });
        assert_eq!(narrow.min_grid_width(10), "800px");
    }
}
