//! Application context
//!
//! The application owns the shared [`Environment`] and keeps track of which
//! views are executing. Forms and grids created through it share its
//! configuration and ID generator.

use std::rc::Rc;

use soform_core::{BeanType, EnvironmentConfig};
use tracing::debug;

use crate::data_form::DataForm;
use crate::data_grid::DataGrid;
use crate::environment::Environment;
use crate::error::GuiResult;
use crate::form::Form;
use crate::view::View;

#[derive(Debug)]
pub struct Application {
    env: Rc<Environment>,
    executing: Vec<String>,
}

impl Application {
    #[must_use]
    pub fn new(config: EnvironmentConfig) -> Self {
        Self::with_environment(Rc::new(Environment::new(config)))
    }

    #[must_use]
    pub fn with_environment(env: Rc<Environment>) -> Self {
        Self {
            env,
            executing: Vec::new(),
        }
    }

    #[must_use]
    pub fn environment(&self) -> &Rc<Environment> {
        &self.env
    }

    pub fn create_form<B: 'static>(&self, bean_type: Rc<BeanType<B>>) -> Form<B> {
        Form::new(bean_type, Rc::clone(&self.env))
    }

    pub fn create_data_form<B: 'static>(&self, bean_type: Rc<BeanType<B>>) -> DataForm<B> {
        DataForm::new(self.create_form(bean_type))
    }

    pub fn create_grid<B: 'static>(&self, bean_type: Rc<BeanType<B>>) -> DataGrid<B> {
        DataGrid::new(bean_type, Rc::clone(&self.env))
    }

    /// Execute `view` and remember it as running
    pub fn execute(&mut self, view: &mut View) -> GuiResult<()> {
        view.execute()?;
        if !self.executing.iter().any(|c| c == view.caption()) {
            self.executing.push(view.caption().to_string());
        }
        Ok(())
    }

    /// Execute a data form and remember it as running
    pub fn execute_form<B: 'static>(&mut self, form: &mut DataForm<B>) -> GuiResult<()> {
        form.execute()?;
        let caption = form.view().caption().to_string();
        if !self.executing.contains(&caption) {
            self.executing.push(caption);
        }
        Ok(())
    }

    /// Close `view`; returns false if it was not executing
    pub fn close(&mut self, view: &mut View) -> bool {
        let closed = view.close();
        self.forget(view.caption());
        closed
    }

    /// Drop finished views from the running list
    pub fn forget(&mut self, caption: &str) {
        self.executing.retain(|c| c != caption);
        debug!(caption, remaining = self.executing.len(), "view no longer tracked");
    }

    /// Captions of the views currently executing
    #[must_use]
    pub fn executing_views(&self) -> &[String] {
        &self.executing
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new(EnvironmentConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soform_core::testutil::{person_type, Person};

    #[test]
    fn test_tracks_executing_views() {
        let mut app = Application::default();
        let mut view = View::new("Orders");
        view.set_component(true);
        app.execute(&mut view).unwrap();
        app.execute(&mut view).unwrap();
        assert_eq!(app.executing_views(), ["Orders".to_string()]);
        assert!(app.close(&mut view));
        assert!(app.executing_views().is_empty());
    }

    #[test]
    fn test_failed_execute_not_tracked() {
        let mut app = Application::default();
        let mut view = View::new("Orders");
        assert!(app.execute(&mut view).is_err());
        assert!(app.executing_views().is_empty());
    }

    #[test]
    fn test_forms_share_id_generator() {
        let app = Application::default();
        let bean_type = Rc::new(person_type());
        let mut first = app.create_form(Rc::clone(&bean_type));
        let mut second = app.create_form(bean_type);
        let a = first.add_anonymous_field(
            crate::widget_ref(crate::InputField::text("A")),
            soform_core::ValueType::String,
            |p: &Person| soform_core::Value::string(&p.name),
            None,
        );
        let b = second.add_anonymous_field(
            crate::widget_ref(crate::InputField::text("B")),
            soform_core::ValueType::String,
            |p: &Person| soform_core::Value::string(&p.name),
            None,
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_execute_form_tracks_caption() {
        let mut app = Application::default();
        let mut form = app.create_data_form(Rc::new(person_type()));
        app.execute_form(&mut form).unwrap();
        assert_eq!(app.executing_views(), ["Person".to_string()]);
        assert!(form.cancel());
        app.forget("Person");
        assert!(app.executing_views().is_empty());
    }
}
