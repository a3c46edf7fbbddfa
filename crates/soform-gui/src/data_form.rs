//! A form hosted in its own view, completed with OK or Cancel

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::error::GuiResult;
use crate::form::Form;
use crate::view::{View, ViewState};

/// Processes a committed bean; `Ok(true)` closes the view
pub type Processor<B> = Box<dyn FnMut(&mut B) -> Result<bool, String>>;

/// A [`Form`] shown in a [`View`]
pub struct DataForm<B> {
    view: View,
    form: Form<B>,
    processor: Option<Processor<B>>,
}

impl<B: 'static> DataForm<B> {
    /// Wrap `form`; the caption is taken from the bean type
    pub fn new(form: Form<B>) -> Self {
        let mut view = View::new(form.caption());
        view.set_component(true);
        Self {
            view,
            form,
            processor: None,
        }
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.view.set_caption(caption);
        self
    }

    pub fn set_processor(&mut self, processor: impl FnMut(&mut B) -> Result<bool, String> + 'static) {
        self.processor = Some(Box::new(processor));
    }

    #[must_use]
    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    #[must_use]
    pub fn form(&self) -> &Form<B> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form<B> {
        &mut self.form
    }

    /// Build the fields and show the view
    pub fn execute(&mut self) -> GuiResult<()> {
        self.form.materialize();
        self.view.execute()
    }

    /// Commit, validate the bean as a whole, process it and close
    ///
    /// Returns true only if the view was closed. Any failure leaves the view
    /// open with the error shown.
    pub fn ok(&mut self) -> bool {
        if self.view.state() != ViewState::Executing {
            return false;
        }
        if !self.form.commit() {
            return false;
        }
        let hooks = Rc::clone(self.form.engine().hooks());
        let Some(bean) = self.form.object_mut() else {
            return false;
        };
        if let Err(msg) = hooks.validate_data(bean) {
            self.form.engine_mut().show_error(&msg);
            return false;
        }
        let outcome = match self.processor.as_mut() {
            Some(process) => process(bean),
            None => Ok(true),
        };
        match outcome {
            Ok(true) => self.view.close(),
            Ok(false) => false,
            Err(msg) => {
                debug!(error = %msg, "processing failed");
                self.form.engine_mut().show_error(&msg);
                false
            }
        }
    }

    /// Abandon the edit
    pub fn cancel(&mut self) -> bool {
        self.view.abort()
    }
}

impl<B> fmt::Debug for DataForm<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataForm")
            .field("view", &self.view)
            .field("form", &self.form)
            .field("has_processor", &self.processor.is_some())
            .finish()
    }
}
