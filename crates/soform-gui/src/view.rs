//! View lifecycle
//!
//! A view moves from `Created` to `Executing` when it is shown, and ends in
//! either `Closed` (normal completion) or `Aborted` (cancelled). Executing
//! a view whose caption or component is missing is a programming error and
//! is reported immediately.

use std::fmt;

use tracing::info;

use crate::error::{GuiError, GuiResult};
use crate::listener::{ListenerId, ListenerRegistry};

/// Lifecycle state of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Built but not shown yet
    Created,
    /// Currently shown
    Executing,
    /// Finished normally
    Closed,
    /// Cancelled
    Aborted,
}

impl ViewState {
    /// Whether the view has reached a final state
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Closed | Self::Aborted)
    }
}

/// Passed to opened and closed listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEvent {
    pub caption: String,
    pub state: ViewState,
}

/// A captioned, executable unit of UI
pub struct View {
    caption: String,
    state: ViewState,
    has_component: bool,
    listeners: ListenerRegistry<ViewEvent>,
}

impl View {
    #[must_use]
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            state: ViewState::Created,
            has_component: false,
            listeners: ListenerRegistry::new(),
        }
    }

    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    #[must_use]
    pub fn is_executing(&self) -> bool {
        self.state == ViewState::Executing
    }

    /// Mark that the view's content has been set
    pub fn set_component(&mut self, present: bool) {
        self.has_component = present;
    }

    #[must_use]
    pub fn has_component(&self) -> bool {
        self.has_component
    }

    /// Show the view
    ///
    /// Executing an executing view does nothing. A finished view may be
    /// executed again.
    pub fn execute(&mut self) -> GuiResult<()> {
        if self.caption.trim().is_empty() {
            return Err(GuiError::CaptionNotSet);
        }
        if !self.has_component {
            return Err(GuiError::ComponentNotSet(self.caption.clone()));
        }
        if self.state == ViewState::Executing {
            return Ok(());
        }
        self.state = ViewState::Executing;
        info!(caption = %self.caption, "view executing");
        self.listeners.fire(&self.event());
        Ok(())
    }

    /// Finish normally; returns false if the view was not executing
    pub fn close(&mut self) -> bool {
        self.finish(ViewState::Closed)
    }

    /// Cancel; returns false if the view was not executing
    pub fn abort(&mut self) -> bool {
        self.finish(ViewState::Aborted)
    }

    fn finish(&mut self, state: ViewState) -> bool {
        if self.state != ViewState::Executing {
            return false;
        }
        self.state = state;
        info!(caption = %self.caption, ?state, "view finished");
        self.listeners.fire(&self.event());
        true
    }

    fn event(&self) -> ViewEvent {
        ViewEvent {
            caption: self.caption.clone(),
            state: self.state,
        }
    }

    pub fn on_opened(&mut self, listener: impl Fn(&ViewEvent) + 'static) -> ListenerId {
        self.listeners.register(move |e: &ViewEvent| {
            if e.state == ViewState::Executing {
                listener(e);
            }
        })
    }

    /// Fires on close and on abort
    pub fn on_closed(&mut self, listener: impl Fn(&ViewEvent) + 'static) -> ListenerId {
        self.listeners.register(move |e: &ViewEvent| {
            if e.state.is_finished() {
                listener(e);
            }
        })
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.unregister(id)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("caption", &self.caption)
            .field("state", &self.state)
            .field("has_component", &self.has_component)
            .finish_non_exhaustive()
    }
}
