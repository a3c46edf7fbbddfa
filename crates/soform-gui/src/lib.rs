//! Soform GUI - forms and grids bound to beans
//!
//! This crate binds the members resolved by `soform-core` to widgets and
//! keeps the two in step.
//!
//! # Architecture
//!
//! Composition instead of a class hierarchy:
//! - **Form**: discovers fields, creates widgets and owns a binding engine
//! - **BindingEngine**: loads, validates and commits member values
//! - **GridColumnBuilder**: collects and builds the columns of a grid
//! - **View**: the `created → executing → closed/aborted` lifecycle
//!
//! Customization happens through hook traits ([`FormHooks`],
//! [`GridHooks`]) whose methods return `None` when they have no opinion.
//!
//! # Core Components
//!
//! - [`Form`]: two-phase (declare, then materialize) bean form
//! - [`DataForm`]: a form in a view, finished with OK or Cancel
//! - [`DataGrid`]: rows of beans rendered through generated columns
//! - [`Environment`]: configuration, widget factory and ID generator
//! - [`Application`]: owns the environment and tracks running views
//! - [`UiQueue`] / [`AccessHandle`]: hand-off from background threads

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for GUI operations
pub mod error;

/// Listener registries with removable IDs
pub mod listener;

/// Concrete value widgets
pub mod widgets;

/// Widget creation by value type
pub mod factory;

/// Shared configuration and services
pub mod environment;

/// Containers that lay out a form's widgets
pub mod container;

/// Members and the ordered registry
pub mod registry;

/// Form customization hooks
pub mod hooks;

/// Load, validate and commit
pub mod binding;

/// Bean-backed forms
pub mod form;

/// Forms hosted in a view
pub mod data_form;

/// Grid column construction and rendering
pub mod grid;

/// Grids of bean rows
pub mod data_grid;

/// View lifecycle
pub mod view;

/// Application context
pub mod application;

/// Background-to-UI hand-off
pub mod access;

pub use access::{spawn_background, AccessHandle, UiQueue, UiTask};
pub use application::Application;
pub use binding::{BindingEngine, ErrorDisplay, StatusLabel};
pub use container::{FieldContainer, FormLayout};
pub use data_form::{DataForm, Processor};
pub use data_grid::{DataGrid, HasColumns};
pub use environment::Environment;
pub use error::{GuiError, GuiResult};
pub use factory::{DefaultWidgetFactory, WidgetFactory};
pub use form::Form;
pub use grid::{escape_html, CellContent, Column, GridColumnBuilder, GridHooks, NoGridHooks, Renderer};
pub use hooks::{ChangedValues, FormHooks, NoHooks};
pub use listener::{ListenerId, ListenerRegistry};
pub use registry::{Member, MemberBinding, MemberRegistry, MemberState, Validator};
pub use view::{View, ViewEvent, ViewState};
pub use widgets::{FieldKind, InputField};

pub use soform_core::{widget_ref, Value, ValueType, Widget, WidgetRef};
