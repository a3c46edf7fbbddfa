//! soform core - values, bean schemas and member resolution
//!
//! This crate holds everything the binding engine needs that is not tied to
//! a concrete widget set: the dynamic [`Value`] exchanged between beans and
//! widgets, declarative bean schemas, and the layered resolver that turns a
//! member name into a getter and setter.
//!
//! # Architecture
//!
//! Rust has no runtime reflection, so a bean type is described by a
//! [`BeanType`]: a name, an ordered [`MethodTable`] of typed getters and
//! setters, an optional parent type and an optional instance factory.
//! Forms and grids contribute further method tables (an auxiliary method
//! host, the form or grid object itself, a creator), and the
//! [`MemberResolver`] asks them in a fixed order.
//!
//! # Core Components
//!
//! - [`Value`] / [`ValueType`]: dynamic values and declared member types
//! - [`BeanType`]: static schema of a bean struct
//! - [`MemberResolver`]: ordered fallback resolution with caching
//! - [`FieldCreator`] / [`ColumnCreator`]: application-wide customization
//! - [`Widget`]: the value-holding capability bound to each member
//! - [`EnvironmentConfig`]: TOML configuration shared by forms and grids
//! - [`IdGenerator`]: process-scoped identifiers, passed explicitly

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for resolution, mutation and configuration
pub mod error;

/// Dynamic values and declared types
pub mod value;

/// Member and method naming conventions
pub mod naming;

/// Bean schemas and method tables
pub mod bean;

/// Layered member resolution
pub mod resolver;

/// Field and column creators
pub mod creator;

/// Widget capability
pub mod widget;

/// Environment configuration
pub mod config;

/// Identifier generation
pub mod id;

/// Fixtures shared by tests across the workspace
pub mod testutil;

// Re-exports for convenience
pub use bean::{BeanType, Getter, InstanceFactory, Method, MethodOrigin, MethodTable, Setter};
pub use config::{ConfigError, EnvironmentConfig};
pub use creator::{ColumnCreator, DefaultColumnCreator, DefaultFieldCreator, FieldCreator, TextAlign};
pub use error::{BindError, BindResult, SetError};
pub use id::IdGenerator;
pub use naming::create_label;
pub use resolver::{
    AccessorStrategy, BeanTypeStrategy, ExplicitAccessors, MemberResolver, MethodTableStrategy,
    ResolutionSource, ResolvedMember,
};
pub use value::{Value, ValueType};
pub use widget::{same_widget, widget_ref, Widget, WidgetRef};
