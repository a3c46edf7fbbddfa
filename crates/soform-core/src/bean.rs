//! Bean schemas: named, typed getters and setters over a Rust struct
//!
//! Rust has no runtime reflection, so a bean type declares its accessible
//! members up front as a [`MethodTable`]. The same table type describes the
//! extra methods a form, a grid or an auxiliary method host contributes.

use std::fmt;
use std::rc::Rc;

use crate::error::SetError;
use crate::naming::{capitalize, member_name_of};
use crate::value::{Value, ValueType};

/// Reads a member value from a bean
pub type Getter<B> = Rc<dyn Fn(&B) -> Value>;

/// Writes a member value into a bean
pub type Setter<B> = Rc<dyn Fn(&mut B, Value) -> Result<(), SetError>>;

/// Creates fresh bean instances
pub type InstanceFactory<B> = Rc<dyn Fn() -> Option<B>>;

/// Where a method comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodOrigin {
    /// Declared by application code
    Declared,
    /// Supplied by a default base implementation (never selected by a
    /// creator lookup)
    Base,
}

/// Callable part of a method
pub enum MethodBody<B> {
    Getter(Getter<B>),
    Setter(Setter<B>),
}

impl<B> Clone for MethodBody<B> {
    fn clone(&self) -> Self {
        match self {
            MethodBody::Getter(g) => MethodBody::Getter(Rc::clone(g)),
            MethodBody::Setter(s) => MethodBody::Setter(Rc::clone(s)),
        }
    }
}

/// A named method: getters return `value_type`, setters accept it
pub struct Method<B> {
    name: String,
    body: MethodBody<B>,
    value_type: ValueType,
    origin: MethodOrigin,
}

impl<B> Method<B> {
    /// Create a getter method
    pub fn getter(
        name: impl Into<String>,
        value_type: ValueType,
        f: impl Fn(&B) -> Value + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            body: MethodBody::Getter(Rc::new(f)),
            value_type,
            origin: MethodOrigin::Declared,
        }
    }

    /// Create a setter method
    pub fn setter(
        name: impl Into<String>,
        value_type: ValueType,
        f: impl Fn(&mut B, Value) -> Result<(), SetError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            body: MethodBody::Setter(Rc::new(f)),
            value_type,
            origin: MethodOrigin::Declared,
        }
    }

    /// Mark this method as coming from a default base implementation
    #[must_use]
    pub fn from_base(mut self) -> Self {
        self.origin = MethodOrigin::Base;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    #[must_use]
    pub fn origin(&self) -> MethodOrigin {
        self.origin
    }

    #[must_use]
    pub fn body(&self) -> &MethodBody<B> {
        &self.body
    }

    /// The getter closure, if this is a getter
    #[must_use]
    pub fn as_getter(&self) -> Option<Getter<B>> {
        match &self.body {
            MethodBody::Getter(g) => Some(Rc::clone(g)),
            MethodBody::Setter(_) => None,
        }
    }

    /// The setter closure, if this is a setter
    #[must_use]
    pub fn as_setter(&self) -> Option<Setter<B>> {
        match &self.body {
            MethodBody::Setter(s) => Some(Rc::clone(s)),
            MethodBody::Getter(_) => None,
        }
    }
}

impl<B> Clone for Method<B> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            body: self.body.clone(),
            value_type: self.value_type,
            origin: self.origin,
        }
    }
}

impl<B> fmt::Debug for Method<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.body {
            MethodBody::Getter(_) => "getter",
            MethodBody::Setter(_) => "setter",
        };
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("kind", &kind)
            .field("value_type", &self.value_type)
            .field("origin", &self.origin)
            .finish()
    }
}

/// Ordered collection of methods, looked up by exact name
pub struct MethodTable<B> {
    methods: Vec<Method<B>>,
}

impl<B> MethodTable<B> {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self {
            methods: Vec::new(),
        }
    }

    /// Add a method; an existing method with the same name and kind is kept
    pub fn insert(&mut self, method: Method<B>) {
        let duplicate = self.methods.iter().any(|m| {
            m.name == method.name
                && std::mem::discriminant(&m.body) == std::mem::discriminant(&method.body)
        });
        if !duplicate {
            self.methods.push(method);
        }
    }

    /// Builder form of [`MethodTable::insert`] for a getter
    #[must_use]
    pub fn with_getter(
        mut self,
        name: impl Into<String>,
        value_type: ValueType,
        f: impl Fn(&B) -> Value + 'static,
    ) -> Self {
        self.insert(Method::getter(name, value_type, f));
        self
    }

    /// Builder form of [`MethodTable::insert`] for a setter
    #[must_use]
    pub fn with_setter(
        mut self,
        name: impl Into<String>,
        value_type: ValueType,
        f: impl Fn(&mut B, Value) -> Result<(), SetError> + 'static,
    ) -> Self {
        self.insert(Method::setter(name, value_type, f));
        self
    }

    /// Builder form of [`MethodTable::insert`]
    #[must_use]
    pub fn with_method(mut self, method: Method<B>) -> Self {
        self.insert(method);
        self
    }

    /// Find a getter by exact method name
    #[must_use]
    pub fn find_getter(&self, name: &str) -> Option<&Method<B>> {
        self.methods
            .iter()
            .find(|m| m.name == name && matches!(m.body, MethodBody::Getter(_)))
    }

    /// Find a setter by exact method name whose parameter accepts `value_type`
    #[must_use]
    pub fn find_setter(&self, name: &str, value_type: ValueType) -> Option<&Method<B>> {
        self.methods.iter().find(|m| {
            m.name == name
                && matches!(m.body, MethodBody::Setter(_))
                && m.value_type.is_assignable_from(value_type)
        })
    }

    /// Iterate over methods in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Method<B>> {
        self.methods.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<B> Default for MethodTable<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> fmt::Debug for MethodTable<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.methods.iter()).finish()
    }
}

/// Static schema of a bean struct
///
/// # Example
///
/// ```
/// use soform_core::{BeanType, Value, ValueType};
///
/// #[derive(Default)]
/// struct Item { title: String }
///
/// let item_type = BeanType::<Item>::new("Item")
///     .with_default_factory()
///     .property(
///         "Title",
///         ValueType::String,
///         |i| Value::string(&i.title),
///         |i, v| { i.title = v.to_string(); Ok(()) },
///     );
/// assert_eq!(item_type.getter_names(), vec!["Title".to_string()]);
/// ```
pub struct BeanType<B> {
    name: String,
    methods: MethodTable<B>,
    parent: Option<Rc<BeanType<B>>>,
    factory: Option<InstanceFactory<B>>,
}

impl<B: 'static> BeanType<B> {
    /// Create a schema with no methods
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: MethodTable::new(),
            parent: None,
            factory: None,
        }
    }

    /// Create a schema that inherits the methods of `parent`
    pub fn extending(name: impl Into<String>, parent: Rc<BeanType<B>>) -> Self {
        let factory = parent.factory.clone();
        Self {
            name: name.into(),
            methods: MethodTable::new(),
            parent: Some(parent),
            factory,
        }
    }

    /// Use `factory` to create instances on demand
    #[must_use]
    pub fn with_factory(mut self, factory: impl Fn() -> Option<B> + 'static) -> Self {
        self.factory = Some(Rc::new(factory));
        self
    }

    /// Create instances with `B::default()`
    #[must_use]
    pub fn with_default_factory(self) -> Self
    where
        B: Default,
    {
        self.with_factory(|| Some(B::default()))
    }

    /// Declare a getter method
    #[must_use]
    pub fn getter(
        mut self,
        name: impl Into<String>,
        value_type: ValueType,
        f: impl Fn(&B) -> Value + 'static,
    ) -> Self {
        self.methods.insert(Method::getter(name, value_type, f));
        self
    }

    /// Declare a setter method
    #[must_use]
    pub fn setter(
        mut self,
        name: impl Into<String>,
        value_type: ValueType,
        f: impl Fn(&mut B, Value) -> Result<(), SetError> + 'static,
    ) -> Self {
        self.methods.insert(Method::setter(name, value_type, f));
        self
    }

    /// Declare a read-write property: `get<Name>` (`is<Name>` for booleans)
    /// plus `set<Name>`
    #[must_use]
    pub fn property(
        self,
        name: &str,
        value_type: ValueType,
        get: impl Fn(&B) -> Value + 'static,
        set: impl Fn(&mut B, Value) -> Result<(), SetError> + 'static,
    ) -> Self {
        let cap = capitalize(name);
        self.read_only_property(name, value_type, get)
            .setter(format!("set{cap}"), value_type, set)
    }

    /// Declare a property that only has a getter
    #[must_use]
    pub fn read_only_property(
        self,
        name: &str,
        value_type: ValueType,
        get: impl Fn(&B) -> Value + 'static,
    ) -> Self {
        let prefix = if value_type == ValueType::Bool { "is" } else { "get" };
        self.getter(format!("{prefix}{}", capitalize(name)), value_type, get)
    }
}

impl<B> BeanType<B> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Rc<BeanType<B>>> {
        self.parent.as_ref()
    }

    /// Methods declared directly on this type
    #[must_use]
    pub fn methods(&self) -> &MethodTable<B> {
        &self.methods
    }

    /// Find a getter on this type or the nearest parent declaring it
    #[must_use]
    pub fn find_getter(&self, name: &str) -> Option<&Method<B>> {
        self.methods
            .find_getter(name)
            .or_else(|| self.parent.as_ref()?.find_getter(name))
    }

    /// Find a compatible setter on this type or its parents
    #[must_use]
    pub fn find_setter(&self, name: &str, value_type: ValueType) -> Option<&Method<B>> {
        self.methods
            .find_setter(name, value_type)
            .or_else(|| self.parent.as_ref()?.find_setter(name, value_type))
    }

    /// Member names exposed by getters, own methods first, then inherited
    #[must_use]
    pub fn getter_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut current = Some(self);
        while let Some(bean_type) = current {
            for method in bean_type.methods.iter() {
                if !matches!(method.body, MethodBody::Getter(_)) {
                    continue;
                }
                if let Some(member) = member_name_of(&method.name) {
                    if !names.iter().any(|n| n == member) {
                        names.push(member.to_string());
                    }
                }
            }
            current = bean_type.parent.as_deref();
        }
        names
    }

    /// The instance factory, if one was declared
    #[must_use]
    pub fn factory(&self) -> Option<InstanceFactory<B>> {
        self.factory.clone()
    }

    /// Create a new instance through the factory
    #[must_use]
    pub fn create_instance(&self) -> Option<B> {
        self.factory.as_ref().and_then(|f| f())
    }
}

impl<B> fmt::Debug for BeanType<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanType")
            .field("name", &self.name)
            .field("methods", &self.methods)
            .field("parent", &self.parent.as_ref().map(|p| p.name.clone()))
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}
