//! Layered member resolution
//!
//! A member name is resolved to a getter (and, when one pairs with it, a
//! setter) by asking a fixed sequence of strategies. The first strategy that
//! finds a getter wins; getters and setters are never combined across levels.
//!
//! | level | strategy |
//! |-------|----------|
//! | 1 | explicit accessors registered for the exact name |
//! | 2 | the method table published by a field or column creator |
//! | 3 | the auxiliary method host |
//! | 4 | the form or grid object itself |
//! | 5 | the bean type, walking up to its parents |

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{trace, warn};

use crate::bean::{BeanType, Getter, MethodOrigin, MethodTable, Setter};
use crate::error::{BindError, BindResult};
use crate::naming::{getter_candidates, setter_name};
use crate::value::ValueType;

/// Level that produced a resolved member, in lookup order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResolutionSource {
    Explicit,
    Creator,
    MethodHost,
    Owner,
    BeanType,
}

/// Getter and optional setter resolved for a member name
pub struct ResolvedMember<B> {
    name: String,
    getter: Getter<B>,
    setter: Option<Setter<B>>,
    value_type: ValueType,
    source: ResolutionSource,
}

impl<B> ResolvedMember<B> {
    pub fn new(
        name: impl Into<String>,
        getter: Getter<B>,
        setter: Option<Setter<B>>,
        value_type: ValueType,
        source: ResolutionSource,
    ) -> Self {
        Self {
            name: name.into(),
            getter,
            setter,
            value_type,
            source,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn getter(&self) -> Getter<B> {
        Rc::clone(&self.getter)
    }

    #[must_use]
    pub fn setter(&self) -> Option<Setter<B>> {
        self.setter.clone()
    }

    /// A member without a setter can only be displayed
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    #[must_use]
    pub fn source(&self) -> ResolutionSource {
        self.source
    }
}

impl<B> Clone for ResolvedMember<B> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            getter: Rc::clone(&self.getter),
            setter: self.setter.clone(),
            value_type: self.value_type,
            source: self.source,
        }
    }
}

impl<B> fmt::Debug for ResolvedMember<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedMember")
            .field("name", &self.name)
            .field("writable", &self.setter.is_some())
            .field("value_type", &self.value_type)
            .field("source", &self.source)
            .finish()
    }
}

/// One level of the resolution chain
pub trait AccessorStrategy<B> {
    /// Which level this strategy occupies
    fn source(&self) -> ResolutionSource;

    /// Resolve `name`, or `None` to fall through to the next level
    fn resolve(&self, name: &str) -> Option<ResolvedMember<B>>;
}

struct ExplicitEntry<B> {
    getter: Getter<B>,
    setter: Option<Setter<B>>,
    value_type: ValueType,
}

/// Accessors registered by name; the first registration for a name wins
pub struct ExplicitAccessors<B> {
    entries: HashMap<String, ExplicitEntry<B>>,
}

impl<B> ExplicitAccessors<B> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register accessors; returns `false` if `name` was already registered
    pub fn insert(
        &mut self,
        name: &str,
        getter: Getter<B>,
        setter: Option<Setter<B>>,
        value_type: ValueType,
    ) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        self.entries.insert(
            name.to_string(),
            ExplicitEntry {
                getter,
                setter,
                value_type,
            },
        );
        true
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl<B> Default for ExplicitAccessors<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> AccessorStrategy<B> for ExplicitAccessors<B> {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::Explicit
    }

    fn resolve(&self, name: &str) -> Option<ResolvedMember<B>> {
        let entry = self.entries.get(name)?;
        Some(ResolvedMember::new(
            name,
            Rc::clone(&entry.getter),
            entry.setter.clone(),
            entry.value_type,
            ResolutionSource::Explicit,
        ))
    }
}

/// Looks a member up in a [`MethodTable`] using the getter naming convention
pub struct MethodTableStrategy<B> {
    source: ResolutionSource,
    table: Rc<MethodTable<B>>,
    reject_base: bool,
}

impl<B> MethodTableStrategy<B> {
    /// Methods published by a field or column creator; base implementations
    /// are skipped so that only deliberate overrides take effect
    #[must_use]
    pub fn creator(table: Rc<MethodTable<B>>) -> Self {
        Self {
            source: ResolutionSource::Creator,
            table,
            reject_base: true,
        }
    }

    /// Methods of an auxiliary host object
    #[must_use]
    pub fn method_host(table: Rc<MethodTable<B>>) -> Self {
        Self {
            source: ResolutionSource::MethodHost,
            table,
            reject_base: false,
        }
    }

    /// Methods of the form or grid object itself
    #[must_use]
    pub fn owner(table: Rc<MethodTable<B>>) -> Self {
        Self {
            source: ResolutionSource::Owner,
            table,
            reject_base: false,
        }
    }

    fn accepts(&self, origin: MethodOrigin) -> bool {
        !(self.reject_base && origin == MethodOrigin::Base)
    }
}

impl<B> AccessorStrategy<B> for MethodTableStrategy<B> {
    fn source(&self) -> ResolutionSource {
        self.source
    }

    fn resolve(&self, name: &str) -> Option<ResolvedMember<B>> {
        for candidate in getter_candidates(name) {
            let Some(method) = self.table.find_getter(&candidate) else {
                continue;
            };
            if !self.accepts(method.origin()) {
                warn!(member = name, method = %candidate, "ignoring base implementation");
                continue;
            }
            let getter = method.as_getter()?;
            let setter = self
                .table
                .find_setter(&setter_name(name), method.value_type())
                .filter(|s| self.accepts(s.origin()))
                .and_then(|s| s.as_setter());
            return Some(ResolvedMember::new(
                name,
                getter,
                setter,
                method.value_type(),
                self.source,
            ));
        }
        None
    }
}

/// Looks a member up on the bean type and its parents
pub struct BeanTypeStrategy<B> {
    bean_type: Rc<BeanType<B>>,
}

impl<B> BeanTypeStrategy<B> {
    #[must_use]
    pub fn new(bean_type: Rc<BeanType<B>>) -> Self {
        Self { bean_type }
    }
}

impl<B: 'static> AccessorStrategy<B> for BeanTypeStrategy<B> {
    fn source(&self) -> ResolutionSource {
        ResolutionSource::BeanType
    }

    fn resolve(&self, name: &str) -> Option<ResolvedMember<B>> {
        getter_candidates(name).iter().find_map(|candidate| {
            let method = self.bean_type.find_getter(candidate)?;
            let setter = self
                .bean_type
                .find_setter(&setter_name(name), method.value_type())
                .and_then(|s| s.as_setter());
            Some(ResolvedMember::new(
                name,
                method.as_getter()?,
                setter,
                method.value_type(),
                ResolutionSource::BeanType,
            ))
        })
    }
}

/// Resolves member names through the ordered strategy chain and caches the
/// outcome, misses included, for the lifetime of the resolver
pub struct MemberResolver<B> {
    bean_type: Rc<BeanType<B>>,
    explicit: ExplicitAccessors<B>,
    strategies: Vec<Box<dyn AccessorStrategy<B>>>,
    cache: RefCell<HashMap<String, Option<ResolvedMember<B>>>>,
}

impl<B: 'static> MemberResolver<B> {
    /// Create a resolver that initially only consults the bean type
    #[must_use]
    pub fn new(bean_type: Rc<BeanType<B>>) -> Self {
        let strategies: Vec<Box<dyn AccessorStrategy<B>>> =
            vec![Box::new(BeanTypeStrategy::new(Rc::clone(&bean_type)))];
        Self {
            bean_type,
            explicit: ExplicitAccessors::new(),
            strategies,
            cache: RefCell::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn bean_type(&self) -> &Rc<BeanType<B>> {
        &self.bean_type
    }

    /// Install a strategy at its level, replacing any strategy already there
    pub fn set_strategy(&mut self, strategy: Box<dyn AccessorStrategy<B>>) {
        let source = strategy.source();
        self.strategies.retain(|s| s.source() != source);
        let at = self
            .strategies
            .iter()
            .position(|s| s.source() > source)
            .unwrap_or(self.strategies.len());
        self.strategies.insert(at, strategy);
    }

    /// Register explicit accessors for `name`
    ///
    /// Returns `false` when `name` already has explicit accessors or has
    /// already been resolved elsewhere; the earlier binding stays in force.
    pub fn add_explicit(
        &mut self,
        name: &str,
        getter: Getter<B>,
        setter: Option<Setter<B>>,
        value_type: ValueType,
    ) -> bool {
        let mut cache = self.cache.borrow_mut();
        if matches!(cache.get(name), Some(Some(_))) {
            return false;
        }
        if !self.explicit.insert(name, getter, setter, value_type) {
            return false;
        }
        cache.remove(name);
        true
    }

    #[must_use]
    pub fn has_explicit(&self, name: &str) -> bool {
        self.explicit.contains(name)
    }

    /// Resolve a member's getter and setter; a miss is not an error
    pub fn resolve(&self, name: &str) -> Option<ResolvedMember<B>> {
        if let Some(cached) = self.cache.borrow().get(name) {
            return cached.clone();
        }
        let resolved = self.resolve_uncached(name);
        if resolved.is_none() {
            trace!(member = name, bean = self.bean_type.name(), "member not resolved");
        }
        self.cache
            .borrow_mut()
            .insert(name.to_string(), resolved.clone());
        resolved
    }

    /// Resolve only the setter for `name`
    pub fn resolve_setter(&self, name: &str) -> Option<Setter<B>> {
        self.resolve(name)?.setter()
    }

    /// Resolve a member that must exist
    pub fn require(&self, name: &str) -> BindResult<ResolvedMember<B>> {
        self.resolve(name)
            .ok_or_else(|| BindError::MemberNotFound(name.to_string()))
    }

    fn resolve_uncached(&self, name: &str) -> Option<ResolvedMember<B>> {
        if let Some(member) = self.explicit.resolve(name) {
            return Some(member);
        }
        self.strategies
            .iter()
            .find_map(|strategy| strategy.resolve(name))
    }
}

impl<B> fmt::Debug for MemberResolver<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources: Vec<_> = self.strategies.iter().map(|s| s.source()).collect();
        f.debug_struct("MemberResolver")
            .field("bean_type", &self.bean_type.name())
            .field("strategies", &sources)
            .field("cached", &self.cache.borrow().len())
            .finish()
    }
}
