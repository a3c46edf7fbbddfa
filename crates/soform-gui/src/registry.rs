//! Ordered, name-keyed set of bound members
//!
//! Each [`Member`] ties a widget to the getter and setter resolved for its
//! name. The registry keeps members in display order and forwards every
//! addition and removal to the form's [`FieldContainer`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use soform_core::{same_widget, Getter, Setter, Value, ValueType, WidgetRef};

use crate::container::FieldContainer;

/// Where a member's value lives
pub enum MemberBinding<B> {
    /// Read and written through bean accessors
    Bean {
        getter: Getter<B>,
        setter: Option<Setter<B>>,
    },
    /// Kept in the engine's value map; used for fields with no accessor
    Stored,
}

impl<B> MemberBinding<B> {
    /// Whether commit can write this member
    #[must_use]
    pub fn is_writable(&self) -> bool {
        match self {
            MemberBinding::Bean { setter, .. } => setter.is_some(),
            MemberBinding::Stored => true,
        }
    }
}

impl<B> Clone for MemberBinding<B> {
    fn clone(&self) -> Self {
        match self {
            MemberBinding::Bean { getter, setter } => MemberBinding::Bean {
                getter: Rc::clone(getter),
                setter: setter.clone(),
            },
            MemberBinding::Stored => MemberBinding::Stored,
        }
    }
}

/// Lifecycle of a registered member
///
/// Members enter the registry already resolved and bound to a widget.
/// `Error` is left only through an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberState {
    WidgetBound,
    Loaded,
    Committed,
    Error,
}

/// A check applied to a widget value before commit
#[derive(Clone)]
pub struct Validator {
    check: Rc<dyn Fn(&Value) -> bool>,
    message: Option<String>,
}

impl Validator {
    /// Create a validator; without a message the generic "not valid" text is used
    pub fn new(check: impl Fn(&Value) -> bool + 'static, message: Option<String>) -> Self {
        Self {
            check: Rc::new(check),
            message,
        }
    }

    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        (self.check)(value)
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// A widget bound to a member name
pub struct Member<B> {
    name: String,
    label: String,
    widget: WidgetRef,
    binding: MemberBinding<B>,
    value_type: Option<ValueType>,
    pub(crate) required: bool,
    pub(crate) required_message: Option<String>,
    pub(crate) validators: Vec<Validator>,
    pub(crate) order: i32,
    pub(crate) visible: bool,
    pub(crate) editable: bool,
    pub(crate) state: MemberState,
    pub(crate) error: Option<String>,
}

impl<B> Member<B> {
    /// Create a member in the widget-bound state
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        widget: WidgetRef,
        binding: MemberBinding<B>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            widget,
            binding,
            value_type: None,
            required: false,
            required_message: None,
            validators: Vec::new(),
            order: i32::MAX,
            visible: true,
            editable: true,
            state: MemberState::WidgetBound,
            error: None,
        }
    }

    #[must_use]
    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn widget(&self) -> &WidgetRef {
        &self.widget
    }

    #[must_use]
    pub fn binding(&self) -> &MemberBinding<B> {
        &self.binding
    }

    #[must_use]
    pub fn value_type(&self) -> Option<ValueType> {
        self.value_type
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn order(&self) -> i32 {
        self.order
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    #[must_use]
    pub fn state(&self) -> MemberState {
        self.state
    }

    /// Message of the last validation or setter failure
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<B> fmt::Debug for Member<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("writable", &self.binding.is_writable())
            .field("required", &self.required)
            .field("order", &self.order)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Members of one form, in display order
pub struct MemberRegistry<B> {
    members: Vec<Member<B>>,
    container: Option<Rc<RefCell<dyn FieldContainer>>>,
}

impl<B> MemberRegistry<B> {
    /// Create a registry that is not attached to a container
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            container: None,
        }
    }

    /// Create a registry that attaches widgets to `container`
    #[must_use]
    pub fn with_container(container: Rc<RefCell<dyn FieldContainer>>) -> Self {
        Self {
            members: Vec::new(),
            container: Some(container),
        }
    }

    /// Add a member after the last member whose order is not greater
    ///
    /// A member with the same name is replaced in place and returned.
    pub fn add(&mut self, member: Member<B>) -> Option<Member<B>> {
        if let Some(i) = self.index_of(&member.name) {
            let old = std::mem::replace(&mut self.members[i], member);
            self.detach(&old);
            self.attach(i);
            return Some(old);
        }
        let at = self
            .members
            .iter()
            .rposition(|m| m.order <= member.order)
            .map_or(0, |i| i + 1);
        self.members.insert(at, member);
        self.attach(at);
        None
    }

    /// Remove a member by name; removing twice is harmless
    pub fn remove(&mut self, name: &str) -> Option<Member<B>> {
        let i = self.index_of(name)?;
        let member = self.members.remove(i);
        self.detach(&member);
        Some(member)
    }

    /// Remove the member bound to `widget`
    pub fn remove_widget(&mut self, widget: &WidgetRef) -> Option<Member<B>> {
        let i = self
            .members
            .iter()
            .position(|m| same_widget(&m.widget, widget))?;
        let member = self.members.remove(i);
        self.detach(&member);
        Some(member)
    }

    /// Widget bound to `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&WidgetRef> {
        self.member(name).map(|m| &m.widget)
    }

    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member<B>> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn member_mut(&mut self, name: &str) -> Option<&mut Member<B>> {
        self.members.iter_mut().find(|m| m.name == name)
    }

    /// Name under which `widget` is registered
    #[must_use]
    pub fn name_of(&self, widget: &WidgetRef) -> Option<&str> {
        self.members
            .iter()
            .find(|m| same_widget(&m.widget, widget))
            .map(|m| m.name.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Member names in display order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.members.iter().map(|m| m.name.clone()).collect()
    }

    /// Widgets in display order
    #[must_use]
    pub fn widgets(&self) -> Vec<WidgetRef> {
        self.members.iter().map(|m| Rc::clone(&m.widget)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member<B>> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Member<B>> {
        self.members.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|m| m.name == name)
    }

    fn attach(&self, index: usize) {
        if let Some(container) = &self.container {
            let member = &self.members[index];
            container
                .borrow_mut()
                .attach(index, &member.name, &member.widget);
        }
    }

    fn detach(&self, member: &Member<B>) {
        if let Some(container) = &self.container {
            container.borrow_mut().detach(&member.name, &member.widget);
        }
    }
}

impl<B> Default for MemberRegistry<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> fmt::Debug for MemberRegistry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberRegistry")
            .field("members", &self.members)
            .field("has_container", &self.container.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::FormLayout;
    use crate::widgets::InputField;
    use soform_core::testutil::Person;
    use soform_core::widget_ref;

    fn stored(name: &str, order: i32) -> Member<Person> {
        Member::new(
            name,
            name,
            widget_ref(InputField::text(name)),
            MemberBinding::Stored,
        )
        .with_order(order)
    }

    #[test]
    fn test_insertion_order_with_equal_orders() {
        let mut registry = MemberRegistry::new();
        registry.add(stored("c", 0));
        registry.add(stored("a", 0));
        registry.add(stored("b", 0));
        assert_eq!(registry.names(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_order_key_places_members() {
        let mut registry = MemberRegistry::new();
        registry.add(stored("c", 2));
        registry.add(stored("a", 0));
        registry.add(stored("b", 1));
        assert_eq!(registry.names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_readd_replaces_in_place() {
        let mut registry = MemberRegistry::new();
        registry.add(stored("a", 0));
        registry.add(stored("b", 0));
        let replacement = stored("a", 0);
        let new_widget = Rc::clone(replacement.widget());
        assert!(registry.add(replacement).is_some());
        assert_eq!(registry.names(), vec!["a", "b"]);
        assert!(same_widget(registry.get("a").unwrap(), &new_widget));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut registry = MemberRegistry::new();
        registry.add(stored("a", 0));
        assert!(registry.remove("a").is_some());
        assert!(registry.remove("a").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_lookup_by_widget() {
        let mut registry = MemberRegistry::new();
        let member = stored("a", 0);
        let widget = Rc::clone(member.widget());
        registry.add(member);
        assert_eq!(registry.name_of(&widget), Some("a"));
        assert!(registry.remove_widget(&widget).is_some());
        assert!(registry.name_of(&widget).is_none());
    }

    #[test]
    fn test_container_follows_registry() {
        let layout = Rc::new(RefCell::new(FormLayout::new(2)));
        let mut registry: MemberRegistry<Person> = MemberRegistry::with_container(layout.clone());
        registry.add(stored("a", 0));
        registry.add(stored("b", 0));
        assert_eq!(layout.borrow().child_names(), vec!["a", "b"]);
        registry.add(stored("first", -1));
        assert_eq!(layout.borrow().child_names(), vec!["first", "a", "b"]);
        registry.remove("a");
        assert_eq!(layout.borrow().child_names(), vec!["first", "b"]);
    }

    #[test]
    fn test_validator() {
        let v = Validator::new(|value| value.as_int().is_some_and(|n| n > 0), None);
        assert!(v.accepts(&Value::Int(3)));
        assert!(!v.accepts(&Value::Int(0)));
        assert!(v.message().is_none());
    }
}
