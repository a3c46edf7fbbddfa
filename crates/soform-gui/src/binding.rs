//! Two-way value flow between a bean and its widgets
//!
//! The [`BindingEngine`] owns the bound bean and the member registry. It
//! loads widget values from getters, validates and commits them back through
//! setters, keeps connected fields in step and decides which widgets are
//! editable.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use soform_core::{BindError, InstanceFactory, Value};
use tracing::{debug, warn};

use crate::environment::Environment;
use crate::error::{GuiError, GuiResult};
use crate::hooks::{ChangedValues, FormHooks};
use crate::listener::{ListenerId, ListenerRegistry};
use crate::registry::{Member, MemberBinding, MemberRegistry, MemberState, Validator};

/// Where form-level error messages are shown
pub trait ErrorDisplay {
    /// Show `text`, or clear the display with `None`
    fn set_text(&mut self, text: Option<&str>);

    fn text(&self) -> Option<String>;
}

/// Error display that keeps the current message
#[derive(Debug, Default, Clone)]
pub struct StatusLabel {
    text: Option<String>,
}

impl ErrorDisplay for StatusLabel {
    fn set_text(&mut self, text: Option<&str>) {
        self.text = text.map(str::to_string);
    }

    fn text(&self) -> Option<String> {
        self.text.clone()
    }
}

/// Widget refresh waiting for the container to be realized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    Load,
    Clear,
}

/// Binds a registry of widgets to one bean instance
pub struct BindingEngine<B> {
    registry: MemberRegistry<B>,
    bean: Option<B>,
    bean_type_name: String,
    factory: Option<InstanceFactory<B>>,
    values: HashMap<String, Value>,
    groups: Vec<Vec<String>>,
    read_only: bool,
    realized: bool,
    deferred: Option<Deferred>,
    hidden: HashSet<String>,
    locked: HashSet<String>,
    error_display: Box<dyn ErrorDisplay>,
    change_listeners: ListenerRegistry<ChangedValues>,
    hooks: Rc<dyn FormHooks<B>>,
    env: Rc<Environment>,
}

impl<B: 'static> BindingEngine<B> {
    /// Create an engine for beans of the named type
    pub fn new(
        bean_type_name: impl Into<String>,
        registry: MemberRegistry<B>,
        hooks: Rc<dyn FormHooks<B>>,
        env: Rc<Environment>,
    ) -> Self {
        Self {
            registry,
            bean: None,
            bean_type_name: bean_type_name.into(),
            factory: None,
            values: HashMap::new(),
            groups: Vec::new(),
            read_only: false,
            realized: false,
            deferred: None,
            hidden: HashSet::new(),
            locked: HashSet::new(),
            error_display: Box::new(StatusLabel::default()),
            change_listeners: ListenerRegistry::new(),
            hooks,
            env,
        }
    }

    /// Factory used when a bean is needed and none is bound
    pub fn set_instance_factory(&mut self, factory: Option<InstanceFactory<B>>) {
        self.factory = factory;
    }

    pub fn set_hooks(&mut self, hooks: Rc<dyn FormHooks<B>>) {
        self.hooks = hooks;
    }

    #[must_use]
    pub fn hooks(&self) -> &Rc<dyn FormHooks<B>> {
        &self.hooks
    }

    #[must_use]
    pub fn environment(&self) -> &Rc<Environment> {
        &self.env
    }

    pub fn set_error_display(&mut self, display: Box<dyn ErrorDisplay>) {
        self.error_display = display;
    }

    /// Message currently shown on the error display
    #[must_use]
    pub fn error_text(&self) -> Option<String> {
        self.error_display.text()
    }

    #[must_use]
    pub fn registry(&self) -> &MemberRegistry<B> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut MemberRegistry<B> {
        &mut self.registry
    }

    // ---- bean ----

    #[must_use]
    pub fn bean(&self) -> Option<&B> {
        self.bean.as_ref()
    }

    pub fn bean_mut(&mut self) -> Option<&mut B> {
        self.bean.as_mut()
    }

    /// Replace the bound bean without touching the widgets
    pub fn set_bean(&mut self, bean: Option<B>) {
        self.bean = bean;
    }

    pub fn take_bean(&mut self) -> Option<B> {
        self.bean.take()
    }

    /// The bound bean, created through the instance factory if necessary
    pub fn ensure_bean(&mut self) -> GuiResult<&mut B> {
        if self.bean.is_none() {
            self.bean = self.factory.as_ref().and_then(|f| f());
        }
        self.bean
            .as_mut()
            .ok_or_else(|| BindError::InstanceUnavailable(self.bean_type_name.clone()).into())
    }

    // ---- members ----

    /// Register a member, applying pending visibility and editability flags
    ///
    /// Widgets that always need a value make writable members required.
    pub fn add_member(&mut self, mut member: Member<B>) -> Option<Member<B>> {
        let name = member.name().to_string();
        if self.hidden.contains(&name) {
            member.visible = false;
        }
        if self.locked.contains(&name) {
            member.editable = false;
        }
        let widget = Rc::clone(member.widget());
        {
            let mut widget = widget.borrow_mut();
            if widget.requires_value() && member.binding().is_writable() {
                member.required = true;
                widget.set_required_indicator(true);
            }
            if widget.label().is_none() {
                widget.set_label(member.label());
            }
        }
        if let Some(value) = self.values.get(&name) {
            member.widget().borrow_mut().set_value(value.clone());
        }
        let replaced = self.registry.add(member);
        self.apply_state(&name);
        replaced
    }

    pub fn remove_member(&mut self, name: &str) -> Option<Member<B>> {
        self.groups.iter_mut().for_each(|g| g.retain(|n| n != name));
        self.groups.retain(|g| g.len() > 1);
        self.registry.remove(name)
    }

    // ---- lifecycle ----

    /// Whether the form's container has been built
    #[must_use]
    pub fn is_realized(&self) -> bool {
        self.realized
    }

    /// Signal that the container exists; replays a deferred load or clear
    pub fn mark_realized(&mut self) {
        self.realized = true;
        match self.deferred.take() {
            Some(Deferred::Load) => {
                debug!(bean = %self.bean_type_name, "replaying deferred load");
                self.load();
            }
            Some(Deferred::Clear) => {
                debug!(bean = %self.bean_type_name, "replaying deferred clear");
                self.clear_fields();
            }
            None => {}
        }
    }

    /// Whether a load or clear is waiting for the container
    #[must_use]
    pub fn is_load_pending(&self) -> bool {
        self.deferred.is_some()
    }

    /// Copy bean values into the widgets
    ///
    /// Deferred until the container is realized. With no bean and no way to
    /// create one, the fields are cleared instead.
    pub fn load(&mut self) {
        if !self.realized {
            self.deferred = Some(Deferred::Load);
            return;
        }
        self.deferred = None;
        if let Err(err) = self.ensure_bean().map(|_| ()) {
            debug!(error = %err, "nothing to load, clearing fields");
            self.clear_fields();
            return;
        }
        let bean = self.bean.as_ref();
        for member in self.registry.iter_mut() {
            let value = read_member(member, bean, &self.values);
            member.widget().borrow_mut().set_value(value);
            if member.state != MemberState::Error {
                member.state = MemberState::Loaded;
            }
        }
        debug!(bean = %self.bean_type_name, members = self.registry.len(), "loaded");
        self.refresh_read_only();
    }

    /// Refresh one member from the bound bean, if there is one
    pub fn load_member(&mut self, name: &str) {
        if !self.realized {
            return;
        }
        let Some(member) = self.registry.member(name) else {
            return;
        };
        if self.bean.is_none() && matches!(member.binding(), MemberBinding::Bean { .. }) {
            return;
        }
        let value = read_member(member, self.bean.as_ref(), &self.values);
        member.widget().borrow_mut().set_value(value);
        self.apply_state(name);
    }

    // ---- values ----

    /// Current widget value of a member
    #[must_use]
    pub fn value(&self, name: &str) -> Option<Value> {
        self.registry.get(name).map(|w| w.borrow().value())
    }

    /// Set a widget value; stored members also keep it in the value map
    pub fn set_value(&mut self, name: &str, value: Value) -> GuiResult<()> {
        let member = self
            .registry
            .member(name)
            .ok_or_else(|| GuiError::FieldNotFound(name.to_string()))?;
        if matches!(member.binding(), MemberBinding::Stored) {
            self.values.insert(name.to_string(), value.clone());
        }
        member.widget().borrow_mut().set_value(value);
        Ok(())
    }

    /// Last committed value of a member that has no bean accessor
    #[must_use]
    pub fn stored_value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    // ---- validation ----

    /// Mark a member required; a custom message replaces "<label>: Can not be empty"
    ///
    /// Boolean fields always hold a value, so the flag is ignored for them.
    pub fn set_required(&mut self, name: &str, required: bool, message: Option<String>) -> GuiResult<()> {
        let member = self
            .registry
            .member_mut(name)
            .ok_or_else(|| GuiError::FieldNotFound(name.to_string()))?;
        let widget = Rc::clone(member.widget());
        if matches!(widget.borrow().value(), Value::Bool(_)) {
            return Ok(());
        }
        widget.borrow_mut().set_required_indicator(required);
        member.required = required;
        member.required_message = message;
        Ok(())
    }

    pub fn add_validator(&mut self, name: &str, validator: Validator) -> GuiResult<()> {
        let member = self
            .registry
            .member_mut(name)
            .ok_or_else(|| GuiError::FieldNotFound(name.to_string()))?;
        member.validators.push(validator);
        Ok(())
    }

    /// Validate every writable member without writing anything
    ///
    /// All failing widgets are marked; the first message is returned.
    pub fn validate(&mut self) -> Option<String> {
        let mut first_error = None;
        for member in self.registry.iter_mut() {
            if !member.binding().is_writable() {
                continue;
            }
            let message = if member.state == MemberState::Error {
                member.error.clone()
            } else {
                check_member(member, &self.env)
            };
            let widget = Rc::clone(member.widget());
            let mut widget = widget.borrow_mut();
            match message {
                Some(msg) => {
                    widget.set_invalid(true, Some(&msg));
                    member.error = Some(msg.clone());
                    first_error.get_or_insert(msg);
                }
                None => {
                    widget.set_invalid(false, None);
                    member.error = None;
                }
            }
        }
        first_error
    }

    /// Write widget values into the bean
    ///
    /// Nothing is written unless every member validates. A failing setter is
    /// offered to `handle_value_set_error`; if the hook declines, the widget
    /// becomes read-only, keeps its value and the member stays failed until
    /// [`BindingEngine::reset_error`] or [`BindingEngine::clear_errors`].
    pub fn commit(&mut self) -> bool {
        self.error_display.set_text(None);
        if let Err(err) = self.ensure_bean().map(|_| ()) {
            self.show_error(&err.to_string());
            return false;
        }
        if let Some(msg) = self.validate() {
            self.show_error(&msg);
            return false;
        }

        let mut failed = false;
        let mut first_error: Option<String> = None;
        let Some(bean) = self.bean.as_mut() else {
            return false;
        };
        for member in self.registry.iter_mut() {
            if member.state == MemberState::Error {
                failed = true;
                if let Some(msg) = &member.error {
                    first_error.get_or_insert_with(|| msg.clone());
                }
                continue;
            }
            let value = member.widget().borrow().value();
            match member.binding().clone() {
                MemberBinding::Stored => {
                    self.values.insert(member.name().to_string(), value);
                    member.state = MemberState::Committed;
                }
                MemberBinding::Bean {
                    setter: Some(setter),
                    ..
                } => match setter(&mut *bean, value.clone()) {
                    Ok(()) => member.state = MemberState::Committed,
                    Err(err) => {
                        failed = true;
                        let handled = self.hooks.handle_value_set_error(
                            member.name(),
                            member.widget(),
                            &value,
                            &err,
                        );
                        if handled {
                            continue;
                        }
                        warn!(member = member.name(), error = %err, "setter failed, locking field");
                        let msg = self.env.set_error_message(member.label(), err.message());
                        let widget = Rc::clone(member.widget());
                        let mut widget = widget.borrow_mut();
                        widget.set_read_only(true);
                        widget.set_invalid(true, Some(&msg));
                        member.state = MemberState::Error;
                        member.error = Some(msg.clone());
                        first_error.get_or_insert(msg);
                    }
                },
                MemberBinding::Bean { setter: None, .. } => {}
            }
        }

        // computed members may depend on what was just written
        let bean = self.bean.as_ref();
        for member in self.registry.iter() {
            if let MemberBinding::Bean { setter: None, .. } = member.binding() {
                let value = read_member(member, bean, &self.values);
                member.widget().borrow_mut().set_value(value);
            }
        }
        self.refresh_read_only();

        if let Some(msg) = first_error {
            self.show_error(&msg);
        }
        debug!(bean = %self.bean_type_name, ok = !failed, "commit");
        !failed
    }

    /// Clear the failed state of one member; returns whether it was failed
    pub fn reset_error(&mut self, name: &str) -> bool {
        let Some(member) = self.registry.member_mut(name) else {
            return false;
        };
        let was_failed = member.state == MemberState::Error;
        if was_failed {
            member.state = MemberState::WidgetBound;
        }
        member.error = None;
        member.widget().borrow_mut().set_invalid(false, None);
        self.apply_state(name);
        was_failed
    }

    /// Clear every error mark and the error display
    pub fn clear_errors(&mut self) {
        self.error_display.set_text(None);
        for member in self.registry.iter_mut() {
            member.widget().borrow_mut().set_invalid(false, None);
            member.error = None;
            if member.state == MemberState::Error {
                member.state = MemberState::WidgetBound;
            }
        }
        self.refresh_read_only();
    }

    /// Empty the widgets without creating a bean; deferred like `load`
    pub fn unload(&mut self) {
        if !self.realized {
            self.deferred = Some(Deferred::Clear);
            return;
        }
        self.deferred = None;
        self.clear_fields();
    }

    /// Reset every widget to its empty value
    pub fn clear_fields(&mut self) {
        for widget in self.registry.widgets() {
            widget.borrow_mut().clear();
        }
    }

    /// Show a message on the error display
    pub fn show_error(&mut self, message: &str) {
        warn!(bean = %self.bean_type_name, "{message}");
        self.error_display.set_text(Some(message));
    }

    // ---- connected fields ----

    /// Keep the named fields in step: a user change to one is written to
    /// the bean and the others are reloaded from it
    ///
    /// Returns `false` if fewer than two names are given or any name is not
    /// a member.
    pub fn connect(&mut self, names: &[&str]) -> bool {
        if names.len() < 2 || names.iter().any(|n| !self.registry.contains(n)) {
            return false;
        }
        self.groups.push(names.iter().map(|n| (*n).to_string()).collect());
        true
    }

    #[must_use]
    pub fn is_connected(&self, name: &str) -> bool {
        self.groups.iter().any(|g| g.iter().any(|n| n == name))
    }

    /// Relay a change made to a member's widget
    ///
    /// Hooks and listeners are notified; a user change also synchronizes the
    /// member's connected group.
    pub fn value_changed(&mut self, name: &str, old: Value, from_client: bool) {
        let Some(new) = self.value(name) else {
            return;
        };
        let change = ChangedValues {
            name: name.to_string(),
            old,
            new,
            from_client,
        };
        self.hooks.value_changed(&change);
        self.change_listeners.fire(&change);
        if from_client {
            self.sync_group(name);
        }
    }

    pub fn on_value_change(&mut self, listener: impl Fn(&ChangedValues) + 'static) -> ListenerId {
        self.change_listeners.register(listener)
    }

    pub fn remove_value_change_listener(&mut self, id: ListenerId) -> bool {
        self.change_listeners.unregister(id)
    }

    fn sync_group(&mut self, name: &str) {
        let Some(group) = self.groups.iter().find(|g| g.iter().any(|n| n == name)).cloned() else {
            return;
        };
        if self.ensure_bean().is_err() {
            return;
        }
        let Some(member) = self.registry.member(name) else {
            return;
        };
        if let Some(msg) = check_member(member, &self.env) {
            member.widget().borrow_mut().set_invalid(true, Some(&msg));
            return;
        }
        let value = member.widget().borrow().value();
        match member.binding().clone() {
            MemberBinding::Bean {
                setter: Some(setter),
                ..
            } => {
                if let Some(bean) = self.bean.as_mut() {
                    if let Err(err) = setter(bean, value) {
                        let msg = self.env.set_error_message(member.label(), err.message());
                        member.widget().borrow_mut().set_invalid(true, Some(&msg));
                        return;
                    }
                }
            }
            MemberBinding::Stored => {
                self.values.insert(name.to_string(), value);
            }
            MemberBinding::Bean { setter: None, .. } => {}
        }
        member.widget().borrow_mut().set_invalid(false, None);

        let bean = self.bean.as_ref();
        for sibling in group.iter().filter(|n| *n != name) {
            if let Some(member) = self.registry.member(sibling) {
                let value = read_member(member, bean, &self.values);
                member.widget().borrow_mut().set_value(value);
            }
        }
    }

    // ---- read-only and visibility ----

    /// Make the whole form read-only, or editable where members allow it
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        self.refresh_read_only();
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_field_visible(&mut self, name: &str, visible: bool) {
        if visible {
            self.hidden.remove(name);
        } else {
            self.hidden.insert(name.to_string());
        }
        if let Some(member) = self.registry.member_mut(name) {
            member.visible = visible;
            self.apply_state(name);
        }
    }

    pub fn set_field_editable(&mut self, name: &str, editable: bool) {
        if editable {
            self.locked.remove(name);
        } else {
            self.locked.insert(name.to_string());
        }
        if let Some(member) = self.registry.member_mut(name) {
            member.editable = editable;
            self.apply_state(name);
        }
    }

    /// Re-apply read-only and visibility to every widget
    pub fn refresh_read_only(&mut self) {
        for name in self.registry.names() {
            self.apply_state(&name);
        }
    }

    fn apply_state(&self, name: &str) {
        let Some(member) = self.registry.member(name) else {
            return;
        };
        let editable = !self.read_only
            && member.binding().is_writable()
            && member.editable
            && member.state != MemberState::Error
            && self.hooks.is_field_editable(name);
        let visible = member.visible && self.hooks.is_field_visible(name);
        let mut widget = member.widget().borrow_mut();
        widget.set_read_only(!editable);
        widget.set_visible(visible);
    }

    /// Log every member value at debug level
    pub fn dump_values(&self) {
        for member in self.registry.iter() {
            debug!(member = member.name(), value = %member.widget().borrow().value(), "value");
        }
    }
}

impl<B> fmt::Debug for BindingEngine<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingEngine")
            .field("bean_type", &self.bean_type_name)
            .field("registry", &self.registry)
            .field("has_bean", &self.bean.is_some())
            .field("groups", &self.groups)
            .field("read_only", &self.read_only)
            .field("realized", &self.realized)
            .field("deferred", &self.deferred)
            .finish_non_exhaustive()
    }
}

fn read_member<B>(member: &Member<B>, bean: Option<&B>, values: &HashMap<String, Value>) -> Value {
    match member.binding() {
        MemberBinding::Bean { getter, .. } => bean.map_or(Value::Null, |b| getter(b)),
        MemberBinding::Stored => values.get(member.name()).cloned().unwrap_or_default(),
    }
}

/// Required check, then validators in order; the first failure wins
fn check_member<B>(member: &Member<B>, env: &Environment) -> Option<String> {
    let widget = member.widget().borrow();
    let value = widget.value();
    if member.required && !matches!(value, Value::Bool(_)) && widget.is_empty() {
        return Some(
            member
                .required_message
                .clone()
                .unwrap_or_else(|| env.required_message(member.label())),
        );
    }
    member
        .validators
        .iter()
        .find(|v| !v.accepts(&value))
        .map(|v| {
            v.message()
                .map_or_else(|| env.invalid_message(member.label()), str::to_string)
        })
}
