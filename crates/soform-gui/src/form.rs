//! Bean-backed forms
//!
//! A [`Form`] goes through two phases. While it is being declared, names,
//! accessors, hooks and creators are collected. The first call to
//! [`Form::materialize`] discovers the field names, resolves each one,
//! creates and customizes its widget, orders the fields and hands them to
//! the binding engine. A load requested before that point is replayed
//! afterwards.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use soform_core::{
    BeanType, DefaultFieldCreator, FieldCreator, MemberResolver, MethodTable,
    MethodTableStrategy, SetError, Value, ValueType, WidgetRef,
};
use tracing::debug;

use crate::binding::{BindingEngine, ErrorDisplay};
use crate::container::{FieldContainer, FormLayout};
use crate::environment::Environment;
use crate::error::{GuiError, GuiResult};
use crate::factory::WidgetFactory;
use crate::hooks::{ChangedValues, FormHooks, NoHooks};
use crate::listener::{ListenerId, ListenerRegistry};
use crate::registry::{Member, MemberBinding, MemberRegistry, Validator};

/// A form editing one bean of type `B`
pub struct Form<B> {
    bean_type: Rc<BeanType<B>>,
    env: Rc<Environment>,
    engine: BindingEngine<B>,
    resolver: MemberResolver<B>,
    hooks: Rc<dyn FormHooks<B>>,
    creator: Box<dyn FieldCreator<B>>,
    container: Rc<RefCell<dyn FieldContainer>>,
    widget_factory: Option<Box<dyn WidgetFactory>>,
    explicit_names: Option<Vec<String>>,
    declared: Vec<String>,
    include_checkers: Vec<Box<dyn Fn(&str) -> bool>>,
    customizers: Vec<Box<dyn Fn(&str, &WidgetRef)>>,
    constructed_listeners: ListenerRegistry<()>,
}

impl<B: 'static> Form<B> {
    /// Create a form whose fields are discovered from the bean type
    pub fn new(bean_type: Rc<BeanType<B>>, env: Rc<Environment>) -> Self {
        let hooks: Rc<dyn FormHooks<B>> = Rc::new(NoHooks);
        let columns = env.config().form_columns;
        let container: Rc<RefCell<dyn FieldContainer>> =
            Rc::new(RefCell::new(FormLayout::new(columns)));
        let mut engine = BindingEngine::new(
            bean_type.name(),
            MemberRegistry::with_container(Rc::clone(&container)),
            Rc::clone(&hooks),
            Rc::clone(&env),
        );
        engine.set_instance_factory(bean_type.factory());
        Self {
            resolver: MemberResolver::new(Rc::clone(&bean_type)),
            bean_type,
            env,
            engine,
            hooks,
            creator: Box::new(DefaultFieldCreator),
            container,
            widget_factory: None,
            explicit_names: None,
            declared: Vec::new(),
            include_checkers: Vec::new(),
            customizers: Vec::new(),
            constructed_listeners: ListenerRegistry::new(),
        }
    }

    /// Create a form with exactly the given fields; nothing is discovered
    pub fn with_fields(bean_type: Rc<BeanType<B>>, env: Rc<Environment>, names: &[&str]) -> Self {
        let mut form = Self::new(bean_type, env);
        let mut explicit: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            if !explicit.iter().any(|n| n == name) {
                explicit.push((*name).to_string());
            }
        }
        form.explicit_names = Some(explicit);
        form
    }

    /// Lay the fields out in `container` instead of the default layout
    ///
    /// Has no effect once the form is materialized.
    #[must_use]
    pub fn with_container(mut self, container: Rc<RefCell<dyn FieldContainer>>) -> Self {
        if !self.engine.is_realized() && self.engine.registry().is_empty() {
            container
                .borrow_mut()
                .set_columns(self.env.config().form_columns);
            *self.engine.registry_mut() = MemberRegistry::with_container(Rc::clone(&container));
            self.container = container;
        }
        self
    }

    // ---- customization ----

    pub fn set_hooks(&mut self, hooks: Rc<dyn FormHooks<B>>) {
        self.engine.set_hooks(Rc::clone(&hooks));
        self.hooks = hooks;
    }

    /// Install a field creator; its method table becomes resolution level 2
    pub fn set_field_creator(&mut self, creator: Box<dyn FieldCreator<B>>) {
        if let Some(methods) = creator.methods() {
            self.resolver
                .set_strategy(Box::new(MethodTableStrategy::creator(methods)));
        }
        self.creator = creator;
    }

    /// Methods of an auxiliary object consulted before the form's own
    pub fn set_method_host(&mut self, methods: MethodTable<B>) {
        self.resolver
            .set_strategy(Box::new(MethodTableStrategy::method_host(Rc::new(methods))));
    }

    /// Methods the form itself provides, consulted before the bean type
    pub fn set_form_methods(&mut self, methods: MethodTable<B>) {
        self.resolver
            .set_strategy(Box::new(MethodTableStrategy::owner(Rc::new(methods))));
    }

    /// Factory tried after `create_field` and before the environment's
    pub fn set_widget_factory(&mut self, factory: impl WidgetFactory + 'static) {
        self.widget_factory = Some(Box::new(factory));
    }

    pub fn set_instance_factory(&mut self, factory: impl Fn() -> Option<B> + 'static) {
        self.engine.set_instance_factory(Some(Rc::new(factory)));
    }

    /// Every checker must accept a field for it to be included
    pub fn add_include_checker(&mut self, checker: impl Fn(&str) -> bool + 'static) {
        self.include_checkers.push(Box::new(checker));
    }

    /// Runs once for each widget the form creates, after `customize_field`
    pub fn add_field_customizer(&mut self, customizer: impl Fn(&str, &WidgetRef) + 'static) {
        self.customizers.push(Box::new(customizer));
    }

    pub fn on_constructed(&mut self, listener: impl Fn(&()) + 'static) -> ListenerId {
        self.constructed_listeners.register(listener)
    }

    pub fn set_error_display(&mut self, display: Box<dyn ErrorDisplay>) {
        self.engine.set_error_display(display);
    }

    // ---- declaration ----

    /// Add a field by name
    ///
    /// Before materialization the name is only recorded. Afterwards the
    /// field is created at once, and a name that resolves nowhere is an
    /// error. Returns `Ok(false)` if the field already exists or is
    /// excluded.
    pub fn add_field(&mut self, name: &str) -> GuiResult<bool> {
        if !self.engine.is_realized() {
            let known = self.declared.iter().any(|n| n == name)
                || self
                    .explicit_names
                    .as_ref()
                    .is_some_and(|names| names.iter().any(|n| n == name));
            if known {
                return Ok(false);
            }
            self.declared.push(name.to_string());
            return Ok(true);
        }
        if self.engine.registry().contains(name) || !self.include(name) {
            return Ok(false);
        }
        self.resolver.require(name)?;
        let Some(member) = self.build_member(name) else {
            return Ok(false);
        };
        self.engine.add_member(member);
        self.engine.load_member(name);
        Ok(true)
    }

    /// Add a read-only field computed by `getter`
    ///
    /// The first accessor registered for a name wins; later ones are ignored
    /// and `Ok(false)` is returned.
    pub fn add_field_getter(
        &mut self,
        name: &str,
        value_type: ValueType,
        getter: impl Fn(&B) -> Value + 'static,
    ) -> GuiResult<bool> {
        if !self
            .resolver
            .add_explicit(name, Rc::new(getter), None, value_type)
        {
            return Ok(false);
        }
        self.add_field(name)?;
        Ok(true)
    }

    /// Add a field with explicit getter and setter
    pub fn add_field_accessors(
        &mut self,
        name: &str,
        value_type: ValueType,
        getter: impl Fn(&B) -> Value + 'static,
        setter: impl Fn(&mut B, Value) -> Result<(), SetError> + 'static,
    ) -> GuiResult<bool> {
        if !self
            .resolver
            .add_explicit(name, Rc::new(getter), Some(Rc::new(setter)), value_type)
        {
            return Ok(false);
        }
        self.add_field(name)?;
        Ok(true)
    }

    /// Put `widget` under `name`, replacing any widget already there
    ///
    /// The widget is bound to the accessors resolved for `name`; without any,
    /// its value is kept by the form (see [`Form::value`]).
    pub fn add_widget(&mut self, name: &str, widget: WidgetRef) {
        let label = self.field_label(name);
        let member = match self.resolver.resolve(name) {
            Some(resolved) => Member::new(
                name,
                label,
                widget,
                MemberBinding::Bean {
                    getter: resolved.getter(),
                    setter: resolved.setter(),
                },
            )
            .with_value_type(resolved.value_type()),
            None => Member::new(name, label, widget, MemberBinding::Stored),
        };
        self.engine.add_member(member.with_order(self.field_order(name)));
        if self.engine.is_realized() {
            self.engine.load_member(name);
        }
    }

    /// Add a widget under a generated name (`_<id>`) and return the name
    pub fn add_anonymous_field(
        &mut self,
        widget: WidgetRef,
        value_type: ValueType,
        getter: impl Fn(&B) -> Value + 'static,
        setter: Option<Box<dyn Fn(&mut B, Value) -> Result<(), SetError>>>,
    ) -> String {
        let name = self.env.ids().anonymous_name();
        let setter = setter.map(|s| -> soform_core::Setter<B> { Rc::from(s) });
        self.resolver
            .add_explicit(&name, Rc::new(getter), setter, value_type);
        self.add_widget(&name, widget);
        name
    }

    /// Remove a field; returns whether it existed
    pub fn remove_field(&mut self, name: &str) -> bool {
        self.declared.retain(|n| n != name);
        self.engine.remove_member(name).is_some()
    }

    /// Remove the field bound to `widget` and return its name
    pub fn remove_widget(&mut self, widget: &WidgetRef) -> Option<String> {
        let name = self.engine.registry().name_of(widget)?.to_string();
        self.remove_field(&name);
        Some(name)
    }

    // ---- materialization ----

    /// Build every field; later calls do nothing
    pub fn materialize(&mut self) {
        if self.engine.is_realized() {
            return;
        }
        let mut members = Vec::new();
        for name in self.discover_field_names() {
            if self.engine.registry().contains(&name) || !self.include(&name) {
                continue;
            }
            if let Some(member) = self.build_member(&name) {
                members.push(member);
            }
        }
        members.sort_by_key(Member::order);
        for member in members {
            self.engine.add_member(member);
        }
        self.creator.close();
        debug!(
            bean = self.bean_type.name(),
            fields = ?self.engine.registry().names(),
            "form materialized"
        );
        self.hooks.constructed();
        self.constructed_listeners.fire(&());
        self.engine.mark_realized();
    }

    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.engine.is_realized()
    }

    fn discover_field_names(&self) -> Vec<String> {
        let mut names = match &self.explicit_names {
            Some(names) => names.clone(),
            None => self
                .hooks
                .field_names()
                .or_else(|| self.creator.field_names())
                .unwrap_or_else(|| self.bean_type.getter_names()),
        };
        for name in &self.declared {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    fn include(&self, name: &str) -> bool {
        self.hooks.include_field(name).unwrap_or(true)
            && self.include_checkers.iter().all(|check| check(name))
    }

    fn field_order(&self, name: &str) -> i32 {
        self.hooks
            .field_order(name)
            .unwrap_or_else(|| self.creator.field_order(name))
    }

    fn build_member(&self, name: &str) -> Option<Member<B>> {
        let resolved = self.resolver.resolve(name)?;
        let value_type = resolved.value_type();
        let label = self.field_label(name);
        let widget = self
            .hooks
            .create_field(name, &label, value_type)
            .or_else(|| {
                self.widget_factory
                    .as_ref()
                    .and_then(|f| f.create_widget(name, value_type, &label))
            })
            .or_else(|| self.env.create_widget(name, value_type, &label));
        let Some(widget) = widget else {
            debug!(field = name, %value_type, "no widget for field, leaving it out");
            return None;
        };
        self.hooks.customize_field(name, &widget);
        for customize in &self.customizers {
            customize(name, &widget);
        }
        let binding = MemberBinding::Bean {
            getter: resolved.getter(),
            setter: resolved.setter(),
        };
        Some(
            Member::new(name, label, widget, binding)
                .with_value_type(value_type)
                .with_order(self.field_order(name)),
        )
    }

    // ---- access ----

    #[must_use]
    pub fn bean_type(&self) -> &Rc<BeanType<B>> {
        &self.bean_type
    }

    #[must_use]
    pub fn environment(&self) -> &Rc<Environment> {
        &self.env
    }

    #[must_use]
    pub fn container(&self) -> &Rc<RefCell<dyn FieldContainer>> {
        &self.container
    }

    #[must_use]
    pub fn engine(&self) -> &BindingEngine<B> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut BindingEngine<B> {
        &mut self.engine
    }

    /// Caption derived from the bean type name
    #[must_use]
    pub fn caption(&self) -> String {
        self.env.type_caption(self.bean_type.name())
    }

    /// Label of a field: hooks, then creator, then the generated label
    #[must_use]
    pub fn field_label(&self, name: &str) -> String {
        self.hooks
            .label(name)
            .or_else(|| self.creator.label(name))
            .unwrap_or_else(|| self.env.create_label(name))
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<WidgetRef> {
        self.engine.registry().get(name).cloned()
    }

    #[must_use]
    pub fn field_name(&self, widget: &WidgetRef) -> Option<String> {
        self.engine.registry().name_of(widget).map(str::to_string)
    }

    /// Names of the fields in display order
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        self.engine.registry().names()
    }

    // ---- bean ----

    #[must_use]
    pub fn object(&self) -> Option<&B> {
        self.engine.bean()
    }

    pub fn object_mut(&mut self) -> Option<&mut B> {
        self.engine.bean_mut()
    }

    /// The bound bean, created through the instance factory if necessary
    pub fn object_or_create(&mut self) -> GuiResult<&mut B> {
        self.engine.ensure_bean()
    }

    /// Bind a new bean; with `load` the widgets are refreshed (or cleared
    /// when `bean` is `None`)
    pub fn set_object(&mut self, bean: Option<B>, load: bool) {
        let clear = bean.is_none();
        self.engine.set_bean(bean);
        if !load {
            return;
        }
        if clear {
            self.engine.unload();
        } else {
            self.engine.load();
        }
    }

    pub fn take_object(&mut self) -> Option<B> {
        self.engine.take_bean()
    }

    pub fn load(&mut self) {
        self.engine.load();
    }

    pub fn commit(&mut self) -> bool {
        self.engine.commit()
    }

    // ---- values and validation ----

    #[must_use]
    pub fn value(&self, name: &str) -> Option<Value> {
        self.engine.value(name)
    }

    pub fn set_value(&mut self, name: &str, value: Value) -> GuiResult<()> {
        self.engine.set_value(name, value)
    }

    pub fn set_required(&mut self, name: &str, required: bool) -> GuiResult<()> {
        self.engine.set_required(name, required, None)
    }

    pub fn set_required_with_message(&mut self, name: &str, message: &str) -> GuiResult<()> {
        self.engine
            .set_required(name, true, Some(message.to_string()))
    }

    pub fn add_validator(
        &mut self,
        name: &str,
        check: impl Fn(&Value) -> bool + 'static,
        message: Option<&str>,
    ) -> GuiResult<()> {
        self.engine
            .add_validator(name, Validator::new(check, message.map(str::to_string)))
    }

    #[must_use]
    pub fn error_text(&self) -> Option<String> {
        self.engine.error_text()
    }

    pub fn clear_errors(&mut self) {
        self.engine.clear_errors();
    }

    pub fn reset_error(&mut self, name: &str) -> bool {
        self.engine.reset_error(name)
    }

    pub fn clear_fields(&mut self) {
        self.engine.clear_fields();
    }

    /// Keep the named fields in step; the form is materialized first
    pub fn connect(&mut self, names: &[&str]) -> bool {
        self.materialize();
        self.engine.connect(names)
    }

    /// Relay a change to the widget registered as `name`
    pub fn value_changed(&mut self, name: &str, old: Value, from_client: bool) {
        self.engine.value_changed(name, old, from_client);
    }

    pub fn on_value_change(&mut self, listener: impl Fn(&ChangedValues) + 'static) -> ListenerId {
        self.engine.on_value_change(listener)
    }

    // ---- presentation ----

    pub fn set_read_only(&mut self, read_only: bool) {
        self.engine.set_read_only(read_only);
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.engine.is_read_only()
    }

    pub fn set_field_hidden(&mut self, names: &[&str]) {
        for name in names {
            self.engine.set_field_visible(name, false);
        }
    }

    pub fn set_field_visible(&mut self, names: &[&str]) {
        for name in names {
            self.engine.set_field_visible(name, true);
        }
    }

    pub fn set_field_read_only(&mut self, names: &[&str]) {
        for name in names {
            self.engine.set_field_editable(name, false);
        }
    }

    pub fn set_field_editable(&mut self, names: &[&str]) {
        for name in names {
            self.engine.set_field_editable(name, true);
        }
    }

    pub fn set_columns(&mut self, columns: usize) {
        self.container.borrow_mut().set_columns(columns);
    }

    pub fn set_column_span(&mut self, name: &str, span: usize) -> GuiResult<()> {
        if !self.engine.registry().contains(name) {
            return Err(GuiError::FieldNotFound(name.to_string()));
        }
        self.container.borrow_mut().set_column_span(name, span);
        Ok(())
    }

    pub fn dump_values(&self) {
        self.engine.dump_values();
    }
}

impl<B> fmt::Debug for Form<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("bean_type", &self.bean_type.name())
            .field("engine", &self.engine)
            .field("explicit_names", &self.explicit_names)
            .field("declared", &self.declared)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::InputField;
    use soform_core::testutil::{person_type, person_type_with_birthday, Person};
    use soform_core::{widget_ref, ResolutionSource};
    use std::cell::Cell;

    fn env() -> Rc<Environment> {
        Rc::new(Environment::default())
    }

    #[test]
    fn test_discovers_getters_in_declaration_order() {
        let mut form = Form::new(Rc::new(person_type()), env());
        assert!(form.field_names().is_empty());
        form.materialize();
        assert_eq!(form.field_names(), vec!["Name", "Active", "Age"]);
        assert_eq!(form.field_label("DateOfBirth"), "Date Of Birth");
    }

    #[test]
    fn test_debug_names_the_bean_type() {
        let mut form = Form::new(Rc::new(person_type()), env());
        form.materialize();
        let text = format!("{form:?}");
        assert!(text.starts_with("Form"));
        assert!(text.contains("\"Person\""));
    }

    #[test]
    fn test_explicit_names_skip_discovery() {
        let mut form = Form::with_fields(Rc::new(person_type()), env(), &["Age", "Name", "Age"]);
        form.materialize();
        assert_eq!(form.field_names(), vec!["Age", "Name"]);
    }

    #[test]
    fn test_materialize_is_idempotent() {
        let mut form = Form::new(Rc::new(person_type()), env());
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        form.on_constructed(move |()| c.set(c.get() + 1));
        form.materialize();
        form.materialize();
        assert_eq!(count.get(), 1);
        assert_eq!(form.field_names().len(), 3);
    }

    #[test]
    fn test_unresolvable_and_unsupported_fields_are_omitted() {
        let mut form =
            Form::with_fields(Rc::new(person_type()), env(), &["Name", "Salary"]);
        form.materialize();
        assert_eq!(form.field_names(), vec!["Name"]);
    }

    #[test]
    fn test_add_field_after_materialize_requires_member() {
        let mut form = Form::with_fields(Rc::new(person_type()), env(), &["Name"]);
        form.materialize();
        assert!(matches!(
            form.add_field("Salary"),
            Err(GuiError::Bind(soform_core::BindError::MemberNotFound(_)))
        ));
        assert!(form.add_field("Age").unwrap());
        assert!(!form.add_field("Age").unwrap());
    }

    #[test]
    fn test_add_field_getter_first_wins() {
        let mut form = Form::with_fields(Rc::new(person_type()), env(), &[]);
        assert!(form
            .add_field_getter("x", ValueType::String, |_| Value::string("A"))
            .unwrap());
        assert!(!form
            .add_field_getter("x", ValueType::String, |_| Value::string("B"))
            .unwrap());
        form.set_object(Some(Person::default()), true);
        form.materialize();
        assert_eq!(form.value("x"), Some(Value::string("A")));
        assert!(form.field("x").unwrap().borrow().is_read_only());
    }

    #[test]
    fn test_form_methods_level() {
        let mut form = Form::with_fields(Rc::new(person_type_with_birthday()), env(), &["Name"]);
        form.set_form_methods(MethodTable::new().with_getter(
            "getName",
            ValueType::String,
            |p: &Person| Value::string(p.name.to_uppercase()),
        ));
        form.set_object(Some(Person::new("ada", 3)), true);
        form.materialize();
        assert_eq!(form.value("Name"), Some(Value::string("ADA")));
        assert_eq!(
            form.resolver.resolve("Name").unwrap().source(),
            ResolutionSource::Owner
        );
    }

    #[test]
    fn test_customizer_runs_once_per_created_widget() {
        let mut form = Form::new(Rc::new(person_type()), env());
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        form.add_field_customizer(move |name, _| sink.borrow_mut().push(name.to_string()));
        form.materialize();
        form.materialize();
        assert_eq!(*calls.borrow(), vec!["Name", "Active", "Age"]);
    }

    #[test]
    fn test_include_checkers_all_must_agree() {
        let mut form = Form::new(Rc::new(person_type()), env());
        form.add_include_checker(|name| name != "Active");
        form.add_include_checker(|name| name != "Age");
        form.materialize();
        assert_eq!(form.field_names(), vec!["Name"]);
    }

    #[test]
    fn test_clearing_before_materialize_creates_no_bean() {
        let mut form = Form::new(Rc::new(person_type()), env());
        let created = Rc::new(Cell::new(0));
        let c = Rc::clone(&created);
        form.set_instance_factory(move || {
            c.set(c.get() + 1);
            Some(Person::new("Fresh", 1))
        });
        form.set_object(None, true);
        form.materialize();
        assert_eq!(created.get(), 0);
        assert!(form.object().is_none());
        assert_eq!(form.value("Name"), Some(Value::string("")));
    }

    #[test]
    fn test_stored_widget_keeps_its_value() {
        let mut form = Form::new(Rc::new(person_type()), env());
        form.add_widget("notes", widget_ref(InputField::text("Notes")));
        form.materialize();
        form.set_value("notes", Value::string("hello")).unwrap();
        assert!(form.commit());
        assert_eq!(
            form.engine().stored_value("notes"),
            Some(&Value::string("hello"))
        );
    }

    #[test]
    fn test_anonymous_field_gets_generated_name() {
        let mut form = Form::with_fields(Rc::new(person_type()), env(), &[]);
        let name = form.add_anonymous_field(
            widget_ref(InputField::text("Initial")),
            ValueType::String,
            |p: &Person| Value::string(p.name.chars().take(1).collect::<String>()),
            None,
        );
        assert!(name.starts_with('_'));
        form.set_object(Some(Person::new("Grace", 1)), true);
        form.materialize();
        assert_eq!(form.value(&name), Some(Value::string("G")));
    }

    #[test]
    fn test_set_object_without_load_keeps_widgets() {
        let mut form = Form::new(Rc::new(person_type()), env());
        form.materialize();
        form.set_object(Some(Person::new("Ada", 36)), true);
        form.set_object(Some(Person::new("Bob", 20)), false);
        assert_eq!(form.value("Name"), Some(Value::string("Ada")));
        form.set_object(None, true);
        assert_eq!(form.value("Name"), Some(Value::string("")));
    }

    #[test]
    fn test_column_span_requires_field() {
        let mut form = Form::new(Rc::new(person_type()), env());
        form.materialize();
        assert!(form.set_column_span("Name", 2).is_ok());
        assert!(matches!(
            form.set_column_span("Nope", 2),
            Err(GuiError::FieldNotFound(_))
        ));
    }

    #[test]
    fn test_custom_container_receives_fields() {
        let layout = Rc::new(RefCell::new(FormLayout::new(1)));
        let mut form = Form::new(Rc::new(person_type()), env()).with_container(layout.clone());
        form.materialize();
        assert_eq!(layout.borrow().child_names(), vec!["Name", "Active", "Age"]);
        assert_eq!(layout.borrow().columns(), 2);
    }
}
