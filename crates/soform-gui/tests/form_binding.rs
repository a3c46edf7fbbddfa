//! End-to-end behaviour of bean forms

use std::cell::RefCell;
use std::rc::Rc;

use soform_core::testutil::{person_type, person_type_with_birthday, Person};
use soform_core::{MethodTable, SetError, Value, ValueType};
use soform_gui::{
    ChangedValues, Environment, Form, FormHooks, MemberState, StatusLabel, WidgetRef,
};

fn env() -> Rc<Environment> {
    Rc::new(Environment::default())
}

fn person_form(person: Person) -> Form<Person> {
    let mut form = Form::new(Rc::new(person_type()), env());
    form.set_object(Some(person), true);
    form.materialize();
    form
}

#[test]
fn test_explicit_accessor_beats_bean_method() {
    let mut form = Form::with_fields(Rc::new(person_type()), env(), &["Name"]);
    assert!(form
        .add_field_getter("Name", ValueType::String, |_| Value::string("explicit"))
        .unwrap());
    form.set_object(Some(Person::new("Ada", 36)), true);
    form.materialize();
    assert_eq!(form.value("Name"), Some(Value::string("explicit")));
}

#[test]
fn test_method_host_beats_bean_type() {
    let mut form = Form::with_fields(Rc::new(person_type()), env(), &["Age"]);
    form.set_method_host(
        MethodTable::new()
            .with_getter("getAge", ValueType::Int, |p: &Person| Value::Int(p.age * 2)),
    );
    form.set_object(Some(Person::new("Ada", 21)), true);
    form.materialize();
    assert_eq!(form.value("Age"), Some(Value::Int(42)));
}

#[test]
fn test_load_commit_round_trip() {
    let mut form = person_form(Person::new("Ada", 5));
    assert!(form.commit());
    let person = form.object().unwrap();
    assert_eq!(person.age, 5);
    assert_eq!(person.name, "Ada");
    assert!(person.active);
}

#[test]
fn test_required_empty_field_leaves_bean_untouched() {
    let mut form = person_form(Person::new("Ada", 36));
    let status = StatusLabel::default();
    form.set_error_display(Box::new(status));
    form.set_required("Name", true).unwrap();
    form.set_value("Name", Value::string("")).unwrap();
    form.set_value("Age", Value::Int(50)).unwrap();

    assert!(!form.commit());
    assert_eq!(form.object().unwrap().name, "Ada");
    assert_eq!(form.object().unwrap().age, 36);
    assert_eq!(form.error_text().as_deref(), Some("Name: Can not be empty"));
}

#[test]
fn test_first_accessor_for_a_name_survives() {
    let mut form = Form::with_fields(Rc::new(person_type()), env(), &[]);
    assert!(form
        .add_field_getter("x", ValueType::String, |_| Value::string("A"))
        .unwrap());
    assert!(!form
        .add_field_getter("x", ValueType::String, |_| Value::string("B"))
        .unwrap());
    form.set_object(Some(Person::default()), true);
    form.materialize();
    assert_eq!(form.field_names(), vec!["x"]);
    assert_eq!(form.value("x"), Some(Value::string("A")));
}

struct LetterOrder;

impl FormHooks<Person> for LetterOrder {
    fn field_order(&self, name: &str) -> Option<i32> {
        match name {
            "a" => Some(0),
            "b" => Some(1),
            "c" => Some(2),
            _ => None,
        }
    }
}

#[test]
fn test_order_policy_decides_sequence() {
    let mut form = Form::with_fields(Rc::new(person_type()), env(), &["c", "a", "b"]);
    form.set_hooks(Rc::new(LetterOrder));
    for name in ["c", "a", "b"] {
        let text = name.to_uppercase();
        form.add_field_getter(name, ValueType::String, move |_| Value::string(text.clone()))
            .unwrap();
    }
    form.materialize();
    assert_eq!(form.field_names(), vec!["a", "b", "c"]);
}

#[test]
fn test_setter_failure_locks_age_until_reset() {
    let mut form = person_form(Person::new("Ada", 36));
    form.set_value("Age", Value::Int(-1)).unwrap();

    assert!(!form.commit());
    let age = form.field("Age").unwrap();
    assert!(age.borrow().is_read_only());
    assert_eq!(age.borrow().value(), Value::Int(-1));
    assert_eq!(form.object().unwrap().age, 36);
    assert_eq!(
        form.error_text().as_deref(),
        Some("Age: Value could not be set (Age can not be negative)")
    );

    assert!(!form.commit());
    assert_eq!(
        form.engine().registry().member("Age").unwrap().state(),
        MemberState::Error
    );

    assert!(form.reset_error("Age"));
    form.set_value("Age", Value::Int(37)).unwrap();
    assert!(form.commit());
    assert_eq!(form.object().unwrap().age, 37);
}

#[test]
fn test_load_before_materialize_is_replayed() {
    let mut form = Form::new(Rc::new(person_type()), env());
    form.set_object(Some(Person::new("Grace", 45)), true);
    assert!(form.engine().is_load_pending());
    form.materialize();
    assert!(!form.engine().is_load_pending());
    assert_eq!(form.value("Name"), Some(Value::string("Grace")));
    assert_eq!(form.value("Age"), Some(Value::Int(45)));
}

#[test]
fn test_commit_without_bean_uses_instance_factory() {
    let mut form = Form::new(Rc::new(person_type()), env());
    form.materialize();
    form.set_value("Name", Value::string("Linus")).unwrap();
    assert!(form.commit());
    assert_eq!(form.object().unwrap().name, "Linus");
}

#[test]
fn test_connected_fields_follow_user_changes() {
    let mut form = Form::with_fields(
        Rc::new(person_type_with_birthday()),
        env(),
        &["Age", "Summary"],
    );
    form.set_object(Some(Person::new("Ada", 36)), true);
    assert!(form.connect(&["Age", "Summary"]));
    assert_eq!(form.value("Summary"), Some(Value::string("Ada (36)")));

    let changes = Rc::new(RefCell::new(Vec::<ChangedValues>::new()));
    let sink = Rc::clone(&changes);
    form.on_value_change(move |c| sink.borrow_mut().push(c.clone()));

    form.set_value("Age", Value::Int(37)).unwrap();
    form.value_changed("Age", Value::Int(36), true);
    assert_eq!(form.object().unwrap().age, 37);
    assert_eq!(form.value("Summary"), Some(Value::string("Ada (37)")));
    assert_eq!(changes.borrow().len(), 1);
    assert!(changes.borrow()[0].changed());
}

#[test]
fn test_read_only_form_and_computed_members() {
    let mut form = Form::new(Rc::new(person_type_with_birthday()), env());
    form.set_object(Some(Person::new("Ada", 36)), true);
    form.materialize();
    let summary = form.field("Summary").unwrap();
    assert!(summary.borrow().is_read_only());
    assert!(!form.field("Name").unwrap().borrow().is_read_only());

    form.set_read_only(true);
    for name in form.field_names() {
        assert!(form.field(&name).unwrap().borrow().is_read_only(), "{name}");
    }
}

#[test]
fn test_computed_member_refreshed_after_commit() {
    let mut form = Form::new(Rc::new(person_type_with_birthday()), env());
    form.set_object(Some(Person::new("Ada", 36)), true);
    form.materialize();
    form.set_value("Name", Value::string("Grace")).unwrap();
    assert!(form.commit());
    assert_eq!(form.value("Summary"), Some(Value::string("Grace (36)")));
}

struct ResetOnFailure;

impl FormHooks<Person> for ResetOnFailure {
    fn handle_value_set_error(
        &self,
        _name: &str,
        widget: &WidgetRef,
        _value: &Value,
        _error: &SetError,
    ) -> bool {
        widget.borrow_mut().set_value(Value::Int(0));
        true
    }
}

#[test]
fn test_recovery_hook_keeps_field_editable() {
    let mut form = person_form(Person::new("Ada", 36));
    form.set_hooks(Rc::new(ResetOnFailure));
    form.set_value("Age", Value::Int(-3)).unwrap();
    assert!(!form.commit());
    let age = form.field("Age").unwrap();
    assert!(!age.borrow().is_read_only());
    assert_eq!(age.borrow().value(), Value::Int(0));
    assert!(form.commit());
    assert_eq!(form.object().unwrap().age, 0);
}

#[test]
fn test_hidden_and_locked_fields() {
    let mut form = Form::new(Rc::new(person_type()), env());
    form.set_field_hidden(&["Active"]);
    form.set_field_read_only(&["Name"]);
    form.materialize();
    assert!(!form.field("Active").unwrap().borrow().is_visible());
    assert!(form.field("Name").unwrap().borrow().is_read_only());
    form.set_field_editable(&["Name"]);
    assert!(!form.field("Name").unwrap().borrow().is_read_only());
}
