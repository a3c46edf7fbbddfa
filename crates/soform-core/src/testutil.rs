//! Test fixtures shared by the soform crates
//!
//! `Person` is a small bean with a string, a boolean and an integer member,
//! declared in that order. `setAge` rejects negative ages so tests can
//! exercise setter failures.

use chrono::NaiveDate;

use crate::bean::BeanType;
use crate::error::SetError;
use crate::value::{Value, ValueType};

/// Fixture bean
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub name: String,
    pub active: bool,
    pub age: i64,
    pub date_of_birth: Option<NaiveDate>,
}

impl Person {
    /// Create an active person
    pub fn new(name: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            active: true,
            age,
            date_of_birth: None,
        }
    }
}

/// Schema exposing `Name`, `Active` and `Age`, in that order
pub fn person_type() -> BeanType<Person> {
    BeanType::new("Person")
        .with_default_factory()
        .property(
            "Name",
            ValueType::String,
            |p: &Person| Value::string(&p.name),
            |p, v| match v {
                Value::String(s) => {
                    p.name = s;
                    Ok(())
                }
                Value::Null => {
                    p.name.clear();
                    Ok(())
                }
                other => Err(SetError::type_mismatch("String", other.type_name())),
            },
        )
        .property(
            "Active",
            ValueType::Bool,
            |p: &Person| Value::Bool(p.active),
            |p, v| {
                p.active = v.as_bool().unwrap_or(false);
                Ok(())
            },
        )
        .property(
            "Age",
            ValueType::Int,
            |p: &Person| Value::Int(p.age),
            |p, v| match v {
                Value::Int(n) if n < 0 => Err(SetError::new("Age can not be negative")),
                Value::Int(n) => {
                    p.age = n;
                    Ok(())
                }
                Value::Null => {
                    p.age = 0;
                    Ok(())
                }
                other => Err(SetError::type_mismatch("Int", other.type_name())),
            },
        )
}

/// [`person_type`] plus a `DateOfBirth` date member and a read-only `Summary`
pub fn person_type_with_birthday() -> BeanType<Person> {
    person_type()
        .property(
            "DateOfBirth",
            ValueType::Date,
            |p: &Person| p.date_of_birth.into(),
            |p, v| {
                p.date_of_birth = v.as_date();
                Ok(())
            },
        )
        .read_only_property("Summary", ValueType::String, |p: &Person| {
            Value::string(format!("{} ({})", p.name, p.age))
        })
}

/// A few people for grid tests
pub fn sample_people() -> Vec<Person> {
    vec![
        Person::new("Ada", 36),
        Person {
            active: false,
            ..Person::new("Grace", 45)
        },
        Person::new("Linus", 28),
    ]
}
