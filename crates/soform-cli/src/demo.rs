//! The contact bean used by the demo commands

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use soform_core::{BeanType, SetError, Value, ValueType};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub age: i64,
    pub active: bool,
    pub birthday: Option<NaiveDate>,
}

fn text(v: Value, field: &mut String) -> Result<(), SetError> {
    match v {
        Value::String(s) => {
            *field = s;
            Ok(())
        }
        Value::Null => {
            field.clear();
            Ok(())
        }
        other => Err(SetError::type_mismatch("String", other.type_name())),
    }
}

/// Schema of [`Contact`]: `Name`, `Email`, `Age`, `Active`, `Birthday` and
/// a read-only `Summary`
pub fn contact_type() -> BeanType<Contact> {
    BeanType::new("demo::Contact")
        .with_default_factory()
        .property(
            "Name",
            ValueType::String,
            |c: &Contact| Value::string(&c.name),
            |c, v| text(v, &mut c.name),
        )
        .property(
            "Email",
            ValueType::String,
            |c: &Contact| Value::string(&c.email),
            |c, v| {
                if let Value::String(s) = &v {
                    if !s.is_empty() && !s.contains('@') {
                        return Err(SetError::new(format!("'{s}' is not an e-mail address")));
                    }
                }
                text(v, &mut c.email)
            },
        )
        .property(
            "Age",
            ValueType::Int,
            |c: &Contact| Value::Int(c.age),
            |c, v| match v {
                Value::Int(n) if n < 0 => Err(SetError::new("Age can not be negative")),
                Value::Int(n) => {
                    c.age = n;
                    Ok(())
                }
                Value::Null => {
                    c.age = 0;
                    Ok(())
                }
                other => Err(SetError::type_mismatch("Int", other.type_name())),
            },
        )
        .property(
            "Active",
            ValueType::Bool,
            |c: &Contact| Value::Bool(c.active),
            |c, v| {
                c.active = v.as_bool().unwrap_or(false);
                Ok(())
            },
        )
        .property(
            "Birthday",
            ValueType::Date,
            |c: &Contact| c.birthday.into(),
            |c, v| match v {
                Value::Date(d) => {
                    c.birthday = Some(d);
                    Ok(())
                }
                Value::Null => {
                    c.birthday = None;
                    Ok(())
                }
                other => Err(SetError::type_mismatch("Date", other.type_name())),
            },
        )
        .read_only_property("Summary", ValueType::String, |c: &Contact| {
            if c.email.is_empty() {
                Value::string(&c.name)
            } else {
                Value::string(format!("{} <{}>", c.name, c.email))
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_from_json() {
        let contact: Contact =
            serde_json::from_str(r#"{"name":"Ada","email":"ada@example.com","birthday":"1815-12-10"}"#)
                .unwrap();
        assert_eq!(contact.name, "Ada");
        assert_eq!(contact.age, 0);
        assert_eq!(contact.birthday, NaiveDate::from_ymd_opt(1815, 12, 10));
    }

    #[test]
    fn test_email_setter_rejects_plain_text() {
        let ty = contact_type();
        let setter = ty
            .find_setter("setEmail", ValueType::String)
            .and_then(|m| m.as_setter())
            .unwrap();
        let mut contact = Contact::default();
        assert!(setter(&mut contact, Value::string("nobody")).is_err());
        assert!(setter(&mut contact, Value::string("a@b.c")).is_ok());
        assert_eq!(contact.email, "a@b.c");
    }

    #[test]
    fn test_getter_names_in_declaration_order() {
        assert_eq!(
            contact_type().getter_names(),
            vec!["Name", "Email", "Age", "Active", "Birthday", "Summary"]
        );
    }
}
