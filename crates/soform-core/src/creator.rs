//! Field and column creators
//!
//! A creator is an application-wide customization point consulted by every
//! form (or grid) of a bean type: it can supply member names, a table of
//! named functions, ordering and labels. Every method has a default that
//! means "no opinion".

use std::rc::Rc;

use crate::bean::{Getter, MethodTable};
use crate::value::ValueType;

/// Horizontal alignment of a grid column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAlign {
    Start,
    Center,
    End,
}

/// Customizes how forms of a bean type discover and arrange fields
pub trait FieldCreator<B> {
    /// Field names to use when the form did not receive explicit names
    fn field_names(&self) -> Option<Vec<String>> {
        None
    }

    /// Named functions consulted right after explicit accessors
    fn methods(&self) -> Option<Rc<MethodTable<B>>> {
        None
    }

    /// Display order of a field; lower first
    fn field_order(&self, _name: &str) -> i32 {
        i32::MAX
    }

    /// Label for a field
    fn label(&self, _name: &str) -> Option<String> {
        None
    }

    /// Called once after the form has materialized its fields
    fn close(&mut self) {}
}

/// Creator that never contributes anything
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFieldCreator;

impl<B> FieldCreator<B> for DefaultFieldCreator {}

/// Customizes how grids of a bean type discover and render columns
pub trait ColumnCreator<B> {
    /// Column names to use when the grid did not receive explicit names
    fn column_names(&self) -> Option<Vec<String>> {
        None
    }

    /// Named functions consulted right after the grid's own column functions
    fn methods(&self) -> Option<Rc<MethodTable<B>>> {
        None
    }

    /// A render function for `name`, taking precedence over method lookup
    fn column_function(&self, _name: &str) -> Option<Getter<B>> {
        None
    }

    /// Display order of a column; lower first, ties keep declaration order
    fn column_order(&self, _name: &str) -> i32 {
        i32::MIN
    }

    /// Header text for a column
    fn column_caption(&self, _name: &str) -> Option<String> {
        None
    }

    /// Alignment for a column; numeric columns are right-aligned
    fn column_text_align(&self, _name: &str, value_type: Option<ValueType>) -> Option<TextAlign> {
        value_type
            .filter(|t| t.is_numeric())
            .map(|_| TextAlign::End)
    }

    /// Called once after the grid has materialized its columns
    fn close(&mut self) {}
}

/// Creator that keeps every default
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultColumnCreator;

impl<B> ColumnCreator<B> for DefaultColumnCreator {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::Person;

    #[test]
    fn test_default_field_creator_has_no_opinion() {
        let creator = DefaultFieldCreator;
        assert!(FieldCreator::<Person>::field_names(&creator).is_none());
        assert!(FieldCreator::<Person>::methods(&creator).is_none());
        assert_eq!(FieldCreator::<Person>::field_order(&creator, "Name"), i32::MAX);
    }

    #[test]
    fn test_default_column_alignment() {
        let creator = DefaultColumnCreator;
        let align = |t| ColumnCreator::<Person>::column_text_align(&creator, "x", t);
        assert_eq!(align(Some(ValueType::Int)), Some(TextAlign::End));
        assert_eq!(align(Some(ValueType::Float)), Some(TextAlign::End));
        assert_eq!(align(Some(ValueType::String)), None);
        assert_eq!(align(None), None);
        assert_eq!(ColumnCreator::<Person>::column_order(&creator, "x"), i32::MIN);
    }
}
