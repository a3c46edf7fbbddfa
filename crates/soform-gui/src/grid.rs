//! Grid column construction
//!
//! Columns are declared by name and collected until the grid is first
//! attached. [`GridColumnBuilder::materialize`] then filters, orders and
//! builds them exactly once; afterwards columns can only be changed through
//! the live attribute setters.
//!
//! A column renders a row through one or more functions. A single function
//! whose type is [`ValueType::Html`] produces markup directly; everything
//! else goes through a template where `<1>`, `<2>`, ... are replaced by the
//! escaped display text of each function's value.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use soform_core::{
    BeanType, ColumnCreator, DefaultColumnCreator, Getter, MemberResolver, MethodTable,
    MethodTableStrategy, TextAlign, Value, ValueType,
};
use tracing::{debug, trace};

use crate::environment::Environment;

/// Rendered content of one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Text(String),
    Html(String),
}

impl CellContent {
    /// The text or markup of the cell
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Html(s) => s,
        }
    }
}

/// How a column turns a row into cell content
pub enum Renderer<B> {
    /// Values substituted into a `<n>` placeholder template
    Template {
        functions: Vec<Getter<B>>,
        template: String,
    },
    /// A single value inserted as markup
    Html(Getter<B>),
    /// Anything else
    Custom(Rc<dyn Fn(&B, &Environment) -> CellContent>),
}

impl<B> Renderer<B> {
    /// Template renderer joining the function values with `separator`
    pub fn joined(functions: Vec<Getter<B>>, separator: &str) -> Self {
        let template = default_template(functions.len(), separator);
        Self::Template {
            functions,
            template,
        }
    }

    pub fn custom(f: impl Fn(&B, &Environment) -> CellContent + 'static) -> Self {
        Self::Custom(Rc::new(f))
    }

    pub fn render(&self, row: &B, env: &Environment) -> CellContent {
        match self {
            Self::Template {
                functions,
                template,
            } => {
                let values: Vec<Value> = functions.iter().map(|f| f(row)).collect();
                if values.iter().any(|v| matches!(v, Value::Html(_))) {
                    CellContent::Html(fill_template(template, &values, env))
                } else {
                    CellContent::Text(fill_template(template, &values, env))
                }
            }
            Self::Html(f) => CellContent::Html(f(row).to_string()),
            Self::Custom(f) => f(row, env),
        }
    }
}

impl<B> Clone for Renderer<B> {
    fn clone(&self) -> Self {
        match self {
            Self::Template {
                functions,
                template,
            } => Self::Template {
                functions: functions.clone(),
                template: template.clone(),
            },
            Self::Html(f) => Self::Html(Rc::clone(f)),
            Self::Custom(f) => Self::Custom(Rc::clone(f)),
        }
    }
}

impl<B> fmt::Debug for Renderer<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template {
                functions,
                template,
            } => f
                .debug_struct("Template")
                .field("functions", &functions.len())
                .field("template", template)
                .finish(),
            Self::Html(_) => f.write_str("Html"),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// `<1><sep><2>...<n>`
#[must_use]
pub fn default_template(slots: usize, separator: &str) -> String {
    (1..=slots)
        .map(|i| format!("<{i}>"))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Substitute `<n>` placeholders; text values are escaped, HTML values are
/// inserted as they are
///
/// The template is scanned once, so markers inside substituted values stay
/// literal. Slots without a value are left as written.
fn fill_template(template: &str, values: &[Value], env: &Environment) -> String {
    let html = values.iter().any(|v| matches!(v, Value::Html(_)));
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let slot = (digits > 0 && after[digits..].starts_with('>'))
            .then(|| after[..digits].parse::<usize>().ok())
            .flatten()
            .filter(|n| (1..=values.len()).contains(n));
        match slot {
            Some(n) => {
                let text = match &values[n - 1] {
                    Value::Html(markup) => markup.clone(),
                    other if html => escape_html(&env.to_display(other)),
                    other => env.to_display(other),
                };
                out.push_str(&text);
                rest = &after[digits + 1..];
            }
            None => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Escape text for inclusion in markup
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// A constructed grid column
pub struct Column<B> {
    key: String,
    header: String,
    renderer: Renderer<B>,
    value_type: Option<ValueType>,
    text_align: TextAlign,
    resizable: bool,
    visible: bool,
    frozen: bool,
    hierarchy: bool,
}

impl<B> Column<B> {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn set_header(&mut self, header: impl Into<String>) {
        self.header = header.into();
    }

    #[must_use]
    pub fn renderer(&self) -> &Renderer<B> {
        &self.renderer
    }

    #[must_use]
    pub fn value_type(&self) -> Option<ValueType> {
        self.value_type
    }

    #[must_use]
    pub fn text_align(&self) -> TextAlign {
        self.text_align
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.text_align = align;
    }

    #[must_use]
    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    #[must_use]
    pub fn is_hierarchy(&self) -> bool {
        self.hierarchy
    }

    pub fn render(&self, row: &B, env: &Environment) -> CellContent {
        self.renderer.render(row, env)
    }
}

impl<B> fmt::Debug for Column<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("renderer", &self.renderer)
            .field("text_align", &self.text_align)
            .field("visible", &self.visible)
            .field("hierarchy", &self.hierarchy)
            .finish_non_exhaustive()
    }
}

/// Hooks through which an application tailors a grid of rows `B`
pub trait GridHooks<B> {
    /// Column names to use when none were given to the grid
    fn column_names(&self) -> Option<Vec<String>> {
        None
    }

    fn include_column(&self, _name: &str) -> Option<bool> {
        None
    }

    fn column_order(&self, _name: &str) -> Option<i32> {
        None
    }

    /// Template for a template-rendered column
    fn column_template(&self, _name: &str) -> Option<String> {
        None
    }

    fn header(&self, _name: &str) -> Option<String> {
        None
    }

    /// Called once for every constructed column
    fn customize_column(&self, _column: &mut Column<B>) {}

    /// Called when a row other than the last rendered one is rendered
    fn render(&self, _row: &B) {}

    /// Called after the columns have been constructed
    fn constructed(&self) {}
}

/// Hooks that leave every decision to the defaults
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGridHooks;

impl<B> GridHooks<B> for NoGridHooks {}

struct PendingColumn<B> {
    seq: usize,
    renderer: Renderer<B>,
    value_type: Option<ValueType>,
}

/// Collects column declarations and builds the columns once
pub struct GridColumnBuilder<B> {
    bean_type: Rc<BeanType<B>>,
    env: Rc<Environment>,
    resolver: MemberResolver<B>,
    hooks: Rc<dyn GridHooks<B>>,
    creator: Box<dyn ColumnCreator<B>>,
    explicit_names: Option<Vec<String>>,
    pending: HashMap<String, PendingColumn<B>>,
    next_seq: usize,
    columns: Vec<Column<B>>,
    materialized: bool,
    resizable: HashMap<String, bool>,
    visible: HashMap<String, bool>,
    frozen: HashMap<String, bool>,
    hierarchy: Option<String>,
}

impl<B: 'static> GridColumnBuilder<B> {
    /// Builder whose columns are discovered from the bean type
    pub fn new(bean_type: Rc<BeanType<B>>, env: Rc<Environment>) -> Self {
        Self {
            resolver: MemberResolver::new(Rc::clone(&bean_type)),
            bean_type,
            env,
            hooks: Rc::new(NoGridHooks),
            creator: Box::new(DefaultColumnCreator),
            explicit_names: None,
            pending: HashMap::new(),
            next_seq: 0,
            columns: Vec::new(),
            materialized: false,
            resizable: HashMap::new(),
            visible: HashMap::new(),
            frozen: HashMap::new(),
            hierarchy: None,
        }
    }

    /// Builder with exactly the given columns; nothing is discovered
    pub fn with_columns(bean_type: Rc<BeanType<B>>, env: Rc<Environment>, names: &[&str]) -> Self {
        let mut builder = Self::new(bean_type, env);
        let mut explicit: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            if !explicit.iter().any(|n| n == name) {
                explicit.push((*name).to_string());
            }
        }
        builder.explicit_names = Some(explicit);
        builder
    }

    pub fn set_hooks(&mut self, hooks: Rc<dyn GridHooks<B>>) {
        self.hooks = hooks;
    }

    #[must_use]
    pub fn hooks(&self) -> &Rc<dyn GridHooks<B>> {
        &self.hooks
    }

    /// Install a column creator; its method table is consulted before the
    /// method host
    pub fn set_column_creator(&mut self, creator: Box<dyn ColumnCreator<B>>) {
        if let Some(methods) = creator.methods() {
            self.resolver
                .set_strategy(Box::new(MethodTableStrategy::creator(methods)));
        }
        self.creator = creator;
    }

    pub fn set_method_host(&mut self, methods: MethodTable<B>) {
        self.resolver
            .set_strategy(Box::new(MethodTableStrategy::method_host(Rc::new(methods))));
    }

    /// Methods the grid itself provides, consulted before the bean type
    pub fn set_grid_methods(&mut self, methods: MethodTable<B>) {
        self.resolver
            .set_strategy(Box::new(MethodTableStrategy::owner(Rc::new(methods))));
    }

    #[must_use]
    pub fn bean_type(&self) -> &Rc<BeanType<B>> {
        &self.bean_type
    }

    #[must_use]
    pub fn environment(&self) -> &Rc<Environment> {
        &self.env
    }

    // ---- declaration ----

    /// Declare a column rendered through the function resolved for `name`
    ///
    /// Returns false when nothing renders `name`, or when the grid is
    /// materialized and the column already exists.
    pub fn create_column(&mut self, name: &str) -> bool {
        match self.resolve_renderer(name) {
            Some((renderer, value_type)) => self.declare(name, renderer, value_type),
            None => {
                trace!(column = name, "no render function, column skipped");
                false
            }
        }
    }

    /// Declare a column from an explicit render function
    ///
    /// The first function registered for a name wins.
    pub fn create_column_fn(
        &mut self,
        name: &str,
        value_type: ValueType,
        f: impl Fn(&B) -> Value + 'static,
    ) -> bool {
        self.resolver.add_explicit(name, Rc::new(f), None, value_type);
        self.create_column(name)
    }

    /// Declare a column combining several functions through `template`
    /// (default: the values joined by the configured separator)
    pub fn create_column_with(
        &mut self,
        name: &str,
        functions: Vec<Getter<B>>,
        template: Option<&str>,
    ) -> bool {
        if functions.is_empty() {
            return false;
        }
        let template = template
            .map(str::to_string)
            .or_else(|| self.hooks.column_template(name))
            .unwrap_or_else(|| {
                default_template(functions.len(), &self.env.config().template_separator)
            });
        self.declare(
            name,
            Renderer::Template {
                functions,
                template,
            },
            None,
        )
    }

    pub fn create_column_renderer(&mut self, name: &str, renderer: Renderer<B>) -> bool {
        self.declare(name, renderer, None)
    }

    fn declare(&mut self, name: &str, renderer: Renderer<B>, value_type: Option<ValueType>) -> bool {
        if self.materialized {
            if self.column(name).is_some() {
                return false;
            }
            let column = self.build_column(name, renderer, value_type);
            self.columns.push(column);
            return true;
        }
        if self.pending.contains_key(name) {
            return false;
        }
        self.pending.insert(
            name.to_string(),
            PendingColumn {
                seq: self.next_seq,
                renderer,
                value_type,
            },
        );
        self.next_seq += 1;
        true
    }

    fn resolve_renderer(&self, name: &str) -> Option<(Renderer<B>, Option<ValueType>)> {
        if !self.resolver.has_explicit(name) {
            if let Some(f) = self.creator.column_function(name) {
                return Some((self.template_renderer(name, vec![f]), None));
            }
        }
        let resolved = self.resolver.resolve(name)?;
        let value_type = resolved.value_type();
        let renderer = if value_type == ValueType::Html {
            Renderer::Html(resolved.getter())
        } else {
            self.template_renderer(name, vec![resolved.getter()])
        };
        Some((renderer, Some(value_type)))
    }

    fn template_renderer(&self, name: &str, functions: Vec<Getter<B>>) -> Renderer<B> {
        match self.hooks.column_template(name) {
            Some(template) => Renderer::Template {
                functions,
                template,
            },
            None => Renderer::joined(functions, &self.env.config().template_separator),
        }
    }

    // ---- materialization ----

    /// Build the columns; later calls do nothing
    pub fn materialize(&mut self) {
        if self.materialized {
            return;
        }
        let discovered = match &self.explicit_names {
            Some(names) => names.clone(),
            None => self
                .hooks
                .column_names()
                .or_else(|| self.creator.column_names())
                .unwrap_or_else(|| self.bean_type.getter_names()),
        };

        let mut names: Vec<String> = Vec::new();
        for name in discovered {
            if names.contains(&name) {
                continue;
            }
            if self.pending.contains_key(&name) || self.create_column(&name) {
                names.push(name);
            }
        }
        let mut extra: Vec<(&String, usize)> = self
            .pending
            .iter()
            .filter(|(name, _)| !names.contains(name))
            .map(|(name, p)| (name, p.seq))
            .collect();
        extra.sort_by_key(|(_, seq)| *seq);
        let extra: Vec<String> = extra.into_iter().map(|(n, _)| n.clone()).collect();
        names.extend(extra);

        names.retain(|name| self.include(name));
        // stable sort keeps declaration order for equal orders
        names.sort_by_key(|name| self.column_order(name));

        let mut pending = std::mem::take(&mut self.pending);
        for name in &names {
            if let Some(p) = pending.remove(name) {
                let column = self.build_column(name, p.renderer, p.value_type);
                self.columns.push(column);
            }
        }
        self.materialized = true;
        self.creator.close();
        debug!(
            bean = self.bean_type.name(),
            columns = ?self.column_keys(),
            "grid columns materialized"
        );
        self.hooks.constructed();
    }

    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.materialized
    }

    fn include(&self, name: &str) -> bool {
        self.hooks.include_column(name).unwrap_or(true)
    }

    fn column_order(&self, name: &str) -> i32 {
        self.hooks
            .column_order(name)
            .unwrap_or_else(|| self.creator.column_order(name))
    }

    fn build_column(&self, name: &str, renderer: Renderer<B>, value_type: Option<ValueType>) -> Column<B> {
        let header = self
            .hooks
            .header(name)
            .or_else(|| self.creator.column_caption(name))
            .unwrap_or_else(|| self.env.create_label(name));
        let text_align = self
            .creator
            .column_text_align(name, value_type)
            .unwrap_or(TextAlign::Start);
        let mut column = Column {
            key: name.to_string(),
            header,
            renderer,
            value_type,
            text_align,
            resizable: self.resizable.get(name).copied().unwrap_or(true),
            visible: self.visible.get(name).copied().unwrap_or(true),
            frozen: self.frozen.get(name).copied().unwrap_or(false),
            hierarchy: self.hierarchy.as_deref() == Some(name),
        };
        self.hooks.customize_column(&mut column);
        column
    }

    // ---- columns ----

    /// Number of columns; materializes the grid
    pub fn column_count(&mut self) -> usize {
        self.materialize();
        self.columns.len()
    }

    #[must_use]
    pub fn columns(&self) -> &[Column<B>] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column<B>> {
        self.columns.iter().find(|c| c.key == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column<B>> {
        self.columns.iter_mut().find(|c| c.key == name)
    }

    #[must_use]
    pub fn column_keys(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.key.as_str()).collect()
    }

    /// Whether `name` has been declared or built
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.pending.contains_key(name) || self.column(name).is_some()
    }

    // ---- live attributes ----

    pub fn set_column_resizable(&mut self, name: &str, resizable: bool) {
        match self.column_mut(name) {
            Some(column) => column.resizable = resizable,
            None => {
                self.resizable.insert(name.to_string(), resizable);
            }
        }
    }

    pub fn set_column_visible(&mut self, name: &str, visible: bool) {
        match self.column_mut(name) {
            Some(column) => column.visible = visible,
            None => {
                self.visible.insert(name.to_string(), visible);
            }
        }
    }

    pub fn set_column_frozen(&mut self, name: &str, frozen: bool) {
        match self.column_mut(name) {
            Some(column) => column.frozen = frozen,
            None => {
                self.frozen.insert(name.to_string(), frozen);
            }
        }
    }

    #[must_use]
    pub fn is_column_visible(&self, name: &str) -> bool {
        match self.column(name) {
            Some(column) => column.visible,
            None => self.visible.get(name).copied().unwrap_or(true),
        }
    }

    /// Mark the column showing the tree structure of the rows
    ///
    /// Only the first request succeeds.
    pub fn set_hierarchy_column(&mut self, name: &str) -> bool {
        if self.hierarchy.is_some() {
            return false;
        }
        if self.materialized {
            let Some(column) = self.column_mut(name) else {
                return false;
            };
            column.hierarchy = true;
        }
        self.hierarchy = Some(name.to_string());
        true
    }

    #[must_use]
    pub fn hierarchy_column(&self) -> Option<&str> {
        self.hierarchy.as_deref()
    }

    // ---- rendering ----

    /// Render one cell
    #[must_use]
    pub fn render_cell(&self, name: &str, row: &B) -> Option<CellContent> {
        self.column(name).map(|c| c.render(row, &self.env))
    }

    /// Render the visible cells of a row in column order
    #[must_use]
    pub fn render_row(&self, row: &B) -> Vec<CellContent> {
        self.columns
            .iter()
            .filter(|c| c.visible)
            .map(|c| c.render(row, &self.env))
            .collect()
    }
}

impl<B> fmt::Debug for GridColumnBuilder<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridColumnBuilder")
            .field("bean_type", &self.bean_type.name())
            .field("materialized", &self.materialized)
            .field("pending", &self.pending.len())
            .field("columns", &self.columns)
            .field("hierarchy", &self.hierarchy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soform_core::testutil::{person_type, person_type_with_birthday, Person};

    fn builder() -> GridColumnBuilder<Person> {
        GridColumnBuilder::new(Rc::new(person_type()), Rc::new(Environment::default()))
    }

    #[test]
    fn test_default_template() {
        assert_eq!(default_template(3, "<br/>"), "<1><br/><2><br/><3>");
        assert_eq!(default_template(1, "|"), "<1>");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_fill_template_double_digit_slots() {
        let env = Environment::default();
        let values: Vec<Value> = (1..=10).map(Value::Int).collect();
        let out = fill_template("<1>-<10>", &values, &env);
        assert_eq!(out, "1-10");
    }

    #[test]
    fn test_fill_template_keeps_markers_inside_values() {
        let env = Environment::default();
        let values = vec![Value::Int(36), Value::string("<1>")];
        assert_eq!(fill_template("<1> / <2>", &values, &env), "36 / <1>");
        // unknown slots and stray brackets stay as written
        assert_eq!(fill_template("<3> <x> <", &values, &env), "<3> <x> <");
    }

    #[test]
    fn test_debug_lists_columns() {
        let mut grid = builder();
        grid.materialize();
        let text = format!("{grid:?}");
        assert!(text.contains("\"Person\""));
        assert!(text.contains("\"Age\""));
    }

    #[test]
    fn test_first_column_declaration_wins() {
        let mut grid = GridColumnBuilder::with_columns(
            Rc::new(person_type()),
            Rc::new(Environment::default()),
            &[],
        );
        let first: Getter<Person> = Rc::new(|_: &Person| Value::string("A"));
        let second: Getter<Person> = Rc::new(|_: &Person| Value::string("B"));
        assert!(grid.create_column_with("X", vec![first], None));
        assert!(!grid.create_column_with("X", vec![second], None));
        grid.materialize();
        assert_eq!(
            grid.render_cell("X", &Person::new("Ada", 1)),
            Some(CellContent::Text("A".to_string()))
        );
    }

    #[test]
    fn test_auto_discovered_columns() {
        let mut grid = builder();
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.column_keys(), vec!["Name", "Active", "Age"]);
        assert_eq!(grid.column("Age").unwrap().text_align(), TextAlign::End);
        assert_eq!(grid.column("Name").unwrap().text_align(), TextAlign::Start);
    }

    #[test]
    fn test_unresolvable_column_is_skipped() {
        let mut grid = builder();
        assert!(!grid.create_column("Salary"));
        assert!(!grid.has_column("Salary"));
    }

    #[test]
    fn test_materialize_twice_keeps_columns() {
        let mut grid = builder();
        grid.materialize();
        grid.materialize();
        assert_eq!(grid.columns().len(), 3);
    }

    #[test]
    fn test_existing_column_not_rebuilt_after_materialize() {
        let mut grid = builder();
        grid.materialize();
        assert!(!grid.create_column("Name"));
        assert!(grid.create_column_fn("Initial", ValueType::String, |p: &Person| {
            Value::string(p.name.chars().take(1).collect::<String>())
        }));
        assert_eq!(grid.column_keys().last(), Some(&"Initial"));
    }

    #[test]
    fn test_template_substitutes_values() {
        let mut grid = GridColumnBuilder::with_columns(
            Rc::new(person_type()),
            Rc::new(Environment::default()),
            &[],
        );
        let name: Getter<Person> = Rc::new(|p: &Person| Value::string(&p.name));
        let age: Getter<Person> = Rc::new(|p: &Person| Value::Int(p.age));
        assert!(grid.create_column_with("Who", vec![name, age], Some("<1> (<2>)")));
        grid.materialize();
        let row = Person::new("<Ada>", 36);
        assert_eq!(
            grid.render_cell("Who", &row),
            Some(CellContent::Text("<Ada> (36)".to_string()))
        );
    }

    #[test]
    fn test_html_column_inserted_as_markup() {
        let mut grid = builder();
        grid.create_column_fn("Badge", ValueType::Html, |p: &Person| {
            Value::Html(format!("<b>{}</b>", p.age))
        });
        grid.materialize();
        let row = Person::new("Ada", 36);
        assert_eq!(
            grid.render_cell("Badge", &row),
            Some(CellContent::Html("<b>36</b>".to_string()))
        );
    }

    #[test]
    fn test_mixed_template_escapes_text_slots() {
        let mut grid = builder();
        let name: Getter<Person> = Rc::new(|p: &Person| Value::string(&p.name));
        let badge: Getter<Person> = Rc::new(|_: &Person| Value::Html("<i>x</i>".to_string()));
        grid.create_column_with("Mixed", vec![name, badge], None);
        grid.materialize();
        let row = Person::new("A&B", 1);
        assert_eq!(
            grid.render_cell("Mixed", &row),
            Some(CellContent::Html("A&amp;B<br/><i>x</i>".to_string()))
        );
    }

    #[test]
    fn test_hierarchy_column_first_request_wins() {
        let mut grid = builder();
        assert!(grid.set_hierarchy_column("Name"));
        assert!(!grid.set_hierarchy_column("Age"));
        grid.materialize();
        assert!(grid.column("Name").unwrap().is_hierarchy());
        assert!(!grid.column("Age").unwrap().is_hierarchy());
    }

    #[test]
    fn test_live_attributes_before_and_after_materialize() {
        let mut grid = builder();
        grid.set_column_visible("Active", false);
        grid.set_column_frozen("Name", true);
        assert!(!grid.is_column_visible("Active"));
        grid.materialize();
        assert!(!grid.column("Active").unwrap().is_visible());
        assert!(grid.column("Name").unwrap().is_frozen());
        grid.set_column_resizable("Age", false);
        assert!(!grid.column("Age").unwrap().is_resizable());
        let row = Person::new("Ada", 36);
        assert_eq!(grid.render_row(&row).len(), 2);
    }

    struct Ordered;

    impl GridHooks<Person> for Ordered {
        fn column_order(&self, name: &str) -> Option<i32> {
            Some(match name {
                "Age" => 0,
                "Name" => 1,
                _ => 2,
            })
        }

        fn include_column(&self, name: &str) -> Option<bool> {
            (name == "DateOfBirth").then_some(false)
        }

        fn header(&self, name: &str) -> Option<String> {
            (name == "Age").then(|| "Years".to_string())
        }
    }

    #[test]
    fn test_hooks_filter_order_and_header() {
        let mut grid = GridColumnBuilder::new(
            Rc::new(person_type_with_birthday()),
            Rc::new(Environment::default()),
        );
        grid.set_hooks(Rc::new(Ordered));
        grid.materialize();
        assert_eq!(
            grid.column_keys(),
            vec!["Age", "Name", "Active", "Summary"]
        );
        assert_eq!(grid.column("Age").unwrap().header(), "Years");
        assert_eq!(grid.column("Name").unwrap().header(), "Name");
    }

    #[test]
    fn test_booleans_render_as_configured_text() {
        let mut grid = builder();
        grid.materialize();
        let mut row = Person::new("Ada", 36);
        row.active = false;
        assert_eq!(
            grid.render_cell("Active", &row),
            Some(CellContent::Text("No".to_string()))
        );
    }
}
