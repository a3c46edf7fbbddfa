//! A grid of bean rows
//!
//! [`DataGrid`] owns the rows, single selection and an optional view, and
//! delegates everything about columns to a [`GridColumnBuilder`]. The
//! column operations are shared through [`HasColumns`] so that other row
//! containers can offer the same surface.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use soform_core::{BeanType, ValueType};

use crate::environment::Environment;
use crate::grid::{CellContent, GridColumnBuilder, Renderer};
use crate::view::View;

/// Column operations for anything built on a [`GridColumnBuilder`]
pub trait HasColumns<B: 'static> {
    fn column_builder(&self) -> &GridColumnBuilder<B>;

    fn column_builder_mut(&mut self) -> &mut GridColumnBuilder<B>;

    fn create_column(&mut self, name: &str) -> bool {
        self.column_builder_mut().create_column(name)
    }

    fn create_column_fn(
        &mut self,
        name: &str,
        value_type: ValueType,
        f: impl Fn(&B) -> soform_core::Value + 'static,
    ) -> bool
    where
        Self: Sized,
    {
        self.column_builder_mut().create_column_fn(name, value_type, f)
    }

    fn create_column_renderer(&mut self, name: &str, renderer: Renderer<B>) -> bool {
        self.column_builder_mut()
            .create_column_renderer(name, renderer)
    }

    fn set_column_visible(&mut self, name: &str, visible: bool) {
        self.column_builder_mut().set_column_visible(name, visible);
    }

    fn set_column_resizable(&mut self, name: &str, resizable: bool) {
        self.column_builder_mut()
            .set_column_resizable(name, resizable);
    }

    fn set_column_frozen(&mut self, name: &str, frozen: bool) {
        self.column_builder_mut().set_column_frozen(name, frozen);
    }

    fn set_hierarchy_column(&mut self, name: &str) -> bool {
        self.column_builder_mut().set_hierarchy_column(name)
    }

    fn column_count(&mut self) -> usize {
        self.column_builder_mut().column_count()
    }
}

/// Rows of `B` shown through generated columns
pub struct DataGrid<B> {
    columns: GridColumnBuilder<B>,
    rows: Vec<B>,
    caption: Option<String>,
    selected: Option<usize>,
    last_rendered: Cell<Option<usize>>,
    reordering: bool,
    view: Option<View>,
}

impl<B: 'static> DataGrid<B> {
    pub fn new(bean_type: Rc<BeanType<B>>, env: Rc<Environment>) -> Self {
        Self::from_builder(GridColumnBuilder::new(bean_type, env))
    }

    /// Grid with exactly the given columns
    pub fn with_columns(bean_type: Rc<BeanType<B>>, env: Rc<Environment>, names: &[&str]) -> Self {
        Self::from_builder(GridColumnBuilder::with_columns(bean_type, env, names))
    }

    fn from_builder(columns: GridColumnBuilder<B>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            caption: None,
            selected: None,
            last_rendered: Cell::new(None),
            reordering: false,
            view: None,
        }
    }

    /// Build the columns; called when the grid is first shown
    pub fn attach(&mut self) {
        self.columns.materialize();
    }

    // ---- rows ----

    /// Replace the rows; the selection is cleared
    pub fn set_rows(&mut self, rows: Vec<B>) {
        self.rows = rows;
        self.selected = None;
        self.last_rendered.set(None);
    }

    pub fn push_row(&mut self, row: B) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn rows(&self) -> &[B] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&B> {
        self.rows.get(index)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    // ---- rendering ----

    /// Render one cell; the grid's `render` hook sees each row change
    #[must_use]
    pub fn render_cell(&self, index: usize, column: &str) -> Option<CellContent> {
        let row = self.rows.get(index)?;
        if self.last_rendered.get() != Some(index) {
            self.last_rendered.set(Some(index));
            self.columns.hooks().render(row);
        }
        self.columns.render_cell(column, row)
    }

    /// Render every row's visible cells
    pub fn render_rows(&mut self) -> Vec<Vec<CellContent>> {
        self.attach();
        let hooks = Rc::clone(self.columns.hooks());
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                if self.last_rendered.get() != Some(index) {
                    self.last_rendered.set(Some(index));
                    hooks.render(row);
                }
                self.columns.render_row(row)
            })
            .collect()
    }

    /// Header texts of the visible columns
    pub fn headers(&mut self) -> Vec<String> {
        self.attach();
        self.columns
            .columns()
            .iter()
            .filter(|c| c.is_visible())
            .map(|c| c.header().to_string())
            .collect()
    }

    // ---- selection ----

    /// Select a row; returns false if the index is out of range
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.rows.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn selected(&self) -> Option<&B> {
        self.selected.and_then(|i| self.rows.get(i))
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    // ---- presentation ----

    /// Explicit caption, or one derived from the bean type
    #[must_use]
    pub fn caption(&self) -> String {
        self.caption.clone().unwrap_or_else(|| {
            self.columns
                .environment()
                .type_caption(self.columns.bean_type().name())
        })
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = Some(caption.into());
    }

    /// The grid's view, created on demand when `create` is set
    pub fn view(&mut self, create: bool) -> Option<&mut View> {
        if self.view.is_none() && create {
            let mut view = View::new(self.caption());
            view.set_component(true);
            self.view = Some(view);
        }
        self.view.as_mut()
    }

    /// Minimum width for the visible columns, e.g. `"360px"`
    pub fn min_width(&mut self) -> String {
        self.attach();
        let visible = self
            .columns
            .columns()
            .iter()
            .filter(|c| c.is_visible())
            .count();
        self.columns.environment().min_grid_width(visible)
    }

    pub fn set_column_reordering_allowed(&mut self, allowed: bool) {
        self.reordering = allowed;
    }

    #[must_use]
    pub fn is_column_reordering_allowed(&self) -> bool {
        self.reordering
    }

    /// Whether rows are shown as a tree
    #[must_use]
    pub fn is_tree(&self) -> bool {
        self.columns.hierarchy_column().is_some()
    }
}

impl<B: 'static> HasColumns<B> for DataGrid<B> {
    fn column_builder(&self) -> &GridColumnBuilder<B> {
        &self.columns
    }

    fn column_builder_mut(&mut self) -> &mut GridColumnBuilder<B> {
        &mut self.columns
    }
}

impl<B> fmt::Debug for DataGrid<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataGrid")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("caption", &self.caption)
            .field("selected", &self.selected)
            .field("reordering", &self.reordering)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridHooks;
    use soform_core::testutil::{person_type, sample_people, Person};
    use std::cell::RefCell;

    fn grid() -> DataGrid<Person> {
        let mut grid = DataGrid::new(Rc::new(person_type()), Rc::new(Environment::default()));
        grid.set_rows(sample_people());
        grid
    }

    #[test]
    fn test_render_rows() {
        let mut grid = grid();
        let rows = grid.render_rows();
        assert_eq!(rows.len(), 3);
        let texts: Vec<&str> = rows[1].iter().map(CellContent::as_str).collect();
        assert_eq!(texts, vec!["Grace", "No", "45"]);
        assert_eq!(grid.headers(), vec!["Name", "Active", "Age"]);
    }

    #[test]
    fn test_selection_is_single() {
        let mut grid = grid();
        assert!(grid.select(0));
        assert!(grid.select(2));
        assert_eq!(grid.selected().map(|p| p.name.as_str()), Some("Linus"));
        assert!(!grid.select(3));
        assert_eq!(grid.selected_index(), Some(2));
        grid.deselect();
        assert!(grid.selected().is_none());
    }

    #[test]
    fn test_caption_and_view() {
        let mut grid = grid();
        assert_eq!(grid.caption(), "Person");
        assert!(grid.view(false).is_none());
        grid.set_caption("People");
        let view = grid.view(true).unwrap();
        assert_eq!(view.caption(), "People");
        view.execute().unwrap();
        assert!(grid.view(false).unwrap().is_executing());
    }

    #[test]
    fn test_min_width_counts_visible_columns() {
        let mut grid = grid();
        assert_eq!(grid.min_width(), "360px");
        grid.set_column_visible("Age", false);
        assert_eq!(grid.min_width(), "240px");
    }

    struct Recording(Rc<RefCell<Vec<String>>>);

    impl GridHooks<Person> for Recording {
        fn render(&self, row: &Person) {
            self.0.borrow_mut().push(row.name.clone());
        }
    }

    #[test]
    fn test_render_hook_fires_on_row_change() {
        let mut grid = grid();
        let seen = Rc::new(RefCell::new(Vec::new()));
        grid.column_builder_mut()
            .set_hooks(Rc::new(Recording(Rc::clone(&seen))));
        grid.attach();
        grid.render_cell(0, "Name");
        grid.render_cell(0, "Age");
        grid.render_cell(1, "Name");
        assert_eq!(*seen.borrow(), vec!["Ada", "Grace"]);
    }

    #[test]
    fn test_has_columns_delegation() {
        let mut grid = DataGrid::with_columns(
            Rc::new(person_type()),
            Rc::new(Environment::default()),
            &["Age"],
        );
        assert!(grid.create_column_fn("Initial", ValueType::String, |p: &Person| {
            soform_core::Value::string(p.name.chars().take(1).collect::<String>())
        }));
        assert!(grid.set_hierarchy_column("Initial"));
        assert_eq!(grid.column_count(), 2);
        assert!(grid.is_tree());
        assert_eq!(grid.column_builder().column_keys(), vec!["Age", "Initial"]);
    }
}
