//! The `form` and `grid` subcommands

use std::fs;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use soform_core::{EnvironmentConfig, Value};
use soform_gui::{Application, DataGrid, HasColumns};
use tracing::debug;

use crate::demo::{contact_type, Contact};

/// Options for `soform form`
#[derive(Debug, Clone, Default)]
pub struct FormOptions {
    /// JSON record to edit; an empty contact when absent
    pub record: Option<std::path::PathBuf>,
    /// `Field=value` edits, applied in order
    pub set: Vec<String>,
    /// Fields that must not be empty
    pub required: Vec<String>,
}

/// Options for `soform grid`
#[derive(Debug, Clone, Default)]
pub struct GridOptions {
    /// JSON array of records
    pub records: std::path::PathBuf,
    /// Columns to show; all when empty
    pub columns: Vec<String>,
}

fn read_json(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read `{}`", path.display()))
}

fn split_edit(edit: &str) -> Result<(&str, &str)> {
    match edit.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => Ok((field.trim(), value)),
        _ => bail!("Invalid edit `{edit}`, expected FIELD=VALUE"),
    }
}

/// Edit one record through a data form
///
/// Prints the committed record as JSON and returns true, or prints the
/// form's error and returns false.
pub fn run_form(config: EnvironmentConfig, options: &FormOptions, out: &mut impl Write) -> Result<bool> {
    let contact: Contact = match &options.record {
        Some(path) => serde_json::from_str(&read_json(path)?)
            .with_context(|| format!("`{}` is not a contact record", path.display()))?,
        None => Contact::default(),
    };

    let mut app = Application::new(config);
    let mut form = app.create_data_form(Rc::new(contact_type()));
    form.form_mut().set_object(Some(contact), true);
    app.execute_form(&mut form)?;

    for name in &options.required {
        form.form_mut()
            .set_required(name, true)
            .with_context(|| format!("Cannot require `{name}`"))?;
    }
    for edit in &options.set {
        let (field, raw) = split_edit(edit)?;
        let value = if raw.is_empty() {
            Value::Null
        } else {
            Value::string(raw)
        };
        form.form_mut()
            .set_value(field, value)
            .with_context(|| format!("Cannot edit `{field}`"))?;
        debug!(field, raw, "edited");
    }
    form.form().dump_values();

    if !form.ok() {
        let message = form
            .form()
            .error_text()
            .unwrap_or_else(|| "Commit failed".to_string());
        writeln!(out, "error: {message}")?;
        return Ok(false);
    }
    app.forget(form.view().caption());

    let contact = form
        .form()
        .object()
        .context("Form has no record after commit")?;
    writeln!(out, "{}", serde_json::to_string_pretty(contact)?)?;
    Ok(true)
}

/// Render records as a text table
pub fn run_grid(config: EnvironmentConfig, options: &GridOptions, out: &mut impl Write) -> Result<()> {
    let rows: Vec<Contact> = serde_json::from_str(&read_json(&options.records)?)
        .with_context(|| format!("`{}` is not a list of contacts", options.records.display()))?;

    let app = Application::new(config);
    let bean_type = Rc::new(contact_type());
    let mut grid = if options.columns.is_empty() {
        app.create_grid(bean_type)
    } else {
        let names: Vec<&str> = options.columns.iter().map(String::as_str).collect();
        DataGrid::with_columns(bean_type, Rc::clone(app.environment()), &names)
    };
    grid.set_rows(rows);
    if grid.column_count() == 0 {
        bail!("None of the requested columns exist");
    }

    let headers = grid.headers();
    let cells: Vec<Vec<String>> = grid
        .render_rows()
        .into_iter()
        .map(|row| row.iter().map(|c| c.as_str().replace("<br/>", " / ")).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(out, "{}", grid.caption())?;
    write_row(out, &headers, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, &rule, &widths)?;
    for row in &cells {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row(out: &mut impl Write, cells: &[String], widths: &[usize]) -> Result<()> {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", line.join(" | ").trim_end())?;
    Ok(())
}
