use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use salary_model::{ColumnSchema, EncodedRow, ProfileField};
use salary_standards::{FormCatalog, catalog};

/// Print the selectable values per field, marking the form default.
pub fn print_options(forms: FormCatalog) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Default"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for field in ProfileField::ALL {
        let default = forms.default_value(field);
        let options = forms.options(field);
        if options.is_empty() {
            table.add_row(vec![
                field_cell(field),
                dim_cell(format!("0-{} (years)", catalog::MAX_YEARS)),
                Cell::new(catalog::DEFAULT_YEARS),
            ]);
            continue;
        }
        for (idx, option) in options.iter().enumerate() {
            let label = if idx == 0 { field_cell(field) } else { Cell::new("") };
            let marker = if default == Some(*option) {
                Cell::new("*").fg(Color::Green)
            } else {
                Cell::new("")
            };
            table.add_row(vec![label, Cell::new(option), marker]);
        }
    }
    println!("{table}");
}

/// Print the column schema in model input order.
pub fn print_schema(schema: &ColumnSchema, origin: &str) {
    println!("Schema: {origin} ({} columns)", schema.len());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Column"),
        header_cell("Field"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, column) in schema.columns().iter().map(String::as_str).enumerate() {
        let field = ProfileField::ALL
            .into_iter()
            .find(|field| field.as_str() == column || field.owns_column(column));
        table.add_row(vec![
            Cell::new(idx),
            Cell::new(column),
            match field {
                Some(field) => Cell::new(field),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");
}

/// Print an encoded row; zero columns are hidden unless `all` is set.
pub fn print_encoded(row: &EncodedRow<'_>, all: bool) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Value")]);
    apply_encoded_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let mut hidden = 0usize;
    for (column, value) in row.iter() {
        if value == 0.0 && !all {
            hidden += 1;
            continue;
        }
        let value_cell = if value == 0.0 {
            dim_cell(value)
        } else {
            Cell::new(value).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![Cell::new(column), value_cell]);
    }
    println!("{table}");
    if hidden > 0 {
        println!("{hidden} zero-valued columns hidden (use --all to show them)");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 3 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Percentage(70)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
        ]);
    }
}

fn apply_encoded_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn field_cell(field: ProfileField) -> Cell {
    Cell::new(field)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}
