use comfy_table::{presets, CellAlignment, ContentArrangement, Table};
use harmonygen::{
    model::TypeRegistry,
    stubs::{PatchKind, ReportRow},
};
use serde::Serialize;

/// Column alignment for tabular output.
#[derive(Clone, Copy)]
pub enum Align {
    Left,
    Right,
}

/// Whitespace-aligned columns for terminal output, sized to the widest entry.
pub struct TabWriter {
    table: Table,
}

impl TabWriter {
    /// Each column is a `(header, alignment)` pair.
    pub fn new(columns: Vec<(&str, Align)>) -> Self {
        let mut table = Table::new();
        table
            .load_preset(presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic);

        let headers: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
        table.set_header(headers);

        // First column: no left padding. Last column: no right padding.
        let last = columns.len().saturating_sub(1);
        for (i, (_, align)) in columns.iter().enumerate() {
            let cell_align = match align {
                Align::Left => CellAlignment::Left,
                Align::Right => CellAlignment::Right,
            };
            if let Some(col) = table.column_mut(i) {
                col.set_cell_alignment(cell_align);
                let pad_left = if i == 0 { 0 } else { 1 };
                let pad_right = if i == last { 0 } else { 1 };
                col.set_padding((pad_left, pad_right));
            }
        }

        Self { table }
    }

    /// Add a row. Values are given in column order.
    pub fn row(&mut self, values: Vec<String>) {
        self.table.add_row(values);
    }

    /// Renders the table with trailing whitespace removed from every line.
    pub fn render(&self) -> String {
        self.table
            .to_string()
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }
}

/// Prints the type listing to stdout.
pub fn print_types(registry: &TypeRegistry) {
    let mut writer = TabWriter::new(vec![
        ("#", Align::Right),
        ("Full name", Align::Left),
        ("Name", Align::Left),
        ("Display", Align::Left),
    ]);

    for (index, entry) in registry.iter().enumerate() {
        writer.row(vec![
            (index + 1).to_string(),
            entry.full_name.clone(),
            entry.name.clone(),
            entry.display.clone(),
        ]);
    }

    writer.print();
}

/// JSON document written by `--format json`.
#[derive(Debug, Default, Serialize)]
pub struct JsonReport {
    pub modules: Vec<JsonModule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<JsonType>>,
}

#[derive(Debug, Serialize)]
pub struct JsonModule {
    pub name: String,
    pub path: String,
    pub rows: Vec<JsonRow>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JsonRow {
    Header(String),
    Stubs {
        prefix: Vec<String>,
        replacement: Vec<String>,
        postfix: Vec<String>,
    },
}

impl From<&ReportRow> for JsonRow {
    fn from(row: &ReportRow) -> Self {
        match row {
            ReportRow::Header(header) => JsonRow::Header(header.clone()),
            ReportRow::Stubs(stubs) => JsonRow::Stubs {
                prefix: stubs.get(PatchKind::Prefix).lines().to_vec(),
                replacement: stubs.get(PatchKind::Replacement).lines().to_vec(),
                postfix: stubs.get(PatchKind::Postfix).lines().to_vec(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonType {
    pub full_name: String,
    pub name: String,
    pub display: String,
}

impl JsonType {
    pub fn listing(registry: &TypeRegistry) -> Vec<JsonType> {
        registry
            .iter()
            .map(|entry| JsonType {
                full_name: entry.full_name.clone(),
                name: entry.name.clone(),
                display: entry.display.clone(),
            })
            .collect()
    }
}
