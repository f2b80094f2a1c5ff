//! Shared helpers for the integration tests.

#![allow(dead_code)]

#[path = "../../src/test/image.rs"]
mod image;

pub use image::*;

use harmonygen::prelude::*;

/// Loads `image` and generates the rows selected by `filters`.
pub fn generate_rows(image: ImageBuilder, filters: &[&str], markup: Markup) -> (Vec<ReportRow>, TypeRegistry) {
    let module = CilModule::from_mem(image.build()).expect("synthetic image loads");
    let mut registry = TypeRegistry::new();
    let rows = generate(&module, &TypeFilter::new(filters), &mut registry, markup);
    (rows, registry)
}

/// The stub names of `rows`, headers as `# Name`.
pub fn stub_names(rows: &[ReportRow]) -> Vec<String> {
    rows.iter()
        .map(|row| match row {
            ReportRow::Header(name) => format!("# {name}"),
            ReportRow::Stubs(stubs) => stubs
                .get(PatchKind::Prefix)
                .lines()
                .iter()
                .find_map(|line| line.strip_prefix("private static void "))
                .and_then(|rest| rest.split('(').next())
                .expect("prefix declaration")
                .to_string(),
        })
        .collect()
}
