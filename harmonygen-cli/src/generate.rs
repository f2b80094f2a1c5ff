use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use harmonygen::{
    model::TypeRegistry,
    report::{HtmlReport, LibraryList, Markup, ReportWriter, TextReport},
    stubs::TypeFilter,
    CilModule,
};
use log::{debug, info};

use crate::{
    app::{Cli, Format},
    output::{self, JsonModule, JsonReport, JsonRow, JsonType},
};

/// Printed when the run has no type filter.
pub const NO_FILTER_WARNING: &str = "Warning: No Type filter specified. This will likely produce an HTML file that your browser will struggle with. It is recommended to run this program again, this time passing Type names as command-line arguments.";

/// The console lines announcing the filter.
pub fn filter_banner(filters: &[String]) -> Vec<String> {
    if filters.is_empty() {
        return vec![NO_FILTER_WARNING.to_string()];
    }

    let mut lines = vec!["Searching for the following Types:".to_string()];
    lines.extend(filters.iter().map(|filter| format!("    \"{filter}\"")));
    lines
}

/// Reads the library list, reporting entries that do not exist.
///
/// Returns `None` after printing the reason if there is nothing to process.
pub fn load_libraries(path: &Path) -> Option<Vec<PathBuf>> {
    let list = match LibraryList::load(path) {
        Ok(list) => list,
        Err(harmonygen::Error::LibraryList(message)) => {
            println!("{message}");
            return None;
        }
        Err(error) => {
            println!("Failed to read {}: {error}", path.display());
            return None;
        }
    };

    for missing in list.missing() {
        println!("File Not Found: {}", missing.display());
    }

    match list.require_libraries() {
        Ok(libraries) => Some(libraries.to_vec()),
        Err(error) => {
            if let harmonygen::Error::LibraryList(message) = error {
                println!("{message}");
            }
            None
        }
    }
}

fn load_module(path: &Path) -> anyhow::Result<CilModule> {
    CilModule::from_file(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Sibling path the report is written to before it replaces the output file.
fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    output.with_file_name(name)
}

/// Writes the stubs of every library into the report file of `cli`.
///
/// The report is moved into place only once every library has been written, so a failed
/// run leaves an existing output file untouched.
pub fn run(cli: &Cli, libraries: &[PathBuf]) -> anyhow::Result<()> {
    let filter = TypeFilter::new(&cli.filters);
    let mut registry = TypeRegistry::new();

    let partial = partial_path(&cli.output);
    let written = write_output(cli, &partial, libraries, &filter, &mut registry);
    if let Err(error) = written {
        // best effort, the write error is the one worth reporting
        let _ = fs::remove_file(&partial);
        return Err(error);
    }

    fs::rename(&partial, &cli.output).with_context(|| {
        format!(
            "failed to move {} to {}",
            partial.display(),
            cli.output.display()
        )
    })?;

    if cli.list_types {
        output::print_types(&registry);
    }

    Ok(())
}

fn write_output(
    cli: &Cli,
    path: &Path,
    libraries: &[PathBuf],
    filter: &TypeFilter,
    registry: &mut TypeRegistry,
) -> anyhow::Result<()> {
    let file =
        fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let out = BufWriter::new(file);

    match cli.format {
        Format::Html => {
            let report = HtmlReport::new(out)
                .with_context(|| format!("failed to write {}", path.display()))?;
            write_report(Box::new(report), libraries, filter, registry, cli.list_types)
        }
        Format::Text => {
            let report = TextReport::new(out);
            write_report(Box::new(report), libraries, filter, registry, cli.list_types)
        }
        Format::Json => write_json(out, libraries, filter, registry, cli.list_types),
    }
}

fn write_report(
    mut report: Box<dyn ReportWriter>,
    libraries: &[PathBuf],
    filter: &TypeFilter,
    registry: &mut TypeRegistry,
    list_types: bool,
) -> anyhow::Result<()> {
    let markup = report.markup();

    for library in libraries {
        let module = load_module(library)?;
        let rows = harmonygen::generate(&module, filter, registry, markup);
        info!("{}: {} rows", module.name(), rows.len());

        report
            .write_module(module.name(), &rows)
            .with_context(|| format!("failed to write the stubs of {}", library.display()))?;
    }

    if list_types {
        report.write_listing(registry)?;
    }

    report.finish().context("failed to finish the report")?;
    Ok(())
}

fn write_json(
    mut out: impl Write,
    libraries: &[PathBuf],
    filter: &TypeFilter,
    registry: &mut TypeRegistry,
    list_types: bool,
) -> anyhow::Result<()> {
    let mut document = JsonReport::default();

    for library in libraries {
        let module = load_module(library)?;
        let rows = harmonygen::generate(&module, filter, registry, Markup::Plain);
        debug!("{}: {} rows", module.name(), rows.len());

        document.modules.push(JsonModule {
            name: module.name().to_string(),
            path: library.display().to_string(),
            rows: rows.iter().map(JsonRow::from).collect(),
        });
    }

    if list_types {
        document.types = Some(JsonType::listing(registry));
    }

    serde_json::to_writer_pretty(&mut out, &document)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
