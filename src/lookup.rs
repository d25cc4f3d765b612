use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use voter_search::builder::TableBuilder;
use voter_search::*;

use std::fs;
use std::path::{Path, PathBuf};

use crate::args::Args;
use crate::lookup::config_reader::*;
use crate::lookup::loader::{DataLoader, LoadedTable};
use crate::lookup::presenter::*;

pub mod config_reader;
pub mod io_common;
mod io_csv;
mod io_excel;
pub mod loader;
pub mod presenter;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum LookupError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("No worksheet found in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {name:?} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("No header row found in {path}"))]
    MissingHeader { path: String },
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno}"))]
    CsvRecord { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the configuration"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Invalid voter table in {path}"))]
    InvalidTable { source: TableError, path: String },
    #[snafu(display("Unknown input type {input_type:?} (expected 'excel' or 'csv')"))]
    UnknownInputType { input_type: String },
    #[snafu(display("Unknown output format {format:?} (expected 'text' or 'json')"))]
    UnknownFormat { format: String },
    #[snafu(display("Error serializing the results"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing the results"))]
    WritingOutput { source: std::io::Error },
    #[snafu(display("Error reading the search terms"))]
    ReadingInput { source: std::io::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type LookupResult<T> = Result<T, LookupError>;

/// The kind of file holding the voter roll.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Excel,
    Csv,
}

impl InputType {
    pub fn parse(s: &str) -> LookupResult<InputType> {
        match s.to_lowercase().as_str() {
            "excel" | "xlsx" | "xls" | "ods" => Ok(InputType::Excel),
            "csv" => Ok(InputType::Csv),
            _ => UnknownInputTypeSnafu { input_type: s }.fail(),
        }
    }

    /// Guesses the type from the extension. Anything but `.csv` is a workbook.
    pub fn from_path(path: &Path) -> InputType {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputType::Csv,
            _ => InputType::Excel,
        }
    }
}

/// A table as read from a file, before any normalization.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Where the voter roll is read from.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SourceSettings {
    pub input_type: InputType,
    pub path: PathBuf,
    pub worksheet: Option<String>,
}

/// Reads the source and builds the voter table.
pub fn read_voter_table(source: &SourceSettings, columns: &ColumnNames) -> LookupResult<VoterTable> {
    let p2 = source.path.display().to_string();
    info!("Attempting to read voter file {:?}", p2);
    let raw = match source.input_type {
        InputType::Excel => io_excel::read_excel_file(&source.path, source.worksheet.as_deref()),
        InputType::Csv => io_csv::read_csv_file(&source.path),
    }?;
    debug!(
        "read_voter_table: {} columns, {} rows",
        raw.columns.len(),
        raw.rows.len()
    );
    build_table(raw, columns, &p2)
}

fn build_table(raw: RawTable, columns: &ColumnNames, path: &str) -> LookupResult<VoterTable> {
    let mut builder = TableBuilder::new(raw.columns, columns).context(InvalidTableSnafu { path })?;
    let mut skipped = 0;
    for row in raw.rows.iter() {
        if !builder.add_row(row) {
            skipped += 1;
        }
    }
    if skipped > 0 {
        debug!("build_table: skipped {} blank rows", skipped);
    }
    let table = builder.build();
    info!("Loaded {} voter records from {:?}", table.len(), path);
    Ok(table)
}

/// The outcome of a lookup run, as seen by the command line.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RunStatus {
    Done,
    LoadFailed,
    /// The file was read but holds no record to search.
    NoRecords,
    MissingInput,
}

pub fn run_lookup(args: &Args) -> LookupResult<RunStatus> {
    let config = match args.config.clone() {
        Some(config_path) => {
            let config = read_config(&config_path)?;
            info!("config: {:?}", config);
            let root_p = Path::new(config_path.as_str())
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            Some((config, root_p))
        }
        None => None,
    };
    let settings = resolve_settings(args, config.as_ref())?;
    info!("settings: {:?}", settings);

    let loader = DataLoader::new(settings.source.clone(), settings.columns.clone());

    let stdout = std::io::stdout();
    let mut presenter = Presenter::new(stdout.lock(), settings.format);

    if args.name.is_none() && args.relation.is_none() {
        let stdin = std::io::stdin();
        return presenter.run_session(&settings.title, &loader, stdin.lock());
    }

    let loaded = loader.load();
    if let Some(status) = presenter.check_loaded(&loaded)? {
        return Ok(status);
    }
    let outcome = handle_search(
        &loaded.table,
        args.name.as_deref().unwrap_or(""),
        args.relation.as_deref().unwrap_or(""),
    );
    presenter.render_outcome(&outcome)?;
    if outcome == SearchOutcome::MissingInput {
        Ok(RunStatus::MissingInput)
    } else {
        Ok(RunStatus::Done)
    }
}
