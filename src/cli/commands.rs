//! Command dispatch
//!
//! Loads the input file once, then runs the requested command against the
//! store. Input and output are passed in so the whole flow can be driven from
//! tests.

use crate::cli::args::{CliArgs, Command};
use crate::cli::menu::run_menu;
use crate::config::{IngestConfig, MalformedLinePolicy};
use crate::core::{IngestSummary, RecordStore};
use crate::io::Presenter;
use crate::types::error::UNNAMED_SOURCE;
use crate::types::RetailError;
use log::{error, info};
use std::io::{BufRead, Read, Write};
use std::path::Path;

/// Ingest the input file
///
/// A source that fails part-way leaves the records read so far; they are kept
/// when there are any. A strict-policy parse failure is always fatal.
///
/// # Arguments
///
/// * `path` - CSV file to load
/// * `config` - Ingestion policies
///
/// # Returns
///
/// * `Ok(RecordStore)` with every record read, possibly a partial load
/// * `Err(RetailError)` when the failure leaves nothing usable
pub fn load_store(path: &Path, config: &IngestConfig) -> Result<RecordStore, RetailError> {
    let mut store = RecordStore::new();
    let result = store.ingest_path(path, config);
    settle_load(store, result, config, &path.display().to_string())
}

/// Ingest an already open source, with the same failure rules as `load_store`
pub fn load_reader<R: Read>(source: R, config: &IngestConfig) -> Result<RecordStore, RetailError> {
    let mut store = RecordStore::new();
    let result = store.ingest_reader(source, config);
    settle_load(store, result, config, UNNAMED_SOURCE)
}

fn settle_load(
    store: RecordStore,
    result: Result<IngestSummary, RetailError>,
    config: &IngestConfig,
    source_name: &str,
) -> Result<RecordStore, RetailError> {
    match result {
        Ok(summary) => {
            info!(
                "Loaded {} of {} lines from {}",
                summary.records_appended, summary.lines_read, source_name
            );
            Ok(store)
        }
        Err(e @ RetailError::MalformedLine { .. })
            if config.malformed == MalformedLinePolicy::Strict =>
        {
            Err(e)
        }
        Err(e) if store.is_empty() => Err(e),
        Err(e) => {
            error!("{}", e);
            error!("Continuing with the {} records read before the failure", store.len());
            Ok(store)
        }
    }
}

/// Run the command selected on the command line
pub fn run(args: &CliArgs, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<(), RetailError> {
    let config = args.to_ingest_config();
    let store = load_store(&args.input_file, &config)?;
    let presenter = Presenter::new(args.format, args.row_limit());

    match args.command() {
        Command::Products => presenter.products(&store, out),
        Command::Countries => presenter.countries(&store, out),
        Command::Report { .. } => {
            presenter.report(&store.report(), out)
        }
        Command::Search { stock_code } => {
            let product = store.find_by_stock_code(&stock_code);
            if product.is_none() {
                info!("Stock code '{}' not found", stock_code);
            }
            presenter.lookup(&stock_code, product, out)
        }
        Command::Menu => run_menu(&store, &presenter, input, out),
    }
}
