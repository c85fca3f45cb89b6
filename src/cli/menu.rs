//! Interactive console menu
//!
//! Reads numbered choices line by line until the user exits or input ends.

use crate::config::AggregateSelection;
use crate::core::RecordStore;
use crate::io::Presenter;
use crate::types::RetailError;
use log::debug;
use std::io::{BufRead, Write};

const STDIN: &str = "<stdin>";

const MENU: &str = "\
+----------------------------------------------+
|      Welcome To Sales Management System      |
+----------------------------------------------+
|            Please choose an option           |
|                                              |
| 1. Print Products Table                      |
| 2. Generate Business Report                  |
| 3. Search Product By StockCode               |
| 4. List Unique Countries                     |
| 5. Exit                                      |
|                                              |
+----------------------------------------------+";

const SEPARATOR: &str = "\n\n=============================================================================================================================================\n\n";

/// One menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Products,
    Report,
    Search,
    Countries,
    Exit,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Choice::Products),
            "2" => Some(Choice::Report),
            "3" => Some(Choice::Search),
            "4" => Some(Choice::Countries),
            "5" => Some(Choice::Exit),
            _ => None,
        }
    }
}

// None at end of input
fn read_line(input: &mut dyn BufRead) -> Result<Option<String>, RetailError> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| RetailError::source_unreadable(STDIN, e))?;
    Ok((read > 0).then_some(line))
}

fn prompt(out: &mut dyn Write, text: &str) -> Result<(), RetailError> {
    write!(out, "{}", text).map_err(RetailError::output)?;
    out.flush().map_err(RetailError::output)
}

/// Run the menu loop against a loaded store
///
/// Unknown choices print a message and show the menu again. End of input
/// behaves like choosing Exit.
pub fn run_menu(
    store: &RecordStore,
    presenter: &Presenter,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), RetailError> {
    let mut first = true;

    loop {
        if !first {
            write!(out, "{}", SEPARATOR).map_err(RetailError::output)?;
        }
        first = false;

        writeln!(out, "{}", MENU).map_err(RetailError::output)?;
        prompt(out, "Enter your choice: ")?;

        let Some(line) = read_line(input)? else {
            writeln!(out).map_err(RetailError::output)?;
            break;
        };
        debug!("Menu input: {:?}", line.trim());

        match Choice::parse(&line) {
            Some(Choice::Products) => presenter.products(store, out)?,
            Some(Choice::Report) => {
                let report = store.business_report(AggregateSelection::all());
                presenter.report(&report, out)?;
            }
            Some(Choice::Search) => {
                prompt(out, "Enter StockCode to search for a product: ")?;
                let stock_code = read_line(input)?.unwrap_or_default();
                let stock_code = stock_code.trim();
                presenter.lookup(stock_code, store.find_by_stock_code(stock_code), out)?;
            }
            Some(Choice::Countries) => presenter.countries(store, out)?,
            Some(Choice::Exit) => break,
            None => writeln!(out, "Invalid choice. Please try again.").map_err(RetailError::output)?,
        }
    }

    writeln!(out, "Goodbye!").map_err(RetailError::output)
}
