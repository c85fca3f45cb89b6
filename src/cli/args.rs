use crate::config::{
    AggregateSelection, DuplicatePolicy, IngestConfig, MalformedLinePolicy, ReportSection,
};
use crate::io::presenter::{OutputFormat, DEFAULT_LIMIT};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Load an online retail CSV file and report on it
#[derive(Parser, Debug)]
#[command(name = "retail-report")]
#[command(about = "Load an online retail CSV file and report on it", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing transaction lines
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// What to do with lines that cannot be parsed
    #[arg(
        long = "on-malformed",
        value_name = "POLICY",
        default_value = "skip",
        global = true,
        help = "Malformed line policy: 'skip' logs and continues, 'strict' stops ingestion"
    )]
    pub on_malformed: MalformedLinePolicy,

    /// What to do with a stock code seen before
    #[arg(
        long = "on-duplicate",
        value_name = "POLICY",
        default_value = "merge",
        global = true,
        help = "Duplicate stock code policy: 'merge' keeps every occurrence, 'overwrite' keeps the latest"
    )]
    pub on_duplicate: DuplicatePolicy,

    /// Output format
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "table",
        global = true,
        help = "Output format: 'table' or 'csv'"
    )]
    pub format: OutputFormat,

    /// Row limit for listings
    #[arg(
        long = "limit",
        value_name = "ROWS",
        global = true,
        help = "Rows shown by the products and total-sold listings (default: 10, 0: no limit)"
    )]
    pub limit: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What to do once the file is loaded
#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the products table
    Products,
    /// List the distinct customer countries
    Countries,
    /// Print total products sold and total revenue per country
    Report {
        /// Print a single section
        #[arg(long = "only", value_name = "SECTION")]
        only: Option<ReportSection>,
    },
    /// Look up a product by its exact stock code
    Search {
        #[arg(value_name = "STOCK_CODE")]
        stock_code: String,
    },
    /// Interactive menu (default)
    Menu,
}

impl CliArgs {
    /// The command to run, the menu when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }

    /// Row limit for listings; `0` lifts the limit
    pub fn row_limit(&self) -> Option<usize> {
        match self.limit {
            None => Some(DEFAULT_LIMIT),
            Some(0) => None,
            Some(rows) => Some(rows),
        }
    }

    /// Build the ingestion policy from CLI arguments
    ///
    /// `report --only` narrows the aggregates; every other command computes both.
    pub fn to_ingest_config(&self) -> IngestConfig {
        let aggregates = match &self.command {
            Some(Command::Report { only }) => AggregateSelection::from(*only),
            _ => AggregateSelection::all(),
        };

        IngestConfig::new(self.on_malformed, self.on_duplicate, aggregates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_menu(&["program", "input.csv"], Command::Menu)]
    #[case::explicit_menu(&["program", "input.csv", "menu"], Command::Menu)]
    #[case::products(&["program", "input.csv", "products"], Command::Products)]
    #[case::countries(&["program", "input.csv", "countries"], Command::Countries)]
    #[case::report(&["program", "input.csv", "report"], Command::Report { only: None })]
    #[case::report_sold(
        &["program", "input.csv", "report", "--only", "sold"],
        Command::Report { only: Some(ReportSection::Sold) }
    )]
    #[case::search(
        &["program", "input.csv", "search", "85123A"],
        Command::Search { stock_code: "85123A".to_string() }
    )]
    fn test_command_parsing(#[case] args: &[&str], #[case] expected: Command) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.command(), expected);
    }

    #[rstest]
    #[case::defaults(&["program", "input.csv"], MalformedLinePolicy::Skip, DuplicatePolicy::Merge)]
    #[case::strict(&["program", "--on-malformed", "strict", "input.csv"], MalformedLinePolicy::Strict, DuplicatePolicy::Merge)]
    #[case::overwrite(&["program", "--on-duplicate", "overwrite", "input.csv"], MalformedLinePolicy::Skip, DuplicatePolicy::Overwrite)]
    #[case::after_subcommand(
        &["program", "input.csv", "products", "--on-malformed", "strict", "--on-duplicate", "overwrite"],
        MalformedLinePolicy::Strict,
        DuplicatePolicy::Overwrite
    )]
    fn test_policy_options(
        #[case] args: &[&str],
        #[case] malformed: MalformedLinePolicy,
        #[case] duplicates: DuplicatePolicy,
    ) {
        let config = CliArgs::try_parse_from(args).unwrap().to_ingest_config();
        assert_eq!(config.malformed, malformed);
        assert_eq!(config.duplicates, duplicates);
    }

    #[rstest]
    #[case::report_all(&["program", "input.csv", "report"], AggregateSelection::all())]
    #[case::report_revenue(
        &["program", "input.csv", "report", "--only", "revenue"],
        AggregateSelection::only(ReportSection::Revenue)
    )]
    #[case::menu(&["program", "input.csv"], AggregateSelection::all())]
    fn test_aggregate_selection(#[case] args: &[&str], #[case] expected: AggregateSelection) {
        let config = CliArgs::try_parse_from(args).unwrap().to_ingest_config();
        assert_eq!(config.aggregates, expected);
    }

    #[rstest]
    #[case::default(&["program", "input.csv"], Some(10))]
    #[case::custom(&["program", "--limit", "25", "input.csv"], Some(25))]
    #[case::unlimited(&["program", "input.csv", "products", "--limit", "0"], None)]
    fn test_row_limit(#[case] args: &[&str], #[case] expected: Option<usize>) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.row_limit(), expected);
    }

    #[rstest]
    #[case::table(&["program", "input.csv"], OutputFormat::Table)]
    #[case::csv(&["program", "--format", "csv", "input.csv"], OutputFormat::Csv)]
    fn test_format_option(#[case] args: &[&str], #[case] expected: OutputFormat) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.format, expected);
    }

    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::invalid_policy(&["program", "--on-malformed", "ignore", "input.csv"])]
    #[case::invalid_format(&["program", "--format", "xml", "input.csv"])]
    #[case::search_without_code(&["program", "input.csv", "search"])]
    #[case::invalid_section(&["program", "input.csv", "report", "--only", "profit"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
