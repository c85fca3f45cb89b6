//! CSV format handling for retail records and report output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord, the 8 raw fields of one data line
//! - Line splitting with quoted-comma support
//! - Conversion from raw fields to `TransactionRecord`
//! - CSV serialization of listings and aggregates
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{ProductAggregate, RetailError, TransactionRecord, INVOICE_DATE_FORMAT};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::str::FromStr;

/// Number of columns of the retail CSV layout
pub const FIELD_COUNT: usize = 8;

/// Header of the retail CSV layout
pub const HEADER: [&str; FIELD_COUNT] = [
    "InvoiceNo",
    "StockCode",
    "Description",
    "Quantity",
    "InvoiceDate",
    "UnitPrice",
    "CustomerID",
    "Country",
];

/// Raw fields of one data line, quotes already stripped
///
/// Text fields are kept verbatim; numeric fields are trimmed during conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRecord {
    pub invoice_no: String,
    pub stock_code: String,
    pub description: String,
    pub quantity: String,
    pub invoice_date: String,
    pub unit_price: String,
    pub customer_id: String,
    pub country: String,
}

impl CsvRecord {
    /// Take the first 8 fields of a csv record
    ///
    /// Fields beyond the eighth are dropped. Fewer than 8 is a MalformedLine
    /// without a line number; callers that know it add it with `at_line`.
    pub fn from_string_record(record: &StringRecord) -> Result<Self, RetailError> {
        if record.len() < FIELD_COUNT {
            return Err(RetailError::malformed_line(
                None,
                format!("expected {} fields, found {}", FIELD_COUNT, record.len()),
            ));
        }

        let field = |index: usize| record.get(index).unwrap_or_default().to_string();

        Ok(CsvRecord {
            invoice_no: field(0),
            stock_code: field(1),
            description: field(2),
            quantity: field(3),
            invoice_date: field(4),
            unit_price: field(5),
            customer_id: field(6),
            country: field(7),
        })
    }

    /// The 8 fields in column order
    pub fn fields(&self) -> [&str; FIELD_COUNT] {
        [
            &self.invoice_no,
            &self.stock_code,
            &self.description,
            &self.quantity,
            &self.invoice_date,
            &self.unit_price,
            &self.customer_id,
            &self.country,
        ]
    }
}

/// Split one line (no header, no trailing newline needed) into its 8 fields
///
/// A field wrapped in double quotes may contain commas; the quotes are removed.
/// A quote left open runs to the end of the line and never past it.
pub fn split_line(line: &str) -> Result<CsvRecord, RetailError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Err(RetailError::malformed_line(None, "empty line"));
    }

    CsvRecord::from_string_record(&record)
}

/// Split and convert one line into a TransactionRecord
pub fn parse_line(line: &str) -> Result<TransactionRecord, RetailError> {
    split_line(line).and_then(convert_csv_record)
}

/// Convert raw fields into a TransactionRecord
///
/// - Quantity must be an integer (may be negative)
/// - InvoiceDate must match `yyyy-MM-dd HH:mm:ss`
/// - UnitPrice must be a decimal number
/// - CustomerID may be empty (0) or a decimal number truncated to an integer
///
/// Errors carry no line number; callers that know it add it with `at_line`.
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<TransactionRecord, RetailError> {
    let quantity = csv_record.quantity.trim().parse::<i32>().map_err(|_| {
        RetailError::malformed_line(
            None,
            format!("invalid quantity '{}'", csv_record.quantity),
        )
    })?;

    let invoice_date =
        NaiveDateTime::parse_from_str(csv_record.invoice_date.trim(), INVOICE_DATE_FORMAT)
            .map_err(|e| {
                RetailError::malformed_line(
                    None,
                    format!("invalid invoice date '{}': {}", csv_record.invoice_date, e),
                )
            })?;

    let unit_price = parse_decimal(&csv_record.unit_price).ok_or_else(|| {
        RetailError::malformed_line(
            None,
            format!("invalid unit price '{}'", csv_record.unit_price),
        )
    })?;

    let customer_id = match csv_record.customer_id.trim() {
        "" => 0,
        raw => parse_decimal(raw)
            .and_then(|id| id.trunc().to_u32())
            .ok_or_else(|| {
                RetailError::malformed_line(
                    None,
                    format!("invalid customer id '{}'", csv_record.customer_id),
                )
            })?,
    };

    Ok(TransactionRecord {
        invoice_no: csv_record.invoice_no,
        stock_code: csv_record.stock_code,
        description: csv_record.description,
        quantity,
        invoice_date,
        unit_price,
        customer_id,
        country: csv_record.country,
    })
}

// Plain or scientific notation ("2.55", "1.5E-2")
fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    invoice_no: &'a str,
    stock_code: &'a str,
    description: &'a str,
    quantity: i32,
    invoice_date: String,
    unit_price: String,
    customer_id: u32,
    country: &'a str,
}

#[derive(Debug, Serialize)]
struct StockTotalRow<'a> {
    stock_code: &'a str,
    total_quantity: i64,
}

#[derive(Debug, Serialize)]
struct RevenueRow<'a> {
    country: &'a str,
    revenue: String,
}

fn csv_writer(output: &mut dyn Write) -> csv::Writer<&mut dyn Write> {
    WriterBuilder::new().has_headers(false).from_writer(output)
}

fn finish(mut writer: csv::Writer<&mut dyn Write>) -> Result<(), RetailError> {
    writer
        .flush()
        .map_err(|e| RetailError::output(format!("Failed to flush output: {}", e)))
}

fn write_fields(writer: &mut csv::Writer<&mut dyn Write>, fields: &[&str]) -> Result<(), RetailError> {
    writer
        .write_record(fields)
        .map_err(|e| RetailError::output(format!("Failed to write CSV record: {}", e)))
}

fn write_row<T: Serialize>(writer: &mut csv::Writer<&mut dyn Write>, row: T) -> Result<(), RetailError> {
    writer
        .serialize(row)
        .map_err(|e| RetailError::output(format!("Failed to write CSV record: {}", e)))
}

/// Write records in the input column layout, in ingestion order
///
/// At most `limit` records are written when a limit is given.
pub fn write_records_csv(
    records: &[TransactionRecord],
    limit: Option<usize>,
    output: &mut dyn Write,
) -> Result<(), RetailError> {
    let mut writer = csv_writer(output);
    write_fields(&mut writer, &HEADER)?;

    for record in records.iter().take(limit.unwrap_or(usize::MAX)) {
        write_row(
            &mut writer,
            RecordRow {
                invoice_no: &record.invoice_no,
                stock_code: &record.stock_code,
                description: &record.description,
                quantity: record.quantity,
                invoice_date: record.invoice_date.format(INVOICE_DATE_FORMAT).to_string(),
                unit_price: record.unit_price.to_string(),
                customer_id: record.customer_id,
                country: &record.country,
            },
        )?;
    }

    finish(writer)
}

/// Write the occurrence history of one product, one row per occurrence
pub fn write_product_csv(
    product: &ProductAggregate,
    output: &mut dyn Write,
) -> Result<(), RetailError> {
    let mut writer = csv_writer(output);
    write_fields(&mut writer, &HEADER)?;

    for occurrence in product.occurrences() {
        write_row(
            &mut writer,
            RecordRow {
                invoice_no: &occurrence.invoice_no,
                stock_code: &product.stock_code,
                description: &product.description,
                quantity: occurrence.quantity,
                invoice_date: occurrence
                    .invoice_date
                    .format(INVOICE_DATE_FORMAT)
                    .to_string(),
                unit_price: occurrence.unit_price.to_string(),
                customer_id: occurrence.customer_id,
                country: &occurrence.country,
            },
        )?;
    }

    finish(writer)
}

/// Write the distinct countries, one per row
pub fn write_countries_csv(
    countries: &BTreeSet<String>,
    output: &mut dyn Write,
) -> Result<(), RetailError> {
    let mut writer = csv_writer(output);
    write_fields(&mut writer, &["Country"])?;

    for country in countries {
        write_fields(&mut writer, &[country.as_str()])?;
    }

    finish(writer)
}

/// Write total quantity sold per stock code
pub fn write_stock_totals_csv(
    totals: &BTreeMap<String, i64>,
    limit: Option<usize>,
    output: &mut dyn Write,
) -> Result<(), RetailError> {
    let mut writer = csv_writer(output);
    write_fields(&mut writer, &["StockCode", "TotalQuantity"])?;

    for (stock_code, total_quantity) in totals.iter().take(limit.unwrap_or(usize::MAX)) {
        write_row(
            &mut writer,
            StockTotalRow {
                stock_code,
                total_quantity: *total_quantity,
            },
        )?;
    }

    finish(writer)
}

/// Write total revenue per country, two decimals
pub fn write_revenue_csv(
    revenue: &BTreeMap<String, f64>,
    output: &mut dyn Write,
) -> Result<(), RetailError> {
    let mut writer = csv_writer(output);
    write_fields(&mut writer, &["Country", "Revenue"])?;

    for (country, total) in revenue {
        write_row(
            &mut writer,
            RevenueRow {
                country,
                revenue: format!("{:.2}", total),
            },
        )?;
    }

    finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[test]
    fn test_parse_line_plain() {
        let record = parse_line("INV1,SKU1,Widget,5,2010-01-01 10:00:00,2.50,100,UK").unwrap();

        assert_eq!(record.invoice_no, "INV1");
        assert_eq!(record.stock_code, "SKU1");
        assert_eq!(record.description, "Widget");
        assert_eq!(record.quantity, 5);
        assert_eq!(
            record.invoice_date,
            NaiveDate::from_ymd_opt(2010, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
        assert_eq!(record.unit_price, Decimal::new(250, 2));
        assert_eq!(record.customer_id, 100);
        assert_eq!(record.country, "UK");
    }

    #[test]
    fn test_parse_line_quoted_comma() {
        let record =
            parse_line("INV2,SKU2,\"Red, Large\",3,2010-01-01 11:00:00,9.99,101,US").unwrap();

        assert_eq!(record.description, "Red, Large");
        assert_eq!(record.quantity, 3);
        assert_eq!(record.unit_price, Decimal::new(999, 2));
        assert_eq!(record.customer_id, 101);
        assert_eq!(record.country, "US");
    }

    #[rstest]
    #[case::plain("536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,2010-12-01 08:26:00,2.55,17850,United Kingdom")]
    #[case::negative_quantity("C536379,D,Discount,-1,2010-12-01 09:41:00,27.5,14527,United Kingdom")]
    #[case::empty_customer("536414,22139,,56,2010-12-01 11:52:00,0,,United Kingdom")]
    #[case::leading_space(" 536370,22728, ALARM CLOCK BAKELIKE PINK,24,2010-12-01 08:45:00,3.75,12583,France")]
    fn test_split_line_round_trips_fields(#[case] line: &str) {
        let record = split_line(line).unwrap();
        assert_eq!(record.fields().join(","), line);
    }

    #[test]
    fn test_split_line_strips_quotes_only() {
        let record =
            split_line("536520,21111,\"SWISS ROLL TOWEL, CHOCOLATE  SPOTS\",1,2010-12-01 12:43:00,2.95,14729,United Kingdom")
                .unwrap();
        assert_eq!(record.description, "SWISS ROLL TOWEL, CHOCOLATE  SPOTS");
        assert_eq!(record.quantity, "1");
    }

    #[test]
    fn test_split_line_unclosed_quote_stays_on_its_line() {
        let error = split_line("INV2,SKU2,\"Broken,3,2010-01-01 11:00:00,9.99,101,US").unwrap_err();
        assert_eq!(
            error,
            RetailError::malformed_line(None, "expected 8 fields, found 3")
        );
    }

    #[test]
    fn test_split_line_drops_excess_fields() {
        let record =
            split_line("INV1,SKU1,Widget,5,2010-01-01 10:00:00,2.50,100,UK,extra,more").unwrap();
        assert_eq!(record.country, "UK");
    }

    #[rstest]
    #[case::too_few_fields("INV1,SKU1,Widget", "expected 8 fields, found 3")]
    #[case::empty_line("", "empty line")]
    #[case::bad_quantity("INV1,SKU1,Widget,five,2010-01-01 10:00:00,2.50,100,UK", "invalid quantity 'five'")]
    #[case::decimal_quantity("INV1,SKU1,Widget,5.5,2010-01-01 10:00:00,2.50,100,UK", "invalid quantity")]
    #[case::bad_date("INV1,SKU1,Widget,5,01/01/2010 10:00,2.50,100,UK", "invalid invoice date")]
    #[case::date_without_seconds("INV1,SKU1,Widget,5,2010-01-01 10:00,2.50,100,UK", "invalid invoice date")]
    #[case::bad_price("INV1,SKU1,Widget,5,2010-01-01 10:00:00,cheap,100,UK", "invalid unit price 'cheap'")]
    #[case::bad_customer("INV1,SKU1,Widget,5,2010-01-01 10:00:00,2.50,abc,UK", "invalid customer id 'abc'")]
    #[case::negative_customer("INV1,SKU1,Widget,5,2010-01-01 10:00:00,2.50,-3,UK", "invalid customer id")]
    fn test_parse_line_errors(#[case] line: &str, #[case] expected_error: &str) {
        let error = parse_line(line).unwrap_err();
        assert!(
            matches!(error, RetailError::MalformedLine { .. }),
            "unexpected error kind: {:?}",
            error
        );
        assert!(
            error.to_string().contains(expected_error),
            "'{}' does not contain '{}'",
            error,
            expected_error
        );
    }

    #[rstest]
    #[case::empty("", 0)]
    #[case::blank("   ", 0)]
    #[case::integer("17850", 17850)]
    #[case::float_suffix("17850.0", 17850)]
    #[case::truncated("12583.9", 12583)]
    fn test_customer_id_conversion(#[case] raw: &str, #[case] expected: u32) {
        let line = format!("INV1,SKU1,Widget,5,2010-01-01 10:00:00,2.50,{},UK", raw);
        assert_eq!(parse_line(&line).unwrap().customer_id, expected);
    }

    #[rstest]
    #[case::plain("2.55", Decimal::new(255, 2))]
    #[case::whitespace("  3.75 ", Decimal::new(375, 2))]
    #[case::integer("10", Decimal::new(10, 0))]
    #[case::scientific("1.5E-2", Decimal::new(15, 3))]
    fn test_unit_price_conversion(#[case] raw: &str, #[case] expected: Decimal) {
        let line = format!("INV1,SKU1,Widget,5,2010-01-01 10:00:00,{},100,UK", raw);
        assert_eq!(parse_line(&line).unwrap().unit_price, expected);
    }

    #[test]
    fn test_write_records_csv_quotes_embedded_commas() {
        let records = vec![
            parse_line("INV1,SKU1,Widget,5,2010-01-01 10:00:00,2.50,100,UK").unwrap(),
            parse_line("INV2,SKU2,\"Red, Large\",3,2010-01-01 11:00:00,9.99,,US").unwrap(),
        ];

        let mut output = Vec::new();
        write_records_csv(&records, None, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country\n\
             INV1,SKU1,Widget,5,2010-01-01 10:00:00,2.50,100,UK\n\
             INV2,SKU2,\"Red, Large\",3,2010-01-01 11:00:00,9.99,0,US\n"
        );
    }

    #[test]
    fn test_write_records_csv_respects_limit() {
        let record = parse_line("INV1,SKU1,Widget,5,2010-01-01 10:00:00,2.50,100,UK").unwrap();
        let records = vec![record.clone(), record.clone(), record];

        let mut output = Vec::new();
        write_records_csv(&records, Some(2), &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_write_product_csv() {
        let mut product = ProductAggregate::new(
            &parse_line("INV1,SKU1,Widget,5,2010-01-01 10:00:00,2.50,100,UK").unwrap(),
        );
        product.merge(&parse_line("INV9,SKU1,Widget,-2,2010-02-01 09:30:00,2.50,200,France").unwrap());

        let mut output = Vec::new();
        write_product_csv(&product, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country\n\
             INV1,SKU1,Widget,5,2010-01-01 10:00:00,2.50,100,UK\n\
             INV9,SKU1,Widget,-2,2010-02-01 09:30:00,2.50,200,France\n"
        );
    }

    #[rstest]
    #[case::empty(vec![], "Country\n")]
    #[case::sorted(vec!["France", "EIRE", "United Kingdom"], "Country\nEIRE\nFrance\nUnited Kingdom\n")]
    fn test_write_countries_csv(#[case] countries: Vec<&str>, #[case] expected: &str) {
        let countries: BTreeSet<String> = countries.into_iter().map(String::from).collect();

        let mut output = Vec::new();
        write_countries_csv(&countries, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[rstest]
    #[case::all(None, "StockCode,TotalQuantity\n21730,-6\n22423,12\n85123A,8\n")]
    #[case::limited(Some(1), "StockCode,TotalQuantity\n21730,-6\n")]
    fn test_write_stock_totals_csv(#[case] limit: Option<usize>, #[case] expected: &str) {
        let totals = BTreeMap::from([
            ("85123A".to_string(), 8),
            ("22423".to_string(), 12),
            ("21730".to_string(), -6),
        ]);

        let mut output = Vec::new();
        write_stock_totals_csv(&totals, limit, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[test]
    fn test_write_revenue_csv_two_decimals() {
        let revenue = BTreeMap::from([
            ("United Kingdom".to_string(), 10.0),
            ("France".to_string(), 1234.5678),
        ]);

        let mut output = Vec::new();
        write_revenue_csv(&revenue, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Country,Revenue\nFrance,1234.57\nUnited Kingdom,10.00\n"
        );
    }
}
