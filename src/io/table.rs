//! Fixed-width text tables for the console
//!
//! Layouts follow the sales management console: a bordered products table, a
//! bulleted country list, and the two business report tables.

use crate::core::BusinessReport;
use crate::types::{ProductAggregate, TransactionRecord};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

/// Date format of the InvoiceDate column in tables (minutes precision)
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

const PRODUCTS_TITLE: &str = "============================================================== PRODUCTS TABLE ===============================================================";
const PRODUCTS_BORDER: &str = "+---------+--------------+--------------------------------------+--------+------------------+-----------+------------+----------------------+";
const SOLD_TITLE: &str = "======== TOTAL PRODUCTS SOLD TABLE ========";
const SOLD_BORDER: &str = "+------------------+----------------------+";
const REVENUE_TITLE: &str = "============= TOTAL REVENUE TABLE =============";
const REVENUE_BORDER: &str = "+-----------------------+---------------------+";

#[allow(clippy::too_many_arguments)]
fn product_row(
    out: &mut dyn Write,
    invoice_no: &str,
    stock_code: &str,
    description: &str,
    quantity: &str,
    invoice_date: &str,
    unit_price: &str,
    customer_id: &str,
    country: &str,
) -> io::Result<()> {
    writeln!(
        out,
        "| {:<7} | {:<12} | {:<36} | {:<6} | {:<16} | {:<9} | {:<10} | {:<20} |",
        invoice_no, stock_code, description, quantity, invoice_date, unit_price, customer_id, country
    )
}

fn products_header(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", PRODUCTS_TITLE)?;
    writeln!(out, "{}", PRODUCTS_BORDER)?;
    product_row(
        out,
        "InvcNo",
        "StockCode",
        "Description",
        "Qty",
        "InvoiceDate",
        "UnitPrice",
        "CustomerID",
        "Country",
    )?;
    writeln!(out, "{}", PRODUCTS_BORDER)
}

/// Records in arrival order, at most `limit` rows
pub fn write_products_table(
    records: &[TransactionRecord],
    limit: Option<usize>,
    out: &mut dyn Write,
) -> io::Result<()> {
    products_header(out)?;
    for record in records.iter().take(limit.unwrap_or(usize::MAX)) {
        product_row(
            out,
            &record.invoice_no,
            &record.stock_code,
            &record.description,
            &record.quantity.to_string(),
            &record.invoice_date.format(DISPLAY_DATE_FORMAT).to_string(),
            &record.unit_price.to_string(),
            &record.customer_id.to_string(),
            &record.country,
        )?;
    }
    writeln!(out, "{}", PRODUCTS_BORDER)
}

/// One product found by stock code, one row per occurrence
pub fn write_product_table(product: &ProductAggregate, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Product found: {} ({}), {} occurrence(s), {} units in total",
        product.stock_code,
        product.description,
        product.occurrences().len(),
        product.total_quantity()
    )?;
    products_header(out)?;
    for occurrence in product.occurrences() {
        product_row(
            out,
            &occurrence.invoice_no,
            &product.stock_code,
            &product.description,
            &occurrence.quantity.to_string(),
            &occurrence.invoice_date.format(DISPLAY_DATE_FORMAT).to_string(),
            &occurrence.unit_price.to_string(),
            &occurrence.customer_id.to_string(),
            &occurrence.country,
        )?;
    }
    writeln!(out, "{}", PRODUCTS_BORDER)
}

/// Message for a stock code that was never ingested
pub fn write_not_found(stock_code: &str, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Product with StockCode '{}' not found!", stock_code)
}

/// Bulleted list of distinct countries
pub fn write_countries(countries: &BTreeSet<String>, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Unique Countries: ")?;
    for country in countries {
        writeln!(out, "- {}", country)?;
    }
    Ok(())
}

/// Total products sold per stock code, at most `limit` rows
pub fn write_sold_table(
    totals: &BTreeMap<String, i64>,
    limit: Option<usize>,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", SOLD_TITLE)?;
    writeln!(out, "{}", SOLD_BORDER)?;
    writeln!(out, "| {:<16} | {:<20} |", "StockCode", "Total Products Sold")?;
    writeln!(out, "{}", SOLD_BORDER)?;
    for (stock_code, total) in totals.iter().take(limit.unwrap_or(usize::MAX)) {
        writeln!(out, "| {:<16} | {:<20} |", stock_code, total)?;
    }
    writeln!(out, "{}", SOLD_BORDER)
}

/// Total revenue per country, two decimals
pub fn write_revenue_table(revenue: &BTreeMap<String, f64>, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", REVENUE_TITLE)?;
    writeln!(out, "{}", REVENUE_BORDER)?;
    writeln!(out, "| {:<21} | {:<19} |", "Country", "Total Revenue")?;
    writeln!(out, "{}", REVENUE_BORDER)?;
    for (country, total) in revenue {
        writeln!(out, "| {:<21} | {:<19.2} |", country, total)?;
    }
    writeln!(out, "{}", REVENUE_BORDER)
}

/// The selected sections of a business report
pub fn write_business_report(
    report: &BusinessReport,
    limit: Option<usize>,
    out: &mut dyn Write,
) -> io::Result<()> {
    if let Some(totals) = &report.sold_by_stock_code {
        write_sold_table(totals, limit, out)?;
    }
    if let Some(revenue) = &report.revenue_by_country {
        write_revenue_table(revenue, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::csv_format::parse_line;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        let mut output = Vec::new();
        f(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_products_table_row_layout() {
        let records =
            vec![parse_line("536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,2010-12-01 08:26:00,2.55,17850,United Kingdom").unwrap()];

        let output = render(|out| write_products_table(&records, None, out));

        assert!(output.contains(
            "| 536365  | 85123A       | WHITE HANGING HEART T-LIGHT HOLDER   | 6      | 2010-12-01 08:26 | 2.55      | 17850      | United Kingdom       |"
        ));
        assert!(output.contains("| InvcNo  | StockCode    |"));
    }

    #[test]
    fn test_products_table_limit() {
        let record = parse_line("INV1,SKU1,Widget,5,2010-01-01 10:00:00,2.50,100,UK").unwrap();
        let records = vec![record; 15];

        let limited = render(|out| write_products_table(&records, Some(10), out));
        let unlimited = render(|out| write_products_table(&records, None, out));

        assert_eq!(limited.matches("| INV1 ").count(), 10);
        assert_eq!(unlimited.matches("| INV1 ").count(), 15);
    }

    #[test]
    fn test_countries_list() {
        let countries: BTreeSet<String> = ["France", "Australia"].iter().map(|c| c.to_string()).collect();

        assert_eq!(
            render(|out| write_countries(&countries, out)),
            "Unique Countries: \n- Australia\n- France\n"
        );
    }

    #[test]
    fn test_revenue_table_two_decimals() {
        let revenue = BTreeMap::from([("UK".to_string(), 10.0)]);

        let output = render(|out| write_revenue_table(&revenue, out));
        assert!(output.contains("| UK                    | 10.00               |"));
    }

    #[test]
    fn test_business_report_only_selected_sections() {
        let report = BusinessReport {
            sold_by_stock_code: Some(BTreeMap::from([("SKU1".to_string(), 8)])),
            revenue_by_country: None,
        };

        let output = render(|out| write_business_report(&report, None, out));
        assert!(output.contains(SOLD_TITLE));
        assert!(output.contains("| SKU1             | 8                    |"));
        assert!(!output.contains(REVENUE_TITLE));
    }

    #[test]
    fn test_product_table_lists_occurrences() {
        let mut product = ProductAggregate::new(
            &parse_line("INV1,SKU1,Widget,5,2010-01-01 10:00:00,2.50,100,UK").unwrap(),
        );
        product.merge(&parse_line("INV2,SKU1,Widget,3,2010-01-03 16:45:00,2.50,,France").unwrap());

        let output = render(|out| write_product_table(&product, out));
        assert!(output.contains("Product found: SKU1 (Widget), 2 occurrence(s), 8 units in total"));
        assert!(output.contains("| INV1    |"));
        assert!(output.contains("| INV2    |"));
        assert!(output.contains("2010-01-03 16:45"));
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            render(|out| write_not_found("XYZ", out)),
            "Product with StockCode 'XYZ' not found!\n"
        );
    }
}
