//! Sample sales workbook generator for development and testing.
//!
//! Writes a deterministic sales table to the configured input path and sheet
//! (by default `data/sales.xlsx`, sheet `Vendas`) so the report can be run
//! locally without real data.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Datelike, Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use sales_report_io::persist::write_atomic;
use sales_report_shared::AppConfig;

/// Number of generated sales.
const RECORD_COUNT: usize = 120;
/// RNG seed (consistent for all runs)
const SEED: u64 = 20_240_101;
/// Days covered by the generated sales.
const PERIOD_DAYS: u64 = 90;

/// Products and their unit prices in cents.
const PRODUCTS: [(&str, i64); 6] = [
    ("Cabo HDMI", 2_990),
    ("Headset", 18_990),
    ("Monitor", 89_990),
    ("Mouse", 4_990),
    ("Notebook", 349_900),
    ("Teclado", 14_990),
];
const SELLERS: [&str; 5] = ["Ana", "Bruno", "Carla", "Diego", "Elisa"];
const LOCATIONS: [&str; 4] = ["Centro", "Norte", "Shopping Sul", "Zona Leste"];
const HEADERS: [&str; 6] = [
    "Data",
    "Produto",
    "Vendedor",
    "Localização",
    "Quantidade Vendida",
    "Valor Total",
];

/// One generated sale row.
struct SeedRow {
    date: NaiveDate,
    product: &'static str,
    seller: &'static str,
    location: &'static str,
    quantity: u32,
    total: Decimal,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Generating {RECORD_COUNT} sales...");
    let rows = generate_rows(SEED, RECORD_COUNT)?;

    println!(
        "Writing {} (sheet {})...",
        config.input.path.display(),
        config.input.sheet
    );
    let bytes = build_workbook(&config.input.sheet, &rows)?;
    write_atomic(&config.input.path, &bytes)?;

    println!("Seeding complete!");
    Ok(())
}

fn generate_rows(seed: u64, count: usize) -> anyhow::Result<Vec<SeedRow>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid start date")?;

    let mut rows = Vec::with_capacity(count);
    for _ in 0..count {
        let &(product, cents) = PRODUCTS.choose(&mut rng).context("no products")?;
        let quantity: u32 = rng.random_range(1..=10);
        let date = start
            .checked_add_days(Days::new(rng.random_range(0..PERIOD_DAYS)))
            .context("date out of range")?;

        rows.push(SeedRow {
            date,
            product,
            seller: *SELLERS.choose(&mut rng).context("no sellers")?,
            location: *LOCATIONS.choose(&mut rng).context("no locations")?,
            quantity,
            total: Decimal::new(cents, 2) * Decimal::from(quantity),
        });
    }
    rows.sort_by_key(|row| row.date);
    Ok(rows)
}

fn build_workbook(sheet: &str, rows: &[SeedRow]) -> anyhow::Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    let money = Format::new().set_num_format("#,##0.00");

    let worksheet = workbook.add_worksheet().set_name(sheet)?;
    for (col, title) in (0u16..).zip(HEADERS) {
        worksheet.write_string_with_format(0, col, title, &header)?;
    }

    for (row, sale) in (1u32..).zip(rows) {
        let date = ExcelDateTime::from_ymd(
            u16::try_from(sale.date.year())?,
            u8::try_from(sale.date.month())?,
            u8::try_from(sale.date.day())?,
        )?;
        worksheet.write_datetime_with_format(row, 0, &date, &date_format)?;
        worksheet.write_string(row, 1, sale.product)?;
        worksheet.write_string(row, 2, sale.seller)?;
        worksheet.write_string(row, 3, sale.location)?;
        worksheet.write_number(row, 4, sale.quantity)?;
        let total = sale.total.to_f64().context("total out of range")?;
        worksheet.write_number_with_format(row, 5, total, &money)?;
    }
    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}
