//! CSV document builders.
//!
//! # Invariants
//! - Documents start with the UTF-8 byte-order marker so spreadsheet tools
//!   pick the right encoding.
//! - Fields containing separators, quotes or line breaks are double-quoted
//!   with embedded quotes doubled.

use crate::model::{EquipmentItem, Investment, RawMaterialItem, Sale};
use chrono::NaiveDate;

pub const UTF8_BOM: &str = "\u{feff}";

/// `prefix_YYYY-MM-DD.csv`, the conventional export file name.
pub fn export_file_name(prefix: &str, today: NaiveDate) -> String {
    format!("{prefix}_{today}.csv")
}

pub fn sales_csv(sales: &[Sale]) -> String {
    let rows = sales
        .iter()
        .map(|sale| {
            vec![
                id_field(sale.id),
                sale.date.to_string(),
                sale.product_name.clone(),
                sale.presentation_label(),
                sale.quantity.to_string(),
                sale.units_sold.to_string(),
                format!("{:.2}", sale.unit_price),
                format!("{:.2}", sale.total),
            ]
        })
        .collect();

    document(
        &[
            "ID",
            "Date",
            "Product",
            "Presentation",
            "Quantity",
            "Units",
            "Unit Price",
            "Total",
        ],
        rows,
    )
}

pub fn investments_csv(investments: &[Investment]) -> String {
    let rows = investments
        .iter()
        .map(|investment| {
            vec![
                id_field(investment.id),
                investment.date.to_string(),
                investment.category.label().to_string(),
                investment.description.clone(),
                format!("{:.2}", investment.amount),
            ]
        })
        .collect();

    document(&["ID", "Date", "Category", "Description", "Amount"], rows)
}

pub fn raw_materials_csv(items: &[RawMaterialItem]) -> String {
    let rows = items
        .iter()
        .map(|item| {
            vec![
                id_field(item.id),
                item.name.clone(),
                item.quantity.to_string(),
                item.unit.label().to_string(),
                format!("{:.2}", item.unit_price),
                format!("{:.2}", item.total_value()),
                item.supplier.clone(),
                item.purchased_on.to_string(),
            ]
        })
        .collect();

    document(
        &[
            "ID",
            "Name",
            "Quantity",
            "Unit",
            "Unit Price",
            "Total",
            "Supplier",
            "Purchased",
        ],
        rows,
    )
}

pub fn equipment_csv(items: &[EquipmentItem]) -> String {
    let rows = items
        .iter()
        .map(|item| {
            vec![
                id_field(item.id),
                item.purchased_on.to_string(),
                format!("{:.2}", item.price),
                item.supplier.clone(),
            ]
        })
        .collect();

    document(&["ID", "Date", "Price", "Supplier"], rows)
}

fn id_field(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

fn document(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut csv = String::from(UTF8_BOM);
    csv.push_str(&headers.join(","));
    csv.push('\n');
    for row in rows {
        let line: Vec<String> = row.iter().map(|value| field(value)).collect();
        csv.push_str(&line.join(","));
        csv.push('\n');
    }
    csv
}

fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
