//! Tabular and printable exports.
//!
//! # Responsibility
//! - Build CSV documents (UTF-8 with byte-order marker) for the tabular
//!   screens.
//! - Build standalone HTML report documents for the print path.

mod csv;
mod report;

pub use csv::{
    equipment_csv, export_file_name, investments_csv, raw_materials_csv, sales_csv, UTF8_BOM,
};
pub use report::{profit_report, sales_report, ReportPeriod};
