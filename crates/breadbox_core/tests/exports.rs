use breadbox_core::export::{
    equipment_csv, export_file_name, investments_csv, profit_report, raw_materials_csv,
    sales_csv, sales_report, ReportPeriod, UTF8_BOM,
};
use breadbox_core::model::{
    EquipmentItem, Investment, InvestmentCategory, MeasureUnit, PresentationKind,
    RawMaterialItem, Sale,
};
use breadbox_core::service::ProfitAnalysis;
use chrono::NaiveDate;
use std::collections::BTreeMap;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn sample_sale(day: NaiveDate, name: &str, total: f64) -> Sale {
    Sale {
        id: Some(1),
        date: day,
        product_id: 1,
        product_name: name.to_string(),
        presentation: PresentationKind::Bag,
        units_per_presentation: 5,
        quantity: 2,
        units_sold: 10,
        unit_price: 7.0,
        total,
    }
}

#[test]
fn sales_csv_has_bom_header_and_escaped_fields() {
    let sales = vec![sample_sale(date(2026, 3, 14), "Bread, rustic", 14.0)];
    let csv = sales_csv(&sales);

    assert!(csv.starts_with(UTF8_BOM));
    let mut lines = csv.trim_start_matches(UTF8_BOM).lines();
    assert_eq!(
        lines.next(),
        Some("ID,Date,Product,Presentation,Quantity,Units,Unit Price,Total")
    );
    assert_eq!(
        lines.next(),
        Some("1,2026-03-14,\"Bread, rustic\",Bag (5 units),2,10,7.00,14.00")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn investments_csv_lists_category_labels_and_amounts() {
    let investments = vec![Investment {
        id: Some(3),
        date: date(2026, 3, 1),
        category: InvestmentCategory::RawMaterials,
        description: "Flour bulk order".to_string(),
        amount: 80.0,
    }];
    let csv = investments_csv(&investments);
    assert!(csv.contains("3,2026-03-01,Raw materials,Flour bulk order,80.00"));
}

#[test]
fn raw_materials_csv_includes_the_computed_total() {
    let items = vec![RawMaterialItem {
        id: Some(1),
        name: "Flour".to_string(),
        quantity: 50.0,
        unit: MeasureUnit::Kilograms,
        unit_price: 0.8,
        supplier: "Central Distributor".to_string(),
        purchased_on: date(2026, 2, 1),
    }];
    let csv = raw_materials_csv(&items);
    assert!(csv.contains("1,Flour,50,kg,0.80,40.00,Central Distributor,2026-02-01"));
}

#[test]
fn equipment_csv_rows_follow_purchase_order() {
    let items = vec![EquipmentItem {
        id: Some(2),
        purchased_on: date(2026, 2, 10),
        price: 1200.0,
        supplier: "Bakery Refrigeration".to_string(),
    }];
    let csv = equipment_csv(&items);
    assert!(csv.contains("2,2026-02-10,1200.00,Bakery Refrigeration"));
}

#[test]
fn export_file_names_are_date_stamped() {
    assert_eq!(
        export_file_name("investments", date(2026, 3, 14)),
        "investments_2026-03-14.csv"
    );
}

#[test]
fn sales_report_filters_by_period_and_escapes_markup() {
    let today = date(2026, 3, 20);
    let sales = vec![
        sample_sale(today, "Rye <loaf>", 14.0),
        sample_sale(date(2026, 1, 2), "Old sale", 99.0),
    ];

    let report = sales_report(&sales, ReportPeriod::LastWeek, today);
    assert!(report.contains("Sales Report - Last week"));
    assert!(report.contains("Rye &lt;loaf&gt;"));
    assert!(!report.contains("Old sale"));
    assert!(report.contains("$14.00"));

    let full = sales_report(&sales, ReportPeriod::All, today);
    assert!(full.contains("Old sale"));
}

#[test]
fn profit_report_shows_the_net_line_and_category_breakdown() {
    let analysis = ProfitAnalysis {
        revenue: 1000.0,
        investments: 280.0,
        monthly_payroll: 450.0,
        net_profit: 270.0,
    };
    let mut by_category = BTreeMap::new();
    by_category.insert(InvestmentCategory::Equipment, 200.0);
    by_category.insert(InvestmentCategory::RawMaterials, 80.0);

    let report = profit_report(&analysis, &by_category, date(2026, 3, 20));
    assert!(report.contains("NET PROFIT"));
    assert!(report.contains("$270.00"));
    assert!(report.contains("Equipment"));
    assert!(report.contains("-$200.00"));
    assert!(report.contains("class=\"positive\""));
}
