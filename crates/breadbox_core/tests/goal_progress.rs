use breadbox_core::model::{InvestmentCategory, PresentationKind, Sale, ValidationError};
use breadbox_core::service::{
    FinanceService, NewInvestment, ServiceError, StaffService,
};
use breadbox_core::store::{default_collections, RecordStore};
use chrono::NaiveDate;

fn open_store() -> RecordStore {
    let mut store = RecordStore::open_in_memory().unwrap();
    store.initialize(default_collections()).unwrap();
    store
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn seed_sale(store: &mut RecordStore, day: NaiveDate, total: f64) {
    let mut sale = Sale {
        id: None,
        date: day,
        product_id: 1,
        product_name: "Baguette".to_string(),
        presentation: PresentationKind::Unit,
        units_per_presentation: 1,
        quantity: 1,
        units_sold: 1,
        unit_price: total,
        total,
    };
    store.put(&mut sale).unwrap();
}

#[test]
fn goals_default_until_configured() {
    let mut store = open_store();
    let goals = FinanceService::new(&mut store).goals().unwrap();
    assert_eq!(goals.daily, 100.0);
    assert_eq!(goals.biweekly, 1500.0);
    assert_eq!(goals.monthly, 2500.0);

    FinanceService::new(&mut store)
        .set_goals(200.0, 2000.0, 4000.0)
        .unwrap();
    let goals = FinanceService::new(&mut store).goals().unwrap();
    assert_eq!(goals.daily, 200.0);
}

#[test]
fn non_positive_targets_are_rejected() {
    let mut store = open_store();
    let err = FinanceService::new(&mut store)
        .set_goals(0.0, 1500.0, 2500.0)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::NonPositiveTarget("daily"))
    ));
}

#[test]
fn windows_respect_the_day_the_biweek_and_the_month() {
    let mut store = open_store();
    let today = date(2026, 3, 20);

    seed_sale(&mut store, today, 50.0);
    seed_sale(&mut store, date(2026, 3, 17), 100.0);
    // Before the 16th: outside the current biweekly window.
    seed_sale(&mut store, date(2026, 3, 10), 200.0);
    // Previous month: outside the monthly window.
    seed_sale(&mut store, date(2026, 2, 28), 500.0);

    let progress = FinanceService::new(&mut store).goal_progress(today).unwrap();

    assert_eq!(progress.daily.earned, 50.0);
    assert_eq!(progress.daily.percent, 50.0);
    assert!(!progress.daily.reached);
    assert_eq!(progress.daily.remaining, 50.0);
    assert_eq!(progress.daily.days_left, None);

    assert_eq!(progress.biweekly.earned, 150.0);
    // March has 31 days: the second half runs 16..=31, 11 days remain.
    assert_eq!(progress.biweekly.days_left, Some(11));
    let needed = progress.biweekly.needed_per_day.unwrap();
    assert!((needed - (1500.0 - 150.0) / 11.0).abs() < 1e-9);

    assert_eq!(progress.monthly.earned, 350.0);
    assert_eq!(progress.monthly.days_left, Some(11));
}

#[test]
fn reached_goals_cap_at_one_hundred_percent() {
    let mut store = open_store();
    let today = date(2026, 3, 5);
    seed_sale(&mut store, today, 250.0);

    let progress = FinanceService::new(&mut store).goal_progress(today).unwrap();
    assert!(progress.daily.reached);
    assert_eq!(progress.daily.percent, 100.0);
    assert_eq!(progress.daily.remaining, 0.0);
}

#[test]
fn finance_view_aggregates_periods_profit_and_rankings() {
    let mut store = open_store();
    let today = date(2026, 3, 20);

    seed_sale(&mut store, today, 50.0);
    seed_sale(&mut store, date(2026, 3, 16), 30.0);
    // 40 days back: outside both rolling windows.
    seed_sale(&mut store, date(2026, 2, 8), 20.0);

    StaffService::new(&mut store)
        .add_employee("Ana Torres", true)
        .unwrap();
    FinanceService::new(&mut store)
        .add_investment(NewInvestment {
            date: date(2026, 3, 1),
            category: InvestmentCategory::Equipment,
            description: "New oven".to_string(),
            amount: 100.0,
        })
        .unwrap();

    let view = FinanceService::new(&mut store).view(today).unwrap();

    assert_eq!(view.today.revenue, 50.0);
    assert_eq!(view.last_week.revenue, 80.0);
    assert_eq!(view.last_month.revenue, 80.0);
    assert_eq!(view.all_time.revenue, 100.0);
    assert_eq!(view.all_time.sales, 3);

    // Net profit: 100 revenue - 100 investments - 1 x $15 x 30 payroll.
    assert_eq!(view.analysis.monthly_payroll, 450.0);
    assert_eq!(view.analysis.net_profit, 100.0 - 100.0 - 450.0);

    assert_eq!(view.top_products.len(), 1);
    assert_eq!(view.top_products[0].revenue, 100.0);
    assert_eq!(view.trend.len(), 7);
    assert_eq!(view.trend[6].date, today);
    assert_eq!(view.trend[6].revenue, 50.0);

    let average = view.metrics.average_sale;
    assert!((average - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn investments_group_by_category() {
    let mut store = open_store();
    let mut finance = FinanceService::new(&mut store);
    for (category, amount) in [
        (InvestmentCategory::Equipment, 150.0),
        (InvestmentCategory::Equipment, 50.0),
        (InvestmentCategory::RawMaterials, 80.0),
    ] {
        finance
            .add_investment(NewInvestment {
                date: date(2026, 3, 1),
                category,
                description: String::new(),
                amount,
            })
            .unwrap();
    }

    let by_category = FinanceService::new(&mut store)
        .investments_by_category()
        .unwrap();
    assert_eq!(by_category[&InvestmentCategory::Equipment], 200.0);
    assert_eq!(by_category[&InvestmentCategory::RawMaterials], 80.0);

    let equipment = FinanceService::new(&mut store)
        .investments_in(InvestmentCategory::Equipment)
        .unwrap();
    assert_eq!(equipment.len(), 2);

    let total = FinanceService::new(&mut store).total_investments().unwrap();
    assert_eq!(total, 280.0);
}
