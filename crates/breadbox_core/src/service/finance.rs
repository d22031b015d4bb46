//! Earnings, goals and investment analysis module.
//!
//! # Responsibility
//! - Own the `investments`, `goals` and `ledger` collections.
//! - Compute goal progress, period totals and the net-profit analysis that
//!   the dashboards render.
//!
//! # Invariants
//! - The biweekly goal window starts on the 1st or the 16th of the month.
//! - Window math takes `today` as a parameter; nothing reads the wall
//!   clock.
//! - Net profit is revenue minus investments minus the monthly payroll
//!   cost.

use crate::model::{
    EarningsLedger, Employee, Goals, Investment, InvestmentCategory, Product, Sale,
};
use crate::service::{require_adjust_amount, ServiceResult, DAILY_WAGE, MONTHLY_DAYS};
use crate::store::{RecordId, RecordStore, SINGLETON_ID};
use chrono::{Datelike, Days, Months, NaiveDate};
use std::collections::BTreeMap;

/// Input for a new investment entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvestment {
    pub date: NaiveDate,
    pub category: InvestmentCategory,
    pub description: String,
    pub amount: f64,
}

/// Progress against one goal window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowProgress {
    pub earned: f64,
    pub target: f64,
    /// Capped at 100.
    pub percent: f64,
    pub reached: bool,
    pub remaining: f64,
    /// `None` for the daily window.
    pub days_left: Option<u32>,
    /// Revenue still needed per remaining day, when days remain.
    pub needed_per_day: Option<f64>,
}

impl WindowProgress {
    fn compute(earned: f64, target: f64, days_left: Option<u32>) -> Self {
        let percent = if target > 0.0 {
            (earned / target * 100.0).min(100.0)
        } else {
            0.0
        };
        let remaining = (target - earned).max(0.0);
        let needed_per_day = days_left
            .filter(|days| *days > 0)
            .map(|days| remaining / f64::from(days));

        Self {
            earned,
            target,
            percent,
            reached: earned >= target,
            remaining,
            days_left,
            needed_per_day,
        }
    }
}

/// Progress against all three goal horizons.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub daily: WindowProgress,
    pub biweekly: WindowProgress,
    pub monthly: WindowProgress,
}

/// Revenue/units/sale-count over one period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodTotals {
    pub revenue: f64,
    pub units: u32,
    pub sales: usize,
}

impl PeriodTotals {
    fn of<'s>(sales: impl Iterator<Item = &'s Sale>) -> Self {
        let mut totals = Self::default();
        for sale in sales {
            totals.revenue += sale.total;
            totals.units += sale.units_sold;
            totals.sales += 1;
        }
        totals
    }
}

/// One day of the recent-revenue trend.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendDay {
    pub date: NaiveDate,
    pub revenue: f64,
    pub units: u32,
}

/// Per-product sales/stock row of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductStat {
    pub name: String,
    pub units_sold: u32,
    pub stock: u32,
    pub revenue: f64,
}

/// Ranking row for the best-selling products table.
#[derive(Debug, Clone, PartialEq)]
pub struct TopProduct {
    pub name: String,
    pub sale_count: u32,
    pub units: u32,
    pub revenue: f64,
}

/// Revenue minus money out.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitAnalysis {
    pub revenue: f64,
    pub investments: f64,
    pub monthly_payroll: f64,
    pub net_profit: f64,
}

/// Derived averages and projections.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesMetrics {
    pub average_sale: f64,
    pub average_units_per_sale: f64,
    pub monthly_projection: f64,
    pub profitability_percent: f64,
    pub days_to_recover_investment: f64,
}

/// Everything the earnings/goals dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceView {
    pub goals: Goals,
    pub progress: GoalProgress,
    pub today: PeriodTotals,
    pub last_week: PeriodTotals,
    pub last_month: PeriodTotals,
    pub all_time: PeriodTotals,
    pub product_stats: Vec<ProductStat>,
    pub top_products: Vec<TopProduct>,
    pub trend: Vec<TrendDay>,
    pub analysis: ProfitAnalysis,
    pub metrics: SalesMetrics,
}

pub struct FinanceService<'a> {
    store: &'a mut RecordStore,
}

impl<'a> FinanceService<'a> {
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }

    pub fn add_investment(&mut self, request: NewInvestment) -> ServiceResult<Investment> {
        let mut investment = Investment {
            id: None,
            date: request.date,
            category: request.category,
            description: request.description,
            amount: request.amount,
        };
        investment.validate()?;
        self.store.put(&mut investment)?;
        Ok(investment)
    }

    pub fn delete_investment(&mut self, id: RecordId) -> ServiceResult<()> {
        self.store.delete::<Investment>(id)?;
        Ok(())
    }

    pub fn investments(&self) -> ServiceResult<Vec<Investment>> {
        let mut investments: Vec<Investment> = self.store.get_all()?;
        investments.sort_by_key(|investment| investment.id);
        Ok(investments)
    }

    /// Investments of one category, via the secondary index.
    pub fn investments_in(
        &self,
        category: InvestmentCategory,
    ) -> ServiceResult<Vec<Investment>> {
        let value = serde_json::to_value(category)
            .ok()
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default();
        Ok(self.store.get_by_index("category", &value)?)
    }

    pub fn total_investments(&self) -> ServiceResult<f64> {
        Ok(self
            .investments()?
            .iter()
            .map(|investment| investment.amount)
            .sum())
    }

    pub fn investments_by_category(
        &self,
    ) -> ServiceResult<BTreeMap<InvestmentCategory, f64>> {
        let mut by_category = BTreeMap::new();
        for investment in self.investments()? {
            *by_category.entry(investment.category).or_insert(0.0) += investment.amount;
        }
        Ok(by_category)
    }

    /// The configured goals, or the defaults when none were saved yet.
    pub fn goals(&self) -> ServiceResult<Goals> {
        let goals: Goals = self
            .store
            .get_by_id(SINGLETON_ID)?
            .unwrap_or_default();
        Ok(goals)
    }

    pub fn set_goals(&mut self, daily: f64, biweekly: f64, monthly: f64) -> ServiceResult<Goals> {
        let mut goals = Goals {
            id: Some(SINGLETON_ID),
            daily,
            biweekly,
            monthly,
        };
        goals.validate()?;
        self.store.put(&mut goals)?;
        Ok(goals)
    }

    /// Overwrites the biweekly earnings scalar that payroll draws from.
    pub fn set_biweekly_earnings(&mut self, amount: f64) -> ServiceResult<EarningsLedger> {
        require_adjust_amount(amount)?;
        let mut ledger = EarningsLedger {
            id: Some(SINGLETON_ID),
            biweekly: amount,
        };
        self.store.put(&mut ledger)?;
        Ok(ledger)
    }

    pub fn goal_progress(&self, today: NaiveDate) -> ServiceResult<GoalProgress> {
        let goals = self.goals()?;
        let sales: Vec<Sale> = self.store.get_all()?;
        Ok(compute_goal_progress(&goals, &sales, today))
    }

    pub fn view(&self, today: NaiveDate) -> ServiceResult<FinanceView> {
        let goals = self.goals()?;
        let sales: Vec<Sale> = self.store.get_all()?;
        let products: Vec<Product> = self.store.get_all()?;
        let employees: Vec<Employee> = self.store.get_all()?;
        let investments = self.investments()?;

        let progress = compute_goal_progress(&goals, &sales, today);

        let week_cutoff = today.checked_sub_days(Days::new(7)).unwrap_or(today);
        let month_cutoff = today.checked_sub_months(Months::new(1)).unwrap_or(today);

        let today_totals = PeriodTotals::of(sales.iter().filter(|sale| sale.date == today));
        let last_week = PeriodTotals::of(sales.iter().filter(|sale| sale.date >= week_cutoff));
        let last_month = PeriodTotals::of(sales.iter().filter(|sale| sale.date >= month_cutoff));
        let all_time = PeriodTotals::of(sales.iter());

        let product_stats = products
            .iter()
            .map(|product| {
                let own_sales: Vec<&Sale> = sales
                    .iter()
                    .filter(|sale| Some(sale.product_id) == product.id)
                    .collect();
                ProductStat {
                    name: product.name.clone(),
                    units_sold: own_sales.iter().map(|sale| sale.units_sold).sum(),
                    stock: product.stock,
                    revenue: own_sales.iter().map(|sale| sale.total).sum(),
                }
            })
            .collect();

        let top_products = rank_top_products(&sales, 5);
        let trend = revenue_trend(&sales, today, 7);

        let active_employees = employees.iter().filter(|employee| employee.active).count();
        let monthly_payroll =
            active_employees as f64 * DAILY_WAGE * f64::from(MONTHLY_DAYS);
        let total_investments: f64 = investments
            .iter()
            .map(|investment| investment.amount)
            .sum();

        let analysis = ProfitAnalysis {
            revenue: all_time.revenue,
            investments: total_investments,
            monthly_payroll,
            net_profit: all_time.revenue - total_investments - monthly_payroll,
        };

        let metrics = compute_metrics(&all_time, &today_totals, &analysis);

        Ok(FinanceView {
            goals,
            progress,
            today: today_totals,
            last_week,
            last_month,
            all_time,
            product_stats,
            top_products,
            trend,
            analysis,
            metrics,
        })
    }
}

fn compute_goal_progress(goals: &Goals, sales: &[Sale], today: NaiveDate) -> GoalProgress {
    let biweek_start = biweekly_window_start(today);
    let month_start = month_start(today);

    let earned_today: f64 = sales
        .iter()
        .filter(|sale| sale.date == today)
        .map(|sale| sale.total)
        .sum();
    let earned_biweek: f64 = sales
        .iter()
        .filter(|sale| sale.date >= biweek_start && sale.date <= today)
        .map(|sale| sale.total)
        .sum();
    let earned_month: f64 = sales
        .iter()
        .filter(|sale| sale.date >= month_start && sale.date <= today)
        .map(|sale| sale.total)
        .sum();

    GoalProgress {
        daily: WindowProgress::compute(earned_today, goals.daily, None),
        biweekly: WindowProgress::compute(
            earned_biweek,
            goals.biweekly,
            Some(biweekly_days_left(today)),
        ),
        monthly: WindowProgress::compute(
            earned_month,
            goals.monthly,
            Some(days_in_month(today) - today.day()),
        ),
    }
}

fn rank_top_products(sales: &[Sale], limit: usize) -> Vec<TopProduct> {
    let mut by_name: BTreeMap<&str, TopProduct> = BTreeMap::new();
    for sale in sales {
        let entry = by_name
            .entry(sale.product_name.as_str())
            .or_insert_with(|| TopProduct {
                name: sale.product_name.clone(),
                sale_count: 0,
                units: 0,
                revenue: 0.0,
            });
        entry.sale_count += sale.quantity;
        entry.units += sale.units_sold;
        entry.revenue += sale.total;
    }

    let mut ranking: Vec<TopProduct> = by_name.into_values().collect();
    ranking.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    ranking.truncate(limit);
    ranking
}

fn revenue_trend(sales: &[Sale], today: NaiveDate, days: u64) -> Vec<TrendDay> {
    (0..days)
        .rev()
        .map(|offset| {
            let date = today.checked_sub_days(Days::new(offset)).unwrap_or(today);
            let day_sales: Vec<&Sale> = sales.iter().filter(|sale| sale.date == date).collect();
            TrendDay {
                date,
                revenue: day_sales.iter().map(|sale| sale.total).sum(),
                units: day_sales.iter().map(|sale| sale.units_sold).sum(),
            }
        })
        .collect()
}

fn compute_metrics(
    all_time: &PeriodTotals,
    today: &PeriodTotals,
    analysis: &ProfitAnalysis,
) -> SalesMetrics {
    let sale_count = all_time.sales.max(1) as f64;
    let average_sale = all_time.revenue / sale_count;
    let average_units_per_sale = f64::from(all_time.units) / sale_count;

    let revenue_base = if all_time.revenue > 0.0 {
        all_time.revenue
    } else {
        1.0
    };
    let today_base = if today.revenue > 0.0 {
        today.revenue
    } else {
        1.0
    };

    SalesMetrics {
        average_sale,
        average_units_per_sale,
        monthly_projection: average_sale * f64::from(MONTHLY_DAYS),
        profitability_percent: analysis.net_profit / revenue_base * 100.0,
        days_to_recover_investment: analysis.investments / today_base,
    }
}

/// The biweekly window opens on the 1st or the 16th.
fn biweekly_window_start(today: NaiveDate) -> NaiveDate {
    let day = if today.day() <= 15 { 1 } else { 16 };
    NaiveDate::from_ymd_opt(today.year(), today.month(), day).unwrap_or(today)
}

fn month_start(today: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today)
}

fn days_in_month(today: NaiveDate) -> u32 {
    let next_month_first = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    };
    next_month_first
        .and_then(|date| date.pred_opt())
        .map(|date| date.day())
        .unwrap_or(30)
}

fn biweekly_days_left(today: NaiveDate) -> u32 {
    let day = today.day();
    let (elapsed, total) = if day <= 15 {
        (day, 15)
    } else {
        (day - 15, days_in_month(today) - 15)
    };
    total.saturating_sub(elapsed)
}

#[cfg(test)]
mod tests {
    use super::{
        biweekly_days_left, biweekly_window_start, days_in_month, WindowProgress,
    };
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn biweekly_window_flips_on_the_sixteenth() {
        assert_eq!(biweekly_window_start(date(2026, 3, 15)), date(2026, 3, 1));
        assert_eq!(biweekly_window_start(date(2026, 3, 16)), date(2026, 3, 16));
    }

    #[test]
    fn days_in_month_handles_leap_february_and_december() {
        assert_eq!(days_in_month(date(2024, 2, 10)), 29);
        assert_eq!(days_in_month(date(2026, 2, 10)), 28);
        assert_eq!(days_in_month(date(2026, 12, 31)), 31);
    }

    #[test]
    fn biweekly_days_left_counts_both_halves() {
        assert_eq!(biweekly_days_left(date(2026, 3, 10)), 5);
        assert_eq!(biweekly_days_left(date(2026, 3, 20)), 11);
        assert_eq!(biweekly_days_left(date(2026, 3, 31)), 0);
    }

    #[test]
    fn window_progress_caps_percent_and_floors_remaining() {
        let over = WindowProgress::compute(250.0, 100.0, None);
        assert_eq!(over.percent, 100.0);
        assert_eq!(over.remaining, 0.0);
        assert!(over.reached);

        let under = WindowProgress::compute(30.0, 100.0, Some(7));
        assert_eq!(under.percent, 30.0);
        assert_eq!(under.remaining, 70.0);
        assert_eq!(under.needed_per_day, Some(10.0));
    }
}
