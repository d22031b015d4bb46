//! Printable HTML report documents.
//!
//! The embedder opens the returned document in a new view and hands it to
//! the platform print facility; nothing here touches a UI toolkit.

use crate::model::{InvestmentCategory, Sale};
use crate::service::ProfitAnalysis;
use chrono::{Days, Months, NaiveDate};
use std::collections::BTreeMap;

const REPORT_CSS: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }\n\
h1 { color: #8B4513; border-bottom: 2px solid #8B4513; padding-bottom: 10px; }\n\
h2 { color: #D2691E; }\n\
table { border-collapse: collapse; width: 100%; margin: 20px 0; }\n\
th { background: #8B4513; color: white; padding: 10px; text-align: left; }\n\
td { border: 1px solid #ddd; padding: 8px; }\n\
tr:nth-child(even) { background: #f9f9f9; }\n\
.total { font-weight: bold; background: #f0f0f0; }\n\
.positive { color: #2E7D32; font-weight: bold; }\n\
.negative { color: #C62828; font-weight: bold; }\n\
.footer { margin-top: 30px; text-align: center; color: #666; }\n";

/// Time filter for the sales report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    All,
    LastDay,
    LastWeek,
    LastMonth,
}

impl ReportPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All sales",
            Self::LastDay => "Last 24 hours",
            Self::LastWeek => "Last week",
            Self::LastMonth => "Last month",
        }
    }

    /// Earliest date included, or `None` for the unfiltered report.
    fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::All => None,
            Self::LastDay => today.checked_sub_days(Days::new(1)),
            Self::LastWeek => today.checked_sub_days(Days::new(7)),
            Self::LastMonth => today.checked_sub_months(Months::new(1)),
        }
    }
}

/// Builds the sales report document for the given period.
pub fn sales_report(sales: &[Sale], period: ReportPeriod, today: NaiveDate) -> String {
    let cutoff = period.cutoff(today);
    let filtered: Vec<&Sale> = sales
        .iter()
        .filter(|sale| cutoff.map_or(true, |cutoff| sale.date >= cutoff))
        .collect();

    let total_revenue: f64 = filtered.iter().map(|sale| sale.total).sum();
    let total_units: u32 = filtered.iter().map(|sale| sale.units_sold).sum();

    let mut rows = String::new();
    for sale in &filtered {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>${:.2}</td></tr>\n",
            sale.date,
            escape(&sale.product_name),
            sale.presentation_label(),
            sale.quantity,
            sale.units_sold,
            sale.total
        ));
    }

    format!(
        "<html>\n<head>\n<title>Sales Report - Breadbox</title>\n<style>\n{REPORT_CSS}</style>\n</head>\n<body>\n\
         <h1>Breadbox Bakery</h1>\n\
         <h2>Sales Report - {period_label}</h2>\n\
         <p>Generated on {today}</p>\n\
         <p><strong>Total revenue:</strong> ${total_revenue:.2} | \
         <strong>Sales:</strong> {sale_count} | \
         <strong>Units sold:</strong> {total_units}</p>\n\
         <table>\n<thead>\n<tr><th>Date</th><th>Product</th><th>Presentation</th>\
         <th>Quantity</th><th>Units</th><th>Total</th></tr>\n</thead>\n<tbody>\n{rows}</tbody>\n\
         <tfoot>\n<tr class=\"total\"><td colspan=\"5\">TOTAL</td><td>${total_revenue:.2}</td></tr>\n</tfoot>\n</table>\n\
         <div class=\"footer\"><p>Breadbox bakery management</p></div>\n\
         </body>\n</html>\n",
        period_label = period.label(),
        sale_count = filtered.len(),
    )
}

/// Builds the profit report: financial summary plus investments grouped by
/// category.
pub fn profit_report(
    analysis: &ProfitAnalysis,
    investments_by_category: &BTreeMap<InvestmentCategory, f64>,
    today: NaiveDate,
) -> String {
    let net_class = if analysis.net_profit >= 0.0 {
        "positive"
    } else {
        "negative"
    };

    let mut category_rows = String::new();
    for (category, amount) in investments_by_category {
        category_rows.push_str(&format!(
            "<tr><td>{}</td><td class=\"negative\">-${amount:.2}</td></tr>\n",
            category.label()
        ));
    }

    format!(
        "<html>\n<head>\n<title>Profit Report - Breadbox</title>\n<style>\n{REPORT_CSS}</style>\n</head>\n<body>\n\
         <h1>Breadbox Bakery</h1>\n\
         <h2>Profit Report</h2>\n\
         <p>Generated on {today}</p>\n\
         <h3>Financial summary</h3>\n\
         <table>\n\
         <tr><td><strong>Total revenue</strong></td><td class=\"positive\">${revenue:.2}</td></tr>\n\
         <tr><td><strong>Total investments</strong></td><td class=\"negative\">-${investments:.2}</td></tr>\n\
         <tr><td><strong>Payroll cost (monthly)</strong></td><td class=\"negative\">-${payroll:.2}</td></tr>\n\
         <tr class=\"total\"><td><strong>NET PROFIT</strong></td><td class=\"{net_class}\">${net:.2}</td></tr>\n\
         </table>\n\
         <h3>Investments by category</h3>\n\
         <table>\n<thead>\n<tr><th>Category</th><th>Amount</th></tr>\n</thead>\n<tbody>\n{category_rows}</tbody>\n</table>\n\
         <div class=\"footer\"><p>Breadbox bakery management</p></div>\n\
         </body>\n</html>\n",
        revenue = analysis.revenue,
        investments = analysis.investments,
        payroll = analysis.monthly_payroll,
        net = analysis.net_profit,
    )
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::escape;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(escape("Rye & <b>Loaf</b>"), "Rye &amp; &lt;b&gt;Loaf&lt;/b&gt;");
    }
}
