use crate::aggregate::{self, Bucket};
use crate::config::AnalyticsConfig;
use crate::filter::Filters;
use crate::growth;
use crate::kpi::{self, Kpi, Unit};
use crate::models::{LineItem, Transaction};
use crate::rank::{self, RankedEntry};
use serde::Serialize;

/// Sales screen: totals, payment mix, time-of-day and monthly trends, best sellers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesView {
    pub total_sales: Kpi,
    pub transaction_count: Kpi,
    pub average_transaction_value: Kpi,
    pub items_sold: Kpi,
    pub payment_chart_data: Vec<Bucket>,
    pub hourly_distribution: Vec<Bucket>,
    pub monthly_timeline: Vec<Bucket>,
    pub daily_totals: Vec<Bucket>,
    pub top_selling_items: Vec<RankedEntry<Bucket>>,
}

impl SalesView {
    pub fn build(transactions: &[Transaction], filters: &Filters, cfg: &AnalyticsConfig) -> Self {
        let rows = filters.scoped_to::<Transaction>().apply(transactions);
        let date = |t: &Transaction| t.date;
        let amount = |t: &Transaction| t.total;

        let total = kpi::total(&rows, amount);
        let change = growth::daily_growth(&rows, date, amount);

        let lines: Vec<&LineItem> = rows.iter().flat_map(|t| t.items.iter()).collect();
        let items = aggregate::bucketize(&lines, |l| l.label().to_string(), |l| l.item_quantity);
        let items_sold = aggregate::total_value(&items);

        SalesView {
            total_sales: Kpi::new("Total Sales", total, Unit::Currency).with_change(change),
            transaction_count: Kpi::count("Transactions", rows.len()),
            average_transaction_value: Kpi::new(
                "Average Transaction Value",
                kpi::mean(total, rows.len()),
                Unit::Currency,
            ),
            items_sold: Kpi::new("Items Sold", items_sold, Unit::Count),
            payment_chart_data: aggregate::bucketize(&rows, |t| t.payment_method.clone(), amount),
            hourly_distribution: aggregate::hourly_distribution(&rows, date, amount),
            monthly_timeline: aggregate::monthly_timeline(&rows, date, amount),
            daily_totals: aggregate::daily_totals(&rows, date, amount),
            top_selling_items: rank::top_n(&items, |b| b.value, cfg.ranking.top_n),
        }
    }

    pub fn kpis(&self) -> Vec<&Kpi> {
        vec![
            &self.total_sales,
            &self.transaction_count,
            &self.average_transaction_value,
            &self.items_sold,
        ]
    }

    pub fn charts(&self) -> Vec<(&'static str, &[Bucket])> {
        vec![
            ("payment_methods", self.payment_chart_data.as_slice()),
            ("sales_by_hour", self.hourly_distribution.as_slice()),
            ("sales_by_month", self.monthly_timeline.as_slice()),
            ("sales_by_day", self.daily_totals.as_slice()),
        ]
    }
}
