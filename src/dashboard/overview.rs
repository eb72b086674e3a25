use crate::aggregate::Bucket;
use crate::growth;
use crate::kpi::{self, Kpi, Unit};
use crate::models::StatsOverview;
use serde::Serialize;

/// Headline figures from the backend's pre-aggregated summary.
///
/// The summary is already aggregated upstream, so filters do not apply.
/// Month order is taken as given.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewView {
    pub total_revenue: Kpi,
    pub total_orders: Kpi,
    pub average_order_value: Kpi,
    pub monthly_revenue: Vec<Bucket>,
}

impl OverviewView {
    pub fn build(overview: &StatsOverview) -> Self {
        let revenue: Vec<f64> = overview.monthly_data.iter().map(|m| m.revenue).collect();
        let orders: Vec<f64> = overview.monthly_data.iter().map(|m| m.orders).collect();
        let total_orders = kpi::finite(overview.total_orders).max(0.0);

        let monthly_revenue = overview
            .monthly_data
            .iter()
            .map(|m| Bucket {
                key: m.month.clone(),
                value: kpi::finite(m.revenue),
                count: kpi::finite(m.orders).max(0.0).round() as usize,
            })
            .collect();

        OverviewView {
            total_revenue: Kpi::new("Total Revenue", overview.total_revenue, Unit::Currency)
                .with_change(growth::growth_rate(&revenue)),
            total_orders: Kpi::new("Total Orders", total_orders, Unit::Count)
                .with_change(growth::growth_rate(&orders)),
            average_order_value: Kpi::new(
                "Average Order Value",
                kpi::safe_div(overview.total_revenue, total_orders),
                Unit::Currency,
            ),
            monthly_revenue,
        }
    }

    pub fn kpis(&self) -> Vec<&Kpi> {
        vec![&self.total_revenue, &self.total_orders, &self.average_order_value]
    }

    pub fn charts(&self) -> Vec<(&'static str, &[Bucket])> {
        vec![("revenue_by_month", self.monthly_revenue.as_slice())]
    }
}
