use crate::aggregate::{self, Bucket};
use crate::config::AnalyticsConfig;
use crate::filter::Filters;
use crate::growth;
use crate::kpi::{self, Kpi, Unit};
use crate::models::{PurchaseOrder, Vendor};
use crate::rank::{self, RankedEntry};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasingView {
    pub total_spend: Kpi,
    pub order_count: Kpi,
    pub average_order_value: Kpi,
    pub pending_orders: Kpi,
    pub status_distribution: Vec<Bucket>,
    pub payment_status_distribution: Vec<Bucket>,
    pub monthly_spend: Vec<Bucket>,
    pub top_vendors_by_spend: Vec<RankedEntry<Bucket>>,
}

impl PurchasingView {
    pub fn build(orders: &[PurchaseOrder], filters: &Filters, cfg: &AnalyticsConfig) -> Self {
        let rows = filters.scoped_to::<PurchaseOrder>().apply(orders);
        let date = |o: &PurchaseOrder| o.created_at;
        let amount = |o: &PurchaseOrder| o.total_amount;

        let spend = kpi::total(&rows, amount);
        let pending = rows
            .iter()
            .filter(|o| o.status.eq_ignore_ascii_case("pending"))
            .count();
        let by_vendor = aggregate::bucketize(&rows, |o| o.vendor_name.clone(), amount);

        PurchasingView {
            total_spend: Kpi::new("Total Spend", spend, Unit::Currency)
                .with_change(growth::daily_growth(&rows, date, amount)),
            order_count: Kpi::count("Purchase Orders", rows.len()),
            average_order_value: Kpi::new(
                "Average Order Value",
                kpi::mean(spend, rows.len()),
                Unit::Currency,
            ),
            pending_orders: Kpi::new(
                "Pending Orders",
                kpi::percent_of(pending as f64, rows.len() as f64),
                Unit::Percent,
            ),
            status_distribution: aggregate::count_by(&rows, |o| o.status.clone()),
            payment_status_distribution: aggregate::count_by(&rows, |o| o.payment_status.clone()),
            monthly_spend: aggregate::monthly_timeline(&rows, date, amount),
            top_vendors_by_spend: rank::top_n(&by_vendor, |b| b.value, cfg.ranking.top_n),
        }
    }

    pub fn kpis(&self) -> Vec<&Kpi> {
        vec![
            &self.total_spend,
            &self.order_count,
            &self.average_order_value,
            &self.pending_orders,
        ]
    }

    pub fn charts(&self) -> Vec<(&'static str, &[Bucket])> {
        vec![
            ("order_status", self.status_distribution.as_slice()),
            ("payment_status", self.payment_status_distribution.as_slice()),
            ("spend_by_month", self.monthly_spend.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorView {
    pub vendor_count: Kpi,
    pub active_vendors: Kpi,
    pub active_percentage: Kpi,
    pub average_rating: Kpi,
    pub vendors_by_city: Vec<Bucket>,
    pub top_vendors_by_products: Vec<RankedEntry<Vendor>>,
}

impl VendorView {
    pub fn build(vendors: &[Vendor], filters: &Filters, cfg: &AnalyticsConfig) -> Self {
        let rows = filters.scoped_to::<Vendor>().apply(vendors);
        let active = rows.iter().filter(|v| v.is_active).count();

        VendorView {
            vendor_count: Kpi::count("Vendors", rows.len()),
            active_vendors: Kpi::count("Active Vendors", active),
            active_percentage: Kpi::new(
                "Active Vendor Share",
                kpi::percent_of(active as f64, rows.len() as f64),
                Unit::Percent,
            ),
            average_rating: Kpi::new(
                "Average Rating",
                kpi::average(&rows, |v| v.rating),
                Unit::Rating,
            ),
            vendors_by_city: aggregate::count_by(&rows, |v| v.city.clone()),
            top_vendors_by_products: rank::top_n(
                &rows,
                |v| v.product_count() as f64,
                cfg.ranking.top_n,
            ),
        }
    }

    pub fn kpis(&self) -> Vec<&Kpi> {
        vec![
            &self.vendor_count,
            &self.active_vendors,
            &self.active_percentage,
            &self.average_rating,
        ]
    }

    pub fn charts(&self) -> Vec<(&'static str, &[Bucket])> {
        vec![("vendors_by_city", self.vendors_by_city.as_slice())]
    }
}
