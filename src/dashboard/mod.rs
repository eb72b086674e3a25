//! Per-screen composition of the pipeline stages.
//!
//! Each view takes the snapshot's collection(s), narrows the user's filters
//! to the fields that collection has, and derives its KPIs, buckets,
//! rankings, and classifications. Views are independent of one another.

mod banking;
mod inventory;
mod overview;
mod purchasing;
mod sales;

pub use banking::{BankView, TerminalView};
pub use inventory::{InventoryView, ProductCosting};
pub use overview::OverviewView;
pub use purchasing::{PurchasingView, VendorView};
pub use sales::SalesView;

use crate::aggregate::Bucket;
use crate::config::AnalyticsConfig;
use crate::filter::Filters;
use crate::kpi::Kpi;
use crate::models::Snapshot;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Sales,
    Purchasing,
    Vendors,
    Banks,
    Terminals,
    Inventory,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Overview,
        Section::Sales,
        Section::Purchasing,
        Section::Vendors,
        Section::Banks,
        Section::Terminals,
        Section::Inventory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::Sales => "sales",
            Section::Purchasing => "purchasing",
            Section::Vendors => "vendors",
            Section::Banks => "banks",
            Section::Terminals => "terminals",
            Section::Inventory => "inventory",
        }
    }
}

/// Every dashboard section derived from one snapshot and one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub overview: OverviewView,
    pub sales: SalesView,
    pub purchasing: PurchasingView,
    pub vendors: VendorView,
    pub banks: BankView,
    pub terminals: TerminalView,
    pub inventory: InventoryView,
}

impl DashboardReport {
    pub fn build(snapshot: &Snapshot, filters: &Filters, cfg: &AnalyticsConfig) -> Self {
        let started = Instant::now();
        let report = DashboardReport {
            overview: OverviewView::build(&snapshot.overview),
            sales: SalesView::build(&snapshot.transactions, filters, cfg),
            purchasing: PurchasingView::build(&snapshot.purchase_orders, filters, cfg),
            vendors: VendorView::build(&snapshot.vendors, filters, cfg),
            banks: BankView::build(&snapshot.banks, filters),
            terminals: TerminalView::build(&snapshot.pos_terminals, filters),
            inventory: InventoryView::build(
                &snapshot.finished_goods,
                &snapshot.raw_materials,
                filters,
                cfg,
            ),
        };
        log::debug!("dashboard report built in {:?}", started.elapsed());
        report
    }

    pub fn kpis(&self, section: Section) -> Vec<&Kpi> {
        match section {
            Section::Overview => self.overview.kpis(),
            Section::Sales => self.sales.kpis(),
            Section::Purchasing => self.purchasing.kpis(),
            Section::Vendors => self.vendors.kpis(),
            Section::Banks => self.banks.kpis(),
            Section::Terminals => self.terminals.kpis(),
            Section::Inventory => self.inventory.kpis(),
        }
    }

    pub fn charts(&self, section: Section) -> Vec<(&'static str, &[Bucket])> {
        match section {
            Section::Overview => self.overview.charts(),
            Section::Sales => self.sales.charts(),
            Section::Purchasing => self.purchasing.charts(),
            Section::Vendors => self.vendors.charts(),
            Section::Banks => self.banks.charts(),
            Section::Terminals => self.terminals.charts(),
            Section::Inventory => self.inventory.charts(),
        }
    }
}
