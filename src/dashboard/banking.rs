use crate::aggregate::{self, Bucket};
use crate::filter::Filters;
use crate::kpi::{self, Kpi, Unit};
use crate::models::{Bank, PosTerminal, TerminalStatus};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankView {
    pub bank_count: Kpi,
    pub active_banks: Kpi,
    pub active_percentage: Kpi,
    pub banks_added_by_month: Vec<Bucket>,
}

impl BankView {
    pub fn build(banks: &[Bank], filters: &Filters) -> Self {
        let rows = filters.scoped_to::<Bank>().apply(banks);
        let active = rows.iter().filter(|b| b.is_active).count();

        BankView {
            bank_count: Kpi::count("Banks", rows.len()),
            active_banks: Kpi::count("Active Banks", active),
            active_percentage: Kpi::new(
                "Active Bank Share",
                kpi::percent_of(active as f64, rows.len() as f64),
                Unit::Percent,
            ),
            banks_added_by_month: aggregate::monthly_timeline(&rows, |b| b.created_at, |_| 1.0),
        }
    }

    pub fn kpis(&self) -> Vec<&Kpi> {
        vec![&self.bank_count, &self.active_banks, &self.active_percentage]
    }

    pub fn charts(&self) -> Vec<(&'static str, &[Bucket])> {
        vec![("banks_by_month", self.banks_added_by_month.as_slice())]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalView {
    pub terminal_count: Kpi,
    pub online_terminals: Kpi,
    pub online_percentage: Kpi,
    pub status_distribution: Vec<Bucket>,
    pub authority_distribution: Vec<Bucket>,
    pub location_distribution: Vec<Bucket>,
}

impl TerminalView {
    pub fn build(terminals: &[PosTerminal], filters: &Filters) -> Self {
        let rows = filters.scoped_to::<PosTerminal>().apply(terminals);
        let online = rows
            .iter()
            .filter(|t| t.status == TerminalStatus::Online)
            .count();

        TerminalView {
            terminal_count: Kpi::count("POS Terminals", rows.len()),
            online_terminals: Kpi::count("Online Terminals", online),
            online_percentage: Kpi::new(
                "Online Share",
                kpi::percent_of(online as f64, rows.len() as f64),
                Unit::Percent,
            ),
            status_distribution: aggregate::count_by(&rows, |t| t.status.to_string()),
            authority_distribution: aggregate::count_by(&rows, |t| t.authority_type.clone()),
            location_distribution: aggregate::count_by(&rows, |t| t.location.clone()),
        }
    }

    pub fn kpis(&self) -> Vec<&Kpi> {
        vec![
            &self.terminal_count,
            &self.online_terminals,
            &self.online_percentage,
        ]
    }

    pub fn charts(&self) -> Vec<(&'static str, &[Bucket])> {
        vec![
            ("terminal_status", self.status_distribution.as_slice()),
            ("terminal_authority", self.authority_distribution.as_slice()),
            ("terminal_location", self.location_distribution.as_slice()),
        ]
    }
}
