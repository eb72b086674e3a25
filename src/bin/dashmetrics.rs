use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dashboard_metrics::kpi::{Kpi, Unit};
use dashboard_metrics::{
    storage, AnalyticsConfig, DashboardReport, DateRange, Filters, Section,
};
use num_format::{Locale, ToFormattedString};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dashmetrics",
    version,
    about = "Compute dashboard KPIs, distributions, rankings & stock status from a data snapshot"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the dashboard report (and optionally save it as JSON/CSV).
    Report(ReportArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SectionArg {
    All,
    Overview,
    Sales,
    Purchasing,
    Vendors,
    Banks,
    Terminals,
    Inventory,
}

impl SectionArg {
    fn sections(self) -> Vec<Section> {
        match self {
            SectionArg::All => Section::ALL.to_vec(),
            SectionArg::Overview => vec![Section::Overview],
            SectionArg::Sales => vec![Section::Sales],
            SectionArg::Purchasing => vec![Section::Purchasing],
            SectionArg::Vendors => vec![Section::Vendors],
            SectionArg::Banks => vec![Section::Banks],
            SectionArg::Terminals => vec![Section::Terminals],
            SectionArg::Inventory => vec![Section::Inventory],
        }
    }
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Snapshot: a combined JSON file, or a directory of <resource>.json files
    #[arg(short, long)]
    input: PathBuf,
    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
    /// Categorical filter as name=value (e.g. paymentMethod=Cash, category=all). Repeatable.
    #[arg(short = 'f', long = "filter")]
    filters: Vec<String>,
    /// Which section(s) to print and export.
    #[arg(short, long, value_enum, default_value_t = SectionArg::All)]
    section: SectionArg,
    /// JSON file with classifier thresholds and ranking size.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Save the full report as JSON.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Write one CSV per KPI table and chart into this directory.
    #[arg(long)]
    csv_dir: Option<PathBuf>,
}

/// Thousands-separated number with a fixed number of decimals.
fn grouped(x: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, x.abs());
    let (int, frac) = s.split_once('.').unwrap_or((s.as_str(), ""));
    let int = int
        .parse::<u64>()
        .map(|n| n.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| int.to_string());
    let sign = if x < 0.0 && s.chars().any(|c| c != '0' && c != '.') { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{int}")
    } else {
        format!("{sign}{int}.{frac}")
    }
}

fn fmt_kpi(k: &Kpi) -> String {
    let value = match k.unit {
        Unit::Currency => grouped(k.value, 2),
        Unit::Count => grouped(k.value, 0),
        Unit::Percent => format!("{:.1}%", k.value),
        Unit::Rating => format!("{:.2}", k.value),
    };
    match k.change_percent {
        Some(c) => format!("{value} ({c:+.1}%)"),
        None => value,
    }
}

fn build_filters(args: &ReportArgs) -> Result<Filters> {
    let mut filters = Filters::new();
    if let Some(range) = DateRange::parse(args.from.as_deref(), args.to.as_deref())? {
        filters = filters.with_range(range);
    }
    for raw in &args.filters {
        let (name, selection) = Filters::parse_assignment(raw)?;
        filters = filters.with_category(name, selection);
    }
    Ok(filters)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Report(args) => cmd_report(args),
    }
}

fn cmd_report(args: ReportArgs) -> Result<()> {
    if !args.input.exists() {
        bail!("snapshot {} does not exist", args.input.display());
    }
    let cfg = match &args.config {
        Some(path) => AnalyticsConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalyticsConfig::default(),
    };
    let filters = build_filters(&args)?;
    let snapshot = storage::load_snapshot(&args.input)
        .with_context(|| format!("loading snapshot {}", args.input.display()))?;

    let report = DashboardReport::build(&snapshot, &filters, &cfg);
    let sections = args.section.sections();

    for section in &sections {
        for k in report.kpis(*section) {
            println!("{:<10} | {:<28} {}", section.name(), k.label, fmt_kpi(k));
        }
    }

    if let Some(path) = args.out.as_ref() {
        storage::save_json(&report, path)?;
        eprintln!("Saved report to {}", path.display());
    }

    if let Some(dir) = args.csv_dir.as_ref() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let mut files = 0usize;
        for section in &sections {
            let name = section.name();
            storage::save_kpis_csv(report.kpis(*section), dir.join(format!("{name}_kpis.csv")))?;
            files += 1;
            for (chart, buckets) in report.charts(*section) {
                storage::save_buckets_csv(buckets, dir.join(format!("{name}_{chart}.csv")))?;
                files += 1;
            }
        }
        eprintln!("Wrote {} CSV files to {}", files, dir.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_formats_thousands_and_sign() {
        assert_eq!(grouped(1234567.891, 2), "1,234,567.89");
        assert_eq!(grouped(-1500.0, 0), "-1,500");
        assert_eq!(grouped(-0.001, 2), "0.00");
        assert_eq!(grouped(12.0, 0), "12");
    }
}
