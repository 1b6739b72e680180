//! Report rendering for the terminal

use clap::ValueEnum;
use colored::Colorize;
use tabled::{Table, Tabled};

use preflight_core::domain::{CheckResult, CheckStatus, HealthReport, RunOutcome, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "#")]
    ordinal: usize,
    check: String,
    gating: String,
    status: String,
    detail: String,
    #[tabled(rename = "ms")]
    elapsed_ms: u64,
}

impl From<&CheckResult> for Row {
    fn from(result: &CheckResult) -> Self {
        Self {
            ordinal: result.ordinal,
            check: result.name.clone(),
            gating: if result.gating { "yes" } else { "" }.to_string(),
            status: result.status.to_string(),
            detail: result.detail.clone(),
            elapsed_ms: result.elapsed_ms,
        }
    }
}

/// Render the report in `format`
pub fn render(report: &HealthReport, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report),
        OutputFormat::Table => Ok(table(report)),
    }
}

fn table(report: &HealthReport) -> String {
    let rows: Vec<Row> = report.results().iter().map(Row::from).collect();
    let mut out = Table::new(rows).to_string();
    out.push('\n');

    if let RunOutcome::Aborted { gate } = report.outcome() {
        out.push_str(&format!(
            "{} gating check '{}' failed; remaining checks skipped\n",
            "!".red().bold(),
            gate
        ));
    }

    let skipped = report.count(CheckStatus::Skipped);
    out.push_str(&format!(
        "{} {}/{} passed ({} skipped), ratio {:.3}, backend {}, {} ms\n",
        verdict_label(report.verdict()),
        report.passed(),
        report.total(),
        skipped,
        report.ratio(),
        report.backend(),
        (report.finished_at() - report.started_at()).max(0)
    ));
    out
}

fn verdict_label(verdict: Verdict) -> String {
    let text = verdict.to_string();
    match verdict {
        Verdict::Healthy => text.green().bold().to_string(),
        Verdict::Degraded => text.yellow().bold().to_string(),
        Verdict::Critical => text.red().bold().to_string(),
    }
}
