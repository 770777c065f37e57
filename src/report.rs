//! Terminal and JSON rendering of dashboard data.
use crate::classifier::Classification;
use crate::core::{AggregateSummary, Patient, PredictionRecord, RiskLevel};
use crate::history::{HistoryRow, TIMESTAMP_FORMAT};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use serde::Serialize;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn from_env() -> Self {
        // NO_COLOR per no-color.org, CLICOLOR_FORCE wins over both
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v == "1") {
            return Self::Always;
        }
        if env::var("NO_COLOR").is_ok() || env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return Self::Never;
        }
        Self::Auto
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// Renders reports with or without ANSI colors.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(mode: ColorMode) -> Self {
        let color = mode.should_use_color();
        colored::control::set_override(color);
        Self { color }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    fn tier(&self, level: RiskLevel) -> String {
        if !self.color {
            return level.to_string();
        }
        match level {
            RiskLevel::Low => level.as_str().green().to_string(),
            RiskLevel::Medium => level.as_str().yellow().to_string(),
            RiskLevel::High => level.as_str().red().bold().to_string(),
        }
    }

    fn header(&self, text: &str) -> String {
        if self.color {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dashboard(&self, summary: &AggregateSummary) -> String {
        let mut counts = Table::new();
        counts.load_preset(UTF8_FULL);
        counts.set_header(vec!["Risk level", "Predictions", "Share"]);
        for level in RiskLevel::ALL.iter().rev() {
            let count = summary.count_for(*level);
            counts.add_row(vec![
                Cell::new(self.tier(*level)),
                Cell::new(count),
                Cell::new(share(count, summary.total)),
            ]);
        }
        counts.add_row(vec![Cell::new("total"), Cell::new(summary.total), Cell::new("")]);

        let mut out = format!("{}\n{}\n", self.header("Prediction summary"), counts);

        out.push_str(&format!("\n{}\n", self.header("Top comorbidities")));
        if summary.top_comorbidities.is_empty() {
            out.push_str("  (none reported)\n");
        } else {
            let mut terms = Table::new();
            terms.load_preset(UTF8_FULL);
            terms.set_header(vec!["#", "Condition", "Mentions"]);
            for (rank, entry) in summary.top_comorbidities.iter().enumerate() {
                terms.add_row(vec![
                    Cell::new(rank + 1),
                    Cell::new(&entry.term),
                    Cell::new(entry.count),
                ]);
            }
            out.push_str(&format!("{terms}\n"));
        }
        out
    }

    pub fn history(&self, rows: &[HistoryRow]) -> String {
        if rows.is_empty() {
            return "No predictions recorded yet.\n".to_string();
        }
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["ID", "Name", "Age", "Sex", "Risk", "Created"]);
        for row in rows {
            table.add_row(vec![
                Cell::new(row.id),
                Cell::new(&row.name),
                Cell::new(&row.age),
                Cell::new(&row.sex),
                Cell::new(self.tier(row.risk_level)),
                Cell::new(&row.created_at),
            ]);
        }
        format!("{table}\n")
    }

    pub fn patients(&self, patients: &[Patient]) -> String {
        if patients.is_empty() {
            return "No patients registered yet.\n".to_string();
        }
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["ID", "Name", "Age", "Sex", "Registered"]);
        for patient in patients {
            table.add_row(vec![
                Cell::new(patient.id),
                Cell::new(&patient.name),
                Cell::new(patient.age),
                Cell::new(patient.sex.as_str()),
                Cell::new(patient.created_at.format(TIMESTAMP_FORMAT)),
            ]);
        }
        format!("{table}\n")
    }

    pub fn registered(&self, patient: &Patient) -> String {
        format!(
            "Registered patient #{}: {} ({}, {})\n",
            patient.id,
            self.header(&patient.name),
            patient.age,
            patient.sex.as_str()
        )
    }

    /// One-line outcome of a triage request.
    pub fn outcome(&self, classification: &Classification, record: Option<&PredictionRecord>) -> String {
        let stored = match record {
            Some(record) => format!(" (stored as #{})", record.id),
            None => String::new(),
        };
        format!(
            "Risk level: {}{}\nRule: {}\nRationale: {}\n",
            self.tier(classification.risk_level),
            stored,
            classification.rule,
            classification.rationale
        )
    }
}

fn share(count: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", count as f64 * 100.0 / total as f64)
}

/// Pretty JSON for machine consumers.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> crate::core::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
