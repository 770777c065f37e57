//! Dashboard aggregation over stored predictions.
//!
//! Counts are commutative, so records can be folded in any grouping. Term
//! ranking breaks frequency ties by first-seen order, which
//! [`SummaryBuilder::merge`] preserves by keeping the left side's terms
//! ahead of the right side's new ones.
use crate::core::{AggregateSummary, ComorbidityCount, PredictionRecord, RiskLevel};
use rayon::prelude::*;
use std::collections::HashMap;

/// Number of comorbidities reported when the caller does not choose
pub const DEFAULT_TOP_N: usize = 3;

/// Split a free-text antecedents field into normalized condition terms.
pub fn extract_terms(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

/// Incremental accumulator behind [`summarize`].
#[derive(Debug, Clone, Default)]
pub struct SummaryBuilder {
    low: usize,
    medium: usize,
    high: usize,
    // (term, frequency) in first-seen order
    terms: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }

    pub fn push(&mut self, record: &PredictionRecord) {
        match record.risk_level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
        }

        if let Some(text) = record.antecedents() {
            for term in extract_terms(text) {
                self.add_term(term, 1);
            }
        }
    }

    pub fn extend<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a PredictionRecord>,
    {
        for record in records {
            self.push(record);
        }
    }

    fn add_term(&mut self, term: String, count: usize) {
        match self.positions.get(&term) {
            Some(&pos) => self.terms[pos].1 += count,
            None => {
                self.positions.insert(term.clone(), self.terms.len());
                self.terms.push((term, count));
            }
        }
    }

    /// Combine with a builder that saw records after this one.
    pub fn merge(mut self, other: SummaryBuilder) -> SummaryBuilder {
        self.low += other.low;
        self.medium += other.medium;
        self.high += other.high;
        for (term, count) in other.terms {
            self.add_term(term, count);
        }
        self
    }

    pub fn finish(self, top_n: usize) -> AggregateSummary {
        let total = self.total();
        let mut ranked = self.terms;
        // stable: equal frequencies keep first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(top_n);

        AggregateSummary {
            total,
            low_count: self.low,
            medium_count: self.medium,
            high_count: self.high,
            top_comorbidities: ranked
                .into_iter()
                .map(|(term, count)| ComorbidityCount::new(term, count))
                .collect(),
        }
    }
}

/// Tier counts and the `top_n` most frequent antecedent terms.
pub fn summarize(records: &[PredictionRecord], top_n: usize) -> AggregateSummary {
    let mut builder = SummaryBuilder::new();
    builder.extend(records);
    builder.finish(top_n)
}

/// Same result as [`summarize`], computed over rayon's thread pool.
pub fn summarize_parallel(records: &[PredictionRecord], top_n: usize) -> AggregateSummary {
    records
        .par_iter()
        .fold(SummaryBuilder::new, |mut builder, record| {
            builder.push(record);
            builder
        })
        .reduce(SummaryBuilder::new, SummaryBuilder::merge)
        .finish(top_n)
}
