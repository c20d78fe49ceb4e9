// File: src/batch.rs
use crate::core::engine::SentimentEngine;
use crate::core::types::{Label, SentimentResult};
use rayon::prelude::*;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::{self, BufRead};
use tracing::{info, warn};

/// One value from the comment column of a table.
///
/// Only text is scored. Missing values and anything that is not a string
/// are analysed as empty text, so they come out Neutral with a 0.0 score.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Text(Cow<'a, str>),
    Missing,
    NonText,
}

impl<'a> Cell<'a> {
    pub fn text(&self) -> &str {
        match self {
            Cell::Text(text) => text,
            Cell::Missing | Cell::NonText => "",
        }
    }
}

impl<'a> From<&'a str> for Cell<'a> {
    fn from(text: &'a str) -> Self {
        Cell::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Cell<'static> {
    fn from(text: String) -> Self {
        Cell::Text(Cow::Owned(text))
    }
}

impl<'a, T: Into<Cell<'a>>> From<Option<T>> for Cell<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Missing, Into::into)
    }
}

impl<'a> From<&'a serde_json::Value> for Cell<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Cell::Text(Cow::Borrowed(text.as_str())),
            serde_json::Value::Null => Cell::Missing,
            _ => Cell::NonText,
        }
    }
}

/// Reads one comment per line. Rows that are not valid UTF-8 are decoded
/// lossily rather than failing the batch; only a read error stops it.
pub fn read_rows<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut rows = Vec::new();
    for (line_no, line) in reader.split(b'\n').enumerate() {
        let mut bytes = line?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        let row = match String::from_utf8(bytes) {
            Ok(row) => row,
            Err(e) => {
                warn!(line = line_no + 1, "row is not valid UTF-8, decoding lossily");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        rows.push(row);
    }
    Ok(rows)
}

/// Result for one input row. Serializes as `{index, label, score}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowResult {
    pub index: usize,
    pub label: Label,
    /// Compound score rounded for presentation.
    pub score: f64,
    #[serde(skip)]
    pub compound: f64,
}

impl RowResult {
    fn new(index: usize, result: SentimentResult) -> Self {
        Self {
            index,
            label: result.label,
            score: result.score(),
            compound: result.compound,
        }
    }
}

/// Count per label. All three labels are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SummaryCounts(BTreeMap<Label, usize>);

impl Default for SummaryCounts {
    fn default() -> Self {
        Self(Label::ALL.iter().map(|&label| (label, 0)).collect())
    }
}

impl SummaryCounts {
    pub fn get(&self, label: Label) -> usize {
        self.0.get(&label).copied().unwrap_or(0)
    }

    pub fn record(&mut self, label: Label) {
        *self.0.entry(label).or_insert(0) += 1;
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Label, usize)> + '_ {
        self.0.iter().map(|(&label, &count)| (label, count))
    }
}

impl FromIterator<Label> for SummaryCounts {
    fn from_iter<I: IntoIterator<Item = Label>>(labels: I) -> Self {
        let mut counts = Self::default();
        for label in labels {
            counts.record(label);
        }
        counts
    }
}

/// Per-row results in input order plus the label summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub rows: Vec<RowResult>,
    pub summary: SummaryCounts,
}

impl BatchReport {
    fn from_rows(rows: Vec<RowResult>) -> Self {
        let summary = rows.iter().map(|row| row.label).collect();
        Self { rows, summary }
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    /// The `n` highest-scoring rows; ties keep input order.
    pub fn top_positive(&self, n: usize) -> Vec<&RowResult> {
        let mut ranked: Vec<&RowResult> = self.rows.iter().collect();
        ranked.sort_by(|a, b| b.compound.total_cmp(&a.compound).then(a.index.cmp(&b.index)));
        ranked.truncate(n);
        ranked
    }

    /// The `n` lowest-scoring rows; ties keep input order.
    pub fn top_negative(&self, n: usize) -> Vec<&RowResult> {
        let mut ranked: Vec<&RowResult> = self.rows.iter().collect();
        ranked.sort_by(|a, b| a.compound.total_cmp(&b.compound).then(a.index.cmp(&b.index)));
        ranked.truncate(n);
        ranked
    }

    /// Label counts grouped by a caller-supplied key per row, such as a
    /// parsed date. Rows without a key are left out.
    pub fn trend_by<K: Ord + Clone>(&self, keys: &[Option<K>]) -> BTreeMap<K, SummaryCounts> {
        let mut trend: BTreeMap<K, SummaryCounts> = BTreeMap::new();
        for (row, key) in self.rows.iter().zip(keys) {
            if let Some(key) = key {
                trend.entry(key.clone()).or_default().record(row.label);
            }
        }
        trend
    }
}

/// Scores a whole column. Never fails: bad cells become Neutral rows.
pub struct BatchAggregator<'e> {
    engine: &'e SentimentEngine,
}

impl<'e> BatchAggregator<'e> {
    pub fn new(engine: &'e SentimentEngine) -> Self {
        Self { engine }
    }

    pub fn analyze_batch<'a, I, T>(&self, column: I) -> BatchReport
    where
        I: IntoIterator<Item = T>,
        T: Into<Cell<'a>>,
    {
        let rows = column
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let cell: Cell<'a> = value.into();
                RowResult::new(index, self.engine.analyze(cell.text()))
            })
            .collect();
        self.finish(BatchReport::from_rows(rows))
    }

    /// Same output as `analyze_batch`, with rows scored on the rayon pool.
    pub fn analyze_batch_parallel<'a, I, T>(&self, column: I) -> BatchReport
    where
        I: IntoIterator<Item = T>,
        T: Into<Cell<'a>>,
    {
        let cells: Vec<Cell<'a>> = column.into_iter().map(Into::into).collect();
        let rows = cells
            .par_iter()
            .enumerate()
            .map(|(index, cell)| RowResult::new(index, self.engine.analyze(cell.text())))
            .collect();
        self.finish(BatchReport::from_rows(rows))
    }

    fn finish(&self, report: BatchReport) -> BatchReport {
        info!(
            rows = report.total(),
            positive = report.summary.get(Label::Positive),
            neutral = report.summary.get(Label::Neutral),
            negative = report.summary.get(Label::Negative),
            "batch analysed"
        );
        report
    }
}

impl SentimentEngine {
    pub fn batch(&self) -> BatchAggregator<'_> {
        BatchAggregator::new(self)
    }
}
