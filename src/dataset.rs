//! Turns the report text into a tidy list of measurements.

use crate::context::{self, Context, InstallMethod, Step, System};
use crate::row::{self, RawRow, SkipReason};
use crate::scenario::{self, Scenario};
use serde::Serialize;

/// One classified measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub name_full: String,
    pub sysenv: String,
    pub job_nodelist: String,
    pub pvar: String,
    pub punit: String,
    pub pval: f64,
    pub result: String,
    pub system: System,
    pub install_method: InstallMethod,
    pub scenario: Scenario,
}

impl Record {
    /// Validate `pval` and classify the row.
    pub fn from_raw(raw: RawRow) -> Result<Self, SkipReason> {
        let pval = parse_value(&raw.pval).ok_or_else(|| SkipReason::BadValue(raw.pval.clone()))?;
        let scenario = scenario::classify(&raw.name_full);
        Ok(Record {
            name_full: raw.name_full,
            sysenv: raw.sysenv,
            job_nodelist: raw.job_nodelist,
            pvar: raw.pvar,
            punit: raw.punit,
            pval,
            result: raw.result,
            system: raw.context.system,
            install_method: raw.context.install_method,
            scenario,
        })
    }
}

/// NaN and infinities count as unparseable.
fn parse_value(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Counts of table rows that did not make it into the dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipStats {
    pub no_context: usize,
    pub field_count: usize,
    pub bad_value: usize,
}

impl SkipStats {
    fn record(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::NoContext => self.no_context += 1,
            SkipReason::FieldCount(_) => self.field_count += 1,
            SkipReason::BadValue(_) => self.bad_value += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.no_context + self.field_count + self.bad_value
    }
}

/// All records of one report, in the order they were read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub skipped: SkipStats,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Records whose `pvar` equals `metric`.
    pub fn for_metric<'a>(&'a self, metric: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| r.pvar == metric)
    }
}

/// Process one line. Returns the context for the next line and, if the
/// line was a data row, either the record or the reason it was skipped.
pub fn scan_line(
    ctx: Option<Context>,
    line: &str,
) -> (Option<Context>, Option<Result<Record, SkipReason>>) {
    let line = line.trim();
    if line.is_empty() {
        return (ctx, None);
    }
    let (ctx, step) = context::track(ctx, line);
    if step == Step::Consumed {
        return (ctx, None);
    }
    let outcome = row::extract_row(line, ctx).map(|r| r.and_then(Record::from_raw));
    (ctx, outcome)
}

/// Parse a whole report.
pub fn parse_report(text: &str) -> Dataset {
    let mut ds = Dataset::default();
    let mut ctx = None;
    for (lineno, line) in text.lines().enumerate() {
        let (next, outcome) = scan_line(ctx, line);
        ctx = next;
        match outcome {
            Some(Ok(record)) => ds.records.push(record),
            Some(Err(reason)) => {
                tracing::trace!(line = lineno + 1, %reason, "skipping row");
                ds.skipped.record(&reason);
            }
            None => {}
        }
    }
    ds
}
