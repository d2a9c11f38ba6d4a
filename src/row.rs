use crate::context::Context;
use std::fmt;

/// Vertical border glyph used by the report tables.
pub const BORDER: char = '│';

/// Column names of a performance table, in order.
pub const HEADER: [&str; 7] = [
    "name_full",
    "sysenv",
    "job_nodelist",
    "pvar",
    "punit",
    "pval",
    "result",
];

const HEADER_MARKER: &str = "name";
const HEAVY_RULE: &str = "━━━━━━━━";
const LIGHT_RULE: &str = "────────";

/// Why a table row did not become a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    /// The row came before any title line.
    NoContext,
    /// The row did not have exactly seven fields.
    FieldCount(usize),
    /// `pval` was not a finite number.
    BadValue(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoContext => f.write_str("row before any title line"),
            SkipReason::FieldCount(n) => write!(f, "expected {} fields, found {n}", HEADER.len()),
            SkipReason::BadValue(v) => write!(f, "non-numeric value {v:?}"),
        }
    }
}

/// A table row split into its fields, with the context it was read under.
/// `pval` is still raw text at this point.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub name_full: String,
    pub sysenv: String,
    pub job_nodelist: String,
    pub pvar: String,
    pub punit: String,
    pub pval: String,
    pub result: String,
    pub context: Context,
}

/// Whether the line looks like a data row rather than a header or rule.
pub fn is_candidate(line: &str) -> bool {
    line.starts_with(BORDER)
        && !line.contains(HEADER_MARKER)
        && !line.contains(HEAVY_RULE)
        && !line.contains(LIGHT_RULE)
}

/// Split a bordered line into trimmed fields, dropping whatever lies
/// outside the outer borders.
pub fn split_fields(line: &str) -> Vec<&str> {
    let parts: Vec<&str> = line.split(BORDER).collect();
    if parts.len() < 2 {
        return Vec::new();
    }
    parts[1..parts.len() - 1].iter().map(|p| p.trim()).collect()
}

/// Extract a row from `line`.
///
/// Returns `None` when the line is not a data row at all, and
/// `Some(Err(_))` when it is a data row that has to be skipped.
pub fn extract_row(line: &str, context: Option<Context>) -> Option<Result<RawRow, SkipReason>> {
    if !is_candidate(line) {
        return None;
    }
    let Some(context) = context else {
        return Some(Err(SkipReason::NoContext));
    };
    let fields = split_fields(line);
    let Ok([name_full, sysenv, job_nodelist, pvar, punit, pval, result]) =
        <[&str; 7]>::try_from(fields.as_slice())
    else {
        return Some(Err(SkipReason::FieldCount(fields.len())));
    };
    Some(Ok(RawRow {
        name_full: name_full.to_string(),
        sysenv: sysenv.to_string(),
        job_nodelist: job_nodelist.to_string(),
        pvar: pvar.to_string(),
        punit: punit.to_string(),
        pval: pval.to_string(),
        result: result.to_string(),
        context,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{InstallMethod, System};
    use pretty_assertions::assert_eq;

    fn ctx() -> Option<Context> {
        Some(Context::new(System::Aion, InstallMethod::Eessi))
    }

    #[test]
    fn splits_seven_fields() {
        let line = "│ EESSIOsuDifferentNodes │ aion:batch+foss │ aion-0001,aion-0002 │ latency │ us │ 4.02 │ PASSED │";
        let row = extract_row(line, ctx()).unwrap().unwrap();
        assert_eq!(row.name_full, "EESSIOsuDifferentNodes");
        assert_eq!(row.job_nodelist, "aion-0001,aion-0002");
        assert_eq!(row.pvar, "latency");
        assert_eq!(row.pval, "4.02");
        assert_eq!(row.result, "PASSED");
    }

    #[test]
    fn header_and_rules_are_not_rows() {
        assert!(!is_candidate("│ name_full │ sysenv │ job_nodelist │ pvar │ punit │ pval │ result │"));
        assert!(!is_candidate("│━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━│"));
        assert!(!is_candidate("│────────────────────────────────────────│"));
        assert!(!is_candidate("┏━━━━━━━━━━━┳━━━━━━━━━━┓"));
        assert!(!is_candidate("Summary of performance"));
    }

    #[test]
    fn wrong_field_count() {
        let line = "│ OsuSameNumaNode │ env │ n1 │ latency │ us │ 1.0 │";
        assert_eq!(extract_row(line, ctx()), Some(Err(SkipReason::FieldCount(6))));
    }

    #[test]
    fn no_context() {
        let line = "│ a │ b │ c │ latency │ us │ 1.0 │ PASSED │";
        assert_eq!(extract_row(line, None), Some(Err(SkipReason::NoContext)));
    }

    #[test]
    fn single_border_yields_no_fields() {
        assert!(split_fields("│ lonely").is_empty());
    }
}
