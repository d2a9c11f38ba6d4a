use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Communication topology exercised by a point-to-point benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Scenario {
    DifferentNodes,
    DifferentSockets,
    SameSocketDifferentNuma,
    SameNumaNode,
    Unknown,
}

impl Scenario {
    /// Chart order, from farthest to closest placement.
    pub const CANONICAL: [Scenario; 4] = [
        Scenario::DifferentNodes,
        Scenario::DifferentSockets,
        Scenario::SameSocketDifferentNuma,
        Scenario::SameNumaNode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Scenario::DifferentNodes => "DifferentNodes",
            Scenario::DifferentSockets => "DifferentSockets",
            Scenario::SameSocketDifferentNuma => "SameSocketDifferentNuma",
            Scenario::SameNumaNode => "SameNumaNode",
            Scenario::Unknown => "Unknown",
        }
    }

    /// Position on the x axis, or `None` for `Unknown`.
    pub fn canonical_index(self) -> Option<usize> {
        Self::CANONICAL.iter().position(|s| *s == self)
    }

    fn from_token(token: &str) -> Self {
        Self::CANONICAL
            .into_iter()
            .find(|s| s.as_str() == token)
            .unwrap_or(Scenario::Unknown)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn scenario_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?:EESSIOsu|EasyBuildOsu|Osu)?(DifferentNodes|DifferentSockets|SameSocketDifferentNuma|SameNumaNode)",
        )
        .expect("valid scenario regex")
    })
}

/// Classify a benchmark by its full ReFrame name. The leftmost scenario
/// token wins; suite prefixes are ignored.
pub fn classify(name_full: &str) -> Scenario {
    scenario_regex()
        .captures(name_full)
        .and_then(|caps| caps.get(1))
        .map(|m| Scenario::from_token(m.as_str()))
        .unwrap_or(Scenario::Unknown)
}
