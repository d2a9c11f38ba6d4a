use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Cluster the benchmark ran on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum System {
    Aion,
    Iris,
}

impl System {
    pub fn as_str(self) -> &'static str {
        match self {
            System::Aion => "AION",
            System::Iris => "IRIS",
        }
    }

    fn from_title(s: &str) -> Option<Self> {
        match s {
            "AION" => Some(System::Aion),
            "IRIS" => Some(System::Iris),
            _ => None,
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the OSU micro-benchmarks were installed on the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstallMethod {
    Eessi,
    EasyBuild,
    Source,
}

impl InstallMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            InstallMethod::Eessi => "EESSI",
            InstallMethod::EasyBuild => "EASYBUILD",
            InstallMethod::Source => "SOURCE",
        }
    }

    fn from_title(s: &str) -> Option<Self> {
        match s {
            "EESSI" => Some(InstallMethod::Eessi),
            "EASYBUILD" => Some(InstallMethod::EasyBuild),
            "SOURCE" => Some(InstallMethod::Source),
            _ => None,
        }
    }
}

impl fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `(system, install method)` pair set by the most recent title line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Context {
    pub system: System,
    pub install_method: InstallMethod,
}

impl Context {
    pub fn new(system: System, install_method: InstallMethod) -> Self {
        Self { system, install_method }
    }
}

/// What the tracker did with a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The line was a title; the context was replaced.
    Consumed,
    /// Not a title; hand the line on to the row extractor.
    PassThrough,
}

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(AION|IRIS) \((EESSI|EASYBUILD|SOURCE)\)").expect("valid title regex")
    })
}

/// Parse a title line such as `AION (EESSI)`. Anything after the closing
/// parenthesis is ignored.
pub fn parse_title(line: &str) -> Option<Context> {
    let caps = title_regex().captures(line)?;
    let system = System::from_title(caps.get(1)?.as_str())?;
    let install_method = InstallMethod::from_title(caps.get(2)?.as_str())?;
    Some(Context::new(system, install_method))
}

/// Advance the tracker by one line. The returned context is the one in
/// effect for the next line.
pub fn track(current: Option<Context>, line: &str) -> (Option<Context>, Step) {
    match parse_title(line) {
        Some(ctx) => (Some(ctx), Step::Consumed),
        None => (current, Step::PassThrough),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn title_sets_context() {
        let (ctx, step) = track(None, "IRIS (EASYBUILD)");
        assert_eq!(step, Step::Consumed);
        assert_eq!(ctx, Some(Context::new(System::Iris, InstallMethod::EasyBuild)));
    }

    #[test]
    fn title_with_trailing_text() {
        assert_eq!(
            parse_title("AION (SOURCE) - run 2"),
            Some(Context::new(System::Aion, InstallMethod::Source))
        );
    }

    #[test]
    fn non_title_keeps_context() {
        let prev = Some(Context::new(System::Aion, InstallMethod::Eessi));
        for line in ["", "Running 8 check(s)", "│ a │ b │", "  AION (EESSI)", "aion (eessi)"] {
            let (ctx, step) = track(prev, line);
            assert_eq!(step, Step::PassThrough, "{line:?}");
            assert_eq!(ctx, prev);
        }
    }

    #[test]
    fn unknown_system_is_not_a_title() {
        assert_eq!(parse_title("MELUXINA (EESSI)"), None);
        assert_eq!(parse_title("AION (SPACK)"), None);
    }
}
