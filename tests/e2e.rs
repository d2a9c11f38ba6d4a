use osu_report_charts as orc;
use orc::{InstallMethod, Scenario, System};
use pretty_assertions::assert_eq;

const REPORT: &str = r#"
[ReFrame Setup]
  version:           4.6.2
  command:           'reframe -C config/ulhpc.py -c reframe_tests/osu_eessi.py -r'

AION (EESSI)
┏━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━━━━━━━━┳━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━━┳━━━━━━━┳━━━━━━━━━━┳━━━━━━━━┓
┃ name_full                   ┃ sysenv          ┃ job_nodelist        ┃ pvar      ┃ punit ┃ pval     ┃ result ┃
┡━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╇━━━━━━━━━━━━━━━━━╇━━━━━━━━━━━━━━━━━━━━━╇━━━━━━━━━━━╇━━━━━━━╇━━━━━━━━━━╇━━━━━━━━┩
│ EESSIOsuDifferentNodes      │ aion:batch+foss │ aion-0001,aion-0002 │ latency   │ us    │ 4.02     │ pass   │
│ EESSIOsuDifferentNodes      │ aion:batch+foss │ aion-0001,aion-0002 │ bandwidth │ MB/s  │ 12100.55 │ pass   │
│ EESSIOsuSameNumaNode        │ aion:batch+foss │ aion-0003           │ latency   │ us    │ 0.41     │ pass   │
└─────────────────────────────┴─────────────────┴─────────────────────┴───────────┴───────┴──────────┴────────┘

Log file(s) saved in '/tmp/rfm-abc.log'

IRIS (EASYBUILD)
┏━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━━━━━━━━┳━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━━┳━━━━━━━┳━━━━━━━━━━┳━━━━━━━━┓
┃ name_full                   ┃ sysenv          ┃ job_nodelist        ┃ pvar      ┃ punit ┃ pval     ┃ result ┃
┡━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╇━━━━━━━━━━━━━━━━━╇━━━━━━━━━━━━━━━━━━━━━╇━━━━━━━━━━━╇━━━━━━━╇━━━━━━━━━━╇━━━━━━━━┩
│ EasyBuildOsuDifferentSockets│ iris:batch+foss │ iris-001            │ latency   │ us    │ 0.95     │ pass   │
│ OsuSameSocketDifferentNuma  │ iris:batch+foss │ iris-002            │ bandwidth │ MB/s  │ 8800.1   │ pass   │
└─────────────────────────────┴─────────────────┴─────────────────────┴───────────┴───────┴──────────┴────────┘
"#;

#[test]
fn test_single_row_example() {
    let text = "AION (EESSI)\n│ EESSIOsuDifferentNodes │ env1 │ node01,node02 │ latency │ us │ 4.02 │ PASSED │\n";
    let ds = orc::parse_report(text);
    assert_eq!(ds.len(), 1);
    let r = &ds.records[0];
    assert_eq!(r.system, System::Aion);
    assert_eq!(r.install_method, InstallMethod::Eessi);
    assert_eq!(r.scenario, Scenario::DifferentNodes);
    assert_eq!(r.pvar, "latency");
    assert_eq!(r.pval, 4.02);
    assert_eq!(r.job_nodelist, "node01,node02");
    assert_eq!(r.result, "PASSED");
}

#[test]
fn test_full_report() {
    let ds = orc::parse_report(REPORT);
    let got: Vec<_> = ds
        .records
        .iter()
        .map(|r| (r.system, r.install_method, r.scenario, r.pvar.as_str(), r.pval))
        .collect();
    assert_eq!(
        got,
        vec![
            (System::Aion, InstallMethod::Eessi, Scenario::DifferentNodes, "latency", 4.02),
            (System::Aion, InstallMethod::Eessi, Scenario::DifferentNodes, "bandwidth", 12100.55),
            (System::Aion, InstallMethod::Eessi, Scenario::SameNumaNode, "latency", 0.41),
            (System::Iris, InstallMethod::EasyBuild, Scenario::DifferentSockets, "latency", 0.95),
            (System::Iris, InstallMethod::EasyBuild, Scenario::SameSocketDifferentNuma, "bandwidth", 8800.1),
        ]
    );
    assert_eq!(ds.skipped.total(), 0);
}

#[test]
fn test_metric_views() {
    let ds = orc::parse_report(REPORT);
    assert_eq!(ds.for_metric("latency").count(), 3);
    assert_eq!(ds.for_metric("bandwidth").count(), 2);
    assert_eq!(ds.for_metric("message_rate").count(), 0);
}

#[test]
fn test_parse_file_reads_from_disk() {
    let dir = std::env::temp_dir().join(format!("orc-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("result.txt");
    std::fs::write(&path, REPORT).unwrap();
    let ds = orc::parse_file(&path).unwrap();
    assert_eq!(ds, orc::parse_report(REPORT));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_dump_json_shape() {
    let ds = orc::parse_report("IRIS (SOURCE)\n│ OsuSameNumaNode │ e │ n │ latency │ us │ 0.3 │ pass │");
    let v = serde_json::to_value(&ds).unwrap();
    assert_eq!(v["records"][0]["system"], "IRIS");
    assert_eq!(v["records"][0]["install_method"], "SOURCE");
    assert_eq!(v["records"][0]["scenario"], "SameNumaNode");
    assert_eq!(v["records"][0]["pval"], 0.3);
}
