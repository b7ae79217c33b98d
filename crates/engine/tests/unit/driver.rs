use super::*;
use ir::builder::{literal_int, literal_str};
use loader::{RuleLevel, RuleSetting};
use std::sync::{Arc, Mutex};

fn mixed_units(count: usize) -> Vec<CompilationUnit> {
    (0..count)
        .map(|idx| {
            unit(
                &format!("Tests{idx}.cs"),
                vec![
                    classic(
                        "AreEqual",
                        vec![("expected", literal_int(1)), ("actual", int("x"))],
                    ),
                    that(literal_int(3), is(vec![link("EqualTo").with(int("y"))])),
                    that(int("x"), is(vec![link("Null")])),
                    that(string("s"), is(vec![link("EqualTo").with(literal_int(2))])),
                ],
            )
        })
        .collect()
}

#[test]
fn diagnostics_are_sorted_within_a_unit() {
    let c = compilation(mixed_units(1));
    let d = analyze_compilation(&c, &EngineConfig::default(), None, None).unwrap();
    let lines: Vec<usize> = d.iter().map(|d| d.line).collect();
    let mut sorted = lines.clone();
    sorted.sort();
    assert_eq!(lines, sorted);
    assert_eq!(
        ids(&d),
        vec!["NUnit2005", "NUnit2007", "NUnit2023", "NUnit2021"]
    );
}

#[test]
fn results_do_not_depend_on_thread_count() {
    let c = compilation(mixed_units(24));
    let cfg = EngineConfig::default();
    let run = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| analyze_compilation(&c, &cfg, None, None).unwrap())
    };
    let single = run(1);
    let many = run(8);
    assert_eq!(single, many);
    assert_eq!(single.len(), 24 * 4);
    assert_eq!(single[0].file, std::path::PathBuf::from("Tests0.cs"));
    assert_eq!(
        single.last().map(|d| d.file.clone()),
        Some(std::path::PathBuf::from("Tests23.cs"))
    );
}

#[test]
fn ids_are_stable_across_runs() {
    let c = compilation(mixed_units(2));
    let cfg = EngineConfig::default();
    let first = analyze_compilation(&c, &cfg, None, None).unwrap();
    let second = analyze_compilation(&c, &cfg, None, None).unwrap();
    let a: Vec<&str> = first.iter().map(|d| d.id.as_str()).collect();
    let b: Vec<&str> = second.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(a, b);
    assert_eq!(first[0].id.len(), 16);
}

#[test]
fn reports_at_one_position_get_distinct_ids() {
    let constraint = ir::builder::user_binary(
        ir::BinaryOperator::Or,
        is(vec![link("EqualTo").with(int("x"))]),
        is(vec![link("EqualTo").with(int("x"))]),
        catalog::names::CONSTRAINT,
        ir::builder::class(catalog::names::CONSTRAINT),
    );
    let d = analyze(vec![that(int("x"), constraint)]);
    let same: Vec<&Diagnostic> = d.iter().filter(|d| d.rule_id == "NUnit2009").collect();
    assert_eq!(same.len(), 2);
    assert_eq!((same[0].line, same[0].column), (same[1].line, same[1].column));
    assert_ne!(same[0].id, same[1].id);
}

#[test]
fn settings_disable_and_override_rules() {
    let c = compilation(mixed_units(1));
    let mut settings = Settings::default();
    settings.rules.insert(
        "NUnit2005".into(),
        RuleSetting {
            severity: None,
            enabled: false,
        },
    );
    settings.override_with("NUnit2021", RuleLevel::Warning);
    settings.override_with("NUnit2023", RuleLevel::None);
    let cfg = EngineConfig {
        settings,
        ..Default::default()
    };
    let d = analyze_compilation(&c, &cfg, None, None).unwrap();
    assert_eq!(ids(&d), vec!["NUnit2007", "NUnit2021"]);
    assert_eq!(d[1].severity, Severity::Warning);
}

#[test]
fn cancelled_analysis_returns_an_error() {
    let c = compilation(mixed_units(4));
    let cfg = EngineConfig::default();
    cfg.cancel.cancel();
    let mut cache = AnalysisCache::default();
    let err = analyze_compilation(&c, &cfg, Some(&mut cache), None).unwrap_err();
    assert_eq!(err, EngineError::Cancelled);
    assert!(cache.is_empty());
}

#[test]
fn metrics_count_units_and_diagnostics() {
    let c = compilation(mixed_units(3));
    let mut metrics = EngineMetrics::default();
    let d = analyze_compilation(&c, &EngineConfig::default(), None, Some(&mut metrics)).unwrap();
    assert_eq!(metrics.diagnostics, d.len());
    assert_eq!(metrics.unit_times_ms.len(), 3);
    assert_eq!(metrics.cache_misses, 3);
    assert_eq!(metrics.cache_hits, 0);
}

struct Recorder(Arc<Mutex<Vec<DebugEvent>>>);

impl DebugSink for Recorder {
    fn event(&self, event: DebugEvent) {
        self.0.lock().unwrap().push(event);
    }
}

#[test]
fn debug_sink_sees_units_assertions_and_rules() {
    let events = Arc::new(Mutex::new(Vec::new()));
    set_debug_sink(Some(Box::new(Recorder(events.clone()))));
    let c = compilation(vec![unit(
        "Sink.cs",
        vec![classic(
            "IsNull",
            vec![("anObject", literal_str("constant"))],
        )],
    )]);
    analyze_unit(&c, &c.units[0], &EngineConfig::default()).unwrap();
    set_debug_sink(None);

    let events = events.lock().unwrap();
    let mine: Vec<&DebugEvent> = events
        .iter()
        .filter(|e| match e {
            DebugEvent::UnitStart { path } | DebugEvent::UnitEnd { path, .. } => {
                path.ends_with("Sink.cs")
            }
            DebugEvent::AssertionLocated { file, .. } | DebugEvent::RuleFired { file, .. } => {
                file.ends_with("Sink.cs")
            }
        })
        .collect();
    assert!(matches!(mine.first(), Some(DebugEvent::UnitStart { .. })));
    assert!(matches!(
        mine.last(),
        Some(DebugEvent::UnitEnd { diagnostics: 1, .. })
    ));
    assert!(mine.iter().any(|e| matches!(
        e,
        DebugEvent::AssertionLocated { method, form, .. } if method == "IsNull" && form == "classic"
    )));
    assert!(mine.iter().any(|e| matches!(
        e,
        DebugEvent::RuleFired { rule_id, line: 1, .. } if rule_id == "NUnit2017"
    )));
}
