//! Conversion of diagnostics to SARIF 2.1.0 specification.

use std::collections::BTreeSet;

use engine::{descriptor_by_id, Diagnostic};
use loader::Severity;
use serde_json::{json, Map, Value};
use serde_sarif::sarif;

fn level(severity: Severity) -> sarif::ResultLevel {
    match severity {
        Severity::Hidden => sarif::ResultLevel::None,
        Severity::Info => sarif::ResultLevel::Note,
        Severity::Warning => sarif::ResultLevel::Warning,
        Severity::Error => sarif::ResultLevel::Error,
    }
}

fn rules(diagnostics: &[Diagnostic]) -> Vec<sarif::ReportingDescriptor> {
    let ids: BTreeSet<&str> = diagnostics.iter().map(|d| d.rule_id.as_str()).collect();
    ids.into_iter()
        .filter_map(descriptor_by_id)
        .map(|d| {
            sarif::ReportingDescriptor::builder()
                .id(d.id)
                .name(d.title)
                .short_description(
                    sarif::MultiformatMessageString::builder()
                        .text(d.description)
                        .build(),
                )
                .help_uri(d.help_uri())
                .build()
        })
        .collect()
}

/// Fix facts and replacement text, carried in the result property bag.
fn properties(d: &Diagnostic) -> Option<sarif::PropertyBag> {
    if d.facts.is_none() && d.fix.is_none() {
        return None;
    }
    let mut bag = Map::new();
    if let Some(facts) = &d.facts {
        for (key, value) in facts.properties() {
            bag.insert(key.to_string(), Value::String(value));
        }
    }
    if let Some(fix) = &d.fix {
        bag.insert("replacement".into(), Value::String(fix.clone()));
    }
    bag.insert("id".into(), json!(d.id));
    serde_json::from_value(Value::Object(bag)).ok()
}

pub fn to_sarif(diagnostics: &[Diagnostic]) -> sarif::Sarif {
    let results: Vec<sarif::Result> = diagnostics
        .iter()
        .map(|d| {
            let location = sarif::Location::builder()
                .physical_location(
                    sarif::PhysicalLocation::builder()
                        .artifact_location(
                            sarif::ArtifactLocation::builder()
                                .uri(d.file.display().to_string())
                                .build(),
                        )
                        .region(
                            sarif::Region::builder()
                                .start_line(d.line as i64)
                                .start_column(d.column as i64)
                                .build(),
                        )
                        .build(),
                )
                .build();

            let mut result = sarif::Result::builder()
                .rule_id(d.rule_id.clone())
                .message(sarif::Message::builder().text(d.message.clone()).build())
                .level(level(d.severity))
                .locations(vec![location])
                .build();
            result.properties = properties(d);
            result
        })
        .collect();

    sarif::Sarif::builder()
        .version(json!("2.1.0"))
        .schema(sarif::SCHEMA_URL.to_string())
        .runs(vec![sarif::Run::builder()
            .tool(
                sarif::Tool::builder()
                    .driver(
                        sarif::ToolComponent::builder()
                            .name("nunitlint")
                            .version(env!("CARGO_PKG_VERSION"))
                            .rules(rules(diagnostics))
                            .build(),
                    )
                    .build(),
            )
            .results(results)
            .build()])
        .build()
}
