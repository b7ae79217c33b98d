//! Analysis engine for NUnit assertions.
//!
//! Locates assertion calls in each compilation unit, decomposes their
//! constraint expressions, runs the rule analyzers and turns their reports
//! into diagnostics. Units are analyzed in parallel and the result is
//! independent of scheduling.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use blake3::Hasher;
use ir::{Compilation, CompilationUnit, Meta, Operation};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

pub mod cache;
mod cancel;
pub mod constraint;
pub mod debug;
mod diagnostic;
mod error;
pub mod fixes;
pub mod framework;
pub mod locator;
pub mod oracle;
pub mod rules;

pub use cache::{context_hash, hash_unit, AnalysisCache};
pub use cancel::CancellationToken;
pub use constraint::{decompose, ConstraintExpression, ConstraintExpressionPart, ExpectedArgument};
pub use debug::{set_debug_sink, DebugEvent, DebugSink};
pub use diagnostic::{Descriptor, Diagnostic, FixFacts, Report};
pub use error::EngineError;
pub use fixes::{apply_fixes, rewrite};
pub use loader::{Severity, Settings};
pub use locator::{try_locate, AssertionForm, AssertionInvocation};
pub use oracle::{can_be_compared, can_be_equal, can_be_same_type};
pub use rules::{
    descriptor_by_id, descriptors, registry, validate_registry, AssertionSite, Rule, RuleContext,
};

use crate::debug::emit;

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Per-diagnostic enablement and severity overrides.
    pub settings: Settings,
    pub cancel: CancellationToken,
}

#[derive(Debug, Default, Serialize)]
pub struct EngineMetrics {
    pub unit_times_ms: HashMap<String, u128>,
    pub diagnostics: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
}

/// Stable id of a report. `ordinal` counts earlier reports of the same rule
/// at the same position, so overlapping reports stay distinct.
fn diagnostic_id(rule_id: &str, file: &str, meta: &Meta, ordinal: usize) -> String {
    let mut hasher = Hasher::new();
    hasher.update(rule_id.as_bytes());
    hasher.update(b"\0");
    hasher.update(file.as_bytes());
    hasher.update(b"\0");
    for value in [meta.line, meta.column, meta.start, meta.end, ordinal] {
        hasher.update(&value.to_le_bytes());
    }
    hasher.finalize().to_hex().as_str()[..16].to_string()
}

/// Runs every rule on one located assertion.
fn analyze_site(
    compilation: &Compilation,
    unit: &CompilationUnit,
    site: &AssertionSite<'_>,
    cfg: &EngineConfig,
    out: &mut Vec<Diagnostic>,
) -> Result<(), EngineError> {
    let cx = RuleContext { compilation };
    let mut reports = Vec::new();
    for rule in registry() {
        cfg.cancel.check()?;
        rule.analyze(&cx, site, &mut reports);
    }
    for report in reports {
        let descriptor = report.descriptor;
        if !cfg.settings.is_enabled(descriptor.id) {
            continue;
        }
        let Some(severity) = cfg
            .settings
            .effective_severity(descriptor.id, descriptor.default_severity)
        else {
            continue;
        };
        let fix = match &report.facts {
            Some(facts) => rewrite(compilation, site, facts)?.map(|op| op.syntax),
            None => None,
        };
        let meta = &report.node.meta;
        let ordinal = out
            .iter()
            .filter(|d| d.rule_id == descriptor.id && d.line == meta.line && d.column == meta.column)
            .count();
        emit(DebugEvent::RuleFired {
            rule_id: descriptor.id.to_string(),
            file: PathBuf::from(&unit.path),
            line: meta.line,
        });
        out.push(Diagnostic {
            id: diagnostic_id(descriptor.id, &unit.path, meta, ordinal),
            rule_id: descriptor.id.to_string(),
            title: descriptor.title.to_string(),
            severity,
            file: PathBuf::from(&unit.path),
            line: meta.line,
            column: meta.column,
            excerpt: ir::syntax::text(report.node),
            message: descriptor.format(&report.args),
            facts: report.facts,
            fix,
            target: site.invocation.operation.meta.clone(),
        });
    }
    Ok(())
}

fn analyze_root(
    compilation: &Compilation,
    unit: &CompilationUnit,
    root: &Operation,
    cfg: &EngineConfig,
    out: &mut Vec<Diagnostic>,
) -> Result<(), EngineError> {
    for node in root.descendants() {
        cfg.cancel.check()?;
        let Some(invocation) = try_locate(compilation, node, &cfg.cancel)? else {
            continue;
        };
        emit(DebugEvent::AssertionLocated {
            file: PathBuf::from(&unit.path),
            line: node.meta.line,
            method: invocation.method.name.clone(),
            form: invocation.form.label().to_string(),
        });
        let expression = invocation
            .constraint
            .map(|c| decompose(c, &cfg.cancel))
            .transpose()?;
        let site = AssertionSite {
            invocation,
            expression,
        };
        analyze_site(compilation, unit, &site, cfg, out)?;
    }
    Ok(())
}

/// Diagnostics of one unit, sorted by location and rule id.
pub fn analyze_unit(
    compilation: &Compilation,
    unit: &CompilationUnit,
    cfg: &EngineConfig,
) -> Result<Vec<Diagnostic>, EngineError> {
    emit(DebugEvent::UnitStart {
        path: PathBuf::from(&unit.path),
    });
    debug!(unit = %unit.path, operations = unit.operations.len(), "Analyzing unit");
    let mut diagnostics = Vec::new();
    for root in &unit.operations {
        analyze_root(compilation, unit, root, cfg, &mut diagnostics)?;
    }
    diagnostics.sort_by(|a, b| {
        (a.line, a.column, &a.rule_id).cmp(&(b.line, b.column, &b.rule_id))
    });
    emit(DebugEvent::UnitEnd {
        path: PathBuf::from(&unit.path),
        diagnostics: diagnostics.len(),
    });
    Ok(diagnostics)
}

/// Analyzes every unit of the compilation.
///
/// Diagnostics come back grouped by unit in the compilation's unit order,
/// whatever the thread count. Units found in `cache` are not analyzed again;
/// the cache is invalidated first when the type registry or the settings
/// changed. A cancelled run returns [`EngineError::Cancelled`] and adds
/// nothing to the cache.
pub fn analyze_compilation(
    compilation: &Compilation,
    cfg: &EngineConfig,
    mut cache: Option<&mut AnalysisCache>,
    mut metrics: Option<&mut EngineMetrics>,
) -> Result<Vec<Diagnostic>, EngineError> {
    debug!(units = compilation.units.len(), "Starting analysis");
    if let Some(c) = cache.as_deref_mut() {
        c.validate(&context_hash(compilation, &cfg.settings));
    }

    let keyed: Vec<(String, &CompilationUnit)> = compilation
        .units
        .iter()
        .map(|u| (hash_unit(u), u))
        .collect();
    let mut results: Vec<Option<Vec<Diagnostic>>> = keyed
        .iter()
        .map(|(key, _)| cache.as_deref().and_then(|c| c.get(key)).cloned())
        .collect();
    let hits = results.iter().filter(|r| r.is_some()).count();

    let pending: Vec<usize> = results
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_none())
        .map(|(idx, _)| idx)
        .collect();
    let analyzed: Vec<(usize, u128, Vec<Diagnostic>)> = pending
        .par_iter()
        .map(|&idx| {
            let unit = keyed[idx].1;
            let start = Instant::now();
            let diagnostics = analyze_unit(compilation, unit, cfg)?;
            Ok::<_, EngineError>((idx, start.elapsed().as_millis(), diagnostics))
        })
        .collect::<Result<_, EngineError>>()?;

    for (idx, elapsed, diagnostics) in analyzed {
        let (key, unit) = &keyed[idx];
        if let Some(c) = cache.as_deref_mut() {
            c.insert(key.clone(), diagnostics.clone());
        }
        if let Some(m) = metrics.as_deref_mut() {
            m.unit_times_ms.insert(unit.path.clone(), elapsed);
        }
        results[idx] = Some(diagnostics);
    }

    let diagnostics: Vec<Diagnostic> = results.into_iter().flatten().flatten().collect();
    if let Some(m) = metrics {
        m.diagnostics = diagnostics.len();
        m.cache_hits = hits;
        m.cache_misses = pending.len();
    }
    if hits > 0 {
        debug!(hits, "Reused cached diagnostics");
    }
    debug!(diagnostics = diagnostics.len(), "Analysis completed");
    Ok(diagnostics)
}

/// Analyzes and applies every available fix, repeating until no fix
/// applies or `max_passes` is reached. Returns the number of rewritten
/// assertions.
pub fn fix_compilation(
    compilation: &mut Compilation,
    cfg: &EngineConfig,
    max_passes: usize,
) -> Result<usize, EngineError> {
    let mut total = 0;
    for pass in 0..max_passes {
        let diagnostics = analyze_compilation(compilation, cfg, None, None)?;
        let applied = apply_fixes(compilation, &diagnostics)?;
        debug!(pass, applied, "Fix pass completed");
        if applied == 0 {
            return Ok(total);
        }
        total += applied;
    }
    warn!(max_passes, "Fixes still pending after the last pass");
    Ok(total)
}
