use engine::{
    analyze_compilation, analyze_unit, apply_fixes, decompose, descriptor_by_id, descriptors,
    fix_compilation, set_debug_sink, try_locate, validate_registry, AnalysisCache, AssertionForm,
    CancellationToken, DebugEvent, DebugSink, Diagnostic, EngineConfig, EngineError,
    EngineMetrics, ExpectedArgument, FixFacts, Severity, Settings,
};

use catalog::{names, HelperClass};
use engine::framework::{assert_that, chain, register, Link};
use ir::builder::{local, static_call, statement};
use ir::{Argument, Compilation, CompilationUnit, Operation, TypeDefinition, TypeSymbol};

mod decompose;
mod driver;
mod fixes;
mod locator;
mod rules;

pub(crate) const FILE: &str = "Tests.cs";

pub(crate) fn is(links: Vec<Link>) -> Operation {
    chain(HelperClass::Is, links).expect("non-empty chain")
}

pub(crate) fn has(links: Vec<Link>) -> Operation {
    chain(HelperClass::Has, links).expect("non-empty chain")
}

pub(crate) fn does(links: Vec<Link>) -> Operation {
    chain(HelperClass::Does, links).expect("non-empty chain")
}

pub(crate) fn link(name: &'static str) -> Link {
    Link::new(name)
}

pub(crate) fn that(actual: Operation, constraint: Operation) -> Operation {
    assert_that(actual, constraint, Vec::new())
}

/// `Assert.That(condition)`.
pub(crate) fn condition(value: Operation) -> Operation {
    static_call(
        names::ASSERT,
        "That",
        vec![Argument::named("condition", value)],
        None,
    )
}

/// `ClassicAssert.<method>(...)` with named arguments.
pub(crate) fn classic(method: &str, arguments: Vec<(&str, Operation)>) -> Operation {
    static_call(
        names::CLASSIC_ASSERT,
        method,
        arguments
            .into_iter()
            .map(|(name, value)| Argument::named(name, value))
            .collect(),
        None,
    )
}

pub(crate) fn int(name: &str) -> Operation {
    local(name, TypeSymbol::int32())
}

pub(crate) fn string(name: &str) -> Operation {
    local(name, TypeSymbol::string())
}

pub(crate) fn list_of_int(name: &str) -> Operation {
    local(name, TypeSymbol::list_of(TypeSymbol::int32()))
}

/// Every node of `op` placed on `line`, one assertion per line.
pub(crate) fn on_line(mut op: Operation, line: usize) -> Operation {
    op.for_each_mut(&mut |node| {
        node.meta.line = line;
        node.meta.column = 9;
    });
    op
}

pub(crate) fn unit(path: &str, assertions: Vec<Operation>) -> CompilationUnit {
    let mut unit = CompilationUnit::new(path);
    for (idx, assertion) in assertions.into_iter().enumerate() {
        unit.push(on_line(statement(assertion), idx + 1));
    }
    unit
}

/// Compilation with the framework and a few user types registered.
pub(crate) fn compilation(units: Vec<CompilationUnit>) -> Compilation {
    let mut c = Compilation::new();
    register(&mut c);
    c.define(TypeDefinition::class("App.Person").property("Name", TypeSymbol::string()));
    c.define(TypeDefinition::class("App.Animal"));
    c.define(TypeDefinition::class("App.Dog").with_base(ir::builder::class("App.Animal")));
    c.define(TypeDefinition::class("App.Car").sealed());
    c.units = units;
    c
}

pub(crate) fn analyze(assertions: Vec<Operation>) -> Vec<Diagnostic> {
    let c = compilation(vec![unit(FILE, assertions)]);
    analyze_compilation(&c, &EngineConfig::default(), None, None).expect("analysis")
}

pub(crate) fn ids(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.rule_id.as_str()).collect()
}

#[test]
fn registry_ids_are_unique() {
    assert!(validate_registry().is_ok());
    let all = descriptors();
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    assert!(descriptor_by_id("NUnit2005").is_some());
    assert!(descriptor_by_id("NUnit9999").is_none());
}
