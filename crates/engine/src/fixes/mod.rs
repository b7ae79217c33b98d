//! Code fixes.
//!
//! A fix never re-runs rule logic: the diagnostic's [`FixFacts`] say what
//! to rewrite, and the located assertion says where the pieces are. The
//! replacement is synthesized with the framework node builders so that it
//! can be analyzed again like any loaded tree.

use std::collections::HashSet;
use std::path::Path;

use catalog::names;
use catalog::HelperClass;
use ir::{builder, Argument, Compilation, Meta, Operation, OperationKind};
use tracing::debug;

use crate::cancel::CancellationToken;
use crate::constraint::decompose;
use crate::diagnostic::{Diagnostic, FixFacts};
use crate::error::contract_violation;
use crate::framework::{chain, that_call, Link};
use crate::locator::{try_locate, AssertionForm};
use crate::rules::{
    collection_size, comparison_operands, equality_expected, equality_operands, method_condition,
    not_null_or_empty, tested_condition, AssertionSite, RuleContext,
};
use crate::EngineError;

mod tree;

use tree::{path_to, path_to_node, place, replace_at, replaced};

/// Source value for a synthesized argument.
///
/// Compiler-inserted conversions are dropped, except user-defined ones: the
/// new call may not bind through the same parameter type, so those become
/// explicit casts.
fn fix_operand(argument: &Operation) -> Operation {
    if let OperationKind::Conversion { conversion, .. } = &argument.kind {
        if argument.implicit && conversion.is_user_defined() {
            if let Some(to) = &argument.ty {
                return builder::convert(
                    argument.unwrap_implicit_conversions().clone(),
                    to.clone(),
                    *conversion,
                    false,
                );
            }
        }
    }
    argument.unwrap_implicit_conversions().clone()
}

fn message_arguments(site: &AssertionSite<'_>) -> Vec<Argument> {
    site.invocation
        .message_arguments
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let value = (*value).clone();
            if idx == 0 {
                Argument::named("message", value)
            } else {
                Argument::positional(value)
            }
        })
        .collect()
}

/// `That` call on the same entry point and method as the original.
fn same_entry_that(site: &AssertionSite<'_>, actual: Operation, constraint: Operation) -> Operation {
    let method = site.invocation.method;
    that_call(
        &method.containing_type,
        &method.name,
        actual,
        constraint,
        message_arguments(site),
    )
}

fn negation(negated: bool, word: &'static str) -> Option<Link> {
    negated.then(|| Link::new(word))
}

fn classic_to_constraint(site: &AssertionSite<'_>, method: &str) -> Result<Option<Operation>, EngineError> {
    let inv = &site.invocation;
    if catalog::classic(method).is_none() {
        return Err(contract_violation("fix names an unknown classic method"));
    }
    let Some(classic) = inv.classic().filter(|c| c.name == method) else {
        return Ok(None);
    };
    let template = &classic.constraint;
    let mut links: Vec<Link> = Vec::new();
    for (idx, name) in template.chain.iter().copied().enumerate() {
        let mut link = Link::new(name);
        let is_root = idx + 1 == template.chain.len();
        if is_root && template.takes_expected {
            match (inv.expected, inv.method.type_arguments.first()) {
                (Some(expected), _) => link = link.with(fix_operand(expected)),
                (None, Some(ty)) => link = link.generic(ty.clone()),
                (None, None) => return Ok(None),
            }
        }
        links.push(link);
    }
    if let Some(tolerance) = inv.tolerance {
        links.push(Link::new("Within").with(fix_operand(tolerance)));
    }
    let Some(constraint) = chain(template.helper, links) else {
        return Ok(None);
    };
    Ok(Some(that_call(
        names::ASSERT,
        "That",
        inv.actual_operand().clone(),
        constraint,
        message_arguments(site),
    )))
}

fn swap_actual_expected(site: &AssertionSite<'_>) -> Option<Operation> {
    let root = site.invocation.operation;
    let actual = site.invocation.actual;
    let expected = equality_expected(site)?;
    let actual_path = path_to_node(root, actual)?;
    let expected_path = path_to_node(root, expected)?;
    replaced(
        root,
        vec![
            (actual_path, expected.clone()),
            (expected_path, actual.clone()),
        ],
    )
}

fn use_equal_constraint(site: &AssertionSite<'_>, negated: bool) -> Option<Operation> {
    let (condition, _) = tested_condition(site)?;
    let (left, right, _) = equality_operands(condition)?;
    let links = negation(negated, "Not")
        .into_iter()
        .chain([Link::new("EqualTo").with(fix_operand(right))])
        .collect();
    let constraint = chain(HelperClass::Is, links)?;
    Some(same_entry_that(site, fix_operand(left), constraint))
}

fn use_comparison_constraint(site: &AssertionSite<'_>, expected: &str) -> Option<Operation> {
    let (condition, negated) = tested_condition(site)?;
    let (left, right, constraint) = comparison_operands(condition, negated)?;
    if constraint != expected {
        return None;
    }
    let constraint = chain(
        HelperClass::Is,
        vec![Link::new(constraint).with(fix_operand(right))],
    )?;
    Some(same_entry_that(site, fix_operand(left), constraint))
}

fn use_method_constraint(
    compilation: &Compilation,
    site: &AssertionSite<'_>,
    helper: HelperClass,
    negated: bool,
) -> Option<Operation> {
    let (condition, _) = tested_condition(site)?;
    let found = method_condition(compilation, condition)?;
    let not = if helper == HelperClass::Has { "No" } else { "Not" };
    let links = negation(negated, not)
        .into_iter()
        .chain([Link::new(found.constraint).with(fix_operand(found.argument))])
        .collect();
    let constraint = chain(helper, links)?;
    Some(same_entry_that(site, fix_operand(found.receiver), constraint))
}

fn use_collection_constraint(
    compilation: &Compilation,
    site: &AssertionSite<'_>,
    member: &str,
) -> Option<Operation> {
    let cx = RuleContext { compilation };
    let (collection, size) = collection_size(&cx, site.invocation.actual_operand())?;
    if size != member {
        return None;
    }
    let part = site.expression.as_ref()?.single_part()?;
    let mut links = vec![Link::new(size)];
    for prefix in part.prefix_names() {
        links.push(Link::new(catalog::member(prefix)?.name));
    }
    let root = part.root?;
    let mut root_link = Link::new(catalog::member(part.root_name()?)?.name);
    for argument in root.arguments() {
        root_link = root_link.with(argument.value.clone());
    }
    links.push(root_link);
    let constraint = chain(HelperClass::Has, links)?;
    Some(same_entry_that(site, fix_operand(collection), constraint))
}

fn split_not_null_or_empty(site: &AssertionSite<'_>) -> Option<Operation> {
    let constraint = site.invocation.constraint?;
    let helper = match not_null_or_empty(constraint)? {
        "Iz" => HelperClass::Iz,
        _ => HelperClass::Is,
    };
    let replacement = chain(
        helper,
        ["Not", "Null", "And", "Not", "Empty"]
            .into_iter()
            .map(Link::new)
            .collect(),
    )?;
    let root = site.invocation.operation;
    let path = path_to_node(root, constraint)?;
    replaced(root, vec![(path, replacement)])
}

/// Replacement for the assertion invocation of `site`.
///
/// `Ok(None)` means the shape no longer matches the facts (the tree changed
/// since the diagnostic was produced).
pub fn rewrite(
    compilation: &Compilation,
    site: &AssertionSite<'_>,
    facts: &FixFacts,
) -> Result<Option<Operation>, EngineError> {
    let condition_form = !matches!(site.invocation.form, AssertionForm::Classic(_));
    let rewritten = match facts {
        FixFacts::ClassicToConstraint { method } => classic_to_constraint(site, method)?,
        FixFacts::SwapActualExpected => swap_actual_expected(site),
        FixFacts::UseEqualConstraint { negated } if condition_form => {
            use_equal_constraint(site, *negated)
        }
        FixFacts::UseComparisonConstraint { constraint } if condition_form => {
            use_comparison_constraint(site, constraint)
        }
        FixFacts::UseStringConstraint { negated, .. } if condition_form => {
            use_method_constraint(compilation, site, HelperClass::Does, *negated)
        }
        FixFacts::UseSomeItemsConstraint { negated } if condition_form => {
            use_method_constraint(compilation, site, HelperClass::Has, *negated)
        }
        FixFacts::UseCollectionConstraint { member } => {
            use_collection_constraint(compilation, site, member)
        }
        FixFacts::SplitNotNullOrEmpty => split_not_null_or_empty(site),
        _ => None,
    };
    Ok(rewritten.map(|op| place(op, &site.invocation.operation.meta)))
}

/// Rewrites the invocation at `target` inside `root`, if it still is an
/// assertion the facts apply to.
fn fix_in_tree(
    compilation: &Compilation,
    root: &Operation,
    target: &Meta,
    facts: &FixFacts,
) -> Result<Option<(Vec<usize>, Operation)>, EngineError> {
    let Some(path) = path_to(root, &|n| n.is_invocation() && n.meta == *target) else {
        return Ok(None);
    };
    let mut node = root;
    for idx in &path {
        match node.children().get(*idx) {
            Some(child) => node = child,
            None => return Ok(None),
        }
    }
    let cancel = CancellationToken::new();
    let Some(invocation) = try_locate(compilation, node, &cancel)? else {
        return Ok(None);
    };
    let expression = invocation
        .constraint
        .map(|c| decompose(c, &cancel))
        .transpose()?;
    let site = AssertionSite {
        invocation,
        expression,
    };
    Ok(rewrite(compilation, &site, facts)?.map(|op| (path, op)))
}

/// Applies the fixes carried by `diagnostics` to the compilation's units.
///
/// At most one fix is applied per assertion; further diagnostics on an
/// already rewritten assertion are skipped. Returns the number of
/// rewritten assertions.
pub fn apply_fixes(compilation: &mut Compilation, diagnostics: &[Diagnostic]) -> Result<usize, EngineError> {
    let mut units = std::mem::take(&mut compilation.units);
    let result = fix_units(compilation, &mut units, diagnostics);
    compilation.units = units;
    result
}

fn fix_units(
    compilation: &Compilation,
    units: &mut [ir::CompilationUnit],
    diagnostics: &[Diagnostic],
) -> Result<usize, EngineError> {
    let mut applied = 0;
    for unit in units.iter_mut() {
        let mut fixed: HashSet<Meta> = HashSet::new();
        let path = Path::new(&unit.path);
        for diagnostic in diagnostics.iter().filter(|d| d.file == path) {
            let Some(facts) = &diagnostic.facts else {
                continue;
            };
            if fixed.contains(&diagnostic.target) {
                continue;
            }
            for root in unit.operations.iter_mut() {
                let Some((node_path, replacement)) =
                    fix_in_tree(compilation, root, &diagnostic.target, facts)?
                else {
                    continue;
                };
                if replace_at(root, &node_path, replacement) {
                    debug!(
                        rule = %diagnostic.rule_id,
                        file = %unit.path,
                        line = diagnostic.line,
                        "fix applied"
                    );
                    fixed.insert(diagnostic.target.clone());
                    applied += 1;
                }
                break;
            }
        }
    }
    Ok(applied)
}
