//! Recognises assertion invocations in an operation tree.

use catalog::names::{self, EntryPoint};
use catalog::{classic, ClassicAssertion, ClassicKind};
use ir::symbols::MethodSymbol;
use ir::{Compilation, Operation, OperationKind, SpecialType, TypeKind, TypeSymbol};

use crate::framework::is_constraint_type;
use crate::{CancellationToken, EngineError};

/// Parameter names the actual value of a `That`-style method is bound to.
const ACTUAL_PARAMETERS: &[&str] = &["actual", "del", "code", "condition"];
/// Parameter names the constraint of a `That`-style method is bound to.
const CONSTRAINT_PARAMETERS: &[&str] = &["expression", "constraint", "expr"];
/// Parameters carrying failure messages, never analysed.
const MESSAGE_PARAMETERS: &[&str] = &[
    "message",
    "args",
    "getExceptionMessage",
    "actualExpression",
    "constraintExpression",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionForm {
    /// `ClassicAssert.AreEqual(expected, actual)` and friends.
    Classic(&'static ClassicAssertion),
    /// `Assert.That(actual, constraint)`.
    Constraint,
    /// `Assert.That(condition)` without a constraint.
    Condition,
}

impl AssertionForm {
    pub fn label(&self) -> &'static str {
        match self {
            AssertionForm::Classic(_) => "classic",
            AssertionForm::Constraint => "constraint",
            AssertionForm::Condition => "condition",
        }
    }
}

/// A located assertion with its arguments already bound to their roles.
#[derive(Debug, Clone)]
pub struct AssertionInvocation<'a> {
    pub operation: &'a Operation,
    pub method: &'a MethodSymbol,
    pub entry: EntryPoint,
    pub form: AssertionForm,
    pub actual: &'a Operation,
    pub expected: Option<&'a Operation>,
    pub tolerance: Option<&'a Operation>,
    pub constraint: Option<&'a Operation>,
    pub message_arguments: Vec<&'a Operation>,
    pub is_async: bool,
}

impl<'a> AssertionInvocation<'a> {
    pub fn classic(&self) -> Option<&'static ClassicAssertion> {
        match self.form {
            AssertionForm::Classic(c) => Some(c),
            _ => None,
        }
    }

    /// `actual` without compiler-inserted conversions.
    pub fn actual_operand(&self) -> &'a Operation {
        self.actual.unwrap_implicit_conversions()
    }

    pub fn expected_operand(&self) -> Option<&'a Operation> {
        self.expected.map(|e| e.unwrap_implicit_conversions())
    }
}

/// An argument together with the declared parameter it is bound to.
struct Bound<'a> {
    name: Option<&'a str>,
    value: &'a Operation,
}

fn bind<'a>(method: &'a MethodSymbol, op: &'a Operation) -> Vec<Bound<'a>> {
    op.arguments()
        .iter()
        .enumerate()
        .map(|(idx, arg)| Bound {
            name: arg
                .parameter
                .as_deref()
                .or_else(|| method.parameters.get(idx).map(|p| p.name.as_str())),
            value: &arg.value,
        })
        .collect()
}

fn find<'a>(bound: &[Bound<'a>], names: &[&str]) -> Option<&'a Operation> {
    bound
        .iter()
        .find(|b| b.name.is_some_and(|n| names.contains(&n)))
        .map(|b| b.value)
}

fn messages<'a>(bound: &[Bound<'a>]) -> Vec<&'a Operation> {
    bound
        .iter()
        .filter(|b| b.name.is_some_and(|n| MESSAGE_PARAMETERS.contains(&n)))
        .map(|b| b.value)
        .collect()
}

/// Entry point declared by `containing_type`, directly or through a base
/// class such as `class MyAssert : Assert`.
fn resolve_entry(compilation: &Compilation, containing_type: &str) -> Option<EntryPoint> {
    if let Some(entry) = EntryPoint::from_metadata_name(containing_type) {
        return Some(entry);
    }
    let ty = TypeSymbol::named(containing_type, TypeKind::Class);
    compilation
        .base_types(&ty)
        .iter()
        .find_map(|b| EntryPoint::from_metadata_name(&b.name))
}

/// Canonical positional order of a classic method's parameters, used when
/// the host did not record parameter names.
fn classic_order(c: &ClassicAssertion) -> Vec<&'static str> {
    let actual = c.actual.first().copied().unwrap_or("actual");
    match (c.kind, c.expected) {
        (ClassicKind::Comparison, Some(expected)) => vec![actual, expected],
        (_, Some(expected)) => {
            let mut order = vec![expected, actual];
            order.extend(c.tolerance);
            order
        }
        (_, None) => vec![actual],
    }
}

fn bind_classic<'a>(c: &ClassicAssertion, method: &'a MethodSymbol, op: &'a Operation) -> Vec<Bound<'a>> {
    let mut bound = bind(method, op);
    let order = classic_order(c);
    for (idx, b) in bound.iter_mut().enumerate() {
        if b.name.is_some() {
            continue;
        }
        b.name = match order.get(idx).copied() {
            // A trailing string in the tolerance slot is the failure message.
            Some(t) if Some(t) == c.tolerance && b.value.ty.as_ref().is_some_and(|ty| ty.is_string()) => {
                Some("message")
            }
            Some(n) => Some(n),
            None => Some("args"),
        };
    }
    bound
}

fn locate_classic<'a>(
    c: &'static ClassicAssertion,
    entry: EntryPoint,
    method: &'a MethodSymbol,
    op: &'a Operation,
) -> Option<AssertionInvocation<'a>> {
    let bound = bind_classic(c, method, op);
    let actual = find(&bound, c.actual)?;
    let expected = c.expected.and_then(|e| find(&bound, &[e]));
    // `IsInstanceOf<T>(actual)` carries the expected type as a type argument.
    if c.expected.is_some() && expected.is_none() && method.type_arguments.is_empty() {
        return None;
    }
    Some(AssertionInvocation {
        operation: op,
        method,
        entry,
        form: AssertionForm::Classic(c),
        actual,
        expected,
        tolerance: c.tolerance.and_then(|t| find(&bound, &[t])),
        constraint: None,
        message_arguments: messages(&bound),
        is_async: false,
    })
}

fn accepts_constraint(compilation: &Compilation, value: &Operation, by_name: bool) -> bool {
    match value.ty.as_ref() {
        Some(ty) if ty.is_unresolved() => by_name,
        Some(ty) => is_constraint_type(compilation, ty),
        None => by_name && !value.is_null_literal(),
    }
}

fn locate_constraint<'a>(
    compilation: &Compilation,
    entry: EntryPoint,
    method: &'a MethodSymbol,
    op: &'a Operation,
) -> Option<AssertionInvocation<'a>> {
    let bound = bind(method, op);
    let actual = find(&bound, ACTUAL_PARAMETERS).or_else(|| bound.first().map(|b| b.value))?;

    let constraint = match find(&bound, CONSTRAINT_PARAMETERS) {
        Some(c) if accepts_constraint(compilation, c, true) => Some(c),
        Some(_) => return None,
        None => bound
            .iter()
            .skip(1)
            .filter(|b| !b.name.is_some_and(|n| MESSAGE_PARAMETERS.contains(&n)))
            .map(|b| b.value)
            .find(|v| accepts_constraint(compilation, v, false)),
    };

    let form = match constraint {
        Some(_) => AssertionForm::Constraint,
        None if is_condition(actual) => AssertionForm::Condition,
        None => return None,
    };

    Some(AssertionInvocation {
        operation: op,
        method,
        entry,
        form,
        actual,
        expected: None,
        tolerance: None,
        constraint,
        message_arguments: messages(&bound),
        is_async: method.name == "ThatAsync",
    })
}

/// Boolean condition or a lambda returning one.
fn is_condition(actual: &Operation) -> bool {
    let actual = actual.unwrap_implicit_conversions();
    let ty = match &actual.kind {
        OperationKind::AnonymousFunction { body } => body.unwrap_implicit_conversions().ty.as_ref(),
        _ => actual.ty.as_ref(),
    };
    match ty {
        Some(t) => t.special_type() == Some(SpecialType::Boolean) || t.is_unresolved(),
        None => false,
    }
}

/// Recognises `op` as an assertion call.
///
/// Non-invocations and calls to anything but a framework entry point yield
/// `Ok(None)`; the only error is cancellation.
pub fn try_locate<'a>(
    compilation: &Compilation,
    op: &'a Operation,
    cancel: &CancellationToken,
) -> Result<Option<AssertionInvocation<'a>>, EngineError> {
    let OperationKind::Invocation { method, .. } = &op.kind else {
        return Ok(None);
    };
    let classic_entry = classic(&method.name);
    if classic_entry.is_none() && !names::is_that_method(&method.name) {
        return Ok(None);
    }
    if !method.is_static {
        return Ok(None);
    }
    cancel.check()?;

    let Some(entry) = resolve_entry(compilation, &method.containing_type) else {
        return Ok(None);
    };
    if let Some(c) = classic_entry.filter(|_| entry.hosts_classic()) {
        return Ok(locate_classic(c, entry, method, op));
    }
    if entry.that_methods().contains(&method.name.as_str()) {
        return Ok(locate_constraint(compilation, entry, method, op));
    }
    Ok(None)
}
