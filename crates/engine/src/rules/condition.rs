//! Boolean conditions that hide a comparison from the framework:
//! `Assert.That(a == b)`, `Assert.That(a > b, Is.True)`,
//! `Assert.That(s.StartsWith("x"))`.

use ir::{BinaryOperator, Compilation, Enumerable, Operation, OperationKind, UnaryOperator};
use loader::Severity;

use super::{descriptor, AssertionSite, Rule, RuleContext};
use crate::diagnostic::{Descriptor, FixFacts, Report};
use crate::locator::AssertionForm;

static EQUALITY: [Descriptor; 2] = [
    descriptor(
        "NUnit2010",
        "Use EqualConstraint for better assertion messages in case of failure",
        "Consider using the constraint model, Assert.That(actual, {0}), instead of {1}",
        "Assertion",
        Severity::Info,
        "A boolean condition only reports 'expected True but was False'. The equality constraint reports both values.",
    ),
    descriptor(
        "NUnit2043",
        "Use ComparisonConstraint for better assertion messages in case of failure",
        "Consider using the constraint model, Assert.That(actual, {0}), instead of the '{1}' operator",
        "Assertion",
        Severity::Info,
        "A boolean condition only reports 'expected True but was False'. Comparison constraints report both values.",
    ),
];

static STRING_METHODS: [Descriptor; 4] = [
    descriptor(
        "NUnit2011",
        "Use ContainsConstraint for better assertion messages in case of failure",
        "Consider using Assert.That(actual, {0}) instead of the '{1}' method",
        "Assertion",
        Severity::Info,
        "Does.Contain reports the actual string and the missing substring.",
    ),
    descriptor(
        "NUnit2012",
        "Use StartsWithConstraint for better assertion messages in case of failure",
        "Consider using Assert.That(actual, {0}) instead of the '{1}' method",
        "Assertion",
        Severity::Info,
        "Does.StartWith reports the actual string and the expected prefix.",
    ),
    descriptor(
        "NUnit2013",
        "Use EndsWithConstraint for better assertion messages in case of failure",
        "Consider using Assert.That(actual, {0}) instead of the '{1}' method",
        "Assertion",
        Severity::Info,
        "Does.EndWith reports the actual string and the expected suffix.",
    ),
    descriptor(
        "NUnit2014",
        "Use SomeItemsConstraint for better assertion messages in case of failure",
        "Consider using Assert.That(collection, {0}) instead of the '{1}' method",
        "Assertion",
        Severity::Info,
        "Has.Member reports the collection contents when the item is missing.",
    ),
];

/// Condition under test and whether the assertion expects it to be false.
pub(crate) fn tested_condition<'a>(site: &AssertionSite<'a>) -> Option<(&'a Operation, bool)> {
    let mut negated = match site.invocation.form {
        AssertionForm::Condition => false,
        AssertionForm::Constraint => {
            let part = site.expression.as_ref()?.single_part()?;
            if part.has_unknown_expressions() || !part.is_plain() || !part.suffixes.is_empty() {
                return None;
            }
            match part.root_name()? {
                "True" => part.is_negated(),
                "False" => !part.is_negated(),
                _ => return None,
            }
        }
        AssertionForm::Classic(_) => return None,
    };
    let mut op = site.invocation.actual_operand();
    while let OperationKind::Unary {
        operator: UnaryOperator::Not,
        operand,
    } = &op.kind
    {
        negated = !negated;
        op = operand.unwrap_implicit_conversions();
    }
    Some((op, negated))
}

/// `a == b`, `a != b`, `a.Equals(b)` or `Equals(a, b)`; the flag is set for
/// the inequality operator.
pub(crate) fn equality_operands(op: &Operation) -> Option<(&Operation, &Operation, bool)> {
    match &op.kind {
        OperationKind::Binary {
            operator: operator @ (BinaryOperator::Equals | BinaryOperator::NotEquals),
            left,
            right,
            ..
        } => Some((
            left.unwrap_implicit_conversions(),
            right.unwrap_implicit_conversions(),
            *operator == BinaryOperator::NotEquals,
        )),
        OperationKind::Invocation {
            method,
            instance,
            arguments,
        } if method.name == "Equals" => match (instance.as_deref(), arguments.as_slice()) {
            (Some(i), [arg]) => Some((
                i.unwrap_implicit_conversions(),
                arg.value.unwrap_implicit_conversions(),
                false,
            )),
            (None, [a, b]) => Some((
                a.value.unwrap_implicit_conversions(),
                b.value.unwrap_implicit_conversions(),
                false,
            )),
            _ => None,
        },
        _ => None,
    }
}

/// Constraint equivalent to `left <op> right`, taking negation into account.
pub(crate) fn comparison_operands(
    op: &Operation,
    negated: bool,
) -> Option<(&Operation, &Operation, &'static str)> {
    let OperationKind::Binary {
        operator,
        left,
        right,
        ..
    } = &op.kind
    else {
        return None;
    };
    let constraint = match (operator, negated) {
        (BinaryOperator::GreaterThan, false) | (BinaryOperator::LessThanOrEqual, true) => "GreaterThan",
        (BinaryOperator::GreaterThanOrEqual, false) | (BinaryOperator::LessThan, true) => {
            "GreaterThanOrEqualTo"
        }
        (BinaryOperator::LessThan, false) | (BinaryOperator::GreaterThanOrEqual, true) => "LessThan",
        (BinaryOperator::LessThanOrEqual, false) | (BinaryOperator::GreaterThan, true) => {
            "LessThanOrEqualTo"
        }
        _ => return None,
    };
    Some((
        left.unwrap_implicit_conversions(),
        right.unwrap_implicit_conversions(),
        constraint,
    ))
}

pub struct EqualityOperatorUsage;

impl Rule for EqualityOperatorUsage {
    fn name(&self) -> &'static str {
        "equality-operator-usage"
    }

    fn descriptors(&self) -> &'static [Descriptor] {
        &EQUALITY
    }

    fn analyze<'a>(&self, _cx: &RuleContext<'_>, site: &AssertionSite<'a>, out: &mut Vec<Report<'a>>) {
        let Some((condition, negated)) = tested_condition(site) else {
            return;
        };
        if let Some((_, _, inequality)) = equality_operands(condition) {
            let negated = negated != inequality;
            let constraint = if negated {
                "Is.Not.EqualTo(expected)"
            } else {
                "Is.EqualTo(expected)"
            };
            let used = match &condition.kind {
                OperationKind::Binary { operator, .. } => format!("the '{}' operator", operator.token()),
                _ => "the 'Equals' method".to_string(),
            };
            out.push(
                Report::new(&EQUALITY[0], site.invocation.actual)
                    .arg(constraint)
                    .arg(used)
                    .fix(FixFacts::UseEqualConstraint { negated }),
            );
        } else if let Some((_, _, constraint)) = comparison_operands(condition, negated) {
            let token = match &condition.kind {
                OperationKind::Binary { operator, .. } => operator.token(),
                _ => "",
            };
            out.push(
                Report::new(&EQUALITY[1], site.invocation.actual)
                    .arg(format!("Is.{constraint}(expected)"))
                    .arg(token)
                    .fix(FixFacts::UseComparisonConstraint {
                        constraint: constraint.to_string(),
                    }),
            );
        }
    }
}

/// What a string or collection method call in a condition maps to.
pub(crate) struct MethodCondition<'a> {
    pub receiver: &'a Operation,
    pub argument: &'a Operation,
    pub method: &'static str,
    /// `Contain`, `StartWith`, `EndWith` on `Does`, or `Member` on `Has`.
    pub constraint: &'static str,
}

pub(crate) fn method_condition<'a>(
    compilation: &Compilation,
    op: &'a Operation,
) -> Option<MethodCondition<'a>> {
    let OperationKind::Invocation {
        method,
        instance,
        arguments,
    } = &op.kind
    else {
        return None;
    };
    let (receiver, argument) = match (instance.as_deref(), arguments.as_slice()) {
        (Some(i), [arg]) => (i.unwrap_implicit_conversions(), &arg.value),
        // `Enumerable.Contains(source, value)` called as an extension method.
        (None, [source, value]) if method.name == "Contains" => {
            (source.value.unwrap_implicit_conversions(), &value.value)
        }
        _ => return None,
    };
    let receiver_type = receiver.ty.as_ref()?;
    let (method, constraint) = match method.name.as_str() {
        "Contains" if receiver_type.is_string() => ("Contains", "Contain"),
        "StartsWith" if receiver_type.is_string() => ("StartsWith", "StartWith"),
        "EndsWith" if receiver_type.is_string() => ("EndsWith", "EndWith"),
        "Contains" => match compilation.enumerable_element_type(receiver_type) {
            Enumerable::NotEnumerable => return None,
            _ => ("Contains", "Member"),
        },
        _ => return None,
    };
    Some(MethodCondition {
        receiver,
        argument: argument.unwrap_implicit_conversions(),
        method,
        constraint,
    })
}

pub struct StringMethodUsage;

impl Rule for StringMethodUsage {
    fn name(&self) -> &'static str {
        "string-method-usage"
    }

    fn descriptors(&self) -> &'static [Descriptor] {
        &STRING_METHODS
    }

    fn analyze<'a>(&self, cx: &RuleContext<'_>, site: &AssertionSite<'a>, out: &mut Vec<Report<'a>>) {
        let Some((condition, negated)) = tested_condition(site) else {
            return;
        };
        let Some(found) = method_condition(cx.compilation, condition) else {
            return;
        };
        let (descriptor, facts) = match found.constraint {
            "Member" => (
                &STRING_METHODS[3],
                FixFacts::UseSomeItemsConstraint { negated },
            ),
            constraint => {
                let descriptor = match constraint {
                    "Contain" => &STRING_METHODS[0],
                    "StartWith" => &STRING_METHODS[1],
                    _ => &STRING_METHODS[2],
                };
                let facts = FixFacts::UseStringConstraint {
                    constraint: constraint.to_string(),
                    negated,
                };
                (descriptor, facts)
            }
        };
        let suggestion = match (found.constraint, negated) {
            ("Member", true) => "Has.No.Member(expected)".to_string(),
            ("Member", false) => "Has.Member(expected)".to_string(),
            (c, true) => format!("Does.Not.{c}(expected)"),
            (c, false) => format!("Does.{c}(expected)"),
        };
        out.push(
            Report::new(descriptor, site.invocation.actual)
                .arg(suggestion)
                .arg(found.method)
                .fix(facts),
        );
    }
}
