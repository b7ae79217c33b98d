use catalog::ClassicKind;
use ir::syntax::{are_equivalent, text};
use ir::Operation;
use loader::Severity;

use super::{descriptor, AssertionSite, Rule, RuleContext};
use crate::diagnostic::{Descriptor, FixFacts, Report};
use crate::locator::AssertionForm;

static CONST_ACTUAL: [Descriptor; 1] = [descriptor(
    "NUnit2007",
    "The actual value should not be a constant",
    "The actual value should not be a constant, perhaps the actual value and the expected value have switched places",
    "Assertion",
    Severity::Warning,
    "A constant actual value makes the assertion test nothing but the expected value. Swap the arguments.",
)];

static SAME_VALUE: [Descriptor; 1] = [descriptor(
    "NUnit2009",
    "The same value has been provided as both the actual and the expected argument",
    "The actual and the expected argument is the same '{0}'",
    "Assertion",
    Severity::Error,
    "Comparing a value with itself always succeeds and indicates a mistake in the test.",
)];

fn is_constant(op: &Operation) -> bool {
    op.unwrap_conversions().is_constant()
}

/// Expected argument, as bound, of a plain equality assertion.
pub(crate) fn equality_expected<'a>(site: &AssertionSite<'a>) -> Option<&'a Operation> {
    let inv = &site.invocation;
    match inv.form {
        AssertionForm::Classic(c) if c.kind == ClassicKind::Equality => inv.expected,
        AssertionForm::Constraint => site
            .expression
            .as_ref()
            .and_then(|e| e.single_part())
            .filter(|p| p.is_plain() && p.suffixes.is_empty() && !p.has_unknown_expressions())
            .filter(|p| p.root_name() == Some("EqualTo"))
            .and_then(|p| p.expected_argument())
            .map(|e| e.argument),
        _ => None,
    }
}

/// `Assert.That(1, Is.EqualTo(x))` and `ClassicAssert.AreEqual(x, 1)`.
pub struct ConstActualValue;

impl Rule for ConstActualValue {
    fn name(&self) -> &'static str {
        "const-actual-value"
    }

    fn descriptors(&self) -> &'static [Descriptor] {
        &CONST_ACTUAL
    }

    fn analyze<'a>(&self, _cx: &RuleContext<'_>, site: &AssertionSite<'a>, out: &mut Vec<Report<'a>>) {
        let actual = site.invocation.actual_operand();
        if !is_constant(actual) {
            return;
        }
        let Some(expected) = equality_expected(site) else {
            return;
        };
        if is_constant(expected) {
            return;
        }
        out.push(Report::new(&CONST_ACTUAL[0], actual).fix(FixFacts::SwapActualExpected));
    }
}

/// `Assert.That(x, Is.EqualTo(x))`.
pub struct SameActualExpectedValue;

impl Rule for SameActualExpectedValue {
    fn name(&self) -> &'static str {
        "same-actual-expected-value"
    }

    fn descriptors(&self) -> &'static [Descriptor] {
        &SAME_VALUE
    }

    fn analyze<'a>(&self, _cx: &RuleContext<'_>, site: &AssertionSite<'a>, out: &mut Vec<Report<'a>>) {
        let actual = site.invocation.actual_operand();
        for part in site.parts() {
            if part.is_unknown_shape() || part.has_unknown_expressions() || !part.is_plain() {
                continue;
            }
            let Some(expected) = part.expected_argument() else {
                continue;
            };
            if are_equivalent(actual, expected.operand) {
                out.push(Report::new(&SAME_VALUE[0], expected.operand).arg(text(actual)));
            }
        }
    }
}
