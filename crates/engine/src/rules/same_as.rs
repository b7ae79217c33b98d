use loader::Severity;

use super::{descriptor, is_open, typed_pairs, AssertionSite, Rule, RuleContext};
use crate::diagnostic::{Descriptor, Report};
use crate::oracle::can_be_same_type;

static SAME_AS: [Descriptor; 2] = [
    descriptor(
        "NUnit2020",
        "Incompatible types for SameAs constraint",
        "The actual value of type '{0}' can never be the same instance as the expected value of type '{1}'",
        "Assertion",
        Severity::Error,
        "SameAs compares references. Values of unrelated types can never be the same instance.",
    ),
    descriptor(
        "NUnit2040",
        "Non-reference types for SameAs constraint",
        "The SameAs constraint always fails on value types as the actual and the expected value cannot be the same reference",
        "Assertion",
        Severity::Error,
        "Value types are boxed separately for each side, so SameAs can never succeed. Use EqualTo instead.",
    ),
];

/// `Is.SameAs`, `ClassicAssert.AreSame` and their negations.
pub struct SameAsUsage;

impl Rule for SameAsUsage {
    fn name(&self) -> &'static str {
        "same-as-usage"
    }

    fn descriptors(&self) -> &'static [Descriptor] {
        &SAME_AS
    }

    fn analyze<'a>(&self, cx: &RuleContext<'_>, site: &AssertionSite<'a>, out: &mut Vec<Report<'a>>) {
        for pair in typed_pairs(cx, site, |root| root == "SameAs") {
            let Some(expected) = pair.expected_type() else {
                continue;
            };
            if pair.actual.is_unresolved() || expected.is_unresolved() {
                continue;
            }
            if pair.actual.is_value_type() || expected.is_value_type() {
                out.push(Report::new(&SAME_AS[1], pair.expected));
                continue;
            }
            if is_open(&pair.actual) || is_open(expected) || !pair.is_decidable(cx.compilation) {
                continue;
            }
            if !can_be_same_type(cx.compilation, &pair.actual, expected) {
                out.push(
                    Report::new(&SAME_AS[0], pair.expected)
                        .arg(pair.actual.display())
                        .arg(expected.display()),
                );
            }
        }
    }
}
