use catalog::members::is_comparison_root;
use loader::Severity;

use super::{descriptor, is_open, typed_pairs, AssertionSite, Rule, RuleContext};
use crate::diagnostic::{Descriptor, Report};
use crate::oracle::can_be_compared;

static COMPARISON: [Descriptor; 1] = [descriptor(
    "NUnit2041",
    "Incompatible types for comparison constraint",
    "The comparison constraint cannot be used with actual value of type '{0}' and expected value of type '{1}'",
    "Assertion",
    Severity::Error,
    "The default comparer throws at run time when the two values cannot be ordered against each other.",
)];

/// `Is.GreaterThan(x)`, `ClassicAssert.Less(a, b)` and friends.
pub struct ComparisonIncompatibleTypes;

impl Rule for ComparisonIncompatibleTypes {
    fn name(&self) -> &'static str {
        "comparison-incompatible-types"
    }

    fn descriptors(&self) -> &'static [Descriptor] {
        &COMPARISON
    }

    fn analyze<'a>(&self, cx: &RuleContext<'_>, site: &AssertionSite<'a>, out: &mut Vec<Report<'a>>) {
        for pair in typed_pairs(cx, site, is_comparison_root) {
            if pair.part.is_some_and(|p| p.has_custom_comparer()) {
                continue;
            }
            let Some(expected) = pair.expected_type() else {
                continue;
            };
            if is_open(&pair.actual) || is_open(expected) {
                continue;
            }
            if !can_be_compared(cx.compilation, &pair.actual, expected) {
                out.push(
                    Report::new(&COMPARISON[0], pair.expected)
                        .arg(pair.actual.display())
                        .arg(expected.display()),
                );
            }
        }
    }
}
