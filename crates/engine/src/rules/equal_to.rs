use loader::Severity;

use super::{descriptor, is_open, typed_pairs, AssertionSite, Rule, RuleContext};
use crate::diagnostic::{Descriptor, Report};
use crate::oracle::can_be_equal;

static EQUAL_TO: [Descriptor; 1] = [descriptor(
    "NUnit2021",
    "Incompatible types for EqualTo constraint",
    "The EqualTo constraint always fails as the actual value of type '{0}' can never be equal to the expected value of type '{1}'",
    "Assertion",
    Severity::Error,
    "The framework's equality comparer never considers values of these types equal, so the assertion can only fail.",
)];

/// `Is.EqualTo(x)` and `AreEqual`/`AreNotEqual` between unrelated types.
pub struct EqualToIncompatibleTypes;

impl Rule for EqualToIncompatibleTypes {
    fn name(&self) -> &'static str {
        "equal-to-incompatible-types"
    }

    fn descriptors(&self) -> &'static [Descriptor] {
        &EQUAL_TO
    }

    fn analyze<'a>(&self, cx: &RuleContext<'_>, site: &AssertionSite<'a>, out: &mut Vec<Report<'a>>) {
        for pair in typed_pairs(cx, site, |root| root == "EqualTo") {
            // A custom comparer decides equality on its own terms.
            if pair.part.is_some_and(|p| p.has_custom_comparer()) {
                continue;
            }
            let Some(expected) = pair.expected_type() else {
                continue;
            };
            if is_open(&pair.actual) || is_open(expected) || !pair.is_decidable(cx.compilation) {
                continue;
            }
            if !can_be_equal(cx.compilation, &pair.actual, expected) {
                out.push(
                    Report::new(&EQUAL_TO[0], pair.expected)
                        .arg(pair.actual.display())
                        .arg(expected.display()),
                );
            }
        }
    }
}
