use ir::Enumerable;
use loader::Severity;

use super::{descriptor, is_open, typed_pairs, AssertionSite, Rule, RuleContext};
use crate::diagnostic::{Descriptor, Report};
use crate::oracle::can_be_equal;

static SOME_ITEMS: [Descriptor; 1] = [descriptor(
    "NUnit2026",
    "Wrong actual type used with the SomeItemsConstraint with EqualConstraint",
    "The SomeItemsConstraint with EqualConstraint cannot be used with an actual value of type '{0}' and an expected value of type '{1}'",
    "Assertion",
    Severity::Error,
    "The actual value must be a collection whose items can be equal to the expected value.",
)];

fn is_some_items_root(name: &str) -> bool {
    matches!(name, "Member" | "Item" | "Contain" | "Contains")
}

/// `Has.Member(x)`, `Contains.Item(x)` and `Does.Contain(x)` on collections.
pub struct SomeItemsIncompatibleTypes;

impl Rule for SomeItemsIncompatibleTypes {
    fn name(&self) -> &'static str {
        "some-items-incompatible-types"
    }

    fn descriptors(&self) -> &'static [Descriptor] {
        &SOME_ITEMS
    }

    fn analyze<'a>(&self, cx: &RuleContext<'_>, site: &AssertionSite<'a>, out: &mut Vec<Report<'a>>) {
        for pair in typed_pairs(cx, site, is_some_items_root) {
            if pair.part.is_some_and(|p| p.has_custom_comparer()) {
                continue;
            }
            let Some(expected) = pair.expected_type() else {
                continue;
            };
            if is_open(&pair.actual) || is_open(expected) {
                continue;
            }
            // `Does.Contain("x")` is a substring check, see the ContainsConstraint rule.
            let is_contain = pair
                .part
                .and_then(|p| p.root_name())
                .is_some_and(|r| r == "Contain" || r == "Contains");
            if is_contain && (expected.is_string() || pair.actual.is_string()) {
                continue;
            }
            let incompatible = match cx.compilation.enumerable_element_type(&pair.actual) {
                Enumerable::Typed(element) => !can_be_equal(cx.compilation, &element, expected),
                Enumerable::Untyped => false,
                Enumerable::NotEnumerable => !is_contain && cx.compilation.is_known(&pair.actual),
            };
            if incompatible {
                out.push(
                    Report::new(&SOME_ITEMS[0], pair.expected)
                        .arg(pair.actual.display())
                        .arg(expected.display()),
                );
            }
        }
    }
}
