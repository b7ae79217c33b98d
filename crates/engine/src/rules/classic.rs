//! Classic-model assertions (`ClassicAssert.AreEqual`, `Assert.IsTrue`, ...)
//! that have a constraint-model equivalent.

use catalog::ClassicAssertion;
use loader::Severity;

use super::{descriptor, AssertionSite, Rule, RuleContext};
use crate::diagnostic::{Descriptor, FixFacts, Report};

const MESSAGE: &str =
    "Consider using the constraint model, Assert.That(actual, {0}), instead of the classic model, ClassicAssert.{1}";
const CATEGORY: &str = "Assertion";
const DESCRIPTION: &str = "The classic model is kept for compatibility only. The constraint model reads naturally and produces better failure messages.";

static DESCRIPTORS: [Descriptor; 24] = [
    descriptor(
        "NUnit2001",
        "Consider using Assert.That(condition, Is.True) instead of ClassicAssert.True(condition)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2002",
        "Consider using Assert.That(condition, Is.False) instead of ClassicAssert.False(condition)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2003",
        "Consider using Assert.That(condition, Is.True) instead of ClassicAssert.IsTrue(condition)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2004",
        "Consider using Assert.That(condition, Is.False) instead of ClassicAssert.IsFalse(condition)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2005",
        "Consider using Assert.That(actual, Is.EqualTo(expected)) instead of ClassicAssert.AreEqual(expected, actual)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2006",
        "Consider using Assert.That(actual, Is.Not.EqualTo(expected)) instead of ClassicAssert.AreNotEqual(expected, actual)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2015",
        "Consider using Assert.That(actual, Is.SameAs(expected)) instead of ClassicAssert.AreSame(expected, actual)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2016",
        "Consider using Assert.That(expr, Is.Null) instead of ClassicAssert.Null(expr)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2017",
        "Consider using Assert.That(expr, Is.Null) instead of ClassicAssert.IsNull(expr)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2018",
        "Consider using Assert.That(expr, Is.Not.Null) instead of ClassicAssert.NotNull(expr)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2019",
        "Consider using Assert.That(expr, Is.Not.Null) instead of ClassicAssert.IsNotNull(expr)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2027",
        "Consider using Assert.That(actual, Is.GreaterThan(expected)) instead of ClassicAssert.Greater(actual, expected)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2028",
        "Consider using Assert.That(actual, Is.GreaterThanOrEqualTo(expected)) instead of ClassicAssert.GreaterOrEqual(actual, expected)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2029",
        "Consider using Assert.That(actual, Is.LessThan(expected)) instead of ClassicAssert.Less(actual, expected)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2030",
        "Consider using Assert.That(actual, Is.LessThanOrEqualTo(expected)) instead of ClassicAssert.LessOrEqual(actual, expected)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2031",
        "Consider using Assert.That(actual, Is.Not.SameAs(expected)) instead of ClassicAssert.AreNotSame(expected, actual)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2032",
        "Consider using Assert.That(expr, Is.Zero) instead of ClassicAssert.Zero(expr)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2033",
        "Consider using Assert.That(expr, Is.Not.Zero) instead of ClassicAssert.NotZero(expr)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2034",
        "Consider using Assert.That(expr, Is.NaN) instead of ClassicAssert.IsNaN(expr)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2035",
        "Consider using Assert.That(expr, Is.Empty) instead of ClassicAssert.IsEmpty(expr)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2036",
        "Consider using Assert.That(expr, Is.Not.Empty) instead of ClassicAssert.IsNotEmpty(expr)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2037",
        "Consider using Assert.That(actual, Has.Member(expected)) instead of ClassicAssert.Contains(expected, actual)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2038",
        "Consider using Assert.That(actual, Is.InstanceOf(expected)) instead of ClassicAssert.IsInstanceOf(expected, actual)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
    descriptor(
        "NUnit2039",
        "Consider using Assert.That(actual, Is.Not.InstanceOf(expected)) instead of ClassicAssert.IsNotInstanceOf(expected, actual)",
        MESSAGE,
        CATEGORY,
        Severity::Info,
        DESCRIPTION,
    ),
];

/// Source-like text of the constraint equivalent to `c`.
pub(crate) fn constraint_text(c: &ClassicAssertion) -> String {
    let mut text = c.constraint.helper.name().to_string();
    for name in c.constraint.chain {
        text.push('.');
        text.push_str(name);
    }
    if c.constraint.takes_expected {
        text.push_str("(expected)");
    }
    text
}

pub(crate) fn descriptor_for(c: &ClassicAssertion) -> Option<&'static Descriptor> {
    DESCRIPTORS.iter().find(|d| d.id == c.diagnostic_id)
}

pub struct ClassicModel;

impl Rule for ClassicModel {
    fn name(&self) -> &'static str {
        "classic-model"
    }

    fn descriptors(&self) -> &'static [Descriptor] {
        &DESCRIPTORS
    }

    fn analyze<'a>(&self, _cx: &RuleContext<'_>, site: &AssertionSite<'a>, out: &mut Vec<Report<'a>>) {
        let Some(c) = site.invocation.classic() else {
            return;
        };
        let Some(d) = descriptor_for(c) else {
            return;
        };
        out.push(
            Report::new(d, site.invocation.operation)
                .arg(constraint_text(c))
                .arg(c.name)
                .fix(FixFacts::ClassicToConstraint {
                    method: c.name.to_string(),
                }),
        );
    }
}
