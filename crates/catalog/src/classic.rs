//! Classic assertion methods (`ClassicAssert.AreEqual`, `Assert.IsTrue`, ...)
//! and the constraint each one is equivalent to.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

use crate::names::HelperClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ClassicKind {
    Equality,
    Identity,
    Condition,
    Nullity,
    Comparison,
    Numeric,
    Emptiness,
    Containment,
    Type,
}

/// `Assert.That(actual, <helper>.<chain...>(expected?))`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintTemplate {
    pub helper: HelperClass,
    /// Member names after the helper; the last one is the root.
    pub chain: &'static [&'static str],
    /// The root is invoked with the expected operand.
    pub takes_expected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassicAssertion {
    pub name: &'static str,
    pub kind: ClassicKind,
    /// Diagnostic reported when this method is used.
    pub diagnostic_id: &'static str,
    /// Declared names the actual value may be bound to (overloads differ).
    pub actual: &'static [&'static str],
    pub expected: Option<&'static str>,
    pub tolerance: Option<&'static str>,
    pub constraint: ConstraintTemplate,
}

const fn is(chain: &'static [&'static str], takes_expected: bool) -> ConstraintTemplate {
    ConstraintTemplate {
        helper: HelperClass::Is,
        chain,
        takes_expected,
    }
}

const fn entry(
    name: &'static str,
    kind: ClassicKind,
    diagnostic_id: &'static str,
    actual: &'static [&'static str],
    expected: Option<&'static str>,
    constraint: ConstraintTemplate,
) -> ClassicAssertion {
    ClassicAssertion {
        name,
        kind,
        diagnostic_id,
        actual,
        expected,
        tolerance: None,
        constraint,
    }
}

const ACTUAL: &[&str] = &["actual"];
const CONDITION: &[&str] = &["condition"];
const AN_OBJECT: &[&str] = &["anObject"];
const ARG1: &[&str] = &["arg1"];
const COLLECTION: &[&str] = &["aString", "collection"];
const EXPECTED: Option<&str> = Some("expected");

pub static CLASSIC: &[ClassicAssertion] = &[
    entry("True", ClassicKind::Condition, "NUnit2001", CONDITION, None, is(&["True"], false)),
    entry("False", ClassicKind::Condition, "NUnit2002", CONDITION, None, is(&["False"], false)),
    entry("IsTrue", ClassicKind::Condition, "NUnit2003", CONDITION, None, is(&["True"], false)),
    entry("IsFalse", ClassicKind::Condition, "NUnit2004", CONDITION, None, is(&["False"], false)),
    ClassicAssertion {
        tolerance: Some("delta"),
        ..entry("AreEqual", ClassicKind::Equality, "NUnit2005", ACTUAL, EXPECTED, is(&["EqualTo"], true))
    },
    entry("AreNotEqual", ClassicKind::Equality, "NUnit2006", ACTUAL, EXPECTED, is(&["Not", "EqualTo"], true)),
    entry("AreSame", ClassicKind::Identity, "NUnit2015", ACTUAL, EXPECTED, is(&["SameAs"], true)),
    entry("Null", ClassicKind::Nullity, "NUnit2016", AN_OBJECT, None, is(&["Null"], false)),
    entry("IsNull", ClassicKind::Nullity, "NUnit2017", AN_OBJECT, None, is(&["Null"], false)),
    entry("NotNull", ClassicKind::Nullity, "NUnit2018", AN_OBJECT, None, is(&["Not", "Null"], false)),
    entry("IsNotNull", ClassicKind::Nullity, "NUnit2019", AN_OBJECT, None, is(&["Not", "Null"], false)),
    entry("Greater", ClassicKind::Comparison, "NUnit2027", ARG1, Some("arg2"), is(&["GreaterThan"], true)),
    entry("GreaterOrEqual", ClassicKind::Comparison, "NUnit2028", ARG1, Some("arg2"), is(&["GreaterThanOrEqualTo"], true)),
    entry("Less", ClassicKind::Comparison, "NUnit2029", ARG1, Some("arg2"), is(&["LessThan"], true)),
    entry("LessOrEqual", ClassicKind::Comparison, "NUnit2030", ARG1, Some("arg2"), is(&["LessThanOrEqualTo"], true)),
    entry("AreNotSame", ClassicKind::Identity, "NUnit2031", ACTUAL, EXPECTED, is(&["Not", "SameAs"], true)),
    entry("Zero", ClassicKind::Numeric, "NUnit2032", ACTUAL, None, is(&["Zero"], false)),
    entry("NotZero", ClassicKind::Numeric, "NUnit2033", ACTUAL, None, is(&["Not", "Zero"], false)),
    entry("IsNaN", ClassicKind::Numeric, "NUnit2034", &["aDouble"], None, is(&["NaN"], false)),
    entry("IsEmpty", ClassicKind::Emptiness, "NUnit2035", COLLECTION, None, is(&["Empty"], false)),
    entry("IsNotEmpty", ClassicKind::Emptiness, "NUnit2036", COLLECTION, None, is(&["Not", "Empty"], false)),
    entry(
        "Contains",
        ClassicKind::Containment,
        "NUnit2037",
        ACTUAL,
        EXPECTED,
        ConstraintTemplate {
            helper: HelperClass::Has,
            chain: &["Member"],
            takes_expected: true,
        },
    ),
    entry("IsInstanceOf", ClassicKind::Type, "NUnit2038", ACTUAL, EXPECTED, is(&["InstanceOf"], true)),
    entry("IsNotInstanceOf", ClassicKind::Type, "NUnit2039", ACTUAL, EXPECTED, is(&["Not", "InstanceOf"], true)),
];

fn index() -> &'static HashMap<&'static str, &'static ClassicAssertion> {
    static INDEX: OnceLock<HashMap<&'static str, &'static ClassicAssertion>> = OnceLock::new();
    INDEX.get_or_init(|| CLASSIC.iter().map(|c| (c.name, c)).collect())
}

pub fn classic(name: &str) -> Option<&'static ClassicAssertion> {
    index().get(name).copied()
}

impl ClassicAssertion {
    /// Root member of the equivalent constraint.
    pub fn root(&self) -> &'static str {
        self.constraint.chain.last().copied().unwrap_or_default()
    }

    pub fn is_negated(&self) -> bool {
        self.constraint.chain.first() == Some(&"Not")
    }
}
