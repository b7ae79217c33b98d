use std::collections::BTreeMap;
use std::path::PathBuf;

use ir::{Meta, Operation};
use loader::Severity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Static description of one diagnostic id.
pub struct Descriptor {
    pub id: &'static str,
    pub title: &'static str,
    /// Message template; `{0}`, `{1}` ... are replaced by report arguments.
    pub message: &'static str,
    pub category: &'static str,
    pub default_severity: Severity,
    pub description: &'static str,
}

impl Descriptor {
    pub fn format(&self, args: &[String]) -> String {
        let mut out = self.message.to_string();
        for (idx, arg) in args.iter().enumerate() {
            out = out.replace(&format!("{{{idx}}}"), arg);
        }
        out
    }

    pub fn help_uri(&self) -> String {
        format!("https://docs.nunit.org/articles/nunit-analyzers/{}.html", self.id)
    }
}

/// Facts a code fix needs, keyed by the kind of rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "fix", rename_all = "snake_case")]
pub enum FixFacts {
    /// Rewrite a classic assertion into `Assert.That`.
    ClassicToConstraint { method: String },
    /// Swap the actual and expected operands.
    SwapActualExpected,
    /// `Assert.That(a == b)` to `Assert.That(a, Is.EqualTo(b))`.
    UseEqualConstraint { negated: bool },
    /// `Assert.That(a > b)` to `Assert.That(a, Is.GreaterThan(b))`.
    UseComparisonConstraint { constraint: String },
    /// `Assert.That(s.StartsWith(x))` to `Assert.That(s, Does.StartWith(x))`.
    UseStringConstraint { constraint: String, negated: bool },
    /// `Assert.That(list.Contains(x))` to `Assert.That(list, Has.Member(x))`.
    UseSomeItemsConstraint { negated: bool },
    /// `Assert.That(list.Count, Is.EqualTo(2))` to `Has.Count.EqualTo(2)`.
    UseCollectionConstraint { member: String },
    /// `Is.Not.Null.Or.Empty` to `Is.Not.Null.And.Not.Empty`.
    SplitNotNullOrEmpty,
}

impl FixFacts {
    /// String property bag exposed to SARIF/JSON consumers.
    pub fn properties(&self) -> BTreeMap<&'static str, String> {
        let mut props = BTreeMap::new();
        let kind = match self {
            FixFacts::ClassicToConstraint { method } => {
                props.insert("method", method.clone());
                "classic_to_constraint"
            }
            FixFacts::SwapActualExpected => "swap_actual_expected",
            FixFacts::UseEqualConstraint { negated } => {
                props.insert("negated", negated.to_string());
                "use_equal_constraint"
            }
            FixFacts::UseComparisonConstraint { constraint } => {
                props.insert("constraint", constraint.clone());
                "use_comparison_constraint"
            }
            FixFacts::UseStringConstraint {
                constraint,
                negated,
            } => {
                props.insert("constraint", constraint.clone());
                props.insert("negated", negated.to_string());
                "use_string_constraint"
            }
            FixFacts::UseSomeItemsConstraint { negated } => {
                props.insert("negated", negated.to_string());
                "use_some_items_constraint"
            }
            FixFacts::UseCollectionConstraint { member } => {
                props.insert("member", member.clone());
                "use_collection_constraint"
            }
            FixFacts::SplitNotNullOrEmpty => "split_not_null_or_empty",
        };
        props.insert("fix", kind.to_string());
        props
    }
}

/// What a rule hands back to the driver.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub descriptor: &'static Descriptor,
    /// Node the diagnostic points at.
    pub node: &'a Operation,
    pub args: Vec<String>,
    pub facts: Option<FixFacts>,
}

impl<'a> Report<'a> {
    pub fn new(descriptor: &'static Descriptor, node: &'a Operation) -> Self {
        Self {
            descriptor,
            node,
            args: Vec::new(),
            facts: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn fix(mut self, facts: FixFacts) -> Self {
        self.facts = Some(facts);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A reported diagnostic, ready for the reporters.
pub struct Diagnostic {
    /// Stable identifier derived from rule, file and location.
    pub id: String,
    /// Rule id, e.g. `NUnit2005`.
    pub rule_id: String,
    pub title: String,
    pub severity: Severity,
    /// Path of the compilation unit.
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    /// Source text of the reported node.
    pub excerpt: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facts: Option<FixFacts>,
    /// Replacement text of the assertion when a fix is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
    /// Location of the assertion invocation a fix rewrites.
    #[serde(default)]
    pub target: Meta,
}
