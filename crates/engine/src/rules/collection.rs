use catalog::members::is_comparison_root;
use ir::{Enumerable, Operation, OperationKind};
use loader::Severity;

use super::{descriptor, AssertionSite, Rule, RuleContext};
use crate::diagnostic::{Descriptor, FixFacts, Report};
use crate::locator::AssertionForm;

static COLLECTION: [Descriptor; 1] = [descriptor(
    "NUnit2046",
    "Use CollectionConstraint for better assertion messages in case of failure",
    "Consider using the constraint model, Assert.That(collection, {0}), instead of comparing its '{1}' property",
    "Assertion",
    Severity::Info,
    "Has.Count and Has.Length report the collection contents on failure, not only the two numbers.",
)];

/// `collection.Count` or `collection.Length` read directly in the actual
/// argument; returns the collection and the member name.
pub(crate) fn collection_size<'a>(
    cx: &RuleContext<'_>,
    actual: &'a Operation,
) -> Option<(&'a Operation, &'static str)> {
    let OperationKind::PropertyReference {
        property,
        instance: Some(instance),
        arguments,
    } = &actual.kind
    else {
        return None;
    };
    if !arguments.is_empty() {
        return None;
    }
    let member = match property.name.as_str() {
        "Count" => "Count",
        "Length" => "Length",
        _ => return None,
    };
    let instance = instance.unwrap_implicit_conversions();
    let ty = instance.ty.as_ref()?;
    match cx.compilation.enumerable_element_type(ty) {
        Enumerable::NotEnumerable => None,
        _ => Some((instance, member)),
    }
}

fn is_size_root(name: &str) -> bool {
    matches!(name, "EqualTo" | "Zero") || is_comparison_root(name)
}

/// `Assert.That(list.Count, Is.EqualTo(2))`.
pub struct UseCollectionConstraint;

impl Rule for UseCollectionConstraint {
    fn name(&self) -> &'static str {
        "use-collection-constraint"
    }

    fn descriptors(&self) -> &'static [Descriptor] {
        &COLLECTION
    }

    fn analyze<'a>(&self, cx: &RuleContext<'_>, site: &AssertionSite<'a>, out: &mut Vec<Report<'a>>) {
        if !matches!(site.invocation.form, AssertionForm::Constraint) {
            return;
        }
        let Some((_, member)) = collection_size(cx, site.invocation.actual_operand()) else {
            return;
        };
        let Some(part) = site.expression.as_ref().and_then(|e| e.single_part()) else {
            return;
        };
        if part.has_unknown_expressions() || !part.is_plain() || !part.suffixes.is_empty() {
            return;
        }
        if !part.helper_class.is_some_and(|h| h.is_is()) {
            return;
        }
        let Some(root) = part.root_name().filter(|r| is_size_root(r)) else {
            return;
        };
        let mut suggestion = format!("Has.{member}");
        for prefix in part.prefix_names() {
            suggestion.push('.');
            suggestion.push_str(prefix);
        }
        suggestion.push('.');
        suggestion.push_str(root);
        if part.expected_argument().is_some() {
            suggestion.push_str("(expected)");
        }
        out.push(
            Report::new(&COLLECTION[0], site.invocation.actual)
                .arg(suggestion)
                .arg(member)
                .fix(FixFacts::UseCollectionConstraint {
                    member: member.to_string(),
                }),
        );
    }
}
