//! Rule analyzers over located assertions.
//!
//! Rules are stateless and shared between analysis threads. Each one looks
//! at an [`AssertionSite`] and pushes zero or more [`Report`]s; none of them
//! reports when the shape of the assertion is not fully recognised.

use std::collections::HashSet;
use std::sync::OnceLock;

use catalog::members::is_collection_prefix;
use catalog::HelperClass;
use ir::types::OBJECT;
use ir::{Compilation, ConstantValue, Enumerable, Operation, OperationKind, TypeSymbol};
use loader::Severity;

use crate::constraint::{ConstraintExpression, ConstraintExpressionPart, ExpectedArgument};
use crate::diagnostic::{Descriptor, Report};
use crate::error::contract_violation;
use crate::locator::AssertionInvocation;
use crate::EngineError;

mod actual_type;
mod classic;
mod collection;
mod comparison;
mod condition;
mod constant;
mod equal_to;
mod misused;
mod modifiers;
mod same_as;
mod some_items;

pub(crate) use collection::collection_size;
pub(crate) use condition::{comparison_operands, equality_operands, method_condition, tested_condition};
pub(crate) use constant::equality_expected;
pub(crate) use misused::not_null_or_empty;

pub struct RuleContext<'c> {
    pub compilation: &'c Compilation,
}

/// A located assertion and, for the constraint form, its decomposition.
pub struct AssertionSite<'a> {
    pub invocation: AssertionInvocation<'a>,
    pub expression: Option<ConstraintExpression<'a>>,
}

impl<'a> AssertionSite<'a> {
    pub fn parts(&self) -> &[ConstraintExpressionPart<'a>] {
        self.expression
            .as_ref()
            .map(|e| e.parts.as_slice())
            .unwrap_or_default()
    }
}

pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;
    fn descriptors(&self) -> &'static [Descriptor];
    fn analyze<'a>(&self, cx: &RuleContext<'_>, site: &AssertionSite<'a>, out: &mut Vec<Report<'a>>);
}

pub(crate) const fn descriptor(
    id: &'static str,
    title: &'static str,
    message: &'static str,
    category: &'static str,
    default_severity: Severity,
    description: &'static str,
) -> Descriptor {
    Descriptor {
        id,
        title,
        message,
        category,
        default_severity,
        description,
    }
}

fn build() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(classic::ClassicModel),
        Box::new(constant::ConstActualValue),
        Box::new(constant::SameActualExpectedValue),
        Box::new(condition::EqualityOperatorUsage),
        Box::new(condition::StringMethodUsage),
        Box::new(same_as::SameAsUsage),
        Box::new(equal_to::EqualToIncompatibleTypes),
        Box::new(actual_type::ActualTypeMismatch),
        Box::new(some_items::SomeItemsIncompatibleTypes),
        Box::new(comparison::ComparisonIncompatibleTypes),
        Box::new(collection::UseCollectionConstraint),
        Box::new(modifiers::ModifierUsage),
        Box::new(misused::MisusedConstraints),
    ]
}

pub fn registry() -> &'static [Box<dyn Rule>] {
    static RULES: OnceLock<Vec<Box<dyn Rule>>> = OnceLock::new();
    RULES.get_or_init(build)
}

/// Every descriptor, sorted by id.
pub fn descriptors() -> Vec<&'static Descriptor> {
    let mut all: Vec<&'static Descriptor> = registry()
        .iter()
        .flat_map(|r| r.descriptors().iter())
        .collect();
    all.sort_by_key(|d| d.id);
    all
}

pub fn descriptor_by_id(id: &str) -> Option<&'static Descriptor> {
    registry()
        .iter()
        .flat_map(|r| r.descriptors().iter())
        .find(|d| d.id == id)
}

/// Checks that no two rules claim the same diagnostic id.
pub fn validate_registry() -> Result<(), EngineError> {
    let mut seen = HashSet::new();
    for d in descriptors() {
        if !seen.insert(d.id) {
            return Err(contract_violation("duplicate diagnostic id"));
        }
    }
    Ok(())
}

/// Type of the value under test; lambdas contribute their body's type.
pub(crate) fn actual_type<'a>(actual: &'a Operation) -> Option<&'a TypeSymbol> {
    let actual = actual.unwrap_implicit_conversions();
    match &actual.kind {
        OperationKind::AnonymousFunction { body } => match &body.kind {
            OperationKind::Block { .. } => None,
            _ => body.unwrap_implicit_conversions().ty.as_ref(),
        },
        _ => actual.ty.as_ref(),
    }
}

fn constant_string(op: &Operation) -> Option<&str> {
    match &op.unwrap_conversions().constant {
        Some(ConstantValue::Str(s)) => Some(s),
        _ => None,
    }
}

/// Type the root of `part` is applied to, after walking the prefixes.
///
/// `None` means the type cannot be determined and rules should abstain.
pub(crate) fn effective_actual_type(
    compilation: &Compilation,
    part: &ConstraintExpressionPart<'_>,
    actual: &TypeSymbol,
) -> Option<TypeSymbol> {
    let mut current = actual.clone();
    for prefix in &part.prefixes {
        let name = prefix.member_name()?;
        if current.is_unresolved() {
            return None;
        }
        current = match name {
            "Not" | "No" => current,
            n if is_collection_prefix(n) => match compilation.enumerable_element_type(&current) {
                Enumerable::Typed(element) => element,
                _ => return None,
            },
            "Count" | "Length" => TypeSymbol::int32(),
            "Message" => TypeSymbol::string(),
            "InnerException" => TypeSymbol::named("System.Exception", ir::TypeKind::Class),
            "Property" => {
                let property = prefix.arguments().first().and_then(|a| constant_string(&a.value))?;
                compilation.find_member(&current, property)?.ty.clone()?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// `Throws.X.With.Message...` applies the chain to the thrown exception,
/// not to the actual value.
pub(crate) fn tests_thrown_exception(site: &AssertionSite<'_>) -> bool {
    site.parts()
        .iter()
        .any(|p| p.helper_class == Some(HelperClass::Throws))
}

/// The type is too loose for any definite verdict.
pub(crate) fn is_open(ty: &TypeSymbol) -> bool {
    ty.is_unresolved() || ty.name == OBJECT
}

/// Actual type and expected operand of one root the type rules check.
pub(crate) struct TypedPair<'a, 's> {
    pub actual: TypeSymbol,
    pub expected: &'a Operation,
    /// Expected argument as bound, conversions included.
    pub bound: &'a Operation,
    /// Decomposed part for the constraint form; `None` for classic calls.
    pub part: Option<&'s ConstraintExpressionPart<'a>>,
}

impl TypedPair<'_, '_> {
    pub fn expected_type(&self) -> Option<&TypeSymbol> {
        self.expected.ty.as_ref()
    }

    /// Both types are registered and the expected value does not bind
    /// through a user-defined operator. Anything else is treated as
    /// compatible.
    pub fn is_decidable(&self, compilation: &Compilation) -> bool {
        let Some(expected) = self.expected_type() else {
            return false;
        };
        let argument = ExpectedArgument {
            argument: self.bound,
            operand: self.expected,
        };
        is_registered(compilation, &self.actual)
            && is_registered(compilation, expected)
            && !argument.is_user_conversion()
    }
}

/// The type and every type it is built from have a definition.
fn is_registered(compilation: &Compilation, ty: &TypeSymbol) -> bool {
    if ty.is_unresolved() {
        return true;
    }
    if let Some(element) = &ty.element_type {
        return is_registered(compilation, element);
    }
    compilation.is_known(ty)
        && ty
            .type_arguments
            .iter()
            .all(|arg| is_registered(compilation, arg))
}

/// Every recognised root accepted by `roots`, paired with the type it is
/// applied to. Classic calls contribute the root of their equivalent
/// constraint.
pub(crate) fn typed_pairs<'a, 's>(
    cx: &RuleContext<'_>,
    site: &'s AssertionSite<'a>,
    roots: fn(&str) -> bool,
) -> Vec<TypedPair<'a, 's>> {
    let invocation = &site.invocation;
    let Some(actual) = actual_type(invocation.actual) else {
        return Vec::new();
    };
    if let Some(classic) = invocation.classic() {
        return match (invocation.expected, invocation.expected_operand()) {
            (Some(bound), Some(expected)) if roots(classic.root()) => vec![TypedPair {
                actual: actual.clone(),
                expected,
                bound,
                part: None,
            }],
            _ => Vec::new(),
        };
    }
    if tests_thrown_exception(site) {
        return Vec::new();
    }
    site.parts()
        .iter()
        .filter(|p| !p.is_unknown_shape() && !p.has_unknown_expressions())
        .filter(|p| p.root_name().is_some_and(roots))
        .filter_map(|part| {
            let expected = part.expected_argument()?;
            let actual = effective_actual_type(cx.compilation, part, actual)?;
            Some(TypedPair {
                actual,
                expected: expected.operand,
                bound: expected.argument,
                part: Some(part),
            })
        })
        .collect()
}
