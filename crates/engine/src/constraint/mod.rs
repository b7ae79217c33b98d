//! Decomposition of fluent constraint expressions into parts.
//!
//! `Is.Not.Null & Has.Count.EqualTo(2).Or.Empty` becomes three parts, each
//! holding its prefixes, root and suffixes in source order:
//!
//! ```text
//! [Not | Null]   [Count | EqualTo(2)]   [Empty]
//! ```
//!
//! Binary `&` / `|` and fluent `.And` / `.Or` both split parts; which
//! combinator joined two parts is not recorded.

mod chain;
mod part;

pub use chain::{classify, flatten, ChainElement};
pub use part::{ConstraintExpressionPart, ExpectedArgument};

use catalog::members::ends_chain;
use catalog::HelperClass;
use ir::{BinaryOperator, Operation, OperationKind};

use crate::{CancellationToken, EngineError};

#[derive(Debug, Clone)]
pub struct ConstraintExpression<'a> {
    pub operation: &'a Operation,
    pub parts: Vec<ConstraintExpressionPart<'a>>,
}

impl<'a> ConstraintExpression<'a> {
    pub fn single_part(&self) -> Option<&ConstraintExpressionPart<'a>> {
        match self.parts.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Any part the decomposer could not fully recognise.
    pub fn has_unknown_parts(&self) -> bool {
        self.parts
            .iter()
            .any(|p| p.is_unknown_shape() || p.has_unknown_expressions())
    }
}

/// Operands of a top-level `&` / `|`, left to right.
fn split_operands<'a>(
    op: &'a Operation,
    cancel: &CancellationToken,
) -> Result<Vec<&'a Operation>, EngineError> {
    let mut stack = vec![op];
    let mut leaves = Vec::new();
    while let Some(node) = stack.pop() {
        cancel.check()?;
        let node = node.unwrap_implicit_conversions();
        match &node.kind {
            OperationKind::Binary {
                operator: BinaryOperator::And | BinaryOperator::Or,
                left,
                right,
                ..
            } => {
                stack.push(right);
                stack.push(left);
            }
            _ => leaves.push(node),
        }
    }
    Ok(leaves)
}

fn helper_of(op: &Operation) -> Option<HelperClass> {
    if op.instance().is_some() {
        return None;
    }
    op.containing_type().and_then(HelperClass::from_metadata_name)
}

fn finish(mut part: ConstraintExpressionPart<'_>) -> ConstraintExpressionPart<'_> {
    // `Has.Property("Name")` on its own is a complete constraint.
    if part.root.is_none() {
        if let Some(last) = part.prefixes.last() {
            if last.member_name().is_some_and(ends_chain) {
                part.root = part.prefixes.pop();
            }
        }
    }
    part
}

/// Parts of one fluent chain (no binary operators involved).
fn decompose_chain<'a>(
    op: &'a Operation,
    cancel: &CancellationToken,
    parts: &mut Vec<ConstraintExpressionPart<'a>>,
) -> Result<(), EngineError> {
    let links = flatten(op);
    let helper_class = links.first().and_then(|l| helper_of(l));
    let fresh = || ConstraintExpressionPart {
        helper_class,
        ..Default::default()
    };
    let mut current = fresh();
    for link in links {
        cancel.check()?;
        match classify(link) {
            ChainElement::Prefix(p) if current.root.is_none() => current.prefixes.push(p),
            ChainElement::Root(r) if current.root.is_none() => current.root = Some(r),
            ChainElement::Suffix(s) if current.root.is_some() => current.suffixes.push(s),
            ChainElement::Combinator(..) => {
                parts.push(finish(std::mem::replace(&mut current, fresh())));
            }
            other => current.unknown.push(other.operation()),
        }
    }
    parts.push(finish(current));
    Ok(())
}

/// Decomposes a constraint expression into its parts.
///
/// Never fails on unrecognised shapes: unknown links are collected on the
/// part and a part without a root reports [`ConstraintExpressionPart::is_unknown_shape`].
pub fn decompose<'a>(
    op: &'a Operation,
    cancel: &CancellationToken,
) -> Result<ConstraintExpression<'a>, EngineError> {
    let mut parts = Vec::new();
    for leaf in split_operands(op, cancel)? {
        decompose_chain(leaf, cancel, &mut parts)?;
    }
    Ok(ConstraintExpression {
        operation: op,
        parts,
    })
}
