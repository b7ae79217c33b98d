//! Syntax-level helpers over operations: structural equivalence and
//! regeneration of source text for synthesized nodes.

use crate::operation::{Argument, Operation, OperationKind};

/// Whether `a` and `b` denote the same expression.
///
/// Locations, source trivia and compiler-inserted conversions are ignored.
/// Unbound code is never equivalent to anything.
pub fn are_equivalent(a: &Operation, b: &Operation) -> bool {
    let a = a.unwrap_implicit_conversions();
    let b = b.unwrap_implicit_conversions();
    use OperationKind::*;
    match (&a.kind, &b.kind) {
        (
            Invocation {
                method: ma,
                instance: ia,
                arguments: aa,
            },
            Invocation {
                method: mb,
                instance: ib,
                arguments: ab,
            },
        ) => {
            ma.name == mb.name
                && ma.containing_type == mb.containing_type
                && ma.type_arguments == mb.type_arguments
                && optional_equivalent(ia.as_deref(), ib.as_deref())
                && arguments_equivalent(aa, ab)
        }
        (
            PropertyReference {
                property: pa,
                instance: ia,
                arguments: aa,
            },
            PropertyReference {
                property: pb,
                instance: ib,
                arguments: ab,
            },
        ) => {
            pa.name == pb.name
                && pa.containing_type == pb.containing_type
                && optional_equivalent(ia.as_deref(), ib.as_deref())
                && arguments_equivalent(aa, ab)
        }
        (
            FieldReference {
                field: fa,
                instance: ia,
            },
            FieldReference {
                field: fb,
                instance: ib,
            },
        ) => {
            fa.name == fb.name
                && fa.containing_type == fb.containing_type
                && optional_equivalent(ia.as_deref(), ib.as_deref())
        }
        (LocalReference { name: x }, LocalReference { name: y })
        | (ParameterReference { name: x }, ParameterReference { name: y }) => x == y,
        (InstanceReference, InstanceReference) => true,
        (Literal, Literal) => a.constant == b.constant,
        (
            Conversion {
                operand: oa,
                conversion: ca,
                ..
            },
            Conversion {
                operand: ob,
                conversion: cb,
                ..
            },
        ) => ca == cb && a.ty == b.ty && are_equivalent(oa, ob),
        (
            Binary {
                operator: oa,
                left: la,
                right: ra,
                ..
            },
            Binary {
                operator: ob,
                left: lb,
                right: rb,
                ..
            },
        ) => oa == ob && are_equivalent(la, lb) && are_equivalent(ra, rb),
        (
            Unary {
                operator: oa,
                operand: xa,
            },
            Unary {
                operator: ob,
                operand: xb,
            },
        ) => oa == ob && are_equivalent(xa, xb),
        (Await { operand: xa }, Await { operand: xb }) => are_equivalent(xa, xb),
        (ArrayCreation { elements: ea }, ArrayCreation { elements: eb }) => {
            a.ty == b.ty && all_equivalent(ea, eb)
        }
        (
            ObjectCreation {
                constructor: ca,
                arguments: aa,
            },
            ObjectCreation {
                constructor: cb,
                arguments: ab,
            },
        ) => {
            a.ty == b.ty
                && ca.as_ref().map(|c| &c.containing_type)
                    == cb.as_ref().map(|c| &c.containing_type)
                && arguments_equivalent(aa, ab)
        }
        (AnonymousFunction { body: ba }, AnonymousFunction { body: bb }) => are_equivalent(ba, bb),
        (Block { statements: sa }, Block { statements: sb }) => all_equivalent(sa, sb),
        (ExpressionStatement { operation: xa }, ExpressionStatement { operation: xb }) => {
            are_equivalent(xa, xb)
        }
        _ => false,
    }
}

fn optional_equivalent(a: Option<&Operation>, b: Option<&Operation>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => are_equivalent(a, b),
        _ => false,
    }
}

fn all_equivalent(a: &[Operation], b: &[Operation]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| are_equivalent(x, y))
}

fn arguments_equivalent(a: &[Argument], b: &[Argument]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| x.parameter == y.parameter && are_equivalent(&x.value, &y.value))
}

/// Simple name of a metadata type name: `NUnit.Framework.Is` → `Is`.
pub fn simple_type_name(metadata_name: &str) -> &str {
    let last = metadata_name.rsplit('.').next().unwrap_or(metadata_name);
    last.split('`').next().unwrap_or(last)
}

/// Source text of `op`, regenerated when the node has none.
pub fn text(op: &Operation) -> String {
    if op.syntax.is_empty() {
        render(op)
    } else {
        op.syntax.clone()
    }
}

fn operand_text(op: &Operation) -> String {
    let inner = text(op);
    match op.unwrap_implicit_conversions().kind {
        OperationKind::Binary { .. } | OperationKind::Conversion { .. } => format!("({inner})"),
        _ => inner,
    }
}

fn arguments_text(arguments: &[Argument]) -> String {
    arguments
        .iter()
        .map(|a| text(&a.value))
        .collect::<Vec<_>>()
        .join(", ")
}

fn receiver(instance: Option<&Operation>, containing_type: &str) -> String {
    match instance {
        Some(i) => operand_text(i),
        None => simple_type_name(containing_type).to_string(),
    }
}

/// Regenerates C#-like text for `op` from its children's text.
pub fn render(op: &Operation) -> String {
    use OperationKind::*;
    match &op.kind {
        Invocation {
            method,
            instance,
            arguments,
        } => {
            let generics = if method.type_arguments.is_empty() {
                String::new()
            } else {
                let args: Vec<String> = method.type_arguments.iter().map(|t| t.display()).collect();
                format!("<{}>", args.join(", "))
            };
            format!(
                "{}.{}{}({})",
                receiver(instance.as_deref(), &method.containing_type),
                method.name,
                generics,
                arguments_text(arguments)
            )
        }
        PropertyReference {
            property,
            instance,
            arguments,
        } => {
            let target = receiver(instance.as_deref(), &property.containing_type);
            if arguments.is_empty() {
                format!("{}.{}", target, property.name)
            } else {
                format!("{}[{}]", target, arguments_text(arguments))
            }
        }
        FieldReference { field, instance } => format!(
            "{}.{}",
            receiver(instance.as_deref(), &field.containing_type),
            field.name
        ),
        LocalReference { name } | ParameterReference { name } => name.clone(),
        InstanceReference => "this".to_string(),
        Literal => op
            .constant
            .as_ref()
            .map(|c| c.literal())
            .unwrap_or_default(),
        Conversion { operand, .. } => {
            if op.implicit {
                text(operand)
            } else {
                let ty = op.ty.as_ref().map(|t| t.display()).unwrap_or_default();
                format!("({}){}", ty, operand_text(operand))
            }
        }
        Binary {
            operator,
            left,
            right,
            ..
        } => format!(
            "{} {} {}",
            text(left),
            operator.token(),
            text(right)
        ),
        Unary { operator, operand } => format!("{}{}", operator.token(), operand_text(operand)),
        Await { operand } => format!("await {}", text(operand)),
        ArrayCreation { elements } => {
            let items: Vec<String> = elements.iter().map(text).collect();
            format!("new[] {{ {} }}", items.join(", "))
        }
        ObjectCreation { arguments, .. } => {
            let ty = op.ty.as_ref().map(|t| t.display()).unwrap_or_default();
            format!("new {}({})", ty, arguments_text(arguments))
        }
        AnonymousFunction { body } => format!("() => {}", text(body)),
        Block { statements } => {
            let items: Vec<String> = statements.iter().map(text).collect();
            format!("{{ {} }}", items.join(" "))
        }
        ExpressionStatement { operation } => format!("{};", text(operation)),
        Invalid { children } => children.iter().map(text).collect::<Vec<_>>().join(" "),
    }
}
