use catalog::{is_framework_type, member, Combinator, MemberRole};
use ir::{Operation, OperationKind};

/// Classification of one link of a fluent constraint chain.
#[derive(Debug, Clone, Copy)]
pub enum ChainElement<'a> {
    Prefix(&'a Operation),
    Root(&'a Operation),
    Suffix(&'a Operation),
    Combinator(Combinator, &'a Operation),
    Unknown(&'a Operation),
}

impl<'a> ChainElement<'a> {
    pub fn operation(&self) -> &'a Operation {
        match *self {
            ChainElement::Prefix(op)
            | ChainElement::Root(op)
            | ChainElement::Suffix(op)
            | ChainElement::Combinator(_, op)
            | ChainElement::Unknown(op) => op,
        }
    }
}

fn receiver(op: &Operation) -> Option<&Operation> {
    match &op.kind {
        OperationKind::Invocation { instance, .. }
        | OperationKind::PropertyReference { instance, .. } => {
            instance.as_deref().map(Operation::unwrap_implicit_conversions)
        }
        _ => None,
    }
}

/// Links of the chain ending at `op`, innermost first.
pub fn flatten(op: &Operation) -> Vec<&Operation> {
    let mut links = Vec::new();
    let mut current = Some(op.unwrap_implicit_conversions());
    while let Some(link) = current {
        links.push(link);
        current = receiver(link);
    }
    links.reverse();
    links
}

pub fn classify(op: &Operation) -> ChainElement<'_> {
    let (Some(name), Some(owner)) = (op.member_name(), op.containing_type()) else {
        return ChainElement::Unknown(op);
    };
    if !matches!(
        op.kind,
        OperationKind::Invocation { .. } | OperationKind::PropertyReference { .. }
    ) || !is_framework_type(owner)
    {
        return ChainElement::Unknown(op);
    }
    match member(name).map(|m| m.role) {
        Some(MemberRole::Prefix) => ChainElement::Prefix(op),
        Some(MemberRole::Root) => ChainElement::Root(op),
        Some(MemberRole::Suffix) => ChainElement::Suffix(op),
        Some(MemberRole::Combinator(kind)) => ChainElement::Combinator(kind, op),
        None => ChainElement::Unknown(op),
    }
}
