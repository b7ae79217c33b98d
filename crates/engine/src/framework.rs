//! Framework type stubs and synthesis of constraint syntax for code fixes.

use catalog::names::{self, HelperClass};
use catalog::{member, MemberRole};
use ir::builder;
use ir::{Argument, Compilation, Operation, OperationKind, TypeDefinition, TypeSymbol};

/// Registers the framework's entry points, helper classes and constraint
/// hierarchy. Definitions already present in `compilation` win.
pub fn register(compilation: &mut Compilation) {
    let mut defs = Vec::new();
    for entry in names::EntryPoint::ALL {
        defs.push(TypeDefinition::class(entry.metadata_name()));
    }
    for helper in HelperClass::ALL {
        defs.push(TypeDefinition::class(helper.metadata_name()).sealed());
    }
    defs.push(TypeDefinition::interface(names::I_RESOLVE_CONSTRAINT));
    defs.push(
        TypeDefinition::interface(names::I_CONSTRAINT)
            .implements(builder::class(names::I_RESOLVE_CONSTRAINT)),
    );
    defs.push(
        TypeDefinition::class(names::CONSTRAINT)
            .implements(builder::class(names::I_CONSTRAINT))
            .implements(builder::class(names::I_RESOLVE_CONSTRAINT)),
    );
    defs.push(TypeDefinition::class(names::CONSTRAINT_EXPRESSION));
    defs.push(
        TypeDefinition::class(names::RESOLVABLE_CONSTRAINT_EXPRESSION)
            .with_base(builder::class(names::CONSTRAINT_EXPRESSION))
            .implements(builder::class(names::I_RESOLVE_CONSTRAINT)),
    );
    defs.push(
        TypeDefinition::class(names::ITEMS_CONSTRAINT_EXPRESSION)
            .with_base(builder::class(names::CONSTRAINT_EXPRESSION)),
    );
    for simple in names::CONSTRAINT_TYPES {
        defs.push(
            TypeDefinition::class(names::constraint_type(simple))
                .with_base(builder::class(names::CONSTRAINT)),
        );
    }
    for def in defs {
        if compilation.definition(&def.name).is_none() {
            compilation.define(def);
        }
    }
}

/// Whether a value of type `ty` can be passed where the framework expects a
/// constraint.
pub fn is_constraint_type(compilation: &Compilation, ty: &TypeSymbol) -> bool {
    if names::is_constraint_base(&ty.name) || ty.name == names::ITEMS_CONSTRAINT_EXPRESSION {
        return true;
    }
    if let Some(simple) = ty.name.strip_prefix(names::CONSTRAINTS_NAMESPACE) {
        if names::CONSTRAINT_TYPES.contains(&simple) {
            return true;
        }
    }
    names::CONSTRAINT_BASES
        .iter()
        .any(|base| compilation.derives_from(ty, base) || compilation.implements(ty, base))
}

fn expression_type() -> TypeSymbol {
    builder::class(names::CONSTRAINT_EXPRESSION)
}

/// Type produced by accessing member `name` on a chain whose current
/// type is `current`.
fn member_type(name: &str, current: Option<&TypeSymbol>) -> TypeSymbol {
    match member(name).map(|m| (m.role, m.constraint)) {
        Some((MemberRole::Root, Some(simple))) => {
            builder::class(&names::constraint_type(simple))
        }
        Some((MemberRole::Suffix, _)) => current.cloned().unwrap_or_else(expression_type),
        _ => expression_type(),
    }
}

/// One link of a synthesized fluent chain.
#[derive(Debug, Clone)]
pub struct Link {
    pub name: &'static str,
    pub arguments: Vec<Operation>,
    pub type_arguments: Vec<TypeSymbol>,
}

impl Link {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            arguments: Vec::new(),
            type_arguments: Vec::new(),
        }
    }

    pub fn with(mut self, argument: Operation) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn generic(mut self, type_argument: TypeSymbol) -> Self {
        self.type_arguments.push(type_argument);
        self
    }

    fn is_invocation(&self) -> bool {
        !self.arguments.is_empty()
            || !self.type_arguments.is_empty()
            || member(self.name).is_some_and(|m| m.parameter.is_some())
    }
}

fn parameter_for(name: &str) -> &'static str {
    member(name).and_then(|m| m.parameter).unwrap_or("expected")
}

/// Appends `link` to `instance`, or starts a chain on `helper` when there is
/// no instance yet.
pub fn append(instance: Option<Operation>, helper: HelperClass, link: Link) -> Operation {
    let ty = member_type(link.name, instance.as_ref().and_then(|i| i.ty.as_ref()));
    let owner = match &instance {
        Some(_) => names::CONSTRAINT_EXPRESSION,
        None => helper.metadata_name(),
    };
    if link.is_invocation() {
        let parameter = parameter_for(link.name);
        let arguments: Vec<Argument> = link
            .arguments
            .into_iter()
            .enumerate()
            .map(|(idx, value)| {
                if idx == 0 {
                    Argument::named(parameter, value)
                } else {
                    Argument::positional(value)
                }
            })
            .collect();
        let mut op = match instance {
            Some(i) => builder::call(i, owner, link.name, arguments, Some(ty)),
            None => builder::static_call(owner, link.name, arguments, Some(ty)),
        };
        if !link.type_arguments.is_empty() {
            if let OperationKind::Invocation { method, .. } = &mut op.kind {
                method.type_arguments = link.type_arguments;
            }
            op.syntax = ir::syntax::render(&op);
        }
        op
    } else {
        match instance {
            Some(i) => builder::property_of(i, owner, link.name, ty),
            None => builder::static_property(owner, link.name, ty),
        }
    }
}

/// `Helper.A.B(x)...` built from `links` in source order.
pub fn chain(helper: HelperClass, links: Vec<Link>) -> Option<Operation> {
    let mut current: Option<Operation> = None;
    for link in links {
        current = Some(append(current, helper, link));
    }
    current
}

/// `<entry>.<method>(actual, constraint, message...)`, e.g. `Assume.That`.
pub fn that_call(
    entry: &str,
    method: &str,
    actual: Operation,
    constraint: Operation,
    messages: Vec<Argument>,
) -> Operation {
    let mut arguments = vec![
        Argument::named("actual", actual),
        Argument::named("expression", constraint),
    ];
    arguments.extend(messages);
    builder::static_call(entry, method, arguments, None)
}

/// `Assert.That(actual, constraint, message...)`.
pub fn assert_that(actual: Operation, constraint: Operation, messages: Vec<Argument>) -> Operation {
    that_call(names::ASSERT, "That", actual, constraint, messages)
}
