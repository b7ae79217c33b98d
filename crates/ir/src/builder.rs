//! Terse constructors for operation trees.
//!
//! Every builder fills `syntax` with regenerated source text so that trees
//! built here read the same as trees loaded from documents.

use crate::conversions::ConversionKind;
use crate::operation::{Argument, BinaryOperator, ConstantValue, Operation, OperationKind, UnaryOperator};
use crate::symbols::{MemberSymbol, MethodSymbol, ParameterSymbol};
use crate::syntax::render;
use crate::types::{TypeKind, TypeSymbol};

fn finish(op: Operation) -> Operation {
    let syntax = render(&op);
    op.with_syntax(syntax)
}

fn parameters_of(arguments: &[Argument]) -> Vec<ParameterSymbol> {
    arguments
        .iter()
        .filter_map(|a| {
            a.parameter.as_ref().map(|name| ParameterSymbol {
                name: name.clone(),
                ty: a.value.ty.clone(),
                is_params: false,
            })
        })
        .collect()
}

pub fn local(name: &str, ty: TypeSymbol) -> Operation {
    finish(
        Operation::new(OperationKind::LocalReference {
            name: name.to_string(),
        })
        .with_type(ty),
    )
}

pub fn parameter(name: &str, ty: TypeSymbol) -> Operation {
    finish(
        Operation::new(OperationKind::ParameterReference {
            name: name.to_string(),
        })
        .with_type(ty),
    )
}

pub fn literal(value: ConstantValue, ty: TypeSymbol) -> Operation {
    finish(
        Operation::new(OperationKind::Literal)
            .with_type(ty)
            .with_constant(value),
    )
}

pub fn literal_int(value: i64) -> Operation {
    literal(ConstantValue::Int(value), TypeSymbol::int32())
}

pub fn literal_double(value: f64) -> Operation {
    literal(ConstantValue::Double(value), TypeSymbol::double())
}

pub fn literal_str(value: &str) -> Operation {
    literal(ConstantValue::Str(value.to_string()), TypeSymbol::string())
}

pub fn literal_bool(value: bool) -> Operation {
    literal(ConstantValue::Bool(value), TypeSymbol::boolean())
}

pub fn literal_char(value: char) -> Operation {
    literal(ConstantValue::Char(value), TypeSymbol::char())
}

pub fn null_literal() -> Operation {
    finish(Operation::new(OperationKind::Literal).with_constant(ConstantValue::Null))
}

pub fn constant_field(
    containing_type: &str,
    name: &str,
    ty: TypeSymbol,
    value: ConstantValue,
) -> Operation {
    let mut field = MemberSymbol::new(containing_type, name, true).of_type(ty.clone());
    field.is_const = true;
    finish(
        Operation::new(OperationKind::FieldReference {
            field,
            instance: None,
        })
        .with_type(ty)
        .with_constant(value),
    )
}

pub fn static_property(containing_type: &str, name: &str, ty: TypeSymbol) -> Operation {
    finish(
        Operation::new(OperationKind::PropertyReference {
            property: MemberSymbol::new(containing_type, name, true).of_type(ty.clone()),
            instance: None,
            arguments: Vec::new(),
        })
        .with_type(ty),
    )
}

/// Instance property declared on the receiver's type.
pub fn property(instance: Operation, name: &str, ty: TypeSymbol) -> Operation {
    let containing = instance
        .ty
        .as_ref()
        .map(|t| t.name.clone())
        .unwrap_or_default();
    property_of(instance, &containing, name, ty)
}

pub fn property_of(instance: Operation, containing_type: &str, name: &str, ty: TypeSymbol) -> Operation {
    finish(
        Operation::new(OperationKind::PropertyReference {
            property: MemberSymbol::new(containing_type, name, false).of_type(ty.clone()),
            instance: Some(Box::new(instance)),
            arguments: Vec::new(),
        })
        .with_type(ty),
    )
}

pub fn static_call(
    containing_type: &str,
    name: &str,
    arguments: Vec<Argument>,
    return_type: Option<TypeSymbol>,
) -> Operation {
    let mut method = MethodSymbol::new(containing_type, name, true);
    method.parameters = parameters_of(&arguments);
    method.return_type = return_type.clone();
    let mut op = Operation::new(OperationKind::Invocation {
        method,
        instance: None,
        arguments,
    });
    op.ty = return_type;
    finish(op)
}

/// Instance call whose method is declared on `containing_type`.
pub fn call(
    instance: Operation,
    containing_type: &str,
    name: &str,
    arguments: Vec<Argument>,
    return_type: Option<TypeSymbol>,
) -> Operation {
    let mut method = MethodSymbol::new(containing_type, name, false);
    method.parameters = parameters_of(&arguments);
    method.return_type = return_type.clone();
    let mut op = Operation::new(OperationKind::Invocation {
        method,
        instance: Some(Box::new(instance)),
        arguments,
    });
    op.ty = return_type;
    finish(op)
}

pub fn binary(operator: BinaryOperator, left: Operation, right: Operation, ty: TypeSymbol) -> Operation {
    finish(
        Operation::new(OperationKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            operator_method: None,
        })
        .with_type(ty),
    )
}

/// Binary operator bound to a user-defined `operator` method.
pub fn user_binary(
    operator: BinaryOperator,
    left: Operation,
    right: Operation,
    declaring_type: &str,
    ty: TypeSymbol,
) -> Operation {
    let method_name = match operator {
        BinaryOperator::And => "op_BitwiseAnd",
        BinaryOperator::Or => "op_BitwiseOr",
        BinaryOperator::Equals => "op_Equality",
        BinaryOperator::NotEquals => "op_Inequality",
        _ => "op_Binary",
    };
    let method = MethodSymbol::new(declaring_type, method_name, true).returning(ty.clone());
    finish(
        Operation::new(OperationKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            operator_method: Some(method),
        })
        .with_type(ty),
    )
}

pub fn convert(operand: Operation, to: TypeSymbol, conversion: ConversionKind, implicit: bool) -> Operation {
    let mut op = Operation::new(OperationKind::Conversion {
        operand: Box::new(operand),
        conversion,
        operator_method: None,
    })
    .with_type(to);
    op.implicit = implicit;
    finish(op)
}

pub fn not(operand: Operation) -> Operation {
    finish(
        Operation::new(OperationKind::Unary {
            operator: UnaryOperator::Not,
            operand: Box::new(operand),
        })
        .with_type(TypeSymbol::boolean()),
    )
}

pub fn new_array(element_type: TypeSymbol, elements: Vec<Operation>) -> Operation {
    finish(Operation::new(OperationKind::ArrayCreation { elements }).with_type(TypeSymbol::array(element_type)))
}

pub fn new_object(ty: TypeSymbol, arguments: Vec<Argument>) -> Operation {
    let mut constructor = MethodSymbol::new(ty.name.clone(), ".ctor", false);
    constructor.parameters = parameters_of(&arguments);
    finish(
        Operation::new(OperationKind::ObjectCreation {
            constructor: Some(constructor),
            arguments,
        })
        .with_type(ty),
    )
}

pub fn invalid(syntax: &str) -> Operation {
    Operation::new(OperationKind::Invalid { children: Vec::new() })
        .with_type(TypeSymbol::error())
        .with_syntax(syntax)
}

pub fn statement(operation: Operation) -> Operation {
    finish(Operation::new(OperationKind::ExpressionStatement {
        operation: Box::new(operation),
    }))
}

pub fn class(name: &str) -> TypeSymbol {
    TypeSymbol::named(name, TypeKind::Class)
}

pub fn structure(name: &str) -> TypeSymbol {
    TypeSymbol::named(name, TypeKind::Struct)
}
