//! Operation trees.
//!
//! An [`Operation`] is one node of the host's resolved semantic tree. Every
//! node carries its static type, folded constant value (if any), the source
//! text it was produced from and its location. Child operations are owned,
//! so a tree can be mutated in place by code fixes.

use serde::{Deserialize, Serialize};

use crate::conversions::ConversionKind;
use crate::symbols::{MemberSymbol, MethodSymbol};
use crate::types::TypeSymbol;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Meta {
    pub file: String,
    pub line: usize,
    pub column: usize,
    /// Byte offsets of the node span, when known.
    #[serde(default)]
    pub start: usize,
    #[serde(default)]
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ConstantValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Char(char),
    Str(String),
}

impl ConstantValue {
    /// C# literal text for the value.
    pub fn literal(&self) -> String {
        match self {
            ConstantValue::Null => "null".to_string(),
            ConstantValue::Bool(b) => b.to_string(),
            ConstantValue::Int(i) => i.to_string(),
            ConstantValue::Double(d) => {
                let s = d.to_string();
                if s.contains('.') || s.contains('e') || !d.is_finite() {
                    s
                } else {
                    format!("{s}.0")
                }
            }
            ConstantValue::Char(c) => format!("'{}'", c.escape_default()),
            ConstantValue::Str(s) => format!("\"{}\"", s.escape_default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    /// `&`, also used by the constraint DSL.
    And,
    /// `|`, also used by the constraint DSL.
    Or,
    ConditionalAnd,
    ConditionalOr,
}

impl BinaryOperator {
    pub fn token(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Remainder => "%",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::And => "&",
            BinaryOperator::Or => "|",
            BinaryOperator::ConditionalAnd => "&&",
            BinaryOperator::ConditionalOr => "||",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOperator {
    Not,
    Minus,
    Plus,
    BitwiseNegation,
}

impl UnaryOperator {
    pub fn token(self) -> &'static str {
        match self {
            UnaryOperator::Not => "!",
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::BitwiseNegation => "~",
        }
    }
}

/// Argument bound to its declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    #[serde(default)]
    pub parameter: Option<String>,
    pub value: Operation,
}

impl Argument {
    pub fn named(parameter: impl Into<String>, value: Operation) -> Self {
        Self {
            parameter: Some(parameter.into()),
            value,
        }
    }

    pub fn positional(value: Operation) -> Self {
        Self {
            parameter: None,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationKind {
    Invocation {
        method: MethodSymbol,
        #[serde(default)]
        instance: Option<Box<Operation>>,
        #[serde(default)]
        arguments: Vec<Argument>,
    },
    PropertyReference {
        property: MemberSymbol,
        #[serde(default)]
        instance: Option<Box<Operation>>,
        /// Indexer arguments.
        #[serde(default)]
        arguments: Vec<Argument>,
    },
    FieldReference {
        field: MemberSymbol,
        #[serde(default)]
        instance: Option<Box<Operation>>,
    },
    LocalReference {
        name: String,
    },
    ParameterReference {
        name: String,
    },
    InstanceReference,
    Literal,
    Conversion {
        operand: Box<Operation>,
        conversion: ConversionKind,
        #[serde(default)]
        operator_method: Option<MethodSymbol>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<Operation>,
        right: Box<Operation>,
        /// User-defined operator, e.g. `Constraint.operator &`.
        #[serde(default)]
        operator_method: Option<MethodSymbol>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Operation>,
    },
    Await {
        operand: Box<Operation>,
    },
    ArrayCreation {
        #[serde(default)]
        elements: Vec<Operation>,
    },
    ObjectCreation {
        #[serde(default)]
        constructor: Option<MethodSymbol>,
        #[serde(default)]
        arguments: Vec<Argument>,
    },
    AnonymousFunction {
        body: Box<Operation>,
    },
    Block {
        #[serde(default)]
        statements: Vec<Operation>,
    },
    ExpressionStatement {
        operation: Box<Operation>,
    },
    /// Code the host could not bind.
    Invalid {
        #[serde(default)]
        children: Vec<Operation>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(flatten)]
    pub kind: OperationKind,
    #[serde(default)]
    pub ty: Option<TypeSymbol>,
    #[serde(default)]
    pub constant: Option<ConstantValue>,
    /// Source text of the node.
    #[serde(default)]
    pub syntax: String,
    #[serde(default)]
    pub meta: Meta,
    /// Compiler-generated node with no syntax of its own (implicit conversions).
    #[serde(default)]
    pub implicit: bool,
}

impl Operation {
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            ty: None,
            constant: None,
            syntax: String::new(),
            meta: Meta::default(),
            implicit: false,
        }
    }

    pub fn with_type(mut self, ty: TypeSymbol) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn with_constant(mut self, value: ConstantValue) -> Self {
        self.constant = Some(value);
        self
    }

    pub fn with_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = syntax.into();
        self
    }

    /// Places the node at `line:column` of the current file.
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.meta.line = line;
        self.meta.column = column;
        self
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        let file = file.into();
        self.for_each_mut(&mut |op| op.meta.file = file.clone());
        self
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Operation> {
        let mut out = Vec::new();
        match &self.kind {
            OperationKind::Invocation {
                instance, arguments, ..
            }
            | OperationKind::PropertyReference {
                instance, arguments, ..
            } => {
                if let Some(i) = instance {
                    out.push(i.as_ref());
                }
                out.extend(arguments.iter().map(|a| &a.value));
            }
            OperationKind::FieldReference { instance, .. } => {
                if let Some(i) = instance {
                    out.push(i.as_ref());
                }
            }
            OperationKind::Conversion { operand, .. }
            | OperationKind::Unary { operand, .. }
            | OperationKind::Await { operand } => out.push(operand.as_ref()),
            OperationKind::Binary { left, right, .. } => {
                out.push(left.as_ref());
                out.push(right.as_ref());
            }
            OperationKind::ArrayCreation { elements } => out.extend(elements.iter()),
            OperationKind::ObjectCreation { arguments, .. } => {
                out.extend(arguments.iter().map(|a| &a.value))
            }
            OperationKind::AnonymousFunction { body } => out.push(body.as_ref()),
            OperationKind::Block { statements } => out.extend(statements.iter()),
            OperationKind::ExpressionStatement { operation } => out.push(operation.as_ref()),
            OperationKind::Invalid { children } => out.extend(children.iter()),
            OperationKind::LocalReference { .. }
            | OperationKind::ParameterReference { .. }
            | OperationKind::InstanceReference
            | OperationKind::Literal => {}
        }
        out
    }

    pub fn children_mut(&mut self) -> Vec<&mut Operation> {
        let mut out = Vec::new();
        match &mut self.kind {
            OperationKind::Invocation {
                instance, arguments, ..
            }
            | OperationKind::PropertyReference {
                instance, arguments, ..
            } => {
                if let Some(i) = instance {
                    out.push(i.as_mut());
                }
                out.extend(arguments.iter_mut().map(|a| &mut a.value));
            }
            OperationKind::FieldReference { instance, .. } => {
                if let Some(i) = instance {
                    out.push(i.as_mut());
                }
            }
            OperationKind::Conversion { operand, .. }
            | OperationKind::Unary { operand, .. }
            | OperationKind::Await { operand } => out.push(operand.as_mut()),
            OperationKind::Binary { left, right, .. } => {
                out.push(left.as_mut());
                out.push(right.as_mut());
            }
            OperationKind::ArrayCreation { elements } => out.extend(elements.iter_mut()),
            OperationKind::ObjectCreation { arguments, .. } => {
                out.extend(arguments.iter_mut().map(|a| &mut a.value))
            }
            OperationKind::AnonymousFunction { body } => out.push(body.as_mut()),
            OperationKind::Block { statements } => out.extend(statements.iter_mut()),
            OperationKind::ExpressionStatement { operation } => out.push(operation.as_mut()),
            OperationKind::Invalid { children } => out.extend(children.iter_mut()),
            OperationKind::LocalReference { .. }
            | OperationKind::ParameterReference { .. }
            | OperationKind::InstanceReference
            | OperationKind::Literal => {}
        }
        out
    }

    /// Pre-order walk including `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Pre-order mutable walk including `self`.
    pub fn for_each_mut(&mut self, f: &mut dyn FnMut(&mut Operation)) {
        f(self);
        for child in self.children_mut() {
            child.for_each_mut(f);
        }
    }

    /// First node in pre-order matching `pred`.
    pub fn find_mut(&mut self, pred: &dyn Fn(&Operation) -> bool) -> Option<&mut Operation> {
        if pred(self) {
            return Some(self);
        }
        for child in self.children_mut() {
            if let Some(found) = child.find_mut(pred) {
                return Some(found);
            }
        }
        None
    }

    /// Skips compiler-inserted conversions.
    pub fn unwrap_implicit_conversions(&self) -> &Operation {
        let mut current = self;
        while let OperationKind::Conversion { operand, .. } = &current.kind {
            if !current.implicit {
                break;
            }
            current = operand;
        }
        current
    }

    /// Skips every conversion, explicit casts included.
    pub fn unwrap_conversions(&self) -> &Operation {
        let mut current = self;
        while let OperationKind::Conversion { operand, .. } = &current.kind {
            current = operand;
        }
        current
    }

    /// Name of the invoked method or referenced member.
    pub fn member_name(&self) -> Option<&str> {
        match &self.kind {
            OperationKind::Invocation { method, .. } => Some(&method.name),
            OperationKind::PropertyReference { property, .. } => Some(&property.name),
            OperationKind::FieldReference { field, .. } => Some(&field.name),
            _ => None,
        }
    }

    /// Declaring type of the invoked method or referenced member.
    pub fn containing_type(&self) -> Option<&str> {
        match &self.kind {
            OperationKind::Invocation { method, .. } => Some(&method.containing_type),
            OperationKind::PropertyReference { property, .. } => Some(&property.containing_type),
            OperationKind::FieldReference { field, .. } => Some(&field.containing_type),
            _ => None,
        }
    }

    pub fn instance(&self) -> Option<&Operation> {
        match &self.kind {
            OperationKind::Invocation { instance, .. }
            | OperationKind::PropertyReference { instance, .. }
            | OperationKind::FieldReference { instance, .. } => instance.as_deref(),
            _ => None,
        }
    }

    pub fn arguments(&self) -> &[Argument] {
        match &self.kind {
            OperationKind::Invocation { arguments, .. }
            | OperationKind::PropertyReference { arguments, .. }
            | OperationKind::ObjectCreation { arguments, .. } => arguments,
            _ => &[],
        }
    }

    /// Value bound to the parameter named `parameter`.
    pub fn argument(&self, parameter: &str) -> Option<&Operation> {
        self.arguments()
            .iter()
            .find(|a| a.parameter.as_deref() == Some(parameter))
            .map(|a| &a.value)
    }

    pub fn is_invocation(&self) -> bool {
        matches!(self.kind, OperationKind::Invocation { .. })
    }

    pub fn is_member_reference(&self) -> bool {
        matches!(
            self.kind,
            OperationKind::PropertyReference { .. } | OperationKind::FieldReference { .. }
        )
    }

    pub fn is_constant(&self) -> bool {
        self.constant.is_some()
    }

    pub fn is_null_literal(&self) -> bool {
        matches!(self.kind, OperationKind::Literal)
            && matches!(self.constant, Some(ConstantValue::Null))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.kind, OperationKind::Invalid { .. })
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Operation>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Operation;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        let children = next.children();
        self.stack.extend(children.into_iter().rev());
        Some(next)
    }
}
