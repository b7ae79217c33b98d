use catalog::members::is_comparer_suffix;
use catalog::{member, HelperClass};
use ir::{Operation, OperationKind, TypeSymbol};

/// The expected value handed to a root such as `EqualTo(x)`.
#[derive(Debug, Clone, Copy)]
pub struct ExpectedArgument<'a> {
    /// Argument as bound, including any implicit conversion.
    pub argument: &'a Operation,
    /// Argument with implicit conversions removed.
    pub operand: &'a Operation,
}

impl<'a> ExpectedArgument<'a> {
    /// Type of the operand as written by the user.
    pub fn operand_type(&self) -> Option<&'a TypeSymbol> {
        self.operand.ty.as_ref()
    }

    /// Type the argument was converted to in order to bind.
    pub fn converted_type(&self) -> Option<&'a TypeSymbol> {
        self.argument.ty.as_ref()
    }

    /// The argument binds through an implicit user-defined operator.
    pub fn is_user_conversion(&self) -> bool {
        let mut current = self.argument;
        while let OperationKind::Conversion {
            operand,
            conversion,
            ..
        } = &current.kind
        {
            if !current.implicit {
                return false;
            }
            if conversion.is_user_defined() {
                return true;
            }
            current = operand;
        }
        false
    }
}

/// One `prefix* root suffix*` segment of a constraint expression.
#[derive(Debug, Clone, Default)]
pub struct ConstraintExpressionPart<'a> {
    pub helper_class: Option<HelperClass>,
    pub prefixes: Vec<&'a Operation>,
    pub root: Option<&'a Operation>,
    pub suffixes: Vec<&'a Operation>,
    pub unknown: Vec<&'a Operation>,
}

fn name_of(op: &Operation) -> &str {
    op.member_name().unwrap_or_default()
}

impl<'a> ConstraintExpressionPart<'a> {
    pub fn prefix_names(&self) -> Vec<&'a str> {
        self.prefixes.iter().map(|p| name_of(*p)).collect()
    }

    pub fn root_name(&self) -> Option<&'a str> {
        self.root.map(name_of)
    }

    pub fn suffix_names(&self) -> Vec<&'a str> {
        self.suffixes.iter().map(|s| name_of(*s)).collect()
    }

    pub fn has_prefix(&self, name: &str) -> bool {
        self.prefixes.iter().any(|p| name_of(p) == name)
    }

    pub fn has_suffix(&self, name: &str) -> bool {
        self.suffixes.iter().any(|s| name_of(s) == name)
    }

    pub fn has_custom_comparer(&self) -> bool {
        self.suffixes.iter().any(|s| is_comparer_suffix(name_of(s)))
    }

    pub fn has_unknown_expressions(&self) -> bool {
        !self.unknown.is_empty()
    }

    /// No root was recognised; rules must abstain.
    pub fn is_unknown_shape(&self) -> bool {
        self.root.is_none()
    }

    /// Prefixes are absent or a single negation.
    pub fn is_plain(&self) -> bool {
        self.prefixes
            .iter()
            .all(|p| matches!(name_of(p), "Not" | "No"))
    }

    pub fn is_negated(&self) -> bool {
        self.prefixes
            .iter()
            .filter(|p| matches!(name_of(p), "Not" | "No"))
            .count()
            % 2
            == 1
    }

    /// Simple name of the constraint class the root produces.
    pub fn root_constraint(&self) -> Option<&'static str> {
        self.root_name().and_then(member).and_then(|m| m.constraint)
    }

    /// Value bound to the root's expected parameter; falls back to the
    /// first argument when the host recorded no names.
    pub fn expected_argument(&self) -> Option<ExpectedArgument<'a>> {
        let root = self.root?;
        let arguments = root.arguments();
        let parameter = self
            .root_name()
            .and_then(member)
            .and_then(|m| m.parameter)?;
        let argument = arguments
            .iter()
            .find(|a| a.parameter.as_deref() == Some(parameter))
            .or_else(|| arguments.iter().find(|a| a.parameter.is_none()))
            .or_else(|| arguments.first())?;
        Some(ExpectedArgument {
            argument: &argument.value,
            operand: argument.value.unwrap_implicit_conversions(),
        })
    }

    /// First argument of suffix `name`, implicit conversions removed.
    pub fn suffix_argument(&self, name: &str) -> Option<&'a Operation> {
        self.suffixes
            .iter()
            .copied()
            .find(|s| name_of(s) == name)
            .and_then(|s| s.arguments().first())
            .map(|a| a.value.unwrap_implicit_conversions())
    }

    /// Type of the last recognised link of the part.
    pub fn result_type(&self) -> Option<&'a TypeSymbol> {
        self.suffixes
            .last()
            .copied()
            .or(self.root)
            .or_else(|| self.prefixes.last().copied())
            .and_then(|op| op.ty.as_ref())
    }

    /// Recognised links in source order.
    pub fn operations(&self) -> Vec<&'a Operation> {
        let mut out = self.prefixes.clone();
        out.extend(self.root);
        out.extend(self.suffixes.iter().copied());
        out
    }
}
