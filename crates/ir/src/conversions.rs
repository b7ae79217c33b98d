//! Classification of conversions between two types, following the C# rules
//! the host compiler applies.

use serde::{Deserialize, Serialize};

use crate::compilation::Compilation;
use crate::types::{SpecialType, TypeKind, TypeSymbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionKind {
    Identity,
    ImplicitNumeric,
    ExplicitNumeric,
    ImplicitNullable,
    ExplicitNullable,
    ImplicitReference,
    ExplicitReference,
    Boxing,
    Unboxing,
    ImplicitUserDefined,
    ExplicitUserDefined,
    None,
}

impl ConversionKind {
    pub fn exists(self) -> bool {
        self != ConversionKind::None
    }

    pub fn is_implicit(self) -> bool {
        matches!(
            self,
            ConversionKind::Identity
                | ConversionKind::ImplicitNumeric
                | ConversionKind::ImplicitNullable
                | ConversionKind::ImplicitReference
                | ConversionKind::Boxing
                | ConversionKind::ImplicitUserDefined
        )
    }

    pub fn is_reference(self) -> bool {
        matches!(
            self,
            ConversionKind::ImplicitReference | ConversionKind::ExplicitReference
        )
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ConversionKind::ImplicitNumeric | ConversionKind::ExplicitNumeric
        )
    }

    pub fn is_user_defined(self) -> bool {
        matches!(
            self,
            ConversionKind::ImplicitUserDefined | ConversionKind::ExplicitUserDefined
        )
    }
}

fn implicit_numeric(from: SpecialType, to: SpecialType) -> bool {
    use SpecialType::*;
    match from {
        SByte => matches!(to, Int16 | Int32 | Int64 | Single | Double | Decimal),
        Byte => matches!(
            to,
            Int16 | UInt16 | Int32 | UInt32 | Int64 | UInt64 | Single | Double | Decimal
        ),
        Int16 => matches!(to, Int32 | Int64 | Single | Double | Decimal),
        UInt16 => matches!(
            to,
            Int32 | UInt32 | Int64 | UInt64 | Single | Double | Decimal
        ),
        Int32 => matches!(to, Int64 | Single | Double | Decimal),
        UInt32 => matches!(to, Int64 | UInt64 | Single | Double | Decimal),
        Int64 | UInt64 => matches!(to, Single | Double | Decimal),
        Char => matches!(
            to,
            UInt16 | Int32 | UInt32 | Int64 | UInt64 | Single | Double | Decimal
        ),
        Single => matches!(to, Double),
        _ => false,
    }
}

fn numeric_or_char(special: SpecialType) -> bool {
    special.is_numeric() || special == SpecialType::Char
}

impl Compilation {
    /// Classifies the conversion from `from` to `to`.
    ///
    /// Unresolved types never convert; callers decide what that means.
    pub fn classify_conversion(&self, from: &TypeSymbol, to: &TypeSymbol) -> ConversionKind {
        if from == to {
            return ConversionKind::Identity;
        }
        if from.kind == TypeKind::Error || to.kind == TypeKind::Error {
            return ConversionKind::None;
        }
        if to.kind == TypeKind::Dynamic {
            return if self.is_value_type(from) {
                ConversionKind::Boxing
            } else {
                ConversionKind::ImplicitReference
            };
        }

        if let (Some(f), Some(t)) = (from.special_type(), to.special_type()) {
            if numeric_or_char(f) && numeric_or_char(t) {
                return if implicit_numeric(f, t) {
                    ConversionKind::ImplicitNumeric
                } else {
                    ConversionKind::ExplicitNumeric
                };
            }
        }

        if let Some(kind) = self.classify_nullable(from, to) {
            return kind;
        }

        if let Some(kind) = self.classify_reference(from, to) {
            return kind;
        }

        self.classify_user_defined(from, to)
    }

    fn classify_nullable(&self, from: &TypeSymbol, to: &TypeSymbol) -> Option<ConversionKind> {
        let from_nullable = from.is_nullable_value_type();
        let to_nullable = to.is_nullable_value_type();
        if !from_nullable && !to_nullable {
            return None;
        }
        let inner = self.classify_conversion(from.strip_nullable(), to.strip_nullable());
        let widening = matches!(
            inner,
            ConversionKind::Identity | ConversionKind::ImplicitNumeric
        );
        match (from_nullable, to_nullable) {
            (false, true) if widening => Some(ConversionKind::ImplicitNullable),
            (true, true) if widening => Some(ConversionKind::ImplicitNullable),
            (true, true) if inner == ConversionKind::ExplicitNumeric => {
                Some(ConversionKind::ExplicitNullable)
            }
            (false, true) if inner == ConversionKind::ExplicitNumeric => {
                Some(ConversionKind::ExplicitNullable)
            }
            (true, false) if widening || inner == ConversionKind::ExplicitNumeric => {
                Some(ConversionKind::ExplicitNullable)
            }
            // `int?` boxes to `object` and the interfaces of `int`.
            (true, false) => None,
            _ => None,
        }
    }

    fn classify_reference(&self, from: &TypeSymbol, to: &TypeSymbol) -> Option<ConversionKind> {
        let from_value = self.is_value_type(from);
        let to_value = self.is_value_type(to);
        let from_inner = from.strip_nullable();

        if self.is_assignable(from_inner, to) {
            return Some(if from_value {
                ConversionKind::Boxing
            } else {
                ConversionKind::ImplicitReference
            });
        }
        if self.is_assignable(to.strip_nullable(), from) {
            return Some(if to_value {
                ConversionKind::Unboxing
            } else {
                ConversionKind::ExplicitReference
            });
        }
        if from_value || to_value {
            return None;
        }
        // Any non-sealed class may implement any interface at run time.
        let from_interface = self.is_interface(from);
        let to_interface = self.is_interface(to);
        let open = |ty: &TypeSymbol| !self.is_sealed(ty) && !ty.is_array();
        if (from_interface && (to_interface || open(to))) || (to_interface && open(from)) {
            return Some(ConversionKind::ExplicitReference);
        }
        None
    }

    fn classify_user_defined(&self, from: &TypeSymbol, to: &TypeSymbol) -> ConversionKind {
        let mut explicit = false;
        for owner in [from, to] {
            let Some(def) = self.definition(&owner.name) else {
                continue;
            };
            for conv in &def.conversions {
                let source = conv.from.substitute(&def.type_parameters, &owner.type_arguments);
                let target = conv.to.substitute(&def.type_parameters, &owner.type_arguments);
                let source_fits = source == *from || self.is_assignable(from, &source);
                let target_fits = target == *to || self.is_assignable(&target, to);
                if source_fits && target_fits {
                    if conv.implicit {
                        return ConversionKind::ImplicitUserDefined;
                    }
                    explicit = true;
                }
            }
        }
        if explicit {
            ConversionKind::ExplicitUserDefined
        } else {
            ConversionKind::None
        }
    }

    /// Implicit reference or boxing compatibility: `from` is `to`, derives
    /// from it, or implements it (with covariance on read-only sequences).
    pub fn is_assignable(&self, from: &TypeSymbol, to: &TypeSymbol) -> bool {
        if from == to {
            return true;
        }
        if from.is_unresolved() || to.is_unresolved() {
            return false;
        }
        if to.is_object() {
            return true;
        }
        if self.base_types(from).iter().any(|b| b == to) {
            return true;
        }
        if from.is_array() && to.is_array() {
            if let (Some(f), Some(t)) = (&from.element_type, &to.element_type) {
                return !self.is_value_type(f) && self.is_assignable(f, t);
            }
        }
        let mut candidates = self.all_interfaces(from);
        if self.is_interface(from) {
            candidates.push(from.clone());
        }
        candidates.iter().any(|iface| self.variant_match(iface, to))
    }

    fn variant_match(&self, iface: &TypeSymbol, target: &TypeSymbol) -> bool {
        if iface == target {
            return true;
        }
        if iface.name != target.name || iface.type_arguments.len() != target.type_arguments.len() {
            return false;
        }
        if !crate::types::is_covariant_interface(&iface.name) {
            return false;
        }
        iface
            .type_arguments
            .iter()
            .zip(&target.type_arguments)
            .all(|(a, b)| a == b || (!self.is_value_type(a) && self.is_assignable(a, b)))
    }
}
