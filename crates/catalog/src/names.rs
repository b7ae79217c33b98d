//! Fully qualified metadata names of framework types.

use serde::{Deserialize, Serialize};

pub const FRAMEWORK_NAMESPACE: &str = "NUnit.Framework.";
pub const CONSTRAINTS_NAMESPACE: &str = "NUnit.Framework.Constraints.";

pub const ASSERT: &str = "NUnit.Framework.Assert";
pub const CLASSIC_ASSERT: &str = "NUnit.Framework.Legacy.ClassicAssert";
pub const ASSUME: &str = "NUnit.Framework.Assume";
pub const WARN: &str = "NUnit.Framework.Warn";

pub const IS: &str = "NUnit.Framework.Is";
pub const HAS: &str = "NUnit.Framework.Has";
pub const DOES: &str = "NUnit.Framework.Does";
pub const CONTAINS: &str = "NUnit.Framework.Contains";
pub const THROWS: &str = "NUnit.Framework.Throws";
pub const IZ: &str = "NUnit.Framework.Iz";

pub const CONSTRAINT: &str = "NUnit.Framework.Constraints.Constraint";
pub const I_RESOLVE_CONSTRAINT: &str = "NUnit.Framework.Constraints.IResolveConstraint";
pub const I_CONSTRAINT: &str = "NUnit.Framework.Constraints.IConstraint";
pub const CONSTRAINT_EXPRESSION: &str = "NUnit.Framework.Constraints.ConstraintExpression";
pub const RESOLVABLE_CONSTRAINT_EXPRESSION: &str =
    "NUnit.Framework.Constraints.ResolvableConstraintExpression";
pub const ITEMS_CONSTRAINT_EXPRESSION: &str =
    "NUnit.Framework.Constraints.ItemsConstraintExpression";

/// Types an argument may have to count as a constraint.
pub const CONSTRAINT_BASES: &[&str] = &[
    CONSTRAINT,
    I_RESOLVE_CONSTRAINT,
    I_CONSTRAINT,
    CONSTRAINT_EXPRESSION,
    RESOLVABLE_CONSTRAINT_EXPRESSION,
];

/// Concrete constraint classes deriving from [`CONSTRAINT`].
pub const CONSTRAINT_TYPES: &[&str] = &[
    "EqualConstraint",
    "NotConstraint",
    "AndConstraint",
    "OrConstraint",
    "SameAsConstraint",
    "NullConstraint",
    "TrueConstraint",
    "FalseConstraint",
    "NaNConstraint",
    "EmptyConstraint",
    "DefaultConstraint",
    "GreaterThanConstraint",
    "GreaterThanOrEqualConstraint",
    "LessThanConstraint",
    "LessThanOrEqualConstraint",
    "RangeConstraint",
    "InstanceOfTypeConstraint",
    "ExactTypeConstraint",
    "AssignableFromConstraint",
    "AssignableToConstraint",
    "CollectionEquivalentConstraint",
    "CollectionSubsetConstraint",
    "CollectionSupersetConstraint",
    "CollectionOrderedConstraint",
    "UniqueItemsConstraint",
    "SomeItemsConstraint",
    "AllItemsConstraint",
    "NoItemConstraint",
    "ContainsConstraint",
    "SubstringConstraint",
    "StartsWithConstraint",
    "EndsWithConstraint",
    "RegexConstraint",
    "DictionaryContainsKeyConstraint",
    "DictionaryContainsValueConstraint",
    "PropertyExistsConstraint",
    "PredicateConstraint",
    "AnyOfConstraint",
    "ThrowsNothingConstraint",
    "ExceptionTypeConstraint",
    "DelayedConstraint",
];

pub fn is_framework_type(name: &str) -> bool {
    name.starts_with(FRAMEWORK_NAMESPACE)
}

pub fn is_constraint_base(name: &str) -> bool {
    CONSTRAINT_BASES.contains(&name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Static classes through which assertions are issued.
pub enum EntryPoint {
    Assert,
    ClassicAssert,
    Assume,
    Warn,
}

impl EntryPoint {
    pub const ALL: [EntryPoint; 4] = [
        EntryPoint::Assert,
        EntryPoint::ClassicAssert,
        EntryPoint::Assume,
        EntryPoint::Warn,
    ];

    pub fn metadata_name(self) -> &'static str {
        match self {
            EntryPoint::Assert => ASSERT,
            EntryPoint::ClassicAssert => CLASSIC_ASSERT,
            EntryPoint::Assume => ASSUME,
            EntryPoint::Warn => WARN,
        }
    }

    pub fn from_metadata_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.metadata_name() == name)
    }

    /// Methods taking `(actual, constraint)` or a bare condition.
    pub fn that_methods(self) -> &'static [&'static str] {
        match self {
            EntryPoint::Assert => &["That", "ThatAsync"],
            EntryPoint::Assume => &["That"],
            EntryPoint::Warn => &["If", "Unless"],
            EntryPoint::ClassicAssert => &[],
        }
    }

    pub fn hosts_classic(self) -> bool {
        matches!(self, EntryPoint::Assert | EntryPoint::ClassicAssert)
    }
}

/// Whether `name` is a constraint-form entry method on any entry point.
pub fn is_that_method(name: &str) -> bool {
    matches!(name, "That" | "ThatAsync" | "If" | "Unless")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Static classes a constraint chain can start from.
pub enum HelperClass {
    Is,
    Has,
    Does,
    Contains,
    Throws,
    Iz,
}

impl HelperClass {
    pub const ALL: [HelperClass; 6] = [
        HelperClass::Is,
        HelperClass::Has,
        HelperClass::Does,
        HelperClass::Contains,
        HelperClass::Throws,
        HelperClass::Iz,
    ];

    pub fn metadata_name(self) -> &'static str {
        match self {
            HelperClass::Is => IS,
            HelperClass::Has => HAS,
            HelperClass::Does => DOES,
            HelperClass::Contains => CONTAINS,
            HelperClass::Throws => THROWS,
            HelperClass::Iz => IZ,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HelperClass::Is => "Is",
            HelperClass::Has => "Has",
            HelperClass::Does => "Does",
            HelperClass::Contains => "Contains",
            HelperClass::Throws => "Throws",
            HelperClass::Iz => "Iz",
        }
    }

    pub fn from_metadata_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.metadata_name() == name)
    }

    /// `Iz` is an alias of `Is`.
    pub fn is_is(self) -> bool {
        matches!(self, HelperClass::Is | HelperClass::Iz)
    }
}

impl std::fmt::Display for HelperClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Metadata name of a constraint class given its simple name.
pub fn constraint_type(simple: &str) -> String {
    format!("{CONSTRAINTS_NAMESPACE}{simple}")
}
