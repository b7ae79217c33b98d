//! Source model consumed by the analyzers.
//!
//! The host compiler is represented by already-resolved [`Operation`] trees
//! grouped into [`CompilationUnit`]s, plus a [`Compilation`] holding the type
//! registry used for symbol queries and conversion classification. Every
//! type here is serde-serializable so whole compilations can be exchanged as
//! JSON or YAML documents.

pub mod builder;
pub mod compilation;
pub mod conversions;
mod corlib;
pub mod operation;
pub mod symbols;
pub mod syntax;
pub mod types;

pub use compilation::{Compilation, CompilationUnit, Enumerable};
pub use conversions::ConversionKind;
pub use operation::{
    Argument, BinaryOperator, ConstantValue, Meta, Operation, OperationKind, UnaryOperator,
};
pub use symbols::{MemberSymbol, MethodSymbol, ParameterSymbol};
pub use types::{
    MemberDefinition, MemberKind, SpecialType, TypeDefinition, TypeKind, TypeSymbol,
    UserConversion,
};

#[cfg(test)]
mod tests;
