//! Immutable lookup tables describing the NUnit assertion surface.
//!
//! Tables are built once on first use and never mutated afterwards, so they
//! can be shared freely between analysis threads.

pub mod classic;
pub mod members;
pub mod names;

pub use classic::{classic, ClassicAssertion, ClassicKind, ConstraintTemplate};
pub use members::{member, Combinator, ConstraintMember, MemberRole};
pub use names::{is_constraint_base, is_framework_type, EntryPoint, HelperClass};

#[cfg(test)]
mod tests;
