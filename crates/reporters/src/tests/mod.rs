use engine::{Diagnostic, FixFacts};
use loader::Severity;
use std::path::PathBuf;


pub(crate) fn sample_diagnostics() -> Vec<Diagnostic> {
    vec![
        Diagnostic {
            id: "3f1c2a9e0b7d4c11".into(),
            rule_id: "NUnit2005".into(),
            title: "Consider using Assert.That(actual, Is.EqualTo(expected)) instead of ClassicAssert.AreEqual(expected, actual)".into(),
            severity: Severity::Warning,
            file: PathBuf::from("Tests/CalculatorTests.cs"),
            line: 12,
            column: 9,
            excerpt: "ClassicAssert.AreEqual(4, sum)".into(),
            message: "Consider using the constraint model, Assert.That(actual, Is.EqualTo(expected)), instead of the classic model, ClassicAssert.AreEqual(expected, actual)".into(),
            facts: Some(FixFacts::ClassicToConstraint {
                method: "AreEqual".into(),
            }),
            fix: Some("Assert.That(sum, Is.EqualTo(4))".into()),
            target: Default::default(),
        },
        Diagnostic {
            id: "8a02d5e71c3f9b60".into(),
            rule_id: "NUnit2021".into(),
            title: "Incompatible types for EqualTo constraint".into(),
            severity: Severity::Error,
            file: PathBuf::from("Tests/CalculatorTests.cs"),
            line: 20,
            column: 13,
            excerpt: "2".into(),
            message: "The EqualTo constraint has incompatible types for actual and expected".into(),
            facts: None,
            fix: None,
            target: Default::default(),
        },
    ]
}
