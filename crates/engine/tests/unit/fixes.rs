use super::*;
use ir::builder::{binary, literal_int, literal_str};
use ir::BinaryOperator;

fn statements(c: &Compilation) -> Vec<String> {
    c.units[0].operations.iter().map(|op| op.syntax.clone()).collect()
}

#[test]
fn applied_fixes_rewrite_the_unit_and_silence_the_rules() {
    let mut c = compilation(vec![unit(
        FILE,
        vec![
            classic(
                "AreEqual",
                vec![("expected", literal_int(2)), ("actual", int("x"))],
            ),
            that(literal_int(3), is(vec![link("EqualTo").with(int("y"))])),
            condition(binary(
                BinaryOperator::NotEquals,
                int("z"),
                literal_int(4),
                TypeSymbol::boolean(),
            )),
        ],
    )]);
    let cfg = EngineConfig::default();
    let before = analyze_compilation(&c, &cfg, None, None).unwrap();
    assert_eq!(ids(&before), vec!["NUnit2005", "NUnit2007", "NUnit2010"]);

    let applied = apply_fixes(&mut c, &before).unwrap();
    assert_eq!(applied, 3);
    assert_eq!(
        statements(&c),
        vec![
            "Assert.That(x, Is.EqualTo(2));",
            "Assert.That(y, Is.EqualTo(3));",
            "Assert.That(z, Is.Not.EqualTo(4));",
        ]
    );

    let after = analyze_compilation(&c, &cfg, None, None).unwrap();
    assert!(after.is_empty(), "left: {:?}", ids(&after));
}

#[test]
fn rewritten_nodes_keep_the_assertion_location() {
    let mut c = compilation(vec![unit(
        FILE,
        vec![
            that(int("a"), is(vec![link("Zero")])),
            classic("IsNull", vec![("anObject", string("s"))]),
        ],
    )]);
    let diagnostics = analyze_compilation(&c, &EngineConfig::default(), None, None).unwrap();
    apply_fixes(&mut c, &diagnostics).unwrap();
    let rewritten = &c.units[0].operations[1];
    assert_eq!(rewritten.syntax, "Assert.That(s, Is.Null);");
    assert!(rewritten
        .descendants()
        .all(|n| n.meta.line == 2 && n.meta.file == FILE));
}

#[test]
fn one_fix_per_assertion() {
    // Both the constant-actual and the classic rules target this call.
    let mut c = compilation(vec![unit(
        FILE,
        vec![classic(
            "AreEqual",
            vec![("expected", int("x")), ("actual", literal_int(5))],
        )],
    )]);
    let diagnostics = analyze_compilation(&c, &EngineConfig::default(), None, None).unwrap();
    assert_eq!(ids(&diagnostics), vec!["NUnit2005", "NUnit2007"]);
    assert_eq!(apply_fixes(&mut c, &diagnostics).unwrap(), 1);
    assert_eq!(statements(&c), vec!["Assert.That(5, Is.EqualTo(x));"]);
}

#[test]
fn fix_loop_reaches_a_fixed_point() {
    let mut c = compilation(vec![unit(
        FILE,
        vec![classic(
            "AreEqual",
            vec![("expected", int("x")), ("actual", literal_int(5))],
        )],
    )]);
    let applied = fix_compilation(&mut c, &EngineConfig::default(), 4).unwrap();
    assert_eq!(applied, 2);
    assert_eq!(statements(&c), vec!["Assert.That(x, Is.EqualTo(5));"]);
}

#[test]
fn messages_survive_the_rewrite() {
    let mut c = compilation(vec![unit(
        FILE,
        vec![classic(
            "AreEqual",
            vec![
                ("expected", literal_int(1)),
                ("actual", int("x")),
                ("message", literal_str("x must be one")),
            ],
        )],
    )]);
    let diagnostics = analyze_compilation(&c, &EngineConfig::default(), None, None).unwrap();
    assert_eq!(
        diagnostics[0].fix.as_deref(),
        Some("Assert.That(x, Is.EqualTo(1), \"x must be one\")")
    );
    apply_fixes(&mut c, &diagnostics).unwrap();
    let after = analyze_compilation(&c, &EngineConfig::default(), None, None).unwrap();
    assert!(after.is_empty());
}

#[test]
fn stale_diagnostics_are_skipped() {
    let mut c = compilation(vec![unit(
        FILE,
        vec![classic(
            "AreNotEqual",
            vec![("expected", literal_int(3)), ("actual", int("y"))],
        )],
    )]);
    let diagnostics = analyze_compilation(&c, &EngineConfig::default(), None, None).unwrap();
    assert_eq!(apply_fixes(&mut c, &diagnostics).unwrap(), 1);
    // The call is no longer a classic assertion, so the facts do not fit.
    assert_eq!(apply_fixes(&mut c, &diagnostics).unwrap(), 0);
    assert_eq!(statements(&c), vec!["Assert.That(y, Is.Not.EqualTo(3));"]);
}
