use super::members::{ends_chain, is_comparison_root, MEMBERS};
use super::*;
use std::collections::HashSet;

#[test]
fn member_roles_are_classified() {
    assert_eq!(member("Not").map(|m| m.role), Some(MemberRole::Prefix));
    assert_eq!(member("EqualTo").map(|m| m.role), Some(MemberRole::Root));
    assert_eq!(member("IgnoreCase").map(|m| m.role), Some(MemberRole::Suffix));
    assert_eq!(
        member("Or").map(|m| m.role),
        Some(MemberRole::Combinator(Combinator::Or))
    );
    assert_eq!(
        member("With").map(|m| m.role),
        Some(MemberRole::Combinator(Combinator::And))
    );
    assert!(member("ToString").is_none());
}

#[test]
fn member_names_are_unique() {
    let mut seen = HashSet::new();
    for m in MEMBERS {
        assert!(seen.insert(m.name), "duplicate member {}", m.name);
    }
}

#[test]
fn every_root_names_a_known_constraint_class() {
    for m in MEMBERS.iter().filter(|m| m.role == MemberRole::Root) {
        let constraint = m.constraint.unwrap();
        assert!(
            names::CONSTRAINT_TYPES.contains(&constraint),
            "{} produces unknown {}",
            m.name,
            constraint
        );
    }
}

#[test]
fn classic_lookup_exposes_parameters() {
    let are_equal = classic("AreEqual").unwrap();
    assert_eq!(are_equal.kind, ClassicKind::Equality);
    assert_eq!(are_equal.diagnostic_id, "NUnit2005");
    assert_eq!(are_equal.expected, Some("expected"));
    assert_eq!(are_equal.tolerance, Some("delta"));
    assert_eq!(are_equal.root(), "EqualTo");
    assert!(!are_equal.is_negated());

    let not_null = classic("IsNotNull").unwrap();
    assert_eq!(not_null.actual, &["anObject"]);
    assert!(not_null.is_negated());

    assert!(classic("That").is_none());
}

#[test]
fn classic_templates_use_catalog_members() {
    for c in classic::CLASSIC {
        for name in c.constraint.chain {
            assert!(member(name).is_some(), "{} uses unknown member {}", c.name, name);
        }
        assert_eq!(member(c.root()).map(|m| m.role), Some(MemberRole::Root));
    }
}

#[test]
fn diagnostic_ids_are_unique() {
    let mut seen = HashSet::new();
    for c in classic::CLASSIC {
        assert!(seen.insert(c.diagnostic_id), "duplicate id {}", c.diagnostic_id);
    }
}

#[test]
fn entry_points_and_helpers_resolve_by_metadata_name() {
    assert_eq!(
        EntryPoint::from_metadata_name("NUnit.Framework.Legacy.ClassicAssert"),
        Some(EntryPoint::ClassicAssert)
    );
    assert_eq!(EntryPoint::Warn.that_methods(), &["If", "Unless"]);
    assert!(EntryPoint::ClassicAssert.hosts_classic());
    assert!(!EntryPoint::Assume.hosts_classic());
    assert_eq!(
        HelperClass::from_metadata_name("NUnit.Framework.Iz"),
        Some(HelperClass::Iz)
    );
    assert!(HelperClass::Iz.is_is());
    assert!(is_framework_type("NUnit.Framework.Constraints.EqualConstraint"));
    assert!(!is_framework_type("App.Framework.Is"));
    assert!(is_constraint_base(names::RESOLVABLE_CONSTRAINT_EXPRESSION));
}

#[test]
fn helper_predicates() {
    assert!(ends_chain("Property"));
    assert!(!ends_chain("Not"));
    assert!(is_comparison_root("AtLeast"));
    assert!(!is_comparison_root("EqualTo"));
}
