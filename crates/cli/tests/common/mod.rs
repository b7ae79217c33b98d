#![allow(dead_code)]

use catalog::{names, HelperClass};
use engine::framework::{assert_that, chain, Link};
use ir::builder::{literal_int, local, static_call, statement};
use ir::{Argument, CompilationUnit, Operation, TypeSymbol};
use loader::CompilationDocument;
use std::fs;
use std::path::{Path, PathBuf};

/// `ClassicAssert.AreEqual(1, x)`, reported as NUnit2005 (info).
pub fn classic_are_equal() -> Operation {
    static_call(
        names::CLASSIC_ASSERT,
        "AreEqual",
        vec![
            Argument::named("expected", literal_int(1)),
            Argument::named("actual", local("x", TypeSymbol::int32())),
        ],
        None,
    )
}

/// `Assert.That(s, Is.EqualTo(2))`, reported as NUnit2021 (error).
pub fn string_equal_to_int() -> Operation {
    let constraint = chain(
        HelperClass::Is,
        vec![Link::new("EqualTo").with(literal_int(2))],
    )
    .expect("non-empty chain");
    assert_that(local("s", TypeSymbol::string()), constraint, Vec::new())
}

pub fn unit(path: &str, assertions: Vec<Operation>) -> CompilationUnit {
    let mut unit = CompilationUnit::new(path);
    for (idx, assertion) in assertions.into_iter().enumerate() {
        let mut op = statement(assertion);
        op.for_each_mut(&mut |node| {
            node.meta.line = idx + 1;
            node.meta.column = 9;
        });
        unit.push(op);
    }
    unit
}

pub fn write_document(dir: &Path, name: &str, units: Vec<CompilationUnit>) -> PathBuf {
    let doc = CompilationDocument {
        types: Vec::new(),
        units,
    };
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
    path
}

/// A directory with one info and one error diagnostic.
pub fn sample_project(dir: &Path) -> PathBuf {
    let root = dir.join("project");
    fs::create_dir_all(&root).unwrap();
    write_document(
        &root,
        "calculator.json",
        vec![unit("Tests/CalculatorTests.cs", vec![classic_are_equal()])],
    );
    write_document(
        &root,
        "strings.json",
        vec![unit("Tests/StringTests.cs", vec![string_equal_to_int()])],
    );
    root
}
