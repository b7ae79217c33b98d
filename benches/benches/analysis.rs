use catalog::{names, HelperClass};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use engine::framework::{assert_that, chain, register, Link};
use engine::{analyze_compilation, decompose, AnalysisCache, CancellationToken, EngineConfig};
use ir::builder::{literal_int, literal_str, local, static_call, statement};
use ir::{Argument, Compilation, CompilationUnit, Operation, TypeSymbol};
use loader::{parse_document_str, CompilationDocument, DocumentFormat};

fn constraint_chain() -> Operation {
    chain(
        HelperClass::Is,
        vec![
            Link::new("Not"),
            Link::new("EqualTo").with(literal_int(3)),
            Link::new("Within").with(literal_int(1)),
            Link::new("Or"),
            Link::new("GreaterThan").with(literal_int(10)),
        ],
    )
    .expect("non-empty chain")
}

fn assertions() -> Vec<Operation> {
    let x = || local("x", TypeSymbol::int32());
    vec![
        static_call(
            names::CLASSIC_ASSERT,
            "AreEqual",
            vec![
                Argument::named("expected", literal_int(1)),
                Argument::named("actual", x()),
            ],
            None,
        ),
        assert_that(x(), constraint_chain(), Vec::new()),
        assert_that(
            local("s", TypeSymbol::string()),
            chain(
                HelperClass::Is,
                vec![Link::new("EqualTo").with(literal_str("a"))],
            )
            .expect("non-empty chain"),
            Vec::new(),
        ),
        assert_that(
            literal_int(4),
            chain(HelperClass::Is, vec![Link::new("EqualTo").with(x())]).expect("non-empty chain"),
            Vec::new(),
        ),
    ]
}

fn compilation(units: usize) -> Compilation {
    let mut c = Compilation::new();
    register(&mut c);
    c.units = (0..units)
        .map(|idx| {
            let mut unit = CompilationUnit::new(format!("Tests{idx}.cs"));
            for (line, assertion) in assertions().into_iter().enumerate() {
                let mut op = statement(assertion);
                op.for_each_mut(&mut |node| node.meta.line = line + 1);
                unit.push(op);
            }
            unit
        })
        .collect();
    c
}

fn bench_decompose(c: &mut Criterion) {
    let op = constraint_chain();
    let cancel = CancellationToken::new();
    c.bench_function("decompose_chain", |b| {
        b.iter(|| decompose(black_box(&op), black_box(&cancel)))
    });
}

fn bench_engine(c: &mut Criterion) {
    let compilation = compilation(200);
    let cfg = EngineConfig::default();
    c.bench_function("analyze_200_units", |b| {
        b.iter(|| analyze_compilation(black_box(&compilation), black_box(&cfg), None, None))
    });
}

fn bench_engine_cached(c: &mut Criterion) {
    let compilation = compilation(200);
    let cfg = EngineConfig::default();
    let mut cache = AnalysisCache::default();
    let _ = analyze_compilation(&compilation, &cfg, Some(&mut cache), None);
    c.bench_function("analyze_200_units_cached", |b| {
        b.iter(|| {
            analyze_compilation(
                black_box(&compilation),
                black_box(&cfg),
                Some(&mut cache),
                None,
            )
        })
    });
}

fn bench_loader(c: &mut Criterion) {
    let doc = CompilationDocument {
        types: Vec::new(),
        units: compilation(50).units,
    };
    let text = serde_json::to_string(&doc).expect("serialize document");
    c.bench_function("parse_document_json", |b| {
        b.iter(|| parse_document_str(black_box(&text), DocumentFormat::Json))
    });
}

criterion_group!(
    benches,
    bench_decompose,
    bench_engine,
    bench_engine_cached,
    bench_loader
);
criterion_main!(benches);
