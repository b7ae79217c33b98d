#![no_main]
use engine::framework::register;
use engine::{analyze_compilation, apply_fixes, EngineConfig};
use libfuzzer_sys::fuzz_target;
use loader::{parse_document_str, DocumentFormat};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(doc) = parse_document_str(s, DocumentFormat::Json) else {
        return;
    };
    let mut compilation = ir::Compilation::from_parts(doc.types, doc.units);
    register(&mut compilation);
    if let Ok(diagnostics) = analyze_compilation(&compilation, &EngineConfig::default(), None, None) {
        let _ = apply_fixes(&mut compilation, &diagnostics);
    }
});
