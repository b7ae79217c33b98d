use serde::Serialize;
use std::path::PathBuf;
use std::sync::RwLock;

#[derive(Debug, Clone, Serialize)]
pub enum DebugEvent {
    UnitStart {
        path: PathBuf,
    },
    UnitEnd {
        path: PathBuf,
        diagnostics: usize,
    },
    AssertionLocated {
        file: PathBuf,
        line: usize,
        method: String,
        form: String,
    },
    RuleFired {
        rule_id: String,
        file: PathBuf,
        line: usize,
    },
}

pub trait DebugSink: Send + Sync {
    fn event(&self, event: DebugEvent);
}

static DEBUG_SINK: RwLock<Option<Box<dyn DebugSink>>> = RwLock::new(None);

pub fn set_debug_sink(sink: Option<Box<dyn DebugSink>>) {
    let mut guard = DEBUG_SINK.write().unwrap_or_else(|e| e.into_inner());
    *guard = sink;
}

pub(crate) fn emit(event: DebugEvent) {
    let guard = DEBUG_SINK.read().unwrap_or_else(|e| e.into_inner());
    if let Some(s) = guard.as_ref() {
        s.event(event);
    }
}
