use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info, warn};

use crate::args::ScanArgs;
use crate::config::{load_config, Config};
use crate::output::{self, Format};
use crate::{default_excludes, is_excluded, ui};

use engine::framework::register;
use engine::{
    analyze_compilation, descriptor_by_id, descriptors, fix_compilation, set_debug_sink,
    AnalysisCache, DebugEvent, DebugSink, EngineConfig, EngineMetrics,
};
use loader::{load_settings, load_workspace, Settings};
use reporters::ScanInfo;

/// Upper bound on analyze/fix rounds for `--apply-fixes`.
const MAX_FIX_PASSES: usize = 8;

const CACHE_FILE: &str = "nunitlint-cache.json";

/// Forwards engine events to the `debug` log.
struct TracingSink;

impl DebugSink for TracingSink {
    fn event(&self, event: DebugEvent) {
        match event {
            DebugEvent::UnitStart { path } => debug!(unit = %path.display(), "Unit started"),
            DebugEvent::UnitEnd { path, diagnostics } => {
                debug!(unit = %path.display(), diagnostics, "Unit finished")
            }
            DebugEvent::AssertionLocated {
                file,
                line,
                method,
                form,
            } => debug!(file = %file.display(), line, %method, %form, "Assertion located"),
            DebugEvent::RuleFired {
                rule_id,
                file,
                line,
            } => debug!(file = %file.display(), line, %rule_id, "Rule fired"),
        }
    }
}

fn init_logging(args: &ScanArgs) {
    let level = if args.quiet {
        LevelFilter::OFF
    } else if args.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Settings file, then config overrides, then `--rule` overrides.
fn resolve_settings(args: &ScanArgs, config: &Config) -> Result<Settings> {
    let mut settings = match args.settings.as_deref().or(config.settings.as_deref()) {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    let overrides = config
        .rules
        .iter()
        .map(|(id, level)| (id.as_str(), *level))
        .chain(args.rules.iter().map(|(id, level)| (id.as_str(), *level)));
    for (id, level) in overrides {
        if descriptor_by_id(id).is_none() {
            warn!(rule = %id, "Override for unknown rule");
        }
        settings.override_with(id, level);
    }
    Ok(settings)
}

pub fn run_scan(args: ScanArgs) -> Result<()> {
    init_logging(&args);
    if args.debug && !args.quiet {
        debug!("Debug mode enabled");
    }
    let started = Instant::now();

    let user_cfg = load_config().context("failed to load configuration")?;
    let format = args.format.or(user_cfg.output.format).unwrap_or(Format::Text);
    let settings = resolve_settings(&args, &user_cfg)?;

    if format == Format::Text && !args.quiet {
        ui::print_header();
    }

    let path = args
        .path
        .canonicalize()
        .with_context(|| format!("path not found: {}", args.path.display()))?;
    info!(target = %path.display(), "Scan started");
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
    {
        error!("Failed to build global thread pool: {e}");
    }

    let mut patterns = args.exclude.clone();
    if !args.no_default_exclude {
        patterns.extend(default_excludes());
    }
    let mut workspace = load_workspace(&path, &|p| is_excluded(p, &patterns))?;
    let mut compilation = workspace.compilation();
    register(&mut compilation);
    info!(
        documents = workspace.documents.len(),
        units = compilation.units.len(),
        excludes = patterns.len(),
        "Documents loaded"
    );

    if args.debug {
        set_debug_sink(Some(Box::new(TracingSink)));
    }
    let cfg = EngineConfig {
        settings,
        ..Default::default()
    };

    let mut fixes_applied = 0;
    if args.apply_fixes {
        fixes_applied = fix_compilation(&mut compilation, &cfg, MAX_FIX_PASSES)?;
        let written = workspace.write_back(&compilation)?;
        info!(fixes = fixes_applied, documents = written, "Fixes applied");
    }

    let cache_path: Option<PathBuf> = args
        .cache_dir
        .clone()
        .or_else(|| user_cfg.cache_dir())
        .map(|dir| dir.join(CACHE_FILE));
    let mut cache = match &cache_path {
        Some(p) => AnalysisCache::load(p),
        None => AnalysisCache::default(),
    };
    let mut metrics = EngineMetrics::default();
    let diagnostics = analyze_compilation(
        &compilation,
        &cfg,
        cache_path.is_some().then_some(&mut cache),
        Some(&mut metrics),
    )?;
    set_debug_sink(None);
    if let Some(p) = &cache_path {
        if let Err(e) = cache.save(p) {
            warn!(path = %p.display(), "Failed to write cache: {e}");
        }
    }

    let info = ScanInfo {
        rules_loaded: descriptors()
            .iter()
            .filter(|d| cfg.settings.is_enabled(d.id))
            .count(),
        units_analyzed: compilation.units.len(),
        duration_ms: started.elapsed().as_millis() as u64,
        cache_hits: metrics.cache_hits,
        fixes_applied,
    };
    output::print_diagnostics(&diagnostics, format, &info)?;

    if let Some(path) = &args.metrics {
        let data = serde_json::to_string_pretty(&metrics)?;
        if path.as_os_str() == "-" {
            if !args.quiet {
                eprintln!("{data}");
            }
        } else {
            fs::write(path, data)
                .with_context(|| format!("failed to write metrics: {}", path.display()))?;
        }
    }
    info!(diagnostics = diagnostics.len(), "Scan completed");

    if let Some(thr) = args.fail_on {
        if diagnostics.iter().any(|d| d.severity >= thr) {
            std::process::exit(1);
        }
    }
    Ok(())
}
