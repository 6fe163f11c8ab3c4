use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use custid_cli::pipeline::{CsvNameSource, default_output_path, resolve_csv};
use custid_core::{ImportSession, ImportSummary, NameSource, ReferenceSetManager, ResolverConfig};
use custid_match::{NameStatistics, ResolutionPolicy};
use custid_model::RankedCandidates;
use tracing::{info, info_span};

use crate::cli::{DEFAULT_CONFIG_FILE, HistoryArgs, ResolveArgs, StatsArgs, SuggestArgs};

/// Result of a `resolve` run.
pub struct ResolveReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub summary: ImportSummary,
}

/// Loads `--config`, or `./custid.toml` when present, or the built-in presets.
pub fn load_config(path: Option<&Path>) -> Result<ResolverConfig> {
    match path {
        Some(path) => ResolverConfig::load(path)
            .with_context(|| format!("load config: {}", path.display())),
        None => ResolverConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))
            .context("load default config"),
    }
}

pub fn run_resolve(args: &ResolveArgs, config: &ResolverConfig) -> Result<ResolveReport> {
    let span = info_span!("resolve", input = %args.input.display());
    let _guard = span.enter();

    let mut config = config.clone();
    if args.strict {
        config.bulk_import.strict = true;
    }
    if let Some(min_confidence) = args.min_confidence {
        config.bulk_import.min_confidence = min_confidence;
    }
    config.bulk_import.validate().context("resolve options")?;

    let references = load_history(&args.history)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    let mut session = ImportSession::new(&config, references);
    resolve_csv(&args.input, &output, &args.column, &mut session)?;

    Ok(ResolveReport {
        input: args.input.clone(),
        output,
        summary: session.finish(),
    })
}

pub fn run_suggest(args: &SuggestArgs, config: &ResolverConfig) -> Result<RankedCandidates> {
    let mut options = config.find_matches;
    if let Some(max_results) = args.max_results {
        options.max_results = max_results;
    }
    if let Some(min_confidence) = args.min_confidence {
        options.min_confidence = min_confidence;
    }
    options.validate().context("suggest options")?;

    let references = load_history(&args.history)?;
    let ranked = ResolutionPolicy::new(options).find_matches(&args.name, references.snapshot());
    info!(
        matches = ranked.matches.len(),
        suggestions = ranked.suggestions.len(),
        "ranked candidates"
    );
    Ok(ranked)
}

pub fn run_stats(args: &StatsArgs) -> Result<NameStatistics> {
    let Some(path) = &args.history.history else {
        bail!("stats needs a name source: pass --history <CSV>");
    };
    let names = CsvNameSource::new(path, &args.history.history_column)
        .customer_names()
        .context("load historical customer names")?;
    Ok(NameStatistics::from_names(names.iter().map(String::as_str)))
}

fn load_history(args: &HistoryArgs) -> Result<ReferenceSetManager> {
    let mut references = ReferenceSetManager::new();
    if let Some(path) = &args.history {
        let source = CsvNameSource::new(path, &args.history_column);
        let added = references
            .seed_from(&source)
            .with_context(|| format!("seed from {}", path.display()))?;
        info!(added, "reference set loaded");
    }
    Ok(references)
}
