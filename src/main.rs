use patseek::cli::{Cli, Commands, ConfigAction};
use patseek::config::Config;
use patseek::corpus;
use patseek::embedding::{EmbeddingProvider, FastEmbedProvider};
use patseek::error::{PatseekError, Result};
use patseek::evaluation::{self, GroundTruth};
use patseek::index::VectorIndex;
use patseek::retrieval::{SearchQuery, SemanticSearcher};
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Search {
            query,
            limit,
            filter,
            corpus,
            json,
        } => {
            cmd_search(cli.config, &query, limit, filter, corpus, json)?;
        }
        Commands::Evaluate {
            ground_truth,
            top_n,
            limit,
            filter,
            corpus,
            json,
        } => {
            cmd_evaluate(cli.config, ground_truth, top_n, limit, filter, corpus, json)?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "patseek=debug" } else { "patseek=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load(&path),
        None => {
            let default = Config::default_path()?;
            if default.exists() {
                Config::load(&default)
            } else {
                tracing::debug!("No config file at {:?}, using defaults", default);
                let mut config = Config::default();
                config.apply_env_overrides();
                Ok(config)
            }
        }
    }
}

/// Assemble the query pipeline: load corpus, normalize, embed, build index.
///
/// Runs once per invocation; the returned searcher is an immutable snapshot.
fn build_searcher(
    config: &Config,
    corpus_path: Option<PathBuf>,
    title_filter: Option<&str>,
) -> Result<SemanticSearcher> {
    let path = corpus_path.unwrap_or_else(|| config.corpus.csv_file.clone());

    let raw = corpus::load_csv(&path)?;
    let normalized = corpus::normalize(&raw, title_filter);
    tracing::info!(
        "Corpus normalized: {} documents, {} skipped",
        normalized.documents.len(),
        normalized.skipped.len()
    );

    let provider: Arc<dyn EmbeddingProvider> =
        Arc::new(FastEmbedProvider::new(&config.embedding.model)?);
    let index = VectorIndex::build(
        provider.as_ref(),
        &normalized.documents,
        config.embedding.batch_size,
    )?;

    Ok(SemanticSearcher::new(provider, index))
}

fn cmd_search(
    config_path: Option<PathBuf>,
    query: &str,
    limit: Option<usize>,
    filter: Option<String>,
    corpus_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let limit = limit.unwrap_or(config.retrieval.default_limit);

    let searcher = build_searcher(&config, corpus_path, filter.as_deref())?;
    let results = searcher.search(&SearchQuery::new(query, limit))?;

    if json {
        let output =
            serde_json::to_string_pretty(&results).map_err(|e| PatseekError::Json {
                source: e,
                context: "Failed to serialize search results".to_string(),
            })?;
        println!("{}", output);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results found for query: {}", query);
        return Ok(());
    }

    println!("Top {} results for '{}':", results.len(), query);
    for (i, result) in results.iter().enumerate() {
        println!(
            "\n{}. {} (score: {:.3})",
            i + 1,
            result.document.title,
            result.score
        );
        println!("   Date: {}", result.document.date);
        println!("   Abstract: {}", result.document.abstract_text);
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_evaluate(
    config_path: Option<PathBuf>,
    ground_truth_path: Option<PathBuf>,
    top_n: Option<usize>,
    limit: Option<usize>,
    filter: Option<String>,
    corpus_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let top_n = top_n.unwrap_or(config.evaluation.top_n);
    let limit = limit.unwrap_or(config.retrieval.default_limit);

    let path = ground_truth_path.unwrap_or_else(|| config.evaluation.ground_truth_file.clone());
    let ground_truth = GroundTruth::load(&path)?;
    if ground_truth.is_empty() {
        println!("Ground truth file has no queries: {}", path.display());
        return Ok(());
    }

    let searcher = build_searcher(&config, corpus_path, filter.as_deref())?;
    let report = evaluation::evaluate_all(&searcher, &ground_truth, top_n, limit)?;

    if json {
        let output = serde_json::to_string_pretty(&report).map_err(|e| PatseekError::Json {
            source: e,
            context: "Failed to serialize evaluation report".to_string(),
        })?;
        println!("{}", output);
        return Ok(());
    }

    println!("Top-{} accuracy over {} queries", report.top_n, report.verdicts.len());
    println!("================================");
    for verdict in &report.verdicts {
        println!(
            "  {} {} ({} retrieved)",
            if verdict.hit { "✓" } else { "✗" },
            verdict.query,
            verdict.retrieved
        );
    }
    println!(
        "\nAccuracy: {:.2} ({}/{} queries)",
        report.accuracy,
        report.hits(),
        report.verdicts.len()
    );

    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let json = serde_json::to_string_pretty(&config).map_err(|e| PatseekError::Json {
                source: e,
                context: "Failed to serialize config".to_string(),
            })?;
            println!("{}", json);
        }
        ConfigAction::Validate { file } => {
            let path = match file {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
        }
        ConfigAction::Init { force } => {
            let path = Config::default_path()?;

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| PatseekError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            let config = Config::default();
            config.save(&path)?;
            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
