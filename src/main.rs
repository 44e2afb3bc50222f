use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use authorship::{
    config::AnalysisConfig, loader, AuthorshipError, Corpus, Hits, SimilarityAlgorithm,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Attribute unknown texts to the closest known author.
#[derive(Parser, Debug)]
#[command(name = "authorship", version, about)]
struct Cli {
    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// JSON file with analysis defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank corpus documents by similarity to each unknown file
    Identify {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Number of matches to print per unknown file
        #[arg(short = 'j', long)]
        top: Option<usize>,

        #[arg(long, value_enum, default_value_t = Algorithm::Cosine)]
        algorithm: Algorithm,

        /// Unknown documents to identify
        #[arg(required = true)]
        unknown: Vec<PathBuf>,
    },
    /// Print the vector template selected for the corpus
    Template {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// Print corpus statistics and the most frequent terms
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Number of frequent terms to list
        #[arg(long, default_value_t = 20)]
        terms: usize,
    },
}

#[derive(Args, Debug)]
struct CorpusArgs {
    /// Directory of known-author documents
    #[arg(short, long)]
    corpus: PathBuf,

    /// Template size
    #[arg(short)]
    k: Option<usize>,

    /// Extension of corpus files
    #[arg(long)]
    extension: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Algorithm {
    Cosine,
    Dot,
}

impl From<Algorithm> for SimilarityAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Cosine => SimilarityAlgorithm::CosineSimilarity,
            Algorithm::Dot => SimilarityAlgorithm::Dot,
        }
    }
}

#[derive(Serialize)]
struct Identification<'a> {
    unknown: String,
    matches: &'a Hits,
}

#[derive(Serialize)]
struct TemplateRow<'a> {
    term: &'a str,
    corpus_frequency: u64,
    document_frequency: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    match cli.command {
        Command::Identify {
            corpus,
            top,
            algorithm,
            unknown,
        } => {
            corpus.apply(&mut config);
            if let Some(top) = top {
                config.top_matches = top;
            }
            config.validate()?;
            run_identify(&corpus, &config, algorithm.into(), &unknown)
        }
        Command::Template { corpus } => {
            corpus.apply(&mut config);
            config.validate()?;
            run_template(&corpus, &config)
        }
        Command::Stats { corpus, terms } => {
            corpus.apply(&mut config);
            config.validate()?;
            run_stats(&corpus, &config, terms)
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

impl CorpusArgs {
    fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(k) = self.k {
            config.template_size = k;
        }
        if let Some(extension) = &self.extension {
            config.extension = extension.clone();
        }
    }

    fn load(&self, config: &AnalysisConfig, exclude: &[&Path]) -> Result<Corpus> {
        let corpus: Corpus = Corpus::from_dir(&self.corpus, &config.extension, exclude)
            .with_context(|| format!("loading corpus from {}", self.corpus.display()))?;
        if corpus.is_empty() {
            return Err(AuthorshipError::EmptyCorpus)
                .with_context(|| format!("no .{} files in {}", config.extension, self.corpus.display()));
        }
        Ok(corpus)
    }
}

fn run_identify(
    args: &CorpusArgs,
    config: &AnalysisConfig,
    algorithm: SimilarityAlgorithm,
    unknown: &[PathBuf],
) -> Result<()> {
    let exclude: Vec<&Path> = unknown.iter().map(PathBuf::as_path).collect();
    let mut corpus = args.load(config, &exclude)?;

    for path in unknown {
        let query = loader::load_document(path)
            .with_context(|| format!("loading unknown document {}", path.display()))?;
        let hits = corpus.identify_with(&query, config.template_size, config.top_matches, &algorithm)?;
        info!(unknown = %query.id(), best = ?hits.best().map(|hit| &hit.key), "identified");

        if args.json {
            let out = Identification {
                unknown: query.id().to_string(),
                matches: &hits,
            };
            println!("{}", serde_json::to_string(&out)?);
        } else {
            println!("{} is closest to:", query.id());
            print!("{hits}");
        }
    }
    Ok(())
}

fn run_template(args: &CorpusArgs, config: &AnalysisConfig) -> Result<()> {
    let mut corpus = args.load(config, &[])?;
    corpus.create_vectors(config.template_size);

    let rows: Vec<TemplateRow> = corpus
        .template()
        .iter()
        .map(|term| TemplateRow {
            term,
            corpus_frequency: corpus.term_frequency().term_count(term),
            document_frequency: corpus.doc_frequency().term_count(term),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!(
            "template: {} of {} requested terms",
            rows.len(),
            corpus.template().requested()
        );
        for row in &rows {
            println!("{}\t{}\t{}", row.term, row.corpus_frequency, row.document_frequency);
        }
    }
    Ok(())
}

fn run_stats(args: &CorpusArgs, config: &AnalysisConfig, terms: usize) -> Result<()> {
    let mut corpus = args.load(config, &[])?;
    corpus.create_vectors(config.template_size);
    let stats = corpus.stats();
    let top = corpus.term_frequency().most_frequent_terms(terms);

    if args.json {
        let out = serde_json::json!({ "stats": stats, "top_terms": top });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("documents:    {}", stats.documents);
        println!("vocabulary:   {}", stats.vocabulary);
        println!("total terms:  {}", stats.total_terms);
        println!("template len: {}", stats.template_len);
        for (term, count) in &top {
            println!("{term}\t{count}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_identify() {
        let cli = Cli::try_parse_from([
            "authorship", "identify", "--corpus", "corpus", "-k", "35", "-j", "2", "u0.txt", "u1.txt",
        ])
        .unwrap();
        match cli.command {
            Command::Identify {
                corpus,
                top,
                algorithm,
                unknown,
            } => {
                assert_eq!(corpus.corpus, PathBuf::from("corpus"));
                assert_eq!(corpus.k, Some(35));
                assert_eq!(top, Some(2));
                assert_eq!(algorithm, Algorithm::Cosine);
                assert_eq!(unknown.len(), 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn identify_accepts_dot_algorithm() {
        let cli = Cli::try_parse_from([
            "authorship", "identify", "-c", "corpus", "--algorithm", "dot", "u0.txt",
        ])
        .unwrap();
        match cli.command {
            Command::Identify { algorithm, .. } => {
                assert_eq!(algorithm, Algorithm::Dot);
                assert_eq!(SimilarityAlgorithm::from(algorithm), SimilarityAlgorithm::Dot);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        let bad = Cli::try_parse_from([
            "authorship", "identify", "-c", "corpus", "--algorithm", "bm25", "u0.txt",
        ]);
        assert!(bad.is_err());
    }

    #[test]
    fn identify_requires_unknown_files() {
        let cli = Cli::try_parse_from(["authorship", "identify", "--corpus", "corpus"]);
        assert!(cli.is_err());
    }

    #[test]
    fn cli_parses_verbose_and_quiet() {
        let cli = Cli::try_parse_from(["authorship", "-vv", "stats", "--corpus", "c"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);

        let cli = Cli::try_parse_from(["authorship", "template", "-c", "c", "--quiet"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn corpus_args_override_config() {
        let args = CorpusArgs {
            corpus: PathBuf::from("c"),
            k: Some(7),
            extension: Some("text".to_string()),
            json: false,
        };
        let mut config = AnalysisConfig::default();
        args.apply(&mut config);
        assert_eq!(config.template_size, 7);
        assert_eq!(config.extension, "text");
        assert_eq!(config.top_matches, authorship::config::DEFAULT_TOP_MATCHES);
    }
}
