use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use multi_classifier::document::DocumentReadError;
use multi_classifier::{AggregationPolicy, ClassifierConfig, ClassifierError, Document, MultiClassifier};

const EXIT_IO: u8 = 1;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    /// One `name: score` line per category, overall last
    #[default]
    Text,
    /// Full classification report as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "classify")]
#[command(about = "Score a document against several Bayes category models", long_about = None)]
#[command(version)]
struct Cli {
    /// Comma-separated category list (e.g. sports,politics)
    categories: String,

    /// Document file, read as UTF-8
    document: PathBuf,

    /// Unknown-terms probability applied to every category, in (0, 1)
    smoothing: Option<f64>,

    /// Directory holding <category>.bayes.json model files
    #[arg(long, default_value = ".")]
    model_dir: PathBuf,

    /// Overall score policy: max, average or weighted:<w1>,<w2>,...
    #[arg(long, default_value = "max")]
    policy: AggregationPolicy,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error(transparent)]
    Read(#[from] DocumentReadError),
    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Classifier(e) => e.exit_code() as u8,
            CliError::Read(DocumentReadError::Document(_)) => 3,
            CliError::Read(DocumentReadError::Io { .. }) | CliError::Render(_) => EXIT_IO,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let categories: Vec<&str> = cli.categories.split(',').map(str::trim).collect();
    let config = ClassifierConfig::v0()
        .with_base_path(cli.model_dir)
        .with_smoothing(cli.smoothing);

    let document = Document::from_path(&cli.document)?;
    tracing::debug!(source = %document.source, version = %document.version.as_str(), "loaded document");

    let classifier =
        MultiClassifier::with_config(&categories, &config)?.with_aggregator(cli.policy)?;
    let report = classifier.classify_document(&document)?;

    match cli.format {
        OutputFormat::Text => println!("{}", report.scores),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn main() -> ExitCode {
    // Usage errors exit with clap's status 2 after printing usage.
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("classify: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multi_classifier::classifier::{bayes::model_path, BayesModel};
    use multi_classifier::document::ParseError;
    use multi_classifier::scoring::AggregationError;
    use multi_classifier::types::CategoryName;
    use multi_classifier::TupleOrder;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("classify").chain(args.iter().copied()))
    }

    #[test]
    fn positional_arity_is_enforced() {
        let err = parse(&["sports"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);

        let err = parse(&["sports", "doc.txt", "0.1", "extra"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn two_or_three_positionals_are_accepted() {
        let cli = parse(&["sports,politics", "doc.txt"]).unwrap();
        assert_eq!(cli.categories, "sports,politics");
        assert_eq!(cli.document, PathBuf::from("doc.txt"));
        assert_eq!(cli.smoothing, None);
        assert_eq!(cli.policy, AggregationPolicy::Max);

        let cli = parse(&["sports", "doc.txt", "0.01", "--policy", "weighted:1,2"]).unwrap();
        assert_eq!(cli.smoothing, Some(0.01));
        assert_eq!(cli.policy, AggregationPolicy::WeightedSum(vec![1.0, 2.0]));
    }

    #[test]
    fn unknown_policy_is_a_usage_error() {
        let err = parse(&["sports", "doc.txt", "--policy", "median"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn exit_codes_follow_the_error_kind() {
        let undecodable = Document::ingest("doc", vec![0xE9]).unwrap_err();
        assert_eq!(CliError::Read(DocumentReadError::Document(undecodable)).exit_code(), 3);

        let io = DocumentReadError::Io {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(CliError::Read(io).exit_code(), EXIT_IO);

        let render = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(CliError::Render(render).exit_code(), EXIT_IO);

        let config = ClassifierError::Configuration("bad".into());
        assert_eq!(CliError::Classifier(config).exit_code(), 4);

        let reserved = ClassifierError::ReservedNameCollision {
            name: "OVERALL_SCORE".into(),
        };
        assert_eq!(CliError::Classifier(reserved).exit_code(), 4);

        let tokenizer = ClassifierError::Parse(ParseError::Tokenizer {
            order: TupleOrder::UNIGRAM,
            message: "boom".into(),
        });
        assert_eq!(CliError::Classifier(tokenizer).exit_code(), 3);

        let aggregation = ClassifierError::Aggregation(AggregationError::EmptyInput);
        assert_eq!(CliError::Classifier(aggregation).exit_code(), 5);
    }

    fn write_model(dir: &std::path::Path, category: &str) {
        let model = BayesModel {
            category: category.to_string(),
            max_tuple: 1,
            unknown_terms_probability: 0.5,
            probabilities: [("goal".to_string(), 0.9)].into_iter().collect(),
        };
        let path = model_path(dir, &CategoryName::new(category).unwrap());
        std::fs::write(path, serde_json::to_vec(&model).unwrap()).unwrap();
    }

    #[test]
    fn run_scores_a_document_and_maps_failures() {
        let dir = tempdir().unwrap();
        write_model(dir.path(), "sports");
        write_model(dir.path(), "politics");
        let doc = dir.path().join("doc.txt");
        std::fs::write(&doc, "goal").unwrap();

        let model_dir = dir.path().to_str().unwrap();
        let doc_arg = doc.to_str().unwrap();
        let base = ["sports, politics", doc_arg, "--model-dir", model_dir];

        assert!(run(parse(&base).unwrap()).is_ok());

        let mut json = base.to_vec();
        json.extend(["--format", "json"]);
        assert!(run(parse(&json).unwrap()).is_ok());

        let mut weighted = base.to_vec();
        weighted.extend(["--policy", "weighted:1"]);
        let err = run(parse(&weighted).unwrap()).unwrap_err();
        assert!(matches!(err, CliError::Classifier(ClassifierError::Configuration(_))));
        assert_eq!(err.exit_code(), 4);

        let missing = dir.path().join("missing.txt");
        let err = run(parse(&["sports", missing.to_str().unwrap(), "--model-dir", model_dir])
            .unwrap())
        .unwrap_err();
        assert_eq!(err.exit_code(), EXIT_IO);

        std::fs::write(&doc, [0xE9u8]).unwrap();
        let err = run(parse(&base).unwrap()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
