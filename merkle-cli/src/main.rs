//! Merkle Tree Command Line Tool
//!
//! Subcommands:
//! 1. root    - build a tree from a leaf file and print the root
//! 2. prove   - write a JSON proof document for one leaf
//! 3. verify  - check a proof document against a root, without the tree
//! 4. inspect - print every level of the tree

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use merkle_cli::config;
use merkle_cli::types::{CliConfig, HashAlgorithm, LeafSelector, ProofDocument};
use merkle_cli::{commands, leaves};
use merkle_core::Digest;

/// Binary hash tree builder, prover and verifier
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "merkle.toml", global = true)]
    config: PathBuf,

    /// Load configuration from MERKLE_* environment variables instead of a file
    #[arg(long, default_value_t = false, global = true)]
    from_env: bool,

    /// Hash algorithm (overrides config file)
    #[arg(long, value_enum, global = true)]
    algorithm: Option<HashAlgorithm>,

    /// Pretty-print JSON output (overrides config file)
    #[arg(long, default_value_t = false, global = true)]
    pretty: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the tree and print its root
    Root {
        /// Leaf file, one leaf per line
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Generate a proof document for one leaf
    Prove {
        /// Leaf file, one leaf per line
        #[arg(short, long)]
        input: PathBuf,

        /// Leaf index (0-based)
        #[arg(long, conflicts_with = "leaf", required_unless_present = "leaf")]
        index: Option<usize>,

        /// Leaf value (first matching leaf)
        #[arg(long)]
        leaf: Option<String>,

        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify a proof document
    Verify {
        /// Proof document path
        #[arg(short, long)]
        proof: PathBuf,

        /// Leaf value (overrides the document)
        #[arg(long)]
        leaf: Option<String>,

        /// Claimed root as hex (overrides the document)
        #[arg(long)]
        root: Option<String>,
    },

    /// Print every level of the tree
    Inspect {
        /// Leaf file, one leaf per line
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Initialize logging
    init_logging(&args.log_level)?;

    // 2. Load configuration
    let mut config = load_configuration(&args.config, args.from_env)?;

    // Command line arguments override config file
    if let Some(algorithm) = args.algorithm {
        config.hash_algorithm = algorithm;
    }
    if args.pretty {
        config.pretty_json = true;
    }

    info!("Hash algorithm: {}", config.hash_algorithm);

    // 3. Run subcommand
    match args.command {
        Command::Root { input } => run_root(&config, &input),
        Command::Prove {
            input,
            index,
            leaf,
            output,
        } => {
            let selector = match (index, leaf) {
                (Some(index), _) => LeafSelector::Index(index),
                (None, Some(leaf)) => LeafSelector::Value(leaf),
                (None, None) => anyhow::bail!("Either --index or --leaf is required"),
            };
            run_prove(&config, &input, &selector, output.as_deref())
        }
        Command::Verify { proof, leaf, root } => {
            let is_valid = run_verify(&proof, leaf.as_deref(), root.as_deref())?;
            let code = verify_exit_code(is_valid);
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Command::Inspect { input } => run_inspect(&config, &input),
    }
}

/// Initialize logging system
///
/// Logs go to stderr so stdout carries only command output.
fn init_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => {
            eprintln!("Unknown log level: {}, using INFO", log_level);
            tracing::Level::INFO
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

/// Load configuration file
fn load_configuration(config_path: &Path, from_env: bool) -> Result<CliConfig> {
    if from_env {
        info!("Loading configuration from {}_* environment variables", config::ENV_PREFIX);
        return config::load_config_from_env().context("Failed to load configuration from env");
    }

    if !config_path.exists() {
        warn!(
            "Configuration file {} does not exist, using defaults and {}_* environment variables",
            config_path.display(),
            config::ENV_PREFIX
        );
        return config::load_config_from_env().context("Failed to load configuration from env");
    }

    info!("Loading configuration: {}", config_path.display());
    config::load_config(config_path).context("Failed to load configuration")
}

fn run_root(config: &CliConfig, input: &Path) -> Result<()> {
    let leaves = leaves::read_leaves(input, config)?;
    let summary = commands::summarize(&leaves, config.hash_algorithm)
        .context("Failed to build Merkle tree")?;

    println!("{}", summary.root);
    info!("Leaves: {}, depth: {}", summary.leaf_count, summary.depth);

    Ok(())
}

fn run_prove(
    config: &CliConfig,
    input: &Path,
    selector: &LeafSelector,
    output: Option<&Path>,
) -> Result<()> {
    let leaves = leaves::read_leaves(input, config)?;
    let document = commands::prove(&leaves, config.hash_algorithm, selector)
        .with_context(|| format!("Failed to generate proof for {:?}", selector))?;

    match output {
        Some(path) => document.export_json(path, config.pretty_json)?,
        None => println!("{}", document.to_json(config.pretty_json)?),
    }

    Ok(())
}

/// Process exit code for a verification result
fn verify_exit_code(is_valid: bool) -> i32 {
    if is_valid {
        0
    } else {
        1
    }
}

fn run_verify(proof_path: &Path, leaf: Option<&str>, root: Option<&str>) -> Result<bool> {
    let document = ProofDocument::load_json(proof_path).context("Failed to load proof document")?;

    let root = match root {
        Some(hex) => Digest::from_hex(hex).context("Invalid --root value")?,
        None => document.root,
    };
    let leaf = leaf.unwrap_or(document.leaf.as_str());

    let is_valid = commands::verify(leaf, &document, &root);

    if is_valid {
        println!("VALID");
    } else {
        error!("Leaf {:?} is not proven by {}", leaf, proof_path.display());
        println!("INVALID");
    }

    Ok(is_valid)
}

fn run_inspect(config: &CliConfig, input: &Path) -> Result<()> {
    let leaves = leaves::read_leaves(input, config)?;
    let levels = commands::inspect(&leaves, config.hash_algorithm)
        .context("Failed to build Merkle tree")?;

    for (height, level) in levels.iter().enumerate() {
        println!("level {} ({} nodes)", height, level.len());
        for (index, digest) in level.iter().enumerate() {
            println!("  [{}] {}", index, digest);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn write_document(dir: &Path) -> PathBuf {
        let leaves: Vec<String> = vec!["apple".into(), "banana".into(), "cherry".into()];
        let document =
            commands::prove(&leaves, HashAlgorithm::Sha256, &LeafSelector::Index(2)).unwrap();

        let path = dir.join("cherry.json");
        document.export_json(&path, false).unwrap();
        path
    }

    #[test]
    fn test_prove_index_conflicts_with_leaf() {
        let result = Args::try_parse_from([
            "merkle", "prove", "--input", "leaves.txt", "--index", "0", "--leaf", "apple",
        ]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_prove_requires_index_or_leaf() {
        let result = Args::try_parse_from(["merkle", "prove", "--input", "leaves.txt"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_prove_by_leaf_parses() {
        let args = Args::try_parse_from([
            "merkle", "prove", "-i", "leaves.txt", "--leaf", "apple", "--algorithm", "sha3-256",
        ])
        .unwrap();

        assert_eq!(args.algorithm, Some(HashAlgorithm::Sha3_256));
        match args.command {
            Command::Prove { index, leaf, .. } => {
                assert_eq!(index, None);
                assert_eq!(leaf.as_deref(), Some("apple"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let result =
            Args::try_parse_from(["merkle", "root", "--input", "leaves.txt", "--algorithm", "md5"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "merkle", "verify", "--proof", "p.json", "--pretty", "--log-level", "debug",
        ])
        .unwrap();

        assert!(args.pretty);
        assert_eq!(args.log_level, "debug");
        assert!(matches!(args.command, Command::Verify { leaf: None, root: None, .. }));
    }

    #[test]
    fn test_verify_valid_document_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(dir.path());

        let is_valid = run_verify(&path, None, None).unwrap();
        assert!(is_valid);
        assert_eq!(verify_exit_code(is_valid), 0);
    }

    #[test]
    fn test_verify_tampered_leaf_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(dir.path());

        let is_valid = run_verify(&path, Some("cherries"), None).unwrap();
        assert!(!is_valid);
        assert_eq!(verify_exit_code(is_valid), 1);
    }

    #[test]
    fn test_verify_wrong_root_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(dir.path());

        let is_valid = run_verify(&path, None, Some(&"00".repeat(32))).unwrap();
        assert_eq!(verify_exit_code(is_valid), 1);
    }

    #[test]
    fn test_verify_malformed_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(dir.path());

        assert!(run_verify(&path, None, Some("abcd")).is_err());
    }

    #[test]
    fn test_missing_config_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_configuration(&dir.path().join("absent.toml"), false).unwrap();

        assert!(config.max_leaves > 0);
    }
}
