//! KeyMix Harness CLI
//!
//! A command-line tool for hashing with KeyMix and measuring its quality.
//!
//! # Commands
//!
//! - `hash` - Print the digest of an input
//! - `analyze` - Run avalanche, diffusion, collision and preimage measurements
//! - `list` - Show the registered hash functions
//! - `benchmark` - Run performance benchmark

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use keymix::config::HarnessConfig;
use keymix::registry::{Registry, DEFAULT_MODULE};
use keymix::report::{OutputEncoding, OutputFormat, Report};
use keymix::{Key, KeyedHash};

#[derive(Parser)]
#[command(name = "keymix")]
#[command(author = "KeyMix Contributors")]
#[command(version)]
#[command(about = "Statistical quality harness for the KeyMix keyed mixing hash")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Registry module providing the hash function
    #[arg(long, global = true, default_value = DEFAULT_MODULE)]
    module: String,

    /// Exported function name (default: `default`, then `hash`)
    #[arg(long, global = true)]
    function: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// JSON file with harness settings (flags override it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the digest of an input
    Hash {
        /// Input text
        #[arg(long, required_unless_present = "input_hex", conflicts_with = "input_hex")]
        input: Option<String>,

        /// Input bytes as hex
        #[arg(long)]
        input_hex: Option<String>,

        /// Key text (default: the testing key)
        #[arg(short, long)]
        key: Option<String>,

        /// Digest encoding
        #[arg(long, value_enum, default_value_t = OutputEncoding::Hex)]
        encoding: OutputEncoding,
    },

    /// Run all quality measurements against one input
    Analyze {
        /// Input text
        #[arg(short, long)]
        input: String,

        /// Testing key
        #[arg(short, long)]
        key: Option<String>,

        /// Collision samples and preimage attempts
        #[arg(short, long)]
        count: Option<u64>,

        /// Avalanche and diffusion trials
        #[arg(short, long)]
        trials: Option<usize>,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Bytes per random collision sample
        #[arg(long)]
        sample_len: Option<usize>,
    },

    /// List registered hash functions
    List,

    /// Run performance benchmark
    Benchmark {
        /// Number of hashes to compute
        #[arg(short, long, default_value = "100000")]
        count: u32,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let registry = Registry::builtin();

    let result = match cli.command {
        Commands::Hash {
            ref input,
            ref input_hex,
            ref key,
            encoding,
        } => cmd_hash(
            &cli,
            &registry,
            input.as_deref(),
            input_hex.as_deref(),
            key.as_deref(),
            encoding,
        ),
        Commands::Analyze {
            ref input,
            ref key,
            count,
            trials,
            seed,
            sample_len,
        } => build_harness_config(
            cli.config.as_deref(),
            key.as_deref(),
            count,
            trials,
            seed,
            sample_len,
        )
        .and_then(|config| cmd_analyze(&cli, &registry, input, &config)),
        Commands::List => cmd_list(&registry, cli.format),
        Commands::Benchmark { count } => cmd_benchmark(&cli, &registry, count),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Build harness config from an optional file and CLI overrides
fn build_harness_config(
    path: Option<&Path>,
    key: Option<&str>,
    count: Option<u64>,
    trials: Option<usize>,
    seed: Option<u64>,
    sample_len: Option<usize>,
) -> anyhow::Result<HarnessConfig> {
    let mut config = match path {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };
    if let Some(key) = key {
        config.key = key.to_string();
    }
    if let Some(count) = count {
        config.iterations = count;
    }
    if let Some(trials) = trials {
        config.trials = trials;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    if let Some(sample_len) = sample_len {
        config.sample_len = sample_len;
    }
    Ok(config)
}

fn cmd_hash(
    cli: &Cli,
    registry: &Registry,
    input: Option<&str>,
    input_hex: Option<&str>,
    key: Option<&str>,
    encoding: OutputEncoding,
) -> anyhow::Result<()> {
    let config = build_harness_config(cli.config.as_deref(), key, None, None, None, None)?;
    let resolved = registry.resolve(&cli.module, cli.function.as_deref())?;

    let input = match (input, input_hex) {
        (Some(text), _) => text.as_bytes().to_vec(),
        (None, Some(hex_input)) => hex::decode(hex_input).context("invalid --input-hex")?,
        (None, None) => anyhow::bail!("either --input or --input-hex is required"),
    };
    let key = Key::new(config.key.as_bytes())?;
    let digest = resolved.function.hash(&input, &key);

    let mut stdout = std::io::stdout();
    match cli.format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "function": resolved.qualified_name(),
                "input_len": input.len(),
                "digest": hex::encode(digest),
            });
            writeln!(stdout, "{}", serde_json::to_string_pretty(&value)?)?;
        }
        OutputFormat::Text => {
            stdout.write_all(&encoding.encode(&digest))?;
            if encoding == OutputEncoding::Hex {
                writeln!(stdout)?;
            }
        }
    }
    stdout.flush()?;

    Ok(())
}

fn cmd_analyze(
    cli: &Cli,
    registry: &Registry,
    input: &str,
    config: &HarnessConfig,
) -> anyhow::Result<()> {
    let resolved = registry.resolve(&cli.module, cli.function.as_deref())?;
    let harness = config.harness(&*resolved.function)?;
    let function = resolved.qualified_name();

    info!(
        function = %function,
        seed = harness.seed(),
        trials = config.trials,
        iterations = config.iterations,
        "running analysis"
    );

    let report = Report::run(
        &harness,
        &function,
        input.as_bytes(),
        config.trials,
        config.iterations,
    );
    println!("{}", report.render(cli.format)?);

    Ok(())
}

fn cmd_list(registry: &Registry, format: OutputFormat) -> anyhow::Result<()> {
    let names: Vec<String> = registry
        .entries()
        .map(|(module, export)| format!("{}::{}", module, export))
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&names)?),
        OutputFormat::Text => {
            for name in names {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

fn cmd_benchmark(cli: &Cli, registry: &Registry, count: u32) -> anyhow::Result<()> {
    let resolved = registry.resolve(&cli.module, cli.function.as_deref())?;
    let key = Key::new("benchmark-key")?;

    println!(
        "Running benchmark of {} with {} hashes...",
        resolved.qualified_name(),
        count
    );

    let mut input = b"benchmark input data for KeyMix".to_vec();
    let prefix = input.len();
    input.extend_from_slice(&0u32.to_le_bytes());

    let start = Instant::now();

    for i in 0..count {
        input[prefix..].copy_from_slice(&i.to_le_bytes());
        let _ = resolved.function.hash(&input, &key);
    }

    let elapsed = start.elapsed();
    let hashrate = count as f64 / elapsed.as_secs_f64();

    println!("\nResults:");
    println!("  Total hashes: {}", count);
    println!("  Input size: {} bytes", input.len());
    println!("  Time elapsed: {:.2}s", elapsed.as_secs_f64());
    println!("  Hashrate: {:.2} H/s", hashrate);

    println!("\nAlgorithm parameters:");
    println!("  State words: {}", keymix::algorithm::STATE_WORDS);
    println!("  Digest size: {} bytes", keymix::algorithm::DIGEST_SIZE);
    println!("  Rounds per byte: {}", keymix::algorithm::ROUNDS_PER_BYTE);

    Ok(())
}
