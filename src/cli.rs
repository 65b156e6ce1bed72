use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use exprset::store::FileWordStore;
use exprset::{
    AdmissionPolicy, ExpressionIndex, GeneratorConfig, OperatorTable, Solver, SolverConfig,
    StoreKind, validate_values,
};
use log::{info, warn};

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Where the generated expression set is kept
#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum StoreArg {
    Memory,
    Packed,
    External,
}

/// Exprset - Find arithmetic expressions over a set of values
#[derive(Parser, Debug)]
#[command(name = "exprset")]
#[command(about = "Find arithmetic expressions combining every value exactly once that equal a target")]
#[command(version)]
pub struct CliArgs {
    /// Values to combine, each used exactly once
    #[arg(required = true, allow_negative_numbers = true)]
    pub values: Vec<f64>,

    /// Target value to match
    #[arg(short, long, allow_negative_numbers = true)]
    pub target: f64,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Decimal places kept when comparing fingerprint values
    #[arg(long, default_value_t = AdmissionPolicy::default().rounding_digits)]
    pub rounding: u32,

    /// Number of random fingerprint vectors
    #[arg(long, default_value_t = AdmissionPolicy::default().fingerprints)]
    pub fingerprints: usize,

    /// Fingerprints under which a candidate must be new to be kept
    #[arg(long, default_value_t = AdmissionPolicy::default().threshold)]
    pub threshold: usize,

    /// Seed for the fingerprint vectors
    #[arg(long)]
    pub seed: Option<u64>,

    /// Backend for the generated expressions
    #[arg(long, value_enum, default_value = "memory")]
    pub store: StoreArg,

    /// Directory for the external store
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Stop collecting after this many solutions
    #[arg(long, default_value_t = SolverConfig::default().max_solutions)]
    pub max_solutions: usize,

    /// Print only the first solution
    #[arg(long)]
    pub first: bool,
}

/// Configuration for the CLI application
pub struct CliConfig {
    pub values: Vec<f64>,
    pub target: f64,
    pub log_level: LogLevel,
    pub generator: GeneratorConfig,
    pub solver: SolverConfig,
    pub first: bool,
}

/// Turn parsed arguments into a validated configuration
pub fn build_config(args: CliArgs) -> Result<CliConfig> {
    validate_values(&args.values, args.values.len()).context("Invalid values")?;

    let policy = AdmissionPolicy {
        fingerprints: args.fingerprints,
        threshold: args.threshold,
        rounding_digits: args.rounding,
        seed: args.seed,
    };
    policy.validate().context("Invalid admission policy")?;

    let store = match (args.store, args.cache_dir) {
        (StoreArg::Memory, _) => StoreKind::Memory,
        (StoreArg::Packed, _) => StoreKind::Packed,
        (StoreArg::External, Some(dir)) => StoreKind::External(dir),
        (StoreArg::External, None) => bail!("--store external requires --cache-dir"),
    };

    let generator = GeneratorConfig::new(args.values.len())
        .with_policy(policy)
        .with_store(store);
    let solver = SolverConfig {
        max_solutions: args.max_solutions,
        ..SolverConfig::default()
    };

    Ok(CliConfig {
        values: args.values,
        target: args.target,
        log_level: args.log_level,
        generator,
        solver,
        first: args.first,
    })
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<CliConfig> {
    build_config(CliArgs::parse())
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

fn build_index(config: &GeneratorConfig) -> Result<ExpressionIndex> {
    let ops = OperatorTable::default();
    let index = match &config.store {
        StoreKind::External(dir) => ExpressionIndex::load_or_generate(
            config,
            ops,
            FileWordStore::new(dir.clone(), config.num_values),
        ),
        _ => ExpressionIndex::generate(config, ops),
    };
    index.context("Failed to build the expression index")
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let config = parse_args()?;

    // Initialize logging
    init_logging(&config.log_level)?;

    info!(
        "Searching for expressions using values {:?} that equal {}",
        config.values, config.target
    );

    let index = build_index(&config.generator)?;
    let solver = Solver::new(index, config.solver);

    let solutions = if config.first {
        solver
            .find_first(&config.values, config.target)
            .context("Search failed")?
            .into_iter()
            .collect()
    } else {
        solver
            .find_all(&config.values, config.target)
            .context("Search failed")?
    };

    if solutions.is_empty() {
        warn!("No matching expression found");
        println!("Unknown.");
        return Ok(());
    }
    for solution in solutions {
        println!("{} = {}", solution, config.target);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("exprset").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = parse(&["3", "3", "8", "8", "--target", "24"]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert_eq!(args.values, vec![3.0, 3.0, 8.0, 8.0]);
            assert_eq!(args.target, 24.0);
            assert!(matches!(args.log_level, LogLevel::Warn));
            assert_eq!(args.store, StoreArg::Memory);
            assert_eq!(args.rounding, 5);
            assert_eq!(args.fingerprints, 3);
            assert_eq!(args.threshold, 2);
            assert_eq!(args.max_solutions, 200);
            assert!(!args.first);
        }
    }

    #[test]
    fn test_negative_numbers() {
        let args = parse(&["-2", "5", "-t", "-10"]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert_eq!(args.values, vec![-2.0, 5.0]);
            assert_eq!(args.target, -10.0);
        }
    }

    #[test]
    fn test_missing_target_or_values() {
        assert!(parse(&["1", "2"]).is_err());
        assert!(parse(&["--target", "3"]).is_err());
    }

    #[test]
    fn test_build_config() {
        let args = parse(&[
            "1", "2", "3", "-t", "6", "--seed", "9", "--fingerprints", "5", "--store", "packed",
            "--first",
        ]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            let config = build_config(args);
            assert!(config.is_ok());
            if let Ok(config) = config {
                assert_eq!(config.generator.num_values, 3);
                assert_eq!(config.generator.policy.seed, Some(9));
                assert_eq!(config.generator.policy.fingerprints, 5);
                assert_eq!(config.generator.store, StoreKind::Packed);
                assert!(config.first);
            }
        }
    }

    #[test]
    fn test_external_store_needs_cache_dir() {
        let without = parse(&["1", "2", "-t", "3", "--store", "external"]);
        assert!(without.is_ok());
        if let Ok(args) = without {
            assert!(build_config(args).is_err());
        }

        let with = parse(&[
            "1", "2", "-t", "3", "--store", "external", "--cache-dir", "/tmp/exprset",
        ]);
        assert!(with.is_ok());
        if let Ok(args) = with {
            let config = build_config(args);
            assert_eq!(
                config.map(|c| c.generator.store).ok(),
                Some(StoreKind::External(PathBuf::from("/tmp/exprset")))
            );
        }
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let args = parse(&["1", "2", "-t", "3", "--threshold", "4"]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert!(build_config(args).is_err());
        }
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            LogLevel::Error.to_log_level_filter(),
            log::LevelFilter::Error
        );
        assert_eq!(LogLevel::Warn.to_log_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_log_level_filter(), log::LevelFilter::Info);
        assert_eq!(
            LogLevel::Debug.to_log_level_filter(),
            log::LevelFilter::Debug
        );
        assert_eq!(
            LogLevel::Trace.to_log_level_filter(),
            log::LevelFilter::Trace
        );
    }
}
