mod config;
mod format;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rtkit_collections::{Builtin, CollectionKind, Value, construct};
use rtkit_math::{MathConstant, MathFunction, MathRandom};
use serde::Serialize;

use crate::config::Config;
use crate::format::format_number;

#[derive(Parser)]
#[command(name = "rtkit", about = "Runtime numeric builtins and ordered collections")]
struct Cli {
    /// TOML config file (defaults to $RTKIT_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a Math function
    Math {
        /// Function name, e.g. `hypot`
        function: String,

        /// Arguments; JSON literals, anything else is a string
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the Math constants
    Constants,

    /// Draw from the Math.random generator
    Random {
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Use a fresh generator with this seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Build a Set from a JSON iterable and query it
    Set {
        /// JSON source, e.g. `[1,2,2,3]`
        source: String,

        #[arg(long = "has", allow_hyphen_values = true)]
        has: Vec<String>,

        #[arg(long = "delete", allow_hyphen_values = true)]
        delete: Vec<String>,
    },

    /// Build a Map from JSON `[key, value]` pairs and query it
    Map {
        /// JSON source, e.g. `[["a",1],["b",2]]`
        source: String,

        #[arg(long = "get", allow_hyphen_values = true)]
        get: Vec<String>,

        #[arg(long = "has", allow_hyphen_values = true)]
        has: Vec<String>,

        #[arg(long = "delete", allow_hyphen_values = true)]
        delete: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::resolve(cli.config.as_deref())?;
    if let Some(seed) = config.random.seed {
        rtkit_math::seed_random(seed);
    }

    match &cli.command {
        Commands::Math { function, args } => cmd_math(function, args),
        Commands::Constants => cmd_constants(),
        Commands::Random { count, seed } => cmd_random(*count, *seed),
        Commands::Set {
            source,
            has,
            delete,
        } => cmd_set(&config, source, has, delete),
        Commands::Map {
            source,
            get,
            has,
            delete,
        } => cmd_map(&config, source, get, has, delete),
    }
}

/// JSON literal if it parses, otherwise the raw text as a string.
fn parse_arg(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_owned()))
}

fn cmd_math(function: &str, args: &[String]) -> Result<()> {
    let function: MathFunction = function.parse()?;
    let args: Vec<serde_json::Value> = args.iter().map(|a| parse_arg(a)).collect();
    let result = function
        .call(args.as_slice())
        .with_context(|| format!("Math.{function} failed"))?;
    println!("{}", format_number(result));
    Ok(())
}

fn cmd_constants() -> Result<()> {
    for constant in MathConstant::ALL {
        println!("{:<8}= {}", constant.name(), format_number(constant.value()));
    }
    Ok(())
}

fn cmd_random(count: usize, seed: Option<u64>) -> Result<()> {
    let mut local = seed.map(MathRandom::seed_from_u64);
    for _ in 0..count {
        let n = match local.as_mut() {
            Some(rng) => rng.next_f64(),
            None => rtkit_math::random(),
        };
        println!("{}", format_number(n));
    }
    Ok(())
}

#[derive(Serialize)]
struct QueryResult {
    key: serde_json::Value,
    result: serde_json::Value,
}

#[derive(Serialize)]
struct CollectionReport {
    size: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    get: Vec<QueryResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    has: Vec<QueryResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    delete: Vec<QueryResult>,
    contents: serde_json::Value,
}

fn build(kind: CollectionKind, source: &str) -> Result<Value> {
    let json: serde_json::Value =
        serde_json::from_str(source).context("source is not valid JSON")?;
    construct(kind, &Value::from(&json))
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("failed to construct {}", kind.name()))
}

/// Applies `method` to each key and records the results.
fn run_queries(instance: &Value, method: Builtin, keys: &[String]) -> Result<Vec<QueryResult>> {
    keys.iter()
        .map(|raw| {
            let key = parse_arg(raw);
            let result = method
                .call(instance, &[Value::from(&key)])
                .map_err(|e| anyhow!("{e}"))?;
            Ok(QueryResult {
                key,
                result: result.to_json(),
            })
        })
        .collect()
}

fn report(
    config: &Config,
    instance: &Value,
    size: Builtin,
    [get, has, delete]: [Vec<QueryResult>; 3],
) -> Result<()> {
    let size = size
        .call(instance, &[])
        .map_err(|e| anyhow!("{e}"))?
        .as_number()
        .context("size is not a number")? as usize;
    let report = CollectionReport {
        size,
        get,
        has,
        delete,
        contents: instance.to_json(),
    };
    let out = if config.output.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{out}");
    Ok(())
}

fn cmd_set(config: &Config, source: &str, has: &[String], delete: &[String]) -> Result<()> {
    let set = build(CollectionKind::Set, source)?;
    let has = run_queries(&set, Builtin::SetHas, has)?;
    let delete = run_queries(&set, Builtin::SetDelete, delete)?;
    report(config, &set, Builtin::SetSize, [Vec::new(), has, delete])
}

fn cmd_map(
    config: &Config,
    source: &str,
    get: &[String],
    has: &[String],
    delete: &[String],
) -> Result<()> {
    let map = build(CollectionKind::Map, source)?;
    let get = run_queries(&map, Builtin::MapGet, get)?;
    let has = run_queries(&map, Builtin::MapHas, has)?;
    let delete = run_queries(&map, Builtin::MapDelete, delete)?;
    report(config, &map, Builtin::MapSize, [get, has, delete])
}
