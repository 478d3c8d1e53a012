//! authz-eval - evaluate one request against the authorization chain
//!
//! Loads an engine configuration, builds the chain with the legacy
//! permission-map client and prints the decision as JSON.
//!
//! Exit codes: 0 allow, 1 deny or no opinion, 2 error.
//!
//! # Environment Variables
//!
//! - `AUTHZ_CONFIG`: configuration file when `--config` is omitted
//! - `AUTHZ_MODE`, `AUTHZ_FALLBACK_ROLE`, ...: overrides applied on top of
//!   the file (see `ConfigOverrides::from_env`)
//! - `RUST_LOG`: log filter, default `warn`

#![allow(missing_docs)]

use anyhow::{Context, Result};
use authz_engine::config::ConfigOverrides;
use authz_engine::{AuthzConfig, AuthzEngine, Decision, EvaluationRequest};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Evaluate one request against the authorization chain
#[derive(Parser, Debug)]
#[command(name = "authz-eval")]
#[command(version, about, long_about = None)]
struct Args {
    /// Engine configuration (YAML)
    #[arg(short, long, env = "AUTHZ_CONFIG")]
    config: Option<PathBuf>,

    /// Request description (YAML): identity plus request attributes
    #[arg(short, long)]
    request: PathBuf,

    /// Apply AUTHZ_* environment overrides on top of the config file
    #[arg(long)]
    env_overrides: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn load_config(args: &Args) -> Result<AuthzConfig> {
    let mut config = match &args.config {
        Some(path) => AuthzConfig::from_file(path)
            .await
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AuthzConfig::default(),
    };
    if args.env_overrides {
        config = config.apply(ConfigOverrides::from_env().context("reading AUTHZ_* overrides")?);
        config.validate()?;
    }
    Ok(config)
}

async fn run(args: Args) -> Result<Decision> {
    let config = load_config(&args).await?;
    let engine = AuthzEngine::from_config(&config)?;

    let raw = tokio::fs::read_to_string(&args.request)
        .await
        .with_context(|| format!("reading request {}", args.request.display()))?;
    let request: EvaluationRequest =
        serde_yaml::from_str(&raw).context("parsing request description")?;

    let (ctx, attrs) = request.into_parts();
    debug!(request_id = %ctx.request_id, "evaluating {} {}", attrs.verb, attrs.resource);

    let result = engine.authorize(&ctx, &attrs).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(result.decision)
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing(args.json_logs);

    match run(args).await {
        Ok(Decision::Allow) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
