use std::path::PathBuf;
use std::process::ExitCode;

use axum::http::header::{ACCEPT_LANGUAGE, COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use clap::{Parser, Subcommand};

use edge_gate::config::{load_config, ConfigError, GatewayConfig};
use edge_gate::locale::LocaleResolver;
use edge_gate::routing::{is_canonical, Classification, RouteClassifier};
use edge_gate::Pipeline;

#[derive(Parser)]
#[command(name = "edge-cli")]
#[command(about = "Inspect how the edge gateway treats a request", long_about = None)]
struct Cli {
    /// Gateway configuration file; built-in defaults when omitted
    #[arg(short, long, env = "EDGE_GATE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether a path is public or protected
    Classify { path: String },
    /// Resolve the locale for the given request headers
    Resolve {
        #[arg(long)]
        accept_language: Option<String>,
        /// Raw Cookie header value, e.g. "NEXT_LOCALE=es"
        #[arg(long)]
        cookie: Option<String>,
    },
    /// Validate the config and load message bundles
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load(cli.config.as_deref())?;

    match cli.command {
        Commands::Classify { path } => {
            let resolver = LocaleResolver::from_config(&config.locale)?;
            let classifier = RouteClassifier::from_config(&config.routes, resolver.locales())?;
            if !is_canonical(&path) {
                println!("invalid (non-canonical path, answered with 400)");
                return Ok(());
            }
            match classifier.classify(&path) {
                Classification::Public(pattern) => println!("public ({pattern})"),
                Classification::Protected => println!("protected"),
            }
        }
        Commands::Resolve {
            accept_language,
            cookie,
        } => {
            let resolver = LocaleResolver::from_config(&config.locale)?;
            let mut headers = HeaderMap::new();
            if let Some(value) = accept_language {
                headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&value)?);
            }
            if let Some(value) = cookie {
                headers.insert(COOKIE, HeaderValue::from_str(&value)?);
            }

            let resolution = resolver.resolve(&headers);
            println!("locale: {}", resolution.locale);
            println!("source: {}", resolution.source.as_str());
            if resolution.needs_cookie() {
                let value = resolver.cookie().set_cookie(&resolution.locale)?;
                println!("set-cookie: {}", value.to_str()?);
            } else {
                println!("set-cookie: (none)");
            }
        }
        Commands::Check => {
            let pipeline = Pipeline::from_config(&config)?;
            println!("config ok");
            println!("public patterns: {}", pipeline.classifier().patterns().len());
            println!("locales: {}", pipeline.resolver().locales().len());
            println!("bundles: {}", pipeline.bundles().map_or(0, |b| b.len()));
        }
    }

    Ok(())
}

fn load(path: Option<&std::path::Path>) -> Result<GatewayConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(GatewayConfig::default()),
    }
}
