//! pg-introspect CLI - dump PostgreSQL catalog metadata as a code-generation model.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use pg_introspect::{introspect_database, CatalogInfo, Config, IntrospectError, PgExecutor, TracingSink};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "pg-introspect")]
#[command(about = "Read PostgreSQL catalog metadata into a code-generation model")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Introspect schemas and write the catalog model
    Dump {
        /// Schema to read; repeat to read several, in order (overrides config)
        #[arg(long = "schema")]
        schemas: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Test the database connection
    HealthCheck,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), IntrospectError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    let mut config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    match cli.command {
        Commands::Dump {
            schemas,
            format,
            output,
        } => {
            if !schemas.is_empty() {
                config.introspect.schemas = schemas;
            }

            // introspect_database validates the schema list before connecting
            let catalog = introspect_database(&config, Arc::new(TracingSink)).await?;
            let rendered = render(&catalog, format)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    info!("Wrote catalog model to {:?}", path);
                }
                None => println!("{}", rendered),
            }
        }
        Commands::HealthCheck => {
            PgExecutor::connect(&config.database).await?;
            println!("Connection OK: {}", config.database.display_target());
        }
    }

    Ok(())
}

fn render(catalog: &CatalogInfo, format: OutputFormat) -> Result<String, IntrospectError> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(catalog)?,
        OutputFormat::Yaml => serde_yaml::to_string(catalog)?,
    })
}

/// Install the tracing subscriber. Logs go to stderr so stdout carries only
/// the rendered model.
fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
