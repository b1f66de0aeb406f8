//! schema-introspect CLI - Dump a database schema
//!
//! Usage:
//!   schema-introspect dump [--connection <name>] [--format json|summary]
//!   schema-introspect dump --catalog <catalog.json> --dialect mysql
//!   schema-introspect check-config [--connection <name>]
//!
//! Connection settings come from introspect.toml, or from the DATABASE_*
//! environment variables when no connection is configured.

use clap::{Parser, Subcommand, ValueEnum};
use schema_introspect::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(name = "schema-introspect")]
#[command(about = "Reconstruct a typed schema and relationship graph from a database catalog")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the schema and print it
    Dump {
        /// Named connection from the settings file
        #[arg(short, long)]
        connection: Option<String>,

        /// Read the catalog from a JSON dump instead of a live database
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Dialect of the catalog dump
        #[arg(short, long, default_value = "mysql")]
        dialect: DialectArg,

        /// Extract a single table
        #[arg(short, long)]
        table: Option<String>,

        /// Extra tables to exclude
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Validate the connection configuration without connecting
    CheckConfig {
        /// Named connection from the settings file
        #[arg(short, long)]
        connection: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    Mysql,
    Postgres,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Mysql => Dialect::MySql,
            DialectArg::Postgres => Dialect::Postgres,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Plain-text outline
    Summary,
}

fn init_tracing(debug: bool) {
    let default = if debug { "schema_introspect=debug" } else { "schema_introspect=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::Dump {
            connection,
            catalog,
            dialect,
            table,
            exclude,
            format,
        } => cmd_dump(connection, catalog, dialect, table, exclude, format),
        Commands::CheckConfig { connection } => cmd_check_config(connection),
    }
}

/// Resolve a connection from the settings file, or the environment.
fn resolve_connection(
    settings: &Settings,
    name: Option<&str>,
) -> Result<ConnectionConfig, IntrospectError> {
    if let Some(name) = name {
        return Ok(settings.get_connection(name)?.to_config()?);
    }
    match settings.default_connection() {
        Some((name, conn)) => {
            debug!(connection = name, "using configured connection");
            Ok(conn.to_config()?)
        }
        None => Ok(ConnectionConfig::from_env()?),
    }
}

fn cmd_dump(
    connection: Option<String>,
    catalog: Option<PathBuf>,
    dialect: DialectArg,
    table: Option<String>,
    exclude: Vec<String>,
    format: OutputFormat,
) -> ExitCode {
    let result = match catalog {
        Some(path) => dump_from_file(&path, dialect.into(), table.as_deref(), &exclude),
        None => dump_from_database(connection.as_deref(), table.as_deref(), &exclude),
    };

    let schema = match result {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&schema) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing schema: {}", e);
                return ExitCode::FAILURE;
            }
        },
        OutputFormat::Summary => match schema.hand_to(&mut SummaryConsumer) {
            Ok(text) => print!("{}", text),
            Err(e) => {
                eprintln!("Error rendering summary: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }
    ExitCode::SUCCESS
}

fn dump_from_file(
    path: &std::path::Path,
    dialect: Dialect,
    table: Option<&str>,
    exclude: &[String],
) -> Result<Schema, IntrospectError> {
    let settings = Settings::load()?;
    let mut options = settings.introspection.to_options(dialect);
    for name in exclude {
        options.exclusions.insert_name(name);
    }

    let catalog = StaticCatalog::from_file(path)?;
    Ok(extract_schema(&catalog, dialect, &options, table)?)
}

fn dump_from_database(
    connection: Option<&str>,
    table: Option<&str>,
    exclude: &[String],
) -> Result<Schema, IntrospectError> {
    let settings = Settings::load()?;
    let config = resolve_connection(&settings, connection)?;

    let introspector = Introspector::connect(config, &settings)?;
    let mut options = introspector.options().clone();
    for name in exclude {
        options.exclusions.insert_name(name);
    }
    let introspector = introspector.with_options(options);

    match table {
        Some(table) => introspector.extract_table(table),
        None => introspector.extract_schema(),
    }
}

fn cmd_check_config(connection: Option<String>) -> ExitCode {
    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = match resolve_connection(&settings, connection.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    println!(
        "OK: {} {}@{}:{}/{} (namespace: {})",
        config.driver_name(),
        config.user,
        config.host,
        config.effective_port(),
        config.database,
        config.effective_schema()
    );
    match settings.worker_path() {
        Ok(Some(path)) => println!("Worker: {}", path.display()),
        Ok(None) => println!("Worker: not found (set worker.path)"),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
