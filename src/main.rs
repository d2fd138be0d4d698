use clap::Parser;
use querybind::cli::{Cli, Commands};
use querybind::types::config::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = if cli.config.exists() {
        Config::load(&cli.config).unwrap_or_default()
    } else {
        Config::default()
    };

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("querybind={}", log_level)
            .parse()
            .unwrap_or_else(|_| "querybind=info".parse().expect("fallback directive is valid")),
    );

    let json_logs = config.general.log_format == "json";
    tracing_subscriber::registry()
        .with(json_logs.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json_logs).then(|| fmt::layer().with_writer(std::io::stderr)))
        .with(filter)
        .init();

    tracing::debug!("Configuration loaded from: {}", cli.config.display());
    querybind::configure(&config);

    match cli.command {
        Commands::Init { path } => {
            querybind::cli::commands::init(path)?;
        }
        Commands::Compile {
            document,
            dialect,
            literal,
            json,
        } => {
            querybind::cli::commands::compile(&document, dialect, literal, json, &config)?;
        }
        Commands::Schema { document, dialect } => {
            querybind::cli::commands::schema(&document, dialect, &config)?;
        }
        #[cfg(feature = "sqlite")]
        Commands::Query { document, db } => {
            querybind::cli::commands::query(&document, &db)?;
        }
        Commands::Version => {
            querybind::cli::commands::version();
        }
    }

    Ok(())
}
