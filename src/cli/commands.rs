//! Implementação dos comandos CLI do querybind.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::document::QueryDocument;
use crate::sql::Dialect;
use crate::types::config::{Config, CONFIG_FILE};

/// Initializes configuration in the specified directory.
pub fn init(path: Option<PathBuf>) -> anyhow::Result<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    // Create directory if it doesn't exist
    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)
            .with_context(|| format!("creating {}", target_dir.display()))?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join(CONFIG_FILE);

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    Config::default()
        .save(&config_path)
        .with_context(|| format!("writing {}", config_path.display()))?;

    println!("querybind initialized successfully!");
    println!("Configuration created at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Write a query document (JSON or TOML)");
    println!("  2. Compile it: querybind compile <document>");

    Ok(())
}

fn load_document(path: &Path) -> anyhow::Result<QueryDocument> {
    let document = QueryDocument::load(path)
        .with_context(|| format!("loading query document {}", path.display()))?;
    tracing::debug!("Document loaded from: {}", path.display());
    Ok(document)
}

/// Compiles a query document and prints the SQL.
pub fn compile(
    document: &Path,
    dialect: Option<Dialect>,
    literal: bool,
    json: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let dialect = dialect.unwrap_or(config.sql.dialect);
    let query = load_document(document)?
        .build()
        .context("building query")?;

    if literal {
        println!("{}", query.compile_literal(dialect));
        return Ok(());
    }

    let compiled = query.compile(dialect);
    if json {
        println!("{}", serde_json::to_string_pretty(&compiled)?);
    } else {
        println!("{}", compiled.sql);
        if !compiled.params.is_empty() {
            println!("-- params: {}", serde_json::to_string(&compiled.params)?);
        }
    }

    Ok(())
}

/// Prints the CREATE TABLE statements for the document's tables.
pub fn schema(document: &Path, dialect: Option<Dialect>, config: &Config) -> anyhow::Result<()> {
    let dialect = dialect.unwrap_or(config.sql.dialect);
    let table = load_document(document)?.table();

    // Related tables first so REFERENCES targets exist
    let mut pending = vec![&table];
    let mut ordered = Vec::new();
    while let Some(current) = pending.pop() {
        ordered.push(current);
        for (_, relation) in current.relations() {
            pending.push(relation.target.as_ref());
        }
    }
    for table in ordered.iter().rev() {
        println!("{}", table.create_sql(dialect));
    }

    Ok(())
}

/// Runs a query document against a SQLite database and prints rows as JSON lines.
#[cfg(feature = "sqlite")]
pub fn query(document: &Path, db: &Path) -> anyhow::Result<()> {
    use crate::sql::sqlite::fetch_all;

    let query = load_document(document)?
        .build()
        .context("building query")?;
    let conn = rusqlite::Connection::open(db)
        .with_context(|| format!("opening database {}", db.display()))?;

    let rows = fetch_all(&conn, &query).context("executing query")?;
    for row in &rows {
        println!("{}", serde_json::to_string(row)?);
    }
    tracing::info!("{} row(s) returned", rows.len());

    Ok(())
}

/// Shows the version.
pub fn version() {
    println!("querybind {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Declarative query clauses bound to table mappers");
}
