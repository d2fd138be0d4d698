//! Interface de linha de comando do querybind.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::sql::Dialect;
use crate::types::config::CONFIG_FILE;

/// querybind - compila documentos de consulta em SQL.
#[derive(Parser, Debug)]
#[command(name = "querybind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inicializa configuração no diretório atual.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Compila um documento de consulta em SQL.
    Compile {
        /// Documento JSON ou TOML.
        document: PathBuf,

        /// Dialeto (padrão: o da configuração).
        #[arg(short, long)]
        dialect: Option<Dialect>,

        /// Embute os parâmetros como literais.
        #[arg(short, long)]
        literal: bool,

        /// Saída em JSON (`sql` e `params`).
        #[arg(long)]
        json: bool,
    },

    /// Mostra o DDL da tabela de um documento.
    Schema {
        /// Documento JSON ou TOML.
        document: PathBuf,

        /// Dialeto (padrão: o da configuração).
        #[arg(short, long)]
        dialect: Option<Dialect>,
    },

    /// Executa um documento de consulta em um banco SQLite.
    #[cfg(feature = "sqlite")]
    Query {
        /// Documento JSON ou TOML.
        document: PathBuf,

        /// Arquivo do banco SQLite.
        #[arg(long)]
        db: PathBuf,
    },

    /// Mostra versão.
    Version,
}
