//! Tipos de erro do querybind.

use thiserror::Error;

/// Tipo de resultado padrão do querybind.
pub type QueryResult<T> = Result<T, QueryError>;

/// Erros possíveis ao montar, vincular ou executar consultas.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Campo '{field}' não encontrado em '{mapper}'")]
    FieldNotFound { field: String, mapper: String },

    #[error("Operando inválido para '{comparator}': {reason}")]
    InvalidOperand { comparator: String, reason: String },

    #[error("Comparador desconhecido: '{0}'")]
    UnknownComparator(String),

    #[error("Valor inválido: {0}")]
    InvalidValue(String),

    #[error("Paginação inválida: {0}")]
    InvalidPagination(String),

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error("Erro do SQLite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("{0}")]
    Other(String),
}

impl QueryError {
    /// Cria um erro genérico.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Cria um erro de campo inexistente.
    pub fn field_not_found(field: impl Into<String>, mapper: impl Into<String>) -> Self {
        Self::FieldNotFound {
            field: field.into(),
            mapper: mapper.into(),
        }
    }

    /// Cria um erro de operando com formato incompatível com o comparador.
    pub fn invalid_operand(comparator: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidOperand {
            comparator: comparator.to_string(),
            reason: reason.into(),
        }
    }
}
