//! Instrução `SELECT`.

use serde::{Deserialize, Serialize};

use crate::mapper::Table;
use crate::types::errors::{QueryError, QueryResult};

use super::condition::{CompareOp, Condition};
use super::expr::{Column, Expr};
use super::writer::{compile, compile_literal, Compiled, SqlFragment, SqlWriter};
use super::Dialect;

/// Direção de ordenação.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    fn as_sql(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// Tipo de junção.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    LeftOuter,
}

/// Junção com outra tabela.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub table: Table,
    pub on: Condition,
    pub kind: JoinKind,
}

/// Item de `ORDER BY`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub expr: Expr,
    pub direction: OrderDirection,
}

/// Consulta `SELECT` sobre uma ou mais entidades.
///
/// A primeira entidade é o mapper principal: é contra ela que ordenação e
/// paginação resolvem seus campos.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    entities: Vec<Table>,
    joins: Vec<Join>,
    filters: Vec<Condition>,
    ordering: Vec<OrderItem>,
    limit: Option<u64>,
    offset: Option<u64>,
}

/// Inicia um `SELECT` sobre `table`.
pub fn select(table: &Table) -> Select {
    Select {
        entities: vec![table.clone()],
        joins: Vec::new(),
        filters: Vec::new(),
        ordering: Vec::new(),
        limit: None,
        offset: None,
    }
}

impl Select {
    /// Adiciona outra entidade à lista de colunas.
    pub fn also(mut self, table: &Table) -> Self {
        self.entities.push(table.clone());
        self
    }

    /// Mapper principal.
    pub fn primary(&self) -> &Table {
        &self.entities[0]
    }

    /// Adiciona um filtro; filtros múltiplos são combinados com `AND`.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.filters.push(condition);
        self
    }

    /// Adiciona um item de ordenação.
    pub fn order_by(mut self, expr: impl Into<Expr>, direction: OrderDirection) -> Self {
        self.ordering.push(OrderItem {
            expr: expr.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Junção explícita.
    pub fn join_on(mut self, table: &Table, on: Condition, kind: JoinKind) -> Self {
        self.joins.push(Join {
            table: table.clone(),
            on,
            kind,
        });
        self
    }

    /// `LEFT OUTER JOIN` pela relação `relation` do mapper principal.
    pub fn outer_join(self, relation: &str) -> QueryResult<Self> {
        let primary = self.primary();
        let rel = primary
            .get_relation(relation)
            .ok_or_else(|| QueryError::field_not_found(relation, primary.name()))?;

        let on = Condition::compare(
            Column::new(primary.name(), rel.local.clone()),
            CompareOp::Eq,
            Column::new(rel.target.name(), rel.remote.clone()),
        );
        let target = rel.target.as_ref().clone();
        Ok(self.join_on(&target, on, JoinKind::LeftOuter))
    }

    pub fn filters(&self) -> &[Condition] {
        &self.filters
    }

    pub fn ordering(&self) -> &[OrderItem] {
        &self.ordering
    }

    pub fn get_limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn get_offset(&self) -> Option<u64> {
        self.offset
    }

    /// Compila com parâmetros vinculados.
    pub fn compile(&self, dialect: Dialect) -> Compiled {
        compile(self, dialect)
    }

    /// Compila com os valores embutidos.
    pub fn compile_literal(&self, dialect: Dialect) -> String {
        compile_literal(self, dialect)
    }
}

impl SqlFragment for Select {
    fn write_sql(&self, w: &mut SqlWriter) {
        w.push("SELECT ");
        let mut first = true;
        for entity in &self.entities {
            if entity.columns().is_empty() {
                if !first {
                    w.push(", ");
                }
                w.push_ident(entity.name());
                w.push(".*");
                first = false;
                continue;
            }
            for column in entity.qualified_columns() {
                if !first {
                    w.push(", ");
                }
                column.write_sql(w);
                first = false;
            }
        }

        w.push(" FROM ");
        w.push_ident(self.primary().name());
        for entity in self.entities.iter().skip(1) {
            w.push(", ");
            w.push_ident(entity.name());
        }

        for join in &self.joins {
            w.push(match join.kind {
                JoinKind::Inner => " JOIN ",
                JoinKind::LeftOuter => " LEFT OUTER JOIN ",
            });
            w.push_ident(join.table.name());
            w.push(" ON ");
            join.on.write_sql(w);
        }

        if !self.filters.is_empty() {
            w.push(" WHERE ");
            Condition::and(self.filters.iter().cloned()).write_sql(w);
        }

        if !self.ordering.is_empty() {
            w.push(" ORDER BY ");
            for (i, item) in self.ordering.iter().enumerate() {
                if i > 0 {
                    w.push(", ");
                }
                item.expr.write_sql(w);
                w.push(" ");
                w.push(item.direction.as_sql());
            }
        }

        match (self.limit, self.offset) {
            (Some(limit), _) => w.push(&format!(" LIMIT {limit}")),
            // SQLite exige LIMIT antes de OFFSET
            (None, Some(_)) if w.dialect() == Dialect::Sqlite => w.push(" LIMIT -1"),
            _ => {}
        }
        if let Some(offset) = self.offset {
            w.push(&format!(" OFFSET {offset}"));
        }
    }
}
