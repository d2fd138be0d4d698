//! Modelo serde dos documentos de consulta.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mapper::{ColumnType, Table};
use crate::query::{
    as_date, as_time, ApplyClause, ApplyWhere, BindClause, Comparator, GroupWhere, OrderBy,
    OrderDirection, Operator, Paginate, Where, DEFAULT_PAGINATION_FIELD,
};
use crate::sql::{select, Select};
use crate::types::errors::{QueryError, QueryResult};
use crate::types::value::Value;

/// Documento descrevendo uma consulta completa.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDocument {
    /// Tabela principal.
    pub table: TableSpec,

    /// Relações do mapper principal usadas em `LEFT OUTER JOIN`.
    #[serde(default)]
    pub outer_join: Vec<String>,

    /// Árvore de filtros.
    #[serde(default, rename = "where")]
    pub filter: Option<FilterNode>,

    /// Ordenação, aplicada na ordem declarada.
    #[serde(default)]
    pub order_by: Vec<OrderSpec>,

    /// Paginação.
    #[serde(default)]
    pub paginate: Option<PaginateSpec>,
}

/// Definição de tabela.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,

    #[serde(default)]
    pub columns: Vec<ColumnSpec>,

    /// Chave primária (padrão: `id`).
    #[serde(default)]
    pub primary_key: Option<String>,

    #[serde(default)]
    pub relations: Vec<RelationSpec>,
}

/// Definição de coluna.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,

    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
}

/// Definição de relação.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationSpec {
    pub name: String,
    pub table: TableSpec,
    pub local: String,
    pub remote: String,
}

/// Nó da árvore de filtros.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterNode {
    And { and: Vec<FilterNode> },
    Or { or: Vec<FilterNode> },
    Not { not: Box<FilterNode> },
    Leaf(WhereSpec),
}

/// Função aplicada à coluna antes da comparação.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Cast {
    Date,
    Time,
}

/// Filtro sobre um campo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhereSpec {
    pub field: String,

    /// Nome do comparador (padrão: `equals`).
    #[serde(default = "default_comp")]
    pub comp: String,

    /// Valor esperado; ausente ou `null` não filtra.
    #[serde(default)]
    pub value: Option<serde_json::Value>,

    /// Compara com outro campo em vez de um valor.
    #[serde(default)]
    pub value_field: Option<String>,

    #[serde(default)]
    pub cast: Option<Cast>,
}

fn default_comp() -> String {
    "equals".to_string()
}

/// Item de ordenação.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSpec {
    pub field: String,

    #[serde(default)]
    pub direction: OrderDirection,
}

/// Paginação.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaginateSpec {
    Page {
        page: u64,
        per_page: u64,
    },
    Field {
        limit: u64,
        after: serde_json::Value,
        #[serde(default = "default_pagination_field")]
        field: String,
    },
    LimitOffset {
        limit: u64,
        #[serde(default)]
        offset: u64,
    },
}

fn default_pagination_field() -> String {
    DEFAULT_PAGINATION_FIELD.to_string()
}

impl TableSpec {
    /// Monta a tabela, incluindo as relações.
    pub fn to_table(&self) -> Table {
        let mut table = self
            .columns
            .iter()
            .fold(Table::new(&self.name), |table, col| {
                table.with_column(&col.name, col.column_type)
            });
        if let Some(pk) = &self.primary_key {
            table = table.with_primary_key(pk);
        }
        for rel in &self.relations {
            table = table.with_relation(&rel.name, &rel.table.to_table(), &rel.local, &rel.remote);
        }
        table
    }
}

impl WhereSpec {
    fn comparator(&self) -> QueryResult<Comparator> {
        let comp: Comparator = self.comp.parse()?;
        Ok(match self.cast {
            Some(Cast::Date) => as_date(comp),
            Some(Cast::Time) => as_time(comp),
            None => comp,
        })
    }

    /// Monta o `Where` correspondente.
    pub fn to_where(&self) -> QueryResult<Where> {
        let comparator = self.comparator()?;
        if self.value.is_some() && self.value_field.is_some() {
            return Err(QueryError::InvalidValue(format!(
                "'{}' define 'value' e 'value_field' ao mesmo tempo",
                self.field
            )));
        }
        if let Some(other) = &self.value_field {
            return Ok(Where::field(&self.field, other, comparator));
        }
        let value = self.value.clone().map(Value::from_json).transpose()?;
        Ok(Where::optional(&self.field, value, comparator))
    }
}

impl FilterNode {
    /// Converte o nó em uma cláusula de bind.
    pub fn to_clause(&self) -> QueryResult<Box<dyn BindClause>> {
        let clause: Box<dyn BindClause> = match self {
            FilterNode::And { and } => Box::new(GroupWhere::new(Operator::And, Self::children(and)?)),
            FilterNode::Or { or } => Box::new(GroupWhere::new(Operator::Or, Self::children(or)?)),
            FilterNode::Not { not } => Box::new(crate::query::not(not.to_clause()?)),
            FilterNode::Leaf(spec) => Box::new(spec.to_where()?),
        };
        Ok(clause)
    }

    fn children(nodes: &[FilterNode]) -> QueryResult<Vec<Box<dyn BindClause>>> {
        nodes.iter().map(FilterNode::to_clause).collect()
    }
}

impl PaginateSpec {
    pub fn to_paginate(&self) -> QueryResult<Paginate> {
        match self {
            PaginateSpec::Page { page, per_page } => Paginate::page(*page, *per_page),
            PaginateSpec::Field {
                limit,
                after,
                field,
            } => Ok(Paginate::field_on(*limit, Value::from_json(after.clone())?, field)),
            PaginateSpec::LimitOffset { limit, offset } => Ok(Paginate::limit_offset(*limit, *offset)),
        }
    }
}

impl QueryDocument {
    pub fn from_json(content: &str) -> QueryResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> QueryResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Carrega um documento; `.toml` é lido como TOML, o resto como JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> QueryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Tabela principal do documento.
    pub fn table(&self) -> Table {
        self.table.to_table()
    }

    /// Monta a consulta: junções, filtros, ordenação e paginação, nessa ordem.
    pub fn build(&self) -> QueryResult<Select> {
        let table = self.table();
        let mut query = select(&table);

        for relation in &self.outer_join {
            query = query.outer_join(relation)?;
        }
        if let Some(filter) = &self.filter {
            query = ApplyWhere::new(&table, [filter.to_clause()?])?.apply(query)?;
        }
        for order in &self.order_by {
            query = OrderBy::new(Some(order.field.clone()), order.direction).apply(query)?;
        }
        if let Some(paginate) = &self.paginate {
            query = paginate.to_paginate()?.apply(query)?;
        }

        tracing::debug!(
            table = %self.table.name,
            filters = query.filters().len(),
            "query document built"
        );
        Ok(query)
    }

    /// Valida os nomes de comparadores sem montar a consulta.
    pub fn validate(&self) -> QueryResult<()> {
        fn visit(node: &FilterNode) -> QueryResult<()> {
            match node {
                FilterNode::And { and: nodes } | FilterNode::Or { or: nodes } => {
                    nodes.iter().try_for_each(visit)
                }
                FilterNode::Not { not } => visit(not),
                FilterNode::Leaf(spec) => spec.comparator().map(|_| ()),
            }
        }
        self.filter.as_ref().map_or(Ok(()), visit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::bind_cache_scope;
    use crate::sql::Dialect;

    const USERS: &str = r#"
    {
        "table": {
            "name": "users",
            "columns": [
                {"name": "id", "type": "integer"},
                {"name": "name", "type": "text"},
                {"name": "age", "type": "integer"}
            ]
        },
        "where": {"and": [
            {"field": "age", "comp": "greater", "value": 18},
            {"or": [
                {"field": "name", "comp": "rlike", "value": "A"},
                {"field": "name", "value": "Bob"}
            ]}
        ]},
        "order_by": [{"field": "age", "direction": "desc"}],
        "paginate": {"limit": 10, "offset": 5}
    }
    "#;

    #[test]
    fn test_build_from_json() {
        let _scope = bind_cache_scope();
        let doc = QueryDocument::from_json(USERS).unwrap();
        let query = doc.build().unwrap();
        assert_eq!(
            query.compile_literal(Dialect::Sqlite),
            "SELECT users.id, users.name, users.age FROM users \
             WHERE users.age > 18 AND (users.name LIKE 'A%' OR users.name = 'Bob') \
             ORDER BY users.age DESC LIMIT 10 OFFSET 5"
        );
    }

    #[test]
    fn test_build_from_toml_with_field_pagination() {
        let _scope = bind_cache_scope();
        let doc = QueryDocument::from_toml(
            r#"
            [table]
            name = "events"
            columns = [
                { name = "id", type = "integer" },
                { name = "created_at", type = "date_time" },
            ]

            [where]
            field = "created_at"
            comp = "greater_equals"
            cast = "date"
            value = "2024-01-01"

            [paginate]
            limit = 50
            after = 100
            "#,
        )
        .unwrap();

        let compiled = doc.build().unwrap().compile(Dialect::Postgres);
        assert_eq!(
            compiled.sql,
            "SELECT events.id, events.created_at FROM events \
             WHERE date(events.created_at) >= $1 AND events.id > $2 LIMIT 50"
        );
        assert_eq!(compiled.params, vec![Value::from("2024-01-01"), Value::Int(100)]);
    }

    #[test]
    fn test_page_pagination_and_null_value() {
        let _scope = bind_cache_scope();
        let doc = QueryDocument::from_json(
            r#"{
                "table": {"name": "t", "columns": [{"name": "id", "type": "integer"}]},
                "where": {"field": "id", "value": null},
                "paginate": {"page": 2, "per_page": 10}
            }"#,
        )
        .unwrap();
        assert_eq!(
            doc.build().unwrap().compile_literal(Dialect::Sqlite),
            "SELECT t.id FROM t WHERE 1 LIMIT 10 OFFSET 10"
        );
    }

    #[test]
    fn test_not_and_value_field() {
        let _scope = bind_cache_scope();
        let doc = QueryDocument::from_json(
            r#"{
                "table": {"name": "t", "columns": [
                    {"name": "id", "type": "integer"},
                    {"name": "parent_id", "type": "integer"}
                ]},
                "where": {"not": {"field": "id", "value_field": "parent_id"}}
            }"#,
        )
        .unwrap();
        assert_eq!(
            doc.build().unwrap().compile_literal(Dialect::Sqlite),
            "SELECT t.id, t.parent_id FROM t WHERE NOT (t.id = t.parent_id)"
        );
    }

    #[test]
    fn test_value_and_value_field_together_are_rejected() {
        let _scope = bind_cache_scope();
        let doc = QueryDocument::from_json(
            r#"{
                "table": {"name": "t", "columns": [
                    {"name": "id", "type": "integer"},
                    {"name": "parent_id", "type": "integer"}
                ]},
                "where": {"field": "id", "value": 3, "value_field": "parent_id"}
            }"#,
        )
        .unwrap();
        assert!(matches!(doc.build(), Err(QueryError::InvalidValue(_))));
    }

    #[test]
    fn test_unknown_comparator_is_reported() {
        let doc = QueryDocument::from_json(
            r#"{"table": {"name": "t"}, "where": {"field": "id", "comp": "almost", "value": 1}}"#,
        )
        .unwrap();
        assert!(matches!(doc.validate(), Err(QueryError::UnknownComparator(_))));
        assert!(doc.build().is_err());
    }

    #[test]
    fn test_relations_and_outer_join() {
        let _scope = bind_cache_scope();
        let doc = QueryDocument::from_json(
            r#"{
                "table": {
                    "name": "person_address",
                    "columns": [{"name": "id", "type": "integer"}, {"name": "another_id", "type": "integer"}],
                    "relations": [{
                        "name": "another",
                        "local": "another_id",
                        "remote": "id",
                        "table": {"name": "another", "columns": [
                            {"name": "id", "type": "integer"}, {"name": "name"}
                        ]}
                    }]
                },
                "outer_join": ["another"],
                "where": {"field": "another.name", "comp": "ilike", "value": "x"}
            }"#,
        )
        .unwrap();
        assert_eq!(
            doc.build().unwrap().compile_literal(Dialect::Postgres),
            "SELECT person_address.id, person_address.another_id FROM person_address \
             LEFT OUTER JOIN another ON person_address.another_id = another.id \
             WHERE another.name ILIKE '%x%'"
        );
    }
}
