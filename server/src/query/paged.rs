//! Paginated Join Query Engine
//!
//! One parameterized pipeline for every list view: filter the primary
//! collection, left-join at most one related collection, project an
//! allow-list of fields, page the slice, and return it together with the
//! pre-pagination match count. Orders, sales, and warehouses all drive this
//! with declarative specs instead of hand-built per-route queries.
//!
//! The count runs as its own `GROUP ALL` statement over the same filter, so
//! an empty match yields `{data: [], total_count: 0}` rather than a missing
//! or errored response.

use serde::Deserialize;
use serde_json::Value;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::{RepoError, RepoResult};

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

/// Page selection, deserialized straight from the query string.
///
/// Values below 1 are clamped to 1 rather than producing a negative offset.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl PageParams {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    pub fn limit(&self) -> i64 {
        self.limit.max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }
}

/// Predicate over the primary collection's fields.
///
/// Field names come from `&'static` specs in handler code, never from
/// request input; only values travel as bound parameters.
#[derive(Debug, Clone)]
pub enum Filter {
    /// Exact match (enumerations such as status)
    Eq(&'static str, Value),
    /// Case-insensitive substring match (text search fields)
    Contains(&'static str, String),
}

impl Filter {
    pub fn eq(field: &'static str, value: impl serde::Serialize) -> Self {
        Filter::Eq(field, serde_json::to_value(value).unwrap_or(Value::Null))
    }

    pub fn contains(field: &'static str, text: impl Into<String>) -> Self {
        Filter::Contains(field, text.into())
    }
}

/// Left-outer join from the primary collection to exactly one related
/// collection via a record-link field. Rendered as a correlated subquery; an
/// unmatched foreign key leaves the alias null instead of dropping the row.
#[derive(Debug, Clone, Copy)]
pub struct JoinSpec {
    pub foreign_table: &'static str,
    pub local_field: &'static str,
    pub alias: &'static str,
    pub fields: &'static [&'static str],
}

/// A page of projected rows plus the pre-pagination match count
#[derive(Debug)]
pub struct PageResult {
    pub data: Vec<Value>,
    pub total_count: u64,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

/// Declarative paginated query over one primary collection
#[derive(Debug, Clone)]
pub struct PagedQuery {
    table: &'static str,
    projection: &'static [&'static str],
    filters: Vec<Filter>,
    join: Option<JoinSpec>,
}

impl PagedQuery {
    pub fn new(table: &'static str, projection: &'static [&'static str]) -> Self {
        Self {
            table,
            projection,
            filters: Vec::new(),
            join: None,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filter_opt(mut self, filter: Option<Filter>) -> Self {
        if let Some(f) = filter {
            self.filters.push(f);
        }
        self
    }

    pub fn join(mut self, join: JoinSpec) -> Self {
        self.join = Some(join);
        self
    }

    /// Render the WHERE clause; parameter names are positional (`$p0`, ...)
    fn where_clause(&self) -> String {
        if self.filters.is_empty() {
            return String::new();
        }

        let predicates: Vec<String> = self
            .filters
            .iter()
            .enumerate()
            .map(|(i, filter)| match filter {
                Filter::Eq(field, _) => format!("{field} = $p{i}"),
                Filter::Contains(field, _) => format!(
                    "string::contains(string::lowercase({field}), string::lowercase($p{i}))"
                ),
            })
            .collect();

        format!(" WHERE {}", predicates.join(" AND "))
    }

    fn data_sql(&self, page: PageParams) -> String {
        let mut fields = self.projection.join(", ");

        if let Some(join) = &self.join {
            fields.push_str(&format!(
                ", (SELECT {} FROM {} WHERE id = $parent.{})[0] AS {}",
                join.fields.join(", "),
                join.foreign_table,
                join.local_field,
                join.alias
            ));
        }

        format!(
            "SELECT {fields} FROM {}{} ORDER BY id LIMIT {} START {}",
            self.table,
            self.where_clause(),
            page.limit(),
            page.offset()
        )
    }

    fn count_sql(&self) -> String {
        format!(
            "SELECT count() AS total FROM {}{} GROUP ALL",
            self.table,
            self.where_clause()
        )
    }

    fn bind_filters<'a>(
        &self,
        mut query: surrealdb::method::Query<'a, Db>,
    ) -> surrealdb::method::Query<'a, Db> {
        for (i, filter) in self.filters.iter().enumerate() {
            let name = format!("p{i}");
            query = match filter {
                Filter::Eq(_, value) => query.bind((name, value.clone())),
                Filter::Contains(_, text) => query.bind((name, text.clone())),
            };
        }
        query
    }

    /// Execute the pipeline. Repeated calls against unchanged data return the
    /// same slice, since rows are ordered by record id rather than insertion
    /// accident.
    pub async fn run(&self, db: &Surreal<Db>, page: PageParams) -> RepoResult<PageResult> {
        let mut response = self
            .bind_filters(db.query(self.data_sql(page)))
            .await
            .map_err(RepoError::from)?;
        // The SDK cannot deserialize rows straight into `serde_json::Value`
        // (its `Value` serializes as tagged enums), so go through the SDK
        // value type and its plain-JSON conversion.
        let rows: surrealdb::Value = response.take(0).map_err(RepoError::from)?;
        let data: Vec<Value> = match rows.into_inner().into_json() {
            Value::Array(rows) => rows,
            _ => Vec::new(),
        };

        let mut response = self
            .bind_filters(db.query(self.count_sql()))
            .await
            .map_err(RepoError::from)?;
        let counts: Vec<CountRow> = response.take(0).map_err(RepoError::from)?;
        let total_count = counts.first().map(|c| c.total).unwrap_or(0);

        Ok(PageResult { data, total_count })
    }

    /// Fetch a single row by an exact-match filter (page 1, limit 1)
    pub async fn run_single(&self, db: &Surreal<Db>) -> RepoResult<Option<Value>> {
        let result = self.run(db, PageParams::new(1, 1)).await?;
        Ok(result.data.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_from_page_and_limit() {
        assert_eq!(PageParams::new(1, 10).offset(), 0);
        assert_eq!(PageParams::new(3, 10).offset(), 20);
        assert_eq!(PageParams::new(2, 25).offset(), 25);
    }

    #[test]
    fn test_page_below_one_clamps_to_first_page() {
        assert_eq!(PageParams::new(0, 10).offset(), 0);
        assert_eq!(PageParams::new(-5, 10).offset(), 0);
        assert_eq!(PageParams::new(1, 0).limit(), 1);
    }

    #[test]
    fn test_where_clause_rendering() {
        let query = PagedQuery::new("orders", &["id", "status"])
            .filter(Filter::eq("status", "pending"))
            .filter(Filter::contains("notes", "urgent"));

        let clause = query.where_clause();
        assert_eq!(
            clause,
            " WHERE status = $p0 AND \
             string::contains(string::lowercase(notes), string::lowercase($p1))"
        );
    }

    #[test]
    fn test_data_sql_includes_join_subquery() {
        let query = PagedQuery::new("orders", &["id", "order_id"]).join(JoinSpec {
            foreign_table: "customer_data",
            local_field: "customer_id",
            alias: "customer_info",
            fields: &["customer_name", "email"],
        });

        let sql = query.data_sql(PageParams::new(2, 10));
        assert!(sql.contains(
            "(SELECT customer_name, email FROM customer_data \
             WHERE id = $parent.customer_id)[0] AS customer_info"
        ));
        assert!(sql.ends_with("ORDER BY id LIMIT 10 START 10"));
    }
}
