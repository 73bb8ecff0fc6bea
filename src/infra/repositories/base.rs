//! Building blocks shared by every repository.
//!
//! Search terms always travel as bound parameters: the filter is built as a
//! sea-query expression, never spliced into SQL text.

use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr};
use sea_orm::{
    Condition, DatabaseConnection, EntityTrait, PrimaryKeyTrait, QueryFilter, QuerySelect,
};
use uuid::Uuid;

use super::error::StorageResult;
use crate::types::ListParams;

/// Character used to escape LIKE wildcards in search terms
const LIKE_ESCAPE: char = '!';

/// Escape `%`, `_` and the escape character itself so they match literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive substring match of `term` against any of `columns`.
///
/// Columns should be table-qualified (`(Entity, Column)`) so the condition
/// stays unambiguous inside joins.
pub fn search_condition<I, C>(columns: I, term: &str) -> Condition
where
    I: IntoIterator<Item = C>,
    C: IntoColumnRef,
{
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));

    columns.into_iter().fold(Condition::any(), |cond, column| {
        cond.add(
            Expr::expr(Func::lower(Expr::col(column)))
                .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
        )
    })
}

/// Apply the optional search filter of a list request.
pub fn with_search<Q, I, C>(query: Q, params: &ListParams, columns: I) -> Q
where
    Q: QueryFilter,
    I: IntoIterator<Item = C>,
    C: IntoColumnRef,
{
    match params.search.as_deref() {
        Some(term) => query.filter(search_condition(columns, term)),
        None => query,
    }
}

/// Apply offset and limit of a list request.
pub fn paged<Q: QuerySelect>(query: Q, params: &ListParams) -> Q {
    query.offset(params.offset).limit(params.limit)
}

/// Hard delete a row by primary key, returning the number of rows removed.
pub async fn delete_by_id<E>(db: &DatabaseConnection, id: Uuid) -> StorageResult<u64>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
{
    let result = E::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::{PostgresQueryBuilder, Query};
    use sea_orm::DeriveIden;

    #[derive(DeriveIden)]
    enum Client {
        Table,
        FirstName,
        LastName,
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off"), "50!%!_off");
        assert_eq!(escape_like("a!b"), "a!!b");
    }

    #[test]
    fn test_search_term_is_bound_not_inlined() {
        let term = "x' OR 1=1 --";
        let (sql, values) = Query::select()
            .column(Client::FirstName)
            .from(Client::Table)
            .cond_where(search_condition(
                [(Client::Table, Client::FirstName), (Client::Table, Client::LastName)],
                term,
            ))
            .build(PostgresQueryBuilder);

        assert!(!sql.contains("OR 1=1"));
        assert!(sql.contains("LOWER"));
        assert!(sql.contains(" OR "));
        assert!(sql.contains("ESCAPE"));
        assert!(!values.0.is_empty());
    }
}
