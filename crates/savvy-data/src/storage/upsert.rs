//! 범용 벌크 업서트.
//!
//! 행 묶음을 하나의 `INSERT ... VALUES (...), (...) ON CONFLICT` 문으로 기록합니다.
//! 충돌 판정 컬럼은 호출 측이 지정하며 테이블의 UNIQUE 제약과 일치해야 합니다.
//!
//! - [`ConflictAction::Update`]: 키를 제외한 모든 컬럼을 새 값으로 덮어씀
//! - [`ConflictAction::Ignore`]: 기존 행을 그대로 둠
//!
//! 한 묶음 안에 같은 키가 여러 번 나오면 `Update`는 마지막 행만 기록합니다.

use std::collections::hash_map::{Entry, HashMap};

use sqlx::postgres::Postgres;
use sqlx::query_builder::Separated;
use sqlx::{PgConnection, QueryBuilder};
use tracing::debug;

use crate::error::{DataError, Result};

/// PostgreSQL 한 문장당 바인드 파라미터 상한.
pub const MAX_BIND_PARAMS: usize = 65_535;

/// 충돌 시 동작.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictAction {
    /// 기존 행 갱신
    Update,
    /// 기존 행 유지
    Ignore,
}

/// 벌크 업서트 대상 행.
///
/// `COLUMNS`는 INSERT에 포함되는 컬럼이며 `id`, `created_at`, `updated_at`은
/// 포함하지 않습니다. `push_row`는 `COLUMNS`와 같은 순서로 값을 바인딩해야 합니다.
pub trait UpsertRow: Send + Sync {
    /// 대상 테이블 이름
    const TABLE: &'static str;
    /// INSERT 컬럼 목록
    const COLUMNS: &'static [&'static str];
    /// `updated_at` 컬럼 보유 여부. 갱신 시 `NOW()`로 설정됩니다.
    const TOUCHES_UPDATED_AT: bool;

    fn push_row<'qb, 'args>(&self, row: &mut Separated<'qb, 'args, Postgres, &'static str>);

    /// 지정한 컬럼 값을 비교용 문자열로 반환합니다.
    fn key_values(&self, columns: &[&str]) -> Vec<String>;
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name)
}

/// 충돌 키가 모두 대상 테이블의 컬럼인지 확인합니다.
///
/// 컬럼 이름은 SQL에 그대로 들어가므로 목록에 없는 이름은 거부합니다.
pub fn validate_unique_columns<R: UpsertRow>(unique_columns: &[&str]) -> Result<()> {
    if unique_columns.is_empty() {
        return Err(DataError::InvalidColumn {
            table: R::TABLE,
            column: "<empty>".to_string(),
        });
    }

    for column in unique_columns {
        if !R::COLUMNS.iter().any(|c| c == column) {
            return Err(DataError::InvalidColumn {
                table: R::TABLE,
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// `ON CONFLICT` 절을 생성합니다.
///
/// 갱신할 컬럼이 하나도 남지 않으면 `DO NOTHING`으로 대체됩니다.
pub fn conflict_clause<R: UpsertRow>(unique_columns: &[&str], action: ConflictAction) -> String {
    let key = unique_columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");

    let assignments: Vec<String> = match action {
        ConflictAction::Update => R::COLUMNS
            .iter()
            .filter(|c| !unique_columns.contains(*c))
            .map(|c| format!("{0} = EXCLUDED.{0}", quote_ident(c)))
            .chain(R::TOUCHES_UPDATED_AT.then(|| "\"updated_at\" = NOW()".to_string()))
            .collect(),
        ConflictAction::Ignore => Vec::new(),
    };

    if assignments.is_empty() {
        format!(" ON CONFLICT ({}) DO NOTHING", key)
    } else {
        format!(" ON CONFLICT ({}) DO UPDATE SET {}", key, assignments.join(", "))
    }
}

/// 한 문장에 담을 수 있는 최대 행 수.
pub fn rows_per_statement<R: UpsertRow>() -> usize {
    (MAX_BIND_PARAMS / R::COLUMNS.len().max(1)).max(1)
}

/// 같은 충돌 키를 가진 행을 하나로 줄입니다.
///
/// `Update`는 키별 마지막 행을 첫 등장 위치에 남깁니다. 한 문장 안에서 같은 행을
/// 두 번 갱신할 수 없기 때문입니다. `Ignore`는 입력을 그대로 반환합니다.
pub fn unique_rows<'a, R: UpsertRow>(
    rows: &'a [R],
    unique_columns: &[&str],
    action: ConflictAction,
) -> Vec<&'a R> {
    if action == ConflictAction::Ignore {
        return rows.iter().collect();
    }

    let mut slots: HashMap<Vec<String>, usize> = HashMap::with_capacity(rows.len());
    let mut unique: Vec<&R> = Vec::with_capacity(rows.len());
    for row in rows {
        match slots.entry(row.key_values(unique_columns)) {
            Entry::Occupied(slot) => unique[*slot.get()] = row,
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(row);
            }
        }
    }
    unique
}

/// 행 묶음에 대한 INSERT 문을 생성합니다. 실행하지 않습니다.
pub fn build_insert<'a, R, I>(
    rows: I,
    unique_columns: &[&str],
    action: ConflictAction,
) -> QueryBuilder<'static, Postgres>
where
    R: UpsertRow + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let columns = R::COLUMNS
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");

    let mut builder = QueryBuilder::new(format!("INSERT INTO {} ({}) ", R::TABLE, columns));
    builder.push_values(rows, |mut values, row: &R| row.push_row(&mut values));
    builder.push(conflict_clause::<R>(unique_columns, action));
    builder
}

/// 행을 기록하고 영향받은 행 수를 반환합니다.
///
/// 빈 입력은 데이터베이스에 접근하지 않고 0을 반환합니다.
pub async fn bulk_write<R: UpsertRow>(
    conn: &mut PgConnection,
    rows: &[R],
    unique_columns: &[&str],
    action: ConflictAction,
) -> Result<u64> {
    validate_unique_columns::<R>(unique_columns)?;
    if rows.is_empty() {
        return Ok(0);
    }

    let unique = unique_rows(rows, unique_columns, action);
    let mut affected = 0;
    for chunk in unique.chunks(rows_per_statement::<R>()) {
        let mut builder = build_insert(chunk.iter().copied(), unique_columns, action);
        let result = builder.build().execute(&mut *conn).await?;
        affected += result.rows_affected();
    }

    debug!(
        table = R::TABLE,
        rows = unique.len(),
        duplicates = rows.len() - unique.len(),
        affected,
        action = ?action,
        "벌크 기록 완료"
    );
    Ok(affected)
}

/// 충돌 시 기존 행을 갱신합니다.
pub async fn bulk_insert_or_update<R: UpsertRow>(
    conn: &mut PgConnection,
    rows: &[R],
    unique_columns: &[&str],
) -> Result<u64> {
    bulk_write(conn, rows, unique_columns, ConflictAction::Update).await
}

/// 충돌 시 기존 행을 유지합니다.
pub async fn bulk_insert_ignore<R: UpsertRow>(
    conn: &mut PgConnection,
    rows: &[R],
    unique_columns: &[&str],
) -> Result<u64> {
    bulk_write(conn, rows, unique_columns, ConflictAction::Ignore).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::{Dividend, Sector, StockSymbol};
    use chrono::NaiveDate;

    fn dividend(symbol: &str, day: u32, amount: f64) -> Dividend {
        Dividend {
            symbol: symbol.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            dividend: Some(amount),
            ..Default::default()
        }
    }

    #[test]
    fn test_update_clause_excludes_key_columns() {
        let clause = conflict_clause::<Dividend>(&["symbol", "date"], ConflictAction::Update);

        assert!(clause.starts_with(" ON CONFLICT (\"symbol\", \"date\") DO UPDATE SET "));
        assert!(clause.contains("\"dividend\" = EXCLUDED.\"dividend\""));
        assert!(clause.contains("\"updated_at\" = NOW()"));
        assert!(!clause.contains("\"symbol\" = EXCLUDED"));
        assert!(!clause.contains("\"date\" = EXCLUDED"));
        assert!(!clause.contains("created_at"));
        assert!(!clause.contains("\"id\""));
    }

    #[test]
    fn test_ignore_clause() {
        let clause = conflict_clause::<StockSymbol>(&["symbol"], ConflictAction::Ignore);
        assert_eq!(clause, " ON CONFLICT (\"symbol\") DO NOTHING");
    }

    #[test]
    fn test_update_without_remaining_columns_degrades_to_nothing() {
        let clause = conflict_clause::<Sector>(&["sector"], ConflictAction::Update);
        assert_eq!(clause, " ON CONFLICT (\"sector\") DO NOTHING");
    }

    #[test]
    fn test_unknown_unique_column_rejected() {
        let err = validate_unique_columns::<Dividend>(&["symbol", "id; DROP TABLE x"]).unwrap_err();
        assert!(matches!(err, DataError::InvalidColumn { table: "dividend", .. }));

        assert!(validate_unique_columns::<Dividend>(&[]).is_err());
        assert!(validate_unique_columns::<Dividend>(&["symbol", "date"]).is_ok());
    }

    #[test]
    fn test_build_insert_sql() {
        let rows = vec![dividend("AAPL", 1, 0.24), dividend("AAPL", 2, 0.25)];
        let builder = build_insert(&rows, &["symbol", "date"], ConflictAction::Update);
        let sql = builder.sql();

        assert!(sql.starts_with("INSERT INTO dividend (\"symbol\", \"date\", "));
        // 2행 x 컬럼 수만큼 바인딩
        let binds = Dividend::COLUMNS.len() * 2;
        assert!(sql.contains(&format!("${}", binds)));
        assert!(!sql.contains(&format!("${}", binds + 1)));
    }

    #[test]
    fn test_duplicate_keys_keep_last_row() {
        let rows = vec![
            dividend("AAPL", 1, 0.10),
            dividend("AAPL", 2, 0.30),
            dividend("AAPL", 1, 0.20),
            dividend("MSFT", 1, 0.70),
        ];

        let unique = unique_rows(&rows, &["symbol", "date"], ConflictAction::Update);
        let amounts: Vec<_> = unique.iter().map(|r| r.dividend).collect();
        assert_eq!(amounts, vec![Some(0.20), Some(0.30), Some(0.70)]);

        let builder = build_insert(unique, &["symbol", "date"], ConflictAction::Update);
        let sql = builder.sql();
        let binds = Dividend::COLUMNS.len() * 3;
        assert!(sql.contains(&format!("${}", binds)));
        assert!(!sql.contains(&format!("${}", binds + 1)));

        let kept = unique_rows(&rows, &["symbol", "date"], ConflictAction::Ignore);
        assert_eq!(kept.len(), 4);
    }

    #[test]
    fn test_key_values_follow_requested_columns() {
        let row = dividend("AAPL", 1, 0.10);
        assert_eq!(
            row.key_values(&["symbol", "date"]),
            vec!["\"AAPL\"".to_string(), "2024-03-01".to_string()]
        );
    }

    #[test]
    fn test_rows_per_statement_respects_bind_limit() {
        let per = rows_per_statement::<Dividend>();
        assert!(per * Dividend::COLUMNS.len() <= MAX_BIND_PARAMS);
        assert!((per + 1) * Dividend::COLUMNS.len() > MAX_BIND_PARAMS);
    }

    async fn test_pool() -> sqlx::PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL 필요");
        let pool = sqlx::PgPool::connect(&url).await.unwrap();
        crate::storage::run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    #[ignore] // DB 연결 필요
    async fn test_upsert_updates_existing_row() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let symbol = "UPSERT_TEST";
        sqlx::query("DELETE FROM dividend WHERE symbol = $1")
            .bind(symbol)
            .execute(&mut *conn)
            .await
            .unwrap();

        bulk_insert_or_update(&mut conn, &[dividend(symbol, 1, 0.10)], &["symbol", "date"])
            .await
            .unwrap();
        bulk_insert_or_update(&mut conn, &[dividend(symbol, 1, 0.20)], &["symbol", "date"])
            .await
            .unwrap();

        let rows: Vec<Dividend> = sqlx::query_as("SELECT * FROM dividend WHERE symbol = $1")
            .bind(symbol)
            .fetch_all(&mut *conn)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].dividend, Some(0.20));
        assert!(rows[0].updated_at.is_some());
    }

    #[tokio::test]
    #[ignore] // DB 연결 필요
    async fn test_upsert_batch_with_repeated_key() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let symbol = "REPEAT_TEST";
        sqlx::query("DELETE FROM dividend WHERE symbol = $1")
            .bind(symbol)
            .execute(&mut *conn)
            .await
            .unwrap();

        let batch = [dividend(symbol, 1, 0.10), dividend(symbol, 1, 0.20)];
        let affected = bulk_insert_or_update(&mut conn, &batch, &["symbol", "date"])
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let stored: f64 =
            sqlx::query_scalar("SELECT dividend FROM dividend WHERE symbol = $1")
                .bind(symbol)
                .fetch_one(&mut *conn)
                .await
                .unwrap();
        assert_eq!(stored, 0.20);
    }

    #[tokio::test]
    #[ignore] // DB 연결 필요
    async fn test_ignore_keeps_original_row() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let symbol = "IGNORE_TEST";
        sqlx::query("DELETE FROM dividend WHERE symbol = $1")
            .bind(symbol)
            .execute(&mut *conn)
            .await
            .unwrap();

        bulk_insert_ignore(&mut conn, &[dividend(symbol, 5, 0.10)], &["symbol", "date"])
            .await
            .unwrap();
        let affected =
            bulk_insert_ignore(&mut conn, &[dividend(symbol, 5, 0.99)], &["symbol", "date"])
                .await
                .unwrap();
        assert_eq!(affected, 0);

        let stored: f64 =
            sqlx::query_scalar("SELECT dividend FROM dividend WHERE symbol = $1")
                .bind(symbol)
                .fetch_one(&mut *conn)
                .await
                .unwrap();
        assert_eq!(stored, 0.10);
    }
}
