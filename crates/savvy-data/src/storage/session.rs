//! 커밋/롤백 범위를 갖는 트랜잭션 헬퍼.

use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool};
use tracing::warn;

use crate::error::Result;

/// 트랜잭션 안에서 `f`를 실행합니다.
///
/// `f`가 `Ok`를 반환하면 커밋하고, `Err`이면 롤백한 뒤 원래 에러를 그대로 반환합니다.
/// 클로저가 빌린 데이터는 트랜잭션보다 오래 살아야 하므로 호출 측은 소유한 값을
/// `move`로 넘깁니다.
///
/// ```no_run
/// # use savvy_data::storage::session::with_transaction;
/// # async fn demo(pool: &sqlx::PgPool) -> savvy_data::Result<()> {
/// let _deleted = with_transaction(pool, |conn| {
///     Box::pin(async move {
///         let result = sqlx::query("DELETE FROM quote WHERE symbol = ''")
///             .execute(&mut *conn)
///             .await?;
///         Ok::<_, savvy_data::DataError>(result.rows_affected())
///     })
/// })
/// .await?;
/// # Ok(()) }
/// ```
pub async fn with_transaction<T, F>(pool: &PgPool, f: F) -> Result<T>
where
    F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T>>,
{
    let mut tx = pool.begin().await?;

    match f(&mut *tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            warn!(error = %err, "트랜잭션 롤백");
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "롤백 실패");
            }
            Err(err)
        }
    }
}
