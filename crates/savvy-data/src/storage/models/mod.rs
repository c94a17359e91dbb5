//! 테이블별 행 타입.
//!
//! 모든 행은 업서트 컬럼 외에 `id`, `created_at`, `updated_at` 메타 컬럼을 가지며
//! 조회 시 해당 컬럼이 없는 테이블에서는 `None`으로 채워집니다.

/// 행 구조체를 선언하고 [`UpsertRow`](crate::storage::upsert::UpsertRow)를 구현합니다.
///
/// 필드 이름이 곧 컬럼 이름이며, 선언 순서대로 INSERT에 바인딩됩니다.
macro_rules! upsert_table {
    (
        $(#[$meta:meta])*
        pub struct $name:ident => $table:literal, touches_updated_at = $touch:literal {
            $( $(#[$fmeta:meta])* pub $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
        #[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
        pub struct $name {
            #[sqlx(default)]
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub id: Option<i32>,
            $( $(#[$fmeta])* pub $field: $ty, )*
            #[sqlx(default)]
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub created_at: Option<chrono::DateTime<chrono::Utc>>,
            #[sqlx(default)]
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
        }

        impl $crate::storage::upsert::UpsertRow for $name {
            const TABLE: &'static str = $table;
            const COLUMNS: &'static [&'static str] = &[$(stringify!($field)),*];
            const TOUCHES_UPDATED_AT: bool = $touch;

            fn push_row<'qb, 'args>(
                &self,
                row: &mut sqlx::query_builder::Separated<'qb, 'args, sqlx::Postgres, &'static str>,
            ) {
                $( row.push_bind(self.$field.clone()); )*
            }

            fn key_values(&self, columns: &[&str]) -> Vec<String> {
                columns
                    .iter()
                    .map(|column| match *column {
                        $( stringify!($field) => format!("{:?}", self.$field), )*
                        _ => String::new(),
                    })
                    .collect()
            }
        }
    };
}

mod company;
mod directory;
mod dividends_earnings;
mod economics;
mod financials;
mod market;
mod metrics;
mod news;
mod prices;
mod sec;

pub use company::*;
pub use directory::*;
pub use dividends_earnings::*;
pub use economics::*;
pub use financials::*;
pub use market::*;
pub use metrics::*;
pub use news::*;
pub use prices::*;
pub use sec::*;
