//! Company Repository
//!
//! `company` 테이블 CRUD.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use savvy_data::Result;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// ================================================================================================
// Types
// ================================================================================================

/// 회사 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Company {
    pub id: i32,
    pub ticker: String,
    pub name: String,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// 회사 생성 입력
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CompanyCreate {
    #[validate(custom(function = "validate_ticker"))]
    pub ticker: String,
    #[validate(length(min = 1, max = 255, message = "name은 1-255자여야 합니다"))]
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// 회사 부분 수정 입력.
///
/// 본문에 있는 필드만 반영합니다. `sector`/`industry`에 `null`을 주면 값을 지웁니다.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CompanyUpdate {
    #[serde(default)]
    #[validate(custom(function = "validate_ticker"))]
    pub ticker: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "name은 1-255자여야 합니다"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub sector: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub industry: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// 필드가 있으면 `null`이어도 `Some(None)`으로 읽습니다.
fn deserialize_some<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl CompanyUpdate {
    /// 반영할 필드가 하나도 없는지.
    pub fn is_empty(&self) -> bool {
        self.ticker.is_none()
            && self.name.is_none()
            && self.sector.is_none()
            && self.industry.is_none()
            && self.is_active.is_none()
    }
}

/// 티커 정규화 (앞뒤 공백 제거, 대문자).
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

/// 정규화한 티커 기준으로 길이(1-16자)를 검사합니다.
fn validate_ticker(ticker: &str) -> std::result::Result<(), ValidationError> {
    let len = normalize_ticker(ticker).chars().count();
    if (1..=16).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new("ticker_length")
            .with_message(Cow::Borrowed("ticker는 1-16자여야 합니다")))
    }
}

// ================================================================================================
// Repository
// ================================================================================================

pub struct CompanyRepository;

impl CompanyRepository {
    /// id 순 목록.
    pub async fn list(pool: &PgPool, skip: i64, limit: i64) -> Result<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(
            "SELECT * FROM company ORDER BY id OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(companies)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Option<Company>> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM company WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(company)
    }

    pub async fn get_by_ticker(pool: &PgPool, ticker: &str) -> Result<Option<Company>> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM company WHERE ticker = $1")
            .bind(ticker)
            .fetch_optional(pool)
            .await?;

        Ok(company)
    }

    /// 새 회사 저장. 티커는 정규화되어 저장됩니다.
    pub async fn create(pool: &PgPool, input: &CompanyCreate) -> Result<Company> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO company (ticker, name, sector, industry, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(normalize_ticker(&input.ticker))
        .bind(&input.name)
        .bind(&input.sector)
        .bind(&input.industry)
        .bind(input.is_active)
        .fetch_one(pool)
        .await?;

        Ok(company)
    }

    /// 부분 수정. 대상이 없으면 `None`.
    pub async fn update(pool: &PgPool, id: i32, input: &CompanyUpdate) -> Result<Option<Company>> {
        let mut builder = Self::update_query(id, input);
        let company = builder
            .build_query_as::<Company>()
            .fetch_optional(pool)
            .await?;

        Ok(company)
    }

    fn update_query(id: i32, input: &CompanyUpdate) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("UPDATE company SET ");
        let mut set = builder.separated(", ");

        if let Some(ticker) = &input.ticker {
            set.push("ticker = ").push_bind_unseparated(normalize_ticker(ticker));
        }
        if let Some(name) = &input.name {
            set.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(sector) = &input.sector {
            set.push("sector = ").push_bind_unseparated(sector.clone());
        }
        if let Some(industry) = &input.industry {
            set.push("industry = ").push_bind_unseparated(industry.clone());
        }
        if let Some(is_active) = input.is_active {
            set.push("is_active = ").push_bind_unseparated(is_active);
        }
        set.push("updated_at = NOW()");

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING *");
        builder
    }

    /// 삭제. 삭제된 행이 있으면 `true`.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM company WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_distinguishes_null_from_missing() {
        let update: CompanyUpdate =
            serde_json::from_str(r#"{"name": "Apple", "sector": null}"#).unwrap();

        assert_eq!(update.name.as_deref(), Some("Apple"));
        assert_eq!(update.sector, Some(None));
        assert_eq!(update.industry, None);
        assert!(update.ticker.is_none());
        assert!(!update.is_empty());

        let empty: CompanyUpdate = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_update_query_only_sets_present_fields() {
        let update = CompanyUpdate {
            ticker: Some(" msft ".to_string()),
            industry: Some(None),
            ..Default::default()
        };
        let sql = CompanyRepository::update_query(3, &update).into_sql();

        assert_eq!(
            sql,
            "UPDATE company SET ticker = $1, industry = $2, updated_at = NOW() WHERE id = $3 RETURNING *"
        );
    }

    #[test]
    fn test_create_validation() {
        let input: CompanyCreate =
            serde_json::from_str(r#"{"ticker": "", "name": "Nameless"}"#).unwrap();
        assert!(input.validate().is_err());
        assert!(input.is_active);

        let long = CompanyCreate {
            ticker: "X".repeat(17),
            ..input.clone()
        };
        assert!(long.validate().is_err());

        let ok = CompanyCreate {
            ticker: "aapl".to_string(),
            ..input
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_ticker_validated_after_trim() {
        assert!(validate_ticker("   ").is_err());
        assert!(validate_ticker(&format!("  {}  ", "X".repeat(16))).is_ok());
        assert!(validate_ticker(&"X".repeat(17)).is_err());

        let blank = CompanyUpdate {
            ticker: Some(" \t ".to_string()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_normalize_ticker() {
        assert_eq!(normalize_ticker("  aapl "), "AAPL");
    }
}
