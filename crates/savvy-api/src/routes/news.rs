//! 뉴스 라우트 (`/api/v1/news`).

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use savvy_data::storage::models::{FmpArticle, GeneralNews, StockNews};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::{data_error, ApiResult};
use crate::query::{clamp_limit, normalize_symbol, validate_range};
use crate::repository::NewsRepository;
use crate::state::AppState;

/// 뉴스 쿼리. 기본 100건.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct NewsQuery {
    /// FMP 기사 티커 부분 일치
    pub tickers: Option<String>,
    pub symbol: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub limit: Option<i64>,
}

const DEFAULT_NEWS_LIMIT: i64 = 100;

impl NewsQuery {
    fn limit(&self) -> i64 {
        clamp_limit(self.limit, DEFAULT_NEWS_LIMIT)
    }

    fn symbol(&self) -> Option<String> {
        self.symbol
            .as_deref()
            .map(normalize_symbol)
            .filter(|s| !s.is_empty())
    }
}

async fn fmp_articles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> ApiResult<Json<Vec<FmpArticle>>> {
    validate_range(query.from_date, query.to_date)?;
    let tickers = query.tickers.as_deref().map(normalize_symbol);
    let rows = NewsRepository::fmp_articles(
        state.pool()?,
        tickers.as_deref(),
        query.from_date,
        query.to_date,
        query.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

async fn general(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> ApiResult<Json<Vec<GeneralNews>>> {
    validate_range(query.from_date, query.to_date)?;
    let rows = NewsRepository::general(
        state.pool()?,
        query.symbol().as_deref(),
        query.from_date,
        query.to_date,
        query.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

async fn stock(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> ApiResult<Json<Vec<StockNews>>> {
    validate_range(query.from_date, query.to_date)?;
    let rows = NewsRepository::stock(
        state.pool()?,
        query.symbol().as_deref(),
        query.from_date,
        query.to_date,
        query.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

async fn stock_by_symbol(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<NewsQuery>,
) -> ApiResult<Json<Vec<StockNews>>> {
    validate_range(query.from_date, query.to_date)?;
    let symbol = normalize_symbol(&symbol);
    let rows = NewsRepository::stock(
        state.pool()?,
        Some(&symbol),
        query.from_date,
        query.to_date,
        query.limit(),
    )
    .await
    .map_err(data_error)?;
    Ok(Json(rows))
}

pub fn news_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/fmp-articles", get(fmp_articles))
        .route("/general", get(general))
        .route("/stock", get(stock))
        .route("/stock/{symbol}", get(stock_by_symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_query_defaults() {
        let query = NewsQuery::default();
        assert_eq!(query.limit(), 100);
        assert_eq!(query.symbol(), None);

        let query = NewsQuery {
            symbol: Some(" aapl ".to_string()),
            limit: Some(10),
            ..Default::default()
        };
        assert_eq!(query.limit(), 10);
        assert_eq!(query.symbol().as_deref(), Some("AAPL"));
    }
}
