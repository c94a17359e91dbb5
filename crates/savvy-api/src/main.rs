//! Fundamental Savvy API 서버 진입점.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{http::StatusCode, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use savvy_api::openapi::swagger_ui_router;
use savvy_api::routes::create_api_router;
use savvy_api::state::AppState;
use savvy_core::{init_logging, LogConfig, Settings};

/// CORS 레이어.
///
/// `CORS_ORIGINS`(쉼표 구분)가 설정되어 있으면 해당 origin만 허용하고,
/// 없으면 모든 origin을 허용합니다.
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => {
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
}

/// 라우터 생성.
fn create_router(state: Arc<AppState>, api_prefix: &str) -> Router {
    create_api_router(api_prefix)
        .merge(swagger_ui_router())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors_layer())
        .with_state(state)
}

/// `--export-openapi` 플래그 또는 `EXPORT_OPENAPI=1|true`이면
/// OpenAPI 문서를 stdout으로 출력하고 종료합니다.
fn handle_export_openapi() -> anyhow::Result<()> {
    use savvy_api::openapi::ApiDoc;
    use utoipa::OpenApi as _;

    let export_flag = std::env::args().any(|arg| arg == "--export-openapi");
    let export_env = std::env::var("EXPORT_OPENAPI")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    if export_flag || export_env {
        let json = serde_json::to_string_pretty(&ApiDoc::openapi())
            .context("OpenAPI 문서 직렬화 실패")?;
        println!("{}", json);
        std::process::exit(0);
    }

    Ok(())
}

/// DB 연결. 실패하면 DB 없이 시작합니다 (헬스 체크가 상태를 보고).
async fn create_app_state(settings: &Settings) -> AppState {
    let state = AppState::new(settings.environment);

    let pool = match savvy_data::connect_pool(&settings.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "데이터베이스 연결 실패, DB 없이 시작합니다");
            return state;
        }
    };

    let run_migrations = std::env::var("RUN_MIGRATIONS")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);
    if run_migrations {
        if let Err(e) = savvy_data::run_migrations(&pool).await {
            error!(error = %e, "마이그레이션 실패");
        }
    }

    state.with_db_pool(pool)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    handle_export_openapi()?;

    let settings = Settings::from_env().context("설정 로드 실패")?;
    init_logging(LogConfig::from_env("savvy_api=info,tower_http=debug"))
        .context("로깅 초기화 실패")?;

    info!(
        project = %settings.project_name,
        environment = %settings.environment,
        "Starting API server..."
    );

    let addr = settings
        .server
        .socket_addr()
        .context("API_HOST, API_PORT 환경변수를 확인하세요")?;

    let state = Arc::new(create_app_state(&settings).await);
    info!(
        version = %state.version,
        has_db = state.db_pool.is_some(),
        "Application state initialized"
    );

    let app = create_router(state, &settings.api_v1_prefix);

    info!(%addr, prefix = %settings.api_v1_prefix, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("{} 바인드 실패", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("서버 실행 실패")?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Ctrl+C 또는 SIGTERM 대기.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
