//! 애플리케이션 설정.
//!
//! 프로세스 시작 시 한 번 환경 변수(및 `.env`)에서 로드되며,
//! 이후 참조 또는 `Arc`로 전달됩니다.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SavvyError, SavvyResult};

/// 실행 환경.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
    Test,
}

impl Environment {
    /// 개발 환경 여부. 개발 환경에서는 SQL 문이 로그로 출력됩니다.
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }
}

impl FromStr for Environment {
    type Err = SavvyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(SavvyError::Config(format!(
                "알 수 없는 ENVIRONMENT 값: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트 주소
    pub host: String,
    /// 바인딩할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// 소켓 주소로 변환합니다.
    pub fn socket_addr(&self) -> SavvyResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| SavvyError::Config(format!("잘못된 서버 주소: {}", e)))
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// PostgreSQL 연결 URL
    pub url: String,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    pub acquire_timeout_secs: u64,
    /// SQL 문 로그 출력 여부
    pub log_statements: bool,
}

/// 환경 변수 키와 1:1 대응하는 평면 구조.
#[derive(Debug, Deserialize)]
struct RawSettings {
    project_name: String,
    api_v1_prefix: String,
    database_url: Option<String>,
    environment: String,
    api_host: String,
    api_port: u16,
    db_max_connections: u32,
    db_acquire_timeout_secs: u64,
}

/// 전체 설정.
#[derive(Debug, Clone)]
pub struct Settings {
    /// 프로젝트 이름 (OpenAPI 제목 등)
    pub project_name: String,
    /// API 버전 경로 접두사
    pub api_v1_prefix: String,
    /// 실행 환경
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl Settings {
    /// `.env`와 프로세스 환경 변수에서 설정을 로드합니다.
    ///
    /// `DATABASE_URL`이 없으면 설정 에러를 반환합니다.
    pub fn from_env() -> SavvyResult<Self> {
        dotenvy::dotenv().ok();
        Self::build(config::Environment::default().try_parsing(true))
    }

    /// 주어진 키-값 목록에서 설정을 로드합니다. 키는 환경 변수 이름 그대로입니다.
    pub fn from_map(vars: HashMap<String, String>) -> SavvyResult<Self> {
        Self::build(
            config::Environment::default()
                .source(Some(vars))
                .try_parsing(true),
        )
    }

    fn build(source: config::Environment) -> SavvyResult<Self> {
        let raw: RawSettings = config::Config::builder()
            .set_default("project_name", "Fundamental Savvy API")?
            .set_default("api_v1_prefix", "/api/v1")?
            .set_default("environment", "development")?
            .set_default("api_host", "127.0.0.1")?
            .set_default("api_port", 3000)?
            .set_default("db_max_connections", 10)?
            .set_default("db_acquire_timeout_secs", 10)?
            .add_source(source)
            .build()?
            .try_deserialize()?;

        let database_url = raw
            .database_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                SavvyError::Config("DATABASE_URL 환경변수가 설정되지 않았습니다".to_string())
            })?;
        let environment: Environment = raw.environment.parse()?;

        Ok(Self {
            project_name: raw.project_name,
            api_v1_prefix: raw.api_v1_prefix,
            environment,
            server: ServerConfig {
                host: raw.api_host,
                port: raw.api_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: raw.db_max_connections,
                acquire_timeout_secs: raw.db_acquire_timeout_secs,
                log_statements: environment.is_development(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_settings_defaults() {
        let settings =
            Settings::from_map(vars(&[("DATABASE_URL", "postgres://localhost/savvy")])).unwrap();

        assert_eq!(settings.project_name, "Fundamental Savvy API");
        assert_eq!(settings.api_v1_prefix, "/api/v1");
        assert_eq!(settings.environment, Environment::Development);
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.database.max_connections, 10);
        assert!(settings.database.log_statements);
    }

    #[test]
    fn test_settings_missing_database_url() {
        let err = Settings::from_map(vars(&[("ENVIRONMENT", "production")])).unwrap_err();
        assert!(matches!(err, SavvyError::Config(_)));
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_settings_production_disables_statement_log() {
        let settings = Settings::from_map(vars(&[
            ("DATABASE_URL", "postgres://db/savvy"),
            ("ENVIRONMENT", "production"),
            ("API_PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(settings.environment, Environment::Production);
        assert!(!settings.database.log_statements);
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_unknown_environment_rejected() {
        let result = Settings::from_map(vars(&[
            ("DATABASE_URL", "postgres://db/savvy"),
            ("ENVIRONMENT", "moon"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
        };
        assert_eq!(server.socket_addr().unwrap().port(), 8000);

        let bad = ServerConfig {
            host: "not a host".to_string(),
            port: 1,
        };
        assert!(bad.socket_addr().is_err());
    }
}
