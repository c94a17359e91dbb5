//! Fundamental Savvy 데이터 수집 CLI.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use savvy_collector::config::{parse_list, DEFAULT_INDICATORS};
use savvy_collector::modules::{self, parse_symbols, prices::DEFAULT_INTRADAY_INTERVAL};
use savvy_collector::{CollectorConfig, SyncStats};
use savvy_core::{init_logging, LogConfig};
use savvy_data::etl::StatementKind;
use savvy_data::{connect_pool, run_migrations};

#[derive(Parser)]
#[command(name = "savvy-collector")]
#[command(about = "Fundamental Savvy FMP Data Collector", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// 재무제표 종류 선택.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatementArg {
    Income,
    Balance,
    CashFlow,
    All,
}

impl StatementArg {
    fn kinds(self) -> Vec<StatementKind> {
        match self {
            StatementArg::Income => vec![StatementKind::Income],
            StatementArg::Balance => vec![StatementKind::Balance],
            StatementArg::CashFlow => vec![StatementKind::CashFlow],
            StatementArg::All => StatementKind::ALL.to_vec(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// 데이터베이스 마이그레이션 적용
    Migrate,

    /// 종목 목록 동기화 (A-Z, 0-9 접두어 검색)
    StockList,

    /// 재무제표 제공 종목 목록 동기화
    FsSymbols,

    /// 섹터 목록 동기화
    Sectors,

    /// 산업 목록 동기화
    Industries,

    /// 거래소 목록 동기화
    Exchanges,

    /// 국가 목록 동기화
    Countries,

    /// 심볼 변경 이력 동기화
    SymbolChanges,

    /// 기업 프로필 동기화
    Profiles,

    /// 경영진, 시가총액, 직원 수, 유통주식 동기화
    CompanyDetails,

    /// 상장폐지 기업 동기화
    Delisted {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },

    /// 분기 재무제표 동기화
    Statements {
        #[arg(long, value_enum, default_value_t = StatementArg::All)]
        kind: StatementArg,
    },

    /// 현재 시세 동기화
    Quotes,

    /// 일봉 동기화
    HistoricalPrices {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
        /// 특정 심볼만 수집 (쉼표로 구분, 예: "AAPL,MSFT")
        #[arg(long)]
        symbols: Option<String>,
    },

    /// 분봉 동기화
    IntradayPrices {
        /// 1min, 5min, 15min, 30min, 1hour, 4hour
        #[arg(long, default_value = DEFAULT_INTRADAY_INTERVAL)]
        interval: String,
        #[arg(long)]
        symbols: Option<String>,
    },

    /// 배당 이력 동기화
    Dividends,

    /// 실적 이력 동기화
    Earnings {
        #[arg(long, default_value_t = 40)]
        limit: u32,
    },

    /// 배당 캘린더 동기화
    DividendCalendar {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },

    /// 실적 캘린더 동기화
    EarningsCalendar {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },

    /// 경제 지표 동기화
    EconomicIndicators {
        /// 지표 이름 (쉼표로 구분, 기본: 전체 기본 지표)
        #[arg(long)]
        indicators: Option<String>,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },

    /// 국채 금리 동기화
    TreasuryRates {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },

    /// 경제 캘린더 동기화
    EconomicCalendar {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },

    /// 국가별 시장 위험 프리미엄 동기화
    RiskPremium,

    /// 섹터 성과/PER 동기화
    SectorPerformance {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },

    /// 산업 성과/PER 동기화
    IndustryPerformance {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },

    /// 상승/하락/거래 상위 종목 스냅샷
    MarketMovers,

    /// 뉴스 동기화
    News {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },

    /// SEC 공시 동기화
    SecFilings {
        /// 공시 유형 (예: 10-K)
        #[arg(long)]
        form_type: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: u32,
    },

    /// 기업 지표 계산
    Metrics {
        #[arg(long)]
        batch_size: Option<usize>,
    },

    /// 전체 워크플로우 실행 (종목 → 프로필 → 재무제표 → 시세 → 배당 → 지표)
    RunAll,
}

/// 쉼표 구분 심볼 목록. 주지 않으면 빈 목록 (기본 대상).
fn symbol_list(value: Option<String>) -> Vec<String> {
    value.map(|v| parse_symbols(&[v])).unwrap_or_default()
}

fn indicator_list(value: Option<String>) -> Vec<String> {
    parse_list(value, &DEFAULT_INDICATORS)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(LogConfig::from_env(format!(
        "savvy_collector={level},savvy_data={level}",
        level = cli.log_level
    )))?;

    tracing::info!("Fundamental Savvy Data Collector 시작");

    let config = CollectorConfig::from_env()?;
    let pool = connect_pool(&config.database)
        .await
        .context("데이터베이스 연결 실패")?;
    tracing::info!("데이터베이스 연결 성공");

    let result = run(cli.command, &pool, &config).await;

    pool.close().await;
    tracing::info!("Fundamental Savvy Data Collector 종료");

    result
}

async fn run(command: Commands, pool: &sqlx::PgPool, config: &CollectorConfig) -> anyhow::Result<()> {
    if let Commands::Migrate = command {
        run_migrations(pool).await?;
        tracing::info!("마이그레이션 완료");
        return Ok(());
    }
    if let Commands::Metrics { batch_size } = command {
        let stats = modules::sync_company_metrics(pool, config, batch_size).await?;
        stats.log_summary("기업 지표");
        return Ok(());
    }

    let client = config.fmp_client()?;
    let client = &client;

    let (operation, stats): (&str, SyncStats) = match command {
        Commands::Migrate | Commands::Metrics { .. } => return Ok(()),
        Commands::StockList => ("종목 목록", modules::sync_stock_list(pool, client).await),
        Commands::FsSymbols => (
            "재무제표 종목",
            modules::sync_financial_statement_symbols(pool, client).await,
        ),
        Commands::Sectors => ("섹터", modules::sync_sectors(pool, client).await),
        Commands::Industries => ("산업", modules::sync_industries(pool, client).await),
        Commands::Exchanges => ("거래소", modules::sync_exchanges(pool, client).await),
        Commands::Countries => ("국가", modules::sync_countries(pool, client).await),
        Commands::SymbolChanges => ("심볼 변경", modules::sync_symbol_changes(pool, client).await),
        Commands::Profiles => ("프로필", modules::sync_profiles(pool, client, config).await?),
        Commands::CompanyDetails => (
            "기업 상세",
            modules::sync_company_details(pool, client, config).await?,
        ),
        Commands::Delisted { page } => (
            "상장폐지",
            modules::sync_delisted_companies(pool, client, page).await,
        ),
        Commands::Statements { kind } => (
            "재무제표",
            modules::sync_statements(pool, client, config, &kind.kinds()).await?,
        ),
        Commands::Quotes => ("시세", modules::sync_quotes(pool, client, config).await?),
        Commands::HistoricalPrices { from, to, symbols } => (
            "일봉",
            modules::sync_historical_prices(pool, client, config, from, to, symbol_list(symbols))
                .await?,
        ),
        Commands::IntradayPrices { interval, symbols } => (
            "분봉",
            modules::sync_intraday_prices(pool, client, config, &interval, symbol_list(symbols))
                .await?,
        ),
        Commands::Dividends => ("배당", modules::sync_dividends(pool, client, config).await?),
        Commands::Earnings { limit } => (
            "실적",
            modules::sync_earnings(pool, client, config, limit).await?,
        ),
        Commands::DividendCalendar { from, to } => (
            "배당 캘린더",
            modules::sync_dividend_calendar(pool, client, from, to).await?,
        ),
        Commands::EarningsCalendar { from, to } => (
            "실적 캘린더",
            modules::sync_earnings_calendar(pool, client, from, to).await?,
        ),
        Commands::EconomicIndicators {
            indicators,
            from,
            to,
        } => (
            "경제 지표",
            modules::sync_economic_indicators(pool, client, indicator_list(indicators), from, to)
                .await?,
        ),
        Commands::TreasuryRates { from, to } => (
            "국채 금리",
            modules::sync_treasury_rates(pool, client, from, to).await?,
        ),
        Commands::EconomicCalendar { from, to } => (
            "경제 캘린더",
            modules::sync_economic_calendar(pool, client, from, to).await?,
        ),
        Commands::RiskPremium => ("위험 프리미엄", modules::sync_risk_premium(pool, client).await),
        Commands::SectorPerformance { from, to } => (
            "섹터 성과",
            modules::sync_sector_performance(pool, client, from, to).await?,
        ),
        Commands::IndustryPerformance { from, to } => (
            "산업 성과",
            modules::sync_industry_performance(pool, client, from, to).await?,
        ),
        Commands::MarketMovers => (
            "상위 종목",
            modules::sync_market_movers(pool, client, Local::now().date_naive()).await,
        ),
        Commands::News { page, limit } => ("뉴스", modules::sync_news(pool, client, page, limit).await),
        Commands::SecFilings { form_type, page } => (
            "SEC 공시",
            modules::sync_sec_filings(pool, client, config, form_type.as_deref(), page).await?,
        ),
        Commands::RunAll => {
            run_all(pool, client, config).await?;
            return Ok(());
        }
    };

    stats.log_summary(operation);
    Ok(())
}

async fn run_all(
    pool: &sqlx::PgPool,
    client: &savvy_data::FmpClient,
    config: &CollectorConfig,
) -> anyhow::Result<()> {
    tracing::info!("=== 전체 워크플로우 시작 ===");
    let mut total = SyncStats::new();
    let mut step = |name: &str, stats: SyncStats| {
        stats.log_summary(name);
        total.merge(&stats);
    };

    tracing::info!("Step 1/9: 종목 목록");
    step("종목 목록", modules::sync_stock_list(pool, client).await);

    tracing::info!("Step 2/9: 재무제표 종목");
    step(
        "재무제표 종목",
        modules::sync_financial_statement_symbols(pool, client).await,
    );

    tracing::info!("Step 3/9: 섹터");
    step("섹터", modules::sync_sectors(pool, client).await);

    tracing::info!("Step 4/9: 산업");
    step("산업", modules::sync_industries(pool, client).await);

    tracing::info!("Step 5/9: 프로필");
    step("프로필", modules::sync_profiles(pool, client, config).await?);

    tracing::info!("Step 6/9: 재무제표");
    step(
        "재무제표",
        modules::sync_statements(pool, client, config, &StatementKind::ALL).await?,
    );

    tracing::info!("Step 7/9: 시세");
    step("시세", modules::sync_quotes(pool, client, config).await?);

    tracing::info!("Step 8/9: 배당");
    step("배당", modules::sync_dividends(pool, client, config).await?);

    tracing::info!("Step 9/9: 기업 지표");
    step(
        "기업 지표",
        modules::sync_company_metrics(pool, config, None).await?,
    );

    total.log_summary("전체 워크플로우");
    tracing::info!("=== 전체 워크플로우 완료 ===");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_statements_kind() {
        let cli = Cli::try_parse_from(["savvy-collector", "statements", "--kind", "cash-flow"]).unwrap();
        match cli.command {
            Commands::Statements { kind } => {
                assert_eq!(kind.kinds(), vec![StatementKind::CashFlow])
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_parse_date_arguments() {
        let cli = Cli::try_parse_from([
            "savvy-collector",
            "treasury-rates",
            "--from",
            "2024-01-01",
            "--to",
            "2024-03-31",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::TreasuryRates { .. }));

        let bad = Cli::try_parse_from([
            "savvy-collector",
            "treasury-rates",
            "--from",
            "01/01/2024",
            "--to",
            "2024-03-31",
        ]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_indicator_list_defaults() {
        assert_eq!(indicator_list(None).len(), DEFAULT_INDICATORS.len());
        assert_eq!(indicator_list(Some("GDP, CPI".to_string())), vec!["GDP", "CPI"]);
        assert_eq!(symbol_list(Some("aapl,msft".to_string())), vec!["AAPL", "MSFT"]);
    }
}
