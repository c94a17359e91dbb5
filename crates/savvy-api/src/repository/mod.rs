//! 데이터베이스 조회 로직.
//!
//! 라우트 핸들러에서 SQL을 분리합니다. 모든 Repository는 정적 메서드만 가집니다.

pub mod companies;
pub mod company_data;
pub mod directory;
pub mod dividends_earnings;
pub mod economics;
pub mod financials;
pub mod market;
pub mod metrics;
pub mod news;
pub mod prices;
pub mod sec;

pub use companies::{Company, CompanyCreate, CompanyRepository, CompanyUpdate};
pub use company_data::CompanyDataRepository;
pub use directory::DirectoryRepository;
pub use dividends_earnings::DividendsEarningsRepository;
pub use economics::{EconomicsRepository, IndicatorFilter};
pub use financials::FinancialsRepository;
pub use market::MarketRepository;
pub use metrics::{page_count, MetricsFilter, MetricsRepository};
pub use news::NewsRepository;
pub use prices::PriceRepository;
pub use sec::SecFilingRepository;
