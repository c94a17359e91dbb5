//! 외부 데이터 제공자.
//!
//! - [`fmp`]: Financial Modeling Prep (기업/재무/시세/거시경제/뉴스)

pub mod fmp;

pub use fmp::FmpClient;
