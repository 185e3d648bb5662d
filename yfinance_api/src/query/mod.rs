mod common;
pub use self::common::{Query, QueryCommon, WindowedQuery};

mod chart;
pub use self::chart::{ChartInterval, ChartQuery};

mod fundamentals;
pub use self::fundamentals::FundamentalsQuery;

mod options;
pub use self::options::OptionsQuery;

mod esg;
pub use self::esg::EsgQuery;

mod quote_summary;
pub use self::quote_summary::{QuoteSummaryQuery, QUOTE_SUMMARY_MODULES};
