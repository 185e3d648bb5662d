mod common;
pub use self::common::ProviderError;

mod chart;
pub use self::chart::{
    AdjCloseIndicator, ChartEnvelope, ChartMeta, ChartResponse, ChartResult, Indicators,
    QuoteIndicator,
};

mod fundamentals;
pub use self::fundamentals::{
    ReportedValue, TimeseriesDataPoint, TimeseriesEnvelope, TimeseriesMeta, TimeseriesResponse,
    TimeseriesResult,
};

mod options;
pub use self::options::{
    ContractQuote, OptionBatch, OptionChainEnvelope, OptionChainResponse, OptionChainResult,
};

mod esg;
pub use self::esg::{EsgChartEnvelope, EsgChartResponse, EsgChartResult, EsgSeries};

mod quote_summary;
pub use self::quote_summary::{QuoteSummaryEnvelope, QuoteSummaryResponse};
