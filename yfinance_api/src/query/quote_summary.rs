use super::Query;

/// Every module the quote-summary endpoint understands. Not all of them
/// apply to every security type.
pub const QUOTE_SUMMARY_MODULES: &[&str] = &[
    "assetProfile",
    "balanceSheetHistory",
    "balanceSheetHistoryQuarterly",
    "calendarEvents",
    "cashflowStatementHistory",
    "cashflowStatementHistoryQuarterly",
    "defaultKeyStatistics",
    "earnings",
    "earningsHistory",
    "earningsTrend",
    "esgScores",
    "financialData",
    "fundOwnership",
    "fundPerformance",
    "fundProfile",
    "incomeStatementHistory",
    "incomeStatementHistoryQuarterly",
    "indexTrend",
    "industryTrend",
    "insiderHolders",
    "insiderTransactions",
    "institutionOwnership",
    "majorDirectHolders",
    "majorHoldersBreakdown",
    "netSharePurchaseActivity",
    "price",
    "quoteType",
    "recommendationTrend",
    "secFilings",
    "sectorTrend",
    "summaryDetail",
    "summaryProfile",
    "topHoldings",
    "upgradeDowngradeHistory",
];

/// Parameters for the quote-summary endpoint.
#[derive(Clone, Debug, Default)]
pub struct QuoteSummaryQuery {
    pub modules: Vec<String>,
}

impl Query for QuoteSummaryQuery {
    fn params(&self) -> Vec<(String, String)> {
        let modules = if self.modules.is_empty() {
            QUOTE_SUMMARY_MODULES.join(",")
        } else {
            self.modules.join(",")
        };
        vec![("modules".to_string(), modules)]
    }
}

impl QuoteSummaryQuery {
    pub fn with_module(mut self, module: &str) -> Self {
        self.modules.push(module.to_string());
        self
    }
    pub fn with_modules(mut self, modules: &[String]) -> Self {
        self.modules.extend_from_slice(modules);
        self
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    #[test]
    fn test_quote_summary_query() {
        let url = Url::parse("https://example.com").unwrap();

        insta::assert_snapshot!(QuoteSummaryQuery::default()
            .with_module("quoteType")
            .with_modules(&["price".to_string(), "summaryDetail".to_string()])
            .add_to_url(&url)
            .to_string(), @"https://example.com/?modules=quoteType%2Cprice%2CsummaryDetail");
    }

    #[test]
    fn empty_module_list_requests_everything() {
        let params = QuoteSummaryQuery::default().params();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].1.split(',').count(), QUOTE_SUMMARY_MODULES.len());
    }
}
