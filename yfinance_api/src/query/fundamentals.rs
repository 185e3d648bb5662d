use super::{
    common::{QueryCommon, WindowedQuery},
    Query,
};

/// Parameters for the fundamentals timeseries endpoint.
///
/// Each requested type is a line-item name prefixed with its reporting
/// interval, e.g. `quarterlyInterestExpense`.
#[derive(Clone, Debug, Default)]
pub struct FundamentalsQuery {
    pub common: QueryCommon,
    pub types: Vec<String>,
}

impl Query for FundamentalsQuery {
    fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("type".to_string(), self.types.join(","))];
        self.common.add_to_params(&mut params);
        params
    }
}

impl WindowedQuery for FundamentalsQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}

impl FundamentalsQuery {
    pub fn with_type(mut self, type_name: &str) -> Self {
        self.types.push(type_name.to_string());
        self
    }
    pub fn with_types(mut self, type_names: &[String]) -> Self {
        self.types.extend_from_slice(type_names);
        self
    }
}
