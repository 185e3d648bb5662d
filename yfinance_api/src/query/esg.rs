use super::Query;

/// Parameters for the ESG chart endpoint. The symbol itself is added by
/// the endpoint, so the query carries nothing else.
#[derive(Clone, Copy, Debug, Default)]
pub struct EsgQuery;

impl Query for EsgQuery {
    fn params(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}
