use super::Query;

/// Parameters for the options endpoint. Without a date the provider
/// returns the nearest expiration.
#[derive(Clone, Copy, Debug, Default)]
pub struct OptionsQuery {
    pub date: Option<i64>,
}

impl Query for OptionsQuery {
    fn params(&self) -> Vec<(String, String)> {
        match self.date {
            Some(date) => vec![("date".to_string(), date.to_string())],
            None => Vec::new(),
        }
    }
}

impl OptionsQuery {
    /// Selects one expiration, in epoch seconds as listed in `expirationDates`.
    pub fn with_expiration(mut self, date: i64) -> Self {
        self.date = Some(date);
        self
    }
}
