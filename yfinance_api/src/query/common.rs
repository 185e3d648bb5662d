//! Shared query infrastructure: the [`Query`] trait and the epoch window
//! carried by [`QueryCommon`].

use url::Url;

/// Trait implemented by all query builders. Provides parameter listing
/// and URL serialization.
pub trait Query {
    /// Ordered `(name, value)` pairs sent with the request.
    fn params(&self) -> Vec<(String, String)>;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        for (name, value) in self.params() {
            url.query_pairs_mut().append_pair(&name, &value);
        }
        url
    }
}

/// Builder methods for queries bounded by an epoch-second window.
pub trait WindowedQuery: Query {
    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the window start and end, in Unix epoch seconds.
    fn with_period(mut self, period1: i64, period2: i64) -> Self
    where
        Self: Sized,
    {
        let common = self.get_common();
        common.period1 = Some(period1);
        common.period2 = Some(period2);
        self
    }
}

/// Fields shared by windowed queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryCommon {
    /// Window start, epoch seconds. `None` leaves the provider default.
    pub period1: Option<i64>,
    /// Window end, epoch seconds.
    pub period2: Option<i64>,
}

impl QueryCommon {
    /// Appends the window parameters, when set.
    pub fn add_to_params(&self, params: &mut Vec<(String, String)>) {
        if let Some(period1) = self.period1 {
            params.push(("period1".to_string(), period1.to_string()));
        }
        if let Some(period2) = self.period2 {
            params.push(("period2".to_string(), period2.to_string()));
        }
    }
}
