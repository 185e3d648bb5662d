use std::str::FromStr;

use super::{
    common::{QueryCommon, WindowedQuery},
    Query,
};

/// Parameters for the chart (price bar) endpoint.
#[derive(Clone, Debug)]
pub struct ChartQuery {
    pub common: QueryCommon,
    pub interval: ChartInterval,
    pub include_pre_post: bool,
    pub events: bool,
}

impl Default for ChartQuery {
    fn default() -> Self {
        Self {
            common: QueryCommon::default(),
            interval: ChartInterval::OneDay,
            include_pre_post: false,
            events: true,
        }
    }
}

impl Query for ChartQuery {
    fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        self.common.add_to_params(&mut params);
        params.push(("interval".to_string(), self.interval.to_string()));
        params.push((
            "includePrePost".to_string(),
            self.include_pre_post.to_string(),
        ));
        if self.events {
            params.push(("events".to_string(), "div,splits".to_string()));
        }
        params
    }
}

impl WindowedQuery for ChartQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}

impl ChartQuery {
    pub fn with_interval(mut self, interval: ChartInterval) -> Self {
        self.interval = interval;
        self
    }

    /// Include pre- and post-market bars for intraday intervals.
    pub fn with_pre_post(mut self, include_pre_post: bool) -> Self {
        self.include_pre_post = include_pre_post;
        self
    }

    /// Ask for dividend and split events alongside the bars.
    pub fn with_events(mut self, events: bool) -> Self {
        self.events = events;
        self
    }
}

/// Bar sizes accepted by the chart endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartInterval {
    OneMinute,
    TwoMinutes,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    SixtyMinutes,
    NinetyMinutes,
    OneHour,
    OneDay,
    FiveDays,
    OneWeek,
    OneMonth,
    ThreeMonths,
}

impl ChartInterval {
    /// True for bars shorter than one trading day.
    pub fn is_intraday(&self) -> bool {
        matches!(
            self,
            ChartInterval::OneMinute
                | ChartInterval::TwoMinutes
                | ChartInterval::FiveMinutes
                | ChartInterval::FifteenMinutes
                | ChartInterval::ThirtyMinutes
                | ChartInterval::SixtyMinutes
                | ChartInterval::NinetyMinutes
                | ChartInterval::OneHour
        )
    }
}

impl std::fmt::Display for ChartInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ChartInterval::OneMinute => "1m",
                ChartInterval::TwoMinutes => "2m",
                ChartInterval::FiveMinutes => "5m",
                ChartInterval::FifteenMinutes => "15m",
                ChartInterval::ThirtyMinutes => "30m",
                ChartInterval::SixtyMinutes => "60m",
                ChartInterval::NinetyMinutes => "90m",
                ChartInterval::OneHour => "1h",
                ChartInterval::OneDay => "1d",
                ChartInterval::FiveDays => "5d",
                ChartInterval::OneWeek => "1wk",
                ChartInterval::OneMonth => "1mo",
                ChartInterval::ThreeMonths => "3mo",
            }
        )
    }
}

impl FromStr for ChartInterval {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(ChartInterval::OneMinute),
            "2m" => Ok(ChartInterval::TwoMinutes),
            "5m" => Ok(ChartInterval::FiveMinutes),
            "15m" => Ok(ChartInterval::FifteenMinutes),
            "30m" => Ok(ChartInterval::ThirtyMinutes),
            "60m" => Ok(ChartInterval::SixtyMinutes),
            "90m" => Ok(ChartInterval::NinetyMinutes),
            "1h" => Ok(ChartInterval::OneHour),
            "1d" => Ok(ChartInterval::OneDay),
            "5d" => Ok(ChartInterval::FiveDays),
            "1wk" => Ok(ChartInterval::OneWeek),
            "1mo" => Ok(ChartInterval::OneMonth),
            "3mo" => Ok(ChartInterval::ThreeMonths),
            _ => Err(()),
        }
    }
}
