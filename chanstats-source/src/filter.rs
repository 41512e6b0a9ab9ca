//! Query filter model for the statistics endpoints

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parameter subset accepted by the published-video count endpoints.
///
/// The backend rejects nothing, but only these keys affect the result, so
/// the dashboard sends an allow-listed subset.
const PUBLISHED_COUNT_KEYS: &[&str] =
    &["date_to", "date_from", "channel_id", "channel_type", "user_id"];

/// Active statistics filter: date range, channel, user and tag selection.
///
/// Built by the dashboard's filter controls and passed unchanged to every
/// fetch; the aggregation layer never sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticFilter {
    pub id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub video_id: Option<i64>,
    pub channel_id: Option<i64>,
    pub channel_type: Option<String>,
    pub user_id: Option<i64>,
    /// Tag selection ("articles" in the backend's vocabulary)
    pub articles: Vec<String>,
    pub date_published_from: Option<NaiveDate>,
    pub date_published_to: Option<NaiveDate>,
}

impl StatisticFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to records dated within the inclusive range
    pub fn with_date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    /// Restrict to a single channel
    pub fn with_channel(mut self, channel_id: i64) -> Self {
        self.channel_id = Some(channel_id);
        self
    }

    /// Restrict to a channel type ("youtube", "tiktok", ...)
    pub fn with_channel_type(mut self, channel_type: impl Into<String>) -> Self {
        self.channel_type = Some(channel_type.into());
        self
    }

    /// Restrict to a single user's channels
    pub fn with_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Restrict to a single video
    pub fn with_video(mut self, video_id: i64) -> Self {
        self.video_id = Some(video_id);
        self
    }

    /// Restrict to videos carrying the given tags
    pub fn with_articles(mut self, articles: Vec<String>) -> Self {
        self.articles = articles;
        self
    }

    /// Query parameters for the statistics endpoints.
    ///
    /// Unset and empty values are dropped; each tag becomes its own
    /// `articles` pair.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_int(&mut params, "id", self.id);
        push_date(&mut params, "date_to", self.date_to);
        push_date(&mut params, "date_from", self.date_from);
        push_int(&mut params, "video_id", self.video_id);
        push_int(&mut params, "channel_id", self.channel_id);
        push_str(&mut params, "channel_type", self.channel_type.as_deref());
        push_int(&mut params, "user_id", self.user_id);
        for article in &self.articles {
            if !article.is_empty() {
                params.push(("articles", article.clone()));
            }
        }
        push_date(&mut params, "date_published_to", self.date_published_to);
        push_date(&mut params, "date_published_from", self.date_published_from);
        params
    }

    /// Query parameters for the published-video count endpoints:
    /// the allow-listed subset of [`StatisticFilter::query_params`].
    pub fn published_query_params(&self) -> Vec<(&'static str, String)> {
        self.query_params()
            .into_iter()
            .filter(|(key, _)| PUBLISHED_COUNT_KEYS.contains(key))
            .collect()
    }
}

fn push_int(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<i64>) {
    if let Some(value) = value {
        params.push((key, value.to_string()));
    }
}

fn push_date(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<NaiveDate>) {
    if let Some(value) = value {
        params.push((key, value.format("%Y-%m-%d").to_string()));
    }
}

fn push_str(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            params.push((key, value.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_filter_has_no_params() {
        assert!(StatisticFilter::new().query_params().is_empty());
    }

    #[test]
    fn test_query_params() {
        let filter = StatisticFilter::new()
            .with_date_range(date(2025, 1, 1), date(2025, 3, 31))
            .with_channel(7)
            .with_articles(vec!["promo".to_string(), "launch".to_string()]);

        let params = filter.query_params();
        assert!(params.contains(&("date_from", "2025-01-01".to_string())));
        assert!(params.contains(&("date_to", "2025-03-31".to_string())));
        assert!(params.contains(&("channel_id", "7".to_string())));
        assert_eq!(
            params.iter().filter(|(key, _)| *key == "articles").count(),
            2
        );
    }

    #[test]
    fn test_empty_strings_are_dropped() {
        let filter = StatisticFilter {
            channel_type: Some(String::new()),
            articles: vec![String::new()],
            ..StatisticFilter::default()
        };
        assert!(filter.query_params().is_empty());
    }

    #[test]
    fn test_published_params_are_allow_listed() {
        let filter = StatisticFilter::new()
            .with_date_range(date(2025, 1, 1), date(2025, 3, 31))
            .with_channel(7)
            .with_video(42)
            .with_articles(vec!["promo".to_string()]);

        let params = filter.published_query_params();
        assert!(params.contains(&("channel_id", "7".to_string())));
        assert!(params.iter().all(|(key, _)| *key != "video_id"));
        assert!(params.iter().all(|(key, _)| *key != "articles"));
    }
}
