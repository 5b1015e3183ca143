use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::config::Config;
use crate::error::Result;
use crate::tools::model::{Tool, ToolOutcome};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const ARTICLE_COUNT: usize = 5;

/// News lookup against NewsAPI.org. The literal query "headlines" means
/// US top headlines; anything else searches everything, newest first.
pub struct NewsTool {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl NewsTool {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.news_api_key.clone(),
            base_url: "https://newsapi.org/v2".to_string(),
        }
    }
}

#[async_trait]
impl Tool for NewsTool {
    fn name(&self) -> &str {
        "news"
    }

    fn description(&self) -> &str {
        "Get latest news articles on a topic or from top headlines. Input: search query or 'headlines' for top news"
    }

    async fn execute(&self, input: &Value) -> Result<ToolOutcome> {
        let Some(query) = input.as_str().filter(|q| !q.is_empty()) else {
            return Ok(ToolOutcome::fail("news tool expects a search query"));
        };

        let count = ARTICLE_COUNT.to_string();
        let request = if query.eq_ignore_ascii_case("headlines") {
            self.client
                .get(format!("{}/top-headlines", self.base_url))
                .query(&[
                    ("apiKey", self.api_key.as_str()),
                    ("country", "us"),
                    ("pageSize", count.as_str()),
                ])
        } else {
            self.client
                .get(format!("{}/everything", self.base_url))
                .query(&[
                    ("apiKey", self.api_key.as_str()),
                    ("q", query),
                    ("pageSize", count.as_str()),
                    ("sortBy", "publishedAt"),
                    ("language", "en"),
                ])
        };

        let response = match request.timeout(REQUEST_TIMEOUT).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Ok(ToolOutcome::fail("Request timed out")),
            Err(e) => return Ok(ToolOutcome::fail(e.to_string())),
        };

        match response.status().as_u16() {
            200 => {
                let data: Value = match response.json().await {
                    Ok(data) => data,
                    Err(e) => return Ok(ToolOutcome::fail(e.to_string())),
                };
                let articles: Vec<Value> = data["articles"]
                    .as_array()
                    .map(|articles| {
                        articles
                            .iter()
                            .take(ARTICLE_COUNT)
                            .map(|article| {
                                json!({
                                    "title": article["title"],
                                    "source": article["source"]["name"],
                                    "description": article["description"],
                                    "url": article["url"],
                                    "published_at": article["publishedAt"],
                                })
                            })
                            .collect()
                    })
                    .unwrap_or_default();

                let mut payload = Map::new();
                payload.insert("query".to_string(), json!(query));
                payload.insert(
                    "total_results".to_string(),
                    data.get("totalResults").cloned().unwrap_or(json!(0)),
                );
                payload.insert("articles".to_string(), Value::Array(articles));
                Ok(ToolOutcome::ok(payload))
            }
            401 => Ok(ToolOutcome::fail("Invalid API key")),
            429 => Ok(ToolOutcome::fail("Rate limit exceeded")),
            status => Ok(ToolOutcome::fail(format!("API error: {status}"))),
        }
    }
}
