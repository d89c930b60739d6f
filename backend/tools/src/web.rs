//! Web search via the DuckDuckGo Instant Answer API (no key required).
//!
//! The Health Assessor uses this to cross-reference ingredients for side
//! effects, studies, and regulatory warnings before committing to a verdict.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use glowcheck_core::Tool;

const DEFAULT_MAX_RESULTS: usize = 5;

/// Input for the web_search tool.
#[derive(Debug, Deserialize)]
pub struct WebSearchInput {
    pub query: String,
    pub max_results: Option<usize>,
}

/// A single search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    pub snippet: String,
}

pub struct WebSearchTool {
    client: Client,
}

impl WebSearchTool {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for up-to-date information about an ingredient, study, or regulation. \
         Returns a list of result URLs with snippets."
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of results (default 5, max 10)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<String> {
        let input: WebSearchInput = serde_json::from_value(args)?;
        let hits = search(&self.client, &input).await?;
        debug!(query = %input.query, hits = hits.len(), "web search finished");
        Ok(format_hits(&input.query, &hits))
    }
}

/// Search the web using the DuckDuckGo Instant Answer API.
async fn search(client: &Client, input: &WebSearchInput) -> Result<Vec<SearchHit>> {
    let limit = input.max_results.unwrap_or(DEFAULT_MAX_RESULTS).min(10);
    let url = format!(
        "https://api.duckduckgo.com/?q={}&format=json&no_redirect=1&no_html=1",
        urlencoding::encode(&input.query)
    );

    let res: DdgResult = client
        .get(&url)
        .header("User-Agent", "Glowcheck/0.1")
        .send()
        .await?
        .json()
        .await?;

    Ok(parse_hits(res, limit))
}

#[derive(Debug, Deserialize)]
struct DdgResult {
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<DdgTopic>,
}

#[derive(Debug, Deserialize)]
struct DdgTopic {
    #[serde(rename = "FirstURL")]
    first_url: Option<String>,
    #[serde(rename = "Text")]
    text: Option<String>,
}

fn parse_hits(res: DdgResult, limit: usize) -> Vec<SearchHit> {
    res.related_topics
        .into_iter()
        .filter_map(|t| {
            Some(SearchHit {
                url: t.first_url?,
                snippet: t.text.unwrap_or_default(),
            })
        })
        .take(limit)
        .collect()
}

/// Render hits as a plain-text block the model can read back.
fn format_hits(query: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("No results found for \"{query}\".");
    }
    let mut out = format!("Results for \"{query}\":\n");
    for (i, hit) in hits.iter().enumerate() {
        out.push_str(&format!("{}. {} — {}\n", i + 1, hit.url, hit.snippet));
    }
    out
}
