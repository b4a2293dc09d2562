//! Web search tool backed by the Tavily search API

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::logging::Logger;
use crate::tools::handler::{required_str, ToolHandler};
use crate::types::{Tool, ToolOutcome};

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'a str,
    include_answer: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

/// Render a search response: the direct answer when the API produced one,
/// otherwise the hits as a short list
fn render_response(response: SearchResponse) -> Option<String> {
    if let Some(answer) = response.answer.filter(|a| !a.trim().is_empty()) {
        return Some(answer);
    }
    if response.results.is_empty() {
        return None;
    }
    Some(
        response
            .results
            .iter()
            .map(|hit| format!("- {} ({})\n  {}", hit.title, hit.url, hit.content))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// `tavily_search`: question-answering web search
pub struct TavilySearch {
    api_key: Option<String>,
    endpoint: String,
    client: reqwest::Client,
    logger: Arc<dyn Logger>,
}

impl TavilySearch {
    pub fn new(api_key: Option<String>, logger: Arc<dyn Logger>) -> Self {
        Self {
            api_key,
            endpoint: TAVILY_SEARCH_URL.to_string(),
            client: reqwest::Client::new(),
            logger,
        }
    }

    /// Point the tool at a different endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn search(&self, api_key: &str, query: &str) -> Result<String, String> {
        let body = SearchRequest {
            api_key,
            query,
            search_depth: "advanced",
            include_answer: true,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(format!("search API returned {}: {}", status, text));
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| e.to_string())?;
        render_response(parsed).ok_or_else(|| "no results".to_string())
    }
}

#[async_trait]
impl ToolHandler for TavilySearch {
    fn descriptor(&self) -> Tool {
        Tool::new(
            "tavily_search",
            "Perform a web search using Tavily API to get up-to-date information or additional context. Use this when you need current information or feel a search could provide a better answer.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        }))
    }

    async fn execute(&self, input: &Value) -> ToolOutcome {
        let query = match required_str(input, "query", "performing search") {
            Ok(query) => query,
            Err(failed) => return failed,
        };
        let Some(api_key) = self.api_key.as_deref() else {
            return ToolOutcome::failed("Error performing search: TAVILY_API_KEY is not set");
        };

        self.logger.debug(&format!("[TavilySearch] query: {}", query));
        match self.search(api_key, query).await {
            Ok(answer) => ToolOutcome::ok(answer),
            Err(e) => ToolOutcome::failed(format!("Error performing search: {}", e)),
        }
    }
}
