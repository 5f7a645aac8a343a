//! `get_stock_quote`, backed by the Yahoo Finance chart endpoint.

use async_trait::async_trait;
use tracing::debug;

use super::{required_str, Tool};
use crate::ToolDefinition;

/// Yahoo rejects requests without a browser-like user agent.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; parley/0.1)";

pub struct StockQuoteTool {
    http: reqwest::Client,
    base_url: String,
}

impl StockQuoteTool {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, ticker: &str) -> Result<reqwest::Url, String> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid quote service URL '{}': {e}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| format!("Invalid quote service URL '{}'", self.base_url))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker]);
        url.query_pairs_mut()
            .append_pair("range", "1d")
            .append_pair("interval", "1d");
        Ok(url)
    }
}

/// Turn a chart response into one line of text.
pub(crate) fn summarize_chart(ticker: &str, json: &serde_json::Value) -> String {
    let chart = &json["chart"];
    if let Some(description) = chart["error"]["description"].as_str() {
        return format!("Could not get a quote for {ticker}: {description}");
    }

    let Some(meta) = chart["result"]
        .as_array()
        .and_then(|results| results.first())
        .map(|result| &result["meta"])
    else {
        return format!("No quote data found for {ticker}");
    };

    let Some(price) = meta["regularMarketPrice"].as_f64() else {
        return format!("No quote data found for {ticker}");
    };

    let symbol = meta["symbol"].as_str().unwrap_or(ticker);
    let currency = meta["currency"].as_str().unwrap_or("");
    let previous = meta["chartPreviousClose"]
        .as_f64()
        .or_else(|| meta["previousClose"].as_f64());

    let mut text = format!("{symbol}: {price:.2} {currency}");
    if let Some(previous) = previous {
        text.push_str(&format!(" (previous close: {previous:.2})"));
    }
    text.trim_end().to_string()
}

#[async_trait]
impl Tool for StockQuoteTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_stock_quote".to_string(),
            description: "Get the latest market price for a stock, index or currency pair."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "ticker": {
                        "type": "string",
                        "description": "Ticker symbol, e.g. \"PETR4.SA\", \"AAPL\", \"BRL=X\" or \"EURBRL=X\""
                    }
                },
                "required": ["ticker"]
            }),
        }
    }

    async fn invoke(&self, args: &serde_json::Value) -> String {
        let ticker = match required_str(args, "ticker") {
            Ok(ticker) => ticker,
            Err(message) => return message,
        };
        let url = match self.url_for(ticker) {
            Ok(url) => url,
            Err(message) => return message,
        };

        debug!(%ticker, "quote lookup");

        let response = match self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return format!("Error connecting to the quote service: {e}"),
        };

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return format!(
                "Could not get a quote for {ticker}. Status: {}",
                status.as_u16()
            );
        }

        match response.json::<serde_json::Value>().await {
            Ok(json) => summarize_chart(ticker, &json),
            Err(e) => format!("Could not read the quote for {ticker}: {e}"),
        }
    }
}
