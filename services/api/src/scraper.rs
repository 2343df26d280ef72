//! Scraper Endpoints
//!
//! Fetches a web page, extracts its readable text, and uses the
//! completion service to pull structured interview problems out of it.
//! This runs *before* a session is created; the extracted content reaches
//! the orchestrator as pass-through topic text.

use axum::{extract::State, response::Json};
use interview_core::llm::{ChatMessage, CompletionClient};
use scraper::Html;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::{
    handlers::ApiError,
    models::{ExtractedProblem, PreviewResponse, ScrapePayload, ScrapeResponse},
    state::AppState,
};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_EXTRACTED_TEXT: usize = 15_000;
const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const EXTRACTION_SYSTEM_PROMPT: &str = "You are a helpful assistant that extracts structured data from text. Always respond with valid JSON only.";

/// Failure to parse the completion service's structured extraction reply.
/// Absorbed into a raw-content fallback at the handler boundary.
#[derive(Debug, thiserror::Error)]
#[error("structured extraction failed: {0}")]
pub struct ExtractionError(#[from] serde_json::Error);

/// Loosely-typed problem as returned by the completion service.
#[derive(Debug, Deserialize)]
struct RawProblem {
    name: Option<String>,
    content: Option<String>,
    difficulty: Option<String>,
}

/// Cuts `text` at `max_bytes`, backing up to the nearest char boundary.
fn clip(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

async fn fetch_page_content(http: &reqwest::Client, url: &str) -> Result<String, ApiError> {
    let response = http
        .get(url)
        .header(reqwest::header::USER_AGENT, DESKTOP_USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .map_err(|err| ApiError::InternalServerError(anyhow::anyhow!("Error fetching URL: {err}")))?;

    if !response.status().is_success() {
        return Err(ApiError::BadRequest(format!(
            "Failed to fetch URL: status {}",
            response.status()
        )));
    }

    response
        .text()
        .await
        .map_err(|err| ApiError::InternalServerError(anyhow::anyhow!("Error reading body: {err}")))
}

/// Extracts readable text from HTML, skipping script/style/nav/chrome
/// elements, capped at [`MAX_EXTRACTED_TEXT`] bytes.
fn extract_text_from_html(html: &str) -> String {
    const SKIPPED: [&str; 6] = ["script", "style", "nav", "footer", "header", "noscript"];

    let document = Html::parse_document(html);
    let mut lines: Vec<&str> = Vec::new();
    for node in document.tree.nodes() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let in_skipped_element = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| SKIPPED.contains(&element.name()))
        });
        if in_skipped_element {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed);
        }
    }

    let text = lines.join("\n");
    clip(&text, MAX_EXTRACTED_TEXT).to_string()
}

fn extraction_prompt(text: &str, url: &str) -> String {
    format!(
        "Analyze the following text from a webpage and extract any interview problems, coding challenges, or practice questions.\n\n\
         For each problem found, extract:\n\
         1. name: The title or name of the problem\n\
         2. content: The full problem description/statement\n\
         3. difficulty: If mentioned (easy/medium/hard), otherwise null\n\n\
         Return the results as a JSON array of objects with keys: name, content, difficulty.\n\
         If no problems are found, return an empty array.\n\n\
         Text from {url}:\n\
         ---\n\
         {text}\n\
         ---\n\n\
         Return ONLY valid JSON, no other text."
    )
}

fn parse_problems(reply: &str) -> Result<Vec<ExtractedProblem>, ExtractionError> {
    let raw: Vec<RawProblem> = serde_json::from_str(reply)?;
    Ok(raw
        .into_iter()
        .map(|problem| ExtractedProblem {
            name: problem.name.unwrap_or_else(|| "Unnamed Problem".to_string()),
            content: problem.content.unwrap_or_default(),
            difficulty: problem.difficulty,
        })
        .collect())
}

async fn extract_problems_with_ai(
    llm: &dyn CompletionClient,
    text: &str,
    url: &str,
) -> Result<Vec<ExtractedProblem>, ApiError> {
    let prompt = extraction_prompt(text, url);
    let reply = llm
        .complete(EXTRACTION_SYSTEM_PROMPT, &[ChatMessage::user(prompt)])
        .await?;

    match parse_problems(&reply) {
        Ok(problems) => Ok(problems),
        Err(err) => {
            // Degrade to a single pass-through problem rather than failing.
            warn!(error = %err, "falling back to raw page content");
            Ok(vec![ExtractedProblem {
                name: "Extracted Content".to_string(),
                content: clip(text, 2_000).to_string(),
                difficulty: None,
            }])
        }
    }
}

/// Scrape a URL and extract interview problems using AI.
#[utoipa::path(
    post,
    path = "/api/scraper/extract",
    request_body = ScrapePayload,
    responses(
        (status = 200, description = "Extracted problems", body = ScrapeResponse),
        (status = 400, description = "Bad request", body = crate::models::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::models::ErrorResponse)
    ),
    tag = "Scraper"
)]
pub async fn extract_problems(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ScrapePayload>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let html = fetch_page_content(&state.http, &payload.url).await?;
    let text = extract_text_from_html(&html);

    if text.is_empty() {
        return Err(ApiError::BadRequest(
            "No readable content found on the page".to_string(),
        ));
    }

    let mut problems = extract_problems_with_ai(state.llm.as_ref(), &text, &payload.url).await?;
    if problems.is_empty() {
        problems = vec![ExtractedProblem {
            name: "Page Content".to_string(),
            content: clip(&text, 3_000).to_string(),
            difficulty: None,
        }];
    }

    Ok(Json(ScrapeResponse {
        problems,
        source_url: payload.url,
    }))
}

/// Preview the extracted text from a URL without AI processing.
#[utoipa::path(
    post,
    path = "/api/scraper/preview",
    request_body = ScrapePayload,
    responses(
        (status = 200, description = "Extracted text preview", body = PreviewResponse),
        (status = 400, description = "Bad request", body = crate::models::ErrorResponse)
    ),
    tag = "Scraper"
)]
pub async fn preview_url(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ScrapePayload>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let html = fetch_page_content(&state.http, &payload.url).await?;
    let text = extract_text_from_html(&html);

    Ok(Json(PreviewResponse {
        url: payload.url,
        text_length: text.len(),
        preview: clip(&text, 1_000).to_string(),
        full_text: text,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_skips_script_and_style() {
        let html = r#"
            <html>
              <head><style>body { color: red; }</style></head>
              <body>
                <nav>Navigation links</nav>
                <main><p>Problem: implement two-sum.</p></main>
                <script>console.log("tracking");</script>
                <footer>Copyright</footer>
              </body>
            </html>
        "#;
        let text = extract_text_from_html(html);
        assert!(text.contains("Problem: implement two-sum."));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("Navigation links"));
        assert!(!text.contains("Copyright"));
    }

    #[test]
    fn test_clip_respects_char_boundaries() {
        let text = "héllo wörld";
        let clipped = clip(text, 2);
        assert_eq!(clipped, "h");

        assert_eq!(clip("short", 100), "short");
    }

    #[test]
    fn test_parse_problems_fills_defaults() {
        let reply = r#"[
            {"name": "Two Sum", "content": "Find two numbers...", "difficulty": "easy"},
            {"content": "Unnamed statement"}
        ]"#;
        let problems = parse_problems(reply).unwrap();
        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].name, "Two Sum");
        assert_eq!(problems[0].difficulty.as_deref(), Some("easy"));
        assert_eq!(problems[1].name, "Unnamed Problem");
        assert!(problems[1].difficulty.is_none());
    }

    #[test]
    fn test_parse_problems_rejects_non_array_reply() {
        assert!(parse_problems("Here are the problems I found:").is_err());
        assert!(parse_problems(r#"{"name": "not a list"}"#).is_err());
    }
}
