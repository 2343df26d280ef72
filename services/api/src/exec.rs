//! Code-Execution Proxy
//!
//! Forwards candidate code to a Piston instance for sandboxed execution
//! during live-coding sessions. Pure plumbing: language normalization and
//! timeout forwarding, no state.

use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    handlers::ApiError,
    models::{ExecuteCodePayload, ExecuteCodeResponse, RuntimeView, RuntimesResponse},
    state::AppState,
};

const EXECUTE_TIMEOUT: Duration = Duration::from_secs(30);

/// Pinned runtime versions for the languages the interviewer expects.
const LANGUAGE_VERSIONS: &[(&str, &str)] = &[
    ("python", "3.10.0"),
    ("javascript", "18.15.0"),
    ("typescript", "5.0.3"),
    ("java", "15.0.2"),
    ("cpp", "10.2.0"),
    ("c", "10.2.0"),
    ("go", "1.16.2"),
    ("rust", "1.68.2"),
    ("ruby", "3.0.1"),
];

const FILE_EXTENSIONS: &[(&str, &str)] = &[
    ("python", "py"),
    ("javascript", "js"),
    ("typescript", "ts"),
    ("java", "java"),
    ("cpp", "cpp"),
    ("c", "c"),
    ("go", "go"),
    ("rust", "rs"),
    ("ruby", "rb"),
];

/// Maps common aliases onto Piston language names.
fn normalize_language(language: &str) -> String {
    let lower = language.to_lowercase();
    match lower.as_str() {
        "py" | "python3" => "python".to_string(),
        "js" | "node" => "javascript".to_string(),
        "ts" => "typescript".to_string(),
        "c++" => "cpp".to_string(),
        _ => lower,
    }
}

/// Pinned version for a language, or a wildcard for anything unmapped.
fn version_for(language: &str) -> &'static str {
    LANGUAGE_VERSIONS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, version)| *version)
        .unwrap_or("*")
}

fn file_extension(language: &str) -> &'static str {
    FILE_EXTENSIONS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, ext)| *ext)
        .unwrap_or("txt")
}

#[derive(Debug, Deserialize, Default)]
struct PistonStage {
    #[serde(default)]
    stdout: String,
    #[serde(default)]
    stderr: String,
    #[serde(default)]
    code: i64,
}

#[derive(Debug, Deserialize)]
struct PistonResponse {
    run: Option<PistonStage>,
    compile: Option<PistonStage>,
}

#[derive(Debug, Deserialize)]
struct PistonRuntime {
    language: String,
    version: String,
    #[serde(default)]
    aliases: Vec<String>,
}

fn map_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout("Code execution timed out".to_string())
    } else {
        ApiError::InternalServerError(anyhow::anyhow!("HTTP error: {err}"))
    }
}

/// Execute code via the Piston API.
#[utoipa::path(
    post,
    path = "/api/code/execute",
    request_body = ExecuteCodePayload,
    responses(
        (status = 200, description = "Execution result", body = ExecuteCodeResponse),
        (status = 408, description = "Execution timed out", body = crate::models::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::models::ErrorResponse)
    ),
    tag = "Code Execution"
)]
pub async fn execute_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ExecuteCodePayload>,
) -> Result<Json<ExecuteCodeResponse>, ApiError> {
    let language = normalize_language(&payload.language);
    let request_body = json!({
        "language": language,
        "version": version_for(&language),
        "files": [{
            "name": format!("main.{}", file_extension(&language)),
            "content": payload.code,
        }],
        "stdin": payload.stdin.unwrap_or_default(),
        "args": [],
        "compile_timeout": 10_000,
        "run_timeout": 10_000,
        "compile_memory_limit": -1,
        "run_memory_limit": -1,
    });

    let response = state
        .http
        .post(format!("{}/execute", state.config.piston_url))
        .json(&request_body)
        .timeout(EXECUTE_TIMEOUT)
        .send()
        .await
        .map_err(map_transport_error)?;

    if !response.status().is_success() {
        let status = response.status();
        let detail = response.text().await.unwrap_or_default();
        return Err(ApiError::InternalServerError(anyhow::anyhow!(
            "Piston API error ({status}): {detail}"
        )));
    }

    let result: PistonResponse = response
        .json()
        .await
        .map_err(|err| ApiError::InternalServerError(anyhow::anyhow!("Invalid Piston reply: {err}")))?;

    let run = result.run.unwrap_or_default();
    let mut stderr = run.stderr;
    if let Some(compile) = result.compile {
        if !compile.stderr.is_empty() {
            stderr = format!("Compile Error:\n{}\n\n{stderr}", compile.stderr);
        }
    }

    Ok(Json(ExecuteCodeResponse {
        stdout: run.stdout,
        stderr,
        exit_code: run.code,
    }))
}

/// List available programming language runtimes.
#[utoipa::path(
    get,
    path = "/api/code/runtimes",
    responses(
        (status = 200, description = "Available runtimes", body = RuntimesResponse),
        (status = 500, description = "Internal server error", body = crate::models::ErrorResponse)
    ),
    tag = "Code Execution"
)]
pub async fn list_runtimes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RuntimesResponse>, ApiError> {
    let response = state
        .http
        .get(format!("{}/runtimes", state.config.piston_url))
        .send()
        .await
        .map_err(map_transport_error)?;

    if !response.status().is_success() {
        return Err(ApiError::InternalServerError(anyhow::anyhow!(
            "Error fetching runtimes: status {}",
            response.status()
        )));
    }

    let runtimes: Vec<PistonRuntime> = response
        .json()
        .await
        .map_err(|err| ApiError::InternalServerError(anyhow::anyhow!("Invalid Piston reply: {err}")))?;

    Ok(Json(RuntimesResponse {
        runtimes: runtimes
            .into_iter()
            .map(|runtime| RuntimeView {
                language: runtime.language,
                version: runtime.version,
                aliases: runtime.aliases,
            })
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_language_aliases() {
        assert_eq!(normalize_language("py"), "python");
        assert_eq!(normalize_language("Python3"), "python");
        assert_eq!(normalize_language("NODE"), "javascript");
        assert_eq!(normalize_language("ts"), "typescript");
        assert_eq!(normalize_language("C++"), "cpp");
        assert_eq!(normalize_language("Rust"), "rust");
        assert_eq!(normalize_language("cobol"), "cobol");
    }

    #[test]
    fn test_version_for_known_and_unknown() {
        assert_eq!(version_for("python"), "3.10.0");
        assert_eq!(version_for("rust"), "1.68.2");
        assert_eq!(version_for("cobol"), "*");
    }

    #[test]
    fn test_file_extension_fallback() {
        assert_eq!(file_extension("python"), "py");
        assert_eq!(file_extension("cpp"), "cpp");
        assert_eq!(file_extension("cobol"), "txt");
    }

    #[test]
    fn test_piston_response_parses_with_missing_stages() {
        let json = r#"{"run": {"stdout": "42\n", "stderr": "", "code": 0}}"#;
        let parsed: PistonResponse = serde_json::from_str(json).unwrap();
        let run = parsed.run.unwrap();
        assert_eq!(run.stdout, "42\n");
        assert_eq!(run.code, 0);
        assert!(parsed.compile.is_none());
    }
}
