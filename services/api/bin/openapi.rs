use interview_api::router::ApiDoc;
use utoipa::OpenApi;

/// Dumps the OpenAPI document for the service to a JSON file, so the
/// frontend can regenerate its client without a running server.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.json".to_string());
    let spec_json = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(&path, spec_json)?;
    println!("wrote {path}");
    Ok(())
}
