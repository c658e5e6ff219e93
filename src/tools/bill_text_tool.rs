use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};

use crate::mcp::types::{CallToolResult, ToolAnnotations, ToolDefinition};
use crate::utils::json::find_key_strings;
use crate::utils::pdf;
use crate::utils::senate::SenateClient;

pub static BILL_TEXT_TOOL_DEFINITION: Lazy<ToolDefinition> = Lazy::new(|| ToolDefinition {
    name: "getBillText".to_string(),
    description: "Get the text of a legislative bill from the Brazilian Senate".to_string(),
    input_schema: json!({
        "type": "object",
        "properties": {
            "number": {
                "type": "string",
                "description": "The number of the bill"
            },
            "year": {
                "type": "string",
                "description": "The year of the bill"
            }
        },
        "required": ["number", "year"]
    }),
    annotations: Some(ToolAnnotations {
        title: Some("Senate Bill Text".to_string()),
        read_only_hint: Some(true),
        open_world_hint: Some(true),
    }),
});

const DOCUMENT_SEPARATOR: &str = "\n\n--- (New Document) ---\n\n";

#[derive(Debug, Deserialize)]
struct BillTextParams {
    number: String,
    year: String,
}

pub struct BillTextTool {
    senate: SenateClient,
}

impl BillTextTool {
    pub fn new() -> Self {
        Self::with_client(SenateClient::default())
    }

    pub fn with_client(senate: SenateClient) -> Self {
        Self { senate }
    }

    pub async fn execute(&self, arguments: Option<serde_json::Value>) -> CallToolResult {
        let params = match arguments {
            Some(args) => match serde_json::from_value::<BillTextParams>(args) {
                Ok(params) => params,
                Err(e) => {
                    error!("Invalid bill text parameters: {}", e);
                    return CallToolResult::error(format!("Invalid parameters: {}", e));
                }
            },
            None => {
                return CallToolResult::error("Missing required parameters");
            }
        };

        info!("Fetching bill text for {}/{}", params.number, params.year);

        let process = match self.senate.fetch_process(&params.number, &params.year).await {
            Some(data) if !is_empty_tree(&data) => data,
            _ => {
                return CallToolResult::success(format!(
                    "Could not find a legislative process for bill {}/{}.",
                    params.number, params.year
                ));
            }
        };

        let doc_urls: Vec<String> = find_key_strings(&process, "urlDocumento")
            .map(str::to_string)
            .collect();
        if doc_urls.is_empty() {
            return CallToolResult::success(
                "Found the legislative process, but it has no associated documents.",
            );
        }

        info!("Found {} document(s)", doc_urls.len());

        // Documents are fetched one at a time; unreadable ones are skipped.
        let mut all_extracted_text = Vec::new();
        for doc_url in &doc_urls {
            let Some(bytes) = self.senate.fetch_document(doc_url).await else {
                continue;
            };
            if !pdf::is_pdf(None, &bytes) {
                debug!("Skipping non-PDF document: {}", doc_url);
                continue;
            }
            if let Some(text) = pdf::extract_text(&bytes) {
                all_extracted_text.push(text);
            }
        }

        if all_extracted_text.is_empty() {
            return CallToolResult::success(
                "Found documents, but could not extract any text. They may be empty or image-based.",
            );
        }

        CallToolResult::success(all_extracted_text.join(DOCUMENT_SEPARATOR))
    }
}

/// The upstream API answers some unknown bills with an empty envelope
/// rather than an error status.
fn is_empty_tree(data: &serde_json::Value) -> bool {
    match data {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::BillTextTool;
    use crate::utils::senate::SenateClient;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool_text(result: &crate::mcp::types::CallToolResult) -> &str {
        &result.content[0].text
    }

    #[tokio::test]
    async fn missing_process_reports_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/processo.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let tool = BillTextTool::with_client(SenateClient::new(server.uri()));
        let result = tool
            .execute(Some(json!({"number": "1234", "year": "2023"})))
            .await;
        assert_eq!(
            tool_text(&result),
            "Could not find a legislative process for bill 1234/2023."
        );
    }

    #[tokio::test]
    async fn process_without_documents_skips_all_downloads() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/processo.json"))
            .and(query_param("numero", "55"))
            .and(query_param("ano", "2024"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "documentos": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool = BillTextTool::with_client(SenateClient::new(server.uri()));
        let result = tool
            .execute(Some(json!({"number": "55", "year": "2024"})))
            .await;
        assert_eq!(
            tool_text(&result),
            "Found the legislative process, but it has no associated documents."
        );

        // Only the process request went out; no document was fetched.
        let requests = server.received_requests().await.unwrap_or_default();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn unreadable_documents_report_no_text() {
        let server = MockServer::start().await;
        let doc_url = format!("{}/doc/1", server.uri());
        Mock::given(method("GET"))
            .and(path("/processo.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "documentos": [{"urlDocumento": doc_url}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/doc/1"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"<html>scanned</html>".to_vec()))
            .mount(&server)
            .await;

        let tool = BillTextTool::with_client(SenateClient::new(server.uri()));
        let result = tool
            .execute(Some(json!({"number": "1", "year": "2020"})))
            .await;
        assert_eq!(
            tool_text(&result),
            "Found documents, but could not extract any text. They may be empty or image-based."
        );
    }

    #[tokio::test]
    async fn missing_arguments_are_an_error() {
        let tool = BillTextTool::new();
        let result = tool.execute(None).await;
        assert_eq!(result.is_error, Some(true));
    }
}
