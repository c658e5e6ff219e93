use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::mcp::types::{CallToolResult, ToolAnnotations, ToolDefinition};
use crate::utils::senate::SenateClient;

pub static SENATOR_PROFILE_TOOL_DEFINITION: Lazy<ToolDefinition> = Lazy::new(|| ToolDefinition {
    name: "getSenatorProfile".to_string(),
    description: "Get the basic profile and, optionally, the voting history of a Brazilian senator"
        .to_string(),
    input_schema: json!({
        "type": "object",
        "properties": {
            "name": {
                "type": "string",
                "description": "The name of the senator to search for"
            },
            "startDate": {
                "type": "string",
                "description": "The start date for the voting history search in YYYYMMDD format"
            },
            "endDate": {
                "type": "string",
                "description": "The end date for the voting history search in YYYYMMDD format. If omitted, the upstream API defaults to the current date"
            }
        },
        "required": ["name"]
    }),
    annotations: Some(ToolAnnotations {
        title: Some("Senator Profile".to_string()),
        read_only_hint: Some(true),
        open_world_hint: Some(true),
    }),
});

#[derive(Debug, Deserialize)]
struct SenatorProfileParams {
    name: String,
    #[serde(rename = "startDate")]
    start_date: Option<String>,
    #[serde(rename = "endDate")]
    end_date: Option<String>,
}

pub struct SenatorProfileTool {
    senate: SenateClient,
}

impl SenatorProfileTool {
    pub fn new() -> Self {
        Self::with_client(SenateClient::default())
    }

    pub fn with_client(senate: SenateClient) -> Self {
        Self { senate }
    }

    pub async fn execute(&self, arguments: Option<serde_json::Value>) -> CallToolResult {
        let params = match arguments {
            Some(args) => match serde_json::from_value::<SenatorProfileParams>(args) {
                Ok(params) => params,
                Err(e) => {
                    error!("Invalid senator profile parameters: {}", e);
                    return CallToolResult::error(format!("Invalid parameters: {}", e));
                }
            },
            None => {
                return CallToolResult::error("Missing required parameters");
            }
        };

        info!("Searching senator profile for \"{}\"", params.name);

        let senators = match self.senate.fetch_current_senators().await {
            Some(senators) => senators,
            None => {
                return CallToolResult::success("Could not fetch the list of senators from the API.");
            }
        };

        let info = match match_senator(&senators, &params.name) {
            Some(info) => info,
            None => {
                return CallToolResult::success(format!(
                    "No senator found matching the name '{}'.",
                    params.name
                ));
            }
        };

        let mut profile_parts = format_profile(info);

        if let (Some(code), Some(start)) = (code_string(info), params.start_date.as_deref()) {
            let votes = self
                .senate
                .fetch_senator_votes(&code, start, params.end_date.as_deref())
                .await;
            match votes {
                Some(votes) if !votes.is_empty() => {
                    profile_parts.push("\n--- Voting History ---".to_string());
                    for vote in &votes {
                        profile_parts.push(format_vote(vote));
                    }
                }
                Some(_) => {
                    profile_parts.push(
                        "\n--- Voting History ---\nNo votes found for the specified period."
                            .to_string(),
                    );
                }
                None => {
                    profile_parts.push(
                        "\n--- Voting History ---\nCould not retrieve voting history.".to_string(),
                    );
                }
            }
        }

        CallToolResult::success(profile_parts.join("\n"))
    }
}

/// First senator whose full or parliamentary name contains `name`,
/// case-insensitively. Returns the identification record.
fn match_senator<'a>(senators: &'a [Value], name: &str) -> Option<&'a Value> {
    let search_name = name.to_lowercase();
    senators.iter().find_map(|senator| {
        let info = senator.get("IdentificacaoParlamentar")?;
        let full_name = string_field(info, "NomeCompletoParlamentar").to_lowercase();
        let parliamentary_name = string_field(info, "NomeParlamentar").to_lowercase();
        if full_name.contains(&search_name) || parliamentary_name.contains(&search_name) {
            Some(info)
        } else {
            None
        }
    })
}

fn string_field<'a>(info: &'a Value, key: &str) -> &'a str {
    info.get(key).and_then(Value::as_str).unwrap_or("")
}

fn display_field<'a>(info: &'a Value, key: &str) -> &'a str {
    let value = string_field(info, key);
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

/// The senator code is a string in some responses and a number in others.
fn code_string(info: &Value) -> Option<String> {
    match info.get("CodigoParlamentar") {
        Some(Value::String(code)) => Some(code.clone()),
        Some(Value::Number(code)) => Some(code.to_string()),
        _ => None,
    }
}

fn format_profile(info: &Value) -> Vec<String> {
    vec![
        format!("Name: {}", display_field(info, "NomeCompletoParlamentar")),
        format!("Parliamentary Name: {}", display_field(info, "NomeParlamentar")),
        format!(
            "Party: {} - {}",
            display_field(info, "SiglaPartidoParlamentar"),
            display_field(info, "UfParlamentar")
        ),
        format!("Email: {}", display_field(info, "EmailParlamentar")),
        format!(
            "Senator Code: {}",
            code_string(info).unwrap_or_else(|| "N/A".to_string())
        ),
    ]
}

fn format_vote(vote: &Value) -> String {
    let empty = Value::Null;
    let materia = vote.get("Materia").unwrap_or(&empty);
    let materia_desc = format!(
        "{} {}/{}",
        string_field(materia, "Sigla"),
        string_field(materia, "Numero"),
        string_field(materia, "Ano")
    );
    let descricao_votacao = display_field(vote, "DescricaoVotacao");
    let voto_desc = display_field(vote, "DescricaoVoto").replace(" (Voto Secreto)", "");
    format!(
        "- On {}: Voted '{}' ({})",
        materia_desc, voto_desc, descricao_votacao
    )
}
