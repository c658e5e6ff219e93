//! Field-renaming schemas for the REST surface: Portuguese upstream names
//! in, snake_case English out. Absent upstream fields become empty strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Query parameters of `GET /senate/bills`.
#[derive(Debug, Deserialize)]
pub struct BillsQuery {
    pub year: Option<i32>,
    pub bill_type: Option<String>,
    pub number: Option<i32>,
    pub author: Option<String>,
    pub keyword: Option<String>,
}

/// Query parameters of `GET /senate/bill`.
#[derive(Debug, Deserialize)]
pub struct BillCodeQuery {
    pub code: String,
}

// The upstream API is inconsistent about strings vs numbers (e.g. "Ano").
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn serialize_inline_url<S>(url: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{}&disposition=inline", url))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillType {
    #[serde(rename(deserialize = "Sigla"), deserialize_with = "lenient_string", default)]
    pub bill_type: String,
    #[serde(rename(deserialize = "Descricao"), deserialize_with = "lenient_string", default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    #[serde(rename(deserialize = "Codigo"), deserialize_with = "lenient_string", default)]
    pub code: String,
    #[serde(
        rename(deserialize = "IdentificacaoProcesso"),
        deserialize_with = "lenient_string",
        default
    )]
    pub process_id: String,
    #[serde(
        rename(deserialize = "DescricaoIdentificacao"),
        deserialize_with = "lenient_string",
        default
    )]
    pub description_id: String,
    #[serde(rename(deserialize = "Sigla"), deserialize_with = "lenient_string", default)]
    pub bill_type: String,
    #[serde(rename(deserialize = "Numero"), deserialize_with = "lenient_string", default)]
    pub number: String,
    #[serde(rename(deserialize = "Ano"), deserialize_with = "lenient_string", default)]
    pub year: String,
    #[serde(rename(deserialize = "Ementa"), deserialize_with = "lenient_string", default)]
    pub syllabus: String,
    #[serde(rename(deserialize = "Autor"), deserialize_with = "lenient_string", default)]
    pub author: String,
    #[serde(rename(deserialize = "Data"), deserialize_with = "lenient_string", default)]
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillText {
    #[serde(rename(deserialize = "CodigoTexto"), deserialize_with = "lenient_string", default)]
    pub code: String,
    #[serde(
        rename(deserialize = "TipoDocumento"),
        deserialize_with = "lenient_string",
        default
    )]
    pub document_type: String,
    #[serde(
        rename(deserialize = "FormatoTexto"),
        deserialize_with = "lenient_string",
        default
    )]
    pub text_format: String,
    #[serde(
        rename(deserialize = "DescricaoTipoTexto"),
        deserialize_with = "lenient_string",
        default
    )]
    pub text_type: String,
    #[serde(
        rename(deserialize = "DescricaoTexto"),
        deserialize_with = "lenient_string",
        default
    )]
    pub text_description: String,
    #[serde(
        rename(deserialize = "AutoriaTexto"),
        deserialize_with = "lenient_string",
        default
    )]
    pub text_author: String,
    #[serde(rename(deserialize = "DataTexto"), deserialize_with = "lenient_string", default)]
    pub text_date: String,
    #[serde(
        rename(deserialize = "UrlTexto"),
        deserialize_with = "lenient_string",
        serialize_with = "serialize_inline_url",
        default
    )]
    pub text_url: String,
}
