use std::time::Duration;

use chrono::Datelike;
use once_cell::sync::Lazy;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use url::Url;
use urlencoding::encode;

use crate::utils::json::unwrap_envelope;

/// Base URL of the Senate open-data service.
pub const API_BASE_URL: &str = "https://legis.senado.leg.br/dadosabertos";

// Shared HTTP client; reqwest clients are cheap to clone.
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to create HTTP client")
});

#[derive(Error, Debug)]
enum FetchError {
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(StatusCode),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("unsupported URL scheme: {0}")]
    Scheme(String),
}

/// Search filters for the bill list endpoint. The upstream API requires a
/// year; the current year is used when none is given.
#[derive(Debug, Default)]
pub struct BillSearch {
    pub year: Option<i32>,
    pub bill_type: Option<String>,
    pub number: Option<i32>,
    pub author: Option<String>,
    pub keyword: Option<String>,
}

impl BillSearch {
    pub fn to_query(&self) -> String {
        let year = self
            .year
            .unwrap_or_else(|| chrono::Local::now().year());
        let mut query = format!("ano={}", year);
        if let Some(bill_type) = &self.bill_type {
            query.push_str(&format!("&sigla={}", encode(bill_type)));
        }
        if let Some(number) = self.number {
            query.push_str(&format!("&numero={}", number));
        }
        if let Some(author) = &self.author {
            query.push_str(&format!("&nomeAutor={}", encode(author)));
        }
        if let Some(keyword) = &self.keyword {
            query.push_str(&format!("&palavraChave={}", encode(keyword)));
        }
        query
    }
}

/// Thin client over the Senate open-data REST API. Every failure mode
/// (timeout, non-2xx, malformed body) collapses to `None` or an empty list;
/// the cause is only logged.
pub struct SenateClient {
    base_url: String,
    http: Client,
}

impl Default for SenateClient {
    fn default() -> Self {
        Self::new(API_BASE_URL)
    }
}

impl SenateClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: HTTP_CLIENT.clone(),
        }
    }

    async fn try_fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        Ok(response.json::<Value>().await?)
    }

    async fn fetch_json(&self, endpoint: &str) -> Option<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        match self.try_fetch_json(&url).await {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("GET {} failed: {}", url, e);
                None
            }
        }
    }

    async fn try_fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = Url::parse(url)?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(FetchError::Scheme(other.to_string())),
        }
        let response = self.http.get(parsed).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Fetches the raw bytes of a document by its absolute URL.
    pub async fn fetch_document(&self, url: &str) -> Option<Vec<u8>> {
        match self.try_fetch_bytes(url).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                debug!("Document fetch {} failed: {}", url, e);
                None
            }
        }
    }

    /// Lists the active bill types (siglas).
    pub async fn fetch_bill_types(&self) -> Vec<Value> {
        match self.fetch_json("/materia/subtipos").await {
            Some(data) => unwrap_envelope(&data, &["ListaSiglas", "SiglasAtivas", "Siglas"]),
            None => Vec::new(),
        }
    }

    /// Searches bills by year, type, number, author and keyword.
    pub async fn fetch_bills(&self, search: &BillSearch) -> Vec<Value> {
        let endpoint = format!("/materia/pesquisa/lista?{}", search.to_query());
        match self.fetch_json(&endpoint).await {
            Some(data) => {
                unwrap_envelope(&data, &["PesquisaBasicaMateria", "Materias", "Materia"])
            }
            None => Vec::new(),
        }
    }

    /// Lists the text records published for a bill.
    pub async fn fetch_bill_texts(&self, code: &str) -> Vec<Value> {
        let endpoint = format!("/materia/textos/{}", encode(code));
        match self.fetch_json(&endpoint).await {
            Some(data) => unwrap_envelope(&data, &["TextoMateria", "Materia", "Textos", "Texto"]),
            None => Vec::new(),
        }
    }

    /// Fetches the raw legislative-process tree for a bill. The document
    /// URLs are buried at arbitrary depths, so no unwrapping happens here.
    pub async fn fetch_process(&self, number: &str, year: &str) -> Option<Value> {
        let endpoint = format!("/processo.json?numero={}&ano={}", encode(number), encode(year));
        self.fetch_json(&endpoint).await
    }

    /// Lists senators currently in office. `None` means the list itself
    /// could not be fetched, as opposed to an empty list.
    pub async fn fetch_current_senators(&self) -> Option<Vec<Value>> {
        let data = self.fetch_json("/senador/lista/atual").await?;
        data.get("ListaParlamentarEmExercicio")?;
        Some(unwrap_envelope(
            &data,
            &["ListaParlamentarEmExercicio", "Parlamentares", "Parlamentar"],
        ))
    }

    /// Fetches a senator's votes within a date range (YYYYMMDD). `None`
    /// means the history could not be retrieved at all.
    pub async fn fetch_senator_votes(
        &self,
        senator_code: &str,
        start_date: &str,
        end_date: Option<&str>,
    ) -> Option<Vec<Value>> {
        let mut query = format!("dataInicio={}", encode(start_date));
        if let Some(end) = end_date {
            query.push_str(&format!("&dataFim={}", encode(end)));
        }
        let endpoint = format!("/senador/{}/votacoes?{}", encode(senator_code), query);
        let data = self.fetch_json(&endpoint).await?;
        data.get("VotacaoParlamentar")?;
        Some(unwrap_envelope(
            &data,
            &["VotacaoParlamentar", "Parlamentar", "Votacoes", "Votacao"],
        ))
    }
}
