//! Anbindung an den externen Analyse-Dienst (Konstruktionserkennung).
//!
//! Der Dienst erhält ein PNG der aktuellen Kartenansicht als
//! `multipart/form-data` (Feld `file`) und antwortet mit JSON der Form
//! `{"lots": [{"numeroLot": "...", "description": "..."}, ...]}`.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::core::Lot;
use crate::shared::ViewerOptions;

/// Schnittstelle zum Analyse-Dienst.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Schickt ein PNG zur Analyse und liefert die erkannten Lots.
    async fn detect_constructions(&self, png: Vec<u8>) -> Result<Vec<Lot>>;
}

/// HTTP-Client für den Analyse-Dienst.
#[derive(Debug, Clone)]
pub struct HttpAnalysisService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnalysisService {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("HTTP-Client konnte nicht erstellt werden")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Client mit Endpoint und Timeout aus den Optionen.
    pub fn from_options(options: &ViewerOptions) -> Result<Self> {
        Self::new(
            options.analysis_endpoint.clone(),
            Duration::from_secs(options.analysis_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn detect_constructions(&self, png: Vec<u8>) -> Result<Vec<Lot>> {
        let part = reqwest::multipart::Part::bytes(png)
            .file_name("capture.png")
            .mime_str("image/png")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("Analyse-Dienst nicht erreichbar: {}", self.endpoint))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("Antwort des Analyse-Dienstes nicht lesbar")?;
        parse_analysis_response(status, &body)
    }
}

#[derive(Debug, Deserialize)]
struct AnalysisResponse {
    lots: Vec<Lot>,
}

/// Dekodiert eine Antwort des Analyse-Dienstes.
///
/// Nicht-2xx-Status, fehlerhaftes JSON oder ein fehlender `lots`-Schlüssel
/// sind Fehler.
pub fn parse_analysis_response(status: u16, body: &str) -> Result<Vec<Lot>> {
    if !(200..300).contains(&status) {
        let snippet: String = body.chars().take(200).collect();
        bail!("Analyse-Dienst antwortete mit Status {status}: {snippet}");
    }
    let response: AnalysisResponse =
        serde_json::from_str(body).context("Antwort des Analyse-Dienstes ist kein gültiges JSON")?;
    log::info!("Analyse-Dienst meldet {} Lots", response.lots.len());
    Ok(response.lots)
}
