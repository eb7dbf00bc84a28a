//! Interactive prompt collector
//!
//! Asks the operator six questions in a fixed order and turns the answers
//! into a [`ProvisionRequest`]. Blank answers take the default where one
//! exists; the two GHL credential prompts have no default, so blank means
//! "not provided". A closed input stream reads as a blank answer.

use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};
use tracing::debug;

use crate::config::GhlDefaults;
use crate::models::{ProvisionRequest, DEFAULT_KEY_LABEL};
use crate::utils::{ProvisionError, ProvisionResult};

pub struct PromptCollector<R, W> {
    reader: R,
    writer: W,
    defaults: GhlDefaults,
}

impl PromptCollector<BufReader<Stdin>, Stdout> {
    /// Collector bound to the process terminal
    pub fn stdio(defaults: GhlDefaults) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), defaults)
    }
}

impl<R, W> PromptCollector<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, defaults: GhlDefaults) -> Self {
        Self {
            reader,
            writer,
            defaults,
        }
    }

    /// Run all prompts.
    ///
    /// Fails with [`ProvisionError::Validation`] as soon as the tenant name
    /// comes back blank.
    pub async fn collect(&mut self) -> ProvisionResult<ProvisionRequest> {
        let tenant_name = self.ask("Company / tenant name: ").await?;
        if tenant_name.is_empty() {
            return Err(ProvisionError::validation("Tenant name is required"));
        }

        let key_label = self
            .ask_with_default("API key label", DEFAULT_KEY_LABEL)
            .await?;
        let ghl_api_key = self.ask("GHL API key (blank to skip): ").await?;
        let ghl_location_id = self.ask("GHL location ID (blank to skip): ").await?;

        let base_url_default = self.defaults.base_url.clone();
        let ghl_base_url = self
            .ask_with_default("GHL base URL", &base_url_default)
            .await?;
        let version_default = self.defaults.version.clone();
        let ghl_version = self
            .ask_with_default("GHL API version", &version_default)
            .await?;

        let request = ProvisionRequest {
            tenant_name,
            key_label,
            ghl_api_key: Some(ghl_api_key).filter(|v| !v.is_empty()),
            ghl_location_id: Some(ghl_location_id).filter(|v| !v.is_empty()),
            ghl_base_url,
            ghl_version,
        };
        debug!(?request, "Collected tenant details");

        Ok(request)
    }

    /// Give back the underlying reader and writer
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }

    async fn ask_with_default(&mut self, label: &str, default: &str) -> ProvisionResult<String> {
        let answer = self.ask(&format!("{} [{}]: ", label, default)).await?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    async fn ask(&mut self, question: &str) -> ProvisionResult<String> {
        self.writer.write_all(question.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        self.reader.read_line(&mut line).await?;
        Ok(line.trim().to_string())
    }
}
