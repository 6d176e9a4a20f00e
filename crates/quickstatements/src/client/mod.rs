//! Submission client.
//!
//! [`Client`] wires a credentials provider and a transport around batch
//! composition. Both collaborators are injected, so the encoding core never
//! touches global configuration or the network.

pub mod config;
pub mod transport;

use tracing::debug;

pub use config::{ClientConfig, Credentials, CredentialsProvider, EnvCredentials};
pub use transport::{BatchId, BatchResponse, BatchResult, Submission, Transport};

use crate::error::Error;
use crate::model::Batch;

/// Posts batches to a QuickStatements instance.
#[derive(Debug, Clone)]
pub struct Client<P, T> {
    base_url: String,
    site: String,
    credentials: P,
    transport: T,
}

impl<T: Transport> Client<ClientConfig, T> {
    /// Creates a client whose base URL, site and credentials all come from `config`.
    pub fn from_config(config: ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            site: config.site.clone(),
            credentials: config,
            transport,
        }
    }
}

impl<P: CredentialsProvider, T: Transport> Client<P, T> {
    pub fn new(base_url: impl Into<String>, site: impl Into<String>, credentials: P, transport: T) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            site: site.into(),
            credentials,
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the `api.php` endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/api.php", self.base_url)
    }

    /// Builds the submission for a batch without sending it.
    pub fn prepare(&self, batch: &Batch) -> Result<Submission, Error> {
        let payload = batch.compose()?;
        let credentials = self.credentials.credentials()?;
        Ok(Submission::new(payload, batch.name(), self.site.clone(), credentials))
    }

    /// Composes, submits, and interprets the response for a batch.
    pub fn post(&self, batch: &Batch) -> Result<BatchResult, Error> {
        let submission = self.prepare(batch)?;
        debug!(
            batch = batch.name(),
            site = %self.site,
            username = %submission.username,
            lines = batch.len(),
            "submitting batch"
        );
        let response = self.transport.submit(&self.endpoint(), &submission)?;
        let result = response.into_result(&self.base_url)?;
        debug!(batch_id = %result.batch_id, "batch accepted");
        Ok(result)
    }

    /// Returns a V1 import URL for reviewing the batch in a browser.
    pub fn batch_import_url(&self, batch: &Batch) -> Result<String, Error> {
        batch.to_url(&self.base_url)
    }
}
