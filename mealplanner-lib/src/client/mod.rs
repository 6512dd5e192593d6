//! Access to the meal plan REST backend.

use std::future::Future;

use serde::de::IgnoredAny;
use tracing::debug;

use crate::{
    Result,
    record::{MealRecord, RecordFields, RecordId},
    session::Submission,
};

pub mod wire;

use wire::{Envelope, MealPlanWire, record_from_wire, write_body};

/// The three calls the client makes against the backend.
///
/// [`HttpBackend`] is the real implementation; tests substitute an in-memory one.
pub trait Backend {
    /// Fetch the full collection, in the order the backend returns it.
    fn fetch_records(&self) -> impl Future<Output = Result<Vec<MealRecord>>> + Send;

    fn create_record(&self, fields: &RecordFields) -> impl Future<Output = Result<()>> + Send;

    fn update_record(
        &self,
        id: &RecordId,
        fields: &RecordFields,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Send a validated [`Submission`] as either a create or an update.
pub async fn submit<B: Backend>(backend: &B, submission: &Submission) -> Result<()> {
    match submission {
        Submission::Create(fields) => backend.create_record(fields).await,
        Submission::Update(id, fields) => backend.update_record(id, fields).await,
    }
}

/// [`Backend`] speaking JSON over HTTP to `{base_url}/meal-plans`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/meal-plans", self.base_url)
    }

    fn record_url(&self, id: &RecordId) -> String {
        format!("{}/meal-plans/{}", self.base_url, id)
    }
}

impl Backend for HttpBackend {
    async fn fetch_records(&self) -> Result<Vec<MealRecord>> {
        let url = self.collection_url();
        debug!("GET {url}");

        // The envelope decides success, not the status code
        let envelope: Envelope<Vec<MealPlanWire>> =
            self.client.get(&url).send().await?.json().await?;
        let plans = envelope.into_result()?.unwrap_or_default();

        debug!("Fetched {} meal plans", plans.len());

        Ok(plans.into_iter().map(record_from_wire).collect())
    }

    async fn create_record(&self, fields: &RecordFields) -> Result<()> {
        let url = self.collection_url();
        debug!("POST {url}");

        let envelope: Envelope<IgnoredAny> = self
            .client
            .post(&url)
            .json(&write_body(fields))
            .send()
            .await?
            .json()
            .await?;

        envelope.into_result().map(|_| ())
    }

    async fn update_record(&self, id: &RecordId, fields: &RecordFields) -> Result<()> {
        let url = self.record_url(id);
        debug!("PUT {url}");

        let envelope: Envelope<IgnoredAny> = self
            .client
            .put(&url)
            .json(&write_body(fields))
            .send()
            .await?
            .json()
            .await?;

        envelope.into_result().map(|_| ())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:5000/api/");

        assert_eq!(backend.base_url(), "http://localhost:5000/api");
        assert_eq!(
            backend.collection_url(),
            "http://localhost:5000/api/meal-plans"
        );
        assert_eq!(
            backend.record_url(&RecordId::new("abc123")),
            "http://localhost:5000/api/meal-plans/abc123"
        );
    }
}
