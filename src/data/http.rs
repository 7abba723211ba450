use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use tracing::debug;

use crate::core::{RecordId, SalesRecord};
use crate::error::{VizError, VizResult};

use super::{NewSalesRecord, RecordEnvelope, SalesDataService, SalesRecordPatch};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Blocking JSON client for the `/sales-data` REST resource.
#[derive(Debug, Clone)]
pub struct HttpSalesClient {
    client: Client,
    base_url: String,
}

impl HttpSalesClient {
    pub fn new(base_url: impl Into<String>) -> VizResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|err| VizError::Transport(format!("failed to build http client: {err}")))?;
        Ok(Self::with_client(client, base_url))
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn collection_url(&self) -> String {
        format!("{}/sales-data", self.base_url)
    }

    #[must_use]
    pub fn record_url(&self, id: RecordId) -> String {
        format!("{}/sales-data/{id}", self.base_url)
    }
}

impl SalesDataService for HttpSalesClient {
    fn list(&self) -> VizResult<Vec<SalesRecord>> {
        let response = self
            .client
            .get(self.collection_url())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(transport_error)?;
        let records: Vec<SalesRecord> = check_status(response, None)?
            .json()
            .map_err(transport_error)?;
        debug!(count = records.len(), "sales records listed");
        Ok(records)
    }

    fn create(&mut self, record: NewSalesRecord) -> VizResult<SalesRecord> {
        record.validate()?;
        let response = self
            .client
            .post(self.collection_url())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&record)
            .send()
            .map_err(transport_error)?;
        let envelope: RecordEnvelope = check_status(response, None)?
            .json()
            .map_err(transport_error)?;
        debug!(id = %envelope.data.id, "sales record created");
        Ok(envelope.data)
    }

    fn update(&mut self, id: RecordId, patch: SalesRecordPatch) -> VizResult<SalesRecord> {
        patch.validate()?;
        let response = self
            .client
            .put(self.record_url(id))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&patch)
            .send()
            .map_err(transport_error)?;
        let envelope: RecordEnvelope = check_status(response, Some(id))?
            .json()
            .map_err(transport_error)?;
        debug!(id = %id, "sales record updated");
        Ok(envelope.data)
    }

    fn delete(&mut self, id: RecordId) -> VizResult<()> {
        let response = self
            .client
            .delete(self.record_url(id))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(transport_error)?;
        check_status(response, Some(id))?;
        debug!(id = %id, "sales record deleted");
        Ok(())
    }
}

fn check_status(response: Response, id: Option<RecordId>) -> VizResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => Err(VizError::RecordNotFound { id: id.0 }),
        (StatusCode::UNPROCESSABLE_ENTITY, _) => {
            let body = response.text().unwrap_or_default();
            Err(VizError::InvalidData(format!("validation rejected: {body}")))
        }
        _ => Err(VizError::Transport(format!(
            "unexpected status {status} from sales-data service"
        ))),
    }
}

fn transport_error(err: reqwest::Error) -> VizError {
    VizError::Transport(err.to_string())
}
