use crate::config::AttioConfig;
use crate::error::{InsightsError, InsightsResult};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Largest `limit` the notes endpoint accepts.
pub const MAX_PAGE_SIZE: usize = 50;

#[async_trait]
pub trait CrmClient: Send + Sync {
    async fn list_notes(&self, limit: PageSize, cursor: Option<&str>) -> InsightsResult<NotesPage>;
    async fn get_company_name(&self, record_id: &str) -> InsightsResult<Option<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    /// Rejects zero and clamps anything above [`MAX_PAGE_SIZE`].
    pub fn new(size: usize) -> InsightsResult<Self> {
        if size == 0 {
            return Err(InsightsError::Configuration(
                "page size must be a positive integer".to_string()
            ));
        }
        if size > MAX_PAGE_SIZE {
            debug!(requested = size, max = MAX_PAGE_SIZE, "Clamping page size");
        }
        Ok(Self(size.min(MAX_PAGE_SIZE)))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotesPage {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool
}

impl NotesPage {
    /// Cursor for the following request, if the server announced one.
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref().filter(|c| !c.is_empty())
        } else {
            None
        }
    }
}

pub struct AttioClient {
    client: Client,
    base_url: String,
    access_token: String
}

impl AttioClient {
    pub fn new(config: &AttioConfig) -> InsightsResult<Self> {
        let access_token = config.access_token.clone().ok_or_else(|| {
            InsightsError::Configuration("ATTIO_ACCESS_TOKEN is not set".to_string())
        })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(InsightsError::HttpError)?;

        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            access_token
        })
    }

    fn url(&self, path: &str) -> InsightsResult<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw)
            .map_err(|e| InsightsError::Configuration(format!("invalid CRM URL {raw}: {e}")))
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, url: Url) -> InsightsResult<T> {
        debug!(url = %url, "Making Attio API request");

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(InsightsError::RemoteApi {
                status: status.as_u16(),
                message: body
            })
        }
    }
}

#[async_trait]
impl CrmClient for AttioClient {
    async fn list_notes(&self, limit: PageSize, cursor: Option<&str>) -> InsightsResult<NotesPage> {
        let mut url = self.url("/notes")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &limit.get().to_string());
            if let Some(cursor) = cursor {
                query.append_pair("page[after]", cursor);
            }
        }

        self.get(url).await
    }

    async fn get_company_name(&self, record_id: &str) -> InsightsResult<Option<String>> {
        let path = format!(
            "/objects/companies/records/{}",
            urlencoding::encode(record_id)
        );
        let record: CompanyRecordResponse = self.get(self.url(&path)?).await?;
        Ok(record.display_name())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CompanyRecordResponse {
    #[serde(default)]
    data: Option<CompanyRecord>
}

#[derive(Debug, Default, Deserialize)]
struct CompanyRecord {
    #[serde(default)]
    values: Option<CompanyValues>
}

#[derive(Debug, Default, Deserialize)]
struct CompanyValues {
    #[serde(default)]
    name: Vec<AttributeValue>
}

#[derive(Debug, Default, Deserialize)]
struct AttributeValue {
    #[serde(default)]
    value: Option<String>
}

impl CompanyRecordResponse {
    /// First non-empty entry of `data.values.name[].value`.
    pub fn display_name(self) -> Option<String> {
        self.data?
            .values?
            .name
            .into_iter()
            .filter_map(|entry| entry.value)
            .find(|value| !value.is_empty())
    }
}

pub fn create_attio_client(config: &AttioConfig) -> InsightsResult<Arc<dyn CrmClient>> {
    Ok(Arc::new(AttioClient::new(config)?))
}
