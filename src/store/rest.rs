use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::model::{
    Horse, HorseCreate, HorseSearch, HorseUpdate, Id, Owner, OwnerCreate, OwnerSearch,
    PedigreeNode,
};
use crate::store::traits::{HorseStore, OwnerStore, Result};

/// Error body sent by the backend. Validation failures carry `errors`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

/// HTTP client for the REST surface of the stud book backend.
///
/// No request timeout is set: a call that never answers stays pending.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
}

impl RestBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(&config.base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            warn!("Request to backend failed: {}", e);
            BackendError::Transport(e.to_string())
        })?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn error_from(response: Response) -> BackendError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let message = body
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if text.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    text.clone()
                }
            });
        debug!("Backend answered {}: {}", status, message);

        match status {
            StatusCode::NOT_FOUND => BackendError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => BackendError::Validation {
                message,
                errors: body.errors,
            },
            StatusCode::CONFLICT => BackendError::Conflict {
                message,
                errors: body.errors,
            },
            other => BackendError::Server {
                status: other.as_u16(),
                message,
            },
        }
    }
}

#[async_trait::async_trait]
impl HorseStore for RestBackend {
    async fn list_horses(&self) -> Result<Vec<Horse>> {
        self.send_json(self.client.get(self.url("/horses"))).await
    }

    async fn search_horses(&self, search: &HorseSearch) -> Result<Vec<Horse>> {
        debug!("GET /horses {:?}", search);
        self.send_json(self.client.get(self.url("/horses")).query(search))
            .await
    }

    async fn get_horse(&self, id: Id) -> Result<Horse> {
        self.send_json(self.client.get(self.url(&format!("/horses/{}", id))))
            .await
    }

    async fn create_horse(&self, horse: &HorseCreate) -> Result<Horse> {
        self.send_json(self.client.post(self.url("/horses")).json(horse))
            .await
    }

    async fn update_horse(&self, id: Id, horse: &HorseUpdate) -> Result<Horse> {
        self.send_json(self.client.put(self.url(&format!("/horses/{}", id))).json(horse))
            .await
    }

    async fn delete_horse(&self, id: Id) -> Result<()> {
        self.send(self.client.delete(self.url(&format!("/horses/{}", id))))
            .await
            .map(|_| ())
    }

    async fn get_pedigree(&self, id: Id, max_generations: Option<u32>) -> Result<PedigreeNode> {
        let mut request = self.client.get(self.url(&format!("/horses/pedigree/{}", id)));
        if let Some(generations) = max_generations {
            request = request.query(&[("maxGenerations", generations)]);
        }
        self.send_json(request).await
    }
}

#[async_trait::async_trait]
impl OwnerStore for RestBackend {
    async fn search_owners(&self, search: &OwnerSearch) -> Result<Vec<Owner>> {
        self.send_json(self.client.get(self.url("/owners")).query(search))
            .await
    }

    async fn get_owner(&self, id: Id) -> Result<Owner> {
        self.send_json(self.client.get(self.url(&format!("/owners/{}", id))))
            .await
    }

    async fn create_owner(&self, owner: &OwnerCreate) -> Result<Owner> {
        self.send_json(self.client.post(self.url("/owners")).json(owner))
            .await
    }
}
