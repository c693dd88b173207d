//! Thin REST client for the `/funcionarios` and `/projetos` endpoints.
//!
//! One request per call. No retries and no timeouts; failures go back to the
//! caller untouched.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::models::{Employee, EmployeePayload, Project, ProjectPayload};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{method} {url} returned {status}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
    },
}

/// A collection exposed by the backend under a fixed path.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    const PATH: &'static str;
    type Payload: Serialize + Send + Sync + 'static;
}

impl Resource for Employee {
    const PATH: &'static str = "/funcionarios";
    type Payload = EmployeePayload;
}

impl Resource for Project {
    const PATH: &'static str = "/projetos";
    type Payload = ProjectPayload;
}

/// CRUD verbs the pages need from the backend.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError>;
    async fn get<R: Resource>(&self, id: i64) -> Result<R, ApiError>;
    async fn create<R: Resource>(&self, payload: &R::Payload) -> Result<R, ApiError>;
    async fn update<R: Resource>(&self, id: i64, payload: &R::Payload) -> Result<R, ApiError>;
    async fn delete<R: Resource>(&self, id: i64) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn collection_url<R: Resource>(&self) -> String {
        format!("{}{}", self.base_url, R::PATH)
    }

    fn item_url<R: Resource>(&self, id: i64) -> String {
        format!("{}{}/{}", self.base_url, R::PATH, id)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.http.request(method, url)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().to_string();
        debug!(%method, %url, "api request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                method,
                url,
                status,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        let request = self.request(Method::GET, self.collection_url::<R>());
        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    async fn get<R: Resource>(&self, id: i64) -> Result<R, ApiError> {
        let request = self.request(Method::GET, self.item_url::<R>(id));
        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    async fn create<R: Resource>(&self, payload: &R::Payload) -> Result<R, ApiError> {
        let request = self
            .request(Method::POST, self.collection_url::<R>())
            .json(payload);
        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    async fn update<R: Resource>(&self, id: i64, payload: &R::Payload) -> Result<R, ApiError> {
        let request = self
            .request(Method::PUT, self.item_url::<R>(id))
            .json(payload);
        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    async fn delete<R: Resource>(&self, id: i64) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, self.item_url::<R>(id));
        self.execute(request).await?;
        Ok(())
    }
}
