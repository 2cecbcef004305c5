use crate::errors::ClientError;
use crate::models::{CreateEntryRequest, DeleteEntryRequest, TimeEntry};
use crate::storage::HoursStore;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use std::sync::Arc;

/// Operations the front-end needs from the hours API.
#[async_trait]
pub trait HoursApi: Send + Sync {
    async fn list(&self) -> Result<Vec<TimeEntry>, ClientError>;
    async fn create(&self, date: NaiveDate, hours: f64) -> Result<(), ClientError>;
    async fn delete(&self, id: i64) -> Result<(), ClientError>;
}

#[async_trait]
impl<T: HoursApi + ?Sized> HoursApi for Arc<T> {
    async fn list(&self) -> Result<Vec<TimeEntry>, ClientError> {
        (**self).list().await
    }

    async fn create(&self, date: NaiveDate, hours: f64) -> Result<(), ClientError> {
        (**self).create(date, hours).await
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        (**self).delete(id).await
    }
}

/// Talks to `/api/hours` over HTTP.
#[derive(Clone)]
pub struct HttpHoursApi {
    client: Client,
    endpoint: String,
}

impl HttpHoursApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/hours", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl HoursApi for HttpHoursApi {
    async fn list(&self) -> Result<Vec<TimeEntry>, ClientError> {
        let response = self.client.get(&self.endpoint).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn create(&self, date: NaiveDate, hours: f64) -> Result<(), ClientError> {
        let body = CreateEntryRequest {
            date: Some(date.to_string()),
            hours: Some(hours),
        };
        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let body = DeleteEntryRequest { id: Some(id) };
        let response = self.client.delete(&self.endpoint).json(&body).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

/// In-process access, used when the pages and the API share a store.
#[async_trait]
impl HoursApi for HoursStore {
    async fn list(&self) -> Result<Vec<TimeEntry>, ClientError> {
        Ok(HoursStore::list(self).await?)
    }

    async fn create(&self, date: NaiveDate, hours: f64) -> Result<(), ClientError> {
        self.insert(date, hours).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        Ok(HoursStore::delete(self, id).await?)
    }
}
