use std::future::Future;

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, ClientBuilder, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Floor, Seat, SeatId},
    protocol::{DashboardStats, NewSeatRequest},
};
use tracing::{debug, warn};

use crate::{config::ClientSettings, error::TransportError};

/// REST surface of the seating backend.
#[async_trait]
pub trait SeatingApi: Send + Sync {
    async fn list_floors(&self) -> Result<Vec<Floor>, TransportError>;
    async fn floor(&self, floor_number: i64) -> Result<Floor, TransportError>;
    async fn seat(&self, seat_id: SeatId) -> Result<Seat, TransportError>;
    async fn create_seat(&self, request: &NewSeatRequest) -> Result<Seat, TransportError>;
    async fn delete_seat(&self, seat_id: SeatId) -> Result<(), TransportError>;
    async fn dashboard_stats(&self) -> Result<DashboardStats, TransportError>;
}

pub struct HttpSeatingApi {
    http: Client,
    base_url: String,
    retry_attempts: u32,
}

impl HttpSeatingApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: session_client(Client::builder()),
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_attempts: ClientSettings::default().retry_attempts,
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> anyhow::Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(settings.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: settings.api_base()?,
            retry_attempts: settings.retry_attempts,
        })
    }

    pub fn with_retry_attempts(mut self, retry_attempts: u32) -> Self {
        self.retry_attempts = retry_attempts;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let url = self.url(path);
        let (http, url) = (&self.http, url.as_str());
        with_retry(self.retry_attempts, url, move || async move {
            let response = send(
                "GET",
                url,
                http.get(url).header(ACCEPT, "application/json"),
            )
            .await?;
            decode(url, response).await
        })
        .await
    }
}

#[async_trait]
impl SeatingApi for HttpSeatingApi {
    async fn list_floors(&self) -> Result<Vec<Floor>, TransportError> {
        self.get_json("/floors").await
    }

    async fn floor(&self, floor_number: i64) -> Result<Floor, TransportError> {
        self.get_json(&format!("/floors/{floor_number}")).await
    }

    async fn seat(&self, seat_id: SeatId) -> Result<Seat, TransportError> {
        self.get_json(&format!("/seats/{}", seat_id.0)).await
    }

    async fn create_seat(&self, request: &NewSeatRequest) -> Result<Seat, TransportError> {
        let url = self.url("/seats");
        let (http, url) = (&self.http, url.as_str());
        with_retry(self.retry_attempts, url, move || async move {
            let response = send(
                "POST",
                url,
                http.post(url)
                    .header(ACCEPT, "application/json")
                    .json(request),
            )
            .await?;
            decode(url, response).await
        })
        .await
    }

    async fn delete_seat(&self, seat_id: SeatId) -> Result<(), TransportError> {
        let url = self.url(&format!("/seats/{}", seat_id.0));
        let (http, url) = (&self.http, url.as_str());
        with_retry(self.retry_attempts, url, move || async move {
            send("DELETE", url, http.delete(url)).await?;
            Ok(())
        })
        .await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, TransportError> {
        self.get_json("/stats").await
    }
}

/// Client that keeps session cookies from earlier responses and sends them
/// back with later requests.
fn session_client(builder: ClientBuilder) -> Client {
    builder.cookie_store(true).build().unwrap_or_else(|err| {
        warn!("http: cookie-aware client unavailable, using defaults: {err}");
        Client::new()
    })
}

async fn send(
    method: &'static str,
    url: &str,
    request: RequestBuilder,
) -> Result<Response, TransportError> {
    let response = request.send().await.map_err(|err| TransportError::Network {
        url: url.to_string(),
        message: err.to_string(),
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(
        "http: backend returned code {} for {method} {url}, body was: {body}",
        status.as_u16()
    );
    Err(TransportError::Status {
        method,
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, TransportError> {
    response
        .json::<T>()
        .await
        .map_err(|err| TransportError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })
}

/// Runs `call` once, then up to `retry_attempts` more times while the
/// failure is transient.
pub(crate) async fn with_retry<T, F, Fut>(
    retry_attempts: u32,
    label: &str,
    mut call: F,
) -> Result<T, TransportError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TransportError>>,
{
    let mut attempt = 0;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < retry_attempts && err.is_transient() => {
                attempt += 1;
                debug!("http: retrying {label} after transient failure (attempt {attempt}): {err}");
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
