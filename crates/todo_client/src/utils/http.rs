//! HTTP request helpers
//!
//! Thin wrappers over the middleware client: send, log timing, map non-2xx
//! statuses to errors. Retry is handled by reqwest-retry at the client level.

use std::time::Instant;

use log::{debug, info, warn};
use reqwest::{Method, Response};
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, Result};

/// Execute a request and decode the JSON response body.
pub async fn request_json<B, T>(
    client: &ClientWithMiddleware,
    method: Method,
    url: &str,
    json_body: Option<&B>,
) -> Result<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = send(client, method, url, json_body).await?;
    Ok(response.json::<T>().await?)
}

/// Execute a request and discard the response body.
pub async fn request_empty<B>(
    client: &ClientWithMiddleware,
    method: Method,
    url: &str,
    json_body: Option<&B>,
) -> Result<()>
where
    B: Serialize + ?Sized,
{
    send(client, method, url, json_body).await?;
    Ok(())
}

async fn send<B>(
    client: &ClientWithMiddleware,
    method: Method,
    url: &str,
    json_body: Option<&B>,
) -> Result<Response>
where
    B: Serialize + ?Sized,
{
    let mut request_builder = client.request(method.clone(), url);
    if let Some(body) = json_body {
        request_builder = request_builder.json(body);
    }

    debug!("Sending {} request to {}", method, url);
    let start_time = Instant::now();
    let response = request_builder.send().await?;

    let status = response.status();
    info!(
        "{} {} responded {} after {:?}",
        method,
        url,
        status,
        start_time.elapsed()
    );

    if !status.is_success() {
        warn!("Request to {} failed with status {}", url, status);
        return Err(ApiError::Status {
            status,
            url: url.to_string(),
        });
    }
    Ok(response)
}
