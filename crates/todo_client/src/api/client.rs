use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde_json::json;
use todo_core::{Config, PriorityStat, Task, TodoList};

use crate::client_trait::TodoApi;
use crate::error::{ApiError, Result};
use crate::utils::http::{request_empty, request_json};

/// REST client for the todo backend
#[derive(Debug)]
pub struct TodoApiClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl TodoApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Self::build_http_client(config)?;
        let client = Self::build_retry_client(client);
        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn build_http_client(config: &Config) -> Result<Client> {
        let mut builder = Client::builder()
            .default_headers(Self::default_headers())
            .timeout(Duration::from_secs(config.timeout_secs));
        // proxies come from Config, not the process environment
        if config.http_proxy.is_empty() && config.https_proxy.is_empty() {
            builder = builder.no_proxy();
        }
        if !config.http_proxy.is_empty() {
            builder = builder.proxy(Proxy::http(&config.http_proxy)?);
        }
        if !config.https_proxy.is_empty() {
            builder = builder.proxy(Proxy::https(&config.https_proxy)?);
        }
        Ok(builder.build()?)
    }

    fn build_retry_client(client: Client) -> ClientWithMiddleware {
        // Exponential backoff with jitter for transient failures
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn require_id<'a>(id: &'a Option<String>, kind: &'static str) -> Result<&'a str> {
        id.as_deref().ok_or(ApiError::MissingId { kind })
    }
}

#[async_trait]
impl TodoApi for TodoApiClient {
    async fn get_all_lists(&self) -> Result<Vec<TodoList>> {
        request_json(&self.client, Method::GET, &self.url("/todolists"), None::<&()>).await
    }

    async fn get_list(&self, id: &str) -> Result<TodoList> {
        let url = self.url(&format!("/todolists/{id}"));
        request_json(&self.client, Method::GET, &url, None::<&()>).await
    }

    async fn create_list(&self, name: &str) -> Result<TodoList> {
        let body = json!({ "name": name, "tasks": [] });
        request_json(&self.client, Method::POST, &self.url("/todolists"), Some(&body)).await
    }

    async fn update_list(&self, list: &TodoList) -> Result<TodoList> {
        let id = Self::require_id(&list.id, "todo list")?;
        let url = self.url(&format!("/todolists/{id}"));
        request_json(&self.client, Method::PUT, &url, Some(list)).await
    }

    async fn delete_list(&self, id: &str) -> Result<()> {
        let url = self.url(&format!("/todolists/{id}"));
        request_empty(&self.client, Method::DELETE, &url, None::<&()>).await
    }

    async fn add_task(&self, list_id: &str, task: &Task) -> Result<TodoList> {
        let url = self.url(&format!("/todolists/{list_id}/tasks"));
        request_json(&self.client, Method::POST, &url, Some(task)).await
    }

    async fn update_task(&self, list_id: &str, task_id: &str, task: &Task) -> Result<TodoList> {
        let url = self.url(&format!("/todolists/{list_id}/tasks/{task_id}"));
        request_json(&self.client, Method::PUT, &url, Some(task)).await
    }

    async fn delete_task(&self, list_id: &str, task_id: &str) -> Result<TodoList> {
        let url = self.url(&format!("/todolists/{list_id}/tasks/{task_id}"));
        request_json(&self.client, Method::DELETE, &url, None::<&()>).await
    }

    async fn priority_stats(&self) -> Result<Vec<PriorityStat>> {
        let url = self.url("/todolists/stats/priority");
        request_json(&self.client, Method::GET, &url, None::<&()>).await
    }
}
