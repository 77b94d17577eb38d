//! REST directory client
//!
//! Thin `reqwest`-backed implementation of [`DirectoryApi`] against the
//! dashboard backend. Timeouts and TLS behavior live here; everything
//! above this layer sees only `DirectoryError`.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::DirectoryConfig;
use crate::models::{Organization, Team};
use crate::services::directory::{DirectoryApi, DirectoryError};

/// Directory API client
#[derive(Clone)]
pub struct RestDirectoryClient {
    client: Client,
    base_url: String,
}

impl RestDirectoryClient {
    pub fn new(config: &DirectoryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .use_rustls_tls()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DirectoryError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "Directory request");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| DirectoryError::Decode(err.to_string()))
    }
}

#[async_trait]
impl DirectoryApi for RestDirectoryClient {
    async fn fetch_organizations(&self) -> Result<Vec<Organization>, DirectoryError> {
        self.get("/organizations").await
    }

    async fn fetch_organization_teams(
        &self,
        organization_id: i64,
    ) -> Result<Vec<Team>, DirectoryError> {
        self.get(&format!("/organizations/{}/teams", organization_id))
            .await
    }
}
