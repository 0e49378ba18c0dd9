// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mkignore-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mkignore and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Remote template catalog client.
//!
//! Speaks the gitignore.io line format: `<base>/list` returns template names
//! as comma-separated tokens spread over one or more lines, and
//! `<base>/<comma-joined-names>` returns the concatenated template bodies as
//! opaque text.

use std::fmt;

/// Endpoint of the public template catalog.
pub const DEFAULT_API_URL: &str = "https://www.toptal.com/developers/gitignore/api/";

#[derive(Debug)]
pub enum CatalogError {
    Request { url: String, source: reqwest::Error },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request { url, source } => write!(f, "request to {url} failed: {source}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the list of template names, flattened in server order.
    pub async fn fetch_names(&self) -> Result<Vec<String>, CatalogError> {
        let body = self.fetch_text("list").await?;
        Ok(parse_name_list(&body))
    }

    /// Fetches the combined body for `names`, returned verbatim.
    ///
    /// The server decides what an empty `names` means; callers guard against
    /// it before asking.
    pub async fn fetch_body(&self, names: &[String]) -> Result<String, CatalogError> {
        self.fetch_text(&names.join(",")).await
    }

    async fn fetch_text(&self, path: &str) -> Result<String, CatalogError> {
        let url = self.endpoint(path);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| CatalogError::Request { url: url.clone(), source })?;
        response.text().await.map_err(|source| CatalogError::Request { url, source })
    }

    fn endpoint(&self, path: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

/// Splits a catalog listing into names: lines, then comma-separated tokens,
/// flattened in server order. Duplicate and empty tokens are kept verbatim so
/// the list mirrors the server's rows exactly.
pub fn parse_name_list(body: &str) -> Vec<String> {
    body.split('\n').flat_map(|line| line.split(',')).map(str::to_owned).collect()
}
