//! Recipe record client.
//!
//! Records are fetched fresh on every call from `<api_url>/<id>/`. Only the
//! `code` and `description` fields are read.

use crate::config::Config;
use crate::error::{LookupError, Result};
use crate::http;
use crate::lookup::RecipeId;
use serde::Deserialize;
use std::fmt;

/// Fields of a recipe record that commands consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeField {
    Code,
    Description,
}

impl RecipeField {
    pub fn name(self) -> &'static str {
        match self {
            RecipeField::Code => "code",
            RecipeField::Description => "description",
        }
    }
}

impl fmt::Display for RecipeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The subset of a recipe record we deserialize.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RecipeRecord {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl RecipeRecord {
    pub fn field(&self, field: RecipeField) -> Option<&str> {
        match field {
            RecipeField::Code => self.code.as_deref(),
            RecipeField::Description => self.description.as_deref(),
        }
    }
}

pub struct RecipeClient {
    agent: ureq::Agent,
    api_url: String,
}

impl RecipeClient {
    pub fn new(config: &Config) -> Self {
        Self::with_agent(http::agent(config), config)
    }

    pub fn with_agent(agent: ureq::Agent, config: &Config) -> Self {
        Self {
            agent,
            api_url: config.api_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn record_url(&self, id: &RecipeId) -> String {
        format!("{}/{}/", self.api_url, id)
    }

    /// Fetch the whole record for `id`.
    pub fn fetch_record(&self, id: &RecipeId) -> Result<RecipeRecord> {
        let url = self.record_url(id);
        tracing::debug!(%url, "fetching recipe");

        let response = self.agent.get(&url).call().map_err(|e| match e {
            ureq::Error::Status(404, _) => {
                LookupError::not_found(id.as_str(), "no such recipe (HTTP 404)")
            }
            other => http::network_error(&url, other),
        })?;

        let body = response.into_string().map_err(|e| LookupError::Network {
            endpoint: url.clone(),
            message: format!("failed to read response: {e}"),
        })?;

        serde_json::from_str(&body)
            .map_err(|e| LookupError::Parse(format!("recipe {id} from {url}: {e}")))
    }

    /// Fetch one field of the record for `id`, exactly as stored.
    pub fn fetch_field(&self, id: &RecipeId, field: RecipeField) -> Result<String> {
        let record = self.fetch_record(id)?;
        record
            .field(field)
            .map(str::to_owned)
            .ok_or_else(|| LookupError::not_found(id.as_str(), format!("record has no {field}")))
    }
}
