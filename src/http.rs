//! Blocking HTTP helpers shared by the search provider and the recipe client.

use crate::config::Config;
use crate::error::{LookupError, Result};

/// Build the agent used for all outbound requests.
///
/// Every request carries the configured `User-Agent` and timeout.
pub fn agent(config: &Config) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(config.timeout)
        .user_agent(&config.user_agent)
        .build()
}

/// Map a ureq failure to a network error naming the endpoint.
pub fn network_error(endpoint: &str, err: ureq::Error) -> LookupError {
    let message = match err {
        ureq::Error::Status(code, response) => {
            format!("HTTP {} {}", code, response.status_text())
        }
        ureq::Error::Transport(t) => t.to_string(),
    };
    LookupError::Network {
        endpoint: endpoint.to_owned(),
        message,
    }
}

/// GET a URL with query parameters and return the body as text.
pub fn get_text(agent: &ureq::Agent, url: &str, query: &[(&str, &str)]) -> Result<String> {
    let mut request = agent.get(url);
    for (key, value) in query {
        request = request.query(key, value);
    }
    tracing::debug!(url = %request.url(), "GET");

    request
        .call()
        .map_err(|e| network_error(url, e))?
        .into_string()
        .map_err(|e| LookupError::Network {
            endpoint: url.to_owned(),
            message: format!("failed to read response: {e}"),
        })
}
