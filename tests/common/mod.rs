//! Common test utilities for session tests against a mock recipe host.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;

use recipe_lookup::{Config, Session};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config pointing both endpoints at the mock server.
pub fn mock_config(server: &MockServer) -> Config {
    Config {
        search_url: format!("{}/search", server.uri()),
        api_url: format!("{}/recipes/api/2/recipes", server.uri()),
        ..Config::default()
    }
}

pub fn mock_session(server: &MockServer) -> Session {
    Session::new(&mock_config(server))
}

/// Serve `html` for every search request.
pub async fn mount_search(server: &MockServer, html: String) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

/// Serve a recipe record for `id`.
pub async fn mount_recipe(server: &MockServer, id: &str, code: &str, description: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/recipes/api/2/recipes/{id}/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": id,
            "code": code,
            "description": description,
        })))
        .mount(server)
        .await;
}
