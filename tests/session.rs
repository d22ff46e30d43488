//! Session tests against a mock search engine and recipe host.
//!
//! Each test drives a `Session` through commands exactly as the shell does
//! and inspects what reached the host.

mod common;

use common::*;
use recipe_lookup::session::IMPORT_BINDING;
use recipe_lookup::{BufferHost, Command, Config, LookupError, Output, Session};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_accepts_numeric_links_only() {
    let server = MockServer::start().await;
    mount_search(&server, binary_tree_page()).await;

    let mut session = mock_session(&server);
    let mut host = BufferHost::new();
    session.execute(Command::Search("binary tree".into()), &mut host);

    let cache = session.lookup().expect("search should populate the lookup");
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(0).unwrap().id.as_str(), "577478");
    assert_eq!(cache.get(0).unwrap().title, "binary tree");
    assert_eq!(cache.get(1).unwrap().id.as_str(), "511508");
    assert_eq!(cache.get(1).unwrap().title, "binary search tree in python");

    match host.last() {
        Some(Output::Listing(entries)) => {
            let indices: Vec<usize> = entries.iter().map(|e| e.index).collect();
            assert_eq!(indices, vec![0, 1]);
        }
        other => panic!("expected listing, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_respects_max_results() {
    let server = MockServer::start().await;
    mount_search(&server, binary_tree_page()).await;

    let config = Config {
        max_results: 1,
        ..mock_config(&server)
    };
    let mut session = Session::new(&config);
    let mut host = BufferHost::new();
    session.execute(Command::Search("binary tree".into()), &mut host);

    assert_eq!(session.lookup().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_without_recipes_leaves_empty_lookup() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        result_page(&["http://code.activestate.com/recipes/langs/python/"]),
    )
    .await;

    let mut session = mock_session(&server);
    let mut host = BufferHost::new();
    session.execute(Command::Search("nothing useful".into()), &mut host);

    assert!(session.lookup().unwrap().is_empty());
    assert_eq!(host.last(), Some(&Output::NoResults));
}

#[tokio::test]
async fn test_empty_search_redisplays_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(binary_tree_page()))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = mock_session(&server);
    let mut host = BufferHost::new();
    session.execute(Command::Search("binary tree".into()), &mut host);
    session.execute(Command::Search(String::new()), &mut host);

    assert_eq!(host.outputs.len(), 2);
    assert_eq!(host.outputs[0], host.outputs[1]);
}

#[tokio::test]
async fn test_failed_search_keeps_previous_lookup() {
    let server = MockServer::start().await;
    mount_search(&server, binary_tree_page()).await;

    let mut session = mock_session(&server);
    let mut host = BufferHost::new();
    session.execute(Command::Search("binary tree".into()), &mut host);
    let before = session.lookup().cloned();

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    session.execute(Command::Search("heap".into()), &mut host);

    assert_eq!(session.lookup().cloned(), before);
    assert!(matches!(
        host.last(),
        Some(Output::Diagnostic(LookupError::Network { .. }))
    ));
}

#[tokio::test]
async fn test_new_search_replaces_lookup() {
    let server = MockServer::start().await;
    mount_search(&server, binary_tree_page()).await;

    let mut session = mock_session(&server);
    let mut host = BufferHost::new();
    session.execute(Command::Search("binary tree".into()), &mut host);

    server.reset().await;
    mount_search(
        &server,
        result_page(&["http://code.activestate.com/recipes/117228-priority-dictionary/"]),
    )
    .await;
    session.execute(Command::Search("heap".into()), &mut host);

    let cache = session.lookup().unwrap();
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(0).unwrap().id.as_str(), "117228");
}

// =============================================================================
// Resolution and fetch
// =============================================================================

#[tokio::test]
async fn test_describe_index_fetches_resolved_id() {
    let server = MockServer::start().await;
    mount_search(&server, binary_tree_page()).await;

    Mock::given(method("GET"))
        .and(path("/recipes/api/2/recipes/511508/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "pass",
            "description": SEARCH_TREE_DESCRIPTION,
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/recipes/api/2/recipes/1/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut session = mock_session(&server);
    let mut host = BufferHost::new();
    session.execute(Command::Search("binary tree".into()), &mut host);
    session.execute(Command::Describe("1".into()), &mut host);

    assert_eq!(
        host.last(),
        Some(&Output::Description(SEARCH_TREE_DESCRIPTION.to_owned()))
    );
}

#[tokio::test]
async fn test_show_by_id_and_by_marked_index() {
    let server = MockServer::start().await;
    mount_search(&server, binary_tree_page()).await;
    mount_recipe(&server, "577478", TREE_CODE, "Binary tree.").await;

    let mut session = mock_session(&server);
    let mut host = BufferHost::new();
    session.execute(Command::Show("577478".into()), &mut host);
    session.execute(Command::Search("binary tree".into()), &mut host);
    session.execute(Command::Show("#0".into()), &mut host);

    let codes: Vec<&Output> = host
        .outputs
        .iter()
        .filter(|o| matches!(o, Output::Code { .. }))
        .collect();
    assert_eq!(codes.len(), 2);
    assert_eq!(codes[0], codes[1]);
    match codes[0] {
        Output::Code { id, source } => {
            assert_eq!(id.as_str(), "577478");
            assert_eq!(source, TREE_CODE);
        }
        _ => unreachable!(),
    }
}

#[tokio::test]
async fn test_out_of_range_index_is_not_found() {
    let server = MockServer::start().await;
    mount_search(&server, binary_tree_page()).await;

    let mut session = mock_session(&server);
    let mut host = BufferHost::new();
    session.execute(Command::Search("binary tree".into()), &mut host);
    session.execute(Command::Show("5".into()), &mut host);

    assert!(matches!(
        host.last(),
        Some(Output::Diagnostic(LookupError::NotFound { token, .. })) if token == "5"
    ));
}

#[tokio::test]
async fn test_fetch_404_reports_id_and_keeps_lookup() {
    let server = MockServer::start().await;
    mount_search(&server, binary_tree_page()).await;
    Mock::given(method("GET"))
        .and(path("/recipes/api/2/recipes/577478/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut session = mock_session(&server);
    let mut host = BufferHost::new();
    session.execute(Command::Search("binary tree".into()), &mut host);
    let before = session.lookup().cloned();
    session.execute(Command::Show("0".into()), &mut host);

    match host.last() {
        Some(Output::Diagnostic(err @ LookupError::NotFound { .. })) => {
            assert!(err.to_string().contains("577478"));
        }
        other => panic!("expected not found, got {other:?}"),
    }
    assert_eq!(session.lookup().cloned(), before);
}

// =============================================================================
// Import and place
// =============================================================================

#[tokio::test]
async fn test_import_binds_and_conflicts() {
    let server = MockServer::start().await;
    mount_recipe(&server, "577478", TREE_CODE, "Binary tree.").await;

    let mut session = mock_session(&server);
    let mut host = BufferHost::new();

    session.execute(Command::Import("577478".into()), &mut host);
    assert_eq!(host.bindings[IMPORT_BINDING].source, TREE_CODE);

    session.execute(Command::Import("577478".into()), &mut host);
    assert!(matches!(
        host.last(),
        Some(Output::Diagnostic(LookupError::StateConflict { .. }))
    ));

    session.execute(Command::Unbind(IMPORT_BINDING.into()), &mut host);
    assert!(host.bindings.is_empty());

    session.execute(Command::Import("577478".into()), &mut host);
    assert!(host.bindings.contains_key(IMPORT_BINDING));
    assert!(host.diagnostics().len() == 1);
}

#[tokio::test]
async fn test_place_primes_next_input() {
    let server = MockServer::start().await;
    mount_recipe(&server, "577478", TREE_CODE, "Binary tree.").await;

    let mut session = mock_session(&server);
    let mut host = BufferHost::with_input_priming();
    session.execute(Command::Place("577478".into()), &mut host);

    assert_eq!(host.next_input.as_deref(), Some(TREE_CODE));
    assert!(host.diagnostics().is_empty());
}

// =============================================================================
// State export
// =============================================================================

#[tokio::test]
async fn test_state_exports_lookup_json() {
    let server = MockServer::start().await;
    mount_search(&server, binary_tree_page()).await;

    let mut session = mock_session(&server);
    let mut host = BufferHost::new();
    session.execute(Command::Search("binary tree".into()), &mut host);
    session.execute(Command::State, &mut host);

    match host.last() {
        Some(Output::State { name, json }) => {
            assert_eq!(name, "_lookup");
            let value: serde_json::Value = serde_json::from_str(json).unwrap();
            assert_eq!(value["0"]["id"], "577478");
            assert_eq!(value["1"]["title"], "binary search tree in python");
        }
        other => panic!("expected state, got {other:?}"),
    }
}
