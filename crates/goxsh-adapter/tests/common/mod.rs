/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for goxsh-adapter tests

use goxsh_adapter::{ClientConfig, GoxClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server, no credentials stored
pub fn anonymous_client(server: &MockServer) -> GoxClient {
    GoxClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init")
}

/// Client pointed at the mock server with test credentials stored
pub fn logged_in_client(server: &MockServer) -> GoxClient {
    let mut client = anonymous_client(server);
    client
        .set_credentials("alice", "hunter2")
        .expect("test credentials");
    client
}
