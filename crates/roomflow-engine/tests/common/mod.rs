/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for roomflow-engine tests

use roomflow_adapter::{ClientConfig, Credentials, RoomflowClient, StaffRef, StaffRole};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Mock bearer token for testing
pub fn mock_token() -> String {
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test.signature".to_string()
}

/// Build an authenticated client pointed at a mock server
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> RoomflowClient {
    let mut client =
        RoomflowClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
            .expect("client init");
    client.set_credentials(Credentials {
        token: mock_token(),
        user_id: 3,
    });
    client
}

/// The housekeeper this session acts as
#[allow(dead_code)]
pub fn housekeeper() -> StaffRef {
    StaffRef {
        id: 3,
        name: "Ines".to_string(),
        role: StaffRole::Housekeeper,
    }
}

/// Task JSON body with a three-item bathroom checklist
#[allow(dead_code)]
pub fn task_with_checklist_body(id: i64, status: &str) -> String {
    format!(
        r#"{{
            "id": {id},
            "room_number": "204",
            "cleaning_type": "departure_cleaning",
            "status": "{status}",
            "assigned_to": {{"id": 3, "name": "Ines", "role": "housekeeper"}},
            "is_rush": false,
            "due_time": "2026-08-24T11:00:00Z",
            "is_guest_checked_out": true,
            "associated_checklists": [
                {{
                    "id": 10,
                    "name": "Bathroom",
                    "items": [
                        {{"id": 1, "text": "Clean mirror"}},
                        {{"id": 2, "text": "Replace towels"}},
                        {{"id": 3, "text": "Mop floor"}}
                    ]
                }}
            ]
        }}"#
    )
}
