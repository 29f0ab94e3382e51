//! Shared fixtures for the wiremock-backed integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lavviebot_api::{Email, EndpointUrl, LavviebotClient, LavviebotConfig, Password};
use serde_json::{json, Value};
use wiremock::matchers::{header, method};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Cookie pair issued by the mocked server status check.
pub const COOKIE: &str = "connect.sid=abc123";

/// Matches a POST whose (first) operation has the given name.
pub struct Operation(pub &'static str);

impl Match for Operation {
    fn matches(&self, request: &Request) -> bool {
        operation_name(request).as_deref() == Some(self.0)
    }
}

/// Shorthand for [`Operation`].
pub const fn operation(name: &'static str) -> Operation {
    Operation(name)
}

/// Name of the request's operation, or of the first operation of a batch.
pub fn operation_name(request: &Request) -> Option<String> {
    let body: Value = serde_json::from_slice(&request.body).ok()?;
    let first = match &body {
        Value::Array(items) => items.first()?,
        other => other,
    };
    first
        .get("operationName")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Operation names of everything the server received, in order.
pub async fn received_operations(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(operation_name)
        .collect()
}

pub fn create_config(server: &MockServer) -> LavviebotConfig {
    LavviebotConfig::builder()
        .email(Email::new("owner@example.com").unwrap())
        .password(Password::new("secret").unwrap())
        .endpoint(EndpointUrl::new(server.uri()).unwrap())
        .build()
        .unwrap()
}

pub fn create_client(server: &MockServer) -> LavviebotClient {
    LavviebotClient::new(create_config(server)).unwrap()
}

/// A 200 response carrying one GraphQL error.
pub fn graphql_error(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "errors": [{"message": message, "locations": [], "path": []}],
        "data": null
    }))
}

/// Serves the session cookie; expects exactly `times` status checks.
pub async fn mount_cookie(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(operation("CheckServerStatus"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "connect.sid=abc123; Path=/; HttpOnly")
                .set_body_json(json!({"data": {"checkServerStatus": true}})),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// Serves one login per token, in order; expects exactly that many logins.
pub async fn mount_logins(server: &MockServer, tokens: &'static [&'static str], has_cat: bool) {
    let calls = Arc::new(AtomicUsize::new(0));
    Mock::given(method("POST"))
        .and(operation("Login"))
        .and(header("cookie", COOKIE))
        .respond_with(move |_request: &Request| -> ResponseTemplate {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            let token = tokens[call.min(tokens.len() - 1)];
            ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "login": {
                        "userId": 42,
                        "userToken": token,
                        "hasCat": has_cat,
                        "__typename": "LoginResult"
                    }
                }
            }))
        })
        .expect(tokens.len() as u64)
        .mount(server)
        .await;
}

pub fn litter_box_locations() -> Value {
    json!({
        "data": {
            "getLocations": [{
                "id": 3,
                "nickname": "Home",
                "locationRole": "OWNER",
                "getIots": [
                    {"id": 11, "lavviebot": {"nickname": "Upstairs"}, "lavvieTag": null, "lavvieScanner": null, "pet": null},
                    {"id": 90, "lavviebot": null, "lavvieTag": {"id": 1, "nickname": "Collar"}, "lavvieScanner": null, "pet": null}
                ]
            }]
        }
    })
}

pub fn litter_box_details(device_id: i64) -> Value {
    json!({
        "data": {
            "getIotDetail": {
                "id": device_id,
                "iotCodeTail": "A1B2",
                "latestFirmwareVersion": "1.2.0",
                "lavviebot": {
                    "id": 5,
                    "nickname": "Upstairs",
                    "routerSSID": "home-wifi",
                    "lavviebotLitters": [],
                    "minBottomWeight": 910.2,
                    "beaconBattery": 87,
                    "recentLavviebotLog": {
                        "currentFirmwareVersion": "1.1.9",
                        "motorState": 0,
                        "topLitterStatus": 1,
                        "wasteDrawerStatus": 0,
                        "waitTime": 5,
                        "litterType": 0,
                        "litterBottomAmount": 4551,
                        "humidity": 40,
                        "temperature": 22,
                        "creationTime": "1650000000000"
                    }
                }
            }
        }
    })
}

pub fn litter_box_usage() -> Value {
    json!({
        "data": {
            "getLavviebotPoopRecord": {
                "mostUsedCat": null,
                "catUsageHistory": [
                    {"petId": 70, "nickname": "Mochi", "catMainPhoto": null, "duration": 61, "creationTime": 1650000100000_i64}
                ],
                "nextCursor": null
            }
        }
    })
}

/// Batched status response for one litter box.
pub fn litter_box_status(device_id: i64) -> Value {
    json!([litter_box_details(device_id), litter_box_usage()])
}
