//! Integration tests for `fetch_data`, the full polling pass.

mod common;

use common::{
    create_client, graphql_error, litter_box_locations, litter_box_status, mount_cookie,
    mount_logins, operation, received_operations,
};
use lavviebot_api::{LavviebotError, UNKNOWN_CAT_NAME};
use serde_json::{json, Value};
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn cat_locations() -> Value {
    json!({
        "data": {
            "getLocations": [{
                "id": 3,
                "nickname": "Home",
                "locationRole": "OWNER",
                "hasUnknownCat": true,
                "petOrder": [70],
                "getPetCats": [{"id": 70, "cat": {"catMainPhoto": null, "nickname": "Mochi"}}]
            }]
        }
    })
}

fn graphs(field: &str, weight: f64, duration: f64, poop_count: i64) -> Value {
    json!({
        "data": {
            field: [
                {"graphType": "weight", "graphData": [4000.0, weight]},
                {"graphType": "duration", "graphData": [10.0, duration]},
                {"graphType": "poopCount", "graphData": [0, poop_count]}
            ]
        }
    })
}

#[tokio::test]
async fn test_fetch_data_recovers_from_one_session_expiry() {
    let server = MockServer::start().await;
    mount_cookie(&server, 2).await;
    mount_logins(&server, &["tok-1", "tok-2"], false).await;
    Mock::given(method("POST"))
        .and(operation("IotMainDrawerLocations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(litter_box_locations()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(operation("GetLavviebotDetails"))
        .and(header("authorization", "tok-1"))
        .respond_with(graphql_error("Please login again."))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(operation("GetLavviebotDetails"))
        .and(header("authorization", "tok-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(litter_box_status(11)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(operation("CatMainDrawerLocations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cat_locations()))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let data = client.fetch_data().await.unwrap();

    assert_eq!(data.litter_boxes.len(), 1);
    assert!(data.cats.is_empty());
    assert!(data.unknown_cats.is_empty());

    let litter_box = &data.litter_boxes[&11];
    assert_eq!(litter_box.device_name, "Upstairs");
    assert_eq!(litter_box.iot_code_tail.as_deref(), Some("A1B2"));
    assert!((litter_box.litter_bottom_amount_lbs.unwrap() - 10.0).abs() < 1e-9);
    assert_eq!(litter_box.beacon_battery, Some(json!(87)));

    let logins = received_operations(&server)
        .await
        .into_iter()
        .filter(|name| name == "Login")
        .count();
    assert_eq!(logins, 2);
}

#[tokio::test]
async fn test_fetch_data_includes_named_and_unknown_cats() {
    let server = MockServer::start().await;
    mount_cookie(&server, 1).await;
    mount_logins(&server, &["tok-1"], true).await;
    Mock::given(method("POST"))
        .and(operation("IotMainDrawerLocations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(litter_box_locations()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(operation("GetLavviebotDetails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(litter_box_status(11)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(operation("CatMainDrawerLocations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cat_locations()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(operation("GetCatMainGraphData"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(graphs("getCatMainGraphData", 4551.0, 62.0, 3)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(operation("GetCatMainUnknownGraphData"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphs(
            "getCatMainUnknownGraphData",
            2275.5,
            30.0,
            1,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let data = client.fetch_data().await.unwrap();

    let mochi = &data.cats[&70];
    assert_eq!(mochi.cat_name, "Mochi");
    assert!((mochi.cat_weight_lbs - 10.0).abs() < 1e-9);
    assert_eq!(mochi.poop_count, 3);

    let unknown = &data.unknown_cats[&3];
    assert_eq!(unknown.cat_id, 3);
    assert_eq!(unknown.cat_name, UNKNOWN_CAT_NAME);
    assert!((unknown.cat_weight_lbs - 5.0).abs() < 1e-9);
    assert!((unknown.duration - 30.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_fetch_data_fails_whole_pass_on_first_error() {
    let server = MockServer::start().await;
    mount_cookie(&server, 1).await;
    mount_logins(&server, &["tok-1"], false).await;
    Mock::given(method("POST"))
        .and(operation("IotMainDrawerLocations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "getLocations": [{
                    "id": 3,
                    "getIots": [
                        {"id": 11, "lavviebot": {"nickname": "Upstairs"}},
                        {"id": 12, "lavviebot": {"nickname": "Downstairs"}}
                    ]
                }]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(operation("GetLavviebotDetails"))
        .respond_with(|request: &Request| -> ResponseTemplate {
            let batch: Value = serde_json::from_slice(&request.body).unwrap_or_default();
            match batch[0]["variables"]["data"]["iotId"].as_i64() {
                Some(12) => graphql_error("IoT is offline"),
                Some(id) => ResponseTemplate::new(200).set_body_json(litter_box_status(id)),
                None => ResponseTemplate::new(400),
            }
        })
        .expect(1..=2)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = client.fetch_data().await;

    assert!(matches!(
        result,
        Err(LavviebotError::Api { message }) if message == "IoT is offline"
    ));
}
