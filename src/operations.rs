//! GraphQL operations understood by the PurrSong endpoint.
//!
//! Each function returns a ready-to-send [`OperationRequest`]. The query
//! documents are the ones the PurrSong mobile app sends.

use serde_json::json;

use crate::clients::OperationRequest;
use crate::config::LavviebotConfig;

/// Server status check; its response sets the session cookie.
pub const CHECK_SERVER_STATUS: &str =
    "query CheckServerStatus($data: CheckServerStatusArgs!) {checkServerStatus(data: $data)}";

/// Login mutation exchanging email/password for a user token.
pub const LOGIN: &str = "mutation Login($data: LoginArgs!) \
    {login(data: $data) {userId userToken hasCat __typename}}";

/// Discovers every IoT device grouped by location.
pub const DISCOVER_LITTER_BOXES: &str = "query IotMainDrawerLocations {getLocations \
    {...LocationInfo getIots {id lavviebot {nickname __typename} lavvieTag {id nickname __typename} \
    lavvieScanner {nickname __typename} pet {id cat {catMainPhoto nickname __typename} __typename} \
    __typename} __typename}} \
    fragment LocationInfo on Location {id nickname locationRole __typename}";

/// Discovers every cat grouped by location.
pub const DISCOVER_CATS: &str = "query CatMainDrawerLocations {getLocations {...LocationInfo \
    hasUnknownCat petOrder getPetCats {id cat {catMainPhoto nickname __typename} __typename} \
    __typename}} \
    fragment LocationInfo on Location {id nickname locationRole __typename}";

/// Latest status of one litter box.
pub const LITTER_BOX_DETAILS: &str = "query GetLavviebotDetails($data: IotIdArgs!) \
    {getIotDetail(data: $data) {id iotCodeTail latestFirmwareVersion lavviebot {id nickname \
    routerSSID lavviebotLitters {litterName userLitterType __typename} minBottomWeight \
    beaconBattery recentLavviebotLog {currentFirmwareVersion motorState topLitterStatus \
    wasteDrawerStatus waitTime litterType litterBottomAmount humidity temperature creationTime \
    __typename} __typename} __typename}}";

/// Cat usage history recorded by one litter box.
pub const LITTER_BOX_USAGE: &str = "query GetLavviebotPoopRecord($data: GetIotCatRecordArgs!) \
    {getLavviebotPoopRecord(data: $data) {mostUsedCat {count catMainPhoto nickname __typename} \
    catUsageHistory {petId nickname catMainPhoto duration creationTime __typename} nextCursor \
    __typename}}";

/// Graph data for the unknown cat of a location.
pub const UNKNOWN_CAT_GRAPH: &str = "query GetCatMainUnknownGraphData\
    ($data: GetCatMainUnknownGraphDataArgs!) {getCatMainUnknownGraphData(data: $data) \
    {graphType graphData __typename}}";

/// Graph data for one named cat.
pub const CAT_GRAPH: &str = "query GetCatMainGraphData($data: GetCatMainGraphDataArgs!) \
    {getCatMainGraphData(data: $data) {graphType graphData __typename}}";

/// Graph series requested for every cat.
pub const GRAPH_TYPES: [&str; 3] = ["weight", "duration", "poopCount"];

/// `CheckServerStatus`, sent without credentials.
#[must_use]
pub fn check_server_status(language: &str) -> OperationRequest {
    OperationRequest::builder("CheckServerStatus", CHECK_SERVER_STATUS)
        .variables(json!({ "data": { "language": language } }))
        .anonymous()
        .build()
}

/// `Login`, sent with the cookie but without a token.
#[must_use]
pub fn login(config: &LavviebotConfig) -> OperationRequest {
    OperationRequest::builder("Login", LOGIN)
        .variables(json!({
            "data": {
                "email": config.email().as_ref(),
                "password": config.password().as_ref(),
                "appVersion": config.app_version(),
                "timezone": config.timezone(),
                "timezoneCountry": config.timezone_country(),
            }
        }))
        .anonymous()
        .build()
}

/// `IotMainDrawerLocations`.
#[must_use]
pub fn discover_litter_boxes() -> OperationRequest {
    OperationRequest::builder("IotMainDrawerLocations", DISCOVER_LITTER_BOXES).build()
}

/// `CatMainDrawerLocations`.
#[must_use]
pub fn discover_cats() -> OperationRequest {
    OperationRequest::builder("CatMainDrawerLocations", DISCOVER_CATS).build()
}

/// `GetLavviebotDetails` for one device.
#[must_use]
pub fn litter_box_details(device_id: i64) -> OperationRequest {
    OperationRequest::builder("GetLavviebotDetails", LITTER_BOX_DETAILS)
        .variables(json!({ "data": { "iotId": device_id } }))
        .build()
}

/// `GetLavviebotPoopRecord` for one device.
#[must_use]
pub fn litter_box_usage(device_id: i64) -> OperationRequest {
    OperationRequest::builder("GetLavviebotPoopRecord", LITTER_BOX_USAGE)
        .variables(json!({ "data": { "iotId": device_id } }))
        .build()
}

/// `GetCatMainGraphData` for one named cat.
#[must_use]
pub fn cat_graph(pet_id: i64) -> OperationRequest {
    OperationRequest::builder("GetCatMainGraphData", CAT_GRAPH)
        .variables(json!({ "data": { "petId": pet_id, "graphTypes": GRAPH_TYPES } }))
        .build()
}

/// `GetCatMainUnknownGraphData` for the unknown cat of one location.
#[must_use]
pub fn unknown_cat_graph(location_id: i64) -> OperationRequest {
    OperationRequest::builder("GetCatMainUnknownGraphData", UNKNOWN_CAT_GRAPH)
        .variables(json!({ "data": { "locationId": location_id, "graphTypes": GRAPH_TYPES } }))
        .build()
}
