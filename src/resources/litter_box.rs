//! LavvieBot S litter boxes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::cat::UNKNOWN_CAT_NAME;
use super::de::{id, opt_timestamp_millis};
use super::{data_field, to_pounds};
use crate::clients::{LavviebotClient, LavviebotError};
use crate::operations;

/// A litter box found by discovery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredLitterBox {
    /// The IoT id of the device.
    pub id: i64,
    /// The nickname set in the PurrSong app.
    pub name: String,
    /// The location the device belongs to.
    pub location_id: i64,
}

/// Latest status of one litter box.
///
/// Built from one batched request, so the detail and usage fields describe
/// the same moment. Weights are in pounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LitterBox {
    /// IoT id of the device.
    pub device_id: i64,
    /// Nickname given in the app.
    pub device_name: String,
    /// Last characters of the device serial.
    pub iot_code_tail: Option<String>,
    /// Newest firmware the service offers for the device.
    pub latest_firmware: Option<String>,
    /// Wi-Fi network the device is joined to.
    pub router_ssid: Option<String>,
    /// Bottom tray weight below which litter is reported low, in pounds.
    pub min_bottom_weight_lbs: Option<f64>,
    /// Passed through as reported; the service has no fixed shape for it.
    pub beacon_battery: Option<Value>,
    /// Firmware the device is running.
    pub current_firmware: Option<String>,
    /// Raw motor state code.
    pub motor_state: Option<i64>,
    /// Raw top litter level code.
    pub top_litter_status: Option<i64>,
    /// Raw waste drawer fill code.
    pub waste_drawer_status: Option<i64>,
    /// Delay before cleaning after a visit.
    pub wait_time: Option<i64>,
    /// Raw litter type code.
    pub litter_type: Option<i64>,
    /// Litter weight in the bottom tray, in pounds.
    pub litter_bottom_amount_lbs: Option<f64>,
    /// Relative humidity, in percent.
    pub humidity: Option<f64>,
    /// Temperature, in degrees Celsius.
    pub temperature_c: Option<f64>,
    /// When the device last reported its status.
    pub last_seen: Option<DateTime<Utc>>,
    /// Cat that used the box last; [`UNKNOWN_CAT_NAME`] if it was not
    /// recognised, `None` if the box has no usage history.
    pub last_cat_used_name: Option<String>,
    /// Duration of the last use, in seconds.
    pub last_used_duration: Option<f64>,
    /// When the box was last used.
    pub last_used: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IotLocation {
    #[serde(deserialize_with = "id")]
    id: i64,
    #[serde(default)]
    get_iots: Option<Vec<Iot>>,
}

#[derive(Deserialize)]
struct Iot {
    #[serde(deserialize_with = "id")]
    id: i64,
    #[serde(default)]
    lavviebot: Option<Nickname>,
}

#[derive(Deserialize)]
struct Nickname {
    #[serde(default)]
    nickname: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IotDetail {
    #[serde(default)]
    iot_code_tail: Option<String>,
    #[serde(default)]
    latest_firmware_version: Option<String>,
    lavviebot: DetailLavviebot,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailLavviebot {
    #[serde(default, rename = "routerSSID")]
    router_ssid: Option<String>,
    #[serde(default)]
    min_bottom_weight: Option<f64>,
    #[serde(default)]
    beacon_battery: Option<Value>,
    recent_lavviebot_log: RecentLog,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentLog {
    #[serde(default)]
    current_firmware_version: Option<String>,
    #[serde(default)]
    motor_state: Option<i64>,
    #[serde(default)]
    top_litter_status: Option<i64>,
    #[serde(default)]
    waste_drawer_status: Option<i64>,
    #[serde(default)]
    wait_time: Option<i64>,
    #[serde(default)]
    litter_type: Option<i64>,
    #[serde(default)]
    litter_bottom_amount: Option<f64>,
    #[serde(default)]
    humidity: Option<f64>,
    #[serde(default)]
    temperature: Option<f64>,
    #[serde(default, deserialize_with = "opt_timestamp_millis")]
    creation_time: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoopRecord {
    #[serde(default)]
    cat_usage_history: Option<Vec<UsageEntry>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageEntry {
    #[serde(default)]
    nickname: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default, deserialize_with = "opt_timestamp_millis")]
    creation_time: Option<DateTime<Utc>>,
}

/// Flattens discovery locations into the devices that are litter boxes.
fn discovered(locations: Vec<IotLocation>) -> Vec<DiscoveredLitterBox> {
    locations
        .into_iter()
        .flat_map(|location| {
            let location_id = location.id;
            location
                .get_iots
                .unwrap_or_default()
                .into_iter()
                .filter_map(move |iot| {
                    let lavviebot = iot.lavviebot?;
                    Some(DiscoveredLitterBox {
                        id: iot.id,
                        name: lavviebot.nickname.unwrap_or_default(),
                        location_id,
                    })
                })
        })
        .collect()
}

impl LitterBox {
    /// Builds the record from the detail and usage bodies of one batch.
    pub(crate) fn from_bodies(
        device_id: i64,
        device_name: &str,
        details: &Value,
        usage: &Value,
    ) -> Result<Self, LavviebotError> {
        let detail: IotDetail = data_field(details, "GetLavviebotDetails", "getIotDetail")?;
        let record: PoopRecord =
            data_field(usage, "GetLavviebotPoopRecord", "getLavviebotPoopRecord")?;

        // History is newest first.
        let last_use = record
            .cat_usage_history
            .and_then(|history| history.into_iter().next());
        let log = detail.lavviebot.recent_lavviebot_log;

        Ok(Self {
            device_id,
            device_name: device_name.to_string(),
            iot_code_tail: detail.iot_code_tail,
            latest_firmware: detail.latest_firmware_version,
            router_ssid: detail.lavviebot.router_ssid,
            min_bottom_weight_lbs: detail.lavviebot.min_bottom_weight.map(to_pounds),
            beacon_battery: detail.lavviebot.beacon_battery,
            current_firmware: log.current_firmware_version,
            motor_state: log.motor_state,
            top_litter_status: log.top_litter_status,
            waste_drawer_status: log.waste_drawer_status,
            wait_time: log.wait_time,
            litter_type: log.litter_type,
            litter_bottom_amount_lbs: log.litter_bottom_amount.map(to_pounds),
            humidity: log.humidity,
            temperature_c: log.temperature,
            last_seen: log.creation_time,
            last_cat_used_name: last_use.as_ref().map(|entry| {
                entry
                    .nickname
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_CAT_NAME.to_string())
            }),
            last_used_duration: last_use.as_ref().and_then(|entry| entry.duration),
            last_used: last_use.and_then(|entry| entry.creation_time),
        })
    }
}

impl LavviebotClient {
    /// Lists the litter boxes on the account, across all locations.
    ///
    /// Devices that are not litter boxes (tags, scanners) are skipped.
    ///
    /// # Errors
    ///
    /// Any error of [`call`](Self::call), or
    /// [`LavviebotError::UnexpectedResponse`] if `data.getLocations` is
    /// missing or malformed.
    pub async fn discover_litter_boxes(&self) -> Result<Vec<DiscoveredLitterBox>, LavviebotError> {
        let body = self.call(&operations::discover_litter_boxes()).await?;
        let locations = data_field(&body, "IotMainDrawerLocations", "getLocations")?;
        Ok(discovered(locations))
    }

    /// Fetches the latest status and usage of one litter box.
    ///
    /// Detail and usage history are sent as one batched request.
    ///
    /// # Errors
    ///
    /// Any error of [`call_batch`](Self::call_batch), or
    /// [`LavviebotError::UnexpectedResponse`] if either body is malformed.
    pub async fn litter_box_status(
        &self,
        device_id: i64,
        name: &str,
    ) -> Result<LitterBox, LavviebotError> {
        let requests = [
            operations::litter_box_details(device_id),
            operations::litter_box_usage(device_id),
        ];
        let bodies = self.call_batch(&requests).await?;
        let [details, usage]: [Value; 2] = bodies.try_into().map_err(|_| {
            LavviebotError::unexpected("GetLavviebotDetails", "expected two batch responses")
        })?;
        tracing::debug!("Fetched status of litter box {device_id}");
        LitterBox::from_bodies(device_id, name, &details, &usage)
    }
}
