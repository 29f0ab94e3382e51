//! Typed records for litter boxes and cats.
//!
//! This module maps PurrSong response bodies into Rust records and adds the
//! per-device and per-pet operations to
//! [`LavviebotClient`](crate::LavviebotClient):
//!
//! | Operation | Sends | Returns |
//! |-----------|-------|---------|
//! | `discover_litter_boxes` | `IotMainDrawerLocations` | `Vec<DiscoveredLitterBox>` |
//! | `litter_box_status` | `GetLavviebotDetails` + `GetLavviebotPoopRecord` (one batch) | [`LitterBox`] |
//! | `discover_cats` | `CatMainDrawerLocations` | `Vec<DiscoveredCat>` |
//! | `cat_status` | `GetCatMainGraphData` | [`Cat`] |
//! | `unknown_cat_status` | `GetCatMainUnknownGraphData` | [`Cat`] |
//! | `fetch_data` | all of the above | [`LavviebotData`] |
//!
//! Weights are converted to pounds and timestamps to [`chrono::DateTime<Utc>`](chrono::DateTime).

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::LavviebotError;

mod aggregate;
mod cat;
pub(crate) mod de;
mod litter_box;

pub use aggregate::LavviebotData;
pub use cat::{Cat, CatSubject, DiscoveredCat, UNKNOWN_CAT_NAME};
pub use litter_box::{DiscoveredLitterBox, LitterBox};

/// Raw weight units per pound, as reported by the service.
pub const WEIGHT_UNITS_PER_POUND: f64 = 455.1;

/// Converts a raw weight reading to pounds.
#[must_use]
pub fn to_pounds(raw: f64) -> f64 {
    raw / WEIGHT_UNITS_PER_POUND
}

/// Deserializes `data.<field>` of an operation's response body.
pub(crate) fn data_field<T: DeserializeOwned>(
    body: &Value,
    operation: &str,
    field: &str,
) -> Result<T, LavviebotError> {
    let value = body
        .get("data")
        .and_then(|data| data.get(field))
        .filter(|value| !value.is_null())
        .ok_or_else(|| LavviebotError::unexpected(operation, format!("missing `data.{field}`")))?;
    T::deserialize(value).map_err(|e| LavviebotError::unexpected(operation, e.to_string()))
}
