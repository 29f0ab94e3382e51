//! Cats and their usage graphs.
//!
//! PurrSong tracks two kinds of cat: cats registered on the account, and the
//! "unknown cat" of a location, which collects visits the litter box could
//! not attribute. Both report the same graph series; only the operation and
//! the id they are keyed by differ, expressed here as [`CatSubject`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de::id;
use super::{data_field, to_pounds};
use crate::clients::{LavviebotClient, LavviebotError, OperationRequest};
use crate::operations;

/// Name given to unattributed cats and unattributed litter box visits.
pub const UNKNOWN_CAT_NAME: &str = "Unknown";

/// Whose graph data to fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatSubject {
    /// A cat registered on the account, by pet id.
    Named(i64),
    /// The unknown cat of a location, by location id.
    Unknown(i64),
}

impl CatSubject {
    /// The pet id or location id.
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Named(id) | Self::Unknown(id) => id,
        }
    }

    fn request(self) -> OperationRequest {
        match self {
            Self::Named(pet_id) => operations::cat_graph(pet_id),
            Self::Unknown(location_id) => operations::unknown_cat_graph(location_id),
        }
    }

    const fn operation_name(self) -> &'static str {
        match self {
            Self::Named(_) => "GetCatMainGraphData",
            Self::Unknown(_) => "GetCatMainUnknownGraphData",
        }
    }

    const fn data_field(self) -> &'static str {
        match self {
            Self::Named(_) => "getCatMainGraphData",
            Self::Unknown(_) => "getCatMainUnknownGraphData",
        }
    }
}

/// A cat found by discovery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredCat {
    /// Which graph series the cat's readings come from.
    pub subject: CatSubject,
    /// Nickname, or [`UNKNOWN_CAT_NAME`] for the unknown cat of a location.
    pub name: String,
}

/// Latest readings of one cat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cat {
    /// Pet id for named cats, location id for unknown cats.
    pub cat_id: i64,
    /// Nickname, or [`UNKNOWN_CAT_NAME`] for unknown cats.
    pub cat_name: String,
    /// Latest weight, in pounds.
    pub cat_weight_lbs: f64,
    /// Latest visit duration, in seconds.
    pub duration: f64,
    /// Latest number of droppings recorded.
    pub poop_count: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatLocation {
    #[serde(deserialize_with = "id")]
    id: i64,
    #[serde(default)]
    has_unknown_cat: Option<bool>,
    #[serde(default)]
    get_pet_cats: Option<Vec<PetCat>>,
}

#[derive(Deserialize)]
struct PetCat {
    #[serde(deserialize_with = "id")]
    id: i64,
    #[serde(default)]
    cat: Option<CatProfile>,
}

#[derive(Deserialize)]
struct CatProfile {
    #[serde(default)]
    nickname: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Graph {
    graph_type: String,
    #[serde(default)]
    graph_data: Option<Vec<Option<f64>>>,
}

/// Flattens discovery locations into cats, each location's unknown cat first.
fn discovered(locations: Vec<CatLocation>) -> Vec<DiscoveredCat> {
    let mut cats = Vec::new();
    for location in locations {
        if location.has_unknown_cat.unwrap_or(false) {
            cats.push(DiscoveredCat {
                subject: CatSubject::Unknown(location.id),
                name: UNKNOWN_CAT_NAME.to_string(),
            });
        }
        for pet in location.get_pet_cats.unwrap_or_default() {
            cats.push(DiscoveredCat {
                subject: CatSubject::Named(pet.id),
                name: pet.cat.and_then(|c| c.nickname).unwrap_or_default(),
            });
        }
    }
    cats
}

/// Last datapoint of the series named `graph_type`, or 0.
fn latest(graphs: &[Graph], graph_type: &str) -> f64 {
    graphs
        .iter()
        .find(|graph| graph.graph_type == graph_type)
        .and_then(|graph| graph.graph_data.as_ref())
        .and_then(|data| data.last().copied().flatten())
        .unwrap_or(0.0)
}

impl Cat {
    /// Builds the record from a graph data response body.
    pub(crate) fn from_body(
        subject: CatSubject,
        name: &str,
        body: &Value,
    ) -> Result<Self, LavviebotError> {
        let graphs: Vec<Graph> = data_field(body, subject.operation_name(), subject.data_field())?;

        #[allow(clippy::cast_possible_truncation)]
        let poop_count = latest(&graphs, "poopCount").round() as i64;

        Ok(Self {
            cat_id: subject.id(),
            cat_name: name.to_string(),
            cat_weight_lbs: to_pounds(latest(&graphs, "weight")),
            duration: latest(&graphs, "duration"),
            poop_count,
        })
    }
}

impl LavviebotClient {
    /// Lists the cats on the account, including one unknown cat for every
    /// location that has one.
    ///
    /// # Errors
    ///
    /// Any error of [`call`](Self::call), or
    /// [`LavviebotError::UnexpectedResponse`] if `data.getLocations` is
    /// missing or malformed.
    pub async fn discover_cats(&self) -> Result<Vec<DiscoveredCat>, LavviebotError> {
        let body = self.call(&operations::discover_cats()).await?;
        let locations = data_field(&body, "CatMainDrawerLocations", "getLocations")?;
        Ok(discovered(locations))
    }

    /// Fetches the latest readings of a registered cat.
    ///
    /// # Errors
    ///
    /// Any error of [`call`](Self::call), or
    /// [`LavviebotError::UnexpectedResponse`] if the graph data is malformed.
    pub async fn cat_status(&self, pet_id: i64, name: &str) -> Result<Cat, LavviebotError> {
        self.subject_status(CatSubject::Named(pet_id), name).await
    }

    /// Fetches the latest readings of a location's unknown cat.
    ///
    /// # Errors
    ///
    /// Same as [`cat_status`](Self::cat_status).
    pub async fn unknown_cat_status(&self, location_id: i64) -> Result<Cat, LavviebotError> {
        self.subject_status(CatSubject::Unknown(location_id), UNKNOWN_CAT_NAME)
            .await
    }

    /// Fetches the latest readings of either kind of cat.
    ///
    /// # Errors
    ///
    /// Same as [`cat_status`](Self::cat_status).
    pub async fn subject_status(
        &self,
        subject: CatSubject,
        name: &str,
    ) -> Result<Cat, LavviebotError> {
        let body = self.call(&subject.request()).await?;
        tracing::debug!("Fetched graph data for {subject:?}");
        Cat::from_body(subject, name, &body)
    }
}
