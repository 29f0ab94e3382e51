//! One polling pass over every litter box and cat on the account.

use std::collections::HashMap;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use super::cat::{Cat, CatSubject};
use super::litter_box::LitterBox;
use crate::clients::{LavviebotClient, LavviebotError};

/// Snapshot of all devices and cats produced by [`LavviebotClient::fetch_data`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LavviebotData {
    /// Litter boxes keyed by device id.
    pub litter_boxes: HashMap<i64, LitterBox>,
    /// Registered cats keyed by pet id.
    pub cats: HashMap<i64, Cat>,
    /// Unknown cats keyed by location id.
    pub unknown_cats: HashMap<i64, Cat>,
}

impl LavviebotClient {
    /// Fetches the status of every litter box and, if the account has cats,
    /// the readings of every cat.
    ///
    /// Litter boxes are fetched concurrently, one batched request each; cats
    /// are then fetched concurrently, one request each. The first failing
    /// fetch fails the whole pass and the fetches still in flight are
    /// dropped.
    ///
    /// # Errors
    ///
    /// The first error returned by any discovery or status fetch.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let data = client.fetch_data().await?;
    /// for cat in data.cats.values() {
    ///     println!("{}: {:.1} lbs", cat.cat_name, cat.cat_weight_lbs);
    /// }
    /// ```
    pub async fn fetch_data(&self) -> Result<LavviebotData, LavviebotError> {
        let discovered = self.discover_litter_boxes().await?;
        let litter_boxes = try_join_all(
            discovered
                .iter()
                .map(|device| self.litter_box_status(device.id, &device.name)),
        )
        .await?;

        let mut cats = HashMap::new();
        let mut unknown_cats = HashMap::new();
        // Discovery has logged in by now, so the flag is known.
        if self.session().await.has_cat.unwrap_or(false) {
            let discovered = self.discover_cats().await?;
            let fetched = try_join_all(
                discovered
                    .iter()
                    .map(|cat| self.subject_status(cat.subject, &cat.name)),
            )
            .await?;

            for (found, cat) in discovered.iter().zip(fetched) {
                match found.subject {
                    CatSubject::Named(pet_id) => cats.insert(pet_id, cat),
                    CatSubject::Unknown(location_id) => unknown_cats.insert(location_id, cat),
                };
            }
        }

        tracing::debug!(
            "Fetched {} litter boxes, {} cats and {} unknown cats",
            litter_boxes.len(),
            cats.len(),
            unknown_cats.len()
        );

        Ok(LavviebotData {
            litter_boxes: litter_boxes
                .into_iter()
                .map(|litter_box| (litter_box.device_id, litter_box))
                .collect(),
            cats,
            unknown_cats,
        })
    }
}
