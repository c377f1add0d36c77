//! Restaurant entity and the nested address/grade records it carries.

use bson::doc;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A restaurant catalog entry.
///
/// Maps one-to-one onto the documents in the `restaurants` collection of the
/// `sample_restaurants` database. `id` is `None` for documents that have not
/// been inserted yet; the server assigns an object id on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub address: Address,
    pub borough: String,
    pub cuisine: String,
    pub grades: Vec<Grade>,
    pub name: String,
    pub restaurant_id: String,
}

/// Street address with a longitude/latitude coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub building: String,
    pub street: String,
    pub zipcode: String,
    pub coord: Vec<f64>,
}

/// A dated inspection grade.
///
/// The date is stored as a native BSON datetime so range queries work
/// server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    pub grade: String,
    pub score: i32,
}

impl Restaurant {
    /// Builds the demo entry inserted by `catalog seed`.
    ///
    /// Field values mirror the canned sample record: fixed address and cuisine,
    /// randomized coordinates and grade score so repeated seeds are
    /// distinguishable.
    pub fn demo() -> Self {
        let mut rng = rand::rng();

        Self {
            id: None,
            address: Address {
                building: "Building".to_string(),
                street: "street".to_string(),
                zipcode: "zipcode".to_string(),
                coord: vec![rng.random_range(-180.0..180.0), rng.random_range(-90.0..90.0)],
            },
            borough: "borough".to_string(),
            cuisine: "cuisine".to_string(),
            grades: vec![Grade {
                date: Utc::now(),
                grade: "A".to_string(),
                score: rng.random_range(0..100),
            }],
            name: "name".to_string(),
            restaurant_id: "restaurantId".to_string(),
        }
    }

    /// Derives an uninserted copy with a new name and restaurant id.
    ///
    /// Used by batch seeding, which clones an existing document instead of
    /// fabricating every field from scratch.
    pub fn derived(&self, name: impl Into<String>, restaurant_id: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            restaurant_id: restaurant_id.into(),
            ..self.clone()
        }
    }

    /// Returns the most recent grade, if any.
    pub fn latest_grade(&self) -> Option<&Grade> {
        self.grades.iter().max_by_key(|g| g.date)
    }
}

/// Partial update for an existing restaurant.
///
/// `None` fields are left unchanged. Renders to a `$set` document at the
/// repository boundary; an all-`None` patch is rejected by services before any
/// database call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantPatch {
    pub name: Option<String>,
    pub cuisine: Option<String>,
    pub borough: Option<String>,
    pub restaurant_id: Option<String>,
}

impl RestaurantPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.cuisine.is_none()
            && self.borough.is_none()
            && self.restaurant_id.is_none()
    }

    /// Renders the patch as a MongoDB `$set` update document.
    pub fn to_update_document(&self) -> bson::Document {
        let mut set = bson::Document::new();

        if let Some(ref name) = self.name {
            set.insert("name", name);
        }
        if let Some(ref cuisine) = self.cuisine {
            set.insert("cuisine", cuisine);
        }
        if let Some(ref borough) = self.borough {
            set.insert("borough", borough);
        }
        if let Some(ref restaurant_id) = self.restaurant_id {
            set.insert("restaurant_id", restaurant_id);
        }

        doc! { "$set": set }
    }
}
