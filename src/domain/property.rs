// src/domain/property.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const STATUS_FOR_SALE: &str = "For Sale";
pub const STATUS_FOR_RENT: &str = "For Rent";

/// A listing as shown on the site and as stored in the local collection.
///
/// Field names match the rows of the hosted `properties` table, so the same
/// type decodes both the remote response and the locally persisted JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baths: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// "For Sale", "For Rent", or any other free-text status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Bedroom configuration such as "3 BHK".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bhk_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub amenities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub floor_plans: Vec<FloorPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

// The hosted table returns `null` for empty array columns.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Partial property used by upsert. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyPatch {
    pub id: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub beds: Option<u32>,
    pub baths: Option<u32>,
    pub area: Option<String>,
    pub status: Option<String>,
    pub bhk_type: Option<String>,
    pub property_type: Option<String>,
    pub developer: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
    pub floor_plans: Option<Vec<FloorPlan>>,
    pub coordinates: Option<Coordinates>,
}

impl PropertyPatch {
    /// The id carried by the patch itself, ignoring blanks.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

impl Property {
    /// Builds a fresh entry from a patch. Unset required text fields start empty.
    pub fn from_patch(id: String, patch: PropertyPatch) -> Self {
        let mut property = Property {
            id,
            title: String::new(),
            location: String::new(),
            price: String::new(),
            beds: None,
            baths: None,
            area: None,
            status: None,
            bhk_type: None,
            property_type: None,
            developer: None,
            description: None,
            images: Vec::new(),
            amenities: Vec::new(),
            floor_plans: Vec::new(),
            coordinates: None,
            created_at: Some(Utc::now()),
        };
        property.merge(patch);
        property
    }

    /// Shallow merge: every field set on the patch replaces the current value.
    /// The id is never changed by a merge.
    pub fn merge(&mut self, patch: PropertyPatch) {
        // Plain fields take the patch value directly, optional fields re-wrap it.
        macro_rules! take {
            ($field:ident) => {
                if let Some(value) = patch.$field {
                    self.$field = value;
                }
            };
            ($field:ident, optional) => {
                if let Some(value) = patch.$field {
                    self.$field = Some(value);
                }
            };
        }

        take!(title);
        take!(location);
        take!(price);
        take!(images);
        take!(amenities);
        take!(floor_plans);
        take!(beds, optional);
        take!(baths, optional);
        take!(area, optional);
        take!(status, optional);
        take!(bhk_type, optional);
        take!(property_type, optional);
        take!(developer, optional);
        take!(description, optional);
        take!(coordinates, optional);
    }
}
