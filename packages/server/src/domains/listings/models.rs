//! Listing content types.
//!
//! `GenerationResult` doubles as the response schema sent to the provider,
//! so field docs below end up as schema descriptions.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::ContentError;

/// Feature keys the provider may fill, in prompt order.
pub const FEATURE_KEYS: [&str; 9] = [
    "apartmentArea",
    "balconyArea",
    "rooms",
    "floor",
    "safeRoom",
    "parking",
    "storage",
    "airDirections",
    "elevator",
];

/// Input to content generation.
///
/// Only constructed through [`GenerationRequest::new`], so a request always
/// carries a non-blank description and address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    raw_description: String,
    address: String,
}

impl GenerationRequest {
    /// Both fields are required and must contain something besides whitespace.
    pub fn new(
        raw_description: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self, ContentError> {
        let raw_description = raw_description.into();
        let address = address.into();

        if raw_description.trim().is_empty() {
            return Err(ContentError::InvalidInput(
                "property description is required".into(),
            ));
        }
        if address.trim().is_empty() {
            return Err(ContentError::InvalidInput("address is required".into()));
        }

        Ok(Self {
            raw_description,
            address,
        })
    }

    pub fn raw_description(&self) -> &str {
        &self.raw_description
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Split into `(raw_description, address)`.
    pub fn into_parts(self) -> (String, String) {
        (self.raw_description, self.address)
    }
}

/// Marketing content for one property landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GenerationResult {
    /// Short, catchy headline for the listing
    pub title: String,

    /// Three-part marketing description
    pub description: ListingDescription,

    /// Facts extracted from the raw description; omit unknown keys
    #[serde(default)]
    pub features: Features,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ListingDescription {
    /// The neighborhood around the address: amenities, transport, atmosphere
    pub area: String,

    /// The property itself, based only on the raw description
    pub property: String,

    /// Call to action inviting the reader to arrange a viewing
    pub cta: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    /// Built area of the apartment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment_area: Option<String>,

    /// Balcony area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balcony_area: Option<String>,

    /// Number of rooms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<String>,

    /// Floor, optionally out of total floors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,

    /// Reinforced safe room
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_room: Option<String>,

    /// Parking spaces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking: Option<String>,

    /// Storage room
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,

    /// Air directions (exposures)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_directions: Option<String>,

    /// Elevator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevator: Option<String>,
}

impl Features {
    /// (key, value) pairs in [`FEATURE_KEYS`] order.
    pub fn entries(&self) -> [(&'static str, Option<&str>); 9] {
        [
            (FEATURE_KEYS[0], self.apartment_area.as_deref()),
            (FEATURE_KEYS[1], self.balcony_area.as_deref()),
            (FEATURE_KEYS[2], self.rooms.as_deref()),
            (FEATURE_KEYS[3], self.floor.as_deref()),
            (FEATURE_KEYS[4], self.safe_room.as_deref()),
            (FEATURE_KEYS[5], self.parking.as_deref()),
            (FEATURE_KEYS[6], self.storage.as_deref()),
            (FEATURE_KEYS[7], self.air_directions.as_deref()),
            (FEATURE_KEYS[8], self.elevator.as_deref()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, v)| v.is_none())
    }

    /// Trim values and drop blank ones.
    fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            apartment_area: clean(self.apartment_area),
            balcony_area: clean(self.balcony_area),
            rooms: clean(self.rooms),
            floor: clean(self.floor),
            safe_room: clean(self.safe_room),
            parking: clean(self.parking),
            storage: clean(self.storage),
            air_directions: clean(self.air_directions),
            elevator: clean(self.elevator),
        }
    }
}

pub const FALLBACK_TITLE: &str = "Property for sale";
pub const FALLBACK_AREA: &str =
    "We're sorry, a description of the area isn't available right now.";
pub const FALLBACK_CTA: &str = "Contact us today to schedule a viewing.";

impl GenerationResult {
    /// Deterministic placeholder content used when generation fails.
    ///
    /// Keeps the seller's own text as the property description so the page
    /// can still be published.
    pub fn fallback(raw_description: &str) -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            description: ListingDescription {
                area: FALLBACK_AREA.to_string(),
                property: raw_description.to_string(),
                cta: FALLBACK_CTA.to_string(),
            },
            features: Features::default(),
        }
    }

    pub(crate) fn normalized(mut self) -> Self {
        self.features = self.features.normalized();
        self
    }
}

/// Where a draft's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    Generated,
    Fallback,
}

/// Listing record handed to the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub slug: String,
    pub address: String,
    pub original_description: String,
    pub content: GenerationResult,
    pub content_source: ContentSource,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_blank_fields() {
        assert!(matches!(
            GenerationRequest::new("", "Herzl 1"),
            Err(ContentError::InvalidInput(_))
        ));
        assert!(matches!(
            GenerationRequest::new("Nice flat", "   "),
            Err(ContentError::InvalidInput(_))
        ));
        assert!(matches!(
            GenerationRequest::new(" \t\n", "Herzl 1"),
            Err(ContentError::InvalidInput(_))
        ));

        let request = GenerationRequest::new("Nice flat", "Herzl 1").unwrap();
        assert_eq!(request.raw_description(), "Nice flat");
        assert_eq!(request.address(), "Herzl 1");
        assert_eq!(
            request.into_parts(),
            ("Nice flat".to_string(), "Herzl 1".to_string())
        );
    }

    #[test]
    fn test_features_serialize_camel_case_and_skip_missing() {
        let features = Features {
            safe_room: Some("yes".into()),
            air_directions: Some("north, west".into()),
            ..Default::default()
        };

        let value = serde_json::to_value(&features).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"safeRoom": "yes", "airDirections": "north, west"})
        );
    }

    #[test]
    fn test_unknown_feature_keys_are_dropped() {
        let result: GenerationResult = serde_json::from_str(
            r#"{
                "title": "t",
                "description": {"area": "a", "property": "p", "cta": "c"},
                "features": {"rooms": "3", "pool": "yes"}
            }"#,
        )
        .unwrap();

        let value = serde_json::to_value(&result.features).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["rooms"]);
    }

    #[test]
    fn test_missing_features_default_to_empty() {
        let result: GenerationResult = serde_json::from_str(
            r#"{"title": "t", "description": {"area": "a", "property": "p", "cta": "c"}}"#,
        )
        .unwrap();
        assert!(result.features.is_empty());
    }

    #[test]
    fn test_description_fields_are_required() {
        let parsed = serde_json::from_str::<GenerationResult>(
            r#"{"title": "t", "description": {"area": "a", "property": "p"}}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_normalized_drops_blank_features() {
        let result = GenerationResult {
            title: "t".into(),
            description: ListingDescription {
                area: "a".into(),
                property: "p".into(),
                cta: "c".into(),
            },
            features: Features {
                rooms: Some(" 4 ".into()),
                parking: Some("".into()),
                storage: Some("   ".into()),
                ..Default::default()
            },
        }
        .normalized();

        assert_eq!(result.features.rooms.as_deref(), Some("4"));
        assert!(result.features.parking.is_none());
        assert!(result.features.storage.is_none());
    }

    #[test]
    fn test_fallback_keeps_raw_text() {
        let raw = "3 rooms, ממ\"ד, parking";
        let fallback = GenerationResult::fallback(raw);

        assert_eq!(fallback.title, FALLBACK_TITLE);
        assert_eq!(fallback.description.area, FALLBACK_AREA);
        assert_eq!(fallback.description.property, raw);
        assert_eq!(fallback.description.cta, FALLBACK_CTA);
        assert!(fallback.features.is_empty());
        assert_eq!(fallback, GenerationResult::fallback(raw));
    }
}
