use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::palette_color;
use crate::validation::{validate_segments, validate_title};

/// One selectable outcome on a wheel.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Segment {
    pub id: String,
    pub label: String,
    /// Relative probability mass; must be positive.
    pub weight: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Segment {
    pub fn new(id: impl Into<String>, label: impl Into<String>, weight: f64, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            weight,
            color: color.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// The wheel a new editor session starts from.
pub fn default_segments() -> Vec<Segment> {
    vec![
        Segment::new("1", "Yes", 1.0, palette_color(4)),
        Segment::new("2", "No", 1.0, palette_color(0)),
    ]
}

/// Gives every segment without a colour the palette colour for its position.
pub fn fill_missing_colors(segments: &mut [Segment]) {
    for (index, segment) in segments.iter_mut().enumerate() {
        if segment.color.trim().is_empty() {
            segment.color = palette_color(index).to_string();
        }
    }
}

/// An ordered set of segments plus its metadata. Order decides angular position only.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Wheel {
    pub id: Uuid,
    pub title: String,
    pub segments: Vec<Segment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_public: bool,
    #[serde(default)]
    pub owner_id: Option<String>,
}

impl Wheel {
    pub fn new(request: WheelRequest, now: DateTime<Utc>) -> Self {
        let mut wheel = Self {
            id: Uuid::new_v4(),
            title: String::new(),
            segments: Vec::new(),
            created_at: now,
            updated_at: now,
            is_public: true,
            owner_id: None,
        };
        wheel.apply(request, now);
        wheel
    }

    /// Overwrites the editable fields, keeping id and creation time.
    pub fn apply(&mut self, request: WheelRequest, now: DateTime<Utc>) {
        self.title = request.title.trim().to_string();
        self.segments = request.segments;
        fill_missing_colors(&mut self.segments);
        self.is_public = request.is_public;
        self.owner_id = request.owner_id;
        self.updated_at = now;
    }

    pub fn segment(&self, segment_id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == segment_id)
    }
}

/// The segment picked by one completed spin.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpinOutcome {
    pub id: Uuid,
    pub wheel_id: Uuid,
    pub segment_id: String,
    pub segment_label: String,
    pub timestamp: DateTime<Utc>,
}

impl SpinOutcome {
    pub fn new(wheel_id: Uuid, winner: &Segment, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            wheel_id,
            segment_id: winner.id.clone(),
            segment_label: winner.label.clone(),
            timestamp,
        }
    }
}

// === API Types ===

fn default_public() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct WheelRequest {
    #[validate(custom = "validate_title")]
    pub title: String,
    #[serde(default = "default_segments")]
    #[validate(custom = "validate_segments")]
    pub segments: Vec<Segment>,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub owner_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SpinRequest {
    /// Replays a previous spin when set; the server picks one otherwise.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpinResponse {
    pub outcome: SpinOutcome,
    pub winner: Segment,
    pub seed: u64,
    pub impulse: f64,
    pub final_rotation: f64,
    pub steps: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecordOutcomeRequest {
    pub segment_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct WheelListQuery {
    pub owner: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_request_defaults() {
        let request: WheelRequest = serde_json::from_str(r#"{"title":"Lunch"}"#).unwrap();
        assert!(request.is_public);
        assert_eq!(request.segments, default_segments());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_new_wheel_fills_colors_and_trims_title() {
        let request = WheelRequest {
            title: "  Dinner  ".to_string(),
            segments: vec![
                Segment::new("a", "Pizza", 1.0, ""),
                Segment::new("b", "Sushi", 2.0, "#123456"),
            ],
            is_public: false,
            owner_id: Some("u1".to_string()),
        };
        let now = Utc::now();
        let wheel = Wheel::new(request, now);

        assert_eq!(wheel.title, "Dinner");
        assert_eq!(wheel.segments[0].color, palette_color(0));
        assert_eq!(wheel.segments[1].color, "#123456");
        assert_eq!(wheel.created_at, now);
        assert!(!wheel.is_public);
        assert_eq!(wheel.segment("b").map(|s| s.label.as_str()), Some("Sushi"));
    }

    #[test]
    fn test_apply_keeps_identity() {
        let created = Utc::now();
        let mut wheel = Wheel::new(
            WheelRequest {
                title: "First".to_string(),
                segments: default_segments(),
                is_public: true,
                owner_id: None,
            },
            created,
        );
        let id = wheel.id;
        let later = created + chrono::Duration::minutes(5);
        wheel.apply(
            WheelRequest {
                title: "Second".to_string(),
                segments: default_segments(),
                is_public: true,
                owner_id: None,
            },
            later,
        );
        assert_eq!(wheel.id, id);
        assert_eq!(wheel.created_at, created);
        assert_eq!(wheel.updated_at, later);
        assert_eq!(wheel.title, "Second");
    }

    #[test]
    fn test_segment_url_is_optional_on_the_wire() {
        let json = serde_json::to_value(Segment::new("1", "A", 1.0, "#fff")).unwrap();
        assert!(json.get("url").is_none());

        let with_url = Segment::new("1", "A", 1.0, "#fff").with_url("https://example.com");
        let json = serde_json::to_value(with_url).unwrap();
        assert_eq!(json["url"], "https://example.com");
    }
}
