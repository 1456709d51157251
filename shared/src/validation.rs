use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::constants::*;
use crate::shared_wheel_game::Segment;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex colour pattern compiles")
});

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(error("invalid_title", INVALID_TITLE_ERROR));
    }
    Ok(())
}

/// A weight the engine accepts: finite and strictly positive.
pub fn validate_weight(weight: f64) -> Result<(), ValidationError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(error("invalid_weight", INVALID_WEIGHT_ERROR));
    }
    Ok(())
}

pub fn validate_color(color: &str) -> Result<(), ValidationError> {
    if !HEX_COLOR.is_match(color) {
        return Err(error("invalid_color", INVALID_COLOR_ERROR));
    }
    Ok(())
}

pub fn validate_segment(segment: &Segment) -> Result<(), ValidationError> {
    let label = segment.label.trim();
    if label.is_empty() || label.chars().count() > MAX_LABEL_LENGTH {
        return Err(ValidationError::new("invalid_label"));
    }
    if segment.id.trim().is_empty() {
        return Err(ValidationError::new("invalid_segment_id"));
    }
    validate_weight(segment.weight)?;
    // An empty colour is filled from the palette on save.
    if !segment.color.is_empty() {
        validate_color(&segment.color)?;
    }
    if let Some(url) = &segment.url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ValidationError::new("invalid_url"));
        }
    }
    Ok(())
}

/// Rules for a wheel that is about to be saved.
pub fn validate_segments(segments: &[Segment]) -> Result<(), ValidationError> {
    if segments.len() < MIN_SEGMENTS_TO_SAVE {
        return Err(error("too_few_segments", TOO_FEW_SEGMENTS_ERROR));
    }
    if segments.len() > MAX_SEGMENTS {
        return Err(error("too_many_segments", TOO_MANY_SEGMENTS_ERROR));
    }

    let mut ids = HashSet::with_capacity(segments.len());
    for segment in segments {
        validate_segment(segment)?;
        if !ids.insert(segment.id.as_str()) {
            return Err(ValidationError::new("duplicate_segment_id"));
        }
    }
    Ok(())
}
