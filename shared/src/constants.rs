// Physics defaults, tuned for a 60fps render loop. Velocity is radians per frame.
pub const DEFAULT_FRICTION: f64 = 0.985;
pub const DEFAULT_MIN_SPEED: f64 = 0.002;
pub const DEFAULT_MIN_IMPULSE: f64 = 0.5;
pub const DEFAULT_IMPULSE_RANGE: f64 = 0.5;

// Seeds travel through JSON; keep them inside the integer range a JS client can hold.
pub const MAX_REPLAY_SEED: u64 = (1 << 53) - 1;

pub const MIN_SEGMENTS_TO_SAVE: usize = 2;
pub const MAX_SEGMENTS: usize = 64;
pub const MAX_TITLE_LENGTH: usize = 80;
pub const MAX_LABEL_LENGTH: usize = 60;

/// Colour used in analytics when a recorded label no longer exists on the wheel.
pub const FALLBACK_SEGMENT_COLOR: &str = "#8884d8";

pub const SEGMENT_PALETTE: [&str; 11] = [
    "#ef4444", "#f97316", "#f59e0b", "#84cc16", "#10b981",
    "#06b6d4", "#3b82f6", "#6366f1", "#8b5cf6", "#d946ef", "#f43f5e",
];

pub const INVALID_TITLE_ERROR: &str = "Please provide a wheel title";
pub const TOO_FEW_SEGMENTS_ERROR: &str = "A wheel needs at least 2 segments";
pub const TOO_MANY_SEGMENTS_ERROR: &str = "A wheel can have at most 64 segments";
pub const INVALID_WEIGHT_ERROR: &str = "Segment weights must be positive numbers";
pub const INVALID_COLOR_ERROR: &str = "Segment colours must be #rgb or #rrggbb";
pub const WHEEL_NOT_FOUND_ERROR: &str = "Wheel not found";
pub const SEGMENT_NOT_FOUND_ERROR: &str = "Segment does not belong to this wheel";

/// Palette colour for the segment at `index`, cycling once the palette runs out.
pub fn palette_color(index: usize) -> &'static str {
    SEGMENT_PALETTE[index % SEGMENT_PALETTE.len()]
}
