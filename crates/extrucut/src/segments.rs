//! Segment count along the extrusion.

use shared::{ExtruCutOptions, SegmentMode};

/// Fewest segments ever produced
pub const MIN_SEGMENTS: u32 = 1;
/// Most segments ever produced
pub const MAX_SEGMENTS: u32 = 100;

/// Number of segments for the current options and distance, within 1..=100.
///
/// In length mode the count is `floor(distance / length)` with the length
/// clamped to its minimum; a negative distance yields the minimum count.
pub fn segment_count(options: &ExtruCutOptions, distance: f32) -> u32 {
    let resolved = match options.by {
        SegmentMode::Count => options.count as f64,
        SegmentMode::Length => {
            let length = options.effective_length() as f64;
            (distance as f64 / length).floor()
        }
    };
    if resolved.is_nan() {
        return MIN_SEGMENTS;
    }
    resolved.clamp(MIN_SEGMENTS as f64, MAX_SEGMENTS as f64) as u32
}
