//! Per-segment display timing derived from audio duration.

use crate::error::{MediaError, MediaResult};

/// How per-image display durations are derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimingPolicy {
    /// Divide the measured narration duration evenly across images, in
    /// whole seconds where possible; the last image absorbs the rounding
    /// remainder so the plan sums exactly to the narration duration.
    ExactFit,
    /// A configured constant duration per image, independent of audio
    /// length; output length is reconciled via the encoder's
    /// shortest-stream option.
    FixedPerImage(f64),
}

/// One image's slot in the output timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start offset in seconds.
    pub start: f64,
    /// Display duration in seconds.
    pub duration: f64,
}

/// Derived mapping of image index to (start offset, duration).
///
/// Offsets are contiguous and non-overlapping by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingPlan {
    segments: Vec<Segment>,
}

impl TimingPlan {
    /// Build a plan for `image_count` images over `total_duration` seconds.
    pub fn build(total_duration: f64, image_count: usize, policy: TimingPolicy) -> MediaResult<Self> {
        let durations = allocate(total_duration, image_count, policy)?;

        let mut segments = Vec::with_capacity(durations.len());
        let mut start = 0.0;
        for duration in durations {
            segments.push(Segment { start, duration });
            start += duration;
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of all segment durations.
    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Per-segment durations in image order.
    pub fn durations(&self) -> Vec<f64> {
        self.segments.iter().map(|s| s.duration).collect()
    }
}

/// Compute per-image display durations.
///
/// Under `ExactFit` every image but the last gets the narration duration
/// divided by the image count, floored to whole seconds; the last image
/// is extended to absorb the remainder so the sum matches exactly. When
/// the narration is too short for whole-second slots, the unfloored
/// quotient is used instead so every duration stays positive.
pub fn allocate(
    total_duration: f64,
    image_count: usize,
    policy: TimingPolicy,
) -> MediaResult<Vec<f64>> {
    if image_count == 0 {
        return Err(MediaError::NoAssets("empty image sequence".to_string()));
    }

    match policy {
        TimingPolicy::ExactFit => {
            if !total_duration.is_finite() || total_duration <= 0.0 {
                return Err(MediaError::InvalidDuration(total_duration));
            }

            let quotient = total_duration / image_count as f64;
            let per_image = if quotient.floor() >= 1.0 {
                quotient.floor()
            } else {
                quotient
            };

            let mut durations = vec![per_image; image_count];
            let last = total_duration - per_image * (image_count - 1) as f64;
            durations[image_count - 1] = last;
            Ok(durations)
        }
        TimingPolicy::FixedPerImage(seconds) => {
            if !seconds.is_finite() || seconds <= 0.0 {
                return Err(MediaError::InvalidDuration(seconds));
            }
            Ok(vec![seconds; image_count])
        }
    }
}
