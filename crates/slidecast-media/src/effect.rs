//! Continuous zoom (Ken Burns) effect parameters.

use slidecast_models::Resolution;

/// Parameters of a continuous zoom over one image segment.
///
/// Each segment gets its own parameters; zoom state never carries over
/// from one segment to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParameters {
    /// Zoom factor at the first frame (>= 1.0).
    pub start_zoom: f64,
    /// Zoom added per frame.
    pub zoom_increment: f64,
    /// Upper zoom bound.
    pub max_zoom: f64,
    /// Number of frames in the segment.
    pub frame_count: u32,
    /// Frame rate the segment plays at.
    pub frame_rate: u32,
}

/// Compute zoom parameters for a segment.
///
/// The increment is chosen so the zoom reaches `max_zoom` at the end of
/// the segment; equal bounds yield a flat (static) segment. This is a
/// pure function, so segments can be parameterized independently in any
/// order.
pub fn effect_for(
    segment_duration: f64,
    frame_rate: u32,
    start_zoom: f64,
    max_zoom: f64,
) -> EffectParameters {
    let frame_count = (segment_duration * frame_rate as f64).round().max(0.0) as u32;
    let max_zoom = max_zoom.max(start_zoom);
    let zoom_increment = if frame_count > 0 {
        (max_zoom - start_zoom) / frame_count as f64
    } else {
        0.0
    };

    EffectParameters {
        start_zoom,
        zoom_increment,
        max_zoom,
        frame_count,
        frame_rate,
    }
}

impl EffectParameters {
    /// Zoom factor at a given frame, clamped into `[start_zoom, max_zoom]`.
    ///
    /// Clamping happens here at read time; the increment is never
    /// adjusted after the fact to compensate for float drift.
    pub fn zoom_at(&self, frame: u32) -> f64 {
        let raw = self.start_zoom + self.zoom_increment * frame as f64;
        raw.clamp(self.start_zoom, self.max_zoom)
    }

    /// Render the zoompan filter expression for this segment.
    ///
    /// The zoom expression clamps at both bounds inside the renderer as
    /// well, mirroring `zoom_at`.
    pub fn zoompan_filter(&self, resolution: Resolution) -> String {
        format!(
            "zoompan=z='min(max(zoom,{start:.4})+{inc:.6},{max:.4})':d={frames}:s={res}:fps={fps}",
            start = self.start_zoom,
            inc = self.zoom_increment,
            max = self.max_zoom,
            frames = self.frame_count,
            res = resolution,
            fps = self.frame_rate,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_frame_count_rounding() {
        assert_eq!(effect_for(3.0, 30, 1.0, 1.1).frame_count, 90);
        assert_eq!(effect_for(9.2, 30, 1.0, 1.1).frame_count, 276);
        assert_eq!(effect_for(0.016, 30, 1.0, 1.1).frame_count, 0);
    }

    #[test]
    fn test_zoom_reaches_max_at_segment_end() {
        let fx = effect_for(3.0, 30, 1.0, 1.1);
        assert!((fx.zoom_at(0) - 1.0).abs() < EPS);
        assert!((fx.zoom_at(fx.frame_count) - 1.1).abs() < EPS);
    }

    #[test]
    fn test_zoom_monotone_and_bounded() {
        let fx = effect_for(5.0, 30, 1.0, 1.2);
        let mut prev = fx.zoom_at(0);
        for frame in 1..=fx.frame_count + 10 {
            let z = fx.zoom_at(frame);
            assert!(z + EPS >= prev, "zoom decreased at frame {}", frame);
            assert!(z <= fx.max_zoom + EPS, "zoom exceeded max at frame {}", frame);
            prev = z;
        }
    }

    #[test]
    fn test_flat_segment() {
        let fx = effect_for(3.0, 30, 1.0, 1.0);
        assert!(fx.zoom_increment.abs() < EPS);
        assert!((fx.zoom_at(45) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_zero_length_segment_has_zero_increment() {
        let fx = effect_for(0.0, 30, 1.0, 1.1);
        assert_eq!(fx.frame_count, 0);
        assert!(fx.zoom_increment.abs() < EPS);
    }

    #[test]
    fn test_pure_function() {
        let a = effect_for(9.0, 30, 1.0, 1.1);
        let b = effect_for(9.0, 30, 1.0, 1.1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zoompan_filter_shape() {
        let fx = effect_for(9.0, 30, 1.0, 1.1);
        let filter = fx.zoompan_filter(Resolution::landscape());
        assert!(filter.starts_with("zoompan=z="));
        assert!(filter.contains("d=270"));
        assert!(filter.contains("s=1920x1080"));
        assert!(filter.contains("fps=30"));
    }
}
