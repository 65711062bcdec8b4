use eframe::egui::Vec2;

pub(in crate::app) const DEFAULT_MIN_ZOOM: f32 = 0.5;
pub(in crate::app) const DEFAULT_MAX_ZOOM: f32 = 5.0;
pub(in crate::app) const ZOOM_STEP: f32 = 1.3;
const RESET_DURATION_SECS: f32 = 0.5;
const MIN_SCALE: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ZoomRange {
    min: f32,
    max: f32,
}

impl ZoomRange {
    pub(in crate::app) fn new(min: f32, max: f32) -> Self {
        let (mut min, mut max) = if min <= max { (min, max) } else { (max, min) };
        if !(min.is_finite() && min >= MIN_SCALE) {
            min = DEFAULT_MIN_ZOOM.min(max.max(MIN_SCALE));
        }
        if !max.is_finite() || max < min {
            max = DEFAULT_MAX_ZOOM.max(min);
        }
        Self { min, max }
    }

    pub(in crate::app) fn min(self) -> f32 {
        self.min
    }

    pub(in crate::app) fn max(self) -> f32 {
        self.max
    }

    pub(in crate::app) fn clamp(self, scale: f32) -> f32 {
        scale.clamp(self.min, self.max)
    }
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ResetAnimation {
    from_offset: Vec2,
    from_scale: f32,
    elapsed: f32,
}

// Canvas-local display transform: `screen = offset + world * scale`.
// Never feeds back into simulation positions.
#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct ViewportTransform {
    offset: Vec2,
    scale: f32,
    range: ZoomRange,
    reset_animation: Option<ResetAnimation>,
}

impl ViewportTransform {
    pub(in crate::app) fn new(range: ZoomRange) -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: range.clamp(1.0),
            range,
            reset_animation: None,
        }
    }

    pub(in crate::app) fn offset(&self) -> Vec2 {
        self.offset
    }

    pub(in crate::app) fn scale(&self) -> f32 {
        self.scale
    }

    pub(in crate::app) fn range(&self) -> ZoomRange {
        self.range
    }

    pub(in crate::app) fn to_screen(&self, world: Vec2) -> Vec2 {
        self.offset + world * self.scale
    }

    pub(in crate::app) fn to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.scale
    }

    pub(in crate::app) fn zoom_by(&mut self, factor: f32, anchor: Vec2) {
        if !factor.is_finite() || factor <= 0.0 {
            log::debug!("ignoring zoom factor {factor}");
            return;
        }
        self.zoom_to(self.scale * factor, anchor);
    }

    pub(in crate::app) fn zoom_to(&mut self, scale: f32, anchor: Vec2) {
        if !scale.is_finite() || !anchor.x.is_finite() || !anchor.y.is_finite() {
            log::debug!("ignoring zoom to {scale} around {anchor:?}");
            return;
        }

        self.reset_animation = None;
        let world = self.to_world(anchor);
        self.scale = self.range.clamp(scale);
        self.offset = anchor - world * self.scale;
    }

    pub(in crate::app) fn zoom_in(&mut self, canvas: Vec2) {
        self.zoom_by(ZOOM_STEP, canvas * 0.5);
    }

    pub(in crate::app) fn zoom_out(&mut self, canvas: Vec2) {
        self.zoom_by(1.0 / ZOOM_STEP, canvas * 0.5);
    }

    pub(in crate::app) fn pan_by(&mut self, delta: Vec2) {
        if !delta.x.is_finite() || !delta.y.is_finite() {
            return;
        }
        self.reset_animation = None;
        self.offset += delta;
    }

    pub(in crate::app) fn reset(&mut self) {
        if self.offset == Vec2::ZERO && self.scale == self.range.clamp(1.0) {
            self.reset_animation = None;
            return;
        }

        self.reset_animation = Some(ResetAnimation {
            from_offset: self.offset,
            from_scale: self.scale,
            elapsed: 0.0,
        });
    }

    pub(in crate::app) fn is_animating(&self) -> bool {
        self.reset_animation.is_some()
    }

    pub(in crate::app) fn advance(&mut self, dt: f32) -> bool {
        let Some(mut animation) = self.reset_animation else {
            return false;
        };

        animation.elapsed += dt.max(0.0);
        let t = (animation.elapsed / RESET_DURATION_SECS).clamp(0.0, 1.0);
        let eased = ease_cubic_in_out(t);
        let target_scale = self.range.clamp(1.0);

        self.scale = animation.from_scale + (target_scale - animation.from_scale) * eased;
        self.offset = animation.from_offset * (1.0 - eased);

        if t >= 1.0 {
            self.scale = target_scale;
            self.offset = Vec2::ZERO;
            self.reset_animation = None;
            false
        } else {
            self.reset_animation = Some(animation);
            true
        }
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new(ZoomRange::default())
    }
}

fn ease_cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - (u * u * u) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    #[test]
    fn repeated_zoom_saturates_inside_range() {
        let mut viewport = ViewportTransform::default();
        for _ in 0..100 {
            viewport.zoom_by(1.7, vec2(400.0, 300.0));
            assert!(viewport.scale() <= DEFAULT_MAX_ZOOM);
        }
        assert_eq!(viewport.scale(), DEFAULT_MAX_ZOOM);

        for _ in 0..100 {
            viewport.zoom_by(0.3, vec2(10.0, 10.0));
            assert!(viewport.scale() >= DEFAULT_MIN_ZOOM);
        }
        assert_eq!(viewport.scale(), DEFAULT_MIN_ZOOM);
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut viewport = ViewportTransform::default();
        viewport.pan_by(vec2(-35.0, 12.0));
        viewport.zoom_by(1.4, vec2(100.0, 100.0));

        for (factor, anchor) in [
            (1.25, vec2(250.0, 80.0)),
            (0.6, vec2(-40.0, 510.0)),
            (9.0, vec2(400.0, 300.0)),
        ] {
            let world = viewport.to_world(anchor);
            viewport.zoom_by(factor, anchor);
            let after = viewport.to_screen(world);
            assert!((after - anchor).length() < 1e-3, "anchor drifted to {after:?}");
        }
    }

    #[test]
    fn round_trips_between_spaces() {
        let mut viewport = ViewportTransform::default();
        viewport.zoom_to(2.5, vec2(30.0, 40.0));
        viewport.pan_by(vec2(7.0, -3.0));
        let world = vec2(123.0, 456.0);
        let back = viewport.to_world(viewport.to_screen(world));
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn zoom_buttons_use_canvas_center() {
        let mut viewport = ViewportTransform::default();
        let canvas = vec2(800.0, 600.0);
        let center_world = viewport.to_world(canvas * 0.5);

        viewport.zoom_in(canvas);
        assert!((viewport.scale() - ZOOM_STEP).abs() < 1e-6);
        assert!((viewport.to_screen(center_world) - canvas * 0.5).length() < 1e-3);

        viewport.zoom_out(canvas);
        assert!((viewport.scale() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn invalid_factors_are_ignored() {
        let mut viewport = ViewportTransform::default();
        viewport.zoom_by(0.0, vec2(1.0, 1.0));
        viewport.zoom_by(f32::NAN, vec2(1.0, 1.0));
        viewport.zoom_by(-2.0, vec2(1.0, 1.0));
        assert_eq!(viewport.scale(), 1.0);
        assert_eq!(viewport.offset(), Vec2::ZERO);
    }

    #[test]
    fn reset_animates_back_to_identity() {
        let mut viewport = ViewportTransform::default();
        viewport.zoom_by(3.0, vec2(200.0, 200.0));
        viewport.pan_by(vec2(50.0, -20.0));
        let start_scale = viewport.scale();

        viewport.reset();
        assert!(viewport.is_animating());
        assert!(viewport.advance(0.1));
        assert!(viewport.scale() < start_scale && viewport.scale() > 1.0);

        let mut frames = 0;
        while viewport.advance(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 120);
        }
        assert_eq!(viewport.scale(), 1.0);
        assert_eq!(viewport.offset(), Vec2::ZERO);
        assert!(!viewport.is_animating());
    }

    #[test]
    fn interaction_cancels_reset() {
        let mut viewport = ViewportTransform::default();
        viewport.zoom_by(2.0, vec2(0.0, 0.0));
        viewport.reset();
        viewport.pan_by(vec2(1.0, 1.0));
        assert!(!viewport.is_animating());
        assert!(!viewport.advance(0.016));
    }

    #[test]
    fn range_normalizes_inverted_bounds() {
        let range = ZoomRange::new(4.0, 0.25);
        assert_eq!((range.min(), range.max()), (0.25, 4.0));

        let range = ZoomRange::new(0.0, 3.0);
        assert_eq!(range.min(), DEFAULT_MIN_ZOOM);
        assert_eq!(range.max(), 3.0);
        assert_eq!(range.clamp(10.0), 3.0);
    }
}
