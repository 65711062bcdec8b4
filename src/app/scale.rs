use eframe::egui::{Color32, Vec2};

use crate::util::stable_hash;

pub(in crate::app) const SIZE_DOMAIN: (f32, f32) = (0.0, 100.0);
pub(in crate::app) const MIN_RADIUS: f32 = 10.0;
pub(in crate::app) const DEFAULT_RADIUS_DIVISOR: f32 = 4.0;

// Set2 categorical palette.
const PALETTE: [Color32; 8] = [
    Color32::from_rgb(0x66, 0xc2, 0xa5),
    Color32::from_rgb(0xfc, 0x8d, 0x62),
    Color32::from_rgb(0x8d, 0xa0, 0xcb),
    Color32::from_rgb(0xe7, 0x8a, 0xc3),
    Color32::from_rgb(0xa6, 0xd8, 0x54),
    Color32::from_rgb(0xff, 0xd9, 0x2f),
    Color32::from_rgb(0xe5, 0xc4, 0x94),
    Color32::from_rgb(0xb3, 0xb3, 0xb3),
];

pub(in crate::app) const FOCAL_FILL: Color32 = Color32::WHITE;
pub(in crate::app) const FOCAL_ACCENT: Color32 = Color32::from_rgb(0xf4, 0x43, 0x36);
const DARK_TEXT: Color32 = Color32::from_rgb(0x26, 0x2b, 0x33);
const LIGHT_TEXT: Color32 = Color32::WHITE;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct SizeScale {
    domain: (f32, f32),
    range: (f32, f32),
}

impl SizeScale {
    pub(in crate::app) fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        let low = range.0.max(f32::MIN_POSITIVE);
        let high = range.1.max(low);
        Self {
            domain,
            range: (low, high),
        }
    }

    pub(in crate::app) fn for_viewport(size: Vec2, divisor: f32) -> Self {
        let divisor = if divisor.is_finite() && divisor >= 1.0 {
            divisor
        } else {
            DEFAULT_RADIUS_DIVISOR
        };
        let max_radius = (size.x.min(size.y) / divisor).max(MIN_RADIUS);
        Self::new(SIZE_DOMAIN, (MIN_RADIUS, max_radius))
    }

    pub(in crate::app) fn range(&self) -> (f32, f32) {
        self.range
    }

    pub(in crate::app) fn radius(&self, value: f32) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span.abs() <= f32::EPSILON || !value.is_finite() {
            return r0;
        }

        let t = ((value - d0) / span).clamp(0.0, 1.0);
        r0 + (t * (r1 - r0))
    }
}

pub(in crate::app) fn color_for(id: &str) -> Color32 {
    PALETTE[(stable_hash(id) % PALETTE.len() as u64) as usize]
}

// Perceived brightness on a 0..255 scale (ITU-R BT.601 weights).
fn luminance(color: Color32) -> f32 {
    (0.299 * color.r() as f32) + (0.587 * color.g() as f32) + (0.114 * color.b() as f32)
}

fn text_color_for(fill: Color32) -> Color32 {
    if luminance(fill) > 140.0 {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct BubbleStyle {
    pub(in crate::app) fill: Color32,
    pub(in crate::app) stroke: Option<Color32>,
    pub(in crate::app) text: Color32,
    pub(in crate::app) font_scale: f32,
}

pub(in crate::app) fn bubble_style(id: &str, is_focal: bool) -> BubbleStyle {
    if is_focal {
        BubbleStyle {
            fill: FOCAL_FILL,
            stroke: Some(FOCAL_ACCENT),
            text: FOCAL_ACCENT,
            font_scale: 1.2,
        }
    } else {
        let fill = color_for(id);
        BubbleStyle {
            fill,
            stroke: None,
            text: text_color_for(fill),
            font_scale: 0.9,
        }
    }
}
