use std::collections::HashSet;

use eframe::egui::Vec2;

// Absorbs glyph-metric rounding in measured galleys.
const OVERFLOW_TOLERANCE: f32 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct LabelBox {
    pub(in crate::app) id: String,
    pub(in crate::app) content_size: Vec2,
    pub(in crate::app) container_size: Vec2,
}

impl LabelBox {
    pub(in crate::app) fn overflows(&self) -> bool {
        self.content_size.x > self.container_size.x + OVERFLOW_TOLERANCE
            || self.content_size.y > self.container_size.y + OVERFLOW_TOLERANCE
    }
}

pub(in crate::app) fn detect(boxes: &[LabelBox]) -> HashSet<String> {
    boxes
        .iter()
        .filter(|label| label.overflows())
        .map(|label| label.id.clone())
        .collect()
}

// Everything that changes a label's on-screen container. Pan offset and
// body positions are not part of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct GeometryKey {
    pub(in crate::app) layout_revision: u64,
    pub(in crate::app) canvas: Vec2,
    pub(in crate::app) scale: f32,
}

#[derive(Debug, Default)]
pub(in crate::app) struct TruncationSet {
    ids: HashSet<String>,
    key: Option<GeometryKey>,
}

impl TruncationSet {
    pub(in crate::app) fn is_stale(&self, key: GeometryKey) -> bool {
        self.key != Some(key)
    }

    pub(in crate::app) fn replace(&mut self, key: GeometryKey, boxes: &[LabelBox]) {
        self.ids = detect(boxes);
        self.key = Some(key);
        log::debug!(
            "{} of {} labels truncated at scale {:.2}",
            self.ids.len(),
            boxes.len(),
            key.scale
        );
    }

    pub(in crate::app) fn invalidate(&mut self) {
        self.ids.clear();
        self.key = None;
    }

    pub(in crate::app) fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub(in crate::app) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(in crate::app) fn tooltip<'a>(&self, hovered: Option<(&str, &'a str)>) -> Option<&'a str> {
        hovered.and_then(|(id, label)| self.contains(id).then_some(label))
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn label(id: &str, content: Vec2, container: Vec2) -> LabelBox {
        LabelBox {
            id: id.to_owned(),
            content_size: content,
            container_size: container,
        }
    }

    #[test]
    fn wide_content_in_narrow_container_is_truncated() {
        let narrow = detect(&[label("a", vec2(400.0, 20.0), vec2(100.0, 100.0))]);
        assert!(narrow.contains("a"));

        let wide = detect(&[label("a", vec2(400.0, 20.0), vec2(450.0, 450.0))]);
        assert!(wide.is_empty());
    }

    #[test]
    fn height_overflow_counts() {
        let set = detect(&[label("tall", vec2(80.0, 130.0), vec2(100.0, 100.0))]);
        assert!(set.contains("tall"));
    }

    #[test]
    fn exact_fit_is_not_truncated() {
        let set = detect(&[label("fit", vec2(100.0, 100.0), vec2(100.0, 100.0))]);
        assert!(set.is_empty());
    }

    #[test]
    fn detection_is_deterministic() {
        let boxes = vec![
            label("1", vec2(400.0, 20.0), vec2(100.0, 100.0)),
            label("2", vec2(50.0, 20.0), vec2(100.0, 100.0)),
            label("3", vec2(90.0, 140.0), vec2(100.0, 100.0)),
        ];
        let first = detect(&boxes);
        for _ in 0..10 {
            assert_eq!(detect(&boxes), first);
        }
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn set_tracks_geometry_key_and_tooltip() {
        let key = GeometryKey {
            layout_revision: 1,
            canvas: vec2(800.0, 600.0),
            scale: 1.0,
        };
        let mut set = TruncationSet::default();
        assert!(set.is_stale(key));

        set.replace(
            key,
            &[
                label("long", vec2(400.0, 20.0), vec2(100.0, 100.0)),
                label("short", vec2(40.0, 20.0), vec2(100.0, 100.0)),
            ],
        );
        assert!(!set.is_stale(key));
        assert!(set.is_stale(GeometryKey { scale: 2.0, ..key }));
        assert_eq!(set.len(), 1);

        assert_eq!(set.tooltip(Some(("long", "A very long label"))), Some("A very long label"));
        assert_eq!(set.tooltip(Some(("short", "Short"))), None);
        assert_eq!(set.tooltip(None), None);

        set.invalidate();
        assert!(set.is_stale(key));
        assert!(!set.contains("long"));
    }
}
