use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

const BACKGROUND: Color32 = Color32::from_rgb(246, 247, 249);
const GRID_SPACING: f32 = 48.0;

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, offset: Vec2, scale: f32) {
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let step = GRID_SPACING * scale;
    if step < 12.0 {
        return;
    }

    let origin = rect.min + offset;
    let dot = Color32::from_rgba_unmultiplied(120, 128, 140, 60);
    let stroke = Stroke::new(1.0, dot);

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
        while y < rect.bottom() {
            painter.circle(Pos2::new(x, y), 1.2, dot, stroke);
            y += step;
        }
        x += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    #[test]
    fn blend_endpoints() {
        let base = Color32::from_rgb(10, 20, 30);
        assert_eq!(blend_color(base, Color32::WHITE, 0.0), base);
        assert_eq!(blend_color(base, Color32::WHITE, 1.0), Color32::WHITE);
    }

    #[test]
    fn circles_partly_inside_are_visible() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0));
        assert!(circle_visible(rect, pos2(-5.0, 50.0), 10.0));
        assert!(!circle_visible(rect, pos2(-20.0, 50.0), 10.0));
        assert!(!circle_visible(rect, pos2(50.0, 130.0), 10.0));
    }
}
