use std::sync::Arc;

use eframe::egui::text::{LayoutJob, TextWrapping};
use eframe::egui::{
    self, Align, Color32, CursorIcon, FontId, Galley, Painter, Pos2, Rect, Sense, Stroke,
    TextFormat, Ui, Vec2, pos2, vec2,
};

use crate::util::format_value;

use super::super::physics::Body;
use super::super::render_utils::{blend_color, circle_visible, draw_background};
use super::super::scale::bubble_style;
use super::super::truncation::{GeometryKey, LabelBox};
use super::super::viewport::ViewportTransform;
use super::super::{PointerGesture, ViewModel};

const BASE_FONT_SIZE: f32 = 16.0;
const LABEL_BOX_FRACTION: f32 = 1.8;
const LABEL_PADDING: f32 = 5.0;
const LINE_HEIGHT_FACTOR: f32 = 1.25;
const TOOLTIP_MAX_WIDTH: f32 = 260.0;
const TOOLTIP_OFFSET: Vec2 = vec2(14.0, 16.0);

struct LabelGeometry {
    container: Vec2,
    font: FontId,
}

fn label_geometry(body: &Body, scale: f32) -> LabelGeometry {
    let style = bubble_style(&body.id, body.is_focal);
    let side = ((body.radius() * LABEL_BOX_FRACTION * scale) - (LABEL_PADDING * 2.0)).max(1.0);
    LabelGeometry {
        container: vec2(side, side),
        font: FontId::proportional((BASE_FONT_SIZE * style.font_scale * scale).max(1.0)),
    }
}

fn label_job(text: &str, font: FontId, color: Color32, wrapping: TextWrapping) -> LayoutJob {
    let mut job = LayoutJob::single_section(
        text.to_owned(),
        TextFormat {
            font_id: font,
            color,
            ..Default::default()
        },
    );
    job.wrap = wrapping;
    job.halign = Align::Center;
    job
}

// Natural size of the label when wrapped to its container width, no row limit.
fn measure_label(painter: &Painter, body: &Body, scale: f32) -> LabelBox {
    let geometry = label_geometry(body, scale);
    let galley = painter.layout_job(label_job(
        &body.label,
        geometry.font,
        Color32::WHITE,
        TextWrapping {
            max_width: geometry.container.x,
            ..Default::default()
        },
    ));

    LabelBox {
        id: body.id.clone(),
        content_size: galley.size(),
        container_size: geometry.container,
    }
}

fn clipped_label(painter: &Painter, body: &Body, scale: f32, color: Color32) -> Arc<Galley> {
    let geometry = label_geometry(body, scale);
    let row_height = geometry.font.size * LINE_HEIGHT_FACTOR;
    let max_rows = ((geometry.container.y / row_height).floor() as usize).max(1);

    painter.layout_job(label_job(
        &body.label,
        geometry.font,
        color,
        TextWrapping {
            max_width: geometry.container.x,
            max_rows,
            break_anywhere: false,
            overflow_character: Some('…'),
        },
    ))
}

fn screen_position(rect: Rect, viewport: &ViewportTransform, world: Vec2) -> Pos2 {
    rect.min + viewport.to_screen(world)
}

impl ViewModel {
    fn refresh_truncation(&mut self, painter: &Painter, canvas: Vec2) {
        let Some(simulation) = self.simulation.as_ref() else {
            return;
        };

        let key = GeometryKey {
            layout_revision: self.layout_revision,
            canvas,
            scale: self.viewport.scale(),
        };
        if !self.truncation.is_stale(key) {
            return;
        }

        let boxes = simulation
            .bodies()
            .iter()
            .map(|body| measure_label(painter, body, key.scale))
            .collect::<Vec<_>>();
        self.truncation.replace(key, &boxes);
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let canvas = rect.size();

        self.ensure_simulation(canvas);

        draw_background(&painter, rect, self.viewport.offset(), self.viewport.scale());

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_pointer_gestures(ui, rect, &response);

        let frame_delta_seconds = ui
            .ctx()
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);
        let animating = self.viewport.advance(frame_delta_seconds);

        let mut physics_moving = false;
        if self.live_physics
            && let Some(simulation) = self.simulation.as_mut()
        {
            physics_moving = simulation.tick();
        }

        if physics_moving || animating || self.drag.is_active() {
            ui.ctx().request_repaint();
        }

        self.refresh_truncation(&painter, canvas);

        self.hovered = self.hovered_index(ui, rect);
        if self.gesture == PointerGesture::Body {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if self.gesture == PointerGesture::Pan {
            ui.ctx().set_cursor_icon(CursorIcon::Move);
        } else if self.hovered.is_some() {
            ui.ctx().set_cursor_icon(CursorIcon::Grab);
        }

        self.paint_scene(ui, &painter, rect);
        self.draw_zoom_controls(ui, rect);
    }

    fn paint_scene(&self, ui: &Ui, painter: &Painter, rect: Rect) {
        let Some(simulation) = self.simulation.as_ref() else {
            return;
        };

        if simulation.bodies().is_empty() {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "The dataset has no bubbles.",
                FontId::proportional(15.0),
                Color32::from_gray(90),
            );
            return;
        }

        let scale = self.viewport.scale();
        for (index, body) in simulation.bodies().iter().enumerate() {
            let position = screen_position(rect, &self.viewport, body.position);
            let radius = body.radius() * scale;
            if !circle_visible(rect, position, radius) {
                continue;
            }

            let style = bubble_style(&body.id, body.is_focal);
            let fill = if self.hovered == Some(index) && !body.is_focal {
                blend_color(style.fill, Color32::WHITE, 0.18)
            } else {
                style.fill
            };

            painter.circle_filled(position, radius, fill);
            if let Some(stroke) = style.stroke {
                painter.circle_stroke(position, radius, Stroke::new(2.0 * scale, stroke));
            }
            if body.pinned.is_some() {
                painter.circle_stroke(
                    position,
                    radius + 3.0,
                    Stroke::new(1.5, Color32::from_rgba_unmultiplied(40, 40, 40, 160)),
                );
            }

            let galley = clipped_label(painter, body, scale, style.text);
            let origin = pos2(position.x, position.y - (galley.size().y * 0.5));
            painter.galley(origin, galley, style.text);
        }

        let hovered = self
            .hovered
            .and_then(|index| simulation.bodies().get(index))
            .map(|body| (body.id.as_str(), body.label.as_str(), body.value));
        if let Some(label) = self
            .truncation
            .tooltip(hovered.map(|(id, label, _value)| (id, label)))
            && let Some(pointer) = ui.input(|input| input.pointer.hover_pos())
        {
            let value = hovered.map(|(_, _, value)| value).unwrap_or_default();
            Self::draw_tooltip(painter, rect, pointer, label, value);
        }
    }

    fn draw_tooltip(painter: &Painter, rect: Rect, pointer: Pos2, label: &str, value: f32) {
        let galley = painter.layout(
            format!("{label}\nvalue {}", format_value(value)),
            FontId::proportional(13.0),
            Color32::from_gray(245),
            TOOLTIP_MAX_WIDTH,
        );

        let padding = vec2(8.0, 6.0);
        let size = galley.size() + padding * 2.0;
        let mut min = pointer + TOOLTIP_OFFSET;
        if min.x + size.x > rect.right() {
            min.x = (pointer.x - TOOLTIP_OFFSET.x - size.x).max(rect.left());
        }
        if min.y + size.y > rect.bottom() {
            min.y = (pointer.y - TOOLTIP_OFFSET.y - size.y).max(rect.top());
        }

        let frame = Rect::from_min_size(min, size);
        painter.rect_filled(frame, 4.0, Color32::from_rgba_unmultiplied(24, 26, 31, 235));
        painter.galley(min + padding, galley, Color32::from_gray(245));
    }
}
