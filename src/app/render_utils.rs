use bionet_explorer::{ViewTransform, stable_pair};
use eframe::egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};

/// Known biomedical categories and their legend colors.
pub(super) const CATEGORY_PALETTE: [(&str, Color32); 8] = [
    ("protein", Color32::from_rgb(0xff, 0x7f, 0x0e)),
    ("neurotransmitter", Color32::from_rgb(0x1f, 0x77, 0xb4)),
    ("brain_region", Color32::from_rgb(0x2c, 0xa0, 0x2c)),
    ("enzyme", Color32::from_rgb(0xd6, 0x27, 0x28)),
    ("transcription_factor", Color32::from_rgb(0x94, 0x67, 0xbd)),
    ("clinical_symptom", Color32::from_rgb(0xe3, 0x77, 0xc2)),
    ("assessment_tool", Color32::from_rgb(0x17, 0xbe, 0xcf)),
    ("gene", Color32::from_rgb(0xbc, 0xbd, 0x22)),
];

const ARROW_SIZE: f32 = 7.0;

pub(super) fn category_color(category: &str) -> Color32 {
    if let Some((_, color)) = CATEGORY_PALETTE
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(category))
    {
        return *color;
    }

    let (x, y) = stable_pair(category);
    let r = (130.0 + x * 90.0) as u8;
    let g = (130.0 + y * 90.0) as u8;
    let b = (150.0 - (x + y) * 45.0) as u8;
    Color32::from_rgb(r, g, b)
}

/// World-space radius; assessment tools are drawn larger.
pub(super) fn node_radius(category: &str) -> f32 {
    if category == "assessment_tool" { 12.0 } else { 8.0 }
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let mix = |from: u8, to: u8| (from as f32 * (1.0 - amount) + to as f32 * amount) as u8;

    Color32::from_rgba_unmultiplied(
        mix(base.r(), overlay.r()),
        mix(base.g(), overlay.g()),
        mix(base.b(), overlay.b()),
        mix(base.a(), overlay.a()),
    )
}

pub(super) fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color32::from_rgba_unmultiplied(r, g, b, (a as f32 * opacity.clamp(0.0, 1.0)) as u8)
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, view: &ViewTransform) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (56.0 * view.zoom().clamp(0.6, 1.8)).max(20.0);
    let origin = view.world_to_screen(rect.center(), Vec2::ZERO);
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}

/// Filled arrowhead whose tip sits on the rim of the target node.
pub(super) fn draw_arrowhead(
    painter: &Painter,
    start: Pos2,
    end: Pos2,
    target_radius: f32,
    zoom: f32,
    color: Color32,
) {
    let along = end - start;
    if along.length_sq() <= f32::EPSILON {
        return;
    }

    let direction = along.normalized();
    let normal = Vec2::new(-direction.y, direction.x);
    let size = ARROW_SIZE * zoom.sqrt().clamp(0.6, 1.6);
    let tip = end - direction * target_radius;
    let base = tip - direction * size;

    painter.add(Shape::convex_polygon(
        vec![tip, base + normal * size * 0.5, base - normal * size * 0.5],
        color,
        Stroke::NONE,
    ));
}

/// Shortest distance from `point` to the segment `start..end`.
pub(super) fn segment_distance(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let along = end - start;
    let length_sq = along.length_sq();
    if length_sq <= f32::EPSILON {
        return point.distance(start);
    }

    let t = ((point - start).dot(along) / length_sq).clamp(0.0, 1.0);
    point.distance(start + along * t)
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    #[test]
    fn known_categories_use_palette() {
        assert_eq!(category_color("enzyme"), Color32::from_rgb(0xd6, 0x27, 0x28));
        assert_eq!(category_color("Enzyme"), category_color("enzyme"));
        assert_eq!(category_color("lipid"), category_color("lipid"));
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let start = pos2(0.0, 0.0);
        let end = pos2(10.0, 0.0);
        assert_eq!(segment_distance(pos2(5.0, 3.0), start, end), 3.0);
        assert_eq!(segment_distance(pos2(-4.0, 3.0), start, end), 5.0);
        assert!((segment_distance(pos2(2.0, 2.0), start, start) - 8.0_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn opacity_scales_alpha_only() {
        let faded = with_opacity(Color32::from_rgb(200, 100, 50), 0.3);
        assert_eq!(faded.a(), 76);
        assert_eq!(with_opacity(Color32::WHITE, 1.0), Color32::WHITE);
    }
}
