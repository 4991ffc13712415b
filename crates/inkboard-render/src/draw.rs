//! Drawing routines shared by the live canvas and exporters.

use crate::image_cache::ImageCache;
use crate::renderer::RenderContext;
use crate::surface::Surface;
use inkboard_core::background::{Background, GridType};
use inkboard_core::elements::{
    Element, Equation, FontSpec, Frame, Image, Shape, ShapeKind, Sticky, Stroke, StrokePoint, Text, TextAlign,
    TextMetrics,
};
use inkboard_core::overlay::{Protractor, Ruler};
use inkboard_core::selection::{HANDLE_SIZE, HandleKind, get_handles};
use inkboard_core::tools::{ToolKind, ToolProperties};
use inkboard_core::{Canvas, SerializableColor};
use kurbo::{Affine, BezPath, Cap, Circle, Ellipse, Join, Line, Point, Rect, RoundedRect, Shape as _, Vec2};
use peniko::Color;
use std::f64::consts::PI;

/// Arrow head half-angle.
const ARROW_HEAD_ANGLE: f64 = PI / 6.0;
/// Grids denser than this many device pixels per cell are skipped.
const MIN_GRID_PIXELS: f64 = 4.0;
const TOLERANCE: f64 = 0.1;

fn metrics(surface: &dyn Surface) -> &dyn TextMetrics {
    surface
}

fn round_stroke(width: f64) -> kurbo::Stroke {
    kurbo::Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round)
}

fn dashed(width: f64, dash: f64) -> kurbo::Stroke {
    kurbo::Stroke::new(width).with_dashes(0.0, [dash, dash])
}

/// Draw one element in world coordinates.
pub fn draw_element(surface: &mut dyn Surface, element: &Element, transform: Affine, images: &ImageCache) {
    match element {
        Element::Stroke(stroke) => draw_stroke(surface, stroke, transform),
        Element::Shape(shape) => draw_shape(surface, shape, transform),
        Element::Text(text) => draw_text(surface, text, transform),
        Element::Image(image) => draw_image(surface, image, transform, images),
        Element::Equation(eq) => draw_equation(surface, eq, transform, images),
        Element::Sticky(sticky) => draw_sticky(surface, sticky, transform),
        Element::Frame(frame) => draw_frame(surface, frame, transform),
    }
}

/// Pressure strokes are drawn segment by segment so each can carry its own width.
pub fn draw_stroke(surface: &mut dyn Surface, stroke: &Stroke, transform: Affine) {
    let color = stroke.color.with_opacity(stroke.opacity);
    match stroke.points.as_slice() {
        [] => {}
        [only] => {
            let dot = Circle::new(only.point(), stroke.segment_width(0) / 2.0);
            surface.fill(&dot.to_path(TOLERANCE), transform, color);
        }
        points if !stroke.has_pressure() => {
            let mut path = BezPath::new();
            path.move_to(points[0].point());
            for p in &points[1..] {
                path.line_to(p.point());
            }
            surface.stroke(&path, transform, &round_stroke(stroke.thickness), color);
        }
        points => {
            for (i, pair) in points.windows(2).enumerate() {
                let segment = Line::new(pair[0].point(), pair[1].point()).to_path(TOLERANCE);
                surface.stroke(&segment, transform, &round_stroke(stroke.segment_width(i + 1)), color);
            }
        }
    }
}

/// Draw the newest segment of a stroke that is still being captured.
pub fn draw_stroke_segment(
    surface: &mut dyn Surface,
    from: StrokePoint,
    to: StrokePoint,
    properties: &ToolProperties,
    transform: Affine,
) {
    let width = (properties.thickness * to.pressure() * 2.0).max(1.0);
    let color = properties.color.with_opacity(properties.opacity);
    if from.point() == to.point() {
        let dot = Circle::new(to.point(), width / 2.0);
        surface.fill(&dot.to_path(TOLERANCE), transform, color);
        return;
    }
    let segment = Line::new(from.point(), to.point()).to_path(TOLERANCE);
    surface.stroke(&segment, transform, &round_stroke(width), color);
}

fn arrow_head(start: Point, end: Point, length: f64) -> BezPath {
    let angle = (end.y - start.y).atan2(end.x - start.x);
    let wing = |offset: f64| {
        let a = angle + PI - offset;
        end + Vec2::new(a.cos(), a.sin()) * length
    };
    let mut path = BezPath::new();
    path.move_to(wing(ARROW_HEAD_ANGLE));
    path.line_to(end);
    path.line_to(wing(-ARROW_HEAD_ANGLE));
    path
}

pub fn draw_shape(surface: &mut dyn Surface, shape: &Shape, transform: Affine) {
    let color = shape.color.with_opacity(shape.opacity);
    let style = round_stroke(shape.thickness);
    let t = transform * shape.rotation_transform();

    let outline = match shape.kind {
        ShapeKind::Rectangle => shape.rect().to_path(TOLERANCE),
        ShapeKind::Circle => Ellipse::from_rect(shape.rect()).to_path(TOLERANCE),
        ShapeKind::Line | ShapeKind::Arrow => {
            let line = Line::new(shape.start(), shape.end()).to_path(TOLERANCE);
            surface.stroke(&line, transform, &style, color);
            if shape.kind == ShapeKind::Arrow && shape.start() != shape.end() {
                let head = arrow_head(shape.start(), shape.end(), shape.thickness * 4.0);
                surface.stroke(&head, transform, &style, color);
            }
            return;
        }
    };

    if let Some(fill) = shape.fill_color {
        let alpha = shape.fill_alpha() * shape.opacity;
        if alpha > 0.0 {
            surface.fill(&outline, t, fill.with_opacity(alpha));
        }
    }
    surface.stroke(&outline, t, &style, color);
}

pub fn draw_text(surface: &mut dyn Surface, text: &Text, transform: Affine) {
    let color = text.color.with_opacity(text.opacity);
    let font = text.font();
    let max_width = text.max_line_width(metrics(surface));

    if let Some(background) = text.background_color {
        let pad = Text::BACKGROUND_PADDING;
        let rect = Rect::new(
            text.x - pad,
            text.y - text.font_size - pad,
            text.x + max_width + pad,
            text.y - text.font_size + text.block_height() + pad,
        );
        surface.fill(&rect.to_path(TOLERANCE), transform, background.with_opacity(text.opacity));
    }

    let line_height = text.line_height();
    for (i, line) in text.lines().enumerate() {
        let width = surface.text_width(line, &font);
        let offset = match text.text_align {
            TextAlign::Left => 0.0,
            TextAlign::Center => (max_width - width) / 2.0,
            TextAlign::Right => max_width - width,
        };
        let origin = Point::new(text.x + offset, text.y + i as f64 * line_height);
        surface.fill_text(line, origin, &font, transform, color);
        if text.underline && width > 0.0 {
            let y = origin.y + 2.0;
            let underline = Line::new((origin.x, y), (origin.x + width, y)).to_path(TOLERANCE);
            surface.stroke(&underline, transform, &kurbo::Stroke::new((text.font_size / 15.0).max(1.0)), color);
        }
    }
}

fn draw_placeholder(surface: &mut dyn Surface, rect: Rect, transform: Affine) {
    let outline = rect.to_path(TOLERANCE);
    surface.fill(&outline, transform, Color::from_rgba8(200, 200, 200, 255));
    let mut cross = BezPath::new();
    cross.move_to((rect.x0, rect.y0));
    cross.line_to((rect.x1, rect.y1));
    cross.move_to((rect.x1, rect.y0));
    cross.line_to((rect.x0, rect.y1));
    let style = kurbo::Stroke::new(2.0);
    surface.stroke(&cross, transform, &style, Color::from_rgba8(150, 150, 150, 255));
    surface.stroke(&outline, transform, &style, Color::from_rgba8(100, 100, 100, 255));
}

/// Images draw a placeholder until their bitmap is ready.
pub fn draw_image(surface: &mut dyn Surface, image: &Image, transform: Affine, images: &ImageCache) {
    let t = transform * image.rotation_transform();
    match images.ready(&image.src) {
        Some(bitmap) => surface.draw_image(bitmap, image.rect(), t, image.opacity),
        None => draw_placeholder(surface, image.rect(), t),
    }
}

/// Equations show their source in a box until a rasterised image is supplied.
pub fn draw_equation(surface: &mut dyn Surface, eq: &Equation, transform: Affine, images: &ImageCache) {
    let rect = eq.rect();
    if let Some(bitmap) = images.ready(&ImageCache::equation_key(&eq.latex)) {
        surface.draw_image(bitmap, rect, transform, eq.opacity);
        return;
    }
    let color = eq.color.with_opacity(eq.opacity);
    surface.stroke(
        &rect.to_path(TOLERANCE),
        transform,
        &dashed(1.0, 3.0),
        Color::from_rgba8(160, 160, 160, 255),
    );
    let font = FontSpec::new(eq.font_size, "monospace");
    let origin = Point::new(rect.x0 + 4.0, rect.y0 + eq.font_size);
    surface.fill_text(&eq.latex, origin, &font, transform, color);
}

pub fn draw_sticky(surface: &mut dyn Surface, sticky: &Sticky, transform: Affine) {
    let rect = sticky.rect();
    let note = RoundedRect::from_rect(rect, Sticky::CORNER_RADIUS).to_path(TOLERANCE);
    surface.fill(&note, transform, sticky.color.with_opacity(sticky.opacity));

    let lines = sticky.wrapped_lines(metrics(surface));
    let font = FontSpec::new(sticky.font_size, inkboard_core::elements::DEFAULT_FONT_FAMILY);
    let line_height = sticky.font_size * inkboard_core::elements::LINE_HEIGHT_FACTOR;
    let center = rect.center();
    let mut baseline = center.y - lines.len() as f64 * line_height / 2.0 + sticky.font_size;
    let ink = Color::from_rgba8(51, 51, 51, 255);
    for line in &lines {
        let width = surface.text_width(line, &font);
        surface.fill_text(line, Point::new(center.x - width / 2.0, baseline), &font, transform, ink);
        baseline += line_height;
    }
}

pub fn draw_frame(surface: &mut dyn Surface, frame: &Frame, transform: Affine) {
    let rect = frame.rect();
    let outline = rect.to_path(TOLERANCE);
    surface.fill(&outline, transform, frame.tint().with_opacity(frame.opacity));
    let accent = SerializableColor::accent().with_opacity(frame.opacity);
    surface.stroke(&outline, transform, &dashed(1.5, 5.0), accent);
    let font = FontSpec::new(14.0, inkboard_core::elements::DEFAULT_FONT_FAMILY);
    surface.fill_text(&frame.name, Point::new(rect.x0, rect.y0 - 8.0), &font, transform, accent);
}

/// World-aligned grid over the visible world rectangle.
pub fn draw_grid(surface: &mut dyn Surface, background: &Background, visible: Rect, transform: Affine, scale: f64) {
    let Some(size) = background.grid_spacing() else {
        return;
    };
    if size * scale < MIN_GRID_PIXELS {
        return;
    }
    let color: Color = background.grid_color.into();
    let start_x = (visible.x0 / size).floor() * size;
    let start_y = (visible.y0 / size).floor() * size;
    let end_x = (visible.x1 / size).ceil() * size;
    let end_y = (visible.y1 / size).ceil() * size;
    let hairline = kurbo::Stroke::new(1.0 / scale);

    let xs = || std::iter::successors(Some(start_x), move |x| Some(x + size)).take_while(move |x| *x <= end_x);
    let ys = || std::iter::successors(Some(start_y), move |y| Some(y + size)).take_while(move |y| *y <= end_y);

    let mut path = BezPath::new();
    match background.grid_type {
        GridType::None => return,
        GridType::Lines => {
            for x in xs() {
                path.move_to((x, start_y));
                path.line_to((x, end_y));
            }
            for y in ys() {
                path.move_to((start_x, y));
                path.line_to((end_x, y));
            }
            surface.stroke(&path, transform, &hairline, color);
        }
        GridType::Dots => {
            let r = 1.5 / scale;
            for x in xs() {
                for y in ys() {
                    path.extend(Rect::new(x - r, y - r, x + r, y + r).path_elements(TOLERANCE));
                }
            }
            surface.fill(&path, transform, color);
        }
        GridType::Squares => {
            let inset = (2.0 / scale).min(size / 4.0);
            for x in xs() {
                for y in ys() {
                    path.extend(Rect::new(x + inset, y + inset, x + size - inset, y + size - inset).path_elements(TOLERANCE));
                }
            }
            surface.stroke(&path, transform, &hairline, color);
        }
    }
}

pub fn draw_ruler(surface: &mut dyn Surface, ruler: &Ruler, transform: Affine) {
    let rect = ruler.rect();
    let body = rect.to_path(TOLERANCE);
    surface.fill(&body, transform, Color::from_rgba8(245, 245, 245, 220));
    let ink = Color::from_rgba8(90, 90, 90, 255);
    surface.stroke(&body, transform, &kurbo::Stroke::new(1.0), ink);

    let step = ruler.width / Ruler::TICKS as f64;
    let font = FontSpec::new(10.0, inkboard_core::elements::DEFAULT_FONT_FAMILY);
    let mut ticks = BezPath::new();
    for i in 0..=Ruler::TICKS {
        let x = rect.x0 + i as f64 * step;
        let major = i % 5 == 0;
        let length = if major { ruler.height * 0.5 } else { ruler.height * 0.25 };
        ticks.move_to((x, rect.y0));
        ticks.line_to((x, rect.y0 + length));
        if major {
            surface.fill_text(&i.to_string(), Point::new(x + 2.0, rect.y1 - 4.0), &font, transform, ink);
        }
    }
    surface.stroke(&ticks, transform, &kurbo::Stroke::new(1.0), ink);
}

pub fn draw_protractor(surface: &mut dyn Surface, protractor: &Protractor, transform: Affine) {
    let center = protractor.center();
    let r = protractor.radius;
    let sweep = protractor.end_angle - protractor.start_angle;
    let arc = kurbo::Arc {
        center,
        radii: Vec2::new(r, r),
        start_angle: protractor.start_angle,
        sweep_angle: sweep,
        x_rotation: 0.0,
    };
    let mut body = BezPath::new();
    body.move_to(center);
    body.line_to(center + Vec2::from_angle(protractor.start_angle) * r);
    body.extend(arc.append_iter(TOLERANCE));
    body.close_path();
    surface.fill(&body, transform, Color::from_rgba8(245, 245, 245, 200));
    let ink = Color::from_rgba8(90, 90, 90, 255);
    surface.stroke(&body, transform, &kurbo::Stroke::new(1.0), ink);

    let font = FontSpec::new(10.0, inkboard_core::elements::DEFAULT_FONT_FAMILY);
    let degrees = (sweep.abs().to_degrees().round() as i64).max(0);
    let mut ticks = BezPath::new();
    for deg in (0..=degrees).step_by(10) {
        let angle = protractor.start_angle + (deg as f64).to_radians() * sweep.signum();
        let dir = Vec2::from_angle(angle);
        let major = deg % 30 == 0;
        let inner = if major { 0.85 } else { 0.92 };
        ticks.move_to(center + dir * r * inner);
        ticks.line_to(center + dir * r);
        if major {
            let label = center + dir * r * 0.72;
            surface.fill_text(&deg.to_string(), label - Vec2::new(6.0, -4.0), &font, transform, ink);
        }
    }
    surface.stroke(&ticks, transform, &kurbo::Stroke::new(1.0), ink);
}

/// Dashed rubber band with a constant on-screen stroke width.
pub fn draw_marquee(surface: &mut dyn Surface, rect: Rect, transform: Affine, scale: f64, color: Color) {
    let path = rect.to_path(TOLERANCE);
    surface.fill(&path, transform, color.with_alpha(0.1));
    surface.stroke(&path, transform, &dashed(1.0 / scale, 4.0 / scale), color);
}

/// Outlines for every selected element; handles when exactly one is selected.
pub fn draw_selection(surface: &mut dyn Surface, canvas: &Canvas, transform: Affine, color: Color) {
    let scene = canvas.scene();
    let scale = canvas.viewport().scale;
    let width = 1.5 / scale;

    for id in scene.selection() {
        let Some(element) = scene.element(*id) else {
            continue;
        };
        let bounds = element.bounds(scene.metrics());
        let rotation = element.rotation();
        let t = if rotation == 0.0 {
            transform
        } else {
            transform * Affine::rotate_about(rotation.to_radians(), bounds.center())
        };
        let pad = 4.0 / scale;
        surface.stroke(&bounds.inflate(pad, pad).to_path(TOLERANCE), t, &kurbo::Stroke::new(width), color);
    }

    let Some(element) = scene.single_selected() else {
        return;
    };
    let half = HANDLE_SIZE / scale / 2.0;
    let handles = get_handles(element, scene.metrics(), canvas.config().rotate_handle_offset / scale);
    for handle in handles {
        let path = match handle.kind {
            HandleKind::Rotate => Circle::new(handle.position, half).to_path(TOLERANCE),
            _ => Rect::from_center_size(handle.position, (half * 2.0, half * 2.0)).to_path(TOLERANCE),
        };
        surface.fill(&path, transform, Color::WHITE);
        surface.stroke(&path, transform, &kurbo::Stroke::new(width), color);
    }
}

/// Anchor markers shown while a line or arrow is being drawn.
pub fn draw_connector_anchors(surface: &mut dyn Surface, canvas: &Canvas, transform: Affine, color: Color) {
    let scale = canvas.viewport().scale;
    let r = 4.0 / scale;
    for element in canvas.scene().visible_elements() {
        for (_, position) in element.anchors() {
            let dot = Circle::new(position, r).to_path(TOLERANCE);
            surface.fill(&dot, transform, Color::WHITE);
            surface.stroke(&dot, transform, &kurbo::Stroke::new(1.0 / scale), color);
        }
    }
}

fn drawing_connector(canvas: &Canvas) -> bool {
    let tool_draws_connector = matches!(canvas.active_tool(), ToolKind::Line | ToolKind::Arrow);
    let preview_is_connector = canvas
        .interaction()
        .shape_preview()
        .is_some_and(|shape| shape.kind.is_connector());
    tool_draws_connector || preview_is_connector
}

/// Record a full frame: background, grid, elements, overlays, live previews
/// and selection chrome.
pub fn build_scene(surface: &mut dyn Surface, ctx: &RenderContext) {
    let canvas = ctx.canvas;
    let transform = ctx.transform();
    let scale = canvas.viewport().scale;

    if ctx.draw_background {
        let device = Rect::from_origin_size(Point::ZERO, ctx.viewport_size * ctx.scale_factor);
        surface.fill(&device.to_path(TOLERANCE), Affine::IDENTITY, ctx.background_color());
        let visible = transform.inverse().transform_rect_bbox(device);
        draw_grid(surface, canvas.background(), visible, transform, scale * ctx.scale_factor);
    }

    for element in canvas.scene().visible_elements() {
        draw_element(surface, element, transform, ctx.images);
    }

    let overlays = canvas.overlays();
    if let Some(ruler) = &overlays.ruler {
        draw_ruler(surface, ruler, transform);
    }
    if let Some(protractor) = &overlays.protractor {
        draw_protractor(surface, protractor, transform);
    }

    let state = canvas.interaction();
    if let Some(points) = state.stroke_preview() {
        let props = canvas.tool_properties();
        let preview = Stroke::new(points.to_vec(), props.color, props.thickness, props.opacity);
        draw_stroke(surface, &preview, transform);
    }
    if let Some(shape) = state.shape_preview() {
        draw_shape(surface, shape, transform);
    }
    if drawing_connector(canvas) {
        draw_connector_anchors(surface, canvas, transform, ctx.selection_color);
    }
    if let Some(rect) = state.marquee() {
        draw_marquee(surface, rect, transform, scale, ctx.selection_color);
    }
    draw_selection(surface, canvas, transform, ctx.selection_color);
}

/// Draw `elements` translated so their union starts at `(padding, padding)`.
///
/// Returns the exported world rectangle, or `None` when there is nothing
/// to draw.
pub fn render_export(surface: &mut dyn Surface, elements: &[&Element], images: &ImageCache, padding: f64) -> Option<Rect> {
    let bounds = elements
        .iter()
        .map(|e| e.bounds(metrics(surface)))
        .reduce(|acc, b| acc.union(b))?;
    let transform = Affine::translate((padding - bounds.x0, padding - bounds.y0));
    for element in elements {
        draw_element(surface, element, transform, images);
    }
    Some(bounds.inflate(padding, padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_list::{DisplayList, DrawCommand};
    use inkboard_core::elements::ApproxTextMetrics;

    fn count(list: &DisplayList, f: impl Fn(&DrawCommand) -> bool) -> usize {
        list.commands().iter().filter(|c| f(c)).count()
    }

    fn is_stroke(c: &DrawCommand) -> bool {
        matches!(c, DrawCommand::Stroke { .. })
    }

    #[test]
    fn test_pressure_stroke_draws_per_segment() {
        let stroke = Stroke::new(
            vec![
                StrokePoint::with_pressure(0.0, 0.0, 0.5),
                StrokePoint::with_pressure(10.0, 0.0, 1.0),
                StrokePoint::with_pressure(20.0, 0.0, 0.1),
            ],
            SerializableColor::black(),
            4.0,
            1.0,
        );
        let mut list = DisplayList::new();
        draw_stroke(&mut list, &stroke, Affine::IDENTITY);
        let widths: Vec<f64> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Stroke { style, .. } => Some(style.width),
                _ => None,
            })
            .collect();
        assert_eq!(widths, vec![8.0, 1.0]);
    }

    #[test]
    fn test_arrow_has_head() {
        let arrow = Shape::new(ShapeKind::Arrow, 0.0, 0.0, 100.0, 0.0, SerializableColor::black(), 2.0);
        let mut list = DisplayList::new();
        draw_shape(&mut list, &arrow, Affine::IDENTITY);
        assert_eq!(count(&list, is_stroke), 2);

        let head = arrow_head(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 8.0);
        let bounds = head.bounding_box();
        assert!((bounds.x0 - (100.0 - 8.0 * (PI / 6.0).cos())).abs() < 1e-9);
        assert!((bounds.height() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_filled_rectangle() {
        let mut rect = Shape::new(ShapeKind::Rectangle, 0.0, 0.0, 10.0, 10.0, SerializableColor::black(), 2.0);
        rect.fill_color = Some(SerializableColor::accent());
        rect.fill_opacity = Some(0.5);
        let mut list = DisplayList::new();
        draw_shape(&mut list, &rect, Affine::IDENTITY);
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::Fill { .. })), 1);
        assert_eq!(count(&list, is_stroke), 1);
    }

    #[test]
    fn test_text_lines_and_alignment() {
        let mut text = Text::new(0.0, 20.0, "ab\nabcd", 10.0, SerializableColor::black());
        text.text_align = TextAlign::Right;
        let mut list = DisplayList::new();
        draw_text(&mut list, &text, Affine::IDENTITY);
        let origins: Vec<Point> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { origin, .. } => Some(*origin),
                _ => None,
            })
            .collect();
        let w = ApproxTextMetrics.text_width("ab", &text.font());
        let max = ApproxTextMetrics.text_width("abcd", &text.font());
        assert_eq!(origins.len(), 2);
        assert!((origins[0].x - (max - w)).abs() < 1e-9);
        assert!((origins[1].y - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_image_placeholder_until_ready() {
        let image = Image::new(0.0, 0.0, 10.0, 10.0, "https://example.com/x.png");
        let mut cache = ImageCache::new();
        cache.request(&image.src);
        let mut list = DisplayList::new();
        draw_image(&mut list, &image, Affine::IDENTITY, &cache);
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::Image { .. })), 0);
        assert!(!list.is_empty());
    }

    #[test]
    fn test_grid_skipped_when_none() {
        let mut background = Background::default();
        background.grid_type = GridType::None;
        let mut list = DisplayList::new();
        draw_grid(&mut list, &background, Rect::new(0.0, 0.0, 100.0, 100.0), Affine::IDENTITY, 1.0);
        assert!(list.is_empty());

        background.grid_type = GridType::Lines;
        draw_grid(&mut list, &background, Rect::new(0.0, 0.0, 100.0, 100.0), Affine::IDENTITY, 1.0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_export_offsets_to_padding() {
        let a: Element = Shape::new(ShapeKind::Rectangle, 50.0, 60.0, 10.0, 10.0, SerializableColor::black(), 1.0).into();
        let b: Element = Shape::new(ShapeKind::Rectangle, 100.0, 100.0, 10.0, 10.0, SerializableColor::black(), 1.0).into();
        let mut list = DisplayList::new();
        let rect = render_export(&mut list, &[&a, &b], &ImageCache::new(), 10.0).unwrap();
        assert_eq!(rect, Rect::new(40.0, 50.0, 120.0, 120.0));
        match &list.commands()[0] {
            DrawCommand::Stroke { transform, .. } => {
                assert_eq!(transform.translation(), Vec2::new(-40.0, -50.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(render_export(&mut DisplayList::new(), &[], &ImageCache::new(), 10.0).is_none());
    }
}
