// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene to SVG serialisation.

use core::fmt::Write as _;

use peniko::Brush;
use tally_core::{
    MarkPayload, PathMark, RectMark, Scene, Stroke, TextAnchor, TextBaseline, TextMark,
};

/// Font stack used for every text element.
///
/// The first family present in the system font database wins.
pub const FONT_FAMILY: &str = "DejaVu Sans, Liberation Sans, Arial, Helvetica, sans-serif";

/// Serialises `scene` into a standalone SVG document.
///
/// The scene's view becomes the `viewBox`; `width` and `height` are the output size in
/// pixels, so the rasteriser scales the view uniformly.
pub fn scene_to_svg(scene: &Scene, width: u32, height: u32) -> String {
    let view = scene.view();
    let mut out = String::new();

    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    let _ = write!(
        out,
        r#"viewBox="{} {} {} {}" width="{width}" height="{height}" preserveAspectRatio="xMinYMin meet" font-family="{FONT_FAMILY}">"#,
        view.x0,
        view.y0,
        view.width(),
        view.height(),
    );
    out.push('\n');

    for mark in scene.paint_order() {
        match &mark.payload {
            MarkPayload::Rect(r) => write_rect(&mut out, r),
            MarkPayload::Text(t) => write_text(&mut out, t),
            MarkPayload::Path(p) => write_path(&mut out, p),
        }
    }

    out.push_str("</svg>\n");
    out
}

fn write_rect(out: &mut String, r: &RectMark) {
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        r.rect.x0,
        r.rect.y0,
        r.rect.width(),
        r.rect.height(),
    );
    write_paint_attr(out, "fill", &r.fill);
    if let Some(stroke) = &r.stroke {
        write_stroke(out, stroke);
    }
    out.push_str("/>\n");
}

fn write_text(out: &mut String, t: &TextMark) {
    let baseline = match t.baseline {
        TextBaseline::Middle => "middle",
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Hanging => "hanging",
        TextBaseline::Ideographic => "ideographic",
    };
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
        t.pos.x, t.pos.y, t.font_size, baseline
    );
    if t.font_weight.is_bold() {
        out.push_str(r#" font-weight="bold""#);
    }
    if t.angle != 0.0 {
        let _ = write!(
            out,
            r#" transform="rotate({} {} {})""#,
            t.angle, t.pos.x, t.pos.y
        );
    }
    out.push_str(match t.anchor {
        TextAnchor::Start => r#" text-anchor="start""#,
        TextAnchor::Middle => r#" text-anchor="middle""#,
        TextAnchor::End => r#" text-anchor="end""#,
    });
    write_paint_attr(out, "fill", &t.fill);
    out.push('>');
    out.push_str(&escape_xml(&t.text));
    out.push_str("</text>\n");
}

fn write_path(out: &mut String, p: &PathMark) {
    let _ = write!(out, r#"<path d="{}""#, p.path.to_svg());
    match &p.fill {
        Some(fill) => write_paint_attr(out, "fill", fill),
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = &p.stroke {
        write_stroke(out, stroke);
    }
    out.push_str("/>\n");
}

fn write_stroke(out: &mut String, stroke: &Stroke) {
    if stroke.width <= 0.0 {
        return;
    }
    write_paint_attr(out, "stroke", &stroke.brush);
    let _ = write!(out, r#" stroke-width="{}""#, stroke.width);
    if let Some((dash, gap)) = stroke.dash {
        let _ = write!(out, r#" stroke-dasharray="{dash} {gap}""#);
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kurbo::{BezPath, Point, Rect};
    use peniko::Color;
    use peniko::color::palette::css;
    use tally_core::{Mark, MarkId};
    use tally_text::FontWeight;

    use super::*;

    fn text(id: u64, z: i32, s: &str, weight: FontWeight) -> Mark {
        Mark::new(
            MarkId::from_raw(id),
            z,
            TextMark {
                pos: Point::new(5.0, 5.0),
                text: s.to_string(),
                font_size: 12.0,
                font_weight: weight,
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Middle,
                angle: 0.0,
                fill: css::BLACK.into(),
            },
        )
    }

    #[test]
    fn header_carries_view_box_and_pixel_size() {
        let scene = Scene::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        let svg = scene_to_svg(&scene, 400, 200);
        assert!(svg.contains(r#"viewBox="0 0 200 100""#));
        assert!(svg.contains(r#"width="400" height="200""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn text_is_escaped_and_bold_is_marked() {
        let mut scene = Scene::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        scene.push(text(1, 0, "A & <B>", FontWeight::BOLD));
        let svg = scene_to_svg(&scene, 10, 10);
        assert!(svg.contains("A &amp; &lt;B&gt;"));
        assert!(svg.contains(r#"font-weight="bold""#));
    }

    #[test]
    fn marks_are_written_in_paint_order() {
        let mut scene = Scene::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        scene.push(text(1, 20, "front", FontWeight::NORMAL));
        scene.push(text(2, -10, "back", FontWeight::NORMAL));
        let svg = scene_to_svg(&scene, 10, 10);
        let back = svg.find("back").unwrap();
        let front = svg.find("front").unwrap();
        assert!(back < front);
    }

    #[test]
    fn strokes_carry_width_dash_and_opacity() {
        let mut scene = Scene::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        scene.push(Mark::new(
            MarkId::from_raw(1),
            0,
            RectMark {
                rect: Rect::new(1.0, 2.0, 4.0, 6.0),
                fill: Color::from_rgba8(255, 0, 0, 128).into(),
                stroke: Some(Stroke::solid(css::BLACK, 1.5).dashed(4.0, 3.0)),
            },
        ));
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        scene.push(Mark::new(
            MarkId::from_raw(2),
            1,
            PathMark {
                path,
                fill: None,
                stroke: Some(Stroke::solid(css::BLACK, 1.0)),
            },
        ));
        let svg = scene_to_svg(&scene, 10, 10);
        assert!(svg.contains(r##"<rect x="1" y="2" width="3" height="4" fill="#ff0000""##));
        assert!(svg.contains("fill-opacity="));
        assert!(svg.contains(r#"stroke-width="1.5" stroke-dasharray="4 3""#));
        assert!(svg.contains(r##"fill="none" stroke="#000000""##));
    }
}
