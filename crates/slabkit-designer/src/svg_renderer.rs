//! SVG serializer for [`Scene`]s.
//! Produces a standalone document: background, masked overlay group, grid,
//! piece groups (with their rotation matrix), manual dimensions.

use std::fmt::Write as _;

use slabkit_core::{format_trimmed, Affine};

use crate::overlay_mask::{MaskGeometry, MaskPaint};
use crate::scene::{Baseline, Fill, Primitive, Scene, Stroke, TextAnchor, TextLabel};

/// Id of the `<mask>` element referenced by the overlay group.
pub const OVERLAY_MASK_ID: &str = "slab-overlay-mask";

fn num(v: f64) -> String {
    format_trimmed(v)
}

/// Escapes text for element content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Transform coefficient at full precision; `-0` is written as `0`.
fn coeff(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else {
        v.to_string()
    }
}

fn matrix(t: &Affine) -> String {
    let [a, b, c, d, e, f] = t.to_row();
    format!(
        "matrix({} {} {} {} {} {})",
        coeff(a),
        coeff(b),
        coeff(c),
        coeff(d),
        coeff(e),
        coeff(f)
    )
}

fn fill_attrs(fill: Option<&Fill>) -> String {
    match fill {
        None => " fill=\"none\"".to_string(),
        Some(f) if f.opacity < 1.0 => format!(
            " fill=\"{}\" fill-opacity=\"{}\"",
            escape_xml(&f.color),
            num(f.opacity)
        ),
        Some(f) => format!(" fill=\"{}\"", escape_xml(&f.color)),
    }
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    let Some(s) = stroke else {
        return String::new();
    };
    let mut out = format!(
        " stroke=\"{}\" stroke-width=\"{}\"",
        escape_xml(&s.color),
        num(s.width)
    );
    if s.opacity < 1.0 {
        let _ = write!(out, " opacity=\"{}\"", num(s.opacity));
    }
    if s.non_scaling {
        out.push_str(" vector-effect=\"non-scaling-stroke\"");
    }
    out
}

fn render_text(label: &TextLabel, out: &mut String) {
    let anchor = match label.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let _ = write!(
        out,
        "<text x=\"{}\" y=\"{}\" text-anchor=\"{}\" font-size=\"{}\" fill=\"{}\"",
        num(label.pos.x),
        num(label.pos.y),
        anchor,
        num(label.size),
        escape_xml(&label.color)
    );
    match label.baseline {
        Baseline::Alphabetic => {}
        Baseline::Middle => out.push_str(" dominant-baseline=\"middle\""),
        Baseline::Hanging => out.push_str(" dominant-baseline=\"hanging\""),
    }
    if label.rotation != 0.0 {
        let _ = write!(
            out,
            " transform=\"rotate({} {} {})\"",
            num(label.rotation),
            num(label.pos.x),
            num(label.pos.y)
        );
    }
    out.push('>');
    if let [single] = label.lines.as_slice() {
        out.push_str(&escape_xml(single));
    } else {
        for (i, line) in label.lines.iter().enumerate() {
            let dy = if i == 0 { 0.0 } else { label.line_height };
            let _ = write!(
                out,
                "<tspan x=\"{}\" dy=\"{}\">{}</tspan>",
                num(label.pos.x),
                num(dy),
                escape_xml(line)
            );
        }
    }
    out.push_str("</text>\n");
}

/// Appends one primitive as an SVG element.
pub fn render_primitive(primitive: &Primitive, out: &mut String) {
    match primitive {
        Primitive::Rect {
            rect,
            fill,
            stroke,
            opacity,
        } => {
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}{}",
                num(rect.x),
                num(rect.y),
                num(rect.width),
                num(rect.height),
                fill_attrs(fill.as_ref()),
                stroke_attrs(stroke.as_ref())
            );
            if *opacity < 1.0 {
                let _ = write!(out, " opacity=\"{}\"", num(*opacity));
            }
            out.push_str("/>\n");
        }
        Primitive::Line { from, to, stroke } => {
            let _ = writeln!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}/>",
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y),
                stroke_attrs(Some(stroke))
            );
        }
        Primitive::Shape {
            outline,
            transform,
            fill,
            stroke,
        } => {
            let _ = write!(out, "<path d=\"{}\"", outline.svg_path_data());
            if !transform.is_identity() {
                let _ = write!(out, " transform=\"{}\"", matrix(transform));
            }
            let _ = writeln!(
                out,
                "{}{}/>",
                fill_attrs(fill.as_ref()),
                stroke_attrs(stroke.as_ref())
            );
        }
        Primitive::Text(label) => render_text(label, out),
        Primitive::Image { rect, href, opacity } => {
            let _ = writeln!(
                out,
                "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\" opacity=\"{}\" xlink:href=\"{}\"/>",
                num(rect.x),
                num(rect.y),
                num(rect.width),
                num(rect.height),
                num(*opacity),
                escape_xml(href)
            );
        }
    }
}

/// `<mask>` element: black everywhere, then the elements in paint order.
pub fn render_mask(mask: &MaskGeometry, id: &str) -> String {
    let mut out = format!(
        "<mask id=\"{}\" maskUnits=\"userSpaceOnUse\" x=\"0\" y=\"0\" width=\"{}\" height=\"{}\">\n",
        escape_xml(id),
        num(mask.width),
        num(mask.height)
    );
    let _ = writeln!(
        out,
        "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"black\"/>",
        num(mask.width),
        num(mask.height)
    );
    for element in &mask.elements {
        let color = match element.paint {
            MaskPaint::Reveal => "white",
            MaskPaint::Hide => "black",
        };
        let _ = writeln!(
            out,
            "<path d=\"{}\" transform=\"{}\" fill=\"{}\"/>",
            element.outline.svg_path_data(),
            matrix(&element.transform),
            color
        );
    }
    out.push_str("</mask>\n");
    out
}

/// Serializes a scene to a standalone SVG document.
pub fn to_svg(scene: &Scene) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = num(scene.width),
        h = num(scene.height)
    );

    if let Some(mask) = &scene.overlays.mask {
        out.push_str("<defs>\n");
        out.push_str(&render_mask(mask, OVERLAY_MASK_ID));
        out.push_str("</defs>\n");
    }

    render_primitive(&scene.background, &mut out);

    if !scene.overlays.items.is_empty() {
        match scene.overlays.mask {
            Some(_) => {
                let _ = writeln!(out, "<g class=\"overlays\" mask=\"url(#{OVERLAY_MASK_ID})\">");
            }
            None => out.push_str("<g class=\"overlays\">\n"),
        }
        for item in &scene.overlays.items {
            render_primitive(item, &mut out);
        }
        out.push_str("</g>\n");
    }

    if !scene.grid.is_empty() {
        out.push_str("<g class=\"grid\">\n");
        for line in &scene.grid {
            render_primitive(line, &mut out);
        }
        out.push_str("</g>\n");
    }

    for group in &scene.pieces {
        let _ = writeln!(out, "<g data-id=\"{}\">", escape_xml(&group.piece_id));
        let _ = writeln!(out, "<g transform=\"{}\">", matrix(&group.frame));
        for item in &group.items {
            render_primitive(item, &mut out);
        }
        out.push_str("</g>\n");
        if let Some(label) = &group.label {
            render_text(label, &mut out);
        }
        out.push_str("</g>\n");
    }

    if !scene.dimensions.is_empty() {
        out.push_str("<g class=\"dims-manual\">\n");
        for dim in &scene.dimensions {
            let class = if dim.selected { "dim-line selected" } else { "dim-line" };
            let _ = writeln!(
                out,
                "<g class=\"{}\" data-dimid=\"{}\">",
                class,
                escape_xml(&dim.dim_id)
            );
            for item in &dim.items {
                render_primitive(item, &mut out);
            }
            out.push_str("</g>\n");
        }
        out.push_str("</g>\n");
    }

    out.push_str("</svg>\n");
    out
}
