//! Paint a [`Scene`] with plotters (SVG output).

use super::scene::{Anchor, Primitive, Rgb, Scene};
use crate::error::{Error, Result};
use crate::models::Visibility;
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform};
use plotters_svg::SVGBackend;
use std::path::Path;

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn px(v: f64) -> i32 {
    v.round() as i32
}

fn draw_err<E: std::fmt::Debug>(e: E) -> Error {
    Error::Render(format!("{e:?}"))
}

/// plotters strokes in whole pixels; round to nearest, never below 1.
fn stroke_px(width: f64) -> u32 {
    if width.is_finite() {
        (width.round() as u32).max(1)
    } else {
        1
    }
}

/// plotters rotates text in quarter turns only; round away from zero so a
/// tilted label still reads in the same direction.
fn quarter_turn(degrees: f64) -> FontTransform {
    if degrees == 0.0 || !degrees.is_finite() {
        return FontTransform::None;
    }
    let quarters = (degrees.abs() / 90.0).ceil() as i64 * degrees.signum() as i64;
    match quarters.rem_euclid(4) {
        1 => FontTransform::Rotate90,
        2 => FontTransform::Rotate180,
        3 => FontTransform::Rotate270,
        _ => FontTransform::None,
    }
}

/// Draw every visible element of `scene` onto `area`.
pub fn paint<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scene: &Scene,
    visibility: &Visibility,
) -> Result<()> {
    area.fill(&WHITE).map_err(draw_err)?;
    for element in scene.visible(visibility) {
        match &element.primitive {
            Primitive::Path { points, color, width } => {
                let pts: Vec<(i32, i32)> = points.iter().map(|(x, y)| (px(*x), px(*y))).collect();
                let style = ShapeStyle {
                    color: rgb(*color).to_rgba(),
                    filled: false,
                    stroke_width: stroke_px(*width),
                };
                area.draw(&PathElement::new(pts, style)).map_err(draw_err)?;
            }
            Primitive::Rect { x, y, w, h, fill, stroke, opacity } => {
                let corners = [(px(*x), px(*y)), (px(x + w), px(y + h))];
                area.draw(&Rectangle::new(corners, rgb(*fill).mix(*opacity).filled()))
                    .map_err(draw_err)?;
                if let Some(border) = stroke {
                    area.draw(&Rectangle::new(corners, rgb(*border).stroke_width(1)))
                        .map_err(draw_err)?;
                }
            }
            Primitive::Circle { cx, cy, r, fill } => {
                area.draw(&Circle::new((px(*cx), px(*cy)), px(*r), rgb(*fill).filled()))
                    .map_err(draw_err)?;
            }
            Primitive::Text { x, y, text, size, anchor, rotation, bold, color } => {
                let h_pos = match anchor {
                    Anchor::Start => HPos::Left,
                    Anchor::Middle => HPos::Center,
                    Anchor::End => HPos::Right,
                };
                let font_style = if *bold { FontStyle::Bold } else { FontStyle::Normal };
                let font = FontDesc::new(FontFamily::SansSerif, *size, font_style);
                let color = rgb(*color);
                let style = TextStyle::from(font)
                    .color(&color)
                    .pos(Pos::new(h_pos, VPos::Center))
                    .transform(quarter_turn(*rotation));
                area.draw(&Text::new(text.clone(), (px(*x), px(*y)), style))
                    .map_err(draw_err)?;
            }
        }
    }
    Ok(())
}

/// Render a scene to an in-memory SVG document.
pub fn render_svg_string(scene: &Scene, visibility: &Visibility) -> Result<String> {
    let size = (
        scene.width.round().max(1.0) as u32,
        scene.height.round().max(1.0) as u32,
    );
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, size).into_drawing_area();
        paint(&root, scene, visibility)?;
        root.present().map_err(draw_err)?;
    }
    Ok(buf)
}

/// Render a scene to an SVG file.
pub fn render_svg_file<P: AsRef<Path>>(scene: &Scene, visibility: &Visibility, path: P) -> Result<()> {
    let path = path.as_ref();
    let svg = render_svg_string(scene, visibility)?;
    std::fs::write(path, svg)?;
    info!("Wrote chart to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilted_labels_round_to_quarter_turns() {
        assert!(matches!(quarter_turn(0.0), FontTransform::None));
        assert!(matches!(quarter_turn(-45.0), FontTransform::Rotate270));
        assert!(matches!(quarter_turn(-90.0), FontTransform::Rotate270));
        assert!(matches!(quarter_turn(45.0), FontTransform::Rotate90));
        assert!(matches!(quarter_turn(180.0), FontTransform::Rotate180));
    }

    #[test]
    fn strokes_round_to_whole_pixels() {
        assert_eq!(stroke_px(1.5), 2);
        assert_eq!(stroke_px(1.0), 1);
        assert_eq!(stroke_px(0.3), 1);
        assert_eq!(stroke_px(f64::NAN), 1);
    }
}
