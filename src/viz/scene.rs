//! Backend-neutral drawing list produced by the charts.
//!
//! Coordinates are canvas pixels with the origin at the top-left corner of
//! the whole chart (margins already applied). Painters (plotters SVG, egui)
//! only walk the list; they never look at data or scales.

use crate::models::{Series, Visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const STEELBLUE: Rgb = Rgb(70, 130, 180);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const TOOLTIP_BORDER: Rgb = Rgb(221, 221, 221);

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Path {
        points: Vec<(f64, f64)>,
        color: Rgb,
        width: f64,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: Rgb,
        stroke: Option<Rgb>,
        opacity: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Rgb,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        size: f64,
        anchor: Anchor,
        /// Degrees, clockwise; `-90` reads bottom to top.
        rotation: f64,
        bold: bool,
        color: Rgb,
    },
}

impl Primitive {
    /// Shapes with a NaN/infinite coordinate are skipped by painters.
    pub fn is_finite(&self) -> bool {
        match self {
            Primitive::Path { points, .. } => {
                points.iter().all(|(x, y)| x.is_finite() && y.is_finite())
            }
            Primitive::Rect { x, y, w, h, .. } => {
                x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()
            }
            Primitive::Circle { cx, cy, r, .. } => {
                cx.is_finite() && cy.is_finite() && r.is_finite()
            }
            Primitive::Text { x, y, .. } => x.is_finite() && y.is_finite(),
        }
    }
}

/// Which part of a chart an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Axis,
    Decoration,
    Series(Series),
    Overlay,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub layer: Layer,
    pub primitive: Primitive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, layer: Layer, primitive: Primitive) {
        self.elements.push(Element { layer, primitive });
    }

    /// Elements a painter should draw under `visibility`.
    pub fn visible<'a>(&'a self, visibility: &'a Visibility) -> impl Iterator<Item = &'a Element> {
        self.elements.iter().filter(move |e| {
            let shown = match e.layer {
                Layer::Series(s) => visibility.is_visible(s),
                _ => true,
            };
            shown && e.primitive.is_finite()
        })
    }

    /// Number of elements in `layer`, regardless of visibility.
    pub fn count(&self, layer: Layer) -> usize {
        self.elements.iter().filter(|e| e.layer == layer).count()
    }
}

/// Shorthand for a plain, unrotated label.
pub fn label(x: f64, y: f64, text: impl Into<String>, size: f64, anchor: Anchor) -> Primitive {
    Primitive::Text {
        x,
        y,
        text: text.into(),
        size,
        anchor,
        rotation: 0.0,
        bold: false,
        color: BLACK,
    }
}
