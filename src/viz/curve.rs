//! Monotone cubic interpolation along x.
//!
//! Tangents follow the Steffen/Fritsch–Carlson style limiter: the curve never
//! overshoots between two samples, so a temperature line does not invent
//! peaks the data does not have.

/// One cubic Bézier segment: start, two control points, end.
pub type Cubic = [(f64, f64); 4];

fn sign(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

fn secant(a: (f64, f64), b: (f64, f64)) -> f64 {
    let h = b.0 - a.0;
    if h == 0.0 { 0.0 } else { (b.1 - a.1) / h }
}

/// Tangent at an interior point `b` given its neighbours.
fn interior_tangent(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    let h0 = b.0 - a.0;
    let h1 = c.0 - b.0;
    let s0 = secant(a, b);
    let s1 = secant(b, c);
    let p = if h0 + h1 == 0.0 { 0.0 } else { (s0 * h1 + s1 * h0) / (h0 + h1) };
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_finite() { t } else { 0.0 }
}

/// Tangent at an end point from the one-sided secant and the neighbour's tangent.
fn end_tangent(a: (f64, f64), b: (f64, f64), neighbour: f64) -> f64 {
    let h = b.0 - a.0;
    if h == 0.0 {
        neighbour
    } else {
        (3.0 * (b.1 - a.1) / h - neighbour) / 2.0
    }
}

/// Cubic segments through `points` (assumed sorted by x).
pub fn monotone_x(points: &[(f64, f64)]) -> Vec<Cubic> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    if n == 2 {
        let (a, b) = (points[0], points[1]);
        let third = |p: f64, q: f64, k: f64| p + (q - p) * k;
        return vec![[
            a,
            (third(a.0, b.0, 1.0 / 3.0), third(a.1, b.1, 1.0 / 3.0)),
            (third(a.0, b.0, 2.0 / 3.0), third(a.1, b.1, 2.0 / 3.0)),
            b,
        ]];
    }

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = interior_tangent(points[i - 1], points[i], points[i + 1]);
    }
    tangents[0] = end_tangent(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_tangent(points[n - 2], points[n - 1], tangents[n - 2]);

    points
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            let (p0, p1) = (w[0], w[1]);
            let dx = (p1.0 - p0.0) / 3.0;
            [
                p0,
                (p0.0 + dx, p0.1 + dx * tangents[i]),
                (p1.0 - dx, p1.1 - dx * tangents[i + 1]),
                p1,
            ]
        })
        .collect()
}

fn bezier_at(c: &Cubic, t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let (a, b, cc, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    (
        a * c[0].0 + b * c[1].0 + cc * c[2].0 + d * c[3].0,
        a * c[0].1 + b * c[1].1 + cc * c[2].1 + d * c[3].1,
    )
}

/// Polyline approximation of a monotone curve through `points`,
/// `steps` samples per segment.
pub fn flatten(points: &[(f64, f64)], steps: usize) -> Vec<(f64, f64)> {
    let segments = monotone_x(points);
    if segments.is_empty() {
        return points.to_vec();
    }
    let steps = steps.max(1);
    let mut out = Vec::with_capacity(segments.len() * steps + 1);
    out.push(segments[0][0]);
    for seg in &segments {
        for k in 1..=steps {
            out.push(bezier_at(seg, k as f64 / steps as f64));
        }
    }
    out
}
