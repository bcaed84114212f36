#![forbid(unsafe_code)]

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;
pub type Rect = euclid::Rect<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}

pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    euclid::rect(x, y, width, height)
}

/// Shrinks `r` by `amount` on every side, clamping to an empty rect.
pub fn inset(r: Rect, amount: f64) -> Rect {
    let w = (r.size.width - 2.0 * amount).max(0.0);
    let h = (r.size.height - 2.0 * amount).max(0.0);
    rect(r.origin.x + amount, r.origin.y + amount, w, h)
}
