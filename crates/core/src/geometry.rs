//! Screen-space geometry in CSS pixels.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Client bounding rectangle of a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Translation applied to an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        // Normalise -0.0 so the rendered transform never reads "-0px".
        Self { x: x + 0.0, y: y + 0.0 }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// CSS `transform` value for this offset.
    pub fn to_transform(&self) -> String {
        if self.is_zero() {
            "translate(0, 0)".to_string()
        } else {
            format!("translate({}px, {}px)", self.x, self.y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_center_is_midpoint() {
        let rect = Rect::new(10.0, 20.0, 8.0, 16.0);
        assert_eq!(rect.center(), Point::new(14.0, 28.0));
    }

    #[test]
    fn zero_offset_renders_as_plain_translate() {
        assert_eq!(Offset::ZERO.to_transform(), "translate(0, 0)");
        assert_eq!(Offset::new(-0.0, 0.0).to_transform(), "translate(0, 0)");
    }

    #[test]
    fn offset_renders_pixels() {
        assert_eq!(Offset::new(-7.5, 3.0).to_transform(), "translate(-7.5px, 3px)");
        assert_eq!(Offset::new(0.0, -15.0).to_transform(), "translate(0px, -15px)");
    }
}
