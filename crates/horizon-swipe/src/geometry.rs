//! Geometry and color values for swipe layouts.
//!
//! Layout output is expressed in these types, in row-local coordinates with
//! the origin at the row's top-left corner. Hosts convert them to their own
//! toolkit types when painting.

use bytemuck::{Pod, Zeroable};

/// A position in row coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The row origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// As a glam vector, for delta arithmetic.
    #[inline]
    pub fn to_vec2(self) -> glam::Vec2 {
        glam::Vec2::new(self.x, self.y)
    }
}

impl From<glam::Vec2> for Point {
    fn from(v: glam::Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Width and height of a row or button.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// No extent. Rows start with this size until the host sets one.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Whether either dimension is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a rectangle from its top-left corner and extent.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Midpoint, e.g. where a host would draw a button's title.
    pub fn center(&self) -> Point {
        Point::new(
            self.left() + self.width() * 0.5,
            self.top() + self.height() * 0.5,
        )
    }

    /// Whether the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Hit test. Right and bottom edges are exclusive, so adjacent buttons
    /// never both claim a point.
    pub fn contains(&self, point: Point) -> bool {
        (self.left()..self.right()).contains(&point.x)
            && (self.top()..self.bottom()).contains(&point.y)
    }

    /// The overlapping part of two rectangles, if they overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());
        (left < right && top < bottom).then(|| Rect::new(left, top, right - left, bottom - top))
    }

    /// Interpolate every edge toward `to`; `t` is not clamped.
    pub fn lerp(self, to: Rect, t: f32) -> Rect {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Rect::new(
            mix(self.left(), to.left()),
            mix(self.top(), to.top()),
            mix(self.width(), to.width()),
            mix(self.height(), to.height()),
        )
    }
}

/// Space between a button's edges and its title.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    /// Create insets from individual edges.
    #[inline]
    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Padding on the leading and trailing sides only.
    #[inline]
    pub const fn horizontal(inset: f32) -> Self {
        Self::new(0.0, inset, 0.0, inset)
    }

    /// Width taken by the left and right insets together.
    #[inline]
    pub fn horizontal_total(&self) -> f32 {
        self.left + self.right
    }
}

/// An RGBA color, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// The same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::from_rgb(1.0, 0.0, 0.0);
    pub const GRAY: Self = Self::from_rgb(0.5, 0.5, 0.5);
    pub const LIGHT_GRAY: Self = Self::from_rgb(0.75, 0.75, 0.75);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_rects_do_not_share_points() {
        let delete = Rect::new(200.0, 0.0, 60.0, 44.0);
        let more = Rect::new(260.0, 0.0, 60.0, 44.0);
        let edge = Point::new(260.0, 10.0);
        assert!(!delete.contains(edge));
        assert!(more.contains(edge));
    }

    #[test]
    fn test_intersect() {
        let row = Rect::new(0.0, 0.0, 320.0, 44.0);
        let button = Rect::new(300.0, 0.0, 60.0, 44.0);
        assert_eq!(row.intersect(&button), Some(Rect::new(300.0, 0.0, 20.0, 44.0)));
        assert_eq!(row.intersect(&Rect::new(320.0, 0.0, 10.0, 44.0)), None);
    }

    #[test]
    fn test_lerp_reaches_target() {
        let button = Rect::new(260.0, 0.0, 60.0, 44.0);
        let revealed = Rect::new(140.0, 0.0, 180.0, 44.0);
        assert_eq!(button.lerp(revealed, 0.0), button);
        assert_eq!(button.lerp(revealed, 1.0), revealed);
        assert_eq!(button.lerp(revealed, 0.5).width(), 120.0);
    }

    #[test]
    fn test_point_vec2_conversion() {
        let delta = Point::new(280.0, 21.0).to_vec2() - Point::new(300.0, 20.0).to_vec2();
        assert_eq!(Point::from(delta), Point::new(-20.0, 1.0));
    }

    #[test]
    fn test_color_alpha() {
        assert_eq!(Color::RED.with_alpha(0.5).a, 0.5);
        assert_eq!(Color::TRANSPARENT.a, 0.0);
        assert_eq!(EdgeInsets::horizontal(15.0).horizontal_total(), 30.0);
    }
}
