//! Floating-point and integer rectangles.
//!
//! A [`Rect`] is either an absolute box in logical pixels or a *delta* box
//! (an offset and size adjustment relative to another box). Which one a
//! value is depends on the producing accessor; delta boxes may carry
//! negative width/height on purpose.

/// A rectangle with `f32` precision.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The axis-aligned bounding box covering both `self` and `other`.
    ///
    /// For identical inputs this returns the same rect.
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Rect {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Applies a delta rect: offsets the origin and adjusts the size.
    ///
    /// This is how the content/shadow delta boxes produced by the style
    /// layer are turned back into absolute boxes.
    pub fn apply_delta(&self, delta: &Rect) -> Rect {
        Rect {
            x: self.x + delta.x,
            y: self.y + delta.y,
            width: self.width + delta.width,
            height: self.height + delta.height,
        }
    }

    /// Scales all four fields uniformly, converting logical units into
    /// output-scaled device units.
    pub fn scale(&mut self, factor: f32) {
        self.x *= factor;
        self.y *= factor;
        self.width *= factor;
        self.height *= factor;
    }

    /// An integer bounding rectangle that fully covers the rect.
    ///
    /// Width and height gain an extra pixel so fractional boxes are never
    /// under-covered by damage or intersection tests.
    pub fn bounds(&self) -> IntRect {
        IntRect {
            x: self.x.floor() as i32,
            y: self.y.floor() as i32,
            width: self.width.ceil() as i32 + 1,
            height: self.height.ceil() as i32 + 1,
        }
    }
}

/// A rectangle with integer precision, used for damage and scissoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// The intersection of two rects, or `None` if they do not overlap.
    pub fn intersection(&self, other: &IntRect) -> Option<IntRect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        if right <= left || bottom <= top {
            return None;
        }
        Some(IntRect {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        })
    }
}
