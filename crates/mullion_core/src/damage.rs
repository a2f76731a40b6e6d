//! Damage region tracking.

use smallvec::SmallVec;

use crate::rect::IntRect;

/// A set of dirty rectangles in output device coordinates.
///
/// The frame driver accumulates damage here and the decoration renderer
/// scissors every draw to the contained rects. Rects are kept as-is; callers
/// are expected to add rects already clamped to the render target.
#[derive(Clone, Debug, Default)]
pub struct DamageRegion {
    rects: SmallVec<[IntRect; 4]>,
}

impl DamageRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rect to the region. Empty rects are ignored; a rect already
    /// fully contained in an existing one is dropped.
    pub fn add(&mut self, rect: IntRect) {
        if rect.is_empty() {
            return;
        }
        if self
            .rects
            .iter()
            .any(|r| r.intersection(&rect) == Some(rect))
        {
            return;
        }
        self.rects.push(rect);
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn rects(&self) -> impl Iterator<Item = &IntRect> + '_ {
        self.rects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rects_are_ignored() {
        let mut damage = DamageRegion::new();
        damage.add(IntRect::new(0, 0, 0, 10));
        damage.add(IntRect::new(0, 0, 10, -1));
        assert!(damage.is_empty());
    }

    #[test]
    fn contained_rects_are_dropped() {
        let mut damage = DamageRegion::new();
        damage.add(IntRect::new(0, 0, 100, 100));
        damage.add(IntRect::new(10, 10, 20, 20));
        assert_eq!(damage.rects().count(), 1);
    }

    #[test]
    fn overlapping_rects_are_kept() {
        let mut damage = DamageRegion::new();
        damage.add(IntRect::new(0, 0, 100, 100));
        damage.add(IntRect::new(50, 50, 100, 100));
        assert_eq!(damage.rects().count(), 2);
    }
}
