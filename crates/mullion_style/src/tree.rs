//! Animation propagation over the layout tree.
//!
//! The layout tree itself is owned by the compositor; this module only
//! needs enough of it to step every decorated node once per frame. The
//! [`AnimateTree`] trait is that surface: id-addressed nodes with a
//! children list, a content-leaf test, style access and a damage callback.

use std::time::Duration;

use smallvec::SmallVec;
use tracing::trace;

use crate::style::Style;

/// The slice of the compositor's layout tree the animation stepper needs.
pub trait AnimateTree {
    type NodeId: Copy;

    /// Children of a node, in layout order.
    fn children(&self, node: Self::NodeId) -> &[Self::NodeId];

    /// Whether the node is its own rendered content boundary (a view-backed
    /// leaf). Animation does not descend into content leaves.
    fn is_content_leaf(&self, node: Self::NodeId) -> bool;

    fn style(&self, node: Self::NodeId) -> &Style;

    /// Commits a stepped style to the node.
    fn set_style(&mut self, node: Self::NodeId, style: Style);

    /// Marks the node's current box as damaged. Called twice for a node
    /// whose style changed: once before the commit (old box) and once after
    /// (new box), because animated translation or size dirties both ends.
    fn damage(&mut self, node: Self::NodeId);
}

/// Steps every animated node reachable from `roots` to timestamp `when`.
///
/// When a refresh interval is given, the timestamp is quantized down to its
/// nearest multiple first, so sub-frame time deltas cannot jitter the
/// animation. Returns true once no visited node has an active transition.
pub fn animate_tree<T: AnimateTree>(
    tree: &mut T,
    roots: &[T::NodeId],
    when: Duration,
    refresh: Option<Duration>,
) -> bool {
    let when = match refresh {
        Some(interval) if !interval.is_zero() => {
            let nanos = when.as_nanos() / interval.as_nanos() * interval.as_nanos();
            // Quantization only ever rounds down, so u64 still fits.
            Duration::from_nanos(nanos as u64)
        }
        _ => when,
    };

    let mut finished = true;
    // Container nesting depth is caller-controlled; walk with an explicit
    // work list instead of recursing.
    let mut work: SmallVec<[T::NodeId; 16]> = SmallVec::from_slice(roots);
    while let Some(node) = work.pop() {
        let mut style = tree.style(node).clone();
        let node_finished = style.animate(when);
        if !node_finished {
            finished = false;
        }
        // A finished step can still change displayed values: the terminal
        // snap of an ending transition, or a staged zero-duration set. Those
        // frames need repainting too, so damage on any difference.
        if !node_finished || style != *tree.style(node) {
            trace!("node restyled at {:?}", when);
            tree.damage(node);
            tree.set_style(node, style);
            tree.damage(node);
        }
        if !tree.is_content_leaf(node) {
            work.extend_from_slice(tree.children(node));
        }
    }
    finished
}
