//! The per-element style: current property values plus their transitions.

use std::time::Duration;

use mullion_core::Rect;

use crate::props::{Edge, ScalarProperty, VectorProperty, SLOT_COUNT};
use crate::transition::{Easing, Transition};

/// All stylable properties of one decorated element.
///
/// Properties are stored in a fixed-layout float array so the animation
/// stepper can iterate them uniformly; they must be read and written through
/// the typed accessors. A style is embedded by value in each decorated
/// element and copied, never shared, on inheritance.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    props: [f32; SLOT_COUNT],
    transitions: [Transition; SLOT_COUNT],
}

impl Style {
    /// A style with every slot unset (-1.0) and every transition zeroed.
    pub fn new() -> Self {
        Self {
            props: [-1.0; SLOT_COUNT],
            transitions: [Transition::default(); SLOT_COUNT],
        }
    }

    /// Copies the current displayed values from `from`. In-flight
    /// transitions are deliberately not inherited.
    pub fn inherit(&mut self, from: &Style) {
        self.props = from.props;
    }

    /// The current displayed value of a scalar property.
    pub fn scalar(&self, prop: ScalarProperty) -> f32 {
        self.props[prop.slot()]
    }

    /// The current displayed components of a vector property.
    ///
    /// The returned view borrows the style's internal storage; it is valid
    /// until the next mutation of the style.
    pub fn vector4(&self, prop: VectorProperty) -> &[f32; 4] {
        let slot = prop.slot();
        // Slot layout guarantees four contiguous entries per vector property.
        self.props[slot..slot + 4]
            .try_into()
            .expect("vector property spans 4 slots")
    }

    /// Stages a scalar property's transition target. The displayed value
    /// changes only when [`Style::animate`] runs; with the default
    /// zero-duration transition that change is immediate.
    pub fn set_scalar(&mut self, prop: ScalarProperty, value: f32) {
        self.transitions[prop.slot()].to = value;
    }

    /// Stages all four transition targets of a vector property.
    pub fn set_vector4(&mut self, prop: VectorProperty, value: [f32; 4]) {
        let slot = prop.slot();
        for (transition, component) in self.transitions[slot..slot + 4].iter_mut().zip(value) {
            transition.to = component;
        }
    }

    /// Opens an animated transition for a scalar property, starting from the
    /// currently displayed value.
    pub fn transition_scalar(
        &mut self,
        prop: ScalarProperty,
        value: f32,
        begin: Duration,
        end: Duration,
        easing: Easing,
    ) {
        let slot = prop.slot();
        self.transitions[slot] = Transition {
            from: self.props[slot],
            to: value,
            begin,
            end,
            easing,
        };
    }

    /// Opens animated transitions for all four components of a vector
    /// property, starting from the currently displayed values.
    pub fn transition_vector4(
        &mut self,
        prop: VectorProperty,
        value: [f32; 4],
        begin: Duration,
        end: Duration,
        easing: Easing,
    ) {
        let slot = prop.slot();
        for (i, component) in value.into_iter().enumerate() {
            self.transitions[slot + i] = Transition {
                from: self.props[slot + i],
                to: component,
                begin,
                end,
                easing,
            };
        }
    }

    /// Direct access to one slot's transition, for callers that stage
    /// windows per component.
    pub fn transition_mut(&mut self, slot: usize) -> &mut Transition {
        &mut self.transitions[slot]
    }

    /// Advances every transition to `when` and writes the resulting values
    /// into the property array. Returns true once all transitions have
    /// ended.
    ///
    /// Slots whose window has passed snap exactly to their target,
    /// independent of accumulated float error. Timestamps must be
    /// monotonically non-decreasing per style.
    pub fn animate(&mut self, when: Duration) -> bool {
        let mut finished = true;
        for (prop, transition) in self.props.iter_mut().zip(&self.transitions) {
            *prop = transition.sample(when);
            if transition.is_active(when) && transition.end > transition.begin {
                finished = false;
            }
        }
        finished
    }

    /// The content box as a delta against the border box: offset by the
    /// top/left padding and border width, shrunk by the summed padding and
    /// border widths. Width and height are negative on purpose.
    pub fn content_box(&self) -> Rect {
        let padding = self.vector4(VectorProperty::Padding);
        let border = self.vector4(VectorProperty::BorderWidth);
        Rect {
            x: padding[Edge::Left as usize] + border[Edge::Left as usize],
            y: padding[Edge::Top as usize] + border[Edge::Top as usize],
            width: 0.0
                - padding[Edge::Left as usize]
                - padding[Edge::Right as usize]
                - border[Edge::Left as usize]
                - border[Edge::Right as usize],
            height: 0.0
                - padding[Edge::Top as usize]
                - padding[Edge::Bottom as usize]
                - border[Edge::Top as usize]
                - border[Edge::Bottom as usize],
        }
    }

    /// The shadow box as a delta against the border box, expanded by
    /// blur + spread around the shadow offset.
    pub fn shadow_box(&self) -> Rect {
        let blur = self.scalar(ScalarProperty::ShadowBlur);
        let spread = self.scalar(ScalarProperty::ShadowSpread);
        let offset_h = self.scalar(ScalarProperty::ShadowHOffset);
        let offset_v = self.scalar(ScalarProperty::ShadowVOffset);
        let size = blur + spread;
        Rect {
            x: offset_h - size,
            y: offset_v - size,
            width: 2.0 * size,
            height: 2.0 * size,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: Duration = Duration::ZERO;

    #[test]
    fn new_style_is_unset() {
        let style = Style::new();
        for prop in [
            VectorProperty::BorderWidth,
            VectorProperty::Padding,
            VectorProperty::ShadowColor,
        ] {
            assert_eq!(style.vector4(prop), &[-1.0; 4]);
        }
        assert_eq!(style.scalar(ScalarProperty::Opacity), -1.0);
        for slot in 0..SLOT_COUNT {
            let mut style = style.clone();
            assert_eq!(*style.transition_mut(slot), Transition::default());
        }
    }

    #[test]
    fn inherit_copies_values_not_transitions() {
        let mut parent = Style::new();
        parent.set_scalar(ScalarProperty::Opacity, 0.5);
        parent.animate(T0);

        let mut child = Style::new();
        child.transition_scalar(
            ScalarProperty::TranslationY,
            100.0,
            Duration::from_secs(1),
            Duration::from_secs(2),
            Easing::EaseOut,
        );
        let staged = *child.transition_mut(ScalarProperty::TranslationY.slot());

        child.inherit(&parent);
        assert_eq!(child.scalar(ScalarProperty::Opacity), 0.5);
        assert_eq!(
            *child.transition_mut(ScalarProperty::TranslationY.slot()),
            staged
        );
    }

    #[test]
    fn set_scalar_changes_value_only_after_animate() {
        let mut style = Style::new();
        style.set_scalar(ScalarProperty::ShadowBlur, 20.0);
        assert_eq!(style.scalar(ScalarProperty::ShadowBlur), -1.0);
        assert!(style.animate(T0));
        assert_eq!(style.scalar(ScalarProperty::ShadowBlur), 20.0);
    }

    #[test]
    fn vector4_round_trip_is_exact() {
        let mut style = Style::new();
        let value = [0.1, 0.2, 0.3, 0.4];
        style.set_vector4(VectorProperty::BorderColor, value);
        style.animate(Duration::from_secs(5));
        assert_eq!(style.vector4(VectorProperty::BorderColor), &value);
    }

    #[test]
    fn terminal_snap_is_exact_for_every_easing() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            let mut style = Style::new();
            style.transition_scalar(
                ScalarProperty::TranslationX,
                123.456,
                Duration::from_millis(100),
                Duration::from_millis(400),
                easing,
            );
            style.animate(Duration::from_millis(400));
            assert_eq!(style.scalar(ScalarProperty::TranslationX), 123.456);
        }
    }

    #[test]
    fn animate_reports_active_transitions() {
        let mut style = Style::new();
        style.transition_scalar(
            ScalarProperty::TranslationY,
            100.0,
            Duration::from_secs(1),
            Duration::from_secs(3),
            Easing::Linear,
        );
        assert!(!style.animate(Duration::from_secs(2)));
        // Halfway from the unset sentinel (-1.0) to 100.0.
        assert_eq!(style.scalar(ScalarProperty::TranslationY), 49.5);
    }

    #[test]
    fn animate_interpolates_midway() {
        let mut style = Style::new();
        style.set_scalar(ScalarProperty::TranslationY, 0.0);
        style.animate(T0);
        style.transition_scalar(
            ScalarProperty::TranslationY,
            100.0,
            Duration::from_secs(1),
            Duration::from_secs(3),
            Easing::Linear,
        );
        style.animate(Duration::from_secs(2));
        assert_eq!(style.scalar(ScalarProperty::TranslationY), 50.0);
    }

    #[test]
    fn animate_is_idempotent_once_finished() {
        let mut style = Style::new();
        style.transition_scalar(
            ScalarProperty::Rotation,
            1.5,
            T0,
            Duration::from_secs(1),
            Easing::EaseInOut,
        );
        assert!(style.animate(Duration::from_secs(2)));
        let snapshot = style.clone();
        assert!(style.animate(Duration::from_secs(3)));
        assert!(style.animate(Duration::from_secs(4)));
        assert_eq!(style, snapshot);
    }

    #[test]
    fn all_finished_iff_every_window_has_passed() {
        let mut style = Style::new();
        style.transition_scalar(
            ScalarProperty::TranslationX,
            10.0,
            T0,
            Duration::from_secs(1),
            Easing::Linear,
        );
        style.transition_scalar(
            ScalarProperty::TranslationY,
            10.0,
            T0,
            Duration::from_secs(4),
            Easing::Linear,
        );
        assert!(!style.animate(Duration::from_secs(2)));
        assert!(style.animate(Duration::from_secs(4)));
    }

    #[test]
    fn zero_duration_transition_is_finished_and_snapped() {
        let mut style = Style::new();
        let slot = ScalarProperty::Opacity.slot();
        *style.transition_mut(slot) = Transition {
            from: 0.0,
            to: 1.0,
            begin: Duration::from_secs(5),
            end: Duration::from_secs(5),
            easing: Easing::Linear,
        };
        // Stepped before the window opens: still an instant snap, still
        // finished, and no NaN from the zero-length window.
        assert!(style.animate(Duration::from_secs(1)));
        assert_eq!(style.scalar(ScalarProperty::Opacity), 1.0);
    }

    #[test]
    fn content_box_sums_padding_and_border() {
        let mut style = Style::new();
        style.set_vector4(VectorProperty::Padding, [5.0; 4]);
        style.set_vector4(VectorProperty::BorderWidth, [2.0; 4]);
        style.animate(T0);
        // Padding 5 + border 2 on each of two opposing edges: -14 per axis.
        assert_eq!(style.content_box(), Rect::new(7.0, 7.0, -14.0, -14.0));
    }

    #[test]
    fn shadow_box_expands_around_offset() {
        let mut style = Style::new();
        style.set_scalar(ScalarProperty::ShadowBlur, 20.0);
        style.set_scalar(ScalarProperty::ShadowSpread, 0.0);
        style.set_scalar(ScalarProperty::ShadowHOffset, 0.0);
        style.set_scalar(ScalarProperty::ShadowVOffset, 10.0);
        style.animate(T0);
        assert_eq!(style.shadow_box(), Rect::new(-20.0, -10.0, 40.0, 40.0));
    }
}
