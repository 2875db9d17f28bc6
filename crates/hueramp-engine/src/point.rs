//! Control points and the per-channel activation model.

use crate::color::{Hsva, Rgba, rgba_to_hsva};

// ── Channel ───────────────────────────────────────────────────────────────

/// One interpolation channel of the HSVA model.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    Hue = 0,
    Sat = 1,
    Val = 2,
    Alpha = 3,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Hue, Channel::Sat, Channel::Val, Channel::Alpha];

    /// Single-letter form used by the gradient file format.
    pub fn letter(self) -> char {
        match self {
            Channel::Hue => 'h',
            Channel::Sat => 's',
            Channel::Val => 'v',
            Channel::Alpha => 'a',
        }
    }

    pub fn from_letter(c: char) -> Option<Channel> {
        Some(match c {
            'h' => Channel::Hue,
            's' => Channel::Sat,
            'v' => Channel::Val,
            'a' => Channel::Alpha,
            _ => return None,
        })
    }

    /// Reads this channel's component out of a color.
    #[inline]
    pub fn of(self, color: Hsva) -> f32 {
        match self {
            Channel::Hue => color.h,
            Channel::Sat => color.s,
            Channel::Val => color.v,
            Channel::Alpha => color.a,
        }
    }

    /// Writes this channel's component into a color.
    #[inline]
    pub fn write(self, color: &mut Hsva, value: f32) {
        match self {
            Channel::Hue => color.h = value,
            Channel::Sat => color.s = value,
            Channel::Val => color.v = value,
            Channel::Alpha => color.a = value,
        }
    }
}

// ── ChannelSet ────────────────────────────────────────────────────────────

/// A set of channels, compared as a set (order-free).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct ChannelSet(u8);

impl ChannelSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(0b1111);

    /// The hue/saturation/value triple, without alpha.
    pub const HSV: Self = Self(0b0111);

    #[inline]
    fn bit(ch: Channel) -> u8 {
        1 << ch as u8
    }

    pub fn of(channels: &[Channel]) -> Self {
        let mut set = Self::EMPTY;
        for &ch in channels {
            set.insert(ch);
        }
        set
    }

    #[inline]
    pub fn contains(self, ch: Channel) -> bool {
        self.0 & Self::bit(ch) != 0
    }

    #[inline]
    pub fn insert(&mut self, ch: Channel) {
        self.0 |= Self::bit(ch);
    }

    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Channel> {
        Channel::ALL.into_iter().filter(move |&ch| self.contains(ch))
    }

    /// Letter form for the file format, always in `hsva` order.
    pub fn to_letters(self) -> String {
        self.iter().map(Channel::letter).collect()
    }

    /// Parses a letter string; `None` on any unknown letter.
    pub fn from_letters(s: &str) -> Option<Self> {
        let mut set = Self::EMPTY;
        for c in s.chars() {
            set.insert(Channel::from_letter(c)?);
        }
        Some(set)
    }
}

impl From<Channel> for ChannelSet {
    fn from(ch: Channel) -> Self {
        Self(Self::bit(ch))
    }
}

// ── ColorPoint ────────────────────────────────────────────────────────────

/// A user-placed anchor: a position in [0, 1], a color stored canonically
/// as HSVA, and the set of channels it participates in.
///
/// Fixed points are the two gradient boundaries; their position never
/// changes and they cannot be removed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorPoint {
    position: f32,
    color: Hsva,
    fixed: bool,
    active: ChannelSet,
}

impl ColorPoint {
    pub fn new(position: f32, color: Hsva, active: ChannelSet) -> Self {
        Self {
            position: position.clamp(0.0, 1.0),
            color,
            fixed: false,
            active,
        }
    }

    /// An immovable boundary point, active on every channel.
    pub(crate) fn boundary(position: f32, color: Hsva) -> Self {
        Self {
            position: position.clamp(0.0, 1.0),
            color,
            fixed: true,
            active: ChannelSet::ALL,
        }
    }

    /// Reconstruction from persisted fields.
    pub(crate) fn from_parts(position: f32, color: Hsva, fixed: bool, active: ChannelSet) -> Self {
        Self {
            position: position.clamp(0.0, 1.0),
            color,
            fixed,
            active,
        }
    }

    #[inline]
    pub fn position(&self) -> f32 {
        self.position
    }

    #[inline]
    pub fn color(&self) -> Hsva {
        self.color
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    #[inline]
    pub fn active(&self) -> ChannelSet {
        self.active
    }

    /// Clamps into [0, 1]; silent no-op on a fixed point.
    pub fn set_position(&mut self, position: f32) {
        if self.fixed {
            return;
        }
        self.position = position.clamp(0.0, 1.0);
    }

    /// Adds channels to the active set. Activation is monotonic — channels
    /// are never deactivated.
    pub fn activate(&mut self, channels: ChannelSet) {
        self.active = self.active.union(channels);
    }

    /// Direct HSVA assignment. Does not touch the active set.
    pub fn set_hsva(&mut self, color: Hsva) {
        self.color = color;
    }

    /// RGBA assignment: converts through the color space and marks the
    /// H, S, and V channels active (an RGB edit touches all three).
    pub fn set_rgba(&mut self, color: Rgba) {
        self.color = rgba_to_hsva(color);
        self.activate(ChannelSet::HSV);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── ChannelSet ────────────────────────────────────────────────────────

    #[test]
    fn letters_round_trip() {
        for set in [ChannelSet::ALL, ChannelSet::HSV, ChannelSet::from(Channel::Alpha)] {
            assert_eq!(ChannelSet::from_letters(&set.to_letters()), Some(set));
        }
    }

    #[test]
    fn letters_compare_as_sets() {
        assert_eq!(ChannelSet::from_letters("avsh"), Some(ChannelSet::ALL));
    }

    #[test]
    fn unknown_letter_rejected() {
        assert_eq!(ChannelSet::from_letters("hx"), None);
    }

    #[test]
    fn union_and_contains() {
        let set = ChannelSet::from(Channel::Hue).union(Channel::Alpha.into());
        assert!(set.contains(Channel::Hue));
        assert!(set.contains(Channel::Alpha));
        assert!(!set.contains(Channel::Val));
    }

    // ── ColorPoint ────────────────────────────────────────────────────────

    #[test]
    fn position_clamped_on_construction() {
        let p = ColorPoint::new(1.5, Hsva::default(), ChannelSet::ALL);
        assert_eq!(p.position(), 1.0);
        let p = ColorPoint::new(-0.5, Hsva::default(), ChannelSet::ALL);
        assert_eq!(p.position(), 0.0);
    }

    #[test]
    fn set_position_clamps() {
        let mut p = ColorPoint::new(0.5, Hsva::default(), ChannelSet::ALL);
        p.set_position(2.0);
        assert_eq!(p.position(), 1.0);
    }

    #[test]
    fn fixed_point_never_moves() {
        let mut p = ColorPoint::boundary(0.0, Hsva::default());
        p.set_position(0.5);
        assert_eq!(p.position(), 0.0);
    }

    #[test]
    fn boundary_active_on_all_channels() {
        let p = ColorPoint::boundary(1.0, Hsva::default());
        assert_eq!(p.active(), ChannelSet::ALL);
    }

    #[test]
    fn activation_is_monotonic() {
        let mut p = ColorPoint::new(0.5, Hsva::default(), Channel::Hue.into());
        p.activate(Channel::Alpha.into());
        assert!(p.active().contains(Channel::Hue));
        assert!(p.active().contains(Channel::Alpha));
    }

    #[test]
    fn rgba_assignment_activates_hsv() {
        let mut p = ColorPoint::new(0.5, Hsva::default(), Channel::Alpha.into());
        p.set_rgba(Rgba::new(1.0, 0.4, 0.0, 0.5));
        assert!(p.active().contains(Channel::Hue));
        assert!(p.active().contains(Channel::Sat));
        assert!(p.active().contains(Channel::Val));
        // Alpha was already active; RGBA assignment adds, never removes.
        assert!(p.active().contains(Channel::Alpha));
        assert_eq!(p.color().a, 0.5);
    }

    #[test]
    fn hsva_assignment_leaves_activation_alone() {
        let mut p = ColorPoint::new(0.5, Hsva::default(), Channel::Alpha.into());
        p.set_hsva(Hsva::new(0.1, 0.2, 0.3, 0.4));
        assert_eq!(p.active(), ChannelSet::from(Channel::Alpha));
        assert_eq!(p.color(), Hsva::new(0.1, 0.2, 0.3, 0.4));
    }
}
