use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Invalidation bits accumulated between an update request and the pass that
/// consumes them. A pass resets the set to [`ChangeFlags::NONE`] exactly once.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeFlags(u8);

impl ChangeFlags {
    /// Quiescent baseline; nothing to do.
    pub const NONE: Self = Self(0);
    /// Regenerate points, assign default axes, re-register series.
    pub const CREATE: Self = Self(1);
    /// Recompute per-series value extents.
    pub const UPDATE_RANGE: Self = Self(2);
    /// Recompute axis pixel geometry.
    pub const LAYOUT: Self = Self(4);
    /// Repaint (full on first layout, incremental afterwards).
    pub const RENDER: Self = Self(8);
    pub const ALL: Self = Self(1 | 2 | 4 | 8);

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Consume the accumulated flags, leaving the quiescent baseline behind.
    #[inline]
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl BitOr for ChangeFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ChangeFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for ChangeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "None");
        }
        let mut first = true;
        for (bit, name) in [
            (Self::CREATE, "Create"),
            (Self::UPDATE_RANGE, "UpdateRange"),
            (Self::LAYOUT, "Layout"),
            (Self::RENDER, "Render"),
        ] {
            if self.contains(bit) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}
