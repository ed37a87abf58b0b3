use num_traits::{FromPrimitive, Num};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width and height of a rectangular area, e.g. the screen in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size<N = f64> {
    width: N,
    height: N,
}

impl<N: Num + FromPrimitive + PartialOrd + Copy> Size<N> {
    /// Creates a new size. Negative values are clamped to zero.
    pub fn new(width: N, height: N) -> Self {
        Self {
            width: if width < N::zero() { N::zero() } else { width },
            height: if height < N::zero() { N::zero() } else { height },
        }
    }

    /// Width.
    pub fn width(&self) -> N {
        self.width
    }

    /// Half of the width.
    pub fn half_width(&self) -> N {
        self.width / (N::one() + N::one())
    }

    /// Height.
    pub fn height(&self) -> N {
        self.height
    }

    /// Half of the height.
    pub fn half_height(&self) -> N {
        self.height / (N::one() + N::one())
    }

    /// Returns true if either of the dimensions is zero.
    pub fn is_zero(&self) -> bool {
        self.width.is_zero() || self.height.is_zero()
    }
}
