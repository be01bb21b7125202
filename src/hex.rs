use crate::index_width::CoordWidth;
use const_default::ConstDefault;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A [Hex] is an axial `q` and `r` coordinate on a hexagonal grid of
/// radius `R`. The third cube component is derived, never stored.
///
/// `ZERO_BASED` selects the addressing convention shared with
/// [HexMap](crate::HexMap); it changes which labels refer to which
/// physical cell, not which cells exist.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Hex<const R: usize, const ZERO_BASED: bool = true> {
    pub q: i32,
    pub r: i32,
}

impl<const R: usize, const ZERO_BASED: bool> Hex<R, ZERO_BASED> {
    /// The reserved "no coordinate" value, `(-R-1, -R-1)`.
    /// Lies outside the cube-component bound for every radius, so it can
    /// never satisfy [is_valid](Self::is_valid).
    pub const NIL: Self = {
        assert!(R > 0, "the radius should be larger than 0");
        Self {
            q: -(R as i32) - 1,
            r: -(R as i32) - 1,
        }
    };

    pub const fn radius() -> i32 {
        let _ = Self::NIL;
        R as i32
    }

    /// Any representable pair is accepted; out-of-range values are legal
    /// and report as invalid.
    pub const fn new(q: i32, r: i32) -> Self {
        let _ = Self::NIL;
        Self { q, r }
    }

    /// Resets both components to the [NIL](Self::NIL) sentinel.
    pub fn nil(&mut self) {
        *self = Self::NIL;
    }

    pub fn is_nil(&self) -> bool {
        *self == Self::NIL
    }

    /// The derived cube component for this coordinate.
    pub const fn s(&self) -> i32 {
        if ZERO_BASED {
            -self.q - self.r
        } else {
            -self.q - self.r + 2 * Self::radius()
        }
    }

    /// True iff `(q, r)` lies outside the hexagon inscribed in the
    /// `(2R+1) x (2R+1)` backing square, under this convention.
    pub const fn is_invalid_at(q: i32, r: i32) -> bool {
        let _ = Self::NIL;
        // i64 math, so any representable pair stays legal input.
        let radius = R as i64;
        let (q, r) = (q as i64, r as i64);
        if ZERO_BASED {
            q.abs() > radius || r.abs() > radius || (-q - r).abs() > radius
        } else {
            (q - radius).abs() > radius
                || (r - radius).abs() > radius
                || (-q - r + 2 * radius).abs() > radius
        }
    }

    pub const fn is_valid_at(q: i32, r: i32) -> bool {
        !Self::is_invalid_at(q, r)
    }

    pub fn is_invalid(&self) -> bool {
        Self::is_invalid_at(self.q, self.r)
    }

    pub fn is_valid(&self) -> bool {
        Self::is_valid_at(self.q, self.r)
    }

    /// The narrowest signed type that can hold every component label for
    /// this radius, the sentinel included.
    pub const fn coord_width() -> CoordWidth {
        CoordWidth::for_radius(R)
    }
}

impl<const R: usize, const ZERO_BASED: bool> Default for Hex<R, ZERO_BASED> {
    fn default() -> Self {
        Self::NIL
    }
}

impl<const R: usize, const ZERO_BASED: bool> ConstDefault for Hex<R, ZERO_BASED> {
    const DEFAULT: Self = Self::NIL;
}

impl<const R: usize, const ZERO_BASED: bool> fmt::Display for Hex<R, ZERO_BASED> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}>", self.q, self.r)
    }
}
