use crate::grid_access::{GridAccessor2D, GridIterator2D, Index2D, SquareGridIterator};
use crate::hex::Hex;
use crate::index_width::IndexWidth;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum HexMapError {
    #[error("coordinate <{q} {r}> maps outside the backing array")]
    OutOfBounds { q: i32, r: i32 },
}

/// A [HexMap] embeds the hexagon of radius `R` in a dense row-major
/// `(2R+1) x (2R+1)` backing array. Cells outside the inscribed hexagon
/// are addressable storage but carry no logical meaning; they keep their
/// default value unless written through the raw accessors.
///
/// `ZERO_BASED` picks the addressing convention. Zero-based stores
/// `(q, r)` at row `r`, column `q`; center-based stores at row `r + R`,
/// column `q + max(R, r)`. Both label the same physical layout.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HexMap<T, const R: usize, const ZERO_BASED: bool = true> {
    data: Vec<T>,
}

impl<T, const R: usize, const ZERO_BASED: bool> HexMap<T, R, ZERO_BASED> {
    const ASSERT_RADIUS: () = assert!(R > 0, "the radius should be larger than 0");

    pub const fn radius() -> usize {
        R
    }

    pub const fn width() -> usize {
        2 * R + 1
    }

    pub const fn height() -> usize {
        2 * R + 1
    }

    pub const fn size() -> usize {
        Self::width() * Self::height()
    }

    /// The narrowest unsigned type that can index the backing array.
    pub const fn index_width() -> IndexWidth {
        IndexWidth::for_size(Self::size())
    }

    /// Translates a logical coordinate to its backing-array offset, or
    /// rejects it if the mapping leaves the `(2R+1) x (2R+1)` square.
    fn index_of(q: i32, r: i32) -> Result<usize, HexMapError> {
        // i64 math, so extreme inputs reject instead of wrapping.
        let radius = R as i64;
        let (row, col) = if ZERO_BASED {
            (r as i64, q as i64)
        } else {
            (r as i64 + radius, q as i64 + radius.max(r as i64))
        };

        let side = Self::width() as i64;
        if row < 0 || row >= side || col < 0 || col >= side {
            trace!(
                "<{} {}> maps to ({}, {}) outside the {}x{} backing array",
                q,
                r,
                row,
                col,
                side,
                side
            );
            return Err(HexMapError::OutOfBounds { q, r });
        }

        Ok(row as usize * Self::width() + col as usize)
    }

    pub fn at(&self, q: i32, r: i32) -> Result<&T, HexMapError> {
        let index = Self::index_of(q, r)?;
        Ok(&self.data[index])
    }

    pub fn at_mut(&mut self, q: i32, r: i32) -> Result<&mut T, HexMapError> {
        let index = Self::index_of(q, r)?;
        Ok(&mut self.data[index])
    }

    /// Forwards to [at](Self::at) on the coordinate's fields, whether or
    /// not the coordinate reports valid.
    pub fn at_hex(&self, hex: &Hex<R, ZERO_BASED>) -> Result<&T, HexMapError> {
        self.at(hex.q, hex.r)
    }

    pub fn at_hex_mut(&mut self, hex: &Hex<R, ZERO_BASED>) -> Result<&mut T, HexMapError> {
        self.at_mut(hex.q, hex.r)
    }

    /// The contiguous backing storage, row-major: `height` rows of
    /// `width` cells each.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Clone + Default, const R: usize, const ZERO_BASED: bool> HexMap<T, R, ZERO_BASED> {
    pub fn new() -> Self {
        let _ = Self::ASSERT_RADIUS;
        Self {
            data: vec![T::default(); Self::size()],
        }
    }
}

impl<T: Clone + Default, const R: usize, const ZERO_BASED: bool> Default
    for HexMap<T, R, ZERO_BASED>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const R: usize, const ZERO_BASED: bool> Index<Hex<R, ZERO_BASED>>
    for HexMap<T, R, ZERO_BASED>
{
    type Output = T;

    /// Panics if the coordinate maps outside the backing array; use
    /// [at_hex](Self::at_hex) for the fallible form.
    fn index(&self, hex: Hex<R, ZERO_BASED>) -> &T {
        match self.at_hex(&hex) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T, const R: usize, const ZERO_BASED: bool> IndexMut<Hex<R, ZERO_BASED>>
    for HexMap<T, R, ZERO_BASED>
{
    fn index_mut(&mut self, hex: Hex<R, ZERO_BASED>) -> &mut T {
        match self.at_hex_mut(&hex) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T: Copy, const R: usize, const ZERO_BASED: bool> GridAccessor2D<T>
    for HexMap<T, R, ZERO_BASED>
{
    fn get(&self, coords: Index2D) -> T {
        self.data[coords.y * Self::width() + coords.x]
    }

    fn get_mut(&mut self, coords: Index2D) -> &mut T {
        &mut self.data[coords.y * Self::width() + coords.x]
    }
}

impl<T, const R: usize, const ZERO_BASED: bool> SquareGridIterator for HexMap<T, R, ZERO_BASED> {
    fn iter_grid(&self) -> GridIterator2D {
        GridIterator2D::new(Self::width(), Self::height())
    }
}

impl<T: fmt::Display, const R: usize, const ZERO_BASED: bool> fmt::Display
    for HexMap<T, R, ZERO_BASED>
{
    /// Renders the full backing array, one row per line, each cell
    /// right-aligned in a 3-wide field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(Self::width()) {
            for cell in row {
                write!(f, "{:>3}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::iproduct;

    #[test]
    fn dimensions_follow_the_radius() {
        assert_eq!(HexMap::<i32, 3>::radius(), 3);
        assert_eq!(HexMap::<i32, 3>::width(), 7);
        assert_eq!(HexMap::<i32, 3>::height(), 7);
        assert_eq!(HexMap::<i32, 3>::size(), 49);

        assert_eq!(HexMap::<i32, 1>::size(), 9);
    }

    #[test]
    fn index_width_tracks_backing_size() {
        assert_eq!(HexMap::<i32, 7>::index_width(), IndexWidth::U8);
        assert_eq!(HexMap::<i32, 8>::index_width(), IndexWidth::U16);
    }

    #[test]
    fn cells_start_at_the_default_value() {
        let map: HexMap<i32, 3> = HexMap::new();
        assert_eq!(map.data().len(), 49);
        assert!(map.data().iter().all(|&cell| cell == 0));
    }

    #[test]
    fn round_trips_through_at() {
        let mut map: HexMap<i32, 3> = HexMap::new();
        *map.at_mut(3, 0).unwrap() = 1;
        *map.at_mut(5, 4).unwrap() = 8;

        assert_eq!(*map.at(3, 0).unwrap(), 1);
        assert_eq!(*map.at(5, 4).unwrap(), 8);
        assert_eq!(*map.at(0, 0).unwrap(), 0);
    }

    #[test]
    fn round_trips_through_hex_coordinates() {
        let mut map: HexMap<i32, 3, false> = HexMap::new();
        let hex = Hex::<3, false>::new(2, 1);

        *map.at_hex_mut(&hex).unwrap() = 8;
        assert_eq!(*map.at_hex(&hex).unwrap(), 8);
        assert_eq!(map[hex], 8);

        map[hex] = 16;
        assert_eq!(*map.at(2, 1).unwrap(), 16);
    }

    #[test]
    fn rejects_mappings_outside_the_backing_array() {
        let map: HexMap<i32, 3> = HexMap::new();
        assert_eq!(map.at(-1, 0), Err(HexMapError::OutOfBounds { q: -1, r: 0 }));
        assert_eq!(map.at(7, 0), Err(HexMapError::OutOfBounds { q: 7, r: 0 }));
        assert_eq!(map.at(0, 7), Err(HexMapError::OutOfBounds { q: 0, r: 7 }));

        // Center-based: (4, 0) lands on column 7 of a 7-wide array.
        let center: HexMap<i32, 3, false> = HexMap::new();
        assert!(center.at(4, 0).is_err());
        assert!(center.at(0, -4).is_err());
        assert!(center.at(-3, 0).is_ok());
    }

    #[test]
    fn out_of_bounds_error_names_the_coordinate() {
        let map: HexMap<i32, 3> = HexMap::new();
        let err = map.at(9, 9).unwrap_err();
        assert_eq!(
            err.to_string(),
            "coordinate <9 9> maps outside the backing array"
        );
    }

    #[test]
    #[should_panic(expected = "maps outside the backing array")]
    fn index_operator_panics_outside_the_backing_array() {
        let map: HexMap<i32, 3> = HexMap::new();
        let _ = map[Hex::<3>::new(-1, 0)];
    }

    /// Every centered coordinate with cube components in `[-R, R]` lands
    /// on the same physical cell under center-based `at(q, r)` and
    /// zero-based `at(q + R, r + R)`.
    #[test]
    fn conventions_address_the_same_physical_cells() {
        const R: i32 = 3;
        let mut center: HexMap<i32, 3, false> = HexMap::new();
        let mut zero: HexMap<i32, 3, true> = HexMap::new();

        let hexagon = iproduct!(-R..=R, -R..=R).filter(|&(q, r)| (q + r).abs() <= R);

        let mut seen = hashbrown::HashSet::new();
        for (marker, (q, r)) in hexagon.enumerate() {
            let marker = marker as i32 + 1;
            *center.at_mut(q, r).unwrap() = marker;
            *zero.at_mut(q + R, r + R).unwrap() = marker;

            // Each coordinate owns a distinct physical cell.
            let offset = center
                .data()
                .iter()
                .position(|&cell| cell == marker)
                .unwrap();
            assert!(seen.insert(offset));
        }

        assert_eq!(seen.len(), 37);
        assert_eq!(center.data(), zero.data());
    }

    #[test]
    fn raw_accessors_share_the_backing_layout() {
        let mut map: HexMap<i32, 1> = HexMap::new();
        *map.get_mut(Index2D::new(2, 1)) = 5;

        assert_eq!(map.get(Index2D::new(2, 1)), 5);
        assert_eq!(map.data()[5], 5);
        assert_eq!(*map.at(2, 1).unwrap(), 5);

        assert_eq!(map.iter_grid().count(), 9);
        let written: Vec<i32> = map.iter_grid().map(|coords| map.get(coords)).collect();
        assert_eq!(written, vec![0, 0, 0, 0, 0, 5, 0, 0, 0]);
    }

    #[test]
    fn serde_round_trip() {
        let mut map: HexMap<i32, 1> = HexMap::new();
        *map.at_mut(1, 1).unwrap() = 7;

        let text = serde_json::to_string(&map).expect("serializes");
        let back: HexMap<i32, 1> = serde_json::from_str(&text).expect("deserializes");
        assert_eq!(map, back);
    }
}
