//! Spritesheet grid math.
//!
//! Vendor sheets are square grids of equally sized cells. For CSS
//! `background-position` with a percentage `p`, the image offset is
//! `p * (container - image)`. With `background-size: N*100%` the image is N
//! cells wide, so cell `c` (zero-indexed) lines up with the container when
//! `p * (1 - N) = -c`, i.e. `p = c / (N - 1)`, for any rendered element size.

use moji_data::{Cell, EmojiRecord};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A CSS percentage, printed with at most three decimals and no trailing zeros.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percent(f64);
impl Percent {
    /// `ratio` of `1.0` is `100%`.
    pub fn from_ratio(ratio: f64) -> Self {
        Self(ratio * 100.0)
    }
}
impl Display for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let fixed = format!("{:.3}", self.0);
        write!(f, "{}%", fixed.trim_end_matches('0').trim_end_matches('.'))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetGrid {
    size: u32,
}
impl SheetGrid {
    /// Sizes the grid from the largest coordinate on either axis, skin-tone
    /// variations included: they live on the same sheet.
    pub fn measure<'a>(records: impl IntoIterator<Item = &'a EmojiRecord>) -> Self {
        let max = records
            .into_iter()
            .flat_map(EmojiRecord::cells)
            .map(|cell| cell.sheet_x.max(cell.sheet_y))
            .max()
            .unwrap_or(0);
        Self { size: max.saturating_add(1) }
    }

    /// Cells per side.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn background_size(&self) -> Percent {
        Percent::from_ratio(f64::from(self.size))
    }

    pub fn offset(&self, coordinate: u32) -> Percent {
        match self.size {
            // A single cell is always fully aligned.
            0 | 1 => Percent::from_ratio(0.0),
            size => Percent::from_ratio(f64::from(coordinate) / f64::from(size - 1)),
        }
    }

    /// `(x, y)` background position of `cell`.
    pub fn position(&self, cell: &Cell) -> (Percent, Percent) {
        (self.offset(cell.sheet_x), self.offset(cell.sheet_y))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rstest::rstest;

    pub(crate) fn record(code: &str, x: u32, y: u32, extra: &str) -> EmojiRecord {
        let json = format!(
            r#"{{"unified": "{code}", "image": "{code}.png", "sheet_x": {x}, "sheet_y": {y}, "has_img_google": true, "has_img_twitter": true {extra}}}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    #[rstest]
    #[case(0.0, "0%")]
    #[case(1.0, "100%")]
    #[case(0.5, "50%")]
    #[case(1.0 / 3.0, "33.333%")]
    #[case(2.0 / 3.0, "66.667%")]
    #[case(60.0, "6000%")]
    fn test_percent_format(#[case] ratio: f64, #[case] expected: &str) {
        assert_eq!(Percent::from_ratio(ratio).to_string(), expected);
    }

    #[test]
    fn test_three_cell_example() {
        let records = [record("1f600", 0, 0, ""), record("1f601", 0, 1, ""), record("1f602", 1, 0, "")];
        let grid = SheetGrid::measure(&records);
        assert_eq!(grid.size(), 2);
        assert_eq!(grid.background_size().to_string(), "200%");
        let positions: Vec<_> = records
            .iter()
            .map(|r| grid.position(&r.cell))
            .map(|(x, y)| format!("{x} {y}"))
            .collect();
        assert_eq!(positions, ["0% 0%", "0% 100%", "100% 0%"]);
    }

    #[test]
    fn test_skin_variations_widen_the_grid() {
        let variation = r#", "skin_variations": {"1F3FB": {"unified": "1F44D-1F3FB", "image": "x.png", "sheet_x": 4, "sheet_y": 2}}"#;
        let records = [record("1f44d", 0, 1, variation), record("1f600", 1, 0, "")];
        let grid = SheetGrid::measure(&records);
        assert_eq!(grid.size(), 5);
        assert_eq!(grid.offset(1).to_string(), "25%");
        assert_eq!(grid.offset(4).to_string(), "100%");
    }

    #[test]
    fn test_single_cell_grid() {
        let grid = SheetGrid::measure(&[record("1f600", 0, 0, "")]);
        assert_eq!(grid.size(), 1);
        assert_eq!(grid.background_size().to_string(), "100%");
        assert_eq!(grid.offset(0).to_string(), "0%");
    }

    #[test]
    fn test_largest_coordinate_saturates() {
        let grid = SheetGrid::measure(&[record("1f600", u32::MAX, 0, "")]);
        assert_eq!(grid.size(), u32::MAX);
        assert_eq!(grid.offset(0).to_string(), "0%");
    }

    #[test]
    fn test_empty_records() {
        assert_eq!(SheetGrid::measure(&[] as &[EmojiRecord]).size(), 1);
    }

    #[rstest]
    #[case(61, 0)]
    #[case(61, 17)]
    #[case(61, 60)]
    #[case(7, 3)]
    fn test_offset_is_coordinate_over_size_minus_one(#[case] max: u32, #[case] coordinate: u32) {
        let grid = SheetGrid::measure(&[record("1f600", max, 0, "")]);
        let expected = Percent::from_ratio(f64::from(coordinate) / f64::from(max));
        assert_eq!(grid.offset(coordinate), expected);
    }
}
