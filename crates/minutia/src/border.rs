//! Rejection of minutiae produced by ridges running off the image edge.
//!
//! A ridge that leaves the image looks like a termination at the last pixel
//! inside the frame. Such a point is recognised by an empty scan line: in at
//! least one cardinal direction there is no further ridge pixel between the
//! point and the image border.

use image::GrayImage;

use crate::minutia::Minutia;

/// `true` when every cardinal scan line from `(row, col)` (excluding the
/// pixel itself) reaches another ridge pixel.
///
/// Positions outside the image have no scan lines and return `false`.
pub fn has_ridge_in_all_directions(
    skeleton: &GrayImage,
    row: u32,
    col: u32,
    ridge_value: u8,
) -> bool {
    let (width, height) = (skeleton.width() as usize, skeleton.height() as usize);
    let (row, col) = (row as usize, col as usize);
    if row >= height || col >= width {
        return false;
    }
    let data = skeleton.as_raw();

    let line = &data[row * width..(row + 1) * width];
    let is_ridge = |v: &u8| *v == ridge_value;
    let column_is_ridge = |y: usize| data[y * width + col] == ridge_value;

    line[..col].iter().any(is_ridge)
        && (0..row).any(column_is_ridge)
        && line[col + 1..].iter().any(is_ridge)
        && (row + 1..height).any(column_is_ridge)
}

/// Keep only minutiae that are enclosed by ridge pixels in all four
/// cardinal directions. Order is preserved.
pub fn remove_border_minutiae(
    skeleton: &GrayImage,
    points: Vec<Minutia>,
    ridge_value: u8,
) -> Vec<Minutia> {
    points
        .into_iter()
        .filter(|m| has_ridge_in_all_directions(skeleton, m.row, m.col, ridge_value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minutia::MinutiaKind;
    use crate::test_utils::skeleton_from_rows;

    #[test]
    fn enclosed_point_is_kept() {
        let img = skeleton_from_rows(&[
            "..#..", //
            ".....",
            "#.#.#",
            ".....",
            "..#..",
        ]);
        assert!(has_ridge_in_all_directions(&img, 2, 2, 1));
    }

    #[test]
    fn outside_positions_are_not_enclosed() {
        let img = skeleton_from_rows(&[
            "..#..", //
            ".....",
            "#.#.#",
            ".....",
            "..#..",
        ]);
        assert!(!has_ridge_in_all_directions(&img, 5, 2, 1));
        assert!(!has_ridge_in_all_directions(&img, 2, 5, 1));
        assert!(!has_ridge_in_all_directions(&img, u32::MAX, u32::MAX, 1));
    }

    #[test]
    fn each_empty_direction_rejects() {
        let full = [
            "..#..", //
            ".....",
            "#.#.#",
            ".....",
            "..#..",
        ];
        for (r, c) in [(0usize, 2usize), (2, 0), (2, 4), (4, 2)] {
            let mut rows: Vec<Vec<u8>> = full.iter().map(|s| s.bytes().collect()).collect();
            rows[r][c] = b'.';
            let rows: Vec<String> = rows.into_iter().map(|r| String::from_utf8(r).unwrap()).collect();
            let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
            let img = skeleton_from_rows(&refs);
            assert!(
                !has_ridge_in_all_directions(&img, 2, 2, 1),
                "removing ({r}, {c}) should expose the centre"
            );
        }
    }

    #[test]
    fn the_point_itself_does_not_count() {
        let img = skeleton_from_rows(&[
            "...", //
            ".#.",
            "...",
        ]);
        assert!(!has_ridge_in_all_directions(&img, 1, 1, 1));
    }

    #[test]
    fn removal_preserves_order() {
        let img = skeleton_from_rows(&[
            "..#...#..", //
            ".........",
            "#.#...#.#",
            ".........",
            "..#......",
        ]);
        let points = vec![
            Minutia::new(2, 2, MinutiaKind::Termination),
            Minutia::new(2, 6, MinutiaKind::Bifurcation),
            Minutia::new(2, 8, MinutiaKind::Termination),
        ];
        let kept = remove_border_minutiae(&img, points, 1);
        assert_eq!(kept, vec![Minutia::new(2, 2, MinutiaKind::Termination)]);
    }
}
