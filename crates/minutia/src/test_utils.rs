//! Shared synthetic skeletons for unit tests.

use image::{GrayImage, Luma};

/// Build a skeleton from text rows: `#` is a ridge pixel (value 1), anything
/// else is background (value 0).
pub(crate) fn skeleton_from_rows(rows: &[&str]) -> GrayImage {
    let h = rows.len() as u32;
    let w = rows.first().map_or(0, |r| r.len()) as u32;
    let mut img = GrayImage::new(w, h);
    for (y, line) in rows.iter().enumerate() {
        assert_eq!(line.len() as u32, w, "ragged skeleton row {y}");
        for (x, ch) in line.bytes().enumerate() {
            if ch == b'#' {
                img.put_pixel(x as u32, y as u32, Luma([1]));
            }
        }
    }
    img
}

/// 20×20 skeleton enclosed by a closed ridge frame.
///
/// Minutiae (row, col):
/// - terminations (9, 11), (9, 15), (10, 4), (10, 9), (15, 13)
/// - bifurcation (11, 13)
///
/// All of them are enclosed by the frame, so border rejection keeps them.
pub(crate) fn fingerprint_like_skeleton() -> GrayImage {
    let mut img = GrayImage::new(20, 20);
    let mut set = |row: u32, col: u32| img.put_pixel(col, row, Luma([1]));

    for i in 1..=18 {
        set(1, i);
        set(18, i);
        set(i, 1);
        set(i, 18);
    }
    // Dead-end ridge.
    for col in 4..=9 {
        set(10, col);
    }
    // Fork: stem down from (11, 13), branches up-left and up-right.
    for row in 11..=15 {
        set(row, 13);
    }
    set(10, 12);
    set(9, 11);
    set(10, 14);
    set(9, 15);
    img
}
