#![allow(missing_docs)]
//! Host-level tests for the lattice geometry.

use std::collections::HashSet;

use pingpong_clock::lattice::{BORDER, COLS, LED_COUNT, ROWS, WARNING_ADDRESSES, strip_index};

#[test]
fn every_strip_index_is_reachable_exactly_once() {
    let mut seen = HashSet::new();
    for row in 0..ROWS as i32 {
        for col in 0..COLS as i32 {
            if let Some(index) = strip_index(row, col) {
                assert!(index < LED_COUNT, "index {index} out of range");
                assert!(seen.insert(index), "index {index} mapped twice");
            }
        }
    }
    assert_eq!(seen.len(), LED_COUNT);
}

#[test]
fn absent_cells_form_the_parallelogram_corners() {
    // Three clipped corners: top-left, bottom-left triangle, right edge.
    let absent: Vec<(i32, i32)> = (0..ROWS as i32)
        .flat_map(|row| (0..COLS as i32).map(move |col| (row, col)))
        .filter(|&(row, col)| strip_index(row, col).is_none())
        .collect();
    assert_eq!(absent.len(), (ROWS * COLS) - LED_COUNT);
    assert!(absent.contains(&(0, 0)));
    assert!(absent.contains(&(6, 19)));
    assert!(absent.contains(&(4, 19)));
}

#[test]
fn coordinates_off_the_grid_are_absent() {
    assert_eq!(strip_index(-1, 5), None);
    assert_eq!(strip_index(3, -1), None);
    assert_eq!(strip_index(ROWS as i32, 5), None);
    assert_eq!(strip_index(3, COLS as i32), None);
}

#[test]
fn border_path_is_unique_and_on_the_strip() {
    let mut seen = HashSet::new();
    for entry in BORDER {
        assert!((entry as usize) < LED_COUNT);
        assert!(seen.insert(entry), "border repeats index {entry}");
    }
}

#[test]
fn border_path_is_exactly_the_panel_edge() {
    // Top and bottom rows in full, plus the first and last cell of every
    // middle row.
    let mut edge = HashSet::new();
    for row in 0..ROWS as i32 {
        let cols: Vec<i32> = (0..COLS as i32)
            .filter(|&col| strip_index(row, col).is_some())
            .collect();
        if row == 0 || row == ROWS as i32 - 1 {
            for &col in &cols {
                edge.insert(strip_index(row, col).expect("filtered"));
            }
        } else {
            for &col in &[cols[0], cols[cols.len() - 1]] {
                edge.insert(strip_index(row, col).expect("filtered"));
            }
        }
    }
    let border: HashSet<usize> = BORDER.iter().map(|&entry| entry as usize).collect();
    assert_eq!(border, edge);
}

#[test]
fn warning_indicators_sit_on_valid_pixels() {
    for address in WARNING_ADDRESSES {
        assert!(address < LED_COUNT);
    }
}
