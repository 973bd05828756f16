#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn default_grid_is_off_at_twenty() {
    let g = Grid::default();
    assert!(!g.enabled());
    assert_eq!(g.pitch(), 20.0);
}

#[test]
fn toggle_flips_enabled() {
    let mut g = Grid::default();
    g.toggle();
    assert!(g.enabled());
    g.toggle();
    assert!(!g.enabled());
}

#[test]
fn increase_and_decrease_step_by_ten() {
    let mut g = Grid::default();
    g.increase();
    assert_eq!(g.pitch(), 30.0);
    g.decrease();
    g.decrease();
    assert_eq!(g.pitch(), 10.0);
}

#[test]
fn pitch_never_leaves_range() {
    let mut g = Grid::default();
    for i in 0..40 {
        if i % 7 < 4 {
            g.increase();
        } else {
            g.decrease();
        }
        assert!((10.0..=100.0).contains(&g.pitch()), "pitch {} at step {i}", g.pitch());
    }
    for _ in 0..20 {
        g.increase();
    }
    assert_eq!(g.pitch(), 100.0);
    for _ in 0..20 {
        g.decrease();
    }
    assert_eq!(g.pitch(), 10.0);
}

#[test]
fn set_pitch_clamps() {
    let mut g = Grid::default();
    g.set_pitch(3.0);
    assert_eq!(g.pitch(), 10.0);
    g.set_pitch(250.0);
    assert_eq!(g.pitch(), 100.0);
    g.set_pitch(f64::NAN);
    assert_eq!(g.pitch(), 20.0);
}

#[test]
fn disabled_grid_has_no_lines() {
    let g = Grid::default();
    assert!(g.lines(800.0, 600.0).is_empty());
}

#[test]
fn lines_cover_surface_inclusive() {
    let g = Grid::new(true, 100.0);
    let lines = g.lines(300.0, 200.0);
    let vertical: Vec<f64> = lines.iter().filter(|l| l.axis == Axis::Vertical).map(|l| l.offset).collect();
    let horizontal: Vec<f64> = lines.iter().filter(|l| l.axis == Axis::Horizontal).map(|l| l.offset).collect();
    assert_eq!(vertical, vec![0.0, 100.0, 200.0, 300.0]);
    assert_eq!(horizontal, vec![0.0, 100.0, 200.0]);
}

#[test]
fn vertical_lines_come_first_and_span_height() {
    let g = Grid::new(true, 50.0);
    let lines = g.lines(120.0, 80.0);
    assert_eq!(lines[0].axis, Axis::Vertical);
    assert_eq!(lines[0].length, 80.0);
    let last = lines[lines.len() - 1];
    assert_eq!(last.axis, Axis::Horizontal);
    assert_eq!(last.length, 120.0);
}

#[test]
fn can_adjust_only_when_enabled_and_in_range() {
    let mut g = Grid::new(false, 10.0);
    assert!(!g.can_increase());
    g.toggle();
    assert!(g.can_increase());
    assert!(!g.can_decrease());
}
