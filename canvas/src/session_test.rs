#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{Entity, EntityKind};

#[test]
fn new_session_is_uninitialized() {
    let s = Session::new();
    assert!(!s.is_initialized());
    assert!(s.surface().is_none());
    assert!(s.error().is_none());
}

#[test]
fn initialize_creates_surface() {
    let mut s = Session::new();
    let surface = s.initialize(&SurfaceConfig::new(800.0, 600.0)).map(|s| (s.width(), s.height()));
    assert_eq!(surface, Ok((800.0, 600.0)));
    assert!(s.is_initialized());
    assert_eq!(s.surface().map(Surface::background), Some("#ffffff"));
}

#[test]
fn second_initialize_is_a_no_op() {
    let mut s = Session::new();
    assert!(s.initialize(&SurfaceConfig::new(800.0, 600.0)).is_ok());
    if let Some(surface) = s.surface_mut() {
        surface.insert(Entity::new(EntityKind::Rect, 0.0, 0.0, 1.0, 1.0));
    }
    let again = s.initialize(&SurfaceConfig::new(10.0, 10.0).with_background("#000"));
    assert!(again.is_ok());
    let surface = s.surface().map(|x| (x.width(), x.len()));
    assert_eq!(surface, Some((800.0, 1)));
}

#[test]
fn bad_dimensions_fail_and_keep_message() {
    let mut s = Session::new();
    let err = s.initialize(&SurfaceConfig::new(0.0, 600.0)).map(|_| ());
    assert_eq!(err, Err(InitError::InvalidDimensions { width: 0.0, height: 600.0 }));
    assert!(!s.is_initialized());
    assert!(s.error().is_some_and(|m| m.contains("dimensions")));
}

#[test]
fn non_finite_dimensions_fail() {
    let mut s = Session::new();
    assert!(s.initialize(&SurfaceConfig::new(f64::NAN, 10.0)).is_err());
    assert!(s.initialize(&SurfaceConfig::new(10.0, f64::INFINITY)).is_err());
}

#[test]
fn oversized_dimensions_fail() {
    let mut s = Session::new();
    assert!(s.initialize(&SurfaceConfig::new(1e10, 1e10)).is_err());
    assert!(validate_surface(MAX_SURFACE_EXTENT, MAX_SURFACE_EXTENT, "#fff").is_ok());
    assert_eq!(
        validate_surface(MAX_SURFACE_EXTENT + 1.0, 10.0, "#fff"),
        Err(InitError::InvalidDimensions { width: MAX_SURFACE_EXTENT + 1.0, height: 10.0 })
    );
}

#[test]
fn bad_background_fails() {
    let mut s = Session::new();
    let err = s.initialize(&SurfaceConfig::new(10.0, 10.0).with_background("white")).map(|_| ());
    assert_eq!(err, Err(InitError::InvalidBackground("white".into())));
    assert!(!s.is_initialized());
}

#[test]
fn success_after_failure_clears_error() {
    let mut s = Session::new();
    assert!(s.initialize(&SurfaceConfig::new(-1.0, 10.0)).is_err());
    assert!(s.initialize(&SurfaceConfig::new(10.0, 10.0)).is_ok());
    assert!(s.error().is_none());
}

#[test]
fn teardown_drops_surface() {
    let mut s = Session::new();
    assert!(s.initialize(&SurfaceConfig::new(10.0, 10.0)).is_ok());
    s.teardown();
    assert!(!s.is_initialized());
    s.teardown();
    assert!(!s.is_initialized());
}
