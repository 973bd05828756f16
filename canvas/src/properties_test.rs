#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::EntityKind;

fn entity() -> Entity {
    let mut e = Entity::new(EntityKind::Rect, 10.4, 20.6, 200.0, 100.0);
    e.scale_x = 0.5;
    e.rotation = 44.6;
    e.opacity = 0.755;
    e
}

#[test]
fn properties_are_rounded_display_values() {
    let p = Properties::of(&entity());
    assert_eq!(p, Properties { left: 10, top: 21, width: 100, height: 100, angle: 45, opacity: 76 });
}

#[test]
fn left_and_top_set_position() {
    let e = entity();
    assert_eq!(property_update(&e, PropertyKey::Left, 5.0).x, Some(5.0));
    assert_eq!(property_update(&e, PropertyKey::Top, 6.0).y, Some(6.0));
}

#[test]
fn width_sets_scale() {
    let e = entity();
    let p = property_update(&e, PropertyKey::Width, 300.0);
    assert_eq!(p.scale_x, Some(1.5));
    assert_eq!(p.width, None);
}

#[test]
fn height_on_zero_sized_entity_uses_unit_divisor() {
    let e = Entity::new(EntityKind::Text, 0.0, 0.0, 0.0, 0.0);
    assert_eq!(property_update(&e, PropertyKey::Height, 40.0).scale_y, Some(40.0));
}

#[test]
fn opacity_is_percentage_and_clamped() {
    let e = entity();
    assert_eq!(property_update(&e, PropertyKey::Opacity, 50.0).opacity, Some(0.5));
    assert_eq!(property_update(&e, PropertyKey::Opacity, 150.0).opacity, Some(1.0));
    assert_eq!(property_update(&e, PropertyKey::Opacity, -5.0).opacity, Some(0.0));
}

#[test]
fn angle_sets_rotation() {
    assert_eq!(property_update(&entity(), PropertyKey::Angle, 90.0).rotation, Some(90.0));
}

#[test]
fn keys_parse_from_panel_names() {
    assert_eq!("left".parse::<PropertyKey>(), Ok(PropertyKey::Left));
    assert_eq!("rotation".parse::<PropertyKey>(), Ok(PropertyKey::Angle));
    assert_eq!("opacity".parse::<PropertyKey>(), Ok(PropertyKey::Opacity));
    assert!("skew".parse::<PropertyKey>().is_err());
}
