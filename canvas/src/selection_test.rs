use super::*;
use crate::doc::EntityKind;

fn entity() -> Entity {
    Entity::new(EntityKind::Rect, 0.0, 0.0, 10.0, 10.0)
}

fn locked() -> Entity {
    let mut e = entity();
    e.locked = true;
    e
}

// --- click ---

#[test]
fn click_selects_target() {
    let a = entity();
    let mut sel = Selection::default();
    assert!(sel.click(Some(&a)));
    assert_eq!(sel, Selection::Single(a.id));
}

#[test]
fn click_replaces_multi_selection() {
    let (a, b, c) = (entity(), entity(), entity());
    let mut sel = Selection::Multi(vec![a.id, b.id]);
    sel.click(Some(&c));
    assert_eq!(sel, Selection::Single(c.id));
}

#[test]
fn click_on_nothing_clears() {
    let a = entity();
    let mut sel = Selection::Single(a.id);
    assert!(sel.click(None));
    assert!(sel.is_empty());
}

#[test]
fn click_on_locked_clears() {
    let a = entity();
    let l = locked();
    let mut sel = Selection::Single(a.id);
    sel.click(Some(&l));
    assert!(sel.is_empty());
}

#[test]
fn click_same_target_reports_no_change() {
    let a = entity();
    let mut sel = Selection::Single(a.id);
    assert!(!sel.click(Some(&a)));
}

// --- modifier_click ---

#[test]
fn modifier_click_with_nothing_selected_selects() {
    let a = entity();
    let mut sel = Selection::None;
    sel.modifier_click(&a);
    assert_eq!(sel, Selection::Single(a.id));
}

#[test]
fn modifier_click_promotes_single_to_multi() {
    let (a, b) = (entity(), entity());
    let mut sel = Selection::Single(a.id);
    sel.modifier_click(&b);
    assert_eq!(sel, Selection::Multi(vec![a.id, b.id]));
}

#[test]
fn modifier_click_same_single_is_noop() {
    let a = entity();
    let mut sel = Selection::Single(a.id);
    assert!(!sel.modifier_click(&a));
    assert_eq!(sel, Selection::Single(a.id));
}

#[test]
fn modifier_click_adds_non_member() {
    let (a, b, c) = (entity(), entity(), entity());
    let mut sel = Selection::Multi(vec![a.id, b.id]);
    sel.modifier_click(&c);
    assert_eq!(sel, Selection::Multi(vec![a.id, b.id, c.id]));
}

#[test]
fn modifier_click_removes_member() {
    let (a, b) = (entity(), entity());
    let mut sel = Selection::None;
    sel.modifier_click(&a);
    sel.modifier_click(&b);
    sel.modifier_click(&a);
    assert_eq!(sel.ids(), vec![b.id]);
    assert!(!sel.contains(&a.id));
}

#[test]
fn modifier_click_last_member_collapses_to_none() {
    let a = entity();
    let mut sel = Selection::Multi(vec![a.id]);
    sel.modifier_click(&a);
    assert!(sel.is_empty());
}

#[test]
fn modifier_click_ignores_locked() {
    let a = entity();
    let l = locked();
    let mut sel = Selection::Single(a.id);
    assert!(!sel.modifier_click(&l));
    assert_eq!(sel, Selection::Single(a.id));
}

// --- set / forget ---

#[test]
fn set_picks_variant_by_count() {
    let (a, b) = (entity(), entity());
    let mut sel = Selection::None;
    sel.set(vec![a.id]);
    assert_eq!(sel, Selection::Single(a.id));
    sel.set(vec![a.id, b.id]);
    assert!(sel.is_multi());
    sel.set(Vec::new());
    assert!(sel.is_empty());
}

#[test]
fn forget_removes_single() {
    let a = entity();
    let mut sel = Selection::Single(a.id);
    assert!(sel.forget(&a.id));
    assert!(sel.is_empty());
}

#[test]
fn forget_shrinks_multi() {
    let (a, b) = (entity(), entity());
    let mut sel = Selection::Multi(vec![a.id, b.id]);
    sel.forget(&b.id);
    assert_eq!(sel, Selection::Multi(vec![a.id]));
    assert_eq!(sel.len(), 1);
}

#[test]
fn forget_unknown_id_is_noop() {
    let (a, b) = (entity(), entity());
    let mut sel = Selection::Single(a.id);
    assert!(!sel.forget(&b.id));
}

#[test]
fn single_only_reports_lone_selection() {
    let (a, b) = (entity(), entity());
    assert_eq!(Selection::Single(a.id).single(), Some(a.id));
    assert_eq!(Selection::Multi(vec![a.id, b.id]).single(), None);
    assert_eq!(Selection::None.single(), None);
}
