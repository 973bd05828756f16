//! Editor core for the design editor.
//!
//! This crate owns one drawing surface per session and everything that edits
//! or displays it: the mutation façade, a bounded snapshot history, the
//! viewport camera, single and multi selection, the alignment grid, the
//! layers and properties inspectors, the keyboard map and a software raster
//! renderer. It performs no I/O. The host (the `designer` binary) feeds it
//! input and drains the resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Mutation façade, history replay and input handling ([`engine::EngineCore`]) |
//! | [`session`] | Surface lifecycle and config validation |
//! | [`doc`] | Entities, the surface, and the serialized document |
//! | [`history`] | Bounded linear undo/redo over full-surface snapshots |
//! | [`camera`] | Zoom/pan camera and coordinate conversions |
//! | [`selection`] | Single vs. multi selection |
//! | [`grid`] | Alignment grid overlay |
//! | [`events`] | Surface events and RAII subscription handles |
//! | [`input`] | Tools, modifiers, shortcuts and the gesture state |
//! | [`hit`] | Hit-testing against entities |
//! | [`layers`] | Layers panel listing and restacking targets |
//! | [`properties`] | Properties panel values and edits |
//! | [`align`] | Align-to-surface tools |
//! | [`render`] | Raster rendering into an RGBA buffer |
//! | [`color`] | Hex color parsing |
//! | [`consts`] | Shared constants (zoom and pitch limits, placement defaults) |

pub mod align;
pub mod camera;
pub mod color;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod events;
pub mod grid;
pub mod history;
pub mod hit;
pub mod input;
pub mod layers;
pub mod properties;
pub mod render;
pub mod selection;
pub mod session;
