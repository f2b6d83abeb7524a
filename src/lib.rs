//! Drag-to-create box tools for canvas editors.
//!
//! Exposes the generic box tool state machine together with the geometry,
//! shape factories, document store and configuration it relies on, so hosts
//! can embed the tools and the `boxtool` binary can replay scripted gestures
//! through the same code.

pub mod config;
pub mod draw;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod script;

pub use config::Config;
pub use editor::Editor;
