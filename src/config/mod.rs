//! Configuration descriptor model
//!
//! Typed declarations of everything the host window manager reads at load
//! time: bindings, groups, layouts, screens, floating rules, and options,
//! with JSON persistence and structural validation.

pub mod action;
pub mod backup;
pub mod bar;
pub mod binding;
pub mod descriptor;
pub mod group;
pub mod layout;
pub mod options;
pub mod validate;

pub use binding::{KeyBinding, KeyChord, KeySpec, MouseBinding};
pub use descriptor::Config;
