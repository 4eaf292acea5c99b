//! Player input (engine-facing).
//!
//! [`Controls`] applies press/release events to a [`engine::Game`] with the
//! per-action cooldowns and soft-drop repeat. [`map`] turns `crossterm` key
//! events into [`types::GameAction`]s and feeds them through `Controls`.

pub mod controls;
pub mod map;

pub use blockfall_engine as engine;
pub use blockfall_types as types;

pub use controls::Controls;
pub use map::{dispatch_key_event, handle_key_event, should_quit};
