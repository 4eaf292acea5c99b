//! Blockfall (workspace facade crate).
//!
//! Re-exports the engine crates under one name so hosts can depend on a
//! single package: `blockfall::{core,engine,input,types}`.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_types as types;
