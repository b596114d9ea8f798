//! CUDA grid visualizer: maps a `gridDim` × `blockDim` launch onto a
//! flattened 1D array and shows which thread covers each element.
//!
//! The mapping itself lives in [`grid`]; [`session`] is the reactive state the
//! window edits; [`export`] renders a mapping without a window.

pub mod i18n;
pub mod logger;

pub mod app;
pub mod cli;
pub mod components;
pub mod export;
pub mod grid;
pub mod inspect;
pub mod palette;
pub mod session;
pub mod settings;
pub mod theme;
