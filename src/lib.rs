//! Headless engine for an off-ramp swap wizard.
//!
//! The wizard walks a user from exchange credential connection through swap
//! confirmation. This crate keeps the flow itself free of any UI concern:
//! steps read and write a shared [`context::SwapContext`], talk to the swap
//! backend through the [`api::SwapApi`] seam, and report what should happen
//! next as typed outcomes instead of firing callbacks into a view layer.

pub mod api;
pub mod context;
pub mod models;
pub mod services;
pub mod steps;
pub mod store;
pub mod utils;
