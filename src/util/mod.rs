//! Shared utilities for the viewer.

pub mod frame_timing;

pub use frame_timing::FrameTiming;
