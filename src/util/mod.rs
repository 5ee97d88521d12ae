//! Small shared utilities.

/// Frame timing with smoothed FPS.
pub mod frame_timing;
