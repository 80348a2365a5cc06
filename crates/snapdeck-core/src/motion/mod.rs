//! Time-driven primitives consumed by the paging and selector state machines
//!
//! Time is logical: the host measures elapsed time between frames and hands it
//! to `advance()`. Nothing here reads a clock, so animations are deterministic
//! under test.
//!
//! # Layers
//!
//! ## Atomic
//! - `timing` - Pure progress and interpolation helpers
//! - `delay` - Cancelable "run after N" task
//!
//! ## Molecular
//! - `tween` - Eased interpolation of a value from A to B
//!
//! Cancellation of either primitive is dropping it (`Option::take`, or
//! replacing the state that owns it). Dropping an already finished or
//! already dropped handle is a no-op.

// Atomic layer
pub mod delay;
pub mod timing;

// Molecular layer
pub mod tween;

pub use delay::DelayedTask;
pub use tween::{Tween, TweenStep};
