//! Vitrine Animation Timing
//!
//! Timer chains and cue timelines driven by a virtual clock.
//!
//! # Features
//!
//! - **Timer Queues**: cancellable one-shot timers with retained handles
//! - **Deterministic Ordering**: timers due at the same instant fire in the
//!   order they were scheduled
//! - **Timelines**: ordered cue lists with offsets, including staggered groups
//! - **Synchronous Driving**: time only moves when the owner advances it, so
//!   tests step through a sequence without wall-clock waits

pub mod scheduler;
pub mod timeline;

pub use scheduler::{Millis, TimerId, TimerQueue};
pub use timeline::{Cue, StaggerBuilder, Timeline};
