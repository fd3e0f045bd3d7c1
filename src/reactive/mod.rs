//! Fine-grained reactivity: signals, effects and frame invalidation.
//!
//! A [`Signal`] holds a value. An [`Effect`] runs a closure, records which
//! signals it read, and runs again whenever one of them changes. Writes that
//! change a value also request a frame.

pub mod effect;
pub mod invalidation;
pub mod runtime;
pub mod signal;

pub use effect::{create_effect, Effect};
pub use invalidation::{request_frame, take_frame_request, ChangeFlags};
pub use runtime::batch;
pub use signal::{create_signal, ReadSignal, Signal, WriteSignal};
