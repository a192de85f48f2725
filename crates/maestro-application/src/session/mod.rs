//! Session orchestration module.
//!
//! - `transcript`: the published display snapshot
//! - `reconciler`: the per-composer controller
//! - `factory`: wiring for the default storage stack

mod factory;
mod reconciler;
mod transcript;

pub use factory::bootstrap;
pub use reconciler::{EvictionCallback, SessionReconciler};
pub use transcript::{SendState, Transcript};
