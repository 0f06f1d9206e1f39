//! Top-level facade crate for drainPrism.
//!
//! Re-exports the event model and the relay library so users can depend on a single crate.

pub mod core {
    pub use drainprism_core::*;
}

pub mod relay {
    pub use drainprism_relay::*;
}
