//! drillbag-core — No-repeat item sampling for templated practice pools.
//!
//! This crate holds the sampling controller, the per-pool bag registry, and
//! the trait seams that item sources and consumers plug into. It does no I/O
//! of its own; everything network-shaped lives behind [`traits::ItemSource`].

pub mod error;
pub mod fingerprint;
pub mod gate;
pub mod model;
pub mod registry;
pub mod sampler;
pub mod traits;
