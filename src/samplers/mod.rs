//! Samplers drawing full `Assignment`s from a `DirectedModel`.

pub mod forward;

pub use self::forward::ForwardSampler;
