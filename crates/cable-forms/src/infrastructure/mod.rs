//! Infrastructure layer: concrete implementations of the outbound ports.

pub mod persistence;
