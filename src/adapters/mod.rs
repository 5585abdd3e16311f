//! Adapter implementations of the port traits.

#[cfg(test)]
pub(crate) mod fake;
pub mod live;
