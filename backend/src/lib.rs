//! Residential community core: registration, login, delivery access
//! approval, and dashboard content held in explicit in-memory stores.

pub mod domain;
pub mod example_data;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::Community;
