//! Space state records
//!
//! Typed desired and observed state for a Heroku private space, shared by the
//! space controller and whatever persists state between invocations.

pub mod schema;
pub mod space;

pub use schema::*;
pub use space::*;
