//! Data Models
//!
//! Identifiers, request shapes and response objects of the CFTools API.

pub mod ids;
pub mod requests;
pub mod responses;

pub use ids::*;
pub use requests::*;
pub use responses::*;
