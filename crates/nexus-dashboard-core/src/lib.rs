//! Nexus Dashboard Core - Dashboard read/write helpers
//!
//! Equality-filtered queries over the profile and certificate collections,
//! batch grouping for the staff browsing UI, and certificate uploads with a
//! progress side channel.

pub mod certificates;
pub mod directory;
pub mod error;

pub use certificates::*;
pub use directory::*;
pub use error::*;
