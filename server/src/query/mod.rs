//! Query Module
//!
//! The generic paginated join pipeline used by every list endpoint.

pub mod paged;

pub use paged::{Filter, JoinSpec, PageParams, PageResult, PagedQuery};
