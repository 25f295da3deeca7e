//! Core traits for the Micetro integration layer
//!
//! - [`Transport`]: authenticated HTTP access to the `/mmws/api` endpoint
//! - [`ObjectOperations`]: create/read/update/delete/find for one object family

pub mod object_ops;
pub mod transport;

pub use object_ops::{ObjectOperations, expect_single};
pub use transport::{DeleteRequest, Filter, QueryParams, Transport, filter_param};
