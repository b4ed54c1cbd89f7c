//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns such
//! as tracing and vanity hostname redirects.

pub mod host_redirect;
pub mod trace;

pub use host_redirect::HostRedirect;
pub use trace::Trace;
