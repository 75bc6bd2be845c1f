//! Configuration modules for the GraphQL client.
//!
//! This module contains request-level configuration:
//! - [`CallOptions`]: Per-call timeout, operation name and mutators
//! - [`RequestMutator`]: Request adjustment (headers, auth, tracing)

mod mutator;
mod options;

pub use mutator::{HeaderMutator, Mutator, MutatorChain, RequestMutator};
pub use options::CallOptions;
