//! # GraphQL Resolvers Module
//!
//! Query and Mutation resolvers.

pub mod mutation;
pub mod query;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
