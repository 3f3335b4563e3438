//! Core types and trait definitions for the contacts service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.
//!
//! The two halves of the access contract live here:
//!
//! - [`validation`]: the gate every caller-supplied payload passes through
//!   before it can become a [`NewContact`](contact::NewContact) or
//!   [`ContactUpdate`](contact::ContactUpdate).
//! - [`service`]: owner-scoped operations over any
//!   [`ContactStore`](store::ContactStore).

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod error;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{Error, Result};
