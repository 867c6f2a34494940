//! hospitalinfo - A read-only HTTP router over static blood donation datasets.
//!
//! # Overview
//!
//! hospitalinfo republishes four JSON datasets hosted on a static site (blood
//! banks, donors, donation camps and events). Collections can be filtered with
//! query parameters and single records looked up by `id`. Nothing is stored:
//! each request fetches the dataset, filters it in memory, and answers.
//!
//! # Modules
//!
//! - [`api`]: HTTP dispatcher and router construction
//! - [`route`]: Request path parsing
//! - [`filter`]: Query normalisation and record matching
//! - [`source`]: Client for the static dataset host
//! - [`model`]: Resource categories and query parameter types
//! - [`config`]: Environment configuration
//! - [`error`]: Error type and its HTTP mapping

pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod route;
pub mod source;
