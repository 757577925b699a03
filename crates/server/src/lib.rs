//! Driftline server library.
//!
//! The HTTP backend as a library, so handlers, repositories and the
//! record store can be tested and driven from the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
