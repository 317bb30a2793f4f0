//! Middleware Module
//!
//! HTTP middleware applied before handlers run. Currently a single
//! concern: bearer-token authentication for the resource routes.

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
