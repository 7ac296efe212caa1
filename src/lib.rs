//! Paced - Composable Client-Side Rate Limiting
//!
//! This crate implements the request-pacing runtime of a REST API client:
//! limiter strategies with an injectable clock, combinators for
//! OR-composition and thread safety, a blocking `limit()` facade with
//! iterator adaptors, and a serde-backed pacing policy. The HTTP transport
//! holds one composite limiter and calls its
//! [`limit`](limiter::Limiter::limit) immediately before each outbound
//! request.

pub mod backstop;
pub mod clock;
pub mod config;
pub mod error;
pub mod limiter;
