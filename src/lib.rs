//! statichost
//!
//! A small HTTP(S) server that hosts a directory of demo pages during
//! development. Every request is answered with a file from the static root
//! or a bare 404; TLS is terminated when a key/cert pair is configured.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
