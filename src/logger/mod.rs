//! Logger module
//!
//! Small stdout/stderr logger: startup banner, per-request access lines,
//! error and warning lines. Access lines carry a CLF-style local
//! timestamp.

use std::net::SocketAddr;

use chrono::Local;

use crate::config::Config;

fn timestamp() -> String {
    Local::now().format("%d/%b/%Y:%H:%M:%S %z").to_string()
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    let scheme = if config.tls.is_some() { "https" } else { "http" };
    println!("======================================");
    println!("Static file server started successfully");
    println!("Listening on: {scheme}://{addr}");
    println!("Static root: {}", config.static_files.root);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

/// One line per handled request, written after the response is built
pub fn log_access(method: &hyper::Method, path: &str, status: u16) {
    println!("[{}] \"{method} {path}\" {status}", timestamp());
}
