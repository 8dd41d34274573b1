//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::net::TcpListener;

/// Start an endpoint that accepts and immediately closes connections,
/// counting how many it accepted.
pub async fn start_endpoint() -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    counter.fetch_add(1, Ordering::SeqCst);
                    drop(stream);
                }
                Err(_) => break,
            }
        }
    });

    (addr, accepted)
}

/// Reserve an address that is guaranteed closed, by binding a listener
/// and dropping it.
#[allow(dead_code)]
pub async fn closed_endpoint() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
