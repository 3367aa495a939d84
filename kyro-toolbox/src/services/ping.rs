//! Reachability primitives: TCP connect and ICMP echo.
//!
//! Neither function applies a timeout of its own; callers race them against one and
//! dropping the future closes the socket.

use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};

use tokio::net::TcpStream;

use crate::error::{ToolboxError, ToolboxResult};

/// Echo payload (32 bytes).
const ICMP_PAYLOAD: &[u8] = b"abcdefghijklmnopqrstuvwabcdefghi";

/// Open a TCP connection to `addr:port` and close it again. Returns the connect time.
pub(crate) async fn tcp_ping(addr: IpAddr, port: u16) -> ToolboxResult<Duration> {
    let target = SocketAddr::new(addr, port);
    let started = Instant::now();
    let stream = TcpStream::connect(target)
        .await
        .map_err(|e| ToolboxError::NetworkError(format!("TCP connect to {target} failed: {e}")))?;
    drop(stream);
    Ok(started.elapsed())
}

/// Send one ICMP echo request to `addr`. Returns the round-trip time.
///
/// Requires raw-socket privileges (or unprivileged ICMP sockets on Linux).
pub(crate) async fn icmp_ping(addr: IpAddr) -> ToolboxResult<Duration> {
    let (_packet, rtt) = surge_ping::ping(addr, ICMP_PAYLOAD)
        .await
        .map_err(|e| ToolboxError::NetworkError(format!("ICMP echo to {addr} failed: {e}")))?;
    Ok(rtt)
}
