//! Cooperative polling over non-blocking connections.
//!
//! Every attempt is followed by a yield to the scheduler, whether or not it made
//! progress. There is no readiness wait and no deadline here; a stalled peer keeps
//! the task polling until an outer timeout (if any) drops it.

use tokio::task::yield_now;

use crate::network::error::Error;
use crate::network::{Read, Write};

/// Write all of `buf`, however many attempts the connection needs.
///
/// A write that accepts zero bytes of a non-empty remainder means the peer is
/// gone and ends the loop with [`Error::ConnectionClosed`].
pub(crate) async fn write_all<W: Write + ?Sized>(conn: &mut W, buf: &[u8]) -> Result<(), Error> {
    let mut written = 0;
    while written < buf.len() {
        match conn.write(&buf[written..]) {
            Ok(0) => return Err(Error::ConnectionClosed),
            Ok(n) => written += n,
            Err(Error::WouldBlock) => {}
            Err(e) => return Err(e),
        }
        yield_now().await;
    }
    Ok(())
}

/// Flush until the connection reports nothing left to push.
pub(crate) async fn flush<W: Write + ?Sized>(conn: &mut W) -> Result<(), Error> {
    loop {
        match conn.flush() {
            Ok(()) => return Ok(()),
            Err(Error::WouldBlock) => yield_now().await,
            Err(e) => return Err(e),
        }
    }
}

/// Read into `buf` once data is available. `Ok(0)` means end of stream.
pub(crate) async fn read_some<R: Read + ?Sized>(conn: &mut R, buf: &mut [u8]) -> Result<usize, Error> {
    loop {
        match conn.read(buf) {
            Err(Error::WouldBlock) => yield_now().await,
            other => return other,
        }
    }
}
