// dogstatsd-client - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

use crate::sinks::core::MetricSink;

/// Attempt to convert anything implementing the `ToSocketAddrs` trait
/// into a concrete `SocketAddr` instance.
fn get_addr<A: ToSocketAddrs>(addr: A) -> io::Result<SocketAddr> {
    addr.to_socket_addrs()?
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "No socket addresses yielded"))
}

/// Implementation of a `MetricSink` that emits each line as a single UDP
/// datagram.
///
/// Unlike a long lived socket, this sink opens a new ephemeral socket for
/// every call to `.emit()` and closes it before returning, on success and
/// on failure alike. Nothing is held open between sends.
///
/// In non-blocking mode a full kernel send buffer results in an error
/// (`WouldBlock`) rather than the caller waiting. In blocking mode the call
/// waits until the OS accepts the datagram.
#[derive(Debug, Clone)]
pub struct UdpMetricSink {
    addr: SocketAddr,
    nonblocking: bool,
}

impl UdpMetricSink {
    /// Construct a sink that sends using a blocking socket.
    ///
    /// # Failures
    ///
    /// This method may fail if:
    ///
    /// * It is unable to resolve the hostname of the metric server.
    /// * The host address is otherwise unable to be parsed
    pub fn blocking<A: ToSocketAddrs>(to_addr: A) -> io::Result<UdpMetricSink> {
        Self::new(to_addr, false)
    }

    /// Construct a sink that sends using a non-blocking socket.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dogstatsd_client::{MetricSink, UdpMetricSink, DEFAULT_PORT};
    ///
    /// let sink = UdpMetricSink::non_blocking(("127.0.0.1", DEFAULT_PORT)).unwrap();
    /// sink.emit("some.counter:1|c").unwrap();
    /// ```
    ///
    /// # Failures
    ///
    /// Same as [`UdpMetricSink::blocking`].
    pub fn non_blocking<A: ToSocketAddrs>(to_addr: A) -> io::Result<UdpMetricSink> {
        Self::new(to_addr, true)
    }

    fn new<A: ToSocketAddrs>(to_addr: A, nonblocking: bool) -> io::Result<UdpMetricSink> {
        let addr = get_addr(to_addr)?;
        Ok(UdpMetricSink { addr, nonblocking })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn is_nonblocking(&self) -> bool {
        self.nonblocking
    }

    fn bind(&self) -> io::Result<UdpSocket> {
        let local: SocketAddr = if self.addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(local)?;
        socket.set_nonblocking(self.nonblocking)?;
        Ok(socket)
    }
}

impl MetricSink for UdpMetricSink {
    fn emit(&self, metric: &str) -> io::Result<usize> {
        // The socket is dropped, and so closed, on every path out of here
        let socket = self.bind()?;
        socket.send_to(metric.as_bytes(), self.addr)
    }
}
