use dogstatsd_client::prelude::*;
use dogstatsd_client::{SampleRate, TagSet};
use std::net::UdpSocket;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub const NUM_THREADS: u64 = 10;
pub const NUM_ITERATIONS: u64 = 100;

#[allow(dead_code)]
pub fn run_mutex_threaded_test<T>(client: T, num_threads: u64, iterations: u64)
where
    T: DogStatsd + Send + 'static,
{
    let shared_client = Arc::new(Mutex::new(client));

    let threads: Vec<_> = (0..num_threads)
        .map(|_| {
            let local_client = Arc::clone(&shared_client);

            thread::spawn(move || {
                let tags = TagSet::keyed(vec![("thread", "worker")]);

                for i in 0..iterations {
                    let mut client = local_client.lock().unwrap();
                    client.counter("some.counter", i as i64, &tags, SampleRate::ALWAYS).unwrap();
                    client.gauge("some.gauge", i, &tags, SampleRate::ALWAYS).unwrap();
                    client.gauge("some.gauge", i as f64, &tags, SampleRate::ALWAYS).unwrap();
                    client.histogram("some.histogram", i, &tags, SampleRate::ALWAYS).unwrap();
                    client.set("some.set", i as i64, &tags, SampleRate::ALWAYS).unwrap();
                    drop(client);
                    thread::sleep(Duration::from_millis(1));
                }
            })
        })
        .collect();

    for t in threads {
        t.join().unwrap();
    }
}

/// Bind a UDP socket on localhost that gives up waiting after a second.
#[allow(dead_code)]
pub fn new_udp_receiver() -> UdpSocket {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket.set_read_timeout(Some(Duration::from_secs(1))).unwrap();
    socket
}

#[allow(dead_code)]
pub fn recv_datagram(socket: &UdpSocket) -> String {
    let mut buf = [0u8; 8192];
    let n = socket.recv(&mut buf).unwrap();
    String::from_utf8(buf[..n].to_vec()).unwrap()
}
