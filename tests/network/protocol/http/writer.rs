use crate::mock::MockConnection;
use futures::executor::block_on;
use rand::Rng;
use rawhttp::network::application::http::{Error, HeaderMap, Method, Request, RequestWriter};
use rawhttp::network::error::Error as TransportError;

fn post(body: &[u8]) -> Request {
    let mut request = Request::new(Method::Post, "/upload");
    request.parameters = vec![("id".into(), "42".into()), ("mode".into(), "raw".into())];
    request.headers = HeaderMap::from([("Content-Type", "application/octet-stream")]);
    request.body = body.to_vec();
    request
}

#[test]
fn test_head_and_body_survive_partial_writes() {
    let request = post(b"0123456789abcdef");
    let mut conn = MockConnection::new().max_write(3).stall_writes();
    let wire = conn.wire();

    block_on(RequestWriter::new(&mut conn).send("files.local", &request)).unwrap();

    let mut expected = request.head("files.local");
    expected.extend_from_slice(&request.body);
    let wire = wire.lock().unwrap();
    assert_eq!(wire.written, expected);
    assert!(wire.write_calls.iter().all(|&n| n <= 3));
    assert_eq!(wire.flushes, 1);
    assert_eq!(
        String::from_utf8_lossy(&wire.written[..]),
        "POST /upload?id=42&mode=raw HTTP/1.0\r\n\
         Host: files.local\r\n\
         Content-Type: application/octet-stream\r\n\
         Content-Length: 16\r\n\
         \r\n\
         0123456789abcdef"
    );
}

#[test]
fn test_random_write_limits() {
    let mut rng = rand::thread_rng();
    for _ in 0..32 {
        let body: Vec<u8> = (0..rng.gen_range(0..300)).map(|_| rng.r#gen()).collect();
        let request = post(&body);
        let mut conn = MockConnection::new().max_write(rng.gen_range(1..=17));
        let wire = conn.wire();

        block_on(RequestWriter::new(&mut conn).send("h", &request)).unwrap();

        let mut expected = request.head("h");
        expected.extend_from_slice(&body);
        assert_eq!(wire.lock().unwrap().written, expected);
    }
}

#[test]
fn test_empty_body_sends_only_the_head() {
    let request = Request::new(Method::Get, "/status");
    let mut conn = MockConnection::new().max_write(5);
    let wire = conn.wire();

    block_on(RequestWriter::new(&mut conn).send("svc", &request)).unwrap();

    assert_eq!(
        wire.lock().unwrap().written,
        b"GET /status HTTP/1.0\r\nHost: svc\r\n\r\n"
    );
}

#[test]
fn test_zero_byte_write_ends_the_request() {
    let request = post(b"payload");
    let mut conn = MockConnection::new().max_write(0);
    let wire = conn.wire();

    let err = block_on(RequestWriter::new(&mut conn).send("h", &request)).unwrap_err();

    assert!(matches!(err, Error::Transport(TransportError::ConnectionClosed)));
    let wire = wire.lock().unwrap();
    assert_eq!(wire.write_calls, [0]);
    assert_eq!(wire.flushes, 0);
}
