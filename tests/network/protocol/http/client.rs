use crate::mock::{MockConnection, MockNetwork};
use rawhttp::network::application::http::{Client, Config, Error, HeaderMap, ResponseBody};
use rawhttp::network::error::Error as TransportError;
use serde_json::json;
use std::time::Duration;

const OK_EMPTY: &[u8] = b"HTTP/1.0 200 OK\r\nContent-Length: 0\r\n\r\n";

fn client(connections: impl IntoIterator<Item = MockConnection>) -> Client<MockNetwork> {
    Client::with_connector(Config::new("api.local", 8080), MockNetwork::new(connections))
}

#[tokio::test]
async fn test_get_with_query_and_headers() {
    let conn = MockConnection::new().respond(
        b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 13\r\n\r\n{\"items\":[1]}",
    );
    let wire = conn.wire();
    let client = client([conn]);

    let response = client
        .get("/items")
        .query("page", "2")
        .query("size", "10")
        .header("Accept", "application/json")
        .send()
        .await
        .unwrap();

    assert_eq!(*response.body(), ResponseBody::Decoded(json!({"items": [1]})));
    let wire = wire.lock().unwrap();
    assert_eq!(
        wire.written,
        b"GET /items?page=2&size=10 HTTP/1.0\r\nHost: api.local\r\nAccept: application/json\r\n\r\n"
    );
    assert!(wire.closed);
    assert_eq!(
        *client.config(),
        Config::new("api.local", 8080),
        "client configuration is never touched by a request"
    );
}

#[tokio::test]
async fn test_post_body_over_a_slow_socket() {
    let conn = MockConnection::new()
        .max_write(4)
        .stall_writes()
        .respond_in_chunks(b"HTTP/1.0 201 Created\r\nContent-Length: 2\r\n\r\nok", 3);
    let wire = conn.wire();
    let client = client([conn]);

    let response = client
        .post("/items")
        .header("Content-Type", "application/json")
        .body(r#"{"name":"lamp"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.code(), 201);
    assert_eq!(response.text().unwrap(), "ok");
    assert_eq!(
        String::from_utf8(wire.lock().unwrap().written.clone()).unwrap(),
        "POST /items HTTP/1.0\r\n\
         Host: api.local\r\n\
         Content-Type: application/json\r\n\
         Content-Length: 15\r\n\
         \r\n\
         {\"name\":\"lamp\"}"
    );
}

#[tokio::test]
async fn test_put_sends_its_verb() {
    let conn = MockConnection::new().respond(OK_EMPTY);
    let wire = conn.wire();
    let client = client([conn]);

    client.put("/items/7").body("x").send().await.unwrap();

    assert!(wire.lock().unwrap().written.starts_with(b"PUT /items/7 HTTP/1.0\r\n"));
}

#[tokio::test]
async fn test_caller_headers_are_not_mutated() {
    let conn = MockConnection::new().respond(OK_EMPTY);
    let client = client([conn]);
    let headers = HeaderMap::from([("X-Api-Key", "secret")]);

    let request = client.post("/p").headers(headers.clone()).body("abc").build();
    assert_eq!(request.headers, headers);
    assert!(client.execute(request.clone()).await.is_ok());
    assert!(!request.headers.contains_key("Content-Length"));
}

#[tokio::test]
async fn test_each_request_gets_a_fresh_connection() {
    let first = MockConnection::new().respond(OK_EMPTY);
    let second = MockConnection::new().respond(OK_EMPTY);
    let (first_wire, second_wire) = (first.wire(), second.wire());
    let client = client([first, second]);

    let (a, b) = tokio::join!(client.get("/a").send(), client.get("/b").send());
    assert!(a.is_ok() && b.is_ok());

    assert!(first_wire.lock().unwrap().closed);
    assert!(second_wire.lock().unwrap().closed);
    assert_eq!(
        *client.connector().connects.lock().unwrap(),
        vec![("api.local".to_string(), 8080, false); 2]
    );
}

#[tokio::test]
async fn test_connection_closed_after_a_failed_response() {
    let conn = MockConnection::new().respond(b"HTTP/1.0 200 OK\r\n\r\nbody");
    let wire = conn.wire();
    let client = client([conn]);

    let err = client.get("/").send().await.unwrap_err();
    assert!(matches!(err, Error::MissingContentLength));
    assert!(wire.lock().unwrap().closed);
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let client = client([]);
    let err = client.get("/").send().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::NoAddress { port: 8080, .. })
    ));
}

#[tokio::test]
async fn test_ssl_flag_reaches_the_connector() {
    let network = MockNetwork::new([MockConnection::new().respond(OK_EMPTY)]);
    let client = Client::with_connector(Config::new("secure.local", 443).with_ssl(true), network);

    client.get("/").send().await.unwrap();

    assert_eq!(
        *client.connector().connects.lock().unwrap(),
        [("secure.local".to_string(), 443, true)]
    );
}

#[tokio::test]
async fn test_stalled_peer_hits_the_timeout() {
    let conn = MockConnection::new().stall();
    let wire = conn.wire();
    let client = Client::with_connector(
        Config::new("api.local", 8080).with_timeout(Duration::from_millis(50)),
        MockNetwork::new([conn]),
    );

    let err = client.get("/slow").send().await.unwrap_err();
    assert!(matches!(err, Error::Timeout(limit) if limit == Duration::from_millis(50)));
    // The request itself went out before the wait started.
    assert!(wire.lock().unwrap().written.starts_with(b"GET /slow HTTP/1.0"));
}
