use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use trinity_rpc::call::{GetBalance, GetBlock, ListTransactions, SendToAddress};
use trinity_rpc::{Backend, Client, Credentials, Error, ErrorKind};

// "user:pass"
const BASIC_USER_PASS: &str = "Basic dXNlcjpwYXNz";

fn client_for(server: &ServerGuard) -> Client {
    let addr = server.host_with_port();
    let (host, port) = addr.rsplit_once(':').unwrap();
    let client = Client::new().unwrap();
    client.configure(Credentials::new(host, port.parse().unwrap(), "user", "pass", false));
    client
}

#[test]
fn getbalance_against_stub_node() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/")
        .match_header("content-type", "application/json")
        .match_header("authorization", BASIC_USER_PASS)
        .match_body(Matcher::Exact(
            r#"{"method":"getbalance","params":[],"id":1}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"result": 12.5, "error": null, "id":1}"#)
        .create();

    let client = client_for(&server);
    let value = client.call("getbalance", &[]).unwrap();
    assert_eq!(value, json!(12.5));
    mock.assert();
}

#[test]
fn unconfigured_client_makes_no_request() {
    let mut server = Server::new();
    let mock = server.mock("POST", "/").expect(0).create();

    let client = Client::new().unwrap();
    let addr = server.host_with_port();
    let (host, port) = addr.rsplit_once(':').unwrap();
    client.configure(Credentials::new(host, port.parse().unwrap(), "user", "", false));

    let err = client.call("getbalance", &[]).unwrap_err();
    assert!(matches!(err, Error::NotConfigured));
    assert_eq!(err.kind(), ErrorKind::Configuration);
    mock.assert();
}

#[test]
fn positional_params_are_sent_in_order() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::Exact(
            r#"{"method":"listtransactions","params":["*",10,0],"id":1}"#.to_string(),
        ))
        .with_body(
            json!({
                "result": [
                    {"category": "receive", "amount": 2.0, "address": "TAddr", "txid": "ff01", "time": 1700000000},
                    {"category": "send", "amount": -1.0, "address": "TOther", "txid": "ff02", "time": 1700000100}
                ],
                "error": null,
                "id": 1
            })
            .to_string(),
        )
        .create();

    let client = client_for(&server);
    let txs = client.request(ListTransactions::default()).unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].category.as_deref(), Some("receive"));
    assert_eq!(txs[1].amount, Some(-1.0));
    mock.assert();
}

#[test]
fn node_error_object_becomes_application_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/")
        .with_status(500)
        .with_body(r#"{"result": null, "error": {"code": -6, "message": "insufficient funds"}, "id": 1}"#)
        .create();

    let client = client_for(&server);
    let err = client
        .request(SendToAddress::new("TAddr", 1000.0))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Application);
    assert_eq!(err.to_string(), "insufficient funds");
    match err {
        Error::Rpc(rpc) => assert_eq!(rpc.code, Some(-6)),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn scalar_error_becomes_application_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/")
        .with_body(r#"{"error": "bad request", "id": 1}"#)
        .create();

    let client = client_for(&server);
    let err = client.call("getblock", &[json!("00")]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Application);
    assert_eq!(err.to_string(), "bad request");
}

#[test]
fn rejected_credentials_surface_as_protocol_error() {
    let mut server = Server::new();
    let _mock = server.mock("POST", "/").with_status(401).with_body("").create();

    let client = client_for(&server);
    let err = client.call("getinfo", &[]).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert_eq!(err.to_string(), "Unable to parse RPC response.");
}

#[test]
fn non_object_reply_is_unexpected() {
    let mut server = Server::new();
    let _mock = server.mock("POST", "/").with_body("[1,2,3]").create();

    let client = client_for(&server);
    let err = client.call("getinfo", &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(err.to_string(), "Unexpected RPC response.");
}

#[test]
fn missing_result_and_error_is_null_success() {
    let mut server = Server::new();
    let _mock = server.mock("POST", "/").with_body(r#"{"id": 1}"#).create();

    let client = client_for(&server);
    assert_eq!(client.call("getinfo", &[]).unwrap(), serde_json::Value::Null);
}

#[test]
fn typed_reply_shape_mismatch_is_protocol_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/")
        .with_body(r#"{"result": {"unexpected": true}, "error": null, "id": 1}"#)
        .create();

    let client = client_for(&server);
    let err = client.request(GetBalance).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
    assert_eq!(err.kind(), ErrorKind::Protocol);

    let err = client
        .request(GetBlock {
            hash: "00ab".to_string(),
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[test]
fn redirects_are_not_followed() {
    let mut server = Server::new();
    let moved = server.mock("POST", "/moved").expect(0).create();
    let _mock = server
        .mock("POST", "/")
        .with_status(302)
        .with_header("location", &format!("{}/moved", server.url()))
        .create();

    let client = client_for(&server);
    let err = client.call("getinfo", &[]).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert_eq!(err.kind(), ErrorKind::Protocol);
    moved.assert();
}
