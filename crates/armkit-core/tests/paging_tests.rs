//! Integration tests for nextLink paging using a mock server

use std::sync::Arc;

use armkit_core::{
    CoreError, HttpInvoker, Invoker, Page, PageSequence, Request, next_link_pages,
};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API: &str = "2019-11-01";

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    name: String,
}

fn items(names: &[&str]) -> Vec<Item> {
    names
        .iter()
        .map(|n| Item {
            name: n.to_string(),
        })
        .collect()
}

fn body(names: &[&str], next: Option<String>) -> serde_json::Value {
    let value: Vec<_> = names.iter().map(|n| json!({"name": n})).collect();
    match next {
        Some(link) => json!({"value": value, "nextLink": link}),
        None => json!({"value": value}),
    }
}

fn sequence(server: &MockServer) -> PageSequence<Item> {
    let invoker: Arc<dyn Invoker> = Arc::new(HttpInvoker::new().unwrap());
    let url = Url::parse(&format!("{}/disks?api-version={API}", server.uri())).unwrap();
    next_link_pages(invoker, Request::get(url), Some(API.to_string()))
}

/// First page plus pages reached through `$skiptoken=<n>`
async fn mount_pages(server: &MockServer, pages: &[&[&str]]) {
    for (index, names) in pages.iter().enumerate() {
        let next = (index + 1 < pages.len())
            .then(|| format!("{}/disks?api-version={API}&$skiptoken={}", server.uri(), index + 1));
        let mock = Mock::given(method("GET")).and(path("/disks"));
        let mock = if index == 0 {
            mock.respond_with(ResponseTemplate::new(200).set_body_json(body(names, next)))
                .with_priority(5)
        } else {
            mock.and(query_param("$skiptoken", index.to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(body(names, next)))
                .with_priority(1)
        };
        mock.expect(1).mount(server).await;
    }
}

// ---------------------------------------------------------------------------
// Ordering and laziness
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pages_concatenate_in_order() {
    let server = MockServer::start().await;
    mount_pages(&server, &[&["a", "b"], &["c"], &["d", "e"]]).await;

    let all: Vec<Item> = sequence(&server).into_stream().try_collect().await.unwrap();
    assert_eq!(all, items(&["a", "b", "c", "d", "e"]));
}

#[tokio::test]
async fn empty_page_with_link_continues() {
    let server = MockServer::start().await;
    mount_pages(&server, &[&[], &["only"]]).await;

    let all = sequence(&server).collect_all().await.unwrap();
    assert_eq!(all, items(&["only"]));
}

#[tokio::test]
async fn single_empty_page_is_an_empty_listing() {
    let server = MockServer::start().await;
    mount_pages(&server, &[&[]]).await;

    let mut pages = sequence(&server);
    let page: Page<Item> = pages.next_page().await.unwrap().unwrap();
    assert!(page.items().is_empty());
    assert_eq!(page.continuation_token(), None);
    assert!(pages.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn nothing_is_fetched_until_pulled() {
    let server = MockServer::start().await;
    mount_pages(&server, &[&["a", "b"], &["c"]]).await;

    let mut pages = sequence(&server);
    assert!(server.received_requests().await.unwrap().is_empty());

    assert_eq!(pages.next_item().await.unwrap(), Some(Item { name: "a".into() }));
    assert_eq!(pages.next_item().await.unwrap(), Some(Item { name: "b".into() }));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    assert_eq!(pages.next_item().await.unwrap(), Some(Item { name: "c".into() }));
    assert_eq!(pages.next_item().await.unwrap(), None);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Continuation requests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn next_link_without_api_version_gets_one() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/disks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(
            &["a"],
            Some(format!("{}/disks?$skiptoken=xyz", server.uri())),
        )))
        .with_priority(5)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/disks"))
        .and(query_param("$skiptoken", "xyz"))
        .and(query_param("api-version", API))
        .and(header("x-ms-client-request-id", "req-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(&["b"], None)))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    let invoker: Arc<dyn Invoker> = Arc::new(HttpInvoker::new().unwrap());
    let url = Url::parse(&format!("{}/disks?api-version={API}", server.uri())).unwrap();
    let first = Request::get(url)
        .with_header("x-ms-client-request-id", "req-1")
        .unwrap();
    let all = next_link_pages::<Item>(invoker, first, Some(API.to_string()))
        .collect_all()
        .await
        .unwrap();
    assert_eq!(all, items(&["a", "b"]));
}

#[tokio::test]
async fn empty_next_link_ends_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/disks"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"value": [{"name": "a"}], "nextLink": ""})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let all = sequence(&server).collect_all().await.unwrap();
    assert_eq!(all, items(&["a"]));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mid_stream_error_keeps_earlier_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/disks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(
            &["a", "b"],
            Some(format!("{}/disks?api-version={API}&$skiptoken=1", server.uri())),
        )))
        .with_priority(5)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("$skiptoken", "1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"code": "InternalServerError", "message": "try again"}
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    let mut pages = sequence(&server);
    let mut seen = Vec::new();
    let err = loop {
        match pages.next_item().await {
            Ok(Some(item)) => seen.push(item),
            Ok(None) => panic!("listing should fail before it ends"),
            Err(e) => break e,
        }
    };

    assert_eq!(seen, items(&["a", "b"]));
    assert!(err.is_server_error());
    assert!(err.is_retryable());
    assert_eq!(pages.next_item().await.unwrap(), None);
}

#[tokio::test]
async fn missing_value_array_is_shape_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/disks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let err = sequence(&server).collect_all().await.unwrap_err();
    assert!(matches!(err, CoreError::UnexpectedResponseShape(_)));
}

// ---------------------------------------------------------------------------
// Blocking API
// ---------------------------------------------------------------------------

#[test]
fn blocking_iterators_walk_all_pages() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        mount_pages(&server, &[&["a"], &["b", "c"]]).await;
        server
    });

    let names: Vec<String> = sequence(&server)
        .blocking_items()
        .map(|item| item.map(|i| i.name))
        .collect::<armkit_core::Result<_>>()
        .unwrap();
    assert_eq!(names, vec!["a", "b", "c"]);

    rt.block_on(async move { drop(server) });
}

#[test]
fn blocking_pages_report_tokens() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        mount_pages(&server, &[&["a"], &["b"]]).await;
        server
    });

    let pages: Vec<Page<Item>> = sequence(&server)
        .blocking_pages()
        .collect::<armkit_core::Result<_>>()
        .unwrap();
    assert_eq!(pages.len(), 2);
    assert!(pages[0].continuation_token().unwrap().contains("$skiptoken=1"));
    assert!(pages[1].continuation_token().is_none());

    rt.block_on(async move { drop(server) });
}
