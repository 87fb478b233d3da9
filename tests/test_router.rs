use std::collections::HashMap;
use std::net::SocketAddr;

use comet::http::request::{Method, Request};
use comet::http::response::Response;
use comet::router::{RouteError, RouteTable, RouterError, Subrouter, into_handler};

fn request(path: &str, method: Method) -> Request {
    let peer: SocketAddr = "127.0.0.1:45000".parse().unwrap();
    Request {
        method,
        path: path.to_string(),
        query: HashMap::new(),
        headers: HashMap::new(),
        remote_addr: peer,
        body: None,
    }
}

fn text_handler(body: &'static str) -> comet::router::Handler {
    into_handler(move |_req| async move { Ok(Response::text(body)) })
}

#[test]
fn test_register_and_resolve() {
    let mut table = RouteTable::new();
    table
        .register("/hello", Method::GET, "text/plain", text_handler("hi"))
        .unwrap();

    let (entry, subroute) = table.resolve("/hello", Method::GET).unwrap();
    assert_eq!(entry.path, "/hello");
    assert_eq!(subroute.content_type, "text/plain");
}

#[tokio::test]
async fn test_resolved_handler_is_the_registered_one() {
    let mut table = RouteTable::new();
    table
        .register("/hello", Method::GET, "text/plain", text_handler("hi"))
        .unwrap();

    let (_, subroute) = table.resolve("/hello", Method::GET).unwrap();
    let response = (*subroute.handler)(request("/hello", Method::GET))
        .await
        .unwrap();

    match response.body {
        comet::http::response::Body::Text(text) => assert_eq!(text, "hi"),
        other => panic!("expected text body, got {other:?}"),
    }
}

#[test]
fn test_resolve_unknown_path_is_not_found() {
    let table = RouteTable::new();
    let result = table.resolve("/missing", Method::GET);

    assert_eq!(result.err(), Some(RouteError::NotFound));
}

#[test]
fn test_resolve_unregistered_method_is_method_not_allowed() {
    let mut table = RouteTable::new();
    table
        .register("/hello", Method::GET, "text/plain", text_handler("hi"))
        .unwrap();

    let result = table.resolve("/hello", Method::POST);
    assert_eq!(result.err(), Some(RouteError::MethodNotAllowed));
}

#[test]
fn test_multiple_methods_on_one_path() {
    let mut table = RouteTable::new();
    table
        .register("/item", Method::GET, "text/plain", text_handler("get"))
        .unwrap();
    table
        .register("/item", Method::POST, "application/json", text_handler("post"))
        .unwrap();

    let (_, get) = table.resolve("/item", Method::GET).unwrap();
    let (_, post) = table.resolve("/item", Method::POST).unwrap();
    assert_eq!(get.content_type, "text/plain");
    assert_eq!(post.content_type, "application/json");
}

#[test]
fn test_duplicate_registration_fails_and_keeps_original() {
    let mut table = RouteTable::new();
    table
        .register("/hello", Method::GET, "text/plain", text_handler("first"))
        .unwrap();

    let result = table.register("/hello", Method::GET, "text/html", text_handler("second"));
    assert!(matches!(
        result,
        Err(RouterError::DuplicateRoute { .. })
    ));

    // Original registration untouched
    let (_, subroute) = table.resolve("/hello", Method::GET).unwrap();
    assert_eq!(subroute.content_type, "text/plain");
}

#[test]
fn test_registration_normalizes_trailing_slash() {
    let mut table = RouteTable::new();
    table
        .register("/users/", Method::GET, "text/plain", text_handler("u"))
        .unwrap();

    assert!(table.resolve("/users", Method::GET).is_ok());
}

#[test]
fn test_subrouter_prefixes_routes_at_registration() {
    let mut api = Subrouter::new("/api");
    api.route("/list", "application/json", Method::GET, |_req| async {
        Ok(Response::text("[]"))
    })
    .unwrap();

    let mut table = RouteTable::new();
    table.merge(api.into_table()).unwrap();

    assert!(table.resolve("/api/list", Method::GET).is_ok());
    assert_eq!(
        table.resolve("/list", Method::GET).err(),
        Some(RouteError::NotFound)
    );
}

#[test]
fn test_subrouter_with_root_slash_adds_no_prefix() {
    let mut sub = Subrouter::new("/");
    sub.route("/list", "text/plain", Method::GET, |_req| async {
        Ok(Response::text("[]"))
    })
    .unwrap();

    let mut table = RouteTable::new();
    table.merge(sub.into_table()).unwrap();

    assert!(table.resolve("/list", Method::GET).is_ok());
}

#[test]
fn test_merge_combines_methods_on_shared_path() {
    let mut table = RouteTable::new();
    table
        .register("/shared", Method::GET, "text/plain", text_handler("get"))
        .unwrap();

    let mut other = RouteTable::new();
    other
        .register("/shared", Method::POST, "text/plain", text_handler("post"))
        .unwrap();

    table.merge(other).unwrap();
    assert!(table.resolve("/shared", Method::GET).is_ok());
    assert!(table.resolve("/shared", Method::POST).is_ok());
}

#[test]
fn test_merge_duplicate_method_fails() {
    let mut table = RouteTable::new();
    table
        .register("/shared", Method::GET, "text/plain", text_handler("a"))
        .unwrap();

    let mut other = RouteTable::new();
    other
        .register("/shared", Method::GET, "text/plain", text_handler("b"))
        .unwrap();

    assert!(matches!(
        table.merge(other),
        Err(RouterError::DuplicateRoute { .. })
    ));
}

#[test]
fn test_default_headers_merged_into_entries() {
    let mut table = RouteTable::new();
    table
        .register("/hello", Method::GET, "text/plain", text_handler("hi"))
        .unwrap();

    let mut defaults = HashMap::new();
    defaults.insert("server".to_string(), "comet".to_string());
    table.apply_default_headers(&defaults);

    let (entry, _) = table.resolve("/hello", Method::GET).unwrap();
    assert_eq!(entry.default_headers.get("server").unwrap(), "comet");
}

#[test]
fn test_registered_methods_listing() {
    let mut table = RouteTable::new();
    table
        .register("/item", Method::GET, "text/plain", text_handler("g"))
        .unwrap();
    table
        .register("/item", Method::DELETE, "text/plain", text_handler("d"))
        .unwrap();

    let (entry, _) = table.resolve("/item", Method::GET).unwrap();
    let mut methods: Vec<Method> = entry.registered_methods().collect();
    methods.sort_by_key(|m| m.as_str());

    assert_eq!(methods, vec![Method::DELETE, Method::GET]);
}
