//! Orchestrator tests against a recording mock transport.

use async_trait::async_trait;
use gemini_chat::{
    BasicRequestValidator, ChatModel, ChatRequest, GeminiError, HttpTransport, Model, Request,
    RequestBody, RequestValidator, TransportRequest, TransportResponse,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Records every dispatched request and replays a scripted result.
struct MockTransport {
    recorded: Mutex<Vec<TransportRequest>>,
    result: Mutex<Option<Result<TransportResponse, GeminiError>>>,
}

impl MockTransport {
    fn returning(result: Result<TransportResponse, GeminiError>) -> Arc<Self> {
        Arc::new(Self {
            recorded: Mutex::new(Vec::new()),
            result: Mutex::new(Some(result)),
        })
    }

    fn invocations(&self) -> usize {
        self.recorded.lock().unwrap().len()
    }

    fn last_request(&self) -> TransportRequest {
        self.recorded.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, GeminiError> {
        self.recorded.lock().unwrap().push(request);
        self.result.lock().unwrap().take().unwrap()
    }
}

/// Validator that lets everything through, for exercising orchestrator
/// behavior the default validator would reject first.
struct AllowAll;

impl RequestValidator for AllowAll {
    fn validate(&self, _request: &dyn Request) -> Result<(), GeminiError> {
        Ok(())
    }
}

fn ok_response(status: u16, body: &str) -> TransportResponse {
    TransportResponse {
        status,
        headers: HashMap::new(),
        body: body.to_string(),
    }
}

fn valid_request() -> ChatRequest {
    ChatRequest::post(
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent?key=",
        "secret",
        RequestBody::from_text("Hello, can you assist me?"),
    )
    .with_header("Content-Type", "application/json")
}

fn model_with(transport: Arc<MockTransport>) -> ChatModel {
    ChatModel::new(transport, Arc::new(BasicRequestValidator))
}

#[tokio::test]
async fn maps_a_successful_response() {
    let fixture = r#"{
        "candidates": [ { "content": { "parts": [ { "text": "Hi" } ] } } ],
        "model": "v1"
    }"#;
    let transport = MockTransport::returning(Ok(ok_response(200, fixture)));
    let model = model_with(transport.clone());

    let response = model.call(&valid_request()).await.unwrap();

    assert!(response.is_successful());
    assert_eq!(response.status_code(), 200);
    let body = response.body().unwrap();
    assert_eq!(body.candidates().len(), 1);
    assert_eq!(body.text(), Some("Hi"));
    assert_eq!(body.model_version(), "v1");
    assert_eq!(transport.invocations(), 1);
}

#[tokio::test]
async fn unparsable_body_maps_to_empty_body_not_an_error() {
    let transport = MockTransport::returning(Ok(ok_response(404, "<html>not found</html>")));
    let model = model_with(transport);

    let response = model.call(&valid_request()).await.unwrap();

    assert!(!response.is_successful());
    assert_eq!(response.status_code(), 404);
    let body = response.body().unwrap();
    assert!(body.candidates().is_empty());
    assert_eq!(body.model_version(), "unknown");
    assert!(body.usage_metadata().is_none());
}

#[tokio::test]
async fn transport_failure_becomes_a_synthetic_500_response() {
    let transport = MockTransport::returning(Err(GeminiError::transport("connection refused")));
    let model = model_with(transport);

    let response = model.call(&valid_request()).await.unwrap();

    assert_eq!(response.status_code(), 500);
    assert!(!response.is_successful());
    assert_eq!(response.error_message(), Some("connection refused"));

    let body = response.body().unwrap();
    assert_eq!(body.model_version(), "gemini-flash-1.5");
    assert_eq!(body.candidates().len(), 1);
    let candidate = &body.candidates()[0];
    assert_eq!(candidate.finish_reason(), Some("ERROR"));
    assert_eq!(candidate.avg_logprobs(), Some(0.0));
    assert_eq!(body.text(), Some("connection refused"));
}

#[tokio::test]
async fn validation_failure_propagates_before_any_dispatch() {
    let transport = MockTransport::returning(Ok(ok_response(200, "{}")));
    let model = model_with(transport.clone());

    let request = valid_request().with_header("Content-Type", "text/plain");
    let error = model.call(&request).await.unwrap_err();

    match error {
        GeminiError::Validation(reason) => {
            assert_eq!(reason, "Invalid or missing Content-Type header");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(transport.invocations(), 0);
}

#[tokio::test]
async fn authorization_header_is_stripped_before_dispatch() {
    let transport = MockTransport::returning(Ok(ok_response(200, "{}")));
    let model = model_with(transport.clone());

    let request = valid_request().with_header("Authorization", "Bearer token");
    model.call(&request).await.unwrap();

    let dispatched = transport.last_request();
    assert!(!dispatched.headers.contains_key("Authorization"));
    assert_eq!(
        dispatched.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
}

#[tokio::test]
async fn content_type_is_defaulted_when_the_request_has_none() {
    // The default validator would reject this request, so use the
    // permissive one to observe the header defaulting on its own.
    let transport = MockTransport::returning(Ok(ok_response(200, "{}")));
    let model = ChatModel::new(transport.clone(), Arc::new(AllowAll));

    let request = ChatRequest::post(
        "https://example.com/chat?key=",
        "k",
        RequestBody::from_text("Hi"),
    );
    model.call(&request).await.unwrap();

    assert_eq!(
        transport
            .last_request()
            .headers
            .get("Content-Type")
            .map(String::as_str),
        Some("application/json")
    );
}

#[tokio::test]
async fn dispatch_uses_the_resolved_endpoint_and_serialized_body() {
    let transport = MockTransport::returning(Ok(ok_response(200, "{}")));
    let model = model_with(transport.clone());

    let request = valid_request().with_parameter("alt", "json");
    model.call(&request).await.unwrap();

    let dispatched = transport.last_request();
    assert_eq!(dispatched.method, "POST");
    assert!(dispatched.url.ends_with("?alt=json"));
    assert_eq!(
        dispatched.body.unwrap(),
        serde_json::json!({
            "contents": [ { "parts": [ { "text": "Hello, can you assist me?" } ] } ]
        })
    );
}

#[tokio::test]
async fn multi_valued_response_headers_keep_the_first_value() {
    let fixture = r#"{ "candidates": [], "model": "v1" }"#;
    let mut headers = HashMap::new();
    headers.insert(
        "x-request-id".to_string(),
        vec!["first".to_string(), "second".to_string()],
    );
    headers.insert("x-empty".to_string(), Vec::new());

    let transport = MockTransport::returning(Ok(TransportResponse {
        status: 200,
        headers,
        body: fixture.to_string(),
    }));
    let model = model_with(transport);

    let response = model.call(&valid_request()).await.unwrap();
    assert_eq!(
        response.headers().get("x-request-id").map(String::as_str),
        Some("first")
    );
    assert_eq!(
        response.headers().get("x-empty").map(String::as_str),
        Some("")
    );
}
