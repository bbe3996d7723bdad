use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use tower::ServiceExt;

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn soap_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "text/xml; charset=utf-8")
        .header(http::header::USER_AGENT, "api-test/0.1")
        .body(body.to_string())
        .unwrap()
}

#[tokio::test]
async fn service_endpoint_returns_a_response_envelope() {
    let resp = app()
        .oneshot(soap_request("/ews/exchange.asmx", "<m:CreateItem/>"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "text/xml; charset=utf-8"
    );
    let body = body_text(resp).await;
    assert!(body.contains("<m:CreateItemResponse"));
    assert!(body.contains("ServerVersionInfo"));
}

#[tokio::test]
async fn echo_reflects_headers_and_body() {
    let resp = app()
        .oneshot(soap_request("/echo", "<m:Test/>"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("<e:ContentType>text/xml; charset=utf-8</e:ContentType>"));
    assert!(body.contains("<e:UserAgent>api-test/0.1</e:UserAgent>"));
    assert!(body.contains("&lt;m:Test/&gt;"));
}

#[tokio::test]
async fn fault_endpoint_returns_500_with_a_fault_envelope() {
    let resp = app()
        .oneshot(soap_request("/fault", "<m:CreateItem/>"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(resp).await;
    assert!(body.contains("<s:Fault>"));
    assert!(body.contains("faultcode"));
}

#[tokio::test]
async fn malformed_endpoint_is_not_xml() {
    let resp = app()
        .oneshot(soap_request("/malformed", "<m:CreateItem/>"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(!body.starts_with('<'));
}
