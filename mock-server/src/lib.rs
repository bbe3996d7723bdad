//! Mock SOAP endpoint for exercising the transport crate over real HTTP.
//!
//! Routes:
//! - `POST /ews/exchange.asmx` — canned Exchange-style response envelope.
//! - `POST /echo` — envelope reporting the received Content-Type,
//!   User-Agent and (escaped) request body, so tests can assert what
//!   actually arrived on the wire.
//! - `POST /fault` — HTTP 500 carrying a SOAP fault envelope.
//! - `POST /malformed` — HTTP 200 with a body that is not XML.

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use tokio::net::TcpListener;

const TEXT_XML: &str = "text/xml; charset=utf-8";

/// Canned response for the service endpoint: a server-version SOAP header
/// plus a CreateItemResponse body.
const SERVICE_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
    <s:Header>
        <h:ServerVersionInfo MajorVersion="15" MinorVersion="0" MajorBuildNumber="847" MinorBuildNumber="31" Version="V2_8" xmlns:h="http://schemas.microsoft.com/exchange/services/2006/types"/>
    </s:Header>
    <s:Body>
        <m:CreateItemResponse xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages" xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
            <m:ResponseMessages>
                <m:CreateItemResponseMessage ResponseClass="Success">
                    <m:ResponseCode>NoError</m:ResponseCode>
                    <m:Items>
                        <t:Message>
                            <t:ItemId Id="AQMkADAwATM0MDAAMS1mYzVlLTgxZjgtMDACLTAwCgBGAAAD" ChangeKey="CQAAABYAAAAiIsqMbYjsT5e/Li"/>
                        </t:Message>
                    </m:Items>
                </m:CreateItemResponseMessage>
            </m:ResponseMessages>
        </m:CreateItemResponse>
    </s:Body>
</s:Envelope>"#;

const FAULT_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
    <s:Body>
        <s:Fault>
            <faultcode>s:Client</faultcode>
            <faultstring>The request failed schema validation.</faultstring>
        </s:Fault>
    </s:Body>
</s:Envelope>"#;

pub fn app() -> Router {
    Router::new()
        .route("/ews/exchange.asmx", post(service))
        .route("/echo", post(echo))
        .route("/fault", post(fault))
        .route("/malformed", post(malformed))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn service() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, TEXT_XML)], SERVICE_RESPONSE)
}

async fn echo(headers: HeaderMap, body: String) -> impl IntoResponse {
    let content_type = header_value(&headers, header::CONTENT_TYPE.as_str());
    let user_agent = header_value(&headers, header::USER_AGENT.as_str());

    let envelope = format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
    <s:Body>
        <e:Echo xmlns:e="urn:mock-server:echo">
            <e:ContentType>{}</e:ContentType>
            <e:UserAgent>{}</e:UserAgent>
            <e:Request>{}</e:Request>
        </e:Echo>
    </s:Body>
</s:Envelope>"#,
        escape_text(&content_type),
        escape_text(&user_agent),
        escape_text(&body),
    );

    ([(header::CONTENT_TYPE, TEXT_XML)], envelope)
}

async fn fault() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, TEXT_XML)],
        FAULT_RESPONSE,
    )
}

async fn malformed() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, TEXT_XML)], "this is not an XML document")
}

fn header_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Escape text for embedding inside an XML element.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
