//! SOAP envelope assembly and the one-call raw request entry point.
//!
//! # Design
//! The envelope skeleton is fixed: the caller supplies the body content and
//! optional header fragments as already-serialized XML, and both are placed
//! into the envelope verbatim. Nothing here inspects the response; SOAP
//! faults travel back to the caller as ordinary responses.

use log::debug;

use crate::credentials::NtlmCredentials;
use crate::error::TransportError;
use crate::request::{Method, Request};
use crate::response::Response;

/// Wrap `soap_body` and optional header fragments in the protocol's
/// envelope skeleton.
///
/// Header fragments land inside `<soap:Header>` verbatim, in the given
/// order; with no fragments the header element is omitted entirely. The
/// mandatory `<soap:Body>` contains `soap_body` verbatim.
pub fn build_envelope(soap_body: &str, soap_headers: &[String]) -> String {
    let mut envelope = String::from(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xmlns:xsd="http://www.w3.org/2001/XMLSchema"
    xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"
    xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages"
    xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types"
    >"#,
    );

    if !soap_headers.is_empty() {
        envelope.push_str("<soap:Header>\n");
        for header in soap_headers {
            envelope.push_str(header);
        }
        envelope.push_str("</soap:Header>\n");
    }

    envelope.push_str("<soap:Body>\n");
    envelope.push_str(soap_body);
    envelope.push_str("</soap:Body>\n");
    envelope.push_str("</soap:Envelope>\n");
    envelope
}

/// Send one raw SOAP request and return the response as received.
///
/// Builds NTLM credentials from the three auth fields, wraps `soap_body`
/// in the envelope skeleton and POSTs it to `url` as
/// `text/xml; charset=utf-8`. SOAP-level faults are not interpreted here.
pub fn send_soap_request(
    url: &str,
    username: &str,
    password: &str,
    domain: &str,
    soap_body: &str,
    soap_headers: &[String],
) -> Result<Response, TransportError> {
    let mut request = Request::new(url)?;
    request.set_method(Method::Post)?;
    request.set_content_type("text/xml; charset=utf-8")?;

    let credentials = NtlmCredentials::new(username, password, domain);
    request.set_credentials(&credentials)?;

    let envelope = build_envelope(soap_body, soap_headers);
    debug!("assembled {} byte envelope for {url}", envelope.len());
    request.send(&envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmltree::Element;

    #[test]
    fn body_content_is_embedded_verbatim() {
        let envelope = build_envelope("<m:Test/>", &[]);
        assert!(envelope.contains("<soap:Body>\n<m:Test/></soap:Body>"));
    }

    #[test]
    fn empty_fragments_omit_the_header_element() {
        let envelope = build_envelope("<m:Test/>", &[]);
        assert!(!envelope.contains("soap:Header"));
    }

    #[test]
    fn header_fragments_are_embedded_verbatim() {
        let fragment = r#"<t:RequestServerVersion Version="Exchange2013_SP1"/>"#.to_string();
        let envelope = build_envelope("<m:Test/>", &[fragment.clone()]);
        assert!(envelope.contains(&fragment));
        assert!(envelope.contains("<soap:Header>"));
        assert!(envelope.contains("</soap:Header>"));
    }

    #[test]
    fn multiple_fragments_keep_their_order() {
        let first = r#"<t:RequestServerVersion Version="Exchange2013_SP1"/>"#.to_string();
        let second = r#"<t:TimeZoneContext Id="UTC"/>"#.to_string();
        let envelope = build_envelope("<m:Test/>", &[first.clone(), second.clone()]);

        let first_at = envelope.find(&first).unwrap();
        let second_at = envelope.find(&second).unwrap();
        assert!(first_at < second_at);
    }

    #[test]
    fn envelope_is_well_formed_with_expected_namespaces() {
        let headers = vec![r#"<t:RequestServerVersion Version="Exchange2013_SP1"/>"#.to_string()];
        let envelope = build_envelope("<m:Test/>", &headers);

        let doc = Element::parse(envelope.as_bytes()).unwrap();
        assert_eq!(doc.name, "Envelope");
        assert_eq!(
            doc.namespace.as_deref(),
            Some("http://schemas.xmlsoap.org/soap/envelope/")
        );

        let header = doc.get_child("Header").unwrap();
        let version = header.get_child("RequestServerVersion").unwrap();
        assert_eq!(
            version.attributes.get("Version").map(String::as_str),
            Some("Exchange2013_SP1")
        );

        let body = doc.get_child("Body").unwrap();
        let test = body.get_child("Test").unwrap();
        assert_eq!(
            test.namespace.as_deref(),
            Some("http://schemas.microsoft.com/exchange/services/2006/messages")
        );
    }
}
