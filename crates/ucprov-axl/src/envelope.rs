//! SOAP envelope construction and value escaping.
//!
//! Request bodies are built textually; every value interpolated into a body
//! passes through [`xml_text`], and values that additionally land inside a
//! SQL string literal pass through [`sql_literal`] first. This is
//! defense-in-depth behind the identifier sanitizer, not a substitute for it.

use std::borrow::Cow;

use quick_xml::escape::escape;

/// AXL API namespace carried on every request.
pub const AXL_NAMESPACE: &str = "http://www.cisco.com/AXL/API/14.0";

const SOAP_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Wrap an AXL body fragment in a SOAP 1.1 envelope.
#[must_use]
pub fn soap_envelope(body: &str) -> String {
    format!(
        "<soapenv:Envelope xmlns:soapenv=\"{SOAP_NAMESPACE}\" xmlns:ns=\"{AXL_NAMESPACE}\">\
         <soapenv:Header/><soapenv:Body>{body}</soapenv:Body></soapenv:Envelope>"
    )
}

/// Escape a value for interpolation into XML text content.
#[must_use]
pub fn xml_text(value: &str) -> Cow<'_, str> {
    escape(value)
}

/// Escape a value for use inside a single-quoted SQL string literal by
/// doubling embedded quotes.
#[must_use]
pub fn sql_literal(value: &str) -> String {
    value.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_declares_both_namespaces() {
        let envelope = soap_envelope("<ns:ping/>");
        assert!(envelope.contains("xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\""));
        assert!(envelope.contains("xmlns:ns=\"http://www.cisco.com/AXL/API/14.0\""));
        assert!(envelope.contains("<soapenv:Body><ns:ping/></soapenv:Body>"));
    }

    #[test]
    fn xml_text_escapes_markup() {
        assert_eq!(xml_text("O'Brien & Co <dept>"), "O&apos;Brien &amp; Co &lt;dept&gt;");
        assert_eq!(xml_text("plain"), "plain");
    }

    #[test]
    fn sql_literal_doubles_quotes() {
        assert_eq!(sql_literal("O'Brien"), "O''Brien");
        assert_eq!(sql_literal("no quotes"), "no quotes");
    }
}
