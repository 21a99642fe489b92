//! SOAP 1.1 envelopes for NAV codeunit web services.
//!
//! NAV exposes a codeunit as `urn:microsoft-dynamics-schemas/codeunit/{Codeunit}`.
//! Every operation takes camelCase parameters and answers with an
//! `{Operation}_Result` element holding a single `return_value`.

use std::collections::HashMap;

use quick_xml::{escape::escape, events::Event, Reader};

use crate::{
    error::{NavError, NavResult},
    models::{NavCall, NavOperation},
};

pub const ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

pub fn namespace(codeunit: &str) -> String {
    format!("urn:microsoft-dynamics-schemas/codeunit/{}", codeunit)
}

/// Value of the `SOAPAction` header, quoted as NAV expects it.
pub fn soap_action(codeunit: &str, operation: NavOperation) -> String {
    format!("\"{}:{}\"", namespace(codeunit), operation.name())
}

fn envelope(content: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><soap:Envelope xmlns:soap="{}"><soap:Body>{}</soap:Body></soap:Envelope>"#,
        ENVELOPE_NS, content
    )
}

pub fn build_request(codeunit: &str, call: &NavCall) -> String {
    let operation = call.operation.name();
    let parameters: String = call
        .parameters
        .iter()
        .map(|(name, value)| format!("<{name}>{}</{name}>", escape(value.as_str())))
        .collect();
    envelope(&format!(r#"<{operation} xmlns="{}">{parameters}</{operation}>"#, namespace(codeunit)))
}

pub fn build_response(codeunit: &str, operation: NavOperation, return_value: &str) -> String {
    let operation = operation.name();
    envelope(&format!(
        r#"<{operation}_Result xmlns="{}"><return_value>{}</return_value></{operation}_Result>"#,
        namespace(codeunit),
        escape(return_value)
    ))
}

pub fn build_fault(faultcode: &str, faultstring: &str) -> String {
    envelope(&format!(
        "<soap:Fault><faultcode>{}</faultcode><faultstring>{}</faultstring></soap:Fault>",
        escape(faultcode),
        escape(faultstring)
    ))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoapReply {
    Result(String),
    Fault(String),
}

/// Decodes a reply to `operation`. `Err` only for replies that are not a result or a fault.
pub fn parse_response(operation: NavOperation, xml: &str) -> NavResult<SoapReply> {
    let element = read_body(xml)?;
    if element.name == "Fault" {
        let faultstring = element.child("faultstring").unwrap_or("Unspecified SOAP fault");
        return Ok(SoapReply::Fault(faultstring.to_string()));
    }
    if element.name != format!("{}_Result", operation.name()) {
        return Err(NavError::RemoteInvocation(format!("Unexpected SOAP element '{}' in reply to {}", element.name, operation)));
    }
    Ok(SoapReply::Result(element.child("return_value").unwrap_or_default().to_string()))
}

#[derive(Debug, Clone)]
pub struct SoapRequest {
    pub operation: String,
    pub parameters: HashMap<String, String>,
}

pub fn parse_request(xml: &str) -> NavResult<SoapRequest> {
    let element = read_body(xml)?;
    Ok(SoapRequest {
        operation: element.name,
        parameters: element.children.into_iter().collect(),
    })
}

/// First element of the SOAP body and the text of its direct children.
struct BodyElement {
    name: String,
    children: Vec<(String, String)>,
}

impl BodyElement {
    fn child(&self, name: &str) -> Option<&str> {
        self.children.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }
}

fn malformed(err: impl std::fmt::Display) -> NavError {
    NavError::RemoteInvocation(format!("Malformed SOAP message: {}", err))
}

fn read_body(xml: &str) -> NavResult<BodyElement> {
    let mut reader = Reader::from_str(xml);
    // depth below <Body>, None until the body is entered
    let mut depth: Option<usize> = None;
    let mut element: Option<BodyElement> = None;
    let mut current: Option<(String, String)> = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                depth = match depth {
                    None if name == "Body" => Some(0),
                    None => None,
                    Some(0) => {
                        if element.is_none() {
                            element = Some(BodyElement { name, children: vec![] });
                        }
                        Some(1)
                    }
                    Some(1) => {
                        current = Some((name, String::new()));
                        Some(2)
                    }
                    Some(d) => Some(d + 1),
                };
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                match (depth, element.as_mut()) {
                    (Some(0), None) => element = Some(BodyElement { name, children: vec![] }),
                    (Some(1), Some(element)) => element.children.push((name, String::new())),
                    _ => {}
                }
            }
            Event::Text(e) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&e.unescape().map_err(malformed)?);
                }
            }
            Event::CData(e) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(_) => {
                depth = match depth {
                    Some(0) => break,
                    Some(2) => {
                        if let (Some(child), Some(element)) = (current.take(), element.as_mut()) {
                            element.children.push(child);
                        }
                        Some(1)
                    }
                    Some(d) => Some(d - 1),
                    None => None,
                };
            }
            Event::Eof => break,
            _ => {}
        }
    }

    element.ok_or_else(|| malformed("no element in SOAP body"))
}
