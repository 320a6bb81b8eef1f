//! `Accept`-driven response bodies.
//!
//! Resource representations are JSON unless the client ranks
//! `application/xml` or `text/xml` above every JSON media type. Unknown
//! media types fall back to JSON rather than `406 Not Acceptable`. Error
//! payloads are always JSON.

use actix_web::body::BoxBody;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, ResponseError};
use serde::Serialize;
use serde::ser::SerializeStruct;
use tracing::error;

use crate::domain::Error;

const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Representation chosen for a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// `application/json`.
    Json,
    /// `application/xml`.
    Xml,
}

impl ResponseFormat {
    /// Pick the format from the request's `Accept` header.
    ///
    /// Media ranges are tried in quality order; the first one naming a
    /// supported format wins. A missing or unparseable header means JSON.
    #[must_use]
    pub fn from_request(req: &HttpRequest) -> Self {
        let Some(accept) = req.get_header::<header::Accept>() else {
            return Self::Json;
        };
        accept
            .ranked()
            .iter()
            .find_map(|mime| match mime.essence_str() {
                "application/xml" | "text/xml" => Some(Self::Xml),
                "application/json" | "text/json" | "application/*" | "*/*" => Some(Self::Json),
                _ => None,
            })
            .unwrap_or(Self::Json)
    }
}

/// Response body serialized as JSON or XML to suit the client.
///
/// `root` names the XML document element. List bodies also name the
/// element repeated for each item, so `Vec<CitySummary>` becomes
/// `<cities><city>..</city></cities>`.
///
/// # Examples
/// ```
/// use cityinfo::domain::PointSummary;
/// use cityinfo::inbound::http::negotiation::Negotiated;
///
/// let point = PointSummary { id: 1, name: "Jamtli".into(), description: None };
/// let _reply = Negotiated::ok("pointOfInterest", point)
///     .created("/api/cities/1/pointsofinterest/1");
/// ```
#[derive(Debug)]
pub struct Negotiated<T> {
    status: StatusCode,
    root: &'static str,
    item: Option<&'static str>,
    location: Option<String>,
    value: T,
}

impl<T> Negotiated<T> {
    /// A `200 OK` body with `root` as the XML document element.
    pub fn ok(root: &'static str, value: T) -> Self {
        Self {
            status: StatusCode::OK,
            root,
            item: None,
            location: None,
            value,
        }
    }

    /// A `200 OK` list body; each XML item is an `item` element inside `root`.
    pub fn list(root: &'static str, item: &'static str, value: T) -> Self {
        Self {
            item: Some(item),
            ..Self::ok(root, value)
        }
    }

    /// Turn the body into `201 Created` pointing at `location`.
    #[must_use]
    pub fn created(self, location: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CREATED,
            location: Some(location.into()),
            ..self
        }
    }
}

impl<T: Serialize> Negotiated<T> {
    fn to_xml(&self) -> Result<String, impl std::fmt::Display> {
        match self.item {
            Some(item) => quick_xml::se::to_string_with_root(
                self.root,
                &XmlList {
                    item,
                    items: &self.value,
                },
            ),
            None => quick_xml::se::to_string_with_root(self.root, &self.value),
        }
    }
}

impl<T: Serialize> Responder for Negotiated<T> {
    type Body = BoxBody;

    fn respond_to(self, req: &HttpRequest) -> HttpResponse<Self::Body> {
        let mut response = HttpResponse::build(self.status);
        response.insert_header((header::VARY, "Accept"));
        if let Some(location) = &self.location {
            response.insert_header((header::LOCATION, location.as_str()));
        }

        match ResponseFormat::from_request(req) {
            ResponseFormat::Json => response.json(&self.value),
            ResponseFormat::Xml => match self.to_xml() {
                Ok(body) => response.content_type(XML_CONTENT_TYPE).body(body),
                Err(err) => {
                    error!(error = %err, root = self.root, "XML serialization failed");
                    Error::internal("Internal server error").error_response()
                }
            },
        }
    }
}

/// Sequence wrapped in a single field so each entry becomes one element.
struct XmlList<'a, T> {
    item: &'static str,
    items: &'a T,
}

impl<T: Serialize> Serialize for XmlList<'_, T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut list = serializer.serialize_struct("list", 1)?;
        list.serialize_field(self.item, self.items)?;
        list.end()
    }
}
