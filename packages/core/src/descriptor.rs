//! Static request descriptors.
//!
//! An [`OperationDescriptor`] holds every immutable fact needed to shape the
//! HTTP request for one catalog operation: the verb, the path template, the
//! query parameters it understands, and whether a JSON body goes out or comes
//! back. Descriptors are `'static` and never change at runtime; the full
//! table lives in [`crate::operation`].

use std::fmt;

/// Name of the query parameter carrying the service API version.
pub const API_VERSION: &str = "api-version";

/// HTTP verb of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Upper-case wire form, e.g. `"GET"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The logical service group an operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Discovery,
    Lineage,
    Relationship,
    Types,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Discovery => write!(f, "discovery"),
            Group::Lineage => write!(f, "lineage"),
            Group::Relationship => write!(f, "relationship"),
            Group::Types => write!(f, "types"),
        }
    }
}

/// Semantic type of a query parameter value.
///
/// Only used to describe the parameter; values are sent as the caller
/// supplied them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Boolean,
    /// One of a closed set of upper- or lower-case tokens.
    Enum(&'static [&'static str]),
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::String => write!(f, "string"),
            ParamKind::Integer => write!(f, "integer"),
            ParamKind::Boolean => write!(f, "boolean"),
            ParamKind::Enum(values) => write!(f, "{}", values.join("|")),
        }
    }
}

/// One query parameter an operation understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParam {
    pub name: &'static str,
    pub required: bool,
    pub kind: ParamKind,
}

impl QueryParam {
    pub const fn required(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            required: true,
            kind,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            required: false,
            kind,
        }
    }
}

/// What an operation sends as its request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    None,
    /// A JSON document; the string names the documented schema.
    Json(&'static str),
}

/// What a successful response carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// A JSON document; the string names the documented schema.
    Json(&'static str),
    NoContent,
}

/// Immutable description of one REST endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    /// Wire name, e.g. `getLineageGraph`.
    pub name: &'static str,
    pub group: Group,
    pub method: Method,
    /// Path template relative to the catalog endpoint, with `{param}`
    /// placeholders.
    pub path: &'static str,
    pub query: &'static [QueryParam],
    pub body: BodyKind,
    pub response: ResponseKind,
}

impl OperationDescriptor {
    pub(crate) const fn new(
        name: &'static str,
        group: Group,
        method: Method,
        path: &'static str,
    ) -> Self {
        Self {
            name,
            group,
            method,
            path,
            query: &[],
            body: BodyKind::None,
            response: ResponseKind::Json("JSON"),
        }
    }

    pub(crate) const fn query(self, query: &'static [QueryParam]) -> Self {
        Self { query, ..self }
    }

    pub(crate) const fn body(self, schema: &'static str) -> Self {
        Self {
            body: BodyKind::Json(schema),
            ..self
        }
    }

    pub(crate) const fn returns(self, schema: &'static str) -> Self {
        Self {
            response: ResponseKind::Json(schema),
            ..self
        }
    }

    pub(crate) const fn no_content(self) -> Self {
        Self {
            response: ResponseKind::NoContent,
            ..self
        }
    }

    /// Names of the `{placeholders}` in the path template, in order.
    pub fn path_params(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        let mut rest = self.path;
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            out.push(&rest[open + 1..open + close]);
            rest = &rest[open + close + 1..];
        }
        out
    }

    /// Look up a declared query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&'static QueryParam> {
        self.query.iter().find(|p| p.name == name)
    }

    /// `true` when the operation carries the `api-version` query parameter.
    pub fn takes_api_version(&self) -> bool {
        self.query_param(API_VERSION).is_some()
    }

    /// `true` when a successful response has a JSON body.
    pub fn has_response_body(&self) -> bool {
        matches!(self.response, ResponseKind::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESC: OperationDescriptor =
        OperationDescriptor::new("x", Group::Types, Method::Get, "/a/{guid}/b/{name}/c");

    #[test]
    fn path_params_in_order() {
        assert_eq!(DESC.path_params(), vec!["guid", "name"]);
    }

    #[test]
    fn path_without_params() {
        let d = OperationDescriptor::new("y", Group::Types, Method::Get, "/api/atlas/v2/types/typedefs");
        assert!(d.path_params().is_empty());
    }

    #[test]
    fn builder_defaults() {
        assert_eq!(DESC.body, BodyKind::None);
        assert!(DESC.has_response_body());
        assert!(!DESC.no_content().has_response_body());
        assert!(!DESC.takes_api_version());
    }

    #[test]
    fn param_kind_display() {
        assert_eq!(ParamKind::Enum(&["INPUT", "OUTPUT"]).to_string(), "INPUT|OUTPUT");
        assert_eq!(ParamKind::Boolean.to_string(), "boolean");
    }
}
