//! Request shaping: from an operation and its arguments to an [`HttpRequest`].
//!
//! Shaping is the only place where a call's wire form is decided. Every
//! calling convention goes through [`RequestBuilder::build`], so the async,
//! blocking, raw, and wrapped forms of one logical call put identical bytes
//! on the wire.
//!
//! Order of query parameters: `api-version` first (when the operation takes
//! it), then the caller's options in insertion order.

use urlencoding::encode;

use crate::descriptor::{BodyKind, Method, API_VERSION};
use crate::error::Error;
use crate::operation::Operation;
use crate::options::{ErrorPolicy, RequestOptions};
use crate::payload::{Payload, JSON_CONTENT_TYPE};

/// A fully shaped HTTP request, relative to the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Expanded, percent-encoded path, e.g. `/api/atlas/v2/lineage/abc`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Payload>,
}

impl HttpRequest {
    /// `name=value` pairs joined with `&`, percent-encoded.
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(n, v)| format!("{}={}", encode(n), encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Path plus query string, as it appears after the endpoint.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query_string())
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A shaped request plus the per-call handling the executor needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub operation: Operation,
    pub request: HttpRequest,
    pub error_policy: ErrorPolicy,
}

/// Collects the arguments of one call and shapes the request.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    operation: Operation,
    path_args: Vec<(String, String)>,
    body: Option<Payload>,
    api_version: Option<String>,
    options: RequestOptions,
}

impl RequestBuilder {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            path_args: Vec::new(),
            body: None,
            api_version: None,
            options: RequestOptions::default(),
        }
    }

    /// Value for a `{name}` placeholder in the path template.
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_args.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, payload: Payload) -> Self {
        self.body = Some(payload);
        self
    }

    /// API version used when the operation carries `api-version`.
    /// An `api-version` set through the options takes precedence.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = self.options.merge(options);
        self
    }

    /// Shape the request, or report the first caller error found.
    pub fn build(self) -> Result<PreparedRequest, Error> {
        let descriptor = self.operation.descriptor();
        let name = descriptor.name;

        let mut path = descriptor.path.to_string();
        for param in descriptor.path_params() {
            let value = self
                .path_args
                .iter()
                .find(|(n, _)| n == param)
                .map(|(_, v)| v.as_str())
                .ok_or_else(|| Error::MissingParameter {
                    operation: name,
                    parameter: param.to_string(),
                })?;
            if value.trim().is_empty() {
                return Err(Error::InvalidParameter {
                    operation: name,
                    parameter: param.to_string(),
                    reason: "must not be empty".into(),
                });
            }
            path = path.replace(&format!("{{{param}}}"), &encode(value));
        }

        let mut query = Vec::with_capacity(self.options.query().len() + 1);
        if descriptor.takes_api_version() {
            let version = self
                .options
                .get_query(API_VERSION)
                .map(str::to_string)
                .or(self.api_version)
                .ok_or_else(|| Error::MissingParameter {
                    operation: name,
                    parameter: API_VERSION.to_string(),
                })?;
            query.push((API_VERSION.to_string(), version));
        }
        query.extend(
            self.options
                .query()
                .iter()
                .filter(|(n, _)| !(descriptor.takes_api_version() && n == API_VERSION))
                .cloned(),
        );

        for required in descriptor.query.iter().filter(|p| p.required) {
            if !query.iter().any(|(n, _)| n == required.name) {
                return Err(Error::MissingParameter {
                    operation: name,
                    parameter: required.name.to_string(),
                });
            }
        }

        if matches!(descriptor.body, BodyKind::Json(_)) && self.body.is_none() {
            return Err(Error::MissingBody { operation: name });
        }

        let mut headers = vec![("accept".to_string(), JSON_CONTENT_TYPE.to_string())];
        if let Some(body) = &self.body {
            let content_type = body.content_type().unwrap_or(JSON_CONTENT_TYPE);
            headers.push(("content-type".to_string(), content_type.to_string()));
        }
        for (n, v) in self.options.headers() {
            match headers.iter_mut().find(|(h, _)| h.eq_ignore_ascii_case(n)) {
                Some(slot) => slot.1 = v.clone(),
                None => headers.push((n.clone(), v.clone())),
            }
        }

        Ok(PreparedRequest {
            operation: self.operation,
            request: HttpRequest {
                method: descriptor.method,
                path,
                query,
                headers,
                body: self.body,
            },
            error_policy: self.options.get_error_policy(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn lineage_graph_request_shape() {
        let prepared = RequestBuilder::new(Operation::GetLineageGraph)
            .path_param("guid", "a1b2")
            .api_version("2021-05-01-preview")
            .options(
                RequestOptions::new()
                    .query_param("direction", "BOTH")
                    .query_param("depth", 3),
            )
            .build()
            .unwrap();

        let req = prepared.request;
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.path, "/api/atlas/v2/lineage/a1b2");
        // getLineageGraph does not carry api-version.
        assert_eq!(req.query, pairs(&[("direction", "BOTH"), ("depth", "3")]));
        assert_eq!(req.body, None);
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn missing_direction_is_rejected_locally() {
        for op in [Operation::GetLineageGraph, Operation::NextPageLineage] {
            let err = RequestBuilder::new(op)
                .path_param("guid", "a1b2")
                .api_version("v")
                .options(RequestOptions::new().query_param("depth", 2))
                .build()
                .unwrap_err();
            assert!(
                matches!(err, Error::MissingParameter { ref parameter, .. } if parameter == "direction"),
                "{op}: {err}"
            );
        }
    }

    #[test]
    fn api_version_comes_first() {
        let req = RequestBuilder::new(Operation::NextPageLineage)
            .path_param("guid", "g")
            .api_version("2021-05-01-preview")
            .options(
                RequestOptions::new()
                    .query_param("direction", "INPUT")
                    .query_param("offset", 20)
                    .query_param("limit", 10),
            )
            .build()
            .unwrap()
            .request;
        assert_eq!(req.path, "/api/lineage/g/next/");
        assert_eq!(
            req.path_and_query(),
            "/api/lineage/g/next/?api-version=2021-05-01-preview&direction=INPUT&offset=20&limit=10"
        );
    }

    #[test]
    fn api_version_from_options_overrides_client_default() {
        let req = RequestBuilder::new(Operation::Query)
            .api_version("old")
            .body(Payload::from(json!({"keywords": "x"})))
            .options(RequestOptions::new().query_param("api-version", "new"))
            .build()
            .unwrap()
            .request;
        assert_eq!(req.query, pairs(&[("api-version", "new")]));
    }

    #[test]
    fn api_version_is_required_where_declared() {
        let err = RequestBuilder::new(Operation::GetTermTemplateDefByName)
            .path_param("name", "Glossary1")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter { ref parameter, .. } if parameter == "api-version"));
    }

    #[test]
    fn path_params_are_percent_encoded() {
        let req = RequestBuilder::new(Operation::GetTypeDefinitionByName)
            .path_param("name", "azure_sql table/v2")
            .build()
            .unwrap()
            .request;
        assert_eq!(
            req.path,
            "/api/atlas/v2/types/typedef/name/azure_sql%20table%2Fv2"
        );
    }

    #[test]
    fn empty_path_param_is_invalid() {
        let err = RequestBuilder::new(Operation::GetRelationship)
            .path_param("guid", "  ")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn missing_path_param() {
        let err = RequestBuilder::new(Operation::DeleteRelationship)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter { ref parameter, .. } if parameter == "guid"));
    }

    #[test]
    fn body_operations_need_a_body() {
        let err = RequestBuilder::new(Operation::CreateTypeDefinitions)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MissingBody { operation: "createTypeDefinitions" }));
    }

    #[test]
    fn body_is_passed_through_with_content_type() {
        let raw = br#"{"enumDefs":[{"name":"e","elementDefs":[{"value":"A","ordinal":1}]}]}"#;
        let req = RequestBuilder::new(Operation::DeleteTypeDefinitions)
            .body(Payload::from_json_bytes(raw.to_vec()))
            .build()
            .unwrap()
            .request;
        assert_eq!(req.method, Method::Delete);
        assert_eq!(req.body.as_ref().unwrap().as_bytes(), raw);
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[test]
    fn option_headers_override_defaults() {
        let req = RequestBuilder::new(Operation::ListTypeDefinitionHeaders)
            .options(
                RequestOptions::new()
                    .header("Accept", "application/json;odata=minimal")
                    .header("x-ms-client-request-id", "r-1")
                    .error_policy(ErrorPolicy::Return),
            )
            .build()
            .unwrap();
        assert_eq!(
            req.request.header("accept"),
            Some("application/json;odata=minimal")
        );
        assert_eq!(req.request.headers.len(), 2);
        assert_eq!(req.error_policy, ErrorPolicy::Return);
    }
}
