//! The response envelope returned by the `*_with_response` calling forms.

use crate::payload::Payload;

/// A payload together with the HTTP status and headers it arrived with.
///
/// Immutable once built: fields are private and only readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    payload: Payload,
}

impl Response {
    pub fn new(status: u16, headers: Vec<(String, String)>, payload: Payload) -> Self {
        Self {
            status,
            headers,
            payload,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First value of a header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Drop status and headers, keeping only the body.
    pub fn into_payload(self) -> Payload {
        self.payload
    }

    pub fn into_parts(self) -> (u16, Vec<(String, String)>, Payload) {
        (self.status, self.headers, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let r = Response::new(
            200,
            vec![("Content-Type".into(), "application/json".into())],
            Payload::empty(),
        );
        assert_eq!(r.header("content-type"), Some("application/json"));
        assert_eq!(r.header("x-missing"), None);
    }

    #[test]
    fn success_range() {
        assert!(Response::new(204, vec![], Payload::empty()).is_success());
        assert!(!Response::new(404, vec![], Payload::empty()).is_success());
        assert!(!Response::new(302, vec![], Payload::empty()).is_success());
    }
}
