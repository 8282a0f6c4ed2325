//! Per-call request options.

/// What to do when the service answers with a non-success status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Fail with [`crate::Error::Status`]. The default.
    #[default]
    Fail,
    /// Hand the response back as if it had succeeded. The caller inspects
    /// the status itself (only meaningful with the `*_with_response` forms).
    Return,
}

/// Cross-cutting parameters merged into a single request.
///
/// Built by the caller for one call and consumed by it. Query parameters keep
/// their insertion order; setting a name twice replaces the earlier value in
/// place. Header names compare case-insensitively.
///
/// ```rust,ignore
/// let options = RequestOptions::new()
///     .query_param("direction", "BOTH")
///     .query_param("depth", 3)
///     .header("x-ms-client-request-id", "8c4a…");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    /// `None` until set, so an explicit `Fail` can override in [`merge`](Self::merge).
    error_policy: Option<ErrorPolicy>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name, value)),
        }
        self
    }

    /// Add or replace a query parameter.
    pub fn query_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        let name = name.into();
        let value = value.to_string();
        match self.query.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.query.push((name, value)),
        }
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn query_param_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query_param(name, v),
            None => self,
        }
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = Some(policy);
        self
    }

    /// Merge `other` into `self`; values from `other` win.
    pub fn merge(mut self, other: RequestOptions) -> Self {
        for (name, value) in other.headers {
            self = self.header(name, value);
        }
        for (name, value) in other.query {
            self = self.query_param(name, value);
        }
        self.error_policy = other.error_policy.or(self.error_policy);
        self
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn get_query(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_error_policy(&self) -> ErrorPolicy {
        self.error_policy.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_keep_order_and_replace_in_place() {
        let o = RequestOptions::new()
            .query_param("direction", "INPUT")
            .query_param("depth", 3)
            .query_param("direction", "BOTH");
        assert_eq!(
            o.query(),
            &[
                ("direction".to_string(), "BOTH".to_string()),
                ("depth".to_string(), "3".to_string()),
            ]
        );
        assert_eq!(o.get_query("depth"), Some("3"));
    }

    #[test]
    fn header_names_are_case_insensitive() {
        let o = RequestOptions::new()
            .header("X-Trace", "a")
            .header("x-trace", "b");
        assert_eq!(o.headers(), &[("X-Trace".to_string(), "b".to_string())]);
    }

    #[test]
    fn optional_params_are_skipped_when_absent() {
        let o = RequestOptions::new()
            .query_param_opt("limit", Some(10))
            .query_param_opt::<u32>("offset", None);
        assert_eq!(o.get_query("limit"), Some("10"));
        assert_eq!(o.get_query("offset"), None);
    }

    #[test]
    fn merge_prefers_right_hand_side() {
        let base = RequestOptions::new().query_param("depth", 1).header("a", "1");
        let merged = base.merge(
            RequestOptions::new()
                .query_param("depth", 5)
                .error_policy(ErrorPolicy::Return),
        );
        assert_eq!(merged.get_query("depth"), Some("5"));
        assert_eq!(merged.headers().len(), 1);
        assert_eq!(merged.get_error_policy(), ErrorPolicy::Return);
    }

    #[test]
    fn explicit_fail_overrides_return_on_merge() {
        let lenient = RequestOptions::new().error_policy(ErrorPolicy::Return);
        let strict = lenient.clone().merge(RequestOptions::new().error_policy(ErrorPolicy::Fail));
        assert_eq!(strict.get_error_policy(), ErrorPolicy::Fail);

        let unset = lenient.merge(RequestOptions::new().query_param("depth", 2));
        assert_eq!(unset.get_error_policy(), ErrorPolicy::Return);
        assert_eq!(RequestOptions::new().get_error_policy(), ErrorPolicy::Fail);
    }
}
