use std::fmt::{Display, Formatter};

use roster_core::{AppError, AppResult};
use url::Url;

/// Validated base URL of the user directory backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBaseUrl(Url);

impl ApiBaseUrl {
    /// Parses an absolute `http` or `https` URL. A trailing slash is ignored.
    pub fn parse(value: &str) -> AppResult<Self> {
        let trimmed = value.trim().trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|error| {
            AppError::Validation(format!("invalid API base URL '{value}': {error}"))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Validation(format!(
                "API base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "API base URL '{value}' cannot carry a path"
            )));
        }

        Ok(Self(url))
    }

    /// Appends percent-encoded path segments to the base URL.
    pub fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.0.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::Internal(format!("API base URL '{}' has no path", self.0)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

impl Display for ApiBaseUrl {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str().trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::ApiBaseUrl;

    #[test]
    fn trailing_slash_is_ignored() {
        let base = ApiBaseUrl::parse("http://127.0.0.1:5000/api/").unwrap_or_else(|_| unreachable!());
        let endpoint = base.endpoint(&["allusers"]).unwrap_or_else(|_| unreachable!());

        assert_eq!(endpoint.as_str(), "http://127.0.0.1:5000/api/allusers");
        assert_eq!(base.to_string(), "http://127.0.0.1:5000/api");
    }

    #[test]
    fn host_only_base_gets_single_slash() {
        let base = ApiBaseUrl::parse("https://directory.example.com").unwrap_or_else(|_| unreachable!());
        let endpoint = base
            .endpoint(&["deleteuser", "65f1c0"])
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(endpoint.as_str(), "https://directory.example.com/deleteuser/65f1c0");
    }

    #[test]
    fn segments_are_percent_encoded() {
        let base = ApiBaseUrl::parse("http://localhost").unwrap_or_else(|_| unreachable!());
        let endpoint = base
            .endpoint(&["updateuser", "a/b c"])
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(endpoint.as_str(), "http://localhost/updateuser/a%2Fb%20c");
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        assert!(ApiBaseUrl::parse("ftp://example.com").is_err());
        assert!(ApiBaseUrl::parse("not a url").is_err());
    }
}
