//! Request admission.
//!
//! Decides whether a candidate URL may be fetched at all. The scheme check
//! runs first, synchronously, so malformed input never reaches the
//! network-touching checks. The remaining checks are independent and run
//! concurrently: an error from any check short-circuits immediately, while
//! a false result waits for every sibling before the final decision, since
//! partial information cannot prove a URL is allowed.

use futures_util::future::{self, BoxFuture};

use crate::config::schema::{GatewayConfig, ValidationResult};
use crate::gateway::error::GatewayError;
use crate::net::private_addr;

/// Validate a URL against the configured admission checks.
pub(crate) async fn validate(url: &str, config: &GatewayConfig) -> Result<(), GatewayError> {
    if !has_http_scheme(url) {
        tracing::debug!(url = %url, "rejecting URL failing the http/https scheme check");
        return Err(GatewayError::InvalidInput(
            "only http/https URLs are supported".into(),
        ));
    }

    let mut checks: Vec<BoxFuture<'_, ValidationResult>> = Vec::new();

    if !config.allow_private_hosts {
        checks.push(Box::pin(async move {
            private_addr::is_private_url(url).await.map(|private| !private)
        }));
    }

    if let Some(allow_request) = &config.allow_request {
        checks.push(allow_request(url.to_string()));
    }

    if checks.is_empty() {
        return Ok(());
    }

    // try_join_all resolves on the first check error; boolean results are
    // all awaited before the decision is formed.
    let results = future::try_join_all(checks).await.map_err(|err| {
        tracing::debug!(url = %url, error = %err, "admission check errored");
        GatewayError::Validator(err)
    })?;

    if results.iter().all(|allowed| *allowed) {
        Ok(())
    } else {
        tracing::debug!(url = %url, "admission check returned false, disallowing request");
        Err(GatewayError::Rejected)
    }
}

/// Case-insensitive `http://` / `https://` prefix check.
fn has_http_scheme(url: &str) -> bool {
    url.get(..7).is_some_and(|p| p.eq_ignore_ascii_case("http://"))
        || url.get(..8).is_some_and(|p| p.eq_ignore_ascii_case("https://"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::error::ValidatorError;

    #[test]
    fn scheme_check_accepts_http_and_https() {
        assert!(has_http_scheme("http://example.com"));
        assert!(has_http_scheme("https://example.com"));
        assert!(has_http_scheme("HTTP://example.com"));
        assert!(has_http_scheme("HtTpS://example.com/image.png"));
    }

    #[test]
    fn scheme_check_rejects_everything_else() {
        assert!(!has_http_scheme("ftp://example.com"));
        assert!(!has_http_scheme("file:///etc/passwd"));
        assert!(!has_http_scheme("example.com/no-scheme"));
        assert!(!has_http_scheme(""));
        assert!(!has_http_scheme("httpx://example.com"));
    }

    #[tokio::test]
    async fn bad_scheme_short_circuits_before_other_checks() {
        // A predicate that would error is never invoked for a bad scheme.
        let config = GatewayConfig::default()
            .with_allow_request(|_| async { Err(ValidatorError::new("should not run")) });
        let err = validate("ftp://bar.baz/image.png", &config).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidInput(_)));
        assert!(err.to_string().contains("http/https"));
    }

    #[tokio::test]
    async fn empty_check_set_admits_trivially() {
        let config = GatewayConfig {
            allow_private_hosts: true,
            ..Default::default()
        };
        assert!(validate("http://10.0.0.1/anything", &config).await.is_ok());
    }

    #[tokio::test]
    async fn false_result_yields_generic_rejection() {
        let config = GatewayConfig {
            allow_private_hosts: true,
            ..Default::default()
        }
        .with_allow_request(|_| async { Ok(false) });
        let err = validate("http://example.com/a.png", &config).await.unwrap_err();
        assert!(matches!(err, GatewayError::Rejected));
        assert_eq!(err.to_string(), "URL not allowed");
    }

    #[tokio::test]
    async fn check_error_propagates_verbatim() {
        let config = GatewayConfig {
            allow_private_hosts: true,
            ..Default::default()
        }
        .with_allow_request(|_| async { Err(ValidatorError::new("boom")) });
        let err = validate("http://example.com/a.png", &config).await.unwrap_err();
        assert!(matches!(err, GatewayError::Validator(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn private_host_rejected_even_when_predicate_allows() {
        let config =
            GatewayConfig::default().with_allow_request(|_| async { Ok(true) });
        let err = validate("http://127.0.0.1/foo/bar.png", &config)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Rejected));
    }
}
