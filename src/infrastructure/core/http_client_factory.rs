use reqwest::Client;
use std::time::Duration;
use url::Url;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates a new HTTP client with a bounded total request time.
    ///
    /// No retry layer: a failed resource is skipped until the next scheduled run.
    pub fn create_client(timeout: Duration) -> Client {
        Client::builder()
            .pool_max_idle_per_host(2)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(concat!("nicehash-collector/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}

/// Joins `path` onto `base_url` and attaches `query` verbatim.
///
/// The query is not re-encoded: the server verifies the signature against
/// the exact string it receives.
pub fn build_url_with_query(base_url: &Url, path: &str, query: &str) -> Result<Url, url::ParseError> {
    let mut url = base_url.join(path)?;
    if query.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(query));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_with_query() {
        let base = Url::parse("https://api2.nicehash.com").unwrap();

        let url = build_url_with_query(&base, "/main/api/v2/mining/rigs2", "size=50&page=0&path=Garage+rigs").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api2.nicehash.com/main/api/v2/mining/rigs2?size=50&page=0&path=Garage+rigs"
        );
        assert_eq!(url.query(), Some("size=50&page=0&path=Garage+rigs"));
    }

    #[test]
    fn test_build_url_without_query_keeps_trailing_slash() {
        let base = Url::parse("http://127.0.0.1:1234/").unwrap();

        let url = build_url_with_query(&base, "/main/api/v2/accounting/accounts2/", "").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:1234/main/api/v2/accounting/accounts2/");
    }
}
