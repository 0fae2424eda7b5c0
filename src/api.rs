// API client module: a small blocking HTTP client that talks to the
// bibliographic search endpoint. It is intentionally small and
// synchronous; one CLI invocation performs at most one request.

use crate::book::Book;
use crate::query::Query;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Production search endpoint of the Polish National Library.
pub const DEFAULT_BASE_URL: &str = "https://data.bn.org.pl/api/bibs.json";

/// Key of the JSON envelope holding the array of record objects.
const ENVELOPE_KEY: &str = "bibs";

/// Everything that can go wrong while running one search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Connection-level failure: endpoint unreachable, refused, DNS.
    #[error("could not reach the search endpoint: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered, but not with a 2xx status.
    #[error("search endpoint answered with HTTP {0}")]
    HttpStatus(StatusCode),

    /// The body was not JSON, or the expected envelope was absent.
    #[error("unexpected response from the search endpoint: {0}")]
    ResponseFormat(String),

    /// The configured base URL does not parse.
    #[error("invalid search URL: {0}")]
    BadUrl(#[from] url::ParseError),
}

/// Blocking client holding a reqwest client and the endpoint base URL.
#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    base_url: String,
}

impl SearchClient {
    /// Create a client configured from the environment variable
    /// `BN_API_URL`, falling back to the production endpoint.
    pub fn from_env() -> Result<Self, SearchError> {
        let base_url = std::env::var("BN_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SearchError> {
        let client = Client::builder().build().map_err(SearchError::Transport)?;
        Ok(SearchClient {
            client,
            base_url: base_url.into(),
        })
    }

    /// Run one search. An empty result is a valid outcome meaning
    /// "no matches", not an error. No retries, no timeout override
    /// beyond reqwest's defaults.
    pub fn search(&self, query: &Query) -> Result<Vec<Book>, SearchError> {
        let url = query.to_url(&self.base_url)?;
        let res = self.client.get(url).send().map_err(SearchError::Transport)?;
        let status = res.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus(status));
        }
        let body = res.text().map_err(SearchError::Transport)?;
        parse_search_response(&body)
    }
}

/// Parse a response body into records. A record object missing one of
/// the required fields is skipped with a warning on stderr rather than
/// failing the whole search.
pub fn parse_search_response(body: &str) -> Result<Vec<Book>, SearchError> {
    let envelope: Value = serde_json::from_str(body)
        .map_err(|e| SearchError::ResponseFormat(format!("body is not JSON: {e}")))?;
    let records = envelope
        .get(ENVELOPE_KEY)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            SearchError::ResponseFormat(format!("no `{ENVELOPE_KEY}` array in response"))
        })?;

    let mut books = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match Book::from_value(record) {
            Ok(book) => books.push(book),
            Err(e) => eprintln!("warning: skipping malformed record {index}: {e}"),
        }
    }
    Ok(books)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn parses_records_from_envelope() {
        let body = r#"{"bibs": [
            {"title": "Diuna", "author": "Herbert, Frank (1920-1986)",
             "genre": "Powieść amerykańska", "publicationYear": "1992",
             "isbnIssn": "8370010679", "id": 1006077},
            {"title": "Elantris", "author": "Sanderson, Brandon (1975- )",
             "genre": "Powieść amerykańska", "publicationYear": 2006,
             "isbnIssn": "8389951258", "id": "5311484"}
        ]}"#;
        let books = parse_search_response(body).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Diuna");
        assert_eq!(books[0].id, "1006077");
        assert_eq!(books[1].publication_year, "2006");
    }

    #[test]
    fn empty_envelope_is_no_matches() {
        let books = parse_search_response(r#"{"bibs": []}"#).unwrap();
        assert!(books.is_empty());
    }

    #[test]
    fn malformed_record_is_skipped_not_fatal() {
        let body = r#"{"bibs": [
            {"title": "No author here", "genre": "g",
             "publicationYear": "2000", "isbnIssn": "x", "id": 1},
            {"title": "Kept", "author": "a", "genre": "g",
             "publicationYear": "2000", "isbnIssn": "x", "id": 2}
        ]}"#;
        let books = parse_search_response(body).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Kept");
    }

    #[test]
    fn missing_envelope_key_is_a_format_error() {
        let err = parse_search_response(r#"{"results": []}"#).unwrap_err();
        assert!(matches!(err, SearchError::ResponseFormat(_)));
    }

    #[test]
    fn envelope_key_of_wrong_type_is_a_format_error() {
        let err = parse_search_response(r#"{"bibs": 7}"#).unwrap_err();
        assert!(matches!(err, SearchError::ResponseFormat(_)));
    }

    #[test]
    fn non_json_body_is_a_format_error() {
        let err = parse_search_response("<html>down for maintenance</html>").unwrap_err();
        assert!(matches!(err, SearchError::ResponseFormat(_)));
    }

    /// A one-shot local server answering a canned HTTP response.
    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}/bibs.json")
    }

    #[test]
    fn server_error_status_surfaces_as_http_status() {
        let base = serve_once("HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\n\r\n");
        let client = SearchClient::with_base_url(base).unwrap();
        let err = client.search(&Query::new("Sanderson,Brandon")).unwrap_err();
        match err {
            SearchError::HttpStatus(status) => assert_eq!(status.as_u16(), 500),
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[test]
    fn successful_response_is_parsed_end_to_end() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 11\r\n\r\n{\"bibs\":[]}",
        );
        let client = SearchClient::with_base_url(base).unwrap();
        let books = client.search(&Query::new("Nobody,Unknown")).unwrap();
        assert!(books.is_empty());
    }

    #[test]
    fn unreachable_endpoint_is_a_transport_error() {
        // Port from the reserved range, nothing listens there.
        let client = SearchClient::with_base_url("http://127.0.0.1:1/bibs.json").unwrap();
        let err = client.search(&Query::new("X")).unwrap_err();
        assert!(matches!(err, SearchError::Transport(_)));
    }
}
