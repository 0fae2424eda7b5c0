// Query construction: a required author plus an ordered list of
// optional filter pairs, rendered as a URL for the search endpoint.

use url::Url;

/// A search query against the bibliographic endpoint.
///
/// Filters keep the order they were supplied in; the endpoint does not
/// care, but a deterministic order keeps the built URL reproducible.
#[derive(Debug, Clone)]
pub struct Query {
    author: String,
    filters: Vec<(String, String)>,
}

impl Query {
    /// A query with no optional filters. The author is passed through
    /// verbatim; the conventional `Surname,GivenName` form is not
    /// validated here.
    pub fn new(author: impl Into<String>) -> Self {
        Query {
            author: author.into(),
            filters: Vec::new(),
        }
    }

    pub fn with_filters(author: impl Into<String>, filters: Vec<(String, String)>) -> Self {
        Query {
            author: author.into(),
            filters,
        }
    }

    /// Append one filter pair, keeping insertion order.
    pub fn filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((name.into(), value.into()));
        self
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Every query parameter in order: `author` first, then each filter.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        std::iter::once(("author", self.author.as_str()))
            .chain(self.filters.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Render against a base URL; values are percent-encoded by `url`.
    pub fn to_url(&self, base: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(base)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in self.params() {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://data.bn.org.pl/api/bibs.json";

    #[test]
    fn author_only_has_exactly_one_param() {
        let query = Query::new("Sanderson,Brandon");
        let params: Vec<_> = query.params().collect();
        assert_eq!(params, vec![("author", "Sanderson,Brandon")]);
    }

    #[test]
    fn param_count_is_one_plus_filters() {
        let query = Query::new("Herbert,Frank")
            .filter("title", "Diuna")
            .filter("publicationYear", "1992");
        let params: Vec<_> = query.params().collect();
        assert_eq!(params.len(), 3);
        assert_eq!(params[1], ("title", "Diuna"));
        assert_eq!(params[2], ("publicationYear", "1992"));
    }

    #[test]
    fn filters_keep_insertion_order() {
        let query = Query::new("Trudi,Canavan")
            .filter("kind", "e-book")
            .filter("title", "Nowicjuszka");
        let names: Vec<_> = query.params().map(|(k, _)| k).collect();
        assert_eq!(names, ["author", "kind", "title"]);
    }

    #[test]
    fn url_carries_every_pair_verbatim() {
        let query = Query::new("Sanderson,Brandon").filter("title", "Elantris");
        let url = query.to_url(BASE).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("author".to_string(), "Sanderson,Brandon".to_string()),
                ("title".to_string(), "Elantris".to_string()),
            ]
        );
        assert!(url.as_str().contains("title=Elantris"));
    }

    #[test]
    fn reserved_characters_are_percent_encoded() {
        let query = Query::new("Läckberg").filter("title", "a&b c");
        let url = query.to_url(BASE).unwrap();
        let raw = url.query().unwrap();
        assert!(!raw.contains("a&b"));
        let decoded: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(decoded[1], ("title".to_string(), "a&b c".to_string()));
    }

    #[test]
    fn bad_base_url_is_an_error() {
        assert!(Query::new("X").to_url("not a url").is_err());
    }
}
