// The bibliographic record type shared by the search client and the
// local library, plus its fixed-order terminal rendering.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// One catalog entry returned by the search endpoint.
///
/// `publication_year` and `id` are kept as opaque text: the source data
/// is inconsistent and returns either a string or an integer for both.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub genre: String,
    #[serde(rename = "publicationYear")]
    pub publication_year: String,
    #[serde(rename = "isbnIssn")]
    pub isbn_issn: String,
    pub id: String,
}

/// A record object in a search response lacked one of the six fields
/// every displayable record must carry.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("record is missing required field `{0}`")]
pub struct MissingField(pub &'static str);

/// Pull a field out of a raw record object as text. Integers are
/// stringified; null or absent fields count as missing.
fn text_field(record: &Value, key: &'static str) -> Result<String, MissingField> {
    match record.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(MissingField(key)),
    }
}

impl Book {
    /// Build a `Book` from one raw record object of a search response,
    /// checking that all six fields are present.
    pub fn from_value(record: &Value) -> Result<Self, MissingField> {
        Ok(Book {
            title: text_field(record, "title")?,
            author: text_field(record, "author")?,
            genre: text_field(record, "genre")?,
            publication_year: text_field(record, "publicationYear")?,
            isbn_issn: text_field(record, "isbnIssn")?,
            id: text_field(record, "id")?,
        })
    }

    /// The labeled fields of this record, in the fixed display order.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("title", self.title.as_str()),
            ("author", self.author.as_str()),
            ("genre", self.genre.as_str()),
            ("publicationYear", self.publication_year.as_str()),
            ("isbnIssn", self.isbn_issn.as_str()),
            ("id", self.id.as_str()),
        ]
    }
}

impl fmt::Display for Book {
    /// One `label: value` line per field, no trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (label, value) in self.fields() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{label}: {value}")?;
            first = false;
        }
        Ok(())
    }
}
