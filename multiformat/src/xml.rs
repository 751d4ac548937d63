//! XML book document parsing and validation.
//!
//! The document root's direct `<book>` children are turned into
//! [`BookRecord`]s. Each book must have `id`, `title` and `author` child
//! elements with non-blank text; the first violation aborts the whole parse.
//! Nested `<book>` elements deeper than the root's children are ignored, as
//! are elements in a namespace. A DOCTYPE declaration is allowed.

use roxmltree::{Document, Node, ParsingOptions};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ParseError, ParseErrorKind};
use crate::loader::RawInput;

const BOOK_TAG: &str = "book";
const ID_TAG: &str = "id";
const TITLE_TAG: &str = "title";
const AUTHOR_TAG: &str = "author";

/// A validated book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: i64,
    /// Never empty; trimmed.
    pub title: String,
    /// Never empty; trimmed.
    pub author: String,
}

/// Parse `input` as an XML book document.
///
/// Returns one record per `<book>` child of the root element, in document
/// order. A root without `<book>` children yields an empty list.
///
/// # Errors
///
/// - `InvalidXml` if the markup is not well-formed
/// - `MissingField` if a book lacks `id`, `title` or `author`
/// - `EmptyField` if one of those elements has no text or only whitespace
/// - `InvalidId` if the trimmed `id` text is not an integer
pub fn parse_books(input: &RawInput) -> Result<Vec<BookRecord>, ParseError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(input.as_str(), options)
        .map_err(|e| ParseError::new(ParseErrorKind::InvalidXml, format!("Invalid XML: {e}")))?;
    let root = doc.root_element();

    let books = root
        .children()
        .filter(|node| is_element_named(*node, BOOK_TAG))
        .enumerate()
        .map(|(index, book)| parse_book(book, index + 1))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        root = root.tag_name().name(),
        count = books.len(),
        "parsed XML book records"
    );
    Ok(books)
}

/// Validate a single `<book>`. `position` is 1-based and only used in messages.
fn parse_book(book: Node<'_, '_>, position: usize) -> Result<BookRecord, ParseError> {
    // Presence is checked for all three fields before any text is looked at.
    let id = required_child(book, ID_TAG, position)?;
    let title = required_child(book, TITLE_TAG, position)?;
    let author = required_child(book, AUTHOR_TAG, position)?;

    let id_text = required_text(id, position)?;
    let title = required_text(title, position)?;
    let author = required_text(author, position)?;

    let id = id_text.parse::<i64>().map_err(|e| {
        ParseError::new(
            ParseErrorKind::InvalidId,
            format!("XML: book #{position} has a non-integer id '{id_text}': {e}"),
        )
    })?;

    Ok(BookRecord {
        id,
        title: title.to_owned(),
        author: author.to_owned(),
    })
}

fn required_child<'a, 'input>(
    book: Node<'a, 'input>,
    name: &str,
    position: usize,
) -> Result<Node<'a, 'input>, ParseError> {
    book.children()
        .find(|node| is_element_named(*node, name))
        .ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::MissingField,
                format!("XML: book #{position} is missing the '{name}' field (id/title/author)"),
            )
        })
}

/// Leading text of `field`, trimmed. Text after a nested child element is not
/// considered.
fn required_text<'a>(field: Node<'a, '_>, position: usize) -> Result<&'a str, ParseError> {
    field
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::EmptyField,
                format!(
                    "XML: book #{position} has an empty '{}' field (id/title/author)",
                    field.tag_name().name()
                ),
            )
        })
}

/// Un-namespaced element called `name`.
fn is_element_named(node: Node<'_, '_>, name: &str) -> bool {
    let tag = node.tag_name();
    node.is_element() && tag.namespace().is_none() && tag.name() == name
}
