//! End-to-end binding tests over the books fixture.
//!
//! Binds a catalogue of books with nested titles, authors and publishers
//! into domain types, both streamed and from a parsed tree.

use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use streambind::{BindError, ConversionError, HandlerRegistry, Node, ParseEngine, XmlEvent};

#[derive(Debug, Clone, PartialEq)]
struct Title {
    lang: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct Author {
    name: String,
    surname: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Publisher {
    name: String,
    year: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Book {
    id: i64,
    isbn: String,
    titles: Vec<Title>,
    authors: Vec<Author>,
    release_date: Option<NaiveDate>,
    publishers: Vec<Publisher>,
}

#[derive(Debug, Clone, PartialEq)]
struct Books {
    books: Vec<Book>,
}

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn text(node: &Node, name: &str) -> String {
    node.value(name).unwrap_or_default().to_string()
}

fn convert_book(node: &Node) -> Result<Book, ConversionError> {
    Ok(Book {
        id: node.attribute_as_integer("id").unwrap_or(0),
        isbn: text(node, "isbn"),
        titles: node.typed_values::<Title>("title").into_iter().cloned().collect(),
        authors: node.typed_values::<Author>("author").into_iter().cloned().collect(),
        release_date: node.value_as_date("releaseDate")?,
        publishers: node
            .typed_values::<Publisher>("publisher")
            .into_iter()
            .cloned()
            .collect(),
    })
}

fn books_registry() -> HandlerRegistry {
    HandlerRegistry::new()
        .register("book", convert_book)
        .register("author", |node| {
            Ok(Author {
                name: text(node, "name"),
                surname: text(node, "surname"),
            })
        })
        .register("books", |node| {
            Ok(Books {
                books: node.typed_values::<Book>("book").into_iter().cloned().collect(),
            })
        })
        .register("publisher", |node| {
            Ok(Publisher {
                name: text(node, "name"),
                year: text(node, "yearOfPublish"),
            })
        })
        .register("title", |node| {
            Ok(Title {
                lang: node.attribute("lang").map(str::to_string),
                value: node.value("value").map(str::to_string),
            })
        })
}

fn assert_books(books: &Books) {
    assert_eq!(books.books.len(), 2);

    let book = books
        .books
        .iter()
        .find(|b| b.id == 1)
        .expect("book 1 should be bound");
    assert_eq!(book.isbn, "978-3-16-148410-0");
    assert_eq!(book.release_date, NaiveDate::from_ymd_opt(2019, 1, 1));
    assert_eq!(book.authors.len(), 2);
    assert_eq!(book.publishers.len(), 2);

    let title_pl = book.titles.iter().find(|t| t.lang.as_deref() == Some("pl"));
    assert_eq!(
        title_pl.and_then(|t| t.value.as_deref()),
        Some("przykladowy tytul 1")
    );
    let title_en = book.titles.iter().find(|t| t.lang.as_deref() == Some("en"));
    assert_eq!(
        title_en.and_then(|t| t.value.as_deref()),
        Some("english title 1")
    );

    let author = book.authors.iter().find(|a| a.name == "Author 2");
    assert_eq!(author.map(|a| a.surname.as_str()), Some("Surname 2"));

    let publisher = book.publishers.iter().find(|p| p.name == "Publisher 1");
    assert_eq!(publisher.map(|p| p.year.as_str()), Some("1980"));
}

#[test]
fn test_bind_books_streaming() {
    let engine = ParseEngine::new(books_registry());
    let file = fs::File::open(fixture_path("books.xml")).unwrap();

    let root = engine.parse_reader(BufReader::new(file)).unwrap();
    assert_eq!(root.element(), "books");

    let books = root.downcast::<Books>().unwrap();
    assert_books(&books);
}

#[test]
fn test_bind_books_from_tree() {
    let xml = load_fixture("books.xml");
    let doc = roxmltree::Document::parse(&xml).expect("Failed to parse books XML");
    let engine = ParseEngine::new(books_registry());

    let books = engine.parse_document(&doc).unwrap().downcast::<Books>().unwrap();
    assert_books(&books);
}

#[test]
fn test_stream_and_tree_bind_equal_objects() {
    let xml = load_fixture("books.xml");
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let engine = ParseEngine::new(books_registry());

    let streamed = engine.parse_str(&xml).unwrap().downcast::<Books>().unwrap();
    let from_tree = engine.parse_document(&doc).unwrap().downcast::<Books>().unwrap();
    assert_eq!(streamed, from_tree);
}

#[test]
fn test_single_child_is_a_one_element_list() {
    let engine = ParseEngine::new(books_registry());
    let books = engine
        .parse_str(&load_fixture("books.xml"))
        .unwrap()
        .downcast::<Books>()
        .unwrap();

    let book = books.books.iter().find(|b| b.id == 2).unwrap();
    assert_eq!(
        book.titles,
        vec![Title {
            lang: Some("en".to_string()),
            value: Some("english title 2".to_string()),
        }]
    );
    assert_eq!(book.authors.len(), 1);
}

#[test]
fn test_book_without_handled_root() {
    let engine = ParseEngine::new(books_registry());
    let root = engine.parse_str(&load_fixture("books.xml").replace("books>", "shelf>"));

    // The first book stays open for the whole document and absorbs the second.
    let book = root.unwrap().downcast::<Book>().unwrap();
    assert_eq!(book.id, 1);
}

#[test]
fn test_siblings_nest_under_the_first() {
    let engine = ParseEngine::new(HandlerRegistry::new().register("book", |node| {
        Ok((
            node.attribute_as_integer("id"),
            node.typed_values::<(Option<i64>, usize)>("book").len(),
        ))
    }));

    let root = engine.parse_str(&load_fixture("siblings.xml")).unwrap();
    assert_eq!(root.downcast::<(Option<i64>, usize)>().unwrap(), (Some(1), 1));
}

#[test]
fn test_document_without_handled_element() {
    let engine = ParseEngine::new(books_registry());

    let err = engine.parse_str("<shelf><magazine/></shelf>").unwrap_err();
    assert!(matches!(err, BindError::MalformedDocument { .. }));
    assert!(err.to_string().contains("<magazine>"));

    let err = engine.parse_events(Vec::new()).unwrap_err();
    assert!(err.to_string().contains("without any handled element"));
}

#[test]
fn test_end_tag_before_any_handled_element() {
    let engine = ParseEngine::new(books_registry());
    let err = engine
        .parse_events([XmlEvent::End {
            name: "books".to_string(),
        }])
        .unwrap_err();

    assert!(matches!(err, BindError::MalformedDocument { .. }));
}

#[test]
fn test_truncated_document_fails() {
    let engine = ParseEngine::new(books_registry());
    let xml = load_fixture("books.xml");
    let truncated = &xml[..xml.find("</book>").unwrap()];

    let err = engine.parse_str(truncated).unwrap_err();
    assert!(matches!(err, BindError::MalformedDocument { .. }));
}

#[test]
fn test_missing_root_end_tag_fails() {
    let engine = ParseEngine::new(books_registry());

    let err = engine.parse_str("<books><book id=\"1\"/>").unwrap_err();
    assert!(matches!(err, BindError::MalformedDocument { .. }));

    let err = engine
        .parse_str("<books><book id=\"1\"/><book id=\"2\"/>")
        .unwrap_err();
    assert!(matches!(err, BindError::MalformedDocument { ref reason } if reason.contains("<books>")));
}

#[test]
fn test_invalid_date_aborts_parse() {
    let engine = ParseEngine::new(books_registry());
    let xml = load_fixture("books.xml").replace("2019-01-01", "first of january");

    let err = engine.parse_str(&xml).unwrap_err();
    match err {
        BindError::Conversion { element, source } => {
            assert_eq!(element, "book");
            assert!(matches!(source, ConversionError::InvalidDate { .. }));
        }
        other => panic!("expected conversion error, got {other:?}"),
    }
}

#[test]
fn test_depth_limit() {
    let engine = ParseEngine::new(books_registry()).with_max_depth(2);
    let err = engine.parse_str(&load_fixture("books.xml")).unwrap_err();

    assert!(matches!(
        err,
        BindError::DepthLimitExceeded { ref element, limit: 2 } if element == "title"
    ));
}

#[test]
fn test_first_registration_wins() {
    let registry = books_registry().register("title", |_node| Ok("replacement".to_string()));
    let engine = ParseEngine::new(registry);

    let books = engine
        .parse_str(&load_fixture("books.xml"))
        .unwrap()
        .downcast::<Books>()
        .unwrap();
    assert_eq!(books.books[0].titles.len(), 2);
}

#[test]
fn test_root_type_mismatch() {
    let engine = ParseEngine::new(books_registry());
    let root = engine.parse_str(&load_fixture("books.xml")).unwrap();

    assert!(root.is::<Books>());
    assert!(matches!(
        root.downcast::<Book>(),
        Err(BindError::RootTypeMismatch { .. })
    ));
}

#[test]
fn test_engine_is_reusable() {
    let engine = ParseEngine::new(books_registry());
    let xml = load_fixture("books.xml");

    for _ in 0..3 {
        let books = engine.parse_str(&xml).unwrap().downcast::<Books>().unwrap();
        assert_eq!(books.books.len(), 2);
    }
}
