//! Line-oriented graph serialization.
//!
//! One statement per line, `subject predicate object .`, with
//! fully-qualified identifiers in angle brackets, anonymous nodes as
//! `_:label`, and literals quoted (integers carry an XSD datatype). The
//! parser reads the same format back, so
//! `serialize(parse(serialize(store))) == serialize(store)` for any
//! deduplicated triple set.

use std::fmt::Write as _;
use std::path::Path;

use lit_graph_core::iri::Iri;
use lit_graph_core::types::{Literal, Term, Triple, Vocab};
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::store::TripleStore;

const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

/// Serialize the base triples, one statement per line, in insertion order.
pub fn serialize(store: &TripleStore) -> String {
    let mut out = String::new();
    for triple in store.iter() {
        write_triple(&mut out, triple);
    }
    out
}

/// Serialize the base triples followed by their reified occurrence counts.
///
/// Each distinct triple contributes four additional statements anchored at
/// its anonymous statement node.
pub fn serialize_reified(store: &TripleStore, vocab: &Vocab) -> String {
    let mut out = serialize(store);
    for record in store.reify() {
        for triple in record.to_triples(vocab) {
            write_triple(&mut out, &triple);
        }
    }
    out
}

fn write_triple(out: &mut String, triple: &Triple) {
    write_term(out, &triple.subject);
    out.push(' ');
    let _ = write!(out, "<{}>", triple.predicate);
    out.push(' ');
    write_term(out, &triple.object);
    out.push_str(" .\n");
}

fn write_term(out: &mut String, term: &Term) {
    match term {
        Term::Iri(iri) => {
            let _ = write!(out, "<{iri}>");
        }
        Term::Blank(label) => {
            let _ = write!(out, "_:{label}");
        }
        Term::Literal(Literal::Text(text)) => {
            out.push('"');
            for c in text.chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\t' => out.push_str("\\t"),
                    _ => out.push(c),
                }
            }
            out.push('"');
        }
        Term::Literal(Literal::Integer(n)) => {
            let _ = write!(out, "\"{n}\"^^<{XSD_INTEGER}>");
        }
    }
}

/// Parse a serialized graph into a fresh store.
///
/// Empty lines and `#` comment lines are skipped. Any malformed statement
/// aborts the parse with [`StoreError::Syntax`].
pub fn parse(input: &str) -> StoreResult<TripleStore> {
    let mut store = TripleStore::new();
    for (idx, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let triple = parse_statement(line).map_err(|message| StoreError::Syntax {
            line: idx + 1,
            message,
        })?;
        store.insert(triple);
    }
    Ok(store)
}

/// Save the base triples to a file.
pub fn save(store: &TripleStore, path: &Path) -> StoreResult<()> {
    write_file(path, serialize(store))
}

/// Save the base triples plus reified occurrence counts to a file.
pub fn save_reified(store: &TripleStore, vocab: &Vocab, path: &Path) -> StoreResult<()> {
    write_file(path, serialize_reified(store, vocab))
}

fn write_file(path: &Path, content: String) -> StoreResult<()> {
    std::fs::write(path, content).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load a graph file into a fresh store.
pub fn load(path: &Path) -> StoreResult<TripleStore> {
    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let store = parse(&content)?;
    info!(path = %path.display(), triples = store.len(), "loaded graph");
    Ok(store)
}

/// Load a graph file and merge it into an existing store.
///
/// The file is parsed into a fresh store first; a malformed file leaves
/// `target` untouched. Returns the number of distinct triples read.
pub fn load_into(target: &mut TripleStore, path: &Path) -> StoreResult<usize> {
    let loaded = load(path)?;
    let read = loaded.len();
    target.merge(loaded);
    Ok(read)
}

fn parse_statement(line: &str) -> Result<Triple, String> {
    let mut cursor = Cursor::new(line);

    let subject = cursor.term()?;
    let predicate = match cursor.term()? {
        Term::Iri(iri) => iri,
        other => return Err(format!("predicate must be an IRI, got {other:?}")),
    };
    let object = cursor.term()?;

    cursor.skip_ws();
    if !cursor.eat('.') {
        return Err("statement must end with '.'".to_string());
    }
    cursor.skip_ws();
    if !cursor.at_end() {
        return Err("trailing content after '.'".to_string());
    }

    if matches!(subject, Term::Literal(_)) {
        return Err("literal in subject position".to_string());
    }
    Ok(Triple::new(subject, predicate, object))
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Cursor { rest: line }
    }

    fn at_end(&self) -> bool {
        self.rest.is_empty()
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, expected: char) -> bool {
        if let Some(stripped) = self.rest.strip_prefix(expected) {
            self.rest = stripped;
            true
        } else {
            false
        }
    }

    fn term(&mut self) -> Result<Term, String> {
        self.skip_ws();
        match self.rest.chars().next() {
            Some('<') => self.iri().map(Term::Iri),
            Some('_') => self.blank(),
            Some('"') => self.literal(),
            Some(c) => Err(format!("unexpected character {c:?}")),
            None => Err("unexpected end of statement".to_string()),
        }
    }

    fn iri(&mut self) -> Result<Iri, String> {
        self.eat('<');
        match self.rest.find('>') {
            Some(end) => {
                let iri = Iri::new(&self.rest[..end]);
                self.rest = &self.rest[end + 1..];
                Ok(iri)
            }
            None => Err("unterminated IRI".to_string()),
        }
    }

    fn blank(&mut self) -> Result<Term, String> {
        self.eat('_');
        if !self.eat(':') {
            return Err("blank node must start with '_:'".to_string());
        }
        let end = self
            .rest
            .find(|c: char| c.is_whitespace())
            .unwrap_or(self.rest.len());
        if end == 0 {
            return Err("empty blank node label".to_string());
        }
        let label = &self.rest[..end];
        self.rest = &self.rest[end..];
        Ok(Term::blank(label))
    }

    fn literal(&mut self) -> Result<Term, String> {
        self.eat('"');
        let mut text = String::new();
        let mut chars = self.rest.char_indices();
        let close = loop {
            match chars.next() {
                Some((_, '\\')) => match chars.next() {
                    Some((_, '"')) => text.push('"'),
                    Some((_, '\\')) => text.push('\\'),
                    Some((_, 'n')) => text.push('\n'),
                    Some((_, 'r')) => text.push('\r'),
                    Some((_, 't')) => text.push('\t'),
                    Some((_, other)) => return Err(format!("unknown escape \\{other}")),
                    None => return Err("unterminated escape".to_string()),
                },
                Some((idx, '"')) => break idx,
                Some((_, c)) => text.push(c),
                None => return Err("unterminated literal".to_string()),
            }
        };
        self.rest = &self.rest[close + 1..];

        if let Some(stripped) = self.rest.strip_prefix("^^") {
            self.rest = stripped;
            let datatype = self.iri()?;
            if datatype.as_str() == XSD_INTEGER {
                let value: u64 = text
                    .parse()
                    .map_err(|_| format!("invalid integer literal {text:?}"))?;
                return Ok(Term::integer(value));
            }
            return Err(format!("unsupported datatype <{datatype}>"));
        }
        Ok(Term::text(text))
    }
}
