//! IRI canonicalization and namespace handling.
//!
//! Every node identifier in the graph is produced by one canonicalization
//! function: trim, replace whitespace runs with `_`, strip everything that
//! is not alphanumeric or `_`, percent-encode what remains. Identical
//! surface text always yields the same identifier, and the function is
//! idempotent, so re-canonicalizing a stored identifier is harmless.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default namespace under which all graph identifiers are minted.
pub const DEFAULT_NAMESPACE: &str = "http://example.org/posthuman#";

/// ASCII bytes to percent-encode in local names.
///
/// `_` survives canonicalization and `%` must not be re-encoded, otherwise
/// canonicalization would not be idempotent over its own output.
const LOCAL_NAME_ENCODE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'%');

/// Canonicalize free text into a local name.
///
/// Steps, in order:
/// 1. trim surrounding whitespace
/// 2. replace each run of internal whitespace with a single `_`
/// 3. drop characters that are not alphanumeric, `_`, or `%`
/// 4. percent-encode the non-ASCII remainder
///
/// # Examples
///
/// ```
/// use lit_graph_core::iri::canonicalize;
///
/// assert_eq!(canonicalize("  Posthuman Ethics "), "Posthuman_Ethics");
/// assert_eq!(canonicalize("Luba Luft!"), "Luba_Luft");
/// // Idempotent over its own output.
/// let once = canonicalize("Café Society");
/// assert_eq!(canonicalize(&once), once);
/// ```
pub fn canonicalize(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut pending_sep = false;
    for c in text.trim().chars() {
        if c.is_whitespace() {
            pending_sep = !cleaned.is_empty();
        } else if c.is_alphanumeric() || c == '_' || c == '%' {
            if pending_sep {
                cleaned.push('_');
                pending_sep = false;
            }
            cleaned.push(c);
        }
    }
    utf8_percent_encode(&cleaned, LOCAL_NAME_ENCODE).to_string()
}

/// A fully-qualified graph identifier.
///
/// Always built through [`Namespace::iri`] (or parsed back from a
/// serialized graph), never assembled by hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    /// Wrap an already-qualified identifier.
    ///
    /// Used by the serialization parser and by the vocabulary table;
    /// application code goes through [`Namespace::iri`].
    pub fn new(full: impl Into<String>) -> Self {
        Iri(full.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the final `#`, or the whole identifier if there is none.
    ///
    /// ```
    /// use lit_graph_core::iri::Iri;
    ///
    /// let iri = Iri::new("http://example.org/posthuman#Deckard");
    /// assert_eq!(iri.local_name(), "Deckard");
    /// ```
    pub fn local_name(&self) -> &str {
        match self.0.rfind('#') {
            Some(pos) => &self.0[pos + 1..],
            None => &self.0,
        }
    }

    /// Local name with underscores restored to spaces, for human-facing tables.
    pub fn display_name(&self) -> String {
        self.local_name().replace('_', " ")
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The single namespace prefix under which graph identifiers are minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Default for Namespace {
    fn default() -> Self {
        Namespace(DEFAULT_NAMESPACE.to_string())
    }
}

impl Namespace {
    /// Create a namespace from a base prefix, e.g. `http://example.org/posthuman#`.
    pub fn new(base: impl Into<String>) -> Self {
        Namespace(base.into())
    }

    pub fn base(&self) -> &str {
        &self.0
    }

    /// Mint an identifier for the given surface text.
    ///
    /// The text is canonicalized first, so `ns.iri("Luba Luft")` and
    /// `ns.iri("Luba_Luft")` produce the same identifier.
    pub fn iri(&self, text: &str) -> Iri {
        Iri(format!("{}{}", self.0, canonicalize(text)))
    }

    /// Whether the identifier was minted under this namespace.
    pub fn contains(&self, iri: &Iri) -> bool {
        iri.as_str().starts_with(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_replaces_whitespace_runs() {
        assert_eq!(canonicalize("Cyborg   Theory"), "Cyborg_Theory");
        assert_eq!(canonicalize("\tAnimal \n Ethics "), "Animal_Ethics");
    }

    #[test]
    fn canonicalize_strips_punctuation() {
        assert_eq!(canonicalize("Deckard's empathy-box?"), "Deckards_empathybox");
    }

    #[test]
    fn canonicalize_is_idempotent() {
        for text in ["Posthuman Ethics", "Café Society", "a  b\tc", "", "  %  "] {
            let once = canonicalize(text);
            assert_eq!(canonicalize(&once), once, "not idempotent for {text:?}");
        }
    }

    #[test]
    fn canonicalize_percent_encodes_non_ascii() {
        let name = canonicalize("Café");
        assert_eq!(name, "Caf%C3%A9");
        assert_eq!(canonicalize(&name), name);
    }

    #[test]
    fn identical_text_yields_identical_iri() {
        let ns = Namespace::default();
        assert_eq!(ns.iri("Rick Deckard"), ns.iri("Rick  Deckard"));
        assert_eq!(ns.iri("Rick Deckard").local_name(), "Rick_Deckard");
    }

    #[test]
    fn display_name_restores_spaces() {
        let ns = Namespace::default();
        assert_eq!(ns.iri("Cyborg Theory").display_name(), "Cyborg Theory");
    }
}
