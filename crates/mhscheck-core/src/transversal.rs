//! Canonical set-of-sets model for transversal collections.
//!
//! `Token` is the opaque element type; `Transversal` is one candidate hitting
//! set; `TransversalSet` is a canonicalized collection of them. All three are
//! backed by ordered containers so equality uses set semantics and every
//! serialization is deterministic.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One element of a hypergraph edge or transversal.
///
/// Real test data uses JSON integers or strings; anything else in an element
/// position is rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
    /// Integer element.
    Int(i64),
    /// String element.
    Text(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Int(n) => write!(f, "{n}"),
            Token::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Token {
    fn from(n: i64) -> Self {
        Token::Int(n)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token::Text(s.to_string())
    }
}

/// A single hitting set, with element order and duplicates collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transversal(BTreeSet<Token>);

impl Transversal {
    /// Build a transversal from raw elements.
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Token>,
    {
        Self(elements.into_iter().map(Into::into).collect())
    }

    /// Number of distinct elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the transversal has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate elements in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.0.iter()
    }
}

impl FromIterator<Token> for Transversal {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A canonicalized collection of transversals.
///
/// Deserializing through this type is itself the normalization step: ordering
/// and duplicate entries at both nesting levels disappear into the B-tree
/// structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransversalSet(BTreeSet<Transversal>);

impl TransversalSet {
    /// Build the canonical set from raw nested lists.
    #[must_use]
    pub fn from_lists(lists: &[Vec<Token>]) -> Self {
        Self(
            lists
                .iter()
                .map(|list| list.iter().cloned().collect())
                .collect(),
        )
    }

    /// Number of distinct transversals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `other` is fully contained in `self`.
    #[must_use]
    pub fn contains(&self, transversal: &Transversal) -> bool {
        self.0.contains(transversal)
    }

    /// Set difference `self − other`, preserving canonical order.
    #[must_use]
    pub fn difference(&self, other: &TransversalSet) -> TransversalSet {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    /// Set union, preserving canonical order.
    #[must_use]
    pub fn union(&self, other: &TransversalSet) -> TransversalSet {
        Self(self.0.union(&other.0).cloned().collect())
    }

    /// Iterate transversals in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Transversal> {
        self.0.iter()
    }
}

impl FromIterator<Transversal> for TransversalSet {
    fn from_iter<I: IntoIterator<Item = Transversal>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
