use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use oxrdf::{BlankNode, NamedNode, NamedNodeRef};
use serde::Deserialize;
use thiserror::Error;

/// Absolute IRI naming a vocabulary term or a resource.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct Iri {
    value: String,
}

impl Iri {
    /// Parses `value` as an absolute IRI.
    pub fn new(value: impl Into<String>) -> Result<Self, IriError> {
        let value = value.into();
        match NamedNode::new(value.as_str()) {
            Ok(_) => Ok(Self { value }),
            Err(_) => Err(IriError::Invalid { value }),
        }
    }

    /// The IRI text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Borrows the identifier as an RDF named node.
    #[must_use]
    pub fn as_named_node(&self) -> NamedNodeRef<'_> {
        NamedNodeRef::new_unchecked(&self.value)
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for Iri {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for Iri {
    type Error = IriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NamedNodeRef<'_>> for Iri {
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self {
            value: node.as_str().to_owned(),
        }
    }
}

impl From<NamedNode> for Iri {
    fn from(node: NamedNode) -> Self {
        Self {
            value: node.into_string(),
        }
    }
}

impl PartialEq<NamedNodeRef<'_>> for Iri {
    fn eq(&self, other: &NamedNodeRef<'_>) -> bool {
        self.value == other.as_str()
    }
}

/// Returned by [`Iri::new`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IriError {
    #[error("invalid IRI: {value}")]
    Invalid { value: String },
}

/// Individual data item whose asserted types are looked up in a store.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Resource identified by an IRI.
    Named(Iri),
    /// Anonymous resource local to its store.
    Blank(BlankNode),
}

impl From<Iri> for Resource {
    fn from(iri: Iri) -> Self {
        Self::Named(iri)
    }
}

impl From<BlankNode> for Resource {
    fn from(node: BlankNode) -> Self {
        Self::Blank(node)
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(iri) => write!(f, "<{iri}>"),
            Self::Blank(node) => Display::fmt(node, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use oxrdf::BlankNode;

    use super::{Iri, Resource};

    #[test]
    fn parses_absolute_iris() {
        let iri = Iri::new("https://example.org/resource").expect("valid IRI");
        assert_eq!(iri.as_str(), "https://example.org/resource");
        assert_eq!(iri.as_named_node().as_str(), "https://example.org/resource");
    }

    #[test]
    fn relative_or_malformed_text_is_rejected() {
        let err = Iri::new("not an iri").expect_err("invalid IRI");
        assert!(matches!(err, super::IriError::Invalid { value } if value == "not an iri"));
    }

    #[test]
    fn deserializes_through_validation() {
        let iri: Iri = serde_yaml::from_str("https://example.org/Thing").expect("valid IRI");
        assert_eq!(iri.as_str(), "https://example.org/Thing");
        assert!(serde_yaml::from_str::<Iri>("not an iri").is_err());
    }

    #[test]
    fn resources_render_like_ntriples_terms() {
        let named = Resource::from(Iri::new("https://example.org/rex").expect("valid IRI"));
        assert_eq!(named.to_string(), "<https://example.org/rex>");

        let blank = Resource::from(BlankNode::new("b0").expect("valid blank node"));
        assert_eq!(blank.to_string(), "_:b0");
    }
}
