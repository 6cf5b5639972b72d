//! Graph nodes and statements.
//!
//! A [`Term`] is anything that can sit in a subject, predicate or object slot. Resources are
//! identified by the term itself; there is no separate resource id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A literal value with its optional datatype IRI or language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// A node in the fact graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Term {
    Iri(String),
    Blank(String),
    Literal(Literal),
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Self::Iri(iri.into())
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Self::Blank(label.into())
    }

    /// Plain string literal.
    pub fn literal(lexical: impl Into<String>) -> Self {
        Self::Literal(Literal {
            lexical: lexical.into(),
            datatype: None,
            language: None,
        })
    }

    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self::Literal(Literal {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        })
    }

    pub fn tagged(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self::Literal(Literal {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        })
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// The bare text of the term: the IRI, the blank node label or the literal's lexical form.
    pub fn lexical(&self) -> &str {
        match self {
            Self::Iri(iri) => iri,
            Self::Blank(label) => label,
            Self::Literal(lit) => &lit.lexical,
        }
    }

    /// Short display name.
    ///
    /// For IRIs this is the fragment after the last `#`, falling back to the last path segment
    /// after `/`. Blank nodes and literals return their label / lexical form unchanged.
    pub fn local_name(&self) -> &str {
        match self {
            Self::Iri(iri) => {
                if let Some((_, fragment)) = iri.rsplit_once('#') {
                    fragment
                } else if let Some((_, segment)) = iri.rsplit_once('/') {
                    if segment.is_empty() {
                        iri
                    } else {
                        segment
                    }
                } else {
                    iri
                }
            }
            other => other.lexical(),
        }
    }

    /// Numeric value of a literal, if its lexical form parses as a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Literal(lit) => lit.lexical.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => f.write_str(iri),
            Self::Blank(label) => write!(f, "_:{label}"),
            Self::Literal(lit) => {
                write!(f, "\"{}\"", lit.lexical)?;
                if let Some(lang) = &lit.language {
                    write!(f, "@{lang}")?;
                } else if let Some(dt) = &lit.datatype {
                    write!(f, "^^<{dt}>")?;
                }
                Ok(())
            }
        }
    }
}

/// A single (subject, predicate, object) statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// Whether this triple fits a pattern where `None` is a wildcard.
    pub fn matches(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> bool {
        subject.map_or(true, |s| *s == self.subject)
            && predicate.map_or(true, |p| *p == self.predicate)
            && object.map_or(true, |o| *o == self.object)
    }
}
