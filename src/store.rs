//! Read-only fact store abstraction and the in-memory implementation.

use std::collections::{HashMap, HashSet};

use crate::term::{Term, Triple};

/// A loaded, queryable set of facts.
///
/// Implementors supply the namespace table and pattern lookup; everything else is derived.
/// Lookups never fail: a store that cannot answer returns no facts.
pub trait FactStore {
    /// Declared `(prefix, namespace URI)` pairs in declaration order.
    fn namespaces(&self) -> Vec<(String, String)>;

    /// All triples matching the pattern; `None` is a wildcard.
    fn matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Vec<Triple>;

    fn len(&self) -> usize {
        self.matching(None, None, None).len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every distinct subject, in store order.
    fn subjects(&self) -> Vec<Term> {
        distinct(self.matching(None, None, None).into_iter().map(|t| t.subject))
    }

    /// Objects of `(subject, predicate, *)`.
    fn objects(&self, subject: &Term, predicate: &Term) -> Vec<Term> {
        distinct(
            self.matching(Some(subject), Some(predicate), None)
                .into_iter()
                .map(|t| t.object),
        )
    }

    /// First object of `(subject, predicate, *)`, if any.
    fn value(&self, subject: &Term, predicate: &Term) -> Option<Term> {
        self.objects(subject, predicate).into_iter().next()
    }

    /// Distinct subjects of any `(*, predicate, *)` fact.
    fn subjects_with(&self, predicate: &Term) -> Vec<Term> {
        distinct(
            self.matching(None, Some(predicate), None)
                .into_iter()
                .map(|t| t.subject),
        )
    }

    /// Distinct objects of any `(*, predicate, *)` fact.
    fn objects_with(&self, predicate: &Term) -> Vec<Term> {
        distinct(
            self.matching(None, Some(predicate), None)
                .into_iter()
                .map(|t| t.object),
        )
    }
}

impl<S: FactStore + ?Sized> FactStore for &S {
    fn namespaces(&self) -> Vec<(String, String)> {
        (**self).namespaces()
    }

    fn matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Vec<Triple> {
        (**self).matching(subject, predicate, object)
    }
}

fn distinct(terms: impl Iterator<Item = Term>) -> Vec<Term> {
    let mut seen = HashSet::new();
    terms.filter(|t| seen.insert(t.clone())).collect()
}

/// Insertion-ordered in-memory store with set semantics.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    prefixes: Vec<(String, String)>,
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
    by_subject: HashMap<Term, Vec<usize>>,
    by_predicate: HashMap<Term, Vec<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a prefix. Re-declaring keeps its first position and takes the new URI.
    pub fn bind_prefix(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        let prefix = prefix.into();
        let uri = uri.into();
        match self.prefixes.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = uri,
            None => self.prefixes.push((prefix, uri)),
        }
    }

    /// Adds a fact; returns `false` if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if !self.seen.insert(triple.clone()) {
            return false;
        }
        let idx = self.triples.len();
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .push(idx);
        self.by_predicate
            .entry(triple.predicate.clone())
            .or_default()
            .push(idx);
        self.triples.push(triple);
        true
    }

    pub fn add(&mut self, subject: Term, predicate: Term, object: Term) -> bool {
        self.insert(Triple::new(subject, predicate, object))
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }
}

impl FactStore for MemoryStore {
    fn namespaces(&self) -> Vec<(String, String)> {
        self.prefixes.clone()
    }

    fn matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Vec<Triple> {
        let candidates: Box<dyn Iterator<Item = &Triple> + '_> = match (subject, predicate) {
            (Some(s), _) => Box::new(
                self.by_subject
                    .get(s)
                    .into_iter()
                    .flatten()
                    .map(|&i| &self.triples[i]),
            ),
            (None, Some(p)) => Box::new(
                self.by_predicate
                    .get(p)
                    .into_iter()
                    .flatten()
                    .map(|&i| &self.triples[i]),
            ),
            (None, None) => Box::new(self.triples.iter()),
        };

        candidates
            .filter(|t| t.matches(subject, predicate, object))
            .cloned()
            .collect()
    }

    fn len(&self) -> usize {
        self.triples.len()
    }
}

impl Extend<Triple> for MemoryStore {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

impl FromIterator<Triple> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}
