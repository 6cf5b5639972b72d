//! Persistent fact store on an embedded sled database.
//!
//! Facts are kept twice: once keyed subject-first (`spo`) and once predicate-first (`pos`) so
//! both "what does this resource point to" and "who uses this predicate" are prefix scans.
//! Key parts are JSON-encoded terms joined by a NUL byte, which JSON never emits unescaped.

use std::path::Path;

use tracing::warn;

use crate::error::Result;
use crate::store::FactStore;
use crate::term::{Term, Triple};

const SPO_TREE: &str = "spo";
const POS_TREE: &str = "pos";
const NAMESPACES_TREE: &str = "namespaces";

const SEP: u8 = 0;

pub struct SledStore {
    db: sled::Db,
    spo: sled::Tree,
    pos: sled::Tree,
    namespaces: sled::Tree,
}

impl Drop for SledStore {
    fn drop(&mut self) {
        if let Err(e) = self.db.flush() {
            warn!(error = %e, "failed to flush fact store on drop");
        }
    }
}

impl std::fmt::Debug for SledStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledStore")
            .field("facts", &self.spo.len())
            .field("namespaces", &self.namespaces.len())
            .finish()
    }
}

impl SledStore {
    /// Opens (or creates) a store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_db(sled::open(path)?)
    }

    /// Wraps an already-open database handle.
    pub fn from_db(db: sled::Db) -> Result<Self> {
        Ok(Self {
            spo: db.open_tree(SPO_TREE)?,
            pos: db.open_tree(POS_TREE)?,
            namespaces: db.open_tree(NAMESPACES_TREE)?,
            db,
        })
    }

    /// Records a namespace declaration; a known prefix is updated in place.
    pub fn bind_prefix(&self, prefix: &str, uri: &str) -> Result<()> {
        let value = serde_json::to_vec(&(prefix, uri))?;

        for entry in self.namespaces.iter() {
            let (key, stored) = entry?;
            if let Ok((p, _)) = serde_json::from_slice::<(String, String)>(&stored) {
                if p == prefix {
                    self.namespaces.insert(key, value)?;
                    return Ok(());
                }
            }
        }

        // Monotonic ids keep declaration order under byte-ordered iteration.
        let key = format!("{:020}", self.db.generate_id()?);
        self.namespaces.insert(key.as_bytes(), value)?;
        Ok(())
    }

    /// Adds a fact; returns `false` if it was already stored.
    pub fn insert(&self, triple: &Triple) -> Result<bool> {
        let spo_key = join(&[
            encode(&triple.subject)?,
            encode(&triple.predicate)?,
            encode(&triple.object)?,
        ]);
        if self.spo.insert(spo_key, Vec::new())?.is_some() {
            return Ok(false);
        }

        let pos_key = join(&[
            encode(&triple.predicate)?,
            encode(&triple.object)?,
            encode(&triple.subject)?,
        ]);
        self.pos.insert(pos_key, Vec::new())?;
        Ok(true)
    }

    /// Copies the namespace table and every fact of `source`, then flushes.
    ///
    /// Returns how many facts were new to this store.
    pub fn import<S: FactStore + ?Sized>(&self, source: &S) -> Result<usize> {
        for (prefix, uri) in source.namespaces() {
            self.bind_prefix(&prefix, &uri)?;
        }

        let mut added = 0;
        for triple in source.matching(None, None, None) {
            if self.insert(&triple)? {
                added += 1;
            }
        }

        self.flush()?;
        Ok(added)
    }

    /// Drops every fact and namespace declaration.
    pub fn clear(&self) -> Result<()> {
        self.spo.clear()?;
        self.pos.clear()?;
        self.namespaces.clear()?;
        Ok(())
    }

    /// Makes this store hold exactly the facts of `source`, discarding earlier imports.
    pub fn replace<S: FactStore + ?Sized>(&self, source: &S) -> Result<usize> {
        self.clear()?;
        self.import(source)
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    fn scan(&self, tree: &sled::Tree, prefix: &[Vec<u8>], order: KeyOrder) -> Vec<Triple> {
        let mut key_prefix = join(prefix);
        // A full three-part key has no trailing separator.
        if !prefix.is_empty() && prefix.len() < 3 {
            key_prefix.push(SEP);
        }

        tree.scan_prefix(key_prefix)
            .filter_map(|res| match res {
                Ok((key, _)) => Some(key),
                Err(e) => {
                    warn!(error = %e, "fact store read failed");
                    None
                }
            })
            .filter_map(|key| decode_key(&key, order))
            .collect()
    }
}

impl FactStore for SledStore {
    fn namespaces(&self) -> Vec<(String, String)> {
        self.namespaces
            .iter()
            .filter_map(|res| res.ok())
            .filter_map(|(_, v)| serde_json::from_slice::<(String, String)>(&v).ok())
            .collect()
    }

    fn matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Vec<Triple> {
        let encoded = |t: &Term| match encode(t) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(error = %e, term = %t, "unencodable lookup term");
                None
            }
        };

        let hits = match (subject, predicate) {
            (Some(s), p) => {
                let mut prefix = vec![];
                let Some(s) = encoded(s) else { return Vec::new() };
                prefix.push(s);
                if let Some(p) = p {
                    let Some(p) = encoded(p) else { return Vec::new() };
                    prefix.push(p);
                    if let Some(o) = object {
                        let Some(o) = encoded(o) else { return Vec::new() };
                        prefix.push(o);
                    }
                }
                self.scan(&self.spo, &prefix, KeyOrder::Spo)
            }
            (None, Some(p)) => {
                let mut prefix = vec![];
                let Some(p) = encoded(p) else { return Vec::new() };
                prefix.push(p);
                if let Some(o) = object {
                    let Some(o) = encoded(o) else { return Vec::new() };
                    prefix.push(o);
                }
                self.scan(&self.pos, &prefix, KeyOrder::Pos)
            }
            (None, None) => self.scan(&self.spo, &[], KeyOrder::Spo),
        };

        hits.into_iter()
            .filter(|t| t.matches(subject, predicate, object))
            .collect()
    }

    fn len(&self) -> usize {
        self.spo.len()
    }
}

#[derive(Clone, Copy)]
enum KeyOrder {
    Spo,
    Pos,
}

fn encode(term: &Term) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(term)
}

fn join(parts: &[Vec<u8>]) -> Vec<u8> {
    let mut key = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            key.push(SEP);
        }
        key.extend_from_slice(part);
    }
    key
}

fn decode_key(key: &[u8], order: KeyOrder) -> Option<Triple> {
    let mut parts = key.split(|b| *b == SEP);
    let a: Term = serde_json::from_slice(parts.next()?).ok()?;
    let b: Term = serde_json::from_slice(parts.next()?).ok()?;
    let c: Term = serde_json::from_slice(parts.next()?).ok()?;
    if parts.next().is_some() {
        return None;
    }

    Some(match order {
        KeyOrder::Spo => Triple::new(a, b, c),
        KeyOrder::Pos => Triple::new(c, a, b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn temp_store() -> SledStore {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .expect("failed to open temporary sled db");
        SledStore::from_db(db).expect("failed to open trees")
    }

    fn iri(s: &str) -> Term {
        Term::iri(format!("http://www.example.org/digitaltwin#{s}"))
    }

    #[test]
    fn import_copies_facts_and_prefixes() {
        let mut memory = MemoryStore::new();
        memory.bind_prefix("ns0", "http://www.example.org/digitaltwin#");
        memory.bind_prefix("geo", "http://www.opengis.net/ont/geosparql#");
        memory.add(iri("Floor"), iri("hasChildDigitalTwin"), iri("Room1"));
        memory.add(iri("Floor"), iri("hasChildDigitalTwin"), iri("Room2"));
        memory.add(iri("S1"), iri("sensorID"), Term::literal("T-100"));

        let store = temp_store();
        assert_eq!(store.import(&memory).unwrap(), 3);
        assert_eq!(store.import(&memory).unwrap(), 0);

        assert_eq!(store.len(), 3);
        assert_eq!(
            store.namespaces(),
            vec![
                ("ns0".to_string(), "http://www.example.org/digitaltwin#".to_string()),
                ("geo".to_string(), "http://www.opengis.net/ont/geosparql#".to_string()),
            ]
        );
    }

    #[test]
    fn lookups_by_subject_and_predicate() {
        let store = temp_store();
        store
            .insert(&Triple::new(iri("Floor"), iri("hasChildDigitalTwin"), iri("Room1")))
            .unwrap();
        store
            .insert(&Triple::new(iri("Room1"), iri("hasChildDigitalTwin"), iri("Desk")))
            .unwrap();
        store
            .insert(&Triple::new(iri("Room1"), iri("hasSensor"), Term::blank("s0")))
            .unwrap();

        let child = iri("hasChildDigitalTwin");
        assert_eq!(store.objects(&iri("Room1"), &child), vec![iri("Desk")]);
        let mut subjects = store.subjects_with(&child);
        subjects.sort();
        assert_eq!(subjects, vec![iri("Floor"), iri("Room1")]);

        let mut objects = store.objects_with(&child);
        objects.sort();
        assert_eq!(objects, vec![iri("Desk"), iri("Room1")]);

        assert_eq!(store.matching(None, None, Some(&Term::blank("s0"))).len(), 1);
        assert_eq!(
            store
                .matching(Some(&iri("Room1")), Some(&iri("hasSensor")), Some(&Term::blank("s0")))
                .len(),
            1
        );
        assert!(store.objects(&iri("Room"), &child).is_empty());
    }

    #[test]
    fn replace_discards_earlier_imports() {
        use crate::{extract_report, ExtractConfig};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twin_db");

        let mut first = MemoryStore::new();
        first.bind_prefix("ns0", "http://www.example.org/digitaltwin#");
        first.add(iri("Alpha"), iri("hasChildDigitalTwin"), iri("Old"));
        {
            let store = SledStore::open(&path).unwrap();
            store.replace(&first).unwrap();
        }

        let mut second = MemoryStore::new();
        second.bind_prefix("dt", "http://www.example.org/digitaltwin#");
        second.add(iri("Building"), iri("hasChildDigitalTwin"), iri("Room"));

        let store = SledStore::open(&path).unwrap();
        assert_eq!(store.replace(&second).unwrap(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.namespaces()[0].0, "dt");

        let report = extract_report(&store, &ExtractConfig::default()).unwrap();
        let names: Vec<_> = report.iter().map(|r| r.resource.local_name()).collect();
        assert_eq!(names, vec!["Building", "Room"]);
    }

    #[test]
    fn import_merges_with_existing_facts() {
        let store = temp_store();
        let first: MemoryStore =
            std::iter::once(Triple::new(iri("Alpha"), iri("hasChildDigitalTwin"), iri("Old")))
                .collect();
        let second: MemoryStore =
            std::iter::once(Triple::new(iri("Building"), iri("hasChildDigitalTwin"), iri("Room")))
                .collect();

        store.import(&first).unwrap();
        store.import(&second).unwrap();
        assert_eq!(store.len(), 2);

        store.clear().unwrap();
        assert!(store.is_empty());
        assert!(store.namespaces().is_empty());
    }

    #[test]
    fn rebinding_prefix_updates_in_place() {
        let store = temp_store();
        store.bind_prefix("ns0", "http://a.example.org/#").unwrap();
        store.bind_prefix("ex", "http://b.test/#").unwrap();
        store.bind_prefix("ns0", "http://www.example.org/digitaltwin#").unwrap();

        let ns = store.namespaces();
        assert_eq!(ns[0], ("ns0".into(), "http://www.example.org/digitaltwin#".into()));
        assert_eq!(ns.len(), 2);
    }
}
