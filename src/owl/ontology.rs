//! The ontology container.

use rustc_hash::FxHashSet;

use super::axiom::Axiom;

/// A deduplicated collection of axioms.
///
/// Axioms behave as a set (inserting a duplicate is a no-op and equality is
/// order-independent) but insertion order is preserved, so a generation run
/// with a seeded RNG serializes byte-identically.
#[derive(Debug, Clone, Default)]
pub struct Ontology {
    axioms: Vec<Axiom>,
    seen: FxHashSet<Axiom>,
}

impl Ontology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an axiom. Returns `false` when it was already present.
    pub fn insert(&mut self, axiom: Axiom) -> bool {
        if self.seen.insert(axiom.clone()) {
            self.axioms.push(axiom);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, axiom: &Axiom) -> bool {
        self.seen.contains(axiom)
    }

    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    /// Axioms in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Axiom> {
        self.axioms.iter()
    }

    /// Set equality, ignoring insertion order.
    pub fn set_eq(&self, other: &Ontology) -> bool {
        self.seen == other.seen
    }
}

impl Extend<Axiom> for Ontology {
    fn extend<T: IntoIterator<Item = Axiom>>(&mut self, iter: T) {
        for axiom in iter {
            self.insert(axiom);
        }
    }
}

impl FromIterator<Axiom> for Ontology {
    fn from_iter<T: IntoIterator<Item = Axiom>>(iter: T) -> Self {
        let mut ontology = Ontology::new();
        ontology.extend(iter);
        ontology
    }
}

impl<'a> IntoIterator for &'a Ontology {
    type Item = &'a Axiom;
    type IntoIter = std::slice::Iter<'a, Axiom>;

    fn into_iter(self) -> Self::IntoIter {
        self.axioms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owl::entity::OwlClass;

    fn subclass(sub: &str, sup: &str) -> Axiom {
        Axiom::SubClassOf {
            sub: OwlClass::from_iri(format!("http://example.org/{sub}")).unwrap(),
            sup: OwlClass::from_iri(format!("http://example.org/{sup}")).unwrap(),
        }
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut ontology = Ontology::new();
        assert!(ontology.insert(subclass("A", "B")));
        assert!(!ontology.insert(subclass("A", "B")));
        assert_eq!(ontology.len(), 1);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut ontology = Ontology::new();
        ontology.insert(subclass("B", "C"));
        ontology.insert(subclass("A", "B"));
        let order: Vec<_> = ontology.iter().cloned().collect();
        assert_eq!(order, vec![subclass("B", "C"), subclass("A", "B")]);
    }

    #[test]
    fn set_eq_ignores_order() {
        let forward: Ontology = [subclass("A", "B"), subclass("B", "C")]
            .into_iter()
            .collect();
        let backward: Ontology = [subclass("B", "C"), subclass("A", "B")]
            .into_iter()
            .collect();
        assert!(forward.set_eq(&backward));

        let different: Ontology = [subclass("A", "C")].into_iter().collect();
        assert!(!forward.set_eq(&different));
    }
}
