//! Class hierarchy: a rooted tree over the generated classes.
//!
//! The root is always `owl:Thing` and every registered class has exactly one
//! parent, so subsumption here is tree-shaped by construction. The tree is
//! stored as an index arena (parallel `nodes`/`parents`/`children` vectors)
//! and every derived view (subclass closure, direct subclasses, subtree
//! complement) comes back in a deterministic order so a seeded run is
//! reproducible.

use rustc_hash::FxHashMap;

use crate::error::BuilderError;
use crate::owl::OwlClass;

/// The subsumption tree rooted at `owl:Thing`.
///
/// `owl:Thing` itself is not a registered class: it has no arena slot and
/// queries treat it specially.
#[derive(Debug, Clone, Default)]
pub struct ClassHierarchy {
    /// Registered classes in attachment order.
    nodes: Vec<OwlClass>,
    /// Parent slot per node; `None` means the parent is `owl:Thing`.
    parents: Vec<Option<usize>>,
    /// Child slots per node, in attachment order.
    children: Vec<Vec<usize>>,
    /// Nodes attached directly under `owl:Thing`.
    root_children: Vec<usize>,
    index: FxHashMap<OwlClass, usize>,
}

impl ClassHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered classes (excluding `owl:Thing`).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, class: &OwlClass) -> bool {
        self.index.contains_key(class)
    }

    /// Registered classes in attachment order.
    pub fn classes(&self) -> impl Iterator<Item = &OwlClass> {
        self.nodes.iter()
    }

    /// Attaches `class` under `parent`, which must be `owl:Thing` or an
    /// already-attached class.
    pub fn attach(&mut self, class: OwlClass, parent: &OwlClass) -> Result<(), BuilderError> {
        debug_assert!(!self.index.contains_key(&class), "class attached twice");
        let parent_slot = if parent.is_thing() {
            None
        } else {
            Some(self.slot_of(parent)?)
        };

        let slot = self.nodes.len();
        self.index.insert(class.clone(), slot);
        self.nodes.push(class);
        self.parents.push(parent_slot);
        self.children.push(Vec::new());
        match parent_slot {
            Some(parent_slot) => self.children[parent_slot].push(slot),
            None => self.root_children.push(slot),
        }
        Ok(())
    }

    /// The parent of `class` (`owl:Thing` for top-level classes).
    pub fn parent(&self, class: &OwlClass) -> Result<OwlClass, BuilderError> {
        let slot = self.slot_of(class)?;
        Ok(match self.parents[slot] {
            Some(parent_slot) => self.nodes[parent_slot].clone(),
            None => OwlClass::thing(),
        })
    }

    /// Direct subclasses of `class`, in attachment order.
    pub fn direct_subclasses(&self, class: &OwlClass) -> Result<Vec<OwlClass>, BuilderError> {
        let slots = if class.is_thing() {
            &self.root_children
        } else {
            &self.children[self.slot_of(class)?]
        };
        Ok(slots.iter().map(|&slot| self.nodes[slot].clone()).collect())
    }

    /// The subclass closure of `class`: the class itself plus every
    /// descendant, each exactly once, in depth-first preorder.
    pub fn all_subclasses(&self, class: &OwlClass) -> Result<Vec<OwlClass>, BuilderError> {
        if class.is_thing() {
            let mut closure = Vec::with_capacity(self.nodes.len() + 1);
            closure.push(OwlClass::thing());
            closure.extend(self.nodes.iter().cloned());
            return Ok(closure);
        }

        let mut closure = Vec::new();
        let mut stack = vec![self.slot_of(class)?];
        while let Some(slot) = stack.pop() {
            closure.push(self.nodes[slot].clone());
            stack.extend(self.children[slot].iter().rev().copied());
        }
        Ok(closure)
    }

    /// Registered classes outside the subtree rooted at `class`, in
    /// attachment order. Empty for `owl:Thing`.
    pub fn complement_of_subtree(
        &self,
        class: &OwlClass,
    ) -> Result<Vec<OwlClass>, BuilderError> {
        if class.is_thing() {
            return Ok(Vec::new());
        }

        let mut in_subtree = vec![false; self.nodes.len()];
        let mut stack = vec![self.slot_of(class)?];
        while let Some(slot) = stack.pop() {
            in_subtree[slot] = true;
            stack.extend(self.children[slot].iter().copied());
        }
        Ok(self
            .nodes
            .iter()
            .enumerate()
            .filter(|(slot, _)| !in_subtree[*slot])
            .map(|(_, class)| class.clone())
            .collect())
    }

    fn slot_of(&self, class: &OwlClass) -> Result<usize, BuilderError> {
        self.index
            .get(class)
            .copied()
            .ok_or_else(|| BuilderError::UnknownClass {
                iri: class.iri().as_str().to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn cls(name: &str) -> OwlClass {
        OwlClass::from_iri(format!("http://example.org/onto#{name}")).unwrap()
    }

    /// Thing ── A ── B ── D
    ///       │    └─ C
    ///       └─ E
    fn sample() -> ClassHierarchy {
        let mut hierarchy = ClassHierarchy::new();
        hierarchy.attach(cls("A"), &OwlClass::thing()).unwrap();
        hierarchy.attach(cls("B"), &cls("A")).unwrap();
        hierarchy.attach(cls("C"), &cls("A")).unwrap();
        hierarchy.attach(cls("D"), &cls("B")).unwrap();
        hierarchy.attach(cls("E"), &OwlClass::thing()).unwrap();
        hierarchy
    }

    #[test]
    fn direct_subclasses_follow_attachment() {
        let hierarchy = sample();
        assert_eq!(
            hierarchy.direct_subclasses(&cls("A")).unwrap(),
            vec![cls("B"), cls("C")]
        );
        assert_eq!(
            hierarchy.direct_subclasses(&OwlClass::thing()).unwrap(),
            vec![cls("A"), cls("E")]
        );
        assert!(hierarchy.direct_subclasses(&cls("D")).unwrap().is_empty());
    }

    #[test]
    fn closure_contains_each_class_exactly_once() {
        let hierarchy = sample();
        let closure = hierarchy.all_subclasses(&cls("A")).unwrap();
        assert_eq!(closure, vec![cls("A"), cls("B"), cls("D"), cls("C")]);

        let unique: FxHashSet<_> = closure.iter().collect();
        assert_eq!(unique.len(), closure.len());
    }

    #[test]
    fn closure_of_leaf_is_the_leaf() {
        let hierarchy = sample();
        assert_eq!(hierarchy.all_subclasses(&cls("E")).unwrap(), vec![cls("E")]);
    }

    #[test]
    fn thing_closure_spans_everything() {
        let hierarchy = sample();
        let closure = hierarchy.all_subclasses(&OwlClass::thing()).unwrap();
        assert_eq!(closure.len(), hierarchy.len() + 1);
        assert_eq!(closure[0], OwlClass::thing());
    }

    #[test]
    fn complement_excludes_the_whole_subtree() {
        let hierarchy = sample();
        assert_eq!(
            hierarchy.complement_of_subtree(&cls("A")).unwrap(),
            vec![cls("E")]
        );
        assert_eq!(
            hierarchy.complement_of_subtree(&cls("B")).unwrap(),
            vec![cls("A"), cls("C"), cls("E")]
        );
        assert!(hierarchy
            .complement_of_subtree(&OwlClass::thing())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn parent_of_top_level_class_is_thing() {
        let hierarchy = sample();
        assert!(hierarchy.parent(&cls("A")).unwrap().is_thing());
        assert_eq!(hierarchy.parent(&cls("D")).unwrap(), cls("B"));
    }

    #[test]
    fn unknown_class_is_reported() {
        let hierarchy = sample();
        let error = hierarchy.all_subclasses(&cls("Ghost")).unwrap_err();
        assert!(matches!(error, BuilderError::UnknownClass { .. }));
    }
}
