//! End-to-end scenario generation tests.
//!
//! Each test generates a complete scenario with the offline asserted-type
//! oracle and checks the structural guarantees of the output: the target
//! expression separates the labeled examples, nesting-chain edges occur only
//! in the constructed walks, and the written SML-Bench task matches the
//! scenario in memory.

use std::fs;

use ontogen::generator::{GeneratorConfig, ScenarioGenerator};
use ontogen::oracle::AssertedTypeOracle;
use ontogen::owl::{Axiom, ClassExpression, Entity, NamedIndividual, ObjectProperty, OwlClass};
use ontogen::scenario::Scenario;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::{FxHashMap, FxHashSet};

/// The benchmark family's canonical parameters: 50 classes, 10 object
/// properties, 5 data properties, 300 individuals, 20/20 examples, depth 5.
fn benchmark_config() -> GeneratorConfig {
    GeneratorConfig {
        num_pos_examples: 20,
        num_neg_examples: 20,
        num_classes: 50,
        num_object_properties: 10,
        num_data_properties: 5,
        num_overall_individuals: 300,
        existential_nesting_depth: 5,
        ..Default::default()
    }
}

fn generate(seed: u64) -> Scenario {
    let mut generator =
        ScenarioGenerator::new(benchmark_config(), AssertedTypeOracle::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    generator.generate(&mut rng).unwrap()
}

/// Asserted view of a generated ontology: individual types, the subclass
/// tree and the property-assertion edges.
struct AssertedGraph {
    types: FxHashMap<NamedIndividual, Vec<OwlClass>>,
    parents: FxHashMap<OwlClass, OwlClass>,
    edges: FxHashMap<(NamedIndividual, ObjectProperty), Vec<NamedIndividual>>,
}

impl AssertedGraph {
    fn of(scenario: &Scenario) -> Self {
        let mut types: FxHashMap<NamedIndividual, Vec<OwlClass>> = FxHashMap::default();
        let mut parents = FxHashMap::default();
        let mut edges: FxHashMap<(NamedIndividual, ObjectProperty), Vec<NamedIndividual>> =
            FxHashMap::default();
        for axiom in scenario.ontology().iter() {
            match axiom {
                Axiom::ClassAssertion { individual, class } => {
                    types
                        .entry(individual.clone())
                        .or_default()
                        .push(class.clone());
                }
                Axiom::SubClassOf { sub, sup } => {
                    parents.insert(sub.clone(), sup.clone());
                }
                Axiom::ObjectPropertyAssertion {
                    subject,
                    property,
                    object,
                } => {
                    edges
                        .entry((subject.clone(), property.clone()))
                        .or_default()
                        .push(object.clone());
                }
                _ => {}
            }
        }
        Self {
            types,
            parents,
            edges,
        }
    }

    fn is_subclass_of(&self, class: &OwlClass, ancestor: &OwlClass) -> bool {
        let mut current = class.clone();
        for _ in 0..=self.parents.len() {
            if current == *ancestor {
                return true;
            }
            match self.parents.get(&current) {
                Some(parent) => current = parent.clone(),
                None => return false,
            }
        }
        false
    }

    /// Whether `individual` is an instance of `expr` in the asserted graph,
    /// following property edges through existential restrictions.
    fn satisfies(&self, individual: &NamedIndividual, expr: &ClassExpression) -> bool {
        match expr {
            ClassExpression::Class(class) => self
                .types
                .get(individual)
                .is_some_and(|asserted| asserted.iter().any(|t| self.is_subclass_of(t, class))),
            ClassExpression::ObjectSomeValuesFrom { property, filler } => self
                .edges
                .get(&(individual.clone(), property.clone()))
                .is_some_and(|successors| successors.iter().any(|s| self.satisfies(s, filler))),
        }
    }
}

#[test]
fn target_expression_separates_positive_and_negative_examples() {
    let scenario = generate(0xA11CE);
    let graph = AssertedGraph::of(&scenario);
    let target = scenario.target_expression();
    let negative = scenario.negative_expression();
    assert_eq!(target.nesting_depth(), 5);

    for example in scenario.positive_examples() {
        assert!(
            graph.satisfies(example, target),
            "positive example {example} must satisfy the target"
        );
        assert!(
            !graph.satisfies(example, negative),
            "positive example {example} must miss the negative expression"
        );
    }
    for example in scenario.negative_examples() {
        assert!(
            graph.satisfies(example, negative),
            "negative example {example} must satisfy the negative expression"
        );
        assert!(
            !graph.satisfies(example, target),
            "negative example {example} must not satisfy the target"
        );
    }
}

#[test]
fn chain_properties_carry_only_constructed_walks() {
    let scenario = generate(7);
    let chain: Vec<ObjectProperty> = scenario
        .target_expression()
        .property_chain()
        .into_iter()
        .cloned()
        .collect();
    let distinct: FxHashSet<&ObjectProperty> = chain.iter().collect();
    assert_eq!(distinct.len(), chain.len(), "chain properties are distinct");

    let num_examples = scenario.positive_examples().len() + scenario.negative_examples().len();
    let examples: FxHashSet<&NamedIndividual> = scenario
        .positive_examples()
        .iter()
        .chain(scenario.negative_examples())
        .collect();

    let mut per_property: FxHashMap<&ObjectProperty, usize> = FxHashMap::default();
    let mut first_hop_subjects: FxHashSet<&NamedIndividual> = FxHashSet::default();
    let mut objects: FxHashSet<&NamedIndividual> = FxHashSet::default();
    let mut edge_count = 0usize;

    for axiom in scenario.ontology().iter() {
        let Axiom::ObjectPropertyAssertion {
            subject,
            property,
            object,
        } = axiom
        else {
            continue;
        };
        if !distinct.contains(property) {
            continue;
        }
        *per_property.entry(property).or_default() += 1;
        if property == &chain[0] {
            first_hop_subjects.insert(subject);
        }
        objects.insert(object);
        edge_count += 1;
        assert!(
            !examples.contains(object),
            "chain edges never point back at example individuals"
        );
    }

    // One edge per example per chain slot: augmentation never draws chain
    // properties, so nothing else contributes.
    for property in &chain {
        assert_eq!(per_property.get(property), Some(&num_examples));
    }
    assert_eq!(first_hop_subjects, examples);
    assert_eq!(
        objects.len(),
        edge_count,
        "every hop individual is consumed by exactly one chain edge"
    );
}

#[test]
fn class_hierarchy_is_a_rooted_tree() {
    let scenario = generate(99);
    let graph = AssertedGraph::of(&scenario);
    let thing = OwlClass::thing();

    let mut classes = Vec::new();
    let mut parent_counts: FxHashMap<&OwlClass, usize> = FxHashMap::default();
    for axiom in scenario.ontology().iter() {
        match axiom {
            Axiom::Declaration(Entity::Class(class)) => classes.push(class.clone()),
            Axiom::SubClassOf { sub, .. } => *parent_counts.entry(sub).or_default() += 1,
            _ => {}
        }
    }
    assert_eq!(classes.len(), 50);

    for class in &classes {
        assert_eq!(
            parent_counts.get(class),
            Some(&1),
            "class {class} has exactly one parent"
        );
        assert!(
            graph.is_subclass_of(class, &thing),
            "class {class} reaches owl:Thing"
        );
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let first = generate(42);
    let second = generate(42);

    assert_eq!(first.namespace(), second.namespace());
    assert_eq!(first.target_expression(), second.target_expression());
    assert_eq!(first.negative_expression(), second.negative_expression());
    assert_eq!(first.positive_examples(), second.positive_examples());
    assert_eq!(first.negative_examples(), second.negative_examples());
    assert!(first.ontology().set_eq(second.ontology()));
}

#[test]
fn written_task_matches_scenario() {
    let scenario = generate(1234);
    let dir = tempfile::tempdir().unwrap();
    let task_dir = scenario
        .write_sml_bench(dir.path(), "separation-bench")
        .unwrap();

    let pos = fs::read_to_string(task_dir.join("owl/lp/1/pos.txt")).unwrap();
    assert_eq!(pos.lines().count(), 20);
    for line in pos.lines() {
        assert!(line.starts_with(scenario.namespace()));
        assert!(line.contains("pos_indiv"));
    }

    let neg = fs::read_to_string(task_dir.join("owl/lp/1/neg.txt")).unwrap();
    assert_eq!(neg.lines().count(), 20);
    for line in neg.lines() {
        assert!(line.contains("neg_indiv"));
    }

    let info = fs::read_to_string(task_dir.join("owl/lp/1/info.txt")).unwrap();
    assert_eq!(info, scenario.target_expression().to_string());

    let owl = fs::read_to_string(task_dir.join("owl/data/separation-bench.owl")).unwrap();
    assert!(owl.starts_with("<?xml"));
    assert!(owl.contains(scenario.namespace().trim_end_matches('#')));
}
