//! Randomized OWL signature construction.
//!
//! [`OntologyBuilder`] owns everything one generation run accumulates: entity
//! registries in creation order, per-kind IRI counters, the class hierarchy,
//! property domain/range assignments, per-individual asserted types and the
//! axiom set. There is no global state; every randomized operation takes the
//! caller's `Rng`, so a seeded run reproduces bit for bit.

use oxigraph::model::vocab::xsd;
use oxigraph::model::{IriParseError, Literal, NamedNode};
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::error::{BuilderError, OracleError};
use crate::hierarchy::ClassHierarchy;
use crate::oracle::EntailmentOracle;
use crate::owl::{
    Axiom, DataProperty, Datatype, Entity, NamedIndividual, ObjectProperty, Ontology, OwlClass,
};

/// Accumulates the signature and axioms of one generated ontology.
#[derive(Debug, Clone)]
pub struct OntologyBuilder {
    /// Ontology namespace, ending in `#`. Every minted IRI extends it.
    namespace: String,
    classes: Vec<OwlClass>,
    object_properties: Vec<ObjectProperty>,
    data_properties: Vec<DataProperty>,
    individuals: Vec<NamedIndividual>,
    /// The fixed datatype pool: `xsd:int`, `xsd:double`, `xsd:string`.
    datatypes: Vec<Datatype>,
    class_counter: usize,
    object_property_counter: usize,
    data_property_counter: usize,
    /// Shared across all individual prefixes, so `pos_indiv1` and `indiv2`
    /// can never collide on the numeric part.
    individual_counter: usize,
    hierarchy: ClassHierarchy,
    object_domains: FxHashMap<ObjectProperty, OwlClass>,
    object_ranges: FxHashMap<ObjectProperty, OwlClass>,
    data_domains: FxHashMap<DataProperty, OwlClass>,
    data_ranges: FxHashMap<DataProperty, Datatype>,
    /// Asserted types per individual, in assertion order.
    instances: FxHashMap<NamedIndividual, Vec<OwlClass>>,
    ontology: Ontology,
}

impl OntologyBuilder {
    /// Creates a builder with a freshly drawn namespace
    /// `http://dl-learner.org/ontology{NNNNNN}#`.
    pub fn new(rng: &mut impl Rng) -> Self {
        let namespace = format!(
            "http://dl-learner.org/ontology{:06}#",
            rng.gen_range(1..=999_999u32)
        );
        Self::from_namespace(namespace)
    }

    /// Creates a builder over a caller-chosen namespace. The namespace must
    /// be a valid IRI; minted entities append their local name to it.
    pub fn with_namespace(namespace: impl Into<String>) -> Result<Self, IriParseError> {
        let namespace = namespace.into();
        NamedNode::new(namespace.as_str())?;
        Ok(Self::from_namespace(namespace))
    }

    fn from_namespace(namespace: String) -> Self {
        Self {
            namespace,
            classes: Vec::new(),
            object_properties: Vec::new(),
            data_properties: Vec::new(),
            individuals: Vec::new(),
            datatypes: vec![
                Datatype::new(xsd::INT.into_owned()),
                Datatype::new(xsd::DOUBLE.into_owned()),
                Datatype::new(xsd::STRING.into_owned()),
            ],
            class_counter: 0,
            object_property_counter: 0,
            data_property_counter: 0,
            individual_counter: 0,
            hierarchy: ClassHierarchy::new(),
            object_domains: FxHashMap::default(),
            object_ranges: FxHashMap::default(),
            data_domains: FxHashMap::default(),
            data_ranges: FxHashMap::default(),
            instances: FxHashMap::default(),
            ontology: Ontology::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The axiom set accumulated so far, in insertion order.
    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// Consumes the builder, keeping only the finished axiom set.
    pub fn into_ontology(self) -> Ontology {
        self.ontology
    }

    // -----------------------------------------------------------------------
    // Signature minting
    // -----------------------------------------------------------------------

    // The namespace is validated at construction and local names are ASCII
    // alphanumeric, so the concatenation is a valid IRI.
    fn mint(&self, local_name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("{}{}", self.namespace, local_name))
    }

    /// Mints `Cls{n}` and records its declaration.
    pub fn add_class(&mut self) -> OwlClass {
        self.class_counter += 1;
        let class = OwlClass::new(self.mint(&format!("Cls{}", self.class_counter)));
        self.ontology
            .insert(Axiom::Declaration(Entity::Class(class.clone())));
        self.classes.push(class.clone());
        class
    }

    /// Mints `objProp{n}` and records its declaration.
    pub fn add_object_property(&mut self) -> ObjectProperty {
        self.object_property_counter += 1;
        let property =
            ObjectProperty::new(self.mint(&format!("objProp{}", self.object_property_counter)));
        self.ontology
            .insert(Axiom::Declaration(Entity::ObjectProperty(property.clone())));
        self.object_properties.push(property.clone());
        property
    }

    /// Mints `dataProp{n}` and records its declaration.
    pub fn add_data_property(&mut self) -> DataProperty {
        self.data_property_counter += 1;
        let property =
            DataProperty::new(self.mint(&format!("dataProp{}", self.data_property_counter)));
        self.ontology
            .insert(Axiom::Declaration(Entity::DataProperty(property.clone())));
        self.data_properties.push(property.clone());
        property
    }

    /// Mints `{prefix}{n}` and records its declaration. All prefixes share
    /// one counter.
    pub fn add_individual(&mut self, prefix: &str) -> NamedIndividual {
        self.individual_counter += 1;
        let individual =
            NamedIndividual::new(self.mint(&format!("{prefix}{}", self.individual_counter)));
        self.ontology
            .insert(Axiom::Declaration(Entity::Individual(individual.clone())));
        self.individuals.push(individual.clone());
        individual
    }

    pub fn classes(&self) -> &[OwlClass] {
        &self.classes
    }

    pub fn object_properties(&self) -> &[ObjectProperty] {
        &self.object_properties
    }

    pub fn data_properties(&self) -> &[DataProperty] {
        &self.data_properties
    }

    pub fn individuals(&self) -> &[NamedIndividual] {
        &self.individuals
    }

    pub fn datatypes(&self) -> &[Datatype] {
        &self.datatypes
    }

    // -----------------------------------------------------------------------
    // Class hierarchy
    // -----------------------------------------------------------------------

    /// Attaches every registered class, in creation order, under a uniformly
    /// random parent among `owl:Thing` and the classes attached so far. Each
    /// attachment records a `SubClassOf` axiom, including links to
    /// `owl:Thing`.
    pub fn init_random_class_hierarchy(&mut self, rng: &mut impl Rng) -> Result<(), BuilderError> {
        let mut attached = vec![OwlClass::thing()];
        for class in self.classes.clone() {
            let parent = attached
                .choose(rng)
                .cloned()
                .unwrap_or_else(OwlClass::thing);
            self.hierarchy.attach(class.clone(), &parent)?;
            self.ontology.insert(Axiom::SubClassOf {
                sub: class.clone(),
                sup: parent,
            });
            attached.push(class);
        }
        Ok(())
    }

    /// The subclass closure of `class`, including `class` itself.
    pub fn all_subclasses(&self, class: &OwlClass) -> Result<Vec<OwlClass>, BuilderError> {
        self.hierarchy.all_subclasses(class)
    }

    pub fn direct_subclasses(&self, class: &OwlClass) -> Result<Vec<OwlClass>, BuilderError> {
        self.hierarchy.direct_subclasses(class)
    }

    /// Registered classes outside the subtree rooted at `class`.
    pub fn complement_of_subtree(&self, class: &OwlClass) -> Result<Vec<OwlClass>, BuilderError> {
        self.hierarchy.complement_of_subtree(class)
    }

    pub fn hierarchy(&self) -> &ClassHierarchy {
        &self.hierarchy
    }

    /// Shuffled scan for a class with at least two direct subclasses, so two
    /// distinct filler subclasses can be split off below it.
    pub fn pick_class_with_at_least_two_subclasses(
        &self,
        rng: &mut impl Rng,
    ) -> Result<OwlClass, BuilderError> {
        let mut candidates = self.classes.clone();
        candidates.shuffle(rng);
        for class in candidates {
            if self.hierarchy.direct_subclasses(&class)?.len() >= 2 {
                return Ok(class);
            }
        }
        Err(BuilderError::HierarchyInsufficient)
    }

    // -----------------------------------------------------------------------
    // Domains and ranges
    // -----------------------------------------------------------------------

    /// Assigns domain and range of an object property, exactly once.
    pub fn set_object_property_domain_and_range(
        &mut self,
        property: &ObjectProperty,
        domain: OwlClass,
        range: OwlClass,
    ) -> Result<(), BuilderError> {
        if self.object_domains.contains_key(property) || self.object_ranges.contains_key(property)
        {
            return Err(BuilderError::DomainRangeAlreadySet {
                property: property.iri().as_str().to_owned(),
            });
        }
        self.ontology.insert(Axiom::ObjectPropertyDomain {
            property: property.clone(),
            domain: domain.clone(),
        });
        self.ontology.insert(Axiom::ObjectPropertyRange {
            property: property.clone(),
            range: range.clone(),
        });
        self.object_domains.insert(property.clone(), domain);
        self.object_ranges.insert(property.clone(), range);
        Ok(())
    }

    /// Assigns domain class and range datatype of a data property, exactly
    /// once.
    pub fn set_data_property_domain_and_range(
        &mut self,
        property: &DataProperty,
        domain: OwlClass,
        range: Datatype,
    ) -> Result<(), BuilderError> {
        if self.data_domains.contains_key(property) || self.data_ranges.contains_key(property) {
            return Err(BuilderError::DomainRangeAlreadySet {
                property: property.iri().as_str().to_owned(),
            });
        }
        self.ontology.insert(Axiom::DataPropertyDomain {
            property: property.clone(),
            domain: domain.clone(),
        });
        self.ontology.insert(Axiom::DataPropertyRange {
            property: property.clone(),
            range: range.clone(),
        });
        self.data_domains.insert(property.clone(), domain);
        self.data_ranges.insert(property.clone(), range);
        Ok(())
    }

    /// The exact domain class assigned to `property`.
    pub fn domain_class(&self, property: &ObjectProperty) -> Result<&OwlClass, BuilderError> {
        self.object_domains
            .get(property)
            .ok_or_else(|| BuilderError::DomainRangeNotSet {
                property: property.iri().as_str().to_owned(),
                which: "domain",
            })
    }

    /// The exact range class assigned to `property`.
    pub fn range_class(&self, property: &ObjectProperty) -> Result<&OwlClass, BuilderError> {
        self.object_ranges
            .get(property)
            .ok_or_else(|| BuilderError::DomainRangeNotSet {
                property: property.iri().as_str().to_owned(),
                which: "range",
            })
    }

    pub fn range_datatype(&self, property: &DataProperty) -> Result<&Datatype, BuilderError> {
        self.data_ranges
            .get(property)
            .ok_or_else(|| BuilderError::DomainRangeNotSet {
                property: property.iri().as_str().to_owned(),
                which: "range",
            })
    }

    /// A uniform pick from the subclass closure of the property's domain.
    pub fn random_domain_class(
        &self,
        property: &ObjectProperty,
        rng: &mut impl Rng,
    ) -> Result<OwlClass, BuilderError> {
        let domain = self.domain_class(property)?;
        let closure = self.hierarchy.all_subclasses(domain)?;
        Ok(closure.choose(rng).cloned().unwrap_or_else(|| domain.clone()))
    }

    /// A uniform pick from the subclass closure of the property's range.
    pub fn random_range_class(
        &self,
        property: &ObjectProperty,
        rng: &mut impl Rng,
    ) -> Result<OwlClass, BuilderError> {
        let range = self.range_class(property)?;
        let closure = self.hierarchy.all_subclasses(range)?;
        Ok(closure.choose(rng).cloned().unwrap_or_else(|| range.clone()))
    }

    /// Object properties whose domain closure contains `class`, i.e. the
    /// properties an instance of `class` can be the subject of.
    pub fn object_properties_by_domain(
        &self,
        class: &OwlClass,
    ) -> Result<Vec<ObjectProperty>, BuilderError> {
        let mut matching = Vec::new();
        for property in &self.object_properties {
            let domain = self.domain_class(property)?;
            if self.hierarchy.all_subclasses(domain)?.contains(class) {
                matching.push(property.clone());
            }
        }
        Ok(matching)
    }

    /// Object properties whose range closure contains `class`, i.e. the
    /// properties an instance of `class` can be the object of.
    pub fn object_properties_by_range(
        &self,
        class: &OwlClass,
    ) -> Result<Vec<ObjectProperty>, BuilderError> {
        let mut matching = Vec::new();
        for property in &self.object_properties {
            let range = self.range_class(property)?;
            if self.hierarchy.all_subclasses(range)?.contains(class) {
                matching.push(property.clone());
            }
        }
        Ok(matching)
    }

    // -----------------------------------------------------------------------
    // Instance data
    // -----------------------------------------------------------------------

    /// Asserts `individual` as an instance of `class`. Individuals may
    /// accumulate several unrelated types.
    pub fn add_instance(&mut self, individual: &NamedIndividual, class: OwlClass) {
        let inserted = self.ontology.insert(Axiom::ClassAssertion {
            individual: individual.clone(),
            class: class.clone(),
        });
        if inserted {
            self.instances
                .entry(individual.clone())
                .or_default()
                .push(class);
        }
    }

    /// The types asserted for `individual` so far, in assertion order.
    pub fn types_of(&self, individual: &NamedIndividual) -> &[OwlClass] {
        self.instances
            .get(individual)
            .map_or(&[], Vec::as_slice)
    }

    /// Relates two individuals through an object property.
    pub fn add_object_property_assertion(
        &mut self,
        subject: &NamedIndividual,
        property: &ObjectProperty,
        object: &NamedIndividual,
    ) {
        self.ontology.insert(Axiom::ObjectPropertyAssertion {
            subject: subject.clone(),
            property: property.clone(),
            object: object.clone(),
        });
    }

    // -----------------------------------------------------------------------
    // Random picks
    // -----------------------------------------------------------------------

    pub fn pick_random_class(&self, rng: &mut impl Rng) -> Option<OwlClass> {
        self.classes.choose(rng).cloned()
    }

    pub fn pick_random_object_property(&self, rng: &mut impl Rng) -> Option<ObjectProperty> {
        self.object_properties.choose(rng).cloned()
    }

    pub fn pick_random_data_property(&self, rng: &mut impl Rng) -> Option<DataProperty> {
        self.data_properties.choose(rng).cloned()
    }

    pub fn pick_random_individual(&self, rng: &mut impl Rng) -> Option<NamedIndividual> {
        self.individuals.choose(rng).cloned()
    }

    pub fn pick_random_datatype(&self, rng: &mut impl Rng) -> Option<Datatype> {
        self.datatypes.choose(rng).cloned()
    }

    // -----------------------------------------------------------------------
    // Oracle-backed queries
    // -----------------------------------------------------------------------

    /// Whether the accumulated ontology entails that `individual` is an
    /// instance of `class`, per the given oracle.
    pub fn is_instance_of(
        &self,
        oracle: &mut impl EntailmentOracle,
        individual: &NamedIndividual,
        class: &OwlClass,
    ) -> Result<bool, OracleError> {
        oracle.is_entailed(&self.ontology, individual, class)
    }

    /// Scans all individuals in shuffled order for one the oracle affirms as
    /// an instance of `class`. `Ok(None)` when nothing matches.
    pub fn pick_individual_by_class(
        &self,
        oracle: &mut impl EntailmentOracle,
        rng: &mut impl Rng,
        class: &OwlClass,
    ) -> Result<Option<NamedIndividual>, OracleError> {
        let mut candidates = self.individuals.clone();
        candidates.shuffle(rng);
        for individual in candidates {
            if oracle.is_entailed(&self.ontology, &individual, class)? {
                return Ok(Some(individual));
            }
        }
        Ok(None)
    }

    // -----------------------------------------------------------------------
    // Random literals
    // -----------------------------------------------------------------------

    /// A random literal of the given datatype: a lowercase word for
    /// `xsd:string`, an integer in `1..=23` for `xsd:int`, a Gaussian with
    /// mean 23 and standard deviation 5 for `xsd:double`.
    pub fn random_literal(
        &self,
        datatype: &Datatype,
        rng: &mut impl Rng,
    ) -> Result<Literal, BuilderError> {
        let node = datatype.as_named_node_ref();
        if node == xsd::STRING {
            Ok(Literal::new_simple_literal(random_word(rng)))
        } else if node == xsd::INT {
            let value: i32 = rng.gen_range(1..=23);
            Ok(Literal::new_typed_literal(value.to_string(), xsd::INT))
        } else if node == xsd::DOUBLE {
            let value = gaussian(rng, 23.0, 5.0);
            Ok(Literal::new_typed_literal(value.to_string(), xsd::DOUBLE))
        } else {
            Err(BuilderError::UnhandledDatatype {
                iri: node.as_str().to_owned(),
            })
        }
    }
}

/// A lowercase ASCII word of 3 to 10 letters.
fn random_word(rng: &mut impl Rng) -> String {
    let len: usize = rng.gen_range(3..=10);
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

/// Box-Muller normal sample.
fn gaussian(rng: &mut impl Rng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
    mean + std_dev * z
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NS: &str = "http://example.org/onto#";

    fn builder() -> OntologyBuilder {
        OntologyBuilder::with_namespace(NS).unwrap()
    }

    /// Affirms membership only for exact asserted types.
    struct ExactAssertionOracle;

    impl EntailmentOracle for ExactAssertionOracle {
        fn is_entailed(
            &mut self,
            ontology: &Ontology,
            individual: &NamedIndividual,
            class: &OwlClass,
        ) -> Result<bool, OracleError> {
            Ok(ontology.contains(&Axiom::ClassAssertion {
                individual: individual.clone(),
                class: class.clone(),
            }))
        }
    }

    #[test]
    fn minted_iris_follow_the_naming_scheme() {
        let mut builder = builder();
        assert_eq!(builder.add_class().local_name(), "Cls1");
        assert_eq!(builder.add_class().local_name(), "Cls2");
        assert_eq!(builder.add_object_property().local_name(), "objProp1");
        assert_eq!(builder.add_data_property().local_name(), "dataProp1");

        // one counter across all individual prefixes
        assert_eq!(builder.add_individual("pos_indiv").local_name(), "pos_indiv1");
        assert_eq!(builder.add_individual("neg_indiv").local_name(), "neg_indiv2");
        assert_eq!(builder.add_individual("indiv").local_name(), "indiv3");

        assert_eq!(
            builder.classes()[0].iri().as_str(),
            "http://example.org/onto#Cls1"
        );
    }

    #[test]
    fn drawn_namespace_is_zero_padded() {
        let mut rng = StdRng::seed_from_u64(7);
        let builder = OntologyBuilder::new(&mut rng);
        let namespace = builder.namespace();

        let digits = namespace
            .strip_prefix("http://dl-learner.org/ontology")
            .and_then(|rest| rest.strip_suffix('#'))
            .unwrap();
        assert_eq!(digits.len(), 6);
        assert!(digits.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn minting_records_declarations() {
        let mut builder = builder();
        let class = builder.add_class();
        let individual = builder.add_individual("indiv");

        assert!(builder
            .ontology()
            .contains(&Axiom::Declaration(Entity::Class(class))));
        assert!(builder
            .ontology()
            .contains(&Axiom::Declaration(Entity::Individual(individual))));
    }

    #[test]
    fn hierarchy_init_links_every_class() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut builder = builder();
        let classes: Vec<_> = (0..10).map(|_| builder.add_class()).collect();
        builder.init_random_class_hierarchy(&mut rng).unwrap();

        let subclass_axioms = builder
            .ontology()
            .iter()
            .filter(|axiom| matches!(axiom, Axiom::SubClassOf { .. }))
            .count();
        assert_eq!(subclass_axioms, classes.len());

        for class in &classes {
            assert!(builder.hierarchy().contains(class));
        }
        // the whole forest hangs under owl:Thing
        assert_eq!(
            builder.all_subclasses(&OwlClass::thing()).unwrap().len(),
            classes.len() + 1
        );
    }

    #[test]
    fn domain_and_range_are_assigned_once() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut builder = builder();
        let a = builder.add_class();
        let b = builder.add_class();
        let property = builder.add_object_property();
        builder.init_random_class_hierarchy(&mut rng).unwrap();

        builder
            .set_object_property_domain_and_range(&property, a.clone(), b.clone())
            .unwrap();
        assert_eq!(builder.domain_class(&property).unwrap(), &a);
        assert_eq!(builder.range_class(&property).unwrap(), &b);

        let again = builder.set_object_property_domain_and_range(&property, b.clone(), a.clone());
        assert!(matches!(
            again,
            Err(BuilderError::DomainRangeAlreadySet { .. })
        ));

        let unset = builder.add_object_property();
        assert!(matches!(
            builder.domain_class(&unset),
            Err(BuilderError::DomainRangeNotSet { which: "domain", .. })
        ));
    }

    #[test]
    fn properties_are_found_through_the_domain_closure() {
        let mut builder = builder();
        let a = builder.add_class();
        let b = builder.add_class();
        let lone = builder.add_class();
        builder.hierarchy.attach(a.clone(), &OwlClass::thing()).unwrap();
        builder.hierarchy.attach(b.clone(), &a).unwrap();
        builder
            .hierarchy
            .attach(lone.clone(), &OwlClass::thing())
            .unwrap();

        let property = builder.add_object_property();
        builder
            .set_object_property_domain_and_range(&property, a.clone(), lone.clone())
            .unwrap();

        // b sits below the domain a
        assert_eq!(
            builder.object_properties_by_domain(&b).unwrap(),
            vec![property.clone()]
        );
        assert!(builder.object_properties_by_domain(&lone).unwrap().is_empty());
        assert_eq!(
            builder.object_properties_by_range(&lone).unwrap(),
            vec![property]
        );
    }

    #[test]
    fn branching_class_is_found_or_reported() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut builder = builder();
        let a = builder.add_class();
        let b = builder.add_class();
        let c = builder.add_class();
        builder.hierarchy.attach(a.clone(), &OwlClass::thing()).unwrap();
        builder.hierarchy.attach(b, &a).unwrap();
        builder.hierarchy.attach(c, &a).unwrap();

        assert_eq!(
            builder.pick_class_with_at_least_two_subclasses(&mut rng).unwrap(),
            a
        );

        let mut flat = OntologyBuilder::with_namespace(NS).unwrap();
        let x = flat.add_class();
        flat.hierarchy.attach(x, &OwlClass::thing()).unwrap();
        assert!(matches!(
            flat.pick_class_with_at_least_two_subclasses(&mut rng),
            Err(BuilderError::HierarchyInsufficient)
        ));
    }

    #[test]
    fn instances_accumulate_types() {
        let mut builder = builder();
        let a = builder.add_class();
        let b = builder.add_class();
        let individual = builder.add_individual("indiv");

        builder.add_instance(&individual, a.clone());
        builder.add_instance(&individual, b.clone());
        builder.add_instance(&individual, a.clone());

        assert_eq!(builder.types_of(&individual), &[a.clone(), b]);
        assert!(builder.ontology().contains(&Axiom::ClassAssertion {
            individual: individual.clone(),
            class: a,
        }));

        let stranger = builder.add_individual("indiv");
        assert!(builder.types_of(&stranger).is_empty());
    }

    #[test]
    fn individual_lookup_consults_the_oracle() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut builder = builder();
        let a = builder.add_class();
        let b = builder.add_class();
        let typed = builder.add_individual("indiv");
        builder.add_individual("indiv");
        builder.add_instance(&typed, a.clone());

        let mut oracle = ExactAssertionOracle;
        assert_eq!(
            builder
                .pick_individual_by_class(&mut oracle, &mut rng, &a)
                .unwrap(),
            Some(typed.clone())
        );
        assert_eq!(
            builder
                .pick_individual_by_class(&mut oracle, &mut rng, &b)
                .unwrap(),
            None
        );
        assert!(builder.is_instance_of(&mut oracle, &typed, &a).unwrap());
    }

    #[test]
    fn random_literals_match_their_datatype() {
        let mut rng = StdRng::seed_from_u64(11);
        let builder = builder();

        let int = Datatype::new(xsd::INT.into_owned());
        for _ in 0..50 {
            let literal = builder.random_literal(&int, &mut rng).unwrap();
            let value: i32 = literal.value().parse().unwrap();
            assert!((1..=23).contains(&value));
        }

        let string = Datatype::new(xsd::STRING.into_owned());
        let literal = builder.random_literal(&string, &mut rng).unwrap();
        assert!((3..=10).contains(&literal.value().len()));
        assert!(literal.value().bytes().all(|b| b.is_ascii_lowercase()));

        let double = Datatype::new(xsd::DOUBLE.into_owned());
        let literal = builder.random_literal(&double, &mut rng).unwrap();
        assert!(literal.value().parse::<f64>().is_ok());

        let boolean = Datatype::new(xsd::BOOLEAN.into_owned());
        assert!(matches!(
            builder.random_literal(&boolean, &mut rng),
            Err(BuilderError::UnhandledDatatype { .. })
        ));
    }
}
