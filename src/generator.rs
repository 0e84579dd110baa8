//! The scenario generation pipeline.
//!
//! One [`ScenarioGenerator::generate`] call runs the whole linear pipeline:
//! mint the signature, grow the class hierarchy, mint the example and filler
//! individuals, pick the filler class, wire up the nesting chain of object
//! properties, derive the target expression, then materialize every positive
//! and negative example as a relation path through fresh individuals and
//! augment the graph with extra best-effort property assertions.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::builder::OntologyBuilder;
use crate::error::{BuilderError, ConfigError, GenerationError};
use crate::oracle::EntailmentOracle;
use crate::owl::{ClassExpression, NamedIndividual, ObjectProperty, OwlClass};
use crate::scenario::Scenario;

/// Partner lookups per property before an augmentation round gives up on it.
const PARTNER_ATTEMPTS: usize = 10;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Knobs of one generation run, loadable from TOML. Missing fields fall back
/// to the defaults of the benchmark family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Individuals labeled as positive examples.
    #[serde(default = "default_pos_examples")]
    pub num_pos_examples: usize,
    /// Individuals labeled as negative examples.
    #[serde(default = "default_neg_examples")]
    pub num_neg_examples: usize,
    /// Classes in the generated signature.
    #[serde(default = "default_classes")]
    pub num_classes: usize,
    /// Object properties in the generated signature.
    #[serde(default = "default_object_properties")]
    pub num_object_properties: usize,
    /// Data properties in the generated signature.
    #[serde(default = "default_data_properties")]
    pub num_data_properties: usize,
    /// Total individuals, examples included.
    #[serde(default = "default_overall_individuals")]
    pub num_overall_individuals: usize,
    /// Existential restrictions stacked in the target expression.
    #[serde(default = "default_nesting_depth")]
    pub existential_nesting_depth: usize,
    /// Random draws allowed when searching for a suitable filler class.
    #[serde(default = "default_filler_retry_limit")]
    pub filler_retry_limit: usize,
    /// An augmentation round continues while a uniform draw exceeds this, so
    /// higher values mean fewer extra assertions.
    #[serde(default = "default_prop_add_probability")]
    pub prop_add_probability: f64,
}

fn default_pos_examples() -> usize {
    50
}
fn default_neg_examples() -> usize {
    50
}
fn default_classes() -> usize {
    30
}
fn default_object_properties() -> usize {
    10
}
fn default_data_properties() -> usize {
    5
}
fn default_overall_individuals() -> usize {
    500
}
fn default_nesting_depth() -> usize {
    2
}
fn default_filler_retry_limit() -> usize {
    1_000
}
fn default_prop_add_probability() -> f64 {
    0.5
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_pos_examples: default_pos_examples(),
            num_neg_examples: default_neg_examples(),
            num_classes: default_classes(),
            num_object_properties: default_object_properties(),
            num_data_properties: default_data_properties(),
            num_overall_individuals: default_overall_individuals(),
            existential_nesting_depth: default_nesting_depth(),
            filler_retry_limit: default_filler_retry_limit(),
            prop_add_probability: default_prop_add_probability(),
        }
    }
}

impl GeneratorConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Individuals left over for relation paths once the examples are taken.
    pub fn non_example_individuals(&self) -> usize {
        self.num_overall_individuals
            .saturating_sub(self.num_pos_examples + self.num_neg_examples)
    }

    /// Minimum `num_overall_individuals` for this example count and depth.
    pub fn required_individuals(&self) -> usize {
        (self.num_pos_examples + self.num_neg_examples) * (1 + self.existential_nesting_depth)
    }

    /// Checks the arithmetic that generation relies on, before any work
    /// happens. Every example consumes `existential_nesting_depth` fresh
    /// chain individuals, and the chain itself needs that many distinct
    /// object properties.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.existential_nesting_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        let examples = self.num_pos_examples + self.num_neg_examples;
        if self.non_example_individuals() < self.existential_nesting_depth * examples {
            return Err(ConfigError::IndividualPoolTooSmall {
                overall: self.num_overall_individuals,
                positive: self.num_pos_examples,
                negative: self.num_neg_examples,
                depth: self.existential_nesting_depth,
                required: self.required_individuals(),
            });
        }
        if self.num_object_properties < self.existential_nesting_depth {
            return Err(ConfigError::TooFewObjectProperties {
                available: self.num_object_properties,
                depth: self.existential_nesting_depth,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Nesting chain
// ---------------------------------------------------------------------------

/// The chained object properties behind the target expression, outermost
/// first. `ranges[i]` equals `domains[i + 1]`, and the last range is the
/// filler class itself.
struct NestingChain {
    properties: Vec<ObjectProperty>,
    domains: Vec<OwlClass>,
    ranges: Vec<OwlClass>,
}

impl NestingChain {
    /// `p1 some (p2 some (... pn some terminal))`.
    fn expression(&self, terminal: &OwlClass) -> ClassExpression {
        let mut expression = ClassExpression::from(terminal.clone());
        for property in self.properties.iter().rev() {
            expression = ClassExpression::some(property.clone(), expression);
        }
        expression
    }
}

/// The labeled example individuals plus the pool backing their relation
/// paths.
struct ExamplePools {
    positive: Vec<NamedIndividual>,
    negative: Vec<NamedIndividual>,
    rest: Vec<NamedIndividual>,
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Drives the pipeline against a validated configuration and an entailment
/// oracle for partner lookups.
pub struct ScenarioGenerator<O> {
    config: GeneratorConfig,
    oracle: O,
}

impl<O: EntailmentOracle> ScenarioGenerator<O> {
    /// Validates the configuration eagerly; generation can then assume the
    /// pool and chain arithmetic holds.
    pub fn new(config: GeneratorConfig, oracle: O) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, oracle })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs the whole pipeline and returns the finished scenario.
    pub fn generate(&mut self, rng: &mut impl Rng) -> Result<Scenario, GenerationError> {
        let mut builder = OntologyBuilder::new(rng);
        tracing::info!(
            namespace = builder.namespace(),
            classes = self.config.num_classes,
            object_properties = self.config.num_object_properties,
            individuals = self.config.num_overall_individuals,
            "generating learning scenario"
        );

        for _ in 0..self.config.num_classes {
            builder.add_class();
        }
        for _ in 0..self.config.num_object_properties {
            builder.add_object_property();
        }
        for _ in 0..self.config.num_data_properties {
            builder.add_data_property();
        }
        builder.init_random_class_hierarchy(rng)?;

        let pools = self.mint_individuals(&mut builder);
        let filler = self.select_filler(&builder, rng)?;
        let (positive_filler, negative_filler) = split_filler(&builder, rng, &filler)?;
        tracing::debug!(
            filler = %filler,
            positive = %positive_filler,
            negative = %negative_filler,
            "selected filler class and its example subclasses"
        );

        let chain = self.build_nesting_chain(&mut builder, rng, &filler)?;
        let target = chain.expression(&positive_filler);
        let negative_target = chain.expression(&negative_filler);
        tracing::info!(target = %target, "derived target expression");

        self.assign_remaining_object_property_bounds(&mut builder, rng, &chain)?;
        self.assign_data_property_bounds(&mut builder, rng)?;

        let mut pool: VecDeque<NamedIndividual> = pools.rest.into_iter().collect();
        pool.make_contiguous().shuffle(rng);

        // Augmentation never draws chain properties, so every chain edge in
        // the final graph belongs to a constructed example walk.
        let on_chain: FxHashSet<ObjectProperty> = chain.properties.iter().cloned().collect();

        for example in &pools.positive {
            self.build_example(
                &mut builder,
                rng,
                &chain,
                &on_chain,
                &positive_filler,
                example,
                &mut pool,
            )?;
        }
        for example in &pools.negative {
            self.build_example(
                &mut builder,
                rng,
                &chain,
                &on_chain,
                &negative_filler,
                example,
                &mut pool,
            )?;
        }
        self.place_leftovers(&mut builder, rng, &on_chain, pool)?;

        tracing::info!(
            axioms = builder.ontology().len(),
            positive = pools.positive.len(),
            negative = pools.negative.len(),
            "scenario assembled"
        );
        Ok(Scenario::new(
            pools.positive,
            pools.negative,
            target,
            negative_target,
            builder.namespace().to_owned(),
            builder.into_ontology(),
        ))
    }

    /// Positive examples first, then negatives, then the anonymous pool; the
    /// shared counter keeps all their IRIs distinct.
    fn mint_individuals(&self, builder: &mut OntologyBuilder) -> ExamplePools {
        let positive = (0..self.config.num_pos_examples)
            .map(|_| builder.add_individual("pos_indiv"))
            .collect();
        let negative = (0..self.config.num_neg_examples)
            .map(|_| builder.add_individual("neg_indiv"))
            .collect();
        let rest = (0..self.config.non_example_individuals())
            .map(|_| builder.add_individual("indiv"))
            .collect();
        ExamplePools {
            positive,
            negative,
            rest,
        }
    }

    /// Uniform resampling until a class has at least two direct subclasses
    /// (the two filler subclasses split below it) and strictly more classes
    /// outside its subtree than the chain is deep (the chain's domains and
    /// ranges must avoid the subtree). Bounded by `filler_retry_limit`.
    fn select_filler(
        &self,
        builder: &OntologyBuilder,
        rng: &mut impl Rng,
    ) -> Result<OwlClass, GenerationError> {
        let depth = self.config.existential_nesting_depth;
        for _ in 0..self.config.filler_retry_limit {
            let Some(candidate) = builder.pick_random_class(rng) else {
                return Err(GenerationError::EmptySignature { what: "class" });
            };
            if builder.direct_subclasses(&candidate)?.len() >= 2
                && builder.complement_of_subtree(&candidate)?.len() > depth
            {
                return Ok(candidate);
            }
        }
        Err(GenerationError::FillerSelectionExhausted {
            attempts: self.config.filler_retry_limit,
        })
    }

    /// Picks `depth` distinct properties and threads domains and ranges
    /// through classes outside the filler subtree: each range becomes the
    /// next domain, and the final range is the filler class itself.
    fn build_nesting_chain(
        &self,
        builder: &mut OntologyBuilder,
        rng: &mut impl Rng,
        filler: &OwlClass,
    ) -> Result<NestingChain, GenerationError> {
        let depth = self.config.existential_nesting_depth;
        let mut registry = builder.object_properties().to_vec();
        let (chosen, _) = registry.partial_shuffle(rng, depth);
        let properties: Vec<ObjectProperty> = chosen.to_vec();
        debug_assert_eq!(properties.len(), depth, "validated config bounds the chain");

        let mut candidates: VecDeque<OwlClass> = {
            let mut outside = builder.complement_of_subtree(filler)?;
            outside.shuffle(rng);
            outside.into_iter().collect()
        };
        let pop = |candidates: &mut VecDeque<OwlClass>| {
            candidates
                .pop_front()
                .ok_or(GenerationError::Builder(BuilderError::HierarchyInsufficient))
        };

        let steps = properties.len();
        let mut domains = Vec::with_capacity(steps);
        let mut ranges = Vec::with_capacity(steps);
        let mut carried: Option<OwlClass> = None;
        for (slot, property) in properties.iter().enumerate() {
            let domain = match carried.take() {
                Some(class) => class,
                None => pop(&mut candidates)?,
            };
            let range = if slot + 1 == steps {
                filler.clone()
            } else {
                let class = pop(&mut candidates)?;
                carried = Some(class.clone());
                class
            };
            builder.set_object_property_domain_and_range(property, domain.clone(), range.clone())?;
            domains.push(domain);
            ranges.push(range);
        }
        Ok(NestingChain {
            properties,
            domains,
            ranges,
        })
    }

    /// Every object property off the chain gets unconstrained random bounds.
    /// These may fall anywhere, the filler subtree included.
    fn assign_remaining_object_property_bounds(
        &self,
        builder: &mut OntologyBuilder,
        rng: &mut impl Rng,
        chain: &NestingChain,
    ) -> Result<(), GenerationError> {
        let on_chain: FxHashSet<ObjectProperty> = chain.properties.iter().cloned().collect();
        for property in builder.object_properties().to_vec() {
            if on_chain.contains(&property) {
                continue;
            }
            let domain = builder
                .pick_random_class(rng)
                .ok_or(GenerationError::EmptySignature { what: "class" })?;
            let range = builder
                .pick_random_class(rng)
                .ok_or(GenerationError::EmptySignature { what: "class" })?;
            builder.set_object_property_domain_and_range(&property, domain, range)?;
        }
        Ok(())
    }

    /// Every data property gets a random domain class and datatype range.
    fn assign_data_property_bounds(
        &self,
        builder: &mut OntologyBuilder,
        rng: &mut impl Rng,
    ) -> Result<(), GenerationError> {
        for property in builder.data_properties().to_vec() {
            let domain = builder
                .pick_random_class(rng)
                .ok_or(GenerationError::EmptySignature { what: "class" })?;
            let datatype = builder
                .pick_random_datatype(rng)
                .ok_or(GenerationError::EmptySignature { what: "datatype" })?;
            builder.set_data_property_domain_and_range(&property, domain, datatype)?;
        }
        Ok(())
    }

    /// Types the example under a random subclass of the chain's first domain,
    /// walks the chain through fresh pool individuals into the given filler
    /// subtree, then augments the example with extra property assertions.
    #[allow(clippy::too_many_arguments)]
    fn build_example(
        &mut self,
        builder: &mut OntologyBuilder,
        rng: &mut impl Rng,
        chain: &NestingChain,
        on_chain: &FxHashSet<ObjectProperty>,
        terminal: &OwlClass,
        example: &NamedIndividual,
        pool: &mut VecDeque<NamedIndividual>,
    ) -> Result<(), GenerationError> {
        let Some(first_domain) = chain.domains.first() else {
            return Err(GenerationError::EmptySignature {
                what: "object property",
            });
        };
        let anchor = random_subclass_of(builder, rng, first_domain)?;
        builder.add_instance(example, anchor.clone());

        let last_slot = chain.properties.len().saturating_sub(1);
        let mut subject = example.clone();
        for (slot, (property, range)) in chain.properties.iter().zip(&chain.ranges).enumerate() {
            let hop = pool
                .pop_front()
                .ok_or(GenerationError::IndividualPoolExhausted)?;
            let hop_type = if slot == last_slot {
                random_subclass_of(builder, rng, terminal)?
            } else {
                random_subclass_of(builder, rng, range)?
            };
            builder.add_instance(&hop, hop_type);
            builder.add_object_property_assertion(&subject, property, &hop);
            subject = hop;
        }

        self.augment_outgoing(builder, rng, on_chain, example, &anchor)?;
        self.augment_incoming(builder, rng, on_chain, example, &anchor)?;
        Ok(())
    }

    /// Geometric rounds of extra outgoing assertions from `example`. Each
    /// round picks an off-chain property whose domain covers the example's
    /// asserted class and hunts for a partner in up to [`PARTNER_ATTEMPTS`]
    /// random range subclasses; a property with no partner is benched for the
    /// remaining rounds of this example.
    fn augment_outgoing(
        &mut self,
        builder: &mut OntologyBuilder,
        rng: &mut impl Rng,
        on_chain: &FxHashSet<ObjectProperty>,
        example: &NamedIndividual,
        anchor: &OwlClass,
    ) -> Result<(), GenerationError> {
        let candidates: Vec<ObjectProperty> = builder
            .object_properties_by_domain(anchor)?
            .into_iter()
            .filter(|property| !on_chain.contains(property))
            .collect();
        if candidates.is_empty() {
            return Ok(());
        }
        let mut gave_up: FxHashSet<ObjectProperty> = FxHashSet::default();
        while rng.gen_range(0.0..1.0) > self.config.prop_add_probability {
            let Some(property) = candidates.choose(rng).cloned() else {
                break;
            };
            if gave_up.contains(&property) {
                continue;
            }
            let mut found = false;
            for _ in 0..PARTNER_ATTEMPTS {
                let range = builder.random_range_class(&property, rng)?;
                if let Some(partner) =
                    builder.pick_individual_by_class(&mut self.oracle, rng, &range)?
                {
                    builder.add_object_property_assertion(example, &property, &partner);
                    found = true;
                    break;
                }
            }
            if !found {
                tracing::debug!(
                    property = %property,
                    individual = %example,
                    "no outgoing partner found, giving up on property for this example"
                );
                gave_up.insert(property);
            }
        }
        Ok(())
    }

    /// Mirror image of [`Self::augment_outgoing`]: extra assertions pointing
    /// at `example` from partners found in random domain subclasses.
    fn augment_incoming(
        &mut self,
        builder: &mut OntologyBuilder,
        rng: &mut impl Rng,
        on_chain: &FxHashSet<ObjectProperty>,
        example: &NamedIndividual,
        anchor: &OwlClass,
    ) -> Result<(), GenerationError> {
        let candidates: Vec<ObjectProperty> = builder
            .object_properties_by_range(anchor)?
            .into_iter()
            .filter(|property| !on_chain.contains(property))
            .collect();
        if candidates.is_empty() {
            return Ok(());
        }
        let mut gave_up: FxHashSet<ObjectProperty> = FxHashSet::default();
        while rng.gen_range(0.0..1.0) > self.config.prop_add_probability {
            let Some(property) = candidates.choose(rng).cloned() else {
                break;
            };
            if gave_up.contains(&property) {
                continue;
            }
            let mut found = false;
            for _ in 0..PARTNER_ATTEMPTS {
                let domain = builder.random_domain_class(&property, rng)?;
                if let Some(partner) =
                    builder.pick_individual_by_class(&mut self.oracle, rng, &domain)?
                {
                    builder.add_object_property_assertion(&partner, &property, example);
                    found = true;
                    break;
                }
            }
            if !found {
                tracing::debug!(
                    property = %property,
                    individual = %example,
                    "no incoming partner found, giving up on property for this example"
                );
                gave_up.insert(property);
            }
        }
        Ok(())
    }

    /// Pool individuals never consumed by a chain still get a type under
    /// some off-chain property's domain plus simplified augmentation rounds:
    /// the declared range and domain classes are used as-is and a missed
    /// lookup just forfeits that round.
    fn place_leftovers(
        &mut self,
        builder: &mut OntologyBuilder,
        rng: &mut impl Rng,
        on_chain: &FxHashSet<ObjectProperty>,
        leftovers: VecDeque<NamedIndividual>,
    ) -> Result<(), GenerationError> {
        let off_chain: Vec<ObjectProperty> = builder
            .object_properties()
            .iter()
            .filter(|property| !on_chain.contains(property))
            .cloned()
            .collect();
        if off_chain.is_empty() {
            tracing::debug!(
                count = leftovers.len(),
                "every object property sits on the nesting chain, leaving leftover individuals untyped"
            );
            return Ok(());
        }

        for individual in leftovers {
            let Some(property) = off_chain.choose(rng).cloned() else {
                break;
            };
            let anchor = builder.random_domain_class(&property, rng)?;
            builder.add_instance(&individual, anchor.clone());

            let range = builder.range_class(&property)?.clone();
            while rng.gen_range(0.0..1.0) > self.config.prop_add_probability {
                if let Some(partner) =
                    builder.pick_individual_by_class(&mut self.oracle, rng, &range)?
                {
                    builder.add_object_property_assertion(&individual, &property, &partner);
                }
            }

            let candidates: Vec<ObjectProperty> = builder
                .object_properties_by_range(&anchor)?
                .into_iter()
                .filter(|property| !on_chain.contains(property))
                .collect();
            if candidates.is_empty() {
                continue;
            }
            while rng.gen_range(0.0..1.0) > self.config.prop_add_probability {
                let Some(incoming) = candidates.choose(rng).cloned() else {
                    break;
                };
                let domain = builder.domain_class(&incoming)?.clone();
                if let Some(partner) =
                    builder.pick_individual_by_class(&mut self.oracle, rng, &domain)?
                {
                    builder.add_object_property_assertion(&partner, &incoming, &individual);
                }
            }
        }
        Ok(())
    }
}

/// The first two of the filler's shuffled direct subclasses become the
/// positive and negative terminals.
fn split_filler(
    builder: &OntologyBuilder,
    rng: &mut impl Rng,
    filler: &OwlClass,
) -> Result<(OwlClass, OwlClass), GenerationError> {
    let mut subclasses = builder.direct_subclasses(filler)?;
    subclasses.shuffle(rng);
    let mut subclasses = subclasses.into_iter();
    match (subclasses.next(), subclasses.next()) {
        (Some(positive), Some(negative)) => Ok((positive, negative)),
        _ => Err(GenerationError::Builder(BuilderError::HierarchyInsufficient)),
    }
}

fn random_subclass_of(
    builder: &OntologyBuilder,
    rng: &mut impl Rng,
    class: &OwlClass,
) -> Result<OwlClass, GenerationError> {
    let closure = builder.all_subclasses(class)?;
    Ok(closure.choose(rng).cloned().unwrap_or_else(|| class.clone()))
}
