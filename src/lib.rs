// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # ontogen
//!
//! Generator of synthetic OWL ontologies and class-expression learning
//! problems. Each run produces a random class hierarchy with typed
//! individuals, picks a nested existential restriction
//! `p1 some (p2 some (... pn some C))` as the learning target, and labels
//! positive and negative example individuals that are guaranteed to be
//! separated by that target. The result is written in the SML-Bench learning
//! task layout.
//!
//! ## Architecture
//!
//! - **OWL model** (`owl`): entity handles, axioms, class expressions, and
//!   RDF/XML (de)serialization via `oxigraph`
//! - **Class hierarchy** (`hierarchy`): the tree rooted at owl:Thing with
//!   subtree and complement queries
//! - **Ontology builder** (`builder`): entity minting, random hierarchy
//!   growth, domain/range bookkeeping, assertions
//! - **Entailment oracles** (`oracle`): asserted-type closure, or a remote
//!   OWLlink reasoner over HTTP
//! - **Scenario generator** (`generator`): the end-to-end pipeline from
//!   config to labeled examples
//! - **Benchmark output** (`scenario`): the finished scenario and its
//!   SML-Bench directory layout
//!
//! ## Library usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ontogen::generator::{GeneratorConfig, ScenarioGenerator};
//! use ontogen::oracle::AssertedTypeOracle;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let config = GeneratorConfig::default();
//! let mut generator = ScenarioGenerator::new(config, AssertedTypeOracle::default()).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let scenario = generator.generate(&mut rng).unwrap();
//! scenario.write_sml_bench(Path::new("out"), "task1").unwrap();
//! ```

pub mod builder;
pub mod error;
pub mod generator;
pub mod hierarchy;
pub mod oracle;
pub mod owl;
pub mod scenario;
