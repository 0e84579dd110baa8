//! In-memory OWL model.
//!
//! Entities, axioms, class expressions, the deduplicating ontology container
//! and RDF/XML I/O. The model is deliberately small: it covers the fragment of
//! OWL 2 that randomly generated learning scenarios consist of, nothing more.

pub mod axiom;
pub mod entity;
pub mod expression;
pub mod ontology;
pub mod serialize;
pub mod vocab;

pub use axiom::Axiom;
pub use entity::{DataProperty, Datatype, Entity, NamedIndividual, ObjectProperty, OwlClass};
pub use expression::ClassExpression;
pub use ontology::Ontology;
