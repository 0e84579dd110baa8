//! Axioms.
//!
//! The variants cover exactly what the scenario generator emits: entity
//! declarations, the subclass tree, property domains/ranges and the three
//! assertion kinds. Axioms are immutable facts collected into an
//! [`Ontology`](super::ontology::Ontology).

use std::fmt;

use oxigraph::model::Literal;

use super::entity::{DataProperty, Datatype, Entity, NamedIndividual, ObjectProperty, OwlClass};

/// A single OWL axiom.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Axiom {
    /// Declares an entity as part of the ontology signature.
    Declaration(Entity),
    /// `sub` is a subclass of `sup`.
    SubClassOf { sub: OwlClass, sup: OwlClass },
    ObjectPropertyDomain {
        property: ObjectProperty,
        domain: OwlClass,
    },
    ObjectPropertyRange {
        property: ObjectProperty,
        range: OwlClass,
    },
    DataPropertyDomain {
        property: DataProperty,
        domain: OwlClass,
    },
    DataPropertyRange {
        property: DataProperty,
        range: Datatype,
    },
    /// `individual` is an instance of `class`.
    ClassAssertion {
        individual: NamedIndividual,
        class: OwlClass,
    },
    ObjectPropertyAssertion {
        subject: NamedIndividual,
        property: ObjectProperty,
        object: NamedIndividual,
    },
    DataPropertyAssertion {
        subject: NamedIndividual,
        property: DataProperty,
        value: Literal,
    },
}

impl Axiom {
    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Axiom::Declaration(_) => "Declaration",
            Axiom::SubClassOf { .. } => "SubClassOf",
            Axiom::ObjectPropertyDomain { .. } => "ObjectPropertyDomain",
            Axiom::ObjectPropertyRange { .. } => "ObjectPropertyRange",
            Axiom::DataPropertyDomain { .. } => "DataPropertyDomain",
            Axiom::DataPropertyRange { .. } => "DataPropertyRange",
            Axiom::ClassAssertion { .. } => "ClassAssertion",
            Axiom::ObjectPropertyAssertion { .. } => "ObjectPropertyAssertion",
            Axiom::DataPropertyAssertion { .. } => "DataPropertyAssertion",
        }
    }
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axiom::Declaration(entity) => write!(f, "Declaration({entity})"),
            Axiom::SubClassOf { sub, sup } => write!(f, "SubClassOf({sub} {sup})"),
            Axiom::ObjectPropertyDomain { property, domain } => {
                write!(f, "ObjectPropertyDomain({property} {domain})")
            }
            Axiom::ObjectPropertyRange { property, range } => {
                write!(f, "ObjectPropertyRange({property} {range})")
            }
            Axiom::DataPropertyDomain { property, domain } => {
                write!(f, "DataPropertyDomain({property} {domain})")
            }
            Axiom::DataPropertyRange { property, range } => {
                write!(f, "DataPropertyRange({property} {range})")
            }
            Axiom::ClassAssertion { individual, class } => {
                write!(f, "ClassAssertion({class} {individual})")
            }
            Axiom::ObjectPropertyAssertion {
                subject,
                property,
                object,
            } => write!(f, "ObjectPropertyAssertion({property} {subject} {object})"),
            Axiom::DataPropertyAssertion {
                subject,
                property,
                value,
            } => write!(f, "DataPropertyAssertion({property} {subject} {value})"),
        }
    }
}
