//! RDF graph conversion and RDF/XML I/O.
//!
//! Every axiom this crate produces maps to exactly one triple, so writing is a
//! straight iteration and reading is a two-pass reconstruction: collect the
//! entity declarations first, then interpret the remaining triples against the
//! declared kinds.

use std::io::{Read, Write};

use oxigraph::io::{RdfFormat, RdfParseError, RdfParser, RdfSerializer};
use oxigraph::model::vocab::{rdf, rdfs};
use oxigraph::model::{Graph, NamedNode, NamedNodeRef, Subject, Term, Triple};
use rustc_hash::FxHashMap;

use crate::error::OntologyIoError;

use super::axiom::Axiom;
use super::entity::{
    DataProperty, Datatype, Entity, NamedIndividual, ObjectProperty, OwlClass,
};
use super::ontology::Ontology;
use super::vocab as owl;

/// The triple encoding of a single axiom.
pub fn axiom_triple(axiom: &Axiom) -> Triple {
    match axiom {
        Axiom::Declaration(entity) => {
            let kind = match entity {
                Entity::Class(_) => owl::CLASS,
                Entity::ObjectProperty(_) => owl::OBJECT_PROPERTY,
                Entity::DataProperty(_) => owl::DATATYPE_PROPERTY,
                Entity::Individual(_) => owl::NAMED_INDIVIDUAL,
                Entity::Datatype(_) => rdfs::DATATYPE,
            };
            Triple::new(entity.iri().clone(), rdf::TYPE, kind)
        }
        Axiom::SubClassOf { sub, sup } => {
            Triple::new(sub.iri().clone(), rdfs::SUB_CLASS_OF, sup.iri().clone())
        }
        Axiom::ObjectPropertyDomain { property, domain } => {
            Triple::new(property.iri().clone(), rdfs::DOMAIN, domain.iri().clone())
        }
        Axiom::ObjectPropertyRange { property, range } => {
            Triple::new(property.iri().clone(), rdfs::RANGE, range.iri().clone())
        }
        Axiom::DataPropertyDomain { property, domain } => {
            Triple::new(property.iri().clone(), rdfs::DOMAIN, domain.iri().clone())
        }
        Axiom::DataPropertyRange { property, range } => {
            Triple::new(property.iri().clone(), rdfs::RANGE, range.iri().clone())
        }
        Axiom::ClassAssertion { individual, class } => {
            Triple::new(individual.iri().clone(), rdf::TYPE, class.iri().clone())
        }
        Axiom::ObjectPropertyAssertion {
            subject,
            property,
            object,
        } => Triple::new(
            subject.iri().clone(),
            property.iri().clone(),
            object.iri().clone(),
        ),
        Axiom::DataPropertyAssertion {
            subject,
            property,
            value,
        } => Triple::new(subject.iri().clone(), property.iri().clone(), value.clone()),
    }
}

/// Converts the ontology into an RDF graph (axiom triples only, no header).
pub fn to_graph(ontology: &Ontology) -> Graph {
    let mut graph = Graph::new();
    for axiom in ontology {
        graph.insert(&axiom_triple(axiom));
    }
    graph
}

/// Writes the ontology as RDF/XML, returning the underlying writer.
///
/// `namespace` is the ontology namespace (ending in `#`); it becomes both the
/// `ont:` prefix and, with the trailing separator removed, the
/// `owl:Ontology` header IRI.
pub fn write_rdf_xml<W: Write>(
    ontology: &Ontology,
    namespace: &str,
    writer: W,
) -> Result<W, OntologyIoError> {
    let mut serializer = RdfSerializer::from_format(RdfFormat::RdfXml);
    for (name, iri) in [
        ("ont", namespace),
        ("owl", owl::NAMESPACE),
        ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
        ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
        ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ] {
        serializer = serializer
            .with_prefix(name, iri)
            .map_err(|_| OntologyIoError::InvalidNamespace {
                iri: iri.to_owned(),
            })?;
    }

    let ontology_iri = NamedNode::new(namespace.trim_end_matches(['#', '/']))
        .map_err(|_| OntologyIoError::InvalidNamespace {
            iri: namespace.to_owned(),
        })?;

    let mut serializer = serializer.for_writer(writer);
    serializer
        .serialize_triple(&Triple::new(ontology_iri, rdf::TYPE, owl::ONTOLOGY))
        .map_err(|source| OntologyIoError::Io { source })?;
    for axiom in ontology {
        serializer
            .serialize_triple(&axiom_triple(axiom))
            .map_err(|source| OntologyIoError::Io { source })?;
    }
    serializer
        .finish()
        .map_err(|source| OntologyIoError::Io { source })
}

/// Reads an RDF/XML document back into an ontology.
pub fn read_rdf_xml<R: Read>(reader: R) -> Result<Ontology, OntologyIoError> {
    let mut triples = Vec::new();
    for quad in RdfParser::from_format(RdfFormat::RdfXml).for_reader(reader) {
        let quad = quad.map_err(parse_error)?;
        triples.push(Triple::from(quad));
    }
    axioms_from_triples(&triples)
}

/// Reconstructs an ontology from an RDF graph.
pub fn from_graph(graph: &Graph) -> Result<Ontology, OntologyIoError> {
    let triples: Vec<Triple> = graph.iter().map(|t| t.into_owned()).collect();
    axioms_from_triples(&triples)
}

fn parse_error(error: RdfParseError) -> OntologyIoError {
    match error {
        RdfParseError::Io(source) => OntologyIoError::Io { source },
        RdfParseError::Syntax(error) => OntologyIoError::Syntax {
            message: error.to_string(),
        },
    }
}

fn axioms_from_triples(triples: &[Triple]) -> Result<Ontology, OntologyIoError> {
    let declarations = Declarations::collect(triples)?;
    let mut ontology = Ontology::new();
    for triple in triples {
        if let Some(axiom) = declarations.interpret(triple)? {
            ontology.insert(axiom);
        }
    }
    Ok(ontology)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclaredKind {
    Class,
    ObjectProperty,
    DataProperty,
    Individual,
    Datatype,
}

impl DeclaredKind {
    fn from_kind_iri(iri: NamedNodeRef<'_>) -> Option<Self> {
        if iri == owl::CLASS {
            Some(Self::Class)
        } else if iri == owl::OBJECT_PROPERTY {
            Some(Self::ObjectProperty)
        } else if iri == owl::DATATYPE_PROPERTY {
            Some(Self::DataProperty)
        } else if iri == owl::NAMED_INDIVIDUAL {
            Some(Self::Individual)
        } else if iri == rdfs::DATATYPE {
            Some(Self::Datatype)
        } else {
            None
        }
    }
}

/// Index of declared entity kinds, built in the first pass over the triples.
struct Declarations {
    kinds: FxHashMap<NamedNode, DeclaredKind>,
}

impl Declarations {
    fn collect(triples: &[Triple]) -> Result<Self, OntologyIoError> {
        let mut kinds = FxHashMap::default();
        for triple in triples {
            if triple.predicate.as_ref() != rdf::TYPE {
                continue;
            }
            let Term::NamedNode(object) = &triple.object else {
                continue;
            };
            let Some(kind) = DeclaredKind::from_kind_iri(object.as_ref()) else {
                continue;
            };
            kinds.insert(named_subject(triple)?.clone(), kind);
        }
        Ok(Self { kinds })
    }

    /// Maps one triple to its axiom. The ontology header yields `None`.
    fn interpret(&self, triple: &Triple) -> Result<Option<Axiom>, OntologyIoError> {
        let subject = named_subject(triple)?;
        let predicate = triple.predicate.as_ref();

        if predicate == rdf::TYPE {
            let object = named_object(triple)?;
            if object.as_ref() == owl::ONTOLOGY {
                return Ok(None);
            }
            if let Some(kind) = DeclaredKind::from_kind_iri(object.as_ref()) {
                return Ok(Some(Axiom::Declaration(declare(subject, kind))));
            }
            return Ok(Some(Axiom::ClassAssertion {
                individual: self.individual(subject)?,
                class: self.class(object)?,
            }));
        }

        if predicate == rdfs::SUB_CLASS_OF {
            return Ok(Some(Axiom::SubClassOf {
                sub: self.class(subject)?,
                sup: self.class(named_object(triple)?)?,
            }));
        }

        if predicate == rdfs::DOMAIN {
            let domain = self.class(named_object(triple)?)?;
            return match self.kinds.get(subject) {
                Some(DeclaredKind::ObjectProperty) => Ok(Some(Axiom::ObjectPropertyDomain {
                    property: ObjectProperty::new(subject.clone()),
                    domain,
                })),
                Some(DeclaredKind::DataProperty) => Ok(Some(Axiom::DataPropertyDomain {
                    property: DataProperty::new(subject.clone()),
                    domain,
                })),
                _ => Err(undeclared(subject)),
            };
        }

        if predicate == rdfs::RANGE {
            return match self.kinds.get(subject) {
                Some(DeclaredKind::ObjectProperty) => Ok(Some(Axiom::ObjectPropertyRange {
                    property: ObjectProperty::new(subject.clone()),
                    range: self.class(named_object(triple)?)?,
                })),
                // xsd datatypes are built in and carry no declaration.
                Some(DeclaredKind::DataProperty) => Ok(Some(Axiom::DataPropertyRange {
                    property: DataProperty::new(subject.clone()),
                    range: Datatype::new(named_object(triple)?.clone()),
                })),
                _ => Err(undeclared(subject)),
            };
        }

        match self.kinds.get(&triple.predicate) {
            Some(DeclaredKind::ObjectProperty) => Ok(Some(Axiom::ObjectPropertyAssertion {
                subject: self.individual(subject)?,
                property: ObjectProperty::new(triple.predicate.clone()),
                object: self.individual(named_object(triple)?)?,
            })),
            Some(DeclaredKind::DataProperty) => {
                let value = match &triple.object {
                    Term::Literal(value) => value.clone(),
                    other => {
                        return Err(OntologyIoError::MalformedTriple {
                            message: format!("data property value {other} is not a literal"),
                        });
                    }
                };
                Ok(Some(Axiom::DataPropertyAssertion {
                    subject: self.individual(subject)?,
                    property: DataProperty::new(triple.predicate.clone()),
                    value,
                }))
            }
            _ => Err(undeclared(&triple.predicate)),
        }
    }

    fn class(&self, node: &NamedNode) -> Result<OwlClass, OntologyIoError> {
        if node.as_ref() == owl::THING {
            return Ok(OwlClass::thing());
        }
        match self.kinds.get(node) {
            Some(DeclaredKind::Class) => Ok(OwlClass::new(node.clone())),
            _ => Err(undeclared(node)),
        }
    }

    fn individual(&self, node: &NamedNode) -> Result<NamedIndividual, OntologyIoError> {
        match self.kinds.get(node) {
            Some(DeclaredKind::Individual) => Ok(NamedIndividual::new(node.clone())),
            _ => Err(undeclared(node)),
        }
    }
}

fn declare(subject: &NamedNode, kind: DeclaredKind) -> Entity {
    match kind {
        DeclaredKind::Class => Entity::Class(OwlClass::new(subject.clone())),
        DeclaredKind::ObjectProperty => Entity::ObjectProperty(ObjectProperty::new(subject.clone())),
        DeclaredKind::DataProperty => Entity::DataProperty(DataProperty::new(subject.clone())),
        DeclaredKind::Individual => Entity::Individual(NamedIndividual::new(subject.clone())),
        DeclaredKind::Datatype => Entity::Datatype(Datatype::new(subject.clone())),
    }
}

fn named_subject(triple: &Triple) -> Result<&NamedNode, OntologyIoError> {
    match &triple.subject {
        Subject::NamedNode(node) => Ok(node),
        other => Err(OntologyIoError::MalformedTriple {
            message: format!("subject {other} is not a named node"),
        }),
    }
}

fn named_object(triple: &Triple) -> Result<&NamedNode, OntologyIoError> {
    match &triple.object {
        Term::NamedNode(node) => Ok(node),
        other => Err(OntologyIoError::MalformedTriple {
            message: format!("object {other} is not a named node"),
        }),
    }
}

fn undeclared(node: &NamedNode) -> OntologyIoError {
    OntologyIoError::UndeclaredEntity {
        iri: node.as_str().to_owned(),
    }
}
