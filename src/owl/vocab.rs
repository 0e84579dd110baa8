//! OWL 2 vocabulary constants.
//!
//! `oxigraph::model::vocab` ships `rdf`, `rdfs` and `xsd`; the OWL terms this
//! crate emits are defined here in the same style.

use oxigraph::model::NamedNodeRef;

/// The OWL namespace: `http://www.w3.org/2002/07/owl#`
pub const NAMESPACE: &str = "http://www.w3.org/2002/07/owl#";

/// owl:Class
pub const CLASS: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Class");
/// owl:Thing, the universal class and the root of every generated hierarchy.
pub const THING: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Thing");
/// owl:ObjectProperty
pub const OBJECT_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#ObjectProperty");
/// owl:DatatypeProperty
pub const DATATYPE_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#DatatypeProperty");
/// owl:NamedIndividual
pub const NAMED_INDIVIDUAL: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#NamedIndividual");
/// owl:Ontology
pub const ONTOLOGY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Ontology");
