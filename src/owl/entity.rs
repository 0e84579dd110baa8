//! OWL entity handles.
//!
//! Each entity is a thin newtype over an IRI. Handles are cheap to clone and
//! hashable, so the builder's registries and the axiom set can hold them
//! directly.

use std::fmt;

use oxigraph::model::{IriParseError, NamedNode, NamedNodeRef, Term};

use super::vocab;

macro_rules! iri_entity {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(NamedNode);

        impl $name {
            #[inline]
            pub fn new(iri: NamedNode) -> Self {
                Self(iri)
            }

            /// Builds the entity from an IRI string, validating it.
            pub fn from_iri(iri: impl Into<String>) -> Result<Self, IriParseError> {
                Ok(Self(NamedNode::new(iri)?))
            }

            #[inline]
            pub fn iri(&self) -> &NamedNode {
                &self.0
            }

            /// The fragment (or last path segment) of the IRI, e.g. `Cls7`.
            pub fn local_name(&self) -> &str {
                let iri = self.0.as_str();
                match iri.rsplit_once(['#', '/']) {
                    Some((_, local)) => local,
                    None => iri,
                }
            }

            #[inline]
            pub fn into_inner(self) -> NamedNode {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<NamedNode> for $name {
            fn from(node: NamedNode) -> Self {
                Self(node)
            }
        }

        impl From<$name> for NamedNode {
            fn from(entity: $name) -> Self {
                entity.0
            }
        }

        impl From<$name> for Term {
            fn from(entity: $name) -> Self {
                entity.0.into()
            }
        }
    };
}

iri_entity!(
    /// An OWL class. `OwlClass::thing()` is the universal class that roots
    /// every generated hierarchy.
    OwlClass
);
iri_entity!(
    /// An object property relating two individuals.
    ObjectProperty
);
iri_entity!(
    /// A data property relating an individual to a literal.
    DataProperty
);
iri_entity!(
    /// A named individual.
    NamedIndividual
);
iri_entity!(
    /// A datatype IRI such as `xsd:int`.
    Datatype
);

impl OwlClass {
    /// owl:Thing.
    pub fn thing() -> Self {
        Self(vocab::THING.into_owned())
    }

    /// Whether this class is owl:Thing.
    pub fn is_thing(&self) -> bool {
        self.0.as_ref() == vocab::THING
    }
}

impl Datatype {
    pub fn as_named_node_ref(&self) -> NamedNodeRef<'_> {
        self.0.as_ref()
    }
}

/// The closed set of entity kinds crossing component boundaries.
///
/// Declarations and "pick by kind" operations dispatch over this enum, so a
/// new kind cannot be added without the compiler pointing at every match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entity {
    Class(OwlClass),
    ObjectProperty(ObjectProperty),
    DataProperty(DataProperty),
    Individual(NamedIndividual),
    Datatype(Datatype),
}

impl Entity {
    /// The IRI shared by every entity kind.
    pub fn iri(&self) -> &NamedNode {
        match self {
            Entity::Class(c) => c.iri(),
            Entity::ObjectProperty(p) => p.iri(),
            Entity::DataProperty(p) => p.iri(),
            Entity::Individual(i) => i.iri(),
            Entity::Datatype(d) => d.iri(),
        }
    }

    /// Human-readable kind label, used in log lines and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Class(_) => "class",
            Entity::ObjectProperty(_) => "object property",
            Entity::DataProperty(_) => "data property",
            Entity::Individual(_) => "individual",
            Entity::Datatype(_) => "datatype",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.iri())
    }
}

impl From<OwlClass> for Entity {
    fn from(c: OwlClass) -> Self {
        Entity::Class(c)
    }
}

impl From<ObjectProperty> for Entity {
    fn from(p: ObjectProperty) -> Self {
        Entity::ObjectProperty(p)
    }
}

impl From<DataProperty> for Entity {
    fn from(p: DataProperty) -> Self {
        Entity::DataProperty(p)
    }
}

impl From<NamedIndividual> for Entity {
    fn from(i: NamedIndividual) -> Self {
        Entity::Individual(i)
    }
}

impl From<Datatype> for Entity {
    fn from(d: Datatype) -> Self {
        Entity::Datatype(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_name_strips_namespace() {
        let cls = OwlClass::from_iri("http://example.org/onto#Cls7").unwrap();
        assert_eq!(cls.local_name(), "Cls7");

        let prop = ObjectProperty::from_iri("http://example.org/onto/objProp2").unwrap();
        assert_eq!(prop.local_name(), "objProp2");
    }

    #[test]
    fn thing_is_thing() {
        assert!(OwlClass::thing().is_thing());
        assert!(!OwlClass::from_iri("http://example.org/A").unwrap().is_thing());
    }

    #[test]
    fn entity_reports_kind_and_iri() {
        let entity: Entity = NamedIndividual::from_iri("http://example.org/i1")
            .unwrap()
            .into();
        assert_eq!(entity.kind(), "individual");
        assert_eq!(entity.iri().as_str(), "http://example.org/i1");
    }
}
