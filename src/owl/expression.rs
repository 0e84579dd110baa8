//! Class expressions.
//!
//! The generator only ever builds nested existential restrictions over atomic
//! classes, so the expression language is exactly that: an atomic class or
//! `p some filler`.

use std::fmt;

use super::entity::{ObjectProperty, OwlClass};

/// A (possibly nested) class expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassExpression {
    /// An atomic class.
    Class(OwlClass),
    /// An existential restriction `property some filler`.
    ObjectSomeValuesFrom {
        property: ObjectProperty,
        filler: Box<ClassExpression>,
    },
}

impl ClassExpression {
    /// Wraps `filler` in an existential restriction over `property`.
    pub fn some(property: ObjectProperty, filler: ClassExpression) -> Self {
        ClassExpression::ObjectSomeValuesFrom {
            property,
            filler: Box::new(filler),
        }
    }

    /// Number of stacked existential restrictions.
    pub fn nesting_depth(&self) -> usize {
        match self {
            ClassExpression::Class(_) => 0,
            ClassExpression::ObjectSomeValuesFrom { filler, .. } => 1 + filler.nesting_depth(),
        }
    }

    /// The ordered property chain of a nested restriction, outermost first.
    pub fn property_chain(&self) -> Vec<&ObjectProperty> {
        let mut chain = Vec::new();
        let mut current = self;
        while let ClassExpression::ObjectSomeValuesFrom { property, filler } = current {
            chain.push(property);
            current = filler;
        }
        chain
    }

    /// The innermost atomic class.
    pub fn innermost_class(&self) -> &OwlClass {
        match self {
            ClassExpression::Class(c) => c,
            ClassExpression::ObjectSomeValuesFrom { filler, .. } => filler.innermost_class(),
        }
    }
}

impl From<OwlClass> for ClassExpression {
    fn from(class: OwlClass) -> Self {
        ClassExpression::Class(class)
    }
}

/// Manchester-style rendering with local names, e.g.
/// `objProp1 some (objProp2 some Cls7)`. This is the text written to the
/// scenario's `info.txt`.
impl fmt::Display for ClassExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassExpression::Class(c) => write!(f, "{}", c.local_name()),
            ClassExpression::ObjectSomeValuesFrom { property, filler } => {
                match filler.as_ref() {
                    ClassExpression::Class(c) => {
                        write!(f, "{} some {}", property.local_name(), c.local_name())
                    }
                    nested => write!(f, "{} some ({nested})", property.local_name()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cls(name: &str) -> OwlClass {
        OwlClass::from_iri(format!("http://example.org/onto#{name}")).unwrap()
    }

    fn prop(name: &str) -> ObjectProperty {
        ObjectProperty::from_iri(format!("http://example.org/onto#{name}")).unwrap()
    }

    #[test]
    fn display_renders_manchester_style() {
        let expr = ClassExpression::some(
            prop("objProp1"),
            ClassExpression::some(prop("objProp2"), cls("Cls7").into()),
        );
        assert_eq!(expr.to_string(), "objProp1 some (objProp2 some Cls7)");
    }

    #[test]
    fn depth_and_chain_follow_nesting() {
        let expr = ClassExpression::some(
            prop("p1"),
            ClassExpression::some(
                prop("p2"),
                ClassExpression::some(prop("p3"), cls("Filler").into()),
            ),
        );
        assert_eq!(expr.nesting_depth(), 3);
        let chain: Vec<_> = expr
            .property_chain()
            .iter()
            .map(|p| p.local_name().to_string())
            .collect();
        assert_eq!(chain, vec!["p1", "p2", "p3"]);
        assert_eq!(expr.innermost_class().local_name(), "Filler");
    }

    #[test]
    fn atomic_expression_has_depth_zero() {
        let expr: ClassExpression = cls("Cls1").into();
        assert_eq!(expr.nesting_depth(), 0);
        assert!(expr.property_chain().is_empty());
        assert_eq!(expr.to_string(), "Cls1");
    }
}
