//! Entailment oracles.
//!
//! Partner lookup during augmentation keeps asking one question: does the
//! ontology entail that individual `i` is an instance of class `c`? The
//! [`EntailmentOracle`] trait answers it, either structurally over the
//! asserted axioms ([`AssertedTypeOracle`], the offline default) or by a
//! remote OWLlink reasoner ([`OwlLinkOracle`]).

use std::collections::VecDeque;
use std::time::Duration;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::OracleError;
use crate::owl::{Axiom, Entity, NamedIndividual, Ontology, OwlClass};

/// Decides class membership questions over an ontology snapshot.
pub trait EntailmentOracle {
    /// Whether `ontology` entails `ClassAssertion(class, individual)`.
    fn is_entailed(
        &mut self,
        ontology: &Ontology,
        individual: &NamedIndividual,
        class: &OwlClass,
    ) -> Result<bool, OracleError>;
}

// ---------------------------------------------------------------------------
// Local structural oracle
// ---------------------------------------------------------------------------

/// Answers from asserted types alone: an individual is an instance of a class
/// when one of its asserted types reaches the class by following `SubClassOf`
/// links upward. No domain/range inference, no remote calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssertedTypeOracle;

impl EntailmentOracle for AssertedTypeOracle {
    fn is_entailed(
        &mut self,
        ontology: &Ontology,
        individual: &NamedIndividual,
        class: &OwlClass,
    ) -> Result<bool, OracleError> {
        if class.is_thing() {
            return Ok(true);
        }

        let mut asserted: Vec<&OwlClass> = Vec::new();
        let mut parents: FxHashMap<&OwlClass, Vec<&OwlClass>> = FxHashMap::default();
        for axiom in ontology {
            match axiom {
                Axiom::ClassAssertion {
                    individual: subject,
                    class: asserted_class,
                } if subject == individual => asserted.push(asserted_class),
                Axiom::SubClassOf { sub, sup } => parents.entry(sub).or_default().push(sup),
                _ => {}
            }
        }

        // BFS upward from every asserted type
        let mut visited: FxHashSet<&OwlClass> = asserted.iter().copied().collect();
        let mut queue: VecDeque<&OwlClass> = asserted.into_iter().collect();
        while let Some(current) = queue.pop_front() {
            if current == class {
                return Ok(true);
            }
            if let Some(ups) = parents.get(current) {
                for &up in ups {
                    if visited.insert(up) {
                        queue.push_back(up);
                    }
                }
            }
        }
        Ok(false)
    }
}

// ---------------------------------------------------------------------------
// OWLlink oracle
// ---------------------------------------------------------------------------

/// Checks served between "consider restarting the reasoner" warnings.
const RECYCLE_WARN_INTERVAL: usize = 15_000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Asks a remote OWLlink reasoner. Every check is one HTTP round trip that
/// creates a fresh KB, tells it the whole ontology, asks for the entailment
/// and releases the KB again, so the service never accumulates state.
pub struct OwlLinkOracle {
    endpoint: String,
    agent: ureq::Agent,
    checks: usize,
}

impl OwlLinkOracle {
    /// The endpoint OWLlink servers conventionally listen on.
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:8383";

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
            checks: 0,
        }
    }

    pub fn localhost() -> Self {
        Self::new(Self::DEFAULT_ENDPOINT)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn roundtrip(&self, body: &str) -> Result<String, OracleError> {
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "text/xml; charset=utf-8")
            .send_string(body);
        match response {
            Ok(response) => response.into_string().map_err(|e| OracleError::Transport {
                message: e.to_string(),
            }),
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(OracleError::ServiceFault {
                    message: format!("HTTP {code}: {}", snippet(&body)),
                })
            }
            Err(err) => Err(OracleError::Transport {
                message: err.to_string(),
            }),
        }
    }
}

impl EntailmentOracle for OwlLinkOracle {
    fn is_entailed(
        &mut self,
        ontology: &Ontology,
        individual: &NamedIndividual,
        class: &OwlClass,
    ) -> Result<bool, OracleError> {
        self.checks += 1;
        if self.checks % RECYCLE_WARN_INTERVAL == 0 {
            tracing::warn!(
                checks = self.checks,
                endpoint = %self.endpoint,
                "reasoner has served many entailment checks; long-running \
                 OWLlink servers may degrade, consider restarting it"
            );
        }

        let request = render_request(self.checks, ontology, individual, class);
        let response = self.roundtrip(&request)?;
        parse_entailment(&response)
    }
}

// ---------------------------------------------------------------------------
// OWLlink wire format
// ---------------------------------------------------------------------------

fn render_request(
    sequence: usize,
    ontology: &Ontology,
    individual: &NamedIndividual,
    class: &OwlClass,
) -> String {
    let kb = format!("urn:ontogen:kb:{sequence}");
    let mut out = String::with_capacity(256 + ontology.len() * 96);
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(
        "<RequestMessage xmlns=\"http://www.owllink.org/owllink#\" \
         xmlns:owl=\"http://www.w3.org/2002/07/owl#\">\n",
    );
    out.push_str(&format!("<CreateKB kb=\"{kb}\"/>\n"));
    out.push_str(&format!("<Tell kb=\"{kb}\">\n"));
    for axiom in ontology {
        render_axiom(&mut out, axiom);
    }
    out.push_str("</Tell>\n");
    out.push_str(&format!("<IsEntailed kb=\"{kb}\">\n<owl:ClassAssertion>\n"));
    out.push_str(&entity_elem("owl:Class", class.iri().as_str()));
    out.push_str(&entity_elem("owl:NamedIndividual", individual.iri().as_str()));
    out.push_str("</owl:ClassAssertion>\n</IsEntailed>\n");
    out.push_str(&format!("<ReleaseKB kb=\"{kb}\"/>\n"));
    out.push_str("</RequestMessage>\n");
    out
}

fn entity_elem(tag: &str, iri: &str) -> String {
    format!("<{tag} IRI=\"{}\"/>\n", xml_escape(iri))
}

fn render_axiom(out: &mut String, axiom: &Axiom) {
    match axiom {
        Axiom::Declaration(entity) => {
            let tag = match entity {
                Entity::Class(_) => "owl:Class",
                Entity::ObjectProperty(_) => "owl:ObjectProperty",
                Entity::DataProperty(_) => "owl:DataProperty",
                Entity::Individual(_) => "owl:NamedIndividual",
                Entity::Datatype(_) => "owl:Datatype",
            };
            out.push_str("<owl:Declaration>\n");
            out.push_str(&entity_elem(tag, entity.iri().as_str()));
            out.push_str("</owl:Declaration>\n");
        }
        Axiom::SubClassOf { sub, sup } => {
            out.push_str("<owl:SubClassOf>\n");
            out.push_str(&entity_elem("owl:Class", sub.iri().as_str()));
            out.push_str(&entity_elem("owl:Class", sup.iri().as_str()));
            out.push_str("</owl:SubClassOf>\n");
        }
        Axiom::ObjectPropertyDomain { property, domain } => {
            out.push_str("<owl:ObjectPropertyDomain>\n");
            out.push_str(&entity_elem("owl:ObjectProperty", property.iri().as_str()));
            out.push_str(&entity_elem("owl:Class", domain.iri().as_str()));
            out.push_str("</owl:ObjectPropertyDomain>\n");
        }
        Axiom::ObjectPropertyRange { property, range } => {
            out.push_str("<owl:ObjectPropertyRange>\n");
            out.push_str(&entity_elem("owl:ObjectProperty", property.iri().as_str()));
            out.push_str(&entity_elem("owl:Class", range.iri().as_str()));
            out.push_str("</owl:ObjectPropertyRange>\n");
        }
        Axiom::DataPropertyDomain { property, domain } => {
            out.push_str("<owl:DataPropertyDomain>\n");
            out.push_str(&entity_elem("owl:DataProperty", property.iri().as_str()));
            out.push_str(&entity_elem("owl:Class", domain.iri().as_str()));
            out.push_str("</owl:DataPropertyDomain>\n");
        }
        Axiom::DataPropertyRange { property, range } => {
            out.push_str("<owl:DataPropertyRange>\n");
            out.push_str(&entity_elem("owl:DataProperty", property.iri().as_str()));
            out.push_str(&entity_elem("owl:Datatype", range.iri().as_str()));
            out.push_str("</owl:DataPropertyRange>\n");
        }
        Axiom::ClassAssertion { individual, class } => {
            out.push_str("<owl:ClassAssertion>\n");
            out.push_str(&entity_elem("owl:Class", class.iri().as_str()));
            out.push_str(&entity_elem("owl:NamedIndividual", individual.iri().as_str()));
            out.push_str("</owl:ClassAssertion>\n");
        }
        Axiom::ObjectPropertyAssertion {
            subject,
            property,
            object,
        } => {
            out.push_str("<owl:ObjectPropertyAssertion>\n");
            out.push_str(&entity_elem("owl:ObjectProperty", property.iri().as_str()));
            out.push_str(&entity_elem("owl:NamedIndividual", subject.iri().as_str()));
            out.push_str(&entity_elem("owl:NamedIndividual", object.iri().as_str()));
            out.push_str("</owl:ObjectPropertyAssertion>\n");
        }
        Axiom::DataPropertyAssertion {
            subject,
            property,
            value,
        } => {
            out.push_str("<owl:DataPropertyAssertion>\n");
            out.push_str(&entity_elem("owl:DataProperty", property.iri().as_str()));
            out.push_str(&entity_elem("owl:NamedIndividual", subject.iri().as_str()));
            out.push_str(&format!(
                "<owl:Literal datatypeIRI=\"{}\">{}</owl:Literal>\n",
                xml_escape(value.datatype().as_str()),
                xml_escape(value.value()),
            ));
            out.push_str("</owl:DataPropertyAssertion>\n");
        }
    }
}

fn xml_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn parse_entailment(response: &str) -> Result<bool, OracleError> {
    if let Some(pos) = response.find("<BooleanResponse") {
        let element = match response[pos..].split_once('>') {
            Some((head, _)) => head,
            None => &response[pos..],
        };
        if element.contains("result=\"true\"") {
            return Ok(true);
        }
        if element.contains("result=\"false\"") {
            return Ok(false);
        }
    }
    if let Some(message) = extract_error(response) {
        return Err(OracleError::ServiceFault { message });
    }
    Err(OracleError::Protocol {
        message: format!("no boolean result in: {}", snippet(response)),
    })
}

/// The `error` attribute of the first `*Error` element, if any.
fn extract_error(response: &str) -> Option<String> {
    let pos = response.find("Error")?;
    let rest = &response[pos..];
    let attr = rest.find("error=\"")? + "error=\"".len();
    let rest = &rest[attr..];
    let end = rest.find('"')?;
    Some(rest[..end].to_owned())
}

fn snippet(text: &str) -> String {
    text.chars().take(200).collect()
}
