//! Rich diagnostic error types for the ontogen generator.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the scenario generator.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source spans) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum OntogenError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Builder(#[from] BuilderError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ontology(#[from] OntologyIoError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Scenario(#[from] ScenarioWriteError),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error(
        "individual pool too small: {overall} individuals cannot back {positive} positive and {negative} negative examples at nesting depth {depth} (need at least {required})"
    )]
    #[diagnostic(
        code(ontogen::config::pool_too_small),
        help(
            "Every example consumes one individual plus `existential_nesting_depth` \
             fresh individuals for its property chain. Raise \
             `num_overall_individuals` to at least \
             `(num_pos_examples + num_neg_examples) * (1 + existential_nesting_depth)`, \
             or lower the example counts or the nesting depth."
        )
    )]
    IndividualPoolTooSmall {
        overall: usize,
        positive: usize,
        negative: usize,
        depth: usize,
        required: usize,
    },

    #[error("not enough object properties: {available} declared but the nesting chain needs {depth}")]
    #[diagnostic(
        code(ontogen::config::too_few_properties),
        help(
            "The chain of existential restrictions uses `existential_nesting_depth` \
             distinct object properties. Raise `num_object_properties` to at \
             least that depth."
        )
    )]
    TooFewObjectProperties { available: usize, depth: usize },

    #[error("existential nesting depth must be at least 1")]
    #[diagnostic(
        code(ontogen::config::zero_depth),
        help("A target expression needs at least one property step.")
    )]
    ZeroDepth,

    #[error("cannot read config file: {path}")]
    #[diagnostic(
        code(ontogen::config::read),
        help("Check that the file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file: {path}")]
    #[diagnostic(
        code(ontogen::config::parse),
        help("The file must be TOML with the field names of `GeneratorConfig`.")
    )]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ---------------------------------------------------------------------------
// Builder errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum BuilderError {
    #[error("no class in the hierarchy has at least two direct subclasses")]
    #[diagnostic(
        code(ontogen::builder::hierarchy_insufficient),
        help(
            "The randomly drawn hierarchy is too flat. Please re-run (a new \
             random draw usually succeeds), or raise `num_classes`."
        )
    )]
    HierarchyInsufficient,

    #[error("unknown class: {iri}")]
    #[diagnostic(
        code(ontogen::builder::unknown_class),
        help("The class was never registered with this builder. Create it with `add_class` first.")
    )]
    UnknownClass { iri: String },

    #[error("domain and range of {property} are already set")]
    #[diagnostic(
        code(ontogen::builder::domain_range_already_set),
        help("Each property gets its domain and range assigned exactly once during generation.")
    )]
    DomainRangeAlreadySet { property: String },

    #[error("no {which} assigned for property {property}")]
    #[diagnostic(
        code(ontogen::builder::domain_range_not_set),
        help(
            "Assign a domain and a range to every property before walking \
             chains or augmenting individuals."
        )
    )]
    DomainRangeNotSet {
        property: String,
        which: &'static str,
    },

    #[error("no literal generator for datatype {iri}")]
    #[diagnostic(
        code(ontogen::builder::unhandled_datatype),
        help("Random literals are produced for xsd:string, xsd:int and xsd:double only.")
    )]
    UnhandledDatatype { iri: String },
}

// ---------------------------------------------------------------------------
// Generation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GenerationError {
    #[error("no suitable filler class found after {attempts} attempts")]
    #[diagnostic(
        code(ontogen::generation::filler_exhausted),
        help(
            "No class with at least two direct subclasses and enough siblings for \
             the chain was drawn within the retry limit. Raise `num_classes`, \
             lower `existential_nesting_depth`, or raise `filler_retry_limit`."
        )
    )]
    FillerSelectionExhausted { attempts: usize },

    #[error("cannot pick a random {what}: none are registered")]
    #[diagnostic(
        code(ontogen::generation::empty_signature),
        help("Generation needs a non-empty pool to draw from. Check the configured counts.")
    )]
    EmptySignature { what: &'static str },

    #[error("individual pool exhausted while building example chains")]
    #[diagnostic(
        code(ontogen::generation::pool_exhausted),
        help(
            "More chain individuals were consumed than `num_overall_individuals` \
             provides. This should be impossible after config validation; please \
             file a bug."
        )
    )]
    IndividualPoolExhausted,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Builder(#[from] BuilderError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Oracle(#[from] OracleError),
}

// ---------------------------------------------------------------------------
// Oracle errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum OracleError {
    #[error("cannot reach reasoner: {message}")]
    #[diagnostic(
        code(ontogen::oracle::transport),
        help(
            "The entailment oracle endpoint did not answer. Check that the \
             reasoner is running and that the URL (default \
             http://localhost:8383) is correct."
        )
    )]
    Transport { message: String },

    #[error("unexpected reasoner response: {message}")]
    #[diagnostic(
        code(ontogen::oracle::protocol),
        help(
            "The reasoner answered, but not with a boolean entailment result. \
             Check that the endpoint speaks OWLlink."
        )
    )]
    Protocol { message: String },

    #[error("reasoner reported an error: {message}")]
    #[diagnostic(
        code(ontogen::oracle::service_fault),
        help("The reasoner rejected the request. The message above comes from the service itself.")
    )]
    ServiceFault { message: String },
}

// ---------------------------------------------------------------------------
// Ontology I/O errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum OntologyIoError {
    #[error("I/O error while reading or writing an ontology: {source}")]
    #[diagnostic(
        code(ontogen::owl::io),
        help("Check file permissions and free disk space.")
    )]
    Io {
        #[source]
        source: std::io::Error,
    },

    #[error("invalid RDF/XML: {message}")]
    #[diagnostic(
        code(ontogen::owl::syntax),
        help("The input is not well-formed RDF/XML. Was the file produced by this tool?")
    )]
    Syntax { message: String },

    #[error("invalid ontology namespace: {iri}")]
    #[diagnostic(
        code(ontogen::owl::invalid_namespace),
        help("The namespace must be an absolute IRI ending in `#` or `/`.")
    )]
    InvalidNamespace { iri: String },

    #[error("no declaration for {iri}")]
    #[diagnostic(
        code(ontogen::owl::undeclared),
        help(
            "Every class, property and individual must carry an rdf:type \
             declaration triple so its axioms can be reconstructed."
        )
    )]
    UndeclaredEntity { iri: String },

    #[error("cannot interpret triple: {message}")]
    #[diagnostic(
        code(ontogen::owl::malformed),
        help(
            "The graph contains a triple outside the shape this generator \
             produces (declarations, subclass links, domains, ranges and \
             assertions over named nodes)."
        )
    )]
    MalformedTriple { message: String },
}

// ---------------------------------------------------------------------------
// Scenario write errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ScenarioWriteError {
    #[error("task directory already exists: {path}")]
    #[diagnostic(
        code(ontogen::scenario::task_dir_exists),
        help(
            "Refusing to overwrite an existing learning task. Remove the \
             directory or pick a different task name."
        )
    )]
    TaskDirExists { path: String },

    #[error("failed to create directory: {path}")]
    #[diagnostic(
        code(ontogen::scenario::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    #[diagnostic(
        code(ontogen::scenario::write),
        help("Check write permissions and free disk space.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Serialize(#[from] OntologyIoError),
}

/// Convenience alias for functions returning ontogen results.
pub type OntogenResult<T> = std::result::Result<T, OntogenError>;
