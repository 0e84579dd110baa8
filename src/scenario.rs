//! The finished learning scenario and its on-disk benchmark layout.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ScenarioWriteError;
use crate::owl::serialize;
use crate::owl::{ClassExpression, NamedIndividual, Ontology};

/// A complete generated learning scenario: the labeled example individuals,
/// the target expression separating them, and the background ontology both
/// are embedded in.
#[derive(Debug, Clone)]
pub struct Scenario {
    positive_examples: Vec<NamedIndividual>,
    negative_examples: Vec<NamedIndividual>,
    target_expression: ClassExpression,
    /// Walks the same property chain as the target but ends in the negative
    /// filler subtree. Informational; not part of the written benchmark.
    negative_expression: ClassExpression,
    namespace: String,
    ontology: Ontology,
}

impl Scenario {
    pub fn new(
        positive_examples: Vec<NamedIndividual>,
        negative_examples: Vec<NamedIndividual>,
        target_expression: ClassExpression,
        negative_expression: ClassExpression,
        namespace: String,
        ontology: Ontology,
    ) -> Self {
        Self {
            positive_examples,
            negative_examples,
            target_expression,
            negative_expression,
            namespace,
            ontology,
        }
    }

    pub fn positive_examples(&self) -> &[NamedIndividual] {
        &self.positive_examples
    }

    pub fn negative_examples(&self) -> &[NamedIndividual] {
        &self.negative_examples
    }

    pub fn target_expression(&self) -> &ClassExpression {
        &self.target_expression
    }

    pub fn negative_expression(&self) -> &ClassExpression {
        &self.negative_expression
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// Writes the SML-Bench learning task layout under `base/task`:
    ///
    /// ```text
    /// <task>/owl/data/<task>.owl   RDF/XML background knowledge
    /// <task>/owl/lp/1/pos.txt      positive example IRIs, one per line
    /// <task>/owl/lp/1/neg.txt      negative example IRIs, one per line
    /// <task>/owl/lp/1/info.txt     target expression
    /// ```
    ///
    /// Refuses to touch an existing task directory; returns the created one.
    pub fn write_sml_bench(&self, base: &Path, task: &str) -> Result<PathBuf, ScenarioWriteError> {
        let task_dir = base.join(task);
        if task_dir.exists() {
            return Err(ScenarioWriteError::TaskDirExists {
                path: task_dir.display().to_string(),
            });
        }

        let data_dir = task_dir.join("owl").join("data");
        let lp_dir = task_dir.join("owl").join("lp").join("1");
        for dir in [&data_dir, &lp_dir] {
            fs::create_dir_all(dir).map_err(|e| ScenarioWriteError::CreateDir {
                path: dir.display().to_string(),
                source: e,
            })?;
        }

        let owl_path = data_dir.join(format!("{task}.owl"));
        let rdf_xml = serialize::write_rdf_xml(&self.ontology, &self.namespace, Vec::new())?;
        fs::write(&owl_path, rdf_xml).map_err(|e| ScenarioWriteError::Write {
            path: owl_path.display().to_string(),
            source: e,
        })?;

        write_example_list(&lp_dir.join("pos.txt"), &self.positive_examples)?;
        write_example_list(&lp_dir.join("neg.txt"), &self.negative_examples)?;

        let info_path = lp_dir.join("info.txt");
        fs::write(&info_path, self.target_expression.to_string()).map_err(|e| {
            ScenarioWriteError::Write {
                path: info_path.display().to_string(),
                source: e,
            }
        })?;

        tracing::info!(task_dir = %task_dir.display(), "wrote learning task");
        Ok(task_dir)
    }
}

/// One plain example IRI per line, no brackets.
fn write_example_list(
    path: &Path,
    examples: &[NamedIndividual],
) -> Result<(), ScenarioWriteError> {
    let mut content = String::new();
    for example in examples {
        content.push_str(example.iri().as_str());
        content.push('\n');
    }
    fs::write(path, content).map_err(|e| ScenarioWriteError::Write {
        path: path.display().to_string(),
        source: e,
    })
}
