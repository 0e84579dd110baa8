//! RDF/XML round-trip over a generated ontology.

use ontogen::generator::{GeneratorConfig, ScenarioGenerator};
use ontogen::oracle::AssertedTypeOracle;
use ontogen::owl::serialize::{read_rdf_xml, write_rdf_xml};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn generated_ontology_survives_rdf_xml_round_trip() {
    let config = GeneratorConfig {
        num_pos_examples: 5,
        num_neg_examples: 5,
        num_classes: 25,
        num_object_properties: 6,
        num_data_properties: 3,
        num_overall_individuals: 60,
        existential_nesting_depth: 2,
        ..Default::default()
    };
    let mut generator = ScenarioGenerator::new(config, AssertedTypeOracle::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let scenario = generator.generate(&mut rng).unwrap();

    let bytes = write_rdf_xml(scenario.ontology(), scenario.namespace(), Vec::new()).unwrap();
    let parsed = read_rdf_xml(bytes.as_slice()).unwrap();

    assert_eq!(parsed.len(), scenario.ontology().len());
    assert!(parsed.set_eq(scenario.ontology()));
}
