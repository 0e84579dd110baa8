//! ontogen CLI: synthetic class-expression learning benchmark generator.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

use ontogen::generator::{GeneratorConfig, ScenarioGenerator};
use ontogen::oracle::{AssertedTypeOracle, EntailmentOracle, OwlLinkOracle};

#[derive(Parser)]
#[command(
    name = "ontogen",
    version,
    about = "Synthetic class-expression learning benchmark generator"
)]
struct Cli {
    /// TOML configuration file; defaults apply for missing keys.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a learning scenario and write it as an SML-Bench task.
    Generate {
        /// Task name; names the task directory and the ontology file.
        task: String,

        /// Directory the task directory is created under.
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// RNG seed; drawn randomly when omitted.
        #[arg(long)]
        seed: Option<u64>,

        /// OWLlink reasoner endpoint (e.g. http://localhost:8383). Instance
        /// checks fall back to the built-in asserted-type oracle when omitted.
        #[arg(long)]
        reasoner_url: Option<String>,

        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Validate the configuration and print its effective values.
    Check {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },
}

/// Command-line overrides applied on top of the configuration file.
#[derive(Args)]
struct ConfigOverrides {
    /// Number of positive examples.
    #[arg(long)]
    pos_examples: Option<usize>,

    /// Number of negative examples.
    #[arg(long)]
    neg_examples: Option<usize>,

    /// Number of classes in the hierarchy.
    #[arg(long)]
    classes: Option<usize>,

    /// Number of object properties.
    #[arg(long)]
    object_properties: Option<usize>,

    /// Number of data properties.
    #[arg(long)]
    data_properties: Option<usize>,

    /// Overall number of individuals, examples included.
    #[arg(long)]
    individuals: Option<usize>,

    /// Nesting depth of the target expression.
    #[arg(long)]
    depth: Option<usize>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(n) = self.pos_examples {
            config.num_pos_examples = n;
        }
        if let Some(n) = self.neg_examples {
            config.num_neg_examples = n;
        }
        if let Some(n) = self.classes {
            config.num_classes = n;
        }
        if let Some(n) = self.object_properties {
            config.num_object_properties = n;
        }
        if let Some(n) = self.data_properties {
            config.num_data_properties = n;
        }
        if let Some(n) = self.individuals {
            config.num_overall_individuals = n;
        }
        if let Some(n) = self.depth {
            config.existential_nesting_depth = n;
        }
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            task,
            out,
            seed,
            reasoner_url,
            overrides,
        } => {
            let config = load_config(cli.config.as_deref(), &overrides)?;
            let seed = seed.unwrap_or_else(rand::random);
            tracing::info!(seed, "seeding generator");

            match reasoner_url {
                Some(url) => run_generate(config, OwlLinkOracle::new(url), seed, &out, &task)?,
                None => {
                    run_generate(config, AssertedTypeOracle::default(), seed, &out, &task)?;
                }
            }
        }

        Commands::Check { overrides } => {
            let config = load_config(cli.config.as_deref(), &overrides)?;
            config.validate()?;

            print!("{}", toml::to_string_pretty(&config).into_diagnostic()?);
            println!();
            println!("# derived");
            println!(
                "# non-example individuals: {}",
                config.non_example_individuals()
            );
            println!(
                "# minimum required pool:   {}",
                config.required_individuals()
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    overrides.apply(&mut config);
    Ok(config)
}

fn run_generate<O: EntailmentOracle>(
    config: GeneratorConfig,
    oracle: O,
    seed: u64,
    out: &Path,
    task: &str,
) -> Result<()> {
    let mut generator = ScenarioGenerator::new(config, oracle)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let scenario = generator.generate(&mut rng)?;
    let task_dir = scenario.write_sml_bench(out, task)?;

    println!("Wrote learning task to {}", task_dir.display());
    println!("  target:    {}", scenario.target_expression());
    println!("  negative:  {}", scenario.negative_expression());
    println!(
        "  examples:  {} positive / {} negative",
        scenario.positive_examples().len(),
        scenario.negative_examples().len()
    );
    println!("  axioms:    {}", scenario.ontology().len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clap_debug() {
        use clap::CommandFactory;

        Cli::command().debug_assert()
    }

    #[test]
    fn generate_defaults_apply() {
        let cli = Cli::try_parse_from(["ontogen", "generate", "bench1"]).unwrap();
        let Commands::Generate {
            task,
            out,
            seed,
            reasoner_url,
            ..
        } = cli.command
        else {
            panic!("expected the generate subcommand");
        };
        assert_eq!(task, "bench1");
        assert_eq!(out, PathBuf::from("."));
        assert!(seed.is_none());
        assert!(reasoner_url.is_none());
    }

    #[test]
    fn flag_overrides_replace_config_fields() {
        let cli = Cli::try_parse_from([
            "ontogen",
            "check",
            "--pos-examples",
            "7",
            "--classes",
            "40",
        ])
        .unwrap();
        let Commands::Check { overrides } = cli.command else {
            panic!("expected the check subcommand");
        };

        let mut config = GeneratorConfig::default();
        overrides.apply(&mut config);
        assert_eq!(config.num_pos_examples, 7);
        assert_eq!(config.num_classes, 40);
        assert_eq!(config.num_neg_examples, 50);
    }
}
