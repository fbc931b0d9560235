//! CLI argument definitions using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use forge_core::Metal;

#[derive(Parser, Debug)]
#[command(name = "forge")]
#[command(author, version, about = "Forgequote - forging weight/cost estimates and customer document review")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Settings file (default: <config dir>/forgequote/settings.json)
    #[arg(long, global = true, env = "FORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate weight and material cost of a ring, tube, or solid disc
    Weight(WeightArgs),

    /// Calculate every line of a quote file
    Quote(QuoteArgs),

    /// List tabulated material densities
    Materials,

    /// List configured review model profiles
    Profiles,

    /// Send a customer document to the review service
    Review(ReviewArgs),
}

#[derive(Args, Debug, Clone)]
pub struct WeightArgs {
    /// Outer diameter in mm (prompted for when omitted on a terminal)
    #[arg(long)]
    pub od: Option<f64>,

    /// Inner diameter in mm (0 for a solid disc)
    #[arg(long = "id", default_value_t = 0.0)]
    pub inner: f64,

    /// Height or length in mm (prompted for when omitted on a terminal)
    #[arg(long)]
    pub height: Option<f64>,

    /// Density in g/cm³
    #[arg(long, conflicts_with = "material")]
    pub density: Option<f64>,

    /// Material code or name from `forge materials`
    #[arg(long, short = 'm')]
    pub material: Option<Metal>,

    /// Number of identical parts (0 is treated as 1)
    #[arg(long, short = 'q', default_value_t = 1)]
    pub qty: u32,

    /// Material price per kg (default from settings)
    #[arg(long, short = 'p')]
    pub price: Option<f64>,

    /// Label for the part
    #[arg(long, default_value = "")]
    pub label: String,
}

#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    /// Quote JSON file
    pub file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ReviewArgs {
    /// Document to review (PDF, PNG, JPEG, XLSX, CSV)
    pub file: PathBuf,

    /// Profile name or model id (default: settings active_profile)
    #[arg(long)]
    pub profile: Option<String>,

    /// File with replacement review instructions
    #[arg(long)]
    pub instructions: Option<PathBuf>,

    /// Also write the report text to this file
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// API key for the review service
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_weight() {
        let cli = Cli::try_parse_from([
            "forge", "weight", "--od", "1000", "--id", "600", "--height", "500", "-m", "cs", "-q", "3", "-p", "2500",
        ])
        .unwrap();
        match cli.command {
            Commands::Weight(args) => {
                assert_eq!(args.od, Some(1000.0));
                assert_eq!(args.inner, 600.0);
                assert_eq!(args.material, Some(Metal::CarbonSteel));
                assert_eq!(args.qty, 3);
                assert_eq!(args.price, Some(2500.0));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_density_conflicts_with_material() {
        let result = Cli::try_parse_from(["forge", "weight", "--density", "7.9", "--material", "cs"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let result = Cli::try_parse_from(["forge", "weight", "--od", "10", "--height", "10", "--qty", "-2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_material_rejected() {
        let result = Cli::try_parse_from(["forge", "weight", "--material", "unobtainium"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_json_after_subcommand() {
        let cli = Cli::try_parse_from(["forge", "materials", "--json"]).unwrap();
        assert!(cli.global.json);
    }
}
