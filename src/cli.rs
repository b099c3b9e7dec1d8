//! CLI argument parsing with clap.

use clap::Parser;

use crate::config::Config;
use crate::request::CollageInput;
use crate::style::{
    Arrangement, Background, ColorTreatment, Density, EdgeStyle, ImageSize, ShadowEffect,
    StyleSelection, Technique,
};

/// Still life collage generator: cut-out objects arranged as a DALL-E collage.
#[derive(Parser, Debug)]
#[command(name = "collage", version, about)]
pub struct Cli {
    /// Objects for the collage, comma-separated (e.g. "apple, vintage camera, sunflowers").
    #[arg(conflicts_with = "objects_file")]
    pub objects: Option<String>,

    /// Path to a file containing the comma-separated objects.
    #[arg(short = 'i', long, conflicts_with = "objects")]
    pub objects_file: Option<String>,

    /// `OpenAI` API key (overrides OPENAI_API_KEY and the config file).
    #[arg(long)]
    pub api_key: Option<String>,

    /// Collage technique.
    #[arg(short, long, value_enum)]
    pub technique: Option<Technique>,

    /// Object arrangement.
    #[arg(short, long, value_enum)]
    pub arrangement: Option<Arrangement>,

    /// Color treatment.
    #[arg(short, long, value_enum)]
    pub colors: Option<ColorTreatment>,

    /// Background style.
    #[arg(short, long, value_enum)]
    pub background: Option<Background>,

    /// Object edges.
    #[arg(short, long, value_enum)]
    pub edges: Option<EdgeStyle>,

    /// Shadow/depth effect.
    #[arg(long, value_enum)]
    pub shadow: Option<ShadowEffect>,

    /// Object density.
    #[arg(short, long, value_enum)]
    pub density: Option<Density>,

    /// Image size: square, landscape, portrait (or 1024x1024, 1792x1024, 1024x1792).
    #[arg(short, long, value_enum)]
    pub size: Option<ImageSize>,

    /// Output file path (defaults to still_life_collage_<timestamp>.png).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Directory for the auto-named output file.
    #[arg(long, default_value = ".")]
    pub out_dir: String,

    /// Print the prompt and exit without contacting the image service.
    #[arg(long)]
    pub prompt_only: bool,

    /// Print the collage details after generation.
    #[arg(long)]
    pub details: bool,

    /// List every style option and exit.
    #[arg(long)]
    pub list_options: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the raw object input from either the positional argument or the file flag.
    ///
    /// A missing input resolves to the empty string so the validation gate
    /// reports it.
    ///
    /// # Errors
    ///
    /// Returns an error if the objects file cannot be read.
    pub fn resolve_objects(&self) -> Result<String, std::io::Error> {
        if let Some(ref text) = self.objects {
            Ok(text.clone())
        } else if let Some(ref path) = self.objects_file {
            std::fs::read_to_string(path)
        } else {
            Ok(String::new())
        }
    }

    /// Style selection: CLI flag, then config default.
    #[must_use]
    pub fn style(&self, config: &Config) -> StyleSelection {
        let defaults = &config.defaults.style;
        StyleSelection {
            technique: self.technique.unwrap_or(defaults.technique),
            arrangement: self.arrangement.unwrap_or(defaults.arrangement),
            colors: self.colors.unwrap_or(defaults.colors),
            background: self.background.unwrap_or(defaults.background),
            edges: self.edges.unwrap_or(defaults.edges),
            shadow: self.shadow.unwrap_or(defaults.shadow),
            density: self.density.unwrap_or(defaults.density),
        }
    }

    /// Build the pipeline input.
    ///
    /// The credential comes from `--api-key`, then `OPENAI_API_KEY`, then the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the objects file cannot be read.
    pub fn collage_input(&self, config: &Config) -> Result<CollageInput, std::io::Error> {
        Ok(CollageInput {
            credential: self.api_key.clone().or_else(|| config.openai_key()),
            objects: self.resolve_objects()?,
            style: self.style(config),
            size: self.size.unwrap_or(config.defaults.size),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultsConfig;

    #[test]
    fn positional_objects() {
        let cli = Cli::parse_from(["collage", "apple, vintage camera"]);
        assert_eq!(cli.objects.as_deref(), Some("apple, vintage camera"));
        assert!(cli.objects_file.is_none());
        assert_eq!(cli.resolve_objects().unwrap(), "apple, vintage camera");
    }

    #[test]
    fn objects_file_flag() {
        let dir = std::env::temp_dir().join("collage_cli_objects_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("objects.txt");
        std::fs::write(&path, "coffee cup,\nold books").unwrap();

        let cli = Cli::parse_from(["collage", "-i", path.to_str().unwrap()]);
        assert!(cli.objects.is_none());
        assert_eq!(cli.resolve_objects().unwrap(), "coffee cup,\nold books");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_objects_resolve_empty() {
        let cli = Cli::parse_from(["collage"]);
        assert_eq!(cli.resolve_objects().unwrap(), "");
    }

    #[test]
    fn default_values() {
        let cli = Cli::parse_from(["collage", "apple"]);
        assert!(cli.technique.is_none());
        assert!(cli.size.is_none());
        assert!(cli.output.is_none());
        assert_eq!(cli.out_dir, ".");
        assert!(!cli.prompt_only);
        assert!(!cli.details);
        assert!(!cli.verbose);
        assert_eq!(cli.style(&Config::default()), StyleSelection::default());
    }

    #[test]
    fn all_style_options() {
        let cli = Cli::parse_from([
            "collage",
            "-t",
            "mixed-media",
            "-a",
            "organized-grid",
            "-c",
            "pastel",
            "-b",
            "wooden",
            "-e",
            "rough-scissor",
            "--shadow",
            "soft-ambient",
            "-d",
            "minimal",
            "-s",
            "1024x1792",
            "-o",
            "out.png",
            "-v",
            "apple",
        ]);
        let style = cli.style(&Config::default());
        assert_eq!(style.technique, Technique::MixedMedia);
        assert_eq!(style.arrangement, Arrangement::OrganizedGrid);
        assert_eq!(style.colors, ColorTreatment::Pastel);
        assert_eq!(style.background, Background::Wooden);
        assert_eq!(style.edges, EdgeStyle::RoughScissor);
        assert_eq!(style.shadow, ShadowEffect::SoftAmbient);
        assert_eq!(style.density, Density::Minimal);
        assert_eq!(cli.size, Some(ImageSize::Portrait));
        assert_eq!(cli.output.as_deref(), Some("out.png"));
        assert!(cli.verbose);
    }

    #[test]
    fn flags_override_config_defaults() {
        let config = Config {
            defaults: DefaultsConfig {
                style: StyleSelection {
                    technique: Technique::LayeredPaper,
                    density: Density::Dense,
                    ..StyleSelection::default()
                },
                size: ImageSize::Landscape,
            },
            ..Config::default()
        };
        let cli = Cli::parse_from(["collage", "-d", "moderate", "apple"]);
        let input = cli.collage_input(&config).unwrap();
        assert_eq!(input.style.technique, Technique::LayeredPaper);
        assert_eq!(input.style.density, Density::Moderate);
        assert_eq!(input.size, ImageSize::Landscape);
    }

    #[test]
    fn api_key_flag_wins() {
        let cli = Cli::parse_from(["collage", "--api-key", "sk-flag", "apple"]);
        let input = cli.collage_input(&Config::default()).unwrap();
        assert_eq!(input.credential.as_deref(), Some("sk-flag"));
    }

    #[test]
    fn unknown_option_rejected() {
        assert!(Cli::try_parse_from(["collage", "-t", "watercolor", "apple"]).is_err());
    }
}
