//! Closed option sets for the collage style and output size.
//!
//! Every option has a kebab-case machine name (used by the CLI and the config
//! file) and a human label, which is what ends up in the prompt.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Declares a style option enum whose first listed variant is the default.
macro_rules! style_option {
    (
        $(#[$meta:meta])*
        $name:ident {
            $first:ident => $first_label:literal,
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            #[doc = $first_label]
            $first,
            $(
                #[doc = $label]
                $variant,
            )+
        }

        impl $name {
            /// Human-readable label embedded in the prompt.
            #[must_use]
            pub fn label(self) -> &'static str {
                match self {
                    Self::$first => $first_label,
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$first
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

style_option! {
    /// Collage technique.
    Technique {
        PaperCutOut => "Paper cut-out collage style",
        MagazineCutOut => "Magazine cut-out collage",
        MixedMedia => "Mixed media collage",
        DigitalPhoto => "Digital photo collage",
        VintageScrapbook => "Vintage scrapbook collage",
        ModernGeometric => "Modern geometric collage",
        LayeredPaper => "Layered paper collage",
    }
}

style_option! {
    /// How the objects are arranged.
    Arrangement {
        OverlappingScattered => "Overlapping scattered arrangement",
        OrganizedGrid => "Organized grid-like layout",
        CircularRadiating => "Circular radiating pattern",
        AsymmetricalScatter => "Asymmetrical artistic scatter",
        LayeredDepth => "Layered depth arrangement",
        FlowingOrganic => "Flowing organic composition",
        BalancedSymmetrical => "Balanced symmetrical layout",
    }
}

style_option! {
    /// Color treatment of the cut-outs.
    ColorTreatment {
        Vibrant => "Vibrant full-color objects",
        RetroFiltered => "Retro color-filtered objects",
        PopArt => "High contrast pop art colors",
        Pastel => "Pastel tinted objects",
        MixedMonochrome => "Mixed color and black-white",
        NeonAccents => "Neon accent colors",
        VintageSepia => "Vintage sepia and color mix",
    }
}

style_option! {
    /// Surface the cut-outs are pasted on.
    Background {
        CleanWhite => "Clean white background",
        TexturedPaper => "Textured paper background",
        CorkBoard => "Cork board background",
        Fabric => "Fabric texture background",
        Wooden => "Wooden surface background",
        AbstractGradient => "Abstract gradient background",
        PaperScraps => "Collage paper scraps background",
    }
}

style_option! {
    /// Edge treatment of each cut-out.
    EdgeStyle {
        CleanCut => "Clean cut edges",
        TornPaper => "Torn paper edges",
        RoughScissor => "Rough scissor cuts",
        SoftFeathered => "Soft feathered edges",
        SharpGeometric => "Sharp geometric cuts",
        HandTorn => "Hand-torn organic edges",
    }
}

style_option! {
    /// Shadow and depth effect.
    ShadowEffect {
        DropShadows => "Drop shadows for depth",
        Flat => "No shadows (flat style)",
        SoftAmbient => "Soft ambient shadows",
        StrongDirectional => "Strong directional shadows",
        Layered => "Layered shadow effects",
    }
}

style_option! {
    /// How densely the objects are packed.
    Density {
        Spacious => "Spacious layout with breathing room",
        Moderate => "Moderately packed arrangement",
        Dense => "Dense collage with lots of overlap",
        Minimal => "Minimal sparse composition",
    }
}

/// The seven independent style choices for one collage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSelection {
    /// Collage technique.
    pub technique: Technique,
    /// Object arrangement.
    pub arrangement: Arrangement,
    /// Color treatment.
    pub colors: ColorTreatment,
    /// Background style.
    pub background: Background,
    /// Object edges.
    pub edges: EdgeStyle,
    /// Shadow/depth effect.
    pub shadow: ShadowEffect,
    /// Object density.
    pub density: Density,
}

/// Output size accepted by the image service.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ImageSize {
    /// Square, 1024x1024.
    #[default]
    #[value(alias = "1024x1024")]
    Square,
    /// Landscape, 1792x1024.
    #[value(alias = "1792x1024")]
    Landscape,
    /// Portrait, 1024x1792.
    #[value(alias = "1024x1792")]
    Portrait,
}

impl ImageSize {
    /// Pixel dimensions in the service's `WIDTHxHEIGHT` form.
    #[must_use]
    pub fn dimensions(self) -> &'static str {
        match self {
            Self::Square => "1024x1024",
            Self::Landscape => "1792x1024",
            Self::Portrait => "1024x1792",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dimensions())
    }
}

/// Render every option set as `name  label` lines, grouped by heading.
#[must_use]
pub fn list_options() -> String {
    let mut out = String::new();
    push_group::<Technique>(&mut out, "Collage technique (--technique)", Technique::label);
    push_group::<Arrangement>(&mut out, "Object arrangement (--arrangement)", Arrangement::label);
    push_group::<ColorTreatment>(&mut out, "Color treatment (--colors)", ColorTreatment::label);
    push_group::<Background>(&mut out, "Background style (--background)", Background::label);
    push_group::<EdgeStyle>(&mut out, "Object edges (--edges)", EdgeStyle::label);
    push_group::<ShadowEffect>(&mut out, "Shadow/depth effect (--shadow)", ShadowEffect::label);
    push_group::<Density>(&mut out, "Object density (--density)", Density::label);
    push_group::<ImageSize>(&mut out, "Image size (--size)", ImageSize::dimensions);
    out
}

fn push_group<T: ValueEnum + Copy>(out: &mut String, heading: &str, label: fn(T) -> &'static str) {
    out.push_str(heading);
    out.push('\n');
    for variant in T::value_variants() {
        if let Some(value) = variant.to_possible_value() {
            out.push_str(&format!("  {:<24}{}\n", value.get_name(), label(*variant)));
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_first_listed_options() {
        let style = StyleSelection::default();
        assert_eq!(style.technique.label(), "Paper cut-out collage style");
        assert_eq!(style.arrangement.label(), "Overlapping scattered arrangement");
        assert_eq!(style.colors.label(), "Vibrant full-color objects");
        assert_eq!(style.background.label(), "Clean white background");
        assert_eq!(style.edges.label(), "Clean cut edges");
        assert_eq!(style.shadow.label(), "Drop shadows for depth");
        assert_eq!(style.density.label(), "Spacious layout with breathing room");
        assert_eq!(ImageSize::default().dimensions(), "1024x1024");
    }

    #[test]
    fn option_set_sizes() {
        assert_eq!(Technique::value_variants().len(), 7);
        assert_eq!(Arrangement::value_variants().len(), 7);
        assert_eq!(ColorTreatment::value_variants().len(), 7);
        assert_eq!(Background::value_variants().len(), 7);
        assert_eq!(EdgeStyle::value_variants().len(), 6);
        assert_eq!(ShadowEffect::value_variants().len(), 5);
        assert_eq!(Density::value_variants().len(), 4);
        assert_eq!(ImageSize::value_variants().len(), 3);
    }

    #[test]
    fn kebab_case_names() {
        assert_eq!(EdgeStyle::from_str("torn-paper", false).unwrap(), EdgeStyle::TornPaper);
        assert_eq!(ColorTreatment::from_str("pop-art", false).unwrap(), ColorTreatment::PopArt);
        assert!(Technique::from_str("watercolor", false).is_err());
    }

    #[test]
    fn size_accepts_pixel_aliases() {
        assert_eq!(ImageSize::from_str("1792x1024", false).unwrap(), ImageSize::Landscape);
        assert_eq!(ImageSize::from_str("portrait", false).unwrap(), ImageSize::Portrait);
        assert_eq!(ImageSize::Portrait.to_string(), "1024x1792");
    }

    #[test]
    fn serde_names_match_cli_names() {
        let json = serde_json::to_string(&ShadowEffect::StrongDirectional).unwrap();
        assert_eq!(json, "\"strong-directional\"");
        let size: ImageSize = serde_json::from_str("\"landscape\"").unwrap();
        assert_eq!(size, ImageSize::Landscape);
    }

    #[test]
    fn list_options_shows_names_and_labels() {
        let listing = list_options();
        assert!(listing.contains("hand-torn"));
        assert!(listing.contains("Hand-torn organic edges"));
        assert!(listing.contains("1024x1792"));
    }
}
