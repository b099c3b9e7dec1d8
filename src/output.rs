//! Export file naming, saving, and the details summary.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::CollageError;
use crate::pipeline::Collage;

/// Export filename for a collage generated at `at`.
///
/// Always `still_life_collage_<YYYYMMDD_HHMMSS>.png`.
#[must_use]
pub fn export_filename(at: NaiveDateTime) -> String {
    format!("still_life_collage_{}.png", at.format("%Y%m%d_%H%M%S"))
}

/// Resolve the output path: use explicit path or the timestamped name in `out_dir`.
#[must_use]
pub fn resolve_output_path(explicit: Option<&str>, out_dir: &Path, at: NaiveDateTime) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(p),
        None => out_dir.join(export_filename(at)),
    }
}

/// Write the PNG buffer, creating the parent directory if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_collage(png: &[u8], output_path: &Path) -> Result<(), CollageError> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, png)?;
    Ok(())
}

/// Human-readable summary of what went into a collage.
#[must_use]
pub fn render_details(collage: &Collage, generated_at: NaiveDateTime) -> String {
    let request = &collage.request;
    let style = &request.style;
    let mut out = String::from("Collage Details\n");
    let rows = [
        ("Objects included", request.objects.join()),
        ("Collage technique", style.technique.to_string()),
        ("Arrangement", style.arrangement.to_string()),
        ("Color treatment", style.colors.to_string()),
        ("Background", style.background.to_string()),
        ("Edge style", style.edges.to_string()),
        ("Shadow effect", style.shadow.to_string()),
        ("Object density", style.density.to_string()),
        ("Image size", request.size.to_string()),
        ("Decoded size", format!("{}x{}", collage.image.width(), collage.image.height())),
        ("Image URL", collage.source_url.clone()),
        ("Generated", generated_at.format("%Y-%m-%d %H:%M:%S").to_string()),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {label}: {value}");
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use image::DynamicImage;

    use super::*;
    use crate::request::{validate, CollageInput};
    use crate::style::{EdgeStyle, ImageSize, StyleSelection};

    fn instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap().and_hms_opt(9, 5, 42).unwrap()
    }

    #[test]
    fn filename_for_fixed_instant() {
        assert_eq!(export_filename(instant()), "still_life_collage_20240307_090542.png");
    }

    #[test]
    fn filename_has_fourteen_digit_timestamp() {
        let name = export_filename(instant());
        let stamp = name
            .strip_prefix("still_life_collage_")
            .and_then(|rest| rest.strip_suffix(".png"))
            .unwrap();
        let digits: String = stamp.chars().filter(char::is_ascii_digit).collect();
        assert_eq!(digits.len(), 14);
        assert_eq!(stamp.len(), 15);
        assert_eq!(&stamp[8..9], "_");
    }

    #[test]
    fn resolve_explicit() {
        let path = resolve_output_path(Some("mine.png"), Path::new("ignored"), instant());
        assert_eq!(path, PathBuf::from("mine.png"));
    }

    #[test]
    fn resolve_auto_in_out_dir() {
        let path = resolve_output_path(None, Path::new("renders"), instant());
        assert_eq!(path, PathBuf::from("renders/still_life_collage_20240307_090542.png"));
    }

    #[test]
    fn save_creates_parent_dir() {
        let dir = std::env::temp_dir().join("collage_output_save_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("c.png");

        save_collage(&[1, 2, 3], &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn details_list_every_choice() {
        let request = validate(CollageInput {
            credential: Some("sk-test".into()),
            objects: "apple, sunflowers".into(),
            style: StyleSelection { edges: EdgeStyle::TornPaper, ..StyleSelection::default() },
            size: ImageSize::Portrait,
        })
        .unwrap();
        let collage = Collage {
            request,
            prompt: String::new(),
            source_url: String::new(),
            image: DynamicImage::new_rgb8(8, 14),
            png: Vec::new(),
        };

        let details = render_details(&collage, instant());
        assert!(details.contains("Objects included: apple, sunflowers"));
        assert!(details.contains("Edge style: Torn paper edges"));
        assert!(details.contains("Collage technique: Paper cut-out collage style"));
        assert!(details.contains("Image size: 1024x1792"));
        assert!(details.contains("Decoded size: 8x14"));
        assert!(details.contains("Generated: 2024-03-07 09:05:42"));
        assert!(!details.contains("sk-test"));
    }
}
