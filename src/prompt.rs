//! Collage prompt construction.

use crate::request::ObjectList;
use crate::style::StyleSelection;

/// Build the image prompt for the given objects and style.
///
/// Pure and deterministic: the same inputs always produce the same string.
#[must_use]
pub fn build_prompt(objects: &ObjectList, style: &StyleSelection) -> String {
    let objects = objects.join();
    format!(
        "Create a vibrant COLLAGE (not a painting) featuring these cut-out objects: {objects}. \n\
         \n\
         IMPORTANT: This should be a COLLAGE style composition where each object appears as if \
         it was cut out from different sources and arranged together, NOT a painted still life \
         scene.\n\
         \n\
         Collage specifications:\n\
         - Style: {technique}\n\
         - Arrangement: {arrangement}\n\
         - Colors: {colors}\n\
         - Background: {background}\n\
         - Edge treatment: {edges}\n\
         - Shadows: {shadow}\n\
         - Density: {density}\n\
         \n\
         Each object should look like it was individually cut out (from magazines, photos, or \
         paper) and then arranged/pasted together on the background. Objects should have \
         distinct edges and appear as separate layered elements, not blended into a cohesive \
         painted scene. Make it colorful, creative, and clearly recognizable as a collage \
         artwork where individual cut-out pieces are visible and arranged artistically. All \
         specified objects must be included as distinct collage elements.",
        technique = style.technique.label(),
        arrangement = style.arrangement.label(),
        colors = style.colors.label(),
        background = style.background.label(),
        edges = style.edges.label(),
        shadow = style.shadow.label(),
        density = style.density.label(),
    )
}
