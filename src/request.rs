//! Validated input for one collage: objects, credential, and the gate that checks them.

use std::fmt;

use crate::error::{CollageError, EmptyInput};
use crate::style::{ImageSize, StyleSelection};

/// Ordered, non-empty list of trimmed object names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectList(Vec<String>);

impl ObjectList {
    /// Split a comma-separated string, trimming each entry and dropping empties.
    ///
    /// Order and duplicates are preserved. Returns `None` when nothing is left.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let objects: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if objects.is_empty() {
            None
        } else {
            Some(Self(objects))
        }
    }

    /// The objects, in input order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Human-readable enumeration, joined with `", "`.
    #[must_use]
    pub fn join(&self) -> String {
        self.0.join(", ")
    }
}

/// API key for the image service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw API key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(****)")
    }
}

/// Raw input collected by the presentation shell.
#[derive(Debug, Clone, Default)]
pub struct CollageInput {
    /// API key, if the user supplied one.
    pub credential: Option<String>,
    /// Comma-separated object names, as typed.
    pub objects: String,
    /// Style choices.
    pub style: StyleSelection,
    /// Output size.
    pub size: ImageSize,
}

/// A validated request, constructed fresh for each generation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Objects to depict.
    pub objects: ObjectList,
    /// Style choices.
    pub style: StyleSelection,
    /// Output size.
    pub size: ImageSize,
    /// API key.
    pub credential: Credential,
}

/// Parse the object input alone, without requiring a credential.
///
/// # Errors
///
/// Returns [`CollageError::EmptyObjectList`] when the input is blank or
/// contains only separators.
pub fn parse_objects(raw: &str) -> Result<ObjectList, CollageError> {
    if raw.trim().is_empty() {
        return Err(CollageError::EmptyObjectList(EmptyInput::Blank));
    }
    ObjectList::parse(raw).ok_or(CollageError::EmptyObjectList(EmptyInput::NoValidObjects))
}

/// Check shell input before any network I/O.
///
/// # Errors
///
/// Returns [`CollageError::MissingCredential`] when no non-blank key is
/// present, and [`CollageError::EmptyObjectList`] when no objects survive
/// parsing.
pub fn validate(input: CollageInput) -> Result<GenerationRequest, CollageError> {
    let credential = input
        .credential
        .filter(|key| !key.trim().is_empty())
        .map(Credential::new)
        .ok_or(CollageError::MissingCredential)?;
    let objects = parse_objects(&input.objects)?;
    Ok(GenerationRequest { objects, style: input.style, size: input.size, credential })
}
