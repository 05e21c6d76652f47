//! Artifact descriptors
//!
//! A source image named `{display_name}_{kind}_{app_id}.{ext}` describes one
//! piece of library artwork. This module parses such names and maps each
//! descriptor to the filename Steam expects in its grid folder.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use grid_fs::NormalizedPath;
use serde::{Deserialize, Serialize};

/// The closed set of artwork kinds Steam reads from the grid folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Wide banner shown at the top of a game's library page
    Hero,
    /// Transparent logo drawn over the hero
    Logo,
    /// Portrait capsule in the library grid
    Grid,
    /// Landscape capsule used by the "recent games" shelf
    Active,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [Self::Hero, Self::Logo, Self::Grid, Self::Active];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Logo => "logo",
            Self::Grid => "grid",
            Self::Active => "active",
        }
    }

    /// Destination filename stem for `app_id`, without extension.
    pub fn destination_stem(&self, app_id: u64) -> String {
        match self {
            Self::Hero => format!("{app_id}_hero"),
            Self::Logo => format!("{app_id}_logo"),
            Self::Grid => format!("{app_id}p"),
            Self::Active => format!("{app_id}"),
        }
    }

    /// Full destination filename; `ext` includes its leading dot or is empty.
    pub fn destination_file_name(&self, app_id: u64, ext: &str) -> String {
        format!("{}{}", self.destination_stem(app_id), ext)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown artifact kind '{0}' (expected hero, logo, grid or active)")]
pub struct UnknownKind(pub String);

impl FromStr for ArtifactKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hero" => Ok(Self::Hero),
            "logo" => Ok(Self::Logo),
            "grid" => Ok(Self::Grid),
            "active" => Ok(Self::Active),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Why a filename could not produce a descriptor at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFailure {
    /// The stem does not split into exactly three `_`-separated parts
    #[error("{stem} is in wrong format ({segments} segments, expected 3)")]
    WrongFormat { stem: String, segments: usize },

    /// The third segment is not a non-negative integer
    #[error("{stem} has an invalid app id '{value}'")]
    InvalidAppId { stem: String, value: String },
}

impl ParseFailure {
    /// Short reason without the filename, for report lines.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::WrongFormat { .. } => "is in wrong format",
            Self::InvalidAppId { .. } => "has an invalid app id",
        }
    }
}

/// One candidate source image.
///
/// A descriptor with an unrecognized kind is still constructed so it can be
/// reported, but [`is_valid`](Self::is_valid) is false and it never yields a
/// destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    source_path: NormalizedPath,
    display_name: String,
    kind_label: String,
    kind: Option<ArtifactKind>,
    app_id: u64,
    extension: String,
}

impl ArtifactDescriptor {
    /// Parse a source image path.
    ///
    /// The filesystem is not touched; a descriptor for a file that does not
    /// exist is perfectly constructible.
    pub fn parse(source_path: impl AsRef<Path>) -> Result<Self, ParseFailure> {
        let path = source_path.as_ref();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let parts: Vec<&str> = stem.split('_').collect();
        let [name, kind_label, app_id] = parts.as_slice() else {
            return Err(ParseFailure::WrongFormat {
                segments: parts.len(),
                stem,
            });
        };

        let kind = kind_label.parse::<ArtifactKind>().ok();
        if kind.is_none() {
            tracing::debug!(stem = %stem, kind = %kind_label, "Unknown artifact kind");
        }

        let app_id = app_id
            .parse::<u64>()
            .map_err(|_| ParseFailure::InvalidAppId {
                stem: stem.clone(),
                value: (*app_id).to_string(),
            })?;

        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        Ok(Self {
            source_path: NormalizedPath::new(path),
            display_name: (*name).to_string(),
            kind_label: (*kind_label).to_string(),
            kind,
            app_id,
            extension,
        })
    }

    pub fn source_path(&self) -> &NormalizedPath {
        &self.source_path
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The kind, if it is one of the known kinds.
    pub fn kind(&self) -> Option<ArtifactKind> {
        self.kind
    }

    /// The kind segment exactly as written in the filename.
    pub fn kind_label(&self) -> &str {
        &self.kind_label
    }

    pub fn app_id(&self) -> u64 {
        self.app_id
    }

    /// Source extension including the leading dot, case preserved; empty if
    /// the source has none.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Whether this descriptor may be synced.
    pub fn is_valid(&self) -> bool {
        self.kind.is_some()
    }

    /// Whether the source file is present on disk.
    pub fn source_exists(&self) -> bool {
        self.source_path.is_file()
    }

    /// Canonical destination stem (no extension), e.g. `1466640p`.
    pub fn destination_stem(&self) -> Option<String> {
        self.kind.map(|k| k.destination_stem(self.app_id))
    }

    /// Canonical destination filename, e.g. `1466640p.png`.
    pub fn destination_file_name(&self) -> Option<String> {
        self.kind
            .map(|k| k.destination_file_name(self.app_id, &self.extension))
    }

    /// Canonical destination path under `destination_root`.
    pub fn destination_path(&self, destination_root: &NormalizedPath) -> Option<NormalizedPath> {
        self.destination_file_name()
            .map(|name| destination_root.join(&name))
    }
}

impl fmt::Display for ArtifactDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}'s {} - {}",
            self.display_name,
            self.kind_label.to_uppercase(),
            self.app_id
        )
    }
}
