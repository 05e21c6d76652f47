//! Naming new source images
//!
//! Turns a Steam store page URL into the `{Name}_{kind}_{app_id}{ext}` source
//! filename the reconciliation engine understands, and moves a downloaded
//! image into the custom grid folder under that name.

use std::fs;
use std::path::Path;

use grid_fs::NormalizedPath;

use crate::artifact::ArtifactKind;
use crate::{Error, Result};

/// App id and optional game name extracted from a store URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreListing {
    pub app_id: u64,
    /// Name derived from the URL slug, if the URL carried one
    pub name: Option<String>,
}

/// Parse a store page URL such as
/// `https://store.steampowered.com/app/1466640/Road_96/`.
///
/// The segment after `app` must be the numeric app id; the optional segment
/// after it is the slug, turned into a title-cased name.
pub fn parse_store_url(url: &str) -> Result<StoreListing> {
    let invalid = |reason: &str| Error::InvalidStoreUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let path = url.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').collect();
    let app_idx = segments
        .iter()
        .position(|s| *s == "app")
        .ok_or_else(|| invalid("no /app/ segment"))?;

    let app_id = segments
        .get(app_idx + 1)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid("missing app id"))?
        .parse::<u64>()
        .map_err(|_| invalid("app id is not a number"))?;

    let name = segments
        .get(app_idx + 2)
        .map(|slug| title_case(&slug.replace('_', " ")))
        .filter(|name| !name.is_empty());

    Ok(StoreListing { app_id, name })
}

/// Compose the source filename for an image of `kind`.
///
/// `ext` is the extension including its dot (or empty). When the URL has no
/// slug, `fallback_name` is used; underscores in it become spaces so the
/// result always parses back into three segments.
pub fn source_file_name(
    store_url: &str,
    kind: ArtifactKind,
    ext: &str,
    fallback_name: Option<&str>,
) -> Result<String> {
    let listing = parse_store_url(store_url)?;
    let name = match (listing.name, fallback_name) {
        (Some(name), _) => name,
        (None, Some(fallback)) if !fallback.trim().is_empty() => {
            fallback.trim().replace('_', " ")
        }
        _ => {
            return Err(Error::InvalidStoreUrl {
                url: store_url.to_string(),
                reason: "URL has no game name and none was given".into(),
            });
        }
    };
    Ok(format!("{}_{}_{}{}", name, kind, listing.app_id, ext))
}

/// Move `file` into `source_dir` as `file_name`.
///
/// Falls back to copy-then-remove when a rename is not possible (the image
/// often sits on another drive). Refuses to replace an existing image unless
/// `force` is set.
pub fn import_artifact(
    file: &Path,
    source_dir: &NormalizedPath,
    file_name: &str,
    force: bool,
) -> Result<NormalizedPath> {
    if !source_dir.is_dir() {
        return Err(Error::SourceDirMissing {
            path: source_dir.to_native(),
        });
    }

    let target = source_dir.join(file_name);
    if target.exists() && !force {
        return Err(Error::ImportTargetExists {
            path: target.to_native(),
        });
    }

    if let Err(e) = fs::rename(file, target.to_native()) {
        tracing::debug!(error = %e, "Rename failed, copying instead");
        fs::copy(file, target.to_native())?;
        fs::remove_file(file)?;
    }

    tracing::info!(path = %target, "Imported source image");
    Ok(target)
}

/// Capitalize the first letter of each space-separated word, lowercase the rest.
fn title_case(s: &str) -> String {
    s.split(' ')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
