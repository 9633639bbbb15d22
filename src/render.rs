//! Presentation Layer: fills the listing and playback HTML templates.
//!
//! Templates are plain HTML files with comment markers that get replaced:
//! `<!-- TRACKS_LIST -->` in `index.html`, `<!-- TRACK_TITLE -->` and
//! `<!-- TRACK_PATH -->` in `track.html`.

use crate::catalog_store::Track;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub const TRACKS_LIST_MARKER: &str = "<!-- TRACKS_LIST -->";
pub const TRACK_TITLE_MARKER: &str = "<!-- TRACK_TITLE -->";
pub const TRACK_PATH_MARKER: &str = "<!-- TRACK_PATH -->";

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const TRACK_TEMPLATE: &str = include_str!("../templates/track.html");

const NOT_FOUND_PAGE: &str = "<!DOCTYPE html>
<html lang=\"en\">
<head><meta charset=\"utf-8\"><title>Not found</title></head>
<body><h1>Track not found</h1><p><a href=\"/\">Back to all tracks</a></p></body>
</html>
";

#[derive(Clone, Debug)]
pub struct PageRenderer {
    index_template: String,
    track_template: String,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self {
            index_template: INDEX_TEMPLATE.to_string(),
            track_template: TRACK_TEMPLATE.to_string(),
        }
    }
}

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl PageRenderer {
    /// Uses `index.html` and `track.html` from `dir` where present, the
    /// built-in pages otherwise.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut renderer = Self::default();
        for (name, slot) in [
            ("index.html", &mut renderer.index_template),
            ("track.html", &mut renderer.track_template),
        ] {
            let path = dir.join(name);
            if path.is_file() {
                *slot = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read template {:?}", path))?;
                info!("Loaded template override {:?}", path);
            }
        }
        Ok(renderer)
    }

    pub fn render_index(&self, tracks: &[Track]) -> String {
        let items: String = tracks
            .iter()
            .map(|track| {
                format!(
                    "<li>{} - {} <a href='/tracks/{}'>Play</a></li>",
                    escape_html(&track.title),
                    escape_html(&track.artist),
                    track.id
                )
            })
            .collect();
        self.index_template.replace(TRACKS_LIST_MARKER, &items)
    }

    pub fn render_track(&self, track: &Track) -> String {
        self.track_template
            .replace(TRACK_PATH_MARKER, &escape_html(&track.path))
            .replace(TRACK_TITLE_MARKER, &escape_html(&track.title))
    }

    pub fn render_not_found(&self) -> String {
        NOT_FOUND_PAGE.to_string()
    }
}
