//! # Markdown Export
//!
//! Write the current transcript to `~/.trident/exports/chat_<timestamp>.md`.
//! One-way only: exports are for reading elsewhere, nothing is ever loaded
//! back into a session.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::Local;
use log::info;

use crate::core::catalog::Catalog;
use crate::core::message::{Role, Transcript};

/// Returns `~/.trident/exports/`, creating it if needed.
pub fn exports_dir() -> io::Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    let dir = home.join(".trident").join("exports");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Export the transcript as a markdown file. Returns the written path.
/// Empty transcripts are rejected so Ctrl+E on a fresh session does not
/// litter the exports directory.
pub fn export_transcript(transcript: &Transcript, catalog: &Catalog) -> io::Result<PathBuf> {
    if transcript.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "nothing to export",
        ));
    }

    let dir = exports_dir()?;
    let stamp = Local::now();
    let path = dir.join(format!("chat_{}.md", stamp.format("%Y%m%d_%H%M%S")));
    let markdown = render_markdown(transcript, catalog, &stamp.format("%Y-%m-%d %H:%M:%S").to_string());

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, markdown)?;
    fs::rename(&tmp_path, &path)?;

    info!("Exported transcript to {}", path.display());
    Ok(path)
}

/// Render the transcript as a markdown document.
fn render_markdown(transcript: &Transcript, catalog: &Catalog, generated_at: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Conversation — {}\n\n", generated_at));
    out.push_str(&format!(
        "**Messages**: {}\n\n---\n\n",
        transcript.len()
    ));

    for message in transcript.iter() {
        let model_label = catalog
            .get(&message.model_id)
            .map(|m| format!("{} ({})", m.name, m.model_name))
            .unwrap_or_else(|| message.model_id.clone());

        match message.role {
            Role::User => {
                out.push_str(&format!("## Question — {}\n\n", model_label));
            }
            Role::Assistant => {
                out.push_str(&format!("## Answer — {}\n\n", model_label));
            }
        }
        out.push_str(message.content.trim());
        out.push_str("\n\n");

        if message.has_references() {
            out.push_str(&format!("**Sources** ({}):\n\n", message.references.len()));
            for reference in &message.references {
                out.push_str(&format!(
                    "- [{}]({}) — {}\n",
                    reference.title, reference.url, reference.domain
                ));
            }
            out.push('\n');
        }
        out.push_str("---\n\n");
    }

    out.push_str("*Generated by Trident*\n");
    out
}
