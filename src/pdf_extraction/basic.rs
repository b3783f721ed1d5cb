// Direct text-layer extraction - Pure Rust via lopdf
use crate::types::Result;
use log::{debug, warn};
use lopdf::Document;
use std::path::Path;

/// Read the embedded text layer of every page, in page order.
///
/// Never fails: a load or decode error is logged and reported as empty text,
/// which the router treats the same as a blank document.
pub fn extract_direct(pdf_path: &Path) -> String {
    match extract_pages(pdf_path) {
        Ok(text) => {
            if text.is_empty() {
                debug!("{} has no text layer", pdf_path.display());
            }
            text
        }
        Err(e) => {
            warn!("text layer extraction failed for {}: {}", pdf_path.display(), e);
            String::new()
        }
    }
}

fn extract_pages(pdf_path: &Path) -> Result<String> {
    let document = Document::load(pdf_path)?;

    // get_pages is keyed by 1-based page number, already in order
    let mut page_texts = Vec::new();
    for page_num in document.get_pages().keys() {
        let text = document.extract_text(&[*page_num])?;
        if text.trim().is_empty() {
            continue;
        }
        page_texts.push(text);
    }

    Ok(page_texts.join("\n"))
}
