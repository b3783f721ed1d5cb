// Extraction routing: text layer first, OCR.space when the text layer is unusable
//
// The decision is a pure selection on the direct result's non-whitespace
// length. Results from the two sources are never merged.

use crate::config::Config;
use crate::types::Result;
use log::info;
use std::path::Path;
use std::time::Instant;

use super::basic;
use super::ocr_space::OcrSpaceClient;

/// Source that reads embedded text. Must not fail; empty means "nothing usable".
pub trait DirectExtractor {
    fn extract_direct(&self, pdf_path: &Path) -> String;
}

/// Source used when the text layer is unusable.
#[allow(async_fn_in_trait)]
pub trait FallbackExtractor {
    async fn extract_fallback(&self, pdf_path: &Path) -> Result<String>;
}

/// lopdf text-layer reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextLayer;

impl DirectExtractor for TextLayer {
    fn extract_direct(&self, pdf_path: &Path) -> String {
        basic::extract_direct(pdf_path)
    }
}

impl FallbackExtractor for OcrSpaceClient {
    async fn extract_fallback(&self, pdf_path: &Path) -> Result<String> {
        self.extract_via_ocr(pdf_path).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    TextLayer,
    Ocr,
}

/// Extraction result with the numbers behind the routing decision
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub text: String,
    pub method: ExtractionMethod,
    pub direct_chars: usize,
    pub extraction_time_ms: u64,
}

pub struct ExtractionRouter<D, F> {
    direct: D,
    fallback: F,
    min_text_chars: usize,
}

impl ExtractionRouter<TextLayer, OcrSpaceClient> {
    /// Router wired to lopdf and OCR.space.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            TextLayer,
            OcrSpaceClient::new(config)?,
            config.min_text_chars,
        ))
    }
}

impl<D: DirectExtractor, F: FallbackExtractor> ExtractionRouter<D, F> {
    pub fn new(direct: D, fallback: F, min_text_chars: usize) -> Self {
        Self {
            direct,
            fallback,
            min_text_chars,
        }
    }

    /// Produce one text blob for `pdf_path`.
    pub async fn acquire_text(&self, pdf_path: &Path) -> Result<ExtractionResult> {
        let start = Instant::now();

        let direct_text = self.direct.extract_direct(pdf_path);
        let direct_chars = stripped_len(&direct_text);

        let (text, method) = if direct_chars < self.min_text_chars {
            info!(
                "Text layer has {} non-whitespace chars (< {}), falling back to OCR",
                direct_chars, self.min_text_chars
            );
            let text = self.fallback.extract_fallback(pdf_path).await?;
            (text, ExtractionMethod::Ocr)
        } else {
            info!("Text extracted from text layer ({} chars)", direct_chars);
            (direct_text, ExtractionMethod::TextLayer)
        };

        Ok(ExtractionResult {
            text,
            method,
            direct_chars,
            extraction_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// Count of non-whitespace characters.
pub fn stripped_len(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttendanceError;
    use std::cell::Cell;

    struct FixedText(String);

    impl DirectExtractor for FixedText {
        fn extract_direct(&self, _pdf_path: &Path) -> String {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct CountingOcr {
        calls: Cell<usize>,
        fail: bool,
    }

    impl FallbackExtractor for CountingOcr {
        async fn extract_fallback(&self, _pdf_path: &Path) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(AttendanceError::ExternalService("{}".to_string()))
            } else {
                Ok("ocr text".to_string())
            }
        }
    }

    #[test]
    fn test_stripped_len() {
        assert_eq!(stripped_len(""), 0);
        assert_eq!(stripped_len(" a \n\t b "), 2);
    }

    #[tokio::test]
    async fn test_long_text_layer_is_returned_unchanged() {
        let text = format!("  {}\n\n", "x".repeat(50));
        let router = ExtractionRouter::new(FixedText(text.clone()), CountingOcr::default(), 50);

        let result = router.acquire_text(Path::new("a.pdf")).await.unwrap();
        assert_eq!(result.text, text);
        assert_eq!(result.method, ExtractionMethod::TextLayer);
        assert_eq!(router.fallback.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_short_text_layer_uses_fallback() {
        // 49 visible chars padded with lots of whitespace
        let text = format!("{}{}", "y".repeat(49), " \n".repeat(100));
        let router = ExtractionRouter::new(FixedText(text), CountingOcr::default(), 50);

        let result = router.acquire_text(Path::new("a.pdf")).await.unwrap();
        assert_eq!(result.text, "ocr text");
        assert_eq!(result.method, ExtractionMethod::Ocr);
        assert_eq!(result.direct_chars, 49);
        assert_eq!(router.fallback.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_fallback_failure_propagates() {
        let ocr = CountingOcr {
            fail: true,
            ..Default::default()
        };
        let router = ExtractionRouter::new(FixedText(String::new()), ocr, 50);

        let err = router.acquire_text(Path::new("a.pdf")).await.unwrap_err();
        assert!(err.is_extraction_failure());
    }
}
