// PDF text acquisition
pub mod basic;
pub mod extraction_router;
pub mod ocr_space;

pub use basic::extract_direct;
pub use extraction_router::{
    stripped_len, DirectExtractor, ExtractionMethod, ExtractionResult, ExtractionRouter,
    FallbackExtractor, TextLayer,
};
pub use ocr_space::OcrSpaceClient;
