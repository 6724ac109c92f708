//! Input processing module
//! Handles file detection, OCR and text extraction

pub mod file_detector;
pub mod manager;
pub mod ocr;
pub mod text_extractor;

pub use manager::InputManager;
