pub mod factory;
pub mod gemini;
pub mod interface;
pub mod language;

pub use factory::TranslatorFactory;
pub use interface::{TranslateError, TranslateRequest, TranslateResponse, TranslatorInterface};
