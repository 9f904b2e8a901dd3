pub mod assist;
pub mod catalog;
pub mod cleaner;
pub mod export;
pub mod form;
pub mod gemini;
pub mod mapper;
pub mod schema;
pub mod system_prompt;

pub use asmr_protocol as protocol;
