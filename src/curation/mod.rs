pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod service;
pub mod text;

pub use dtos::{CuratedArticle, CurationRequest, CurationResponse};
pub use errors::CurationError;
pub use service::CurationService;
