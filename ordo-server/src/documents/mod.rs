//! Order documents
//!
//! Turns an order — either the in-progress form state or a persisted
//! order re-fetched with its relations — into a print-ready file. The
//! pipeline is linear: normalize into [`OrderDocument`], expand into an
//! ordered list of typed [`Section`]s, then render those sections with
//! the HTML or PDF renderer. Content and layout stay separable, so the
//! section list is testable without a rasterizer.

pub mod html;
pub mod logo;
pub mod model;
pub mod pdf;
pub mod sections;

pub use html::HtmlRenderer;
pub use logo::{LogoImage, fetch_logo};
pub use model::{DRAFT_LABEL, DocumentSource, DraftMaterialLine, DraftOrder, DraftServiceLine, OrderDocument};
pub use pdf::PdfRenderer;
pub use sections::Section;

use thiserror::Error;

/// Document pipeline failures. Rendering is one-shot: an error mid-way
/// yields no partial file.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document assembly failed: {0}")]
    Assembly(String),

    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}
