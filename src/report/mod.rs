//! Report layer: a [`document::Document`] per trainee, plus its HTML and
//! terminal renderings. Delivery (files, stdout) is left to the caller.

pub mod document;
pub mod html;
pub mod text;

pub use document::{Document, render};
pub use html::to_html;
pub use text::to_text;
