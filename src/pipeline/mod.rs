//! Pipeline stages for turning a result PDF into subject rows.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ text ──▶ normalize ──▶ oracle ──fail──▶ cascade
//! (URL/path) (pdfium)  (cleanup)   (render+LLM)     (regex, lines, tokens)
//! ```
//!
//! 1. [`input`]     resolve the path or URL and check for a `%PDF` header
//! 2. [`text`]      pull the text layer of every page in `spawn_blocking`;
//!    sparse pages are rebuilt from glyph rows
//! 3. [`normalize`] strip invisible characters and stray punctuation
//! 4. [`oracle`]    optional LLM read of rendered pages ([`render`]), bounded
//!    by a deadline; any failure falls through
//! 5. [`cascade`]   local strategies in order, first non-empty result wins

pub mod cascade;
pub mod input;
pub mod normalize;
pub mod oracle;
pub mod render;
pub mod text;
