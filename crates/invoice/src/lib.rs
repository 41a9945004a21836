//! Invoice rendering for RuchiServ order confirmations.
//!
//! Pure order → bytes: no network, no environment reads, no filesystem.
//! The layout module carries the fixed geometry and truncation rules; the
//! pdf module draws them.

pub mod layout;
pub mod pdf;

pub use pdf::{RenderError, RenderedInvoice, render};
