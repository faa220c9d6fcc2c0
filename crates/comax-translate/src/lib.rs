//! # comax-translate
//!
//! Machine translation for Comax.
//!
//! A [`TranslationProvider`] turns one text into another culture; the
//! [`MyMemoryProvider`] talks to the MyMemory HTTP API. [`fill_missing`] walks
//! every source-culture record and writes provider output into the target
//! cultures that have no value yet.

pub mod error;
mod http;
pub mod job;
pub mod provider;

pub use error::TranslateError;
pub use job::{FillProgress, FillRequest, NoProgress, fill_missing};
pub use provider::{MyMemoryProvider, TranslationProvider};
