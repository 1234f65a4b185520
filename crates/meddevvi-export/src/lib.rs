//! meddevvi-export
//!
//! HTML rendering for the browser forms and reports.

pub mod error;
pub mod pages;
