// Verbatim: hybrid n-gram and cosine plagiarism detection
//
// This is the library root. Each module corresponds to a major subsystem
// of the similarity pipeline.

pub mod config;
pub mod corpus;
pub mod crossref;
pub mod extract;
pub mod output;
pub mod scoring;
pub mod text;

#[cfg(feature = "web")]
pub mod web;
