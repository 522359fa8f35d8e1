//! Outbound API clients for profile enrichment, PDF extraction, and labor
//! market data. The web-search client lives in `crate::search::provider`.

pub mod adzuna;
pub mod linkedin;
pub mod market;
pub mod pdfco;
