//! Domain types for market-reference data.

pub mod company;
pub mod news;
pub mod symbol;

pub use company::{CompanyProfile, CompanyRecord};
pub use news::{NewsItem, NewsRow};
pub use symbol::SymbolEntry;
