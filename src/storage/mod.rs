pub mod config;
pub mod drafts;
