pub mod addresses;
pub mod archive;
pub mod config;
pub mod enrich;
pub mod ledger;
pub mod pipeline;
