pub mod config;
pub mod ledger;
pub mod observability;
pub mod offload;
pub mod scheduler;
pub mod store;
