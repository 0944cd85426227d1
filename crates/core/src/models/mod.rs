pub mod activity;
pub mod asset;
pub mod chart;
pub mod overview;
pub mod profile;
pub mod trade;
pub mod transaction;
