pub mod activity_logger;
pub mod catalog;
pub mod ledger_service;
pub mod market_data_service;
pub mod portfolio_service;
pub mod refresh;
