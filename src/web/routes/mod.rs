//! Dashboard Routes
//!
//! One module per page. Every page follows the same shape: read the filter
//! parameters, issue its backend calls jointly through the load guard, then
//! render cards and tables. A failed dataset renders empty behind a visible
//! error banner; the page itself never fails on backend errors.

pub mod assets;
pub mod bids;
pub mod contacts;
pub mod data;
pub mod executive;
pub mod health;
pub mod home;
pub mod intelligence;
pub mod pulse;
pub mod sales;
pub mod strategy;
