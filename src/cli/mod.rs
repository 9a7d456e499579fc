//! Terminal presentation: validates user input, calls into the store and
//! renders derived views as tables.

pub mod currency;
pub mod setup;
pub mod summary;
pub mod transactions;
pub mod ui;
