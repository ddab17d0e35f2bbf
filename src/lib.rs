#[macro_use]
extern crate diesel;

pub mod admin;
pub mod availability;
pub mod bookings;
pub mod catalog;
pub mod config;
pub mod customer;
pub mod dashboard;
pub mod database;
pub mod error;
pub mod models;
pub mod protocol;
pub mod schema;
pub mod state;
pub mod storage;
pub mod utils;
pub mod wizard;

#[cfg(test)]
pub(crate) mod testing;
