//! Data access and helpers behind the fleet booking/tracking API.

pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod fetch;
pub mod password;
pub mod repositories;
pub mod seed;
pub mod tracking;
