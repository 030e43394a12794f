// --- File: crates/serviceconnect_availability/src/lib.rs ---
pub mod doc;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod routes;
#[cfg(test)]
mod routes_test;
pub mod service;
