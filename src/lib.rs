//! Kiosk
//!
//! A self-checkout kiosk simulator: catalog, cart and pricing, a screen state
//! machine driven by customer actions, and simulated scanner, scale and payment
//! hardware running on virtual time.

pub mod assistance;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod devices;
pub mod fixtures;
pub mod kiosk;
pub mod observability;
pub mod order;
pub mod payment;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod qr;
pub mod random;
pub mod receipt;
pub mod scheduler;
pub mod simulation;
pub mod weight;
