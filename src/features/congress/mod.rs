pub mod client;
pub mod helpers;

pub use client::{BillSource, CongressClient};
