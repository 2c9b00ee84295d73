pub mod analysis;
pub mod bills;
pub mod categorize;
pub mod congress;
