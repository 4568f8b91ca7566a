//! Price data access port trait.

use crate::domain::dataset::Dataset;
use crate::domain::error::AurumError;

pub trait DataPort {
    /// Loads every asset in source order, each restricted to its first
    /// quoted period onward.
    fn load_assets(&self) -> Result<Dataset, AurumError>;
}
