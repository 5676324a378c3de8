//! Time sources and the moving-marker animation driver.

pub(crate) mod clock;
pub(crate) mod driver;
