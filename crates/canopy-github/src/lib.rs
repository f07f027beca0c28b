//! GitHub aspects for Canopy.
//!
//! [`LicenseAspect`] fingerprints the license GitHub detects for a
//! repository and can write the canonical license text back into a project.

pub mod config;
pub mod headers;
pub mod license;
pub mod model;

pub use config::ForgeConfig;
pub use headers::headers;
pub use license::{LICENSE_FILE, LicenseAspect, license_fingerprint};
pub use model::{CatalogEntry, LicenseLookup, LicenseRecord, LicenseText, RepoLicenseResponse};
