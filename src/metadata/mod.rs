//! Fetchers for the download catalog and deps.dev scorecards

pub mod deps_dev;
pub mod top_packages;

pub use deps_dev::fetch_package_checks;
pub use top_packages::fetch_catalog;
