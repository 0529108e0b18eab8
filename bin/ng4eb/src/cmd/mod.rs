//! CLI command implementations.

pub mod check;
pub mod nav;
pub mod search;
pub mod show;
pub mod sitemap;
pub mod toc;
