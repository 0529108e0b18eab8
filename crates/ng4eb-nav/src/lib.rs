//! ng4eb Navigation Library
//!
//! Prev/next links between parts, per-part SEO metadata and the XML
//! sitemap of the book.

pub mod navigation;
pub mod seo;
pub mod sitemap;

pub use navigation::{Navigation, NavigationLink, NavigationResolver, parse_location};
pub use seo::{MetaTag, SeoMeta};
pub use sitemap::{ChangeFreq, Sitemap, SitemapError, SitemapUrl};
