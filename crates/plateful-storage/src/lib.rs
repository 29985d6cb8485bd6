//! Plateful Storage - local persistence for the profile module.
//!
//! This crate provides the on-device half of the profile module, using redb
//! as the embedded database. Its only table is the profile image cache, a
//! read-through accelerator for remote blob fetches.

pub mod image_cache;
pub mod paths;

pub use image_cache::ImageCacheStorage;
