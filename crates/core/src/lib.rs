//! Core storage logic for Stowage.
//!
//! This crate contains the object storage abstraction and the profile image
//! rules built on top of it. It has ZERO web dependencies.
//!
//! # Modules
//!
//! - `storage` - The `ObjectStore` contract, its S3 and in-memory backends, and backend selection
//! - `profile_image` - Image validation, key generation, and upload/replace/remove flows

pub mod profile_image;
pub mod storage;
