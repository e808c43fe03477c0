//! Functional core of the Shopme back-office.
//!
//! Pure catalog types and operations live in [`catalog`], the persistence
//! contracts in [`storage`] and the on-disk image layout in [`media`].
//! Nothing in this crate performs I/O.

pub mod catalog;
pub mod media;
pub mod storage;
