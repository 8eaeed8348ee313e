//! Floor state management
//!
//! [`storage`] owns the persisted entity collections; [`restaurant`] is the
//! facade every caller goes through.

pub mod restaurant;
pub mod storage;
