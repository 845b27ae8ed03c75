//! Infrastructure adapters: database, object store, e-mail

pub mod mail;
pub mod media;
pub mod storage;
