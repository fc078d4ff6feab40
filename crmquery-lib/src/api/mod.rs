//! Query API

pub mod query;
