//! Wire and domain types shared by the EcoLedger backend and its clients.
//!
//! Everything here is plain data: serde-serializable structs and enums with no I/O.
//! The backend produces these values from its database and the emissions engine and
//! returns them as JSON bodies.

pub mod model;
pub mod requests;
