pub mod activity;
pub mod emission;
pub mod import;
pub mod insight;
pub mod scenario;
pub mod summary;
