mod admin;
mod forge;
mod initdb;

pub use admin::cmd_admin;
pub use forge::{SAMPLE_MOVIES, cmd_forge, forge};
pub use initdb::cmd_initdb;
