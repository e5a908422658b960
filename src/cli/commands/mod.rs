pub mod apply;
mod command_result;
pub mod form;
pub mod helper;
pub mod init;
pub mod stats_update;

pub use command_result::*;
