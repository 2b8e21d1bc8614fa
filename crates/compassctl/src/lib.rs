pub mod cmd_enabled;
pub mod cmd_show;
pub mod common;
pub mod present;
