pub mod assemble;
pub mod big_context;
pub mod config_cmd;
