pub mod format;
pub mod parser;

pub use format::{
    format_go, format_handshake, format_options, format_position, format_quit,
    format_ready_check, format_stop, EngineOptions,
};
pub use parser::parse_line;
