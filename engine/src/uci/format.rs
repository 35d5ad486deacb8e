//! Outgoing command lines. No trailing newline; the transport adds it.

/// Extra engine options sent during the handshake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub threads: Option<u32>,
    pub hash_mb: Option<u32>,
}

pub fn format_handshake() -> String {
    "uci".to_string()
}

/// Option commands sent after `uciok`, in order.
///
/// The engine is always limited to a single principal variation; threads and
/// hash are clamped to sane ranges when given.
pub fn format_options(options: &EngineOptions) -> Vec<String> {
    let mut lines = vec![format_setoption("MultiPV", "1")];

    if let Some(threads) = options.threads {
        lines.push(format_setoption("Threads", threads.clamp(1, 16)));
    }
    if let Some(hash_mb) = options.hash_mb {
        lines.push(format_setoption("Hash", hash_mb.clamp(1, 2048)));
    }

    lines
}

fn format_setoption(name: &str, value: impl std::fmt::Display) -> String {
    format!("setoption name {} value {}", name, value)
}

pub fn format_ready_check() -> String {
    "isready".to_string()
}

pub fn format_position(fen: &str) -> String {
    format!("position fen {}", fen.trim())
}

pub fn format_go(depth: u32) -> String {
    format!("go depth {}", depth)
}

pub fn format_stop() -> String {
    "stop".to_string()
}

pub fn format_quit() -> String {
    "quit".to_string()
}
