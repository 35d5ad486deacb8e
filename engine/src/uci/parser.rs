use crate::{EngineEvent, MoveCode, Score, SearchInfo};

/// Parse one line of engine output.
///
/// Anything that is not a recognised handshake, readiness, progress or result
/// line comes back as [`EngineEvent::Unrecognized`]; engines are chatty and
/// new keywords must not break the client.
pub fn parse_line(raw: &str) -> EngineEvent {
    let line = raw.trim();
    match line {
        "uciok" => return EngineEvent::HandshakeAck,
        "readyok" => return EngineEvent::ReadyAck,
        _ => {}
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.first() {
        Some(&"info") => parse_info_line(&tokens[1..])
            .map(EngineEvent::SearchInfo)
            .unwrap_or(EngineEvent::Unrecognized),
        Some(&"bestmove") => parse_bestmove(&tokens[1..]),
        _ => EngineEvent::Unrecognized,
    }
}

/// `bestmove <move|(none)> [ponder <move>]`
fn parse_bestmove(tokens: &[&str]) -> EngineEvent {
    let Some(&best) = tokens.first() else {
        return EngineEvent::Unrecognized;
    };

    let best = (best != "(none)").then(|| MoveCode::new(best));
    let ponder = match tokens.get(1..3) {
        Some(&["ponder", mv]) if mv != "(none)" => Some(MoveCode::new(mv)),
        _ => None,
    };

    EngineEvent::BestMove { best, ponder }
}

/// Pull `depth` and `score` out of an "info" line. Both are required.
fn parse_info_line(tokens: &[&str]) -> Option<SearchInfo> {
    let mut depth = None;
    let mut score = None;
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                i += 1;
                depth = tokens.get(i).and_then(|s| s.parse().ok());
            }
            "score" => {
                i += 1;
                if let Some(&score_type) = tokens.get(i) {
                    i += 1;
                    score = tokens.get(i).and_then(|v| match score_type {
                        "cp" => v.parse().ok().map(Score::Centipawns),
                        "mate" => v.parse().ok().map(Score::Mate),
                        _ => None,
                    });
                }
            }
            // The rest of the line is free text
            "string" => break,
            _ => {}
        }
        i += 1;
    }

    Some(SearchInfo {
        depth: depth?,
        score: score?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(depth: u32, score: Score) -> EngineEvent {
        EngineEvent::SearchInfo(SearchInfo { depth, score })
    }

    #[test]
    fn test_handshake_and_ready() {
        assert_eq!(parse_line("uciok"), EngineEvent::HandshakeAck);
        assert_eq!(parse_line("readyok\n"), EngineEvent::ReadyAck);
        assert_eq!(parse_line("uciokay"), EngineEvent::Unrecognized);
    }

    #[test]
    fn test_parse_info_centipawns() {
        let line = "info depth 12 seldepth 18 multipv 1 score cp 35 nodes 15234 nps 812000 pv e2e4 e7e5";
        assert_eq!(parse_line(line), info(12, Score::Centipawns(35)));
    }

    #[test]
    fn test_parse_info_mate() {
        assert_eq!(
            parse_line("info depth 20 score mate 3 pv d8h4"),
            info(20, Score::Mate(3))
        );
        assert_eq!(
            parse_line("info depth 7 score mate -1"),
            info(7, Score::Mate(-1))
        );
    }

    #[test]
    fn test_score_bounds_are_ignored() {
        assert_eq!(
            parse_line("info depth 9 score cp -48 upperbound nodes 100"),
            info(9, Score::Centipawns(-48))
        );
    }

    #[test]
    fn test_info_without_score_is_unrecognized() {
        assert_eq!(
            parse_line("info depth 12 currmove e2e4 currmovenumber 1"),
            EngineEvent::Unrecognized
        );
        assert_eq!(parse_line("info score cp 12"), EngineEvent::Unrecognized);
        assert_eq!(
            parse_line("info string depth 3 score cp 10"),
            EngineEvent::Unrecognized
        );
    }

    #[test]
    fn test_seldepth_is_not_depth() {
        assert_eq!(
            parse_line("info seldepth 14 score cp 10"),
            EngineEvent::Unrecognized
        );
    }

    #[test]
    fn test_parse_bestmove() {
        assert_eq!(
            parse_line("bestmove e2e4 ponder e7e5"),
            EngineEvent::BestMove {
                best: Some(MoveCode::new("e2e4")),
                ponder: Some(MoveCode::new("e7e5")),
            }
        );
        assert_eq!(
            parse_line("bestmove e7e8q"),
            EngineEvent::BestMove {
                best: Some(MoveCode::new("e7e8q")),
                ponder: None,
            }
        );
    }

    #[test]
    fn test_parse_bestmove_none() {
        assert_eq!(
            parse_line("bestmove (none)"),
            EngineEvent::BestMove {
                best: None,
                ponder: None,
            }
        );
    }

    #[test]
    fn test_other_lines_unrecognized() {
        for line in [
            "",
            "id name Stockfish 16",
            "option name Hash type spin default 16 min 1 max 33554432",
            "bestmove",
            "Stockfish 16 by the Stockfish developers",
        ] {
            assert_eq!(parse_line(line), EngineEvent::Unrecognized, "{line}");
        }
    }
}
