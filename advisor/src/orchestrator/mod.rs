//! Keeps the engine pointed at the current position and republishes what it
//! finds as an [`AdvisorView`].
//!
//! One actor task per advisor owns the game, the engine session and the
//! current suggestion. Callers talk to it through [`AdvisorHandle`].

pub mod actor;
pub mod commands;
pub mod events;
pub mod handle;
pub mod state;
pub mod view;

use std::sync::Arc;

use chess::{Game, PlayerSide};
use engine::{EngineLauncher, EngineOptions};
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

use crate::rules::RulesEngine;
use actor::run_advisor_actor;
use commands::check_depth;
pub use commands::{AdvisorError, DEFAULT_DEPTH, MAX_DEPTH, MIN_DEPTH};
pub use events::AdvisorEvent;
pub use handle::AdvisorHandle;
use state::AdvisorState;
pub use view::{eval_bar_percent, explain_move, format_evaluation, AdvisorView};

/// How a new advisor starts out.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub depth: u32,
    /// The side the human plays; decides whose turn "your turn" is.
    pub player_side: PlayerSide,
    /// Starting position; the standard one when `None`.
    pub fen: Option<String>,
    pub engine_options: EngineOptions,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            player_side: PlayerSide::White,
            fen: None,
            engine_options: EngineOptions::default(),
        }
    }
}

/// Start an advisor: launch its engine, submit the first position and spawn
/// the actor. Must be called inside a tokio runtime.
///
/// An engine that cannot be launched does not make this fail; the advisor
/// runs without one and reports `engine_available: false`.
pub fn spawn_advisor(
    config: AdvisorConfig,
    launcher: Arc<dyn EngineLauncher>,
    rules: Arc<dyn RulesEngine>,
) -> Result<AdvisorHandle, AdvisorError> {
    let depth = check_depth(config.depth)?;
    let game = match config.fen {
        Some(ref f) => Game::from_fen(f).map_err(|e| AdvisorError::InvalidFen(e.to_string()))?,
        None => Game::new(),
    };

    let advisor_id = Uuid::new_v4().to_string();
    let (cmd_tx, cmd_rx) = mpsc::channel(32);
    let (event_tx, _) = broadcast::channel(100);

    let mut state = AdvisorState::new(
        advisor_id.clone(),
        game,
        config.player_side,
        depth,
        launcher,
        rules,
        config.engine_options,
    );
    state.start_engine();

    tokio::spawn(async move {
        run_advisor_actor(state, cmd_rx, event_tx).await;
    });

    Ok(AdvisorHandle::new(advisor_id, cmd_tx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::StandardRules;
    use engine::mock::ScriptedLauncher;

    fn spawn(config: AdvisorConfig) -> Result<AdvisorHandle, AdvisorError> {
        spawn_advisor(
            config,
            Arc::new(ScriptedLauncher::unavailable()),
            Arc::new(StandardRules),
        )
    }

    #[tokio::test]
    async fn test_spawn_validates_config() {
        let config = AdvisorConfig {
            depth: 25,
            ..AdvisorConfig::default()
        };
        assert!(matches!(spawn(config), Err(AdvisorError::DepthOutOfRange(25))));

        let config = AdvisorConfig {
            fen: Some("8/8/8".to_string()),
            ..AdvisorConfig::default()
        };
        assert!(matches!(spawn(config), Err(AdvisorError::InvalidFen(_))));
    }

    #[tokio::test]
    async fn test_spawn_from_fen_as_black() {
        let config = AdvisorConfig {
            player_side: PlayerSide::Black,
            fen: Some("rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq - 0 1".to_string()),
            ..AdvisorConfig::default()
        };
        let handle = spawn(config).unwrap();
        let view = handle.view().await.unwrap();

        assert_eq!(view.id, handle.id());
        assert!(view.player_to_move);
        assert_eq!(view.side_to_move, PlayerSide::Black);
        // History starts at the given position
        assert!(view.history.is_empty());
        assert_eq!(view.first_move_number, 1);
        assert_eq!(view.first_mover, PlayerSide::Black);
        assert!(view.opening.is_none());
        handle.shutdown().await;
    }
}
