use tokio::sync::{broadcast, mpsc};
use tracing::Instrument;

use super::commands::{AdvisorCommand, AdvisorError};
use super::events::AdvisorEvent;
use super::state::AdvisorState;
use super::view::AdvisorView;

/// The main advisor actor loop.
/// Owns all mutable state. Processes commands and engine lines sequentially.
pub(crate) async fn run_advisor_actor(
    state: AdvisorState,
    cmd_rx: mpsc::Receiver<AdvisorCommand>,
    event_tx: broadcast::Sender<AdvisorEvent>,
) {
    let advisor_id = state.id.clone();
    run_advisor_actor_inner(state, cmd_rx, event_tx)
        .instrument(tracing::info_span!("advisor", id = %advisor_id))
        .await;
}

async fn run_advisor_actor_inner(
    mut state: AdvisorState,
    mut cmd_rx: mpsc::Receiver<AdvisorCommand>,
    event_tx: broadcast::Sender<AdvisorEvent>,
) {
    tracing::info!("Advisor actor started");

    loop {
        tokio::select! {
            biased;

            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(AdvisorCommand::Shutdown) | None => {
                        tracing::info!("Advisor actor shutting down");
                        state.release_engine();
                        break;
                    }
                    Some(cmd) => handle_command(&mut state, cmd, &event_tx),
                }
            }

            line = state.next_engine_line() => {
                handle_engine_line(&mut state, line, &event_tx);
            }
        }
    }

    tracing::info!("Advisor actor exited");
}

fn handle_command(
    state: &mut AdvisorState,
    cmd: AdvisorCommand,
    event_tx: &broadcast::Sender<AdvisorEvent>,
) {
    match cmd {
        AdvisorCommand::MakeMove { text, reply } => {
            let result = state.apply_move(&text);
            publish_result(&result, event_tx);
            let _ = reply.send(result);
        }
        AdvisorCommand::SetDepth { depth, reply } => {
            let result = state.apply_depth(depth);
            publish_result(&result, event_tx);
            let _ = reply.send(result);
        }
        AdvisorCommand::NewGame { fen, reply } => {
            let result = state.apply_new_game(fen);
            publish_result(&result, event_tx);
            let _ = reply.send(result);
        }
        AdvisorCommand::Undo { reply } => {
            let result = state.apply_undo();
            publish_result(&result, event_tx);
            let _ = reply.send(result);
        }
        AdvisorCommand::StopAnalysis { reply } => {
            let result = state.stop_analysis();
            let _ = event_tx.send(AdvisorEvent::StateChanged(state.view()));
            let _ = reply.send(result);
        }
        AdvisorCommand::RestartEngine { reply } => {
            tracing::info!("Restarting engine");
            state.start_engine();
            let view = state.view();
            let _ = event_tx.send(AdvisorEvent::StateChanged(view.clone()));
            let _ = reply.send(view);
        }
        AdvisorCommand::GetView { reply } => {
            let _ = reply.send(state.view());
        }
        AdvisorCommand::Subscribe { reply } => {
            let view = state.view();
            let rx = event_tx.subscribe();
            let _ = reply.send((view, rx));
        }
        AdvisorCommand::Shutdown => unreachable!(),
    }
}

fn publish_result(
    result: &Result<AdvisorView, AdvisorError>,
    event_tx: &broadcast::Sender<AdvisorEvent>,
) {
    match result {
        Ok(view) => {
            let _ = event_tx.send(AdvisorEvent::StateChanged(view.clone()));
        }
        Err(e) => {
            let _ = event_tx.send(AdvisorEvent::Error(e.to_string()));
        }
    }
}

fn handle_engine_line(
    state: &mut AdvisorState,
    line: Option<String>,
    event_tx: &broadcast::Sender<AdvisorEvent>,
) {
    let Some(line) = line else {
        state.engine_lost("engine output closed");
        let _ = event_tx.send(AdvisorEvent::EngineLost("engine output closed".to_string()));
        let _ = event_tx.send(AdvisorEvent::StateChanged(state.view()));
        return;
    };

    let was_available = state.engine_available();
    if state.apply_engine_line(&line) {
        if was_available && !state.engine_available() {
            let _ = event_tx.send(AdvisorEvent::EngineLost(
                "engine stopped accepting commands".to_string(),
            ));
        }
        let _ = event_tx.send(AdvisorEvent::StateChanged(state.view()));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use chess::{AppliedMove, Game, GameState, PlayerSide, STARTING_FEN};
    use engine::mock::{ScriptedEngine, ScriptedLauncher};

    use crate::orchestrator::{
        spawn_advisor, AdvisorConfig, AdvisorError, AdvisorEvent, AdvisorHandle, AdvisorView,
    };
    use crate::rules::{RulesEngine, RulesError, StandardRules};

    /// Standard rules that count how often they were asked about a move.
    #[derive(Default)]
    struct CountingRules {
        calls: AtomicUsize,
    }

    impl RulesEngine for CountingRules {
        fn apply_move(
            &self,
            fen: &str,
            from: &str,
            to: &str,
            promotion: Option<char>,
        ) -> Result<AppliedMove, RulesError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            StandardRules.apply_move(fen, from, to, promotion)
        }

        fn legal_history(&self, game: &Game) -> Vec<String> {
            StandardRules.legal_history(game)
        }
    }

    fn fen_after(moves: &[&str]) -> String {
        let mut game = Game::new();
        for mv in moves {
            game.make_move_text(mv).unwrap();
        }
        game.to_fen()
    }

    fn spawn_with(launcher: &ScriptedLauncher, rules: Arc<CountingRules>) -> AdvisorHandle {
        spawn_advisor(
            AdvisorConfig::default(),
            Arc::new(launcher.clone()),
            rules,
        )
        .unwrap()
    }

    /// Poll the view until `pred` holds.
    async fn settle(handle: &AdvisorHandle, pred: impl Fn(&AdvisorView) -> bool) -> AdvisorView {
        for _ in 0..200 {
            let view = handle.view().await.unwrap();
            if pred(&view) {
                return view;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("view never settled: {:?}", handle.view().await);
    }

    #[tokio::test]
    async fn test_initial_analysis_is_suggested_in_san() {
        let launcher = ScriptedLauncher::new(ScriptedEngine::new().with_reply(
            STARTING_FEN,
            ["info depth 15 score cp 35 pv e2e4", "bestmove e2e4 ponder e7e5"],
        ));
        let rules = Arc::new(CountingRules::default());
        let handle = spawn_with(&launcher, rules.clone());

        let view = settle(&handle, |v| v.best_move.is_some()).await;
        assert_eq!(view.best_move.as_deref(), Some("e4"));
        assert_eq!(view.best_move_code.as_deref(), Some("e2e4"));
        assert_eq!(view.evaluation, Some(0.35));
        assert_eq!(view.white_evaluation, Some(0.35));
        assert_eq!(view.reached_depth, 15);
        assert!(!view.thinking);
        assert!(view.engine_available);
        assert_eq!(view.requested_depth, 15);
        assert_eq!(rules.calls.load(Ordering::SeqCst), 1);

        let commands = launcher.commands();
        assert_eq!(commands[0], "uci");
        assert!(commands.contains(&format!("position fen {}", STARTING_FEN)));
        assert!(commands.contains(&"go depth 15".to_string()));

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_move_resubmits_and_updates_opening() {
        let after_e4 = fen_after(&["e4"]);
        let launcher = ScriptedLauncher::new(
            ScriptedEngine::new()
                .with_reply(STARTING_FEN, ["info depth 15 score cp 30", "bestmove e2e4"])
                .with_reply(&after_e4, ["info depth 15 score cp 20", "bestmove e7e5"]),
        );
        let handle = spawn_with(&launcher, Arc::new(CountingRules::default()));
        settle(&handle, |v| v.best_move.is_some()).await;

        let view = handle.make_move("e4").await.unwrap();
        assert_eq!(view.history, vec!["e4"]);
        assert_eq!(
            view.opening.as_ref().map(|o| o.name.as_str()),
            Some("King's Pawn Opening")
        );
        assert!(!view.player_to_move);

        let view = settle(&handle, |v| v.best_move.as_deref() == Some("e5")).await;
        assert_eq!(view.evaluation, Some(0.20));
        assert_eq!(view.white_evaluation, Some(-0.20));
        assert!(!view.explanation.is_empty());
        assert!(launcher
            .commands()
            .contains(&format!("position fen {}", after_e4)));
        assert_eq!(launcher.launches(), 1);
    }

    #[tokio::test]
    async fn test_no_move_never_reaches_rules_engine() {
        let launcher = ScriptedLauncher::new(
            ScriptedEngine::new()
                .with_default_reply(["info depth 12 score mate 0", "bestmove (none)"]),
        );
        let rules = Arc::new(CountingRules::default());
        let handle = spawn_with(&launcher, rules.clone());

        let view = settle(&handle, |v| v.reached_depth == 12 && !v.thinking).await;
        assert_eq!(view.best_move, None);
        assert_eq!(view.evaluation, Some(-100.0));
        assert_eq!(view.mate_in, Some(0));
        assert_eq!(view.evaluation_text(), "M-");
        assert_eq!(rules.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_mated_side_keeps_losing_evaluation() {
        let before_mate = fen_after(&["f3", "e5", "g4"]);
        let mated = fen_after(&["f3", "e5", "g4", "Qh4"]);
        let launcher = ScriptedLauncher::new(
            ScriptedEngine::new()
                .with_reply(&before_mate, ["info depth 15 score mate 1", "bestmove d8h4"])
                .with_reply(&mated, ["info depth 0 score mate 0", "bestmove (none)"]),
        );
        let handle = spawn_with(&launcher, Arc::new(CountingRules::default()));

        for mv in ["f3", "e5", "g4"] {
            handle.make_move(mv).await.unwrap();
        }
        let view = settle(&handle, |v| v.best_move.as_deref() == Some("Qh4#")).await;
        assert_eq!(view.evaluation, Some(100.0));
        assert_eq!(view.white_evaluation, Some(-100.0));
        assert_eq!(view.evaluation_text(), "M-");

        handle.make_move("Qh4").await.unwrap();
        let view = settle(&handle, |v| !v.thinking && v.mate_in == Some(0)).await;
        assert_eq!(view.status, GameState::Checkmate);
        assert_eq!(view.side_to_move, PlayerSide::White);
        assert_eq!(view.reached_depth, 0);
        assert_eq!(view.evaluation, Some(-100.0));
        assert_eq!(view.white_evaluation, Some(-100.0));
        assert_eq!(view.evaluation_text(), "M-");
        assert_eq!(view.best_move, None);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_illegal_best_move_is_discarded() {
        // A reply that only makes sense for Black, offered with White to move
        let launcher = ScriptedLauncher::new(
            ScriptedEngine::new()
                .with_reply(STARTING_FEN, ["info depth 10 score cp 5", "bestmove e7e5"]),
        );
        let rules = Arc::new(CountingRules::default());
        let handle = spawn_with(&launcher, rules.clone());

        let view = settle(&handle, |v| !v.thinking && v.reached_depth == 10).await;
        assert_eq!(view.best_move, None);
        assert_eq!(view.best_move_code, None);
        assert_eq!(rules.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_depth_change_keeps_engine() {
        let launcher = ScriptedLauncher::new(ScriptedEngine::new());
        let handle = spawn_with(&launcher, Arc::new(CountingRules::default()));

        assert_eq!(
            handle.set_depth(9).await.unwrap_err(),
            AdvisorError::DepthOutOfRange(9)
        );
        assert_eq!(
            handle.set_depth(21).await.unwrap_err(),
            AdvisorError::DepthOutOfRange(21)
        );

        let view = handle.set_depth(18).await.unwrap();
        assert_eq!(view.requested_depth, 18);
        settle(&handle, |v| v.reached_depth == 18).await;

        assert_eq!(launcher.launches(), 1);
        assert_eq!(launcher.commands_starting_with("uci").len(), 1);
        assert!(launcher.commands().contains(&"go depth 18".to_string()));
    }

    #[tokio::test]
    async fn test_unavailable_engine_degrades_view() {
        let launcher = ScriptedLauncher::unavailable();
        let handle = spawn_with(&launcher, Arc::new(CountingRules::default()));

        let view = handle.view().await.unwrap();
        assert!(!view.engine_available);
        assert!(!view.thinking);

        let view = handle.make_move("Nf3").await.unwrap();
        assert_eq!(view.history, vec!["Nf3"]);
        assert_eq!(
            handle.stop_analysis().await.unwrap_err(),
            AdvisorError::EngineUnavailable
        );
    }

    #[tokio::test]
    async fn test_engine_crash_is_reported() {
        let launcher = ScriptedLauncher::new(ScriptedEngine::new().exit_on_search());
        let handle = spawn_with(&launcher, Arc::new(CountingRules::default()));

        let view = settle(&handle, |v| !v.engine_available).await;
        assert!(!view.thinking);
        assert_eq!(view.best_move, None);

        let view = handle.restart_engine().await.unwrap();
        assert!(view.engine_available);
        assert_eq!(launcher.launches(), 2);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let launcher = ScriptedLauncher::new(ScriptedEngine::new().silent());
        let handle = spawn_with(&launcher, Arc::new(CountingRules::default()));

        let (initial, mut events) = handle.subscribe().await.unwrap();
        assert!(initial.history.is_empty());

        handle.make_move("d4").await.unwrap();
        let received = tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                match events.recv().await {
                    Ok(AdvisorEvent::StateChanged(view)) if !view.history.is_empty() => {
                        return view;
                    }
                    Ok(_) => continue,
                    Err(e) => panic!("event stream failed: {e}"),
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(received.history, vec!["d4"]);
        assert!(received.thinking);

        handle.make_move("d4").await.unwrap_err();
        let error = tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                if let Ok(AdvisorEvent::Error(message)) = events.recv().await {
                    return message;
                }
            }
        })
        .await
        .unwrap();
        assert!(error.contains("Illegal move"));
    }

    #[tokio::test]
    async fn test_stop_and_new_game() {
        let launcher = ScriptedLauncher::new(ScriptedEngine::new().silent());
        let handle = spawn_with(&launcher, Arc::new(CountingRules::default()));
        settle(&handle, |v| v.thinking).await;

        handle.stop_analysis().await.unwrap();
        let view = handle.view().await.unwrap();
        assert!(!view.thinking);

        assert!(matches!(
            handle.new_game(Some("not a fen".to_string())).await,
            Err(AdvisorError::InvalidFen(_))
        ));
        let view = handle.new_game(None).await.unwrap();
        assert!(view.thinking);
        assert_eq!(view.side_to_move, PlayerSide::White);
    }

    #[tokio::test]
    async fn test_shutdown_releases_engine() {
        let launcher = ScriptedLauncher::new(ScriptedEngine::new());
        let handle = spawn_with(&launcher, Arc::new(CountingRules::default()));
        settle(&handle, |v| !v.thinking).await;

        handle.shutdown().await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(handle.view().await.is_err());
        assert_eq!(launcher.commands().last().map(String::as_str), Some("quit"));
    }
}
