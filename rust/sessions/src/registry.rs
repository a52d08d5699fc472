use holdem_engine::game::{Game, HandConfig};
use holdem_engine::logger::HandLogger;
use holdem_engine::ranking::{HandRanker, StandardRanker};
use holdem_engine::rules::Action;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use uuid::Uuid;

use crate::config::RegistryConfig;
use crate::errors::SessionError;
use crate::protocol::{ActionRequest, CreateRequest, CreatedSession, DealtSeat, TableView};

pub type GameId = String;

/// One live hand. The game sits behind its own lock so sessions never block
/// each other.
#[derive(Debug)]
struct Session {
    hand_id: String,
    game: Mutex<Game>,
}

/// Owns every live hand, keyed by game id.
///
/// The map is only write-locked to insert or remove an entry; actions take the
/// read lock plus the per-session mutex, so at most one mutation per game id
/// is in flight at a time.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<GameId, Arc<Session>>>,
    config: RegistryConfig,
    ranker: Arc<dyn HandRanker>,
    history: Option<Mutex<HandLogger>>,
}

impl SessionRegistry {
    /// Registry ranking hands with [`StandardRanker`]. Opens the history file
    /// when one is configured.
    pub fn new(config: RegistryConfig) -> Result<Self, SessionError> {
        Self::with_ranker(config, Arc::new(StandardRanker))
    }

    pub fn with_ranker(
        config: RegistryConfig,
        ranker: Arc<dyn HandRanker>,
    ) -> Result<Self, SessionError> {
        let history = match &config.history_path {
            Some(path) => {
                let logger =
                    HandLogger::create(path).map_err(|e| SessionError::History(e.to_string()))?;
                tracing::info!(path = %path.display(), "hand history enabled");
                Some(Mutex::new(logger))
            }
            None => None,
        };
        Ok(Self {
            sessions: RwLock::new(HashMap::new()),
            config,
            ranker,
            history,
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Seats the players and deals a new hand under `game_id`.
    pub fn create(
        &self,
        game_id: &str,
        request: CreateRequest,
    ) -> Result<CreatedSession, SessionError> {
        let small_blind = request.small_blind.unwrap_or(self.config.small_blind);
        let mut hand_config = HandConfig::new(small_blind).with_button(request.button);
        hand_config.seed = request.seed.or(self.config.seed);

        let game = Game::create(request.seats, hand_config, Arc::clone(&self.ranker))
            .inspect_err(|err| {
                tracing::warn!(game_id = %game_id, error = %err, "failed to start hand")
            })?;
        let hand_id = Uuid::new_v4().to_string();
        let mut created = CreatedSession {
            game_id: game_id.to_string(),
            hand_id: hand_id.clone(),
            seats: game.seats().iter().map(DealtSeat::from).collect(),
            table: TableView::of(game_id, &game, false),
        };
        let seed = game.seed();
        let settled = game.is_settled().then(|| game.clone());

        {
            let mut guard = self
                .sessions
                .write()
                .map_err(|_| SessionError::StoragePoisoned)?;
            if guard.contains_key(game_id) {
                tracing::warn!(game_id = %game_id, "rejected duplicate session");
                return Err(SessionError::AlreadyExists(game_id.to_string()));
            }
            guard.insert(
                game_id.to_string(),
                Arc::new(Session {
                    hand_id: hand_id.clone(),
                    game: Mutex::new(game),
                }),
            );
        }

        tracing::info!(
            game_id = %game_id,
            hand_id = %hand_id,
            seats = created.seats.len(),
            small_blind,
            seed,
            "creating new game session"
        );

        // blinds alone can put everyone all-in
        if let Some(game) = settled {
            created.table.history_error = self.settle(game_id, &hand_id, &game);
        }
        Ok(created)
    }

    /// Read-only snapshot of the table.
    pub fn state(&self, game_id: &str) -> Result<TableView, SessionError> {
        let session = self.get_session(game_id)?;
        let game = session
            .game
            .lock()
            .map_err(|_| SessionError::StoragePoisoned)?;
        Ok(TableView::of(game_id, &game, false))
    }

    /// Decodes and applies an action arriving from a transport.
    pub fn submit(
        &self,
        game_id: &str,
        request: &ActionRequest,
    ) -> Result<TableView, SessionError> {
        // unknown games take precedence over undecodable actions
        self.get_session(game_id)?;
        let action = request.decode().inspect_err(|err| {
            tracing::warn!(game_id = %game_id, seat_id = %request.seat_id, error = %err, "rejected action")
        })?;
        self.apply_action(game_id, &request.seat_id, action)
    }

    /// Applies `action` for `seat_id`. A rejected action leaves the hand
    /// exactly as it was.
    pub fn apply_action(
        &self,
        game_id: &str,
        seat_id: &str,
        action: Action,
    ) -> Result<TableView, SessionError> {
        let session = self.get_session(game_id)?;
        let mut game = session
            .game
            .lock()
            .map_err(|_| SessionError::StoragePoisoned)?;

        let outcome = game.apply_action(seat_id, action).inspect_err(|err| {
            tracing::warn!(
                game_id = %game_id,
                seat_id = %seat_id,
                action = %action,
                error = %err,
                "rejected action"
            )
        })?;

        tracing::debug!(
            game_id = %game_id,
            seat_id = %seat_id,
            action = %action,
            chips = outcome.chips,
            street = ?game.street(),
            "applied action"
        );

        let mut view = TableView::of(game_id, &game, outcome.street_advanced);
        if outcome.settled {
            view.history_error = self.settle(game_id, &session.hand_id, &game);
        }
        Ok(view)
    }

    /// Discards the hand at whatever street it is on.
    pub fn end(&self, game_id: &str) -> Result<(), SessionError> {
        let removed = self
            .sessions
            .write()
            .map_err(|_| SessionError::StoragePoisoned)?
            .remove(game_id);
        match removed {
            Some(session) => {
                tracing::info!(game_id = %game_id, hand_id = %session.hand_id, "session ended");
                Ok(())
            }
            None => Err(SessionError::NotFound(game_id.to_string())),
        }
    }

    /// Ids of every live session, sorted.
    pub fn active_sessions(&self) -> Result<Vec<GameId>, SessionError> {
        let guard = self
            .sessions
            .read()
            .map_err(|_| SessionError::StoragePoisoned)?;
        let mut ids: Vec<GameId> = guard.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn get_session(&self, game_id: &str) -> Result<Arc<Session>, SessionError> {
        let guard = self
            .sessions
            .read()
            .map_err(|_| SessionError::StoragePoisoned)?;
        guard
            .get(game_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(game_id.to_string()))
    }

    /// Logs the result and appends the hand to the history file. The action
    /// that settled the hand stands either way; a failed write is returned as
    /// a message for the view.
    fn settle(&self, game_id: &str, hand_id: &str, game: &Game) -> Option<String> {
        if let Some(result) = game.showdown() {
            let winners: Vec<&str> = result.winners.iter().map(|w| w.seat_id.as_str()).collect();
            tracing::info!(
                game_id = %game_id,
                hand_id = %hand_id,
                pot = result.pot,
                uncontested = result.uncontested,
                winners = ?winners,
                "hand settled"
            );
        }

        let history = self.history.as_ref()?;
        let written = match history.lock() {
            Ok(mut logger) => logger
                .write(&game.hand_record(hand_id))
                .map_err(|e| SessionError::History(e.to_string())),
            Err(_) => Err(SessionError::StoragePoisoned),
        };
        written.err().map(|err| {
            tracing::error!(
                game_id = %game_id,
                hand_id = %hand_id,
                error = %err,
                "failed to write hand history"
            );
            err.to_string()
        })
    }
}
