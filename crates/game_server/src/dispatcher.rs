//! Turns client commands into engine calls, persistence and broadcasts.
//!
//! Every command that touches a game holds that game's lock from the first
//! load until the last broadcast, so two commands on one game never
//! interleave. Failures are reported to the sender only.

use std::sync::Arc;

use chess_core::{Color, GameStatus, Move};
use tracing::{debug, info, warn};

use crate::error::GameError;
use crate::locks::GameLocks;
use crate::protocol::{Command, CommandType, ServerMessage};
use crate::record::{GameId, GameRecord};
use crate::registry::{deliver, Registry, SessionId, Transport};
use crate::store::{GameStore, TokenLookup};

pub struct Dispatcher {
    tokens: Arc<dyn TokenLookup>,
    store: Arc<dyn GameStore>,
    registry: Arc<Registry>,
    locks: GameLocks,
}

impl Dispatcher {
    pub fn new(
        tokens: Arc<dyn TokenLookup>,
        store: Arc<dyn GameStore>,
        registry: Arc<Registry>,
    ) -> Self {
        Self {
            tokens,
            store,
            registry,
            locks: GameLocks::new(),
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Parse one raw frame and dispatch it. Unparsable input is answered on
    /// `transport` directly since the session may not be registered yet.
    pub async fn handle_text(&self, session: SessionId, transport: Arc<dyn Transport>, text: &str) {
        match Command::parse(text) {
            Ok(command) => self.handle(session, transport, command).await,
            Err(e) => {
                debug!(%session, error = %e, "malformed command");
                deliver(
                    transport.as_ref(),
                    &GameError::Malformed(e.to_string()).to_message(),
                );
            }
        }
    }

    #[tracing::instrument(
        skip_all,
        fields(%session, game_id = command.game_id, command = ?command.command_type)
    )]
    pub async fn handle(&self, session: SessionId, transport: Arc<dyn Transport>, command: Command) {
        let result = match command.command_type {
            CommandType::Connect => self.connect(session, &transport, &command).await,
            CommandType::MakeMove => self.make_move(session, &command).await,
            CommandType::Resign => self.resign(session, &command).await,
            CommandType::Leave => self.leave(session, &command).await,
            CommandType::Unknown => Err(GameError::Unsupported),
        };

        if let Err(err) = result {
            match &err {
                GameError::Storage(_) => warn!(error = %err, "command failed"),
                _ => debug!(error = %err, "command rejected"),
            }
            deliver(transport.as_ref(), &err.to_message());
        }
    }

    /// The connection behind `session` went away. Acts like LEAVE for a
    /// registered session and does nothing otherwise.
    pub async fn disconnect(&self, session: SessionId) {
        let Some(game_id) = self.registry.game_of(session) else {
            return;
        };
        let _guard = self.locks.lock(game_id).await;
        let Some((user, game_id)) = self.registry.unregister(session) else {
            return;
        };
        if let Err(e) = self.vacate_seats(game_id, &user).await {
            warn!(%session, game_id, user = %user, error = %e, "failed to vacate seat on disconnect");
        }
        info!(%session, game_id, user = %user, "disconnected");
        self.registry
            .broadcast_notice(game_id, &format!("{user} left the game"), None);
    }

    async fn authenticate(&self, token: &str) -> Result<String, GameError> {
        self.tokens
            .resolve_token(token)
            .await?
            .ok_or(GameError::Auth)
    }

    async fn load(&self, game_id: GameId) -> Result<GameRecord, GameError> {
        self.store
            .load_game(game_id)
            .await?
            .ok_or(GameError::NotFound(game_id))
    }

    fn ensure_connected(&self, session: SessionId, game_id: GameId) -> Result<(), GameError> {
        if self.registry.game_of(session) == Some(game_id) {
            Ok(())
        } else {
            Err(GameError::NotConnected(game_id))
        }
    }

    async fn connect(
        &self,
        session: SessionId,
        transport: &Arc<dyn Transport>,
        command: &Command,
    ) -> Result<(), GameError> {
        let user = self.authenticate(&command.auth_token).await?;
        let game_id = command.game_id;

        if let Some(previous) = self.registry.game_of(session).filter(|&g| g != game_id) {
            // Refuse an unknown target before giving up the current game.
            self.load(game_id).await?;
            self.depart_previous(session, previous).await?;
        }

        let _guard = self.locks.lock(game_id).await;
        let record = self.load(game_id).await?;
        let role = record.role_of(&user);
        self.registry
            .register(game_id, session, &user, Arc::clone(transport));

        info!(user = %user, %role, "connected");
        self.registry
            .send_to(session, &ServerMessage::load_game(record));
        self.registry.broadcast_notice(
            game_id,
            &format!("{user} connected as {role}"),
            Some(session),
        );
        Ok(())
    }

    async fn make_move(&self, session: SessionId, command: &Command) -> Result<(), GameError> {
        let user = self.authenticate(&command.auth_token).await?;
        let game_id = command.game_id;
        let _guard = self.locks.lock(game_id).await;
        self.ensure_connected(session, game_id)?;

        let mut record = self.load(game_id).await?;
        if record.is_over() {
            return Err(GameError::GameOver);
        }
        let seats = record.seats_of(&user);
        if seats.is_empty() {
            return Err(GameError::Role("move"));
        }
        if !seats.contains(&record.game.turn) {
            return Err(GameError::NotYourTurn);
        }
        let mv = command.mv.ok_or(GameError::MissingMove)?;

        record.game.make_move(mv)?;
        self.store.save_game(&record).await?;

        info!(user = %user, %mv, "move applied");
        self.registry.broadcast_state(game_id, &record);
        self.registry
            .broadcast_notice(game_id, &move_notice(&user, mv), Some(session));
        if let Some(notice) = status_notice(&record) {
            self.registry.broadcast_notice(game_id, &notice, None);
        }
        Ok(())
    }

    async fn resign(&self, session: SessionId, command: &Command) -> Result<(), GameError> {
        let user = self.authenticate(&command.auth_token).await?;
        let game_id = command.game_id;
        let _guard = self.locks.lock(game_id).await;
        self.ensure_connected(session, game_id)?;

        let mut record = self.load(game_id).await?;
        if record.is_over() {
            return Err(GameError::GameOver);
        }
        let color = *record
            .seats_of(&user)
            .first()
            .ok_or(GameError::Role("resign"))?;
        record.vacate(color);
        self.store.save_game(&record).await?;

        info!(user = %user, %color, "resigned");
        self.registry
            .broadcast_notice(game_id, &format!("{user} resigned"), None);
        Ok(())
    }

    async fn leave(&self, session: SessionId, command: &Command) -> Result<(), GameError> {
        let user = self.authenticate(&command.auth_token).await?;
        let game_id = command.game_id;
        let _guard = self.locks.lock(game_id).await;
        self.ensure_connected(session, game_id)?;

        self.depart(session, game_id, &user).await
    }

    /// Leave `previous` on the way to another game, under that game's lock.
    async fn depart_previous(&self, session: SessionId, previous: GameId) -> Result<(), GameError> {
        let _guard = self.locks.lock(previous).await;
        let Some(user) = self.registry.username_of(session) else {
            return Ok(());
        };
        if self.registry.game_of(session) != Some(previous) {
            return Ok(());
        }
        self.depart(session, previous, &user).await
    }

    /// Free `user`'s seats, unregister `session` and tell the rest of the
    /// game. Caller holds the game lock.
    async fn depart(&self, session: SessionId, game_id: GameId, user: &str) -> Result<(), GameError> {
        self.vacate_seats(game_id, user).await?;
        self.registry.unregister(session);

        info!(%session, game_id, user = %user, "left");
        self.registry
            .broadcast_notice(game_id, &format!("{user} left the game"), None);
        Ok(())
    }

    /// Clear every seat `user` holds in `game_id` and persist. Observers
    /// leave the record untouched.
    async fn vacate_seats(&self, game_id: GameId, user: &str) -> Result<(), GameError> {
        let mut record = self.load(game_id).await?;
        let seats = record.seats_of(user);
        if seats.is_empty() {
            return Ok(());
        }
        for c in seats {
            record.vacate(c);
        }
        self.store.save_game(&record).await?;
        Ok(())
    }
}

fn move_notice(user: &str, mv: Move) -> String {
    match mv.promotion {
        Some(kind) => format!(
            "{user} moved from {} to {} and promoted to {}",
            mv.start,
            mv.end,
            kind.name()
        ),
        None => format!("{user} moved from {} to {}", mv.start, mv.end),
    }
}

/// Check, checkmate or stalemate announcement for the side now to move.
fn status_notice(record: &GameRecord) -> Option<String> {
    let side: Color = record.game.turn;
    match record.game.status() {
        GameStatus::Checkmate(c) => Some(format!("{} is in checkmate", record.name_of(c))),
        GameStatus::Stalemate(c) => Some(format!("{} is in stalemate", record.name_of(c))),
        GameStatus::Ongoing if record.game.is_in_check(side) => {
            Some(format!("{} is in check", record.name_of(side)))
        }
        GameStatus::Ongoing => None,
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod dispatcher_tests;
