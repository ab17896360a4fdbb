#![cfg(feature = "std")]

//! Persistence collaborator for matches.
//!
//! The engine only ever works on owned snapshots; a store hands those out and
//! takes them back. Saves must be atomic and visible to the next read, and a
//! store must refuse a second active match for the same player.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use thiserror::Error;

use crate::game::{Match, MatchId, PlayerId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("player {0} already has a match in progress")]
    ActiveMatchExists(PlayerId),
    #[error("no match {0}")]
    UnknownMatch(MatchId),
    #[error("stored match could not be encoded or decoded: {0}")]
    Codec(#[from] bincode::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

#[async_trait::async_trait]
pub trait MatchStore: Send + Sync {
    /// Reserve a fresh match id.
    async fn next_id(&self) -> Result<MatchId, StoreError>;
    /// Insert a new active match. Fails if the player already has one.
    async fn create(&self, game: &Match) -> Result<(), StoreError>;
    /// Overwrite an existing match.
    async fn save(&self, game: &Match) -> Result<(), StoreError>;
    async fn load(&self, id: MatchId) -> Result<Match, StoreError>;
    async fn active_match(&self, player: &PlayerId) -> Result<Option<Match>, StoreError>;
    /// Finished matches of `player`, oldest first.
    async fn history(&self, player: &PlayerId) -> Result<Vec<Match>, StoreError>;
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    matches: BTreeMap<MatchId, Vec<u8>>,
    active: HashMap<PlayerId, MatchId>,
}

impl Inner {
    fn decode(&self, id: MatchId) -> Result<Match, StoreError> {
        let bytes = self.matches.get(&id).ok_or(StoreError::UnknownMatch(id))?;
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Store keeping bincode snapshots in memory.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_inner<T>(&self, f: impl FnOnce(&mut Inner) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let mut inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        f(&mut inner)
    }
}

#[async_trait::async_trait]
impl MatchStore for InMemoryStore {
    async fn next_id(&self) -> Result<MatchId, StoreError> {
        self.with_inner(|inner| {
            inner.next_id += 1;
            Ok(MatchId(inner.next_id))
        })
    }

    async fn create(&self, game: &Match) -> Result<(), StoreError> {
        let bytes = bincode::serialize(game)?;
        self.with_inner(|inner| {
            if inner.active.contains_key(game.player()) {
                return Err(StoreError::ActiveMatchExists(game.player().clone()));
            }
            if game.is_active() {
                inner.active.insert(game.player().clone(), game.id());
            }
            inner.matches.insert(game.id(), bytes);
            Ok(())
        })
    }

    async fn save(&self, game: &Match) -> Result<(), StoreError> {
        let bytes = bincode::serialize(game)?;
        self.with_inner(|inner| {
            if !inner.matches.contains_key(&game.id()) {
                return Err(StoreError::UnknownMatch(game.id()));
            }
            if !game.is_active() && inner.active.get(game.player()) == Some(&game.id()) {
                inner.active.remove(game.player());
            }
            inner.matches.insert(game.id(), bytes);
            Ok(())
        })
    }

    async fn load(&self, id: MatchId) -> Result<Match, StoreError> {
        self.with_inner(|inner| inner.decode(id))
    }

    async fn active_match(&self, player: &PlayerId) -> Result<Option<Match>, StoreError> {
        self.with_inner(|inner| match inner.active.get(player) {
            Some(&id) => inner.decode(id).map(Some),
            None => Ok(None),
        })
    }

    async fn history(&self, player: &PlayerId) -> Result<Vec<Match>, StoreError> {
        self.with_inner(|inner| {
            let mut finished = Vec::new();
            for &id in inner.matches.keys() {
                let game = inner.decode(id)?;
                if game.player() == player && !game.is_active() {
                    finished.push(game);
                }
            }
            Ok(finished)
        })
    }
}
