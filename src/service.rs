#![cfg(feature = "std")]

//! Call surface for front-ends. Every operation on a match runs under that
//! match's lock, so concurrent callers can never interleave moves. Starting
//! or resuming runs under the player's lock.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;
use tokio::sync::{Mutex as AsyncLock, OwnedMutexGuard};

use crate::{
    ai::OpponentKind,
    board::Coordinate,
    common::EngineError,
    game::{Match, MatchId, MoveReport, PlayerId, Timestamp},
    player::{AiPlayer, Player},
    ship::{Orientation, ShipKind, ShipPlacement, Side},
    store::{MatchStore, StoreError},
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("player {0} has no active match")]
    NoActiveMatch(PlayerId),
    #[error("opponent has no cell left to shoot at")]
    NoTarget,
}

/// Human shot plus the opponent's reply, if the match was still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub human: MoveReport,
    pub opponent: Option<MoveReport>,
}

impl TurnReport {
    pub fn winner(&self) -> Option<Side> {
        self.opponent
            .and_then(|r| r.winner)
            .or(self.human.winner)
    }
}

pub fn now_millis() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as Timestamp)
        .unwrap_or(0)
}

/// Async locks handed out by key. An entry lives only while some caller
/// holds or waits on it.
struct KeyedLocks<K> {
    locks: Mutex<HashMap<K, Arc<AsyncLock<()>>>>,
}

impl<K: Eq + Hash + Clone> KeyedLocks<K> {
    fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn lock(&self, key: K) -> KeyedGuard<'_, K> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(key.clone()).or_default().clone()
        };
        let guard = lock.lock_owned().await;
        KeyedGuard {
            owner: self,
            key,
            guard: Some(guard),
        }
    }

    fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

struct KeyedGuard<'a, K: Eq + Hash> {
    owner: &'a KeyedLocks<K>,
    key: K,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<K: Eq + Hash> Drop for KeyedGuard<'_, K> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut locks = self.owner.locks.lock().unwrap_or_else(|e| e.into_inner());
        // only the map's own handle left: nobody holds or waits on it
        if locks.get(&self.key).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(&self.key);
        }
    }
}

pub struct MatchService<S> {
    store: S,
    matches: KeyedLocks<MatchId>,
    players: KeyedLocks<PlayerId>,
    rng: Mutex<SmallRng>,
}

impl<S: MatchStore> MatchService<S> {
    pub fn new(store: S) -> Self {
        let mut seed_rng = rand::rng();
        Self::with_rng(store, SmallRng::from_rng(&mut seed_rng))
    }

    /// Service whose opponents play reproducibly.
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self::with_rng(store, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(store: S, rng: SmallRng) -> Self {
        Self {
            store,
            matches: KeyedLocks::new(),
            players: KeyedLocks::new(),
            rng: Mutex::new(rng),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of match and player locks currently held or awaited.
    pub fn open_locks(&self) -> usize {
        self.matches.len() + self.players.len()
    }

    async fn lock(&self, id: MatchId) -> KeyedGuard<'_, MatchId> {
        self.matches.lock(id).await
    }

    fn with_rng_mut<T>(&self, f: impl FnOnce(&mut SmallRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut rng)
    }

    /// Start a new match against `opponent`, with the opponent's fleet
    /// already laid out. Fails if the player has a match in progress.
    pub async fn start_match(&self, player: &PlayerId, opponent: OpponentKind) -> Result<Match, ServiceError> {
        let _guard = self.players.lock(player.clone()).await;
        self.create_match(player, opponent).await
    }

    async fn create_match(&self, player: &PlayerId, opponent: OpponentKind) -> Result<Match, ServiceError> {
        let id = self.store.next_id().await?;
        let mut game = Match::new(id, player.clone(), opponent, now_millis());
        let mut ai = AiPlayer::new(opponent);
        self.with_rng_mut(|rng| game.place_with(Side::Opponent, &mut ai, rng))?;
        self.store.create(&game).await?;
        info!("created match {} for {} against {}", id, player, opponent);
        Ok(game)
    }

    /// Resume the active match, or start one. The flag is `true` when a new
    /// match was created.
    pub async fn get_or_start_match(
        &self,
        player: &PlayerId,
        opponent: OpponentKind,
    ) -> Result<(Match, bool), ServiceError> {
        let _guard = self.players.lock(player.clone()).await;
        if let Some(game) = self.store.active_match(player).await? {
            info!("resuming match {} against {}", game.id(), game.opponent());
            return Ok((game, false));
        }
        Ok((self.create_match(player, opponent).await?, true))
    }

    pub async fn active_match(&self, player: &PlayerId) -> Result<Match, ServiceError> {
        self.store
            .active_match(player)
            .await?
            .ok_or_else(|| ServiceError::NoActiveMatch(player.clone()))
    }

    pub async fn match_history(&self, player: &PlayerId) -> Result<Vec<Match>, ServiceError> {
        Ok(self.store.history(player).await?)
    }

    pub async fn unplaced_ships(&self, id: MatchId) -> Result<Vec<ShipKind>, ServiceError> {
        let _guard = self.lock(id).await;
        let game = self.store.load(id).await?;
        Ok(game.unplaced_ships(Side::Human))
    }

    /// Place one of the human's ships.
    pub async fn place_ship(
        &self,
        id: MatchId,
        kind: ShipKind,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<ShipPlacement, ServiceError> {
        let _guard = self.lock(id).await;
        let mut game = self.store.load(id).await?;
        let placement = game.place_ship(Side::Human, kind, origin, orientation)?;
        self.store.save(&game).await?;
        Ok(placement)
    }

    /// Randomly lay out whatever the human has not placed yet.
    pub async fn place_remaining_randomly(&self, id: MatchId) -> Result<Match, ServiceError> {
        let _guard = self.lock(id).await;
        let mut game = self.store.load(id).await?;
        let mut layout = AiPlayer::default();
        self.with_rng_mut(|rng| game.place_with(Side::Human, &mut layout, rng))?;
        self.store.save(&game).await?;
        Ok(game)
    }

    /// Resolve the human's shot and, unless that ended the match, the
    /// opponent's reply. Both are saved together.
    pub async fn play_turn(&self, id: MatchId, target: Coordinate) -> Result<TurnReport, ServiceError> {
        let _guard = self.lock(id).await;
        let mut game = self.store.load(id).await?;

        let human = game.fire(Side::Human, target, now_millis())?;
        debug!("match {}: human {:?} at {}", id, human.state, target);

        let opponent = if game.is_active() {
            let mut ai = AiPlayer::new(game.opponent());
            let defending = game.side(Side::Human);
            let reply = self
                .with_rng_mut(|rng| ai.select_target(rng, &defending.board, &defending.log))
                .ok_or(ServiceError::NoTarget)?;
            let report = game.fire(Side::Opponent, reply, now_millis())?;
            debug!("match {}: opponent {:?} at {}", id, report.state, reply);
            Some(report)
        } else {
            None
        };

        self.store.save(&game).await?;
        Ok(TurnReport { human, opponent })
    }

    pub async fn load(&self, id: MatchId) -> Result<Match, ServiceError> {
        let _guard = self.lock(id).await;
        Ok(self.store.load(id).await?)
    }
}
