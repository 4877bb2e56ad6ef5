//! Pig dice game for the Gambit engine
//!
//! Pig is a small push-your-luck game with genuine chance: every roll of the
//! die has six equally likely results. That makes it a natural reference
//! adapter for the stochastic search.
//!
//! On their turn a player repeatedly chooses to [`PigAction::Roll`] or
//! [`PigAction::Hold`]:
//!
//! - Rolling a 1 forfeits the points gathered this turn and passes the die.
//! - Rolling 2-6 adds the face value to the turn total.
//! - Holding banks the turn total. Reaching the target score wins.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{GameState, OutcomeModel, RandomRollout, RolloutPolicy};
//! use games_pig::{Pig, PigAction};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let pig = Pig::new(2, 20).unwrap();
//! let state = pig.initial_state();
//! assert_eq!(state.legal_actions(), vec![PigAction::Roll]);
//!
//! let outcomes = pig.outcomes(&state, &PigAction::Roll).unwrap();
//! assert_eq!(outcomes.len(), 6);
//!
//! let rollout = RandomRollout::new(pig);
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let winner = rollout.simulate_to_end(&state, &mut rng).unwrap();
//! assert!(winner < 2);
//! ```

use engine_core::{GameError, GameState, OutcomeModel};

/// Number of faces on the die.
pub const DIE_FACES: u32 = 6;

/// Smallest and largest supported table sizes.
pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 8;

/// Pig actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PigAction {
    /// Roll the die once more
    Roll,
    /// Bank the turn total and pass the die
    Hold,
}

/// Pig game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PigState {
    /// Banked score per seat
    scores: Vec<u32>,
    /// Points gathered in the current turn, not yet banked
    turn_total: u32,
    /// Seat whose turn it is
    current: u8,
    /// Seat that reached the target, if any
    winner: Option<u8>,
}

impl PigState {
    /// Fresh game: everybody at zero, seat 0 to play.
    pub fn new(players: u8) -> Self {
        Self {
            scores: vec![0; players as usize],
            turn_total: 0,
            current: 0,
            winner: None,
        }
    }

    /// Mid-game position with no winner yet.
    pub fn from_parts(scores: Vec<u32>, current: u8, turn_total: u32) -> Self {
        Self {
            scores,
            turn_total,
            current,
            winner: None,
        }
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn turn_total(&self) -> u32 {
        self.turn_total
    }

    pub fn current_player(&self) -> u8 {
        self.current
    }

    pub fn players(&self) -> u8 {
        self.scores.len() as u8
    }

    fn pass_turn(&mut self) {
        self.turn_total = 0;
        self.current = (self.current + 1) % self.players();
    }
}

impl GameState for PigState {
    type Action = PigAction;
    type Participant = u8;

    fn winner(&self) -> Option<u8> {
        self.winner
    }

    fn legal_actions(&self) -> Vec<PigAction> {
        if self.winner.is_some() {
            return Vec::new();
        }
        if self.turn_total > 0 {
            vec![PigAction::Roll, PigAction::Hold]
        } else {
            vec![PigAction::Roll]
        }
    }
}

/// Pig rules: table size and the score needed to win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pig {
    players: u8,
    target: u32,
}

impl Pig {
    pub fn new(players: u8, target: u32) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            return Err(GameError::Other(format!(
                "Pig needs {MIN_PLAYERS}-{MAX_PLAYERS} players, got {players}"
            )));
        }
        if target == 0 {
            return Err(GameError::Other("Pig target score must be > 0".into()));
        }
        Ok(Self { players, target })
    }

    pub fn players(&self) -> u8 {
        self.players
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn initial_state(&self) -> PigState {
        PigState::new(self.players)
    }

    /// Result of the die showing `face`.
    fn roll(state: &PigState, face: u32) -> PigState {
        let mut next = state.clone();
        if face == 1 {
            next.pass_turn();
        } else {
            next.turn_total += face;
        }
        next
    }

    fn hold(&self, state: &PigState) -> PigState {
        let mut next = state.clone();
        let seat = next.current as usize;
        next.scores[seat] += next.turn_total;

        if next.scores[seat] >= self.target {
            next.turn_total = 0;
            next.winner = Some(next.current);
        } else {
            next.pass_turn();
        }
        next
    }
}

impl Default for Pig {
    /// Two players racing to 100.
    fn default() -> Self {
        Self {
            players: 2,
            target: 100,
        }
    }
}

impl OutcomeModel<PigState> for Pig {
    fn outcomes(
        &self,
        state: &PigState,
        action: &PigAction,
    ) -> Result<Vec<(PigState, f64)>, GameError> {
        if let Some(winner) = state.winner {
            return Err(GameError::IllegalAction(format!(
                "{action:?} after seat {winner} won"
            )));
        }

        match action {
            PigAction::Roll => {
                let p = 1.0 / DIE_FACES as f64;
                Ok((1..=DIE_FACES)
                    .map(|face| (Self::roll(state, face), p))
                    .collect())
            }
            PigAction::Hold if state.turn_total == 0 => Err(GameError::IllegalAction(
                "Hold with an empty turn total".into(),
            )),
            PigAction::Hold => Ok(vec![(self.hold(state), 1.0)]),
        }
    }
}
