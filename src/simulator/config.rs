//! Simulation configuration.

#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of complete games to simulate.
    pub num_games: u32,

    /// Random seed for reproducibility (None = random).
    pub seed: Option<u64>,

    /// Give up on a game after this many region runs.
    pub max_runs_per_game: u32,

    /// Hard cap on rounds per battle before calling it a stall.
    pub max_rounds_per_battle: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per-game detail).
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_games: 200,
            seed: None,
            max_runs_per_game: 400,
            max_rounds_per_battle: 200,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small config for a fast sanity pass.
    pub fn quick() -> Self {
        Self {
            num_games: 20,
            max_runs_per_game: 150,
            ..Default::default()
        }
    }
}
