//! Aggregated simulation results.

/// Raw counters for one simulated game.
#[derive(Debug, Clone, Default)]
pub struct GameStats {
    pub completed: bool,
    pub runs_attempted: u32,
    pub battles_won: u32,
    pub battles_lost: u32,
    pub stalled_battles: u32,
    pub final_level: u32,
    pub final_gold: u32,
}

#[derive(Debug, Clone)]
pub struct SimReport {
    pub games: u32,
    pub completed_games: u32,
    pub avg_runs: f64,
    pub avg_final_level: f64,
    pub battles_won: u64,
    pub battles_lost: u64,
    pub stalled_battles: u64,
}

impl SimReport {
    pub fn from_games(games: Vec<GameStats>) -> SimReport {
        let n = games.len().max(1) as f64;
        SimReport {
            games: games.len() as u32,
            completed_games: games.iter().filter(|g| g.completed).count() as u32,
            avg_runs: games.iter().map(|g| g.runs_attempted as f64).sum::<f64>() / n,
            avg_final_level: games.iter().map(|g| g.final_level as f64).sum::<f64>() / n,
            battles_won: games.iter().map(|g| g.battles_won as u64).sum(),
            battles_lost: games.iter().map(|g| g.battles_lost as u64).sum(),
            stalled_battles: games.iter().map(|g| g.stalled_battles as u64).sum(),
        }
    }

    pub fn total_battles(&self) -> u64 {
        self.battles_won + self.battles_lost
    }

    pub fn to_text(&self) -> String {
        let completion_rate = if self.games > 0 {
            self.completed_games as f64 / self.games as f64 * 100.0
        } else {
            0.0
        };
        let win_rate = if self.total_battles() > 0 {
            self.battles_won as f64 / self.total_battles() as f64 * 100.0
        } else {
            0.0
        };
        format!(
            "Games:            {}\n\
             Completed:        {} ({:.1}%)\n\
             Avg region runs:  {:.1}\n\
             Avg final level:  {:.1}\n\
             Battles:          {} won / {} lost ({:.1}% win rate)\n\
             Stalled battles:  {}\n",
            self.games,
            self.completed_games,
            completion_rate,
            self.avg_runs,
            self.avg_final_level,
            self.battles_won,
            self.battles_lost,
            win_rate,
            self.stalled_battles,
        )
    }
}
