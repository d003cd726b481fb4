#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Normal,
    Reversed,
}

impl Direction {
    pub fn flip(&mut self) {
        *self = match self {
            Direction::Normal => Direction::Reversed,
            Direction::Reversed => Direction::Normal,
        };
    }
}

/// Turn bookkeeping shared by the referee and both watchers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    pub current_player_index: usize,
    pub previous_player_index: usize,
    pub direction: Direction,
    pub skip_next: bool,
    /// Always 0, 2 or 4.
    pub pending_penalty: u8,
    pub turn_action_taken: bool,
    pub uno_called: bool,
    pub missing_uno_window_open: bool,
    pub game_over: bool,
}

impl GameState {
    pub fn next_player_index(&self, players: usize) -> usize {
        let step = (1 + usize::from(self.skip_next)) % players;
        match self.direction {
            Direction::Normal => (self.current_player_index + step) % players,
            Direction::Reversed => (self.current_player_index + players - step) % players,
        }
    }

    /// Hands the turn to the next player, consuming a pending skip.
    pub fn advance(&mut self, players: usize) {
        self.previous_player_index = self.current_player_index;
        self.current_player_index = self.next_player_index(players);
        self.skip_next = false;
        self.turn_action_taken = false;
    }
}
