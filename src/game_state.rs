// Game state: two players and the board at one instant
//
// States are values. Every transition produces a fresh state that owns its
// own board and players, so search branches never see each other's changes.

use crate::board::Board;
use crate::error::{Result, WargameError};
use crate::moves::Move;
use crate::types::{CellSnapshot, Player, PlayerId, Roles, Seat, StateSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    players: [Player; 2],
    board: Board,
}

impl GameState {
    /// Creates the starting state of a game
    ///
    /// # Errors
    /// * `DuplicatePlayerId` - both players carry the same id
    /// * `ScoreMismatch` - a player's score differs from the value of the
    ///   cells their seat owns on `board`
    pub fn new(first: Player, second: Player, board: Board) -> Result<Self> {
        if first.id == second.id {
            return Err(WargameError::DuplicatePlayerId(first.id.0));
        }
        for (seat, player) in Seat::all().iter().zip([&first, &second].iter()) {
            let owned = board.value_owned_by(*seat);
            if player.score != owned {
                return Err(WargameError::ScoreMismatch {
                    player: player.id.0.clone(),
                    score: player.score,
                    owned,
                });
            }
        }
        Ok(GameState {
            players: [first, second],
            board,
        })
    }

    /// Builds a fresh board from a value matrix and seats the two players
    pub fn from_values(values: Vec<Vec<u32>>, first: Player, second: Player) -> Result<Self> {
        Self::new(first, second, Board::new(values)?)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub(crate) fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Seat occupied by the player with the given id
    pub fn seat_of(&self, id: &PlayerId) -> Result<Seat> {
        Seat::all()
            .iter()
            .copied()
            .find(|&s| &self.player(s).id == id)
            .ok_or_else(|| WargameError::UnknownPlayer(id.0.clone()))
    }

    /// True once every cell is occupied; no player has a move left
    pub fn is_terminal(&self) -> bool {
        self.board.is_full()
    }

    pub fn legal_moves(&self, seat: Seat) -> Vec<Move> {
        self.board.legal_moves(seat)
    }

    pub fn apply_move(&self, m: &Move) -> GameState {
        m.apply(self)
    }

    /// Every (move, resulting state) pair available to `seat`, in
    /// enumeration order
    pub fn children(&self, seat: Seat) -> Vec<(Move, GameState)> {
        self.legal_moves(seat)
            .into_iter()
            .map(|m| {
                let child = m.apply(self);
                (m, child)
            })
            .collect()
    }

    pub fn maximizing_player(&self, roles: &Roles) -> &Player {
        self.player(roles.maximizer)
    }

    pub fn minimizing_player(&self, roles: &Roles) -> &Player {
        self.player(roles.minimizer())
    }

    /// Player with the higher score; the first seat wins ties
    pub fn leading_player(&self) -> &Player {
        let (first, second) = (&self.players[0], &self.players[1]);
        if first.score >= second.score {
            first
        } else {
            second
        }
    }

    /// Read-only copy of occupancy, ownership, values and scores
    pub fn snapshot(&self) -> StateSnapshot {
        let cells = self
            .board
            .cells()
            .iter()
            .map(|c| CellSnapshot {
                row: c.row(),
                col: c.col(),
                value: c.value(),
                owner: c.owner().map(|s| self.player(s).id.clone()),
            })
            .collect();

        StateSnapshot {
            rows: self.board.rows(),
            cols: self.board.cols(),
            cells,
            players: self.players.to_vec(),
        }
    }
}
