//! Game sessions - an agent playing against a board until the game ends.

use log::{debug, info, warn};
use minefield::{Board, BoardConfig, Cell, GameId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::agent::{Agent, AgentConfig, Move};
use crate::error::SessionError;
use crate::knowledge_base::Deductions;

/// Configuration for a full game: the board to generate and the agent that plays it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub board: BoardConfig,
    pub agent: AgentConfig,

    /// Seed for mine placement. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Parse a session configuration from a TOML document.
    ///
    /// ```toml
    /// seed = 3
    ///
    /// [board]
    /// height = 8
    /// width = 8
    /// mines = 8
    ///
    /// [agent]
    /// strategy = "uniform"
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, SessionError> {
        Ok(toml::from_str(source)?)
    }
}

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    /// Every mine is flagged, or every safe cell revealed.
    Won,
    /// The agent revealed a mine.
    Lost { mine: Cell },
    /// The agent ran out of moves without winning.
    ///
    /// Unreachable while the board and the agent's knowledge agree: the last safe
    /// cell revealed always wins first.
    Stuck,
    /// The knowledge base found the board's answers inconsistent.
    Aborted,
}

/// The result of a single step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub chosen: Move,

    /// Neighboring mine count reported for the chosen cell, if it was safe.
    pub count: Option<usize>,

    pub deductions: Deductions,
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub id: GameId,
    pub status: GameStatus,

    /// Every cell played, in order.
    pub moves: Vec<Cell>,

    /// How many of the moves were guesses.
    pub guesses: usize,

    pub mines_flagged: usize,
}

/// A board and the agent playing it.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: GameId,
    board: Board,
    agent: Agent,
    status: GameStatus,
    moves: Vec<Cell>,
    guesses: usize,
}

impl GameSession {
    /// Start a game on an existing board.
    pub fn new(board: Board, agent_config: AgentConfig) -> Self {
        let (height, width) = board.dimensions();
        let id = GameId::new();
        info!(
            "Starting game {} on a {}x{} board with {} mine(s)",
            id,
            height,
            width,
            board.mine_count()
        );
        Self {
            id,
            board,
            agent: Agent::new(height, width, agent_config),
            status: GameStatus::InProgress,
            moves: Vec::new(),
            guesses: 0,
        }
    }

    /// Generate a board from the configuration and start a game on it.
    pub fn from_config(config: &SessionConfig) -> Result<Self, SessionError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let board = Board::generate(&config.board, &mut rng)?;
        Ok(Self::new(board, config.agent.clone()))
    }

    /// Let the agent make one move and feed the board's answer back to it.
    pub fn step(&mut self) -> Result<Turn, SessionError> {
        if self.status != GameStatus::InProgress {
            return Err(SessionError::GameOver);
        }

        let chosen = self.agent.next_move();
        let cell = match chosen.cell() {
            Some(cell) => cell,
            None => {
                info!("Game {}: no moves left", self.id);
                self.status = GameStatus::Stuck;
                return Ok(Turn {
                    chosen,
                    count: None,
                    deductions: Deductions::default(),
                });
            }
        };

        self.moves.push(cell);
        if matches!(chosen, Move::Guess(_)) {
            self.guesses += 1;
        }

        if self.board.is_mine(cell) {
            info!("Game {}: hit a mine at {} after {} move(s)", self.id, cell, self.moves.len());
            self.status = GameStatus::Lost { mine: cell };
            return Ok(Turn {
                chosen,
                count: None,
                deductions: Deductions::default(),
            });
        }

        let count = self.board.neighbor_mine_count(cell);
        let deductions = match self.agent.add_knowledge(cell, count) {
            Ok(deductions) => deductions,
            Err(err) => {
                warn!("Game {}: aborted after revealing {}: {}", self.id, cell, err);
                self.status = GameStatus::Aborted;
                return Err(err.into());
            }
        };
        debug!(
            "Game {}: revealed {} ({}), {} new safe, {} new mine(s)",
            self.id,
            cell,
            count,
            deductions.new_safes.len(),
            deductions.new_mines.len()
        );

        if self.is_won() {
            info!("Game {}: won after {} move(s)", self.id, self.moves.len());
            self.status = GameStatus::Won;
        }

        Ok(Turn {
            chosen,
            count: Some(count),
            deductions,
        })
    }

    /// Step until the game ends.
    pub fn play(&mut self) -> Result<GameReport, SessionError> {
        while self.status == GameStatus::InProgress {
            self.step()?;
        }
        Ok(self.report())
    }

    fn is_won(&self) -> bool {
        self.board.all_mines_flagged(self.agent.flags())
            || self.agent.knowledge().moves_made().len() == self.board.safe_cell_count()
    }

    /// Summarise the game so far.
    pub fn report(&self) -> GameReport {
        GameReport {
            id: self.id,
            status: self.status,
            moves: self.moves.clone(),
            guesses: self.guesses,
            mines_flagged: self.agent.flags().len(),
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::GuessStrategy;
    use crate::error::KnowledgeError;

    fn first_untried() -> AgentConfig {
        AgentConfig {
            strategy: GuessStrategy::FirstUntried,
            seed: Some(1),
        }
    }

    #[test]
    fn test_game_won_on_corner_mine() {
        let board = Board::from_layout(vec![
            vec![false, false, false],
            vec![false, false, false],
            vec![false, false, true],
        ])
        .unwrap();
        let mut session = GameSession::new(board, first_untried());

        let report = session.play().unwrap();

        assert_eq!(report.status, GameStatus::Won);
        assert_eq!(report.moves[0], Cell::new(0, 0));
        assert!(!report.moves.contains(&Cell::new(2, 2)));
        assert!(session.agent().knowledge().is_known_mine(&Cell::new(2, 2)));
        assert_eq!(report.guesses, 1);
    }

    #[test]
    fn test_game_lost_on_first_guess() {
        let board = Board::from_layout(vec![vec![true, false]]).unwrap();
        let mut session = GameSession::new(board, first_untried());

        let turn = session.step().unwrap();
        assert_eq!(turn.chosen, Move::Guess(Cell::new(0, 0)));
        assert_eq!(turn.count, None);
        assert_eq!(
            session.status(),
            GameStatus::Lost {
                mine: Cell::new(0, 0)
            }
        );

        // No moves once the game is over
        assert!(matches!(session.step(), Err(SessionError::GameOver)));
    }

    #[test]
    fn test_first_step_reports_count() {
        let board = Board::from_layout(vec![vec![false, true, false]]).unwrap();
        let mut session = GameSession::new(board, first_untried());

        let turn = session.step().unwrap();
        assert_eq!(turn.count, Some(1));
        assert_eq!(turn.deductions.new_mines.len(), 1);

        // Flagging the only mine wins before (0, 2) is ever played
        assert_eq!(session.status(), GameStatus::Won);
        let report = session.play().unwrap();
        assert_eq!(report.moves, vec![Cell::new(0, 0)]);
        assert_eq!(report.mines_flagged, 1);
    }

    #[test]
    fn test_inconsistent_answer_aborts_game() {
        let board = Board::from_layout(vec![vec![false; 4]]).unwrap();
        let mut session = GameSession::new(board, first_untried());

        // A wrong observation leaves (0, 1) flagged although the board has no mines
        session.agent.add_knowledge(Cell::new(0, 0), 1).unwrap();
        assert!(session.agent().knowledge().is_known_mine(&Cell::new(0, 1)));

        // (0, 2) really has no neighboring mines, fewer than the one already known
        let err = session.step().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Knowledge(KnowledgeError::ObservationUnderflow { count: 0, .. })
        ));
        assert_eq!(session.status(), GameStatus::Aborted);

        assert!(matches!(session.step(), Err(SessionError::GameOver)));
        let report = session.play().unwrap();
        assert_eq!(report.status, GameStatus::Aborted);
        assert_eq!(report.moves, vec![Cell::new(0, 2)]);
    }

    #[test]
    fn test_stuck_only_when_knowledge_disagrees_with_board() {
        let board = Board::from_layout(vec![vec![false, false]]).unwrap();
        let mut session = GameSession::new(board, first_untried());

        // Every cell is now either played or wrongly flagged
        session.agent.add_knowledge(Cell::new(0, 0), 1).unwrap();

        let turn = session.step().unwrap();
        assert_eq!(turn.chosen, Move::NoMoveAvailable);
        assert_eq!(session.status(), GameStatus::Stuck);

        // The same board played from scratch is won
        let board = Board::from_layout(vec![vec![false, false]]).unwrap();
        let report = GameSession::new(board, first_untried()).play().unwrap();
        assert_eq!(report.status, GameStatus::Won);
    }

    #[test]
    fn test_session_from_toml_config() {
        let config = SessionConfig::from_toml_str(
            "seed = 11\n\n[board]\nheight = 5\nwidth = 6\nmines = 4\n\n[agent]\nstrategy = \"uniform\"\nseed = 2\n",
        )
        .unwrap();
        assert_eq!(config.board, BoardConfig::new(5, 6, 4));
        assert_eq!(config.agent.strategy, GuessStrategy::Uniform);

        let first = GameSession::from_config(&config).unwrap();
        let second = GameSession::from_config(&config).unwrap();
        assert_eq!(first.board(), second.board());
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SessionConfig {
            board: BoardConfig::new(2, 2, 5),
            ..Default::default()
        };
        assert!(matches!(
            GameSession::from_config(&config),
            Err(SessionError::Board(_))
        ));
        assert!(matches!(
            SessionConfig::from_toml_str("[board]\nheight = -1\n"),
            Err(SessionError::Config(_))
        ));
    }
}
