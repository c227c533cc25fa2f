use super::door::Door;
use crate::error::{MontyError, Result};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_DOORS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Undetermined,
}

impl Outcome {
    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Win)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "You won the car!!!"),
            Outcome::Loss => write!(f, "Try again next time"),
            Outcome::Undetermined => write!(f, "Denied"),
        }
    }
}

/// One round of the game: the doors plus cached prize and pick positions.
///
/// Exactly one door holds the prize for the board's whole lifetime and at
/// most one door is picked. Door indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    doors: Vec<Door>,
    prize_index: usize,
    picked_index: Option<usize>,
}

impl Board {
    /// Builds `n` closed doors and hides the prize behind a uniformly random one.
    pub fn new<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Self> {
        check_door_count(n)?;
        let prize = rng.gen_range(0..n);
        Self::with_prize(n, prize)
    }

    /// Same as [`Board::new`] but with the prize at a known position.
    pub fn with_prize(n: usize, prize_index: usize) -> Result<Self> {
        check_door_count(n)?;
        if prize_index >= n {
            return Err(MontyError::IndexOutOfRange { index: prize_index, len: n });
        }

        let mut doors = vec![Door::new(); n];
        doors[prize_index].has_prize = true;

        Ok(Self {
            doors,
            prize_index,
            picked_index: None,
        })
    }

    pub fn len(&self) -> usize {
        self.doors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn door(&self, index: usize) -> Result<&Door> {
        self.doors.get(index).ok_or(MontyError::IndexOutOfRange {
            index,
            len: self.doors.len(),
        })
    }

    pub fn prize_index(&self) -> usize {
        self.prize_index
    }

    pub fn picked_index(&self) -> Option<usize> {
        self.picked_index
    }

    pub fn closed_count(&self) -> usize {
        self.doors.iter().filter(|d| d.is_closed()).count()
    }

    /// Moves the pick to `index`. Picking again before the reveal is allowed.
    pub fn pick(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        for (i, door) in self.doors.iter_mut().enumerate() {
            door.picked = i == index;
        }
        self.picked_index = Some(index);
        Ok(())
    }

    pub fn open(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.doors[index].opened = true;
        Ok(())
    }

    pub fn close(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.doors[index].opened = false;
        Ok(())
    }

    pub fn open_picked(&mut self) -> Result<()> {
        let picked = self.picked_index.ok_or(MontyError::NothingPicked)?;
        self.open(picked)
    }

    /// The host's move: opens every door that is neither picked nor the prize.
    ///
    /// When the player already holds the prize, one of the other doors is
    /// left closed, chosen uniformly, so there is always somewhere to switch
    /// to. Afterwards exactly two doors are closed: the pick and one other.
    pub fn reveal_others<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let picked = self.picked_index.ok_or(MontyError::NothingPicked)?;

        for (i, door) in self.doors.iter_mut().enumerate() {
            if i != picked && i != self.prize_index {
                door.opened = true;
            }
        }

        if picked == self.prize_index {
            let others: Vec<usize> = (0..self.doors.len()).filter(|&i| i != picked).collect();
            if let Some(&keep) = others.choose(rng) {
                self.doors[keep].opened = false;
            }
        }

        Ok(())
    }

    /// Moves the pick to the only other closed door and returns its index.
    pub fn switch(&mut self) -> Result<usize> {
        let picked = self.picked_index.ok_or(MontyError::NothingPicked)?;

        let mut targets = self
            .doors
            .iter()
            .enumerate()
            .filter(|(i, d)| *i != picked && d.is_closed())
            .map(|(i, _)| i);

        match (targets.next(), targets.next()) {
            (Some(target), None) => {
                self.pick(target)?;
                Ok(target)
            }
            _ => Err(MontyError::NoSwitchTarget),
        }
    }

    pub fn reveal_all(&mut self) {
        for door in &mut self.doors {
            door.opened = true;
        }
    }

    pub fn outcome(&self) -> Outcome {
        let Some(picked) = self.picked_index else {
            return Outcome::Undetermined;
        };

        let door = &self.doors[picked];
        match (door.opened, door.has_prize) {
            (false, _) => Outcome::Undetermined,
            (true, true) => Outcome::Win,
            (true, false) => Outcome::Loss,
        }
    }

    /// One display line per door, labelled from 1.
    pub fn render(&self) -> Vec<String> {
        self.doors
            .iter()
            .enumerate()
            .map(|(i, door)| format!("Door {}: {}", i + 1, door))
            .collect()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.doors.len() {
            Ok(())
        } else {
            Err(MontyError::IndexOutOfRange {
                index,
                len: self.doors.len(),
            })
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.render() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

pub(crate) fn check_door_count(n: usize) -> Result<()> {
    if n < MIN_DOORS {
        return Err(MontyError::config(format!(
            "a board needs at least {} doors, got {}",
            MIN_DOORS, n
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn closed_indices(board: &Board) -> Vec<usize> {
        board
            .doors()
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_closed())
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn rejects_fewer_than_three_doors() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            Board::new(2, &mut rng),
            Err(MontyError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Board::new(0, &mut rng),
            Err(MontyError::InvalidConfiguration(_))
        ));

        let board = Board::new(3, &mut rng).unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board.picked_index(), None);
    }

    #[test]
    fn fresh_board_has_one_prize() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 3..=20 {
            let board = Board::new(n, &mut rng).unwrap();
            let prizes = board.doors().iter().filter(|d| d.has_prize).count();
            assert_eq!(prizes, 1);
            assert!(board.doors()[board.prize_index()].has_prize);
            assert_eq!(board.closed_count(), n);
        }
    }

    #[test]
    fn pick_moves_the_marker() {
        let mut board = Board::with_prize(5, 0).unwrap();
        board.pick(0).unwrap();
        board.pick(1).unwrap();
        board.pick(2).unwrap();

        let picked: Vec<bool> = board.doors().iter().map(|d| d.picked).collect();
        assert_eq!(picked, vec![false, false, true, false, false]);
        assert_eq!(board.picked_index(), Some(2));
    }

    #[test]
    fn out_of_range_indices_fail() {
        let mut board = Board::with_prize(3, 0).unwrap();
        assert_eq!(
            board.pick(3),
            Err(MontyError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(board.open(10).is_err());
        assert!(board.close(3).is_err());
        assert!(Board::with_prize(3, 3).is_err());
    }

    #[test]
    fn open_and_close_toggle_a_door() {
        let mut board = Board::with_prize(4, 2).unwrap();
        board.open(0).unwrap();
        assert!(board.doors()[0].opened);
        board.close(0).unwrap();
        assert!(!board.doors()[0].opened);
    }

    #[test]
    fn reveal_when_pick_misses_keeps_prize_closed() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::with_prize(6, 1).unwrap();
        board.pick(0).unwrap();
        board.reveal_others(&mut rng).unwrap();

        assert_eq!(closed_indices(&board), vec![0, 1]);
    }

    #[test]
    fn reveal_when_pick_hits_leaves_one_goat_closed() {
        let mut rng = StdRng::seed_from_u64(3);
        for n in 3..=12 {
            let mut board = Board::with_prize(n, 0).unwrap();
            board.pick(0).unwrap();
            board.reveal_others(&mut rng).unwrap();

            let closed = closed_indices(&board);
            assert_eq!(closed.len(), 2);
            assert_eq!(closed[0], 0);
            assert!(!board.doors()[closed[1]].has_prize);
        }
    }

    #[test]
    fn reveal_and_switch_need_a_pick() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut board = Board::with_prize(3, 0).unwrap();
        assert_eq!(board.reveal_others(&mut rng), Err(MontyError::NothingPicked));
        assert_eq!(board.switch(), Err(MontyError::NothingPicked));
        assert_eq!(board.outcome(), Outcome::Undetermined);
    }

    #[test]
    fn switch_goes_to_the_other_closed_door() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = Board::with_prize(7, 4).unwrap();
        board.pick(2).unwrap();
        board.reveal_others(&mut rng).unwrap();

        assert_eq!(board.switch(), Ok(4));
        assert_eq!(board.picked_index(), Some(4));
        assert!(board.doors()[4].picked);
        assert!(!board.doors()[2].picked);
    }

    #[test]
    fn switch_without_unique_target_fails() {
        let mut board = Board::with_prize(4, 0).unwrap();
        board.pick(0).unwrap();
        // nothing revealed yet, three candidates
        assert_eq!(board.switch(), Err(MontyError::NoSwitchTarget));

        board.reveal_all();
        assert_eq!(board.switch(), Err(MontyError::NoSwitchTarget));
        assert_eq!(board.picked_index(), Some(0));
    }

    #[test]
    fn switching_flips_the_result_with_three_doors() {
        let mut rng = StdRng::seed_from_u64(5);
        for prize in 0..3 {
            for pick in 0..3 {
                let mut board = Board::with_prize(3, prize).unwrap();
                board.pick(pick).unwrap();
                board.reveal_others(&mut rng).unwrap();
                board.switch().unwrap();
                board.reveal_all();

                let expected = if pick == prize { Outcome::Loss } else { Outcome::Win };
                assert_eq!(board.outcome(), expected);
            }
        }
    }

    #[test]
    fn reveal_all_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut board = Board::new(5, &mut rng).unwrap();
        board.pick(1).unwrap();
        board.reveal_all();
        let once = board.clone();
        board.reveal_all();
        assert_eq!(board, once);
        assert_eq!(board.closed_count(), 0);
    }

    #[test]
    fn outcome_reads_the_picked_door() {
        let mut board = Board::with_prize(3, 0).unwrap();
        board.pick(0).unwrap();
        assert_eq!(board.outcome(), Outcome::Undetermined);
        board.open_picked().unwrap();
        assert_eq!(board.outcome(), Outcome::Win);

        let mut board = Board::with_prize(3, 1).unwrap();
        board.pick(2).unwrap();
        board.open_picked().unwrap();
        assert_eq!(board.outcome(), Outcome::Loss);
        assert_eq!(board.outcome().to_string(), "Try again next time");
    }

    #[test]
    fn render_labels_from_one() {
        let mut board = Board::with_prize(3, 2).unwrap();
        board.pick(0).unwrap();
        board.open(1).unwrap();

        let lines = board.render();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Door 1: >>> 🚪");
        assert_eq!(lines[1], "Door 2:     🐐 A goat");
        assert_eq!(lines[2], "Door 3:     🚪");
    }
}
