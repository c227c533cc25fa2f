// Console prompting and the single hand-played game. Door numbers are 1-based here.

use crate::game::{Board, Outcome};
use anyhow::{Result, bail};
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::debug;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    /// Asks until the answer is a number in `min..=max` (no upper bound when `max` is `None`).
    pub fn ask_int(&mut self, prompt: &str, min: u64, max: Option<u64>) -> Result<u64> {
        loop {
            let line = self.ask(prompt)?;
            match line.trim().parse::<u64>() {
                Ok(n) if n >= min && max.is_none_or(|max| n <= max) => return Ok(n),
                _ => {
                    let upper = max.map_or("infinity".to_string(), |m| m.to_string());
                    self.say(format!("Please enter a valid number between {} and {}.", min, upper))?;
                }
            }
        }
    }

    /// Asks until the answer is `y` or `n`, in either case.
    pub fn ask_bool(&mut self, prompt: &str) -> Result<bool> {
        loop {
            let line = self.ask(prompt)?;
            match line.trim().to_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => self.say("Please enter 'y' or 'n'.")?,
            }
        }
    }

    pub fn pause(&mut self, prompt: &str) -> Result<()> {
        self.ask(prompt).map(|_| ())
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed");
        }
        Ok(line)
    }

    fn show(&mut self, board: &Board) -> Result<()> {
        for line in board.render() {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output)?;
        Ok(())
    }
}

pub fn play_game<R, W, G>(prompter: &mut Prompter<R, W>, n_doors: usize, rng: &mut G) -> Result<Outcome>
where
    R: BufRead,
    W: Write,
    G: Rng,
{
    let board = Board::new(n_doors, rng)?;
    play_board(prompter, board, rng)
}

/// Walks the player through one game on an already built board.
pub fn play_board<R, W, G>(prompter: &mut Prompter<R, W>, mut board: Board, rng: &mut G) -> Result<Outcome>
where
    R: BufRead,
    W: Write,
    G: Rng,
{
    let n = board.len() as u64;

    prompter.show(&board)?;
    prompter.say("Hello! Let's play the game!")?;
    let door = prompter.ask_int(&format!("Choose the door (from 1 to {}): ", n), 1, Some(n))?;
    board.pick(door as usize - 1)?;
    prompter.show(&board)?;

    prompter.say("Are you sure? Let me help you...")?;
    prompter.pause("Press Enter to continue")?;
    board.reveal_others(rng)?;
    prompter.show(&board)?;

    if prompter.ask_bool("Do you want to change the door? (y/n): ")? {
        prompter.say("Changing the door...")?;
        board.switch()?;
        prompter.show(&board)?;
    } else {
        prompter.say("Well, you are a brave one!")?;
    }

    prompter.pause("Let's see what's behind the picked door... Press Enter to continue")?;
    board.reveal_all();
    prompter.show(&board)?;

    let outcome = board.outcome();
    debug!("interactive game: prize={} final={:?} -> {:?}", board.prize_index(), board.picked_index(), outcome);
    prompter.say(format!("{}\n", outcome))?;
    Ok(outcome)
}
