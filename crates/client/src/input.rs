//! Line-based move selection for the player character.

use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use combat_core::{CharacterId, CharacterSnapshot, Move};

use crate::presentation;

/// What a line of player input asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Wait,
    Offered(usize),
}

/// Parses a menu entry. `0` waits; `1..=offered` picks an offered move.
pub fn parse_choice(line: &str, offered: usize) -> Option<Choice> {
    match line.trim().parse::<usize>().ok()? {
        0 => Some(Choice::Wait),
        n if n <= offered => Some(Choice::Offered(n - 1)),
        _ => None,
    }
}

/// Prompts until the player names a valid entry.
pub fn prompt_move(
    player: CharacterId,
    offered: &[Move],
    characters: &[CharacterSnapshot],
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Move> {
    write!(output, "{}", presentation::render_menu(offered, characters))?;
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before a move was chosen");
        }
        match parse_choice(&line, offered.len()) {
            Some(Choice::Wait) => return Ok(Move::wait(player)),
            Some(Choice::Offered(index)) => return Ok(offered[index].clone()),
            None => writeln!(output, "pick a number from 0 to {}", offered.len())?,
        }
    }
}
