use std::fmt;

use thiserror::Error;

pub mod lexer;

/// One of the eight commands of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // `>`: Increment the `data pointer` by one
    MoveRight,
    // `<`: Decrement the `data pointer` by one
    MoveLeft,

    // `+`: Increment the byte at the `data pointer` by one
    Increment,
    // `-`: Decrement the byte at the `data pointer` by one
    Decrement,

    // `.`: Write the byte at the `data pointer` to the `output device`
    Output,
    // `,`: Read the next byte from the `input device` and write it to the `data pointer`
    Input,

    // `[`: If the byte at the `data pointer` is zero, then jump the `instruction pointer` forward to the instruction after the matching `]`
    LoopBegin,
    // `]`: If the byte at the `data pointer` is non-zero then jump the `instruction pointer` back to the instruction after the matching `[`
    LoopEnd,
}

impl Command {
    /// Every other character is a comment
    pub fn from_char(c: char) -> Option<Command> {
        match c {
            '>' => Some(Command::MoveRight),
            '<' => Some(Command::MoveLeft),
            '+' => Some(Command::Increment),
            '-' => Some(Command::Decrement),
            '.' => Some(Command::Output),
            ',' => Some(Command::Input),
            '[' => Some(Command::LoopBegin),
            ']' => Some(Command::LoopEnd),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Command::MoveRight => '>',
            Command::MoveLeft => '<',
            Command::Increment => '+',
            Command::Decrement => '-',
            Command::Output => '.',
            Command::Input => ',',
            Command::LoopBegin => '[',
            Command::LoopEnd => ']',
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Where a command sits in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 'raw' offset within the file (in terms of 'codepoints')
    pub offset: usize,
    /// Human readable, both start at 1
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{} (offset {})", self.line, self.column, self.offset)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub command: Command,
    pub position: Position,
    /// Index of the matching `[`/`]`, `None` for every other command
    pub partner: Option<usize>,
}

/// A validated stream of tokens, every `[` is matched with a later `]`.
///
/// Only the lexer can build one of these, so anything consuming a
/// `TokenStream` can rely on the loops being balanced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Index of the token matching the loop delimiter at `index`
    pub fn partner(&self, index: usize) -> Option<usize> {
        self.tokens.get(index).and_then(|token| token.partner)
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for token in self.tokens.iter() {
            write!(f, "{}", token.command)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    #[error("Can't find matching `]` for the `[` at {position}")]
    UnmatchedLoopBegin { position: Position },

    #[error("Can't find matching `[` for the `]` at {position}")]
    UnmatchedLoopEnd { position: Position },
}

impl LexerError {
    pub fn position(&self) -> Position {
        match self {
            LexerError::UnmatchedLoopBegin { position } => *position,
            LexerError::UnmatchedLoopEnd { position } => *position,
        }
    }
}
