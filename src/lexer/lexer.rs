use tracing::debug;

use super::{Command, LexerError, Position, Token, TokenStream};

#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /** Human Readable positions in file */
    pub cur_line: usize,
    pub cur_col: usize,

    /** 'raw' format / offset within the file (in terms of 'codepoints') */
    pub codepoint_offset: usize,

    chars: std::str::Chars<'a>,
    /// Indices of the `[` tokens still waiting on their `]`
    open_loops: Vec<usize>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(chars: &'a str) -> Lexer<'a> {
        Lexer {
            cur_col: 1,
            cur_line: 1,

            codepoint_offset: 0,

            chars: chars.chars(),
            open_loops: vec![],
            tokens: vec![],
        }
    }

    fn current_position(&self) -> Position {
        Position {
            offset: self.codepoint_offset,
            line: self.cur_line,
            column: self.cur_col,
        }
    }

    fn consume_char(&mut self) -> Option<char> {
        match self.chars.next() {
            Some(c) => {
                self.cur_col += 1;
                if c == '\n' {
                    self.cur_line += 1;
                    self.cur_col = 1;
                }
                self.codepoint_offset += 1;
                Some(c)
            }
            None => None,
        }
    }

    /// Skips comments, returning the next command and where it was found
    pub fn next_command(&mut self) -> Option<(Command, Position)> {
        loop {
            let position = self.current_position();
            let c = self.consume_char()?;
            if let Some(command) = Command::from_char(c) {
                return Some((command, position));
            }
        }
    }

    fn push_token(&mut self, command: Command, position: Position) -> Result<(), LexerError> {
        let index = self.tokens.len();
        let partner = match command {
            Command::LoopBegin => {
                self.open_loops.push(index);
                None
            }
            Command::LoopEnd => {
                let open = self
                    .open_loops
                    .pop()
                    .ok_or(LexerError::UnmatchedLoopEnd { position })?;
                self.tokens[open].partner = Some(index);
                Some(open)
            }
            _ => None,
        };

        self.tokens.push(Token {
            command,
            position,
            partner,
        });
        Ok(())
    }

    /// Scans the whole source, validating that every loop is balanced
    pub fn tokenize(mut self) -> Result<TokenStream, LexerError> {
        while let Some((command, position)) = self.next_command() {
            self.push_token(command, position)?;
        }

        // the bottom of the stack is the earliest `[` that never got closed
        if let Some(&open) = self.open_loops.first() {
            return Err(LexerError::UnmatchedLoopBegin {
                position: self.tokens[open].position,
            });
        }

        debug!(
            tokens = self.tokens.len(),
            lines = self.cur_line,
            "tokenized source"
        );
        Ok(TokenStream {
            tokens: self.tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn commands(source: &str) -> Vec<Command> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .tokens()
            .iter()
            .map(|token| token.command)
            .collect()
    }

    #[test]
    fn every_command_character() {
        assert_eq!(
            commands("><+-.,[]"),
            vec![
                Command::MoveRight,
                Command::MoveLeft,
                Command::Increment,
                Command::Decrement,
                Command::Output,
                Command::Input,
                Command::LoopBegin,
                Command::LoopEnd,
            ]
        );
    }

    #[test]
    fn comments_are_discarded() {
        assert_eq!(commands("foo! bar"), vec![]);
        assert_eq!(
            commands("add + then print .\n"),
            vec![Command::Increment, Command::Output]
        );
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let stream = Lexer::new("a+\n  -").tokenize().unwrap();
        let positions: Vec<Position> = stream.tokens().iter().map(|t| t.position).collect();
        assert_eq!(
            positions,
            vec![
                Position {
                    offset: 1,
                    line: 1,
                    column: 2
                },
                Position {
                    offset: 5,
                    line: 2,
                    column: 3
                },
            ]
        );
    }

    #[test]
    fn loops_are_cross_indexed() {
        let stream = Lexer::new("+[-[>]<]").tokenize().unwrap();
        assert_eq!(stream.partner(1), Some(7));
        assert_eq!(stream.partner(7), Some(1));
        assert_eq!(stream.partner(3), Some(5));
        assert_eq!(stream.partner(5), Some(3));
        assert_eq!(stream.partner(0), None);
        assert_eq!(stream.partner(100), None);
    }

    #[test]
    fn unmatched_loop_begin() {
        let err = Lexer::new("[[]").tokenize().unwrap_err();
        assert_eq!(
            err,
            LexerError::UnmatchedLoopBegin {
                position: Position {
                    offset: 0,
                    line: 1,
                    column: 1
                }
            }
        );
    }

    #[test]
    fn unmatched_loop_begin_names_the_earliest() {
        let err = Lexer::new("+[ [ [] ").tokenize().unwrap_err();
        assert!(matches!(err, LexerError::UnmatchedLoopBegin { .. }));
        assert_eq!(err.position().offset, 1);
    }

    #[test]
    fn unmatched_loop_end() {
        let err = Lexer::new("[]]").tokenize().unwrap_err();
        assert_eq!(
            err,
            LexerError::UnmatchedLoopEnd {
                position: Position {
                    offset: 2,
                    line: 1,
                    column: 3
                }
            }
        );
        assert!(matches!(
            Lexer::new("][").tokenize(),
            Err(LexerError::UnmatchedLoopEnd { .. })
        ));
    }

    #[test]
    fn display_round_trips_commands() {
        let stream = Lexer::new("a [->+<] b .").tokenize().unwrap();
        assert_eq!(stream.to_string(), "[->+<].");
    }
}
