use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;

use super::InputError;
use crate::core::config::{MAX_REDIRECTIONS, TOKEN_CAPACITY};

pub const COMMAND_DELIMITER: u8 = b' ';
pub const PATH_DELIMITER: u8 = b':';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub fn symbol(self) -> char {
        match self {
            Direction::Input => '<',
            Direction::Output => '>',
        }
    }

    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'<' => Some(Direction::Input),
            b'>' => Some(Direction::Output),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Redirection {
    #[default]
    None,
    Input(OsString),
    Output(OsString),
    /// Always `(input, output)`, whichever symbol came first on the line.
    Both { input: OsString, output: OsString },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    pub argv: Vec<OsString>,
    pub redirection: Redirection,
}

impl CommandLine {
    pub fn program(&self) -> Option<&OsStr> {
        self.argv.first().map(OsString::as_os_str).filter(|name| !name.is_empty())
    }

    pub fn args(&self) -> &[OsString] {
        self.argv.get(1..).unwrap_or_default()
    }
}

#[derive(Debug)]
enum Item {
    Word(OsString),
    Symbol(Direction),
}

/// Splits raw bytes into words on a delimiter byte plus tab and newline.
///
/// In command mode `<` and `>` also end a word and are turned into
/// redirection requests; the word following each symbol becomes its target.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    delimiter: u8,
    redirections: bool,
}

impl Tokenizer {
    pub fn for_commands() -> Self {
        Self {
            delimiter: COMMAND_DELIMITER,
            redirections: true,
        }
    }

    pub fn for_search_path() -> Self {
        Self {
            delimiter: PATH_DELIMITER,
            redirections: false,
        }
    }

    fn is_separator(&self, byte: u8) -> bool {
        byte == self.delimiter || byte == b'\t' || byte == b'\n'
    }

    fn symbol(&self, byte: u8) -> Option<Direction> {
        if self.redirections {
            Direction::from_byte(byte)
        } else {
            None
        }
    }

    fn scan(&self, text: &OsStr) -> Result<Vec<Item>, InputError> {
        let bytes = text.as_bytes();
        let mut items = Vec::new();
        let mut words = 0;
        let mut symbols = 0;
        let mut pos = 0;

        while pos < bytes.len() {
            while pos < bytes.len() && self.is_separator(bytes[pos]) {
                pos += 1;
            }

            let start = pos;
            while pos < bytes.len()
                && !self.is_separator(bytes[pos])
                && self.symbol(bytes[pos]).is_none()
            {
                pos += 1;
            }

            if pos > start {
                words += 1;
                if words >= TOKEN_CAPACITY {
                    return Err(InputError::TooManyTokens);
                }
                items.push(Item::Word(OsStr::from_bytes(&bytes[start..pos]).to_os_string()));
            }

            if let Some(direction) = bytes.get(pos).and_then(|&byte| self.symbol(byte)) {
                symbols += 1;
                if symbols > MAX_REDIRECTIONS {
                    return Err(InputError::TooManyRedirections);
                }
                items.push(Item::Symbol(direction));
                pos += 1;
            }
        }

        Ok(items)
    }

    /// Plain word splitting, as used for the search path.
    pub fn split(&self, text: impl AsRef<OsStr>) -> Result<Vec<OsString>, InputError> {
        Ok(self
            .scan(text.as_ref())?
            .into_iter()
            .filter_map(|item| match item {
                Item::Word(word) => Some(word),
                Item::Symbol(_) => None,
            })
            .collect())
    }

    /// Words are kept as raw bytes; nothing is decoded.
    pub fn tokenize(&self, line: impl AsRef<OsStr>) -> Result<CommandLine, InputError> {
        let mut argv = Vec::new();
        let mut input = None;
        let mut output = None;

        let mut items = self.scan(line.as_ref())?.into_iter();
        while let Some(item) = items.next() {
            match item {
                Item::Word(word) => argv.push(word),
                Item::Symbol(direction) => {
                    let Some(Item::Word(target)) = items.next() else {
                        return Err(InputError::MissingRedirectTarget(direction));
                    };
                    let slot = match direction {
                        Direction::Input => &mut input,
                        Direction::Output => &mut output,
                    };
                    if slot.replace(target).is_some() {
                        return Err(InputError::ConflictingRedirection(direction));
                    }
                }
            }
        }

        let redirection = match (input, output) {
            (None, None) => Redirection::None,
            (Some(input), None) => Redirection::Input(input),
            (None, Some(output)) => Redirection::Output(output),
            (Some(input), Some(output)) => Redirection::Both { input, output },
        };

        Ok(CommandLine { argv, redirection })
    }
}
