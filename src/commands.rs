//! Line commands typed by the operator at the console.

use std::str::FromStr;

use thiserror::Error;

use crate::state::{form::PlayType, game::ScoreSide};

/// One parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the form of a play type.
    Open(PlayType),
    SpecialTeams,
    Cancel,
    /// Flip a toggle or select a radio member.
    Toggle(String),
    /// Set a player, number or text field.
    Set { field: String, value: String },
    QuickYards(i32),
    /// Pick a penalty by its catalog index.
    Penalty(usize),
    Submit,
    Undo,
    /// Ask for a new score for one side.
    Score(ScoreSide),
    /// Ask for a new quarter.
    Quarter,
    Refresh,
    Show,
    Help,
    Quit,
}

/// Why a console line could not be parsed into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    /// First word is not a command or play type.
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("`{command}`: invalid {argument} `{raw}`")]
    InvalidArgument {
        command: &'static str,
        argument: &'static str,
        raw: String,
    },
}

/// Shown by `help`.
pub const HELP: &str = "\
commands:
  run | pass | penalty          open an offense form
  st                            special teams menu (kickoff, punt, fg, xp)
  kickoff | punt | fg | xp      open a special teams form
  toggle <field>                flip a toggle or pick a radio option
  set <field> <value>           set a player id, number or note
  yards <n>                     quick yards into the form's yardage field
  pick <n>                      choose a penalty from the list
  submit                        record the open form
  undo                          remove the last recorded play
  score team | score opp        correct a score
  quarter                       correct the quarter
  refresh                       reload recent plays
  show | help | quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();

        let command = match head.as_str() {
            "st" | "special" => Command::SpecialTeams,
            "fg" => Command::Open(PlayType::FieldGoal),
            "xp" | "pat" => Command::Open(PlayType::ExtraPoint),
            "cancel" | "back" => Command::Cancel,
            "toggle" | "t" => Command::Toggle(required(words.next(), "toggle", "a field")?.into()),
            "set" => {
                let field = required(words.next(), "set", "a field")?.to_string();
                let value = words.collect::<Vec<_>>().join(" ");
                Command::Set { field, value }
            }
            "yards" | "y" => Command::QuickYards(parsed(words.next(), "yards", "yardage")?),
            "pick" => Command::Penalty(parsed(words.next(), "pick", "penalty index")?),
            "submit" | "s" => Command::Submit,
            "undo" => Command::Undo,
            "score" => match required(words.next(), "score", "a side (team or opp)")? {
                "team" | "us" => Command::Score(ScoreSide::Team),
                "opp" | "opponent" | "them" => Command::Score(ScoreSide::Opponent),
                other => {
                    return Err(CommandError::InvalidArgument {
                        command: "score",
                        argument: "side",
                        raw: other.to_string(),
                    });
                }
            },
            "quarter" | "q" => Command::Quarter,
            "refresh" => Command::Refresh,
            "show" | "ls" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => other
                .parse::<PlayType>()
                .map(Command::Open)
                .map_err(|_| CommandError::Unknown(other.to_string()))?,
        };
        Ok(command)
    }
}

fn required<'a>(
    word: Option<&'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    word.ok_or(CommandError::MissingArgument { command, argument })
}

fn parsed<T: FromStr>(
    word: Option<&str>,
    command: &'static str,
    argument: &'static str,
) -> Result<T, CommandError> {
    let raw = required(word, command, argument)?;
    raw.parse().map_err(|_| CommandError::InvalidArgument {
        command,
        argument,
        raw: raw.to_string(),
    })
}
