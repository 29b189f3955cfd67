//! Line-oriented command parsing.
//!
//! One command per line. Words are separated by whitespace and matched
//! case-insensitively.
//!
//! | Line                  | Meaning                           |
//! |-----------------------|-----------------------------------|
//! | `tap`                 | tap the scene's main element      |
//! | `swipe <dx> <dy>`     | finished drag, in pixels          |
//! | `continue`            | gallery continue control          |
//! | `open <id>`           | enlarge a gallery photo           |
//! | `close`               | close the enlarged photo          |
//! | `video-ended`         | the reveal video finished         |
//! | `dismiss`             | close the reveal video            |
//! | `skip`                | the cake's fallback control       |
//! | `status`              | print the sequencer view          |
//! | `quit`                | tear down and exit                |

use keepsake_scenes::domain::signals::SceneInput;
use thiserror::Error;

/// A parsed console line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsoleCommand {
    /// Deliver input to the narrative.
    Input(SceneInput),
    /// Print the sequencer view.
    Status,
    /// Stop the host.
    Quit,
}

/// Reasons a console line is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line holds only whitespace.
    #[error("empty command")]
    Empty,

    /// The first word is not a known command.
    #[error("unknown command: {0}")]
    Unknown(String),

    /// A command's arguments are missing or malformed.
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parses one console line.
///
/// # Errors
///
/// Returns `ParseError` if the line is empty, names an unknown command or
/// carries malformed arguments.
pub fn parse_command(line: &str) -> Result<ConsoleCommand, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(ParseError::Empty);
    };
    let args: Vec<&str> = words.collect();

    let input = match head.to_ascii_lowercase().as_str() {
        "tap" => SceneInput::Tap,
        "swipe" => {
            const USAGE: &str = "swipe <dx> <dy>";
            let [dx, dy] = args.as_slice() else {
                return Err(ParseError::Usage(USAGE));
            };
            SceneInput::Swipe {
                dx: dx.parse().map_err(|_| ParseError::Usage(USAGE))?,
                dy: dy.parse().map_err(|_| ParseError::Usage(USAGE))?,
            }
        }
        "continue" => SceneInput::Continue,
        "open" => {
            const USAGE: &str = "open <photo id>";
            let [id] = args.as_slice() else {
                return Err(ParseError::Usage(USAGE));
            };
            SceneInput::OpenPhoto {
                id: id.parse().map_err(|_| ParseError::Usage(USAGE))?,
            }
        }
        "close" => SceneInput::ClosePhoto,
        "video-ended" => SceneInput::VideoEnded,
        "dismiss" => SceneInput::DismissVideo,
        "skip" => SceneInput::ManualAdvance,
        "status" => return Ok(ConsoleCommand::Status),
        "quit" | "exit" => return Ok(ConsoleCommand::Quit),
        other => return Err(ParseError::Unknown(other.to_owned())),
    };
    Ok(ConsoleCommand::Input(input))
}
