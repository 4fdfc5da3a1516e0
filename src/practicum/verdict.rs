//! Homework statuses and the messages rendered for them.

use std::fmt;
use std::str::FromStr;

use super::{HomeworkError, HomeworkRecord};

/// Key holding the homework name inside a record.
const NAME_KEY: &str = "homework_name";

/// Key holding the review status inside a record.
const STATUS_KEY: &str = "status";

/// Review status of a homework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    /// Picked up by a reviewer.
    Reviewing,
    /// Accepted.
    Approved,
    /// Returned with remarks.
    Rejected,
}

impl HomeworkStatus {
    /// Human-readable verdict sent to the chat.
    #[must_use]
    pub const fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }

    /// Status as spelled by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reviewing => "reviewing",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = HomeworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reviewing" => Ok(Self::Reviewing),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(HomeworkError::UnknownStatus(other.to_owned())),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of one named homework, ready to be announced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Homework name as reported by the API.
    pub homework_name: String,

    /// Current review status.
    pub status: HomeworkStatus,
}

impl Verdict {
    /// Renders the chat message for this verdict.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.homework_name,
            self.status.verdict()
        )
    }
}

/// Extracts the verdict of a single homework record.
///
/// # Errors
///
/// Returns [`HomeworkError::Schema`] if `homework_name` or `status` is
/// missing or not a string, and [`HomeworkError::UnknownStatus`] if the
/// status is not one of `reviewing`, `approved`, `rejected`.
pub fn extract_verdict(record: &HomeworkRecord) -> Result<Verdict, HomeworkError> {
    let homework_name = required_str(record, NAME_KEY)?;
    let status: HomeworkStatus = required_str(record, STATUS_KEY)?.parse()?;

    Ok(Verdict {
        homework_name: homework_name.to_owned(),
        status,
    })
}

fn required_str<'a>(record: &'a HomeworkRecord, key: &str) -> Result<&'a str, HomeworkError> {
    record.str_field(key).ok_or_else(|| {
        if record.has_field(key) {
            HomeworkError::schema(format!("homework field `{key}` must be a string"))
        } else {
            HomeworkError::schema(format!("homework is missing `{key}`"))
        }
    })
}
