use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Attendance status for one student on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// In class.
    #[default]
    Present,
    /// Missing.
    Absent,
    /// Arrived late.
    Late,
}

impl AttendanceStatus {
    /// The status a toggle moves to. Late counts as not-absent.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Present => Self::Absent,
            Self::Absent | Self::Late => Self::Present,
        }
    }

    /// Lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
        }
    }
}

impl Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "late" => Ok(Self::Late),
            other => Err(crate::Error::validation(
                "status",
                format!("expected present, absent or late, got '{other}'"),
            )),
        }
    }
}

/// One row of the daily register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// The student's id.
    pub student_id: String,
    /// The student's name at the time the register was built.
    pub student_name: String,
    /// Today's status.
    pub status: AttendanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(AttendanceStatus::Present.toggled(), AttendanceStatus::Absent);
        assert_eq!(AttendanceStatus::Absent.toggled(), AttendanceStatus::Present);
        assert_eq!(AttendanceStatus::Late.toggled(), AttendanceStatus::Present);
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(
            "LATE".parse::<AttendanceStatus>().unwrap(),
            AttendanceStatus::Late
        );
        assert!("excused".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn test_record_serialization() {
        let record = AttendanceRecord {
            student_id: "1".to_string(),
            student_name: "Alice Johnson".to_string(),
            status: AttendanceStatus::Absent,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["studentId"], "1");
        assert_eq!(json["studentName"], "Alice Johnson");
        assert_eq!(json["status"], "absent");
    }
}
