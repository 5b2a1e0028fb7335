use chrono::NaiveTime;

use crate::config::TimeFormat;
use crate::models::{Session, SessionStatus};

/// Today's sessions split by status, in source order
#[derive(Debug, Clone, Default)]
pub struct SessionBoard<'a> {
    pub upcoming: Vec<&'a Session>,
    pub completed: Vec<&'a Session>,
    /// Cancelled and no-show sessions
    pub other: Vec<&'a Session>,
}

impl<'a> SessionBoard<'a> {
    pub fn new(sessions: &'a [Session]) -> Self {
        let mut board = Self::default();

        for session in sessions {
            match session.status {
                SessionStatus::Scheduled => board.upcoming.push(session),
                SessionStatus::Completed => board.completed.push(session),
                SessionStatus::Cancelled | SessionStatus::NoShow => board.other.push(session),
            }
        }

        board
    }

    /// Partition, then order each list by start time
    pub fn sorted_by_time(sessions: &'a [Session]) -> Self {
        let mut board = Self::new(sessions);
        for list in [&mut board.upcoming, &mut board.completed, &mut board.other] {
            // Stable, unparseable times last
            list.sort_by_key(|s| match parse_time(&s.scheduled_time) {
                Some(time) => (false, time),
                None => (true, NaiveTime::MIN),
            });
        }
        board
    }

    pub fn total(&self) -> usize {
        self.upcoming.len() + self.completed.len() + self.other.len()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Sessions not yet completed, cancelled ones included
    pub fn remaining(&self) -> usize {
        self.total() - self.completed_count()
    }

    /// `completed/total`
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.completed_count(), self.total())
    }

    /// Share of closed sessions that were completed, as a percentage
    pub fn completion_rate(&self) -> Option<u32> {
        let closed = self.completed.len() + self.other.len();
        if closed == 0 {
            return None;
        }
        let rate = self.completed.len() as f64 / closed as f64 * 100.0;
        Some(rate.round() as u32)
    }
}

/// Parse `HH:MM` or `HH:MM:SS`
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let parts: Vec<&str> = raw.trim().split(':').collect();

    match parts.as_slice() {
        [hours, minutes] => NaiveTime::from_hms_opt(field(hours)?, field(minutes)?, 0),
        [hours, minutes, seconds] => {
            NaiveTime::from_hms_opt(field(hours)?, field(minutes)?, field(seconds)?)
        }
        _ => None,
    }
}

/// One or two ASCII digits, no sign
fn field(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Display form of a session time; unparseable input is returned as-is
pub fn format_time(raw: &str, format: TimeFormat) -> String {
    match parse_time(raw) {
        Some(time) => match format {
            TimeFormat::TwelveHour => time.format("%-I:%M %p").to_string(),
            TimeFormat::TwentyFourHour => time.format("%H:%M").to_string(),
        },
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str, time: &str, status: SessionStatus) -> Session {
        Session {
            id: id.to_string(),
            scheduled_time: time.to_string(),
            duration_minutes: 45,
            status,
            session_type: "Strength".to_string(),
            location: None,
            client: None,
        }
    }

    #[test]
    fn test_partition_preserves_source_order() {
        let sessions = vec![
            session("a", "15:00", SessionStatus::Scheduled),
            session("b", "08:00", SessionStatus::Completed),
            session("c", "09:00", SessionStatus::Scheduled),
            session("d", "10:00", SessionStatus::NoShow),
            session("e", "11:00", SessionStatus::Cancelled),
        ];

        let board = SessionBoard::new(&sessions);
        let ids = |list: &[&Session]| list.iter().map(|s| s.id.clone()).collect::<Vec<_>>();

        assert_eq!(ids(&board.upcoming), vec!["a", "c"]);
        assert_eq!(ids(&board.completed), vec!["b"]);
        assert_eq!(ids(&board.other), vec!["d", "e"]);
        assert_eq!(board.progress_label(), "1/5");
        assert_eq!(board.remaining(), 4);
    }

    #[test]
    fn test_sorted_by_time_is_opt_in() {
        let sessions = vec![
            session("late", "15:00", SessionStatus::Scheduled),
            session("broken", "soon", SessionStatus::Scheduled),
            session("early", "07:30:00", SessionStatus::Scheduled),
        ];

        let board = SessionBoard::sorted_by_time(&sessions);
        let ids: Vec<_> = board.upcoming.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late", "broken"]);
    }

    #[test]
    fn test_completion_rate() {
        let empty: Vec<Session> = Vec::new();
        assert_eq!(SessionBoard::new(&empty).completion_rate(), None);

        let sessions = vec![
            session("a", "08:00", SessionStatus::Completed),
            session("b", "09:00", SessionStatus::Completed),
            session("c", "10:00", SessionStatus::NoShow),
            session("d", "11:00", SessionStatus::Scheduled),
        ];
        assert_eq!(SessionBoard::new(&sessions).completion_rate(), Some(67));
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("14:05", TimeFormat::TwelveHour), "2:05 PM");
        assert_eq!(format_time("00:30", TimeFormat::TwelveHour), "12:30 AM");
        assert_eq!(format_time("12:00:00", TimeFormat::TwelveHour), "12:00 PM");
        assert_eq!(format_time("9:15", TimeFormat::TwentyFourHour), "09:15");
        assert_eq!(format_time("tbd", TimeFormat::TwelveHour), "tbd");
        assert_eq!(format_time("25:00", TimeFormat::TwelveHour), "25:00");
    }

    #[test]
    fn test_parse_time_rejects_malformed_input() {
        assert_eq!(parse_time("07:30:15"), NaiveTime::from_hms_opt(7, 30, 15));
        assert_eq!(parse_time(" 9:05 "), NaiveTime::from_hms_opt(9, 5, 0));

        for raw in ["10:30:zz:99", "10:30:zz", "+9:00", "9:-5", "10:30:75", "100:00", "10:", ":30", "1030"] {
            assert_eq!(parse_time(raw), None, "{} should not parse", raw);
        }
    }
}
