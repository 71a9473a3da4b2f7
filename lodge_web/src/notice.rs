use lodge_core::service::{
    calendar::AttendanceOutcome,
    education::{EnrollOutcome, LeaveOutcome},
};
use serde::Deserialize;

/// One-shot message shown after a redirect, carried as `?notice=<code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Enrolled,
    AlreadyEnrolled,
    CourseFull,
    Left,
    NotEnrolled,
    Confirmed,
    Cancelled,
    EventFull,
    Sent,
    ProfileSaved,
}

impl Notice {
    const ALL: [Notice; 10] = [
        Notice::Enrolled,
        Notice::AlreadyEnrolled,
        Notice::CourseFull,
        Notice::Left,
        Notice::NotEnrolled,
        Notice::Confirmed,
        Notice::Cancelled,
        Notice::EventFull,
        Notice::Sent,
        Notice::ProfileSaved,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Notice::Enrolled => "enrolled",
            Notice::AlreadyEnrolled => "already-enrolled",
            Notice::CourseFull => "course-full",
            Notice::Left => "left",
            Notice::NotEnrolled => "not-enrolled",
            Notice::Confirmed => "confirmed",
            Notice::Cancelled => "cancelled",
            Notice::EventFull => "event-full",
            Notice::Sent => "sent",
            Notice::ProfileSaved => "profile-saved",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|notice| notice.code() == code)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::Enrolled => "Te has inscrito exitosamente al curso",
            Notice::AlreadyEnrolled => "Ya estás inscrito en este curso",
            Notice::CourseFull => "El curso ha alcanzado su cupo máximo",
            Notice::Left => "Has cancelado tu inscripción al curso",
            Notice::NotEnrolled => "No estabas inscrito en este curso",
            Notice::Confirmed => "¡Asistencia confirmada!",
            Notice::Cancelled => "Has cancelado tu asistencia",
            Notice::EventFull => "El evento ha alcanzado su cupo máximo",
            Notice::Sent => "Tu mensaje ha sido enviado. Te contactaremos pronto.",
            Notice::ProfileSaved => "Tu perfil ha sido actualizado",
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Notice::AlreadyEnrolled | Notice::CourseFull | Notice::NotEnrolled | Notice::EventFull
        )
    }

    /// `path` with this notice appended as the query string.
    pub fn redirect_to(&self, path: &str) -> String {
        format!("{path}?notice={}", self.code())
    }
}

impl From<EnrollOutcome> for Notice {
    fn from(outcome: EnrollOutcome) -> Self {
        match outcome {
            EnrollOutcome::Enrolled => Notice::Enrolled,
            EnrollOutcome::AlreadyEnrolled => Notice::AlreadyEnrolled,
            EnrollOutcome::CourseFull => Notice::CourseFull,
        }
    }
}

impl From<LeaveOutcome> for Notice {
    fn from(outcome: LeaveOutcome) -> Self {
        match outcome {
            LeaveOutcome::Left => Notice::Left,
            LeaveOutcome::NotEnrolled => Notice::NotEnrolled,
        }
    }
}

impl From<AttendanceOutcome> for Notice {
    fn from(outcome: AttendanceOutcome) -> Self {
        match outcome {
            AttendanceOutcome::Confirmed => Notice::Confirmed,
            AttendanceOutcome::Cancelled => Notice::Cancelled,
            AttendanceOutcome::EventFull => Notice::EventFull,
        }
    }
}

/// Query string of pages that can show a notice. Unknown codes are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    notice: Option<String>,
}

impl NoticeQuery {
    pub fn notice(&self) -> Option<Notice> {
        self.notice.as_deref().and_then(Notice::from_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for notice in Notice::ALL {
            assert_eq!(Notice::from_code(notice.code()), Some(notice));
        }
        assert_eq!(Notice::from_code("bogus"), None);
    }

    #[test]
    fn test_outcomes_map_to_notices() {
        assert_eq!(
            Notice::from(EnrollOutcome::CourseFull).redirect_to("/education/course/intro/"),
            "/education/course/intro/?notice=course-full"
        );
        assert_eq!(Notice::from(AttendanceOutcome::Cancelled), Notice::Cancelled);
        assert!(Notice::from(LeaveOutcome::NotEnrolled).is_warning());
    }
}
