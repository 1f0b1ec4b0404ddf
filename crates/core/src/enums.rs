//! Closed string enumerations used across the program tree.
//!
//! Each enum maps to a TEXT column. Parsing trims and matches
//! case-insensitively; anything outside the closed set is a
//! [`CoreError::InvalidEnumValue`], never a silent default. The `from_db`
//! constructors are the one exception: they decode nullable storage values
//! and fall back to the documented default for NULL.

use crate::error::CoreError;

macro_rules! define_str_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal, default = $default:ident {
            $( $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            /// All members of the closed set.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Canonical string form as stored in the database.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            /// Parse API input. Trims whitespace and matches
            /// case-insensitively; unknown values are rejected.
            pub fn parse(input: &str) -> Result<Self, CoreError> {
                let trimmed = input.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($text) {
                        return Ok($name::$variant);
                    }
                )+
                Err(CoreError::InvalidEnumValue {
                    kind: $kind,
                    value: input.to_string(),
                })
            }

            /// Decode a nullable storage value. NULL falls back to the
            /// fixed default; a non-NULL value outside the set is still an
            /// error (the column is application-written).
            pub fn from_db(value: Option<&str>) -> Result<Self, CoreError> {
                match value {
                    None => Ok($name::$default),
                    Some(s) => Self::parse(s),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_str_enum! {
    /// Kind of activity inside a level.
    ActivityType, "activity type", default = Activity {
        Activity => "Activity",
        MiniGame => "MiniGame",
        Challenge => "Challenge",
    }
}

define_str_enum! {
    /// Weekday on which an activity repeats.
    WeekDay, "weekday", default = Monday {
        Monday => "monday",
        Tuesday => "tuesday",
        Wednesday => "wednesday",
        Thursday => "thursday",
        Friday => "friday",
        Saturday => "saturday",
        Sunday => "sunday",
    }
}

define_str_enum! {
    /// Per-activity participation status recorded for enrolled users.
    ParticipationStatus, "participation status", default = Pending {
        Pending => "pending",
        Complete => "complete",
        Skip => "skip",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn activity_type_parses_canonical_forms() {
        assert_eq!(ActivityType::parse("Activity").unwrap(), ActivityType::Activity);
        assert_eq!(ActivityType::parse("MiniGame").unwrap(), ActivityType::MiniGame);
        assert_eq!(ActivityType::parse("Challenge").unwrap(), ActivityType::Challenge);
    }

    #[test]
    fn activity_type_parse_is_case_insensitive_and_trimmed() {
        // Case-insensitive parsing is a deliberate change from the
        // original case-sensitive behaviour.
        assert_eq!(ActivityType::parse("minigame").unwrap(), ActivityType::MiniGame);
        assert_eq!(ActivityType::parse("  challenge ").unwrap(), ActivityType::Challenge);
    }

    #[test]
    fn activity_type_rejects_unknown_values() {
        assert_matches!(
            ActivityType::parse("Yoga"),
            Err(CoreError::InvalidEnumValue { kind: "activity type", ref value }) if value == "Yoga"
        );
        assert_matches!(ActivityType::parse(""), Err(CoreError::InvalidEnumValue { .. }));
    }

    #[test]
    fn weekday_parses_all_seven() {
        for day in WeekDay::ALL {
            assert_eq!(WeekDay::parse(day.as_str()).unwrap(), *day);
        }
        assert_eq!(WeekDay::parse("WEDNESDAY").unwrap(), WeekDay::Wednesday);
    }

    #[test]
    fn weekday_rejects_unknown_values() {
        assert_matches!(WeekDay::parse("someday"), Err(CoreError::InvalidEnumValue { .. }));
    }

    #[test]
    fn from_db_defaults_on_null_only() {
        assert_eq!(ActivityType::from_db(None).unwrap(), ActivityType::Activity);
        assert_eq!(WeekDay::from_db(None).unwrap(), WeekDay::Monday);
        assert_eq!(ParticipationStatus::from_db(None).unwrap(), ParticipationStatus::Pending);
        assert_matches!(ActivityType::from_db(Some("Yoga")), Err(_));
    }

    #[test]
    fn display_matches_stored_form() {
        assert_eq!(ActivityType::MiniGame.to_string(), "MiniGame");
        assert_eq!(WeekDay::Sunday.to_string(), "sunday");
    }
}
