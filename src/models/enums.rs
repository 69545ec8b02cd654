use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Mood {
    VerySad => "very_sad",
    Sad => "sad",
    Neutral => "neutral",
    Happy => "happy",
    VeryHappy => "very_happy",
});

str_enum!(TestKind {
    Spiral => "spiral",
    Wave => "wave",
});

str_enum!(RiskLabel {
    AtRisk => "at_risk",
    NotAtRisk => "not_at_risk",
});

impl Mood {
    /// Ordinal scale used by the journal (0 = very sad .. 4 = very happy).
    pub fn index(&self) -> u8 {
        match self {
            Mood::VerySad => 0,
            Mood::Sad => 1,
            Mood::Neutral => 2,
            Mood::Happy => 3,
            Mood::VeryHappy => 4,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Mood::VerySad),
            1 => Some(Mood::Sad),
            2 => Some(Mood::Neutral),
            3 => Some(Mood::Happy),
            4 => Some(Mood::VeryHappy),
            _ => None,
        }
    }

    /// Display label for the mood picker and detail views.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::VerySad => "Very Sad",
            Mood::Sad => "Sad",
            Mood::Neutral => "Neutral",
            Mood::Happy => "Happy",
            Mood::VeryHappy => "Very Happy",
        }
    }
}
