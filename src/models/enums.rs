use serde::{Deserialize, Serialize};

/// A string did not match any variant of a wire enum.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

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
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

// The backend rejects anything else on note creation.
str_enum!(NoteType {
    DoctorNote => "doctor_note",
    NurseNote => "nurse_note",
});

str_enum!(RiskLevel {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(TaskPriority {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(TaskStatus {
    Pending => "pending",
    Completed => "completed",
});
