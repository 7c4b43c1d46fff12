//! Enumerations shared by records, filters and the store contract.
//!
//! Each enum has a stable lowercase string form used on the wire and in storage.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Generates `as_str`, `Display` and `FromStr` for a string-backed enum.
macro_rules! string_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(CoreError::InvalidInput(format!(
                        "unrecognized {}: '{other}'",
                        stringify!($name)
                    ))),
                }
            }
        }
    };
}

/// Which collection a merged feed entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    News,
    Event,
}

string_enum!(ContentType {
    News => "news",
    Event => "event",
});

/// Admin-assigned lifecycle of an event.
///
/// This is stored intent. Whether an event is still in the future is derived
/// separately, see [`crate::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleFlag {
    ComingSoon,
    PastEvent,
}

string_enum!(LifecycleFlag {
    ComingSoon => "coming_soon",
    PastEvent => "past_event",
});

/// Status of a booking. Every state is reachable from every other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

string_enum!(BookingStatus {
    Pending => "pending",
    Confirmed => "confirmed",
    Cancelled => "cancelled",
});

impl BookingStatus {
    /// Whether a booking in this status blocks a new registration for the same event and email.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

string_enum!(Gender {
    Male => "male",
    Female => "female",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmploymentStatus {
    Employed,
    Unemployed,
}

string_enum!(EmploymentStatus {
    Employed => "employed",
    Unemployed => "unemployed",
});

/// Category selector of the back-office content list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    All,
    News,
    Events,
    Upcoming,
    Past,
}

string_enum!(Category {
    All => "all",
    News => "news",
    Events => "events",
    Upcoming => "upcoming",
    Past => "past",
});
