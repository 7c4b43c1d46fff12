//! Database enum types with Diesel serialization.
//!
//! Each enum mirrors a domain enum from `tidings-core`, maps to a `TEXT` column
//! guarded by a CHECK constraint, and converts to and from the domain type.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use std::io::Write;

use tidings_core::types::{BookingStatus, EmploymentStatus, Gender, LifecycleFlag};

macro_rules! text_column {
    ($(#[$meta:meta])* $name:ident => $domain:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow)]
        #[diesel(sql_type = Text)]
        pub enum $name {
            $($variant),+
        }

        impl From<$domain> for $name {
            fn from(value: $domain) -> Self {
                match value {
                    $($domain::$variant => Self::$variant),+
                }
            }
        }

        impl From<$name> for $domain {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => Self::$variant),+
                }
            }
        }

        impl $name {
            /// Returns the database string representation.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                $domain::from(self).as_str()
            }
        }

        impl ToSql<Text, Pg> for $name {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                out.write_all(self.as_str().as_bytes())?;
                Ok(IsNull::No)
            }
        }

        impl FromSql<Text, Pg> for $name {
            fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
                let text = std::str::from_utf8(bytes.as_bytes())?;
                text.parse::<$domain>().map(Self::from).map_err(Into::into)
            }
        }
    };
}

text_column!(
    /// Maps to `event.lifecycle`.
    LifecycleColumn => LifecycleFlag { ComingSoon, PastEvent }
);

text_column!(
    /// Maps to `booking.status`.
    BookingStatusColumn => BookingStatus { Pending, Confirmed, Cancelled }
);

text_column!(
    /// Maps to `booking.gender`.
    GenderColumn => Gender { Male, Female }
);

text_column!(
    /// Maps to `booking.employment_status`.
    EmploymentStatusColumn => EmploymentStatus { Employed, Unemployed }
);
