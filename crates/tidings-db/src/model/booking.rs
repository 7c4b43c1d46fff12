use diesel::{pg::Pg, prelude::*};

use crate::db::enums::{BookingStatusColumn, EmploymentStatusColumn, GenderColumn};
use crate::db::schema;

/// Stored event registration
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::booking)]
#[diesel(check_for_backend(Pg))]
pub struct BookingRow {
    pub id: uuid::Uuid,
    pub event_id: uuid::Uuid,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub location: String,
    pub gender: GenderColumn,
    pub education_background: String,
    pub employment_status: EmploymentStatusColumn,
    pub expectation: String,
    pub status: BookingStatusColumn,
    pub booking_date: chrono::DateTime<chrono::Utc>,
}

/// Insert struct for creating registrations
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::booking)]
pub struct NewBookingRow<'a> {
    pub id: uuid::Uuid,
    pub event_id: uuid::Uuid,
    pub full_name: &'a str,
    pub email: &'a str,
    pub mobile_number: &'a str,
    pub location: &'a str,
    pub gender: GenderColumn,
    pub education_background: &'a str,
    pub employment_status: EmploymentStatusColumn,
    pub expectation: &'a str,
    pub status: BookingStatusColumn,
    pub booking_date: chrono::DateTime<chrono::Utc>,
}
