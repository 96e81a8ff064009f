//! Health-record and appointment collections.
//!
//! Both are most-recent-first JSON arrays shared by every account on the
//! store: records carry no account id, and deleting an account leaves
//! them untouched.

use chrono::NaiveDate;

use crate::db::{keys, KeyValueStore, LocalStore};
use crate::models::{Appointment, HealthRecord};

/// Most appointments the dashboard shows as upcoming.
pub const UPCOMING_LIMIT: usize = 4;

pub struct RecordStore<'a, S: KeyValueStore> {
    store: &'a LocalStore<S>,
}

impl<'a, S: KeyValueStore> RecordStore<'a, S> {
    pub fn new(store: &'a LocalStore<S>) -> Self {
        Self { store }
    }

    pub fn append_health_record(&self, record: HealthRecord) {
        let id = record.id.clone();
        if self.store.prepend(keys::HEALTH_RECORDS, record) {
            tracing::info!(record_id = %id, "Health record saved");
        }
    }

    pub fn append_appointment(&self, appointment: Appointment) {
        let id = appointment.id.clone();
        if self.store.prepend(keys::APPOINTMENTS, appointment) {
            tracing::info!(appointment_id = %id, "Appointment saved");
        }
    }

    pub fn list_health_records(&self) -> Vec<HealthRecord> {
        self.store.read_list(keys::HEALTH_RECORDS)
    }

    pub fn list_appointments(&self) -> Vec<Appointment> {
        self.store.read_list(keys::APPOINTMENTS)
    }

    /// Up to `UPCOMING_LIMIT` appointments on or after `today`, in stored
    /// order.
    pub fn upcoming_appointments(&self, today: NaiveDate) -> Vec<Appointment> {
        self.list_appointments()
            .into_iter()
            .filter(|a| a.date >= today)
            .take(UPCOMING_LIMIT)
            .collect()
    }

    pub fn clear_health_records(&self) {
        if self.store.remove(keys::HEALTH_RECORDS) {
            tracing::info!("Health records cleared");
        }
    }

    pub fn clear_appointments(&self) {
        if self.store.remove(keys::APPOINTMENTS) {
            tracing::info!("Appointments cleared");
        }
    }
}
