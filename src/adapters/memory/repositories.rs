//! In-memory repository implementations.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::appointment::{Appointment, AppointmentStatus};
use crate::domain::availability::{Availability, TimeOfDay};
use crate::domain::foundation::{AppointmentId, DomainError, ErrorCode, UserId};
use crate::domain::payment::PaymentRecord;
use crate::ports::{AppointmentRepository, AvailabilityRepository, PaymentRepository};

/// In-memory implementation of the AppointmentRepository port.
///
/// `insert` enforces the active-slot uniqueness rule the production schema
/// guarantees with a partial unique index. Failure toggles simulate storage
/// outages in tests.
pub struct InMemoryAppointmentRepository {
    pub appointments: Mutex<Vec<Appointment>>,
    pub fail_insert: bool,
    pub fail_update: bool,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self {
            appointments: Mutex::new(Vec::new()),
            fail_insert: false,
            fail_update: false,
        }
    }

    pub fn with_appointment(appointment: Appointment) -> Self {
        let repo = Self::new();
        repo.appointments.lock().unwrap().push(appointment);
        repo
    }

    pub fn failing_update() -> Self {
        Self {
            appointments: Mutex::new(Vec::new()),
            fail_insert: false,
            fail_update: true,
        }
    }

    pub fn stored(&self) -> Vec<Appointment> {
        self.appointments.lock().unwrap().clone()
    }
}

impl Default for InMemoryAppointmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn insert(&self, appointment: &Appointment) -> Result<(), DomainError> {
        if self.fail_insert {
            return Err(DomainError::database("simulated insert failure"));
        }
        let mut appointments = self.appointments.lock().unwrap();
        let collision = appointments.iter().any(|a| {
            a.status.holds_slot()
                && a.counselor_id == appointment.counselor_id
                && a.appointment_date == appointment.appointment_date
                && a.appointment_time == appointment.appointment_time
        });
        if collision {
            return Err(DomainError::new(
                ErrorCode::SlotConflict,
                "This time slot is already booked",
            ));
        }
        appointments.push(appointment.clone());
        Ok(())
    }

    async fn update(&self, appointment: &Appointment) -> Result<(), DomainError> {
        if self.fail_update {
            return Err(DomainError::database("simulated update failure"));
        }
        let mut appointments = self.appointments.lock().unwrap();
        match appointments.iter_mut().find(|a| a.id == appointment.id) {
            Some(existing) => {
                *existing = appointment.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::AppointmentNotFound,
                "Appointment not found",
            )),
        }
    }

    async fn find_by_id(&self, id: &AppointmentId) -> Result<Option<Appointment>, DomainError> {
        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.id == id)
            .cloned())
    }

    async fn slot_is_booked(
        &self,
        counselor_id: &UserId,
        date: NaiveDate,
        time: TimeOfDay,
    ) -> Result<bool, DomainError> {
        Ok(self.appointments.lock().unwrap().iter().any(|a| {
            a.status.holds_slot()
                && &a.counselor_id == counselor_id
                && a.appointment_date == date
                && a.appointment_time == time
        }))
    }

    async fn list_by_client(&self, client_id: &UserId) -> Result<Vec<Appointment>, DomainError> {
        let mut found: Vec<Appointment> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| &a.client_id == client_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.appointment_date.cmp(&a.appointment_date));
        Ok(found)
    }

    async fn list_by_counselor(
        &self,
        counselor_id: &UserId,
    ) -> Result<Vec<Appointment>, DomainError> {
        let mut found: Vec<Appointment> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| &a.counselor_id == counselor_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.appointment_date.cmp(&a.appointment_date));
        Ok(found)
    }

    async fn list_client_records(
        &self,
        counselor_id: &UserId,
        client_id: &UserId,
    ) -> Result<Vec<Appointment>, DomainError> {
        let mut found: Vec<Appointment> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| {
                &a.counselor_id == counselor_id
                    && &a.client_id == client_id
                    && matches!(
                        a.status,
                        AppointmentStatus::Confirmed | AppointmentStatus::Completed
                    )
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| b.appointment_date.cmp(&a.appointment_date));
        Ok(found)
    }
}

/// In-memory implementation of the AvailabilityRepository port.
pub struct InMemoryAvailabilityRepository {
    pub records: Mutex<Vec<Availability>>,
}

impl InMemoryAvailabilityRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn with_record(record: Availability) -> Self {
        let repo = Self::new();
        repo.records.lock().unwrap().push(record);
        repo
    }

    pub fn stored(&self) -> Vec<Availability> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for InMemoryAvailabilityRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AvailabilityRepository for InMemoryAvailabilityRepository {
    async fn find_by_counselor(
        &self,
        counselor_id: &UserId,
    ) -> Result<Option<Availability>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.counselor_id == counselor_id)
            .cloned())
    }

    async fn upsert(&self, availability: &Availability) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        match records
            .iter_mut()
            .find(|r| r.counselor_id == availability.counselor_id)
        {
            Some(existing) => *existing = availability.clone(),
            None => records.push(availability.clone()),
        }
        Ok(())
    }
}

/// In-memory implementation of the PaymentRepository port. Enforces order-id
/// uniqueness like the production schema.
pub struct InMemoryPaymentRepository {
    pub records: Mutex<Vec<PaymentRecord>>,
    pub fail_insert: bool,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_insert: false,
        }
    }

    pub fn with_record(record: PaymentRecord) -> Self {
        let repo = Self::new();
        repo.records.lock().unwrap().push(record);
        repo
    }

    pub fn stored(&self) -> Vec<PaymentRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for InMemoryPaymentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn insert(&self, record: &PaymentRecord) -> Result<(), DomainError> {
        if self.fail_insert {
            return Err(DomainError::database("simulated insert failure"));
        }
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.order_id == record.order_id) {
            return Err(DomainError::new(
                ErrorCode::DuplicateOrder,
                "A payment record already exists for this order",
            )
            .with_detail("order_id", record.order_id.clone()));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn update(&self, record: &PaymentRecord) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::PaymentNotFound,
                "Payment record not found",
            )),
        }
    }

    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.order_id == order_id)
            .cloned())
    }

    async fn find_by_appointment(
        &self,
        appointment_id: &AppointmentId,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.appointment_id == appointment_id)
            .cloned())
    }
}
