//! In-memory collaborator implementations: email, gateway, directory,
//! file storage.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{
    CounselorProfile, CreateOrderRequest, EmailError, EmailMessage, EmailSender, FileStorage,
    GatewayError, GatewayOrder, PaymentGateway, StoredFile, UserContact, UserDirectory,
};

/// Email sender that records every message instead of delivering it.
pub struct RecordingEmailSender {
    pub sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for RecordingEmailSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Payment gateway that mints sequential order ids locally.
pub struct MockPaymentGateway {
    pub orders: Mutex<Vec<CreateOrderRequest>>,
    pub fail: bool,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

impl Default for MockPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<GatewayOrder, GatewayError> {
        if self.fail {
            return Err(GatewayError::Unreachable("simulated outage".to_string()));
        }
        let mut orders = self.orders.lock().unwrap();
        let order = GatewayOrder {
            order_id: format!("order_{}", orders.len() + 1),
            amount_minor: request.amount_minor,
            currency: request.currency.clone(),
        };
        orders.push(request);
        Ok(order)
    }
}

/// User directory backed by a fixed map.
pub struct StaticUserDirectory {
    pub counselors: HashMap<UserId, CounselorProfile>,
    pub contacts: HashMap<UserId, UserContact>,
}

impl StaticUserDirectory {
    pub fn new() -> Self {
        Self {
            counselors: HashMap::new(),
            contacts: HashMap::new(),
        }
    }

    /// Registers a counselor (and their contact entry) with a derived
    /// `{id}@example.com` address.
    pub fn with_counselor(mut self, id: &str, rate_minor: i64) -> Self {
        let user_id = UserId::new(id).expect("non-empty id");
        self.counselors.insert(
            user_id.clone(),
            CounselorProfile {
                id: user_id.clone(),
                name: format!("Counselor {}", id),
                email: format!("{}@example.com", id),
                hourly_rate_minor: rate_minor,
            },
        );
        self.with_contact(id)
    }

    /// Registers a plain contact entry.
    pub fn with_contact(mut self, id: &str) -> Self {
        let user_id = UserId::new(id).expect("non-empty id");
        self.contacts.insert(
            user_id.clone(),
            UserContact {
                id: user_id.clone(),
                name: format!("User {}", id),
                email: format!("{}@example.com", id),
            },
        );
        self
    }
}

impl Default for StaticUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for StaticUserDirectory {
    async fn find_counselor(
        &self,
        id: &UserId,
    ) -> Result<Option<CounselorProfile>, DomainError> {
        Ok(self.counselors.get(id).cloned())
    }

    async fn find_contact(&self, id: &UserId) -> Result<Option<UserContact>, DomainError> {
        Ok(self.contacts.get(id).cloned())
    }
}

/// File storage that derives URLs without touching the filesystem.
pub struct InMemoryFileStorage;

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn store(&self, file_name: &str, _bytes: Vec<u8>) -> Result<StoredFile, DomainError> {
        Ok(StoredFile {
            file_name: file_name.to_string(),
            file_url: format!("/uploads/{}", file_name),
        })
    }
}
