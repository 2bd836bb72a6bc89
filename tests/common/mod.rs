#![allow(dead_code)]

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tix_sync::AppState;
use tix_sync::domain::error::ReconcileError;
use tix_sync::domain::id::OrderId;
use tix_sync::domain::oracle::{OracleStatus, StatusOracle};
use tix_sync::domain::signature::expected_signature;
use tix_sync::domain::status::CanonicalStatus;
use tix_sync::domain::money::Amount;
use tix_sync::domain::store::{InventoryRelease, NotificationLog, TicketStore};
use tix_sync::domain::ticket::{ReconcileCommand, ReconcileOutcome, TicketOrigin};
use tix_sync::services::reconcile::Reconciler;

pub const SERVER_KEY: &str = "test-server-key";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ReconcileError>> + Send + 'a>>;

// ── In-memory trait doubles ────────────────────────────────────────────────

/// What the in-memory store holds per order id.
#[derive(Debug, Clone)]
pub struct StoredTicket {
    pub order_id: OrderId,
    pub customer_name: String,
    pub event_id: String,
    pub event_name: Option<String>,
    pub quantity: i32,
    pub total_price: Amount,
    pub buyer_id: String,
    pub venue: Option<String>,
    pub status: CanonicalStatus,
    pub provider_status: Option<String>,
    pub origin: TicketOrigin,
    pub purchased_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ticket store double with the same apply semantics as the Postgres repo,
/// plus a mutation counter for idempotence assertions.
#[derive(Default)]
pub struct MemoryTicketStore {
    pub records: Mutex<HashMap<String, StoredTicket>>,
    pub writes: AtomicU32,
}

impl MemoryTicketStore {
    pub fn record(&self, order_id: &str) -> Option<StoredTicket> {
        self.records.lock().unwrap().get(order_id).cloned()
    }

    pub fn write_count(&self) -> u32 {
        self.writes.load(Ordering::SeqCst)
    }
}

impl TicketStore for MemoryTicketStore {
    fn apply(&self, cmd: ReconcileCommand) -> BoxFuture<'_, ReconcileOutcome> {
        Box::pin(async move {
            let mut records = self.records.lock().unwrap();
            let stored = records
                .get(cmd.order_id.as_str())
                .map(|r| r.status.clone());
            let outcome = match stored {
                None => match &cmd.create {
                    Some(new) => {
                        let now = Utc::now();
                        records.insert(
                            cmd.order_id.as_str().to_string(),
                            StoredTicket {
                                order_id: cmd.order_id.clone(),
                                customer_name: new.customer_name.clone(),
                                event_id: new.event_id.clone(),
                                event_name: new.event_name.clone(),
                                quantity: new.quantity,
                                total_price: new.total_price,
                                buyer_id: new.buyer_id.clone(),
                                venue: new.venue.clone(),
                                status: cmd.canonical.clone(),
                                provider_status: Some(cmd.raw_status.clone()),
                                origin: TicketOrigin::Webhook,
                                purchased_at: now,
                                updated_at: now,
                            },
                        );
                        self.writes.fetch_add(1, Ordering::SeqCst);
                        ReconcileOutcome::Created
                    }
                    None => ReconcileOutcome::NoRecord,
                },
                Some(status) if status == cmd.canonical => ReconcileOutcome::Unchanged,
                Some(from) => {
                    let existing = records
                        .get_mut(cmd.order_id.as_str())
                        .expect("record present");
                    existing.status = cmd.canonical.clone();
                    existing.provider_status = Some(cmd.raw_status.clone());
                    existing.updated_at = Utc::now();
                    self.writes.fetch_add(1, Ordering::SeqCst);
                    ReconcileOutcome::Updated { from }
                }
            };
            Ok(outcome)
        })
    }
}

/// Notification log double; can be told to fail so tests can check that a
/// log failure never changes the request outcome.
#[derive(Default)]
pub struct MemoryNotificationLog {
    pub entries: Mutex<Vec<(DateTime<Utc>, String)>>,
    pub fail: AtomicBool,
}

impl MemoryNotificationLog {
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn bodies(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(_, b)| b.clone())
            .collect()
    }
}

impl NotificationLog for MemoryNotificationLog {
    fn append(&self, received_at: DateTime<Utc>, raw_body: &str) -> BoxFuture<'_, ()> {
        let raw_body = raw_body.to_string();
        Box::pin(async move {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ReconcileError::Validation("log unavailable".into()));
            }
            self.entries.lock().unwrap().push((received_at, raw_body));
            Ok(())
        })
    }
}

/// Inventory double with marker-set semantics: `calls` counts invocations,
/// `performed` only grows on the first release per order.
#[derive(Default)]
pub struct MemoryInventory {
    pub released: Mutex<HashSet<String>>,
    pub calls: AtomicU32,
    pub performed: AtomicU32,
    pub fail: AtomicBool,
}

impl MemoryInventory {
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn performed_count(&self) -> u32 {
        self.performed.load(Ordering::SeqCst)
    }

    pub fn was_released(&self, order_id: &str) -> bool {
        self.released.lock().unwrap().contains(order_id)
    }
}

impl InventoryRelease for MemoryInventory {
    fn release(&self, order_id: &OrderId) -> BoxFuture<'_, ()> {
        let order_id = order_id.clone();
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(ReconcileError::Validation("inventory unavailable".into()));
            }
            if self
                .released
                .lock()
                .unwrap()
                .insert(order_id.as_str().to_string())
            {
                self.performed.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        })
    }
}

/// Oracle double returning a fixed transaction status, switchable mid-test.
/// Can also be told to fail or to hang forever (a never-answering provider).
pub struct FixedOracle {
    pub status: Mutex<String>,
    pub fail: AtomicBool,
    pub hang: AtomicBool,
}

impl FixedOracle {
    pub fn new(status: &str) -> Self {
        Self {
            status: Mutex::new(status.to_string()),
            fail: AtomicBool::new(false),
            hang: AtomicBool::new(false),
        }
    }

    pub fn set_status(&self, status: &str) {
        *self.status.lock().unwrap() = status.to_string();
    }
}

impl StatusOracle for FixedOracle {
    fn fetch_status(&self, order_id: &OrderId) -> BoxFuture<'_, OracleStatus> {
        let order_id = order_id.clone();
        Box::pin(async move {
            if self.hang.load(Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(ReconcileError::Upstream("oracle down".into()));
            }
            let transaction_status = self.status.lock().unwrap().clone();
            Ok(OracleStatus {
                payload: serde_json::json!({
                    "order_id": order_id.as_str(),
                    "transaction_status": transaction_status,
                }),
                transaction_status,
            })
        })
    }
}

// ── Fixtures ───────────────────────────────────────────────────────────────

pub struct TestHarness {
    pub store: Arc<MemoryTicketStore>,
    pub audit: Arc<MemoryNotificationLog>,
    pub inventory: Arc<MemoryInventory>,
    pub oracle: Arc<FixedOracle>,
    pub reconciler: Arc<Reconciler>,
}

impl TestHarness {
    pub fn new(oracle_status: &str) -> Self {
        let store = Arc::new(MemoryTicketStore::default());
        let audit = Arc::new(MemoryNotificationLog::default());
        let inventory = Arc::new(MemoryInventory::default());
        let oracle = Arc::new(FixedOracle::new(oracle_status));

        let reconciler = Arc::new(Reconciler::new(
            store.clone(),
            oracle.clone(),
            inventory.clone(),
        ));

        Self {
            store,
            audit,
            inventory,
            oracle,
            reconciler,
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            reconciler: self.reconciler.clone(),
            audit: self.audit.clone(),
            server_key: SERVER_KEY.into(),
        }
    }
}

/// Signed notification body with the full ticket-creation payload.
pub fn signed_notification(order_id: &str) -> serde_json::Value {
    let mut body = signed_bare_notification(order_id);
    body["customer_name"] = "Ayu Lestari".into();
    body["event_id"] = "EVT-42".into();
    body["event_name"] = "Jakarta Jazz Night".into();
    body["quantity"] = 2.into();
    body["total_price"] = "100000.00".into();
    body["user_id"] = "usr-7".into();
    body["venue"] = "Istora Senayan".into();
    body
}

/// Signed notification body without any creation payload.
pub fn signed_bare_notification(order_id: &str) -> serde_json::Value {
    let status_code = "200";
    let gross_amount = "100000.00";
    serde_json::json!({
        "order_id": order_id,
        "status_code": status_code,
        "gross_amount": gross_amount,
        "signature_key": expected_signature(order_id, status_code, gross_amount, SERVER_KEY),
    })
}

pub fn parse_notification(body: &serde_json::Value) -> tix_sync::domain::notification::OrderNotification {
    serde_json::from_value(body.clone()).expect("notification should deserialize")
}
