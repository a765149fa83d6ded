#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

use shopfront::primitives::date::set_device_utc_offset;
use shopfront::primitives::http_client::{HttpError, ShopHttpClient};
use shopfront::primitives::key_value_store::{DeviceKeyValueStore, KeyValueStoreError};
use shopfront::primitives::logger::{set_logger, LogLevel, Logger};

/// Device storage double backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    /// Keys passed to `set`, in call order.
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl DeviceKeyValueStore for MemoryStore {
    fn get(&self, key: String) -> Result<String, KeyValueStoreError> {
        self.value(&key).ok_or(KeyValueStoreError::KeyNotFound)
    }

    fn set(&self, key: String, value: String) -> Result<(), KeyValueStoreError> {
        self.writes.lock().unwrap().push(key.clone());
        self.values.lock().unwrap().insert(key, value);
        Ok(())
    }

    fn delete(&self, key: String) -> Result<(), KeyValueStoreError> {
        self.values
            .lock()
            .unwrap()
            .remove(&key)
            .map(|_| ())
            .ok_or(KeyValueStoreError::KeyNotFound)
    }
}

/// Backend double answering GET requests from canned JSON bodies.
#[derive(Default)]
pub struct CannedBackend {
    bodies: HashMap<String, &'static str>,
    offline: bool,
}

impl CannedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, body: &'static str) -> Self {
        self.bodies.insert(url.to_string(), body);
        self
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }
}

#[async_trait::async_trait]
impl ShopHttpClient for CannedBackend {
    async fn fetch(&self, url: String) -> Result<Vec<u8>, HttpError> {
        if self.offline {
            return Err(HttpError::NoConnectivity);
        }
        self.bodies
            .get(&url)
            .map(|body| body.as_bytes().to_vec())
            .ok_or(HttpError::BadStatusCode {
                code: 404,
                response_body: b"not found".to_vec(),
            })
    }
}

struct StdoutLogger;

impl Logger for StdoutLogger {
    fn log(&self, level: LogLevel, message: String) {
        println!("[{level:?}] {message}");
    }
}

static INIT_LOGGER: Once = Once::new();

/// Routes core logs to stdout so `cargo test -- --nocapture` shows them.
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        set_logger(Arc::new(StdoutLogger));
    });
}

/// Indochina Time, where the app's users are.
pub const ICT_OFFSET_MINUTES: i32 = 7 * 60;

/// Pins the device zone to UTC+7. Every test binary uses the same zone.
pub fn use_device_zone_ict() {
    assert!(set_device_utc_offset(ICT_OFFSET_MINUTES));
}
