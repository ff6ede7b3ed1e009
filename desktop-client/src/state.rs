use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Open,
    Closed,
}

impl ConnectionStatus {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ConnectionStatus::Connecting,
            1 => ConnectionStatus::Open,
            _ => ConnectionStatus::Closed,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            ConnectionStatus::Connecting => 0,
            ConnectionStatus::Open => 1,
            ConnectionStatus::Closed => 2,
        }
    }
}

/// State shared between the websocket task and the UI thread.
#[derive(Clone)]
pub struct SharedState {
    connection: Arc<AtomicU8>,
    error: Arc<Mutex<Option<String>>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            connection: Arc::new(AtomicU8::new(ConnectionStatus::Connecting.as_u8())),
            error: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_connection(&self, status: ConnectionStatus) {
        self.connection.store(status.as_u8(), Ordering::SeqCst);
    }

    pub fn connection(&self) -> ConnectionStatus {
        ConnectionStatus::from_u8(self.connection.load(Ordering::SeqCst))
    }

    pub fn is_open(&self) -> bool {
        self.connection() == ConnectionStatus::Open
    }

    pub fn set_error(&self, error: String) {
        *self.error.lock().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn clear_error(&self) {
        *self.error.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
