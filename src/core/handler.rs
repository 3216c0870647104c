//! Handler trait for log output destinations

use super::{error::Result, formatter::FormatterConfig, record::LogRecord};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

pub trait Handler: Send {
    fn publish(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
    fn formatter(&self) -> &FormatterConfig;
    fn formatter_mut(&mut self) -> &mut FormatterConfig;
}

struct Slot {
    name: String,
    handler: Mutex<Box<dyn Handler>>,
}

/// A handler attached to one or more loggers.
///
/// Clones share the same underlying handler; equality is identity, which is
/// what [`Logger::remove_handler`](crate::Logger::remove_handler) relies on.
#[derive(Clone)]
pub struct SharedHandler {
    slot: Arc<Slot>,
}

impl SharedHandler {
    pub fn new<H: Handler + 'static>(handler: H) -> Self {
        Self::from_boxed(Box::new(handler))
    }

    pub fn from_boxed(handler: Box<dyn Handler>) -> Self {
        Self {
            slot: Arc::new(Slot {
                name: handler.name().to_string(),
                handler: Mutex::new(handler),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.slot.name
    }

    pub fn publish(&self, record: &LogRecord) -> Result<()> {
        self.slot.handler.lock().publish(record)
    }

    pub fn flush(&self) -> Result<()> {
        self.slot.handler.lock().flush()
    }

    pub fn formatter(&self) -> FormatterConfig {
        self.slot.handler.lock().formatter().clone()
    }

    pub fn ptr_eq(&self, other: &SharedHandler) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

impl PartialEq for SharedHandler {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for SharedHandler {}

impl fmt::Debug for SharedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedHandler").field(&self.slot.name).finish()
    }
}
