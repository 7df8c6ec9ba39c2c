//! Scripted in-memory terminal session for engine tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use super::{DeviceError, DeviceSession};
use crate::models::ScanEvent;

struct MockInner {
    device_id: String,
    connect_failures: AtomicUsize,
    connects: AtomicUsize,
    disconnects: AtomicUsize,
    activations: AtomicUsize,
    fail_activation: AtomicBool,
    fail_fetch: AtomicBool,
    fetch_payload: Mutex<Vec<ScanEvent>>,
    stream_tx: Mutex<Option<mpsc::Sender<ScanEvent>>>,
}

/// Test double for [`DeviceSession`]. The paired [`MockHandle`] lets a test
/// drive the stream and inspect call counts while the engine owns the
/// session.
pub struct MockDevice {
    inner: Arc<MockInner>,
}

#[derive(Clone)]
pub struct MockHandle {
    inner: Arc<MockInner>,
}

impl MockDevice {
    pub fn new(device_id: &str) -> (Self, MockHandle) {
        let inner = Arc::new(MockInner {
            device_id: device_id.to_string(),
            connect_failures: AtomicUsize::new(0),
            connects: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
            activations: AtomicUsize::new(0),
            fail_activation: AtomicBool::new(false),
            fail_fetch: AtomicBool::new(false),
            fetch_payload: Mutex::new(Vec::new()),
            stream_tx: Mutex::new(None),
        });
        (
            Self {
                inner: Arc::clone(&inner),
            },
            MockHandle { inner },
        )
    }
}

impl MockHandle {
    /// Make the next `n` connect attempts fail with a connection error.
    pub fn fail_next_connects(&self, n: usize) {
        self.inner.connect_failures.store(n, Ordering::SeqCst);
    }

    pub fn fail_activation(&self, fail: bool) {
        self.inner.fail_activation.store(fail, Ordering::SeqCst);
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.inner.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn set_fetch_payload(&self, events: Vec<ScanEvent>) {
        *self.inner.fetch_payload.lock().unwrap() = events;
    }

    /// Push one event into the open realtime stream.
    pub async fn push(&self, event: ScanEvent) {
        let tx = self
            .inner
            .stream_tx
            .lock()
            .unwrap()
            .clone()
            .expect("stream not registered");
        tx.send(event).await.expect("stream receiver dropped");
    }

    /// Drop the stream sender, simulating transport loss mid-stream.
    pub fn close_stream(&self) {
        self.inner.stream_tx.lock().unwrap().take();
    }

    pub fn stream_open(&self) -> bool {
        self.inner.stream_tx.lock().unwrap().is_some()
    }

    pub fn connects(&self) -> usize {
        self.inner.connects.load(Ordering::SeqCst)
    }

    pub fn disconnects(&self) -> usize {
        self.inner.disconnects.load(Ordering::SeqCst)
    }

    pub fn activations(&self) -> usize {
        self.inner.activations.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DeviceSession for MockDevice {
    fn device_id(&self) -> &str {
        &self.inner.device_id
    }

    async fn connect(&mut self) -> Result<(), DeviceError> {
        self.inner.connects.fetch_add(1, Ordering::SeqCst);
        let remaining = self.inner.connect_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.inner
                .connect_failures
                .store(remaining - 1, Ordering::SeqCst);
            return Err(DeviceError::Connection("scripted failure".into()));
        }
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), DeviceError> {
        self.inner.disconnects.fetch_add(1, Ordering::SeqCst);
        self.inner.stream_tx.lock().unwrap().take();
        Ok(())
    }

    async fn stream_scans(&mut self) -> Result<mpsc::Receiver<ScanEvent>, DeviceError> {
        let (tx, rx) = mpsc::channel(32);
        *self.inner.stream_tx.lock().unwrap() = Some(tx);
        Ok(rx)
    }

    async fn activate(&mut self) -> Result<(), DeviceError> {
        self.inner.activations.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_activation.load(Ordering::SeqCst) {
            return Err(DeviceError::Activation("scripted failure".into()));
        }
        Ok(())
    }

    async fn fetch_all_scans(&mut self) -> Result<Vec<ScanEvent>, DeviceError> {
        if self.inner.fail_fetch.load(Ordering::SeqCst) {
            return Err(DeviceError::Connection("scripted fetch failure".into()));
        }
        Ok(self.inner.fetch_payload.lock().unwrap().clone())
    }
}
