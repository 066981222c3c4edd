//! Scripted runtimes for unit tests.

use crate::config::RuntimeConfig;
use crate::input::InputCursor;
use crate::runtime::Runtime;
use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};

/// Output sink that keeps unflushed bytes apart from flushed ones.
#[derive(Clone, Default)]
pub(crate) struct SharedBuf {
    flushed: Arc<Mutex<Vec<u8>>>,
    unflushed: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuf {
    /// Everything written so far.
    pub(crate) fn text(&self) -> String {
        let mut all = self.flushed.lock().unwrap().clone();
        all.extend_from_slice(&self.unflushed.lock().unwrap());
        String::from_utf8(all).unwrap()
    }

    /// Only what has reached the sink through a flush.
    pub(crate) fn flushed_text(&self) -> String {
        String::from_utf8(self.flushed.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.unflushed.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut unflushed = self.unflushed.lock().unwrap();
        self.flushed.lock().unwrap().append(&mut unflushed);
        Ok(())
    }
}

pub(crate) fn scripted(config: RuntimeConfig, input: &str) -> (Runtime, SharedBuf) {
    let out = SharedBuf::default();
    let input = InputCursor::new(Cursor::new(input.as_bytes().to_vec()));
    (Runtime::new(config, input, out.clone()), out)
}
