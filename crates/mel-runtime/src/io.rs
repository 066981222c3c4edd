//! I/O functions over the process-wide runtime

use crate::config::{ReadMode, RuntimeConfig};
use crate::error::{fatal, settle, Result};
use crate::runtime::Runtime;
use crate::strings::{str_from_raw, MelString};
use crate::value::Value;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

static STARTED: AtomicBool = AtomicBool::new(false);

lazy_static::lazy_static! {
    static ref PENDING_CONFIG: Mutex<RuntimeConfig> = Mutex::new(RuntimeConfig::default());
    static ref RUNTIME: Runtime = {
        STARTED.store(true, Ordering::SeqCst);
        let config = PENDING_CONFIG
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default();
        tracing::debug!(?config, "starting stdio runtime");
        Runtime::stdio(config)
    };
}

/// Set the read mode in `pending` unless the runtime has already started.
fn configure(pending: &Mutex<RuntimeConfig>, started: &AtomicBool, mode: i64) -> i64 {
    let Some(mode) = ReadMode::from_code(mode) else {
        return 0;
    };
    if started.load(Ordering::SeqCst) {
        return 0;
    }
    match pending.lock() {
        Ok(mut config) => {
            config.read_mode = mode;
            1
        }
        Err(_) => 0,
    }
}

/// Select the read primitive (0 = line, 1 = prompted integer).
///
/// Only takes effect before the first I/O call; returns 1 if applied.
#[no_mangle]
pub extern "C" fn mel_runtime_configure(mode: i64) -> i64 {
    configure(&PENDING_CONFIG, &STARTED, mode)
}

fn emit(result: Result<()>) {
    if let Err(err) = result {
        fatal(&err);
    }
}

/// Print and flush: a host without a Rust `main` never flushes `Stdout`
/// at exit.
fn print_on(runtime: &Runtime, value: Value) {
    emit(runtime.print(value).and_then(|()| runtime.flush()));
}

fn println_on(runtime: &Runtime, value: Value) {
    emit(runtime.println(value));
}

fn read_line_on(runtime: &Runtime) -> *mut MelString {
    settle(runtime.read_line().map(Some))
        .map(|line| MelString::from_text(&line))
        .unwrap_or(ptr::null_mut())
}

fn read_int_on(runtime: &Runtime) -> i64 {
    settle(runtime.read_int())
}

/// Print a string (pointer + length)
#[no_mangle]
pub extern "C" fn mel_print_str(ptr: *const u8, len: i64) {
    print_on(&RUNTIME, str_from_raw(ptr, len).into_owned().into());
}

/// Print an integer
#[no_mangle]
pub extern "C" fn mel_print_int(value: i64) {
    print_on(&RUNTIME, value.into());
}

/// Print a float
#[no_mangle]
pub extern "C" fn mel_print_float(value: f64) {
    print_on(&RUNTIME, value.into());
}

/// Print a boolean
#[no_mangle]
pub extern "C" fn mel_print_bool(value: i8) {
    print_on(&RUNTIME, (value != 0).into());
}

#[no_mangle]
pub extern "C" fn mel_println_str(ptr: *const u8, len: i64) {
    println_on(&RUNTIME, str_from_raw(ptr, len).into_owned().into());
}

#[no_mangle]
pub extern "C" fn mel_println_int(value: i64) {
    println_on(&RUNTIME, value.into());
}

#[no_mangle]
pub extern "C" fn mel_println_float(value: f64) {
    println_on(&RUNTIME, value.into());
}

#[no_mangle]
pub extern "C" fn mel_println_bool(value: i8) {
    println_on(&RUNTIME, (value != 0).into());
}

/// Print a newline and flush
#[no_mangle]
pub extern "C" fn mel_println() {
    emit(RUNTIME.newline());
}

/// Flush standard output
#[no_mangle]
pub extern "C" fn mel_flush() {
    emit(RUNTIME.flush());
}

/// Read a line (NULL and error code 1 at end of input)
#[no_mangle]
pub extern "C" fn mel_read_line() -> *mut MelString {
    read_line_on(&RUNTIME)
}

/// Prompt and read an integer (0 and an error code on failure)
#[no_mangle]
pub extern "C" fn mel_read_int() -> i64 {
    read_int_on(&RUNTIME)
}
