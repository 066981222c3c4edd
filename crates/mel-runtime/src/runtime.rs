//! The runtime facade called by generated code.

use crate::config::{ReadMode, RuntimeConfig};
use crate::convert::parse_int;
use crate::error::Result;
use crate::input::InputCursor;
use crate::value::Value;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

type Output = Box<dyn Write + Send>;

/// Printing and reading for one program.
///
/// Input and output each sit behind their own lock, so a facade can be
/// shared between threads without interleaving partial tokens.
pub struct Runtime {
    config: RuntimeConfig,
    input: Mutex<InputCursor>,
    output: Mutex<Output>,
}

impl Runtime {
    pub fn new(
        config: RuntimeConfig,
        input: InputCursor,
        output: impl Write + Send + 'static,
    ) -> Self {
        Self {
            config,
            input: Mutex::new(input),
            output: Mutex::new(Box::new(output)),
        }
    }

    /// Runtime over the process's standard input and output.
    pub fn stdio(config: RuntimeConfig) -> Self {
        Self::new(config, InputCursor::stdin(), io::stdout())
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Write the text of `value` with no terminator.
    pub fn print(&self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        tracing::trace!(kind = value.type_name(), "print");
        write!(self.output(), "{}", value)?;
        Ok(())
    }

    /// Write the text of `value` followed by a newline, then flush.
    pub fn println(&self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        tracing::trace!(kind = value.type_name(), "println");
        let mut out = self.output();
        writeln!(out, "{}", value)?;
        out.flush()?;
        Ok(())
    }

    /// Write a bare newline, then flush.
    pub fn newline(&self) -> Result<()> {
        let mut out = self.output();
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        self.output().flush()?;
        Ok(())
    }

    /// Read one line of input as text.
    pub fn read_line(&self) -> Result<String> {
        self.flush()?;
        let line = self.input().read_line();
        trace_read("read_line", &line);
        line
    }

    /// Prompt, then read one whitespace-delimited integer.
    pub fn read_int(&self) -> Result<i64> {
        {
            let mut out = self.output();
            out.write_all(self.config.prompt.as_bytes())?;
            out.flush()?;
        }
        let token = self.input().read_token();
        trace_read("read_int", &token);
        parse_int(&token?)
    }

    /// Read with the primitive selected by the configured read mode.
    pub fn read(&self) -> Result<Value> {
        match self.config.read_mode {
            ReadMode::Line => self.read_line().map(Value::Text),
            ReadMode::PromptedInt => self.read_int().map(Value::Int),
        }
    }

    fn input(&self) -> MutexGuard<'_, InputCursor> {
        self.input.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn output(&self) -> MutexGuard<'_, Output> {
        self.output.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn trace_read(op: &str, result: &Result<String>) {
    match result {
        Ok(text) => tracing::trace!(op, len = text.len(), "read"),
        Err(err) => tracing::debug!(op, %err, "read failed"),
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NumericKind, RuntimeError};
    use crate::test_util::scripted as runtime;
    use std::sync::Arc;

    #[test]
    fn test_prompted_int_then_println() {
        let (rt, out) = runtime(RuntimeConfig::default(), "7\n");
        let n = rt.read_int().unwrap();
        rt.println(n).unwrap();
        assert_eq!(out.text(), "Введите: 7\n");
        assert!(matches!(rt.read_int(), Err(RuntimeError::EndOfInput)));
        assert!(matches!(rt.read_line(), Err(RuntimeError::EndOfInput)));
    }

    #[test]
    fn test_line_read_after_last_int_is_end_of_input() {
        let (rt, _) = runtime(RuntimeConfig::default(), "7\n");
        assert_eq!(rt.read_int().unwrap(), 7);
        assert!(matches!(rt.read_line(), Err(RuntimeError::EndOfInput)));
    }

    #[test]
    fn test_print_stays_buffered_until_flush() {
        let (rt, out) = runtime(RuntimeConfig::default(), "");
        rt.print("result=").unwrap();
        assert_eq!(out.flushed_text(), "");
        rt.flush().unwrap();
        assert_eq!(out.flushed_text(), "result=");
    }

    #[test]
    fn test_println_literals() {
        let (rt, out) = runtime(RuntimeConfig::default(), "");
        rt.println(true).unwrap();
        rt.println(3.0).unwrap();
        rt.println(-12i64).unwrap();
        rt.println("text").unwrap();
        assert_eq!(out.text(), "true\n3.0\n-12\ntext\n");
    }

    #[test]
    fn test_print_has_no_terminator() {
        let (rt, out) = runtime(RuntimeConfig::default(), "");
        rt.print("a").unwrap();
        rt.print(1i64).unwrap();
        rt.print(false).unwrap();
        rt.newline().unwrap();
        assert_eq!(out.text(), "a1false\n");
    }

    #[test]
    fn test_read_int_rejects_bad_token() {
        let (rt, _) = runtime(RuntimeConfig::default(), "seven 8");
        match rt.read_int() {
            Err(RuntimeError::Parse { kind, text }) => {
                assert_eq!(kind, NumericKind::Int);
                assert_eq!(text, "seven");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        assert_eq!(rt.read_int().unwrap(), 8);
    }

    #[test]
    fn test_custom_prompt() {
        let config = RuntimeConfig::builder().prompt("n? ").build();
        let (rt, out) = runtime(config, "1 2");
        assert_eq!(rt.read_int().unwrap() + rt.read_int().unwrap(), 3);
        assert_eq!(out.text(), "n? n? ");
    }

    #[test]
    fn test_line_mode_read() {
        let config = RuntimeConfig::builder().read_mode(ReadMode::Line).build();
        let (rt, out) = runtime(config, "hello world\n42\n");
        assert_eq!(rt.read().unwrap(), Value::Text("hello world".into()));
        let line = rt.read().unwrap();
        assert_eq!(line, Value::Text("42".into()));
        assert!(matches!(rt.read(), Err(RuntimeError::EndOfInput)));
        assert_eq!(out.text(), "");
    }

    #[test]
    fn test_prompted_mode_read() {
        let (rt, _) = runtime(RuntimeConfig::default(), " -4\n");
        assert_eq!(rt.read().unwrap(), Value::Int(-4));
    }

    #[test]
    fn test_shared_between_threads() {
        let (rt, out) = runtime(RuntimeConfig::builder().prompt("").build(), "1 2 3 4 5 6 7 8");
        let rt = Arc::new(rt);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let rt = Arc::clone(&rt);
                std::thread::spawn(move || rt.read_int().unwrap() + rt.read_int().unwrap())
            })
            .collect();
        let total: i64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 36);
        assert_eq!(out.text(), "");
    }
}
