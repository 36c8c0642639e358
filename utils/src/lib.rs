use std::io::BufWriter;
use std::io::Write;

/// Either collects everything in memory (for tests) or forwards to a writer.
enum Sink {
    Buffer(Vec<u8>),
    Stream(BufWriter<Box<dyn Write>>),
}

impl Sink {
    fn write_str(&mut self, msg: &str) {
        match self {
            Sink::Buffer(inner) => inner.extend_from_slice(msg.as_bytes()),
            Sink::Stream(inner) => inner
                .write_all(msg.as_bytes())
                .expect("Failed to write to output stream."),
        }
    }

    fn flush(&mut self) {
        if let Sink::Stream(inner) = self {
            inner.flush().expect("Failed to flush output stream.");
        }
    }

    fn contents(&self) -> Option<String> {
        match self {
            Sink::Buffer(inner) => Some(
                core::str::from_utf8(inner)
                    .expect("Failed to convert bytes to utf-8 string")
                    .to_owned(),
            ),
            Sink::Stream(_) => None,
        }
    }
}

/// Destination of everything the tools print. Regular results go to `out`,
/// errors and warnings go to `err`. Errors are counted so callers can decide
/// whether a phase failed without threading flags around.
pub struct DiagnosticEmitter {
    out: Sink,
    err: Sink,
}

impl DiagnosticEmitter {
    pub fn new(out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        Self {
            out: Sink::Stream(BufWriter::new(out)),
            err: Sink::Stream(BufWriter::new(err)),
        }
    }

    pub fn log_to_buffer() -> Self {
        Self {
            out: Sink::Buffer(Vec::new()),
            err: Sink::Buffer(Vec::new()),
        }
    }

    pub fn out(&mut self, msg: &str) {
        self.out.write_str(msg);
    }

    pub fn out_ln(&mut self, msg: &str) {
        self.out(msg);
        self.out("\n");
    }

    pub fn err(&mut self, msg: &str) {
        self.err.write_str(msg);
    }

    pub fn err_ln(&mut self, msg: &str) {
        self.err(msg);
        self.err("\n");
    }

    /// Everything written to `out` so far, when logging to a buffer.
    pub fn out_buffer(&self) -> Option<String> {
        self.out.contents()
    }

    /// Everything written to `err` so far, when logging to a buffer.
    pub fn err_buffer(&self) -> Option<String> {
        self.err.contents()
    }

    pub fn error(&mut self, line: u32, message: &str) {
        self.report(line, "", message);
    }

    pub fn report(&mut self, line: u32, item: &str, message: &str) {
        if item.is_empty() {
            self.err_ln(&format!("[line {line}] Error: {message}"));
        } else {
            self.err_ln(&format!("[line {line}] Error {item}: {message}"));
        }
    }

    pub fn warning(&mut self, message: &str) {
        self.err_ln(&format!("Warning: {message}"));
    }

    pub fn flush(&mut self) {
        self.out.flush();
        self.err.flush();
    }
}

impl Drop for DiagnosticEmitter {
    fn drop(&mut self) {
        self.flush();
    }
}
