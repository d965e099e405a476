//! `tracing` setup for the widgets.
//!
//! In the browser events are formatted without timestamps (no clock on
//! `wasm32-unknown-unknown`) and written to the developer console.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a global subscriber filtered by `directive` (e.g. `"info"` or
/// `"intake_widgets=debug"`). Later calls are ignored.
pub fn init(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(console::MakeConsoleWriter);

    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    let fmt_layer = tracing_subscriber::fmt::layer();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod console {
    use std::io::{self, Write};

    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    pub struct MakeConsoleWriter;

    /// Buffers one formatted event and hands it to `console.log` on drop.
    #[derive(Default)]
    pub struct ConsoleWriter {
        buf: Vec<u8>,
    }

    impl Write for ConsoleWriter {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            if self.buf.is_empty() {
                return;
            }
            let line = String::from_utf8_lossy(&self.buf);
            web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
        }
    }

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter::default()
        }
    }
}
