use anyhow::Context;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Forwards `log` records to the browser console as `[component] message`
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!("[{}] {}", component(record.target()), record.args());
        match record.level() {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }

    fn flush(&self) {}
}

/// Last path segment of a module target, e.g. `shared::appointments` -> `appointments`
fn component(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    log::set_logger(&LOGGER).context("a logger is already installed")?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_component_prefix() {
        assert_eq!(component("shared::appointments"), "appointments");
        assert_eq!(component("backoffice_frontend::hooks::use_toasts"), "use_toasts");
        assert_eq!(component("plain"), "plain");
    }
}
