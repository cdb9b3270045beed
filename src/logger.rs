//! Device log backend

/// Route the `log` macros to the ESP serial console
pub fn init(level: log::LevelFilter) {
    esp_println::logger::init_logger(level);
}
