//! log macro's for position feed logging

/// Writes a debug! message to the app::feed logger
#[macro_export]
macro_rules! feed_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::feed", $($arg)+)
    };
}

/// Writes an info! message to the app::feed logger
#[macro_export]
macro_rules! feed_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::feed", $($arg)+)
    };
}

/// Writes an warn! message to the app::feed logger
#[macro_export]
macro_rules! feed_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "app::feed", $($arg)+)
    };
}

/// Writes an error! message to the app::feed logger
#[macro_export]
macro_rules! feed_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::feed", $($arg)+)
    };
}
