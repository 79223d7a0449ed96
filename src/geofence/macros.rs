//! log macro's for geofence logging

/// Writes a debug! message to the app::geofence logger
#[macro_export]
macro_rules! geofence_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::geofence", $($arg)+)
    };
}

/// Writes an info! message to the app::geofence logger
#[macro_export]
macro_rules! geofence_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::geofence", $($arg)+)
    };
}

/// Writes an warn! message to the app::geofence logger
#[macro_export]
macro_rules! geofence_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "app::geofence", $($arg)+)
    };
}

/// Writes an error! message to the app::geofence logger
#[macro_export]
macro_rules! geofence_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::geofence", $($arg)+)
    };
}
