/// Log through `tracing` only when the scope is enabled in the active
/// [`LogConfig`](crate::logging::LogConfig).
#[macro_export]
macro_rules! scoped_log {
    ($level:ident, $scope:expr, $($arg:tt)*) => {
        if $crate::logging::get_log_config().should_log($scope, $crate::logging::Level::$level) {
            $crate::__scoped_event!($level, $scope, $($arg)*);
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __scoped_event {
    (ERROR, $scope:expr, $($arg:tt)*) => { $crate::logging::error!(scope = $scope, $($arg)*) };
    (WARN, $scope:expr, $($arg:tt)*) => { $crate::logging::warn!(scope = $scope, $($arg)*) };
    (INFO, $scope:expr, $($arg:tt)*) => { $crate::logging::info!(scope = $scope, $($arg)*) };
    (DEBUG, $scope:expr, $($arg:tt)*) => { $crate::logging::debug!(scope = $scope, $($arg)*) };
    (TRACE, $scope:expr, $($arg:tt)*) => { $crate::logging::trace!(scope = $scope, $($arg)*) };
}

#[macro_export]
macro_rules! teleport_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "teleport", $($arg)*)
    };
}

#[macro_export]
macro_rules! movement_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "movement", $($arg)*)
    };
}

#[macro_export]
macro_rules! comfort_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "comfort", $($arg)*)
    };
}

#[macro_export]
macro_rules! ui_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "ui", $($arg)*)
    };
}

#[macro_export]
macro_rules! physics_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "physics", $($arg)*)
    };
}
