//! Logging macros.
//!
//! Every macro builds a [`LogEvent`](crate::logging::LogEvent) and hands it to
//! [`emit`](crate::logging::emit). Context values may be any `Display` type.
//! `log_debug!` checks [`debug_enabled`](crate::logging::debug_enabled) first,
//! so its context is never formatted on the hot path when nobody listens.

/// Attach `"key" => value` pairs to an event (internal)
#[doc(hidden)]
#[macro_export]
macro_rules! __log_with_context {
    ($event:expr $(, $key:expr => $value:expr)*) => {{
        #[allow(unused_mut)]
        let mut event = $event;
        $(
            event = event.with_context($key, &format!("{}", $value));
        )*
        $crate::logging::emit(event)
    }};
}

/// Error event with a code, optional position and context
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, position = $position:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_with_context!(
            $crate::logging::LogEvent::error($code, $message).with_position($position)
            $(, $key => $value)*
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_with_context!(
            $crate::logging::LogEvent::error($code, $message)
            $(, $key => $value)*
        )
    };
}

/// Success event: info level with a success code
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_with_context!(
            $crate::logging::LogEvent::success($code, $message)
            $(, $key => $value)*
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_with_context!(
            $crate::logging::LogEvent::info($message)
            $(, $key => $value)*
        )
    };
}

#[macro_export]
macro_rules! log_warning {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__log_with_context!(
            $crate::logging::LogEvent::warning($message)
            $(, $key => $value)*
        )
    };
}

/// Debug event; skipped entirely unless a logger accepts debug level
#[macro_export]
macro_rules! log_debug {
    ($message:expr, position = $position:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::debug_enabled() {
            $crate::__log_with_context!(
                $crate::logging::LogEvent::debug($message).with_position($position)
                $(, $key => $value)*
            )
        }
    };

    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::debug_enabled() {
            $crate::__log_with_context!(
                $crate::logging::LogEvent::debug($message)
                $(, $key => $value)*
            )
        }
    };
}
