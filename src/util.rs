/// Log an error and terminate the process. Only for use in binary
/// entry points, before or outside the request path.
#[macro_export]
macro_rules! error_exit {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
        std::process::exit(1)
    }};
}
