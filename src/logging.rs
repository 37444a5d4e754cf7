//! Logger installation for the binaries. Debug builds print to stderr
//! through env_logger and honor `RUST_LOG`; release builds send
//! everything to the local syslog daemon.

#[cfg(not(debug_assertions))]
pub fn init_logging() {
    use syslog::{BasicLogger, Facility, Formatter3164};

    let transport = syslog::unix(
        Formatter3164 {
            facility: Facility::LOG_DAEMON,
            ..Default::default()
        }
    ).expect("cannot connect to syslog");
    log::set_boxed_logger(Box::new(BasicLogger::new(transport)))
        .map(|()| log::set_max_level(log::STATIC_MAX_LEVEL))
        .expect("cannot install the syslog logger");
}

#[cfg(debug_assertions)]
pub fn init_logging() {
    env_logger::init()
}
