use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

lazy_static! {
    pub static ref LOG_INIT: AtomicUsize = AtomicUsize::new(0);
}

/// Install env_logger the first time this is called.  Later calls, and calls
/// made after some other logger was installed, do nothing.
pub fn init() {
    if LOG_INIT.fetch_add(1, Ordering::SeqCst) == 0 {
        env_logger::builder().is_test(cfg!(test)).try_init().ok();
    }
}
