use std::{
    process,
    sync::{
        Arc, OnceLock,
        atomic::{AtomicBool, Ordering},
    },
};

const INTERRUPTED_EXIT_CODE: i32 = 130;

static INTERRUPT_FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

/// Installs the Ctrl-C handler once and returns the flag it raises.
///
/// The first interrupt only sets the flag, so the 2-opt loop stops at the next
/// round boundary and the best tour so far is still written. A second
/// interrupt exits immediately.
pub fn install_interrupt_hook() -> Arc<AtomicBool> {
    Arc::clone(INTERRUPT_FLAG.get_or_init(|| {
        let flag = Arc::new(AtomicBool::new(false));
        let handler_flag = Arc::clone(&flag);
        if let Err(err) = ctrlc::set_handler(move || {
            if handler_flag.swap(true, Ordering::Relaxed) {
                process::exit(INTERRUPTED_EXIT_CODE);
            }
            log::warn!("interrupt: stopping after the current round");
        }) {
            log::warn!("interrupt: failed to install handler err={err}");
        }
        flag
    }))
}
