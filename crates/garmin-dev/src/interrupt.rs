//! Ctrl-C handling for long captures.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Flag set on the first SIGINT. Extraction checks it between lines and
/// abandons the run. A second SIGINT exits immediately with status 130.
pub fn install() -> Arc<AtomicBool> {
    let cancel = Arc::new(AtomicBool::new(false));

    #[cfg(unix)]
    {
        use signal_hook::consts::SIGINT;
        use signal_hook::flag;

        let registered = flag::register_conditional_shutdown(
            SIGINT,
            garmin_dev_common::exit_codes::INTERRUPTED,
            Arc::clone(&cancel),
        )
        .and_then(|_| flag::register(SIGINT, Arc::clone(&cancel)));

        if let Err(err) = registered {
            tracing::warn!(error = %err, "failed to install SIGINT handler");
        }
    }

    cancel
}
