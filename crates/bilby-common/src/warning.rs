//! Deduplicated warning output.
//!
//! CSS error handling is silent by specification: unknown properties and
//! illegal values are discarded and parsing continues. That silence makes
//! authoring mistakes invisible, so the engine reports each discarded
//! construct once per unique message on stderr.

use std::collections::HashSet;
use std::sync::Mutex;

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about discarded or unsupported input (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("lang", "discarding unknown property 'zoom'");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap()
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{YELLOW}[bilby {component}] ⚠ {message}{RESET}");
    }
}

/// Clear all recorded warnings (call when starting a fresh parse)
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap();
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
