//! Process-wide interned strings.
//!
//! Message-ids, group names, and server ids are compared and hashed
//! constantly by the queue scheduler and connection pool. [`Quark`] interns
//! each distinct string once behind a refcounted [`Arc<str>`] so that
//! equality becomes a pointer comparison instead of a byte-by-byte strcmp,
//! matching the interning behavior of Pan's `pan::Quark`.
//!
//! Unlike a `'static` symbol table, the registry here drops an entry once
//! its last `Quark` is dropped, so short-lived sets (a session's worth of
//! message-ids) don't leak for the life of the process.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

fn registry() -> &'static Mutex<HashMap<Arc<str>, ()>> {
    static REGISTRY: OnceLock<Mutex<HashMap<Arc<str>, ()>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

/// An interned, refcounted string. Cloning is cheap; equality is by
/// pointer, not by content.
#[derive(Clone)]
pub struct Quark(Arc<str>);

impl Quark {
    /// Intern `s`, returning the existing handle if this string is already
    /// known, or registering a new one.
    pub fn intern(s: &str) -> Quark {
        let mut reg = registry().lock().unwrap();
        if let Some((key, _)) = reg.get_key_value(s) {
            return Quark(key.clone());
        }
        let arc: Arc<str> = Arc::from(s);
        reg.insert(arc.clone(), ());
        Quark(arc)
    }

    /// Borrow the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of distinct strings currently interned. Exposed for tests.
    pub fn registry_size() -> usize {
        registry().lock().unwrap().len()
    }
}

impl Drop for Quark {
    fn drop(&mut self) {
        // strong_count == 2 means only this handle and the registry's own
        // copy remain; once this one goes, the string is unreachable.
        if Arc::strong_count(&self.0) == 2 {
            let mut reg = registry().lock().unwrap();
            if Arc::strong_count(&self.0) == 2 {
                reg.remove(&self.0);
            }
        }
    }
}

impl PartialEq for Quark {
    fn eq(&self, other: &Quark) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for Quark {}

impl std::hash::Hash for Quark {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as *const ()).hash(state);
    }
}

impl fmt::Debug for Quark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quark({:?})", self.0)
    }
}

impl fmt::Display for Quark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Quark {
    fn from(s: &str) -> Quark {
        Quark::intern(s)
    }
}

impl From<String> for Quark {
    fn from(s: String) -> Quark {
        Quark::intern(&s)
    }
}

impl AsRef<str> for Quark {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
