use std::cell::Cell;

thread_local! {
    static FIXED_NOW_MILLIS: Cell<Option<i64>> = const { Cell::new(None) };
    static JITTER_STATE: Cell<Option<u64>> = const { Cell::new(None) };
}

pub(crate) fn with_fixed_now_millis<R>(millis: Option<i64>, f: impl FnOnce() -> R) -> R {
    FIXED_NOW_MILLIS.with(|cell| {
        let prev = cell.replace(millis);
        let out = f();
        cell.set(prev);
        out
    })
}

pub(crate) fn with_fixed_jitter_seed<R>(seed: Option<u64>, f: impl FnOnce() -> R) -> R {
    JITTER_STATE.with(|cell| {
        let prev = cell.replace(seed);
        let out = f();
        cell.set(prev);
        out
    })
}

/// The `updated` timestamp for elements touched in this run.
///
/// Uses the real clock unless a fixture has pinned it via `with_fixed_now_millis` (snapshot
/// outputs must not depend on wall time).
pub(crate) fn now_millis() -> i64 {
    FIXED_NOW_MILLIS
        .with(|cell| cell.get())
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis())
}

/// Fresh jitter value (element `seed` / `versionNonce`).
///
/// Draws from a purely call-local source — UUIDv4 entropy, or a splitmix64 walk over the pinned
/// test seed — never a shared counter, so concurrent compilations need no synchronization.
pub(crate) fn next_jitter() -> i64 {
    let raw = JITTER_STATE.with(|cell| match cell.get() {
        Some(state) => {
            let next = state.wrapping_add(0x9E3779B97F4A7C15);
            cell.set(Some(next));
            let mut z = next;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
            z ^ (z >> 31)
        }
        None => {
            let bytes = uuid::Uuid::new_v4().into_bytes();
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[..8]);
            u64::from_le_bytes(word)
        }
    });
    // The canvas stores seeds as positive 32-bit integers.
    (raw & 0x7FFF_FFFF) as i64
}
