//! Deep-sleep bookkeeping
//!
//! Hardware that can only time short sleeps (a watchdog, for example)
//! sleeps in chunks and carries the remaining time across resets in a
//! pair of 32-bit retention registers. The arithmetic lives here so it
//! can be checked off-target.

/// Portion of `remaining` that fits in one hardware period of `max_chunk`
pub const fn chunk_for(remaining: u64, max_chunk: u64) -> u64 {
    if remaining > max_chunk {
        max_chunk
    } else {
        remaining
    }
}

/// Split a remaining time into (high, low) register words
pub const fn split_remaining(remaining: u64) -> (u32, u32) {
    ((remaining >> 32) as u32, remaining as u32)
}

/// Rebuild a remaining time from (high, low) register words
pub const fn join_remaining(hi: u32, lo: u32) -> u64 {
    ((hi as u64) << 32) | lo as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATCHDOG_LIMIT: u64 = 0x00FF_FFFF / 2;

    /// Chunks a sleep takes when every reset round-trips through the registers
    fn chunks(duration: u64) -> (u32, u64) {
        let (mut hi, mut lo) = split_remaining(duration);
        let mut count = 0;
        let mut slept = 0;
        loop {
            let remaining = join_remaining(hi, lo);
            if remaining == 0 {
                return (count, slept);
            }
            let chunk = chunk_for(remaining, WATCHDOG_LIMIT);
            (hi, lo) = split_remaining(remaining - chunk);
            count += 1;
            slept += chunk;
        }
    }

    #[test]
    fn test_chunk_boundaries() {
        assert_eq!(chunk_for(0, WATCHDOG_LIMIT), 0);
        assert_eq!(chunk_for(WATCHDOG_LIMIT, WATCHDOG_LIMIT), WATCHDOG_LIMIT);
        assert_eq!(chunk_for(WATCHDOG_LIMIT + 1, WATCHDOG_LIMIT), WATCHDOG_LIMIT);
    }

    #[test]
    fn test_register_words() {
        assert_eq!(split_remaining(0), (0, 0));
        assert_eq!(split_remaining(u64::from(u32::MAX)), (0, u32::MAX));
        assert_eq!(split_remaining(u64::from(u32::MAX) + 1), (1, 0));

        for value in [0, 1, u64::from(u32::MAX), u64::from(u32::MAX) + 7, u64::MAX] {
            let (hi, lo) = split_remaining(value);
            assert_eq!(join_remaining(hi, lo), value);
        }
    }

    #[test]
    fn test_five_second_sleep_is_one_chunk() {
        assert_eq!(chunks(5_000_000), (1, 5_000_000));
    }

    #[test]
    fn test_long_sleeps_continue_across_resets() {
        assert_eq!(chunks(0), (0, 0));
        assert_eq!(chunks(WATCHDOG_LIMIT), (1, WATCHDOG_LIMIT));
        assert_eq!(chunks(WATCHDOG_LIMIT + 1), (2, WATCHDOG_LIMIT + 1));

        // Past u32::MAX the high word carries the time
        let long = u64::from(u32::MAX) + 1_000;
        let (count, slept) = chunks(long);
        assert_eq!(slept, long);
        assert_eq!(u64::from(count), long.div_ceil(WATCHDOG_LIMIT));
    }
}
