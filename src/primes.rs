//! Prime table used to size the bucket and slot arrays.
//!
//! Resizing picks the smallest table prime at least twice the previous
//! size, so growth stays geometric while bucket counts stay prime.

/// Largest size the table may reach. This is itself a prime and the last
/// entry of [`PRIMES`].
pub(crate) const MAX_SIZE: usize = 0x7FEF_FFFD;

/// Ascending primes, each roughly 1.2x the previous.
pub(crate) const PRIMES: &[usize] = &[
    3, 7, 11, 17, 23, 29, 37, 47, 59, 71, 89, 107, 131, 163, 197, 239, 293, 353, 431, 521, 631,
    761, 919, 1103, 1327, 1597, 1931, 2333, 2801, 3371, 4049, 4861, 5839, 7013, 8419, 10103,
    12143, 14591, 17519, 21023, 25229, 30293, 36353, 43627, 52361, 62851, 75431, 90523, 108631,
    130363, 156437, 187751, 225307, 270371, 324449, 389357, 467237, 560689, 672827, 807403,
    968897, 1162687, 1395263, 1674319, 2009191, 2411033, 2893249, 3471899, 4166287, 4999559,
    5999471, 7199369, 8639249, 10367101, 12440537, 14928671, 17914409, 21497293, 25796759,
    30956117, 37147349, 44576837, 53492207, 64190669, 77028803, 92434613, 110921543, 133105859,
    159727031, 191672443, 230006941, 276008387, 331210079, 397452101, 476942527, 572331049,
    686797261, 824156741, 988988137, 1186785773, 1424142949, 1708971541, 2050765853, MAX_SIZE,
];

/// Smallest table prime `>= min`. Falls back to `min` itself past the end
/// of the table; callers are responsible for staying under [`MAX_SIZE`].
pub(crate) fn get_prime(min: usize) -> usize {
    for &p in PRIMES {
        if p >= min {
            return p;
        }
    }
    min
}

/// Next size after `old_size`: double, clamp to [`MAX_SIZE`], round up to a
/// table prime.
pub(crate) fn expand_prime(old_size: usize) -> usize {
    let new_size = 2 * old_size;
    if new_size > MAX_SIZE && MAX_SIZE > old_size {
        return MAX_SIZE;
    }
    get_prime(new_size)
}
