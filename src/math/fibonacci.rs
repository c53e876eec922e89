/// Seed followed by `extra` terms, each the sum of the two before it.
///
/// Stops early at the last term representable in `u64`.
pub fn extend_fibonacci(seed: [u64; 2], extra: usize) -> Vec<u64> {
    let mut seq = Vec::with_capacity(extra + 2);
    seq.extend_from_slice(&seed);

    for _ in 0..extra {
        let n = seq.len();
        match seq[n - 1].checked_add(seq[n - 2]) {
            Some(next) => seq.push(next),
            None => {
                log::warn!(
                    "fibonacci sequence truncated at {} terms (u64 overflow)",
                    seq.len()
                );
                break;
            }
        }
    }

    seq
}

/// `1, 1, 2, 3, 5, ...` built from the `[0, 1]` seed with the leading zero dropped
pub fn classic_fibonacci(extra: usize) -> Vec<u64> {
    let mut seq = extend_fibonacci([0, 1], extra);
    seq.remove(0);
    seq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extends_one_one_seed() {
        assert_eq!(extend_fibonacci([1, 1], 5), vec![1, 1, 2, 3, 5, 8, 13]);
    }

    #[test]
    fn zero_extension_is_just_the_seed() {
        assert_eq!(extend_fibonacci([2, 7], 0), vec![2, 7]);
    }

    #[test]
    fn classic_drops_leading_zero() {
        assert_eq!(classic_fibonacci(4), vec![1, 1, 2, 3, 5]);
    }

    #[test]
    fn stops_before_overflow() {
        let seq = extend_fibonacci([1, 1], 200);
        assert!(seq.len() < 202);
        assert!(seq.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*seq.last().unwrap(), 12_200_160_415_121_876_738);
    }
}
