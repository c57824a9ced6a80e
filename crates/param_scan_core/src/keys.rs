/// Hands out `<prefix>_<n>` keys from one counter shared across all prefixes.
///
/// The counter starts at zero, moves by exactly one per allocation and is never
/// rewound, so no two keys from the same allocator collide.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyAllocator {
    next: u64,
}

impl KeyAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, prefix: &str) -> String {
        let key = format!("{prefix}_{}", self.next);
        self.next += 1;
        key
    }

    /// Counter value the next allocation will use.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_counts_from_zero() {
        let mut keys = KeyAllocator::new();
        assert_eq!(keys.allocate("param_scan_tellurium"), "param_scan_tellurium_0");
        assert_eq!(keys.allocate("param_scan_tellurium"), "param_scan_tellurium_1");
        assert_eq!(keys.peek(), 2);
    }

    #[test]
    fn allocate_shares_counter_across_prefixes() {
        let mut keys = KeyAllocator::new();
        assert_eq!(keys.allocate("param_scan_copasi"), "param_scan_copasi_0");
        assert_eq!(keys.allocate("comparison_sims"), "comparison_sims_1");
        assert_eq!(keys.allocate("param_scan_copasi"), "param_scan_copasi_2");
    }

    #[test]
    fn separate_allocators_do_not_share_state() {
        let mut first = KeyAllocator::new();
        let mut second = KeyAllocator::new();
        first.allocate("a");
        first.allocate("a");
        assert_eq!(second.allocate("a"), "a_0");
    }
}
