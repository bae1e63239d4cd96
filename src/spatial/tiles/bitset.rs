//! Minimal fixed-size bitset (1 bit per tile, 64 tiles per word)

#[derive(Clone, Debug)]
pub struct BitSet {
    words: Vec<u64>,
    len: usize,
}

impl BitSet {
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; (len + 63) / 64],
            len,
        }
    }

    #[inline(always)]
    pub fn set(&mut self, idx: usize) {
        if idx < self.len {
            self.words[idx >> 6] |= 1u64 << (idx & 63);
        }
    }

    #[inline(always)]
    pub fn get(&self, idx: usize) -> bool {
        idx < self.len && (self.words[idx >> 6] & (1u64 << (idx & 63))) != 0
    }

    pub fn set_all(&mut self) {
        self.words.fill(!0u64);
        // keep bits past `len` clear so count_ones stays exact
        let tail = self.len & 63;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << tail) - 1;
            }
        }
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Move every bit of `self` into `dst` and clear `self`
    pub fn drain_into(&mut self, dst: &mut BitSet) {
        debug_assert_eq!(self.len, dst.len);
        dst.words.copy_from_slice(&self.words);
        self.words.fill(0);
    }
}
