use std::collections::BTreeMap;

/// Rounds `n` up to the next multiple of 8; applied to each distinct
/// term's storage cost in the byte-cost estimate below.
fn align8(n: usize) -> usize {
    (n + 7) & !7
}

const TERM_OVERHEAD: usize = 16; // small constant alongside the term's own bytes
const LIST_OVERHEAD: usize = 64; // per-distinct-term container overhead
const POSTING_SIZE: usize = std::mem::size_of::<u32>() + 4; // doc-id slot + ref

/// In-memory term -> doc-id postings for the block currently being filled,
/// plus a running byte-cost estimate. The inner `Vec<u32>` for each term
/// stays in non-decreasing order because documents are absorbed in doc-id
/// order, one at a time.
#[derive(Debug, Default)]
pub struct BlockAccumulator {
    postings: BTreeMap<String, Vec<u32>>,
    byte_cost: usize,
}

impl BlockAccumulator {
    pub fn new() -> Self {
        BlockAccumulator::default()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn byte_cost(&self) -> usize {
        self.byte_cost
    }

    pub fn is_full(&self, budget: u64) -> bool {
        self.byte_cost as u64 >= budget
    }

    /// Absorbs one document's term sequence, in occurrence order.
    pub fn add_document(&mut self, doc_id: u32, terms: &[String]) {
        let mut new_terms = 0usize;
        for term in terms {
            if !self.postings.contains_key(term) {
                self.byte_cost += align8(term.len() + TERM_OVERHEAD);
                new_terms += 1;
            }
            self.postings
                .entry(term.clone())
                .or_insert_with(Vec::new)
                .push(doc_id);
        }
        self.byte_cost += terms.len() * POSTING_SIZE;
        self.byte_cost += new_terms * LIST_OVERHEAD;
    }

    /// Drains the accumulator, returning `(term, doc_ids)` pairs sorted
    /// ascending by term, and resets state for the next block.
    pub fn drain_sorted(&mut self) -> Vec<(String, Vec<u32>)> {
        let drained = std::mem::take(&mut self.postings);
        self.byte_cost = 0;
        drained.into_iter().collect()
    }
}
