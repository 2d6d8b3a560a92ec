//! Page replacement policies for the paging engine.

use pagesim_common::{Algorithm, PageNumber, PagesimError, Result};
use std::cmp::Reverse;
use std::collections::{HashMap, VecDeque};

/// Trait for page replacement algorithms.
pub trait Replacer {
    /// Records that `page` was loaded into a frame.
    fn record_insert(&mut self, page: PageNumber);

    /// Records that a resident `page` was accessed.
    fn record_hit(&mut self, page: PageNumber);

    /// Records that `page` was evicted.
    fn record_evict(&mut self, page: PageNumber);

    /// Selects a victim among `resident` pages.
    ///
    /// `access_index` is the 0-based position of the faulting access since the
    /// last reset. Returns `NoVictimAvailable` if `resident` is empty.
    fn select_victim(&self, resident: &[PageNumber], access_index: usize) -> Result<PageNumber>;

    /// Forgets all tracked pages.
    fn reset(&mut self);
}

/// First-in first-out replacement.
///
/// Keeps resident pages in insertion order; the front of the queue is the
/// page that has been resident longest.
#[derive(Debug, Clone, Default)]
pub struct FifoReplacer {
    queue: VecDeque<PageNumber>,
}

impl FifoReplacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages in insertion order, oldest first.
    pub fn insertion_order(&self) -> impl Iterator<Item = PageNumber> + '_ {
        self.queue.iter().copied()
    }
}

impl Replacer for FifoReplacer {
    fn record_insert(&mut self, page: PageNumber) {
        self.queue.retain(|&p| p != page);
        self.queue.push_back(page);
    }

    fn record_hit(&mut self, _page: PageNumber) {}

    fn record_evict(&mut self, page: PageNumber) {
        self.queue.retain(|&p| p != page);
    }

    fn select_victim(&self, resident: &[PageNumber], _access_index: usize) -> Result<PageNumber> {
        self.queue
            .iter()
            .copied()
            .find(|p| resident.contains(p))
            .ok_or(PagesimError::NoVictimAvailable)
    }

    fn reset(&mut self) {
        self.queue.clear();
    }
}

/// Least-recently-used replacement.
///
/// Stamps every insertion and hit with a logical clock; the resident page
/// with the smallest stamp is the victim, ties broken by lowest page number.
#[derive(Debug, Clone, Default)]
pub struct LruReplacer {
    clock: u64,
    last_used: HashMap<PageNumber, u64>,
}

impl LruReplacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last-access stamp of `page`.
    pub fn last_used(&self, page: PageNumber) -> Option<u64> {
        self.last_used.get(&page).copied()
    }

    fn touch(&mut self, page: PageNumber) {
        self.clock += 1;
        self.last_used.insert(page, self.clock);
    }
}

impl Replacer for LruReplacer {
    fn record_insert(&mut self, page: PageNumber) {
        self.touch(page);
    }

    fn record_hit(&mut self, page: PageNumber) {
        self.touch(page);
    }

    fn record_evict(&mut self, page: PageNumber) {
        self.last_used.remove(&page);
    }

    fn select_victim(&self, resident: &[PageNumber], _access_index: usize) -> Result<PageNumber> {
        resident
            .iter()
            .copied()
            .min_by_key(|&p| (self.last_used.get(&p).copied().unwrap_or(0), p))
            .ok_or(PagesimError::NoVictimAvailable)
    }

    fn reset(&mut self) {
        self.clock = 0;
        self.last_used.clear();
    }
}

/// Belady's optimal replacement.
///
/// Looks ahead in the reference string and evicts the resident page whose
/// next use is farthest away. Pages never used again count as infinitely far.
/// Ties go to the lowest page number.
#[derive(Debug, Clone)]
pub struct OptimalReplacer {
    reference_string: Vec<PageNumber>,
}

impl OptimalReplacer {
    pub fn new(reference_string: Vec<PageNumber>) -> Self {
        Self { reference_string }
    }

    pub fn reference_string(&self) -> &[PageNumber] {
        &self.reference_string
    }

    /// Distance from `access_index` to the next use of `page`, `usize::MAX` if none.
    pub fn next_use(&self, page: PageNumber, access_index: usize) -> usize {
        let start = access_index.saturating_add(1);
        self.reference_string
            .get(start..)
            .and_then(|future| future.iter().position(|&p| p == page))
            .unwrap_or(usize::MAX)
    }
}

impl Replacer for OptimalReplacer {
    fn record_insert(&mut self, _page: PageNumber) {}

    fn record_hit(&mut self, _page: PageNumber) {}

    fn record_evict(&mut self, _page: PageNumber) {}

    fn select_victim(&self, resident: &[PageNumber], access_index: usize) -> Result<PageNumber> {
        resident
            .iter()
            .copied()
            .max_by_key(|&p| (self.next_use(p, access_index), Reverse(p)))
            .ok_or(PagesimError::NoVictimAvailable)
    }

    fn reset(&mut self) {}
}

/// The active replacement policy, one variant per supported algorithm.
#[derive(Debug, Clone)]
pub enum ReplacementPolicy {
    Fifo(FifoReplacer),
    Lru(LruReplacer),
    Optimal(OptimalReplacer),
}

impl ReplacementPolicy {
    /// Builds the policy for `algorithm`.
    ///
    /// OPTIMAL requires a non-empty reference string.
    pub fn new(algorithm: Algorithm, reference_string: Option<&[PageNumber]>) -> Result<Self> {
        match algorithm {
            Algorithm::Fifo => Ok(ReplacementPolicy::Fifo(FifoReplacer::new())),
            Algorithm::Lru => Ok(ReplacementPolicy::Lru(LruReplacer::new())),
            Algorithm::Optimal => match reference_string {
                Some(refs) if !refs.is_empty() => {
                    Ok(ReplacementPolicy::Optimal(OptimalReplacer::new(refs.to_vec())))
                }
                _ => Err(PagesimError::MissingReferenceString),
            },
        }
    }

    /// Returns the algorithm this policy implements.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            ReplacementPolicy::Fifo(_) => Algorithm::Fifo,
            ReplacementPolicy::Lru(_) => Algorithm::Lru,
            ReplacementPolicy::Optimal(_) => Algorithm::Optimal,
        }
    }

    fn inner(&self) -> &dyn Replacer {
        match self {
            ReplacementPolicy::Fifo(r) => r,
            ReplacementPolicy::Lru(r) => r,
            ReplacementPolicy::Optimal(r) => r,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Replacer {
        match self {
            ReplacementPolicy::Fifo(r) => r,
            ReplacementPolicy::Lru(r) => r,
            ReplacementPolicy::Optimal(r) => r,
        }
    }
}

impl Replacer for ReplacementPolicy {
    fn record_insert(&mut self, page: PageNumber) {
        self.inner_mut().record_insert(page);
    }

    fn record_hit(&mut self, page: PageNumber) {
        self.inner_mut().record_hit(page);
    }

    fn record_evict(&mut self, page: PageNumber) {
        self.inner_mut().record_evict(page);
    }

    fn select_victim(&self, resident: &[PageNumber], access_index: usize) -> Result<PageNumber> {
        self.inner().select_victim(resident, access_index)
    }

    fn reset(&mut self) {
        self.inner_mut().reset();
    }
}
