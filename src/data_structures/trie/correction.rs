//! Bounded Damerau-Levenshtein search over the trie.
//!
//! Instead of measuring the distance from the query to every stored key, the
//! search walks the trie once and carries one edit-distance row per node: the
//! distance from the path spelled so far to every prefix of the query. A
//! child's row is derived from the rows already on the path, so keys sharing
//! a prefix share that work.
//!
//! Distances are unrestricted Damerau-Levenshtein: insertions, deletions,
//! substitutions and transpositions of adjacent characters each cost one, and
//! characters that were transposed may still be edited further. Transpositions
//! follow the Lowrance-Wagner recurrence, which looks back to the last path
//! row holding the query character and the last query column holding the
//! path character.

use fnv::{FnvHashMap, FnvHashSet};
use tracing::debug;

use super::error::TrieResult;
use super::key::TrieKey;
use super::node::TrieNode;
use super::Trie;

/// Set of keys returned by a correction search.
pub type Corrections = FnvHashSet<String>;

/// State of a single correction search.
struct CorrectionSearch<'q> {
    /// The query key
    target: &'q [char],

    /// Largest accepted distance
    bound: usize,

    /// Labels from the root to the node being visited
    path: Vec<char>,

    /// Distance rows for every prefix of `path`, `rows[i]` for the first `i` labels
    rows: Vec<Vec<usize>>,

    /// Last row index at which each label occurs on `path`
    last_row: FnvHashMap<char, usize>,

    /// Keys within `bound`
    found: Corrections,

    /// Nodes whose rows were examined
    visited: usize,

    /// Subtrees skipped
    pruned: usize,
}

impl<'q> CorrectionSearch<'q> {
    fn new(target: &'q [char], bound: usize) -> Self {
        Self {
            target,
            bound,
            path: Vec::new(),
            // Turning the empty path into `target[..j]` takes `j` edits.
            rows: vec![(0..=target.len()).collect()],
            last_row: FnvHashMap::default(),
            found: Corrections::default(),
            visited: 0,
            pruned: 0,
        }
    }

    /// Row for the current path extended by `label`.
    fn next_row(&self, label: char) -> Vec<usize> {
        let i = self.rows.len();
        let row = &self.rows[i - 1];
        let mut next = Vec::with_capacity(row.len());
        next.push(i);

        // Last query column before `j` holding `label`.
        let mut last_match_col = 0;
        for j in 1..row.len() {
            let wanted = self.target[j - 1];
            let k = self.last_row.get(&wanted).copied().unwrap_or(0);
            let l = last_match_col;
            let cost = if wanted == label {
                last_match_col = j;
                0
            } else {
                1
            };

            let mut distance = (row[j] + 1).min(next[j - 1] + 1).min(row[j - 1] + cost);
            if k > 0 && l > 0 {
                // Swap path[k - 1] with label, editing everything in between.
                let swapped = self.rows[k - 1][l - 1] + (i - k - 1) + 1 + (j - l - 1);
                distance = distance.min(swapped);
            }
            next.push(distance);
        }
        next
    }

    fn visit<V>(&mut self, node: &TrieNode<V>) {
        self.visited += 1;

        let distance = self
            .rows
            .last()
            .map_or(usize::MAX, |row| row[self.target.len()]);
        if node.value.is_some() && distance <= self.bound {
            self.found.insert(self.path.iter().collect());
        }

        for (label, child) in node.children() {
            let child_row = self.next_row(label);

            // The row minimum never decreases further down a path: every
            // alignment reaching a deeper row, transpositions included, costs
            // at least the minimum of some row above it. Past the bound, the
            // whole subtree is out.
            if child_row.iter().min().is_some_and(|&min| min > self.bound) {
                self.pruned += 1;
                continue;
            }

            self.path.push(label);
            self.rows.push(child_row);
            let shadowed = self.last_row.insert(label, self.path.len());

            self.visit(child);

            match shadowed {
                Some(row) => self.last_row.insert(label, row),
                None => self.last_row.remove(&label),
            };
            self.rows.pop();
            self.path.pop();
        }
    }
}

impl<V> Trie<V> {
    /// Returns the stored keys within `max_distance` edits of `key`.
    ///
    /// Edits are single-character insertions, deletions, substitutions and
    /// swaps of two adjacent characters. `None` lifts the bound, so
    /// `corrections("", None)` returns every stored key.
    ///
    /// # Examples
    ///
    /// ```
    /// use triez_lib::data_structures::trie::Trie;
    ///
    /// let mut trie: Trie<u32> = Trie::new();
    /// for key in ["tea", "eat", "ate", "tee"] {
    ///     trie.add(key, 0).unwrap();
    /// }
    ///
    /// let found = trie.corrections("tae", Some(1)).unwrap();
    /// assert!(found.contains("tea"));
    /// assert!(found.contains("ate"));
    /// assert!(!found.contains("eat"));
    /// ```
    pub fn corrections<K>(&self, key: &K, max_distance: Option<usize>) -> TrieResult<Corrections>
    where
        K: TrieKey + ?Sized,
    {
        let target = key.scalars()?;
        let mut search = CorrectionSearch::new(&target, max_distance.unwrap_or(usize::MAX));
        search.visit(&self.root);

        debug!(
            key_len = target.len(),
            max_distance = ?max_distance,
            visited = search.visited,
            pruned = search.pruned,
            found = search.found.len(),
            "correction search finished"
        );
        Ok(search.found)
    }

    /// Returns every stored key, as an unbounded correction search from the
    /// empty key.
    pub fn keys(&self) -> Corrections {
        let mut search = CorrectionSearch::new(&[], usize::MAX);
        search.visit(&self.root);
        search.found
    }
}
