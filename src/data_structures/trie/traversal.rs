//! Prefix and suffix enumeration.
//!
//! Both query families come in an eager form returning a `Vec<String>` and a
//! lazy form returning a [`TraversalCursor`]. The two share the same walk
//! primitives, [`Preorder`] for subtree enumeration and [`next_prefix_len`]
//! for the path of a single key.
//!
//! A cursor never holds a reference into the trie between steps. Its position
//! is a list of child indices relative to the start node, re-resolved on every
//! step after the generation check, so a cursor that outlived a structural
//! change fails with [`TrieError::StaleIterator`] before it could follow a
//! position that no longer exists.

use std::sync::Arc;

use tracing::{trace, warn};

use super::error::{TrieError, TrieResult};
use super::key::TrieKey;
use super::node::TrieNode;
use super::Trie;

/// Preorder walk over the valued nodes below a start node.
///
/// Children are visited in ascending label order, so the order is fixed for a
/// given trie state.
#[derive(Debug, Clone, Default)]
struct Preorder {
    /// Child index taken at each level below the start node
    path: Vec<usize>,

    /// Edge labels along `path`
    labels: Vec<char>,

    /// Whether the start node itself has been considered
    started: bool,

    /// Whether the walk ran off the end of the subtree
    done: bool,
}

impl Preorder {
    fn new() -> Self {
        Self::default()
    }

    /// Labels from the start node to the current position.
    fn labels(&self) -> &[char] {
        &self.labels
    }

    /// Moves to the next node holding a value and returns it.
    fn advance<'t, V>(&mut self, start: &'t TrieNode<V>) -> Option<&'t TrieNode<V>> {
        if self.done {
            return None;
        }

        let mut stack = Vec::with_capacity(self.path.len() + 1);
        stack.push(start);
        for &index in &self.path {
            let (_, child) = stack.last()?.child_at(index)?;
            stack.push(child);
        }

        if !self.started {
            self.started = true;
            if start.value.is_some() {
                return Some(start);
            }
        }

        loop {
            let node = *stack.last()?;
            if let Some((label, child)) = node.child_at(0) {
                self.path.push(0);
                self.labels.push(label);
                stack.push(child);
            } else {
                // Leaf: climb until an ancestor has an unvisited sibling.
                loop {
                    let Some(index) = self.path.pop() else {
                        self.done = true;
                        return None;
                    };
                    self.labels.pop();
                    stack.pop();
                    let parent = *stack.last()?;
                    if let Some((label, sibling)) = parent.child_at(index + 1) {
                        self.path.push(index + 1);
                        self.labels.push(label);
                        stack.push(sibling);
                        break;
                    }
                }
            }

            let node = *stack.last()?;
            if node.value.is_some() {
                return Some(node);
            }
        }
    }
}

/// Finds the next stored prefix of `key` at or after `*depth` scalar values.
///
/// Returns the prefix length and its node, and leaves `*depth` just past it.
fn next_prefix_len<'t, V>(
    root: &'t TrieNode<V>,
    key: &[char],
    depth: &mut usize,
) -> Option<(usize, &'t TrieNode<V>)> {
    let mut node = key
        .get(..*depth)?
        .iter()
        .try_fold(root, |node, &c| node.child(c))?;
    loop {
        let current = *depth;
        *depth += 1;
        if node.value.is_some() {
            return Some((current, node));
        }
        node = node.child(*key.get(current)?)?;
    }
}

/// What a cursor enumerates.
#[derive(Debug, Clone)]
enum Walk {
    /// Stored keys along the path of the start key, shortest first.
    Prefixes {
        /// Next prefix length to examine
        depth: usize,
    },

    /// Stored keys in the subtree of the start key.
    Suffixes(Preorder),
}

/// A restartable view over prefix or suffix enumeration.
///
/// A cursor is bound to the trie that created it and to that trie's
/// generation at creation time. Every step and every restart checks both;
/// once any node has been created or pruned the cursor is permanently stale,
/// whichever subtree the change touched.
///
/// # Examples
///
/// ```
/// use triez_lib::data_structures::trie::{Trie, TrieError};
///
/// let mut trie: Trie<u32> = Trie::new();
/// for key in ["i", "in", "inn"] {
///     trie.add(key, 0).unwrap();
/// }
///
/// let mut cursor = trie.iter_prefixes("inn", None).unwrap();
/// let first: Vec<String> = cursor.iter(&trie).unwrap().take(1).collect::<Result<_, _>>().unwrap();
/// assert_eq!(first, vec!["i"]);
///
/// // Iterating again starts over.
/// let all: Vec<String> = cursor.iter(&trie).unwrap().collect::<Result<_, _>>().unwrap();
/// assert_eq!(all, vec!["i", "in", "inn"]);
///
/// trie.add("x", 1).unwrap();
/// assert!(matches!(cursor.iter(&trie), Err(TrieError::StaleIterator { .. })));
/// ```
#[derive(Debug, Clone)]
pub struct TraversalCursor {
    /// Identity of the trie the cursor belongs to
    trie_id: u64,

    /// Trie generation observed at creation
    generation: u64,

    /// Key whose prefixes, or below which suffixes, are enumerated
    start: Vec<char>,

    /// Maximum number of keys produced per pass
    limit: Option<usize>,

    /// Keys produced since the last restart
    emitted: usize,

    /// Traversal state
    walk: Walk,
}

impl TraversalCursor {
    fn new(trie_id: u64, generation: u64, start: Vec<char>, limit: Option<usize>, walk: Walk) -> Self {
        Self {
            trie_id,
            generation,
            start,
            limit,
            emitted: 0,
            walk,
        }
    }

    /// The generation this cursor is valid for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The cap on keys produced per pass, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// The key the cursor starts from.
    pub fn start_key(&self) -> String {
        self.start.iter().collect()
    }

    fn check<V>(&self, trie: &Trie<V>) -> TrieResult<()> {
        if trie.id != self.trie_id {
            return Err(TrieError::ForeignCursor);
        }
        if trie.generation != self.generation {
            warn!(
                created = self.generation,
                current = trie.generation,
                "stale trie cursor"
            );
            return Err(TrieError::StaleIterator {
                created: self.generation,
                current: trie.generation,
            });
        }
        Ok(())
    }

    /// Rewinds the cursor to its start state.
    pub fn restart<V>(&mut self, trie: &Trie<V>) -> TrieResult<()> {
        self.check(trie)?;
        self.emitted = 0;
        self.walk = match self.walk {
            Walk::Prefixes { .. } => Walk::Prefixes { depth: 0 },
            Walk::Suffixes(_) => Walk::Suffixes(Preorder::new()),
        };
        trace!(start_len = self.start.len(), "trie cursor restarted");
        Ok(())
    }

    /// Produces the next key together with its value.
    ///
    /// Returns `Ok(None)` once the walk is exhausted or the limit is reached.
    pub fn next_entry<V>(&mut self, trie: &Trie<V>) -> TrieResult<Option<(String, Arc<V>)>> {
        self.check(trie)?;
        if self.limit.is_some_and(|limit| self.emitted >= limit) {
            return Ok(None);
        }

        let found = match &mut self.walk {
            Walk::Prefixes { depth } => next_prefix_len(&trie.root, &self.start, depth)
                .map(|(len, node)| (self.start[..len].iter().collect::<String>(), node)),
            Walk::Suffixes(preorder) => match trie.find(&self.start) {
                Some(start) => preorder.advance(start).map(|node| {
                    let key = self
                        .start
                        .iter()
                        .chain(preorder.labels())
                        .collect::<String>();
                    (key, node)
                }),
                None => None,
            },
        };

        Ok(found.and_then(|(key, node)| {
            let value = node.value.clone()?;
            self.emitted += 1;
            Some((key, value))
        }))
    }

    /// Produces the next key.
    pub fn next_key<V>(&mut self, trie: &Trie<V>) -> TrieResult<Option<String>> {
        Ok(self.next_entry(trie)?.map(|(key, _)| key))
    }

    /// Restarts the cursor and returns an iterator over its keys.
    ///
    /// Each call begins a fresh pass from the start key, whether or not an
    /// earlier pass was consumed completely.
    pub fn iter<'c, 't, V>(&'c mut self, trie: &'t Trie<V>) -> TrieResult<CursorIter<'c, 't, V>> {
        self.restart(trie)?;
        Ok(CursorIter {
            cursor: self,
            trie,
            failed: false,
        })
    }
}

/// Iterator over one pass of a [`TraversalCursor`].
#[derive(Debug)]
pub struct CursorIter<'c, 't, V> {
    cursor: &'c mut TraversalCursor,
    trie: &'t Trie<V>,
    failed: bool,
}

impl<V> Iterator for CursorIter<'_, '_, V> {
    type Item = TrieResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.cursor.next_key(self.trie) {
            Ok(key) => key.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl<V> Trie<V> {
    /// Returns the stored keys that are prefixes of `key`, shortest first.
    ///
    /// `key` itself is included when stored. With `limit`, only the first
    /// `limit` prefixes are returned.
    pub fn prefixes<K>(&self, key: &K, limit: Option<usize>) -> TrieResult<Vec<String>>
    where
        K: TrieKey + ?Sized,
    {
        let chars = key.scalars()?;
        let mut out = Vec::new();
        let mut depth = 0;
        while limit.map_or(true, |limit| out.len() < limit) {
            match next_prefix_len(&self.root, &chars, &mut depth) {
                Some((len, _)) => out.push(chars[..len].iter().collect()),
                None => break,
            }
        }
        Ok(out)
    }

    /// Returns every stored key starting with `prefix`, `prefix` included.
    ///
    /// Keys come in preorder with siblings in ascending scalar-value order. A
    /// prefix with no node yields an empty result.
    pub fn suffixes<K>(&self, prefix: &K, limit: Option<usize>) -> TrieResult<Vec<String>>
    where
        K: TrieKey + ?Sized,
    {
        let chars = prefix.scalars()?;
        let Some(start) = self.find(&chars) else {
            return Ok(Vec::new());
        };

        let mut out = Vec::new();
        let mut walk = Preorder::new();
        while limit.map_or(true, |limit| out.len() < limit) {
            match walk.advance(start) {
                Some(_) => out.push(chars.iter().chain(walk.labels()).collect()),
                None => break,
            }
        }
        Ok(out)
    }

    /// Returns a cursor over the stored prefixes of `key`.
    pub fn iter_prefixes<K>(&self, key: &K, limit: Option<usize>) -> TrieResult<TraversalCursor>
    where
        K: TrieKey + ?Sized,
    {
        let chars = key.scalars()?.into_owned();
        Ok(TraversalCursor::new(
            self.id,
            self.generation,
            chars,
            limit,
            Walk::Prefixes { depth: 0 },
        ))
    }

    /// Returns a cursor over the stored keys starting with `prefix`.
    pub fn iter_suffixes<K>(&self, prefix: &K, limit: Option<usize>) -> TrieResult<TraversalCursor>
    where
        K: TrieKey + ?Sized,
    {
        let chars = prefix.scalars()?.into_owned();
        Ok(TraversalCursor::new(
            self.id,
            self.generation,
            chars,
            limit,
            Walk::Suffixes(Preorder::new()),
        ))
    }

    /// Returns a cursor over every stored key.
    pub fn cursor(&self) -> TraversalCursor {
        TraversalCursor::new(
            self.id,
            self.generation,
            Vec::new(),
            None,
            Walk::Suffixes(Preorder::new()),
        )
    }
}
