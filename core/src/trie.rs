//! Character-keyed prefix tree mapping flag spellings to parameters.
//!
//! Nodes live in an arena and refer to their children by index. Children are
//! kept sorted by character so lookups are a binary search and subtree walks
//! visit spellings in lexical order.

use crate::SpecId;

const ROOT: usize = 0;

#[derive(Debug, Clone)]
struct Node {
    ch: char,
    children: Vec<usize>,
    terminal: Option<SpecId>,
}

impl Node {
    fn new(ch: char) -> Self {
        Self {
            ch,
            children: Vec::new(),
            terminal: None,
        }
    }
}

/// Outcome of resolving a name against the trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lookup {
    /// The name is a registered spelling.
    Exact(SpecId),
    /// The name abbreviates exactly one registered spelling.
    Prefix(SpecId),
    /// The name abbreviates several spellings, listed in lexical order.
    Ambiguous(Vec<SpecId>),
    Missing,
}

#[derive(Debug, Clone)]
pub(crate) struct Trie {
    nodes: Vec<Node>,
}

impl Default for Trie {
    fn default() -> Self {
        Self {
            nodes: vec![Node::new('\0')],
        }
    }
}

impl Trie {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn child(&self, node: usize, ch: char) -> Result<usize, usize> {
        self.nodes[node]
            .children
            .binary_search_by_key(&ch, |&index| self.nodes[index].ch)
            .map(|slot| self.nodes[node].children[slot])
    }

    fn walk(&self, spelling: &str) -> Option<usize> {
        spelling
            .chars()
            .try_fold(ROOT, |node, ch| self.child(node, ch).ok())
    }

    /// Returns the parameter bound to exactly this spelling.
    pub(crate) fn get(&self, spelling: &str) -> Option<SpecId> {
        self.walk(spelling).and_then(|node| self.nodes[node].terminal)
    }

    /// Binds `spelling` to `id`, creating nodes as needed.
    ///
    /// Returns the already bound parameter if the spelling is taken.
    pub(crate) fn insert(&mut self, spelling: &str, id: SpecId) -> Result<(), SpecId> {
        let mut node = ROOT;
        for ch in spelling.chars() {
            node = match self.child(node, ch) {
                Ok(existing) => existing,
                Err(slot) => {
                    let created = self.nodes.len();
                    self.nodes.push(Node::new(ch));
                    self.nodes[node].children.insert(slot, created);
                    created
                }
            };
        }
        match self.nodes[node].terminal {
            Some(existing) => Err(existing),
            None => {
                self.nodes[node].terminal = Some(id);
                Ok(())
            }
        }
    }

    /// Resolves `name`, expanding unambiguous prefixes when `allow_prefix`
    /// is set.
    pub(crate) fn resolve(&self, name: &str, allow_prefix: bool) -> Lookup {
        let Some(node) = self.walk(name) else {
            return Lookup::Missing;
        };
        if let Some(id) = self.nodes[node].terminal {
            return Lookup::Exact(id);
        }
        if !allow_prefix {
            return Lookup::Missing;
        }
        let mut found = self.terminals_under(node);
        match found.len() {
            0 => Lookup::Missing,
            1 => Lookup::Prefix(found.remove(0)),
            _ => Lookup::Ambiguous(found),
        }
    }

    fn terminals_under(&self, node: usize) -> Vec<SpecId> {
        let mut found = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let current = &self.nodes[current];
            found.extend(current.terminal);
            stack.extend(current.children.iter().rev());
        }
        found
    }

    /// Number of nodes, root included.
    #[cfg(test)]
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
