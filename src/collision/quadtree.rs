// Hierarchical 2D space partition used as the collision broad phase.

use log::debug;

use crate::collision::aabb::Aabb;
use crate::config::QuadTreeConfig;

/// A stored key together with the bounds it was inserted with.
#[derive(Debug, Clone, Copy)]
struct Entry<K> {
    key: K,
    bounds: Aabb,
}

/// One region of the tree. Has either no children or exactly four (NW, NE, SW, SE).
#[derive(Debug, Clone)]
struct QuadNode<K> {
    region: Aabb,
    level: u32,
    entries: Vec<Entry<K>>,
    children: Option<Box<[QuadNode<K>; 4]>>,
}

impl<K: Copy + PartialEq> QuadNode<K> {
    fn new(region: Aabb, level: u32) -> Self {
        QuadNode {
            region,
            level,
            entries: Vec::new(),
            children: None,
        }
    }

    /// Subdivision needs room for another level and children no smaller than `min_size`.
    fn can_split(&self, config: &QuadTreeConfig) -> bool {
        self.level < config.max_levels
            && self.region.width() * 0.5 >= config.min_size
            && self.region.height() * 0.5 >= config.min_size
    }

    fn split(&mut self) -> &mut [QuadNode<K>; 4] {
        let level = self.level + 1;
        let [nw, ne, sw, se] = self.region.quadrants();
        debug!(
            "quadtree: splitting level {} node {:?} holding {} entries",
            self.level,
            self.region,
            self.entries.len()
        );
        let children = self.children.insert(Box::new([
            QuadNode::new(nw, level),
            QuadNode::new(ne, level),
            QuadNode::new(sw, level),
            QuadNode::new(se, level),
        ]));
        &mut **children
    }

    fn insert(&mut self, entry: Entry<K>, config: &QuadTreeConfig) {
        if let Some(children) = self.children.as_deref_mut() {
            if let Some(index) = children.iter().position(|c| c.region.contains(&entry.bounds)) {
                children[index].insert(entry, config);
                return;
            }
        }

        self.entries.push(entry);

        if self.children.is_none() && self.entries.len() > config.max_objects && self.can_split(config) {
            let entries = std::mem::take(&mut self.entries);
            let children = self.split();
            let mut straddling = Vec::new();
            for entry in entries {
                match children.iter().position(|c| c.region.contains(&entry.bounds)) {
                    Some(index) => children[index].insert(entry, config),
                    None => straddling.push(entry),
                }
            }
            self.entries = straddling;
        }
    }

    fn retrieve_into(&self, region: &Aabb, out: &mut Vec<K>) {
        out.extend(self.entries.iter().map(|e| e.key));
        if let Some(children) = self.children.as_deref() {
            for child in children.iter().filter(|c| c.region.intersects(region)) {
                child.retrieve_into(region, out);
            }
        }
    }

    fn query_into(&self, region: &Aabb, out: &mut Vec<K>) {
        out.extend(
            self.entries
                .iter()
                .filter(|e| e.bounds.intersects(region))
                .map(|e| e.key),
        );
        if let Some(children) = self.children.as_deref() {
            for child in children.iter().filter(|c| c.region.intersects(region)) {
                child.query_into(region, out);
            }
        }
    }

    fn remove(&mut self, key: K) -> bool {
        if let Some(index) = self.entries.iter().position(|e| e.key == key) {
            // Keep insertion order so retrieval order stays reproducible.
            self.entries.remove(index);
            return true;
        }

        let removed = match self.children.as_deref_mut() {
            Some(children) => children.iter_mut().any(|child| child.remove(key)),
            None => false,
        };
        if removed && self.children.as_deref().is_some_and(|c| c.iter().all(QuadNode::is_prunable)) {
            self.children = None;
        }
        removed
    }

    fn is_prunable(&self) -> bool {
        self.entries.is_empty() && self.children.is_none()
    }

    fn depth(&self) -> u32 {
        match self.children.as_deref() {
            Some(children) => 1 + children.iter().map(QuadNode::depth).max().unwrap_or(0),
            None => 1,
        }
    }

    fn node_count(&self) -> usize {
        1 + self
            .children
            .as_deref()
            .map_or(0, |c| c.iter().map(QuadNode::node_count).sum())
    }
}

/// Quadtree broad phase keyed by any small copyable id (the world uses body handles).
///
/// The tree does not track motion: clear it and re-insert every key once per tick after
/// bodies have moved. A key must not be inserted twice without an intervening `clear` or
/// `remove`.
#[derive(Debug, Clone)]
pub struct QuadTree<K> {
    root: QuadNode<K>,
    config: QuadTreeConfig,
    len: usize,
}

impl<K: Copy + PartialEq> QuadTree<K> {
    /// Creates an empty tree covering `bounds`.
    pub fn new(bounds: Aabb, config: QuadTreeConfig) -> Self {
        QuadTree {
            root: QuadNode::new(bounds, 0),
            config,
            len: 0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.root.region
    }

    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels currently in use (a lone root is depth 1).
    pub fn depth(&self) -> u32 {
        self.root.depth()
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Inserts `key` into the deepest node fully containing `bounds`.
    ///
    /// Bounds that straddle a split line stay at the parent; bounds outside the tree's
    /// region stay at the root.
    pub fn insert(&mut self, key: K, bounds: Aabb) {
        self.root.insert(Entry { key, bounds }, &self.config);
        self.len += 1;
    }

    /// Collects every key stored in a node that `region` reaches.
    ///
    /// The result is a superset of the keys whose bounds intersect `region`; callers filter
    /// with an exact check before the narrow phase.
    pub fn retrieve(&self, region: &Aabb) -> Vec<K> {
        let mut out = Vec::new();
        self.retrieve_into(region, &mut out);
        out
    }

    /// Like [`QuadTree::retrieve`] but appends into a caller-owned buffer.
    pub fn retrieve_into(&self, region: &Aabb, out: &mut Vec<K>) {
        // Root entries are always candidates: they include anything outside the region.
        self.root.retrieve_into(region, out);
    }

    /// Keys whose stored bounds intersect `region` (boundary inclusive).
    pub fn query(&self, region: &Aabb) -> Vec<K> {
        let mut out = Vec::new();
        self.root.query_into(region, &mut out);
        out
    }

    /// Removes `key` wherever it is stored, collapsing children that became empty.
    pub fn remove(&mut self, key: K) -> bool {
        let removed = self.root.remove(key);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Drops all keys and collapses every child node.
    pub fn clear(&mut self) {
        self.root.entries.clear();
        self.root.children = None;
        self.len = 0;
    }

    /// Clears the tree and moves it to cover `bounds`.
    pub fn reset(&mut self, bounds: Aabb) {
        self.clear();
        self.root.region = bounds;
    }
}
