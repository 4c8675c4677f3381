//! Built-graph cache keyed by note count

use super::types::Mindmap;

/// Holds the last built mind map together with the note count it was built
/// from. A lookup with a different count misses.
#[derive(Debug, Default)]
pub struct MindmapCache {
    entry: Option<(usize, Mindmap)>,
}

impl MindmapCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, note_count: usize) -> Option<&Mindmap> {
        match &self.entry {
            Some((count, map)) if *count == note_count => Some(map),
            _ => None,
        }
    }

    pub fn store(&mut self, note_count: usize, mindmap: Mindmap) {
        self.entry = Some((note_count, mindmap));
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_only_for_same_count() {
        let mut cache = MindmapCache::new();
        assert!(cache.get(0).is_none());

        cache.store(3, Mindmap::empty());
        assert!(cache.get(3).is_some());
        assert!(cache.get(4).is_none());
    }

    #[test]
    fn invalidate_clears_entry() {
        let mut cache = MindmapCache::new();
        cache.store(1, Mindmap::empty());
        cache.invalidate();
        assert!(cache.is_empty());
        assert!(cache.get(1).is_none());
    }
}
