use std::collections::HashMap;
use egui::{Context, TextureHandle, TextureId, ColorImage, TextureOptions};

/// Caches rasterized fills per named slot ("canvas", "preview-64", ...).
///
/// A slot keeps one texture for the content fingerprint it was last asked
/// for; a new fingerprint replaces it.
pub struct TextureManager {
    /// Cache of textures by slot, with the fingerprint they were built from
    texture_cache: HashMap<String, (u64, TextureHandle)>,
    /// Tracks when each slot was last used
    last_used: HashMap<String, u64>,
    /// Current frame counter for LRU tracking
    current_frame: u64,
    /// Maximum number of slots to cache
    max_cache_size: usize,
}

impl TextureManager {
    /// Creates a new texture manager with the specified cache size
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size,
        }
    }

    /// Increments the frame counter, should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Gets the texture for `slot`, regenerating it when `fingerprint` changed
    pub fn get_or_create_texture<F>(
        &mut self,
        slot: &str,
        fingerprint: u64,
        generator: F,
        ctx: &Context,
    ) -> TextureId
    where
        F: FnOnce() -> ColorImage,
    {
        self.last_used.insert(slot.to_owned(), self.current_frame);

        if let Some((cached, handle)) = self.texture_cache.get_mut(slot) {
            if *cached != fingerprint {
                handle.set(generator(), TextureOptions::NEAREST);
                *cached = fingerprint;
            }
            return handle.id();
        }

        let handle = ctx.load_texture(slot, generator(), TextureOptions::NEAREST);
        let id = handle.id();
        self.texture_cache.insert(slot.to_owned(), (fingerprint, handle));
        self.prune_cache_if_needed();
        id
    }

    /// Prunes least recently used slots beyond the maximum size
    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() <= self.max_cache_size {
            return;
        }

        let mut entries: Vec<(String, u64)> = self.last_used
            .iter()
            .map(|(slot, frame)| (slot.clone(), *frame))
            .collect();

        // Oldest first
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = entries.len() - self.max_cache_size;
        for (slot, _) in entries.iter().take(to_remove) {
            self.texture_cache.remove(slot);
            self.last_used.remove(slot);
        }
    }

    /// Returns the number of textures currently in the cache
    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    #[cfg(test)]
    pub fn fingerprint(&self, slot: &str) -> Option<u64> {
        self.texture_cache.get(slot).map(|(fingerprint, _)| *fingerprint)
    }
}
