use fxhash::FxHashMap;

use super::variant::{Position, Variant, VariantId, VariantKey};

/// The variant dictionary.
///
/// Variants are inserted on first sighting from any source (kit calls, corrections, the SNP
/// reference, tree markers) and are never removed, so a [`VariantId`] stays valid for the life
/// of the store.
#[derive(Debug, Default, Clone)]
pub struct VariantStore {
    variants: Vec<Variant>,
    by_key: FxHashMap<VariantKey, VariantId>,
    by_position: FxHashMap<Position, Vec<VariantId>>,
    by_name: FxHashMap<String, Vec<VariantId>>,
}

impl VariantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Look up `key`, inserting a new variant when it has not been seen before.
    pub fn get_or_insert(&mut self, key: VariantKey) -> VariantId {
        if let Some(id) = self.by_key.get(&key) {
            return *id;
        }
        let id = VariantId(self.variants.len() as u32);
        self.by_position.entry(key.pos).or_default().push(id);
        self.by_key.insert(key.clone(), id);
        self.variants.push(Variant::new(key));
        id
    }

    pub fn get(&self, key: &VariantKey) -> Option<VariantId> {
        self.by_key.get(key).copied()
    }

    /// Panics if `id` was not issued by this store.
    pub fn variant(&self, id: VariantId) -> &Variant {
        &self.variants[id.index()]
    }

    pub fn key(&self, id: VariantId) -> &VariantKey {
        &self.variant(id).key
    }

    /// Attach a SNP name to a variant. Adding the same name twice is a no-op.
    pub fn add_name(&mut self, id: VariantId, name: &str) {
        let variant = &mut self.variants[id.index()];
        if variant.names.iter().any(|n| n == name) {
            return;
        }
        variant.names.push(name.to_string());
        self.by_name.entry(name.to_string()).or_default().push(id);
    }

    pub fn ids_by_name(&self, name: &str) -> &[VariantId] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn ids_at(&self, pos: Position) -> &[VariantId] {
        self.by_position.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> VariantStore {
        let mut store = VariantStore::new();
        store.get_or_insert(VariantKey::new(100, "A", "G"));
        store.get_or_insert(VariantKey::new(100, "A", "T"));
        store.get_or_insert(VariantKey::new(250, "C", "CT"));
        store
    }

    #[rstest]
    fn test_insert_is_idempotent(mut store: VariantStore) {
        let before = store.len();
        let id = store.get_or_insert(VariantKey::new(100, "A", "T"));
        assert_eq!(store.len(), before);
        assert_eq!(id, VariantId(1));
    }

    #[rstest]
    fn test_ids_at_position(store: VariantStore) {
        assert_eq!(store.ids_at(100), &[VariantId(0), VariantId(1)]);
        assert!(store.ids_at(101).is_empty());
    }

    #[rstest]
    fn test_names_are_many_to_one(mut store: VariantStore) {
        let id = store.get(&VariantKey::new(250, "C", "CT")).unwrap();
        store.add_name(id, "L21");
        store.add_name(id, "S145");
        store.add_name(id, "L21");

        assert_eq!(store.variant(id).names, vec!["L21", "S145"]);
        assert_eq!(store.ids_by_name("S145"), &[id]);
        assert!(store.ids_by_name("M269").is_empty());
    }
}
