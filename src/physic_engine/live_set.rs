use generational_arena::{Arena, Index};

/// Décision prise pour chaque élément lors d'un parcours [`LiveSet::visit_rev`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retain {
    Keep,
    Remove,
}

/// Collection d'entités vivantes : stockage dans une arena générationnelle,
/// ordre d'insertion conservé dans `order` (ordre de dessin).
#[derive(Debug)]
pub struct LiveSet<T> {
    items: Arena<T>,    // Slots des entités
    order: Vec<Index>,  // Ordre d'insertion des entités vivantes
}

impl<T> Default for LiveSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LiveSet<T> {
    pub fn new() -> Self {
        Self {
            items: Arena::new(),
            order: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Arena::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ajoute une entité en fin de collection.
    pub fn push(&mut self, item: T) -> Index {
        let idx = self.items.insert(item);
        self.order.push(idx);
        idx
    }

    pub fn get(&self, idx: Index) -> Option<&T> {
        self.items.get(idx)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.order.clear();
    }

    /// Itère dans l'ordre d'insertion.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(move |&idx| self.items.get(idx))
    }

    /// Parcourt les entités de la dernière à la première.
    ///
    /// Une entité marquée [`Retain::Remove`] est retirée immédiatement : les
    /// entités restant à visiter sont toutes avant elle, aucun décalage d'indice
    /// ne fait sauter ou revisiter un voisin.
    pub fn visit_rev<F>(&mut self, mut visit: F)
    where
        F: FnMut(&mut T) -> Retain,
    {
        let mut i = self.order.len();
        while i > 0 {
            i -= 1;
            let idx = self.order[i];
            let retain = match self.items.get_mut(idx) {
                Some(item) => visit(item),
                None => Retain::Remove,
            };
            if retain == Retain::Remove {
                self.items.remove(idx);
                self.order.remove(i);
            }
        }
    }

    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.push(item);
        }
    }
}
