//! Shape catalog - the fixed library of piece templates.
//!
//! The catalog is static for the lifetime of a session: every shape a player
//! can ever receive is pre-enumerated here, reflections and turned variants
//! included, rather than computed at runtime. That keeps sampling trivial
//! and the template set directly testable.
//!
//! Batch generation samples templates distinct by id, so one batch never
//! offers the same template twice even when the shapes look similar.

use rustc_hash::FxHashMap;

use crate::core::GameRng;

use super::piece::{Piece, PieceIds};
use super::shape::Shape;

/// Unique identifier for a shape template in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeId(pub u32);

impl ShapeId {
    /// Create a new shape ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// A registered template: id, display name, footprint.
#[derive(Clone, Debug)]
pub struct ShapeTemplate {
    /// Unique identifier within the catalog.
    pub id: ShapeId,

    /// Human-readable name (for display/debugging).
    pub name: String,

    /// The footprint handed to new pieces.
    pub shape: Shape,
}

/// Registry of shape templates.
///
/// ## Example
///
/// ```
/// use gridblocks::{Shape, ShapeCatalog};
///
/// let mut catalog = ShapeCatalog::new();
/// let id = catalog.register_auto(
///     "domino",
///     Shape::from_rows(vec![vec![1, 1]]).unwrap(),
/// );
///
/// assert_eq!(catalog.get(id).unwrap().name, "domino");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ShapeCatalog {
    templates: FxHashMap<ShapeId, ShapeTemplate>,
    /// Registration order, the deterministic basis for sampling.
    order: Vec<ShapeId>,
    next_id: u32,
}

impl ShapeCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard template set: square, line variants, T/L/Z/S variants
    /// and their reflections, diagonals, cross, X, ring, U, 2x3 block, dot.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        catalog.register_auto("square", template(&[&[1, 1], &[1, 1]]));
        catalog.register_auto("line", template(&[&[1, 1, 1, 1]]));
        catalog.register_auto("tee", template(&[&[0, 1, 0], &[1, 1, 1]]));
        catalog.register_auto("ell", template(&[&[1, 0], &[1, 0], &[1, 1]]));
        catalog.register_auto("zig", template(&[&[1, 1, 0], &[0, 1, 1]]));
        catalog.register_auto("column", template(&[&[1], &[1], &[1], &[1]]));
        catalog.register_auto("ell-flipped", template(&[&[1, 1], &[0, 1], &[0, 1]]));
        catalog.register_auto("ell-corner", template(&[&[1, 0, 0], &[1, 1, 1]]));
        catalog.register_auto("ell-tail", template(&[&[1, 1, 1], &[0, 0, 1]]));
        catalog.register_auto("zag", template(&[&[0, 1, 1], &[1, 1, 0]]));
        catalog.register_auto("tee-flipped", template(&[&[1, 1, 1], &[0, 1, 0]]));
        catalog.register_auto("diagonal", template(&[&[1, 0, 0], &[0, 1, 0], &[0, 0, 1]]));
        catalog.register_auto(
            "diagonal-flipped",
            template(&[&[0, 0, 1], &[0, 1, 0], &[1, 0, 0]]),
        );
        catalog.register_auto("cross", template(&[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]]));
        catalog.register_auto("corners", template(&[&[1, 0, 1], &[0, 1, 0], &[1, 0, 1]]));
        catalog.register_auto("ring", template(&[&[0, 1, 0], &[1, 0, 1], &[0, 1, 0]]));
        catalog.register_auto("cup", template(&[&[1, 1, 1], &[1, 0, 1]]));
        catalog.register_auto("block", template(&[&[1, 1, 1], &[1, 1, 1]]));
        catalog.register_auto("dot", template(&[&[1]]));

        catalog
    }

    /// Register a template.
    ///
    /// Panics if a template with the same ID already exists.
    pub fn register(&mut self, template: ShapeTemplate) {
        if self.templates.contains_key(&template.id) {
            panic!("Shape template with ID {:?} already registered", template.id);
        }
        self.order.push(template.id);
        self.templates.insert(template.id, template);
    }

    /// Register a template with an auto-assigned ID.
    ///
    /// Returns the assigned ID.
    pub fn register_auto(&mut self, name: impl Into<String>, shape: Shape) -> ShapeId {
        let id = ShapeId::new(self.next_id);
        self.next_id += 1;

        self.register(ShapeTemplate {
            id,
            name: name.into(),
            shape,
        });
        id
    }

    /// Get a template by ID.
    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&ShapeTemplate> {
        self.templates.get(&id)
    }

    /// Get the number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over all templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ShapeTemplate> {
        self.order.iter().map(|id| &self.templates[id])
    }

    /// Sample `count` templates, uniformly at random and distinct by ID,
    /// wrapping each as a fresh piece with independent identity.
    ///
    /// Panics if the catalog holds fewer than `count` templates - with a
    /// smaller catalog the distinct-sampling contract cannot be met.
    pub fn generate_batch(
        &self,
        rng: &mut GameRng,
        ids: &mut PieceIds,
        count: usize,
    ) -> Vec<Piece> {
        assert!(
            self.len() >= count,
            "catalog has {} templates, batch needs {}",
            self.len(),
            count
        );

        let mut pool = self.order.clone();
        rng.shuffle_prefix(&mut pool, count);

        pool.iter()
            .take(count)
            .map(|id| Piece::new(ids.alloc(), self.templates[id].shape.clone()))
            .collect()
    }
}

/// Build a catalog template from 0/1 rows.
///
/// Catalog entries are static data; a malformed one is a programmer error.
fn template(rows: &[&[u8]]) -> Shape {
    Shape::from_rows(rows.iter().map(|r| r.to_vec()).collect())
        .expect("catalog template must be a valid shape")
}
