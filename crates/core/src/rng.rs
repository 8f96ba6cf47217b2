//! RNG module - deterministic piece sources
//!
//! Provides a small LCG and a [`PieceQueue`] that deals shapes from a
//! configurable pool, either as shuffled bags (each shape once per bag),
//! independent uniform draws, or a fixed cycling script.

use crate::types::ShapeId;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// How the next shape is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Randomizer {
    /// Shuffle the pool, deal it out, reshuffle.
    #[default]
    Bag,
    /// Independent uniform draws from the pool.
    Uniform,
}

#[derive(Debug, Clone)]
enum Source {
    Random {
        mode: Randomizer,
        rng: SimpleRng,
        pool: Vec<ShapeId>,
        bag: Vec<ShapeId>,
        bag_index: usize,
    },
    Scripted {
        sequence: Vec<ShapeId>,
        index: usize,
    },
}

/// Deterministic shape dealer with a one-piece lookahead.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    source: Source,
    next: ShapeId,
}

impl PieceQueue {
    /// Random queue over `pool`. An empty pool falls back to the tetrominoes.
    pub fn new(mode: Randomizer, pool: &[ShapeId], seed: u32) -> Self {
        let pool = if pool.is_empty() {
            ShapeId::TETROMINOES.to_vec()
        } else {
            pool.to_vec()
        };
        let mut source = Source::Random {
            mode,
            rng: SimpleRng::new(seed),
            bag: pool.clone(),
            pool,
            bag_index: usize::MAX,
        };
        let next = Self::pull(&mut source);
        Self { source, next }
    }

    /// Queue that cycles through `sequence` forever. An empty sequence deals `T`.
    pub fn scripted(sequence: &[ShapeId]) -> Self {
        let sequence = if sequence.is_empty() {
            vec![ShapeId::T]
        } else {
            sequence.to_vec()
        };
        let mut source = Source::Scripted { sequence, index: 0 };
        let next = Self::pull(&mut source);
        Self { source, next }
    }

    fn pull(source: &mut Source) -> ShapeId {
        match source {
            Source::Random {
                mode: Randomizer::Bag,
                rng,
                pool,
                bag,
                bag_index,
            } => {
                if *bag_index >= bag.len() {
                    bag.clear();
                    bag.extend_from_slice(pool);
                    rng.shuffle(bag);
                    *bag_index = 0;
                }
                let shape = bag[*bag_index];
                *bag_index += 1;
                shape
            }
            Source::Random {
                mode: Randomizer::Uniform,
                rng,
                pool,
                ..
            } => pool[rng.next_range(pool.len() as u32) as usize],
            Source::Scripted { sequence, index } => {
                let shape = sequence[*index % sequence.len()];
                *index = (*index + 1) % sequence.len();
                shape
            }
        }
    }

    /// The shape the next [`PieceQueue::draw`] will return.
    pub fn peek(&self) -> ShapeId {
        self.next
    }

    /// Deal the next shape.
    pub fn draw(&mut self) -> ShapeId {
        let shape = self.next;
        self.next = Self::pull(&mut self.source);
        shape
    }
}
