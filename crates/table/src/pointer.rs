//! Provides [`RowPtr`], the packed handle designating a row slot within an
//! [`OrderedRowStore`](crate::order_store::OrderedRowStore),
//! along with its components [`SlotIndex`] and [`Generation`].

use core::fmt;

/// Asserts that `$ty` is `$size` bytes in `static_assert_size($ty, $size)`.
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::core::mem::size_of::<$ty>()];
    };
}

/// The index of a slot within the arena of an `OrderedRowStore`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(any(test, feature = "proptest"), derive(proptest_derive::Arbitrary))]
pub struct SlotIndex(pub u32);

static_assert_size!(SlotIndex, 4);

impl SlotIndex {
    /// Returns this index as a `usize`.
    #[inline]
    pub const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// The reuse generation of a slot.
///
/// Vacating a slot bumps its generation,
/// so a `RowPtr` minted for an earlier occupant goes stale
/// rather than aliasing whichever row later reuses the slot.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(any(test, feature = "proptest"), derive(proptest_derive::Arbitrary))]
pub struct Generation(pub u32);

static_assert_size!(Generation, 4);

impl Generation {
    /// The generation of a slot that has never been vacated.
    pub const FIRST: Self = Self(0);

    /// Returns the generation following this one.
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A handle to a row inside an [`OrderedRowStore`](crate::order_store::OrderedRowStore),
/// packing a [`SlotIndex`] and a [`Generation`] into 64 bits.
///
/// A `RowPtr` is live for exactly as long as the row it was minted for
/// stays in its store. Removing the row bumps the slot's generation,
/// which stales every handle minted for the old occupant.
///
/// Notes:
/// - A `RowPtr` is only meaningful to the store that minted it.
///   Resolving it against another store is memory-safe but yields
///   an arbitrary answer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowPtr(pub u64);

static_assert_size!(RowPtr, 8);

// Offsets and bits for the components of `RowPtr`.
const OFFSET_SI: u64 = 0;
const BITS_SI: u64 = 32;
const OFFSET_GEN: u64 = OFFSET_SI + BITS_SI;
const BITS_GEN: u64 = 32;

// Extracting masks for the components of `RowPtr`.
const MASK_SI: u64 = (1 << BITS_SI) - 1;
const MASK_GEN: u64 = (1 << BITS_GEN) - 1;

// Zeroing masks for the components of `RowPtr`.
const MASK_ZERO_SI: u64 = !(MASK_SI << OFFSET_SI);
const MASK_ZERO_GEN: u64 = !(MASK_GEN << OFFSET_GEN);

impl RowPtr {
    /// Returns a row pointer to the slot at `slot` with generation `generation`.
    #[inline(always)]
    pub const fn new(slot: SlotIndex, generation: Generation) -> Self {
        Self(0).with_slot(slot).with_generation(generation)
    }

    /// Returns the index of the slot.
    #[inline(always)]
    pub const fn slot(self) -> SlotIndex {
        SlotIndex(((self.0 >> OFFSET_SI) & MASK_SI) as u32)
    }

    /// Returns the generation the slot had when this pointer was minted.
    #[inline(always)]
    pub const fn generation(self) -> Generation {
        Generation(((self.0 >> OFFSET_GEN) & MASK_GEN) as u32)
    }

    /// Returns a new row pointer with its `SlotIndex` changed to `slot`.
    #[inline(always)]
    pub const fn with_slot(self, slot: SlotIndex) -> Self {
        Self::with(self, slot.0 as u64, MASK_SI, OFFSET_SI, MASK_ZERO_SI)
    }

    /// Returns a new row pointer with its `Generation` changed to `generation`.
    #[inline(always)]
    pub const fn with_generation(self, generation: Generation) -> Self {
        Self::with(self, generation.0 as u64, MASK_GEN, OFFSET_GEN, MASK_ZERO_GEN)
    }

    #[inline(always)]
    const fn with(self, v: u64, mask: u64, offset: u64, zero: u64) -> Self {
        let vmoved = (v & mask) << offset;
        Self((self.0 & zero) | vmoved)
    }
}

impl fmt::Debug for RowPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RowPtr(slot: {:?}, gen: {:?})",
            self.slot().idx(),
            self.generation().0,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn row_ptr_ops_work((si1, gen1, si2, gen2) in (
            any::<SlotIndex>(), any::<Generation>(),
            any::<SlotIndex>(), any::<Generation>(),
        )) {
            let check = |si, generation, ptr: RowPtr| {
                prop_assert_eq!(si, ptr.slot());
                prop_assert_eq!(generation, ptr.generation());
                Ok(())
            };
            let ptr = RowPtr::new(si1, gen1);
            check(si1, gen1, ptr)?;
            check(si2, gen1, ptr.with_slot(si2))?;
            check(si1, gen2, ptr.with_generation(gen2))?;
        }
    }

    #[test]
    fn generation_next_wraps() {
        assert_eq!(Generation::FIRST.next(), Generation(1));
        assert_eq!(Generation(u32::MAX).next(), Generation(0));
    }
}
