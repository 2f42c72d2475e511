//! A growable-at-construction bitset packed into unsigned words.
//!
//! Used for three things: the cells a board occupies, the belief set of a
//! game (indexed by board ID) and the postings of the inverted index. The
//! word type is generic so callers can trade word width for memory; `u64` is
//! the default everywhere in the crate.

use core::ops::{BitAndAssign, BitOr, BitOrAssign, SubAssign};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};
use thiserror::Error;

/// Errors returned by bitset operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BitSetError {
    /// Index is outside `[0..len)`.
    #[error("IndexOutOfBounds: index={index}, len={len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// A fixed-length set of bits stored in words of type `T`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitSet<T = u64>
where
    T: PrimInt + Unsigned,
{
    words: Vec<T>,
    len: usize,
}

impl<T> BitSet<T>
where
    T: PrimInt + Unsigned,
{
    const WORD_BITS: usize = mem::size_of::<T>() * 8;

    #[inline]
    fn word_count(len: usize) -> usize {
        len.div_ceil(Self::WORD_BITS)
    }

    #[inline]
    fn locate(index: usize) -> (usize, usize) {
        (index / Self::WORD_BITS, index % Self::WORD_BITS)
    }

    /// Create an empty set able to hold `len` bits.
    pub fn new(len: usize) -> Self {
        BitSet {
            words: vec![T::zero(); Self::word_count(len)],
            len,
        }
    }

    /// Create a set with all `len` bits set.
    pub fn full(len: usize) -> Self {
        let mut set = BitSet {
            words: vec![!T::zero(); Self::word_count(len)],
            len,
        };
        set.trim_tail();
        set
    }

    // Bits past `len` in the last word must stay clear so that counts and
    // equality only see the live range.
    fn trim_tail(&mut self) {
        let used = self.len % Self::WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last = *last & ((T::one() << used) - T::one());
            }
        }
    }

    /// Number of addressable bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_zero())
    }

    /// Gets the bit at `index`.
    pub fn get(&self, index: usize) -> Result<bool, BitSetError> {
        self.check_bounds(index)?;
        Ok(self.contains(index))
    }

    /// Membership test; out-of-range indices are simply absent.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        let (w, b) = Self::locate(index);
        ((self.words[w] >> b) & T::one()) != T::zero()
    }

    /// Sets the bit at `index` to 1.
    pub fn set(&mut self, index: usize) -> Result<(), BitSetError> {
        self.check_bounds(index)?;
        let (w, b) = Self::locate(index);
        self.words[w] = self.words[w] | (T::one() << b);
        Ok(())
    }

    /// Clears the bit at `index` to 0.
    pub fn clear(&mut self, index: usize) -> Result<(), BitSetError> {
        self.check_bounds(index)?;
        let (w, b) = Self::locate(index);
        self.words[w] = self.words[w] & !(T::one() << b);
        Ok(())
    }

    #[inline]
    fn check_bounds(&self, index: usize) -> Result<(), BitSetError> {
        if index >= self.len {
            Err(BitSetError::IndexOutOfBounds {
                index,
                len: self.len,
            })
        } else {
            Ok(())
        }
    }

    /// True when `self` and `other` share at least one set bit.
    pub fn intersects(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(&other.words)
            .any(|(a, b)| !(*a & *b).is_zero())
    }

    /// `|self ∩ other|` without materialising the intersection.
    pub fn intersection_count(&self, other: &Self) -> usize {
        debug_assert_eq!(self.len, other.len);
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (*a & *b).count_ones() as usize)
            .sum()
    }

    /// Creates a set of length `len` from an iterator over indices.
    pub fn from_indices<I>(len: usize, iter: I) -> Result<Self, BitSetError>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = Self::new(len);
        for idx in iter {
            set.set(idx)?;
        }
        Ok(set)
    }

    /// Iterator over the set bits in ascending order.
    #[inline]
    pub fn ones(&self) -> Ones<'_, T> {
        Ones {
            words: &self.words,
            word_idx: 0,
            current: self.words.first().copied().unwrap_or_else(T::zero),
        }
    }
}

impl<T> fmt::Debug for BitSet<T>
where
    T: PrimInt + Unsigned,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ones()).finish()
    }
}

/// Iterator over the set bits of a [`BitSet`].
#[derive(Clone)]
pub struct Ones<'a, T>
where
    T: PrimInt + Unsigned,
{
    words: &'a [T],
    word_idx: usize,
    current: T,
}

impl<'a, T> Iterator for Ones<'a, T>
where
    T: PrimInt + Unsigned,
{
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if !self.current.is_zero() {
                let bit = self.current.trailing_zeros() as usize;
                self.current = self.current & (self.current - T::one());
                return Some(self.word_idx * BitSet::<T>::WORD_BITS + bit);
            }
            self.word_idx += 1;
            self.current = *self.words.get(self.word_idx)?;
        }
    }
}

/// In-place intersection.
impl<T> BitAndAssign<&BitSet<T>> for BitSet<T>
where
    T: PrimInt + Unsigned,
{
    fn bitand_assign(&mut self, rhs: &BitSet<T>) {
        debug_assert_eq!(self.len, rhs.len);
        for (a, b) in self.words.iter_mut().zip(&rhs.words) {
            *a = *a & *b;
        }
    }
}

/// In-place union.
impl<T> BitOrAssign<&BitSet<T>> for BitSet<T>
where
    T: PrimInt + Unsigned,
{
    fn bitor_assign(&mut self, rhs: &BitSet<T>) {
        debug_assert_eq!(self.len, rhs.len);
        for (a, b) in self.words.iter_mut().zip(&rhs.words) {
            *a = *a | *b;
        }
    }
}

/// Union of two sets of equal length.
impl<T> BitOr for &BitSet<T>
where
    T: PrimInt + Unsigned,
{
    type Output = BitSet<T>;
    fn bitor(self, rhs: Self) -> BitSet<T> {
        let mut out = self.clone();
        out |= rhs;
        out
    }
}

/// In-place difference (`self − rhs`).
impl<T> SubAssign<&BitSet<T>> for BitSet<T>
where
    T: PrimInt + Unsigned,
{
    fn sub_assign(&mut self, rhs: &BitSet<T>) {
        debug_assert_eq!(self.len, rhs.len);
        for (a, b) in self.words.iter_mut().zip(&rhs.words) {
            *a = *a & !*b;
        }
    }
}
