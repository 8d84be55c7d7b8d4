use std::fmt;

use strata_store::SlotStore;
use strata_types::{Namespace, Slot, B256, U256};

use crate::error::{LayoutError, LayoutResult};
use crate::word;

/// Dense, index-addressed sequence of words.
///
/// Layout, for base slot `B` holding the element count `n`:
///
/// ```text
/// B          n
/// B + 1      element 0
/// ...
/// B + n      element n - 1
/// B + n + 1  zero, and every slot after it
/// ```
///
/// An array that was never appended to reads as empty; there is no separate
/// creation step.
pub struct DynamicArray<'a, S: SlotStore + ?Sized> {
    store: &'a S,
    namespace: Namespace,
    base: Slot,
}

impl<'a, S: SlotStore + ?Sized> DynamicArray<'a, S> {
    pub fn new(store: &'a S, namespace: Namespace, base: Slot) -> Self {
        Self {
            store,
            namespace,
            base,
        }
    }

    pub fn base(&self) -> Slot {
        self.base
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Current element count, read from the base slot.
    pub fn size(&self) -> LayoutResult<u64> {
        let raw = self.store.get(&self.namespace, &self.base)?;
        word::to_u64(&raw).ok_or(LayoutError::CorruptLength { slot: self.base })
    }

    pub fn is_empty(&self) -> LayoutResult<bool> {
        Ok(self.size()? == 0)
    }

    /// Element at `index`.
    pub fn get(&self, index: u64) -> LayoutResult<B256> {
        self.check_index(index)?;
        Ok(self.store.get(&self.namespace, &self.element_slot(index)?)?)
    }

    /// The last element, or `None` when empty.
    pub fn last(&self) -> LayoutResult<Option<B256>> {
        match self.size()? {
            0 => Ok(None),
            n => Ok(Some(self.store.get(&self.namespace, &self.element_slot(n - 1)?)?)),
        }
    }

    /// Append `value` at index `size()`.
    pub fn append(&self, value: B256) -> LayoutResult<()> {
        let n = self.size()?;
        let slot = self.element_slot(n)?;
        self.store.set(&self.namespace, &slot, value)?;
        self.write_size(n + 1)
    }

    /// Overwrite the element at `index`.
    pub fn set(&self, index: u64, value: B256) -> LayoutResult<()> {
        self.check_index(index)?;
        self.store
            .set(&self.namespace, &self.element_slot(index)?, value)?;
        Ok(())
    }

    /// Remove and return the last element.
    pub fn remove_last(&self) -> LayoutResult<B256> {
        let n = self.size()?;
        if n == 0 {
            return Err(LayoutError::EmptyArray);
        }
        let slot = self.element_slot(n - 1)?;
        self.write_size(n - 1)?;
        Ok(self.store.set(&self.namespace, &slot, B256::ZERO)?)
    }

    /// Cursor over the elements. See [`ArrayIter`] for its semantics.
    pub fn iter(&self) -> ArrayIter<'a, S> {
        ArrayIter {
            array: *self,
            next: 0,
            failed: false,
        }
    }

    /// Snapshot of every element, in index order.
    pub fn to_vec(&self) -> LayoutResult<Vec<B256>> {
        self.iter().collect()
    }

    /// Zero every element slot and reset the size to zero. O(n).
    pub fn clear(&self) -> LayoutResult<()> {
        let n = self.size()?;
        for index in 0..n {
            self.store
                .set(&self.namespace, &self.element_slot(index)?, B256::ZERO)?;
        }
        self.write_size(0)
    }

    fn check_index(&self, index: u64) -> LayoutResult<()> {
        let size = self.size()?;
        if index >= size {
            return Err(LayoutError::IndexOutOfRange { index, size });
        }
        Ok(())
    }

    fn element_slot(&self, index: u64) -> LayoutResult<Slot> {
        self.base
            .checked_add(U256::from(index) + U256::from(1u8))
            .ok_or(LayoutError::SlotOverflow { base: self.base })
    }

    fn write_size(&self, n: u64) -> LayoutResult<()> {
        self.store.set(&self.namespace, &self.base, word::from_u64(n))?;
        Ok(())
    }
}

impl<S: SlotStore + ?Sized> Clone for DynamicArray<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: SlotStore + ?Sized> Copy for DynamicArray<'_, S> {}

impl<S: SlotStore + ?Sized> fmt::Debug for DynamicArray<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArray")
            .field("namespace", &self.namespace)
            .field("base", &self.base)
            .finish()
    }
}

/// Cursor over a [`DynamicArray`].
///
/// The cursor holds only a position. The array size is re-read from the
/// store on every step, so elements appended during iteration are visited
/// and a shrink ends iteration early. Callers that need a stable view should
/// take a [`DynamicArray::to_vec`] snapshot instead. A store error is
/// yielded once, after which the cursor is exhausted.
pub struct ArrayIter<'a, S: SlotStore + ?Sized> {
    array: DynamicArray<'a, S>,
    next: u64,
    failed: bool,
}

impl<S: SlotStore + ?Sized> Iterator for ArrayIter<'_, S> {
    type Item = LayoutResult<B256>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.array.size().and_then(|size| {
            if self.next >= size {
                return Ok(None);
            }
            let slot = self.array.element_slot(self.next)?;
            Ok(Some(self.array.store.get(&self.array.namespace, &slot)?))
        });
        match result {
            Ok(Some(value)) => {
                self.next += 1;
                Some(Ok(value))
            }
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
