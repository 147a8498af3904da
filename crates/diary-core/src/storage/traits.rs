//! Storage trait definition.
//!
//! A session loads the diary once at startup and saves it at most once, at a
//! clean exit. Backends only need to move a whole [`Diary`] in and out.

use crate::error::Result;
use crate::model::Diary;

/// Backing store for a diary.
///
/// Implementations must:
/// - return records in commit order (stable by `written_time`)
/// - preserve every field on save, including unset dates and empty tag lists
/// - replace prior contents on save rather than appending
pub trait DiaryStore {
    /// Read the whole diary.
    ///
    /// # Errors
    ///
    /// - `DiaryError::NotFound` if nothing has been saved yet
    /// - `DiaryError::Parse` if the stored data cannot be decoded
    /// - `DiaryError::Storage` for any other I/O failure
    fn load(&self) -> Result<Diary>;

    /// Overwrite the stored diary.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::Storage` if the data cannot be written.
    fn save(&self, diary: &Diary) -> Result<()>;

    /// Human-readable location, for messages.
    fn location(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct InMemoryStore {
        saved: RefCell<Option<Diary>>,
    }

    impl DiaryStore for InMemoryStore {
        fn load(&self) -> Result<Diary> {
            self.saved
                .borrow()
                .clone()
                .ok_or_else(|| crate::error::DiaryError::NotFound("memory".into()))
        }

        fn save(&self, diary: &Diary) -> Result<()> {
            *self.saved.borrow_mut() = Some(diary.clone());
            Ok(())
        }

        fn location(&self) -> String {
            "memory".into()
        }
    }

    #[test]
    fn test_trait_is_object_safe() {
        let store: Box<dyn DiaryStore> = Box::new(InMemoryStore {
            saved: RefCell::new(None),
        });
        assert!(store.load().unwrap_err().is_not_found());
        store.save(&Diary::new()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }
}
