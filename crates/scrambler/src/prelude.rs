//! Prelude module - common imports for scrambler users
//!
//! ```rust
//! use scrambler::prelude::*;
//! ```

pub use crate::{
    group_words,
    group_words_with_rng,
    write_groups,
    write_groups_at,
    Error,
    Group,
    GroupCollection,
    GroupOptions,
    GroupSize,
    Result,
    SheetSelector,
    Slot,
    Word,
};
