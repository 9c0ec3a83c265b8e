//! Error types for the `apiary-genetics` crate.
//!
//! Registry lookups and genome construction return [`GeneticsError`] when
//! their inputs are malformed. Stochastic outcomes never produce errors.

use apiary_types::{AlleleUid, ChromosomeType, MutationId};

use crate::allele::AlleleKind;

/// Errors raised while building or resolving genetic data.
#[derive(Debug, thiserror::Error)]
pub enum GeneticsError {
    /// No allele with this uid is registered.
    #[error("unknown allele: {0}")]
    UnknownAllele(AlleleUid),

    /// An allele uid was registered twice.
    #[error("duplicate allele: {0}")]
    DuplicateAllele(AlleleUid),

    /// The two alleles of a chromosome belong to different categories.
    #[error("chromosome pairs {first} ({first_kind}) with {second} ({second_kind})")]
    MismatchedPair {
        /// Uid of the first allele.
        first: AlleleUid,
        /// Category of the first allele.
        first_kind: AlleleKind,
        /// Uid of the second allele.
        second: AlleleUid,
        /// Category of the second allele.
        second_kind: AlleleKind,
    },

    /// A genome slot holds an allele of the wrong category.
    #[error("slot {slot} expects {expected} alleles but holds {found}")]
    WrongKindForSlot {
        /// The offending slot.
        slot: ChromosomeType,
        /// Category the slot requires.
        expected: AlleleKind,
        /// Category actually found.
        found: AlleleKind,
    },

    /// A genome or template has no species.
    #[error("genome has no species chromosome")]
    MissingSpecies,

    /// A persisted genome record has the wrong number of slots.
    #[error("genome record has {found} slots, expected {expected}")]
    SlotCountMismatch {
        /// Slots a genome has.
        expected: usize,
        /// Slots found in the record.
        found: usize,
    },

    /// No template is registered for this species.
    #[error("no template for species {0}")]
    UnknownTemplate(AlleleUid),

    /// A template for this species was registered twice.
    #[error("duplicate template for species {0}")]
    DuplicateTemplate(AlleleUid),

    /// A mutation id was registered twice.
    #[error("duplicate mutation: {0}")]
    DuplicateMutation(MutationId),

    /// A mutation names a parent that is not a species allele.
    #[error("mutation parent {0} is not a species")]
    NotASpecies(AlleleUid),
}
