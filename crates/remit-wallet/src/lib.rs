//! remit payment confirmation core.
//!
//! Given a [`PaymentIntent`], computes the to-pay / to-receive breakdown,
//! resolves the recipient's display identity, and on confirmation assembles
//! and submits the payment transaction. [`ConfirmationEngine`] ties these
//! together into a session whose display sections can be observed while the
//! user toggles who pays the recipient's fee.

pub mod assemble;
pub mod breakdown;
pub mod engine;
pub mod error;
pub mod format;
pub mod identity;
pub mod model;
pub mod sections;
pub mod submit;

pub use assemble::TransactionAssembler;
pub use breakdown::{build_breakdown, BreakdownRow, BreakdownSection, PaymentBreakdown};
pub use engine::{ConfirmationEngine, ConfirmationHandle, ConfirmationServices, Phase};
pub use error::{AssemblyError, ConfirmationError, IdentityResolutionError, SubmissionError};
pub use format::{AmountFormatter, ConfirmationStrings, DecimalAmountFormatter};
pub use identity::{embedded_email, RecipientIdentityResolver, ResolvedIdentity};
pub use model::{ConfirmationState, PaymentIntent, RecipientSubject};
pub use sections::{render_sections, CellIdentifier, CellModel, CellType, SectionModel};
pub use submit::{CacheReload, TransactionSubmitter};
