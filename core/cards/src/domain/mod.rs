//! cards 固有のドメイン型（型と不変条件）

pub mod card_candidate;
pub mod command;
pub mod generation;
pub mod new_card;
pub mod preview;
pub mod set_name;
pub mod source_text;
pub mod tmp_id;

pub use card_candidate::{CardCandidate, RawCandidate, MAX_SIDE_CHARS};
pub use command::{CardsCommand, SourceInput};
pub use generation::{GenerationError, GenerationResult, TokenUsage};
pub use new_card::{NewCard, SetId};
pub use preview::{GenerationPreview, PreviewError};
pub use set_name::{SetName, SetNameError};
pub use source_text::{SourceText, SourceTextError};
pub use tmp_id::TmpId;
