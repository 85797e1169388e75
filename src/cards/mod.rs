//! Card system: catalog entries, physical copies, and the catalog itself.
//!
//! ## Key Types
//!
//! - `CardType`: immutable catalog entry (cost, class, values, micro-actions)
//! - `Card`: one physical copy with identity, owner and trashed flag
//! - `CardCatalog`: explicit, injected registry of card types
//! - `CatalogProvider`: external source of card types

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardClass, CardType, CardTypeId, ATTACK, DEFENSE};
pub use instance::{Card, CardId};
pub use registry::{CardCatalog, CatalogProvider};
