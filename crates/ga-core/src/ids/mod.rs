//! ID type wrappers for type safety.

mod id_macro;
pub mod mutation_id;
pub mod record_id;

pub use mutation_id::MutationId;
pub use record_id::RecordId;
