use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Client-side identifier of a single submitted mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MutationId(String);

impl_id!(MutationId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_ids_are_unique() {
        let a = MutationId::new();
        let b = MutationId::new();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }
}
