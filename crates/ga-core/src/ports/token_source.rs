/// Supplies the bearer token for outgoing requests.
pub trait TokenSourcePort: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}
