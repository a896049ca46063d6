#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit(pub i64);
