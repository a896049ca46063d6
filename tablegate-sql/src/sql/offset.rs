#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset(pub i64);
