/// A monotonically incrementing counter scoped to one compiled query.
///
/// Owned by the single builder invocation that created it; placeholder names
/// and table aliases drawn from the same counter never collide within one
/// rendered statement. Never share one across concurrent requests.
#[derive(Debug, Default)]
pub struct Counter(u32);

impl Counter {
    pub fn next(&mut self) -> u32 {
        let current = self.0;
        self.0 += 1;
        current
    }
}
