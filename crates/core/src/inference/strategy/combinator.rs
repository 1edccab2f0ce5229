use super::{BindingStrategy, LineContext, LineMatch};

/// Try `first`, then `second` if `first` does not recognise the line.
pub struct OrElse<A, B> {
    first: A,
    second: B,
}

impl<A, B> OrElse<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: BindingStrategy, B: BindingStrategy> BindingStrategy for OrElse<A, B> {
    fn match_line(&self, ctx: &LineContext<'_>) -> Option<LineMatch> {
        self.first
            .match_line(ctx)
            .or_else(|| self.second.match_line(ctx))
    }
}
