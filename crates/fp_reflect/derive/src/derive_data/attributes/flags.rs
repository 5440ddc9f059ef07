use proc_macro2::Span;

/// Traits the type declares available, each with the span of its flag.
#[derive(Default, Debug)]
pub(crate) struct TraitAvailableFlags {
    pub default: Option<Span>,
    pub serialize: Option<Span>,
    pub deserialize: Option<Span>,
}

impl TraitAvailableFlags {
    #[inline]
    pub fn count(&self) -> usize {
        [self.default, self.serialize, self.deserialize]
            .iter()
            .filter(|flag| flag.is_some())
            .count()
    }
}
