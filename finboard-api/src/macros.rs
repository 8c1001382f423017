/// Builder-style setter for a field nested in a request body, e.g.
/// `setter!(category.keywords: String)` generates `fn keywords(self, impl Into<String>)`.
macro_rules! setter {
    ($field:ident . $subfield:ident : $ty:ty) => {
        pub fn $subfield<T>(mut self, $subfield: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field.$subfield = $subfield.into();
            self
        }
    };
}

pub(crate) use setter;
