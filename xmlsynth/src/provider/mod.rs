//! Value providers
//!
//! A provider turns a [`DataPath`] into a freshly fabricated string. Providers
//! hold no mutable state and take their randomness from the caller, so the
//! same seed reproduces the same values and independent renders can share one
//! provider.

mod fake;
mod path;
mod words;

use rand::RngCore;

pub use fake::FakeProvider;
pub use path::{Category, CompanyField, DataPath, LocationField, PersonField, ProductField};

/// Source of fabricated field values
pub trait ValueProvider: Send + Sync {
    /// Fabricate a value for `path`, or `None` if this provider cannot
    fn value_for(&self, path: DataPath, rng: &mut dyn RngCore) -> Option<String>;

    /// Resolve a `category.field` string
    ///
    /// Unknown paths resolve to `None` rather than an error.
    fn resolve_str(&self, path: &str, rng: &mut dyn RngCore) -> Option<String> {
        path.parse()
            .ok()
            .and_then(|path| self.value_for(path, rng))
    }
}

impl<P: ValueProvider + ?Sized> ValueProvider for &P {
    fn value_for(&self, path: DataPath, rng: &mut dyn RngCore) -> Option<String> {
        (**self).value_for(path, rng)
    }
}

impl<P: ValueProvider + ?Sized> ValueProvider for Box<P> {
    fn value_for(&self, path: DataPath, rng: &mut dyn RngCore) -> Option<String> {
        (**self).value_for(path, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_resolve_str_known_path() {
        let mut rng = StdRng::seed_from_u64(0);
        let value = FakeProvider.resolve_str("location.state_abbr", &mut rng).unwrap();
        assert_eq!(value.len(), 2);
    }

    #[test]
    fn test_resolve_str_unknown_path_is_none() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(FakeProvider.resolve_str("vehicle.plate", &mut rng).is_none());
        assert!(FakeProvider.resolve_str("person.salary", &mut rng).is_none());
        assert!(FakeProvider.resolve_str("garbage", &mut rng).is_none());
    }

    #[test]
    fn test_boxed_provider_delegates() {
        let provider: Box<dyn ValueProvider> = Box::new(FakeProvider);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(provider
            .value_for(DataPath::Person(PersonField::Name), &mut rng)
            .is_some());
    }
}
