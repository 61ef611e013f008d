//! Mock catalog transports for tests.
//!
//! Both mocks follow the same pattern: configurable responses, recorded
//! calls for assertions and an injectable one-shot error.

mod mock_criteria_catalog;
mod mock_show_catalog;

pub use mock_criteria_catalog::MockCriteriaCatalog;
pub use mock_show_catalog::MockShowCatalog;
