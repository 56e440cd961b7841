/// Primitive ReProv API data types and NewType-patterns.
mod ids;
mod service_url;
mod strings;

pub use ids::*;
pub use service_url::*;
pub use strings::*;
