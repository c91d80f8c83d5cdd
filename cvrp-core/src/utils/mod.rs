//! This module contains helper functionality.

mod logging;
pub use self::logging::*;

mod parallel;
pub use self::parallel::*;

mod slug;
pub use self::slug::*;
