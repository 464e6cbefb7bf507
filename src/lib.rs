pub mod parsing;
pub mod units;
pub mod util;
