mod response;

pub use response::{envelope, print};
