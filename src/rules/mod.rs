mod matcher;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use matcher::*;
