pub(crate) mod migrate;
pub(crate) mod seed_demo;
pub(crate) mod serve;
