pub(crate) mod generate;
pub(crate) mod import;
pub(crate) mod sample;
