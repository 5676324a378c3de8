pub(crate) mod color;
pub(crate) mod resolver;
