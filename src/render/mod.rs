pub(crate) mod feature;
pub(crate) mod path;
